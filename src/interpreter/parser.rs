/// Core parsing entry points and the token cursor shared by all parsers.
///
/// Defines [`core::TokenStream`], the nesting-depth guard, and the
/// top-level `parse_expression` function.
pub mod core;

/// Binary operator parsing.
///
/// Implements the additive, multiplicative (explicit and implicit) and
/// exponent precedence levels.
pub mod binary;

/// Unary and primary expression parsing.
///
/// Handles negation, literals, identifiers, function calls, parenthesized
/// groups and parametric pairs.
pub mod unary;

/// Statement parsing.
///
/// Recognizes the line-level forms: function definition, variable
/// definition, parametric plot and expression plot with optional domain.
pub mod statement;

/// Style directive parsing.
///
/// Parses the trailing title string and `#key="value"` pairs of a line.
pub mod style;

/// Utility functions for the parser.
///
/// Provides comma-separated list parsing, identifier parsing and delimiter
/// expectations used throughout the parser.
pub mod utils;
