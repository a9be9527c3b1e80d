/// The lexer module tokenizes script lines for further parsing.
///
/// The lexer reads the raw text of one line and produces a stream of tokens:
/// numbers, identifiers, operators, delimiters, string literals and style
/// markers. Comments are dropped here.
///
/// # Responsibilities
/// - Converts a line into tokens with line and column positions.
/// - Unescapes string literals.
/// - Reports unterminated strings and unrecognized characters.
pub mod lexer;
/// The parser module builds statements from tokens.
///
/// The parser processes the token stream of one line and recognizes the
/// definition and plot forms, the expression grammar with its implicit
/// multiplication rules and the trailing style directive.
///
/// # Responsibilities
/// - Converts tokens into [`Statement`](crate::ast::Statement) values.
/// - Validates grammar and reports errors with their column.
/// - Bounds nesting depth on pathological input.
pub mod parser;
/// The environment module stores user definitions.
///
/// An [`environment::Environment`] maps names to variable and function
/// definitions for the lifetime of one compiled script, and answers which
/// names of an expression are still free.
pub mod environment;
/// The evaluator module computes sample arrays from expression trees.
///
/// The evaluator walks an expression, resolves names against bindings,
/// built-ins and the environment, and applies every operation elementwise
/// over the sampled grid.
///
/// # Responsibilities
/// - Evaluates arithmetic, built-in calls, user functions and functionals.
/// - Detects cyclic definitions and runaway call depth.
/// - Fails fast on division by zero in required constants.
pub mod evaluator;
/// The value module defines the runtime data type of evaluation.
///
/// Every expression evaluates to [`value::core::Samples`]: either a single
/// scalar shared by every sample point or one value per point.
pub mod value;
