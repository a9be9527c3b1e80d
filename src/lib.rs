//! # graphite
//!
//! graphite is the engine of a script-driven graphing calculator written in
//! Rust. It lexes, parses and evaluates a small plotting language (explicit
//! functions, variable and function definitions, polar and parametric curves,
//! per-line styling) and compiles a whole script into curves ready to draw.
//!
//! ```
//! use graphite::{Viewport, compile_script};
//!
//! let script = r#"
//! // a damped wave and its envelope
//! k = 0.3
//! env(x) = exp(-k abs(x))
//! env(x) sin(4x)   "wave"     #color="blue"
//! env(x)           "envelope" #linestyle="--"
//! (cos(t), sin(t))[t, 0, 2pi]
//! "#;
//!
//! let out = compile_script(script, &Viewport::default());
//! assert!(out.is_clean());
//! assert_eq!(out.curves.len(), 3);
//! assert_eq!(out.curves[0].style.color(), Some("blue"));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed scripts.
///
/// This module declares the `Expr` tree, definitions, domains and the
/// statement forms a script line can take. The AST is built by the parser
/// and consumed by the evaluator and the plot compiler.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions to expression nodes for error reporting.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// Every failure mode has its own enum; [`error::Error`] wraps them all and
/// [`error::Diagnostic`] ties one to the script line it came from.
///
/// # Responsibilities
/// - Defines error enums for lexer, parser, style parser and evaluator.
/// - Attaches positions and detailed messages for context.
/// - Reports per-line failures without aborting the script.
pub mod error;
/// Lexer, parser, environment and evaluator of the plotting language.
///
/// This module ties together the front end and the numeric core: it turns a
/// line into a statement and evaluates expressions over sample grids.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, environment and evaluator.
/// - Provides entry points for parsing lines and evaluating expressions.
pub mod interpreter;
/// Compiling scripts into curves.
///
/// This module owns the viewport, the curve representation, discontinuity
/// splitting and the plot compiler that walks a script line by line.
pub mod plot;
/// General numeric helpers.
///
/// Safe integer to float conversion and sample grid construction shared by
/// the evaluator and the plot compiler.
pub mod util;

pub use error::{Diagnostic, Error};
pub use plot::{
    compiler::{CompileOutput, compile, compile_script, parse_script},
    curve::{Curve, CurveKind},
    viewport::Viewport,
};
