/// Lexing errors.
///
/// Raised while turning a source line into tokens: unterminated string
/// literals and characters that do not start any token.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building a statement from
/// tokens. Parse errors include mismatched delimiters, unexpected or trailing
/// tokens, malformed definitions and empty expressions.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while evaluating expressions or
/// compiling a plot: unknown names, arity mismatches, cyclic definitions and
/// failed constant bounds.
pub mod eval_error;
/// Style directive errors.
///
/// Raised by the style directive parser for malformed `#key="value"` pairs.
pub mod style_error;

pub use eval_error::EvalError;
pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use style_error::StyleParseError;

/// Any failure that can be attached to a single script line.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The line could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The tokens do not form a statement.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The statement parsed but could not be evaluated.
    #[error(transparent)]
    Eval(#[from] EvalError),
    /// The trailing style directive is malformed.
    #[error(transparent)]
    Style(#[from] StyleParseError),
}

/// Rejected viewport configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ViewportError {
    /// One of the bounds is NaN or infinite.
    #[error("viewport bounds must be finite, found [{x_min}, {x_max}]")]
    NonFiniteBounds {
        /// Requested lower bound.
        x_min: f64,
        /// Requested upper bound.
        x_max: f64,
    },
    /// The lower bound is not strictly below the upper bound.
    #[error("viewport lower bound {x_min} must be less than upper bound {x_max}")]
    EmptyRange {
        /// Requested lower bound.
        x_min: f64,
        /// Requested upper bound.
        x_max: f64,
    },
    /// Fewer than two samples cannot span a range.
    #[error("sample resolution must be at least 2, found {resolution}")]
    ResolutionTooLow {
        /// Requested resolution.
        resolution: usize,
    },
}

/// A reported, non-fatal failure of one script line.
///
/// The plot compiler never aborts a script because of a broken line: it
/// records a `Diagnostic` and carries on with the next statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 1-based line number of the failing statement.
    pub line:    usize,
    /// Human-readable description of the failure.
    pub message: String,
    /// The underlying error.
    pub error:   Error,
}

impl Diagnostic {
    /// Creates a diagnostic for `line` from any line-level error.
    ///
    /// # Example
    /// ```
    /// use graphite::error::{Diagnostic, EvalError};
    ///
    /// let d = Diagnostic::new(3, EvalError::UndefinedName { name: "q".into() });
    /// assert_eq!(d.line, 3);
    /// assert_eq!(d.to_string(), "Error on line 3: undefined name 'q'");
    /// ```
    pub fn new(line: usize, error: impl Into<Error>) -> Self {
        let error = error.into();
        Self { line,
               message: error.to_string(),
               error }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error on line {}: {}", self.line, self.message)
    }
}
