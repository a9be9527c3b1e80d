use crate::ast::Position;

/// Represents all errors that can occur while parsing a statement.
///
/// Every variant records the position of the offending token so the
/// interactive front end can point at it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Found a token other than the one the grammar requires here.
    #[error("column {}: expected {expected}, found {found}", .position.column)]
    UnexpectedToken {
        /// Description of what the grammar wanted.
        expected: String,
        /// Description of the token actually found.
        found:    String,
        /// Where the token starts.
        position: Position,
    },
    /// An opening `(` or `[` was never closed.
    #[error("column {}: unclosed '{delimiter}'", .position.column)]
    UnclosedDelimiter {
        /// The opening delimiter.
        delimiter: char,
        /// Where the opening delimiter is.
        position:  Position,
    },
    /// Found extra tokens after a complete statement.
    #[error("column {}: unexpected {found} after the end of the statement", .position.column)]
    TrailingTokens {
        /// Description of the first extra token.
        found:    String,
        /// Where it starts.
        position: Position,
    },
    /// An expression was required but the line had none.
    #[error("column {}: expected an expression", .position.column)]
    EmptyExpression {
        /// Where the expression should have started.
        position: Position,
    },
    /// A function definition lists the same parameter twice.
    #[error("column {}: duplicate parameter '{name}'", .position.column)]
    DuplicateParameter {
        /// The repeated parameter.
        name:     String,
        /// Where the second occurrence is.
        position: Position,
    },
    /// A function definition with an empty parameter list.
    #[error("column {}: function '{name}' needs at least one parameter", .position.column)]
    MissingParameters {
        /// The function name.
        name:     String,
        /// Where the definition starts.
        position: Position,
    },
    /// Tried to define or bind a built-in name.
    #[error("column {}: '{name}' is a reserved built-in name", .position.column)]
    IdentifierReserved {
        /// The reserved identifier.
        name:     String,
        /// Where it appears.
        position: Position,
    },
    /// A parenthesized `(x, y)` pair used as part of a larger expression.
    #[error("column {}: a (x, y) pair must be the whole plot expression", .position.column)]
    MisplacedPair {
        /// Where the pair starts.
        position: Position,
    },
    /// A parametric pair without its `[var, low, high]` range.
    #[error("column {}: parametric plot requires a range such as [t, 0, 1]", .position.column)]
    MissingParametricRange {
        /// Where the pair starts.
        position: Position,
    },
    /// Parentheses nested deeper than the parser accepts.
    #[error("column {}: expression nested deeper than {limit} levels", .position.column)]
    NestingTooDeep {
        /// The nesting limit.
        limit:    usize,
        /// Where the limit was exceeded.
        position: Position,
    },
}

impl ParseError {
    /// Returns the source position the error refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnclosedDelimiter { position, .. }
            | Self::TrailingTokens { position, .. }
            | Self::EmptyExpression { position }
            | Self::DuplicateParameter { position, .. }
            | Self::MissingParameters { position, .. }
            | Self::IdentifierReserved { position, .. }
            | Self::MisplacedPair { position }
            | Self::MissingParametricRange { position }
            | Self::NestingTooDeep { position, .. } => *position,
        }
    }
}
