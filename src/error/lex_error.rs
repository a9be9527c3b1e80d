use crate::ast::Position;

/// Represents all errors that can occur while tokenizing a line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that does not begin any token.
    #[error("column {}: unrecognized character '{text}'", .position.column)]
    UnexpectedCharacter {
        /// The offending source text.
        text:     String,
        /// Where it starts.
        position: Position,
    },
    /// A string literal with no closing quote before the end of the line.
    #[error("column {}: unterminated string literal", .position.column)]
    UnterminatedString {
        /// Where the opening quote is.
        position: Position,
    },
}

impl LexError {
    /// Returns the source position the error refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedCharacter { position, .. } | Self::UnterminatedString { position } => {
                *position
            },
        }
    }
}
