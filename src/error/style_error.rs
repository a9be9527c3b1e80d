use crate::ast::Position;

/// Represents all errors the style directive parser can report.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleParseError {
    /// `#key=` not followed by a double-quoted value, e.g. `#color=cyan`.
    #[error("column {}: style key '{key}' needs a quoted value, e.g. #{key}=\"...\"", .position.column)]
    MissingQuotedValue {
        /// The style key.
        key:      String,
        /// Where the value should start.
        position: Position,
    },
    /// `#` not followed by a key name.
    #[error("column {}: expected a style key after '#'", .position.column)]
    ExpectedKey {
        /// Where the key should start.
        position: Position,
    },
    /// `#key` not followed by `=`.
    #[error("column {}: expected '=' after style key '{key}'", .position.column)]
    ExpectedAssign {
        /// The style key.
        key:      String,
        /// Where the `=` should be.
        position: Position,
    },
    /// More than one bare title string on a line.
    #[error("column {}: a line may carry only one title", .position.column)]
    DuplicateTitle {
        /// Where the second title starts.
        position: Position,
    },
    /// A token that has no meaning inside a style directive.
    #[error("column {}: unexpected {found} in style directive", .position.column)]
    UnexpectedToken {
        /// Description of the token.
        found:    String,
        /// Where it starts.
        position: Position,
    },
}
