use std::collections::BTreeMap;

use crate::{
    error::StyleParseError,
    interpreter::{lexer::Token, parser::core::TokenStream},
};

/// Styling metadata attached to a single script line.
///
/// Holds at most one title plus any number of `#key="value"` pairs. Keys are
/// kept verbatim: the three recognized ones (`color`, `linestyle`,
/// `linewidth`) have typed accessors, everything else is passed through to
/// the renderer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDirective {
    /// Bare double-quoted string of the line, used as the curve label.
    pub title:      Option<String>,
    /// Every `#key="value"` pair, ordered by key. A repeated key keeps its
    /// last value.
    pub properties: BTreeMap<String, String>,
}

impl StyleDirective {
    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// The `color` property.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.get("color")
    }

    /// The `linestyle` property.
    #[must_use]
    pub fn line_style(&self) -> Option<&str> {
        self.get("linestyle")
    }

    /// The `linewidth` property as a number.
    ///
    /// Returns `None` if the key is missing or its value is not a number.
    #[must_use]
    pub fn line_width(&self) -> Option<f64> {
        self.get("linewidth").and_then(|w| w.trim().parse().ok())
    }

    /// Returns `true` if neither a title nor any property was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.properties.is_empty()
    }
}

/// Parses the trailing style directive of a line.
///
/// Consumes tokens up to (but not including) the end of the line. Titles and
/// key-value pairs may appear in any order:
///
/// ```text
///     style := (STRING | "#" IDENT "=" STRING)*
/// ```
///
/// # Errors
/// - `MissingQuotedValue` when the value after `=` is not a string, as in
///   `#color=cyan`.
/// - `ExpectedKey` / `ExpectedAssign` for a truncated `#key=` pair.
/// - `DuplicateTitle` when a second bare string appears.
/// - `UnexpectedToken` for anything else.
///
/// # Example
/// ```
/// use std::collections::HashSet;
///
/// use graphite::interpreter::{
///     lexer::tokenize,
///     parser::{core::TokenStream, style::parse_style},
/// };
///
/// let tokens = tokenize(r#""parabola" #color="red""#, 1).unwrap();
/// let functions = HashSet::new();
/// let style = parse_style(&mut TokenStream::new(&tokens, &functions)).unwrap();
///
/// assert_eq!(style.title.as_deref(), Some("parabola"));
/// assert_eq!(style.color(), Some("red"));
/// ```
pub fn parse_style(tokens: &mut TokenStream<'_>) -> Result<StyleDirective, StyleParseError> {
    let mut style = StyleDirective::default();

    while !tokens.is_at_end() {
        match tokens.next() {
            Some((Token::StringLiteral(title), position)) => {
                if style.title.is_some() {
                    return Err(StyleParseError::DuplicateTitle { position: *position });
                }
                style.title = Some(title.clone());
            },
            Some((Token::Hash, _)) => {
                let (key, value) = parse_pair(tokens)?;
                style.properties.insert(key, value);
            },
            Some((tok, position)) => {
                return Err(StyleParseError::UnexpectedToken { found:    tok.describe(),
                                                              position: *position, });
            },
            None => break,
        }
    }

    Ok(style)
}

/// Parses `key="value"` after a consumed `#`.
fn parse_pair(tokens: &mut TokenStream<'_>) -> Result<(String, String), StyleParseError> {
    let key = match tokens.peek() {
        Some((Token::Identifier(key), _)) => {
            tokens.next();
            key.clone()
        },
        _ => return Err(StyleParseError::ExpectedKey { position: tokens.position() }),
    };

    if !matches!(tokens.peek(), Some((Token::Assign, _))) {
        return Err(StyleParseError::ExpectedAssign { key,
                                                     position: tokens.position() });
    }
    tokens.next();

    match tokens.peek() {
        Some((Token::StringLiteral(value), _)) => {
            tokens.next();
            Ok((key, value.clone()))
        },
        _ => Err(StyleParseError::MissingQuotedValue { key,
                                                       position: tokens.position() }),
    }
}
