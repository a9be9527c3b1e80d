use logos::Logos;

use crate::{ast::Position, error::LexError};

/// Represents a lexical token in a script line.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Numeric literal tokens, such as `3`, `3.14`, `.5` or `2.1e-10`.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Double-quoted string with `\"` escapes, already unescaped.
    #[regex(r#""([^"\\]|\\.)*""#, parse_string, allow_greedy = true)]
    StringLiteral(String),
    /// A string whose closing quote is missing. Never reaches the parser.
    #[regex(r#""([^"\\]|\\.)*"#, allow_greedy = true)]
    UnterminatedString,
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `**`
    #[token("**")]
    StarStar,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `=`
    #[token("=")]
    Assign,
    /// `#`, the style directive marker.
    #[token("#")]
    Hash,
    /// Appended once after the last token of every line.
    EndOfLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Short human-readable description used in error messages.
    ///
    /// # Example
    /// ```
    /// use graphite::interpreter::lexer::Token;
    ///
    /// assert_eq!(Token::RParen.describe(), "')'");
    /// assert_eq!(Token::Identifier("x".into()).describe(), "identifier 'x'");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {n}"),
            Self::Identifier(name) => format!("identifier '{name}'"),
            Self::StringLiteral(_) | Self::UnterminatedString => "string literal".to_string(),
            Self::Comment => "comment".to_string(),
            Self::StarStar => "'**'".to_string(),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::Caret => "'^'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::LBracket => "'['".to_string(),
            Self::RBracket => "']'".to_string(),
            Self::Comma => "','".to_string(),
            Self::Assign => "'='".to_string(),
            Self::Hash => "'#'".to_string(),
            Self::EndOfLine => "end of line".to_string(),
            Self::Ignored => "whitespace".to_string(),
        }
    }
}

/// A token paired with the position of its first character.
pub type Spanned = (Token, Position);

/// Converts one line of source text into a token stream.
///
/// `//` comments are dropped, whitespace outside string literals is
/// insignificant, and the stream always ends with [`Token::EndOfLine`]
/// positioned one column past the last character.
///
/// # Parameters
/// - `source`: The text of a single line.
/// - `line`: Its 1-based line number, recorded in every position.
///
/// # Errors
/// Returns a `LexError` for an unterminated string or a character that does
/// not start any token.
///
/// # Example
/// ```
/// use graphite::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2x // slope", 1).unwrap();
/// let kinds: Vec<Token> = tokens.into_iter().map(|(t, _)| t).collect();
/// assert_eq!(kinds,
///            vec![Token::Number(2.0), Token::Identifier("x".into()), Token::EndOfLine]);
/// ```
pub fn tokenize(source: &str, line: usize) -> Result<Vec<Spanned>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = Position::new(line, column_of(source, lexer.span().start));
        match token {
            Ok(Token::UnterminatedString) => {
                return Err(LexError::UnterminatedString { position });
            },
            Ok(tok) => tokens.push((tok, position)),
            Err(()) => {
                return Err(LexError::UnexpectedCharacter { text: lexer.slice().to_string(),
                                                           position });
            },
        }
    }

    let end = Position::new(line, source.chars().count() + 1);
    tokens.push((Token::EndOfLine, end));

    Ok(tokens)
}

/// Converts a byte offset into a 1-based character column.
fn column_of(source: &str, offset: usize) -> usize {
    source.get(..offset).map_or(offset, |prefix| prefix.chars().count()) + 1
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the slice is not a valid float.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Strips the surrounding quotes from a string literal and resolves the `\"`
/// and `\\` escapes. Any other backslash sequence is kept verbatim.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped @ ('"' | '\\')) => out.push(escaped),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                },
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
