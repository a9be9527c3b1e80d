use crate::{
    ast::Position,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, TokenStream},
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by function argument lists, parameter lists and
/// domain suffixes. It repeatedly calls `parse_item` to parse one element,
/// expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening delimiter.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
/// - `opening`: The opening delimiter character, for error messages.
/// - `open`: Position of the opening delimiter.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the line ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, T>(
    tokens: &mut TokenStream<'a>,
    parse_item: impl Fn(&mut TokenStream<'a>) -> ParseResult<T>,
    closing: &Token,
    opening: char,
    open: Position)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((Token::EndOfLine, _)) | None => {
                return Err(ParseError::UnclosedDelimiter { delimiter: opening,
                                                           position:  open, });
            },
            Some((tok, position)) => {
                return Err(ParseError::UnexpectedToken { expected: format!("',' or {}",
                                                                           closing.describe()),
                                                         found:    tok.describe(),
                                                         position: *position, });
            },
        }
    }
    Ok(items)
}

/// Consumes the closing delimiter of a group opened at `open`.
///
/// # Errors
/// - `UnclosedDelimiter` if the line ends first.
/// - `UnexpectedToken` if any other token is found.
pub(in crate::interpreter::parser) fn expect_closing(tokens: &mut TokenStream<'_>,
                                                     closing: &Token,
                                                     opening: char,
                                                     open: Position)
                                                     -> ParseResult<()> {
    match tokens.peek() {
        Some((tok, _)) if tok == closing => {
            tokens.next();
            Ok(())
        },
        Some((Token::EndOfLine, _)) | None => {
            Err(ParseError::UnclosedDelimiter { delimiter: opening,
                                                position:  open, })
        },
        Some((tok, position)) => Err(ParseError::UnexpectedToken { expected: closing.describe(),
                                                                   found:    tok.describe(),
                                                                   position: *position, }),
    }
}

/// Consumes a specific punctuation token.
///
/// # Errors
/// Returns `UnexpectedToken` describing `expected` and the token found.
pub(in crate::interpreter::parser) fn expect_token(tokens: &mut TokenStream<'_>,
                                                   expected: &Token)
                                                   -> ParseResult<()> {
    match tokens.peek() {
        Some((tok, _)) if tok == expected => {
            tokens.next();
            Ok(())
        },
        Some((tok, position)) => Err(ParseError::UnexpectedToken { expected: expected.describe(),
                                                                   found:    tok.describe(),
                                                                   position: *position, }),
        None => Err(ParseError::UnexpectedToken { expected: expected.describe(),
                                                  found:    Token::EndOfLine.describe(),
                                                  position: tokens.position(), }),
    }
}

/// Parses a plain identifier and returns its name and position.
///
/// The next token must be `Token::Identifier`. This function does not check
/// for reserved identifiers; callers must handle that.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier(tokens: &mut TokenStream<'_>)
                                                       -> ParseResult<(String, Position)> {
    match tokens.peek() {
        Some((Token::Identifier(s), position)) => {
            tokens.next();
            Ok((s.clone(), *position))
        },
        Some((tok, position)) => Err(ParseError::UnexpectedToken { expected: "identifier".to_string(),
                                                                   found:    tok.describe(),
                                                                   position: *position, }),
        None => Err(ParseError::UnexpectedToken { expected: "identifier".to_string(),
                                                  found:    Token::EndOfLine.describe(),
                                                  position: tokens.position(), }),
    }
}
