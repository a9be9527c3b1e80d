use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, TokenStream, parse_expression},
            utils::{expect_closing, parse_comma_separated},
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators `-` (negation) and `+` (no-op). Unary
/// operators are right-associative and bind tighter than every binary
/// operator, so `--x` is `-(-x)` and `-x^2` is `(-x)^2`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "+") unary
///            | primary
/// ```
pub(crate) fn parse_unary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Plus, _)) => UnaryOperator::Plus,
        _ => return parse_primary(tokens),
    };
    let position = tokens.position();
    tokens.next();
    let expr = tokens.nested(parse_unary)?;
    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       position })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric literals
/// - identifiers
/// - function calls
/// - parenthesized expressions and `(x, y)` pairs
///
/// Grammar (simplified):
/// ```text
///     primary := NUMBER
///              | identifier_or_call
///              | "(" expression ("," expression)? ")"
/// ```
pub(crate) fn parse_primary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    match tokens.peek() {
        Some((Token::Number(value), position)) => {
            tokens.next();
            Ok(Expr::Number { value:    *value,
                              position: *position, })
        },
        Some((Token::Identifier(_), _)) => parse_identifier_or_call(tokens),
        Some((Token::LParen, _)) => parse_grouping(tokens),
        Some((Token::EndOfLine | Token::RParen | Token::RBracket, position)) => {
            Err(ParseError::EmptyExpression { position: *position })
        },
        Some((tok, position)) => Err(ParseError::UnexpectedToken { expected: "an expression".to_string(),
                                                                   found:    tok.describe(),
                                                                   position: *position, }),
        None => Err(ParseError::EmptyExpression { position: tokens.position() }),
    }
}

/// Parses a parenthesized expression or a parametric pair.
///
/// Expected forms: `( expression )` or `( expression , expression )`.
///
/// A plain group returns the inner expression as-is (no wrapper node); a
/// pair yields [`Expr::ParametricPair`]. Whether a pair is allowed where it
/// appears is decided by the statement parser.
fn parse_grouping(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let open = tokens.position();
    tokens.next();

    let first = tokens.nested(parse_expression)?;
    if let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        let second = tokens.nested(parse_expression)?;
        expect_closing(tokens, &Token::RParen, '(', open)?;
        return Ok(Expr::ParametricPair { x:        Box::new(first),
                                         y:        Box::new(second),
                                         position: open, });
    }

    expect_closing(tokens, &Token::RParen, '(', open)?;
    Ok(first)
}

/// Parses an identifier or a function call.
///
/// Supported forms:
///
/// - identifier
/// - identifier(arg1, arg2, ...)
///
/// The identifier is a call only if it names a built-in or user-defined
/// function and is immediately followed by `(`. Any other identifier followed
/// by `(` is a variable, and the group after it becomes the right operand of
/// an implicit multiplication, so `x(x+1)` is `x*(x+1)` unless `x` is a
/// function.
fn parse_identifier_or_call(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let (name, position) = match tokens.next() {
        Some((Token::Identifier(n), position)) => (n.clone(), *position),
        Some((tok, position)) => {
            return Err(ParseError::UnexpectedToken { expected: "identifier".to_string(),
                                                     found:    tok.describe(),
                                                     position: *position, });
        },
        None => return Err(ParseError::EmptyExpression { position: tokens.position() }),
    };

    match tokens.peek() {
        Some((Token::LParen, open)) if tokens.is_function(&name) => {
            let open = *open;
            tokens.next();
            let arguments = tokens.nested(|tokens| {
                                      parse_comma_separated(tokens,
                                                            parse_expression,
                                                            &Token::RParen,
                                                            '(',
                                                            open)
                                  })?;
            Ok(Expr::FunctionCall { name,
                                    arguments,
                                    position })
        },
        _ => Ok(Expr::Variable { name, position }),
    }
}
