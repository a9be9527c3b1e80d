use std::collections::HashSet;

use crate::{
    ast::{Definition, Domain, Expr, Position, Statement},
    error::{Error, ParseError},
    interpreter::{
        evaluator::function::core::is_reserved_identifier,
        lexer::{Spanned, Token, tokenize},
        parser::{
            core::{ParseResult, TokenStream, parse_expression},
            style::{StyleDirective, parse_style},
            utils::{expect_closing, expect_token, parse_comma_separated, parse_identifier},
        },
    },
};

/// Tokenizes and parses one script line.
///
/// # Parameters
/// - `source`: Text of the line.
/// - `line`: 1-based line number.
/// - `functions`: Names of user-defined functions anywhere in the script.
///
/// # Errors
/// Returns the [`LexError`](crate::error::LexError),
/// [`ParseError`] or [`StyleParseError`](crate::error::StyleParseError)
/// raised for the line, wrapped in [`Error`].
///
/// # Example
/// ```
/// use std::collections::HashSet;
///
/// use graphite::{ast::Statement, interpreter::parser::statement::parse_line};
///
/// let statement = parse_line("a = 2", 1, &HashSet::new()).unwrap();
/// assert!(matches!(statement, Statement::Definition { .. }));
/// ```
pub fn parse_line(source: &str, line: usize, functions: &HashSet<String>) -> Result<Statement, Error> {
    let tokens = tokenize(source, line)?;
    let mut stream = TokenStream::new(&tokens, functions);
    parse_statement(&mut stream)
}

/// Parses a single statement followed by an optional style directive.
///
/// The forms are tried in this order:
/// - a function definition `name(p, q) = expr`,
/// - a variable definition `name = expr`,
/// - a plot, either an expression with an optional `[var, low, high]`
///   domain or a `(x, y)[var, low, high]` parametric pair.
///
/// Whatever remains before the end of the line is handed to
/// [`parse_style`]; the line must then be exhausted.
///
/// # Errors
/// Returns a [`ParseError`] or a
/// [`StyleParseError`](crate::error::StyleParseError) wrapped in [`Error`].
pub fn parse_statement(tokens: &mut TokenStream<'_>) -> Result<Statement, Error> {
    let line = tokens.position().line;

    let statement = if function_definition_end(tokens).is_some() {
        let definition = parse_function_definition(tokens, line)?;
        let style = parse_trailing_style(tokens)?;
        Statement::Definition { definition, style }
    } else if let Some((Token::Identifier(_), _)) = tokens.peek()
              && let Some((Token::Assign, _)) = tokens.peek_nth(1)
    {
        let definition = parse_variable_definition(tokens, line)?;
        let style = parse_trailing_style(tokens)?;
        Statement::Definition { definition, style }
    } else {
        parse_plot(tokens, line)?
    };

    if let Some((tok, position)) = tokens.peek()
       && !tokens.is_at_end()
    {
        return Err(ParseError::TrailingTokens { found:    tok.describe(),
                                                position: *position, }.into());
    }

    Ok(statement)
}

/// Returns the function name if `tokens` spells a function definition head
/// `name(...) =`.
///
/// Used by the script pre-pass that collects every user function before any
/// line is parsed, so that `f(x)` is read as a call even above the line that
/// defines `f`.
///
/// # Example
/// ```
/// use graphite::interpreter::{lexer::tokenize, parser::statement::function_head};
///
/// let tokens = tokenize("f(x) = x^2", 1).unwrap();
/// assert_eq!(function_head(&tokens), Some("f"));
///
/// let tokens = tokenize("f(x)", 1).unwrap();
/// assert_eq!(function_head(&tokens), None);
/// ```
#[must_use]
pub fn function_head(tokens: &[Spanned]) -> Option<&str> {
    let functions = HashSet::new();
    let stream = TokenStream::new(tokens, &functions);
    function_definition_end(&stream)?;
    match tokens.first() {
        Some((Token::Identifier(name), _)) => Some(name.as_str()),
        _ => None,
    }
}

/// Looks ahead for `IDENT "(" ... ")" "="` and returns the offset of `=`.
///
/// Parentheses inside the parameter list are balanced so that malformed heads
/// such as `f((x)) = 1` still reach the definition parser and get a precise
/// error.
fn function_definition_end(tokens: &TokenStream<'_>) -> Option<usize> {
    if !matches!(tokens.peek(), Some((Token::Identifier(_), _)))
       || !matches!(tokens.peek_nth(1), Some((Token::LParen, _)))
    {
        return None;
    }

    let mut depth = 0usize;
    let mut offset = 1;
    loop {
        match tokens.peek_nth(offset) {
            Some((Token::LParen, _)) => depth += 1,
            Some((Token::RParen, _)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            },
            Some((Token::EndOfLine, _)) | None => return None,
            Some(_) => {},
        }
        offset += 1;
    }

    match tokens.peek_nth(offset + 1) {
        Some((Token::Assign, _)) => Some(offset + 1),
        _ => None,
    }
}

/// Parses `name(param, ...) = body`.
///
/// # Errors
/// - `IdentifierReserved` if the name or a parameter is a built-in.
/// - `MissingParameters` for `name() = ...`.
/// - `DuplicateParameter` when a parameter name repeats.
fn parse_function_definition(tokens: &mut TokenStream<'_>, line: usize) -> ParseResult<Definition> {
    let (name, name_position) = parse_identifier(tokens)?;
    ensure_not_reserved(&name, name_position)?;

    let open = tokens.position();
    expect_token(tokens, &Token::LParen)?;
    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen, '(', open)?;
    if params.is_empty() {
        return Err(ParseError::MissingParameters { name,
                                                   position: open });
    }

    let mut seen = HashSet::new();
    for (param, position) in &params {
        ensure_not_reserved(param, *position)?;
        if !seen.insert(param.as_str()) {
            return Err(ParseError::DuplicateParameter { name:     param.clone(),
                                                        position: *position, });
        }
    }

    expect_token(tokens, &Token::Assign)?;
    let body = parse_scalar_expression(tokens)?;

    Ok(Definition { name,
                    params: params.into_iter().map(|(p, _)| p).collect(),
                    body,
                    line })
}

/// Parses `name = body`.
fn parse_variable_definition(tokens: &mut TokenStream<'_>, line: usize) -> ParseResult<Definition> {
    let (name, position) = parse_identifier(tokens)?;
    ensure_not_reserved(&name, position)?;
    expect_token(tokens, &Token::Assign)?;
    let body = parse_scalar_expression(tokens)?;

    Ok(Definition { name,
                    params: Vec::new(),
                    body,
                    line })
}

/// Parses an expression or parametric plot with its optional domain and
/// style.
fn parse_plot(tokens: &mut TokenStream<'_>, line: usize) -> Result<Statement, Error> {
    let body = parse_expression(tokens)?;
    let domain = match tokens.peek() {
        Some((Token::LBracket, _)) => Some(parse_domain(tokens)?),
        _ => None,
    };
    let style = parse_trailing_style(tokens)?;

    match body {
        Expr::ParametricPair { x, y, position } => {
            let Some(domain) = domain else {
                return Err(ParseError::MissingParametricRange { position }.into());
            };
            reject_pairs(&x)?;
            reject_pairs(&y)?;
            Ok(Statement::ParametricPlot { x: *x,
                                           y: *y,
                                           domain,
                                           style,
                                           line })
        },
        body => {
            reject_pairs(&body)?;
            Ok(Statement::ExpressionPlot { body,
                                           domain,
                                           style,
                                           line })
        },
    }
}

/// Parses a `[var, low, high]` domain suffix.
///
/// Grammar: `domain := "[" IDENT "," expression "," expression "]"`
fn parse_domain(tokens: &mut TokenStream<'_>) -> ParseResult<Domain> {
    let open = tokens.position();
    expect_token(tokens, &Token::LBracket)?;

    let (var, position) = parse_identifier(tokens)?;
    ensure_not_reserved(&var, position)?;
    expect_token(tokens, &Token::Comma)?;
    let low = parse_scalar_expression(tokens)?;
    expect_token(tokens, &Token::Comma)?;
    let high = parse_scalar_expression(tokens)?;
    expect_closing(tokens, &Token::RBracket, '[', open)?;

    Ok(Domain { var, low, high })
}

/// Parses the style directive if the line continues with one.
fn parse_trailing_style(tokens: &mut TokenStream<'_>) -> Result<StyleDirective, Error> {
    match tokens.peek() {
        Some((Token::StringLiteral(_) | Token::Hash, _)) => Ok(parse_style(tokens)?),
        _ => Ok(StyleDirective::default()),
    }
}

/// Parses an expression in which `(x, y)` pairs are not allowed.
fn parse_scalar_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let expr = parse_expression(tokens)?;
    reject_pairs(&expr)?;
    Ok(expr)
}

/// Fails with `MisplacedPair` at the first pair found in `expr`.
fn reject_pairs(expr: &Expr) -> ParseResult<()> {
    match expr {
        Expr::Number { .. } | Expr::Variable { .. } => Ok(()),
        Expr::UnaryOp { expr, .. } => reject_pairs(expr),
        Expr::BinaryOp { left, right, .. } => {
            reject_pairs(left)?;
            reject_pairs(right)
        },
        Expr::FunctionCall { arguments, .. } => arguments.iter().try_for_each(reject_pairs),
        Expr::ParametricPair { position, .. } => {
            Err(ParseError::MisplacedPair { position: *position })
        },
    }
}

fn ensure_not_reserved(name: &str, position: Position) -> ParseResult<()> {
    if is_reserved_identifier(name) {
        return Err(ParseError::IdentifierReserved { name: name.to_string(),
                                                    position });
    }
    Ok(())
}
