use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, TokenStream},
            unary::parse_unary,
        },
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream of the current line.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
///
/// # Errors
/// A chain long enough to push the tree past
/// [`MAX_EXPRESSION_DEPTH`](crate::interpreter::parser::core::MAX_EXPRESSION_DEPTH)
/// is rejected with `ParseError::NestingTooDeep`.
pub fn parse_additive(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut left = parse_multiplicative(tokens)?;
    let mut height = left.height();
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            height = extend_chain(tokens, height, &right)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    position: *position };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles the left-associative operators `*` and `/` together with implicit
/// multiplication: a factor directly followed by a number, an identifier or
/// an opening parenthesis is multiplied by it, so `2x`, `x(x+1)` and
/// `(x+1)(x-1)` parse exactly like their explicit `*` spellings. All three
/// share one precedence level and are resolved left to right, so `1/2x` is
/// `(1/2)*x`.
///
/// The rule is: `multiplicative := exponent (("*" | "/")? exponent)*`
///
/// # Parameters
/// - `tokens`: Token stream of the current line.
///
/// # Returns
/// A binary expression tree combining exponent-level nodes.
pub fn parse_multiplicative(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut left = parse_exponent(tokens)?;
    let mut height = left.height();
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            tokens.next();
            let right = parse_exponent(tokens)?;
            height = extend_chain(tokens, height, &right)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    position: *position };
            continue;
        }
        if let Some((token, position)) = tokens.peek()
           && starts_implicit_factor(token)
        {
            let right = parse_exponent(tokens)?;
            height = extend_chain(tokens, height, &right)?;
            left = Expr::BinaryOp { left:     Box::new(left),
                                    op:       BinaryOperator::Mul,
                                    right:    Box::new(right),
                                    position: *position, };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// `^` and `**` are the same operator. Exponentiation is right-associative:
/// `a ^ b ^ c` parses as `a ^ (b ^ c)`. Its operands are unary expressions,
/// so `2^-1` is accepted and `-2^2` is `(-2)^2`.
///
/// The rule is: `exponent := unary (("^" | "**") exponent)?`
///
/// # Parameters
/// - `tokens`: Token stream of the current line.
///
/// # Returns
/// An exponentiation expression tree.
pub fn parse_exponent(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let base = parse_unary(tokens)?;
    if let Some((token, position)) = tokens.peek()
       && let Some(BinaryOperator::Pow) = token_to_binary_operator(token)
    {
        tokens.next();
        let exponent = tokens.nested(parse_exponent)?;
        return Ok(Expr::BinaryOp { left:     Box::new(base),
                                   op:       BinaryOperator::Pow,
                                   right:    Box::new(exponent),
                                   position: *position, });
    }
    Ok(base)
}

/// Height of a left-deep chain of height `height` after `right` is joined to
/// it by one more operator.
fn extend_chain(tokens: &TokenStream<'_>, height: usize, right: &Expr) -> ParseResult<usize> {
    let height = 1 + height.max(right.height());
    tokens.check_height(height)?;
    Ok(height)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token is one of `+`, `-`, `*`,
/// `/`, `^` or `**`, and `None` for all other tokens.
///
/// # Example
/// ```
/// use graphite::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::StarStar),
///            Some(BinaryOperator::Pow));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Caret | Token::StarStar => Some(BinaryOperator::Pow),
        _ => None,
    }
}

/// Returns `true` for tokens that may begin the right-hand factor of an
/// implicit multiplication.
const fn starts_implicit_factor(token: &Token) -> bool {
    matches!(token,
             Token::Number(_) | Token::Identifier(_) | Token::LParen)
}
