use std::collections::HashSet;

use crate::{
    ast::{Expr, Position},
    error::ParseError,
    interpreter::{lexer::Spanned, lexer::Token, parser::binary::parse_additive},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum nesting of parenthesized groups and call arguments.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Maximum height of an expression tree.
///
/// Operator chains such as `x + x + ... + x` grow the tree one level per
/// operator without nesting any group, so they are charged here.
pub const MAX_EXPRESSION_DEPTH: usize = 512;

/// A cursor over the tokens of one line.
///
/// Besides the tokens themselves the stream carries the set of names that are
/// known to be functions, which decides whether `name(...)` is a call or an
/// implicit multiplication, and the current nesting depth.
#[derive(Clone)]
pub struct TokenStream<'a> {
    tokens:    &'a [Spanned],
    cursor:    usize,
    functions: &'a HashSet<String>,
    depth:     usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream over `tokens`, which must end with
    /// [`Token::EndOfLine`] as produced by
    /// [`tokenize`](crate::interpreter::lexer::tokenize).
    ///
    /// `functions` lists user-defined function names; built-in functions are
    /// always recognized.
    #[must_use]
    pub const fn new(tokens: &'a [Spanned], functions: &'a HashSet<String>) -> Self {
        Self { tokens,
               cursor: 0,
               functions,
               depth: 0 }
    }

    /// Returns the next token without consuming it.
    ///
    /// Past the end the stream keeps answering with its last token, which is
    /// always [`Token::EndOfLine`].
    #[must_use]
    pub fn peek(&self) -> Option<&'a Spanned> {
        self.peek_nth(0)
    }

    /// Returns the token `n` places ahead without consuming anything.
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> Option<&'a Spanned> {
        self.tokens
            .get(self.cursor + n)
            .or_else(|| self.tokens.last())
    }

    /// Consumes and returns the next token.
    pub fn next(&mut self) -> Option<&'a Spanned> {
        let token = self.peek();
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    /// Position of the next token, or of the end of the line.
    #[must_use]
    pub fn position(&self) -> Position {
        self.peek().map_or_else(|| Position::new(0, 1), |(_, position)| *position)
    }

    /// Returns `true` once only [`Token::EndOfLine`] is left.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        matches!(self.peek(), None | Some((Token::EndOfLine, _)))
    }

    /// Returns `true` if `name` should be parsed as a call when followed by
    /// `(`.
    #[must_use]
    pub fn is_function(&self, name: &str) -> bool {
        crate::interpreter::evaluator::function::core::is_builtin_function(name)
        || self.functions.contains(name)
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// # Errors
    /// Returns `ParseError::NestingTooDeep` once [`MAX_NESTING_DEPTH`] is
    /// exceeded, instead of letting the recursion grow the native stack.
    pub fn nested<T>(&mut self,
                     parse: impl FnOnce(&mut Self) -> ParseResult<T>)
                     -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep { limit:    MAX_NESTING_DEPTH,
                                                    position: self.position(), });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Checks that a subtree of the given `height`, built at the current
    /// nesting depth, keeps the whole tree within [`MAX_EXPRESSION_DEPTH`].
    ///
    /// # Errors
    /// Returns `ParseError::NestingTooDeep` when it does not.
    pub fn check_height(&self, height: usize) -> ParseResult<()> {
        if self.depth + height > MAX_EXPRESSION_DEPTH {
            return Err(ParseError::NestingTooDeep { limit:    MAX_EXPRESSION_DEPTH,
                                                    position: self.position(), });
        }
        Ok(())
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, addition, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := additive`
///
/// An expression that would start at the end of the line, or at a token that
/// can only follow an expression (`)`, `]`, `,`, `=`, a string or `#`), is
/// reported as `ParseError::EmptyExpression`.
pub fn parse_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    if let Some((token, position)) = tokens.peek()
       && matches!(token,
                   Token::EndOfLine
                   | Token::RParen
                   | Token::RBracket
                   | Token::Comma
                   | Token::Assign
                   | Token::StringLiteral(_)
                   | Token::Hash)
    {
        return Err(ParseError::EmptyExpression { position: *position });
    }
    parse_additive(tokens)
}
