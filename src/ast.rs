use std::fmt;

use crate::interpreter::parser::style::StyleDirective;

/// A 1-based location in the script source.
///
/// Lines count from the top of the script, columns count characters (not
/// bytes) from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Source line number.
    pub line:   usize,
    /// Source column number.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and a column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An abstract syntax tree node representing an expression.
///
/// Trees are built once by the parser, owned by the statement that produced
/// them and never mutated afterwards. Every variant records the position of
/// the token that introduced it so evaluation failures can point back at the
/// source.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal such as `3.14` or `2e-3`.
    Number {
        /// The literal value.
        value:    f64,
        /// Where the literal starts.
        position: Position,
    },
    /// Reference to a variable, constant or definition by name.
    Variable {
        /// Name being referenced.
        name:     String,
        /// Where the identifier starts.
        position: Position,
    },
    /// A unary operation (negation or unary plus).
    UnaryOp {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Where the operator starts.
        position: Position,
    },
    /// A binary arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Where the operator starts. For implicit multiplication this is the
        /// start of the right operand.
        position: Position,
    },
    /// Function call expression (e.g. `sin(x)` or `f(1, 2)`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments in call order.
        arguments: Vec<Self>,
        /// Where the function name starts.
        position:  Position,
    },
    /// A parenthesized `(x, y)` pair; only valid as the whole body of a
    /// parametric plot.
    ParametricPair {
        /// The x-coordinate expression.
        x:        Box<Self>,
        /// The y-coordinate expression.
        y:        Box<Self>,
        /// Where the opening parenthesis is.
        position: Position,
    },
}

impl Expr {
    /// Gets the source position of `self`.
    /// ## Example
    /// ```
    /// use graphite::ast::{Expr, Position};
    ///
    /// let expr = Expr::Variable { name:     "x".to_string(),
    ///                             position: Position::new(5, 3), };
    ///
    /// assert_eq!(expr.position().line, 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Number { position, .. }
            | Self::Variable { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::FunctionCall { position, .. }
            | Self::ParametricPair { position, .. } => *position,
        }
    }

    /// Number of nodes on the longest path from `self` down to a leaf.
    #[must_use]
    pub fn height(&self) -> usize {
        match self {
            Self::Number { .. } | Self::Variable { .. } => 1,
            Self::UnaryOp { expr, .. } => 1 + expr.height(),
            Self::BinaryOp { left, right, .. } => 1 + left.height().max(right.height()),
            Self::FunctionCall { arguments, .. } => {
                1 + arguments.iter().map(Self::height).max().unwrap_or(0)
            },
            Self::ParametricPair { x, y, .. } => 1 + x.height().max(y.height()),
        }
    }
}

impl fmt::Display for Expr {
    /// Renders the tree fully parenthesized, e.g. `2x^2` becomes
    /// `(2 * (x ^ 2))`. Positions are not part of the rendering, so two trees
    /// parsed from differently spelled but equivalent sources print the same.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Variable { name, .. } => write!(f, "{name}"),
            Self::UnaryOp { op: UnaryOperator::Negate, expr, .. } => write!(f, "(-{expr})"),
            Self::UnaryOp { op: UnaryOperator::Plus, expr, .. } => write!(f, "(+{expr})"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::FunctionCall { name, arguments, .. } => {
                write!(f, "{name}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
            Self::ParametricPair { x, y, .. } => write!(f, "({x}, {y})"),
        }
    }
}

/// A binary arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication, explicit (`*`) or implicit (`2x`).
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^` or `**`)
    Pow,
}

/// A unary arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Unary plus (`+x`), kept so the tree mirrors the source.
    Plus,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        };
        write!(f, "{operator}")
    }
}

/// A named variable or function introduced by an `=` statement.
///
/// Plain variables have an empty parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    /// The defined name.
    pub name:   String,
    /// Parameter names in declaration order.
    pub params: Vec<String>,
    /// The body evaluated on every reference or call.
    pub body:   Expr,
    /// Line of the defining statement.
    pub line:   usize,
}

impl Definition {
    /// Returns `true` when this definition declares a function (`f(x) = ...`)
    /// rather than a plain variable.
    #[must_use]
    pub const fn is_function(&self) -> bool {
        !self.params.is_empty()
    }
}

/// An explicit `[var, low, high]` sampling range.
///
/// The bounds are kept as expressions and evaluated as constants when the
/// statement is compiled, so they may refer to defined names such as `pi`.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    /// The sampled variable.
    pub var:  String,
    /// Lower bound expression.
    pub low:  Expr,
    /// Upper bound expression.
    pub high: Expr,
}

/// A parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A variable or function definition. Never plotted, except for the
    /// polar convention on `r`.
    Definition {
        /// The definition itself.
        definition: Definition,
        /// Style applied if the definition turns out to be a polar curve.
        style:      StyleDirective,
    },
    /// An explicit plot `y = body(var)`.
    ExpressionPlot {
        /// Expression to sample.
        body:   Expr,
        /// Optional explicit domain; the viewport is used otherwise.
        domain: Option<Domain>,
        /// Style directive of the line.
        style:  StyleDirective,
        /// Source line.
        line:   usize,
    },
    /// A parametric plot `(x(t), y(t))[t, low, high]`.
    ParametricPlot {
        /// The x-coordinate expression.
        x:      Expr,
        /// The y-coordinate expression.
        y:      Expr,
        /// The parameter and its range.
        domain: Domain,
        /// Style directive of the line.
        style:  StyleDirective,
        /// Source line.
        line:   usize,
    },
}

impl Statement {
    /// Gets the source line of the statement.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Definition { definition, .. } => definition.line,
            Self::ExpressionPlot { line, .. } | Self::ParametricPlot { line, .. } => *line,
        }
    }

    /// Gets the style directive attached to the statement.
    #[must_use]
    pub const fn style(&self) -> &StyleDirective {
        match self {
            Self::Definition { style, .. }
            | Self::ExpressionPlot { style, .. }
            | Self::ParametricPlot { style, .. } => style,
        }
    }
}
