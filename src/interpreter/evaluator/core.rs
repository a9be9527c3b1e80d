use std::collections::HashMap;

use crate::{
    ast::{Definition, Expr},
    error::EvalError,
    interpreter::{
        environment::Environment,
        evaluator::function::core::{builtin_constant, is_builtin_function},
        value::core::Samples,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Maximum number of nested definition evaluations.
///
/// Cycles are reported before this is reached; the guard only bounds long
/// chains of distinct definitions.
pub const MAX_CALL_DEPTH: usize = 256;

/// Maximum number of nested expression nodes under evaluation, summed over
/// every definition on the stack.
pub const MAX_EVAL_DEPTH: usize = 1024;

/// Evaluates expression trees against an [`Environment`].
///
/// An evaluator carries the bindings of the plotting variables (the
/// *globals*), which stay visible inside every definition body, and the stack
/// of definitions currently being evaluated, which is how cyclic definitions
/// are caught.
///
/// Plain variable definitions only see the globals, so their samples are
/// computed once per evaluator and reused on every later reference.
///
/// ## Usage
///
/// Build one evaluator per plotted statement with
/// [`Evaluator::with_bindings`], or use the [`evaluate`] and
/// [`evaluate_constant`] shortcuts.
pub struct Evaluator<'e> {
    env:     &'e Environment,
    globals: HashMap<String, Samples>,
    active:  Vec<String>,
    depth:   usize,
    nodes:   usize,
    strict:  bool,
    cache:   HashMap<String, Samples>,
}

impl<'e> Evaluator<'e> {
    /// Creates an evaluator with no bound variables.
    #[must_use]
    pub fn new(env: &'e Environment) -> Self {
        Self::with_bindings(env, HashMap::new())
    }

    /// Creates an evaluator in which `bindings` (usually the sampled
    /// variable) are visible everywhere.
    #[must_use]
    pub fn with_bindings(env: &'e Environment, bindings: HashMap<String, Samples>) -> Self {
        Self { env,
               globals: bindings,
               active: Vec::new(),
               depth: 0,
               nodes: 0,
               strict: false,
               cache: HashMap::new() }
    }

    /// Switches to strict mode, in which division by zero is an error
    /// instead of an infinite sample.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Returns `true` in strict mode.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// The environment this evaluator resolves definitions in.
    #[must_use]
    pub const fn environment(&self) -> &'e Environment {
        self.env
    }

    /// Evaluates `expr` and returns its samples.
    ///
    /// This is the main entry point for expression evaluation.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashSet;
    ///
    /// use graphite::{
    ///     ast::Statement,
    ///     interpreter::{
    ///         environment::Environment, evaluator::core::Evaluator, parser::statement::parse_line,
    ///         value::core::Samples,
    ///     },
    /// };
    ///
    /// let Statement::ExpressionPlot { body, .. } = parse_line("2 + 3 * 4", 1, &HashSet::new()).unwrap()
    /// else {
    ///     unreachable!()
    /// };
    /// let env = Environment::new();
    /// assert_eq!(Evaluator::new(&env).evaluate(&body), Ok(Samples::Scalar(14.0)));
    /// ```
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Samples> {
        self.eval(expr, &HashMap::new())
    }

    /// Evaluates `expr` with `locals` (function parameters and `sum`
    /// indices) in scope.
    ///
    /// The evaluator dispatches on the expression variant: literals,
    /// variables, unary and binary operations and function calls. A
    /// parametric pair has no scalar value and is rejected.
    ///
    /// # Errors
    /// Besides the errors of each variant, `CallDepthExceeded` once more than
    /// [`MAX_EVAL_DEPTH`] nodes are nested.
    pub(crate) fn eval(&mut self,
                       expr: &Expr,
                       locals: &HashMap<String, Samples>)
                       -> EvalResult<Samples> {
        if self.nodes >= MAX_EVAL_DEPTH {
            return Err(EvalError::CallDepthExceeded { limit: MAX_EVAL_DEPTH });
        }
        self.nodes += 1;
        let result = self.eval_node(expr, locals);
        self.nodes -= 1;
        result
    }

    fn eval_node(&mut self,
                 expr: &Expr,
                 locals: &HashMap<String, Samples>)
                 -> EvalResult<Samples> {
        match expr {
            Expr::Number { value, .. } => Ok(Samples::Scalar(*value)),
            Expr::Variable { name, .. } => self.eval_variable(name, locals),
            Expr::UnaryOp { op, expr, .. } => {
                let value = self.eval(expr, locals)?;
                Ok(Self::eval_unary(*op, &value))
            },
            Expr::BinaryOp { left, op, right, .. } => {
                let lhs = self.eval(left, locals)?;
                let rhs = self.eval(right, locals)?;
                Self::eval_binary(*op, &lhs, &rhs, self.strict)
            },
            Expr::FunctionCall { name, arguments, .. } => {
                self.eval_function_call(name, arguments, locals)
            },
            Expr::ParametricPair { .. } => Err(EvalError::PairInExpression),
        }
    }

    /// Resolves a variable reference.
    ///
    /// Lookup order: local bindings, plotting variables, builtin constants,
    /// then user definitions. A plain variable definition is evaluated with
    /// no locals, so the parameters of an enclosing function never leak into
    /// it, and its samples are cached.
    fn eval_variable(&mut self, name: &str, locals: &HashMap<String, Samples>) -> EvalResult<Samples> {
        if let Some(value) = self.binding(name, locals) {
            return Ok(value.clone());
        }
        if let Some(value) = builtin_constant(name) {
            return Ok(Samples::Scalar(value));
        }
        if is_builtin_function(name) {
            return Err(EvalError::FunctionUsedAsVariable { name: name.to_string() });
        }

        let env = self.env;
        match env.lookup(name) {
            Some(definition) if definition.is_function() => {
                Err(EvalError::FunctionUsedAsVariable { name: name.to_string() })
            },
            Some(definition) => {
                if let Some(value) = self.cache.get(name) {
                    return Ok(value.clone());
                }
                let value = self.eval_definition(definition, &HashMap::new())?;
                self.cache.insert(name.to_string(), value.clone());
                Ok(value)
            },
            None => Err(EvalError::UndefinedName { name: name.to_string() }),
        }
    }

    /// Evaluates the body of `definition` with `locals` bound.
    ///
    /// # Errors
    /// - `CyclicDefinition` if `definition` is already being evaluated
    ///   further up the stack; the message lists the cycle.
    /// - `CallDepthExceeded` past [`MAX_CALL_DEPTH`] nested definitions.
    pub(crate) fn eval_definition(&mut self,
                                  definition: &Definition,
                                  locals: &HashMap<String, Samples>)
                                  -> EvalResult<Samples> {
        if let Some(start) = self.active.iter().position(|n| *n == definition.name) {
            let mut cycle = self.active[start..].to_vec();
            cycle.push(definition.name.clone());
            return Err(EvalError::CyclicDefinition { cycle: cycle.join(" -> ") });
        }
        if self.depth >= MAX_CALL_DEPTH {
            return Err(EvalError::CallDepthExceeded { limit: MAX_CALL_DEPTH });
        }

        self.active.push(definition.name.clone());
        self.depth += 1;
        let result = self.eval(&definition.body, locals);
        self.depth -= 1;
        self.active.pop();

        result
    }

    /// Current value bound to `name`, looking at locals before globals.
    pub(crate) fn binding<'a>(&'a self,
                              name: &str,
                              locals: &'a HashMap<String, Samples>)
                              -> Option<&'a Samples> {
        locals.get(name).or_else(|| self.globals.get(name))
    }

    /// Runs `f` with the plotting variable `name` temporarily rebound to
    /// `value`, restoring the previous binding afterwards.
    ///
    /// Cached definition samples depend on the globals, so `f` starts with an
    /// empty cache and the outer cache is restored with the binding.
    pub(crate) fn with_global<T>(&mut self,
                                 name: &str,
                                 value: Samples,
                                 f: impl FnOnce(&mut Self) -> T)
                                 -> T {
        let previous = self.globals.insert(name.to_string(), value);
        let cache = std::mem::take(&mut self.cache);
        let result = f(self);
        self.cache = cache;
        match previous {
            Some(previous) => self.globals.insert(name.to_string(), previous),
            None => self.globals.remove(name),
        };
        result
    }
}

/// Evaluates `expr` with `bindings` for its free variables.
///
/// # Errors
/// Returns any `EvalError` raised during evaluation. Non-finite samples are
/// not errors.
pub fn evaluate(env: &Environment,
                expr: &Expr,
                bindings: HashMap<String, Samples>)
                -> EvalResult<Samples> {
    Evaluator::with_bindings(env, bindings).evaluate(expr)
}

/// Evaluates an expression that must be a finite constant, such as a domain
/// bound.
///
/// Evaluation runs in strict mode, so a division by zero fails immediately.
///
/// # Parameters
/// - `env`: Definitions the constant may refer to.
/// - `expr`: The constant expression.
/// - `what`: What the constant is for, used in error messages.
///
/// # Errors
/// - `DivisionByZero` for a zero divisor.
/// - `NonFiniteConstant` if the value is NaN or infinite.
/// - `UndefinedName` if the expression has a free variable.
///
/// # Example
/// ```
/// use graphite::{
///     ast::{BinaryOperator, Expr, Position},
///     error::EvalError,
///     interpreter::{environment::Environment, evaluator::core::evaluate_constant},
/// };
///
/// let p = Position::new(1, 1);
/// let one_over_zero = Expr::BinaryOp { left:     Box::new(Expr::Number { value: 1.0, position: p }),
///                                      op:       BinaryOperator::Div,
///                                      right:    Box::new(Expr::Number { value: 0.0, position: p }),
///                                      position: p, };
///
/// let env = Environment::new();
/// assert_eq!(evaluate_constant(&env, &one_over_zero, "upper bound"),
///            Err(EvalError::DivisionByZero));
/// ```
pub fn evaluate_constant(env: &Environment, expr: &Expr, what: &str) -> EvalResult<f64> {
    let value = Evaluator::new(env).strict().evaluate(expr)?;
    match value.as_scalar() {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(EvalError::NonFiniteConstant { what:  what.to_string(),
                                                      value: v, }),
        None => Err(EvalError::NotConstant { what: what.to_string() }),
    }
}
