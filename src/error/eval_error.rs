/// Represents all errors that can occur during evaluation and plot
/// compilation.
///
/// Evaluation errors are not tied to a column: a failure may surface while
/// evaluating a definition that lives on another line. The plot compiler
/// attaches the line of the statement being compiled when it turns one into a
/// [`Diagnostic`](crate::error::Diagnostic).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A name is neither bound, built in, nor defined.
    #[error("undefined name '{name}'")]
    UndefinedName {
        /// The unresolved name.
        name: String,
    },
    /// Called a function that does not exist.
    #[error("unknown function '{name}'")]
    UnknownFunction {
        /// The function name.
        name: String,
    },
    /// Referenced a function definition as if it were a variable.
    #[error("'{name}' is a function and must be called with arguments")]
    FunctionUsedAsVariable {
        /// The function name.
        name: String,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("'{name}' expects {expected} argument(s), found {found}")]
    ArgumentCountMismatch {
        /// The function name.
        name:     String,
        /// Human-readable arity, e.g. `2` or `at least 1`.
        expected: String,
        /// Number of arguments supplied.
        found:    usize,
    },
    /// A definition re-entered itself before returning.
    #[error("cyclic definition: {cycle}")]
    CyclicDefinition {
        /// The chain of definitions forming the cycle, e.g. `a -> b -> a`.
        cycle: String,
    },
    /// Evaluation nested deeper than the call-depth guard allows.
    #[error("evaluation nested deeper than {limit} calls")]
    CallDepthExceeded {
        /// The depth limit.
        limit: usize,
    },
    /// Attempted division by zero inside a required constant.
    #[error("division by zero in constant expression")]
    DivisionByZero,
    /// A required constant (such as a domain bound) is not a finite number.
    #[error("{what} must be a finite constant, found {value}")]
    NonFiniteConstant {
        /// What the constant was needed for.
        what:  String,
        /// The value it evaluated to.
        value: f64,
    },
    /// A required constant depends on the sampled variable.
    #[error("{what} must not depend on a plotting variable")]
    NotConstant {
        /// What the constant was needed for.
        what: String,
    },
    /// A plot expression has more than one undefined free variable.
    #[error("cannot choose an independent variable among {names}")]
    AmbiguousVariable {
        /// The candidate names, comma separated.
        names: String,
    },
    /// The explicit domain variable differs from the variable in the body.
    #[error("domain variable '{domain}' does not match free variable '{found}'")]
    DomainVariableMismatch {
        /// Variable named in `[var, low, high]`.
        domain: String,
        /// Undefined variable found in the body.
        found:  String,
    },
    /// Tried to (re)define a built-in function or constant.
    #[error("cannot redefine built-in '{name}'")]
    BuiltinRedefinition {
        /// The built-in name.
        name: String,
    },
    /// A `(x, y)` pair reached scalar evaluation.
    #[error("a (x, y) pair cannot be used as a number")]
    PairInExpression,
    /// An argument was invalid or out of range.
    #[error("invalid argument: {details}")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
    /// Two sample arrays of different lengths met in one operation.
    #[error("sample length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the left operand.
        left:  usize,
        /// Length of the right operand.
        right: usize,
    },
}
