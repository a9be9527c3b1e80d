use std::collections::HashMap;

use crate::{
    ast::Expr,
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator},
            function::{builtin, functional},
        },
        value::core::Samples,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated arguments, already checked against
/// its arity, and applies itself elementwise.
type BuiltinFn = fn(&[Samples]) -> EvalResult<Samples>;

/// Name of the numeric derivative functional.
pub const DIFF_FUNCTIONAL: &str = "diff";
/// Name of the summation functional.
pub const SUM_FUNCTIONAL: &str = "sum";

/// Functionals receive their arguments unevaluated.
pub const FUNCTIONALS: &[&str] = &[DIFF_FUNCTIONAL, SUM_FUNCTIONAL];

/// Named constants, resolved wherever a variable of that name is read.
pub const BUILTIN_CONSTANTS: &[(&str, f64)] = &[("pi", std::f64::consts::PI),
                                                ("e", std::f64::consts::E),
                                                ("tau", std::f64::consts::TAU)];

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin is variadic with at least `n` arguments.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every builtin function.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sin"     => { arity: Arity::Exact(1), func: builtin::sin },
    "cos"     => { arity: Arity::Exact(1), func: builtin::cos },
    "tan"     => { arity: Arity::Exact(1), func: builtin::tan },
    "asin"    => { arity: Arity::Exact(1), func: builtin::asin },
    "acos"    => { arity: Arity::Exact(1), func: builtin::acos },
    "atan"    => { arity: Arity::Exact(1), func: builtin::atan },
    "sinh"    => { arity: Arity::Exact(1), func: builtin::sinh },
    "cosh"    => { arity: Arity::Exact(1), func: builtin::cosh },
    "tanh"    => { arity: Arity::Exact(1), func: builtin::tanh },
    "asinh"   => { arity: Arity::Exact(1), func: builtin::asinh },
    "acosh"   => { arity: Arity::Exact(1), func: builtin::acosh },
    "atanh"   => { arity: Arity::Exact(1), func: builtin::atanh },
    "exp"     => { arity: Arity::Exact(1), func: builtin::exp },
    "ln"      => { arity: Arity::Exact(1), func: builtin::ln },
    "log"     => { arity: Arity::OneOf(&[1, 2]), func: builtin::log },
    "log10"   => { arity: Arity::Exact(1), func: builtin::log10 },
    "log2"    => { arity: Arity::Exact(1), func: builtin::log2 },
    "sqrt"    => { arity: Arity::Exact(1), func: builtin::sqrt },
    "cbrt"    => { arity: Arity::Exact(1), func: builtin::cbrt },
    "abs"     => { arity: Arity::Exact(1), func: builtin::abs },
    "sign"    => { arity: Arity::Exact(1), func: builtin::sign },
    "sinc"    => { arity: Arity::Exact(1), func: builtin::sinc },
    "floor"   => { arity: Arity::Exact(1), func: builtin::floor },
    "ceil"    => { arity: Arity::Exact(1), func: builtin::ceil },
    "round"   => { arity: Arity::Exact(1), func: builtin::round },
    "trunc"   => { arity: Arity::Exact(1), func: builtin::trunc },
    "degrees" => { arity: Arity::Exact(1), func: builtin::degrees },
    "radians" => { arity: Arity::Exact(1), func: builtin::radians },
    "atan2"   => { arity: Arity::Exact(2), func: builtin::atan2 },
    "hypot"   => { arity: Arity::Exact(2), func: builtin::hypot },
    "pow"     => { arity: Arity::Exact(2), func: builtin::pow },
    "mod"     => { arity: Arity::Exact(2), func: builtin::modulo },
    "gcd"     => { arity: Arity::Exact(2), func: builtin::gcd },
    "lcm"     => { arity: Arity::Exact(2), func: builtin::lcm },
    "min"     => { arity: Arity::AtLeast(1), func: |args| builtin::fold("min", args, f64::min) },
    "max"     => { arity: Arity::AtLeast(1), func: |args| builtin::fold("max", args, f64::max) },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }

    /// Human-readable form used in `ArgumentCountMismatch`.
    fn describe(&self) -> String {
        match self {
            Self::Exact(m) => m.to_string(),
            Self::OneOf(arr) => arr.iter()
                                   .map(ToString::to_string)
                                   .collect::<Vec<_>>()
                                   .join(" or "),
            Self::AtLeast(m) => format!("at least {m}"),
        }
    }
}

/// Returns `true` if `name` is a builtin function or functional.
///
/// # Example
/// ```
/// use graphite::interpreter::evaluator::function::core::is_builtin_function;
///
/// assert!(is_builtin_function("sin"));
/// assert!(is_builtin_function("diff"));
/// assert!(!is_builtin_function("pi"));
/// ```
#[must_use]
pub fn is_builtin_function(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name) || FUNCTIONALS.contains(&name)
}

/// Returns `true` if `name` is a builtin constant such as `pi`.
#[must_use]
pub fn is_builtin_constant(name: &str) -> bool {
    builtin_constant(name).is_some()
}

/// Value of the builtin constant `name`.
#[must_use]
pub fn builtin_constant(name: &str) -> Option<f64> {
    BUILTIN_CONSTANTS.iter()
                     .find(|(n, _)| *n == name)
                     .map(|(_, v)| *v)
}

/// Checks whether a name is reserved and cannot be used for a definition or
/// parameter.
///
/// # Example
/// ```
/// use graphite::interpreter::evaluator::function::core::is_reserved_identifier;
///
/// assert!(is_reserved_identifier("cos"));
/// assert!(is_reserved_identifier("tau"));
/// assert!(!is_reserved_identifier("r"));
/// ```
#[must_use]
pub fn is_reserved_identifier(name: &str) -> bool {
    is_builtin_function(name) || is_builtin_constant(name)
}

impl Evaluator<'_> {
    /// Evaluates a function call.
    ///
    /// The functionals `diff` and `sum` are dispatched first because they
    /// need their arguments unevaluated. Otherwise the name is looked up in
    /// the builtin table, whose arity is checked before the arguments are
    /// evaluated, and finally among user definitions.
    ///
    /// # Errors
    /// - `ArgumentCountMismatch` for a wrong number of arguments.
    /// - `UnknownFunction` if no function of that name exists.
    /// - Any error raised while evaluating the arguments or the body.
    pub(crate) fn eval_function_call(&mut self,
                                     name: &str,
                                     arguments: &[Expr],
                                     locals: &HashMap<String, Samples>)
                                     -> EvalResult<Samples> {
        match name {
            DIFF_FUNCTIONAL => return functional::diff(self, arguments, locals),
            SUM_FUNCTIONAL => return functional::sum(self, arguments, locals),
            _ => {},
        }

        if let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) {
            if !builtin.arity.check(arguments.len()) {
                return Err(EvalError::ArgumentCountMismatch { name:     name.to_string(),
                                                              expected: builtin.arity.describe(),
                                                              found:    arguments.len(), });
            }
            let values = arguments.iter()
                                  .map(|a| self.eval(a, locals))
                                  .collect::<EvalResult<Vec<_>>>()?;
            return (builtin.func)(&values);
        }

        self.call_user_defined_function(name, arguments, locals)
    }

    /// Executes a user-defined function.
    ///
    /// The arguments are evaluated in the caller's scope; the body then sees
    /// only the parameters and the plotting variables.
    fn call_user_defined_function(&mut self,
                                  name: &str,
                                  arguments: &[Expr],
                                  locals: &HashMap<String, Samples>)
                                  -> EvalResult<Samples> {
        let env = self.environment();
        let func = env.lookup(name)
                      .filter(|d| d.is_function())
                      .ok_or_else(|| EvalError::UnknownFunction { name: name.to_string() })?;

        if arguments.len() != func.params.len() {
            return Err(EvalError::ArgumentCountMismatch { name:     name.to_string(),
                                                          expected: func.params.len().to_string(),
                                                          found:    arguments.len(), });
        }

        let values = arguments.iter()
                              .map(|a| self.eval(a, locals))
                              .collect::<EvalResult<Vec<_>>>()?;
        let bindings = func.params
                           .iter()
                           .cloned()
                           .zip(values)
                           .collect::<HashMap<_, _>>();

        self.eval_definition(func, &bindings)
    }
}
