/// Built-in function implementations.
///
/// Elementwise mathematical functions available by default: trigonometric,
/// hyperbolic, exponential and logarithmic functions, rounding, and the
/// variadic `min`/`max`.
pub mod builtin;
/// Builtin lookup table and function-call dispatch.
///
/// Declares the builtin table, the reserved names and the evaluation of both
/// builtin and user-defined calls.
pub mod core;
/// The functionals `diff` and `sum`.
///
/// Unlike builtins they receive their arguments unevaluated, because one
/// argument names a variable to bind.
pub mod functional;
