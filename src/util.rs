/// Numeric helpers.
///
/// Safe `usize` to `f64` conversion and evenly spaced sample grids, shared by
/// the evaluator and the plot compiler.
pub mod num;
