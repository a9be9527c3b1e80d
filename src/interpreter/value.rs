/// Scalar-or-vector sample values with broadcasting arithmetic.
pub mod core;
