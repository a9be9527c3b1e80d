/// Binary operator evaluation logic.
///
/// Applies the arithmetic operators elementwise, with strict-mode checks for
/// division by zero.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and unary plus.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the evaluator, variable resolution, cycle detection and the
/// `evaluate`/`evaluate_constant` entry points.
pub mod core;

/// Function evaluation.
///
/// Handles builtin, user-defined and functional calls, argument checking,
/// and the table of reserved names.
pub mod function;
