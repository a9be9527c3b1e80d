use crate::{
    ast::BinaryOperator,
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Samples,
    },
};

impl Evaluator<'_> {
    /// Evaluates a binary arithmetic operation elementwise.
    ///
    /// Scalars broadcast against vectors. Everything follows IEEE-754
    /// semantics: `1/0` is infinite, `0/0` and `(-8)^(1/3)` are NaN, and those
    /// samples become gaps in the curve.
    ///
    /// In `strict` mode, used for constants that must be known exactly, a
    /// zero divisor is an error instead.
    ///
    /// # Errors
    /// - `DivisionByZero` in strict mode.
    /// - `LengthMismatch` for vectors of different lengths.
    ///
    /// # Example
    /// ```
    /// use graphite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Samples},
    /// };
    ///
    /// let two = Samples::Scalar(2.0);
    /// let ten = Samples::Scalar(10.0);
    /// let v = Evaluator::eval_binary(BinaryOperator::Pow, &two, &ten, false).unwrap();
    /// assert_eq!(v, Samples::Scalar(1024.0));
    ///
    /// let zero = Samples::Scalar(0.0);
    /// let v = Evaluator::eval_binary(BinaryOperator::Div, &two, &zero, false).unwrap();
    /// assert_eq!(v, Samples::Scalar(f64::INFINITY));
    /// assert!(Evaluator::eval_binary(BinaryOperator::Div, &two, &zero, true).is_err());
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Samples,
                       right: &Samples,
                       strict: bool)
                       -> EvalResult<Samples> {
        match op {
            BinaryOperator::Add => left.zip_with(right, |a, b| a + b),
            BinaryOperator::Sub => left.zip_with(right, |a, b| a - b),
            BinaryOperator::Mul => left.zip_with(right, |a, b| a * b),
            BinaryOperator::Div => {
                if strict && right.any(|b| b == 0.0) {
                    return Err(EvalError::DivisionByZero);
                }
                left.zip_with(right, |a, b| a / b)
            },
            BinaryOperator::Pow => left.zip_with(right, f64::powf),
        }
    }
}
