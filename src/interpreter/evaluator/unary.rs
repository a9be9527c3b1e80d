use crate::{
    ast::UnaryOperator,
    interpreter::{evaluator::core::Evaluator, value::core::Samples},
};

impl Evaluator<'_> {
    /// Evaluates a unary operation on a sample set.
    ///
    /// Supported operators:
    /// - `Negate`: elementwise negation.
    /// - `Plus`: identity.
    ///
    /// # Example
    /// ```
    /// use graphite::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Samples},
    /// };
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Negate, &Samples::from(vec![1.0, -2.0]));
    /// assert_eq!(v, Samples::from(vec![-1.0, 2.0]));
    /// ```
    #[must_use]
    pub fn eval_unary(op: UnaryOperator, value: &Samples) -> Samples {
        match op {
            UnaryOperator::Negate => value.map(|x| -x),
            UnaryOperator::Plus => value.clone(),
        }
    }
}
