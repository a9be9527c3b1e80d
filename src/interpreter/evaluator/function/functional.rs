use std::collections::HashMap;

use crate::{
    ast::Expr,
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Samples,
    },
    util::num::MAX_SAFE_INTEGER,
};

/// Largest number of terms a single `sum` may add up.
pub const MAX_SUM_TERMS: f64 = 100_000.0;

/// Relative step of the central difference used by `diff`.
const DIFF_STEP: f64 = 1e-6;

/// Numeric derivative `diff(expr, var)`.
///
/// Computes `(f(v + h) - f(v - h)) / 2h` at the current value `v` of `var`,
/// with `h` scaled to the magnitude of `v`. `var` must be a plotting
/// variable or a parameter in scope. When it is a plotting variable the
/// shifted value is visible inside definitions too, so after `a = x^2` the
/// expression `diff(a, x)` is `2x`.
///
/// The variable-first spelling `diff(var, expr)` is also accepted: when only
/// the first argument is a bound name, the arguments are swapped.
///
/// # Errors
/// - `ArgumentCountMismatch` unless exactly two arguments are given.
/// - `InvalidArgument` if the second argument is not a plain name.
/// - `UndefinedName` if that name is not bound.
pub(crate) fn diff(evaluator: &mut Evaluator<'_>,
                   arguments: &[Expr],
                   locals: &HashMap<String, Samples>)
                   -> EvalResult<Samples> {
    let [first, second] = arguments else {
        return Err(EvalError::ArgumentCountMismatch { name:     "diff".to_string(),
                                                      expected: "2".to_string(),
                                                      found:    arguments.len(), });
    };
    let is_bound = |e: &Expr| {
        matches!(e, Expr::Variable { name, .. } if evaluator.binding(name, locals).is_some())
    };
    let (body, var) = match (is_bound(first), is_bound(second)) {
        (true, false) => (second, first),
        _ => (first, second),
    };
    let Expr::Variable { name, .. } = var else {
        return Err(EvalError::InvalidArgument { details: format!("the second argument of diff must be a variable name, found {var}") });
    };

    let at = evaluator.binding(name, locals)
                      .cloned()
                      .ok_or_else(|| EvalError::UndefinedName { name: name.clone() })?;
    let step = at.map(|v| DIFF_STEP * v.abs().max(1.0));
    let ahead = at.zip_with(&step, |v, h| v + h)?;
    let behind = at.zip_with(&step, |v, h| v - h)?;

    let (f_ahead, f_behind) = if locals.contains_key(name) {
        let mut shifted = locals.clone();
        shifted.insert(name.clone(), ahead);
        let f_ahead = evaluator.eval(body, &shifted)?;
        shifted.insert(name.clone(), behind);
        let f_behind = evaluator.eval(body, &shifted)?;
        (f_ahead, f_behind)
    } else {
        let f_ahead = evaluator.with_global(name, ahead, |e| e.eval(body, locals))?;
        let f_behind = evaluator.with_global(name, behind, |e| e.eval(body, locals))?;
        (f_ahead, f_behind)
    };

    let rise = f_ahead.zip_with(&f_behind, |a, b| a - b)?;
    rise.zip_with(&step, |d, h| d / (2.0 * h))
}

/// Finite sum `sum(var, start, stop, expr)`.
///
/// Binds `var` to every integer from `start` to `stop` inclusive and adds up
/// `expr`. The bounds are rounded to the nearest integer. An empty range
/// (`stop < start`) sums to zero.
///
/// Bounds may depend on a plotting variable, as in `sum(k, 1, floor(x), 1/k)`.
/// Each sample then gets its own range, and a sample whose bound is not
/// finite becomes a gap.
///
/// # Errors
/// - `ArgumentCountMismatch` unless exactly four arguments are given.
/// - `InvalidArgument` if `var` is not a plain name or a range has more
///   than [`MAX_SUM_TERMS`] terms.
/// - `NonFiniteConstant` for a constant bound that is NaN or infinite.
pub(crate) fn sum(evaluator: &mut Evaluator<'_>,
                  arguments: &[Expr],
                  locals: &HashMap<String, Samples>)
                  -> EvalResult<Samples> {
    let [var, start, stop, body] = arguments else {
        return Err(EvalError::ArgumentCountMismatch { name:     "sum".to_string(),
                                                      expected: "4".to_string(),
                                                      found:    arguments.len(), });
    };
    let Expr::Variable { name, .. } = var else {
        return Err(EvalError::InvalidArgument { details: format!("the first argument of sum must be a variable name, found {var}") });
    };

    let start = evaluator.eval(start, locals)?;
    let stop = evaluator.eval(stop, locals)?;
    let (Some(start), Some(stop)) = (start.as_scalar(), stop.as_scalar()) else {
        return sum_per_sample(evaluator, name, body, locals, &start, &stop);
    };
    let start = sum_bound(start, "sum start")?;
    let stop = sum_bound(stop, "sum stop")?;
    if stop < start {
        return Ok(Samples::Scalar(0.0));
    }
    check_terms(stop - start + 1.0)?;

    let mut scope = locals.clone();
    let mut total = Samples::Scalar(0.0);
    let mut k = start;
    while k <= stop {
        scope.insert(name.clone(), Samples::Scalar(k));
        let term = evaluator.eval(body, &scope)?;
        total = total.zip_with(&term, |a, b| a + b)?;
        k += 1.0;
    }
    Ok(total)
}

/// `sum` with at least one bound varying across samples.
///
/// Step `j` binds `var` to `start_i + j` in every sample `i` at once, so the
/// body is evaluated as many times as the longest range has terms and each
/// sample only adds the steps inside its own range.
fn sum_per_sample(evaluator: &mut Evaluator<'_>,
                  name: &str,
                  body: &Expr,
                  locals: &HashMap<String, Samples>,
                  start: &Samples,
                  stop: &Samples)
                  -> EvalResult<Samples> {
    let n = match (start.len(), stop.len()) {
        (Some(left), Some(right)) if left != right => {
            return Err(EvalError::LengthMismatch { left, right });
        },
        (Some(n), _) | (None, Some(n)) => n,
        (None, None) => 1,
    };

    let mut lows = Vec::with_capacity(n);
    let mut counts = Vec::with_capacity(n);
    let mut totals = Vec::with_capacity(n);
    for i in 0..n {
        let a = start.get(i).unwrap_or(f64::NAN);
        let b = stop.get(i).unwrap_or(f64::NAN);
        if !a.is_finite() || !b.is_finite() {
            lows.push(f64::NAN);
            counts.push(0.0);
            totals.push(f64::NAN);
            continue;
        }
        let (a, b) = (sum_bound(a, "sum start")?, sum_bound(b, "sum stop")?);
        let count = (b - a + 1.0).max(0.0);
        check_terms(count)?;
        lows.push(a);
        counts.push(count);
        totals.push(0.0);
    }

    let steps = counts.iter().copied().fold(0.0, f64::max);
    let mut scope = locals.clone();
    let mut j = 0.0;
    while j < steps {
        let ks: Vec<f64> = lows.iter().map(|a| a + j).collect();
        scope.insert(name.to_string(), Samples::from(ks));
        let term = evaluator.eval(body, &scope)?.into_vec(n)?;
        for ((total, term), count) in totals.iter_mut().zip(term).zip(&counts) {
            if j < *count {
                *total += term;
            }
        }
        j += 1.0;
    }
    Ok(Samples::from(totals))
}

/// Rounds a `sum` bound to the nearest integer.
fn sum_bound(value: f64, what: &str) -> EvalResult<f64> {
    if !value.is_finite() {
        return Err(EvalError::NonFiniteConstant { what: what.to_string(),
                                                  value });
    }
    let rounded = value.round();
    if rounded.abs() > MAX_SAFE_INTEGER {
        return Err(EvalError::InvalidArgument { details: format!("{what} {value} is out of range") });
    }
    Ok(rounded)
}

fn check_terms(terms: f64) -> EvalResult<()> {
    if terms > MAX_SUM_TERMS {
        return Err(EvalError::InvalidArgument { details: format!("sum over {terms} terms exceeds the limit of {MAX_SUM_TERMS}") });
    }
    Ok(())
}
