use crate::{
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::core::Samples},
};

/// Defines an elementwise builtin of one argument.
///
/// The generated function applies the given `f64 -> f64` function to every
/// sample. Out-of-domain inputs yield NaN samples rather than errors, so
/// `sqrt(x)` over `[-1, 1]` simply has a gap on the negative half.
///
/// # Example
/// ```
/// use graphite::interpreter::{evaluator::function::builtin::sin, value::core::Samples};
///
/// let r = sin(&[Samples::Scalar(std::f64::consts::FRAC_PI_2)]).unwrap();
/// assert_eq!(r, Samples::Scalar(1.0));
/// ```
macro_rules! unary_builtin {
    ($($fname:ident => $f:expr),* $(,)?) => {
        $(
            pub fn $fname(args: &[Samples]) -> EvalResult<Samples> {
                Ok(first(args)?.map($f))
            }
        )*
    };
}

/// Defines an elementwise builtin of two arguments.
macro_rules! binary_builtin {
    ($($fname:ident => $f:expr),* $(,)?) => {
        $(
            pub fn $fname(args: &[Samples]) -> EvalResult<Samples> {
                match args {
                    [a, b] => a.zip_with(b, $f),
                    _ => Err(arity_error(stringify!($fname), "2", args.len())),
                }
            }
        )*
    };
}

unary_builtin! {
    sin => f64::sin,
    cos => f64::cos,
    tan => f64::tan,
    asin => f64::asin,
    acos => f64::acos,
    atan => f64::atan,
    sinh => f64::sinh,
    cosh => f64::cosh,
    tanh => f64::tanh,
    asinh => f64::asinh,
    acosh => f64::acosh,
    atanh => f64::atanh,
    exp => f64::exp,
    ln => f64::ln,
    log10 => f64::log10,
    log2 => f64::log2,
    sqrt => f64::sqrt,
    cbrt => f64::cbrt,
    abs => f64::abs,
    floor => f64::floor,
    ceil => f64::ceil,
    round => f64::round,
    trunc => f64::trunc,
    degrees => f64::to_degrees,
    radians => f64::to_radians,
    sign => sign_of,
    sinc => normalized_sinc,
}

binary_builtin! {
    atan2 => f64::atan2,
    hypot => f64::hypot,
    pow => f64::powf,
    modulo => f64::rem_euclid,
    gcd => integer_gcd,
    lcm => integer_lcm,
}

/// Natural logarithm `log(x)` or logarithm to a base `log(x, b)`.
///
/// # Example
/// ```
/// use graphite::interpreter::{evaluator::function::builtin::log, value::core::Samples};
///
/// let r = log(&[Samples::Scalar(8.0), Samples::Scalar(2.0)]).unwrap();
/// assert!((r.as_scalar().unwrap() - 3.0).abs() < 1e-12);
///
/// let r = log(&[Samples::Scalar(1.0)]).unwrap();
/// assert_eq!(r, Samples::Scalar(0.0));
/// ```
pub fn log(args: &[Samples]) -> EvalResult<Samples> {
    match args {
        [x] => Ok(x.map(f64::ln)),
        [x, base] => x.zip_with(base, f64::log),
        _ => Err(arity_error("log", "1 or 2", args.len())),
    }
}

/// Folds any number of arguments elementwise with `f`, as `min` and `max`
/// do.
///
/// # Example
/// ```
/// use graphite::interpreter::{evaluator::function::builtin::fold, value::core::Samples};
///
/// let args = [Samples::from(vec![1.0, 5.0]), Samples::Scalar(3.0)];
/// let r = fold("max", &args, f64::max).unwrap();
/// assert_eq!(r, Samples::from(vec![3.0, 5.0]));
/// ```
pub fn fold(name: &str, args: &[Samples], f: fn(f64, f64) -> f64) -> EvalResult<Samples> {
    let (head, rest) = args.split_first()
                           .ok_or_else(|| arity_error(name, "at least 1", 0))?;
    rest.iter()
        .try_fold(head.clone(), |acc, next| acc.zip_with(next, f))
}

/// Sign of `x`: `-1`, `0` or `1`. NaN stays NaN.
fn sign_of(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x.signum() }
}

/// `sin(pi x) / (pi x)`, continuous at zero.
fn normalized_sinc(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let y = std::f64::consts::PI * x;
    y.sin() / y
}

/// Greatest common divisor of the integer parts of `a` and `b`.
///
/// The result is never negative. Non-finite input gives NaN.
fn integer_gcd(a: f64, b: f64) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return f64::NAN;
    }
    let (mut a, mut b) = (a.trunc().abs(), b.trunc().abs());
    while b != 0.0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple of the integer parts of `a` and `b`; zero if
/// either is zero.
fn integer_lcm(a: f64, b: f64) -> f64 {
    let divisor = integer_gcd(a, b);
    if divisor == 0.0 {
        return 0.0;
    }
    (a.trunc() / divisor * b.trunc()).abs()
}

fn first(args: &[Samples]) -> EvalResult<&Samples> {
    match args {
        [x] => Ok(x),
        _ => Err(arity_error("builtin", "1", args.len())),
    }
}

fn arity_error(name: &str, expected: &str, found: usize) -> EvalError {
    EvalError::ArgumentCountMismatch { name: name.to_string(),
                                       expected: expected.to_string(),
                                       found }
}
