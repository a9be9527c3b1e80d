use std::fmt;

use crate::{error::EvalError, interpreter::evaluator::core::EvalResult};

/// The result of evaluating an expression over a sample grid.
///
/// Expressions that do not depend on any sampled variable evaluate to a
/// single [`Samples::Scalar`], which broadcasts against vectors of any
/// length. Everything else evaluates to one value per sample point.
///
/// Non-finite values (NaN, infinities) are ordinary samples: they mark gaps
/// in a curve and never abort evaluation on their own.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    /// One value shared by every sample point.
    Scalar(f64),
    /// One value per sample point.
    Vector(Vec<f64>),
}

impl From<f64> for Samples {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec<f64>> for Samples {
    fn from(v: Vec<f64>) -> Self {
        Self::Vector(v)
    }
}

impl Samples {
    /// Number of sample points, or `None` for a scalar.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Scalar(_) => None,
            Self::Vector(v) => Some(v.len()),
        }
    }

    /// Returns `true` for a vector with no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Vector(v) if v.is_empty())
    }

    /// Returns the scalar value, or `None` for a vector.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(s) => Some(*s),
            Self::Vector(_) => None,
        }
    }

    /// Value at sample `index`. A scalar answers the same value everywhere.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            Self::Scalar(s) => Some(*s),
            Self::Vector(v) => v.get(index).copied(),
        }
    }

    /// Applies `f` to every sample.
    ///
    /// # Example
    /// ```
    /// use graphite::interpreter::value::core::Samples;
    ///
    /// let v = Samples::from(vec![1.0, 4.0, 9.0]).map(f64::sqrt);
    /// assert_eq!(v, Samples::from(vec![1.0, 2.0, 3.0]));
    /// ```
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Self::Scalar(s) => Self::Scalar(f(*s)),
            Self::Vector(v) => Self::Vector(v.iter().map(|x| f(*x)).collect()),
        }
    }

    /// Combines two sample sets elementwise, broadcasting scalars.
    ///
    /// # Errors
    /// Returns `EvalError::LengthMismatch` if both sides are vectors of
    /// different lengths.
    ///
    /// # Example
    /// ```
    /// use graphite::interpreter::value::core::Samples;
    ///
    /// let xs = Samples::from(vec![1.0, 2.0]);
    /// let sum = xs.zip_with(&Samples::Scalar(10.0), |a, b| a + b).unwrap();
    /// assert_eq!(sum, Samples::from(vec![11.0, 12.0]));
    /// ```
    pub fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> EvalResult<Self> {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => Ok(Self::Scalar(f(*a, *b))),
            (Self::Scalar(a), Self::Vector(bs)) => {
                Ok(Self::Vector(bs.iter().map(|b| f(*a, *b)).collect()))
            },
            (Self::Vector(as_), Self::Scalar(b)) => {
                Ok(Self::Vector(as_.iter().map(|a| f(*a, *b)).collect()))
            },
            (Self::Vector(as_), Self::Vector(bs)) => {
                if as_.len() != bs.len() {
                    return Err(EvalError::LengthMismatch { left:  as_.len(),
                                                           right: bs.len(), });
                }
                Ok(Self::Vector(as_.iter().zip(bs).map(|(a, b)| f(*a, *b)).collect()))
            },
        }
    }

    /// Returns `true` if any sample satisfies `predicate`.
    #[must_use]
    pub fn any(&self, predicate: impl Fn(f64) -> bool) -> bool {
        match self {
            Self::Scalar(s) => predicate(*s),
            Self::Vector(v) => v.iter().any(|x| predicate(*x)),
        }
    }

    /// Expands the samples into exactly `n` values, repeating a scalar.
    ///
    /// # Errors
    /// Returns `EvalError::LengthMismatch` for a vector of another length.
    pub fn into_vec(self, n: usize) -> EvalResult<Vec<f64>> {
        match self {
            Self::Scalar(s) => Ok(vec![s; n]),
            Self::Vector(v) if v.len() == n => Ok(v),
            Self::Vector(v) => Err(EvalError::LengthMismatch { left:  v.len(),
                                                               right: n, }),
        }
    }
}

impl fmt::Display for Samples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s}"),
            Self::Vector(v) => {
                write!(f, "[")?;
                for (i, x) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x}")?;
                }
                write!(f, "]")
            },
        }
    }
}
