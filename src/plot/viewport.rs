use crate::{error::ViewportError, util::num::linspace};

/// Default lower bound of the x-range.
pub const DEFAULT_X_MIN: f64 = -10.0;
/// Default upper bound of the x-range.
pub const DEFAULT_X_MAX: f64 = 10.0;
/// Default number of samples per curve.
pub const DEFAULT_RESOLUTION: usize = 1000;

/// The x-range and sample count supplied by the renderer.
///
/// A viewport is an immutable value: navigation returns a new viewport, and
/// the script is recompiled against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    x_min:      f64,
    x_max:      f64,
    resolution: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { x_min:      DEFAULT_X_MIN,
               x_max:      DEFAULT_X_MAX,
               resolution: DEFAULT_RESOLUTION, }
    }
}

impl Viewport {
    /// Creates a viewport.
    ///
    /// # Errors
    /// - `NonFiniteBounds` if a bound is NaN or infinite.
    /// - `EmptyRange` unless `x_min < x_max`.
    /// - `ResolutionTooLow` for fewer than two samples.
    ///
    /// # Example
    /// ```
    /// use graphite::plot::viewport::Viewport;
    ///
    /// assert!(Viewport::new(-1.0, 1.0, 100).is_ok());
    /// assert!(Viewport::new(1.0, -1.0, 100).is_err());
    /// assert!(Viewport::new(-1.0, 1.0, 1).is_err());
    /// ```
    pub fn new(x_min: f64, x_max: f64, resolution: usize) -> Result<Self, ViewportError> {
        if !x_min.is_finite() || !x_max.is_finite() {
            return Err(ViewportError::NonFiniteBounds { x_min, x_max });
        }
        if x_min >= x_max {
            return Err(ViewportError::EmptyRange { x_min, x_max });
        }
        if resolution < 2 {
            return Err(ViewportError::ResolutionTooLow { resolution });
        }
        Ok(Self { x_min,
                  x_max,
                  resolution })
    }

    /// Lower bound of the x-range.
    #[must_use]
    pub const fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Upper bound of the x-range.
    #[must_use]
    pub const fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Number of samples per curve.
    #[must_use]
    pub const fn resolution(&self) -> usize {
        self.resolution
    }

    /// Width of the x-range.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Returns a copy with another sample count.
    ///
    /// # Errors
    /// Returns `ResolutionTooLow` for fewer than two samples.
    pub fn with_resolution(&self, resolution: usize) -> Result<Self, ViewportError> {
        Self::new(self.x_min, self.x_max, resolution)
    }

    /// Scales the x-range about its midpoint; `scale < 1` zooms in.
    ///
    /// # Errors
    /// Fails with the same errors as [`Viewport::new`] if the scaled range
    /// is empty or not finite, e.g. for a zero or negative `scale`.
    ///
    /// # Example
    /// ```
    /// use graphite::plot::viewport::Viewport;
    ///
    /// let v = Viewport::new(-10.0, 10.0, 100).unwrap().zoom(0.5).unwrap();
    /// assert_eq!((v.x_min(), v.x_max()), (-5.0, 5.0));
    /// ```
    pub fn zoom(&self, scale: f64) -> Result<Self, ViewportError> {
        let center = f64::midpoint(self.x_min, self.x_max);
        let half = self.width() * scale / 2.0;
        Self::new(center - half, center + half, self.resolution)
    }

    /// Moves the x-range by `step` widths; `1.0` pans one full screen right.
    ///
    /// # Errors
    /// Fails if the shifted bounds are not finite.
    pub fn shift_relative(&self, step: f64) -> Result<Self, ViewportError> {
        self.shift_absolute(step * self.width())
    }

    /// Moves the x-range by `step` units.
    ///
    /// # Errors
    /// Fails if the shifted bounds are not finite.
    ///
    /// # Example
    /// ```
    /// use graphite::plot::viewport::Viewport;
    ///
    /// let v = Viewport::default().shift_absolute(2.5).unwrap();
    /// assert_eq!((v.x_min(), v.x_max()), (-7.5, 12.5));
    /// ```
    pub fn shift_absolute(&self, step: f64) -> Result<Self, ViewportError> {
        Self::new(self.x_min + step, self.x_max + step, self.resolution)
    }

    /// The evenly spaced x-values a curve is sampled at.
    #[must_use]
    pub fn samples(&self) -> Vec<f64> {
        linspace(self.x_min, self.x_max, self.resolution)
    }
}
