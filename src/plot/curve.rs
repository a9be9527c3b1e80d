use crate::interpreter::parser::style::StyleDirective;

/// A point of a curve in plot coordinates.
pub type Point = (f64, f64);

/// How a curve was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// `y = f(x)` sampled over an x-range, including constant lines.
    Explicit,
    /// `r = f(theta)` sampled over a full turn and converted to Cartesian.
    Polar,
    /// `(x(t), y(t))` sampled over a parameter range.
    Parametric,
}

/// The renderable output of one plotted statement.
///
/// The points are stored as disjoint segments: the renderer connects the
/// points within a segment and never draws a line between two segments.
/// Every coordinate is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Source line of the statement.
    pub line:     usize,
    /// How the curve was produced.
    pub kind:     CurveKind,
    /// Connected runs of points, in sampling order.
    pub segments: Vec<Vec<Point>>,
    /// Style directive of the statement.
    pub style:    StyleDirective,
}

impl Curve {
    /// Iterates over all points of all segments.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().flatten().copied()
    }

    /// Total number of points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    /// Returns `true` if every sample was a gap.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Label for the curve: the title if one was given.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.style.title.as_deref()
    }
}
