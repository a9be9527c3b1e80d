/// The visible x-range and sample resolution.
///
/// Validated on construction and navigated by zooming and shifting.
pub mod viewport;
/// Renderable output of a plotted statement.
pub mod curve;
/// Splitting sampled polylines at discontinuities.
///
/// Breaks a curve at non-finite samples and at poles that the sample grid
/// steps over, so no false connecting line is drawn.
pub mod sampling;
/// The plot compiler.
///
/// Walks a parsed script top to bottom, maintains the environment, infers the
/// independent variable of every plot and produces curves and diagnostics.
///
/// # Responsibilities
/// - Forward-declares definitions and applies them in script order.
/// - Samples explicit, polar and parametric plots.
/// - Isolates failures per line as [`Diagnostic`](crate::error::Diagnostic)s.
pub mod compiler;
