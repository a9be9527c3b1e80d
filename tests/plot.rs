use graphite::{
    CompileOutput, Curve, CurveKind, Error, Viewport, compile_script,
    error::{EvalError, ViewportError},
    util::num::linspace,
};

fn compile(src: &str) -> CompileOutput {
    compile_script(src, &Viewport::default())
}

fn single_curve(src: &str, viewport: &Viewport) -> Curve {
    let out = compile_script(src, viewport);
    assert!(out.is_clean(), "{src}: {:?}", out.diagnostics);
    assert_eq!(out.curves.len(), 1, "{src}");
    out.curves.into_iter().next().unwrap()
}

fn first_error(src: &str) -> Error {
    let out = compile(src);
    out.diagnostics
       .first()
       .map(|d| d.error.clone())
       .unwrap_or_else(|| panic!("{src} compiled cleanly"))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn reciprocal_is_split_at_its_pole() {
    let curve = single_curve("1/x", &Viewport::default());
    assert_eq!(curve.kind, CurveKind::Explicit);
    assert_eq!(curve.segments.len(), 2);
    assert!(curve.segments[0].iter().all(|&(x, y)| x < 0.0 && y < 0.0));
    assert!(curve.segments[1].iter().all(|&(x, y)| x > 0.0 && y > 0.0));
    assert_eq!(curve.point_count(), 1000);
}

#[test]
fn tangent_is_split_at_every_asymptote() {
    // Poles at odd multiples of pi/2 inside [-10, 10]: six of them.
    let curve = single_curve("tan(x)", &Viewport::default());
    assert_eq!(curve.segments.len(), 7);
}

#[test]
fn continuous_sign_changes_stay_connected() {
    let curve = single_curve("x^3 - x", &Viewport::default());
    assert_eq!(curve.segments.len(), 1);

    let curve = single_curve("sin(x)", &Viewport::default());
    assert_eq!(curve.segments.len(), 1);
}

#[test]
fn gaps_are_dropped() {
    let curve = single_curve("sqrt(x)", &Viewport::default());
    assert_eq!(curve.segments.len(), 1);
    assert!(curve.points().all(|(x, y)| x >= 0.0 && y.is_finite()));
    assert_eq!(curve.point_count(), 500);

    let curve = single_curve("ln(cos(x))", &Viewport::default());
    assert!(curve.segments.len() > 1);
    assert!(curve.points().all(|(x, y)| x.is_finite() && y.is_finite()));
}

#[test]
fn constant_expression_is_a_horizontal_line() {
    let curve = single_curve("3", &Viewport::default());
    assert_eq!(curve.segments.len(), 1);
    assert_eq!(curve.point_count(), 1000);
    assert!(curve.points().all(|(_, y)| y == 3.0));

    let points: Vec<_> = curve.points().collect();
    assert_eq!(points.first().unwrap().0, -10.0);
    assert_eq!(points.last().unwrap().0, 10.0);
}

#[test]
fn explicit_domain_overrides_the_viewport() {
    let curve = single_curve("x^2 [x, 0, 2]", &Viewport::default());
    let points: Vec<_> = curve.points().collect();
    assert_eq!(points.len(), 1000);
    assert_eq!(points[0], (0.0, 0.0));
    assert_eq!(*points.last().unwrap(), (2.0, 4.0));

    let curve = single_curve("3 [x, 0, 1]", &Viewport::default());
    assert!(curve.points().all(|(x, y)| (0.0..=1.0).contains(&x) && y == 3.0));

    let curve = single_curve("t^2 [t, -1, 1]", &Viewport::default());
    assert_eq!(curve.points().next(), Some((-1.0, 1.0)));
}

#[test]
fn domain_bounds_may_use_definitions() {
    let out = compile("a = 1\nx [x, -a, 2a]");
    assert!(out.is_clean());
    let points: Vec<_> = out.curves[0].points().collect();
    assert_eq!(points[0].0, -1.0);
    assert_eq!(points.last().unwrap().0, 2.0);
}

#[test]
fn domain_errors() {
    let e = first_error("t^2 [x, 0, 1]");
    assert!(matches!(e,
                     Error::Eval(EvalError::DomainVariableMismatch { ref domain, ref found })
                     if domain == "x" && found == "t"));

    let e = first_error("x [x, 0, x]");
    assert!(matches!(e, Error::Eval(EvalError::NotConstant { .. })));

    let e = first_error("a = x\nx [x, 0, a]");
    assert!(matches!(e, Error::Eval(EvalError::NotConstant { .. })));
}

#[test]
fn parametric_plot_has_one_point_per_sample() {
    let viewport = Viewport::new(-10.0, 10.0, 200).unwrap();
    let curve = single_curve("(cos(t), sin(t))[t, 0, 2pi] \"circle\"", &viewport);
    assert_eq!(curve.kind, CurveKind::Parametric);
    assert_eq!(curve.label(), Some("circle"));
    assert_eq!(curve.point_count(), 200);

    let ts = linspace(0.0, std::f64::consts::TAU, 200);
    for ((x, y), t) in curve.points().zip(ts) {
        assert_eq!(x, t.cos());
        assert_eq!(y, t.sin());
    }
}

#[test]
fn parametric_cycloid_matches_direct_evaluation() {
    for n in [2, 37, 1000] {
        let viewport = Viewport::new(-10.0, 10.0, n).unwrap();
        let curve = single_curve("(t + sin(t), 1 - cos(t))[t,-10,10]", &viewport);
        assert_eq!(curve.point_count(), n);

        for ((x, y), t) in curve.points().zip(linspace(-10.0, 10.0, n)) {
            assert!(close(x, t + t.sin()) && close(y, 1.0 - t.cos()),
                    "t = {t}: ({x}, {y})");
        }
    }
}

#[test]
fn parametric_constant_component_is_broadcast() {
    let viewport = Viewport::new(-1.0, 1.0, 50).unwrap();
    let curve = single_curve("(1, t)[t, 0, 1]", &viewport);
    assert_eq!(curve.point_count(), 50);
    assert!(curve.points().all(|(x, _)| x == 1.0));
}

#[test]
fn polar_definition_is_plotted() {
    let curve = single_curve("r = 1 + cos(theta) \"cardioid\" #color=\"red\"",
                             &Viewport::default());
    assert_eq!(curve.kind, CurveKind::Polar);
    assert_eq!(curve.line, 1);
    assert_eq!(curve.style.color(), Some("red"));
    assert_eq!(curve.point_count(), 1000);

    let (x, y) = curve.points().next().unwrap();
    assert!(close(x, 2.0) && close(y, 0.0));

    let curve = single_curve("r = 2 sin(phi)", &Viewport::default());
    assert_eq!(curve.kind, CurveKind::Polar);
    for (x, y) in curve.points() {
        // A circle of radius 1 centred on (0, 1).
        assert!((x * x + (y - 1.0) * (y - 1.0) - 1.0).abs() < 1e-9);
    }
}

#[test]
fn non_polar_r_definitions_plot_nothing() {
    let out = compile("r = 3\nr(theta) = theta\nr = theta + x");
    assert!(out.is_clean(), "{:?}", out.diagnostics);
    assert!(out.curves.is_empty());

    let out = compile("r = 3\nr");
    assert_eq!(out.curves.len(), 1);
    assert!(out.curves[0].points().all(|(_, y)| y == 3.0));
}

#[test]
fn variables_may_be_used_before_they_are_defined() {
    let out = compile("a x\na = 3");
    assert!(out.is_clean(), "{:?}", out.diagnostics);
    let (x, y) = out.curves[0].points().next().unwrap();
    assert_eq!(x, -10.0);
    assert!(close(y, -30.0));
}

#[test]
fn diagnostics_are_ordered_by_line() {
    let out = compile("x^2\n)(\ny z\nsin(\nx \"bad");
    let lines: Vec<usize> = out.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![2, 3, 4, 5]);
    assert_eq!(out.curves.len(), 1);
    assert!(matches!(out.diagnostics[1].error,
                     Error::Eval(EvalError::AmbiguousVariable { .. })));
    assert!(matches!(out.diagnostics[3].error, Error::Lex(_)));
}

#[test]
fn compilation_is_deterministic() {
    let script = "k = 2\nf(x) = sin(k x) / x\nf(x)\n(t, t^2)[t, -1, 1]\nr = theta";
    assert_eq!(compile(script), compile(script));
}

#[test]
fn recompiling_after_navigation_follows_the_viewport() {
    let viewport = Viewport::default().zoom(0.5).unwrap();
    let curve = single_curve("x", &viewport);
    let points: Vec<_> = curve.points().collect();
    assert_eq!(points[0].0, -5.0);
    assert_eq!(points.last().unwrap().0, 5.0);

    let viewport = viewport.shift_relative(1.0).unwrap();
    assert_eq!((viewport.x_min(), viewport.x_max()), (5.0, 15.0));
    let curve = single_curve("x", &viewport);
    assert_eq!(curve.points().next().unwrap().0, 5.0);

    let viewport = viewport.with_resolution(10).unwrap();
    assert_eq!(single_curve("x", &viewport).point_count(), 10);
}

#[test]
fn invalid_viewports_are_rejected() {
    assert!(matches!(Viewport::new(f64::NAN, 1.0, 10),
                     Err(ViewportError::NonFiniteBounds { .. })));
    assert!(matches!(Viewport::new(1.0, 1.0, 10), Err(ViewportError::EmptyRange { .. })));
    assert!(matches!(Viewport::new(0.0, 1.0, 1),
                     Err(ViewportError::ResolutionTooLow { resolution: 1 })));
    assert!(Viewport::default().zoom(0.0).is_err());
    assert!(Viewport::default().zoom(-1.0).is_err());
}
