use std::fs::{self};

use graphite::{
    CompileOutput, Error, Viewport, compile_script,
    error::{EvalError, ParseError, StyleParseError},
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_script_blocks(&content).into_iter().enumerate() {
            count += 1;
            let out = compile(&code);
            if !out.is_clean() {
                panic!("Script example {} in {:?} failed:\n{}\nDiagnostics: {:?}",
                       i + 1,
                       path,
                       code,
                       out.diagnostics);
            }
        }
    }

    assert!(count > 0, "No script examples found in book/src");
}

fn extract_script_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```graphite") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn compile(src: &str) -> CompileOutput {
    compile_script(src, &Viewport::default())
}

fn assert_success(src: &str) -> CompileOutput {
    let out = compile(src);
    if !out.is_clean() {
        panic!("Script failed: {:?}", out.diagnostics);
    }
    out
}

fn assert_failure(src: &str) -> Error {
    let out = compile(src);
    match out.diagnostics.first() {
        Some(d) => d.error.clone(),
        None => panic!("Script succeeded but was expected to fail"),
    }
}

/// Value of the last plotted line, which must be constant.
fn value_of(src: &str) -> f64 {
    let out = assert_success(src);
    let curve = out.curves.last().expect("no curve produced");
    let (_, y) = curve.points().next().expect("empty curve");
    assert!(curve.points().all(|(_, v)| v == y), "not a constant: {src}");
    y
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "expected {expected}, got {actual}");
}

#[test]
fn constant_arithmetic() {
    assert_close(value_of("2 + 3 * 4"), 14.0);
    assert_close(value_of("2 ** 10"), 1024.0);
    assert_close(value_of("2 ^ 10"), 1024.0);
    assert_close(value_of("2^3^2"), 512.0);
    assert_close(value_of("(1 + 2)(3 + 4)"), 21.0);
    assert_close(value_of("10 / 4 / 5"), 0.5);
    assert_close(value_of("7 - 2 - 1"), 4.0);
    assert_close(value_of("2pi"), std::f64::consts::TAU);
    assert_close(value_of("2 ^ -1"), 0.5);
    assert_close(value_of("1.5e3 + .5"), 1500.5);
}

#[test]
fn unary_minus_binds_tightest() {
    assert_close(value_of("-2^2"), 4.0);
    assert_close(value_of("-(2^2)"), -4.0);
    assert_close(value_of("--3"), 3.0);
    assert_close(value_of("+3 - -3"), 6.0);
}

#[test]
fn builtin_functions() {
    assert_close(value_of("sin(pi / 2)"), 1.0);
    assert_close(value_of("cos(0) + exp(0)"), 2.0);
    assert_close(value_of("sqrt(16) + abs(-3)"), 7.0);
    assert_close(value_of("sign(-5) + sign(0) + sign(2)"), 0.0);
    assert_close(value_of("floor(2.7) + ceil(2.2)"), 5.0);
    assert_close(value_of("min(3, 1, 2) + max(4, 9)"), 10.0);
    assert_close(value_of("log(e) + log(8, 2) + log10(1000)"), 7.0);
    assert_close(value_of("mod(-1, 3)"), 2.0);
    assert_close(value_of("hypot(3, 4) + atan2(0, 1)"), 5.0);
    assert_close(value_of("degrees(pi) + radians(180) - pi"), 180.0);
    assert_close(value_of("tau / pi"), 2.0);
}

#[test]
fn integer_and_sinc_builtins() {
    assert_close(value_of("gcd(12, 18)"), 6.0);
    assert_close(value_of("gcd(12.7, 18.2)"), 6.0);
    assert_close(value_of("gcd(-12, 0)"), 12.0);
    assert_close(value_of("lcm(4, 6)"), 12.0);
    assert_close(value_of("lcm(-4.9, 6.5)"), 12.0);
    assert_close(value_of("lcm(0, 5)"), 0.0);

    assert_close(value_of("sinc(0)"), 1.0);
    assert!(value_of("sinc(1)").abs() < 1e-12);
    assert_close(value_of("sinc(0.5)"), 2.0 / std::f64::consts::PI);

    let e = assert_failure("gcd = 3");
    assert!(matches!(e, Error::Parse(ParseError::IdentifierReserved { .. })));
    let e = assert_failure("sinc(x) = x");
    assert!(matches!(e, Error::Parse(ParseError::IdentifierReserved { .. })));
}

#[test]
fn out_of_domain_samples_are_gaps_not_errors() {
    let out = assert_success("sqrt(-1)");
    assert!(out.curves[0].is_empty());

    let out = assert_success("(-8) ^ (1/3)");
    assert!(out.curves[0].is_empty());
}

#[test]
fn user_defined_functions() {
    assert_close(value_of("square(x) = x * x\nsquare(7)"), 49.0);
    assert_close(value_of("f(a, b) = a - b\nf(10, 4)"), 6.0);
    assert_close(value_of("g(x) = 2x\nh(x) = g(x) + 1\nh(g(2))"), 9.0);
}

#[test]
fn redefinition_overwrites() {
    assert_close(value_of("a = 1\na = 2\na"), 2.0);
    assert_close(value_of("f(x) = x\nf(x) = 3x\nf(2)"), 6.0);

    let out = assert_success("a = 1\na\na = 2\na");
    let values: Vec<f64> = out.curves
                              .iter()
                              .map(|c| c.points().next().unwrap().1)
                              .collect();
    assert_eq!(values, vec![1.0, 2.0]);
}

#[test]
fn names_may_be_used_before_their_definition() {
    assert_close(value_of("f(3)\nf(x) = x^2"), 9.0);
    assert_close(value_of("b + 1\nb = 41"), 42.0);

    let out = assert_success("f(x) + 1\nf(x) = sin(x)");
    assert_eq!(out.curves.len(), 1);
}

#[test]
fn cyclic_definitions_are_reported() {
    let out = compile("a = b\nb = a\na\nb + 1");
    assert!(out.curves.is_empty());
    assert_eq!(out.diagnostics.len(), 2);
    for d in &out.diagnostics {
        assert!(matches!(d.error, Error::Eval(EvalError::CyclicDefinition { .. })),
                "{d}");
    }
    assert_eq!(out.diagnostics[0].line, 3);
    assert!(out.diagnostics[0].message.contains("a -> b -> a"));

    let e = assert_failure("f(x) = f(x) + 1\nf(2)");
    assert!(matches!(e, Error::Eval(EvalError::CyclicDefinition { .. })));

    let e = assert_failure("a = a + 1\na");
    assert!(matches!(e, Error::Eval(EvalError::CyclicDefinition { .. })));
}

#[test]
fn definitions_may_refer_to_the_plotting_variable() {
    let out = assert_success("a = 2x\na + 1");
    let (x, y) = out.curves[0].points().next().unwrap();
    assert_close(x, -10.0);
    assert_close(y, -19.0);
}

#[test]
fn one_bad_line_does_not_abort_the_script() {
    let out = compile("x^2\n)(\nsin(x)");
    assert_eq!(out.curves.len(), 2);
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].line, 2);
    assert!(out.diagnostics[0].to_string().starts_with("Error on line 2:"));
}

#[test]
fn malformed_style_fails_only_its_line() {
    let out = compile("x\nx^2 #color=cyan\nx^3 #color=\"red\"");
    assert_eq!(out.curves.len(), 2);
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].line, 2);
    assert!(matches!(out.diagnostics[0].error,
                     Error::Style(StyleParseError::MissingQuotedValue { .. })));
    assert_eq!(out.curves[1].style.color(), Some("red"));
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let out = assert_success("// header\n\n   // indented comment\nx // trailing comment\n");
    assert_eq!(out.curves.len(), 1);
    assert_eq!(out.curves[0].line, 4);
}

#[test]
fn undefined_and_ambiguous_names() {
    let e = assert_failure("x y");
    assert!(matches!(e, Error::Eval(EvalError::AmbiguousVariable { ref names }) if names == "x, y"));

    let e = assert_failure("x [x, 0, q]");
    assert!(matches!(e, Error::Eval(EvalError::UndefinedName { ref name }) if name == "q"));

    let e = assert_failure("f(x) = x\nf + 1");
    assert!(matches!(e, Error::Eval(EvalError::FunctionUsedAsVariable { .. })));

    let e = assert_failure("sin + 1");
    assert!(matches!(e, Error::Eval(EvalError::FunctionUsedAsVariable { .. })));
}

#[test]
fn wrong_arity_is_an_error() {
    let e = assert_failure("f(x, y) = x + y\nf(1)");
    assert!(matches!(e, Error::Eval(EvalError::ArgumentCountMismatch { found: 1, .. })));

    let e = assert_failure("sin(1, 2)");
    assert!(matches!(e, Error::Eval(EvalError::ArgumentCountMismatch { found: 2, .. })));

    let e = assert_failure("min()");
    assert!(matches!(e, Error::Eval(EvalError::ArgumentCountMismatch { found: 0, .. })));
}

#[test]
fn builtins_cannot_be_redefined() {
    let e = assert_failure("sin = 3");
    assert!(matches!(e, Error::Parse(ParseError::IdentifierReserved { .. })));

    let e = assert_failure("pi(x) = x");
    assert!(matches!(e, Error::Parse(ParseError::IdentifierReserved { .. })));

    let e = assert_failure("f(e) = e");
    assert!(matches!(e, Error::Parse(ParseError::IdentifierReserved { .. })));
}

#[test]
fn constant_bounds_fail_fast() {
    let e = assert_failure("x [x, 0, 1/0]");
    assert_eq!(e, Error::Eval(EvalError::DivisionByZero));

    let e = assert_failure("x [x, 0, log(0)]");
    assert!(matches!(e, Error::Eval(EvalError::NonFiniteConstant { .. })));

    let e = assert_failure("x [x, 0, x]");
    assert!(matches!(e, Error::Eval(EvalError::NotConstant { .. })));

    let e = assert_failure("(t, t)[t, 0/0, 1]");
    assert_eq!(e, Error::Eval(EvalError::DivisionByZero));
}

#[test]
fn sum_functional() {
    assert_close(value_of("sum(k, 1, 10, k)"), 55.0);
    assert_close(value_of("sum(k, 1, 0, k)"), 0.0);
    assert_close(value_of("n = 4\nsum(k, 0, n, 2^k)"), 31.0);

    let out = assert_success("sum(k, 1, 3, x^k)");
    let (x, y) = out.curves[0].points().next().unwrap();
    assert_close(y, x + x * x + x * x * x);

    let e = assert_failure("sum(k, 1, 1e6, k)");
    assert!(matches!(e, Error::Eval(EvalError::InvalidArgument { .. })));

    let e = assert_failure("sum(2, 1, 3, 1)");
    assert!(matches!(e, Error::Eval(EvalError::InvalidArgument { .. })));
}

#[test]
fn diff_functional() {
    let out = assert_success("diff(x^2, x)");
    for (x, y) in out.curves[0].points() {
        assert!((y - 2.0 * x).abs() < 1e-4, "d/dx x^2 at {x} = {y}");
    }

    let out = assert_success("a = x^3\ndiff(a, x)");
    for (x, y) in out.curves[0].points() {
        assert!((y - 3.0 * x * x).abs() < 1e-3, "d/dx x^3 at {x} = {y}");
    }

    assert_close(value_of("f(t) = diff(t^2, t)\nf(3)").round(), 6.0);
}

#[test]
fn diff_accepts_the_variable_first() {
    let out = assert_success("diff(x, x^2)");
    for (x, y) in out.curves[0].points() {
        assert!((y - 2.0 * x).abs() < 1e-4, "d/dx x^2 at {x} = {y}");
    }

    assert_eq!(compile("diff(x, sin(x))").curves, compile("diff(sin(x), x)").curves);
    assert_close(value_of("f(t) = diff(t, t^3)\nf(2)").round(), 12.0);

    // Only one bound name decides; a definition name stays the body.
    let out = assert_success("a = x^2\ndiff(x, a)");
    for (x, y) in out.curves[0].points() {
        assert!((y - 2.0 * x).abs() < 1e-4, "d/dx a at {x} = {y}");
    }
}

#[test]
fn sum_bounds_may_vary_per_sample() {
    let out = assert_success("sum(k, 1, floor(x), 1/k) [x, 1, 10]");
    let points: Vec<(f64, f64)> = out.curves[0].points().collect();
    assert_eq!(points.len(), 1000);
    assert_close(points[0].1, 1.0);
    assert_close(points[points.len() - 1].1, 7381.0 / 2520.0);
    for &(x, y) in &points {
        let harmonic: f64 = (1..=x.floor() as u32).map(|k| 1.0 / f64::from(k)).sum();
        assert_close(y, harmonic);
    }

    let out = assert_success("sum(k, 1, x, k) [x, -3, 3]");
    let points: Vec<(f64, f64)> = out.curves[0].points().collect();
    assert_eq!(points[0], (-3.0, 0.0));
    assert_eq!(points[points.len() - 1], (3.0, 6.0));

    // Samples with a non-finite bound are gaps.
    let out = assert_success("sum(k, 1, ln(x), 1) [x, -1, 1]");
    assert!(!out.curves[0].is_empty());
    assert!(out.curves[0].points().all(|(x, y)| x > 0.0 && y == 0.0));

    let e = assert_failure("sum(k, 0, 1e6 x, k) [x, 0, 1]");
    assert!(matches!(e, Error::Eval(EvalError::InvalidArgument { .. })));
}
