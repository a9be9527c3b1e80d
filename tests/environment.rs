use std::collections::{HashMap, HashSet};

use graphite::{
    ast::{Definition, Expr, Statement},
    error::EvalError,
    interpreter::{
        environment::Environment,
        evaluator::core::{MAX_CALL_DEPTH, MAX_EVAL_DEPTH, evaluate, evaluate_constant},
        parser::statement::parse_line,
        value::core::Samples,
    },
};

/// Builds an environment from definition lines.
fn env_with(lines: &[&str]) -> Environment {
    let functions: HashSet<String> = lines.iter()
                                          .filter_map(|l| l.split_once('('))
                                          .filter(|(head, rest)| {
                                              !head.contains('=') && rest.contains('=')
                                          })
                                          .map(|(head, _)| head.trim().to_string())
                                          .collect();
    let mut env = Environment::new();
    for (i, line) in lines.iter().enumerate() {
        match parse_line(line, i + 1, &functions) {
            Ok(Statement::Definition { definition, .. }) => env.define(definition).unwrap(),
            other => panic!("not a definition: {line:?} -> {other:?}"),
        }
    }
    env
}

fn expr(src: &str, env_functions: &[&str]) -> Expr {
    let functions: HashSet<String> = env_functions.iter().map(ToString::to_string).collect();
    match parse_line(src, 1, &functions) {
        Ok(Statement::ExpressionPlot { body, .. }) => body,
        other => panic!("not an expression: {src:?} -> {other:?}"),
    }
}

fn free(env: &Environment, src: &str, functions: &[&str]) -> Vec<String> {
    env.free_variables(&expr(src, functions)).into_iter().collect()
}

#[test]
fn free_variables_skip_builtins_and_sum_indices() {
    let env = Environment::new();
    assert_eq!(free(&env, "sin(x) + pi e tau", &[]), vec!["x"]);
    assert_eq!(free(&env, "sum(k, 1, n, k x)", &[]), vec!["n", "x"]);
    assert!(free(&env, "3 + 4", &[]).is_empty());
}

#[test]
fn free_variables_follow_definitions() {
    let env = env_with(&["a = 2x", "b = a + c", "f(u) = u + y"]);
    assert_eq!(free(&env, "b", &[]), vec!["c", "x"]);
    assert_eq!(free(&env, "f(1)", &["f"]), vec!["y"]);
    assert_eq!(free(&env, "f(t)", &["f"]), vec!["t", "y"]);
}

#[test]
fn free_variables_terminate_on_cycles() {
    let env = env_with(&["a = b + x", "b = a"]);
    assert_eq!(free(&env, "a", &[]), vec!["x"]);
}

#[test]
fn forward_declarations_are_shadowed_by_definitions() {
    let mut env = Environment::new();
    let [first, second] = ["a = 1", "a = 2"].map(|l| match parse_line(l, 1, &HashSet::new()) {
                                               Ok(Statement::Definition { definition, .. }) => definition,
                                               other => panic!("{other:?}"),
                                           });
    env.declare_forward(&first);
    env.declare_forward(&second);
    assert_eq!(env.lookup("a").map(|d| d.body.to_string()), Some("1".to_string()));

    env.define(second).unwrap();
    assert_eq!(env.lookup("a").map(|d| d.body.to_string()), Some("2".to_string()));
    assert!(env.contains("a"));
}

#[test]
fn reserved_names_cannot_be_defined() {
    let mut env = Environment::new();
    let body = expr("1", &[]);
    for name in ["sin", "pi", "sum", "diff"] {
        let definition = Definition { name:   name.to_string(),
                                      params: vec![],
                                      body:   body.clone(),
                                      line:   1, };
        assert_eq!(env.define(definition),
                   Err(EvalError::BuiltinRedefinition { name: name.to_string() }));
    }
}

#[test]
fn evaluation_broadcasts_scalars_over_samples() {
    let env = env_with(&["k = 2"]);
    let xs = Samples::from(vec![0.0, 1.0, 2.0]);
    let result = evaluate(&env, &expr("k x + 1", &[]), HashMap::from([("x".to_string(), xs)]));
    assert_eq!(result, Ok(Samples::from(vec![1.0, 3.0, 5.0])));

    let result = evaluate(&env, &expr("k + 1", &[]), HashMap::new());
    assert_eq!(result, Ok(Samples::Scalar(3.0)));
}

#[test]
fn division_by_zero_is_a_gap_outside_constants() {
    let env = Environment::new();
    let xs = Samples::from(vec![-1.0, 0.0, 1.0]);
    let result = evaluate(&env, &expr("1 / x", &[]), HashMap::from([("x".to_string(), xs)]))
        .unwrap();
    assert_eq!(result.get(0), Some(-1.0));
    assert_eq!(result.get(1), Some(f64::INFINITY));

    assert_eq!(evaluate_constant(&env, &expr("1 / 0", &[]), "bound"),
               Err(EvalError::DivisionByZero));
    assert_eq!(evaluate_constant(&env, &expr("2 ^ 10", &[]), "bound"), Ok(1024.0));
}

#[test]
fn deep_recursion_is_bounded() {
    // A chain longer than the call depth limit, defined without a cycle.
    let lines: Vec<String> = (0..=MAX_CALL_DEPTH).map(|i| format!("v{i} = v{} + 1", i + 1))
                                                 .chain(std::iter::once(format!("v{} = 0",
                                                                                MAX_CALL_DEPTH + 1)))
                                                 .collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let env = env_with(&refs);

    let result = evaluate(&env, &expr("v0", &[]), HashMap::new());
    assert!(matches!(result, Err(EvalError::CallDepthExceeded { .. })));

    let result = evaluate(&env, &expr("v200", &[]), HashMap::new());
    assert_eq!(result, Ok(Samples::Scalar(57.0)));
}

#[test]
fn evaluation_depth_is_bounded_across_definitions() {
    // Every level is a left-deep chain of 300 additions on top of the last.
    let ones = " + 1".repeat(300);
    let lines: Vec<String> = std::iter::once("a0 = 1".to_string())
        .chain((1..=4).map(|i| format!("a{i} = a{}{ones}", i - 1)))
        .collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let env = env_with(&refs);

    assert_eq!(evaluate(&env, &expr("a3", &[]), HashMap::new()), Ok(Samples::Scalar(901.0)));
    assert_eq!(evaluate(&env, &expr("a4", &[]), HashMap::new()),
               Err(EvalError::CallDepthExceeded { limit: MAX_EVAL_DEPTH }));
}

#[test]
fn repeated_references_are_evaluated_once() {
    let lines: Vec<String> = std::iter::once("a0 = x".to_string())
        .chain((1..=60).map(|i| format!("a{i} = a{0} + a{0}", i - 1)))
        .collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let env = env_with(&refs);

    let xs = Samples::from(vec![1.0, -0.5]);
    let result = evaluate(&env, &expr("a60", &[]), HashMap::from([("x".to_string(), xs)]));
    assert_eq!(result, Ok(Samples::from(vec![2f64.powi(60), -(2f64.powi(59))])));
}

#[test]
fn diff_sees_through_previously_evaluated_definitions() {
    let env = env_with(&["a = x^2"]);
    let xs = Samples::from(vec![3.0]);
    let result = evaluate(&env, &expr("a + diff(a, x)", &[]), HashMap::from([("x".to_string(), xs)]))
        .unwrap();
    assert!((result.get(0).unwrap() - 15.0).abs() < 1e-4, "{result}");
}

#[test]
fn unknown_functions_and_pairs_fail() {
    let env = Environment::new();
    let result = evaluate(&env, &expr("g(1)", &["g"]), HashMap::new());
    assert!(matches!(result, Err(EvalError::UnknownFunction { ref name }) if name == "g"));

    let a = Samples::from(vec![1.0, 2.0]);
    let b = Samples::from(vec![1.0, 2.0, 3.0]);
    assert!(matches!(a.zip_with(&b, f64::max), Err(EvalError::LengthMismatch { .. })));
}
