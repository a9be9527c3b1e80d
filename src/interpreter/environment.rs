use std::collections::{BTreeSet, HashMap, HashSet};

use crate::{
    ast::{Definition, Expr},
    error::EvalError,
    interpreter::evaluator::{
        core::EvalResult,
        function::core::{SUM_FUNCTIONAL, is_builtin_constant, is_builtin_function,
                         is_reserved_identifier},
    },
};

/// User definitions visible while compiling one script.
///
/// The environment holds two layers:
///
/// - `definitions`: everything defined by the lines executed so far. A later
///   definition of the same name overwrites the earlier one.
/// - `forward`: the first definition of every name in the script, declared
///   before compilation starts, so a line may refer to a name defined further
///   down.
///
/// Lookups prefer the executed layer. Both layers are dropped together with
/// the environment when the script is recompiled.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    definitions: HashMap<String, Definition>,
    forward:     HashMap<String, Definition>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `definition`, replacing any earlier one of the same name.
    ///
    /// # Errors
    /// Returns `EvalError::BuiltinRedefinition` if the name belongs to a
    /// built-in function, constant or functional.
    ///
    /// # Example
    /// ```
    /// use graphite::{
    ///     ast::{Definition, Expr, Position},
    ///     interpreter::environment::Environment,
    /// };
    ///
    /// let mut env = Environment::new();
    /// let one = Expr::Number { value:    1.0,
    ///                          position: Position::new(1, 5), };
    /// env.define(Definition { name:   "a".into(),
    ///                         params: vec![],
    ///                         body:   one,
    ///                         line:   1, })
    ///    .unwrap();
    ///
    /// assert!(env.lookup("a").is_some());
    /// assert!(env.lookup("b").is_none());
    /// ```
    pub fn define(&mut self, definition: Definition) -> EvalResult<()> {
        if is_reserved_identifier(&definition.name) {
            return Err(EvalError::BuiltinRedefinition { name: definition.name });
        }
        self.definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Makes `definition` visible before its line runs.
    ///
    /// Only the first forward declaration of a name is kept, and it is shadowed
    /// as soon as [`Environment::define`] stores the same name. Reserved names
    /// are ignored here; they fail when their line is defined.
    pub fn declare_forward(&mut self, definition: &Definition) {
        if is_reserved_identifier(&definition.name) {
            return;
        }
        self.forward
            .entry(definition.name.clone())
            .or_insert_with(|| definition.clone());
    }

    /// Finds the current definition of `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Definition> {
        self.definitions
            .get(name)
            .or_else(|| self.forward.get(name))
    }

    /// Returns `true` if `name` has a user definition.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Collects the free variables of `expr`.
    ///
    /// A name is free if it is neither a built-in, nor a user definition, nor
    /// bound by an enclosing `sum`. References to definitions are followed, so
    /// after `a = 2x` the expression `a + 1` has the free variable `x`.
    /// Function bodies contribute their free names minus their parameters.
    ///
    /// The result is sorted, which makes error messages deterministic.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashSet;
    ///
    /// use graphite::interpreter::{environment::Environment, parser::statement::parse_line};
    /// use graphite::ast::Statement;
    ///
    /// let Statement::ExpressionPlot { body, .. } = parse_line("sin(t) + pi k", 1, &HashSet::new()).unwrap()
    /// else {
    ///     unreachable!()
    /// };
    /// let free: Vec<String> = Environment::new().free_variables(&body).into_iter().collect();
    /// assert_eq!(free, vec!["k".to_string(), "t".to_string()]);
    /// ```
    #[must_use]
    pub fn free_variables(&self, expr: &Expr) -> BTreeSet<String> {
        let mut free = BTreeSet::new();
        let mut visited = HashSet::new();
        self.collect_free(expr, &[], &mut visited, &mut free);
        free
    }

    /// Walks `expr`, recording free names into `free`.
    ///
    /// `bound` holds names bound by function parameters or `sum`; `visited`
    /// stops the walk from following a cyclic definition forever.
    fn collect_free(&self,
                    expr: &Expr,
                    bound: &[&str],
                    visited: &mut HashSet<String>,
                    free: &mut BTreeSet<String>) {
        match expr {
            Expr::Number { .. } => {},
            Expr::Variable { name, .. } => {
                if bound.contains(&name.as_str()) || is_builtin_constant(name) || is_builtin_function(name) {
                    return;
                }
                match self.lookup(name) {
                    Some(definition) => self.follow(definition, visited, free),
                    None => {
                        free.insert(name.clone());
                    },
                }
            },
            Expr::UnaryOp { expr, .. } => self.collect_free(expr, bound, visited, free),
            Expr::BinaryOp { left, right, .. } => {
                self.collect_free(left, bound, visited, free);
                self.collect_free(right, bound, visited, free);
            },
            Expr::FunctionCall { name, arguments, .. } => {
                if name == SUM_FUNCTIONAL
                   && let [Expr::Variable { name: var, .. }, start, stop, body] = arguments.as_slice()
                {
                    self.collect_free(start, bound, visited, free);
                    self.collect_free(stop, bound, visited, free);
                    let mut inner = bound.to_vec();
                    inner.push(var.as_str());
                    self.collect_free(body, &inner, visited, free);
                    return;
                }
                for argument in arguments {
                    self.collect_free(argument, bound, visited, free);
                }
                if let Some(definition) = self.lookup(name) {
                    self.follow(definition, visited, free);
                }
            },
            Expr::ParametricPair { x, y, .. } => {
                self.collect_free(x, bound, visited, free);
                self.collect_free(y, bound, visited, free);
            },
        }
    }

    /// Collects the free names of a definition body once per walk.
    fn follow(&self,
              definition: &Definition,
              visited: &mut HashSet<String>,
              free: &mut BTreeSet<String>) {
        if !visited.insert(definition.name.clone()) {
            return;
        }
        let params: Vec<&str> = definition.params.iter().map(String::as_str).collect();
        self.collect_free(&definition.body, &params, visited, free);
    }
}
