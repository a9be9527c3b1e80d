use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::{
    ast::{Definition, Domain, Expr, Statement},
    error::{Diagnostic, EvalError},
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Evaluator, evaluate_constant},
        lexer::tokenize,
        parser::{
            core::TokenStream,
            statement::{function_head, parse_statement},
            style::StyleDirective,
        },
        value::core::Samples,
    },
    plot::{
        curve::{Curve, CurveKind, Point},
        sampling::split_segments,
        viewport::Viewport,
    },
    util::num::{linspace, midpoints},
};

/// Name of the variable definition treated as a polar curve.
pub const POLAR_RADIUS: &str = "r";
/// Independent variables that make an `r` definition polar.
pub const POLAR_ANGLES: &[&str] = &["theta", "phi"];

/// Everything a compiled script produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileOutput {
    /// One curve per successfully plotted statement, in script order.
    pub curves:      Vec<Curve>,
    /// One diagnostic per failed line, ordered by line.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
    /// Returns `true` if no line failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Parses and compiles a whole script against `viewport`.
///
/// Blank lines and lines starting with `//` are skipped. Every other line is
/// one statement; a line that fails to lex, parse or evaluate becomes a
/// [`Diagnostic`] and compilation carries on with the next line.
///
/// The function is pure: calling it again with the same script and viewport
/// yields the same output, so a renderer simply re-runs it after every zoom
/// or pan.
///
/// # Example
/// ```
/// use graphite::plot::{compiler::compile_script, viewport::Viewport};
///
/// let script = "a = 2\nf(x) = a x^2\nf(x) \"parabola\"\nbroken(";
/// let out = compile_script(script, &Viewport::default());
///
/// assert_eq!(out.curves.len(), 1);
/// assert_eq!(out.curves[0].line, 3);
/// assert_eq!(out.diagnostics.len(), 1);
/// assert_eq!(out.diagnostics[0].line, 4);
/// ```
#[tracing::instrument(skip_all, fields(lines = source.lines().count(), resolution = viewport.resolution()))]
pub fn compile_script(source: &str, viewport: &Viewport) -> CompileOutput {
    let (statements, mut diagnostics) = parse_script(source);
    let mut output = compile(&statements, viewport);

    diagnostics.append(&mut output.diagnostics);
    diagnostics.sort_by_key(|d| d.line);
    output.diagnostics = diagnostics;

    debug!(curves = output.curves.len(),
           diagnostics = output.diagnostics.len(),
           "compiled script");
    output
}

/// Parses every statement of a script.
///
/// Function names are collected from all definition heads before any line is
/// parsed, so a call to a function defined further down is still a call.
///
/// Returns the statements that parsed and a diagnostic for each line that
/// did not.
#[must_use]
pub fn parse_script(source: &str) -> (Vec<Statement>, Vec<Diagnostic>) {
    let mut lexed = Vec::new();
    let mut diagnostics = Vec::new();

    for (index, text) in source.lines().enumerate() {
        let line = index + 1;
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        match tokenize(text, line) {
            Ok(tokens) => lexed.push(tokens),
            Err(e) => diagnostics.push(report(line, e)),
        }
    }

    let functions: HashSet<String> = lexed.iter()
                                          .filter_map(|tokens| function_head(tokens))
                                          .map(str::to_string)
                                          .collect();

    let mut statements = Vec::new();
    for tokens in &lexed {
        let mut stream = TokenStream::new(tokens, &functions);
        let line = stream.position().line;
        match parse_statement(&mut stream) {
            Ok(statement) => statements.push(statement),
            Err(e) => diagnostics.push(report(line, e)),
        }
    }

    (statements, diagnostics)
}

/// Compiles parsed statements against `viewport`.
///
/// Every definition is declared up front, then the statements run in order:
/// definitions update the environment, plots become curves.
#[must_use]
pub fn compile(statements: &[Statement], viewport: &Viewport) -> CompileOutput {
    let mut compiler = PlotCompiler::new(viewport);
    for statement in statements {
        if let Statement::Definition { definition, .. } = statement {
            compiler.env.declare_forward(definition);
        }
    }
    for statement in statements {
        compiler.compile_statement(statement);
    }
    compiler.output
}

/// Turns statements into curves, one at a time.
struct PlotCompiler<'v> {
    viewport: &'v Viewport,
    env:      Environment,
    output:   CompileOutput,
}

impl<'v> PlotCompiler<'v> {
    fn new(viewport: &'v Viewport) -> Self {
        Self { viewport,
               env: Environment::new(),
               output: CompileOutput::default() }
    }

    /// Compiles one statement, recording either its curve or a diagnostic.
    fn compile_statement(&mut self, statement: &Statement) {
        let line = statement.line();
        match self.statement_curve(statement) {
            Ok(Some(curve)) => {
                debug!(line,
                       kind = ?curve.kind,
                       segments = curve.segments.len(),
                       points = curve.point_count(),
                       "plotted statement");
                self.output.curves.push(curve);
            },
            Ok(None) => debug!(line, "stored definition"),
            Err(e) => self.output.diagnostics.push(report(line, e)),
        }
    }

    fn statement_curve(&mut self, statement: &Statement) -> EvalResult<Option<Curve>> {
        match statement {
            Statement::Definition { definition, style } => {
                self.env.define(definition.clone())?;
                match self.polar_angle(definition) {
                    Some(angle) => self.polar_curve(definition, &angle, style).map(Some),
                    None => Ok(None),
                }
            },
            Statement::ExpressionPlot { body,
                                        domain,
                                        style,
                                        line, } => {
                self.explicit_curve(body, domain.as_ref(), style, *line).map(Some)
            },
            Statement::ParametricPlot { x,
                                        y,
                                        domain,
                                        style,
                                        line, } => {
                self.parametric_curve(x, y, domain, style, *line).map(Some)
            },
        }
    }

    /// Samples `y = body` over the explicit domain or the viewport.
    ///
    /// The independent variable is the single free variable of the body. A
    /// body without one is drawn as a horizontal line.
    fn explicit_curve(&self,
                      body: &Expr,
                      domain: Option<&Domain>,
                      style: &StyleDirective,
                      line: usize)
                      -> EvalResult<Curve> {
        let free = self.env.free_variables(body);
        if free.len() > 1 {
            let names = free.into_iter().collect::<Vec<_>>().join(", ");
            return Err(EvalError::AmbiguousVariable { names });
        }
        let found = free.into_iter().next();

        let (var, low, high) = match domain {
            Some(domain) => {
                if let Some(found) = found
                   && found != domain.var
                {
                    return Err(EvalError::DomainVariableMismatch { domain: domain.var.clone(),
                                                                   found });
                }
                let (low, high) = self.bounds(domain)?;
                (Some(domain.var.clone()), low, high)
            },
            None => (found, self.viewport.x_min(), self.viewport.x_max()),
        };

        let xs = linspace(low, high, self.viewport.resolution());
        let (ys, halfway) = self.sample(body, var.as_deref(), &xs)?;
        let points: Vec<Point> = xs.iter().copied().zip(ys.iter().copied()).collect();

        Ok(Curve { line,
                   kind: CurveKind::Explicit,
                   segments: split_segments(&points, &ys, &halfway),
                   style: style.clone() })
    }

    /// Samples `(x, y)` over the parameter range and pairs them positionally.
    fn parametric_curve(&self,
                        x: &Expr,
                        y: &Expr,
                        domain: &Domain,
                        style: &StyleDirective,
                        line: usize)
                        -> EvalResult<Curve> {
        let (low, high) = self.bounds(domain)?;
        let n = self.viewport.resolution();
        let ts = linspace(low, high, n);

        let bindings = HashMap::from([(domain.var.clone(), Samples::from(ts))]);
        let mut evaluator = Evaluator::with_bindings(&self.env, bindings);
        let xs = evaluator.evaluate(x)?.into_vec(n)?;
        let ys = evaluator.evaluate(y)?.into_vec(n)?;
        let points: Vec<Point> = xs.into_iter().zip(ys).collect();

        Ok(Curve { line,
                   kind: CurveKind::Parametric,
                   segments: split_segments(&points, &[], &[]),
                   style: style.clone() })
    }

    /// Samples `r = body(angle)` over a full turn and converts to Cartesian.
    fn polar_curve(&self,
                   definition: &Definition,
                   angle: &str,
                   style: &StyleDirective)
                   -> EvalResult<Curve> {
        let thetas = linspace(0.0, std::f64::consts::TAU, self.viewport.resolution());
        let (radii, halfway) = self.sample(&definition.body, Some(angle), &thetas)?;
        let points: Vec<Point> = thetas.iter()
                                       .zip(&radii)
                                       .map(|(t, r)| (r * t.cos(), r * t.sin()))
                                       .collect();

        Ok(Curve { line:     definition.line,
                   kind:     CurveKind::Polar,
                   segments: split_segments(&points, &radii, &halfway),
                   style:    style.clone(), })
    }

    /// Evaluates `body` on `grid` and on the grid's midpoints.
    ///
    /// Without a variable the body is evaluated once and repeated; no
    /// midpoints are needed since a constant has no poles.
    fn sample(&self,
              body: &Expr,
              var: Option<&str>,
              grid: &[f64])
              -> EvalResult<(Vec<f64>, Vec<f64>)> {
        let Some(var) = var else {
            let value = Evaluator::new(&self.env).evaluate(body)?;
            return Ok((value.into_vec(grid.len())?, Vec::new()));
        };

        let halfway = midpoints(grid);
        let halfway_len = halfway.len();

        let on_grid = self.evaluate_at(body, var, grid.to_vec())?
                          .into_vec(grid.len())?;
        let between = self.evaluate_at(body, var, halfway)?
                          .into_vec(halfway_len)?;
        Ok((on_grid, between))
    }

    fn evaluate_at(&self, body: &Expr, var: &str, values: Vec<f64>) -> EvalResult<Samples> {
        let bindings = HashMap::from([(var.to_string(), Samples::from(values))]);
        Evaluator::with_bindings(&self.env, bindings).evaluate(body)
    }

    /// Evaluates the constant bounds of a domain.
    ///
    /// A bound that refers to the domain variable itself is reported as
    /// `NotConstant` rather than as an undefined name.
    fn bounds(&self, domain: &Domain) -> EvalResult<(f64, f64)> {
        let low = self.constant(&domain.low, &domain.var, "lower bound")?;
        let high = self.constant(&domain.high, &domain.var, "upper bound")?;
        Ok((low, high))
    }

    fn constant(&self, expr: &Expr, var: &str, what: &str) -> EvalResult<f64> {
        evaluate_constant(&self.env, expr, what).map_err(|e| match e {
                                                    EvalError::UndefinedName { name } if name == var => {
                                                        EvalError::NotConstant { what: what.to_string() }
                                                    },
                                                    other => other,
                                                })
    }

    /// Returns the angle variable if `definition` is a polar curve: a plain
    /// variable named `r` whose only free variable is an angle name.
    fn polar_angle(&self, definition: &Definition) -> Option<String> {
        if definition.name != POLAR_RADIUS || definition.is_function() {
            return None;
        }
        let free = self.env.free_variables(&definition.body);
        match free.iter().collect::<Vec<_>>().as_slice() {
            [angle] if POLAR_ANGLES.contains(&angle.as_str()) => Some((*angle).clone()),
            _ => None,
        }
    }
}

/// Converts a line failure into a diagnostic and logs it.
fn report(line: usize, error: impl Into<crate::error::Error>) -> Diagnostic {
    let diagnostic = Diagnostic::new(line, error);
    warn!(line, message = %diagnostic.message, "line failed");
    diagnostic
}
