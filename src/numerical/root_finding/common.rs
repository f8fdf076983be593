use crate::numerical::root_finding::errors::RootFindingError;
use crate::numerical::root_finding::nonlinear_function::NonlinearFunction;
use crate::numerical::root_finding::tracer::{IterationRecord, IterationTracer};
use log::{error, info, warn};
use strum_macros::{Display, EnumIter, EnumString};

/// Enum to represent the root finding methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum RootFindingMethod {
    Bisection,
    RegulaFalsi,
    FixedPoint,
    NewtonRaphson,
    Secant,
}

impl RootFindingMethod {
    /// Human readable title for tables and reports
    pub fn title(&self) -> &'static str {
        match self {
            RootFindingMethod::Bisection => "Bisection",
            RootFindingMethod::RegulaFalsi => "Regula Falsi",
            RootFindingMethod::FixedPoint => "Fixed-Point Iteration",
            RootFindingMethod::NewtonRaphson => "Newton-Raphson",
            RootFindingMethod::Secant => "Secant",
        }
    }

    /// Bracketing methods need f(a) and f(b) of opposite signs.
    pub fn is_bracketing(&self) -> bool {
        matches!(
            self,
            RootFindingMethod::Bisection | RootFindingMethod::RegulaFalsi
        )
    }
}

/// Tolerance and iteration budget of one solver run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

impl SolverConfig {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Set tolerance for convergence
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }

    /// Set maximum number of iterations
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    pub fn validate(&self) -> Result<(), RootFindingError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(RootFindingError::InvalidConfig(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(RootFindingError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of one solver run.
///
/// * converged: `root` is `Some`, `iterations < max_iterations` or the last step met the tolerance
/// * soft non-convergence: `root` is the last estimate and `iterations == max_iterations`
/// * hard failure: `root` is `None` and `error` says why
///
/// `trace.len() == iterations` holds for all three.
#[derive(Debug, Clone, PartialEq)]
pub struct RootFindingResult {
    pub method: RootFindingMethod,
    pub root: Option<f64>,
    pub iterations: usize,
    pub trace: Vec<IterationRecord>,
    pub error: Option<RootFindingError>,
}

impl RootFindingResult {
    pub(crate) fn converged(method: RootFindingMethod, root: f64, tracer: IterationTracer) -> Self {
        let trace = tracer.into_records();
        info!(
            "{}: converged to {:.6} in {} iterations",
            method,
            root,
            trace.len()
        );
        Self {
            method,
            root: Some(root),
            iterations: trace.len(),
            trace,
            error: None,
        }
    }

    pub(crate) fn budget_exhausted(
        method: RootFindingMethod,
        estimate: f64,
        tracer: IterationTracer,
    ) -> Self {
        let trace = tracer.into_records();
        warn!(
            "{}: tolerance not met within {} iterations, returning last estimate {}",
            method,
            trace.len(),
            estimate
        );
        Self {
            method,
            root: Some(estimate),
            iterations: trace.len(),
            trace,
            error: None,
        }
    }

    pub(crate) fn failed(
        method: RootFindingMethod,
        err: RootFindingError,
        tracer: IterationTracer,
    ) -> Self {
        let trace = tracer.into_records();
        error!("{}: {}", method, err);
        Self {
            method,
            root: None,
            iterations: trace.len(),
            trace,
            error: Some(err),
        }
    }

    /// A root (certified or best-effort) was produced.
    pub fn is_success(&self) -> bool {
        self.root.is_some() && self.error.is_none()
    }

    /// The run ended by using up its budget rather than by meeting the tolerance.
    pub fn exhausted(&self, config: &SolverConfig) -> bool {
        self.error.is_none() && self.iterations >= config.max_iterations
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    pub fn into_result(self) -> Result<f64, RootFindingError> {
        match (self.root, self.error) {
            (_, Some(err)) => Err(err),
            (Some(root), None) => Ok(root),
            (None, None) => Err(RootFindingError::InvalidConfig(
                "solver produced neither a root nor an error".to_string(),
            )),
        }
    }
}

/// Common contract of the five methods: given a configuration, produce a result.
pub trait RootFinder {
    fn method(&self) -> RootFindingMethod;

    fn solve(&self, config: &SolverConfig) -> RootFindingResult;
}

/// Evaluates `function` at `x`, turning an evaluation failure into a solver error.
pub(crate) fn evaluate_at<F>(function: &F, x: f64, iteration: usize) -> Result<f64, RootFindingError>
where
    F: NonlinearFunction + ?Sized,
{
    function
        .evaluate(x)
        .map_err(|source| RootFindingError::DomainEvaluation {
            x,
            iteration,
            source,
        })
}
