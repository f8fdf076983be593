//! String-level entry points: one call per method taking expression text, seeds,
//! tolerance and iteration budget. Malformed text is reported inside the result
//! (`RootFindingError::Parse`, zero iterations), never as a panic.
use crate::numerical::root_finding::bisection::Bisection;
use crate::numerical::root_finding::common::{
    RootFinder, RootFindingMethod, RootFindingResult, SolverConfig,
};
use crate::numerical::root_finding::fixed_point::FixedPoint;
use crate::numerical::root_finding::newton_raphson::NewtonRaphson;
use crate::numerical::root_finding::nonlinear_function::SymbolicFunction;
use crate::numerical::root_finding::regula_falsi::RegulaFalsi;
use crate::numerical::root_finding::secant::Secant;
use crate::numerical::root_finding::tracer::IterationTracer;

/// Name of the free variable in user expressions
pub const VARIABLE: &str = "x";

/// Everything one method needs besides the solver configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum RootFindingTask {
    Bisection {
        function: String,
        a: f64,
        b: f64,
    },
    RegulaFalsi {
        function: String,
        a: f64,
        b: f64,
    },
    /// `g_function` is the iteration function of x = g(x); `f_function` only adds residuals
    FixedPoint {
        g_function: String,
        f_function: Option<String>,
        x0: f64,
    },
    NewtonRaphson {
        function: String,
        x0: f64,
    },
    Secant {
        function: String,
        x0: f64,
        x1: f64,
    },
}

impl RootFindingTask {
    pub fn method(&self) -> RootFindingMethod {
        match self {
            RootFindingTask::Bisection { .. } => RootFindingMethod::Bisection,
            RootFindingTask::RegulaFalsi { .. } => RootFindingMethod::RegulaFalsi,
            RootFindingTask::FixedPoint { .. } => RootFindingMethod::FixedPoint,
            RootFindingTask::NewtonRaphson { .. } => RootFindingMethod::NewtonRaphson,
            RootFindingTask::Secant { .. } => RootFindingMethod::Secant,
        }
    }

    /// The expression the method iterates on (g for fixed-point, f otherwise).
    pub fn function(&self) -> &str {
        match self {
            RootFindingTask::Bisection { function, .. }
            | RootFindingTask::RegulaFalsi { function, .. }
            | RootFindingTask::NewtonRaphson { function, .. }
            | RootFindingTask::Secant { function, .. } => function,
            RootFindingTask::FixedPoint { g_function, .. } => g_function,
        }
    }

    pub fn solve(&self, config: &SolverConfig) -> RootFindingResult {
        let method = self.method();
        let parse = |text: &str| SymbolicFunction::from_string(text, VARIABLE);
        let outcome = match self {
            RootFindingTask::Bisection { function, a, b } => {
                parse(function).map(|f| Bisection::new(f, *a, *b).solve(config))
            }
            RootFindingTask::RegulaFalsi { function, a, b } => {
                parse(function).map(|f| RegulaFalsi::new(f, *a, *b).solve(config))
            }
            RootFindingTask::FixedPoint {
                g_function,
                f_function,
                x0,
            } => parse(g_function).and_then(|g| match f_function {
                Some(f_text) => {
                    let f = parse(f_text)?;
                    Ok(FixedPoint::new(g, *x0).with_residual(f).solve(config))
                }
                None => Ok(FixedPoint::new(g, *x0).solve(config)),
            }),
            RootFindingTask::NewtonRaphson { function, x0 } => {
                parse(function).map(|f| NewtonRaphson::new(f, *x0).solve(config))
            }
            RootFindingTask::Secant { function, x0, x1 } => {
                parse(function).map(|f| Secant::new(f, *x0, *x1).solve(config))
            }
        };
        outcome.unwrap_or_else(|err| RootFindingResult::failed(method, err, IterationTracer::new(method)))
    }
}

pub fn bisection(function: &str, a: f64, b: f64, tolerance: f64, max_iterations: usize) -> RootFindingResult {
    RootFindingTask::Bisection {
        function: function.to_string(),
        a,
        b,
    }
    .solve(&SolverConfig::new(tolerance, max_iterations))
}

pub fn regula_falsi(
    function: &str,
    a: f64,
    b: f64,
    tolerance: f64,
    max_iterations: usize,
) -> RootFindingResult {
    RootFindingTask::RegulaFalsi {
        function: function.to_string(),
        a,
        b,
    }
    .solve(&SolverConfig::new(tolerance, max_iterations))
}

/// `g_function` must already be in fixed-point form x = g(x).
pub fn fixed_point(
    g_function: &str,
    f_function: Option<&str>,
    x0: f64,
    tolerance: f64,
    max_iterations: usize,
) -> RootFindingResult {
    RootFindingTask::FixedPoint {
        g_function: g_function.to_string(),
        f_function: f_function.map(str::to_string),
        x0,
    }
    .solve(&SolverConfig::new(tolerance, max_iterations))
}

/// Takes the text of f itself: the derivative is obtained symbolically.
pub fn newton_raphson(function: &str, x0: f64, tolerance: f64, max_iterations: usize) -> RootFindingResult {
    RootFindingTask::NewtonRaphson {
        function: function.to_string(),
        x0,
    }
    .solve(&SolverConfig::new(tolerance, max_iterations))
}

pub fn secant(function: &str, x0: f64, x1: f64, tolerance: f64, max_iterations: usize) -> RootFindingResult {
    RootFindingTask::Secant {
        function: function.to_string(),
        x0,
        x1,
    }
    .solve(&SolverConfig::new(tolerance, max_iterations))
}
