use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::symbolic_lambdify::EvalError;
use std::fmt;
use thiserror::Error;

/// What stopped an open method dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergenceCause {
    /// Newton-Raphson: f'(x) is exactly zero
    ZeroDerivative,
    /// Secant: f(x1) - f(x0) is exactly zero
    ZeroSecantDenominator,
}

impl fmt::Display for DivergenceCause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DivergenceCause::ZeroDerivative => write!(f, "zero derivative"),
            DivergenceCause::ZeroSecantDenominator => write!(f, "zero divisor"),
        }
    }
}

/// Error types for root finding methods.
///
/// Running out of iterations is deliberately absent: it is reported through
/// `RootFindingResult::iterations == max_iterations`, not as an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RootFindingError {
    #[error("failed to parse expression: {0}")]
    Parse(#[from] ParseError),

    #[error("no sign change in bracket [{a}, {b}]: f(a) = {fa}, f(b) = {fb}")]
    Bracket { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("{cause} at x = {x} after {iterations} iterations")]
    HardDivergence {
        cause: DivergenceCause,
        x: f64,
        iterations: usize,
    },

    #[error("cannot evaluate function at x = {x} (iteration {iteration}): {source}")]
    DomainEvaluation {
        x: f64,
        iteration: usize,
        #[source]
        source: EvalError,
    },

    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}

impl RootFindingError {
    /// Short category name used in summaries and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RootFindingError::Parse(_) => "ParseError",
            RootFindingError::Bracket { .. } => "BracketError",
            RootFindingError::HardDivergence { .. } => "HardDivergence",
            RootFindingError::DomainEvaluation { .. } => "DomainEvaluationError",
            RootFindingError::InvalidConfig(_) => "InvalidConfig",
        }
    }
}
