use crate::numerical::root_finding::bracketing::{TrialPoint, bracket_loop};
use crate::numerical::root_finding::common::{
    RootFinder, RootFindingMethod, RootFindingResult, SolverConfig,
};
use crate::numerical::root_finding::nonlinear_function::NonlinearFunction;

/// False position: the trial point is where the chord through (a, f(a)) and (b, f(b))
/// crosses zero. Stops on |f(c)| < tol only, so on convex functions one endpoint may stay
/// fixed and convergence becomes linear.
pub struct RegulaFalsi<F> {
    function: F,
    a: f64,
    b: f64,
}

impl<F: NonlinearFunction> RegulaFalsi<F> {
    pub fn new(function: F, a: f64, b: f64) -> Self {
        Self { function, a, b }
    }
}

impl<F: NonlinearFunction> RootFinder for RegulaFalsi<F> {
    fn method(&self) -> RootFindingMethod {
        RootFindingMethod::RegulaFalsi
    }

    fn solve(&self, config: &SolverConfig) -> RootFindingResult {
        bracket_loop(
            &self.function,
            self.method(),
            TrialPoint::FalsePosition,
            self.a,
            self.b,
            config,
        )
    }
}
