use crate::numerical::root_finding::bracketing::{TrialPoint, bracket_loop};
use crate::numerical::root_finding::common::{
    RootFinder, RootFindingMethod, RootFindingResult, SolverConfig,
};
use crate::numerical::root_finding::nonlinear_function::NonlinearFunction;

/// Bisection method: halves a sign-changing bracket [a, b] until |f(c)| < tol
/// or the half-width (b - a)/2 < tol.
pub struct Bisection<F> {
    function: F,
    a: f64,
    b: f64,
}

impl<F: NonlinearFunction> Bisection<F> {
    pub fn new(function: F, a: f64, b: f64) -> Self {
        Self { function, a, b }
    }
}

impl<F: NonlinearFunction> RootFinder for Bisection<F> {
    fn method(&self) -> RootFindingMethod {
        RootFindingMethod::Bisection
    }

    fn solve(&self, config: &SolverConfig) -> RootFindingResult {
        bracket_loop(
            &self.function,
            self.method(),
            TrialPoint::Midpoint,
            self.a,
            self.b,
            config,
        )
    }
}
