use crate::numerical::root_finding::common::{
    RootFinder, RootFindingMethod, RootFindingResult, SolverConfig, evaluate_at,
};
use crate::numerical::root_finding::errors::{DivergenceCause, RootFindingError};
use crate::numerical::root_finding::nonlinear_function::NonlinearFunction;
use crate::numerical::root_finding::tracer::{IterationRecord, IterationTracer};
use crate::symbolic::utils::central_difference;
use log::info;

/// Step of the central difference used when the function has no analytical derivative
const FALLBACK_STEP: f64 = 1e-8;

/// Newton-Raphson: x1 = x0 - f(x0)/f'(x0).
///
/// The derivative comes from `NonlinearFunction::derivative` (symbolic for
/// [`SymbolicFunction`](super::SymbolicFunction)); functions without one fall back to a
/// central difference. An exactly zero derivative is a hard stop.
pub struct NewtonRaphson<F> {
    function: F,
    x0: f64,
}

impl<F: NonlinearFunction> NewtonRaphson<F> {
    pub fn new(function: F, x0: f64) -> Self {
        Self { function, x0 }
    }

    pub fn set_initial_guess(&mut self, x0: f64) {
        self.x0 = x0;
    }

    fn derivative_at(&self, x: f64, iteration: usize) -> Result<f64, RootFindingError> {
        let value = match self.function.derivative(x) {
            Some(analytical) => analytical,
            None => central_difference(&|t| self.function.evaluate(t), x, FALLBACK_STEP),
        };
        value.map_err(|source| RootFindingError::DomainEvaluation {
            x,
            iteration,
            source,
        })
    }

    fn step(&self, x0: f64, iteration: usize) -> Result<(f64, f64), RootFindingError> {
        Ok((
            evaluate_at(&self.function, x0, iteration)?,
            self.derivative_at(x0, iteration)?,
        ))
    }
}

impl<F: NonlinearFunction> RootFinder for NewtonRaphson<F> {
    fn method(&self) -> RootFindingMethod {
        RootFindingMethod::NewtonRaphson
    }

    fn solve(&self, config: &SolverConfig) -> RootFindingResult {
        let method = self.method();
        let mut tracer = IterationTracer::new(method);
        if let Err(err) = config.validate() {
            return RootFindingResult::failed(method, err, tracer);
        }
        info!(
            "{}: solving {} = 0 from x0 = {}",
            method,
            self.function.name(),
            self.x0
        );

        let mut x0 = self.x0;
        for i in 0..config.max_iterations {
            let (fx, dfx) = match self.step(x0, i + 1) {
                Ok(values) => values,
                Err(err) => return RootFindingResult::failed(method, err, tracer),
            };
            if dfx == 0.0 {
                let err = RootFindingError::HardDivergence {
                    cause: DivergenceCause::ZeroDerivative,
                    x: x0,
                    iterations: i,
                };
                return RootFindingResult::failed(method, err, tracer);
            }
            let x1 = x0 - fx / dfx;
            let step = (x1 - x0).abs();
            tracer.push(IterationRecord::Newton {
                index: i + 1,
                x0,
                fx,
                dfx,
                x1,
                step,
            });
            if step < config.tolerance {
                return RootFindingResult::converged(method, x1, tracer);
            }
            x0 = x1;
        }
        RootFindingResult::budget_exhausted(method, x0, tracer)
    }
}
