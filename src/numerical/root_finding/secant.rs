use crate::numerical::root_finding::common::{
    RootFinder, RootFindingMethod, RootFindingResult, SolverConfig, evaluate_at,
};
use crate::numerical::root_finding::errors::{DivergenceCause, RootFindingError};
use crate::numerical::root_finding::nonlinear_function::NonlinearFunction;
use crate::numerical::root_finding::tracer::{IterationRecord, IterationTracer};
use log::info;

/// Secant method: Newton with the derivative replaced by the slope through the last two
/// iterates. f is evaluated once per iteration; equal values at the two iterates are a hard stop.
pub struct Secant<F> {
    function: F,
    x0: f64,
    x1: f64,
}

impl<F: NonlinearFunction> Secant<F> {
    pub fn new(function: F, x0: f64, x1: f64) -> Self {
        Self { function, x0, x1 }
    }

    fn seed_values(&self) -> Result<(f64, f64), RootFindingError> {
        Ok((
            evaluate_at(&self.function, self.x0, 0)?,
            evaluate_at(&self.function, self.x1, 0)?,
        ))
    }
}

impl<F: NonlinearFunction> RootFinder for Secant<F> {
    fn method(&self) -> RootFindingMethod {
        RootFindingMethod::Secant
    }

    fn solve(&self, config: &SolverConfig) -> RootFindingResult {
        let method = self.method();
        let mut tracer = IterationTracer::new(method);
        if let Err(err) = config.validate() {
            return RootFindingResult::failed(method, err, tracer);
        }
        info!(
            "{}: solving {} = 0 from x0 = {}, x1 = {}",
            method,
            self.function.name(),
            self.x0,
            self.x1
        );

        let (mut f0, mut f1) = match self.seed_values() {
            Ok(values) => values,
            Err(err) => return RootFindingResult::failed(method, err, tracer),
        };
        let (mut x0, mut x1) = (self.x0, self.x1);
        for i in 0..config.max_iterations {
            let denominator = f1 - f0;
            if denominator == 0.0 {
                let err = RootFindingError::HardDivergence {
                    cause: DivergenceCause::ZeroSecantDenominator,
                    x: x1,
                    iterations: i,
                };
                return RootFindingResult::failed(method, err, tracer);
            }
            let x2 = x1 - f1 * (x1 - x0) / denominator;
            let step = (x2 - x1).abs();
            tracer.push(IterationRecord::Secant {
                index: i + 1,
                x0,
                x1,
                x2,
                fx1: f1,
                step,
            });
            if step < config.tolerance {
                return RootFindingResult::converged(method, x2, tracer);
            }
            // f(x2) feeds the next iteration
            let f2 = match evaluate_at(&self.function, x2, i + 2) {
                Ok(value) => value,
                Err(err) => return RootFindingResult::failed(method, err, tracer),
            };
            (x0, f0) = (x1, f1);
            (x1, f1) = (x2, f2);
        }
        RootFindingResult::budget_exhausted(method, x1, tracer)
    }
}
