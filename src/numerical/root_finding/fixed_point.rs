use crate::numerical::root_finding::common::{
    RootFinder, RootFindingMethod, RootFindingResult, SolverConfig, evaluate_at,
};
use crate::numerical::root_finding::nonlinear_function::NonlinearFunction;
use crate::numerical::root_finding::tracer::{IterationRecord, IterationTracer};
use log::{debug, info};

/// Fixed-point iteration x1 = g(x0) for an equation already written as x = g(x).
///
/// Whether |g'(x)| < 1 near the root is not checked: a divergent g simply runs out of
/// iterations. The optional `residual` function is the original f, evaluated only to show
/// f(x1) in the trace.
pub struct FixedPoint<G, R = G> {
    g: G,
    x0: f64,
    residual: Option<R>,
}

impl<G: NonlinearFunction> FixedPoint<G, G> {
    pub fn new(g: G, x0: f64) -> Self {
        Self {
            g,
            x0,
            residual: None,
        }
    }
}

impl<G: NonlinearFunction, R: NonlinearFunction> FixedPoint<G, R> {
    /// Attach the original equation f(x) = 0 so each record carries f(x1)
    pub fn with_residual<R2: NonlinearFunction>(self, f: R2) -> FixedPoint<G, R2> {
        FixedPoint {
            g: self.g,
            x0: self.x0,
            residual: Some(f),
        }
    }

    pub fn set_initial_guess(&mut self, x0: f64) {
        self.x0 = x0;
    }

    fn residual_at(&self, x: f64) -> Option<f64> {
        let f = self.residual.as_ref()?;
        match f.evaluate(x) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("residual unavailable at x = {}: {}", x, err);
                None
            }
        }
    }
}

impl<G: NonlinearFunction, R: NonlinearFunction> RootFinder for FixedPoint<G, R> {
    fn method(&self) -> RootFindingMethod {
        RootFindingMethod::FixedPoint
    }

    fn solve(&self, config: &SolverConfig) -> RootFindingResult {
        let method = self.method();
        let mut tracer = IterationTracer::new(method);
        if let Err(err) = config.validate() {
            return RootFindingResult::failed(method, err, tracer);
        }
        info!(
            "{}: iterating x = {} from x0 = {}",
            method,
            self.g.name(),
            self.x0
        );

        let mut x0 = self.x0;
        for i in 0..config.max_iterations {
            let x1 = match evaluate_at(&self.g, x0, i + 1) {
                Ok(value) => value,
                Err(err) => return RootFindingResult::failed(method, err, tracer),
            };
            let step = (x1 - x0).abs();
            tracer.push(IterationRecord::FixedPoint {
                index: i + 1,
                x0,
                x1,
                step,
                residual: self.residual_at(x1),
            });
            if step < config.tolerance {
                return RootFindingResult::converged(method, x1, tracer);
            }
            x0 = x1;
        }
        RootFindingResult::budget_exhausted(method, x0, tracer)
    }
}
