//! Loop shared by the two bracketing methods. They differ only in how the trial point
//! is chosen and in whether a small bracket alone counts as convergence.
use crate::numerical::root_finding::common::{
    RootFindingMethod, RootFindingResult, SolverConfig, evaluate_at,
};
use crate::numerical::root_finding::errors::RootFindingError;
use crate::numerical::root_finding::nonlinear_function::NonlinearFunction;
use crate::numerical::root_finding::tracer::{IterationRecord, IterationTracer};
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrialPoint {
    /// c = (a + b) / 2; also stops when the half-width drops below tolerance
    Midpoint,
    /// c = b - f(b)(b - a) / (f(b) - f(a)); stops on |f(c)| only
    FalsePosition,
}

fn endpoint_values<F>(function: &F, a: f64, b: f64) -> Result<(f64, f64), RootFindingError>
where
    F: NonlinearFunction + ?Sized,
{
    Ok((evaluate_at(function, a, 0)?, evaluate_at(function, b, 0)?))
}

pub(crate) fn bracket_loop<F>(
    function: &F,
    method: RootFindingMethod,
    trial: TrialPoint,
    a: f64,
    b: f64,
    config: &SolverConfig,
) -> RootFindingResult
where
    F: NonlinearFunction + ?Sized,
{
    let mut tracer = IterationTracer::new(method);
    if let Err(err) = config.validate() {
        return RootFindingResult::failed(method, err, tracer);
    }
    info!(
        "{}: solving {} = 0 on [{}, {}], tolerance {}",
        method,
        function.name(),
        a,
        b,
        config.tolerance
    );

    let (mut fa, mut fb) = match endpoint_values(function, a, b) {
        Ok(values) => values,
        Err(err) => return RootFindingResult::failed(method, err, tracer),
    };
    if fa * fb >= 0.0 {
        let err = RootFindingError::Bracket { a, b, fa, fb };
        return RootFindingResult::failed(method, err, tracer);
    }

    let (mut a, mut b) = (a, b);
    let mut c = a;
    for i in 0..config.max_iterations {
        c = match trial {
            TrialPoint::Midpoint => (a + b) / 2.0,
            TrialPoint::FalsePosition => b - fb * (b - a) / (fb - fa),
        };
        let fc = match evaluate_at(function, c, i + 1) {
            Ok(value) => value,
            Err(err) => return RootFindingResult::failed(method, err, tracer),
        };
        tracer.push(IterationRecord::Bracket {
            index: i + 1,
            a,
            b,
            c,
            fc,
        });

        let small_bracket = trial == TrialPoint::Midpoint && ((b - a) / 2.0).abs() < config.tolerance;
        if fc.abs() < config.tolerance || small_bracket {
            return RootFindingResult::converged(method, c, tracer);
        }

        if fa * fc < 0.0 {
            b = c;
            fb = fc;
        } else {
            a = c;
            fa = fc;
        }
    }
    RootFindingResult::budget_exhausted(method, c, tracer)
}
