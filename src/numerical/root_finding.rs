//! Scalar root finding for f(x) = 0: bisection, regula falsi, fixed-point iteration,
//! Newton-Raphson and secant, all sharing one configuration, result type and trace format.
pub mod bisection;
pub mod bracketing;
pub mod common;
pub mod errors;
pub mod fixed_point;
pub mod newton_raphson;
pub mod nonlinear_function;
pub mod regula_falsi;
#[cfg(test)]
mod root_finding_tests;
pub mod secant;
pub mod solve_api;
pub mod tracer;

pub use bisection::Bisection;
pub use common::{RootFinder, RootFindingMethod, RootFindingResult, SolverConfig};
pub use errors::{DivergenceCause, RootFindingError};
pub use fixed_point::FixedPoint;
pub use newton_raphson::NewtonRaphson;
pub use nonlinear_function::{
    ClosureFunction, FunctionWithDerivative, NonlinearFunction, SymbolicFunction,
};
pub use regula_falsi::RegulaFalsi;
pub use secant::Secant;
pub use solve_api::RootFindingTask;
pub use tracer::{IterationRecord, IterationTracer, headers_for};
