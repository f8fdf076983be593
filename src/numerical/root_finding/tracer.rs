use crate::numerical::root_finding::common::RootFindingMethod;
use log::debug;

const BRACKET_HEADERS: &[&str] = &["Iteration", "a", "b", "c", "f(c)"];
const FIXED_POINT_HEADERS: &[&str] = &["Iteration", "x0", "x1 = g(x0)", "|x1 - x0|", "f(x1)"];
const NEWTON_HEADERS: &[&str] = &["Iteration", "x0", "f(x0)", "f'(x0)", "x1", "|x1 - x0|"];
const SECANT_HEADERS: &[&str] = &["Iteration", "x0", "x1", "x2", "f(x1)", "|x2 - x1|"];

/// Column titles of the records a method produces, also when its trace is empty.
pub fn headers_for(method: RootFindingMethod) -> &'static [&'static str] {
    match method {
        RootFindingMethod::Bisection | RootFindingMethod::RegulaFalsi => BRACKET_HEADERS,
        RootFindingMethod::FixedPoint => FIXED_POINT_HEADERS,
        RootFindingMethod::NewtonRaphson => NEWTON_HEADERS,
        RootFindingMethod::Secant => SECANT_HEADERS,
    }
}

/// One completed iteration of a solver, shaped by the method's working state.
#[derive(Debug, Clone, PartialEq)]
pub enum IterationRecord {
    /// Bisection and Regula Falsi: bracket before the update, trial point and residual
    Bracket {
        index: usize,
        a: f64,
        b: f64,
        c: f64,
        fc: f64,
    },
    /// Fixed-point: x1 = g(x0); residual is f(x1) when the original equation is known
    FixedPoint {
        index: usize,
        x0: f64,
        x1: f64,
        step: f64,
        residual: Option<f64>,
    },
    Newton {
        index: usize,
        x0: f64,
        fx: f64,
        dfx: f64,
        x1: f64,
        step: f64,
    },
    Secant {
        index: usize,
        x0: f64,
        x1: f64,
        x2: f64,
        fx1: f64,
        step: f64,
    },
}

impl IterationRecord {
    /// 1-based iteration number
    pub fn index(&self) -> usize {
        match self {
            IterationRecord::Bracket { index, .. }
            | IterationRecord::FixedPoint { index, .. }
            | IterationRecord::Newton { index, .. }
            | IterationRecord::Secant { index, .. } => *index,
        }
    }

    /// The new estimate of the root produced by this iteration.
    pub fn estimate(&self) -> f64 {
        match self {
            IterationRecord::Bracket { c, .. } => *c,
            IterationRecord::FixedPoint { x1, .. } => *x1,
            IterationRecord::Newton { x1, .. } => *x1,
            IterationRecord::Secant { x2, .. } => *x2,
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            IterationRecord::Bracket { .. } => BRACKET_HEADERS,
            IterationRecord::FixedPoint { .. } => FIXED_POINT_HEADERS,
            IterationRecord::Newton { .. } => NEWTON_HEADERS,
            IterationRecord::Secant { .. } => SECANT_HEADERS,
        }
    }

    /// Cells in `headers()` order; `None` prints values in full precision.
    pub fn row(&self, precision: Option<usize>) -> Vec<String> {
        let cell = |v: f64| match precision {
            Some(p) => format!("{:.*}", p, v),
            None => v.to_string(),
        };
        let mut cells = vec![self.index().to_string()];
        match self {
            IterationRecord::Bracket { a, b, c, fc, .. } => {
                cells.extend([*a, *b, *c, *fc].map(cell));
            }
            IterationRecord::FixedPoint {
                x0,
                x1,
                step,
                residual,
                ..
            } => {
                cells.extend([*x0, *x1, *step].map(cell));
                cells.push(residual.map(cell).unwrap_or_else(|| "-".to_string()));
            }
            IterationRecord::Newton {
                x0,
                fx,
                dfx,
                x1,
                step,
                ..
            } => {
                cells.extend([*x0, *fx, *dfx, *x1, *step].map(cell));
            }
            IterationRecord::Secant {
                x0,
                x1,
                x2,
                fx1,
                step,
                ..
            } => {
                cells.extend([*x0, *x1, *x2, *fx1, *step].map(cell));
            }
        }
        cells
    }
}

/// Append-only log of the iterations of one solver run.
#[derive(Debug, Clone)]
pub struct IterationTracer {
    method: RootFindingMethod,
    records: Vec<IterationRecord>,
}

impl IterationTracer {
    pub fn new(method: RootFindingMethod) -> Self {
        Self {
            method,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: IterationRecord) {
        debug!("{}: {:?}", self.method, record);
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<IterationRecord> {
        self.records
    }
}
