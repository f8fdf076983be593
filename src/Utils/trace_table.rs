use crate::numerical::root_finding::{RootFindingResult, SolverConfig, headers_for};
use tabled::{builder::Builder, settings::Style};

/// Decimal places used for trace cells unless the caller asks otherwise
pub const DEFAULT_PRECISION: usize = 6;

/// One-word outcome of a run.
pub fn status(result: &RootFindingResult, config: &SolverConfig) -> String {
    match &result.error {
        Some(err) => err.kind().to_string(),
        None if result.exhausted(config) => "max iterations reached".to_string(),
        None => "converged".to_string(),
    }
}

/// Iteration trace of one run as a table, one row per iteration.
pub fn trace_table(result: &RootFindingResult, precision: usize) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers_for(result.method).iter().map(|h| h.to_string()));
    for record in &result.trace {
        builder.push_record(record.row(Some(precision)));
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

/// Side-by-side comparison of several runs.
pub fn summary_table(results: &[RootFindingResult], config: &SolverConfig) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Method", "Root", "Iterations", "Status"].map(String::from));
    for result in results {
        let root = result
            .root
            .map(|r| format!("{:.6}", r))
            .unwrap_or_else(|| "-".to_string());
        builder.push_record([
            result.method.title().to_string(),
            root,
            result.iterations.to_string(),
            status(result, config),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

/// Full text report of one run: title, trace and outcome.
pub fn report(result: &RootFindingResult, config: &SolverConfig, precision: usize) -> String {
    let mut out = format!("{}\n", result.method.title());
    if !result.trace.is_empty() {
        out.push_str(&trace_table(result, precision));
        out.push('\n');
    }
    match (&result.root, &result.error) {
        (_, Some(err)) => out.push_str(&format!("{}: {}\n", err.kind(), err)),
        (Some(root), None) if result.exhausted(config) => out.push_str(&format!(
            "no convergence within {} iterations, last estimate {:.6}\n",
            result.iterations, root
        )),
        (Some(root), None) => out.push_str(&format!(
            "root = {:.6} after {} iterations\n",
            root, result.iterations
        )),
        (None, None) => {}
    }
    out
}
