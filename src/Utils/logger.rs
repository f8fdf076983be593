use crate::numerical::root_finding::{RootFindingResult, headers_for};
use chrono::Local;
use csv::Writer;
use simplelog::*;
use std::fs::File;
use std::path::Path;

/// Maps a level name from a task file onto a filter; unknown names give `None`.
pub fn parse_loglevel(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "off" | "none" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Name like `log_2024-05-01_12-30-00.txt`
pub fn timestamped_log_name(prefix: &str) -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("{}_{}.txt", prefix, date_and_time)
}

/// Installs a terminal logger and, if `log_file` is given, a file logger with the same level.
/// Returns false when a global logger is already installed; the existing one stays active.
pub fn init_logger(level: LevelFilter, log_file: Option<&Path>) -> bool {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(err) => eprintln!("cannot create log file {}: {}", path.display(), err),
        }
    }
    CombinedLogger::init(loggers).is_ok()
}

/// Writes the iteration trace of `result` as CSV, one row per iteration in full precision.
pub fn save_trace_to_csv(result: &RootFindingResult, filename: &Path) -> Result<(), csv::Error> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(headers_for(result.method))?;
    for record in &result.trace {
        writer.write_record(record.row(None))?;
    }
    writer.flush()?;
    Ok(())
}
