#![allow(non_snake_case)]
use RustedRoots::Examples::root_finding_examples::root_finding_examples;
use RustedRoots::Examples::symbolic_examples::sym_examples;
use RustedRoots::Utils::logger::{init_logger, save_trace_to_csv};
use RustedRoots::Utils::task_parser::TaskFile;
use RustedRoots::Utils::trace_table::{DEFAULT_PRECISION, report, summary_table};
use log::{error, info};
use simplelog::LevelFilter;
use std::env;
use std::process::ExitCode;

const USAGE: &str = "usage: rusted_roots <task.toml> | --example <0-3> | --symbolic <0-3>";
const LAST_EXAMPLE: usize = 3;

fn run_task_file(path: &str) -> ExitCode {
    let task_file = match TaskFile::from_file(path) {
        Ok(task_file) => task_file,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }
    };
    init_logger(
        task_file.loglevel.unwrap_or(LevelFilter::Warn),
        task_file.log_file.as_deref(),
    );

    let config = task_file.config;
    let mut results = Vec::with_capacity(task_file.tasks.len());
    for (i, task) in task_file.tasks.iter().enumerate() {
        let result = task.solve(&config);
        println!("{}", report(&result, &config, DEFAULT_PRECISION));
        if let Some(csv_path) = task_file.trace_path(i) {
            match save_trace_to_csv(&result, &csv_path) {
                Ok(()) => info!("trace saved to {}", csv_path.display()),
                Err(err) => error!("cannot save trace to {}: {}", csv_path.display(), err),
            }
        }
        results.push(result);
    }
    if results.len() > 1 {
        println!("{}", summary_table(&results, &config));
    }

    if results.iter().all(|r| r.error.is_none()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Example number given after `--example` / `--symbolic`: absent means 0
fn example_number(arg: Option<&String>) -> Option<usize> {
    match arg {
        None => Some(0),
        Some(text) => text.parse::<usize>().ok().filter(|n| *n <= LAST_EXAMPLE),
    }
}

fn usage_error() -> ExitCode {
    eprintln!("{}", USAGE);
    ExitCode::from(2)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("--example") => {
            let Some(n) = example_number(args.get(1)) else {
                return usage_error();
            };
            init_logger(LevelFilter::Info, None);
            root_finding_examples(n);
            ExitCode::SUCCESS
        }
        Some("--symbolic") => {
            let Some(n) = example_number(args.get(1)) else {
                return usage_error();
            };
            init_logger(LevelFilter::Info, None);
            sym_examples(n);
            ExitCode::SUCCESS
        }
        Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            ExitCode::SUCCESS
        }
        Some(path) => run_task_file(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_number() {
        assert_eq!(example_number(None), Some(0));
        assert_eq!(example_number(Some(&"2".to_string())), Some(2));
        assert_eq!(example_number(Some(&"3".to_string())), Some(3));
        assert_eq!(example_number(Some(&"99".to_string())), None);
        assert_eq!(example_number(Some(&"foo".to_string())), None);
        assert_eq!(example_number(Some(&"-1".to_string())), None);
    }
}
