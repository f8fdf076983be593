//! Reads root-finding jobs from TOML documents like
//!
//! ```toml
//! [task]
//! method = "newton_raphson"
//! function = "x^3 - x - 2"
//! x0 = 1.5
//!
//! [solver]
//! tolerance = 1e-6
//! max_iterations = 100
//! loglevel = "info"
//! trace_csv = "newton.csv"
//! ```
//!
//! Several jobs can share one `[solver]` section when written as `[[task]]` entries.
//! Seeds per method: `a`, `b` for bisection and regula_falsi, `x0` for fixed_point
//! (with `g_function` and optional `f_function`) and newton_raphson, `x0`, `x1` for secant.
use crate::Utils::logger::parse_loglevel;
use crate::numerical::root_finding::{RootFindingMethod, RootFindingTask, SolverConfig};
use log::info;
use simplelog::LevelFilter;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use toml::{Table, Value};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("cannot read task file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing [{0}] section")]
    MissingSection(&'static str),
    #[error("missing key `{key}` in [{section}]")]
    MissingKey { section: &'static str, key: &'static str },
    #[error("key `{key}` in [{section}] must be {expected}, found {found}")]
    WrongType {
        section: &'static str,
        key: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("unknown method `{0}`")]
    UnknownMethod(String),
    #[error("unknown loglevel `{0}`")]
    UnknownLogLevel(String),
}

/// Everything a task file asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFile {
    pub tasks: Vec<RootFindingTask>,
    pub config: SolverConfig,
    pub loglevel: Option<LevelFilter>,
    pub log_file: Option<PathBuf>,
    /// With several tasks the method name is appended to the file stem
    pub trace_csv: Option<PathBuf>,
}

impl TaskFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TaskError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TaskError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("reading tasks from {}", path.display());
        Self::from_str(&content)
    }

    /// Path of the CSV trace for the task at `index`, if traces are requested.
    pub fn trace_path(&self, index: usize) -> Option<PathBuf> {
        let path = self.trace_csv.as_ref()?;
        if self.tasks.len() <= 1 {
            return Some(path.clone());
        }
        let stem = path.file_stem()?.to_string_lossy();
        let method = self.tasks.get(index)?.method();
        Some(path.with_file_name(format!("{}_{}.csv", stem, method)))
    }
}

impl FromStr for TaskFile {
    type Err = TaskError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let document: Table = content.parse()?;
        let tasks = match document.get("task") {
            Some(Value::Table(section)) => vec![parse_task(section)?],
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| match entry {
                    Value::Table(section) => parse_task(section),
                    other => Err(wrong_type("task", "task", "a table", other)),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => return Err(wrong_type("task", "task", "a table", other)),
            None => return Err(TaskError::MissingSection("task")),
        };
        if tasks.is_empty() {
            return Err(TaskError::MissingSection("task"));
        }

        let empty = Table::new();
        let solver = match document.get("solver") {
            Some(Value::Table(section)) => section,
            Some(other) => return Err(wrong_type("solver", "solver", "a table", other)),
            None => &empty,
        };
        let mut config = SolverConfig::default();
        if let Some(tolerance) = float(solver, "solver", "tolerance")? {
            config.set_tolerance(tolerance);
        }
        if let Some(max_iterations) = count(solver, "solver", "max_iterations")? {
            config.set_max_iterations(max_iterations);
        }
        let loglevel = match text(solver, "solver", "loglevel")? {
            Some(level) => Some(
                parse_loglevel(level).ok_or_else(|| TaskError::UnknownLogLevel(level.to_string()))?,
            ),
            None => None,
        };
        let log_file = text(solver, "solver", "log_file")?.map(PathBuf::from);
        let trace_csv = text(solver, "solver", "trace_csv")?.map(PathBuf::from);

        Ok(TaskFile {
            tasks,
            config,
            loglevel,
            log_file,
            trace_csv,
        })
    }
}

fn parse_task(section: &Table) -> Result<RootFindingTask, TaskError> {
    let method_name = required(text(section, "task", "method")?, "method")?;
    let method = RootFindingMethod::from_str(method_name)
        .map_err(|_| TaskError::UnknownMethod(method_name.to_string()))?;
    let function = || -> Result<String, TaskError> {
        Ok(required(text(section, "task", "function")?, "function")?.to_string())
    };
    let seed = |key: &'static str| -> Result<f64, TaskError> { required(float(section, "task", key)?, key) };

    let task = match method {
        RootFindingMethod::Bisection => RootFindingTask::Bisection {
            function: function()?,
            a: seed("a")?,
            b: seed("b")?,
        },
        RootFindingMethod::RegulaFalsi => RootFindingTask::RegulaFalsi {
            function: function()?,
            a: seed("a")?,
            b: seed("b")?,
        },
        RootFindingMethod::FixedPoint => RootFindingTask::FixedPoint {
            g_function: required(text(section, "task", "g_function")?, "g_function")?.to_string(),
            f_function: text(section, "task", "f_function")?.map(str::to_string),
            x0: seed("x0")?,
        },
        RootFindingMethod::NewtonRaphson => RootFindingTask::NewtonRaphson {
            function: function()?,
            x0: seed("x0")?,
        },
        RootFindingMethod::Secant => RootFindingTask::Secant {
            function: function()?,
            x0: seed("x0")?,
            x1: seed("x1")?,
        },
    };
    Ok(task)
}

fn required<T>(value: Option<T>, key: &'static str) -> Result<T, TaskError> {
    value.ok_or(TaskError::MissingKey {
        section: "task",
        key,
    })
}

fn wrong_type(section: &'static str, key: &'static str, expected: &'static str, found: &Value) -> TaskError {
    TaskError::WrongType {
        section,
        key,
        expected,
        found: found.type_str().to_string(),
    }
}

fn text<'a>(section: &'a Table, name: &'static str, key: &'static str) -> Result<Option<&'a str>, TaskError> {
    match section.get(key) {
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(wrong_type(name, key, "a string", other)),
        None => Ok(None),
    }
}

/// Integers are accepted where floats are expected: `a = 1` means 1.0
fn float(section: &Table, name: &'static str, key: &'static str) -> Result<Option<f64>, TaskError> {
    match section.get(key) {
        Some(Value::Float(f)) => Ok(Some(*f)),
        Some(Value::Integer(i)) => Ok(Some(*i as f64)),
        Some(other) => Err(wrong_type(name, key, "a number", other)),
        None => Ok(None),
    }
}

fn count(section: &Table, name: &'static str, key: &'static str) -> Result<Option<usize>, TaskError> {
    match section.get(key) {
        Some(Value::Integer(i)) if *i >= 0 => Ok(Some(*i as usize)),
        Some(other) => Err(wrong_type(name, key, "a non-negative integer", other)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const NEWTON: &str = r#"
[task]
method = "newton_raphson"
function = "x^3 - x - 2"
x0 = 1.5

[solver]
tolerance = 1e-8
max_iterations = 50
loglevel = "debug"
trace_csv = "newton.csv"
"#;

    #[test]
    fn test_single_task() {
        let file: TaskFile = NEWTON.parse().unwrap();
        assert_eq!(
            file.tasks,
            vec![RootFindingTask::NewtonRaphson {
                function: "x^3 - x - 2".to_string(),
                x0: 1.5
            }]
        );
        assert_eq!(file.config, SolverConfig::new(1e-8, 50));
        assert_eq!(file.loglevel, Some(LevelFilter::Debug));
        assert_eq!(file.trace_path(0), Some(PathBuf::from("newton.csv")));
        assert_eq!(file.log_file, None);
    }

    #[test]
    fn test_task_array_and_defaults() {
        let content = r#"
[[task]]
method = "bisection"
function = "x^3 - x - 2"
a = 1
b = 2

[[task]]
method = "fixed_point"
g_function = "cbrt(x + 2)"
f_function = "x^3 - x - 2"
x0 = 1.5

[solver]
trace_csv = "out/trace.csv"
"#;
        let file: TaskFile = content.parse().unwrap();
        assert_eq!(file.tasks.len(), 2);
        assert_eq!(
            file.tasks[0],
            RootFindingTask::Bisection {
                function: "x^3 - x - 2".to_string(),
                a: 1.0,
                b: 2.0
            }
        );
        assert_eq!(file.config, SolverConfig::default());
        assert_eq!(file.loglevel, None);
        assert_eq!(file.trace_path(1), Some(PathBuf::from("out/trace_fixed_point.csv")));
    }

    #[test]
    fn test_missing_seed() {
        let content = "[task]\nmethod = \"secant\"\nfunction = \"x^2 - 2\"\nx0 = 1.0\n";
        let err = content.parse::<TaskFile>().unwrap_err();
        assert!(matches!(err, TaskError::MissingKey { key: "x1", .. }));
    }

    #[test]
    fn test_unknown_method_and_wrong_types() {
        let err = "[task]\nmethod = \"brent\"\n".parse::<TaskFile>().unwrap_err();
        assert!(matches!(err, TaskError::UnknownMethod(ref m) if m == "brent"));

        let err = "[task]\nmethod = \"newton_raphson\"\nfunction = 3\nx0 = 1.0\n"
            .parse::<TaskFile>()
            .unwrap_err();
        assert!(matches!(err, TaskError::WrongType { key: "function", .. }));

        let err = "[task]\nmethod = \"newton_raphson\"\nfunction = \"x\"\nx0 = 1.0\n[solver]\nmax_iterations = -3\n"
            .parse::<TaskFile>()
            .unwrap_err();
        assert!(matches!(err, TaskError::WrongType { key: "max_iterations", .. }));

        let err = "[task]\nmethod = \"newton_raphson\"\nfunction = \"x\"\nx0 = 1.0\n[solver]\nloglevel = \"loud\"\n"
            .parse::<TaskFile>()
            .unwrap_err();
        assert!(matches!(err, TaskError::UnknownLogLevel(_)));
    }

    #[test]
    fn test_missing_task_and_bad_toml() {
        assert!(matches!(
            "[solver]\ntolerance = 1e-6\n".parse::<TaskFile>(),
            Err(TaskError::MissingSection("task"))
        ));
        assert!(matches!("[task\nmethod =".parse::<TaskFile>(), Err(TaskError::Toml(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(NEWTON.as_bytes()).unwrap();
        let parsed = TaskFile::from_file(file.path()).unwrap();
        let result = parsed.tasks[0].solve(&parsed.config);
        assert!(result.is_success());

        let missing = TaskFile::from_file("/definitely/not/here.toml");
        assert!(matches!(missing, Err(TaskError::Io { .. })));
    }
}
