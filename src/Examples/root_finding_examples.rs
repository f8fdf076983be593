use crate::Utils::trace_table::{DEFAULT_PRECISION, report, summary_table};
use crate::numerical::root_finding::{
    ClosureFunction, NewtonRaphson, RootFinder, RootFindingResult, RootFindingTask, Secant,
    SolverConfig, SymbolicFunction,
};
use std::collections::HashMap;

/// x^3 - x - 2 = 0 posed for each of the five methods
pub fn canonical_tasks() -> Vec<RootFindingTask> {
    let f = "x^3 - x - 2".to_string();
    vec![
        RootFindingTask::Bisection {
            function: f.clone(),
            a: 1.0,
            b: 2.0,
        },
        RootFindingTask::RegulaFalsi {
            function: f.clone(),
            a: 1.0,
            b: 2.0,
        },
        RootFindingTask::FixedPoint {
            g_function: "cbrt(x + 2)".to_string(),
            f_function: Some(f.clone()),
            x0: 1.5,
        },
        RootFindingTask::NewtonRaphson {
            function: f.clone(),
            x0: 1.5,
        },
        RootFindingTask::Secant {
            function: f,
            x0: 1.0,
            x1: 2.0,
        },
    ]
}

fn run_and_print(tasks: &[RootFindingTask], config: &SolverConfig) -> Vec<RootFindingResult> {
    let results: Vec<RootFindingResult> = tasks.iter().map(|task| task.solve(config)).collect();
    for result in &results {
        println!("{}", report(result, config, DEFAULT_PRECISION));
    }
    println!("{}", summary_table(&results, config));
    results
}

#[allow(dead_code)]
pub fn root_finding_examples(example: usize) {
    match example {
        0 => {
            // the same equation solved by every method
            let config = SolverConfig::default();
            run_and_print(&canonical_tasks(), &config);
        }
        1 => {
            // every kind of failure, each reported in the result instead of a panic
            let config = SolverConfig::default();
            let tasks = vec![
                // no sign change on [0, 1]
                RootFindingTask::Bisection {
                    function: "x^3 - x - 2".to_string(),
                    a: 0.0,
                    b: 1.0,
                },
                // f'(0) = 0
                RootFindingTask::NewtonRaphson {
                    function: "x^2 + 1".to_string(),
                    x0: 0.0,
                },
                // f(x0) == f(x1)
                RootFindingTask::Secant {
                    function: "x^2 - 4".to_string(),
                    x0: -1.0,
                    x1: 1.0,
                },
                // sqrt of a negative number on the first step
                RootFindingTask::FixedPoint {
                    g_function: "sqrt(x - 3)".to_string(),
                    f_function: None,
                    x0: 1.0,
                },
                // malformed input
                RootFindingTask::RegulaFalsi {
                    function: "x^3 - ".to_string(),
                    a: 1.0,
                    b: 2.0,
                },
            ];
            run_and_print(&tasks, &config);
        }
        2 => {
            // running out of iterations is not an error: the last estimate is returned
            let config = SolverConfig::new(1e-6, 8);
            let tasks = vec![
                RootFindingTask::FixedPoint {
                    g_function: "x^2".to_string(),
                    f_function: Some("x^2 - x".to_string()),
                    x0: 1.1,
                },
                RootFindingTask::NewtonRaphson {
                    function: "cbrt(x)".to_string(),
                    x0: 1.0,
                },
            ];
            let results = run_and_print(&tasks, &config);
            for result in results {
                println!(
                    "{}: budget used up = {}",
                    result.method,
                    result.exhausted(&config)
                );
            }
        }
        3 => {
            // parameters and plain closures
            let mut params = HashMap::new();
            params.insert("a".to_string(), 1.0);
            let config = SolverConfig::new(1e-10, 50);
            match SymbolicFunction::from_string_with_params("x^3 - a*x - 2", "x", params) {
                Ok(mut f) => {
                    println!("f'(x) = {}", f.derivative_string());
                    let result = NewtonRaphson::new(f.clone(), 1.5).solve(&config);
                    println!("{}", report(&result, &config, 10));
                    let mut params = HashMap::new();
                    params.insert("a".to_string(), 3.0);
                    if let Err(err) = f.set_parameters(params) {
                        println!("{}", err);
                        return;
                    }
                    let result = NewtonRaphson::new(f, 2.5).solve(&config);
                    println!("{}", report(&result, &config, 10));
                }
                Err(err) => println!("{}", err),
            }
            // no symbolic form: Newton falls back to a central difference
            let f = ClosureFunction::new(|x: f64| x.cos() - x, "cos(x) - x");
            let result = NewtonRaphson::new(&f, 1.0).solve(&config);
            println!("{}", report(&result, &config, 10));
            let result = Secant::new(&f, 0.0, 1.0).solve(&config);
            println!("{}", report(&result, &config, 10));
        }
        _ => println!("no such example"),
    }
}
