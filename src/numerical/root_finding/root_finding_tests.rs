use crate::numerical::root_finding::solve_api::{
    RootFindingTask, bisection, fixed_point, newton_raphson, regula_falsi, secant,
};
use crate::numerical::root_finding::{
    IterationRecord, RootFindingError, RootFindingMethod, RootFindingResult, SolverConfig,
};
use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::symbolic_lambdify::EvalError;
use approx::assert_relative_eq;

const CUBIC: &str = "x^3 - x - 2";
const CUBIC_ROOT: f64 = 1.5213797068045751;

fn cubic_tasks() -> Vec<RootFindingTask> {
    vec![
        RootFindingTask::Bisection {
            function: CUBIC.to_string(),
            a: 1.0,
            b: 2.0,
        },
        RootFindingTask::RegulaFalsi {
            function: CUBIC.to_string(),
            a: 1.0,
            b: 2.0,
        },
        RootFindingTask::FixedPoint {
            g_function: "cbrt(x + 2)".to_string(),
            f_function: Some(CUBIC.to_string()),
            x0: 1.5,
        },
        RootFindingTask::NewtonRaphson {
            function: CUBIC.to_string(),
            x0: 1.5,
        },
        RootFindingTask::Secant {
            function: CUBIC.to_string(),
            x0: 1.0,
            x1: 2.0,
        },
    ]
}

fn assert_trace_consistent(result: &RootFindingResult) {
    assert_eq!(result.trace.len(), result.iterations);
    for (i, record) in result.trace.iter().enumerate() {
        assert_eq!(record.index(), i + 1);
    }
}

#[test]
fn test_all_methods_agree_on_cubic() {
    let config = SolverConfig::default();
    let expected_iterations = [20, 13, 7, 3, 7];
    for (task, expected) in cubic_tasks().iter().zip(expected_iterations) {
        let result = task.solve(&config);
        assert_eq!(result.method, task.method());
        assert!(result.is_success(), "{} failed: {:?}", task.method(), result.error);
        assert_relative_eq!(result.root.unwrap(), CUBIC_ROOT, epsilon = 1e-5);
        assert_eq!(result.iterations, expected, "{}", task.method());
        assert!(!result.exhausted(&config));
        assert_trace_consistent(&result);
    }
}

#[test]
fn test_string_api_matches_tasks() {
    let results = vec![
        bisection(CUBIC, 1.0, 2.0, 1e-6, 100),
        regula_falsi(CUBIC, 1.0, 2.0, 1e-6, 100),
        fixed_point("cbrt(x + 2)", Some(CUBIC), 1.5, 1e-6, 100),
        newton_raphson(CUBIC, 1.5, 1e-6, 100),
        secant(CUBIC, 1.0, 2.0, 1e-6, 100),
    ];
    for (result, task) in results.iter().zip(cubic_tasks()) {
        assert_eq!(*result, task.solve(&SolverConfig::default()));
    }
}

#[test]
fn test_runs_are_deterministic() {
    let config = SolverConfig::new(1e-10, 200);
    for task in cubic_tasks() {
        assert_eq!(task.solve(&config), task.solve(&config));
    }
}

#[test]
fn test_tighter_tolerance_needs_more_iterations() {
    for task in cubic_tasks() {
        let loose = task.solve(&SolverConfig::new(1e-3, 100));
        let tight = task.solve(&SolverConfig::new(1e-10, 100));
        assert!(loose.iterations <= tight.iterations, "{}", task.method());
        assert_relative_eq!(tight.root.unwrap(), CUBIC_ROOT, epsilon = 1e-9);
    }
}

#[test]
fn test_bracketing_methods_reject_interval_without_sign_change() {
    for result in [
        bisection(CUBIC, 0.0, 1.0, 1e-6, 100),
        regula_falsi(CUBIC, 0.0, 1.0, 1e-6, 100),
    ] {
        assert!(result.root.is_none());
        assert_eq!(result.iterations, 0);
        assert_eq!(result.error.as_ref().map(|e| e.kind()), Some("BracketError"));
    }
}

#[test]
fn test_parse_errors_never_start_iterating() {
    for text in ["", "x^3 - ", "2 * (x + 1", "x $ 2", "foo(x)", "x + y"] {
        let result = newton_raphson(text, 1.0, 1e-6, 100);
        assert_eq!(result.iterations, 0, "input {:?}", text);
        assert!(result.trace.is_empty());
        assert!(
            matches!(result.error, Some(RootFindingError::Parse(_))),
            "input {:?} gave {:?}",
            text,
            result.error
        );
    }
}

#[test]
fn test_deeply_nested_input_is_a_parse_error() {
    for text in ["(".repeat(3_000) + "x", "(".repeat(200_000) + "x"] {
        let result = newton_raphson(&text, 1.0, 1e-6, 100);
        assert_eq!(result.iterations, 0);
        assert!(matches!(
            result.error,
            Some(RootFindingError::Parse(ParseError::TooDeep { .. }))
        ));
    }
}

#[test]
fn test_domain_error_is_not_a_parse_error() {
    let result = bisection("ln(x)", -1.0, 2.0, 1e-6, 100);
    match result.error {
        Some(RootFindingError::DomainEvaluation {
            x,
            iteration: 0,
            source: EvalError::Domain { function: "ln", .. },
        }) => assert_eq!(x, -1.0),
        other => panic!("expected a domain error, got {:?}", other),
    }
}

#[test]
fn test_budget_exhaustion_is_soft() {
    let config = SolverConfig::new(1e-6, 5);
    for task in cubic_tasks() {
        if task.method() == RootFindingMethod::NewtonRaphson {
            // converges in 3
            continue;
        }
        let result = task.solve(&config);
        assert!(result.error.is_none(), "{}", task.method());
        assert_eq!(result.iterations, 5);
        assert!(result.exhausted(&config));
        assert_eq!(result.root, Some(result.trace[4].estimate()));
    }
}

#[test]
fn test_trig_equation() {
    // cos(x) = x
    let expected = 0.7390851332151607;
    let results = [
        bisection("cos(x) - x", 0.0, 1.0, 1e-8, 100),
        regula_falsi("cos(x) - x", 0.0, 1.0, 1e-8, 100),
        fixed_point("cos(x)", None, 1.0, 1e-8, 200),
        newton_raphson("cos(x) - x", 1.0, 1e-8, 100),
        secant("cos(x) - x", 0.0, 1.0, 1e-8, 100),
    ];
    for result in results {
        assert!(result.is_success());
        assert_relative_eq!(result.root.unwrap(), expected, epsilon = 1e-6);
        assert_trace_consistent(&result);
    }
}

#[test]
fn test_trace_records_match_method() {
    for task in cubic_tasks() {
        let result = task.solve(&SolverConfig::default());
        let first = &result.trace[0];
        let matches_method = match task.method() {
            RootFindingMethod::Bisection | RootFindingMethod::RegulaFalsi => {
                matches!(first, IterationRecord::Bracket { .. })
            }
            RootFindingMethod::FixedPoint => matches!(first, IterationRecord::FixedPoint { .. }),
            RootFindingMethod::NewtonRaphson => matches!(first, IterationRecord::Newton { .. }),
            RootFindingMethod::Secant => matches!(first, IterationRecord::Secant { .. }),
        };
        assert!(matches_method, "{}: {:?}", task.method(), first);
    }
}
