///  Example#1
/// ```
/// // the shortest way: solve straight from strings
/// use RustedRoots::numerical::root_finding::solve_api::newton_raphson;
/// let result = newton_raphson("x^3 - x - 2", 1.5, 1e-6, 100);
/// let root = result.root.unwrap();
/// assert!((root - 1.521380).abs() < 1e-5);
/// println!("root = {:.6} after {} iterations", root, result.iterations);
/// ```
/// Example#2
/// ```
/// // or more verbose way...
/// use RustedRoots::numerical::root_finding::{
///     Bisection, RootFinder, SolverConfig, SymbolicFunction,
/// };
/// let f = SymbolicFunction::from_string("x^3 - x - 2", "x").unwrap();
/// let config = SolverConfig::new(1e-6, 100);
/// let result = Bisection::new(f, 1.0, 2.0).solve(&config);
/// for record in &result.trace {
///     println!("{:?}", record);
/// }
/// assert_eq!(result.trace.len(), result.iterations);
/// ```
/// Example#3
/// ```
/// // fixed-point iteration needs x = g(x); f is optional and only adds residuals to the trace
/// use RustedRoots::numerical::root_finding::RootFindingTask;
/// use RustedRoots::numerical::root_finding::SolverConfig;
/// let task = RootFindingTask::FixedPoint {
///     g_function: "cbrt(x + 2)".to_string(),
///     f_function: Some("x^3 - x - 2".to_string()),
///     x0: 1.5,
/// };
/// let result = task.solve(&SolverConfig::default());
/// assert!(result.is_success());
/// ```
pub mod root_finding;
