#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedRoots::symbolic::symbolic_engine::Expr;
/// let input = "x^3 - x - 2";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// let f = parsed_expression.lambdify1D().unwrap();
/// println!("{}, f(1.5) = {:?}", input, f(1.5));
/// assert!(Expr::parse_expression("x^3 - ").is_err());
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// 1) turns a String expression into a symbolic expression
/// 2) turns a symbolic expression into a checked Rust function
/// 3) turns a symbolic expression into a string expression for printing and control results
///# Example#
/// ```
/// use RustedRoots::symbolic::symbolic_engine::Expr;
/// let input = "cbrt(x + 2)";
/// let parsed_expression = Expr::parse_in_variable(input, "x").unwrap();
/// // derivative, simplified
/// let dg = parsed_expression.diff("x").simplify_();
/// println!("dg/dx = {}", dg.sym_to_str("x"));
/// // compare numerical and analytical derivatives on [0, 4]
/// let (norm, ok) = parsed_expression.compare_num1D("x", 0.0, 4.0, 100, 1e-6).unwrap();
/// assert!(ok, "norm {}", norm);
/// ```
pub mod symbolic_engine;
pub mod symbolic_engine_derivatives;
/// compiling expressions into checked numeric functions
pub mod symbolic_lambdify;
pub mod symbolic_simplify;
pub mod utils;
