//! # Symbolic Engine Derivatives Module
//!
//! Extends the symbolic engine with differentiation, parsing entry points and
//! validation helpers.
//!
//! ## Key Methods
//!
//! ### Differentiation
//! - `diff(var: &str)` - analytical derivative (raw, unsimplified tree)
//! - `derivative_of(text, var)` / `differentiate(text, var)` - parse, differentiate and
//!   simplify; the latter also compiles the result into a checked closure
//!
//! ### Parsing and Utilities
//! - `parse_expression()` - string to symbolic expression
//! - `parse_in_variable()` - same, but every free symbol must be the given variable
//! - `sym_to_str()` - symbolic expression to string
//! - `all_arguments_are_variables()` - extract variable names
//!
//! ### Numerical Analysis
//! - `eval_expression()` - direct checked evaluation with named variables
//! - `compare_num1D()` - validate a 1D derivative against central differences

use crate::symbolic::parse_expr::{ParseError, parse_expression_func};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_lambdify::EvalError;
use crate::symbolic::utils::{linspace, norm, numerical_derivative};
use log::debug;

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// - Power rule: d/dx(u^n) = n*u^(n-1)*u' when n does not depend on x,
    ///   otherwise d/dx(u^v) = u^v * (v'*ln(u) + v*u'/u)
    /// - Product rule: d/dx(f*g) = f'*g + f*g'
    /// - Quotient rule: d/dx(f/g) = (f'*g - g'*f)/g^2
    /// - Chain rule for every elementary function
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.clone().pow(Expr::Const(2.0)); // x^2
    /// let df_dx = f.diff("x").simplify_(); // 2*x
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        let one = || Expr::Const(1.0);
        let two = || Expr::Const(2.0);
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => lhs.diff(var) + rhs.diff(var),
            Expr::Sub(lhs, rhs) => lhs.diff(var) - rhs.diff(var),
            Expr::Mul(lhs, rhs) => {
                lhs.diff(var) * *rhs.clone() + *lhs.clone() * rhs.diff(var)
            }
            Expr::Div(lhs, rhs) => {
                (lhs.diff(var) * *rhs.clone() - rhs.diff(var) * *lhs.clone())
                    / (*rhs.clone() * *rhs.clone())
            }
            Expr::Pow(base, exp) if !exp.contains_variable(var) => {
                *exp.clone() * base.as_ref().clone().pow(*exp.clone() - one()) * base.diff(var)
            }
            Expr::Pow(base, exp) => {
                self.clone()
                    * (exp.diff(var) * base.as_ref().clone().ln()
                        + *exp.clone() * base.diff(var) / *base.clone())
            }
            Expr::Exp(expr) => Expr::Exp(expr.clone()) * expr.diff(var),
            Expr::Ln(expr) => expr.diff(var) / *expr.clone(),
            Expr::sqrt(expr) => expr.diff(var) / (two() * Expr::sqrt(expr.clone())),
            Expr::cbrt(expr) => {
                expr.diff(var) / (Expr::Const(3.0) * Expr::cbrt(expr.clone()).pow(two()))
            }
            Expr::abs(expr) => expr.diff(var) * *expr.clone() / Expr::abs(expr.clone()),
            Expr::sin(expr) => Expr::cos(expr.clone()) * expr.diff(var),
            Expr::cos(expr) => Expr::Const(-1.0) * Expr::sin(expr.clone()) * expr.diff(var),
            Expr::tg(expr) => one() / Expr::cos(expr.clone()).pow(two()) * expr.diff(var),
            Expr::ctg(expr) => {
                Expr::Const(-1.0) / Expr::sin(expr.clone()).pow(two()) * expr.diff(var)
            }
            Expr::arcsin(expr) => {
                expr.diff(var) / Expr::sqrt((one() - expr.as_ref().clone().pow(two())).boxed())
            }
            Expr::arccos(expr) => {
                Expr::Const(-1.0) * expr.diff(var)
                    / Expr::sqrt((one() - expr.as_ref().clone().pow(two())).boxed())
            }
            Expr::arctg(expr) => expr.diff(var) / (one() + expr.as_ref().clone().pow(two())),
            Expr::arcctg(expr) => {
                Expr::Const(-1.0) * expr.diff(var) / (one() + expr.as_ref().clone().pow(two()))
            }
        }
    } // end of diff

    /// Parses `input`, differentiates it with respect to `var` and simplifies the result.
    pub fn derivative_of(input: &str, var: &str) -> Result<Expr, ParseError> {
        let parsed = Expr::parse_in_variable(input, var)?;
        Ok(parsed.diff(var).simplify_())
    }

    /// Same as [`Expr::derivative_of`], compiled into a checked closure.
    pub fn differentiate(
        input: &str,
        var: &str,
    ) -> Result<Box<dyn Fn(f64) -> Result<f64, EvalError> + Send + Sync>, ParseError> {
        let compiled = Expr::derivative_of(input, var)?.compile_in(var)?;
        Ok(Box::new(move |x| compiled.eval(&[x])))
    }

    /// Converts symbolic expression to human-readable string representation.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let expr = Expr::Add(Box::new(Expr::Var("x".to_string())), Box::new(Expr::Const(2.0)));
    /// assert_eq!(expr.sym_to_str("x"), "(x) + (2)");
    /// ```
    pub fn sym_to_str(&self, var: &str) -> String {
        match self {
            Expr::Var(name) => name.clone(),
            Expr::Const(val) => val.to_string(),
            Expr::Add(lhs, rhs) => format!("({}) + ({})", lhs.sym_to_str(var), rhs.sym_to_str(var)),
            Expr::Sub(lhs, rhs) => format!("({}) - ({})", lhs.sym_to_str(var), rhs.sym_to_str(var)),
            Expr::Mul(lhs, rhs) => format!("({}) * ({})", lhs.sym_to_str(var), rhs.sym_to_str(var)),
            Expr::Div(lhs, rhs) => format!("({}) / ({})", lhs.sym_to_str(var), rhs.sym_to_str(var)),
            Expr::Pow(base, exp) => format!("({}^{})", base.sym_to_str(var), exp.sym_to_str(var)),
            Expr::Exp(expr) => format!("exp({})", expr.sym_to_str(var)),
            Expr::Ln(expr) => format!("ln({})", expr.sym_to_str(var)),
            Expr::sqrt(expr) => format!("sqrt({})", expr.sym_to_str(var)),
            Expr::cbrt(expr) => format!("cbrt({})", expr.sym_to_str(var)),
            Expr::abs(expr) => format!("abs({})", expr.sym_to_str(var)),
            Expr::sin(expr) => format!("sin({})", expr.sym_to_str(var)),
            Expr::cos(expr) => format!("cos({})", expr.sym_to_str(var)),
            Expr::tg(expr) => format!("tg({})", expr.sym_to_str(var)),
            Expr::ctg(expr) => format!("ctg({})", expr.sym_to_str(var)),
            Expr::arcsin(expr) => format!("arcsin({})", expr.sym_to_str(var)),
            Expr::arccos(expr) => format!("arccos({})", expr.sym_to_str(var)),
            Expr::arctg(expr) => format!("arctg({})", expr.sym_to_str(var)),
            Expr::arcctg(expr) => format!("arcctg({})", expr.sym_to_str(var)),
        } // end of match
    } // end of sym_to_str

    /// Parses a string into a symbolic expression.
    ///
    /// # Supported Syntax
    /// - Variables: x, y, var_name
    /// - Constants: 3.14, 2.5, 1e-6, pi, e
    /// - Operators: +, -, *, /, ^ (or **)
    /// - Functions: exp, ln/log, log10, sqrt, cbrt, abs, sin, cos, tg/tan, ctg/cot,
    ///   arcsin/asin, arccos/acos, arctg/atan, arcctg/acot
    /// - Parentheses for grouping
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        let expr = parse_expression_func(input)?;
        debug!("parsed '{}' as {}", input.trim(), expr);
        Ok(expr)
    }

    /// Parses an expression of the single variable `var`; any other free symbol is an error.
    /// Constant expressions are accepted.
    pub fn parse_in_variable(input: &str, var: &str) -> Result<Expr, ParseError> {
        let expr = Expr::parse_expression(input)?;
        if let Some(stray) = expr
            .all_arguments_are_variables()
            .into_iter()
            .find(|name| name != var)
        {
            return Err(ParseError::UnknownVariable {
                found: stray,
                expected: var.to_string(),
            });
        }
        Ok(expr)
    }

    /// Extracts all unique variable names, sorted.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let expr = Expr::parse_expression("x^2 + y*z + x").unwrap();
    /// assert_eq!(expr.all_arguments_are_variables(), vec!["x", "y", "z"]);
    /// ```
    pub fn all_arguments_are_variables(&self) -> Vec<String> {
        let mut vars = match self {
            Expr::Var(name) => vec![name.clone()],
            _ => self
                .children()
                .into_iter()
                .flat_map(|child| child.all_arguments_are_variables())
                .collect(),
        };
        vars.sort();
        vars.dedup();
        vars
    } // end of all_arguments_are_variables

    /// Evaluates the expression with `vars[i] = values[i]` without building a closure.
    pub fn eval_expression(&self, vars: &[&str], values: &[f64]) -> Result<f64, EvalError> {
        self.compile(vars)?.eval(values)
    }

    //___________________________________________________________________________________________________________________
    //                    1D FUNCTION PROCESSING - Single Variable Functions y = f(x)
    // _________________________________________________________________________________________________________________

    /// Evaluates a 1D function over a slice of input values.
    pub fn calc_vector_lambdified1D(&self, x: &[f64]) -> Result<Vec<f64>, EvalError> {
        self.compile1D()?.eval_vec(x)
    }

    /// Evaluates a 1D function over a linearly spaced domain.
    pub fn lambdify1D_from_linspace(
        &self,
        start: f64,
        end: f64,
        num_values: usize,
    ) -> Result<Vec<f64>, EvalError> {
        let x = linspace(start, end, num_values);
        self.calc_vector_lambdified1D(&x)
    }

    /// Validates the analytical derivative against central differences on [start, end].
    ///
    /// # Returns
    /// Tuple of (norm of the difference, norm < max_norm)
    pub fn compare_num1D(
        &self,
        var: &str,
        start: f64,
        end: f64,
        num_values: usize,
        max_norm: f64,
    ) -> Result<(f64, bool), EvalError> {
        let analytical_function = self.lambdify1D()?;
        let analytical_derivative = self
            .diff(var)
            .simplify_()
            .lambdify1D_from_linspace(start, end, num_values)?;
        let step = (1.0 / 1e4) * (end - start) / (num_values as f64 - 1.0);
        let domain = linspace(start, end, num_values);
        let numerical = numerical_derivative(&analytical_function, &domain, step)?;
        let norma_val = norm(&analytical_derivative, &numerical);
        Ok((norma_val, max_norm > norma_val))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }

    #[test]
    fn test_diff_polynomial_simplifies() {
        let df = Expr::derivative_of("x^3 - x - 2", "x").unwrap();
        let expected = Expr::Const(3.0) * x().pow(Expr::Const(2.0)) - Expr::Const(1.0);
        assert_eq!(df, expected);
        let f = Expr::differentiate("x^3 - x - 2", "x").unwrap();
        assert_eq!(f(1.5), Ok(5.75));
    }

    #[test]
    fn test_diff_variable_and_constant() {
        assert_eq!(x().diff("x"), Expr::Const(1.0));
        assert_eq!(x().diff("y"), Expr::Const(0.0));
        assert_eq!(Expr::Const(7.0).diff("x"), Expr::Const(0.0));
    }

    #[test]
    fn test_diff_square_at_zero_is_exactly_zero() {
        let df = Expr::differentiate("x^2", "x").unwrap();
        assert_eq!(df(0.0), Ok(0.0));
    }

    #[test]
    fn test_diff_elementary_functions_numerically() {
        let cases = [
            ("sin(x) * cos(x)", 0.1, 1.4),
            ("exp(2*x) / (1 + x^2)", -1.0, 1.0),
            ("ln(x) + sqrt(x)", 0.5, 3.0),
            ("cbrt(x + 2)", 0.0, 4.0),
            ("tg(x) + ctg(x)", 0.2, 1.2),
            ("arcsin(x/2) + arccos(x/2)", -0.9, 0.9),
            ("arctg(x) + arcctg(2*x)", -3.0, 3.0),
            ("abs(x - 5)", 0.0, 4.0),
            ("x^x", 0.5, 2.0),
            ("log10(x)", 1.0, 10.0),
        ];
        for (text, start, end) in cases {
            let f = Expr::parse_in_variable(text, "x").unwrap();
            let (norm, ok) = f.compare_num1D("x", start, end, 50, 1e-4).unwrap();
            assert!(ok, "{text}: derivative mismatch, norm {norm}");
        }
    }

    #[test]
    fn test_arcctg_derivative_sign() {
        let df = Expr::arcctg(x().boxed()).diff("x").simplify_().lambdify1D().unwrap();
        assert_relative_eq!(df(0.0).unwrap(), -1.0);
    }

    #[test]
    fn test_general_power_rule() {
        // d/dx 2^x = 2^x ln 2
        let df = Expr::differentiate("2^x", "x").unwrap();
        assert_relative_eq!(df(1.0).unwrap(), 2.0 * 2f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_parse_in_variable_rejects_stray_symbols() {
        assert_eq!(
            Expr::parse_in_variable("x + y", "x"),
            Err(ParseError::UnknownVariable {
                found: "y".to_string(),
                expected: "x".to_string()
            })
        );
        assert_eq!(Expr::parse_in_variable("3", "x"), Ok(Expr::Const(3.0)));
        assert!(Expr::derivative_of("sin(x", "x").is_err());
    }

    #[test]
    fn test_all_arguments_are_variables() {
        let expr = Expr::parse_expression("x^2 + y*z + x").unwrap();
        assert_eq!(expr.all_arguments_are_variables(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_sym_to_str() {
        let expr = x() + Expr::Const(2.0);
        assert_eq!(expr.sym_to_str("x"), "(x) + (2)");
        let expr = Expr::cbrt(x().boxed());
        assert_eq!(expr.sym_to_str("x"), "cbrt(x)");
    }

    #[test]
    fn test_eval_expression() {
        let expr = Expr::parse_expression("a * x - 2").unwrap();
        assert_eq!(expr.eval_expression(&["a", "x"], &[3.0, 2.0]), Ok(4.0));
        assert!(expr.eval_expression(&["x"], &[2.0]).is_err());
    }

    #[test]
    fn test_lambdify1d_from_linspace() {
        let expr = x() * x();
        assert_eq!(
            expr.lambdify1D_from_linspace(0.0, 2.0, 3),
            Ok(vec![0.0, 1.0, 4.0])
        );
        // a second symbol is an error, not a silent alias of the argument
        let expr = Expr::parse_expression("a * x").unwrap();
        assert_eq!(
            expr.lambdify1D_from_linspace(0.0, 2.0, 3),
            Err(EvalError::UnboundVariable("x".to_string()))
        );
        assert!(expr.compare_num1D("x", 0.0, 1.0, 10, 1e-4).is_err());
    }
}
