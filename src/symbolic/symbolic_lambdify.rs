//! # Lambdification
//!
//! Compiles an [`Expr`] into a [`Lambda`] tree once, then evaluates it many times.
//! Every node is checked: a value outside a function's domain, a division by zero or
//! a NaN produced anywhere in the tree is reported as an [`EvalError`] instead of
//! leaking into the solver as a silently wrong number. Overflow to ±infinity is
//! returned as a value.
use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::symbolic_engine::Expr;
use nalgebra::DVector;
use std::f64::consts::PI;
use thiserror::Error;

/// Failure while evaluating a compiled expression at a point.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("{function} is undefined at {argument}")]
    Domain {
        function: &'static str,
        argument: f64,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("operation produced NaN")]
    NotANumber,

    #[error("variable '{0}' is not bound to an argument")]
    UnboundVariable(String),

    #[error("argument #{index} is missing")]
    MissingArgument { index: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Lambda {
    Var(usize),
    Const(f64),
    Add(Box<Lambda>, Box<Lambda>),
    Sub(Box<Lambda>, Box<Lambda>),
    Mul(Box<Lambda>, Box<Lambda>),
    Div(Box<Lambda>, Box<Lambda>),
    Pow(Box<Lambda>, Box<Lambda>),
    Exp(Box<Lambda>),
    Ln(Box<Lambda>),
    Sqrt(Box<Lambda>),
    Cbrt(Box<Lambda>),
    Abs(Box<Lambda>),
    Sin(Box<Lambda>),
    Cos(Box<Lambda>),
    Tg(Box<Lambda>),
    Ctg(Box<Lambda>),
    ArcSin(Box<Lambda>),
    ArcCos(Box<Lambda>),
    ArcTg(Box<Lambda>),
    ArcCtg(Box<Lambda>),
}

impl Expr {
    /// Compiles the expression; `vars[i]` is read from `args[i]` at evaluation time.
    pub fn compile(&self, vars: &[&str]) -> Result<Lambda, EvalError> {
        self.compile_with(&|name: &str| {
            vars.iter()
                .position(|v| *v == name)
                .ok_or_else(|| EvalError::UnboundVariable(name.to_string()))
        })
    }

    /// Compiles a function of one argument read from `args[0]`. The expression may hold at
    /// most one distinct symbol; any further symbol is reported as `UnboundVariable`.
    pub fn compile1D(&self) -> Result<Lambda, EvalError> {
        match self.all_arguments_are_variables().as_slice() {
            [] => self.compile(&[]),
            [var] => self.compile(&[var.as_str()]),
            [_, rest @ ..] => Err(EvalError::UnboundVariable(rest.join(", "))),
        }
    }

    /// Compiles a function of the named variable; another free symbol is reported the
    /// way the parser reports it.
    pub fn compile_in(&self, var: &str) -> Result<Lambda, ParseError> {
        self.compile_with(&|name: &str| {
            if name == var {
                Ok(0)
            } else {
                Err(ParseError::UnknownVariable {
                    found: name.to_string(),
                    expected: var.to_string(),
                })
            }
        })
    }

    fn compile_with<R, E>(&self, resolve: &R) -> Result<Lambda, E>
    where
        R: Fn(&str) -> Result<usize, E>,
    {
        let un = |e: &Expr| -> Result<Box<Lambda>, E> { Ok(Box::new(e.compile_with(resolve)?)) };
        let lambda = match self {
            Expr::Var(name) => Lambda::Var(resolve(name)?),
            Expr::Const(v) => Lambda::Const(*v),
            Expr::Add(a, b) => Lambda::Add(un(a)?, un(b)?),
            Expr::Sub(a, b) => Lambda::Sub(un(a)?, un(b)?),
            Expr::Mul(a, b) => Lambda::Mul(un(a)?, un(b)?),
            Expr::Div(a, b) => Lambda::Div(un(a)?, un(b)?),
            Expr::Pow(a, b) => Lambda::Pow(un(a)?, un(b)?),
            Expr::Exp(e) => Lambda::Exp(un(e)?),
            Expr::Ln(e) => Lambda::Ln(un(e)?),
            Expr::sqrt(e) => Lambda::Sqrt(un(e)?),
            Expr::cbrt(e) => Lambda::Cbrt(un(e)?),
            Expr::abs(e) => Lambda::Abs(un(e)?),
            Expr::sin(e) => Lambda::Sin(un(e)?),
            Expr::cos(e) => Lambda::Cos(un(e)?),
            Expr::tg(e) => Lambda::Tg(un(e)?),
            Expr::ctg(e) => Lambda::Ctg(un(e)?),
            Expr::arcsin(e) => Lambda::ArcSin(un(e)?),
            Expr::arccos(e) => Lambda::ArcCos(un(e)?),
            Expr::arctg(e) => Lambda::ArcTg(un(e)?),
            Expr::arcctg(e) => Lambda::ArcCtg(un(e)?),
        };
        Ok(lambda)
    }

    /// Converts a single-variable symbolic expression into a checked Rust closure.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.pow(Expr::Const(2.0)); // x^2
    /// let func = f.lambdify1D().unwrap();
    /// assert_eq!(func(3.0), Ok(9.0));
    /// assert!(Expr::parse_expression("a * x").unwrap().lambdify1D().is_err());
    /// ```
    pub fn lambdify1D(
        &self,
    ) -> Result<Box<dyn Fn(f64) -> Result<f64, EvalError> + Send + Sync>, EvalError> {
        let compiled = self.compile1D()?;
        Ok(Box::new(move |x| compiled.eval(&[x])))
    }

    /// Multi-argument closure over the named variables.
    pub fn lambdify(
        &self,
        vars: &[&str],
    ) -> Result<Box<dyn Fn(&[f64]) -> Result<f64, EvalError> + Send + Sync>, EvalError> {
        let compiled = self.compile(vars)?;
        Ok(Box::new(move |args| compiled.eval(args)))
    }
}

fn domain(function: &'static str, argument: f64) -> EvalError {
    EvalError::Domain { function, argument }
}

impl Lambda {
    #[inline]
    pub fn eval(&self, args: &[f64]) -> Result<f64, EvalError> {
        let value = match self {
            Lambda::Var(i) => *args
                .get(*i)
                .ok_or(EvalError::MissingArgument { index: *i })?,
            Lambda::Const(v) => *v,
            Lambda::Add(a, b) => a.eval(args)? + b.eval(args)?,
            Lambda::Sub(a, b) => a.eval(args)? - b.eval(args)?,
            Lambda::Mul(a, b) => a.eval(args)? * b.eval(args)?,
            Lambda::Div(a, b) => {
                let numerator = a.eval(args)?;
                let denominator = b.eval(args)?;
                if denominator == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                numerator / denominator
            }
            Lambda::Pow(a, b) => {
                let base = a.eval(args)?;
                let exponent = b.eval(args)?;
                if base == 0.0 && exponent < 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
                    return Err(domain("pow", base));
                }
                base.powf(exponent)
            }
            Lambda::Exp(e) => e.eval(args)?.exp(),
            Lambda::Ln(e) => {
                let x = e.eval(args)?;
                if x <= 0.0 {
                    return Err(domain("ln", x));
                }
                x.ln()
            }
            Lambda::Sqrt(e) => {
                let x = e.eval(args)?;
                if x < 0.0 {
                    return Err(domain("sqrt", x));
                }
                x.sqrt()
            }
            Lambda::Cbrt(e) => e.eval(args)?.cbrt(),
            Lambda::Abs(e) => e.eval(args)?.abs(),
            Lambda::Sin(e) => e.eval(args)?.sin(),
            Lambda::Cos(e) => e.eval(args)?.cos(),
            Lambda::Tg(e) => e.eval(args)?.tan(),
            Lambda::Ctg(e) => {
                let t = e.eval(args)?.tan();
                if t == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                1.0 / t
            }
            Lambda::ArcSin(e) => {
                let x = e.eval(args)?;
                if !(-1.0..=1.0).contains(&x) {
                    return Err(domain("arcsin", x));
                }
                x.asin()
            }
            Lambda::ArcCos(e) => {
                let x = e.eval(args)?;
                if !(-1.0..=1.0).contains(&x) {
                    return Err(domain("arccos", x));
                }
                x.acos()
            }
            Lambda::ArcTg(e) => e.eval(args)?.atan(),
            Lambda::ArcCtg(e) => (PI / 2.0) - e.eval(args)?.atan(),
        };
        if value.is_nan() {
            Err(EvalError::NotANumber)
        } else {
            Ok(value)
        }
    }

    /// Evaluates a one-argument lambda at every point; stops at the first failing point.
    pub fn eval_vec(&self, xs: &[f64]) -> Result<Vec<f64>, EvalError> {
        xs.iter().map(|x| self.eval(&[*x])).collect()
    }

    pub fn eval_dvector(&self, xs: &DVector<f64>) -> Result<DVector<f64>, EvalError> {
        Ok(DVector::from_vec(self.eval_vec(xs.as_slice())?))
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
    fn test_lambdify1d_single_variable() {
        let func = x().lambdify1D().unwrap();
        assert_eq!(func(5.0), Ok(5.0));
    }

    #[test]
    fn test_lambdify1d_constant() {
        let func = Expr::Const(42.0).lambdify1D().unwrap();
        assert_eq!(func(100.0), Ok(42.0));
    }

    #[test]
    fn test_lambdify1d_polynomial() {
        // x^2 + 2x + 1
        let expr = x() * x() + x() * Expr::Const(2.0) + Expr::Const(1.0);
        let func = expr.lambdify1D().unwrap();
        assert_eq!(func(3.0), Ok(16.0));
    }

    #[test]
    fn test_lambdify1d_trigonometric() {
        let func = Expr::sin(x().boxed()).lambdify1D().unwrap();
        assert_relative_eq!(func(0.0).unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(func(PI / 2.0).unwrap(), 1.0, epsilon = 1e-12);
        let func = Expr::arcctg(x().boxed()).lambdify1D().unwrap();
        assert_relative_eq!(func(1.0).unwrap(), PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cube_root_of_negative_argument() {
        let func = Expr::cbrt((x() + Expr::Const(2.0)).boxed()).lambdify1D().unwrap();
        assert_relative_eq!(func(-10.0).unwrap(), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_domain_errors() {
        let ln = Expr::Ln(x().boxed()).lambdify1D().unwrap();
        assert_eq!(
            ln(-1.0),
            Err(EvalError::Domain {
                function: "ln",
                argument: -1.0
            })
        );
        assert!(matches!(ln(0.0), Err(EvalError::Domain { .. })));

        let sqrt = Expr::sqrt(x().boxed()).lambdify1D().unwrap();
        assert!(matches!(sqrt(-4.0), Err(EvalError::Domain { function: "sqrt", .. })));
        assert_eq!(sqrt(4.0), Ok(2.0));

        let asin = Expr::arcsin(x().boxed()).lambdify1D().unwrap();
        assert!(asin(1.5).is_err());

        let fractional = x().pow(Expr::Const(0.5)).lambdify1D().unwrap();
        assert!(matches!(fractional(-2.0), Err(EvalError::Domain { function: "pow", .. })));
        let integer = x().pow(Expr::Const(3.0)).lambdify1D().unwrap();
        assert_eq!(integer(-2.0), Ok(-8.0));
    }

    #[test]
    fn test_division_by_zero() {
        let func = (Expr::Const(1.0) / x()).lambdify1D().unwrap();
        assert_eq!(func(0.0), Err(EvalError::DivisionByZero));
        let func = x().pow(Expr::Const(-1.0)).lambdify1D().unwrap();
        assert_eq!(func(0.0), Err(EvalError::DivisionByZero));
        let func = Expr::ctg(x().boxed()).lambdify1D().unwrap();
        assert_eq!(func(0.0), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_overflow_is_not_an_error() {
        let func = x().pow(Expr::Const(2.0)).lambdify1D().unwrap();
        assert_eq!(func(1e200), Ok(f64::INFINITY));
        // inf - inf is NaN
        let func = (Expr::Exp(x().boxed()) - Expr::Exp(x().boxed())).lambdify1D().unwrap();
        assert_eq!(func(1e6), Err(EvalError::NotANumber));
    }

    #[test]
    fn test_compile_with_named_arguments() {
        let y = Expr::Var("y".to_string());
        let f = x() * y.clone() - y;
        let func = f.lambdify(&["x", "y"]).unwrap();
        assert_eq!(func(&[3.0, 2.0]), Ok(4.0));
        assert_eq!(
            f.compile(&["x"]),
            Err(EvalError::UnboundVariable("y".to_string()))
        );
        assert_eq!(
            func(&[3.0]),
            Err(EvalError::MissingArgument { index: 1 })
        );
    }

    #[test]
    fn test_vector_evaluation() {
        let lambda = (x() * x()).compile1D().unwrap();
        assert_eq!(lambda.eval_vec(&[1.0, 2.0, 3.0]), Ok(vec![1.0, 4.0, 9.0]));
        let v = DVector::from_vec(vec![-1.0, 0.5]);
        assert_eq!(
            lambda.eval_dvector(&v),
            Ok(DVector::from_vec(vec![1.0, 0.25]))
        );
        let ln = Expr::Ln(x().boxed()).compile1D().unwrap();
        assert!(ln.eval_vec(&[1.0, -1.0]).is_err());
    }

    #[test]
    fn test_compile1d_rejects_second_symbol() {
        let expr = Expr::parse_expression("a * x").unwrap();
        assert_eq!(
            expr.compile1D(),
            Err(EvalError::UnboundVariable("x".to_string()))
        );
        assert!(expr.lambdify1D().is_err());
        let expr = Expr::parse_expression("a * x + b").unwrap();
        assert_eq!(
            expr.compile1D(),
            Err(EvalError::UnboundVariable("b, x".to_string()))
        );
        // any single name is the argument
        let func = Expr::parse_expression("t^2 + t").unwrap().lambdify1D().unwrap();
        assert_eq!(func(3.0), Ok(12.0));
    }

    #[test]
    fn test_compile_in_named_variable() {
        let expr = Expr::parse_expression("a * x").unwrap();
        assert_eq!(
            expr.compile_in("x"),
            Err(ParseError::UnknownVariable {
                found: "a".to_string(),
                expected: "x".to_string()
            })
        );
        let lambda = Expr::parse_expression("2 * x - 1").unwrap().compile_in("x").unwrap();
        assert_eq!(lambda.eval(&[3.0]), Ok(5.0));
        assert_eq!(Expr::Const(7.0).compile_in("x").unwrap().eval(&[0.0]), Ok(7.0));
    }
}
