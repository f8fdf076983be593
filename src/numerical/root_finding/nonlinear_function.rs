use crate::numerical::root_finding::errors::RootFindingError;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_lambdify::{EvalError, Lambda};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Trait for representing a nonlinear equation f(x) = 0 (or an iteration function g).
/// Evaluation is fallible: a point outside the domain is an error, never a silent NaN.
pub trait NonlinearFunction {
    /// Evaluate the function at point x
    fn evaluate(&self, x: f64) -> Result<f64, EvalError>;

    /// Evaluate the derivative at point x (optional, for methods that can use it)
    fn derivative(&self, _x: f64) -> Option<Result<f64, EvalError>> {
        None
    }

    /// Get function name for debugging/logging
    fn name(&self) -> &str {
        "unnamed_function"
    }
}

impl<T: NonlinearFunction + ?Sized> NonlinearFunction for &T {
    fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        (**self).evaluate(x)
    }

    fn derivative(&self, x: f64) -> Option<Result<f64, EvalError>> {
        (**self).derivative(x)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

fn checked(value: f64) -> Result<f64, EvalError> {
    if value.is_nan() {
        Err(EvalError::NotANumber)
    } else {
        Ok(value)
    }
}

/// Simple function wrapper for closures
pub struct ClosureFunction<F>
where
    F: Fn(f64) -> f64,
{
    func: F,
    name: String,
}

impl<F> ClosureFunction<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(func: F, name: &str) -> Self {
        Self {
            func,
            name: name.to_string(),
        }
    }
}

impl<F> NonlinearFunction for ClosureFunction<F>
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        checked((self.func)(x))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Function wrapper with analytical derivative
pub struct FunctionWithDerivative<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    func: F,
    derivative_func: D,
    name: String,
}

impl<F, D> FunctionWithDerivative<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    pub fn new(func: F, derivative_func: D, name: &str) -> Self {
        Self {
            func,
            derivative_func,
            name: name.to_string(),
        }
    }
}

impl<F, D> NonlinearFunction for FunctionWithDerivative<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        checked((self.func)(x))
    }

    fn derivative(&self, x: f64) -> Option<Result<f64, EvalError>> {
        Some(checked((self.derivative_func)(x)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

////////////////////////SYMBOLIC FUNCTIONS//////////////////////////////////////////
/// Function of one variable given as text: parsed once and compiled to a checked lambda.
/// The derivative is differentiated symbolically and compiled on first request only.
#[derive(Debug, Clone)]
pub struct SymbolicFunction {
    original_expr: Expr,
    expr: Expr,
    variable: String,
    name: String,
    func: Lambda,
    derivative: OnceLock<(Expr, Result<Lambda, EvalError>)>,
    parameters: HashMap<String, f64>,
}

impl SymbolicFunction {
    /// Create a new symbolic function from a string expression
    pub fn from_string(expr_str: &str, variable: &str) -> Result<Self, RootFindingError> {
        Self::from_string_with_params(expr_str, variable, HashMap::new())
    }

    /// Create a new symbolic function from an Expr
    pub fn from_expr(expr: Expr, variable: &str) -> Result<Self, RootFindingError> {
        let name = expr.to_string();
        Self::build(expr, variable, HashMap::new(), name)
    }

    /// Create symbolic function with named parameters, e.g. `x^3 - a*x - 2` with `a = 1`
    pub fn from_string_with_params(
        expr_str: &str,
        variable: &str,
        parameters: HashMap<String, f64>,
    ) -> Result<Self, RootFindingError> {
        let expr = Expr::parse_expression(expr_str)?;
        Self::build(expr, variable, parameters, expr_str.trim().to_string())
    }

    fn build(
        original_expr: Expr,
        variable: &str,
        parameters: HashMap<String, f64>,
        name: String,
    ) -> Result<Self, RootFindingError> {
        let expr = original_expr.set_variable_from_map(&parameters);
        // symbols left after substitution must be the variable itself
        let func = expr.compile_in(variable)?;
        Ok(Self {
            original_expr,
            expr,
            variable: variable.to_string(),
            name,
            func,
            derivative: OnceLock::new(),
            parameters,
        })
    }

    fn derivative_parts(&self) -> &(Expr, Result<Lambda, EvalError>) {
        self.derivative.get_or_init(|| {
            let derivative_expr = self.expr.diff(&self.variable).simplify_();
            let derivative_func = derivative_expr.compile(&[self.variable.as_str()]);
            (derivative_expr, derivative_func)
        })
    }

    /// Update parameters and regenerate the compiled function; the derivative is rebuilt lazily
    pub fn set_parameters(
        &mut self,
        parameters: HashMap<String, f64>,
    ) -> Result<(), RootFindingError> {
        *self = Self::build(
            self.original_expr.clone(),
            &self.variable,
            parameters,
            self.name.clone(),
        )?;
        Ok(())
    }

    pub fn parameters(&self) -> &HashMap<String, f64> {
        &self.parameters
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Get the derivative expression as string
    pub fn derivative_string(&self) -> String {
        self.derivative_parts().0.to_string()
    }
}

impl NonlinearFunction for SymbolicFunction {
    fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        self.func.eval(&[x])
    }

    fn derivative(&self, x: f64) -> Option<Result<f64, EvalError>> {
        let (_, derivative_func) = self.derivative_parts();
        Some(
            derivative_func
                .as_ref()
                .map_err(Clone::clone)
                .and_then(|lambda| lambda.eval(&[x])),
        )
    }

    fn name(&self) -> &str {
        &self.name
    }
}
