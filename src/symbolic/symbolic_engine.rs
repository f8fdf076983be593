//! # Symbolic Engine Module
//!
//! Core expression tree used by the root finders. A user formula such as `x^3 - x - 2` or
//! `cbrt(x + 2)` is parsed into an [`Expr`], differentiated symbolically (for Newton-Raphson)
//! and finally compiled into a checked numeric function (see `symbolic_lambdify`).
//!
//! ## Main Structures and Methods
//!
//! - **Variables**: `Var(String)` - the free variable, usually "x"
//! - **Constants**: `Const(f64)`
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow`
//! - **Functions**: `Exp`, `Ln`, `sqrt`, `cbrt`, `abs`, `sin`, `cos`, `tg`, `ctg`,
//!   `arcsin`, `arccos`, `arctg`, `arcctg`
//!
//! ## Interesting Code Features
//!
//! 1. **Recursive Expression Tree**: `Box<Expr>` children, arbitrarily deep nesting
//! 2. **Operator Overloading**: `std::ops` traits so that `x.clone() * x - Expr::Const(2.0)`
//!    builds a tree directly
//! 3. **Single traversal helper**: [`Expr::map_children`] rebuilds a node from transformed
//!    children, which keeps substitution-like passes short
//! 4. **Non-standard Function Names**: mathematical notation (tg, ctg, arctg) for the
//!    trigonometric family; the parser accepts both spellings

#![allow(non_camel_case_types)]

use std::collections::HashMap;
use std::fmt;

/// Symbolic expression of one (or, before validation, several) free variables.
///
/// # Examples
/// ```rust, ignore
/// use RustedRoots::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let f = x.clone().pow(Expr::Const(3.0)) - x - Expr::Const(2.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// left + right
    Add(Box<Expr>, Box<Expr>),
    /// left - right
    Sub(Box<Expr>, Box<Expr>),
    /// left * right
    Mul(Box<Expr>, Box<Expr>),
    /// left / right
    Div(Box<Expr>, Box<Expr>),
    /// base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// e^x
    Exp(Box<Expr>),
    /// natural logarithm
    Ln(Box<Expr>),
    /// square root, defined for x >= 0
    sqrt(Box<Expr>),
    /// real cube root, defined everywhere
    cbrt(Box<Expr>),
    /// absolute value
    abs(Box<Expr>),
    sin(Box<Expr>),
    cos(Box<Expr>),
    /// tangent
    tg(Box<Expr>),
    /// cotangent
    ctg(Box<Expr>),
    arcsin(Box<Expr>),
    arccos(Box<Expr>),
    /// arctangent
    arctg(Box<Expr>),
    /// arccotangent
    arcctg(Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::sqrt(expr) => write!(f, "sqrt({})", expr),
            Expr::cbrt(expr) => write!(f, "cbrt({})", expr),
            Expr::abs(expr) => write!(f, "abs({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::ctg(expr) => write!(f, "ctg({})", expr),
            Expr::arcsin(expr) => write!(f, "arcsin({})", expr),
            Expr::arccos(expr) => write!(f, "arccos({})", expr),
            Expr::arctg(expr) => write!(f, "arctg({})", expr),
            Expr::arcctg(expr) => write!(f, "arcctg({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Rebuilds this node with every direct child replaced by `f(child)`.
    /// Leaves (`Var`, `Const`) are returned unchanged.
    pub fn map_children<F>(&self, f: &F) -> Expr
    where
        F: Fn(&Expr) -> Expr,
    {
        let un = |e: &Expr| Box::new(f(e));
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(l, r) => Expr::Add(un(l), un(r)),
            Expr::Sub(l, r) => Expr::Sub(un(l), un(r)),
            Expr::Mul(l, r) => Expr::Mul(un(l), un(r)),
            Expr::Div(l, r) => Expr::Div(un(l), un(r)),
            Expr::Pow(l, r) => Expr::Pow(un(l), un(r)),
            Expr::Exp(e) => Expr::Exp(un(e)),
            Expr::Ln(e) => Expr::Ln(un(e)),
            Expr::sqrt(e) => Expr::sqrt(un(e)),
            Expr::cbrt(e) => Expr::cbrt(un(e)),
            Expr::abs(e) => Expr::abs(un(e)),
            Expr::sin(e) => Expr::sin(un(e)),
            Expr::cos(e) => Expr::cos(un(e)),
            Expr::tg(e) => Expr::tg(un(e)),
            Expr::ctg(e) => Expr::ctg(un(e)),
            Expr::arcsin(e) => Expr::arcsin(un(e)),
            Expr::arccos(e) => Expr::arccos(un(e)),
            Expr::arctg(e) => Expr::arctg(un(e)),
            Expr::arcctg(e) => Expr::arcctg(un(e)),
        }
    }

    /// Direct children of this node, left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Var(_) | Expr::Const(_) => Vec::new(),
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => vec![l.as_ref(), r.as_ref()],
            Expr::Exp(e)
            | Expr::Ln(e)
            | Expr::sqrt(e)
            | Expr::cbrt(e)
            | Expr::abs(e)
            | Expr::sin(e)
            | Expr::cos(e)
            | Expr::tg(e)
            | Expr::ctg(e)
            | Expr::arcsin(e)
            | Expr::arccos(e)
            | Expr::arctg(e)
            | Expr::arcctg(e) => vec![e.as_ref()],
        }
    }

    /// Substitutes a variable with a constant value throughout the expression.
    ///
    /// # Arguments
    /// * `var` - Name of the variable to substitute
    /// * `value` - Numerical value to substitute for the variable
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        match self {
            Expr::Var(name) if name == var => Expr::Const(value),
            _ => self.map_children(&|e: &Expr| e.set_variable(var, value)),
        }
    }

    /// Substitutes every variable found in `var_map` with its value.
    /// Used to bind named parameters (e.g. `a` in `x^3 - a*x - 2`) before solving.
    pub fn set_variable_from_map(&self, var_map: &HashMap<String, f64>) -> Expr {
        match self {
            Expr::Var(name) => match var_map.get(name) {
                Some(value) => Expr::Const(*value),
                None => self.clone(),
            },
            _ => self.map_children(&|e: &Expr| e.set_variable_from_map(var_map)),
        }
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            _ => self
                .children()
                .iter()
                .any(|child| child.contains_variable(var_name)),
        }
    }

    /// Creates exponential function e^(self).
    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    /// Creates natural logarithm ln(self).
    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    /// Creates base-10 logarithm using ln(x)/ln(10) identity.
    pub fn log10(self) -> Expr {
        Expr::Ln(self.boxed()) / Expr::Const(std::f64::consts::LN_10)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Checks if expression is exactly zero (constant 0.0).
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// Checks if expression is a constant with the given value.
    pub fn is_const_value(&self, value: f64) -> bool {
        matches!(self, Expr::Const(val) if *val == value)
    }

    /// Number of nodes in the tree; handy to check that simplification shrinks derivatives.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|child| child.node_count())
            .sum::<usize>()
    }

    /// Number of levels in the tree, a leaf being 1. Walks the tree without recursion.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children().into_iter().map(|child| (child, level + 1)));
        }
        deepest
    }
}

//___________________________________MACROS____________________________________

/// Macro to create symbolic variables from a comma-separated list
/// Usage: symbols!(x, y) -> creates variables x, y
#[macro_export]
macro_rules! symbols {
    ($($var:ident),+ $(,)?) => {
        ($(
            $crate::symbolic::symbolic_engine::Expr::Var(stringify!($var).to_string())
        ),+)
    };
}
