//! # Symbolic Expression Simplification
//!
//! Bottom-up rewriting used mainly to make derivatives readable:
//!
//! 1. **Constant Folding**: a node whose children are all constants is evaluated once
//!    (through the checked evaluator, so `1/0` or `ln(-1)` are left untouched)
//! 2. **Algebraic Identities**: `x + 0 = x`, `x * 1 = x`, `x * 0 = 0`, `x^1 = x`, `x - x = 0`
//! 3. **Coefficient Merging**: `a * (b * e) = (a*b) * e` for constants `a`, `b`
//!
//! Simplification never changes the value of the expression where the original is defined.

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Simplifies the whole tree, children first.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let e = (x.clone() * Expr::Const(1.0) + Expr::Const(0.0)).simplify_();
    /// assert_eq!(e, x);
    /// ```
    pub fn simplify_(&self) -> Expr {
        self.map_children(&|e: &Expr| e.simplify_())
            .fold_constants()
            .apply_identities()
    }

    fn fold_constants(self) -> Expr {
        let children = self.children();
        if children.is_empty() || !children.iter().all(|c| matches!(c, Expr::Const(_))) {
            return self;
        }
        match self.compile1D().and_then(|lambda| lambda.eval(&[])) {
            Ok(value) if value.is_finite() => Expr::Const(value),
            _ => self,
        }
    }

    fn apply_identities(self) -> Expr {
        match self {
            Expr::Add(l, r) => {
                if l.is_zero() {
                    *r
                } else if r.is_zero() {
                    *l
                } else {
                    Expr::Add(l, r)
                }
            }
            Expr::Sub(l, r) => {
                if r.is_zero() {
                    *l
                } else if l == r {
                    Expr::Const(0.0)
                } else if l.is_zero() {
                    Expr::Mul(Expr::Const(-1.0).boxed(), r).apply_identities()
                } else {
                    Expr::Sub(l, r)
                }
            }
            Expr::Mul(l, r) => {
                if l.is_zero() || r.is_zero() {
                    return Expr::Const(0.0);
                }
                if l.is_const_value(1.0) {
                    return *r;
                }
                if r.is_const_value(1.0) {
                    return *l;
                }
                // keep constants on the left
                if matches!(*r, Expr::Const(_)) && !matches!(*l, Expr::Const(_)) {
                    return Expr::Mul(r, l).apply_identities();
                }
                if let (Expr::Const(a), Expr::Mul(inner_l, inner_r)) = (l.as_ref(), r.as_ref()) {
                    if let Expr::Const(b) = inner_l.as_ref() {
                        return Expr::Mul(Expr::Const(a * b).boxed(), inner_r.clone())
                            .apply_identities();
                    }
                }
                Expr::Mul(l, r)
            }
            Expr::Div(l, r) => {
                if l.is_zero() && !r.is_zero() {
                    Expr::Const(0.0)
                } else if r.is_const_value(1.0) {
                    *l
                } else {
                    Expr::Div(l, r)
                }
            }
            Expr::Pow(base, exponent) => {
                if exponent.is_const_value(1.0) {
                    *base
                } else if exponent.is_zero() || base.is_const_value(1.0) {
                    Expr::Const(1.0)
                } else {
                    Expr::Pow(base, exponent)
                }
            }
            other => other,
        }
    }
}
