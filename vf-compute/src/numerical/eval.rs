//! Numeric evaluation of expressions.

use crate::symbolic::expr::{Expr, Symbol};

/// Denominators at or below this value are treated as zero by [`Expr::eval`].
///
/// The comparison is signed, so every negative denominator is also caught.
pub const DIV_GUARD_EPSILON: f32 = 1e-5;

/// The value [`Expr::eval`] returns for a quotient whose denominator is caught by
/// [`DIV_GUARD_EPSILON`]. Consumers of the evaluated values expect finite numbers.
pub const DIV_GUARD_SENTINEL: f32 = 1e9;

impl Expr {
    /// Evaluates the expression at the given point.
    ///
    /// The parameter `t` has no slot of its own: single-variable expressions are evaluated by
    /// passing `t` as `x`.
    pub fn eval(&self, x: f32, y: f32, z: f32) -> f32 {
        match self {
            Expr::Value { value, .. } => *value,
            Expr::Var(Symbol::T | Symbol::X) => x,
            Expr::Var(Symbol::Y) => y,
            Expr::Var(Symbol::Z) => z,
            Expr::Neg(child) => -child.eval(x, y, z),
            Expr::Add(lhs, rhs) => lhs.eval(x, y, z) + rhs.eval(x, y, z),
            Expr::Sub(lhs, rhs) => lhs.eval(x, y, z) - rhs.eval(x, y, z),
            Expr::Mul(lhs, rhs) => lhs.eval(x, y, z) * rhs.eval(x, y, z),
            Expr::Div(lhs, rhs) => {
                let denominator = rhs.eval(x, y, z);
                if denominator <= DIV_GUARD_EPSILON {
                    DIV_GUARD_SENTINEL
                } else {
                    lhs.eval(x, y, z) / denominator
                }
            },
            Expr::Pow(base, exponent) => base.eval(x, y, z).powf(exponent.eval(x, y, z)),
            Expr::Sin(child) => child.eval(x, y, z).sin(),
            Expr::Cos(child) => child.eval(x, y, z).cos(),
            Expr::Log(child) => child.eval(x, y, z).ln(),
        }
    }

    /// Evaluates a single-variable expression at the given value of `t`.
    pub fn eval_t(&self, t: f32) -> f32 {
        self.eval(t, 0.0, 0.0)
    }
}
