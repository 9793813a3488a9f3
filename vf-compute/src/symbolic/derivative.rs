//! Symbolic differentiation.
//!
//! The rules here are applied structurally and the result is **not** simplified; call
//! [`Expr::simplify`] on it to clean up the `0 * a` and `1 * a` terms the rules leave behind.
//!
//! `sin` and `cos` are differentiated as if their argument were the differentiation symbol
//! itself: `sin(f)' = cos(f)`, without the `f'` factor of the chain rule. This matches the
//! derivative of `sin(x)` with respect to `x` but not, for example, `sin(2x)`. `ln` behaves the
//! same way; it only appears in the derivative of a power, where its argument is the base.

use std::rc::Rc;
use super::expr::{Expr, Symbol};

impl Expr {
    /// Computes the derivative of this expression with respect to the given symbol.
    ///
    /// The returned tree shares the undifferentiated operands of products, quotients and powers
    /// with `self`.
    pub fn derivative(&self, with: Symbol) -> Expr {
        derivative(self, Some(with))
    }

    /// Computes the derivative of this expression with respect to the symbol written as `with`.
    ///
    /// A character that names no symbol is accepted; every symbol is then treated as a constant,
    /// and the derivative is zero everywhere.
    pub fn derivative_char(&self, with: char) -> Expr {
        derivative(self, Symbol::try_from(with).ok())
    }
}

fn zero() -> Expr {
    Expr::value(0.0, 0)
}

fn one() -> Expr {
    Expr::value(1.0, 0)
}

/// `(f * g)' = f * g' + g * f'`
fn product_rule(f: &Rc<Expr>, g: &Rc<Expr>, with: Option<Symbol>) -> Expr {
    let f_prime = derivative(f, with);
    let g_prime = derivative(g, with);
    Expr::add(
        Expr::mul(Rc::clone(f), g_prime),
        Expr::mul(Rc::clone(g), f_prime),
    )
}

/// `(f / g)' = (g * f' - f * g') / (g * g)`
fn quotient_rule(f: &Rc<Expr>, g: &Rc<Expr>, with: Option<Symbol>) -> Expr {
    let f_prime = derivative(f, with);
    let g_prime = derivative(g, with);
    let numerator = Expr::sub(
        Expr::mul(Rc::clone(g), f_prime),
        Expr::mul(Rc::clone(f), g_prime),
    );
    Expr::div(numerator, Expr::mul(Rc::clone(g), Rc::clone(g)))
}

/// `(f ^ g)' = f ^ g * (g' * ln(f) + g * f' / f)`
fn power_rule(f: &Rc<Expr>, g: &Rc<Expr>, with: Option<Symbol>) -> Expr {
    let f_prime = derivative(f, with);
    let g_prime = derivative(g, with);
    let g_prime_ln_f = Expr::mul(g_prime, Expr::ln(Rc::clone(f)));
    let g_f_prime_over_f = Expr::div(Expr::mul(Rc::clone(g), f_prime), Rc::clone(f));
    Expr::mul(
        Expr::pow(Rc::clone(f), Rc::clone(g)),
        Expr::add(g_prime_ln_f, g_f_prime_over_f),
    )
}

fn derivative(f: &Expr, with: Option<Symbol>) -> Expr {
    match f {
        Expr::Value { .. } => zero(),
        Expr::Var(symbol) => {
            if Some(*symbol) == with {
                one()
            } else {
                zero()
            }
        },
        Expr::Neg(child) => Expr::neg(derivative(child, with)),
        Expr::Add(lhs, rhs) => Expr::add(derivative(lhs, with), derivative(rhs, with)),
        Expr::Sub(lhs, rhs) => Expr::sub(derivative(lhs, with), derivative(rhs, with)),
        Expr::Mul(lhs, rhs) => product_rule(lhs, rhs, with),
        Expr::Div(lhs, rhs) => quotient_rule(lhs, rhs, with),
        Expr::Pow(lhs, rhs) => power_rule(lhs, rhs, with),
        Expr::Sin(child) => Expr::cos(Rc::clone(child)),
        Expr::Cos(child) => Expr::neg(Expr::sin(Rc::clone(child))),
        Expr::Log(child) => Expr::div(one(), Rc::clone(child)),
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var(Symbol::X)
    }

    fn y() -> Expr {
        Expr::var(Symbol::Y)
    }

    fn n(value: f32) -> Expr {
        Expr::value(value, 0)
    }

    /// Approximates the partial derivative with respect to `x` with a central difference.
    fn finite_difference(e: &Expr, x: f32, y: f32) -> f32 {
        const DX: f32 = 1e-2;
        (e.eval(x + DX, y, 0.0) - e.eval(x - DX, y, 0.0)) / (2.0 * DX)
    }

    fn test_for_function(f: &Expr, points: impl IntoIterator<Item = (f32, f32)>) {
        const TOL: f32 = 1e-2;

        let raw = f.derivative(Symbol::X);
        let simplified = raw.simplify();

        for (px, py) in points {
            let numerically_computed = finite_difference(f, px, py);
            for symbolic in [&raw, &simplified] {
                let symbolically_computed = symbolic.eval(px, py, 0.0);
                assert!(
                    (symbolically_computed - numerically_computed).abs() < TOL,
                    "For \"{}\" at ({px}, {py}), symbolically computed derivative was {symbolically_computed} but numerically computed derivative was {numerically_computed}, which was out of tolerance {TOL}",
                    f.display(crate::Markup::Plain),
                );
            }
        }
    }

    #[test]
    fn leaves() {
        assert_eq!(n(4.0).derivative(Symbol::X), n(0.0));
        assert_eq!(x().derivative(Symbol::X), n(1.0));
        assert_eq!(y().derivative(Symbol::X), n(0.0));
        assert_eq!(Expr::var(Symbol::T).derivative_char('t'), n(1.0));
        assert_eq!(x().derivative_char('q'), n(0.0));
    }

    #[test]
    fn product_shape() {
        let expr = Expr::mul(x(), y());
        assert_eq!(
            expr.derivative(Symbol::X),
            Expr::add(Expr::mul(x(), n(0.0)), Expr::mul(y(), n(1.0))),
        );
    }

    #[test]
    fn product_shares_operands() {
        let f = Rc::new(Expr::sin(x()));
        let g = Rc::new(y());
        let expr = Expr::Mul(Rc::clone(&f), Rc::clone(&g));
        match expr.derivative(Symbol::X) {
            Expr::Add(lhs, rhs) => match (&*lhs, &*rhs) {
                (Expr::Mul(f2, _), Expr::Mul(g2, _)) => {
                    assert!(Rc::ptr_eq(&f, f2));
                    assert!(Rc::ptr_eq(&g, g2));
                },
                other => panic!("unexpected derivative shape {:?}", other),
            },
            other => panic!("unexpected derivative shape {:?}", other),
        }
    }

    #[test]
    fn trig_shape() {
        assert_eq!(Expr::sin(x()).derivative(Symbol::X), Expr::cos(x()));
        assert_eq!(Expr::cos(x()).derivative(Symbol::X), Expr::neg(Expr::sin(x())));
        assert_eq!(Expr::ln(x()).derivative(Symbol::X), Expr::div(n(1.0), x()));
    }

    #[test]
    fn square() {
        let expr = Expr::pow(x(), n(2.0));
        let derivative = expr.derivative(Symbol::X);
        assert_float_absolute_eq!(derivative.eval(3.0, 0.0, 0.0), 6.0, 1e-4);
        assert_float_absolute_eq!(derivative.simplify().eval(3.0, 0.0, 0.0), 6.0, 1e-4);
    }

    #[test]
    fn power_rule() {
        // x^2 + x + 1
        let expr = Expr::add(Expr::add(Expr::pow(x(), n(2.0)), x()), n(1.0));
        test_for_function(&expr, [(0.5, 0.0), (1.0, 0.0), (2.0, 0.0), (5.0, 0.0)]);
    }

    #[test]
    fn sine() {
        test_for_function(&Expr::sin(x()), [(0.0, 0.0), (1.0, 0.0), (2.5, 0.0), (-1.0, 0.0)]);
        test_for_function(&Expr::cos(x()), [(0.0, 0.0), (1.0, 0.0), (2.5, 0.0), (-1.0, 0.0)]);
    }

    #[test]
    fn partial_product() {
        let expr = Expr::mul(x(), y());
        test_for_function(&expr, [(1.0, 2.0), (-3.0, 0.5), (4.0, -2.0)]);
        assert_eq!(expr.derivative(Symbol::X).simplify(), y());
    }

    #[test]
    fn quotient_rule() {
        // (x + 1) / (x * x + 1), a positive denominator keeps the division guard out of the way
        let expr = Expr::div(
            Expr::add(x(), n(1.0)),
            Expr::add(Expr::mul(x(), x()), n(1.0)),
        );
        test_for_function(&expr, [(0.0, 0.0), (0.5, 0.0), (2.0, 0.0), (-1.5, 0.0)]);
    }

    #[test]
    fn negation_and_difference() {
        // -(x^3) - y * x
        let expr = Expr::sub(Expr::neg(Expr::pow(x(), n(3.0))), Expr::mul(y(), x()));
        test_for_function(&expr, [(1.0, 1.0), (2.0, -1.0), (0.5, 3.0)]);
    }
}
