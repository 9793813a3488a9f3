//! Constant folding.

use crate::symbolic::{expr::Expr, simplify::step::Step, step_collector::StepCollector};

/// The value a quotient of two constants folds to when the denominator truncates to zero.
pub const FOLD_DIV_SENTINEL: f32 = 1_000_000.0;

/// Returns the value and display digits of a constant.
fn constant(expr: &Expr) -> Option<(f32, u32)> {
    match expr {
        Expr::Value { value, digits } => Some((*value, *digits)),
        _ => None,
    }
}

/// `2 + 3 = 5`, and likewise for `-`, `*` and `/`.
///
/// The folded constant is displayed with as many digits as the more precise operand. A quotient
/// whose denominator truncates to zero folds to [`FOLD_DIV_SENTINEL`] instead.
pub fn fold_constants(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (lhs, rhs) = match expr {
        Expr::Add(lhs, rhs)
        | Expr::Sub(lhs, rhs)
        | Expr::Mul(lhs, rhs)
        | Expr::Div(lhs, rhs) => (constant(lhs)?, constant(rhs)?),
        _ => return None,
    };
    let digits = lhs.1.max(rhs.1);

    let (value, step) = match expr {
        Expr::Add(..) => (lhs.0 + rhs.0, Step::FoldConstants),
        Expr::Sub(..) => (lhs.0 - rhs.0, Step::FoldConstants),
        Expr::Mul(..) => (lhs.0 * rhs.0, Step::FoldConstants),
        _ if rhs.0.trunc() == 0.0 => (FOLD_DIV_SENTINEL, Step::DivideByZeroConstant),
        _ => (lhs.0 / rhs.0, Step::FoldConstants),
    };

    step_collector.push(step);
    Some(Expr::value(value, digits))
}

/// Applies all constant folding rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    fold_constants(expr, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn digits_follow_the_more_precise_operand() {
        let expr = Expr::mul(Expr::value(1.5, 1), Expr::value(2.0, 3));
        assert_eq!(fold_constants(&expr, &mut ()), Some(Expr::value(3.0, 3)));
    }

    #[test]
    fn truncated_zero_denominator() {
        let mut steps = Vec::new();
        let expr = Expr::div(Expr::value(1.0, 0), Expr::value(-0.75, 2));
        assert_eq!(fold_constants(&expr, &mut steps), Some(Expr::value(FOLD_DIV_SENTINEL, 2)));
        assert_eq!(steps, vec![Step::DivideByZeroConstant]);
    }

    #[test]
    fn needs_two_constants() {
        let expr = Expr::add(Expr::value(1.0, 0), Expr::neg(Expr::value(1.0, 0)));
        assert_eq!(fold_constants(&expr, &mut ()), None);
        assert_eq!(fold_constants(&Expr::value(1.0, 0), &mut ()), None);
    }
}
