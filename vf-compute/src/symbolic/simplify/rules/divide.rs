//! Simplification rules for quotients.

use crate::symbolic::{
    expr::Expr,
    simplify::{rules::do_divide, step::Step},
    step_collector::StepCollector,
};

/// `a/1 = a`
pub fn divide_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_divide(expr, |lhs, rhs| {
        rhs.is_one().then(|| (**lhs).clone())
    })?;

    step_collector.push(Step::DivideOne);
    Some(opt)
}

/// `0/a = 0`
pub fn divide_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_divide(expr, |lhs, _| {
        lhs.is_zero().then(|| Expr::value(0.0, 0))
    })?;

    step_collector.push(Step::DivideZero);
    Some(opt)
}

/// Applies all quotient rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    divide_one(expr, step_collector)
        .or_else(|| divide_zero(expr, step_collector))
}
