//! Simplification rules for sums and differences.

use crate::symbolic::{
    expr::Expr,
    simplify::{rules::{do_add, do_sub}, step::Step},
    step_collector::StepCollector,
};
use std::rc::Rc;

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |lhs, rhs| {
        if lhs.is_zero() {
            Some((**rhs).clone())
        } else if rhs.is_zero() {
            Some((**lhs).clone())
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `0-a = -a`
pub fn zero_minus(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sub(expr, |lhs, rhs| {
        lhs.is_zero().then(|| Expr::Neg(Rc::clone(rhs)))
    })?;

    step_collector.push(Step::ZeroMinus);
    Some(opt)
}

/// `a-0 = a`
pub fn subtract_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sub(expr, |lhs, rhs| {
        rhs.is_zero().then(|| (**lhs).clone())
    })?;

    step_collector.push(Step::SubtractZero);
    Some(opt)
}

/// `a-(-b) = a+b`
pub fn subtract_negation(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sub(expr, |lhs, rhs| match &**rhs {
        Expr::Neg(inner) => Some(Expr::Add(Rc::clone(lhs), Rc::clone(inner))),
        _ => None,
    })?;

    step_collector.push(Step::SubtractNegation);
    Some(opt)
}

/// Applies all sum and difference rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    add_zero(expr, step_collector)
        .or_else(|| zero_minus(expr, step_collector))
        .or_else(|| subtract_zero(expr, step_collector))
        .or_else(|| subtract_negation(expr, step_collector))
}
