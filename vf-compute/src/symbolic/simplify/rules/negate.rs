//! Simplification rules for negations.

use crate::symbolic::{
    expr::Expr,
    simplify::{rules::do_negate, step::Step},
    step_collector::StepCollector,
};

/// `-(2) = -2`
///
/// The negated constant keeps the display digits of the original.
pub fn negate_constant(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_negate(expr, |child| match **child {
        Expr::Value { value, digits } => Some(Expr::value(-value, digits)),
        _ => None,
    })?;

    step_collector.push(Step::NegateConstant);
    Some(opt)
}

/// `-(-a) = a`
pub fn double_negation(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_negate(expr, |child| match &**child {
        Expr::Neg(inner) => Some((**inner).clone()),
        _ => None,
    })?;

    step_collector.push(Step::DoubleNegation);
    Some(opt)
}

/// Applies all negation rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    negate_constant(expr, step_collector)
        .or_else(|| double_negation(expr, step_collector))
}
