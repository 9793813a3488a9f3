//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply. Rules only look at the node they are given; its children are expected to
//! be simplified already.

pub mod add;
pub mod divide;
pub mod fold;
pub mod multiply;
pub mod negate;

use crate::symbolic::step_collector::StepCollector;
use std::rc::Rc;
use super::{Expr, step::Step};

/// If the expression is a negation, calls the given transformation function with its child.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_negate(expr: &Expr, f: impl Fn(&Rc<Expr>) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Neg(child) = expr {
        f(child)
    } else {
        None
    }
}

/// If the expression is an add expression, calls the given transformation function with the left
/// and right-hand-side of the sum.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &Expr, f: impl Fn(&Rc<Expr>, &Rc<Expr>) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Add(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// If the expression is a subtraction, calls the given transformation function with the left and
/// right-hand-side of the difference.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_sub(expr: &Expr, f: impl Fn(&Rc<Expr>, &Rc<Expr>) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Sub(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// If the expression is a multiplication expression, calls the given transformation function with
/// the two factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &Expr, f: impl Fn(&Rc<Expr>, &Rc<Expr>) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Mul(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// If the expression is a division, calls the given transformation function with the numerator
/// and denominator.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_divide(expr: &Expr, f: impl Fn(&Rc<Expr>, &Rc<Expr>) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Div(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// Applies all rules.
///
/// Constant folding is tried first; within each module, the rules are tried in the order they
/// are documented there.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    fold::all(expr, step_collector)
        .or_else(|| negate::all(expr, step_collector))
        .or_else(|| add::all(expr, step_collector))
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| divide::all(expr, step_collector))
}
