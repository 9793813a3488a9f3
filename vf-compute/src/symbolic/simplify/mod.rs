//! Module to simplify expressions.
//!
//! This module provides the [`simplify`] function, which rewrites an expression bottom-up:
//! the children of a node are simplified first, then the rules in [`rules`] are applied to the
//! node until none of them applies. Every rule either removes a node or folds two constants into
//! one, so the process always terminates.
//!
//! Simplification is idempotent: simplifying an already simplified expression returns an equal
//! expression.

pub mod rules;
pub mod step;

use std::rc::Rc;
use super::{expr::Expr, step_collector::StepCollector};

pub use rules::fold::FOLD_DIV_SENTINEL;
pub use step::Step;

/// Simplifies the children of the given node, sharing any child that did not change.
fn simplify_child(child: &Rc<Expr>, step_collector: &mut dyn StepCollector<Step>) -> Rc<Expr> {
    let simplified = inner_simplify(child, step_collector);
    if simplified == **child {
        Rc::clone(child)
    } else {
        Rc::new(simplified)
    }
}

/// Base implementation of the simplification algorithm.
fn inner_simplify(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let mut expr = match expr {
        Expr::Value { .. } | Expr::Var(_) => return expr.clone(),
        Expr::Neg(child) => Expr::Neg(simplify_child(child, step_collector)),
        Expr::Sin(child) => Expr::Sin(simplify_child(child, step_collector)),
        Expr::Cos(child) => Expr::Cos(simplify_child(child, step_collector)),
        Expr::Log(child) => Expr::Log(simplify_child(child, step_collector)),
        Expr::Add(lhs, rhs) => Expr::Add(
            simplify_child(lhs, step_collector),
            simplify_child(rhs, step_collector),
        ),
        Expr::Sub(lhs, rhs) => Expr::Sub(
            simplify_child(lhs, step_collector),
            simplify_child(rhs, step_collector),
        ),
        Expr::Mul(lhs, rhs) => Expr::Mul(
            simplify_child(lhs, step_collector),
            simplify_child(rhs, step_collector),
        ),
        Expr::Div(lhs, rhs) => Expr::Div(
            simplify_child(lhs, step_collector),
            simplify_child(rhs, step_collector),
        ),
        Expr::Pow(lhs, rhs) => Expr::Pow(
            simplify_child(lhs, step_collector),
            simplify_child(rhs, step_collector),
        ),
    };

    // the children are simplified now, so only the rewritten node itself can still change
    while let Some(new_expr) = rules::all(&expr, step_collector) {
        expr = new_expr;
    }

    expr
}

/// Simplify the given expression.
pub fn simplify(expr: &Expr) -> Expr {
    inner_simplify(expr, &mut ())
}

/// Simplify the given expression, reporting each rule applied to the given collector.
pub fn simplify_with(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    inner_simplify(expr, step_collector)
}

/// Simplify the given expression. The steps taken by the simplifier will also be collected and
/// returned. This is useful for debugging, and also for displaying the steps taken to the user.
pub fn simplify_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = inner_simplify(expr, &mut steps);
    (expr, steps)
}

impl Expr {
    /// Returns the simplified form of this expression. See [`simplify()`].
    pub fn simplify(&self) -> Expr {
        simplify(self)
    }

    /// Returns the simplified form of this expression, along with the steps taken.
    pub fn simplify_with_steps(&self) -> (Expr, Vec<Step>) {
        simplify_with_steps(self)
    }
}
