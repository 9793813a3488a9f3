//! The numeric and symbolic core of the vector field tools.
//!
//! The central type is [`Expr`], an immutable expression tree over the symbols `t`, `x`, `y` and
//! `z`. Trees are usually produced by `vf-parser`, but they can also be built by hand:
//!
//! ```
//! use vf_compute::{Expr, Symbol};
//!
//! // x^2
//! let expr = Expr::pow(Expr::var(Symbol::X), Expr::value(2.0, 0));
//! let derivative = expr.derivative(Symbol::X).simplify();
//! assert!((derivative.eval(3.0, 0.0, 0.0) - 6.0).abs() < 1e-5);
//! ```
//!
//! Numeric helpers live in [`numerical`], the tree and its rewrites in [`symbolic`], and the
//! vector field / parametric curve layer built on top of them in [`vector`].

pub mod numerical;
pub mod symbolic;
pub mod vector;

pub use numerical::eval::{DIV_GUARD_EPSILON, DIV_GUARD_SENTINEL};
pub use symbolic::{
    expr::{Expr, ExprFormatter, Markup, Symbol},
    simplify::{Step, FOLD_DIV_SENTINEL},
    step_collector::StepCollector,
};
pub use vector::{Curve, CurveSamples, Vec3, VectorField};
