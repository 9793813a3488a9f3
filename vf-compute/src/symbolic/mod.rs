//! Symbolic manipulation of expressions.
//!
//! # Expression representation
//!
//! Expressions are binary / unary trees of [`Expr`] nodes. Children are held in [`Rc`]s and no
//! node is ever mutated after it is built; [`Expr::derivative`] relies on this to place the same
//! sub-tree in more than one slot of the tree it returns (the product, quotient and power rules
//! all reuse the undifferentiated operands).
//!
//! # Simplification
//!
//! [`simplify()`] rewrites a tree bottom-up with a small fixed set of rules: constant folding,
//! additive and multiplicative identities, and a couple of negation rules. It is
//! not a full CAS; powers of constants are left as they are, for example. The rules are listed in
//! [`simplify::rules`], and each rule that fires can be observed through a
//! [`StepCollector`].
//!
//! ```
//! use vf_compute::{Expr, Step, Symbol};
//!
//! // 0 + x * 1
//! let expr = Expr::add(
//!     Expr::value(0.0, 0),
//!     Expr::mul(Expr::var(Symbol::X), Expr::value(1.0, 0)),
//! );
//! let (simplified, steps) = expr.simplify_with_steps();
//! assert_eq!(simplified, Expr::var(Symbol::X));
//! assert_eq!(steps, vec![Step::MultiplyOne, Step::AddZero]);
//! ```
//!
//! [`Rc`]: std::rc::Rc

pub mod derivative;
pub mod expr;
pub mod simplify;
pub mod step_collector;

pub use expr::Expr;
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use step_collector::StepCollector;
