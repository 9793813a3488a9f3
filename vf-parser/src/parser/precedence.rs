//! Operator precedence and tree construction shared by both parsers.
//!
//! Both parsers reduce a range of input to a set of operands (leaves, keyed by their index) and
//! a set of binary operators. The operators are then built in descending [`Precedence`] order,
//! ties going to the operator with the greater index. Each operator takes the nearest remaining
//! operand on either side and leaves the sub-expression it builds at its own index, where a
//! later operator can pick it up.

use crate::{error::{kind, Error}, trace::Event};
use std::{collections::BTreeMap, fmt::{self, Display, Formatter}, ops::Range};
use vf_compute::{Expr, Markup, StepCollector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The rank of a binary operator, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpRank {
    /// Addition and subtraction.
    Term,

    /// Multiplication and division.
    Factor,

    /// Exponentiation.
    Exp,
}

/// The precedence of an operator: its parenthesis depth, then its rank.
///
/// Any operator nested inside more parentheses binds tighter than one nested in fewer, no matter
/// the rank. The derived ordering compares the depth first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Precedence {
    pub depth: usize,
    pub rank: OpRank,
}

impl Precedence {
    pub fn new(depth: usize, rank: OpRank) -> Self {
        Self { depth, rank }
    }
}

impl Display for Precedence {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let rank = match self.rank {
            OpRank::Term => 0,
            OpRank::Factor => 1,
            OpRank::Exp => 2,
        };
        write!(f, "{}.{}", self.depth, rank)
    }
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// Returns the operator for the given character, if there is one.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    /// Returns the rank of the operator.
    pub fn rank(self) -> OpRank {
        match self {
            Self::Add | Self::Sub => OpRank::Term,
            Self::Mul | Self::Div => OpRank::Factor,
            Self::Pow => OpRank::Exp,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }

    /// Builds the expression applying this operator to the operands.
    pub fn build(self, lhs: Expr, rhs: Expr) -> Expr {
        match self {
            Self::Add => Expr::add(lhs, rhs),
            Self::Sub => Expr::sub(lhs, rhs),
            Self::Mul => Expr::mul(lhs, rhs),
            Self::Div => Expr::div(lhs, rhs),
            Self::Pow => Expr::pow(lhs, rhs),
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A binary operator found in the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operator {
    /// The index of the operator; a lexeme index or a byte offset, depending on the parser.
    pub index: usize,
    pub op: BinaryOp,
    pub precedence: Precedence,
}

/// The operands that have not been claimed by an operator yet, keyed by index.
#[derive(Debug, Clone, Default)]
pub struct OperandPool {
    operands: BTreeMap<usize, Expr>,
}

impl OperandPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize, expr: Expr) {
        self.operands.insert(index, expr);
    }

    pub fn len(&self) -> usize {
        self.operands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }

    /// Iterates over the operands in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Expr)> {
        self.operands.iter().map(|(index, expr)| (*index, expr))
    }

    /// Removes and returns the nearest operand before the given index.
    pub fn take_left(&mut self, index: usize) -> Option<Expr> {
        let key = *self.operands.range(..index).next_back()?.0;
        self.operands.remove(&key)
    }

    /// Removes and returns the nearest operand after the given index.
    pub fn take_right(&mut self, index: usize) -> Option<Expr> {
        let key = *self.operands.range(index + 1..).next()?.0;
        self.operands.remove(&key)
    }

    /// Removes the single remaining operand.
    ///
    /// If there are none, the `empty` error is returned. If there are more, a
    /// [`kind::MissingOperator`] is reported at the second one.
    pub fn into_single(
        mut self,
        span_of: impl Fn(usize) -> Range<usize>,
        empty: impl FnOnce() -> Error,
    ) -> Result<Expr, Error> {
        let mut indices = self.operands.keys().copied();
        let Some(first) = indices.next() else {
            return Err(empty());
        };
        if let Some(second) = indices.next() {
            return Err(Error::new(vec![span_of(second)], kind::MissingOperator));
        }
        self.operands.remove(&first).ok_or_else(empty)
    }
}

/// Sorts the operators into the order they are built in: descending precedence, then descending
/// index.
pub fn construction_order(operators: &mut [Operator]) {
    operators.sort_by(|a, b| {
        b.precedence.cmp(&a.precedence)
            .then_with(|| b.index.cmp(&a.index))
    });
}

/// Builds the operators, which must already be in [construction order](construction_order),
/// from the operands in the pool.
///
/// `span_of` returns the source region of the operand or operator at an index, for error
/// reporting.
pub fn assemble(
    mut pool: OperandPool,
    operators: &[Operator],
    span_of: impl Fn(usize) -> Range<usize>,
    empty: impl FnOnce() -> Error,
    trace: &mut dyn StepCollector<Event>,
) -> Result<Expr, Error> {
    for operator in operators {
        let operator_char = operator.op.symbol();
        let lhs = pool.take_left(operator.index)
            .ok_or_else(|| Error::new(
                vec![span_of(operator.index)],
                kind::MissingLeftOperand { operator: operator_char },
            ))?;
        let rhs = pool.take_right(operator.index)
            .ok_or_else(|| Error::new(
                vec![span_of(operator.index)],
                kind::MissingRightOperand { operator: operator_char },
            ))?;

        let expr = operator.op.build(lhs, rhs);
        trace.push(Event::Built {
            index: operator.index,
            expr: expr.display(Markup::Plain).to_string(),
        });
        pool.insert(operator.index, expr);
    }

    pool.into_single(span_of, empty)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use vf_compute::Symbol;

    fn op(index: usize, op: BinaryOp, depth: usize) -> Operator {
        Operator { index, op, precedence: Precedence::new(depth, op.rank()) }
    }

    fn empty() -> Error {
        Error::new(vec![0..0], kind::EmptyInput)
    }

    #[test]
    fn depth_dominates_rank() {
        assert!(Precedence::new(1, OpRank::Term) > Precedence::new(0, OpRank::Exp));
        assert!(Precedence::new(0, OpRank::Factor) > Precedence::new(0, OpRank::Term));
        assert_eq!(Precedence::new(2, OpRank::Factor).to_string(), "2.1");
    }

    #[test]
    fn order_ties_by_descending_index() {
        let mut operators = [
            op(1, BinaryOp::Sub, 0),
            op(3, BinaryOp::Mul, 0),
            op(5, BinaryOp::Sub, 0),
            op(7, BinaryOp::Add, 1),
        ];
        construction_order(&mut operators);
        let indices = operators.iter().map(|o| o.index).collect::<Vec<_>>();
        assert_eq!(indices, vec![7, 3, 5, 1]);
    }

    #[test]
    fn nearest_operands() {
        let mut pool = OperandPool::new();
        pool.insert(0, Expr::var(Symbol::X));
        pool.insert(4, Expr::var(Symbol::Y));
        pool.insert(6, Expr::var(Symbol::Z));

        assert_eq!(pool.take_right(4), Some(Expr::var(Symbol::Z)));
        assert_eq!(pool.take_left(4), Some(Expr::var(Symbol::X)));
        assert_eq!(pool.take_left(4), None);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn assemble_chain() {
        // x - y - z, as lexeme indices 0 to 4
        let mut pool = OperandPool::new();
        pool.insert(0, Expr::var(Symbol::X));
        pool.insert(2, Expr::var(Symbol::Y));
        pool.insert(4, Expr::var(Symbol::Z));
        let mut operators = [op(1, BinaryOp::Sub, 0), op(3, BinaryOp::Sub, 0)];
        construction_order(&mut operators);

        let mut trace = Vec::new();
        let expr = assemble(pool, &operators, |i| i..i + 1, empty, &mut trace).unwrap();
        assert_eq!(expr.display(Markup::Plain).to_string(), "x - (y - z)");
        assert_eq!(trace, vec![
            Event::Built { index: 3, expr: "y - z".to_string() },
            Event::Built { index: 1, expr: "x - (y - z)".to_string() },
        ]);
    }

    #[test]
    fn assemble_missing_operands() {
        let mut pool = OperandPool::new();
        pool.insert(1, Expr::var(Symbol::X));
        let err = assemble(pool.clone(), &[op(0, BinaryOp::Mul, 0)], |i| i..i + 1, empty, &mut ())
            .unwrap_err();
        assert_eq!(err.downcast_ref::<kind::MissingLeftOperand>(), Some(&kind::MissingLeftOperand { operator: '*' }));
        assert_eq!(err.spans, vec![0..1]);

        let err = assemble(pool, &[op(2, BinaryOp::Pow, 0)], |i| i..i + 1, empty, &mut ())
            .unwrap_err();
        assert!(err.is::<kind::MissingRightOperand>());
    }

    #[test]
    fn leftover_operand() {
        let mut pool = OperandPool::new();
        pool.insert(0, Expr::var(Symbol::X));
        pool.insert(1, Expr::var(Symbol::Y));
        let err = pool.into_single(|i| i..i + 1, empty).unwrap_err();
        assert!(err.is::<kind::MissingOperator>());
        assert_eq!(err.spans, vec![1..2]);
    }
}
