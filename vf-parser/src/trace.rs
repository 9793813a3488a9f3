//! Diagnostic events recorded while lexing and parsing.
//!
//! Every entry point that accepts a `&mut dyn StepCollector<Event>` reports what it did to the
//! collector, in order. Pass `&mut ()` to record nothing, or a `Vec<Event>` to keep the events.
//! Each event displays as one line of text.

use crate::{parser::precedence::{BinaryOp, Precedence}, tokenizer::LexemeKind};
use std::fmt::{self, Display, Formatter};

/// A single diagnostic event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A lexeme was produced.
    Lexeme {
        kind: LexemeKind,
        offset: usize,
        implicit: bool,
    },

    /// A multiplication was inserted between two juxtaposed values.
    ImplicitMultiplication {
        offset: usize,
    },

    /// The leaves found in the index range `start..end`.
    Leaves {
        start: usize,
        end: usize,
        leaves: Vec<(usize, String)>,
    },

    /// The binary operators found in the index range `start..end`, in the order they are built.
    Operators {
        start: usize,
        end: usize,
        order: Vec<(usize, BinaryOp, Precedence)>,
    },

    /// A binary operator at the given index was built into the given sub-expression.
    Built {
        index: usize,
        expr: String,
    },
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Event::Lexeme { kind, offset, implicit } => {
                write!(f, "lexeme `{}` at {}", kind, offset)?;
                if *implicit {
                    write!(f, " (implicit)")?;
                }
                Ok(())
            },
            Event::ImplicitMultiplication { offset } => {
                write!(f, "implicit multiplication at {}", offset)
            },
            Event::Leaves { start, end, leaves } => {
                write!(f, "leaves in {}..{}:", start, end)?;
                for (index, leaf) in leaves {
                    write!(f, " [{}] {}", index, leaf)?;
                }
                Ok(())
            },
            Event::Operators { start, end, order } => {
                write!(f, "operators in {}..{}:", start, end)?;
                for (index, op, precedence) in order {
                    write!(f, " [{}] {} ({})", index, op, precedence)?;
                }
                Ok(())
            },
            Event::Built { index, expr } => write!(f, "built [{}] {}", index, expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::precedence::OpRank;

    #[test]
    fn display() {
        let leaves = Event::Leaves { start: 0, end: 3, leaves: vec![(0, "x".into()), (2, "2".into())] };
        assert_eq!(leaves.to_string(), "leaves in 0..3: [0] x [2] 2");

        let operators = Event::Operators {
            start: 0,
            end: 3,
            order: vec![(1, BinaryOp::Pow, Precedence::new(1, OpRank::Exp))],
        };
        assert_eq!(operators.to_string(), "operators in 0..3: [1] ^ (1.2)");

        let lexeme = Event::Lexeme { kind: LexemeKind::Times, offset: 4, implicit: true };
        assert_eq!(lexeme.to_string(), "lexeme `*` at 4 (implicit)");
    }
}
