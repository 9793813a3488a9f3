pub mod direct;
pub mod precedence;

use crate::{
    error::{kind, Error},
    tokenizer::{lex_with, LexMode, Lexeme, LexemeKind},
    trace::Event,
};
use precedence::{assemble, construction_order, Operator, OperandPool, Precedence};
use std::ops::Range;
use vf_compute::{Expr, Markup, StepCollector};
use vf_error::ErrorKind;

/// The parser that reads expressions from [`Lexeme`]s.
///
/// A range of lexemes is parsed by collecting its leaves (values, and the function calls and
/// negations that own the lexemes after them) and its binary operators, then building the
/// operators in [construction order](precedence::construction_order). Parenthesized groups are
/// not parsed separately: the operators inside them simply have a greater [`Precedence`].
pub struct Parser<'a> {
    /// The lexemes that this parser is parsing.
    lexemes: &'a [Lexeme],

    /// The length of the source code, used to point at its end.
    source_len: usize,

    /// Receives the events of the parse.
    trace: &'a mut dyn StepCollector<Event>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser over the given lexemes.
    pub fn new(
        lexemes: &'a [Lexeme],
        source_len: usize,
        trace: &'a mut dyn StepCollector<Event>,
    ) -> Self {
        Self { lexemes, source_len, trace }
    }

    /// Creates an error that points at the lexeme at the given index.
    fn error_at(&self, index: usize, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span_of(index)], kind)
    }

    /// Returns the span of the lexeme at the given index, or the end of the source code.
    fn span_of(&self, index: usize) -> Range<usize> {
        self.lexemes
            .get(index)
            .map_or(self.source_len..self.source_len, |lexeme| lexeme.span.clone())
    }

    /// Returns the span covering the lexemes in the given range. An empty range is widened to the
    /// lexemes around it, if there are any.
    fn range_span(&self, start: usize, end: usize) -> Range<usize> {
        if start < end {
            self.lexemes[start].span.start..self.lexemes[end - 1].span.end
        } else if start > 0 && end < self.lexemes.len() {
            self.lexemes[start - 1].span.start..self.lexemes[end].span.end
        } else {
            0..self.source_len
        }
    }

    fn kind(&self, index: usize) -> Option<LexemeKind> {
        self.lexemes.get(index).map(|lexeme| lexeme.kind)
    }

    /// Checks that every parenthesis has a partner.
    pub fn check_balance(&self) -> Result<(), Error> {
        let mut open = Vec::new();
        for (index, lexeme) in self.lexemes.iter().enumerate() {
            match lexeme.kind {
                LexemeKind::OpenParen => open.push(index),
                LexemeKind::CloseParen => {
                    if open.pop().is_none() {
                        return Err(self.error_at(index, kind::UnbalancedParentheses { opening: false }));
                    }
                },
                _ => (),
            }
        }

        match open.pop() {
            Some(index) => Err(self.error_at(index, kind::UnbalancedParentheses { opening: true })),
            None => Ok(()),
        }
    }

    /// Returns the index of the parenthesis closing the one at `open`, searching no further than
    /// `end`.
    fn closing_paren(&self, open: usize, end: usize) -> Result<usize, Error> {
        let mut depth = 0usize;
        for index in open..end {
            match self.lexemes[index].kind {
                LexemeKind::OpenParen => depth += 1,
                LexemeKind::CloseParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(index);
                    }
                },
                _ => (),
            }
        }

        Err(self.error_at(open, kind::UnbalancedParentheses { opening: true }))
    }

    /// Parses the parenthesized group opening at `open`, returning its contents and the index
    /// after the closing parenthesis.
    fn parse_group(&mut self, open: usize, end: usize) -> Result<(Expr, usize), Error> {
        let close = self.closing_paren(open, end)?;
        let inner = self.parse_range(open + 1, close)?;
        Ok((inner, close + 1))
    }

    /// Returns the leaf expression of a single value lexeme.
    fn value(&self, index: usize) -> Option<Expr> {
        match self.kind(index)? {
            LexemeKind::Var(symbol) => Some(Expr::var(symbol)),
            LexemeKind::Number(num) => Some(Expr::value(num.value, num.digits)),
            _ => None,
        }
    }

    /// Parses a leaf that owns the lexemes after it: `sin(…)`, `cos(…)`, or a negation. Returns
    /// the leaf and the index after the last lexeme it owns.
    fn parse_prefixed(&mut self, index: usize, end: usize) -> Result<(Expr, usize), Error> {
        let next = if index + 1 < end { self.kind(index + 1) } else { None };

        match self.lexemes[index].kind {
            function @ (LexemeKind::Sin | LexemeKind::Cos) => {
                if next != Some(LexemeKind::OpenParen) {
                    let function = if function == LexemeKind::Sin { "sin" } else { "cos" };
                    return Err(self.error_at(index, kind::MissingFunctionArgument { function }));
                }

                let (argument, after) = self.parse_group(index + 1, end)?;
                let expr = if function == LexemeKind::Sin {
                    Expr::sin(argument)
                } else {
                    Expr::cos(argument)
                };
                Ok((expr, after))
            },
            LexemeKind::Negative => match next {
                Some(LexemeKind::OpenParen) => {
                    let (operand, after) = self.parse_group(index + 1, end)?;
                    Ok((Expr::neg(operand), after))
                },
                Some(LexemeKind::Sin | LexemeKind::Cos | LexemeKind::Negative) => {
                    let (operand, after) = self.parse_prefixed(index + 1, end)?;
                    Ok((Expr::neg(operand), after))
                },
                Some(operand) if operand.is_value() => {
                    let operand = self.value(index + 1)
                        .ok_or_else(|| self.error_at(index + 1, kind::MissingOperator))?;
                    Ok((Expr::neg(operand), index + 2))
                },
                _ => Err(self.error_at(index, kind::MissingRightOperand { operator: '-' })),
            },
            _ => match self.value(index) {
                Some(expr) => Ok((expr, index + 1)),
                None => Err(self.error_at(index, kind::MissingOperator)),
            },
        }
    }

    /// Parses the lexemes in the range `start..end`.
    pub fn parse_range(&mut self, start: usize, end: usize) -> Result<Expr, Error> {
        let mut pool = OperandPool::new();
        let mut operators = Vec::new();
        let mut depth = 0usize;
        let mut index = start;

        while index < end {
            let lexeme_kind = self.lexemes[index].kind;
            match lexeme_kind {
                LexemeKind::Var(_) | LexemeKind::Number(_)
                    | LexemeKind::Sin | LexemeKind::Cos | LexemeKind::Negative => {
                    let (leaf, after) = self.parse_prefixed(index, end)?;
                    pool.insert(index, leaf);
                    index = after;
                    continue;
                },
                LexemeKind::OpenParen => depth += 1,
                LexemeKind::CloseParen => depth = depth.saturating_sub(1),
                _ => {
                    if let Some(op) = lexeme_kind.binary_op() {
                        operators.push(Operator {
                            index,
                            op,
                            precedence: Precedence::new(depth, op.rank()),
                        });
                    }
                },
            }
            index += 1;
        }

        self.trace.push(Event::Leaves {
            start,
            end,
            leaves: pool.iter()
                .map(|(index, leaf)| (index, leaf.display(Markup::Plain).to_string()))
                .collect(),
        });

        let empty_span = self.range_span(start, end);
        let empty = || Error::new(vec![empty_span], kind::EmptyInput);

        if operators.is_empty() {
            return pool.into_single(|index| self.span_of(index), empty);
        }

        construction_order(&mut operators);
        self.trace.push(Event::Operators {
            start,
            end,
            order: operators.iter()
                .map(|operator| (operator.index, operator.op, operator.precedence))
                .collect(),
        });

        let lexemes = self.lexemes;
        let source_len = self.source_len;
        let span_of = |index: usize| lexemes
            .get(index)
            .map_or(source_len..source_len, |lexeme| lexeme.span.clone());
        assemble(pool, &operators, span_of, empty, &mut *self.trace)
    }

    /// Parses every lexeme.
    pub fn parse(&mut self) -> Result<Expr, Error> {
        self.check_balance()?;
        self.parse_range(0, self.lexemes.len())
    }
}

/// Parses an expression, reporting lexing and parsing events to the given trace.
pub fn parse_with(
    input: &str,
    mode: LexMode,
    trace: &mut dyn StepCollector<Event>,
) -> Result<Expr, Error> {
    let lexemes = lex_with(input, mode, trace).into_result()?;
    Parser::new(&lexemes, input.len(), trace).parse()
}

/// Parses an expression.
pub fn parse(input: &str, mode: LexMode) -> Result<Expr, Error> {
    parse_with(input, mode, &mut ())
}

/// Parses an expression, returning the events of the parse alongside the result.
pub fn parse_with_trace(input: &str, mode: LexMode) -> (Result<Expr, Error>, Vec<Event>) {
    let mut trace = Vec::new();
    let result = parse_with(input, mode, &mut trace);
    (result, trace)
}

/// The available parsers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    /// The lexeme-based [`Parser`], supporting the whole expression language.
    #[default]
    Token,

    /// The character-based parser in [`direct`].
    Direct,
}

impl ParserKind {
    pub fn parse(self, input: &str, mode: LexMode) -> Result<Expr, Error> {
        self.parse_with(input, mode, &mut ())
    }

    pub fn parse_with(
        self,
        input: &str,
        mode: LexMode,
        trace: &mut dyn StepCollector<Event>,
    ) -> Result<Expr, Error> {
        match self {
            ParserKind::Token => parse_with(input, mode, trace),
            ParserKind::Direct => direct::parse_with(input, mode, trace),
        }
    }
}

impl std::fmt::Display for ParserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ParserKind::Token => write!(f, "token"),
            ParserKind::Direct => write!(f, "direct"),
        }
    }
}
