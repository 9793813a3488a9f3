//! Turns text into [`Lexeme`]s.
//!
//! Lexing happens in two passes. The first scans the input with the [`TokenKind`] scanner,
//! drops whitespace, and classifies every token. The second inserts a multiplication wherever
//! two values are juxtaposed (`2x`, `xy`, `x sin(y)`), marking the inserted lexemes as
//! [`implicit`](Lexeme::implicit).
//!
//! A `-` directly followed by a space is a subtraction ([`LexemeKind::Minus`]); any other `-` is
//! a negation ([`LexemeKind::Negative`]). So `x - 1` subtracts, while `x -1` is two values with
//! no operator between them.

pub mod token;

use crate::{error::{kind::*, Error}, parser::precedence::BinaryOp, trace::Event};
use logos::{Lexer, Logos};
use std::{fmt::{self, Display, Formatter}, ops::Range};
use vf_compute::{numerical::fmt::format_fixed, StepCollector, Symbol};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use token::TokenKind;

/// Which symbols an expression may use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LexMode {
    /// Constant expressions only.
    NoVariables,

    /// Expressions of the curve parameter `t`.
    SingleVariable,

    /// Expressions of `x`, `y` and `z`.
    #[default]
    MultiVariable,
}

impl LexMode {
    /// Returns true if the symbol may be used in this mode.
    pub fn allows(self, symbol: Symbol) -> bool {
        match self {
            LexMode::NoVariables => false,
            LexMode::SingleVariable => symbol == Symbol::T,
            LexMode::MultiVariable => symbol != Symbol::T,
        }
    }
}

impl Display for LexMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LexMode::NoVariables => write!(f, "constant"),
            LexMode::SingleVariable => write!(f, "single-variable"),
            LexMode::MultiVariable => write!(f, "multi-variable"),
        }
    }
}

/// A numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumLit {
    pub value: f32,

    /// The number of digits written after the decimal point.
    pub digits: u32,
}

/// The kind of a [`Lexeme`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LexemeKind {
    Var(Symbol),
    Number(NumLit),
    OpenParen,
    CloseParen,

    /// Binary `-`.
    Minus,

    /// Unary `-`.
    Negative,
    Plus,
    Times,
    Divide,
    Power,
    Sin,
    Cos,
}

impl LexemeKind {
    /// Returns true if the lexeme is a symbol or a number.
    pub fn is_value(&self) -> bool {
        matches!(self, LexemeKind::Var(_) | LexemeKind::Number(_))
    }

    /// Returns true if the lexeme is a function name.
    pub fn is_function(&self) -> bool {
        matches!(self, LexemeKind::Sin | LexemeKind::Cos)
    }

    /// Returns the binary operator this lexeme stands for, if any.
    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            LexemeKind::Plus => Some(BinaryOp::Add),
            LexemeKind::Minus => Some(BinaryOp::Sub),
            LexemeKind::Times => Some(BinaryOp::Mul),
            LexemeKind::Divide => Some(BinaryOp::Div),
            LexemeKind::Power => Some(BinaryOp::Pow),
            _ => None,
        }
    }
}

impl Display for LexemeKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LexemeKind::Var(symbol) => write!(f, "{}", symbol),
            LexemeKind::Number(num) => write!(f, "{}", format_fixed(num.value, num.digits)),
            LexemeKind::OpenParen => write!(f, "("),
            LexemeKind::CloseParen => write!(f, ")"),
            LexemeKind::Minus => write!(f, "-"),
            LexemeKind::Negative => write!(f, "unary -"),
            LexemeKind::Plus => write!(f, "+"),
            LexemeKind::Times => write!(f, "*"),
            LexemeKind::Divide => write!(f, "/"),
            LexemeKind::Power => write!(f, "^"),
            LexemeKind::Sin => write!(f, "sin"),
            LexemeKind::Cos => write!(f, "cos"),
        }
    }
}

/// A classified, located piece of the input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lexeme {
    pub kind: LexemeKind,

    /// The position of the lexeme, counting every implicit multiplication inserted before it as
    /// one extra character.
    pub offset: usize,

    /// The region of the source code that this lexeme originated from. For an implicit
    /// multiplication, this is the region of the lexeme that follows it.
    pub span: Range<usize>,

    /// True if this lexeme was inserted by the lexer rather than written in the input.
    pub implicit: bool,
}

/// The result of lexing: the lexemes up to the first error, and the error, if any.
#[derive(Debug)]
pub struct Lexed {
    pub lexemes: Vec<Lexeme>,
    pub error: Option<Error>,
}

impl Lexed {
    /// Returns the lexemes if lexing succeeded, or the error otherwise.
    pub fn into_result(self) -> Result<Vec<Lexeme>, Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.lexemes),
        }
    }
}

/// Returns an iterator over the raw token kinds produced by the scanner.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Reads a numeric literal.
fn number(slice: &str, span: Range<usize>) -> Result<NumLit, Error> {
    let mut parts = slice.splitn(3, '.');
    let _integer = parts.next();
    let fraction = parts.next();
    if parts.next().is_some() {
        return Err(Error::new(vec![span], MultipleDecimalPoints));
    }

    let value = slice.parse::<f32>()
        .map_err(|_| Error::new(vec![span], NotALeafExpression { leaf: slice.to_string() }))?;
    let digits = fraction.map_or(0, |fraction| fraction.len() as u32);
    Ok(NumLit { value, digits })
}

/// Reads a symbol, checking that the mode allows it.
fn symbol(symbol: Symbol, mode: LexMode, span: Range<usize>) -> Result<LexemeKind, Error> {
    if mode.allows(symbol) {
        Ok(LexemeKind::Var(symbol))
    } else {
        Err(Error::new(vec![span], VariableNotAllowed { variable: symbol.as_char(), mode }))
    }
}

/// Classifies the token the scanner is currently on.
fn classify(
    input: &str,
    lexer: &Lexer<TokenKind>,
    token: Result<TokenKind, ()>,
    mode: LexMode,
) -> Result<Option<LexemeKind>, Error> {
    let span = lexer.span();
    let kind = match token {
        Ok(TokenKind::Whitespace) => return Ok(None),
        Ok(TokenKind::Add) => LexemeKind::Plus,
        Ok(TokenKind::Sub) => {
            if input.as_bytes().get(span.end) == Some(&b' ') {
                LexemeKind::Minus
            } else {
                LexemeKind::Negative
            }
        },
        Ok(TokenKind::Mul) => LexemeKind::Times,
        Ok(TokenKind::Div) => LexemeKind::Divide,
        Ok(TokenKind::Exp) => LexemeKind::Power,
        Ok(TokenKind::OpenParen) => LexemeKind::OpenParen,
        Ok(TokenKind::CloseParen) => LexemeKind::CloseParen,
        Ok(TokenKind::Sin) => LexemeKind::Sin,
        Ok(TokenKind::Cos) => LexemeKind::Cos,
        Ok(TokenKind::T) => symbol(Symbol::T, mode, span)?,
        Ok(TokenKind::X) => symbol(Symbol::X, mode, span)?,
        Ok(TokenKind::Y) => symbol(Symbol::Y, mode, span)?,
        Ok(TokenKind::Z) => symbol(Symbol::Z, mode, span)?,
        Ok(TokenKind::Number) => LexemeKind::Number(number(lexer.slice(), span)?),
        Ok(TokenKind::UnsupportedOp) => {
            let operator = lexer.slice().chars().next().unwrap_or_default();
            return Err(Error::new(vec![span], UnknownOperator { operator }));
        },
        Ok(TokenKind::Symbol) | Err(()) => {
            let character = lexer.slice().chars().next().unwrap_or_default();
            return Err(Error::new(vec![span], IllegalCharacter { character }));
        },
    };
    Ok(Some(kind))
}

/// Inserts an implicit multiplication between every value and a following value or function.
fn insert_implicit_multiplication(
    lexemes: Vec<Lexeme>,
    trace: &mut dyn StepCollector<Event>,
) -> Vec<Lexeme> {
    let mut result: Vec<Lexeme> = Vec::with_capacity(lexemes.len());
    let mut shift = 0;

    for mut lexeme in lexemes {
        let juxtaposed = result.last().map_or(false, |prev| {
            prev.kind.is_value() && (lexeme.kind.is_value() || lexeme.kind.is_function())
        });

        if juxtaposed {
            // the inserted lexeme takes the place of the next one, which moves one to the right
            let offset = lexeme.offset + shift;
            trace.push(Event::ImplicitMultiplication { offset });
            result.push(Lexeme {
                kind: LexemeKind::Times,
                offset,
                span: lexeme.span.clone(),
                implicit: true,
            });
            shift += 1;
        }

        lexeme.offset += shift;
        result.push(lexeme);
    }

    result
}

/// Lexes the input, reporting the produced lexemes to the given trace.
///
/// Lexing stops at the first error. The lexemes read up to that point are still returned.
pub fn lex_with(input: &str, mode: LexMode, trace: &mut dyn StepCollector<Event>) -> Lexed {
    let mut lexer = tokenize(input);
    let mut lexemes = Vec::new();
    let mut error = None;

    while let Some(token) = lexer.next() {
        match classify(input, &lexer, token, mode) {
            Ok(Some(kind)) => {
                let span = lexer.span();
                lexemes.push(Lexeme { kind, offset: span.start, span, implicit: false });
            },
            Ok(None) => (),
            Err(err) => {
                error = Some(err);
                break;
            },
        }
    }

    let lexemes = insert_implicit_multiplication(lexemes, trace);
    for lexeme in &lexemes {
        trace.push(Event::Lexeme {
            kind: lexeme.kind,
            offset: lexeme.offset,
            implicit: lexeme.implicit,
        });
    }

    Lexed { lexemes, error }
}

/// Lexes the input.
///
/// ```
/// use vf_parser::tokenizer::{lex, LexMode};
///
/// let lexed = lex("2x", LexMode::MultiVariable).into_result().unwrap();
/// let kinds = lexed.iter().map(|lexeme| lexeme.kind.to_string()).collect::<Vec<_>>();
/// assert_eq!(kinds, ["2", "*", "x"]);
/// assert!(lexed[1].implicit);
/// ```
pub fn lex(input: &str, mode: LexMode) -> Lexed {
    lex_with(input, mode, &mut ())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the scanner to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    /// Lexes the input and returns the kinds, offsets and implicit flags.
    fn kinds(input: &str, mode: LexMode) -> Vec<(LexemeKind, usize, bool)> {
        lex(input, mode)
            .into_result()
            .unwrap()
            .into_iter()
            .map(|lexeme| (lexeme.kind, lexeme.offset, lexeme.implicit))
            .collect()
    }

    fn num(value: f32, digits: u32) -> LexemeKind {
        LexemeKind::Number(NumLit { value, digits })
    }

    #[test]
    fn raw_tokens() {
        compare_tokens(
            "3.25 * sin(x) - $",
            [
                (TokenKind::Number, "3.25"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Mul, "*"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sin, "sin"),
                (TokenKind::OpenParen, "("),
                (TokenKind::X, "x"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sub, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
            ],
        );
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(kinds("2x", LexMode::MultiVariable), vec![
            (num(2.0, 0), 0, false),
            (LexemeKind::Times, 1, true),
            (LexemeKind::Var(Symbol::X), 2, false),
        ]);
    }

    #[test]
    fn implicit_multiplication_shifts_offsets() {
        assert_eq!(kinds("xy sin(z)", LexMode::MultiVariable), vec![
            (LexemeKind::Var(Symbol::X), 0, false),
            (LexemeKind::Times, 1, true),
            (LexemeKind::Var(Symbol::Y), 2, false),
            (LexemeKind::Times, 4, true),
            (LexemeKind::Sin, 5, false),
            (LexemeKind::OpenParen, 8, false),
            (LexemeKind::Var(Symbol::Z), 9, false),
            (LexemeKind::CloseParen, 10, false),
        ]);
    }

    #[test]
    fn minus_or_negative() {
        assert_eq!(kinds("t - 1", LexMode::SingleVariable), vec![
            (LexemeKind::Var(Symbol::T), 0, false),
            (LexemeKind::Minus, 2, false),
            (num(1.0, 0), 4, false),
        ]);
        assert_eq!(kinds("t -1", LexMode::SingleVariable), vec![
            (LexemeKind::Var(Symbol::T), 0, false),
            (LexemeKind::Negative, 2, false),
            (num(1.0, 0), 3, false),
        ]);
        assert_eq!(kinds("-(t)", LexMode::SingleVariable)[0], (LexemeKind::Negative, 0, false));
    }

    #[test]
    fn number_digits() {
        assert_eq!(kinds("1.50", LexMode::NoVariables), vec![(num(1.5, 2), 0, false)]);
        assert_eq!(kinds("7.", LexMode::NoVariables), vec![(num(7.0, 0), 0, false)]);
    }

    #[test]
    fn multiple_decimal_points() {
        let lexed = lex("x + 1.2.3", LexMode::MultiVariable);
        assert_eq!(lexed.lexemes.len(), 2);
        let err = lexed.error.unwrap();
        assert!(err.is::<MultipleDecimalPoints>());
        assert_eq!(err.spans, vec![4..9]);
    }

    #[test]
    fn illegal_character_keeps_partial_result() {
        let lexed = lex("x + $", LexMode::MultiVariable);
        assert_eq!(lexed.lexemes.len(), 2);
        let err = lexed.error.unwrap();
        assert_eq!(err.downcast_ref::<IllegalCharacter>(), Some(&IllegalCharacter { character: '$' }));
        assert_eq!(err.spans, vec![4..5]);
    }

    #[test]
    fn leading_dot_is_illegal() {
        let err = lex(".5", LexMode::NoVariables).into_result().unwrap_err();
        assert_eq!(err.downcast_ref::<IllegalCharacter>(), Some(&IllegalCharacter { character: '.' }));
    }

    #[test]
    fn functions_need_exact_names() {
        let err = lex("sn(x)", LexMode::MultiVariable).into_result().unwrap_err();
        assert_eq!(err.downcast_ref::<IllegalCharacter>(), Some(&IllegalCharacter { character: 's' }));

        let err = lex("tan(x)", LexMode::MultiVariable).into_result().unwrap_err();
        assert!(err.is::<VariableNotAllowed>());
    }

    #[test]
    fn symbols_follow_the_mode() {
        let err = lex("x + t", LexMode::MultiVariable).into_result().unwrap_err();
        assert_eq!(
            err.downcast_ref::<VariableNotAllowed>(),
            Some(&VariableNotAllowed { variable: 't', mode: LexMode::MultiVariable }),
        );
        assert_eq!(err.spans, vec![4..5]);

        assert!(lex("y", LexMode::SingleVariable).into_result().is_err());
        assert!(lex("t", LexMode::NoVariables).into_result().is_err());
        assert!(lex("2 * 3", LexMode::NoVariables).into_result().is_ok());
    }

    #[test]
    fn unsupported_operator() {
        let err = lex("x % 2", LexMode::MultiVariable).into_result().unwrap_err();
        assert_eq!(err.downcast_ref::<UnknownOperator>(), Some(&UnknownOperator { operator: '%' }));
    }

    #[test]
    fn trace_lists_lexemes() {
        let mut trace = Vec::new();
        lex_with("2x", LexMode::MultiVariable, &mut trace).into_result().unwrap();
        assert_eq!(trace, vec![
            Event::ImplicitMultiplication { offset: 1 },
            Event::Lexeme { kind: num(2.0, 0), offset: 0, implicit: false },
            Event::Lexeme { kind: LexemeKind::Times, offset: 1, implicit: true },
            Event::Lexeme { kind: LexemeKind::Var(Symbol::X), offset: 2, implicit: false },
        ]);
    }
}
