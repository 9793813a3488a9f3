//! The character-based parser.
//!
//! This parser works on the raw text instead of [`Lexeme`](crate::tokenizer::Lexeme)s, in two
//! passes: the first records the position and [`Precedence`] of every operator while checking the
//! parentheses, and the second reads the leaves between them. The operators are then built with
//! the same [construction order](super::precedence::construction_order) as the token parser.
//!
//! It supports a subset of the expression language: numbers, the symbols allowed by the
//! [`LexMode`], parentheses, and the five binary operators. There is no negation (`-` is always
//! binary), no implicit multiplication, and no functions. Spaces between the characters of a
//! leaf are dropped, so `1 2` reads as `12` and `x y` as the leaf `xy`.

use crate::{error::{kind, Error}, tokenizer::LexMode, trace::Event};
use super::precedence::{assemble, construction_order, BinaryOp, Operator, OperandPool, Precedence};
use std::ops::Range;
use vf_compute::{Expr, Markup, StepCollector, Symbol};

/// Characters that are operators in other calculators.
const UNSUPPORTED_OPERATORS: &str = "%!=<>&|";

/// Returns true if the character can be part of a leaf.
fn is_leaf_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.'
}

/// Returns the region of the leaf or operator starting at the given byte offset.
fn span_at(input: &str, offset: usize) -> Range<usize> {
    let rest = &input[offset..];
    if !rest.starts_with(is_leaf_char) {
        return offset..offset + rest.chars().next().map_or(0, char::len_utf8);
    }

    let run = rest.find(|c: char| !is_leaf_char(c) && c != ' ').unwrap_or(rest.len());
    offset..offset + rest[..run].trim_end().len()
}

/// Reads the operators, checking that the parentheses are balanced and that every character is
/// allowed.
fn scan_operators(input: &str) -> Result<Vec<Operator>, Error> {
    let mut operators = Vec::new();
    let mut open = Vec::new();

    for (offset, c) in input.char_indices() {
        let span = offset..offset + c.len_utf8();
        match c {
            '(' => open.push(span),
            ')' => {
                if open.pop().is_none() {
                    return Err(Error::new(vec![span], kind::UnbalancedParentheses { opening: false }));
                }
            },
            ' ' => (),
            _ if is_leaf_char(c) => (),
            _ => {
                if let Some(op) = BinaryOp::from_char(c) {
                    operators.push(Operator {
                        index: offset,
                        op,
                        precedence: Precedence::new(open.len(), op.rank()),
                    });
                } else if UNSUPPORTED_OPERATORS.contains(c) {
                    return Err(Error::new(vec![span], kind::UnknownOperator { operator: c }));
                } else {
                    return Err(Error::new(vec![span], kind::IllegalCharacter { character: c }));
                }
            },
        }
    }

    match open.pop() {
        Some(span) => Err(Error::new(vec![span], kind::UnbalancedParentheses { opening: true })),
        None => Ok(operators),
    }
}

/// Reads a leaf: a single symbol, or a number.
fn leaf(text: &str, span: Range<usize>, mode: LexMode) -> Result<Expr, Error> {
    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Ok(symbol) = Symbol::try_from(c) {
            if !mode.allows(symbol) {
                return Err(Error::new(vec![span], kind::VariableNotAllowed { variable: c, mode }));
            }
            return Ok(Expr::var(symbol));
        }
    }

    let numeric = text.starts_with(|c: char| c.is_ascii_digit())
        && text.chars().all(|c| c.is_ascii_digit() || c == '.');
    if !numeric {
        return Err(Error::new(vec![span], kind::NotALeafExpression { leaf: text.to_string() }));
    }

    if text.matches('.').count() > 1 {
        return Err(Error::new(vec![span], kind::MultipleDecimalPoints));
    }

    let value = text.parse::<f32>()
        .map_err(|_| Error::new(vec![span.clone()], kind::NotALeafExpression { leaf: text.to_string() }))?;
    let digits = text.split_once('.').map_or(0, |(_, fraction)| fraction.len() as u32);
    Ok(Expr::value(value, digits))
}

/// Reads every maximal run of leaf characters and spaces, with the spaces removed.
fn scan_leaves(input: &str, mode: LexMode) -> Result<OperandPool, Error> {
    let mut pool = OperandPool::new();
    let mut run: Option<Range<usize>> = None;

    for (offset, c) in input.char_indices().chain(std::iter::once((input.len(), '\0'))) {
        if is_leaf_char(c) {
            let end = offset + c.len_utf8();
            run = Some(run.map_or(offset..end, |run| run.start..end));
        } else if c != ' ' {
            if let Some(span) = run.take() {
                let text = input[span.clone()].replace(' ', "");
                pool.insert(span.start, leaf(&text, span, mode)?);
            }
        }
    }

    Ok(pool)
}

/// Parses an expression, reporting parsing events to the given trace.
pub fn parse_with(
    input: &str,
    mode: LexMode,
    trace: &mut dyn StepCollector<Event>,
) -> Result<Expr, Error> {
    let mut operators = scan_operators(input)?;
    let pool = scan_leaves(input, mode)?;

    trace.push(Event::Leaves {
        start: 0,
        end: input.len(),
        leaves: pool.iter()
            .map(|(index, leaf)| (index, leaf.display(Markup::Plain).to_string()))
            .collect(),
    });

    let span_of = |offset: usize| span_at(input, offset);
    let empty = || Error::new(vec![0..input.len()], kind::EmptyInput);

    if operators.is_empty() {
        return pool.into_single(span_of, empty);
    }

    construction_order(&mut operators);
    trace.push(Event::Operators {
        start: 0,
        end: input.len(),
        order: operators.iter()
            .map(|operator| (operator.index, operator.op, operator.precedence))
            .collect(),
    });

    assemble(pool, &operators, span_of, empty, trace)
}

/// Parses an expression.
pub fn parse(input: &str, mode: LexMode) -> Result<Expr, Error> {
    parse_with(input, mode, &mut ())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn plain(input: &str) -> String {
        parse(input, LexMode::MultiVariable).unwrap().display(Markup::Plain).to_string()
    }

    /// Expressions both parsers must read identically.
    const SHARED: &[&str] = &[
        "2 + 3 * x",
        "(x + y) * z",
        "x^2 - y / 4",
        "x - y - z",
        "x / y * z",
        "1.5 * (x - (y + 2))^2",
        "((x))",
        "0.25",
        "2 * (x + (y - z)) / (x^y)",
        "x^y^z",
    ];

    /// Inputs both parsers must reject with the same kind of error.
    const SHARED_ERRORS: &[&str] = &[
        "",
        "(x + 1",
        "x + 1)",
        "x +",
        "* x",
        "(x)(y)",
        "x % 2",
        "x $ 2",
    ];

    #[test]
    fn conformance() {
        for input in SHARED {
            let token = crate::parse(input, LexMode::MultiVariable).unwrap();
            let direct = parse(input, LexMode::MultiVariable).unwrap();
            assert_eq!(token.to_string(), direct.to_string(), "input: {}", input);
        }
    }

    #[test]
    fn conformance_errors() {
        for input in SHARED_ERRORS {
            let token = crate::parse(input, LexMode::MultiVariable).unwrap_err();
            let direct = parse(input, LexMode::MultiVariable).unwrap_err();
            assert_eq!(
                format!("{:?}", token.kind),
                format!("{:?}", direct.kind),
                "input: {}",
                input,
            );
            assert_eq!(token.spans, direct.spans, "input: {}", input);
        }
    }

    #[test]
    fn structure() {
        assert_eq!(plain("2 + 3 * x"), "2 + (3 * x)");
        assert_eq!(plain("x - y - z"), "x - (y - z)");
        assert_eq!(plain("(x - y) - z"), "(x - y) - z");
        assert_eq!(plain("12.50"), "12.50");
    }

    #[test]
    fn spaces_inside_leaves_are_dropped() {
        assert_eq!(plain("1 2 + x"), "12 + x");
        assert_eq!(plain("x * 1 2.5 "), "x * 12.5");

        let err = parse("x y", LexMode::MultiVariable).unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::NotALeafExpression>(),
            Some(&kind::NotALeafExpression { leaf: "xy".to_string() }),
        );
        assert_eq!(err.spans, vec![0..3]);

        let err = parse("(x)(1 2)", LexMode::MultiVariable).unwrap_err();
        assert!(err.is::<kind::MissingOperator>());
        assert_eq!(err.spans, vec![4..7]);
    }

    #[test]
    fn leaves_must_be_symbols_or_numbers() {
        let err = parse("xy", LexMode::MultiVariable).unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::NotALeafExpression>(),
            Some(&kind::NotALeafExpression { leaf: "xy".to_string() }),
        );
        assert_eq!(err.spans, vec![0..2]);

        // the token parser multiplies them instead
        assert!(crate::parse("xy", LexMode::MultiVariable).is_ok());

        let err = parse("sin(x)", LexMode::MultiVariable).unwrap_err();
        assert!(err.is::<kind::NotALeafExpression>());
    }

    #[test]
    fn multiple_decimal_points() {
        let err = parse("2 * 1.2.3", LexMode::MultiVariable).unwrap_err();
        assert!(err.is::<kind::MultipleDecimalPoints>());
        assert_eq!(err.spans, vec![4..9]);
    }

    #[test]
    fn minus_is_always_binary() {
        let err = parse("-x", LexMode::MultiVariable).unwrap_err();
        assert!(err.is::<kind::MissingLeftOperand>());
        assert_eq!(plain("x -y"), "x - y");
    }

    #[test]
    fn mode() {
        assert!(parse("t * 2", LexMode::SingleVariable).is_ok());
        let err = parse("t * x", LexMode::SingleVariable).unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::VariableNotAllowed>(),
            Some(&kind::VariableNotAllowed { variable: 'x', mode: LexMode::SingleVariable }),
        );
        assert_eq!(err.spans, vec![4..5]);
    }

    #[test]
    fn trace() {
        let mut trace = Vec::new();
        parse_with("x * (y + 1)", LexMode::MultiVariable, &mut trace).unwrap();
        let lines = trace.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(lines, vec![
            "leaves in 0..11: [0] x [5] y [9] 1",
            "operators in 0..11: [7] + (1.0) [2] * (0.1)",
            "built [7] y + 1",
            "built [2] x * (y + 1)",
        ]);
    }
}
