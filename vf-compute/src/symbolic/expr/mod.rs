//! The expression tree.
//!
//! An [`Expr`] is a scalar function of up to four symbols: the curve parameter `t`, and the
//! spatial coordinates `x`, `y` and `z`. Every leaf is either a [`Symbol`] or a single-precision
//! constant that remembers how many decimal digits it should be displayed with.
//!
//! # Display
//!
//! Expressions can be displayed in two forms, chosen with [`Markup`]. The [`Display`]
//! implementation of [`Expr`] uses [`Markup::Html`], which italicizes symbols and writes powers
//! as superscripts, for rich text consumers. [`Expr::display`] selects the form explicitly:
//!
//! ```
//! use vf_compute::{Expr, Markup, Symbol};
//!
//! let expr = Expr::pow(
//!     Expr::add(Expr::var(Symbol::X), Expr::value(1.0, 0)),
//!     Expr::value(2.0, 0),
//! );
//! assert_eq!(expr.to_string(), "(<i>x</i> + 1)<sup>2</sup>");
//! assert_eq!(expr.display(Markup::Plain).to_string(), "(x + 1)^2");
//! ```
//!
//! Sums, differences, products and quotients parenthesize each operand that is itself a sum,
//! difference, product or quotient. Nothing else is ever parenthesized, except that the plain
//! form also wraps negations and powers that appear inside a power, which would otherwise be
//! ambiguous in `^` notation.

use crate::numerical::fmt::format_fixed;
use std::{
    fmt::{Display, Formatter, Result},
    rc::Rc,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the four symbols an expression can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Symbol {
    /// The parameter of a parametric curve.
    T,
    X,
    Y,
    Z,
}

impl Symbol {
    /// All symbols, in display order.
    pub const ALL: [Symbol; 4] = [Symbol::T, Symbol::X, Symbol::Y, Symbol::Z];

    /// Returns the letter used to write this symbol.
    pub fn as_char(self) -> char {
        match self {
            Symbol::T => 't',
            Symbol::X => 'x',
            Symbol::Y => 'y',
            Symbol::Z => 'z',
        }
    }
}

impl TryFrom<char> for Symbol {
    type Error = char;

    fn try_from(c: char) -> std::result::Result<Self, Self::Error> {
        match c {
            't' => Ok(Symbol::T),
            'x' => Ok(Symbol::X),
            'y' => Ok(Symbol::Y),
            'z' => Ok(Symbol::Z),
            other => Err(other),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", self.as_char())
    }
}

/// The markup used when displaying an [`Expr`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Rich text: symbols are wrapped in `<i>` tags and exponents in `<sup>` tags.
    #[default]
    Html,

    /// Plain text, with `^` for powers. The output can be parsed back in the same mode.
    Plain,
}

/// An expression tree node.
///
/// Nodes are immutable. Children are reference counted so that derived trees can share
/// sub-trees with the tree they were derived from; see the [module-level
/// documentation](super) for details.
///
/// [`PartialEq`] is structural: two expressions are equal if they have the same shape and the
/// same leaves (including the display digits of constants).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A constant, displayed with `digits` digits after the decimal point.
    Value {
        value: f32,
        digits: u32,
    },

    /// One of the symbols `t`, `x`, `y`, `z`.
    Var(Symbol),

    /// Unary negation, `-a`.
    Neg(Rc<Expr>),

    /// `a + b`
    Add(Rc<Expr>, Rc<Expr>),

    /// `a - b`
    Sub(Rc<Expr>, Rc<Expr>),

    /// `a * b`
    Mul(Rc<Expr>, Rc<Expr>),

    /// `a / b`
    Div(Rc<Expr>, Rc<Expr>),

    /// `a ^ b`
    Pow(Rc<Expr>, Rc<Expr>),

    /// `sin(a)`
    Sin(Rc<Expr>),

    /// `cos(a)`
    Cos(Rc<Expr>),

    /// The natural logarithm, `ln(a)`. The parsers never produce this node; it only appears in
    /// the derivative of a power.
    Log(Rc<Expr>),
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.fmt_markup(f, Markup::Html)
    }
}

impl Expr {
    /// Creates a constant.
    pub fn value(value: f32, digits: u32) -> Self {
        Self::Value { value, digits }
    }

    /// Creates a symbol leaf.
    pub fn var(symbol: Symbol) -> Self {
        Self::Var(symbol)
    }

    pub fn neg(child: impl Into<Rc<Expr>>) -> Self {
        Self::Neg(child.into())
    }

    pub fn add(lhs: impl Into<Rc<Expr>>, rhs: impl Into<Rc<Expr>>) -> Self {
        Self::Add(lhs.into(), rhs.into())
    }

    pub fn sub(lhs: impl Into<Rc<Expr>>, rhs: impl Into<Rc<Expr>>) -> Self {
        Self::Sub(lhs.into(), rhs.into())
    }

    pub fn mul(lhs: impl Into<Rc<Expr>>, rhs: impl Into<Rc<Expr>>) -> Self {
        Self::Mul(lhs.into(), rhs.into())
    }

    pub fn div(lhs: impl Into<Rc<Expr>>, rhs: impl Into<Rc<Expr>>) -> Self {
        Self::Div(lhs.into(), rhs.into())
    }

    pub fn pow(base: impl Into<Rc<Expr>>, exponent: impl Into<Rc<Expr>>) -> Self {
        Self::Pow(base.into(), exponent.into())
    }

    pub fn sin(child: impl Into<Rc<Expr>>) -> Self {
        Self::Sin(child.into())
    }

    pub fn cos(child: impl Into<Rc<Expr>>) -> Self {
        Self::Cos(child.into())
    }

    pub fn ln(child: impl Into<Rc<Expr>>) -> Self {
        Self::Log(child.into())
    }

    /// Returns true if this expression is a [`Expr::Value`].
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value { .. })
    }

    /// Returns the constant this expression stands for, if it is a constant or the negation of
    /// one (recursively).
    pub fn numeric_value(&self) -> Option<f32> {
        match self {
            Self::Value { value, .. } => Some(*value),
            Self::Neg(child) => child.numeric_value().map(|value| -value),
            _ => None,
        }
    }

    /// Returns the value of this expression truncated toward zero, if it is a finite
    /// [`Expr::Value`].
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Value { value, .. } if value.is_finite() => Some(value.trunc() as i64),
            _ => None,
        }
    }

    /// Returns true if this expression is a constant that truncates to `0`, such as `0` or `0.4`.
    ///
    /// This is the same test constant folding applies to denominators.
    pub fn is_zero(&self) -> bool {
        self.as_integer() == Some(0)
    }

    /// Returns true if this expression is a constant that truncates to `1`, such as `1` or `1.5`.
    pub fn is_one(&self) -> bool {
        self.as_integer() == Some(1)
    }

    /// Returns true if this expression parenthesizes itself when it is the operand of a sum,
    /// difference, product, quotient, or power.
    pub fn include_parens(&self) -> bool {
        matches!(self, Self::Add(..) | Self::Sub(..) | Self::Mul(..) | Self::Div(..))
    }

    /// Returns true if this expression depends on the given symbol.
    pub fn contains(&self, symbol: Symbol) -> bool {
        match self {
            Self::Value { .. } => false,
            Self::Var(s) => *s == symbol,
            Self::Neg(child) | Self::Sin(child) | Self::Cos(child) | Self::Log(child) => {
                child.contains(symbol)
            },
            Self::Add(lhs, rhs)
            | Self::Sub(lhs, rhs)
            | Self::Mul(lhs, rhs)
            | Self::Div(lhs, rhs)
            | Self::Pow(lhs, rhs) => lhs.contains(symbol) || rhs.contains(symbol),
        }
    }

    /// Returns the number of nodes in the tree. Shared sub-trees are counted once per slot.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Value { .. } | Self::Var(_) => 1,
            Self::Neg(child) | Self::Sin(child) | Self::Cos(child) | Self::Log(child) => {
                1 + child.node_count()
            },
            Self::Add(lhs, rhs)
            | Self::Sub(lhs, rhs)
            | Self::Mul(lhs, rhs)
            | Self::Div(lhs, rhs)
            | Self::Pow(lhs, rhs) => 1 + lhs.node_count() + rhs.node_count(),
        }
    }

    /// Wraps the expression in an [`ExprFormatter`] using the given markup.
    pub fn display(&self, markup: Markup) -> ExprFormatter<'_> {
        ExprFormatter { expr: self, markup }
    }

    /// Formats the expression, parenthesized if [`Expr::include_parens`] is true.
    fn fmt_wrapped(&self, f: &mut Formatter, markup: Markup) -> Result {
        if self.include_parens() {
            write!(f, "(")?;
            self.fmt_markup(f, markup)?;
            write!(f, ")")
        } else {
            self.fmt_markup(f, markup)
        }
    }

    /// Formats an operand of a power.
    fn fmt_pow_operand(&self, f: &mut Formatter, markup: Markup) -> Result {
        match (markup, self) {
            (Markup::Plain, Self::Neg(_) | Self::Pow(..)) => {
                write!(f, "(")?;
                self.fmt_markup(f, markup)?;
                write!(f, ")")
            },
            _ => self.fmt_wrapped(f, markup),
        }
    }

    fn fmt_binary(
        f: &mut Formatter,
        markup: Markup,
        lhs: &Expr,
        op: &str,
        rhs: &Expr,
    ) -> Result {
        lhs.fmt_wrapped(f, markup)?;
        write!(f, " {} ", op)?;
        rhs.fmt_wrapped(f, markup)
    }

    fn fmt_call(f: &mut Formatter, markup: Markup, name: &str, arg: &Expr) -> Result {
        write!(f, "{}(", name)?;
        arg.fmt_markup(f, markup)?;
        write!(f, ")")
    }

    fn fmt_markup(&self, f: &mut Formatter, markup: Markup) -> Result {
        match self {
            Self::Value { value, digits } => write!(f, "{}", format_fixed(*value, *digits)),
            Self::Var(symbol) => match markup {
                Markup::Html => write!(f, "<i>{}</i>", symbol),
                Markup::Plain => write!(f, "{}", symbol),
            },
            Self::Neg(child) => {
                write!(f, "-")?;
                child.fmt_wrapped(f, markup)
            },
            Self::Add(lhs, rhs) => Self::fmt_binary(f, markup, lhs, "+", rhs),
            Self::Sub(lhs, rhs) => Self::fmt_binary(f, markup, lhs, "-", rhs),
            Self::Mul(lhs, rhs) => Self::fmt_binary(f, markup, lhs, "*", rhs),
            Self::Div(lhs, rhs) => Self::fmt_binary(f, markup, lhs, "/", rhs),
            Self::Pow(base, exponent) => {
                base.fmt_pow_operand(f, markup)?;
                match markup {
                    Markup::Html => {
                        write!(f, "<sup>")?;
                        exponent.fmt_pow_operand(f, markup)?;
                        write!(f, "</sup>")
                    },
                    Markup::Plain => {
                        write!(f, "^")?;
                        exponent.fmt_pow_operand(f, markup)
                    },
                }
            },
            Self::Sin(child) => Self::fmt_call(f, markup, "sin", child),
            Self::Cos(child) => Self::fmt_call(f, markup, "cos", child),
            Self::Log(child) => Self::fmt_call(f, markup, "ln", child),
        }
    }
}

/// A wrapper type that implements [`Display`] for an [`Expr`] in a chosen [`Markup`].
#[derive(Debug, Clone, Copy)]
pub struct ExprFormatter<'a> {
    expr: &'a Expr,
    markup: Markup,
}

impl Display for ExprFormatter<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.expr.fmt_markup(f, self.markup)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var(Symbol::X)
    }

    fn y() -> Expr {
        Expr::var(Symbol::Y)
    }

    #[test]
    fn symbol_from_char() {
        assert_eq!(Symbol::try_from('z'), Ok(Symbol::Z));
        assert_eq!(Symbol::try_from('w'), Err('w'));
        for symbol in Symbol::ALL {
            assert_eq!(Symbol::try_from(symbol.as_char()), Ok(symbol));
        }
    }

    #[test]
    fn fmt_values() {
        assert_eq!(Expr::value(2.0, 0).to_string(), "2");
        assert_eq!(Expr::value(1.5, 2).to_string(), "1.50");
        assert_eq!(Expr::value(0.75, 1).to_string(), "0.8");
    }

    #[test]
    fn fmt_html() {
        let expr = Expr::add(
            Expr::mul(Expr::value(2.0, 0), x()),
            Expr::sin(Expr::sub(y(), Expr::value(1.0, 0))),
        );
        assert_eq!(expr.to_string(), "(2 * <i>x</i>) + sin(<i>y</i> - 1)");
    }

    #[test]
    fn fmt_plain() {
        let expr = Expr::div(
            Expr::neg(Expr::add(x(), y())),
            Expr::pow(x(), Expr::value(3.0, 0)),
        );
        assert_eq!(expr.display(Markup::Plain).to_string(), "-(x + y) / x^3");
    }

    #[test]
    fn fmt_plain_nested_powers() {
        let expr = Expr::pow(Expr::pow(x(), y()), Expr::neg(y()));
        assert_eq!(expr.display(Markup::Plain).to_string(), "(x^y)^(-y)");
        assert_eq!(expr.to_string(), "<i>x</i><sup><i>y</i></sup><sup>-<i>y</i></sup>");
    }

    #[test]
    fn fmt_log() {
        assert_eq!(Expr::ln(x()).display(Markup::Plain).to_string(), "ln(x)");
    }

    #[test]
    fn integers_truncate() {
        assert!(Expr::value(0.0, 0).is_zero());
        assert!(Expr::value(1.0, 2).is_one());
        assert!(Expr::value(0.4, 1).is_zero());
        assert!(Expr::value(-0.9, 1).is_zero());
        assert!(Expr::value(1.5, 1).is_one());
        assert!(!Expr::value(2.0, 0).is_one());
        assert!(!Expr::neg(Expr::value(0.0, 0)).is_zero());
        assert_eq!(Expr::value(-3.7, 1).as_integer(), Some(-3));
        assert_eq!(Expr::value(f32::NAN, 0).as_integer(), None);
        assert!(!Expr::value(f32::INFINITY, 0).is_one());
    }

    #[test]
    fn numeric_value_through_negation() {
        let expr = Expr::neg(Expr::neg(Expr::value(2.5, 1)));
        assert_eq!(expr.numeric_value(), Some(2.5));
        assert_eq!(Expr::neg(x()).numeric_value(), None);
    }

    #[test]
    fn contains_symbol() {
        let expr = Expr::mul(x(), Expr::cos(y()));
        assert!(expr.contains(Symbol::Y));
        assert!(!expr.contains(Symbol::Z));
        assert_eq!(expr.node_count(), 4);
    }
}
