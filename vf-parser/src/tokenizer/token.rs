use logos::Logos;

/// The different kinds of raw tokens that can be produced by the scanner.
///
/// These are turned into [`Lexeme`](super::Lexeme)s by [`lex`](super::lex), which also
/// checks numbers and symbols, and decides whether a `-` is a subtraction or a negation.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r" +")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    Exp,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("sin")]
    Sin,

    #[token("cos")]
    Cos,

    #[token("t")]
    T,

    #[token("x")]
    X,

    #[token("y")]
    Y,

    #[token("z")]
    Z,

    /// A digit followed by any digits or decimal points. The number of decimal points is checked
    /// afterwards.
    #[regex(r"[0-9][0-9.]*")]
    Number,

    /// Operators of other calculators that are not supported here.
    #[regex(r"[%!=<>&|]")]
    UnsupportedOp,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }
}
