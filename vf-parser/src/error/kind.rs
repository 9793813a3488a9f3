use ariadne::Fmt;
use crate::tokenizer::LexMode;
use vf_attrs::ErrorKind;
use vf_error::EXPR;

/// There was nothing to parse: the input, or a parenthesized group, was empty.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "nothing to parse",
    labels = [format!("I expected to see an {} here", "expression".fg(EXPR))],
)]
pub struct EmptyInput;

/// A parenthesis has no partner.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unbalanced parentheses",
    labels = [if self.opening {
        "this parenthesis is never closed"
    } else {
        "this parenthesis closes nothing"
    }],
    help = if self.opening {
        format!("add a closing parenthesis {} somewhere after this", "`)`".fg(EXPR))
    } else {
        format!("add an opening parenthesis {} somewhere before this", "`(`".fg(EXPR))
    },
)]
pub struct UnbalancedParentheses {
    /// The unmatched parenthesis is an opening one. (Otherwise, it is a closing one.)
    pub opening: bool,
}

/// A character that is not part of any token.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("illegal character `{}`", self.character),
    labels = ["here"],
    help = format!(
        "expressions may only contain numbers, the symbols {}, {}, {}, {}, parentheses, {} and {}",
        "t".fg(EXPR),
        "x".fg(EXPR),
        "y".fg(EXPR),
        "z".fg(EXPR),
        "+ - * / ^".fg(EXPR),
        "sin / cos".fg(EXPR),
    ),
)]
pub struct IllegalCharacter {
    /// The offending character.
    pub character: char,
}

/// An operator that looks like one but is not supported.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown operator `{}`", self.operator),
    labels = ["this operator"],
    help = format!("the supported operators are {}", "+ - * / ^".fg(EXPR)),
)]
pub struct UnknownOperator {
    /// The operator that was found.
    pub operator: char,
}

/// A binary operator has nothing to its left.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing left operand",
    labels = [format!("I expected to see an {} to the left of this `{}`", "expression".fg(EXPR), self.operator)],
)]
pub struct MissingLeftOperand {
    /// The operator missing an operand.
    pub operator: char,
}

/// An operator has nothing to its right.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing right operand",
    labels = [format!("I expected to see an {} to the right of this `{}`", "expression".fg(EXPR), self.operator)],
    help = if self.operator == '-' {
        "a `-` directly followed by a space is a subtraction; remove the space for a negation"
    } else {
        "remove the operator, or add an operand after it"
    },
)]
pub struct MissingRightOperand {
    /// The operator missing an operand.
    pub operator: char,
}

/// An input without operators that is neither a symbol nor a number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a symbol or a number", self.leaf),
    labels = ["this"],
    help = format!("separate values with an operator, such as {}", "*".fg(EXPR)),
)]
pub struct NotALeafExpression {
    /// The text that could not be read as a leaf.
    pub leaf: String,
}

/// A number with more than one decimal point.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "a number cannot contain more than one decimal point",
    labels = ["this number"],
)]
pub struct MultipleDecimalPoints;

/// A symbol that may not be used in the current mode.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the symbol `{}` cannot be used in {} expressions", self.variable, self.mode),
    labels = ["this symbol"],
    help = match self.mode {
        LexMode::NoVariables => "this expression must be a constant".to_string(),
        LexMode::SingleVariable => format!("use {} as the variable", "t".fg(EXPR)),
        LexMode::MultiVariable => format!("use {}, {} and {} as the variables", "x".fg(EXPR), "y".fg(EXPR), "z".fg(EXPR)),
    },
)]
pub struct VariableNotAllowed {
    /// The symbol that was used.
    pub variable: char,

    /// The mode that rejected it.
    pub mode: LexMode,
}

/// A function name not followed by a parenthesized argument.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument to `{}`", self.function),
    labels = ["this function"],
    help = format!("write the argument in parentheses, such as {}", format!("{}(x)", self.function).fg(EXPR)),
)]
pub struct MissingFunctionArgument {
    /// The function name.
    pub function: &'static str,
}

/// Two operands with no operator between them.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operator",
    labels = ["I could not connect this to the rest of the expression"],
    help = format!("add an operator, such as {}, before it", "*".fg(EXPR)),
)]
pub struct MissingOperator;
