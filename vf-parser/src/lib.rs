//! Lexer and parsers that turn text such as `x sin(y) - 2z^2` into [`vf_compute::Expr`] trees.
//!
//! ```
//! use vf_parser::{parse, LexMode};
//!
//! // single-variable expressions are written in terms of `t`
//! assert!(parse("2 + 3 * x", LexMode::SingleVariable).is_err());
//!
//! let expr = parse("2 + 3 * t", LexMode::SingleVariable).unwrap();
//! assert_eq!(expr.eval_t(5.0), 17.0);
//! ```
//!
//! Two parsers are provided. [`parser::Parser`] works on the lexemes produced by [`tokenizer`]
//! and is the one used by [`parse`]; [`parser::direct`] works on the raw characters and supports
//! a smaller language (no functions, no unary minus, no implicit multiplication). Both construct
//! trees with the precedence scheme in [`parser::precedence`]. [`ParserKind`] selects between
//! them at runtime.
//!
//! All errors are [`vf_error::Error`]s whose kind is one of the types in [`error::kind`].

pub mod error;
pub mod parser;
pub mod tokenizer;
pub mod trace;

pub use error::Error;
pub use parser::{parse, parse_with, parse_with_trace, ParserKind};
pub use tokenizer::{lex, LexMode};
