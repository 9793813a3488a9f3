//! Numeric evaluation of expressions and formatting of numbers for display.

pub mod eval;
pub mod fmt;
