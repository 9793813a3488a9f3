/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `2 + 3 = 5`
    /// `2 - 3 = -1`
    /// `2 * 3 = 6`
    /// `3 / 2 = 1.5`
    FoldConstants,

    /// `a / 0 = 1000000`, for a constant `a`
    ///
    /// Also applies to denominators that truncate to zero, such as `0.5`.
    DivideByZeroConstant,

    /// `0+a = a`
    /// `a+0 = a`
    AddZero,

    /// `a-0 = a`
    SubtractZero,

    /// `0-a = -a`
    ZeroMinus,

    /// `a-(-b) = a+b`
    SubtractNegation,

    /// `-(-a) = a`
    DoubleNegation,

    /// `-(2) = -2`
    NegateConstant,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// `1*a = a`
    /// `a*1 = a`
    MultiplyOne,

    /// `a/1 = a`
    DivideOne,

    /// `0/a = 0`
    DivideZero,
}

impl Step {
    /// Returns the rewrite this step performs, as written in the documentation of each variant.
    pub fn rule(&self) -> &'static str {
        match self {
            Step::FoldConstants => "c1 op c2 = c",
            Step::DivideByZeroConstant => "c/0 = 1000000",
            Step::AddZero => "0+a = a",
            Step::SubtractZero => "a-0 = a",
            Step::ZeroMinus => "0-a = -a",
            Step::SubtractNegation => "a-(-b) = a+b",
            Step::DoubleNegation => "-(-a) = a",
            Step::NegateConstant => "-(c) = -c",
            Step::MultiplyZero => "0*a = 0",
            Step::MultiplyOne => "1*a = a",
            Step::DivideOne => "a/1 = a",
            Step::DivideZero => "0/a = 0",
        }
    }
}
