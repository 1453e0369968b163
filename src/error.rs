//! Error types for continued fraction arithmetic and parsing.

use thiserror::Error;

/// Errors raised by the homographic and bihomographic transforms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// The divisor is zero, or the transform diverged to an infinite value.
    #[error("division by zero")]
    DivisionByZero,

    /// An intermediate value, or a coefficient of an operand, doesn't fit in the integer type.
    #[error("integer overflow")]
    Overflow,

    /// The transform consumed its whole iteration budget without finishing.
    #[error("expansion did not terminate after {iterations} iterations")]
    NonTerminating {
        /// Number of input substitutions performed before giving up
        iterations: usize,
    },
}

/// Errors raised when parsing the bracketed text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseContFracError {
    #[error("continued fraction must be enclosed in `[` and `]`")]
    MissingBrackets,

    #[error("invalid coefficient `{0}`")]
    InvalidCoefficient(String),

    /// The coefficient parses, but can't be used in signed arithmetic
    #[error("coefficient `{0}` is out of range")]
    CoefficientOutOfRange(String),
}
