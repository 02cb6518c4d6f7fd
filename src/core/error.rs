// src/core/error.rs

use std::fmt;

/// Errors surfaced by the arithmetic core and the number-theory layer.
///
/// None of these are retried or recovered internally; every detected
/// precondition violation is handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    /// Decimal text with a character outside an optional leading sign and `0-9`.
    MalformedInput { input: String, position: usize },

    /// A divide or modulus operation with a zero divisor.
    DivisionByZero,

    /// Sampling from `[lo, hi]` with `lo > hi`, or a primality witness range that is empty.
    InvalidRange { lo: String, hi: String },

    /// A value does not fit the requested native integer type.
    Overflow,

    /// The safe-prime search was cancelled through its token.
    SearchCancelled { attempts: u64 },

    /// The safe-prime search hit its attempt cap without a result.
    SearchExhausted { attempts: u64 },

    /// A parameter outside its documented domain (negative exponent, bad modulus, ...).
    InvalidParameter(String),
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticError::MalformedInput { input, position } => {
                write!(f, "malformed decimal input {:?} at byte {}", input, position)
            }
            ArithmeticError::DivisionByZero => write!(f, "division by zero"),
            ArithmeticError::InvalidRange { lo, hi } => {
                write!(f, "invalid range: lower bound {} exceeds upper bound {}", lo, hi)
            }
            ArithmeticError::Overflow => write!(f, "value does not fit the target integer type"),
            ArithmeticError::SearchCancelled { attempts } => {
                write!(f, "prime search cancelled after {} attempts", attempts)
            }
            ArithmeticError::SearchExhausted { attempts } => {
                write!(f, "prime search gave up after {} attempts", attempts)
            }
            ArithmeticError::InvalidParameter(message) => write!(f, "invalid parameter: {}", message),
        }
    }
}

impl std::error::Error for ArithmeticError {}

pub type Result<T> = std::result::Result<T, ArithmeticError>;
