//! Runtime errors.

use thiserror::Error;

/// Runtime result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while a program runs. All are fatal to the run; the
/// language has no in-program exception handling.
#[derive(Debug, Error)]
pub enum Error {
    /// Minimum/Maximum/Pop over an empty sequence.
    #[error("reduction over an empty sequence")]
    EmptyReduction,

    /// An operator received an operand type it cannot reconcile.
    #[error("type mismatch: {operation} cannot take {operand}")]
    TypeMismatch {
        operation: &'static str,
        operand: String,
    },

    /// InputString/InputNumber with nothing left in the input queue.
    #[error("input exhausted")]
    EndOfInput,

    #[error("division by zero")]
    DivisionByZero,

    /// Rotate copies only have exact images for even 45° multiples.
    #[error("rotation by {0} eighth-turns has no exact grid image")]
    UnsupportedRotation(i64),

    /// A nested Evaluate failed to parse, or no evaluator is wired in.
    #[error("nested evaluation failed: {0}")]
    Eval(String),
}

impl Error {
    /// Shorthand for [`Error::TypeMismatch`].
    pub fn type_mismatch(operation: &'static str, operand: impl Into<String>) -> Self {
        Error::TypeMismatch {
            operation,
            operand: operand.into(),
        }
    }
}
