//! Calculator core: number entry, token sequence and evaluation
//!
//! The core never panics on user input. Arithmetic failures surface as
//! [`CalcError`] values and are turned into display state by the session.

pub mod accumulator;
pub mod evaluator;
pub mod format;
mod operations;

pub use operations::Operator;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// Division by (near) zero is the only arithmetic failure. Unparsable input
/// buffers are reported as "no value", not as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Right operand of a division was zero or below the configured epsilon
    #[error("Division by zero")]
    DivisionByZero,
}
