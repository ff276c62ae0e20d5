use crate::array::Shape;
use thiserror::Error;

/// Error type for every fallible operation of the engine.
///
/// Operations never abort on bad operands: they return one of these variants and
/// leave the tape untouched.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum WengertError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        operation: String,
        expected: Shape,
        actual: Shape,
    },

    #[error("Operands of {operation} do not share a live tape")]
    TapeMismatch { operation: String },

    #[error("Invalid configuration for {operation}: {reason}")]
    StructuralInvalid { operation: String, reason: String },

    #[error(
        "Tensor used in {operation} belongs to tape generation {tensor_generation}, but the tape is at generation {tape_generation}"
    )]
    StaleTensor {
        operation: String,
        tensor_generation: u64,
        tape_generation: u64,
    },
}

impl WengertError {
    pub(crate) fn shape_mismatch(operation: &str, expected: Shape, actual: Shape) -> Self {
        WengertError::ShapeMismatch {
            operation: operation.to_string(),
            expected,
            actual,
        }
    }

    pub(crate) fn tape_mismatch(operation: &str) -> Self {
        WengertError::TapeMismatch {
            operation: operation.to_string(),
        }
    }

    pub(crate) fn structural(operation: &str, reason: impl Into<String>) -> Self {
        WengertError::StructuralInvalid {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }
}
