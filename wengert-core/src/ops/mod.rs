//! # Operation catalog (`ops`)
//!
//! The public operations that combine tensors. Each `xxx_op` function:
//!
//! 1. checks that every operand is live on one shared tape,
//! 2. checks operand shapes,
//! 3. computes the forward value and the local derivatives analytically,
//! 4. appends one node to the tape and returns the tensor referencing it.
//!
//! Failures are returned as [`WengertError`] and leave the tape untouched.
//! The same operations are available as methods on [`Tensor`].
//!
//! ## Submodules
//!
//! - [`arithmetic`]: element-wise add, sub, mul (Hadamard), div.
//! - [`linalg`]: matrix product.
//! - [`activation`]: sigmoid.
//! - [`reduction`]: squared norm.
//! - [`spatial`]: convolution, max pooling.
//! - [`view`]: vertical concatenation, flattening.

pub mod traits;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod reduction;
pub mod spatial;
pub mod view;

use crate::autograd::Tape;
use crate::error::WengertError;
use crate::tensor::Tensor;
use traits::Scalar;

/// Returns the tape shared by every operand.
///
/// Fails with `TapeMismatch` if an operand is detached, its tape was dropped, or
/// the operands come from different tapes, and with `StaleTensor` if an operand
/// predates a reset.
pub(crate) fn shared_tape<T: Scalar>(
    operands: &[&Tensor<T>],
    operation: &str,
) -> Result<Tape<T>, WengertError> {
    let (first, rest) = operands
        .split_first()
        .ok_or_else(|| WengertError::structural(operation, "no operand"))?;
    let tape = first.tape_handle(operation)?;
    for operand in rest {
        let other = operand.tape_handle(operation)?;
        if !tape.ptr_eq(&other) {
            return Err(WengertError::tape_mismatch(operation));
        }
    }
    Ok(tape)
}
