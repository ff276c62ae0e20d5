use super::tape::TapeRef;
use crate::array::Array;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;
use log::warn;
use std::rc::Weak;

/// The result of one backward pass: for each tape index up to the root, the
/// derivative of the root with respect to that node's value.
///
/// Produced by [`Tensor::grad`], immutable afterwards. Query it with any tensor
/// recorded on the same tape generation.
#[derive(Debug, Clone)]
pub struct Gradient<T> {
    derivatives: Vec<Array<T>>,
    tape: TapeRef<T>,
    generation: u64,
}

impl<T: Scalar> Gradient<T> {
    pub(crate) fn new(derivatives: Vec<Array<T>>, tape: TapeRef<T>, generation: u64) -> Self {
        Gradient {
            derivatives,
            tape,
            generation,
        }
    }

    /// A gradient with no derivative: every lookup returns nothing.
    pub fn empty() -> Self {
        Gradient {
            derivatives: Vec::new(),
            tape: Weak::new(),
            generation: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.derivatives.is_empty()
    }

    /// Number of tape indices covered (root index + 1).
    pub fn len(&self) -> usize {
        self.derivatives.len()
    }

    /// Derivative with respect to `tensor`.
    ///
    /// `None` when `tensor` is detached, was recorded after the root or on another
    /// tape, or predates a reset of this gradient's tape.
    pub fn get(&self, tensor: &Tensor<T>) -> Option<&Array<T>> {
        if tensor.is_detached() {
            return None;
        }
        if self.is_foreign(tensor) {
            if !self.is_empty() {
                warn!(
                    "Gradient lookup for tensor {} recorded on another tape or generation",
                    tensor.index()
                );
            }
            return None;
        }
        self.derivatives.get(tensor.index())
    }

    /// True when an attached `tensor` was recorded on another tape, or on this
    /// gradient's tape before a reset.
    fn is_foreign(&self, tensor: &Tensor<T>) -> bool {
        match tensor.tape_ref() {
            Some(tape_ref) => {
                !Weak::ptr_eq(tape_ref, &self.tape) || tensor.generation() != self.generation
            }
            None => false,
        }
    }

    /// Derivative with respect to `tensor`, or the empty `0x0` array when
    /// [`get`](Gradient::get) finds nothing.
    pub fn value(&self, tensor: &Tensor<T>) -> Array<T> {
        self.get(tensor).cloned().unwrap_or_else(Array::empty)
    }
}
