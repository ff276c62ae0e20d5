use super::Tensor;
use crate::autograd::backward::backward;
use crate::autograd::Gradient;
use crate::error::WengertError;
use crate::ops::traits::Scalar;

impl<T: Scalar> Tensor<T> {
    /// Computes the derivative of this tensor with respect to every node recorded
    /// before it on its tape.
    ///
    /// The backward pass seeds this tensor with ones, so the result is the
    /// gradient proper only for a `1x1` tensor, or for any shape while the tape is
    /// still elementwise-only. Calling it on a larger tensor after a matrix
    /// product, norm, convolution, pooling, concatenation or flattening is a
    /// caller error: the computation runs but its meaning is undefined.
    ///
    /// A detached tensor has an empty gradient. The backward pass only reads the
    /// tape, so several gradients can be taken from the same tape.
    ///
    /// # Errors
    /// [`WengertError::StaleTensor`] if the tape was reset after this tensor was
    /// recorded; [`WengertError::TapeMismatch`] if the tape was dropped.
    pub fn grad(&self) -> Result<Gradient<T>, WengertError> {
        if self.is_detached() {
            return Ok(Gradient::empty());
        }
        backward(self)
    }
}
