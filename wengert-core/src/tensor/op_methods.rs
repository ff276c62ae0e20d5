use super::Tensor;
use crate::array::Shape;
use crate::error::WengertError;
use crate::ops;
use crate::ops::traits::Scalar;

/// Method forms of the operation catalog. Each delegates to the `_op` function of
/// the same name in [`crate::ops`].
impl<T: Scalar> Tensor<T> {
    pub fn add(&self, other: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
        ops::arithmetic::add_op(self, other)
    }

    pub fn sub(&self, other: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
        ops::arithmetic::sub_op(self, other)
    }

    /// Hadamard product.
    pub fn mul(&self, other: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
        ops::arithmetic::mul_op(self, other)
    }

    pub fn div(&self, other: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
        ops::arithmetic::div_op(self, other)
    }

    pub fn matprod(&self, other: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
        ops::linalg::matprod_op(self, other)
    }

    pub fn sigmoid(&self) -> Result<Tensor<T>, WengertError> {
        ops::activation::sigmoid_op(self)
    }

    pub fn squared_norm(&self) -> Result<Tensor<T>, WengertError> {
        ops::reduction::squared_norm_op(self)
    }

    /// Valid correlation of `self` by `kernel`.
    pub fn convolution(&self, kernel: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
        ops::spatial::convolution_op(self, kernel)
    }

    pub fn max_pooling(&self, window: Shape) -> Result<Tensor<T>, WengertError> {
        ops::spatial::max_pooling_op(self, window)
    }

    pub fn flattening(&self) -> Result<Tensor<T>, WengertError> {
        ops::view::flattening_op(self)
    }

    /// Stacks `parts` vertically, in order.
    pub fn vert_cat(parts: &[&Tensor<T>]) -> Result<Tensor<T>, WengertError> {
        ops::view::vert_cat_op(parts)
    }
}
