use crate::array::spatial::{correlate, embed, rotate180};
use crate::autograd::node::Node;
use crate::autograd::NodeKind;
use crate::error::WengertError;
use crate::ops::shared_tape;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;

/// Valid 2D correlation of `mat` by `ker` (no padding, stride 1, no kernel flip).
///
/// For a `(mr, mc)` input and a `(kr, kc)` kernel the output has shape
/// `(or, oc) = (mr - kr + 1, mc - kc + 1)`.
///
/// Local derivatives:
/// - input slot: the kernel rotated by 180 degrees, embedded at `(or - 1, oc - 1)`
///   in a zero array of shape `(2 or + kr - 2, 2 oc + kc - 2)`. Correlating it with
///   the incoming derivative and rotating back yields `dL/dmat`.
/// - kernel slot: the input itself. `dL/dker = correlate(mat, dL/da)`.
pub fn convolution_op<T: Scalar>(mat: &Tensor<T>, ker: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
    let operation = "convolution";
    let tape = shared_tape(&[mat, ker], operation)?;
    let (k_rows, k_cols) = ker.shape();
    if k_rows == 0 || k_cols == 0 {
        return Err(WengertError::structural(operation, "kernel has no element"));
    }
    if k_rows > mat.shape().0 || k_cols > mat.shape().1 {
        return Err(WengertError::shape_mismatch(
            operation,
            mat.shape(),
            ker.shape(),
        ));
    }
    let value = correlate(mat.value(), ker.value())?;

    let (out_rows, out_cols) = value.shape();
    let image = embed(
        &rotate180(ker.value()),
        2 * out_rows + k_rows - 2,
        2 * out_cols + k_cols - 2,
        out_rows - 1,
        out_cols - 1,
    )?;

    let node = Node::binary(
        value.shape(),
        NodeKind::Convolution,
        (image, mat.index()),
        (mat.value().clone(), ker.index()),
    );
    Ok(Tensor::from_node(value, &tape, node))
}

#[cfg(test)]
#[path = "convolution_test.rs"]
mod tests;
