use crate::array::linalg::matmul;
use crate::autograd::node::Node;
use crate::autograd::NodeKind;
use crate::error::WengertError;
use crate::ops::shared_tape;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;

/// Matrix product `x · y`. Requires `x.cols == y.rows`.
///
/// The local derivatives are `yᵗ` for `x` and `xᵗ` for `y`; during the backward
/// pass they multiply the incoming derivative on the right and on the left
/// respectively (`dL/dx = dL/da · yᵗ`, `dL/dy = xᵗ · dL/da`).
///
/// Clears the tape's elementwise-only flag.
pub fn matprod_op<T: Scalar>(x: &Tensor<T>, y: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
    let operation = "matprod";
    let tape = shared_tape(&[x, y], operation)?;
    if x.shape().1 != y.shape().0 {
        return Err(WengertError::shape_mismatch(
            operation,
            (x.shape().1, y.shape().1),
            y.shape(),
        ));
    }
    let value = matmul(x.value(), y.value())?;

    let node = Node::binary(
        value.shape(),
        NodeKind::MatrixProduct,
        (y.value().transpose(), x.index()),
        (x.value().transpose(), y.index()),
    );
    Ok(Tensor::from_node(value, &tape, node))
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
