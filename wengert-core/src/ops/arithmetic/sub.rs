use crate::array::{elementwise, Array};
use crate::autograd::node::Node;
use crate::autograd::NodeKind;
use crate::error::WengertError;
use crate::ops::shared_tape;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;

/// Element-wise difference of two tensors of the same shape.
///
/// `a = x - y`, `da/dx = 1`, `da/dy = -1`.
pub fn sub_op<T: Scalar>(x: &Tensor<T>, y: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
    let tape = shared_tape(&[x, y], "sub")?;
    let value = elementwise::zip_map(x.value(), y.value(), "sub", |a, b| a - b)?;

    let (rows, cols) = value.shape();
    let node = Node::binary(
        value.shape(),
        NodeKind::ElementWise,
        (Array::ones(rows, cols), x.index()),
        (Array::full(rows, cols, -T::one()), y.index()),
    );
    Ok(Tensor::from_node(value, &tape, node))
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
