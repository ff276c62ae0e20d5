use crate::array::{elementwise, Array};
use crate::autograd::node::Node;
use crate::autograd::NodeKind;
use crate::error::WengertError;
use crate::ops::shared_tape;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;

/// Element-wise sum of two tensors of the same shape.
///
/// `a = x + y`, `da/dx = 1`, `da/dy = 1`.
pub fn add_op<T: Scalar>(x: &Tensor<T>, y: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
    let tape = shared_tape(&[x, y], "add")?;
    let value = elementwise::zip_map(x.value(), y.value(), "add", |a, b| a + b)?;

    let ones = Array::ones(value.rows(), value.cols());
    let node = Node::binary(
        value.shape(),
        NodeKind::ElementWise,
        (ones.clone(), x.index()),
        (ones, y.index()),
    );
    Ok(Tensor::from_node(value, &tape, node))
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
