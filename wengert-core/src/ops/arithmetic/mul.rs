use crate::array::elementwise;
use crate::autograd::node::Node;
use crate::autograd::NodeKind;
use crate::error::WengertError;
use crate::ops::shared_tape;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;

/// Element-wise (Hadamard) product of two tensors of the same shape.
///
/// `a = x ⊙ y`, `da/dx = y`, `da/dy = x`.
pub fn mul_op<T: Scalar>(x: &Tensor<T>, y: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
    let tape = shared_tape(&[x, y], "mul")?;
    let value = elementwise::zip_map(x.value(), y.value(), "mul", |a, b| a * b)?;

    let node = Node::binary(
        value.shape(),
        NodeKind::ElementWise,
        (y.value().clone(), x.index()),
        (x.value().clone(), y.index()),
    );
    Ok(Tensor::from_node(value, &tape, node))
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
