use crate::array::{elementwise, Array};
use crate::autograd::node::Node;
use crate::autograd::NodeKind;
use crate::error::WengertError;
use crate::ops::shared_tape;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;

/// Squared Euclidean (Frobenius) norm: the sum of the squares of all entries,
/// as a `1x1` tensor.
///
/// The local derivative `2x` keeps the input's shape, so the backward pass scales
/// it by the incoming `1x1` derivative. Clears the tape's elementwise-only flag.
pub fn squared_norm_op<T: Scalar>(x: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
    let tape = shared_tape(&[x], "squared_norm")?;
    let value = Array::scalar(x.value().as_slice().iter().map(|&v| v * v).sum());
    let local = elementwise::scale(x.value(), T::one() + T::one());

    let node = Node::unary((1, 1), NodeKind::Norm, local, x.index());
    Ok(Tensor::from_node(value, &tape, node))
}
