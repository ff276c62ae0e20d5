use crate::autograd::node::Node;
use crate::autograd::NodeKind;
use crate::error::WengertError;
use crate::ops::shared_tape;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;

/// Element-wise logistic function `a = 1 / (1 + e^-x)`.
///
/// The local derivative `e^x / (1 + e^x)²` is stored in its equivalent form
/// `a (1 - a)`, which stays finite for large `|x|`.
pub fn sigmoid_op<T: Scalar>(x: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
    let tape = shared_tape(&[x], "sigmoid")?;
    let one = T::one();
    let value = x.value().map(|v| one / (one + (-v).exp()));
    let local = value.map(|s| s * (one - s));

    let node = Node::unary(value.shape(), NodeKind::ElementWise, local, x.index());
    Ok(Tensor::from_node(value, &tape, node))
}
