use crate::array::elementwise;
use crate::autograd::node::Node;
use crate::autograd::NodeKind;
use crate::error::WengertError;
use crate::ops::shared_tape;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;

/// Element-wise quotient of two tensors of the same shape.
///
/// `a = x / y`, `da/dx = 1 / y`, `da/dy = -x / y²`.
///
/// Zero divisors are not special-cased: they yield infinities or NaN in both the
/// value and the local derivatives.
pub fn div_op<T: Scalar>(x: &Tensor<T>, y: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
    let tape = shared_tape(&[x, y], "div")?;
    let value = elementwise::zip_map(x.value(), y.value(), "div", |a, b| a / b)?;

    let dx = y.value().map(|b| b.recip());
    let dy = elementwise::zip_map(x.value(), y.value(), "div", |a, b| -a / (b * b))?;
    let node = Node::binary(
        value.shape(),
        NodeKind::ElementWise,
        (dx, x.index()),
        (dy, y.index()),
    );
    Ok(Tensor::from_node(value, &tape, node))
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
