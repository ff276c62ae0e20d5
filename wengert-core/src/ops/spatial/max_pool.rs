use crate::array::{spatial, Shape};
use crate::autograd::node::Node;
use crate::autograd::NodeKind;
use crate::error::WengertError;
use crate::ops::shared_tape;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;

/// Max pooling over non-overlapping `window`-sized blocks.
///
/// The window must divide the input shape exactly. Each output cell holds the
/// maximum of its block; ties go to the first maximum in row-major order. The local
/// derivative is the 0/1 winner mask, so only the winning input cell of each block
/// receives the block's derivative.
pub fn max_pooling_op<T: Scalar>(x: &Tensor<T>, window: Shape) -> Result<Tensor<T>, WengertError> {
    let tape = shared_tape(&[x], "max_pooling")?;
    let (value, mask) = spatial::max_pool(x.value(), window)?;

    let node = Node::unary(value.shape(), NodeKind::Pooling { window }, mask, x.index());
    Ok(Tensor::from_node(value, &tape, node))
}

#[cfg(test)]
#[path = "max_pool_test.rs"]
mod tests;
