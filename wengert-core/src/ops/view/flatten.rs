use crate::array::block;
use crate::autograd::node::Node;
use crate::autograd::NodeKind;
use crate::error::WengertError;
use crate::ops::shared_tape;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;

/// Flattens a tensor into a column, reading entries row by row.
///
/// An `(r, c)` input gives an `(r * c, 1)` output whose entry `i * c + j` is
/// `x[i, j]`. The backward pass reshapes the incoming derivative back to `(r, c)`.
pub fn flattening_op<T: Scalar>(x: &Tensor<T>) -> Result<Tensor<T>, WengertError> {
    let tape = shared_tape(&[x], "flattening")?;
    let original_shape = x.shape();
    let value = block::reshape(x.value(), original_shape.0 * original_shape.1, 1)?;

    let node = Node::structural(
        value.shape(),
        NodeKind::Flattening { original_shape },
        &[x.index()],
    );
    Ok(Tensor::from_node(value, &tape, node))
}

#[cfg(test)]
#[path = "flatten_test.rs"]
mod tests;
