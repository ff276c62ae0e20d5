use crate::array::block;
use crate::autograd::node::Node;
use crate::autograd::NodeKind;
use crate::error::WengertError;
use crate::ops::shared_tape;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;

/// Stacks tensors on top of each other, in the given order.
///
/// Every part must have the same column count. The node records the starting row
/// of each part so the backward pass can hand each operand back its own rows.
pub fn vert_cat_op<T: Scalar>(parts: &[&Tensor<T>]) -> Result<Tensor<T>, WengertError> {
    let operation = "vert_cat";
    if parts.is_empty() {
        return Err(WengertError::structural(operation, "no tensor to concatenate"));
    }
    let tape = shared_tape(parts, operation)?;

    let cols = parts[0].shape().1;
    let mut offsets = Vec::with_capacity(parts.len() + 1);
    offsets.push(0);
    for part in parts {
        let (rows, part_cols) = part.shape();
        if part_cols != cols {
            return Err(WengertError::shape_mismatch(
                operation,
                (rows, cols),
                part.shape(),
            ));
        }
        let last = offsets[offsets.len() - 1];
        offsets.push(last + rows);
    }

    let values: Vec<_> = parts.iter().map(|p| p.value()).collect();
    let value = block::vstack(&values)?;
    let indices: Vec<usize> = parts.iter().map(|p| p.index()).collect();

    let node = Node::structural(value.shape(), NodeKind::VerticalConcat { offsets }, &indices);
    Ok(Tensor::from_node(value, &tape, node))
}

#[cfg(test)]
#[path = "vert_cat_test.rs"]
mod tests;
