use super::gradient::Gradient;
use crate::array::{elementwise, Array};
use crate::error::WengertError;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;
use log::{debug, trace, warn};

/// Runs the backward pass rooted at `root`.
///
/// Seeds the root's accumulator with ones, then sweeps the tape from the root's
/// index down to 0, folding every node's accumulated derivative through each of
/// its dependencies and summing the contributions into the dependency's slot.
/// Insertion order is a topological order, so a slot is complete when the sweep
/// reaches it.
///
/// The ones seed is the vector-Jacobian product of a scalar root. For a non-`1x1`
/// root on a tape that is no longer elementwise-only the result is undefined;
/// it is computed anyway and a warning is logged.
pub(crate) fn backward<T: Scalar>(root: &Tensor<T>) -> Result<Gradient<T>, WengertError> {
    let tape = root.tape_handle("grad")?;
    if tape.is_empty() {
        return Ok(Gradient::empty());
    }
    if root.shape() != (1, 1) && !tape.is_elementwise_only() {
        warn!(
            "grad() rooted at non-scalar tensor {} (shape {:?}) on a tape with non-elementwise operations: result is undefined",
            root.index(),
            root.shape()
        );
    }

    let nodes = tape.nodes();
    let root_index = root.index();
    debug!("Backward pass from node {} over {} nodes", root_index, root_index + 1);

    let mut accumulators: Vec<Option<Array<T>>> = vec![None; root_index + 1];
    accumulators[root_index] = Some(Array::ones(root.shape().0, root.shape().1));

    for k in (0..=root_index).rev() {
        let node = &nodes[k];
        let derivative = match accumulators[k].as_ref() {
            Some(derivative) => derivative,
            None => continue,
        };
        trace!(
            "Folding node {} ({:?}) into {} dependencies",
            k,
            node.kind,
            node.dependencies.len()
        );
        let contributions = node
            .dependencies
            .iter()
            .enumerate()
            .map(|(j, dep)| Ok((dep.index, node.fold(derivative, j)?)))
            .collect::<Result<Vec<_>, WengertError>>()?;

        for (index, contribution) in contributions {
            match accumulators[index].as_mut() {
                Some(acc) => elementwise::add_assign(acc, &contribution)?,
                None => accumulators[index] = Some(contribution),
            }
        }
    }

    let derivatives = accumulators
        .into_iter()
        .zip(nodes.iter())
        .map(|(acc, node)| acc.unwrap_or_else(|| Array::zeros(node.shape.0, node.shape.1)))
        .collect();

    Ok(Gradient::new(derivatives, tape.downgrade(), tape.generation()))
}
