// src/tensor/mod.rs

use crate::array::{Array, Shape};
use crate::autograd::node::Node;
use crate::autograd::tape::TapeRef;
use crate::autograd::{NodeKind, Tape};
use crate::error::WengertError;
use crate::ops::traits::Scalar;
use log::trace;

mod autograd_methods;
mod op_methods;

/// A value recorded on a [`Tape`].
///
/// A `Tensor` is the value array plus the index of the node that produced it.
/// It holds a weak, non-owning reference to its tape: the tape's owner decides
/// how long the graph lives. Tensors are the only way to add nodes to a tape.
///
/// Cloning a tensor copies the value and shares the tape reference and index:
/// both clones denote the same node.
#[derive(Debug, Clone)]
pub struct Tensor<T> {
    value: Array<T>,
    tape: Option<TapeRef<T>>,
    index: usize,
    generation: u64,
}

impl<T: Scalar> Tensor<T> {
    /// Creates a leaf tensor: appends a `Leaf` node to `tape` and wraps `value`.
    pub fn new(value: Array<T>, tape: &Tape<T>) -> Self {
        let node = Node::leaf(value.shape());
        Self::from_node(value, tape, node)
    }

    /// Creates a tensor attached to no tape.
    ///
    /// It can be read, but any operation consuming it fails with
    /// [`WengertError::TapeMismatch`] and its gradient is empty.
    pub fn detached(value: Array<T>) -> Self {
        Tensor {
            value,
            tape: None,
            index: 0,
            generation: 0,
        }
    }

    /// Appends `node` to `tape` and returns the tensor referencing it.
    pub(crate) fn from_node(value: Array<T>, tape: &Tape<T>, node: Node<T>) -> Self {
        trace!(
            "Recording {:?} node with shape {:?}",
            node.kind,
            node.shape
        );
        let index = tape.append(node);
        Tensor {
            value,
            tape: Some(tape.downgrade()),
            index,
            generation: tape.generation(),
        }
    }

    /// The value computed by the forward pass.
    pub fn value(&self) -> &Array<T> {
        &self.value
    }

    pub fn shape(&self) -> Shape {
        self.value.shape()
    }

    /// Index of the node that produced this tensor.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Tape generation this tensor was recorded in.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handle on the tape this tensor was recorded on, `None` if the tensor is
    /// detached, its tape was dropped, or the tape was reset since.
    pub fn tape(&self) -> Option<Tape<T>> {
        self.tape_handle("tape").ok()
    }

    pub fn is_detached(&self) -> bool {
        self.tape.is_none()
    }

    /// True when the tensor's tape is alive and has not been reset since the
    /// tensor was recorded.
    pub fn is_live(&self) -> bool {
        self.tape_handle("is_live").is_ok()
    }

    /// Kind of the node that produced this tensor, `None` if the tensor is not live.
    pub fn kind(&self) -> Option<NodeKind> {
        self.tape_handle("kind")
            .ok()
            .and_then(|tape| tape.node_kind(self.index))
    }

    pub fn is_leaf(&self) -> bool {
        self.kind() == Some(NodeKind::Leaf)
    }

    /// Whether this tensor was recorded on `tape`.
    pub fn belongs_to(&self, tape: &Tape<T>) -> bool {
        match &self.tape {
            Some(tape_ref) => tape.is_referenced_by(tape_ref) && tape.generation() == self.generation,
            None => false,
        }
    }

    /// Returns a handle on the tensor's tape, checking it is still alive and at the
    /// tensor's generation.
    pub(crate) fn tape_handle(&self, operation: &str) -> Result<Tape<T>, WengertError> {
        let inner = self
            .tape
            .as_ref()
            .and_then(|tape_ref| tape_ref.upgrade())
            .ok_or_else(|| WengertError::tape_mismatch(operation))?;
        let tape = Tape::from_inner(inner);
        let tape_generation = tape.generation();
        if tape_generation != self.generation {
            return Err(WengertError::StaleTensor {
                operation: operation.to_string(),
                tensor_generation: self.generation,
                tape_generation,
            });
        }
        Ok(tape)
    }

    pub(crate) fn tape_ref(&self) -> Option<&TapeRef<T>> {
        self.tape.as_ref()
    }
}

#[cfg(test)]
#[path = "tensor_test.rs"]
mod tests;
