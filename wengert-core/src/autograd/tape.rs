use super::node::{Node, NodeKind};
use crate::error::WengertError;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;
use log::debug;
use std::cell::{Ref, RefCell};
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

pub(crate) type TapeRef<T> = Weak<RefCell<TapeInner<T>>>;

#[derive(Debug)]
pub(crate) struct TapeInner<T> {
    pub(crate) nodes: Vec<Node<T>>,
    elementwise_only: bool,
    generation: u64,
    optimizable: BTreeSet<usize>,
}

/// The Wengert list: an append-only, index-addressed record of every operation
/// performed on its tensors.
///
/// The tape is owned by whoever creates it (a model, or user code). Tensors only
/// keep a weak reference to it together with the tape generation they were
/// created in, so a tensor that outlives a [`reset`](Tape::reset) or the tape
/// itself is detected instead of silently reading foreign nodes.
///
/// The tape also tracks the *elementwise-only* flag: it starts `true` and turns
/// `false` for good the first time a matrix product, norm, convolution, pooling,
/// concatenation or flattening is recorded. Once it is `false`, gradients are
/// only meaningful when rooted at a `1x1` tensor.
///
/// A tape is single-threaded (`!Send`): build the graph, then run backward passes,
/// on the same thread.
#[derive(Debug)]
pub struct Tape<T> {
    inner: Rc<RefCell<TapeInner<T>>>,
}

impl<T: Scalar> Tape<T> {
    pub fn new() -> Self {
        Tape {
            inner: Rc::new(RefCell::new(TapeInner {
                nodes: Vec::new(),
                elementwise_only: true,
                generation: 0,
                optimizable: BTreeSet::new(),
            })),
        }
    }

    /// Number of recorded nodes.
    pub fn len(&self) -> usize {
        self.inner.borrow().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().nodes.is_empty()
    }

    pub fn is_elementwise_only(&self) -> bool {
        self.inner.borrow().elementwise_only
    }

    /// Incremented by every [`reset`](Tape::reset).
    pub fn generation(&self) -> u64 {
        self.inner.borrow().generation
    }

    /// Clears every node and optimizable toggle and restores the elementwise-only
    /// flag. Tensors created before the reset become stale: operations and
    /// gradient lookups involving them fail with
    /// [`WengertError::StaleTensor`] or return nothing.
    pub fn reset(&mut self) {
        let mut inner = self.inner.borrow_mut();
        debug!(
            "Tape reset: dropping {} nodes (generation {} -> {})",
            inner.nodes.len(),
            inner.generation,
            inner.generation + 1
        );
        inner.nodes.clear();
        inner.optimizable.clear();
        inner.elementwise_only = true;
        inner.generation += 1;
    }

    /// Marks a leaf tensor as a parameter an optimizer may update (or not).
    pub fn set_optimizable(&self, tensor: &Tensor<T>, enable: bool) -> Result<(), WengertError> {
        let operation = "set_optimizable";
        self.check_owns(tensor, operation)?;
        let mut inner = self.inner.borrow_mut();
        let kind = &inner.nodes[tensor.index()].kind;
        if *kind != NodeKind::Leaf {
            return Err(WengertError::structural(
                operation,
                format!("node {} is not a leaf ({:?})", tensor.index(), kind),
            ));
        }
        if enable {
            inner.optimizable.insert(tensor.index());
        } else {
            inner.optimizable.remove(&tensor.index());
        }
        Ok(())
    }

    /// Whether `tensor` is a live leaf of this tape toggled as optimizable.
    pub fn is_optimizable(&self, tensor: &Tensor<T>) -> bool {
        self.check_owns(tensor, "is_optimizable").is_ok()
            && self.inner.borrow().optimizable.contains(&tensor.index())
    }

    /// Node indices of the optimizable leaves, in tape order.
    pub fn optimizable_indices(&self) -> Vec<usize> {
        self.inner.borrow().optimizable.iter().copied().collect()
    }

    fn check_owns(&self, tensor: &Tensor<T>, operation: &str) -> Result<(), WengertError> {
        let owner = tensor.tape_handle(operation)?;
        if !self.ptr_eq(&owner) {
            return Err(WengertError::tape_mismatch(operation));
        }
        Ok(())
    }

    /// Appends `node` and returns its index.
    pub(crate) fn append(&self, node: Node<T>) -> usize {
        if !node.kind.is_elementwise() {
            self.mark_non_elementwise();
        }
        let mut inner = self.inner.borrow_mut();
        debug_assert!(node
            .dependencies
            .iter()
            .all(|dep| dep.index < inner.nodes.len()));
        inner.nodes.push(node);
        inner.nodes.len() - 1
    }

    pub(crate) fn mark_non_elementwise(&self) {
        self.inner.borrow_mut().elementwise_only = false;
    }

    pub(crate) fn nodes(&self) -> Ref<'_, Vec<Node<T>>> {
        Ref::map(self.inner.borrow(), |inner| &inner.nodes)
    }

    pub(crate) fn node_kind(&self, index: usize) -> Option<NodeKind> {
        self.inner.borrow().nodes.get(index).map(|n| n.kind.clone())
    }

    pub(crate) fn downgrade(&self) -> TapeRef<T> {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn from_inner(inner: Rc<RefCell<TapeInner<T>>>) -> Self {
        Tape { inner }
    }

    pub(crate) fn ptr_eq(&self, other: &Tape<T>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn is_referenced_by(&self, tape_ref: &TapeRef<T>) -> bool {
        Weak::ptr_eq(&Rc::downgrade(&self.inner), tape_ref)
    }
}

impl<T: Scalar> Default for Tape<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tape_test.rs"]
mod tests;
