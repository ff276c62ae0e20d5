use crate::array::{block, elementwise, linalg, spatial, Array, Shape};
use crate::error::WengertError;
use crate::ops::traits::Scalar;

/// The kind of operation that produced a node, with the extra state its
/// derivative folding needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An input value. Has no dependency.
    Leaf,
    /// Shape-preserving operation: the local derivative multiplies pointwise.
    ElementWise,
    /// `x · y`. Local derivatives are the transposed operands.
    MatrixProduct,
    /// Reduction to a `1x1` value whose local derivative has the input's shape.
    Norm,
    /// Valid 2D correlation of an input (slot 0) by a kernel (slot 1).
    Convolution,
    /// Max pooling; the local derivative is the 0/1 winner mask.
    Pooling { window: Shape },
    /// Row stacking. `offsets[j]..offsets[j + 1]` are the rows of operand `j`.
    VerticalConcat { offsets: Vec<usize> },
    /// Row-major flattening of an `original_shape` array into a column.
    Flattening { original_shape: Shape },
}

impl NodeKind {
    /// Whether appending this kind keeps the tape elementwise-only.
    pub fn is_elementwise(&self) -> bool {
        matches!(self, NodeKind::Leaf | NodeKind::ElementWise)
    }
}

/// A local derivative and the tape index of the operand it belongs to.
#[derive(Debug, Clone)]
pub(crate) struct Dependency<T> {
    pub(crate) local: Array<T>,
    pub(crate) index: usize,
}

/// One entry of the tape.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) shape: Shape,
    pub(crate) kind: NodeKind,
    pub(crate) dependencies: Vec<Dependency<T>>,
}

impl<T: Scalar> Node<T> {
    pub(crate) fn leaf(shape: Shape) -> Self {
        Node {
            shape,
            kind: NodeKind::Leaf,
            dependencies: Vec::new(),
        }
    }

    pub(crate) fn unary(shape: Shape, kind: NodeKind, local: Array<T>, index: usize) -> Self {
        Node {
            shape,
            kind,
            dependencies: vec![Dependency { local, index }],
        }
    }

    pub(crate) fn binary(
        shape: Shape,
        kind: NodeKind,
        (x_local, x_index): (Array<T>, usize),
        (y_local, y_index): (Array<T>, usize),
    ) -> Self {
        Node {
            shape,
            kind,
            dependencies: vec![
                Dependency {
                    local: x_local,
                    index: x_index,
                },
                Dependency {
                    local: y_local,
                    index: y_index,
                },
            ],
        }
    }

    /// Node whose dependencies carry no stored local derivative.
    pub(crate) fn structural(shape: Shape, kind: NodeKind, indices: &[usize]) -> Self {
        Node {
            shape,
            kind,
            dependencies: indices
                .iter()
                .map(|&index| Dependency {
                    local: Array::empty(),
                    index,
                })
                .collect(),
        }
    }

    /// Folds `d`, the derivative of the backward root with respect to this node's
    /// value, into the contribution owed to dependency `j`.
    pub(crate) fn fold(&self, d: &Array<T>, j: usize) -> Result<Array<T>, WengertError> {
        let local = &self
            .dependencies
            .get(j)
            .ok_or_else(|| {
                WengertError::structural(
                    "fold",
                    format!("node has {} dependencies, slot {} requested", self.dependencies.len(), j),
                )
            })?
            .local;

        match &self.kind {
            NodeKind::Leaf => Err(WengertError::structural("fold", "a leaf has no dependency")),
            NodeKind::ElementWise => elementwise::hadamard(d, local),
            NodeKind::Norm => {
                let seed = d.get(0, 0).ok_or_else(|| {
                    WengertError::shape_mismatch("fold", (1, 1), d.shape())
                })?;
                Ok(elementwise::scale(local, seed))
            }
            NodeKind::MatrixProduct => {
                if j == 0 {
                    linalg::matmul(d, local)
                } else {
                    linalg::matmul(local, d)
                }
            }
            NodeKind::Convolution => {
                let stored_is_field = local.rows() >= d.rows() && local.cols() >= d.cols();
                let increment = if stored_is_field {
                    spatial::correlate(local, d)?
                } else {
                    spatial::correlate(d, local)?
                };
                // The input slot stores the flipped kernel image, which yields the
                // input gradient rotated by 180 degrees.
                if j == 0 {
                    Ok(spatial::rotate180(&increment))
                } else {
                    Ok(increment)
                }
            }
            NodeKind::Pooling { window } => {
                elementwise::hadamard(&spatial::upsample(d, *window), local)
            }
            NodeKind::VerticalConcat { offsets } => {
                let (start, end) = match (offsets.get(j), offsets.get(j + 1)) {
                    (Some(&start), Some(&end)) => (start, end),
                    _ => {
                        return Err(WengertError::structural(
                            "fold",
                            format!("no row offsets recorded for operand {}", j),
                        ))
                    }
                };
                block::block(d, start, 0, end - start, d.cols())
            }
            NodeKind::Flattening { original_shape } => {
                block::reshape(d, original_shape.0, original_shape.1)
            }
        }
    }
}
