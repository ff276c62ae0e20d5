use super::Array;
use crate::error::WengertError;
use crate::ops::traits::Scalar;

/// Copies the `rows x cols` block starting at `(top, left)`.
pub fn block<T: Scalar>(
    a: &Array<T>,
    top: usize,
    left: usize,
    rows: usize,
    cols: usize,
) -> Result<Array<T>, WengertError> {
    if top + rows > a.rows() || left + cols > a.cols() {
        return Err(WengertError::shape_mismatch(
            "block",
            a.shape(),
            (top + rows, left + cols),
        ));
    }
    let mut data = Vec::with_capacity(rows * cols);
    for r in top..top + rows {
        let start = a.offset(r, left);
        data.extend_from_slice(&a.as_slice()[start..start + cols]);
    }
    Array::from_vec(rows, cols, data)
}

/// Stacks arrays on top of each other, in order. All parts must share their
/// column count.
pub fn vstack<T: Scalar>(parts: &[&Array<T>]) -> Result<Array<T>, WengertError> {
    let first = parts
        .first()
        .ok_or_else(|| WengertError::structural("vstack", "no array to stack"))?;
    let cols = first.cols();
    let mut rows = 0;
    let mut data = Vec::with_capacity(parts.iter().map(|p| p.len()).sum());
    for part in parts {
        if part.cols() != cols {
            return Err(WengertError::shape_mismatch(
                "vstack",
                (part.rows(), cols),
                part.shape(),
            ));
        }
        rows += part.rows();
        data.extend_from_slice(part.as_slice());
    }
    Array::from_vec(rows, cols, data)
}

/// Reinterprets the row-major buffer of `a` with a new shape of the same size.
pub fn reshape<T: Scalar>(a: &Array<T>, rows: usize, cols: usize) -> Result<Array<T>, WengertError> {
    if rows * cols != a.len() {
        return Err(WengertError::shape_mismatch(
            "reshape",
            (rows, cols),
            a.shape(),
        ));
    }
    Array::from_vec(rows, cols, a.as_slice().to_vec())
}
