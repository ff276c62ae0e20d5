//! Spatial kernels: valid 2D correlation, max pooling and its upsampling inverse.
//!
//! Every output cell is computed independently. With the `parallel` feature the
//! cells are distributed over the rayon thread pool; each cell is still written by
//! exactly one worker, so both builds produce identical arrays.

use super::{Array, Shape};
use crate::error::WengertError;
use crate::ops::traits::Scalar;

#[cfg(feature = "parallel")]
fn collect_cells<U, F>(count: usize, cell: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    use rayon::prelude::*;
    (0..count).into_par_iter().map(cell).collect()
}

#[cfg(not(feature = "parallel"))]
fn collect_cells<U, F>(count: usize, cell: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    (0..count).map(cell).collect()
}

fn correlation_shape<T: Scalar>(
    field: &Array<T>,
    kernel: &Array<T>,
    operation: &str,
) -> Result<Shape, WengertError> {
    if kernel.is_empty() {
        return Err(WengertError::structural(operation, "kernel has no element"));
    }
    if kernel.rows() > field.rows() || kernel.cols() > field.cols() {
        return Err(WengertError::shape_mismatch(
            operation,
            field.shape(),
            kernel.shape(),
        ));
    }
    Ok((
        field.rows() - kernel.rows() + 1,
        field.cols() - kernel.cols() + 1,
    ))
}

/// Valid 2D correlation (no padding, stride 1).
///
/// Output shape is `(field.rows - kernel.rows + 1, field.cols - kernel.cols + 1)`;
/// the kernel must fit inside the field in both dimensions.
pub fn correlate<T: Scalar>(field: &Array<T>, kernel: &Array<T>) -> Result<Array<T>, WengertError> {
    let (out_rows, out_cols) = correlation_shape(field, kernel, "correlate")?;
    let (k_rows, k_cols) = kernel.shape();
    let data = collect_cells(out_rows * out_cols, |idx| {
        let (i, j) = (idx / out_cols, idx % out_cols);
        let mut acc = T::zero();
        for p in 0..k_rows {
            for q in 0..k_cols {
                acc += field[(i + p, j + q)] * kernel[(p, q)];
            }
        }
        acc
    });
    Array::from_vec(out_rows, out_cols, data)
}

/// Same result as [`correlate`], computed by unrolling every field patch into a row
/// of a `(out_cells, kernel_len)` matrix and multiplying it by the flattened kernel.
///
/// Trades memory for a single dense product.
pub fn correlate_im2col<T: Scalar>(
    field: &Array<T>,
    kernel: &Array<T>,
) -> Result<Array<T>, WengertError> {
    let (out_rows, out_cols) = correlation_shape(field, kernel, "correlate_im2col")?;
    let (k_rows, k_cols) = kernel.shape();
    let patch_len = k_rows * k_cols;

    let patches: Vec<Vec<T>> = collect_cells(out_rows * out_cols, |idx| {
        let (i, j) = (idx / out_cols, idx % out_cols);
        let mut patch = Vec::with_capacity(patch_len);
        for p in 0..k_rows {
            let start = field.offset(i + p, j);
            patch.extend_from_slice(&field.as_slice()[start..start + k_cols]);
        }
        patch
    });
    let patches = Array::from_vec(
        out_rows * out_cols,
        patch_len,
        patches.into_iter().flatten().collect(),
    )?;
    let kernel_column = Array::from_vec(patch_len, 1, kernel.as_slice().to_vec())?;

    let product = super::linalg::matmul(&patches, &kernel_column)?;
    Array::from_vec(out_rows, out_cols, product.into_vec())
}

/// Rotates an array by 180 degrees (flips both axes).
pub fn rotate180<T: Scalar>(a: &Array<T>) -> Array<T> {
    let mut data = a.as_slice().to_vec();
    data.reverse();
    Array {
        rows: a.rows(),
        cols: a.cols(),
        data,
    }
}

/// Zero array of shape `(rows, cols)` with `a` copied at `(top, left)`.
pub fn embed<T: Scalar>(
    a: &Array<T>,
    rows: usize,
    cols: usize,
    top: usize,
    left: usize,
) -> Result<Array<T>, WengertError> {
    if top + a.rows() > rows || left + a.cols() > cols {
        return Err(WengertError::shape_mismatch(
            "embed",
            (rows, cols),
            (top + a.rows(), left + a.cols()),
        ));
    }
    let mut out = Array::zeros(rows, cols);
    for r in 0..a.rows() {
        for c in 0..a.cols() {
            out[(top + r, left + c)] = a[(r, c)];
        }
    }
    Ok(out)
}

fn check_window<T>(x: &Array<T>, window: Shape, operation: &str) -> Result<(), WengertError> {
    let (p_rows, p_cols) = window;
    if p_rows == 0 || p_cols == 0 {
        return Err(WengertError::structural(
            operation,
            format!("pool window {:?} has a zero dimension", window),
        ));
    }
    if x.rows() % p_rows != 0 || x.cols() % p_cols != 0 {
        return Err(WengertError::structural(
            operation,
            format!(
                "pool window {:?} does not divide input shape {:?}",
                window,
                x.shape()
            ),
        ));
    }
    Ok(())
}

/// Max pooling over non-overlapping windows.
///
/// Returns the pooled array and a 0/1 mask of the input's shape holding exactly one
/// `1` per window. Ties go to the first maximum met in row-major order inside the
/// window.
pub fn max_pool<T: Scalar>(
    x: &Array<T>,
    window: Shape,
) -> Result<(Array<T>, Array<T>), WengertError> {
    check_window(x, window, "max_pool")?;
    let (p_rows, p_cols) = window;
    let (out_rows, out_cols) = (x.rows() / p_rows, x.cols() / p_cols);

    let winners = collect_cells(out_rows * out_cols, |idx| {
        let (top, left) = ((idx / out_cols) * p_rows, (idx % out_cols) * p_cols);
        let mut best = (x[(top, left)], top, left);
        for r in top..top + p_rows {
            for c in left..left + p_cols {
                if x[(r, c)] > best.0 {
                    best = (x[(r, c)], r, c);
                }
            }
        }
        best
    });

    let mut mask = Array::zeros(x.rows(), x.cols());
    let mut pooled = Vec::with_capacity(winners.len());
    for (value, r, c) in winners {
        mask[(r, c)] = T::one();
        pooled.push(value);
    }
    Ok((Array::from_vec(out_rows, out_cols, pooled)?, mask))
}

/// Expands every element of `d` into a full `window` block.
pub fn upsample<T: Scalar>(d: &Array<T>, window: Shape) -> Array<T> {
    let (p_rows, p_cols) = window;
    let (rows, cols) = (d.rows() * p_rows, d.cols() * p_cols);
    let data = collect_cells(rows * cols, |idx| {
        let (r, c) = (idx / cols, idx % cols);
        d[(r / p_rows, c / p_cols)]
    });
    Array { rows, cols, data }
}

#[cfg(test)]
#[path = "spatial_test.rs"]
mod tests;
