//! # Dense arrays (`array`)
//!
//! [`Array`] is the value type carried by every tensor and every node of the tape:
//! a dense, row-major, rank <= 2 buffer. A `1x1` array stands for a scalar and the
//! `0x0` array is the "empty" value returned by gradient lookups that found nothing.
//!
//! The submodules hold the graph-unaware kernels used by the operation catalog and
//! by the backward pass:
//!
//! - [`elementwise`]: zipped arithmetic on equal shapes.
//! - [`linalg`]: matrix product.
//! - [`spatial`]: valid 2D correlation (direct and im2col), max pooling, upsampling.
//! - [`block`]: block extraction, vertical stacking, reshaping.

use crate::error::WengertError;
use crate::ops::traits::Scalar;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::{Normal, StandardNormal};
use std::ops::{Index, IndexMut};

pub mod block;
pub mod elementwise;
pub mod linalg;
pub mod spatial;

/// `(rows, cols)` of an array.
pub type Shape = (usize, usize);

/// A dense row-major matrix of `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Array<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Array<T> {
    /// The `0x0` array.
    pub fn empty() -> Self {
        Array {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }

    /// Builds an array from row-major data.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, WengertError> {
        if data.len() != rows * cols {
            return Err(WengertError::shape_mismatch(
                "Array::from_vec",
                (rows, cols),
                (data.len(), 1),
            ));
        }
        Ok(Array { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        (self.rows, self.cols)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for arrays holding no element (`0x0`, but also `0xn` and `nx0`).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major view of the elements.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub(crate) fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl<T: Scalar> Array<T> {
    /// Builds an array from a slice of rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, WengertError> {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(WengertError::shape_mismatch(
                    "Array::from_rows",
                    (1, cols),
                    (1, row.len()),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Array {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn full(rows: usize, cols: usize, value: T) -> Self {
        Array {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::full(rows, cols, T::zero())
    }

    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::full(rows, cols, T::one())
    }

    /// A `1x1` array.
    pub fn scalar(value: T) -> Self {
        Self::full(1, 1, value)
    }

    /// Element at `(row, col)`, `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.rows && col < self.cols {
            Some(self.data[self.offset(row, col)])
        } else {
            None
        }
    }

    /// Applies `f` to every element.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        Array {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    pub fn sum(&self) -> T {
        self.data.iter().copied().sum()
    }

    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[self.offset(r, c)]);
            }
        }
        Array {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Array with entries drawn uniformly from `[low, high)`.
    pub fn random_uniform<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        low: T,
        high: T,
        rng: &mut R,
    ) -> Result<Self, WengertError> {
        if !(low < high) {
            return Err(WengertError::structural(
                "Array::random_uniform",
                format!("empty range [{:?}, {:?})", low, high),
            ));
        }
        if !low.is_finite() || !high.is_finite() || !(high - low).is_finite() {
            return Err(WengertError::structural(
                "Array::random_uniform",
                format!("range [{:?}, {:?}) is not finite", low, high),
            ));
        }
        let dist = Uniform::new(low, high);
        let data = (0..rows * cols).map(|_| dist.sample(rng)).collect();
        Ok(Array { rows, cols, data })
    }

    /// Array with entries drawn from a normal distribution.
    pub fn random_normal<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        mean: T,
        std_dev: T,
        rng: &mut R,
    ) -> Result<Self, WengertError>
    where
        StandardNormal: Distribution<T>,
    {
        if !mean.is_finite() || !(std_dev >= T::zero()) || !std_dev.is_finite() {
            return Err(WengertError::structural(
                "Array::random_normal",
                format!("invalid parameters mean {:?}, std_dev {:?}", mean, std_dev),
            ));
        }
        let dist = Normal::new(mean, std_dev)
            .map_err(|e| WengertError::structural("Array::random_normal", e.to_string()))?;
        let data = (0..rows * cols).map(|_| dist.sample(rng)).collect();
        Ok(Array { rows, cols, data })
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Index<(usize, usize)> for Array<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for array of shape ({}, {})",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Array<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for array of shape ({}, {})",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
#[path = "array_test.rs"]
mod tests;
