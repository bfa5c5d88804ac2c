//! Shape-checked matrix views over caller-owned buffers.
//!
//! [`MatRef`] and [`MatMut`] pair a row-major `f32` slice with its dimensions
//! and validate `len == rows * cols` once at construction. The functions in
//! [`crate::ops_view`] take these views and check operand shapes against each
//! other before calling the unchecked kernels.

use crate::{MatlibError, Result};

/// `rows * cols`, or an error if the product overflows.
pub(crate) fn checked_len(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or(MatlibError::DimensionOverflow { rows, cols })
}

fn validate(len: usize, rows: usize, cols: usize) -> Result<()> {
    let expected = checked_len(rows, cols)?;
    if len != expected {
        return Err(MatlibError::BufferLength {
            rows,
            cols,
            expected,
            len,
        });
    }
    Ok(())
}

/// Immutable row-major `rows x cols` view.
#[derive(Clone, Copy, Debug)]
pub struct MatRef<'a> {
    data: &'a [f32],
    rows: usize,
    cols: usize,
}

impl<'a> MatRef<'a> {
    /// Wrap `data` as a `rows x cols` matrix.
    ///
    /// # Errors
    /// [`MatlibError::BufferLength`] if `data.len() != rows * cols`.
    pub fn new(data: &'a [f32], rows: usize, cols: usize) -> Result<Self> {
        validate(data.len(), rows, cols)?;
        Ok(Self { data, rows, cols })
    }

    /// Wrap `data` as a column vector.
    pub fn col(data: &'a [f32]) -> Self {
        Self {
            data,
            rows: data.len(),
            cols: 1,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Element at row `i`, column `j`.
    ///
    /// # Panics
    /// If `i` or `j` is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of range");
        self.data[i * self.cols + j]
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &'a [f32] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
}

/// Mutable row-major `rows x cols` view.
#[derive(Debug)]
pub struct MatMut<'a> {
    data: &'a mut [f32],
    rows: usize,
    cols: usize,
}

impl<'a> MatMut<'a> {
    /// Wrap `data` as a `rows x cols` matrix.
    ///
    /// # Errors
    /// [`MatlibError::BufferLength`] if `data.len() != rows * cols`.
    pub fn new(data: &'a mut [f32], rows: usize, cols: usize) -> Result<Self> {
        validate(data.len(), rows, cols)?;
        Ok(Self { data, rows, cols })
    }

    /// Wrap `data` as a column vector.
    pub fn col(data: &'a mut [f32]) -> Self {
        let rows = data.len();
        Self {
            data,
            rows,
            cols: 1,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data[..]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data[..]
    }

    /// Reborrow as an immutable view.
    #[inline]
    pub fn as_view(&self) -> MatRef<'_> {
        MatRef {
            data: &self.data[..],
            rows: self.rows,
            cols: self.cols,
        }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.as_view().get(i, j)
    }

    /// Overwrite the element at row `i`, column `j`.
    ///
    /// # Panics
    /// If `i` or `j` is out of range.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f32) {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of range");
        self.data[i * self.cols + j] = value;
    }
}
