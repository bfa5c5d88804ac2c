//! Strip-mined `f32` matrix/vector kernels for embedded numeric pipelines.
//!
//! Every operation walks its caller-owned buffer in strips whose length comes
//! from a runtime capability query ([`VectorUnit::setvl`]), so the same code
//! runs correctly for any register width, including the final partial strip.
//!
//! # Operations
//!
//! Matrices are `n x m` row-major `f32` slices passed with their dimensions.
//!
//! ## Reductions
//!
//! - [`maxcoeff`], [`mincoeff`]: extreme coefficients
//! - [`matnorm`]: Euclidean norm
//!
//! ## Elementwise
//!
//! - [`matneg`], [`cwiseabs`], [`matmulf`]: unary maps (with `_inplace` forms)
//! - [`cwisemin`], [`cwisemax`], [`cwisemul`], [`matadd`], [`matsub`]: binary maps
//!   (with `_inplace` forms, plus [`matsub_rev_inplace`])
//! - [`matcopy`], [`matset`], [`matsetv`]: copy and fill
//!
//! ## Products
//!
//! - [`matmul`]: `C = A * B^T` (row-times-row)
//! - [`matvec`]: `c = A * b`
//! - [`matvec_transpose`]: `c = A^T * b` without forming the transpose
//!
//! ## Data movement
//!
//! - [`transpose`]
//!
//! # Backends
//!
//! The free functions run on [`Backend::active`], detected once per process.
//! With the default `simd` feature this is [`Backend::Simd`], which uses the
//! widest instruction set `pulp` finds at runtime. [`Backend::scalar`] runs
//! the same kernels on an emulated register of any width up to [`MAX_LANES`].
//!
//! ```rust
//! use vlmat::Backend;
//!
//! let a = [1.0, 2.0, 3.0, 4.0];
//! let mut c = [0.0; 2];
//! vlmat::matvec(&a, &[1.0, 1.0], &mut c, 2, 2);
//! assert_eq!(c, [3.0, 7.0]);
//!
//! // same kernel on a 3-lane emulated unit
//! let backend = Backend::scalar(3).unwrap();
//! backend.matvec(&a, &[1.0, 1.0], &mut c, 2, 2);
//! assert_eq!(c, [3.0, 7.0]);
//! ```
//!
//! # Checked views
//!
//! The root functions trust their dimensions. [`MatRef`] / [`MatMut`] and the
//! functions in [`ops_view`] validate shapes and report [`MatlibError`]s.
//!
//! ```rust
//! use vlmat::{ops_view, MatMut, MatRef};
//!
//! let a_data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let a = MatRef::new(&a_data, 2, 3).unwrap();
//! let mut t_data = [0.0; 6];
//! let mut t = MatMut::new(&mut t_data, 3, 2).unwrap();
//! ops_view::transpose_into(&mut t, &a).unwrap();
//! assert_eq!(t_data, [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
//! ```

mod backend;
mod map;
mod ops;
pub mod ops_view;
mod product;
mod reduce;
pub mod scalar;
#[cfg(feature = "simd")]
pub mod simd;
mod transpose;
pub mod vector;
pub mod view;

// ============================================================================
// Vector units and backends
// ============================================================================
pub use backend::{Backend, WithUnit};
pub use scalar::{ScalarUnit, DEFAULT_SCALAR_VLMAX};
pub use vector::{strips, Strips, VectorUnit, MAX_LANES};

// ============================================================================
// Kernels
// ============================================================================
pub use ops::{
    cwiseabs, cwiseabs_inplace, cwisemax, cwisemax_inplace, cwisemin, cwisemin_inplace,
    cwisemul, cwisemul_inplace, matadd, matadd_inplace, matcopy, matmul, matmulf,
    matmulf_inplace, matneg, matneg_inplace, matnorm, matset, matsetv, matsub, matsub_inplace,
    matsub_rev_inplace, matvec, matvec_transpose, maxcoeff, mincoeff, transpose,
};

// ============================================================================
// Views
// ============================================================================
pub use view::{MatMut, MatRef};

// ============================================================================
// Error types
// ============================================================================

/// Errors reported by the checked view layer and backend construction.
#[derive(Debug, thiserror::Error)]
pub enum MatlibError {
    /// Buffer length does not equal `rows * cols`.
    #[error("buffer of {len} elements cannot hold a {rows}x{cols} matrix ({expected} expected)")]
    BufferLength {
        rows: usize,
        cols: usize,
        expected: usize,
        len: usize,
    },

    /// Matrix shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch((usize, usize), (usize, usize)),

    /// Vector operand has the wrong length.
    #[error("vector length mismatch: expected {expected}, got {len}")]
    VectorLength { expected: usize, len: usize },

    /// Reduction over a matrix with no elements.
    #[error("reduction over an empty matrix")]
    Empty,

    /// Emulated vector width outside `1..=MAX_LANES`.
    #[error("invalid vector length {vlmax}: must be in 1..={max}")]
    InvalidVectorLength { vlmax: usize, max: usize },

    /// `rows * cols` overflows `usize`.
    #[error("dimension overflow: {rows}x{cols}")]
    DimensionOverflow { rows: usize, cols: usize },
}

/// Result type for checked operations.
pub type Result<T> = std::result::Result<T, MatlibError>;
