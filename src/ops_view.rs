//! Shape-checked operations on [`MatRef`] / [`MatMut`] views.
//!
//! Each function validates that its operands agree in shape and then runs the
//! corresponding kernel on [`Backend::active`]. Use these at API boundaries;
//! inner loops that already know their shapes can call the unchecked
//! functions at the crate root.

use crate::backend::Backend;
use crate::view::{MatMut, MatRef};
use crate::{MatlibError, Result};

fn ensure_same_shape(a: (usize, usize), b: (usize, usize)) -> Result<()> {
    if a != b {
        return Err(MatlibError::ShapeMismatch(a, b));
    }
    Ok(())
}

fn ensure_vector_len(expected: usize, len: usize) -> Result<()> {
    if expected != len {
        return Err(MatlibError::VectorLength { expected, len });
    }
    Ok(())
}

/// Maximum coefficient.
///
/// # Errors
/// [`MatlibError::Empty`] for a matrix with no elements.
pub fn maxcoeff(a: &MatRef<'_>) -> Result<f32> {
    if a.is_empty() {
        return Err(MatlibError::Empty);
    }
    Ok(Backend::active().maxcoeff(a.as_slice(), a.rows(), a.cols()))
}

/// Minimum coefficient.
///
/// # Errors
/// [`MatlibError::Empty`] for a matrix with no elements.
pub fn mincoeff(a: &MatRef<'_>) -> Result<f32> {
    if a.is_empty() {
        return Err(MatlibError::Empty);
    }
    Ok(Backend::active().mincoeff(a.as_slice(), a.rows(), a.cols()))
}

/// Euclidean norm; `0.0` for an empty matrix.
pub fn matnorm(a: &MatRef<'_>) -> f32 {
    Backend::active().matnorm(a.as_slice(), a.rows(), a.cols())
}

/// `dest = -src`
pub fn matneg_into(dest: &mut MatMut<'_>, src: &MatRef<'_>) -> Result<()> {
    ensure_same_shape(dest.shape(), src.shape())?;
    let (n, m) = src.shape();
    Backend::active().matneg(src.as_slice(), dest.as_mut_slice(), n, m);
    Ok(())
}

/// `dest = |src|`
pub fn cwiseabs_into(dest: &mut MatMut<'_>, src: &MatRef<'_>) -> Result<()> {
    ensure_same_shape(dest.shape(), src.shape())?;
    let (n, m) = src.shape();
    Backend::active().cwiseabs(src.as_slice(), dest.as_mut_slice(), n, m);
    Ok(())
}

/// `dest = src * f`
pub fn matmulf_into(dest: &mut MatMut<'_>, src: &MatRef<'_>, f: f32) -> Result<()> {
    ensure_same_shape(dest.shape(), src.shape())?;
    let (n, m) = src.shape();
    Backend::active().matmulf(src.as_slice(), dest.as_mut_slice(), f, n, m);
    Ok(())
}

/// `dest = src`
pub fn copy_into(dest: &mut MatMut<'_>, src: &MatRef<'_>) -> Result<()> {
    ensure_same_shape(dest.shape(), src.shape())?;
    let (n, m) = src.shape();
    Backend::active().matcopy(src.as_slice(), dest.as_mut_slice(), n, m);
    Ok(())
}

/// Fill every element of `dest` with `f`.
pub fn fill(dest: &mut MatMut<'_>, f: f32) {
    let (n, m) = dest.shape();
    Backend::active().matset(dest.as_mut_slice(), f, n, m);
}

macro_rules! checked_binary {
    ($($(#[$meta:meta])* $name:ident => $kernel:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(dest: &mut MatMut<'_>, a: &MatRef<'_>, b: &MatRef<'_>) -> Result<()> {
                ensure_same_shape(a.shape(), b.shape())?;
                ensure_same_shape(dest.shape(), a.shape())?;
                let (n, m) = a.shape();
                Backend::active().$kernel(a.as_slice(), b.as_slice(), dest.as_mut_slice(), n, m);
                Ok(())
            }
        )*
    };
}

checked_binary! {
    /// `dest = min(a, b)` coefficient-wise
    cwisemin_into => cwisemin;
    /// `dest = max(a, b)` coefficient-wise
    cwisemax_into => cwisemax;
    /// `dest = a .* b`
    cwisemul_into => cwisemul;
    /// `dest = a + b`
    matadd_into => matadd;
    /// `dest = a - b`
    matsub_into => matsub;
}

/// `dest = a * b^T` (see [`crate::matmul`] for the row-times-row convention).
///
/// `a` is `n x o`, `b` is `m x o`, `dest` is `n x m`.
pub fn matmul_into(dest: &mut MatMut<'_>, a: &MatRef<'_>, b: &MatRef<'_>) -> Result<()> {
    let (n, o) = a.shape();
    let (m, o_b) = b.shape();
    if o != o_b {
        return Err(MatlibError::ShapeMismatch(a.shape(), b.shape()));
    }
    ensure_same_shape(dest.shape(), (n, m))?;
    Backend::active().matmul(a.as_slice(), b.as_slice(), dest.as_mut_slice(), n, m, o);
    Ok(())
}

/// `dest = a * x`
pub fn matvec_into(dest: &mut [f32], a: &MatRef<'_>, x: &[f32]) -> Result<()> {
    let (n, m) = a.shape();
    ensure_vector_len(m, x.len())?;
    ensure_vector_len(n, dest.len())?;
    Backend::active().matvec(a.as_slice(), x, dest, n, m);
    Ok(())
}

/// `dest = a^T * x`
pub fn matvec_transpose_into(dest: &mut [f32], a: &MatRef<'_>, x: &[f32]) -> Result<()> {
    let (n, m) = a.shape();
    ensure_vector_len(n, x.len())?;
    ensure_vector_len(m, dest.len())?;
    Backend::active().matvec_transpose(a.as_slice(), x, dest, n, m);
    Ok(())
}

/// `dest = src^T`
pub fn transpose_into(dest: &mut MatMut<'_>, src: &MatRef<'_>) -> Result<()> {
    let (n, m) = src.shape();
    ensure_same_shape(dest.shape(), (m, n))?;
    Backend::active().transpose(src.as_slice(), dest.as_mut_slice(), n, m);
    Ok(())
}
