//! The operation table.
//!
//! Each entry becomes a method on [`Backend`] and a free function of the same
//! name running on [`Backend::active`]. The kernels trust their arguments:
//! they read and write the leading `n * m` (or `n * o`, `m * o`) elements of
//! each slice and panic if a slice is shorter.

use crate::backend::{Backend, WithUnit};
use crate::vector::VectorUnit;
use crate::{map, product, reduce};

macro_rules! kernel_ops {
    (@output) => { () };
    (@output $ret:ty) => { $ret };
    ($(
        $(#[$meta:meta])*
        fn $name:ident<$lt:lifetime>($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)?
            => $op:ident = $kernel:path;
    )*) => {
        $(
            struct $op<$lt> {
                $($arg: $ty),*
            }

            impl<$lt> WithUnit for $op<$lt> {
                type Output = kernel_ops!(@output $($ret)?);

                #[inline(always)]
                fn with_unit<V: VectorUnit>(self, unit: V) -> Self::Output {
                    let $op { $($arg),* } = self;
                    $kernel(unit, $($arg),*)
                }
            }

            $(#[$meta])*
            #[inline]
            pub fn $name<$lt>($($arg: $ty),*) $(-> $ret)? {
                Backend::active().$name($($arg),*)
            }
        )*

        impl Backend {
            $(
                $(#[$meta])*
                #[inline]
                pub fn $name<$lt>(self, $($arg: $ty),*) $(-> $ret)? {
                    self.run($op { $($arg),* })
                }
            )*
        }
    };
}

kernel_ops! {
    // ------------------------------------------------------------------ reductions

    /// Maximum coefficient of the `n x m` matrix `a`.
    ///
    /// Requires `n * m >= 1`; an empty matrix yields `f32::NEG_INFINITY`.
    fn maxcoeff<'a>(a: &'a [f32], n: usize, m: usize) -> f32 => MaxCoeff = reduce::maxcoeff;

    /// Minimum coefficient of the `n x m` matrix `a`.
    ///
    /// Requires `n * m >= 1`; an empty matrix yields `f32::INFINITY`.
    fn mincoeff<'a>(a: &'a [f32], n: usize, m: usize) -> f32 => MinCoeff = reduce::mincoeff;

    /// Euclidean (Frobenius) norm `sqrt(sum a_i^2)`.
    ///
    /// The summation order depends on the vector width, so results agree
    /// across backends to a relative tolerance rather than bit for bit.
    fn matnorm<'a>(a: &'a [f32], n: usize, m: usize) -> f32 => MatNorm = reduce::matnorm;

    // ------------------------------------------------------------------ unary

    /// `b = -a`.
    fn matneg<'a>(a: &'a [f32], b: &'a mut [f32], n: usize, m: usize)
        => MatNeg = map::matneg;

    /// `a = -a`.
    fn matneg_inplace<'a>(a: &'a mut [f32], n: usize, m: usize)
        => MatNegInplace = map::matneg_inplace;

    /// `b = |a|` coefficient-wise.
    fn cwiseabs<'a>(a: &'a [f32], b: &'a mut [f32], n: usize, m: usize)
        => CwiseAbs = map::cwiseabs;

    /// `a = |a|` coefficient-wise.
    fn cwiseabs_inplace<'a>(a: &'a mut [f32], n: usize, m: usize)
        => CwiseAbsInplace = map::cwiseabs_inplace;

    /// `b = a * f`.
    fn matmulf<'a>(a: &'a [f32], b: &'a mut [f32], f: f32, n: usize, m: usize)
        => MatMulF = map::matmulf;

    /// `a = a * f`.
    fn matmulf_inplace<'a>(a: &'a mut [f32], f: f32, n: usize, m: usize)
        => MatMulFInplace = map::matmulf_inplace;

    /// `b = a`.
    fn matcopy<'a>(a: &'a [f32], b: &'a mut [f32], n: usize, m: usize)
        => MatCopy = map::matcopy;

    /// Fill `a` with `f`.
    fn matset<'a>(a: &'a mut [f32], f: f32, n: usize, m: usize) => MatSet = map::matset;

    /// `a = f`, copying the matrix `f` into the existing matrix `a`.
    fn matsetv<'a>(a: &'a mut [f32], f: &'a [f32], n: usize, m: usize)
        => MatSetV = map::matsetv;

    // ------------------------------------------------------------------ binary

    /// `c = min(a, b)` coefficient-wise.
    fn cwisemin<'a>(a: &'a [f32], b: &'a [f32], c: &'a mut [f32], n: usize, m: usize)
        => CwiseMin = map::cwisemin;

    /// `a = min(a, b)` coefficient-wise.
    fn cwisemin_inplace<'a>(a: &'a mut [f32], b: &'a [f32], n: usize, m: usize)
        => CwiseMinInplace = map::cwisemin_inplace;

    /// `c = max(a, b)` coefficient-wise.
    fn cwisemax<'a>(a: &'a [f32], b: &'a [f32], c: &'a mut [f32], n: usize, m: usize)
        => CwiseMax = map::cwisemax;

    /// `a = max(a, b)` coefficient-wise.
    fn cwisemax_inplace<'a>(a: &'a mut [f32], b: &'a [f32], n: usize, m: usize)
        => CwiseMaxInplace = map::cwisemax_inplace;

    /// `c = a .* b`.
    fn cwisemul<'a>(a: &'a [f32], b: &'a [f32], c: &'a mut [f32], n: usize, m: usize)
        => CwiseMul = map::cwisemul;

    /// `a = a .* b`.
    fn cwisemul_inplace<'a>(a: &'a mut [f32], b: &'a [f32], n: usize, m: usize)
        => CwiseMulInplace = map::cwisemul_inplace;

    /// `c = a + b`.
    fn matadd<'a>(a: &'a [f32], b: &'a [f32], c: &'a mut [f32], n: usize, m: usize)
        => MatAdd = map::matadd;

    /// `a = a + b`.
    fn matadd_inplace<'a>(a: &'a mut [f32], b: &'a [f32], n: usize, m: usize)
        => MatAddInplace = map::matadd_inplace;

    /// `c = a - b`.
    fn matsub<'a>(a: &'a [f32], b: &'a [f32], c: &'a mut [f32], n: usize, m: usize)
        => MatSub = map::matsub;

    /// `a = a - b`.
    fn matsub_inplace<'a>(a: &'a mut [f32], b: &'a [f32], n: usize, m: usize)
        => MatSubInplace = map::matsub_inplace;

    /// `b = a - b`.
    fn matsub_rev_inplace<'a>(a: &'a [f32], b: &'a mut [f32], n: usize, m: usize)
        => MatSubRevInplace = map::matsub_rev_inplace;

    // ------------------------------------------------------------------ products

    /// `C = A * B^T`: `C[i][j] = sum_k A[i][k] * B[j][k]`.
    ///
    /// `a` is `n x o`, `b` is `m x o` and `c` is `n x m`, all row-major. Note
    /// that `b` is indexed by rows: to compute a conventional `A * B` pass the
    /// transpose of `B`.
    ///
    /// ```rust
    /// // rows of b are the unit basis, so c reproduces a
    /// let a = [1.0, 2.0, 3.0, 4.0];
    /// let identity = [1.0, 0.0, 0.0, 1.0];
    /// let mut c = [0.0; 4];
    /// vlmat::matmul(&a, &identity, &mut c, 2, 2, 2);
    /// assert_eq!(c, a);
    /// ```
    fn matmul<'a>(a: &'a [f32], b: &'a [f32], c: &'a mut [f32], n: usize, m: usize, o: usize)
        => MatMul = product::matmul;

    /// `c = A * b` with `A` an `n x m` row-major matrix, `b` of length `m`
    /// and `c` of length `n`.
    fn matvec<'a>(a: &'a [f32], b: &'a [f32], c: &'a mut [f32], n: usize, m: usize)
        => MatVec = product::matvec;

    /// `c = A^T * b` with `A` an `n x m` row-major matrix, `b` of length `n`
    /// and `c` of length `m`.
    ///
    /// Each output reads one column of `A` with stride `m`; the transpose is
    /// not formed.
    fn matvec_transpose<'a>(a: &'a [f32], b: &'a [f32], c: &'a mut [f32], n: usize, m: usize)
        => MatVecTranspose = product::matvec_transpose;

    // ------------------------------------------------------------------ data movement

    /// `b = a^T` with `a` an `n x m` and `b` an `m x n` row-major matrix.
    fn transpose<'a>(a: &'a [f32], b: &'a mut [f32], n: usize, m: usize)
        => Transpose = crate::transpose::transpose;
}
