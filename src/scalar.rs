//! Portable lane-array vector unit.
//!
//! Emulates a vector register of any width in `1..=MAX_LANES` with a plain
//! `[f32; MAX_LANES]`. The lane loops are fixed-length, so LLVM vectorizes
//! them on targets that have SIMD and unrolls them on targets that do not.

use crate::vector::{VectorUnit, MAX_LANES};
use crate::{MatlibError, Result};

/// Vector width used when no explicit width is requested.
pub const DEFAULT_SCALAR_VLMAX: usize = 8;

/// One emulated register.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lanes([f32; MAX_LANES]);

impl Lanes {
    /// All lanes, including those past the unit's `vlmax`.
    #[cfg(test)]
    pub(crate) fn as_array(&self) -> &[f32; MAX_LANES] {
        &self.0
    }
}

#[inline(always)]
fn lanewise(a: Lanes, b: Lanes, f: impl Fn(f32, f32) -> f32) -> Lanes {
    let mut out = [0.0f32; MAX_LANES];
    for ((o, &x), &y) in out.iter_mut().zip(a.0.iter()).zip(b.0.iter()) {
        *o = f(x, y);
    }
    Lanes(out)
}

/// Vector unit with a configurable emulated width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScalarUnit {
    vlmax: usize,
}

impl ScalarUnit {
    /// Create a unit processing up to `vlmax` elements per step.
    pub fn new(vlmax: usize) -> Result<Self> {
        if vlmax == 0 || vlmax > MAX_LANES {
            return Err(MatlibError::InvalidVectorLength {
                vlmax,
                max: MAX_LANES,
            });
        }
        Ok(Self { vlmax })
    }
}

impl Default for ScalarUnit {
    fn default() -> Self {
        Self {
            vlmax: DEFAULT_SCALAR_VLMAX,
        }
    }
}

impl VectorUnit for ScalarUnit {
    type Reg = Lanes;

    fn name(self) -> &'static str {
        "scalar"
    }

    #[inline(always)]
    fn vlmax(self) -> usize {
        self.vlmax
    }

    #[inline(always)]
    fn splat(self, value: f32) -> Lanes {
        Lanes([value; MAX_LANES])
    }

    #[inline(always)]
    fn load(self, src: &[f32], fill: f32) -> Lanes {
        debug_assert!(src.len() <= self.vlmax);
        let mut lanes = [fill; MAX_LANES];
        lanes[..src.len()].copy_from_slice(src);
        Lanes(lanes)
    }

    #[inline(always)]
    fn load_strided(self, src: &[f32], stride: usize, vl: usize, fill: f32) -> Lanes {
        debug_assert!(vl <= self.vlmax);
        let mut lanes = [fill; MAX_LANES];
        for (k, lane) in lanes[..vl].iter_mut().enumerate() {
            *lane = src[k * stride];
        }
        Lanes(lanes)
    }

    #[inline(always)]
    fn store(self, dst: &mut [f32], v: Lanes) {
        debug_assert!(dst.len() <= self.vlmax);
        let n = dst.len();
        dst.copy_from_slice(&v.0[..n]);
    }

    #[inline(always)]
    fn add(self, a: Lanes, b: Lanes) -> Lanes {
        lanewise(a, b, |x, y| x + y)
    }

    #[inline(always)]
    fn sub(self, a: Lanes, b: Lanes) -> Lanes {
        lanewise(a, b, |x, y| x - y)
    }

    #[inline(always)]
    fn mul(self, a: Lanes, b: Lanes) -> Lanes {
        lanewise(a, b, |x, y| x * y)
    }

    #[inline(always)]
    fn min(self, a: Lanes, b: Lanes) -> Lanes {
        lanewise(a, b, f32::min)
    }

    #[inline(always)]
    fn max(self, a: Lanes, b: Lanes) -> Lanes {
        lanewise(a, b, f32::max)
    }

    #[inline(always)]
    fn neg(self, a: Lanes) -> Lanes {
        Lanes(a.0.map(|x| -x))
    }

    #[inline(always)]
    fn abs(self, a: Lanes) -> Lanes {
        Lanes(a.0.map(f32::abs))
    }

    #[inline(always)]
    fn mul_add(self, a: Lanes, b: Lanes, acc: Lanes) -> Lanes {
        let mut out = acc.0;
        for ((o, &x), &y) in out.iter_mut().zip(a.0.iter()).zip(b.0.iter()) {
            *o += x * y;
        }
        Lanes(out)
    }

    #[inline(always)]
    fn reduce_sum(self, v: Lanes) -> f32 {
        v.0[..self.vlmax].iter().sum()
    }

    #[inline(always)]
    fn reduce_max(self, v: Lanes) -> f32 {
        v.0[..self.vlmax].iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    #[inline(always)]
    fn reduce_min(self, v: Lanes) -> f32 {
        v.0[..self.vlmax].iter().copied().fold(f32::INFINITY, f32::min)
    }
}
