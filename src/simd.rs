//! `pulp`-backed vector unit.
//!
//! `pulp::Arch` detects the widest instruction set available at runtime and
//! calls back into [`WithSimd::with_simd`] with a token type `S`. The register
//! width of `S` is the unit's `vlmax`, so the same strip-mined kernel runs with
//! 16 lanes on AVX-512, 8 on AVX2, 4 on NEON and 1 on the scalar fallback.

use crate::backend::WithUnit;
use crate::vector::{VectorUnit, MAX_LANES};
use pulp::{Simd, WithSimd};
use std::sync::OnceLock;

/// Vector unit over the registers of a detected instruction set.
#[derive(Clone, Copy, Debug)]
pub struct SimdUnit<S> {
    simd: S,
}

impl<S: Simd> SimdUnit<S> {
    #[inline(always)]
    fn lanes() -> usize {
        std::mem::size_of::<S::f32s>() / std::mem::size_of::<f32>()
    }

    #[inline(always)]
    fn load_lanes(lanes: &[f32; MAX_LANES]) -> S::f32s {
        bytemuck::pod_read_unaligned(bytemuck::cast_slice(&lanes[..Self::lanes()]))
    }
}

impl<S: Simd> VectorUnit for SimdUnit<S> {
    type Reg = S::f32s;

    fn name(self) -> &'static str {
        "simd"
    }

    #[inline(always)]
    fn vlmax(self) -> usize {
        Self::lanes()
    }

    #[inline(always)]
    fn splat(self, value: f32) -> S::f32s {
        self.simd.splat_f32s(value)
    }

    #[inline(always)]
    fn load(self, src: &[f32], fill: f32) -> S::f32s {
        debug_assert!(src.len() <= Self::lanes());
        if src.len() == Self::lanes() {
            return bytemuck::pod_read_unaligned(bytemuck::cast_slice(src));
        }
        let mut lanes = [fill; MAX_LANES];
        lanes[..src.len()].copy_from_slice(src);
        Self::load_lanes(&lanes)
    }

    #[inline(always)]
    fn load_strided(self, src: &[f32], stride: usize, vl: usize, fill: f32) -> S::f32s {
        debug_assert!(vl <= Self::lanes());
        let mut lanes = [fill; MAX_LANES];
        for (k, lane) in lanes[..vl].iter_mut().enumerate() {
            *lane = src[k * stride];
        }
        Self::load_lanes(&lanes)
    }

    #[inline(always)]
    fn store(self, dst: &mut [f32], v: S::f32s) {
        debug_assert!(dst.len() <= Self::lanes());
        let lanes: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        let n = dst.len();
        dst.copy_from_slice(&lanes[..n]);
    }

    #[inline(always)]
    fn add(self, a: S::f32s, b: S::f32s) -> S::f32s {
        self.simd.add_f32s(a, b)
    }

    #[inline(always)]
    fn sub(self, a: S::f32s, b: S::f32s) -> S::f32s {
        self.simd.sub_f32s(a, b)
    }

    #[inline(always)]
    fn mul(self, a: S::f32s, b: S::f32s) -> S::f32s {
        self.simd.mul_f32s(a, b)
    }

    #[inline(always)]
    fn min(self, a: S::f32s, b: S::f32s) -> S::f32s {
        self.simd.min_f32s(a, b)
    }

    #[inline(always)]
    fn max(self, a: S::f32s, b: S::f32s) -> S::f32s {
        self.simd.max_f32s(a, b)
    }

    #[inline(always)]
    fn neg(self, a: S::f32s) -> S::f32s {
        // -1 * x flips the sign bit exactly, including for signed zeros
        self.simd.mul_f32s(a, self.simd.splat_f32s(-1.0))
    }

    #[inline(always)]
    fn abs(self, a: S::f32s) -> S::f32s {
        self.simd.abs_f32s(a)
    }

    #[inline(always)]
    fn mul_add(self, a: S::f32s, b: S::f32s, acc: S::f32s) -> S::f32s {
        self.simd.mul_add_f32s(a, b, acc)
    }

    #[inline(always)]
    fn reduce_sum(self, v: S::f32s) -> f32 {
        self.simd.reduce_sum_f32s(v)
    }

    #[inline(always)]
    fn reduce_max(self, v: S::f32s) -> f32 {
        self.simd.reduce_max_f32s(v)
    }

    #[inline(always)]
    fn reduce_min(self, v: S::f32s) -> f32 {
        self.simd.reduce_min_f32s(v)
    }
}

struct OnSimd<Op>(Op);

impl<Op: WithUnit> WithSimd for OnSimd<Op> {
    type Output = Op::Output;

    #[inline(always)]
    fn with_simd<S: Simd>(self, simd: S) -> Self::Output {
        self.0.with_unit(SimdUnit { simd })
    }
}

fn arch() -> pulp::Arch {
    static ARCH: OnceLock<pulp::Arch> = OnceLock::new();
    *ARCH.get_or_init(pulp::Arch::new)
}

/// Run `op` on the widest vector unit the running CPU supports.
///
/// Feature detection happens once per process; each call only pays for the
/// jump into the matching `target_feature` body.
#[inline(always)]
pub(crate) fn dispatch<Op: WithUnit>(op: Op) -> Op::Output {
    arch().dispatch(OnSimd(op))
}
