//! Capability trait for the binary IEEE-754 types the predicates run on.

use crate::bounds::ErrorBounds;
use num_traits::Float;
use std::fmt::{Debug, Display};
use std::ops::{AddAssign, MulAssign, SubAssign};

/// Whether the residual of a product is taken from a fused multiply-add.
///
/// Selected at compile time: targets that advertise hardware FMA (and every
/// aarch64 target) use it, others fall back to Dekker's split product. The
/// `fma` feature forces the fused path everywhere.
pub const USE_FMA: bool = cfg!(any(
    feature = "fma",
    target_feature = "fma",
    target_arch = "aarch64"
));

/// A radix-2 IEEE-754 floating-point type with a known significand width.
///
/// Everything the expansion arithmetic needs beyond ordinary arithmetic is
/// exposed as associated constants, so the error bounds and the splitter are
/// folded into the generated code for each instantiation.
pub trait IeeeFloat:
    Float + AddAssign + SubAssign + MulAssign + Debug + Display + Default + Send + Sync + 'static
{
    /// Significand precision in bits, including the implicit leading bit.
    const DIGITS: u32;

    /// Unit roundoff `2^-DIGITS`, half the gap between 1 and the next float.
    const EPSILON: Self;

    /// `2^ceil(DIGITS / 2) + 1`, the multiplier used by Dekker's split.
    const SPLITTER: Self;

    /// Largest magnitude whose split cannot overflow in `SPLITTER * a`.
    const SPLIT_BOUND: Self;

    /// Power of two that brings any finite value under `SPLIT_BOUND`.
    const SPLIT_SCALE: Self;

    /// Take product residuals from `mul_add` instead of the split product.
    const USE_FMA: bool;

    /// Error-bound multipliers for every predicate stage.
    const BOUNDS: ErrorBounds<Self>;
}

macro_rules! impl_ieee_float {
    ($ty:ident) => {
        impl IeeeFloat for $ty {
            const DIGITS: u32 = $ty::MANTISSA_DIGITS;
            const EPSILON: $ty = ErrorBounds::<$ty>::NATIVE.epsilon;
            const SPLITTER: $ty = (1u64 << $ty::MANTISSA_DIGITS.div_ceil(2)) as $ty + 1.0;
            const SPLIT_BOUND: $ty = {
                let shift = $ty::MAX_EXP as u32 - $ty::MANTISSA_DIGITS.div_ceil(2) - 1;
                let mut bound: $ty = 1.0;
                let mut i = 0;
                while i < shift {
                    bound *= 2.0;
                    i += 1;
                }
                bound
            };
            const SPLIT_SCALE: $ty = (1u64 << ($ty::MANTISSA_DIGITS.div_ceil(2) + 1)) as $ty;
            const USE_FMA: bool = USE_FMA;
            const BOUNDS: ErrorBounds<$ty> = ErrorBounds::<$ty>::NATIVE;
        }
    };
}

impl_ieee_float!(f32);
impl_ieee_float!(f64);
