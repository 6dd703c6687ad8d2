//! Error-free transformations of single floating-point operations.
//!
//! Each function returns the rounded result of one IEEE operation together
//! with the exact rounding residual, so that `result + residual` equals the
//! infinitely precise value. All of them assume finite operands and no
//! overflow of the rounded result. The split-based product rescales operands
//! above `SPLIT_BOUND` by a power of two, so it stays exact up to the largest
//! finite values.

use crate::IeeeFloat;

/// Residual of `x = fl(a + b)`.
#[inline(always)]
pub fn plus_tail<T: IeeeFloat>(a: T, b: T, x: T) -> T {
    let b_virtual = x - a;
    let a_virtual = x - b_virtual;
    let b_roundoff = b - b_virtual;
    let a_roundoff = a - a_virtual;
    a_roundoff + b_roundoff
}

/// Residual of `x = fl(a + b)` when `|a| >= |b|`.
#[inline(always)]
pub fn fast_plus_tail<T: IeeeFloat>(a: T, b: T, x: T) -> T {
    let b_virtual = x - a;
    b - b_virtual
}

/// Residual of `x = fl(a - b)`.
#[inline(always)]
pub fn minus_tail<T: IeeeFloat>(a: T, b: T, x: T) -> T {
    let b_virtual = a - x;
    let a_virtual = x + b_virtual;
    let b_roundoff = b_virtual - b;
    let a_roundoff = a - a_virtual;
    a_roundoff + b_roundoff
}

/// Returns `(fl(a + b), residual)`.
#[inline(always)]
pub fn two_sum<T: IeeeFloat>(a: T, b: T) -> (T, T) {
    let sum = a + b;
    (sum, plus_tail(a, b, sum))
}

/// Returns `(fl(a + b), residual)`; requires `|a| >= |b|`.
#[inline(always)]
pub fn fast_two_sum<T: IeeeFloat>(a: T, b: T) -> (T, T) {
    debug_assert!(
        a.abs() >= b.abs(),
        "FAST-TWO-SUM requires |a| >= |b| ({} vs {})",
        a,
        b
    );
    let sum = a + b;
    (sum, fast_plus_tail(a, b, sum))
}

/// Returns `(fl(a - b), residual)`.
#[inline(always)]
pub fn two_diff<T: IeeeFloat>(a: T, b: T) -> (T, T) {
    let diff = a - b;
    (diff, minus_tail(a, b, diff))
}

/// Splits `a` into two halves of at most `ceil(p / 2)` significant bits each,
/// with `hi + lo == a` exactly. Requires `|a| <= T::SPLIT_BOUND`.
#[inline(always)]
pub fn split<T: IeeeFloat>(a: T) -> (T, T) {
    debug_assert!(
        !needs_rescale(a),
        "split operand {} exceeds the split bound",
        a
    );
    let c = T::SPLITTER * a;
    let a_big = c - a;
    let hi = c - a_big;
    (hi, a - hi)
}

/// Dekker's residual of `p = fl(a * b)` from pre-split operands.
#[inline(always)]
fn dekker_tail<T: IeeeFloat>(a_split: (T, T), b_split: (T, T), p: T) -> T {
    let (a_hi, a_lo) = a_split;
    let (b_hi, b_lo) = b_split;
    let mut y = p - a_hi * b_hi;
    y -= a_lo * b_hi;
    y -= a_hi * b_lo;
    a_lo * b_lo - y
}

/// Residual of `p = fl(a * b)` through a fused multiply-add.
#[inline(always)]
pub fn product_tail_fma<T: IeeeFloat>(a: T, b: T, p: T) -> T {
    a.mul_add(b, -p)
}

/// Residual of `p = fl(a * b)` through Dekker's split product.
#[inline(always)]
pub fn product_tail_split<T: IeeeFloat>(a: T, b: T, p: T) -> T {
    if needs_rescale(a) || needs_rescale(b) || needs_rescale(p) {
        return rescaled_product_tail(a, b, p);
    }
    dekker_tail(split(a), split(b), p)
}

#[inline(always)]
fn needs_rescale<T: IeeeFloat>(a: T) -> bool {
    a.abs() > T::SPLIT_BOUND
}

/// Dekker's residual after dividing an operand by `SPLIT_SCALE`: every
/// operand above `SPLIT_BOUND`, or the larger one when only the product is
/// that big. Dividing `p` by the same powers of two keeps it the rounded
/// product of the scaled operands, and the scaled residual is multiplied back.
#[cold]
fn rescaled_product_tail<T: IeeeFloat>(a: T, b: T, p: T) -> T {
    let rescale_a = needs_rescale(a) || (needs_rescale(p) && a.abs() >= b.abs());
    let rescale_b = needs_rescale(b) || (needs_rescale(p) && !rescale_a);
    let (mut a, mut b, mut p) = (a, b, p);
    let mut scale = T::one();
    if rescale_a {
        a = a / T::SPLIT_SCALE;
        p = p / T::SPLIT_SCALE;
        scale *= T::SPLIT_SCALE;
    }
    if rescale_b {
        b = b / T::SPLIT_SCALE;
        p = p / T::SPLIT_SCALE;
        scale *= T::SPLIT_SCALE;
    }
    dekker_tail(split(a), split(b), p) * scale
}

/// Residual of `p = fl(a * b)` using the path selected for `T`.
#[inline(always)]
pub fn product_tail<T: IeeeFloat>(a: T, b: T, p: T) -> T {
    if T::USE_FMA {
        product_tail_fma(a, b, p)
    } else {
        product_tail_split(a, b, p)
    }
}

/// Like [`product_tail`] but reuses `split(b)` when `b` is shared by many
/// products, as in scaling an expansion.
///
/// `b_split` is ignored on the fused path and whenever an operand or the
/// product needs rescaling; [`presplit`] produces a valid argument for both.
#[inline(always)]
pub fn product_tail_presplit<T: IeeeFloat>(a: T, b: T, b_split: (T, T), p: T) -> T {
    if T::USE_FMA {
        product_tail_fma(a, b, p)
    } else if needs_rescale(a) || needs_rescale(b) || needs_rescale(p) {
        rescaled_product_tail(a, b, p)
    } else {
        dekker_tail(split(a), b_split, p)
    }
}

/// The halves [`product_tail_presplit`] expects for a shared factor `b`.
///
/// Only the split product reads them; the fused path skips the split.
#[inline(always)]
pub fn presplit<T: IeeeFloat>(b: T) -> (T, T) {
    if T::USE_FMA || needs_rescale(b) {
        (b, T::zero())
    } else {
        split(b)
    }
}

/// Returns `(fl(a * b), residual)`.
#[inline(always)]
pub fn two_product<T: IeeeFloat>(a: T, b: T) -> (T, T) {
    let product = a * b;
    (product, product_tail(a, b, product))
}
