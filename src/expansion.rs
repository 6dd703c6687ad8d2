//! Exact expansion arithmetic.
//!
//! An expansion is a sequence of floating-point components, sorted by
//! increasing magnitude and pairwise nonoverlapping, whose exact sum is the
//! represented value. The slice-level routines here write into caller-owned
//! buffers and return the number of components produced; [`Expansion`] wraps
//! them in a fixed-capacity stack array.

pub mod fixed;
pub mod primitives;

pub use fixed::{Expansion, three_prod, two_two_diff, two_two_diff_zero_check};
pub use primitives::{
    fast_plus_tail, fast_two_sum, minus_tail, plus_tail, product_tail, product_tail_fma,
    presplit, product_tail_presplit, product_tail_split, split, two_diff, two_product, two_sum,
};

use crate::{ExpansionError, IeeeFloat};
use std::cmp::Ordering;

/// Adds two expansions into `output`, returning the length of the result.
///
/// The inputs are merged by increasing magnitude (ties keep `lhs` first) and
/// then a single carry pass rebuilds a nonoverlapping expansion, dropping zero
/// residuals. `output` must hold at least `lhs.len() + rhs.len()` components.
pub fn merge_sum_into<T: IeeeFloat>(lhs: &[T], rhs: &[T], output: &mut [T]) -> usize {
    let n = lhs.len();
    let m = rhs.len();
    debug_assert!(
        output.len() >= n + m,
        "output buffer of {} too small for sum of {} + {} components",
        output.len(),
        n,
        m
    );

    merge_by_magnitude(lhs, rhs, &mut output[..n + m]);
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut h_len = 0usize;
    let (mut q, hh) = fast_two_sum(output[1], output[0]);
    if hh != T::zero() {
        output[h_len] = hh;
        h_len += 1;
    }

    // Writes trail reads: h_len < g on every iteration.
    for g in 2..n + m {
        let (q_new, hh) = two_sum(q, output[g]);
        q = q_new;
        if hh != T::zero() {
            output[h_len] = hh;
            h_len += 1;
        }
    }

    if q != T::zero() {
        output[h_len] = q;
        h_len += 1;
    }

    h_len
}

/// Multiplies an expansion by a scalar into `output`, returning its length.
///
/// `output` must hold at least `2 * expansion.len()` components.
pub fn scale_into<T: IeeeFloat>(expansion: &[T], scalar: T, output: &mut [T]) -> usize {
    if expansion.is_empty() || scalar == T::zero() {
        return 0;
    }
    debug_assert!(
        output.len() >= 2 * expansion.len(),
        "output buffer of {} too small to scale {} components",
        output.len(),
        expansion.len()
    );

    let mut h_len = 0usize;
    let mut emit = |value: T| {
        if value != T::zero() {
            output[h_len] = value;
            h_len += 1;
        }
    };

    let scalar_split = presplit(scalar);
    let mut q = expansion[0] * scalar;
    emit(product_tail_presplit(expansion[0], scalar, scalar_split, q));

    for &component in &expansion[1..] {
        let product = component * scalar;
        let product_err = product_tail_presplit(component, scalar, scalar_split, product);
        let (sum, err) = two_sum(q, product_err);
        emit(err);
        q = product + sum;
        emit(fast_plus_tail(product, sum, q));
    }

    emit(q);
    h_len
}

/// Fast approximation of an expansion's value: the native sum of its
/// components from smallest to largest.
#[inline]
pub fn estimate<T: IeeeFloat>(components: &[T]) -> T {
    components
        .iter()
        .fold(T::zero(), |acc, &component| acc + component)
}

/// The largest component, which has the sign of the whole expansion.
#[inline]
pub fn most_significant<T: IeeeFloat>(components: &[T]) -> T {
    components.last().copied().unwrap_or_else(T::zero)
}

/// Validates every expansion invariant, reporting the first violation.
pub fn check_components<T: IeeeFloat>(components: &[T]) -> Result<(), ExpansionError> {
    for (index, component) in components.iter().enumerate() {
        if !component.is_finite() {
            return Err(ExpansionError::NonFinite { index });
        }
        if *component == T::zero() {
            return Err(ExpansionError::ZeroComponent { index });
        }
    }
    for (offset, pair) in components.windows(2).enumerate() {
        let index = offset + 1;
        if compare_magnitude(pair[0], pair[1]) == Ordering::Greater {
            return Err(ExpansionError::Unsorted { index });
        }
        if !nonoverlapping(pair[0], pair[1]) {
            return Err(ExpansionError::Overlapping { index });
        }
    }
    Ok(())
}

fn compare_magnitude<T: IeeeFloat>(a: T, b: T) -> Ordering {
    a.abs().partial_cmp(&b.abs()).unwrap_or(Ordering::Equal)
}

/// Merges two magnitude-sorted slices into `output`, stable with `lhs` first.
fn merge_by_magnitude<T: IeeeFloat>(lhs: &[T], rhs: &[T], output: &mut [T]) {
    let mut i = 0usize;
    let mut j = 0usize;
    for slot in output.iter_mut() {
        let take_lhs =
            j == rhs.len() || (i < lhs.len() && compare_magnitude(rhs[j], lhs[i]) != Ordering::Less);
        if take_lhs {
            *slot = lhs[i];
            i += 1;
        } else {
            *slot = rhs[j];
            j += 1;
        }
    }
}

/// True when the most significant bit of `low` lies strictly below the least
/// significant set bit of `high`. Both must be nonzero.
fn nonoverlapping<T: IeeeFloat>(low: T, high: T) -> bool {
    let (low_mantissa, low_exp, _) = low.integer_decode();
    let (high_mantissa, high_exp, _) = high.integer_decode();
    let low_msb = i32::from(low_exp) + 63 - low_mantissa.leading_zeros() as i32;
    let high_lsb = i32::from(high_exp) + high_mantissa.trailing_zeros() as i32;
    low_msb < high_lsb
}
