//! Orientation, in-circle and in-sphere predicates.
//!
//! Each predicate returns a value whose sign is exact for the given
//! coordinates; its magnitude is only an approximation of the determinant.
//! [`adaptive`] is the variant to call. [`exact`] evaluates the determinant
//! entirely in expansion arithmetic and serves as its final fallback.

pub mod adaptive;
pub mod exact;

use crate::IeeeFloat;
use std::cmp::Ordering;

/// Sign of a predicate result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Classifies a predicate result. `-0.0` counts as zero.
    pub fn of<T: IeeeFloat>(value: T) -> Self {
        if value > T::zero() {
            Sign::Positive
        } else if value < T::zero() {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    /// `-1`, `0` or `1`.
    pub fn signum(self) -> i32 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }

    /// The sign after swapping two input points.
    pub fn reversed(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

impl From<Sign> for Ordering {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::Negative => Ordering::Less,
            Sign::Zero => Ordering::Equal,
            Sign::Positive => Ordering::Greater,
        }
    }
}

#[inline(always)]
fn debug_assert_finite<T: IeeeFloat>(points: &[&[T]]) {
    debug_assert!(
        points.iter().all(|p| p.iter().all(|v| v.is_finite())),
        "predicate coordinates must be finite"
    );
}
