use super::primitives::{minus_tail, plus_tail, product_tail, two_product, two_sum};
use super::{check_components, estimate, merge_sum_into, most_significant, scale_into};
use crate::{ExpansionError, IeeeFloat};
use std::fmt;
use std::ops::{AddAssign, Neg, SubAssign};

/// Fixed-capacity expansion stored inline.
///
/// The capacity `N` is the largest number of components the producing
/// operation can emit; it never grows at runtime. Operations that widen an
/// expansion take the output capacity as a const parameter and reject an
/// insufficient one at compile time.
///
/// Slots past the populated length hold scratch values from the producing
/// combinator; equality and `Debug` look only at [`components`](Self::components).
#[derive(Clone, Copy)]
pub struct Expansion<T, const N: usize> {
    len: usize,
    components: [T; N],
}

impl<T: IeeeFloat, const N: usize> Expansion<T, N> {
    /// The empty expansion, representing zero.
    pub fn zero() -> Self {
        Self {
            len: 0,
            components: [T::zero(); N],
        }
    }

    /// Number of nonzero components.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for the expansion of zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The populated components, smallest first.
    pub fn components(&self) -> &[T] {
        &self.components[..self.len]
    }

    /// Appends a component above the current ones. Zeros are skipped.
    ///
    /// The caller is responsible for keeping the expansion nonoverlapping.
    pub fn push(&mut self, component: T) -> Result<(), ExpansionError> {
        if component == T::zero() {
            return Ok(());
        }
        if self.len == N {
            return Err(ExpansionError::CapacityExceeded { capacity: N });
        }
        self.components[self.len] = component;
        self.len += 1;
        Ok(())
    }

    /// Builds an expansion from components given smallest first.
    pub fn from_slice(components: &[T]) -> Result<Self, ExpansionError> {
        let mut result = Self::zero();
        for &component in components {
            result.push(component)?;
        }
        Ok(result)
    }

    /// Native-precision approximation of the value.
    pub fn estimate(&self) -> T {
        estimate(self.components())
    }

    /// The largest component; zero for the empty expansion.
    pub fn most_significant(&self) -> T {
        most_significant(self.components())
    }

    /// Flips the sign of every component in place.
    pub fn negate(&mut self) {
        for component in &mut self.components[..self.len] {
            *component = -*component;
        }
    }

    /// Exact sum of two expansions.
    pub fn sum<const M: usize, const K: usize>(&self, rhs: &Expansion<T, M>) -> Expansion<T, K> {
        const {
            assert!(K >= N + M, "expansion sum needs capacity for both operands");
        }
        let mut result = Expansion::<T, K>::zero();
        result.len = merge_sum_into(self.components(), rhs.components(), &mut result.components);
        result
    }

    /// Exact difference of two expansions.
    pub fn difference<const M: usize, const K: usize>(
        &self,
        rhs: &Expansion<T, M>,
    ) -> Expansion<T, K> {
        self.sum(&-*rhs)
    }

    /// Exact product with a scalar.
    pub fn scale<const K: usize>(&self, scalar: T) -> Expansion<T, K> {
        const {
            assert!(K >= 2 * N, "expansion scale needs twice the input capacity");
        }
        let mut result = Expansion::<T, K>::zero();
        result.len = scale_into(self.components(), scalar, &mut result.components);
        result
    }

    /// Ensures the components are finite, nonzero, sorted and nonoverlapping.
    pub fn check_invariants(&self) -> Result<(), ExpansionError> {
        check_components(self.components())
    }

    fn from_pair(value: T, tail: T) -> Self {
        let mut result = Self::zero();
        for component in [tail, value] {
            if component != T::zero() {
                result.components[result.len] = component;
                result.len += 1;
            }
        }
        result
    }
}

impl<T: IeeeFloat> Expansion<T, 2> {
    /// Exact `a + b`.
    pub fn plus(a: T, b: T) -> Self {
        let (sum, err) = two_sum(a, b);
        Self::from_pair(sum, err)
    }

    /// Exact `a - b`.
    pub fn minus(a: T, b: T) -> Self {
        Self::plus(a, -b)
    }

    /// Exact `a * b`.
    pub fn mult(a: T, b: T) -> Self {
        let (product, err) = two_product(a, b);
        Self::from_pair(product, err)
    }
}

impl<T: IeeeFloat, const N: usize> Default for Expansion<T, N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: IeeeFloat, const N: usize, const M: usize> PartialEq<Expansion<T, M>> for Expansion<T, N> {
    fn eq(&self, other: &Expansion<T, M>) -> bool {
        self.components() == other.components()
    }
}

impl<T: IeeeFloat, const N: usize> fmt::Debug for Expansion<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expansion")
            .field("components", &self.components())
            .finish()
    }
}

impl<T: IeeeFloat, const N: usize> Neg for Expansion<T, N> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.negate();
        self
    }
}

/// In-place accumulation. Panics if the combined length exceeds `N`.
impl<T: IeeeFloat, const N: usize, const M: usize> AddAssign<&Expansion<T, M>> for Expansion<T, N> {
    fn add_assign(&mut self, rhs: &Expansion<T, M>) {
        let mut merged = [T::zero(); N];
        let len = merge_sum_into(self.components(), rhs.components(), &mut merged);
        self.components = merged;
        self.len = len;
    }
}

impl<T: IeeeFloat, const N: usize, const M: usize> SubAssign<&Expansion<T, M>> for Expansion<T, N> {
    fn sub_assign(&mut self, rhs: &Expansion<T, M>) {
        *self += &-*rhs;
    }
}

/// Exact 2×2 determinant `a·d − b·c` of the matrix `[[a, b], [c, d]]`.
#[inline]
pub fn two_two_diff<T: IeeeFloat>(a: T, b: T, c: T, d: T) -> Expansion<T, 4> {
    let ad1 = a * d;
    let ad0 = product_tail(a, d, ad1);
    let cb1 = c * b;
    let cb0 = product_tail(c, b, cb1);

    // Two_One_Diff of (ad1, ad0) by cb0, then by cb1.
    let i0 = ad0 - cb0;
    let x0 = minus_tail(ad0, cb0, i0);
    let j = ad1 + i0;
    let k0 = plus_tail(ad1, i0, j);
    let i1 = k0 - cb1;
    let x1 = minus_tail(k0, cb1, i1);
    let x3 = j + i1;
    let x2 = plus_tail(j, i1, x3);

    let mut result = Expansion::zero();
    for component in [x0, x1, x2, x3] {
        if component != T::zero() {
            result.components[result.len] = component;
            result.len += 1;
        }
    }
    result
}

/// [`two_two_diff`] that avoids splitting when `a` or `b` is exactly zero,
/// typically because they are rounding tails of exact differences.
#[inline]
pub fn two_two_diff_zero_check<T: IeeeFloat>(a: T, b: T, c: T, d: T) -> Expansion<T, 4> {
    let zero = T::zero();
    if a == zero && b == zero {
        Expansion::zero()
    } else if a == zero {
        widen(&Expansion::<T, 2>::mult(-b, c))
    } else if b == zero {
        widen(&Expansion::<T, 2>::mult(a, d))
    } else {
        two_two_diff(a, b, c, d)
    }
}

/// Exact `a·b·c`, empty if any factor is zero.
#[inline]
pub fn three_prod<T: IeeeFloat>(a: T, b: T, c: T) -> Expansion<T, 4> {
    let zero = T::zero();
    if a == zero || b == zero || c == zero {
        Expansion::zero()
    } else {
        Expansion::<T, 2>::mult(a, b).scale(c)
    }
}

fn widen<T: IeeeFloat, const M: usize, const N: usize>(e: &Expansion<T, M>) -> Expansion<T, N> {
    const {
        assert!(N >= M, "cannot narrow an expansion");
    }
    let mut result = Expansion::<T, N>::zero();
    result.components[..e.len].copy_from_slice(e.components());
    result.len = e.len;
    result
}
