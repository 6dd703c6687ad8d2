//! Error-bound multipliers for the adaptive predicate stages.
//!
//! Each bound is a small polynomial in the unit roundoff `ε = 2^-p` where `p`
//! is the significand width. The stage-A and stage-B bounds are linear in `ε`;
//! the stage-C bounds, which cover the tail-corrected estimate, are quadratic.
//! They multiply the permanent of the determinant, i.e. the same expression
//! evaluated on absolute values.

/// Error-bound table for one floating-point type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBounds<T> {
    /// Unit roundoff `2^-p`.
    pub epsilon: T,
    /// Relative error of the final accumulation in stage C.
    pub result: T,
    /// `orient2d` native filter.
    pub ccw_a: T,
    /// `orient2d` after exact minors.
    pub ccw_b: T,
    /// `orient2d` after tail correction.
    pub ccw_c: T,
    /// `orient3d` native filter.
    pub o3d_a: T,
    /// `orient3d` after exact minors.
    pub o3d_b: T,
    /// `orient3d` after tail correction.
    pub o3d_c: T,
    /// `incircle` native filter.
    pub icc_a: T,
    /// `incircle` after exact minors.
    pub icc_b: T,
    /// `incircle` after tail correction.
    pub icc_c: T,
    /// `insphere` native filter.
    pub isp_a: T,
    /// `insphere` after exact minors.
    pub isp_b: T,
    /// `insphere` after tail correction.
    pub isp_c: T,
}

macro_rules! native_bounds {
    ($ty:ident) => {
        impl ErrorBounds<$ty> {
            /// Bounds for the native precision of this type.
            pub const NATIVE: Self = {
                // `EPSILON` is the gap above 1.0, twice the unit roundoff.
                let e = $ty::EPSILON / 2.0;
                Self {
                    epsilon: e,
                    result: (3.0 + 8.0 * e) * e,
                    ccw_a: (3.0 + 16.0 * e) * e,
                    ccw_b: (2.0 + 12.0 * e) * e,
                    ccw_c: (9.0 + 64.0 * e) * e * e,
                    o3d_a: (7.0 + 56.0 * e) * e,
                    o3d_b: (3.0 + 28.0 * e) * e,
                    o3d_c: (26.0 + 288.0 * e) * e * e,
                    icc_a: (10.0 + 96.0 * e) * e,
                    icc_b: (4.0 + 48.0 * e) * e,
                    icc_c: (44.0 + 576.0 * e) * e * e,
                    isp_a: (16.0 + 224.0 * e) * e,
                    isp_b: (5.0 + 72.0 * e) * e,
                    isp_c: (71.0 + 1408.0 * e) * e * e,
                }
            };
        }
    };
}

native_bounds!(f32);
native_bounds!(f64);
