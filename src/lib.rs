//! Adaptive precision geometric predicates built on exact expansion arithmetic.
//!
//! Each predicate returns a floating-point value whose sign is exactly the
//! sign of the underlying determinant for the coordinates as given. Most
//! calls finish with a handful of native operations; near-degenerate inputs
//! escalate through progressively more precise stages, and only the hardest
//! cases pay for a fully exact evaluation.
//!
//! # Quick Start
//!
//! ```rust
//! use adaptive_predicates::{Sign, orient2d};
//!
//! let a = [0.0, 0.0];
//! let b = [1.0, 0.0];
//! let c = [0.5, 1.0];
//!
//! match Sign::of(orient2d(&a, &b, &c)) {
//!     Sign::Positive => println!("c is left of ab"),
//!     Sign::Negative => println!("c is right of ab"),
//!     Sign::Zero => println!("c is on line ab"),
//! }
//! ```
//!
//! Points that differ by far less than one unit in the last place are still
//! classified correctly:
//!
//! ```rust
//! use adaptive_predicates::orient2d;
//!
//! assert!(orient2d(&[0.0, 0.0], &[1.0, 0.0], &[0.5, -1e-20]) < 0.0);
//! ```
//!
//! # Available Predicates
//!
//! - [`orient2d`]: orientation of a point relative to a directed line
//! - [`orient3d`]: orientation of a point relative to an oriented plane
//! - [`incircle`]: whether a point lies inside a triangle's circumcircle
//! - [`insphere`]: whether a point lies inside a tetrahedron's circumsphere
//!
//! All four are generic over [`IeeeFloat`], implemented for `f32` and `f64`.
//! The non-adaptive versions live in [`predicates::exact`].
//!
//! # Expansions
//!
//! The [`expansion`] module exposes the arithmetic the predicates are built
//! from: error-free transformations of single operations and the
//! fixed-capacity [`Expansion`] type with exact sums and scalar products.

pub mod bounds;
mod error;
pub mod expansion;
mod float;
pub mod predicates;

pub use bounds::ErrorBounds;
pub use error::ExpansionError;
pub use expansion::Expansion;
pub use float::{IeeeFloat, USE_FMA};
pub use predicates::Sign;
pub use predicates::adaptive::{incircle, insphere, orient2d, orient3d};
