use thiserror::Error;

/// Failures reported by the fixed-capacity expansion container.
///
/// The predicates never produce these; they surface only when an expansion is
/// built by hand from caller-supplied components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExpansionError {
    #[error("expansion capacity of {capacity} components exceeded")]
    CapacityExceeded { capacity: usize },
    #[error("component {index} is not finite")]
    NonFinite { index: usize },
    #[error("component {index} is zero")]
    ZeroComponent { index: usize },
    #[error("component {index} is smaller in magnitude than its predecessor")]
    Unsorted { index: usize },
    #[error("component {index} overlaps its predecessor")]
    Overlapping { index: usize },
}
