//! Error types for diagram construction.

use thiserror::Error;

/// Errors reported by the sweep entry point before any sweep state exists.
///
/// Degenerate inputs (empty set, one or two sites, collinear triples) are not
/// errors; they have well-defined, possibly empty outputs. Internal invariant
/// violations are programming faults and panic instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FortuneError {
    /// A site has a NaN or infinite coordinate. Non-finite values would
    /// silently corrupt event ordering, so they are rejected up front.
    #[error("site coordinate is not finite")]
    NonFiniteSite,
}
