//! Error types shared by enclosures and contractors.
//!
//! Numerical infeasibility is not an error: an enclosure becoming empty is
//! a queryable outcome. These enums cover structural misuse only.

use thiserror::Error;

use crate::kind::DomainKind;

/// Errors from building or combining enclosures.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum DomainError {
    /// A list or vector literal had zero length.
    #[error("cannot build an enclosure from a zero-length literal")]
    EmptyLiteral,

    /// Two vector enclosures have different dimensions.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimension required.
        expected: usize,
        /// The dimension supplied.
        actual: usize,
    },

    /// An enclosure of the wrong kind was supplied.
    #[error("kind mismatch: expected {expected}, got {actual}")]
    KindMismatch {
        /// The kind required.
        expected: DomainKind,
        /// The kind supplied.
        actual: DomainKind,
    },

    /// Two tubes do not share the same slicing.
    #[error("tubes do not share the same slicing")]
    SlicingMismatch,

    /// A time value lies outside a tube's time domain.
    #[error("time {t} is outside the tube's time domain")]
    TimeOutOfDomain {
        /// The offending time.
        t: f64,
    },

    /// A tube's time domain is empty, unbounded, or degenerate.
    #[error("time domain must be a bounded, non-degenerate interval")]
    InvalidTimeDomain,

    /// A component index lies outside a vector's dimension.
    #[error("index {index} out of range for dimension {dim}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The vector dimension.
        dim: usize,
    },

    /// A slicing timestep is not finite and positive.
    #[error("timestep must be finite and positive, got {value}")]
    InvalidTimestep {
        /// The invalid timestep.
        value: f64,
    },
}

/// Errors from a contractor, either at registration or during `contract()`.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ContractError {
    /// The scope has the wrong number of domains.
    #[error("expected {expected} domains in scope, got {actual}")]
    ArityMismatch {
        /// Number of domains required.
        expected: usize,
        /// Number of domains supplied.
        actual: usize,
    },

    /// The domain at a scope position has the wrong kind.
    #[error("scope position {position}: expected {expected}, got {actual}")]
    KindMismatch {
        /// Zero-based scope position.
        position: usize,
        /// The kind required.
        expected: DomainKind,
        /// The kind supplied.
        actual: DomainKind,
    },

    /// An enclosure operation failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The contraction failed for another reason.
    #[error("execution failed: {reason}")]
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}
