//! The enclosure capability consumed by the propagation engine.

use crate::error::DomainError;
use crate::kind::DomainKind;

/// A guaranteed set known to contain the true value of some quantity.
///
/// The engine never inspects an enclosure's contents; it only observes
/// emptiness and a scalar size metric before and after each contraction.
///
/// # Contract
///
/// - `narrow()` never grows the set.
/// - `size()` is nonnegative, may be `+inf` for unbounded sets, and is
///   non-increasing under `narrow()`.
/// - Emptiness is terminal: narrowing an empty enclosure is a no-op.
pub trait Enclosure {
    /// Kind tag of this enclosure.
    fn kind(&self) -> DomainKind;

    /// Whether the set is empty (the constraint system is infeasible).
    fn is_empty(&self) -> bool;

    /// Scalar size metric (diameter, sum of diameters, or tube volume).
    fn size(&self) -> f64;

    /// Intersect `self` with `other` in place.
    ///
    /// Returns `Ok(true)` if the value changed. Fails if the two
    /// enclosures are structurally incompatible (dimension, slicing).
    fn narrow(&mut self, other: &Self) -> Result<bool, DomainError>;

    /// Replace the value with the empty set.
    fn set_empty(&mut self);
}
