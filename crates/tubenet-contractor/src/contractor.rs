//! The [`Contractor`] trait, its [`Flavor`], and scope [`Signature`]s.
//!
//! Contractors are narrowing operators registered once with an ordered
//! scope of domains. The network calls them repeatedly until no domain
//! shrinks any further.

use std::fmt;

use tubenet_core::{ContractError, DomainKind, TimePropag};
use tubenet_domain::Domain;

use crate::context::ScopeView;

/// Whether a contractor acts on instantaneous or time-indexed domains.
///
/// Flavor is data, not a type: the propagation loop treats both the same.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Flavor {
    /// Operates on intervals and boxes.
    #[default]
    Static,
    /// Operates on tubes, carrying information along the time axis.
    Dynamic(TimePropag),
}

impl Flavor {
    /// Whether this is a dynamic contractor.
    pub fn is_dynamic(self) -> bool {
        matches!(self, Self::Dynamic(_))
    }

    /// Propagation direction of a dynamic contractor.
    pub fn time_propag(self) -> Option<TimePropag> {
        match self {
            Self::Static => None,
            Self::Dynamic(p) => Some(p),
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => f.write_str("static"),
            Self::Dynamic(p) => write!(f, "dynamic({p})"),
        }
    }
}

/// Expected shape of a contractor's scope, checked at registration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Signature {
    /// Any non-empty scope.
    #[default]
    Any,
    /// Exactly these kinds, in this order.
    Exact(Vec<DomainKind>),
    /// One or more domains, all of this kind.
    Repeated(DomainKind),
}

impl Signature {
    /// Check a scope's kinds against this signature.
    pub fn check(&self, kinds: &[DomainKind]) -> Result<(), ContractError> {
        match self {
            Self::Any => Ok(()),
            Self::Exact(expected) => {
                if expected.len() != kinds.len() {
                    return Err(ContractError::ArityMismatch {
                        expected: expected.len(),
                        actual: kinds.len(),
                    });
                }
                for (position, (&e, &a)) in expected.iter().zip(kinds).enumerate() {
                    if e != a {
                        return Err(ContractError::KindMismatch {
                            position,
                            expected: e,
                            actual: a,
                        });
                    }
                }
                Ok(())
            }
            Self::Repeated(kind) => {
                match kinds.iter().position(|k| k != kind) {
                    Some(position) => Err(ContractError::KindMismatch {
                        position,
                        expected: *kind,
                        actual: kinds[position],
                    }),
                    None => Ok(()),
                }
            }
        }
    }
}

/// A narrowing operator over an ordered scope of domains.
///
/// # Contract
///
/// - `contract()` MUST only shrink its scope domains; widening is a
///   defect the network reports as a contract violation.
/// - `contract()` MUST NOT exclude any value consistent with the
///   constraint it implements.
/// - `&self`: contractors are stateless with respect to propagation, so
///   one object can be registered several times with different scopes.
///
/// # Object safety
///
/// This trait is object-safe; the network stores contractors as
/// `Arc<dyn Contractor>`.
///
/// # Examples
///
/// A contractor bounding a scalar domain to be nonnegative:
///
/// ```
/// use tubenet_contractor::{Contractor, ScopeView, Signature};
/// use tubenet_core::{ContractError, DomainKind};
/// use tubenet_domain::Interval;
///
/// struct NonNegative;
///
/// impl Contractor for NonNegative {
///     fn name(&self) -> &str { "non_negative" }
///
///     fn signature(&self) -> Signature {
///         Signature::Exact(vec![DomainKind::Interval])
///     }
///
///     fn contract(&self, scope: &mut ScopeView<'_>) -> Result<(), ContractError> {
///         scope.narrow_interval(0, &Interval::new(0.0, f64::INFINITY))?;
///         Ok(())
///     }
/// }
///
/// assert_eq!(NonNegative.name(), "non_negative");
/// ```
pub trait Contractor: Send + Sync + 'static {
    /// Default diagnostic name, used in logs and graph exports.
    fn name(&self) -> &str;

    /// Static or dynamic (with propagation direction).
    fn flavor(&self) -> Flavor {
        Flavor::Static
    }

    /// Expected scope kinds. Default: any non-empty scope.
    fn signature(&self) -> Signature {
        Signature::Any
    }

    /// Registration-time checks beyond kinds (dimensions, slicing).
    ///
    /// Called once per registration with the scope's current values.
    fn check_scope(&self, _scope: &[&Domain]) -> Result<(), ContractError> {
        Ok(())
    }

    /// Narrow the scope domains in place.
    fn contract(&self, scope: &mut ScopeView<'_>) -> Result<(), ContractError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_signature_checks_arity_and_kinds() {
        let sig = Signature::Exact(vec![DomainKind::Interval, DomainKind::Tube]);
        assert_eq!(sig.check(&[DomainKind::Interval, DomainKind::Tube]), Ok(()));
        assert_eq!(
            sig.check(&[DomainKind::Interval]),
            Err(ContractError::ArityMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            sig.check(&[DomainKind::Interval, DomainKind::Interval]),
            Err(ContractError::KindMismatch {
                position: 1,
                expected: DomainKind::Tube,
                actual: DomainKind::Interval,
            })
        );
    }

    #[test]
    fn repeated_signature_accepts_any_arity() {
        let sig = Signature::Repeated(DomainKind::Interval);
        assert_eq!(sig.check(&[DomainKind::Interval; 5]), Ok(()));
        assert!(sig
            .check(&[DomainKind::Interval, DomainKind::IntervalVector])
            .is_err());
        assert_eq!(Signature::Any.check(&[DomainKind::TubeVector]), Ok(()));
    }

    #[test]
    fn flavor_carries_direction() {
        assert!(!Flavor::Static.is_dynamic());
        assert_eq!(Flavor::Static.time_propag(), None);
        let f = Flavor::Dynamic(TimePropag::Forward);
        assert!(f.is_dynamic());
        assert_eq!(f.time_propag(), Some(TimePropag::Forward));
        assert_eq!(f.to_string(), "dynamic(fwd)");
    }
}
