//! Registration-time scope validation.
//!
//! [`validate_scope`] runs once per registration to reject a scope the
//! contractor cannot work with, so misconfiguration fails fast instead of
//! surfacing mid-propagation.

use thiserror::Error;
use tubenet_core::{ContractError, DomainKind, Enclosure};
use tubenet_domain::Domain;

use crate::contractor::Contractor;

/// Errors from scope validation (registration-time, not per-contraction).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScopeError {
    /// A contractor was registered with no domains.
    #[error("contractor '{contractor}' registered with an empty scope")]
    EmptyScope {
        /// Name of the contractor.
        contractor: String,
    },

    /// The contractor's signature or custom checks rejected the scope.
    #[error("contractor '{contractor}' rejected its scope: {source}")]
    Rejected {
        /// Name of the contractor.
        contractor: String,
        /// Why the scope was rejected.
        source: ContractError,
    },
}

/// Validate a scope for a contractor.
///
/// Checks performed:
///
/// 1. The scope is non-empty.
/// 2. Scope kinds match [`Contractor::signature`].
/// 3. [`Contractor::check_scope`] accepts the current values.
pub fn validate_scope(ctc: &dyn Contractor, scope: &[&Domain]) -> Result<(), ScopeError> {
    if scope.is_empty() {
        return Err(ScopeError::EmptyScope {
            contractor: ctc.name().to_string(),
        });
    }
    let kinds: Vec<DomainKind> = scope.iter().map(|d| d.kind()).collect();
    ctc.signature()
        .check(&kinds)
        .and_then(|()| ctc.check_scope(scope))
        .map_err(|source| ScopeError::Rejected {
            contractor: ctc.name().to_string(),
            source,
        })
}
