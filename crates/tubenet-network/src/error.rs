//! Errors surfaced by [`ContractorNetwork`](crate::ContractorNetwork).

use thiserror::Error;
use tubenet_contractor::ScopeError;
use tubenet_core::{ContractError, ContractorId, DomainError, DomainId};

use crate::config::ConfigError;

/// Errors from building or propagating a contractor network.
///
/// Registration-time variants ([`UnknownDomain`](Self::UnknownDomain),
/// [`InvalidScope`](Self::InvalidScope), [`Domain`](Self::Domain)) leave
/// the network unchanged. Propagation-time variants
/// ([`ContractorFailed`](Self::ContractorFailed),
/// [`ContractViolation`](Self::ContractViolation)) abort the current
/// round with the offending contractor back on the agenda.
///
/// An empty domain is never an error; query
/// [`emptiness`](crate::ContractorNetwork::emptiness) instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A domain handle does not belong to this network.
    #[error("unknown domain {0}")]
    UnknownDomain(DomainId),

    /// A contractor handle does not belong to this network.
    #[error("unknown contractor {0}")]
    UnknownContractor(ContractorId),

    /// The contractor rejected the scope it was registered with.
    #[error(transparent)]
    InvalidScope(#[from] ScopeError),

    /// A domain could not be built or narrowed as requested.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A contractor returned an error during propagation.
    #[error("contractor '{name}' ({id}) failed: {source}")]
    ContractorFailed {
        /// The failing registration.
        id: ContractorId,
        /// Its diagnostic name.
        name: String,
        /// What went wrong.
        source: ContractError,
    },

    /// A contractor widened a domain of its scope.
    #[error("contractor '{name}' ({id}) widened domain {domain}: size {before} -> {after}")]
    ContractViolation {
        /// The offending registration.
        id: ContractorId,
        /// Its diagnostic name.
        name: String,
        /// The widened domain.
        domain: DomainId,
        /// Size before the invocation.
        before: f64,
        /// Size after the invocation.
        after: f64,
    },

    /// The requested configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_culprit() {
        let e = NetworkError::ContractViolation {
            id: ContractorId(3),
            name: "widen".into(),
            domain: DomainId(1),
            before: 1.0,
            after: 2.0,
        };
        assert_eq!(
            e.to_string(),
            "contractor 'widen' (c3) widened domain d1: size 1 -> 2"
        );
        assert_eq!(
            NetworkError::UnknownDomain(DomainId(9)).to_string(),
            "unknown domain d9"
        );
    }

    #[test]
    fn domain_errors_convert() {
        let e: NetworkError = DomainError::EmptyLiteral.into();
        assert_eq!(e, NetworkError::Domain(DomainError::EmptyLiteral));
    }
}
