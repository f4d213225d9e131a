//! Tubenet: interval and tube domains linked by contractors, propagated to
//! a fixed point.
//!
//! This is the facade crate that re-exports the public API of the tubenet
//! sub-crates. Most users only need this one dependency.
//!
//! # Quick start
//!
//! ```rust
//! use tubenet::prelude::*;
//!
//! let mut cn = ContractorNetwork::new();
//! let x = cn.create_interval(Interval::new(0.0, 1.0));
//! let y = cn.create_interval(Interval::new(2.0, 3.0));
//! let z = cn.create_interval(Interval::ALL_REALS);
//! cn.add(CtcAdd, &[x, y, z]).unwrap();
//!
//! let report = cn.contract().unwrap();
//! assert!(report.fixed_point());
//! assert_eq!(cn.domain(z).and_then(Domain::as_interval), Some(&Interval::new(2.0, 4.0)));
//!
//! // A measurement of z narrows the operands on the next round.
//! cn.add(CtcIntersect::new(Interval::new(3.5, 4.0)), &[z]).unwrap();
//! cn.contract().unwrap();
//! assert_eq!(cn.domain(x).and_then(Domain::as_interval), Some(&Interval::new(0.5, 1.0)));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tubenet-core` | IDs, domain kinds, the [`Enclosure`](types::Enclosure) trait, errors |
//! | [`domain`] | `tubenet-domain` | Intervals, interval vectors, tubes, tube vectors |
//! | [`contractor`] | `tubenet-contractor` | Contractor trait, scope views and validation |
//! | [`contractors`] | `tubenet-contractors` | Built-in contractors |
//! | [`network`] | `tubenet-network` | The contractor network and its propagation loop |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// IDs, domain kinds, and shared error types (`tubenet-core`).
pub use tubenet_core as types;

/// Set-valued domains (`tubenet-domain`).
///
/// [`domain::Interval`], [`domain::IntervalVector`], [`domain::Tube`] and
/// [`domain::TubeVector`], unified by the [`domain::Domain`] enum.
pub use tubenet_domain as domain;

/// The contractor trait and its scope plumbing (`tubenet-contractor`).
///
/// Implement [`contractor::Contractor`] to add a constraint of your own.
pub use tubenet_contractor as contractor;

/// Built-in contractors (`tubenet-contractors`).
pub use tubenet_contractors as contractors;

/// Contractor network and propagation (`tubenet-network`).
pub use tubenet_network as network;

/// Common imports for typical tubenet usage.
///
/// ```rust
/// use tubenet::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use tubenet_core::{ContractorId, DomainId, DomainKind, Enclosure, TimePropag};

    // Errors
    pub use tubenet_core::{ContractError, DomainError};
    pub use tubenet_network::NetworkError;

    // Domains
    pub use tubenet_domain::{Domain, Interval, IntervalVector, Tube, TubeVector};

    // Contractors
    pub use tubenet_contractor::{Contractor, Flavor, ScopeView, Signature};
    pub use tubenet_contractors::{
        CtcAdd, CtcDeriv, CtcEval, CtcIntersect, CtcScale, CtcSubvector,
    };

    // Network
    pub use tubenet_network::{ContractReport, ContractorNetwork, GraphLayout, NetworkConfig};
}
