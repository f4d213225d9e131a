//! Core types and traits for the tubenet contractor network.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the workspace: typed
//! IDs, domain kinds, the propagation direction of dynamic contractors,
//! the [`Enclosure`] capability, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod kind;
pub mod traits;

pub use error::{ContractError, DomainError};
pub use id::{ContractorId, DomainId};
pub use kind::{DomainKind, TimePropag};
pub use traits::Enclosure;
