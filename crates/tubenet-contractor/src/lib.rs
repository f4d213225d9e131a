//! Contractor trait and scope context for the tubenet contractor network.
//!
//! The [`Contractor`] trait defines the `&self` narrowing operation over an
//! ordered scope of domains, reached through a [`ScopeView`] that exposes
//! only the scope members.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod contractor;
pub mod scope;

pub use context::ScopeView;
pub use contractor::{Contractor, Flavor, Signature};
pub use scope::{validate_scope, ScopeError};
