//! Fixed-point propagation engine for contractor networks.
//!
//! A [`ContractorNetwork`] owns every domain and contractor created
//! through it, keeps the bipartite scope graph between them, and drives a
//! LIFO agenda of pending contractors until no registered contractor can
//! narrow any domain further.
//!
//! # Propagation round
//!
//! 1. Pop the most recently queued contractor.
//! 2. Record the size of every domain in its scope.
//! 3. Run the contractor over a [`ScopeView`](tubenet_contractor::ScopeView).
//! 4. Compare sizes against the fixed-point ratio of [`NetworkConfig`].
//! 5. Queue every dependent of a changed domain, except the contractor
//!    that just ran.
//!
//! The round ends when the agenda is empty ([`ContractorNetwork::contract`])
//! or when a wall-clock budget expires
//! ([`ContractorNetwork::contract_during`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod agenda;
pub mod config;
pub mod error;
pub mod graph;
pub mod network;
pub mod report;

pub use config::{ConfigError, NetworkConfig};
pub use error::NetworkError;
pub use graph::{Dot, GraphEdge, GraphLayout, GraphNode, NetworkGraph, NodeKind};
pub use network::ContractorNetwork;
pub use report::ContractReport;
