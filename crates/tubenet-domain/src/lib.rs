//! Enclosure types for the tubenet contractor network.
//!
//! Four concrete kinds implement [`Enclosure`](tubenet_core::Enclosure):
//!
//! - [`Interval`]: a closed real interval.
//! - [`IntervalVector`]: a box, one interval per component.
//! - [`Tube`]: an interval enclosure of a scalar trajectory over a time
//!   domain, stored as slices (envelopes) separated by gates.
//! - [`TubeVector`]: a vector of tubes sharing one slicing.
//!
//! [`Domain`] is the tagged variant the network stores in its arena.
//!
//! Arithmetic uses round-to-nearest; bounds are not rounded outward.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod domain;
pub mod interval;
pub mod interval_vector;
pub mod tube;
pub mod tube_vector;

pub use domain::Domain;
pub use interval::Interval;
pub use interval_vector::IntervalVector;
pub use tube::Tube;
pub use tube_vector::TubeVector;
