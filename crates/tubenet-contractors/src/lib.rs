//! Reference contractors for the tubenet contractor network.
//!
//! Small, mechanical narrowing operators that exercise the propagation
//! engine end to end:
//!
//! - [`CtcIntersect`]: intersect a domain with a constant bound.
//! - [`CtcAdd`]: forward-backward contraction of `x + y = z`.
//! - [`CtcScale`]: forward-backward contraction of `y = a·x`.
//! - [`CtcEval`]: temporal evaluation `z = y(t)` of a tube.
//! - [`CtcDeriv`]: derivative consistency `x' = v` between tubes.
//! - [`CtcSubvector`]: keeps a box linked to a slice of a larger box.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod arith;
pub mod deriv;
pub mod eval;
pub mod intersect;
pub mod subvector;

pub use arith::{CtcAdd, CtcScale};
pub use deriv::CtcDeriv;
pub use eval::CtcEval;
pub use intersect::CtcIntersect;
pub use subvector::CtcSubvector;
