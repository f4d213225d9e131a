//! Test utilities and fixtures for tubenet development.
//!
//! Provides fixture contractors ([`CountingContractor`],
//! [`WideningContractor`], [`FailingContractor`]) and seeded generators
//! of random intervals for building reproducible test networks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{CountingContractor, FailingContractor, WideningContractor};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tubenet_domain::Interval;

/// Deterministic RNG for test and bench inputs.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A bounded, non-degenerate interval with midpoint in `[-span, span]`
/// and width in `(0, span]`.
pub fn random_interval(rng: &mut impl Rng, span: f64) -> Interval {
    let mid = rng.gen_range(-span..=span);
    let half = rng.gen_range(f64::EPSILON..=span) / 2.0;
    Interval::new(mid - half, mid + half)
}

/// `n` random intervals from a fixed seed.
pub fn random_intervals(seed: u64, n: usize, span: f64) -> Vec<Interval> {
    let mut rng = seeded_rng(seed);
    (0..n).map(|_| random_interval(&mut rng, span)).collect()
}
