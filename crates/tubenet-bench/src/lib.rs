//! Benchmark profiles for the tubenet propagation engine.
//!
//! - [`addition_chain`]: `n` random intervals linked by `x[i] + x[i+1] = x[i+2]`
//! - [`deriv_profile`]: a position tube tied to a bounded velocity tube
//! - [`observation_times`]: deterministic measurement instants for
//!   [`deriv_profile`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::Rng;
use tubenet_contractors::{CtcAdd, CtcDeriv};
use tubenet_core::DomainId;
use tubenet_domain::{Interval, Tube};
use tubenet_network::{ContractorNetwork, NetworkError};
use tubenet_test_utils::{random_intervals, seeded_rng};

/// Build an addition chain over `n` seeded random intervals.
///
/// Returns the network with every contractor queued, and the domain IDs in
/// chain order.
pub fn addition_chain(
    seed: u64,
    n: usize,
) -> Result<(ContractorNetwork, Vec<DomainId>), NetworkError> {
    let mut cn = ContractorNetwork::new();
    let xs: Vec<DomainId> = random_intervals(seed, n, 100.0)
        .into_iter()
        .map(|x| cn.create_interval(x))
        .collect();
    for w in xs.windows(3) {
        cn.add(CtcAdd, w)?;
    }
    Ok((cn, xs))
}

/// Position tube `x` over `[0, t_end]` with `slices` slices, linked to a
/// velocity tube bounded by `[-1, 1]`. Returns `(network, x, v)`.
///
/// The initial round has already run, so the agenda is empty.
pub fn deriv_profile(
    t_end: f64,
    slices: usize,
) -> Result<(ContractorNetwork, DomainId, DomainId), NetworkError> {
    let tdomain = Interval::new(0.0, t_end);
    let dt = t_end / slices as f64;
    let mut cn = ContractorNetwork::new();
    let x = cn.create_tube(Tube::new(tdomain, dt, Interval::new(-1e3, 1e3))?);
    let v = cn.create_tube(Tube::new(tdomain, dt, Interval::new(-1.0, 1.0))?);
    cn.add(CtcDeriv::default(), &[x, v])?;
    cn.contract()?;
    Ok((cn, x, v))
}

/// `n` seeded instants in `[0, t_end)`, in increasing order.
pub fn observation_times(seed: u64, n: usize, t_end: f64) -> Vec<f64> {
    let mut rng = seeded_rng(seed);
    let mut ts: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..t_end)).collect();
    ts.sort_by(f64::total_cmp);
    ts
}
