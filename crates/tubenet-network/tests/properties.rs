//! Property tests of the propagation loop.
//!
//! Networks are generated from seeded random intervals so that failures
//! shrink to a reproducible seed.

use proptest::prelude::*;
use tubenet_contractors::{CtcAdd, CtcIntersect, CtcScale};
use tubenet_core::{DomainId, Enclosure};
use tubenet_domain::{Domain, Interval};
use tubenet_network::{ContractorNetwork, NetworkConfig};
use tubenet_test_utils::random_intervals;

fn snapshot(cn: &ContractorNetwork, ids: &[DomainId]) -> Vec<Domain> {
    ids.iter().map(|&id| cn.domain(id).unwrap().clone()).collect()
}

/// Random intervals linked by `x[i] + x[i+1] = x[i+2]`.
fn random_addition_network(seed: u64, n: usize) -> (ContractorNetwork, Vec<DomainId>) {
    let mut cn = ContractorNetwork::new();
    let xs: Vec<DomainId> = random_intervals(seed, n, 50.0)
        .into_iter()
        .map(|x| cn.create_interval(x))
        .collect();
    for w in xs.windows(3) {
        cn.add(CtcAdd, w).unwrap();
    }
    (cn, xs)
}

enum Registration {
    Bound(DomainId, Interval),
    Scale(DomainId, DomainId, f64),
}

/// A path `x0 - x1 - … - x(n-1)` of exact scalings, with a random bound
/// on every node. `open[i]` drops the lower (`1`) or upper (`2`) end of
/// node `i`'s bound. With `reverse` set, contractors are registered last
/// to first.
fn scale_path(
    seed: u64,
    factors: &[f64],
    open: &[u8],
    reverse: bool,
) -> (ContractorNetwork, Vec<DomainId>) {
    let n = factors.len() + 1;
    let mut cn = ContractorNetwork::with_config(NetworkConfig {
        fixed_point_ratio: 1.0,
        ..NetworkConfig::default()
    })
    .unwrap();
    let xs: Vec<DomainId> = (0..n)
        .map(|_| cn.create_interval(Interval::ALL_REALS))
        .collect();

    let mut registrations: Vec<Registration> = random_intervals(seed, n, 100.0)
        .into_iter()
        .zip(&xs)
        .enumerate()
        .map(|(i, (b, &x))| {
            let b = match open.get(i) {
                Some(1) => Interval::new(f64::NEG_INFINITY, b.ub()),
                Some(2) => Interval::new(b.lb(), f64::INFINITY),
                _ => b,
            };
            Registration::Bound(x, b)
        })
        .collect();
    for (i, &f) in factors.iter().enumerate() {
        registrations.push(Registration::Scale(xs[i], xs[i + 1], f));
    }
    if reverse {
        registrations.reverse();
    }
    for r in registrations {
        match r {
            Registration::Bound(x, b) => cn.add(CtcIntersect::new(b), &[x]).unwrap(),
            Registration::Scale(x, y, f) => cn.add(CtcScale::new(f), &[x, y]).unwrap(),
        };
    }
    (cn, xs)
}

fn exact_factor() -> impl Strategy<Value = f64> {
    prop_oneof![Just(1.0), Just(2.0), Just(0.5), Just(-1.0), Just(-2.0)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn contraction_never_widens(seed in any::<u64>(), n in 3usize..24) {
        let (mut cn, xs) = random_addition_network(seed, n);
        let before = snapshot(&cn, &xs);
        cn.contract().unwrap();
        let after = snapshot(&cn, &xs);
        for (b, a) in before.iter().zip(&after) {
            prop_assert!(a.size() <= b.size());
            let (b, a) = (b.as_interval().unwrap(), a.as_interval().unwrap());
            prop_assert!(a.is_subset(b));
        }
    }

    #[test]
    fn second_contract_is_a_no_op(seed in any::<u64>(), n in 3usize..24) {
        let (mut cn, xs) = random_addition_network(seed, n);
        cn.contract().unwrap();
        let first = snapshot(&cn, &xs);
        let report = cn.contract().unwrap();
        prop_assert_eq!(report.invocations, 0);
        prop_assert_eq!(snapshot(&cn, &xs), first);
    }

    #[test]
    fn fixed_point_independent_of_registration_order(
        seed in any::<u64>(),
        factors in prop::collection::vec(exact_factor(), 1..8),
    ) {
        let (mut forward, xs) = scale_path(seed, &factors, &[], false);
        let (mut backward, ys) = scale_path(seed, &factors, &[], true);
        forward.contract().unwrap();
        backward.contract().unwrap();
        prop_assert_eq!(snapshot(&forward, &xs), snapshot(&backward, &ys));
        prop_assert_eq!(forward.emptiness(), backward.emptiness());
    }

    #[test]
    fn half_bounded_fixed_point_independent_of_registration_order(
        seed in any::<u64>(),
        factors in prop::collection::vec(exact_factor(), 1..8),
        open in prop::collection::vec(0u8..3, 9),
    ) {
        let (mut forward, xs) = scale_path(seed, &factors, &open, false);
        let (mut backward, ys) = scale_path(seed, &factors, &open, true);
        forward.contract().unwrap();
        backward.contract().unwrap();
        prop_assert_eq!(snapshot(&forward, &xs), snapshot(&backward, &ys));
        prop_assert_eq!(forward.emptiness(), backward.emptiness());
    }

    #[test]
    fn contraction_is_confined_to_scopes(seed in any::<u64>(), n in 4usize..16, k in 0usize..13) {
        let mut cn = ContractorNetwork::new();
        let xs: Vec<DomainId> = random_intervals(seed, n, 50.0)
            .into_iter()
            .map(|x| cn.create_interval(x))
            .collect();
        let k = k % (n - 2);
        let scope = &xs[k..k + 3];
        cn.add(CtcAdd, scope).unwrap();
        let before = snapshot(&cn, &xs);
        cn.contract().unwrap();
        let after = snapshot(&cn, &xs);
        for (i, (b, a)) in before.iter().zip(&after).enumerate() {
            if !(k..k + 3).contains(&i) {
                prop_assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn shared_emptiness_reschedules_neighbours(seed in any::<u64>()) {
        let bounds = random_intervals(seed, 2, 10.0);
        let mut cn = ContractorNetwork::new();
        let x = cn.create_interval(bounds[0]);
        let y = cn.create_interval(bounds[1]);
        let observer = std::sync::Arc::new(
            tubenet_test_utils::CountingContractor::new("observer", 1.0),
        );
        cn.add_shared(observer.clone(), &[x, y]).unwrap();
        cn.contract().unwrap();
        let far = Interval::new(1e6, 1e6 + 1.0);
        cn.add(CtcIntersect::new(far), &[x]).unwrap();
        cn.contract().unwrap();
        prop_assert!(cn.domain(x).unwrap().is_empty());
        prop_assert_eq!(observer.calls(), 2);
    }
}
