//! Temporal evaluation `z = y(t)` of a tube.
//!
//! # Semantics
//!
//! - Scope `[t, z, y]`: `t` and `z` are intervals, `y` is a tube.
//! - `z ∩= y([t])`, the hull of the slices of `y` meeting `t`.
//! - When `t` is a single instant that falls on a gate of `y`, that gate
//!   is narrowed by `z`. Instants between gates leave `y` untouched; the
//!   tube is never resliced during propagation.
//! - If any of the three domains is empty, all three become empty.
//!
//! `t` itself is not contracted.

use tubenet_contractor::{Contractor, Flavor, ScopeView, Signature};
use tubenet_core::{ContractError, DomainKind, TimePropag};

/// Temporal evaluation contractor.
#[derive(Clone, Copy, Debug, Default)]
pub struct CtcEval;

impl Contractor for CtcEval {
    fn name(&self) -> &str {
        "CtcEval"
    }

    fn flavor(&self) -> Flavor {
        Flavor::Dynamic(TimePropag::Both)
    }

    fn signature(&self) -> Signature {
        Signature::Exact(vec![
            DomainKind::Interval,
            DomainKind::Interval,
            DomainKind::Tube,
        ])
    }

    fn contract(&self, scope: &mut ScopeView<'_>) -> Result<(), ContractError> {
        if scope.any_empty() {
            scope.set_empty_all();
            return Ok(());
        }
        let t = scope.interval(0)?;
        let y = scope.tube(2)?;
        let mut z = scope.interval(1)?;
        z.narrow(&y.eval_over(&t));
        let gate = if t.is_degenerate() {
            y.gate_index(t.lb())
        } else {
            None
        };

        if z.is_empty() {
            scope.set_empty_all();
            return Ok(());
        }
        scope.narrow_interval(1, &z)?;
        if let Some(g) = gate {
            scope.narrow_gate(2, g, &z)?;
        }
        if scope.any_empty() {
            scope.set_empty_all();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubenet_core::{DomainId, Enclosure};
    use tubenet_domain::{Domain, Interval, Tube};

    fn domains(t: Interval, z: Interval) -> Vec<Domain> {
        let tube = Tube::from_slices(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![
                Interval::new(0.0, 1.0),
                Interval::new(1.0, 4.0),
                Interval::new(2.0, 3.0),
            ],
        )
        .unwrap();
        vec![Domain::from(t), Domain::from(z), Domain::from(tube)]
    }

    fn run(domains: &mut [Domain]) {
        let scope = [DomainId(0), DomainId(1), DomainId(2)];
        CtcEval
            .contract(&mut ScopeView::new(domains, &scope))
            .unwrap();
    }

    #[test]
    fn evaluation_over_time_interval() {
        let mut d = domains(Interval::new(0.5, 1.5), Interval::ALL_REALS);
        run(&mut d);
        assert_eq!(d[1].as_interval(), Some(&Interval::new(0.0, 4.0)));
    }

    #[test]
    fn evaluation_at_gate_narrows_tube() {
        let mut d = domains(Interval::point(2.0), Interval::new(2.5, 10.0));
        run(&mut d);
        assert_eq!(d[1].as_interval(), Some(&Interval::new(2.5, 3.0)));
        let y = d[2].as_tube().unwrap();
        assert_eq!(y.gate(2), Interval::new(2.5, 3.0));
        assert_eq!(y.nb_slices(), 3);
    }

    #[test]
    fn evaluation_between_gates_keeps_slicing() {
        let mut d = domains(Interval::point(2.5), Interval::new(2.5, 10.0));
        run(&mut d);
        assert_eq!(d[1].as_interval(), Some(&Interval::new(2.5, 3.0)));
        assert_eq!(d[2].as_tube().unwrap().envelope(2), Interval::new(2.0, 3.0));
    }

    #[test]
    fn inconsistent_measurement_empties_scope() {
        let mut d = domains(Interval::point(2.5), Interval::new(8.0, 9.0));
        run(&mut d);
        assert!(d.iter().all(|x| x.is_empty()));
    }

    #[test]
    fn is_dynamic_in_both_directions() {
        assert_eq!(CtcEval.flavor(), Flavor::Dynamic(TimePropag::Both));
    }
}
