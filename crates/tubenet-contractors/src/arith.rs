//! Forward-backward contractors for elementary arithmetic constraints.

use tubenet_contractor::{Contractor, ScopeView, Signature};
use tubenet_core::{ContractError, DomainKind};
use tubenet_domain::Domain;

/// Contracts the scope `[x, y, z]` under the constraint `x + y = z`.
///
/// Forward: `z ∩= x + y`. Backward: `x ∩= z - y`, then `y ∩= z - x`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CtcAdd;

impl Contractor for CtcAdd {
    fn name(&self) -> &str {
        "CtcAdd"
    }

    fn signature(&self) -> Signature {
        Signature::Exact(vec![DomainKind::Interval; 3])
    }

    fn contract(&self, scope: &mut ScopeView<'_>) -> Result<(), ContractError> {
        let mut x = scope.interval(0)?;
        let mut y = scope.interval(1)?;
        let mut z = scope.interval(2)?;

        z.narrow(&(x + y));
        x.narrow(&(z - y));
        y.narrow(&(z - x));

        if x.is_empty() || y.is_empty() || z.is_empty() {
            scope.set_empty_all();
            return Ok(());
        }
        scope.narrow_interval(0, &x)?;
        scope.narrow_interval(1, &y)?;
        scope.narrow_interval(2, &z)?;
        Ok(())
    }
}

/// Contracts the scope `[x, y]` under the constraint `y = a·x`.
#[derive(Clone, Copy, Debug)]
pub struct CtcScale {
    factor: f64,
}

impl CtcScale {
    /// Create a contractor for `y = factor·x`.
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// The scaling factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl Contractor for CtcScale {
    fn name(&self) -> &str {
        "CtcScale"
    }

    fn signature(&self) -> Signature {
        Signature::Exact(vec![DomainKind::Interval; 2])
    }

    fn check_scope(&self, _scope: &[&Domain]) -> Result<(), ContractError> {
        if !self.factor.is_finite() {
            return Err(ContractError::ExecutionFailed {
                reason: format!("scale factor must be finite, got {}", self.factor),
            });
        }
        Ok(())
    }

    fn contract(&self, scope: &mut ScopeView<'_>) -> Result<(), ContractError> {
        let mut x = scope.interval(0)?;
        let mut y = scope.interval(1)?;

        y.narrow(&(x * self.factor));
        if self.factor != 0.0 {
            x.narrow(&(y * self.factor.recip()));
        }

        if x.is_empty() || y.is_empty() {
            scope.set_empty_all();
            return Ok(());
        }
        scope.narrow_interval(0, &x)?;
        scope.narrow_interval(1, &y)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tubenet_core::{DomainId, Enclosure};
    use tubenet_domain::Interval;

    fn run(ctc: &dyn Contractor, values: &[Interval]) -> Vec<Domain> {
        let mut domains: Vec<Domain> = values.iter().copied().map(Domain::from).collect();
        let scope: Vec<DomainId> = (0..values.len() as u32).map(DomainId).collect();
        ctc.contract(&mut ScopeView::new(&mut domains, &scope))
            .unwrap();
        domains
    }

    fn iv(d: &Domain) -> Interval {
        *d.as_interval().unwrap()
    }

    #[test]
    fn add_forward_and_backward() {
        let out = run(
            &CtcAdd,
            &[
                Interval::new(0.0, 10.0),
                Interval::new(1.0, 2.0),
                Interval::new(3.0, 4.0),
            ],
        );
        assert_eq!(iv(&out[0]), Interval::new(1.0, 3.0));
        assert_eq!(iv(&out[1]), Interval::new(1.0, 2.0));
        assert_eq!(iv(&out[2]), Interval::new(3.0, 4.0));
    }

    #[test]
    fn add_infeasible_empties_scope() {
        let out = run(
            &CtcAdd,
            &[
                Interval::new(0.0, 1.0),
                Interval::new(0.0, 1.0),
                Interval::new(5.0, 6.0),
            ],
        );
        assert!(out.iter().all(|d| d.is_empty()));
    }

    #[test]
    fn scale_both_ways() {
        let out = run(
            &CtcScale::new(2.0),
            &[Interval::new(0.0, 10.0), Interval::new(4.0, 6.0)],
        );
        assert_eq!(iv(&out[0]), Interval::new(2.0, 3.0));
        assert_eq!(iv(&out[1]), Interval::new(4.0, 6.0));
    }

    #[test]
    fn zero_scale_pins_output() {
        let out = run(
            &CtcScale::new(0.0),
            &[Interval::new(-1.0, 1.0), Interval::new(-5.0, 5.0)],
        );
        assert_eq!(iv(&out[0]), Interval::new(-1.0, 1.0));
        assert_eq!(iv(&out[1]), Interval::point(0.0));
    }

    #[test]
    fn non_finite_scale_rejected_at_registration() {
        assert!(CtcScale::new(f64::NAN).check_scope(&[]).is_err());
    }

    proptest! {
        #[test]
        fn add_keeps_consistent_triples(
            a in -50.0f64..50.0,
            b in -50.0f64..50.0,
            wx in 0.5f64..20.0,
            wy in 0.5f64..20.0,
            wz in 0.5f64..20.0,
        ) {
            // Boxes built around a known solution (a, b, a + b).
            let c = a + b;
            let x = Interval::new(a - wx, a + wx);
            let y = Interval::new(b - wy, b + wy);
            let z = Interval::new(c - wz, c + wz);
            let out = run(&CtcAdd, &[x, y, z]);
            prop_assert!(iv(&out[0]).contains(a));
            prop_assert!(iv(&out[1]).contains(b));
            prop_assert!(iv(&out[2]).contains(c));
            prop_assert!(out[0].size() <= x.diam());
        }
    }
}
