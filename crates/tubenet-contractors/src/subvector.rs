//! Link between a box and a contiguous slice of its components.

use tubenet_contractor::{Contractor, ScopeView, Signature};
use tubenet_core::{ContractError, DomainError, DomainKind};
use tubenet_domain::Domain;

/// Contracts the scope `[parent, sub]` under `sub = parent[start..=end]`.
///
/// Created by the network when a subvector domain is derived from a box,
/// so that narrowing either side reaches the other.
#[derive(Clone, Copy, Debug)]
pub struct CtcSubvector {
    start: usize,
    end: usize,
}

impl CtcSubvector {
    /// Link components `start..=end` of the parent.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// First linked component of the parent.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last linked component of the parent (inclusive).
    pub fn end(&self) -> usize {
        self.end
    }
}

impl Contractor for CtcSubvector {
    fn name(&self) -> &str {
        "CtcSubvector"
    }

    fn signature(&self) -> Signature {
        Signature::Repeated(DomainKind::IntervalVector)
    }

    fn check_scope(&self, scope: &[&Domain]) -> Result<(), ContractError> {
        if scope.len() != 2 {
            return Err(ContractError::ArityMismatch {
                expected: 2,
                actual: scope.len(),
            });
        }
        let (parent_dim, sub_dim) = (scope[0].dim(), scope[1].dim());
        if self.start > self.end || self.end >= parent_dim {
            return Err(DomainError::IndexOutOfRange {
                index: self.end.max(self.start),
                dim: parent_dim,
            }
            .into());
        }
        let expected = self.end - self.start + 1;
        if sub_dim != expected {
            return Err(DomainError::DimensionMismatch {
                expected,
                actual: sub_dim,
            }
            .into());
        }
        Ok(())
    }

    fn contract(&self, scope: &mut ScopeView<'_>) -> Result<(), ContractError> {
        let slice = scope.interval_vector(0)?.subvector(self.start, self.end)?;
        scope.narrow_interval_vector(1, &slice)?;
        let sub = scope.interval_vector(1)?.clone();
        scope.narrow_range(0, self.start, &sub)?;
        if scope.any_empty() {
            scope.set_empty_all();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubenet_contractor::validate_scope;
    use tubenet_core::{DomainId, Enclosure};
    use tubenet_domain::{Interval, IntervalVector};

    fn boxes(parent: Vec<Interval>, sub: Vec<Interval>) -> Vec<Domain> {
        vec![
            Domain::from(IntervalVector::from_intervals(parent).unwrap()),
            Domain::from(IntervalVector::from_intervals(sub).unwrap()),
        ]
    }

    fn run(ctc: CtcSubvector, domains: &mut [Domain]) {
        let scope = [DomainId(0), DomainId(1)];
        ctc.contract(&mut ScopeView::new(domains, &scope))
            .unwrap();
    }

    #[test]
    fn narrows_both_directions() {
        let mut d = boxes(
            vec![
                Interval::new(0.0, 1.0),
                Interval::new(0.0, 10.0),
                Interval::ALL_REALS,
            ],
            vec![Interval::new(2.0, 3.0), Interval::new(-5.0, 5.0)],
        );
        run(CtcSubvector::new(1, 2), &mut d);
        let parent = d[0].as_interval_vector().unwrap();
        let sub = d[1].as_interval_vector().unwrap();
        assert_eq!(parent[0], Interval::new(0.0, 1.0));
        assert_eq!(parent[1], Interval::new(2.0, 3.0));
        assert_eq!(parent[2], Interval::new(-5.0, 5.0));
        assert_eq!(sub.subvector(0, 1).unwrap(), parent.subvector(1, 2).unwrap());
    }

    #[test]
    fn disjoint_component_empties_both() {
        let mut d = boxes(
            vec![Interval::new(0.0, 1.0), Interval::new(0.0, 1.0)],
            vec![Interval::new(5.0, 6.0)],
        );
        run(CtcSubvector::new(0, 0), &mut d);
        assert!(d[0].is_empty());
        assert!(d[1].is_empty());
    }

    #[test]
    fn scope_checks_range_and_dimension() {
        let d = boxes(
            vec![Interval::ALL_REALS; 3],
            vec![Interval::ALL_REALS; 2],
        );
        let (parent, sub) = (&d[0], &d[1]);
        assert_eq!(validate_scope(&CtcSubvector::new(0, 1), &[parent, sub]), Ok(()));
        assert!(validate_scope(&CtcSubvector::new(0, 2), &[parent, sub]).is_err());
        assert!(validate_scope(&CtcSubvector::new(2, 3), &[parent, sub]).is_err());
        assert!(validate_scope(&CtcSubvector::new(1, 0), &[parent, sub]).is_err());
        assert!(validate_scope(&CtcSubvector::new(0, 1), &[parent]).is_err());
    }
}
