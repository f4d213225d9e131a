//! Intersection of a domain with a constant bound.
//!
//! # Construction
//!
//! ```
//! use tubenet_contractors::CtcIntersect;
//! use tubenet_domain::Interval;
//!
//! let ctc = CtcIntersect::new(Interval::new(3.0, 7.0));
//! ```

use tubenet_contractor::{Contractor, ScopeView, Signature};
use tubenet_core::{ContractError, Enclosure};
use tubenet_domain::Domain;

/// Contracts its single scope domain `x` to `x ∩ bound`.
///
/// Works for every domain kind; the scope domain must have the same kind,
/// dimension, and (for tubes) slicing as the bound.
#[derive(Clone, Debug)]
pub struct CtcIntersect {
    bound: Domain,
}

impl CtcIntersect {
    /// Create a contractor intersecting with `bound`.
    pub fn new(bound: impl Into<Domain>) -> Self {
        Self {
            bound: bound.into(),
        }
    }

    /// The constant bound.
    pub fn bound(&self) -> &Domain {
        &self.bound
    }
}

impl Contractor for CtcIntersect {
    fn name(&self) -> &str {
        "CtcIntersect"
    }

    fn signature(&self) -> Signature {
        Signature::Exact(vec![self.bound.kind()])
    }

    fn check_scope(&self, scope: &[&Domain]) -> Result<(), ContractError> {
        // Trial narrowing on a copy surfaces dimension and slicing mismatches.
        let mut trial = scope[0].clone();
        trial.narrow(&self.bound)?;
        Ok(())
    }

    fn contract(&self, scope: &mut ScopeView<'_>) -> Result<(), ContractError> {
        scope.narrow(0, &self.bound)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubenet_core::{DomainError, DomainId};
    use tubenet_domain::{Interval, IntervalVector};

    #[test]
    fn narrows_interval() {
        let mut domains = vec![Domain::from(Interval::new(0.0, 10.0))];
        let scope = [DomainId(0)];
        let ctc = CtcIntersect::new(Interval::new(3.0, 7.0));
        ctc.contract(&mut ScopeView::new(&mut domains, &scope))
            .unwrap();
        assert_eq!(domains[0], Domain::from(Interval::new(3.0, 7.0)));
    }

    #[test]
    fn disjoint_bound_empties() {
        let mut domains = vec![Domain::from(Interval::new(0.0, 1.0))];
        let scope = [DomainId(0)];
        let ctc = CtcIntersect::new(Interval::new(3.0, 7.0));
        ctc.contract(&mut ScopeView::new(&mut domains, &scope))
            .unwrap();
        assert!(domains[0].is_empty());
    }

    #[test]
    fn check_scope_rejects_dimension_mismatch() {
        let ctc = CtcIntersect::new(IntervalVector::new(2, Interval::ALL_REALS).unwrap());
        let three = Domain::from(IntervalVector::new(3, Interval::ALL_REALS).unwrap());
        assert_eq!(
            ctc.check_scope(&[&three]),
            Err(ContractError::Domain(DomainError::DimensionMismatch {
                expected: 3,
                actual: 2
            }))
        );
    }
}
