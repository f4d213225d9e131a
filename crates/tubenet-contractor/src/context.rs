//! Execution context passed to contractors during propagation.
//!
//! [`ScopeView`] gives a contractor access to exactly the domains in its
//! scope, addressed by scope position. Domains outside the scope are
//! unreachable, so a contraction can never touch them.
//!
//! Writes go through intersection ([`narrow`](ScopeView::narrow) and its
//! typed variants) or through [`replace`](ScopeView::replace), which keeps
//! the domain's kind, dimension, and slicing. No `&mut Domain` is handed out.

use tubenet_core::{ContractError, DomainError, DomainId, DomainKind, Enclosure};
use tubenet_domain::{Domain, Interval, IntervalVector, Tube, TubeVector};

/// Scope-restricted view over the network's domain storage.
///
/// Position `i` refers to the i-th domain of the scope given at
/// registration. The same domain may appear at several positions.
pub struct ScopeView<'a> {
    domains: &'a mut [Domain],
    scope: &'a [DomainId],
}

impl<'a> ScopeView<'a> {
    /// Construct a view over `domains` restricted to `scope`.
    ///
    /// Typically called by the network, not by contractors directly.
    /// Every ID in `scope` must index into `domains`.
    pub fn new(domains: &'a mut [Domain], scope: &'a [DomainId]) -> Self {
        Self { domains, scope }
    }

    /// Number of scope positions.
    pub fn len(&self) -> usize {
        self.scope.len()
    }

    /// Whether the scope has no positions.
    pub fn is_empty(&self) -> bool {
        self.scope.is_empty()
    }

    /// Network ID of the domain at `pos`.
    pub fn id(&self, pos: usize) -> Option<DomainId> {
        self.scope.get(pos).copied()
    }

    fn slot(&self, pos: usize) -> Result<usize, ContractError> {
        match self.scope.get(pos) {
            Some(id) if id.index() < self.domains.len() => Ok(id.index()),
            _ => Err(ContractError::ArityMismatch {
                expected: pos + 1,
                actual: self.scope.len(),
            }),
        }
    }

    /// Domain at `pos`.
    pub fn get(&self, pos: usize) -> Result<&Domain, ContractError> {
        let slot = self.slot(pos)?;
        Ok(&self.domains[slot])
    }

    fn slot_mut(&mut self, pos: usize) -> Result<&mut Domain, ContractError> {
        let slot = self.slot(pos)?;
        Ok(&mut self.domains[slot])
    }

    /// Copy of the interval at `pos`.
    pub fn interval(&self, pos: usize) -> Result<Interval, ContractError> {
        let d = self.get(pos)?;
        d.as_interval()
            .copied()
            .ok_or_else(|| kind_mismatch(pos, DomainKind::Interval, d))
    }

    /// Box at `pos`.
    pub fn interval_vector(&self, pos: usize) -> Result<&IntervalVector, ContractError> {
        let d = self.get(pos)?;
        d.as_interval_vector()
            .ok_or_else(|| kind_mismatch(pos, DomainKind::IntervalVector, d))
    }

    /// Tube at `pos`.
    pub fn tube(&self, pos: usize) -> Result<&Tube, ContractError> {
        let d = self.get(pos)?;
        d.as_tube()
            .ok_or_else(|| kind_mismatch(pos, DomainKind::Tube, d))
    }

    /// Tube vector at `pos`.
    pub fn tube_vector(&self, pos: usize) -> Result<&TubeVector, ContractError> {
        let d = self.get(pos)?;
        d.as_tube_vector()
            .ok_or_else(|| kind_mismatch(pos, DomainKind::TubeVector, d))
    }

    /// Intersect the interval at `pos` with `x`; returns whether it changed.
    pub fn narrow_interval(&mut self, pos: usize, x: &Interval) -> Result<bool, ContractError> {
        let d = self.slot_mut(pos)?;
        let actual = d.kind();
        let current = d.as_interval_mut().ok_or(ContractError::KindMismatch {
            position: pos,
            expected: DomainKind::Interval,
            actual,
        })?;
        Ok(current.narrow(x))
    }

    /// Intersect the box at `pos` with `x`; returns whether it changed.
    pub fn narrow_interval_vector(
        &mut self,
        pos: usize,
        x: &IntervalVector,
    ) -> Result<bool, ContractError> {
        let d = self.slot_mut(pos)?;
        let actual = d.kind();
        let current = d
            .as_interval_vector_mut()
            .ok_or(ContractError::KindMismatch {
                position: pos,
                expected: DomainKind::IntervalVector,
                actual,
            })?;
        Ok(Enclosure::narrow(current, x)?)
    }

    /// Intersect components `start..start + x.dim()` of the box at `pos`
    /// with `x`; returns whether it changed.
    pub fn narrow_range(
        &mut self,
        pos: usize,
        start: usize,
        x: &IntervalVector,
    ) -> Result<bool, ContractError> {
        let d = self.slot_mut(pos)?;
        let actual = d.kind();
        let current = d
            .as_interval_vector_mut()
            .ok_or(ContractError::KindMismatch {
                position: pos,
                expected: DomainKind::IntervalVector,
                actual,
            })?;
        Ok(current.narrow_range(start, x)?)
    }

    /// Intersect gate `k` of the tube at `pos` with `y`; returns whether it
    /// changed. An emptied gate empties the tube.
    pub fn narrow_gate(&mut self, pos: usize, k: usize, y: &Interval) -> Result<bool, ContractError> {
        let d = self.slot_mut(pos)?;
        let actual = d.kind();
        let tube = d.as_tube_mut().ok_or(ContractError::KindMismatch {
            position: pos,
            expected: DomainKind::Tube,
            actual,
        })?;
        let dim = tube.gates().len();
        if k >= dim {
            return Err(DomainError::IndexOutOfRange { index: k, dim }.into());
        }
        Ok(tube.narrow_gate(k, y))
    }

    /// Intersect the domain at `pos` with a value of the same kind.
    pub fn narrow(&mut self, pos: usize, x: &Domain) -> Result<bool, ContractError> {
        let d = self.slot_mut(pos)?;
        d.narrow(x).map_err(|e| with_position(pos, e))
    }

    /// Overwrite the domain at `pos` with `value`.
    ///
    /// `value` must match the current domain's kind and dimension, and a
    /// tube's slicing; otherwise nothing is written. Unlike
    /// [`narrow`](Self::narrow) the new value need not be a subset of the
    /// old one. The network checks each invocation for widening.
    pub fn replace(&mut self, pos: usize, value: Domain) -> Result<(), ContractError> {
        let d = self.slot_mut(pos)?;
        let same_slicing = match (&*d, &value) {
            (Domain::Tube(a), Domain::Tube(b)) => a.same_slicing(b),
            (Domain::TubeVector(a), Domain::TubeVector(b)) => a.same_slicing(b),
            _ => true,
        };
        if d.kind() != value.kind() {
            return Err(kind_mismatch(pos, d.kind(), &value));
        }
        if d.dim() != value.dim() {
            return Err(DomainError::DimensionMismatch {
                expected: d.dim(),
                actual: value.dim(),
            }
            .into());
        }
        if !same_slicing {
            return Err(DomainError::SlicingMismatch.into());
        }
        *d = value;
        Ok(())
    }

    /// Whether any scope domain is empty.
    pub fn any_empty(&self) -> bool {
        self.scope
            .iter()
            .filter_map(|id| self.domains.get(id.index()))
            .any(Enclosure::is_empty)
    }

    /// Whether every scope domain is empty.
    pub fn all_empty(&self) -> bool {
        self.scope
            .iter()
            .filter_map(|id| self.domains.get(id.index()))
            .all(Enclosure::is_empty)
    }

    /// Empty every scope domain (the constraint is infeasible).
    pub fn set_empty_all(&mut self) {
        for id in self.scope {
            if let Some(d) = self.domains.get_mut(id.index()) {
                d.set_empty();
            }
        }
    }
}

fn with_position(position: usize, e: DomainError) -> ContractError {
    match e {
        DomainError::KindMismatch { expected, actual } => ContractError::KindMismatch {
            position,
            expected,
            actual,
        },
        other => other.into(),
    }
}

fn kind_mismatch(position: usize, expected: DomainKind, actual: &Domain) -> ContractError {
    ContractError::KindMismatch {
        position,
        expected,
        actual: actual.kind(),
    }
}
