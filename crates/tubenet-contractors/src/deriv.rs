//! Differential constraint `ẋ = v` between tubes.
//!
//! The scope is `[x, v]`: two tubes, or two tube vectors of equal
//! dimension. Only `x` is contracted. `v` may be sliced differently from
//! `x`; its enclosure over each slice of `x` is taken by [`Tube::eval_over`].
//!
//! For slice `k` of width `w` with derivative enclosure `v_k`:
//!
//! - forward: `x(t_{k+1}) ∈ x(t_k) + w·v_k`
//! - backward: `x(t_k) ∈ x(t_{k+1}) - w·v_k`
//! - envelope: `x([t_k, t_{k+1}]) ⊆ (x(t_k) + [0, w]·v_k) ∩ (x(t_{k+1}) - [0, w]·v_k)`

use tubenet_contractor::{Contractor, Flavor, ScopeView, Signature};
use tubenet_core::{ContractError, DomainError, DomainKind, Enclosure, TimePropag};
use tubenet_domain::{Domain, Interval, Tube};

/// Derivative contractor, propagating through time in the configured
/// direction(s).
#[derive(Clone, Copy, Debug, Default)]
pub struct CtcDeriv {
    propag: TimePropag,
}

impl CtcDeriv {
    /// A derivative contractor propagating in `propag`.
    pub fn new(propag: TimePropag) -> Self {
        Self { propag }
    }

    /// Propagation direction(s).
    pub fn time_propag(&self) -> TimePropag {
        self.propag
    }
}

impl Contractor for CtcDeriv {
    fn name(&self) -> &str {
        "CtcDeriv"
    }

    fn flavor(&self) -> Flavor {
        Flavor::Dynamic(self.propag)
    }

    fn signature(&self) -> Signature {
        Signature::Any
    }

    fn check_scope(&self, scope: &[&Domain]) -> Result<(), ContractError> {
        if scope.len() != 2 {
            return Err(ContractError::ArityMismatch {
                expected: 2,
                actual: scope.len(),
            });
        }
        let (x, v) = (scope[0], scope[1]);
        let (x_tdomain, v_tdomain) = match (x, v) {
            (Domain::Tube(x), Domain::Tube(v)) => (x.tdomain(), v.tdomain()),
            (Domain::TubeVector(x), Domain::TubeVector(v)) => {
                if x.dim() != v.dim() {
                    return Err(DomainError::DimensionMismatch {
                        expected: x.dim(),
                        actual: v.dim(),
                    }
                    .into());
                }
                (x.tdomain(), v.tdomain())
            }
            (Domain::Tube(_) | Domain::TubeVector(_), other) => {
                return Err(ContractError::KindMismatch {
                    position: 1,
                    expected: x.kind(),
                    actual: other.kind(),
                });
            }
            (other, _) => {
                return Err(ContractError::KindMismatch {
                    position: 0,
                    expected: DomainKind::Tube,
                    actual: other.kind(),
                });
            }
        };
        if !x_tdomain.is_subset(&v_tdomain) {
            return Err(ContractError::ExecutionFailed {
                reason: format!(
                    "derivative time domain {v_tdomain} does not cover {x_tdomain}"
                ),
            });
        }
        Ok(())
    }

    fn contract(&self, scope: &mut ScopeView<'_>) -> Result<(), ContractError> {
        if scope.any_empty() {
            scope.set_empty_all();
            return Ok(());
        }
        match scope.get(0)?.kind() {
            DomainKind::Tube => {
                // `v` may alias `x` when both positions name one domain.
                let v = scope.tube(1)?.clone();
                let mut x = scope.tube(0)?.clone();
                contract_tube(&mut x, &v, self.propag);
                scope.narrow(0, &Domain::from(x))?;
            }
            DomainKind::TubeVector => {
                let v = scope.tube_vector(1)?.clone();
                let mut x = scope.tube_vector(0)?.clone();
                for (i, vi) in v.iter().enumerate() {
                    let dim = x.dim();
                    let xi = x
                        .get_mut(i)
                        .ok_or(DomainError::IndexOutOfRange { index: i, dim })?;
                    contract_tube(xi, vi, self.propag);
                }
                scope.narrow(0, &Domain::from(x))?;
            }
            actual => {
                return Err(ContractError::KindMismatch {
                    position: 0,
                    expected: DomainKind::Tube,
                    actual,
                })
            }
        }
        if scope.any_empty() {
            scope.set_empty_all();
        }
        Ok(())
    }
}

fn contract_tube(x: &mut Tube, v: &Tube, propag: TimePropag) {
    let n = x.nb_slices();
    let slices: Vec<(f64, Interval)> = (0..n)
        .map(|k| {
            let dt = x.slice_tdomain(k);
            (dt.diam(), v.eval_over(&dt))
        })
        .collect();

    if propag.forward() {
        for (k, &(w, vk)) in slices.iter().enumerate() {
            let next = x.gate(k) + vk * w;
            x.narrow_gate(k + 1, &next);
        }
    }
    if propag.backward() {
        for (k, &(w, vk)) in slices.iter().enumerate().rev() {
            let prev = x.gate(k + 1) - vk * w;
            x.narrow_gate(k, &prev);
        }
    }
    for (k, &(w, vk)) in slices.iter().enumerate() {
        let mut e = Interval::ALL_REALS;
        if propag.forward() {
            e.narrow(&(x.gate(k) + vk.sweep(w)));
        }
        if propag.backward() {
            e.narrow(&(x.gate(k + 1) - vk.sweep(w)));
        }
        x.narrow_envelope(k, &e);
    }
}
