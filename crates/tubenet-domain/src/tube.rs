//! Tubes: interval enclosures of scalar trajectories.
//!
//! A [`Tube`] covers a bounded time domain `[t0, tn]` split into slices
//! `[t_k, t_{k+1}]`. Each slice carries an *envelope* enclosing the
//! trajectory over the whole slice; each boundary `t_k` carries a *gate*
//! enclosing the trajectory at that instant. Gates are always subsets of
//! their adjacent envelopes.

use std::cmp::Ordering;
use std::fmt;

use tubenet_core::{DomainError, DomainKind, Enclosure};

use crate::interval::Interval;

/// A sliced interval enclosure of a function `x: [t0, tn] → R`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tube {
    /// `n + 1` strictly increasing slice boundaries.
    bounds: Vec<f64>,
    /// `n` slice envelopes.
    envelopes: Vec<Interval>,
    /// `n + 1` gates, one per boundary.
    gates: Vec<Interval>,
}

impl Tube {
    /// A tube over `tdomain` with slices of width `timestep` (the last
    /// slice may be shorter), every envelope set to `codomain`.
    pub fn new(tdomain: Interval, timestep: f64, codomain: Interval) -> Result<Self, DomainError> {
        if tdomain.is_empty() || tdomain.is_unbounded() || tdomain.is_degenerate() {
            return Err(DomainError::InvalidTimeDomain);
        }
        if !timestep.is_finite() || timestep <= 0.0 {
            return Err(DomainError::InvalidTimestep { value: timestep });
        }
        let mut bounds = vec![tdomain.lb()];
        let mut k = 1u64;
        loop {
            let t = tdomain.lb() + k as f64 * timestep;
            if t >= tdomain.ub() {
                break;
            }
            bounds.push(t);
            k += 1;
        }
        bounds.push(tdomain.ub());
        let n = bounds.len() - 1;
        Self::from_slices(bounds, vec![codomain; n])
    }

    /// A tube with explicit slice boundaries and envelopes.
    ///
    /// Gates are initialized to the intersection of adjacent envelopes.
    pub fn from_slices(bounds: Vec<f64>, envelopes: Vec<Interval>) -> Result<Self, DomainError> {
        if bounds.len() < 2 || bounds.iter().any(|t| !t.is_finite()) {
            return Err(DomainError::InvalidTimeDomain);
        }
        if bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(DomainError::InvalidTimeDomain);
        }
        if envelopes.len() != bounds.len() - 1 {
            return Err(DomainError::DimensionMismatch {
                expected: bounds.len() - 1,
                actual: envelopes.len(),
            });
        }
        let n = envelopes.len();
        let gates = (0..=n)
            .map(|k| match k {
                0 => envelopes[0],
                k if k == n => envelopes[n - 1],
                k => envelopes[k - 1] & envelopes[k],
            })
            .collect();
        let mut tube = Self {
            bounds,
            envelopes,
            gates,
        };
        if tube.is_empty() {
            Enclosure::set_empty(&mut tube);
        }
        Ok(tube)
    }

    /// The time domain `[t0, tn]`.
    pub fn tdomain(&self) -> Interval {
        Interval::new(self.bounds[0], self.bounds[self.bounds.len() - 1])
    }

    /// Number of slices.
    pub fn nb_slices(&self) -> usize {
        self.envelopes.len()
    }

    /// Slice boundaries `t0 < t1 < … < tn`.
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Time domain of slice `k`.
    pub fn slice_tdomain(&self, k: usize) -> Interval {
        Interval::new(self.bounds[k], self.bounds[k + 1])
    }

    /// Envelope of slice `k`.
    pub fn envelope(&self, k: usize) -> Interval {
        self.envelopes[k]
    }

    /// Gate at boundary `k` (`0..=nb_slices()`).
    pub fn gate(&self, k: usize) -> Interval {
        self.gates[k]
    }

    /// All envelopes, in time order.
    pub fn envelopes(&self) -> &[Interval] {
        &self.envelopes
    }

    /// All gates, in time order.
    pub fn gates(&self) -> &[Interval] {
        &self.gates
    }

    /// Hull of all envelopes.
    pub fn codomain(&self) -> Interval {
        self.envelopes
            .iter()
            .fold(Interval::EMPTY, |acc, e| acc.hull(e))
    }

    /// Whether `self` and `other` share the same slice boundaries.
    pub fn same_slicing(&self, other: &Tube) -> bool {
        self.bounds == other.bounds
    }

    /// Index of the gate located exactly at `t`, if any.
    ///
    /// `-0.0` and `0.0` name the same instant.
    pub fn gate_index(&self, t: f64) -> Option<usize> {
        if t.is_nan() {
            return None;
        }
        self.bounds
            .binary_search_by(|b| b.partial_cmp(&t).unwrap_or(Ordering::Less))
            .ok()
    }

    /// Index of the slice containing `t`; the last slice owns `tn`.
    pub fn slice_index(&self, t: f64) -> Option<usize> {
        if !self.tdomain().contains(t) {
            return None;
        }
        let k = self.bounds.partition_point(|&b| b <= t);
        Some((k - 1).min(self.nb_slices() - 1))
    }

    /// Enclosure of `x(t)`: the gate if `t` is a boundary, otherwise the
    /// envelope of the slice containing `t`. Empty outside the time domain.
    pub fn eval(&self, t: f64) -> Interval {
        if let Some(g) = self.gate_index(t) {
            return self.gates[g];
        }
        match self.slice_index(t) {
            Some(k) => self.envelopes[k],
            None => Interval::EMPTY,
        }
    }

    /// Enclosure of `x([t])`: hull over every slice meeting `t`.
    pub fn eval_over(&self, t: &Interval) -> Interval {
        let t = t.intersect(&self.tdomain());
        if t.is_empty() {
            return Interval::EMPTY;
        }
        if t.is_degenerate() {
            return self.eval(t.lb());
        }
        (0..self.nb_slices())
            .filter(|&k| self.bounds[k] < t.ub() && self.bounds[k + 1] > t.lb())
            .fold(Interval::EMPTY, |acc, k| acc.hull(&self.envelopes[k]))
    }

    /// Split the slice containing `t` so that `t` becomes a boundary.
    ///
    /// Returns `Ok(false)` if `t` already is a boundary. The new gate is
    /// the envelope of the split slice.
    pub fn sample(&mut self, t: f64) -> Result<bool, DomainError> {
        if self.gate_index(t).is_some() {
            return Ok(false);
        }
        let k = self
            .slice_index(t)
            .ok_or(DomainError::TimeOutOfDomain { t })?;
        self.bounds.insert(k + 1, t);
        self.envelopes.insert(k + 1, self.envelopes[k]);
        self.gates.insert(k + 1, self.envelopes[k]);
        Ok(true)
    }

    /// Narrow the value at instant `t` by `y`, sampling the tube at `t`
    /// first if needed. Returns whether the gate changed.
    pub fn narrow_at(&mut self, t: f64, y: &Interval) -> Result<bool, DomainError> {
        self.sample(t)?;
        let g = self
            .gate_index(t)
            .ok_or(DomainError::TimeOutOfDomain { t })?;
        Ok(self.narrow_gate(g, y))
    }

    /// Narrow gate `k`. Emptiness empties the whole tube.
    pub fn narrow_gate(&mut self, k: usize, y: &Interval) -> bool {
        let changed = self.gates[k].narrow(y);
        if changed && self.gates[k].is_empty() {
            Enclosure::set_empty(self);
        }
        changed
    }

    /// Narrow envelope `k` and its two gates. Emptiness empties the whole tube.
    pub fn narrow_envelope(&mut self, k: usize, y: &Interval) -> bool {
        let mut changed = self.envelopes[k].narrow(y);
        if changed {
            let e = self.envelopes[k];
            changed |= self.gates[k].narrow(&e);
            changed |= self.gates[k + 1].narrow(&e);
            if self.is_empty() {
                Enclosure::set_empty(self);
            }
        }
        changed
    }

    /// Whether any envelope or gate is empty.
    pub fn is_empty(&self) -> bool {
        self.envelopes.iter().any(Interval::is_empty) || self.gates.iter().any(Interval::is_empty)
    }

    /// `Σ width·diam(envelope) + Σ diam(gate)`.
    ///
    /// Gates are counted so that contractions acting only on gates are
    /// observable.
    pub fn volume(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let envelopes: f64 = self
            .envelopes
            .iter()
            .enumerate()
            .map(|(k, e)| (self.bounds[k + 1] - self.bounds[k]) * e.diam())
            .sum();
        let gates: f64 = self.gates.iter().map(Interval::diam).sum();
        envelopes + gates
    }
}

impl Enclosure for Tube {
    fn kind(&self) -> DomainKind {
        DomainKind::Tube
    }

    fn is_empty(&self) -> bool {
        Tube::is_empty(self)
    }

    fn size(&self) -> f64 {
        self.volume()
    }

    fn narrow(&mut self, other: &Self) -> Result<bool, DomainError> {
        if !self.same_slicing(other) {
            return Err(DomainError::SlicingMismatch);
        }
        let mut changed = false;
        for k in 0..self.nb_slices() {
            changed |= self.narrow_envelope(k, &other.envelopes[k]);
        }
        for k in 0..self.gates.len() {
            changed |= self.narrow_gate(k, &other.gates[k]);
        }
        Ok(changed)
    }

    fn set_empty(&mut self) {
        self.envelopes.iter_mut().for_each(|e| *e = Interval::EMPTY);
        self.gates.iter_mut().for_each(|g| *g = Interval::EMPTY);
    }
}

impl fmt::Display for Tube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}↦{}, {} slice{}",
            self.tdomain(),
            self.codomain(),
            self.nb_slices(),
            if self.nb_slices() == 1 { "" } else { "s" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tube_0_10() -> Tube {
        Tube::new(Interval::new(0.0, 10.0), 1.0, Interval::new(0.0, 10.0)).unwrap()
    }

    #[test]
    fn uniform_slicing() {
        let x = tube_0_10();
        assert_eq!(x.nb_slices(), 10);
        assert_eq!(x.tdomain(), Interval::new(0.0, 10.0));
        assert_eq!(x.slice_tdomain(3), Interval::new(3.0, 4.0));
        assert_eq!(x.gate_index(2.0), Some(2));
        assert_eq!(x.gate_index(2.5), None);
        assert_eq!(x.slice_index(2.5), Some(2));
        assert_eq!(x.slice_index(10.0), Some(9));
        assert_eq!(x.slice_index(11.0), None);
    }

    #[test]
    fn negative_zero_is_the_initial_gate() {
        let mut x = Tube::new(Interval::new(0.0, 4.0), 1.0, Interval::new(0.0, 10.0)).unwrap();
        assert_eq!(x.gate_index(-0.0), Some(0));
        assert_eq!(x.gate_index(f64::NAN), None);
        assert!(!x.sample(-0.0).unwrap());
        assert_eq!(x.nb_slices(), 4);
        assert!(x.narrow_at(-0.0, &Interval::point(5.0)).unwrap());
        assert_eq!(x.eval(0.0), Interval::point(5.0));
        assert!(x.bounds().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn last_slice_may_be_shorter() {
        let x = Tube::new(Interval::new(0.0, 1.0), 0.4, Interval::ALL_REALS).unwrap();
        assert_eq!(x.nb_slices(), 3);
        assert_eq!(x.bounds()[3], 1.0);
    }

    #[test]
    fn invalid_construction() {
        assert_eq!(
            Tube::new(Interval::new(0.0, 0.0), 1.0, Interval::ALL_REALS),
            Err(DomainError::InvalidTimeDomain)
        );
        assert_eq!(
            Tube::new(Interval::new(0.0, 1.0), 0.0, Interval::ALL_REALS),
            Err(DomainError::InvalidTimestep { value: 0.0 })
        );
        assert!(Tube::from_slices(vec![0.0, 1.0], vec![]).is_err());
        assert!(Tube::from_slices(vec![1.0, 0.0], vec![Interval::ALL_REALS]).is_err());
    }

    #[test]
    fn narrow_at_gate_does_not_resample() {
        let mut x = tube_0_10();
        let changed = x.narrow_at(2.0, &Interval::point(5.0)).unwrap();
        assert!(changed);
        assert_eq!(x.nb_slices(), 10);
        assert_eq!(x.eval(2.0), Interval::point(5.0));
        assert_eq!(x.eval(2.5), Interval::new(0.0, 10.0));
    }

    #[test]
    fn narrow_at_between_gates_samples() {
        let mut x = tube_0_10();
        assert!(x.narrow_at(2.5, &Interval::new(4.0, 6.0)).unwrap());
        assert_eq!(x.nb_slices(), 11);
        assert_eq!(x.eval(2.5), Interval::new(4.0, 6.0));
        assert_eq!(
            x.narrow_at(12.0, &Interval::point(0.0)),
            Err(DomainError::TimeOutOfDomain { t: 12.0 })
        );
    }

    #[test]
    fn eval_over_takes_hull_of_slices() {
        let bounds = vec![0.0, 1.0, 2.0, 3.0];
        let envs = vec![
            Interval::new(0.0, 1.0),
            Interval::new(1.0, 2.0),
            Interval::new(2.0, 3.0),
        ];
        let x = Tube::from_slices(bounds, envs).unwrap();
        assert_eq!(x.eval_over(&Interval::new(0.5, 1.5)), Interval::new(0.0, 2.0));
        assert_eq!(x.eval_over(&Interval::new(1.0, 2.0)), Interval::new(1.0, 2.0));
        assert_eq!(x.eval_over(&Interval::new(5.0, 6.0)), Interval::EMPTY);
        assert_eq!(x.gate(1), Interval::point(1.0));
    }

    #[test]
    fn envelope_narrowing_narrows_gates() {
        let mut x = tube_0_10();
        assert!(x.narrow_envelope(0, &Interval::new(1.0, 2.0)));
        assert_eq!(x.gate(0), Interval::new(1.0, 2.0));
        assert_eq!(x.gate(1), Interval::new(1.0, 2.0));
        assert_eq!(x.gate(2), Interval::new(0.0, 10.0));
    }

    #[test]
    fn empty_gate_empties_tube() {
        let mut x = tube_0_10();
        x.narrow_gate(3, &Interval::new(20.0, 30.0));
        assert!(x.is_empty());
        assert!(x.envelope(0).is_empty());
        assert_eq!(x.volume(), 0.0);
    }

    #[test]
    fn volume_counts_envelopes_and_gates() {
        let x = Tube::new(Interval::new(0.0, 2.0), 1.0, Interval::new(0.0, 1.0)).unwrap();
        // 2 slices of width 1 and diam 1, 3 gates of diam 1.
        assert_eq!(x.volume(), 5.0);
    }

    #[test]
    fn narrow_requires_same_slicing() {
        let mut x = tube_0_10();
        let y = Tube::new(Interval::new(0.0, 10.0), 2.0, Interval::ALL_REALS).unwrap();
        assert_eq!(
            Enclosure::narrow(&mut x, &y),
            Err(DomainError::SlicingMismatch)
        );
        let z = Tube::new(Interval::new(0.0, 10.0), 1.0, Interval::new(2.0, 3.0)).unwrap();
        assert!(Enclosure::narrow(&mut x, &z).unwrap());
        assert_eq!(x.codomain(), Interval::new(2.0, 3.0));
    }
}
