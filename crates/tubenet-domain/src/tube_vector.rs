//! Vectors of tubes sharing one slicing.

use std::fmt;

use tubenet_core::{DomainError, DomainKind, Enclosure};

use crate::interval::Interval;
use crate::interval_vector::IntervalVector;
use crate::tube::Tube;

/// A non-empty vector of [`Tube`]s with identical slice boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct TubeVector {
    components: Vec<Tube>,
}

impl TubeVector {
    /// A tube vector over `tdomain` sliced every `timestep`, with each
    /// component's envelopes set to the matching component of `codomain`.
    pub fn new(
        tdomain: Interval,
        timestep: f64,
        codomain: &IntervalVector,
    ) -> Result<Self, DomainError> {
        let components = codomain
            .iter()
            .map(|c| Tube::new(tdomain, timestep, *c))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tubes(components)
    }

    /// A tube vector from existing tubes, which must share one slicing.
    pub fn from_tubes(components: Vec<Tube>) -> Result<Self, DomainError> {
        let first = components.first().ok_or(DomainError::EmptyLiteral)?;
        if components.iter().any(|c| !c.same_slicing(first)) {
            return Err(DomainError::SlicingMismatch);
        }
        let mut v = Self { components };
        if v.is_empty() {
            Enclosure::set_empty(&mut v);
        }
        Ok(v)
    }

    /// Number of components.
    pub fn dim(&self) -> usize {
        self.components.len()
    }

    /// The shared time domain.
    pub fn tdomain(&self) -> Interval {
        self.components[0].tdomain()
    }

    /// Component `i`, if in range.
    pub fn get(&self, i: usize) -> Option<&Tube> {
        self.components.get(i)
    }

    /// Mutable component `i`, if in range.
    ///
    /// Narrowing through the returned tube keeps the shared slicing;
    /// callers must not [`sample`](Tube::sample) a single component.
    pub fn get_mut(&mut self, i: usize) -> Option<&mut Tube> {
        self.components.get_mut(i)
    }

    /// Iterate over the components.
    pub fn iter(&self) -> impl Iterator<Item = &Tube> {
        self.components.iter()
    }

    /// Whether `self` and `other` have the same dimension and slicing.
    pub fn same_slicing(&self, other: &TubeVector) -> bool {
        self.dim() == other.dim() && self.components[0].same_slicing(&other.components[0])
    }

    /// Box enclosure of `x(t)`.
    pub fn eval(&self, t: f64) -> Result<IntervalVector, DomainError> {
        IntervalVector::from_intervals(self.components.iter().map(|c| c.eval(t)).collect())
    }

    /// Sample every component at `t`.
    pub fn sample(&mut self, t: f64) -> Result<bool, DomainError> {
        let mut split = false;
        for c in &mut self.components {
            split |= c.sample(t)?;
        }
        Ok(split)
    }

    /// Narrow the value at instant `t` by the box `y`.
    pub fn narrow_at(&mut self, t: f64, y: &IntervalVector) -> Result<bool, DomainError> {
        if y.dim() != self.dim() {
            return Err(DomainError::DimensionMismatch {
                expected: self.dim(),
                actual: y.dim(),
            });
        }
        self.sample(t)?;
        let mut changed = false;
        for (c, yi) in self.components.iter_mut().zip(y.iter()) {
            changed |= c.narrow_at(t, yi)?;
        }
        if changed && self.is_empty() {
            Enclosure::set_empty(self);
        }
        Ok(changed)
    }

    /// Whether any component is empty.
    pub fn is_empty(&self) -> bool {
        self.components.iter().any(Tube::is_empty)
    }

    /// Sum of component volumes.
    pub fn volume(&self) -> f64 {
        self.components.iter().map(Tube::volume).sum()
    }
}

impl Enclosure for TubeVector {
    fn kind(&self) -> DomainKind {
        DomainKind::TubeVector
    }

    fn is_empty(&self) -> bool {
        TubeVector::is_empty(self)
    }

    fn size(&self) -> f64 {
        self.volume()
    }

    fn narrow(&mut self, other: &Self) -> Result<bool, DomainError> {
        if other.dim() != self.dim() {
            return Err(DomainError::DimensionMismatch {
                expected: self.dim(),
                actual: other.dim(),
            });
        }
        let mut changed = false;
        for (c, o) in self.components.iter_mut().zip(other.iter()) {
            changed |= Enclosure::narrow(c, o)?;
        }
        if changed && self.is_empty() {
            Enclosure::set_empty(self);
        }
        Ok(changed)
    }

    fn set_empty(&mut self) {
        self.components.iter_mut().for_each(Enclosure::set_empty);
    }
}

impl fmt::Display for TubeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d ", self.dim())?;
        match self.components.first() {
            Some(c) => write!(f, "{c}"),
            None => Ok(()),
        }
    }
}
