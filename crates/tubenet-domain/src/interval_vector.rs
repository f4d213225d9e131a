//! Boxes: fixed-size vectors of intervals.

use std::fmt;
use std::ops::Index;

use smallvec::SmallVec;
use tubenet_core::{DomainError, DomainKind, Enclosure};

use crate::interval::Interval;

/// A non-empty vector of intervals (an axis-aligned box).
///
/// Uses `SmallVec<[Interval; 4]>` to avoid heap allocation for boxes
/// up to 4 dimensions. If any component is empty the whole box is
/// empty, and every component is normalized to [`Interval::EMPTY`].
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalVector {
    components: SmallVec<[Interval; 4]>,
}

impl IntervalVector {
    /// A box of dimension `dim` with every component equal to `x`.
    pub fn new(dim: usize, x: Interval) -> Result<Self, DomainError> {
        if dim == 0 {
            return Err(DomainError::EmptyLiteral);
        }
        Ok(Self::normalized((0..dim).map(|_| x).collect()))
    }

    /// A box built from explicit components.
    pub fn from_intervals(components: Vec<Interval>) -> Result<Self, DomainError> {
        if components.is_empty() {
            return Err(DomainError::EmptyLiteral);
        }
        Ok(Self::normalized(components.into_iter().collect()))
    }

    /// A degenerate box at the given point.
    pub fn from_values(values: &[f64]) -> Result<Self, DomainError> {
        if values.is_empty() {
            return Err(DomainError::EmptyLiteral);
        }
        Ok(Self::normalized(
            values.iter().map(|&v| Interval::point(v)).collect(),
        ))
    }

    fn normalized(mut components: SmallVec<[Interval; 4]>) -> Self {
        if components.iter().any(Interval::is_empty) {
            components.iter_mut().for_each(|c| *c = Interval::EMPTY);
        }
        Self { components }
    }

    /// Number of components.
    pub fn dim(&self) -> usize {
        self.components.len()
    }

    /// Component `i`, if in range.
    pub fn get(&self, i: usize) -> Option<Interval> {
        self.components.get(i).copied()
    }

    /// Iterate over the components.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.components.iter()
    }

    /// Whether the box is empty.
    pub fn is_empty(&self) -> bool {
        self.components.iter().any(Interval::is_empty)
    }

    /// Sum of component diameters.
    pub fn diam_sum(&self) -> f64 {
        self.components.iter().map(Interval::diam).sum()
    }

    /// Copy of components `start..=end`.
    pub fn subvector(&self, start: usize, end: usize) -> Result<IntervalVector, DomainError> {
        self.check_range(start, end)?;
        Ok(Self {
            components: self.components[start..=end].iter().copied().collect(),
        })
    }

    /// Narrow components `start..start + sub.dim()` by `sub`.
    ///
    /// Returns whether any component changed. Emptiness of a single
    /// component empties the whole box.
    pub fn narrow_range(&mut self, start: usize, sub: &IntervalVector) -> Result<bool, DomainError> {
        let end = start + sub.dim() - 1;
        self.check_range(start, end)?;
        let mut changed = false;
        for (c, s) in self.components[start..=end].iter_mut().zip(sub.iter()) {
            changed |= c.narrow(s);
        }
        if changed && self.is_empty() {
            Enclosure::set_empty(self);
        }
        Ok(changed)
    }

    /// Narrow a single component.
    pub fn narrow_component(&mut self, i: usize, x: &Interval) -> Result<bool, DomainError> {
        let dim = self.dim();
        let c = self
            .components
            .get_mut(i)
            .ok_or(DomainError::IndexOutOfRange { index: i, dim })?;
        let changed = c.narrow(x);
        if changed && c.is_empty() {
            Enclosure::set_empty(self);
        }
        Ok(changed)
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), DomainError> {
        let dim = self.dim();
        if start > end {
            return Err(DomainError::IndexOutOfRange { index: start, dim });
        }
        if end >= dim {
            return Err(DomainError::IndexOutOfRange { index: end, dim });
        }
        Ok(())
    }
}

impl Index<usize> for IntervalVector {
    type Output = Interval;

    fn index(&self, i: usize) -> &Interval {
        &self.components[i]
    }
}

impl Enclosure for IntervalVector {
    fn kind(&self) -> DomainKind {
        DomainKind::IntervalVector
    }

    fn is_empty(&self) -> bool {
        IntervalVector::is_empty(self)
    }

    fn size(&self) -> f64 {
        self.diam_sum()
    }

    fn narrow(&mut self, other: &Self) -> Result<bool, DomainError> {
        if other.dim() != self.dim() {
            return Err(DomainError::DimensionMismatch {
                expected: self.dim(),
                actual: other.dim(),
            });
        }
        self.narrow_range(0, other)
    }

    fn set_empty(&mut self) {
        self.components
            .iter_mut()
            .for_each(|c| *c = Interval::EMPTY);
    }
}

impl fmt::Display for IntervalVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, " ; ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}
