//! The tagged enclosure variant stored by a contractor network.

use std::fmt;

use tubenet_core::{DomainError, DomainKind, Enclosure};

use crate::interval::Interval;
use crate::interval_vector::IntervalVector;
use crate::tube::Tube;
use crate::tube_vector::TubeVector;

/// One of the four enclosure kinds.
///
/// The network treats every variant uniformly through [`Enclosure`];
/// contractors use the typed accessors to reach the concrete value.
#[derive(Clone, Debug, PartialEq)]
pub enum Domain {
    /// A scalar interval.
    Interval(Interval),
    /// A box.
    IntervalVector(IntervalVector),
    /// A scalar tube.
    Tube(Tube),
    /// A tube vector.
    TubeVector(TubeVector),
}

impl Domain {
    /// A degenerate box from a list of numbers.
    ///
    /// Fails with [`DomainError::EmptyLiteral`] on a zero-length list.
    pub fn from_values(values: &[f64]) -> Result<Self, DomainError> {
        IntervalVector::from_values(values).map(Domain::IntervalVector)
    }

    /// Vector dimension: `1` for scalar kinds.
    pub fn dim(&self) -> usize {
        match self {
            Self::Interval(_) | Self::Tube(_) => 1,
            Self::IntervalVector(v) => v.dim(),
            Self::TubeVector(v) => v.dim(),
        }
    }

    /// The interval, if this is a scalar interval.
    pub fn as_interval(&self) -> Option<&Interval> {
        match self {
            Self::Interval(x) => Some(x),
            _ => None,
        }
    }

    /// Mutable interval, if this is a scalar interval.
    pub fn as_interval_mut(&mut self) -> Option<&mut Interval> {
        match self {
            Self::Interval(x) => Some(x),
            _ => None,
        }
    }

    /// The box, if this is an interval vector.
    pub fn as_interval_vector(&self) -> Option<&IntervalVector> {
        match self {
            Self::IntervalVector(x) => Some(x),
            _ => None,
        }
    }

    /// Mutable box, if this is an interval vector.
    pub fn as_interval_vector_mut(&mut self) -> Option<&mut IntervalVector> {
        match self {
            Self::IntervalVector(x) => Some(x),
            _ => None,
        }
    }

    /// The tube, if this is a scalar tube.
    pub fn as_tube(&self) -> Option<&Tube> {
        match self {
            Self::Tube(x) => Some(x),
            _ => None,
        }
    }

    /// Mutable tube, if this is a scalar tube.
    pub fn as_tube_mut(&mut self) -> Option<&mut Tube> {
        match self {
            Self::Tube(x) => Some(x),
            _ => None,
        }
    }

    /// The tube vector, if this is one.
    pub fn as_tube_vector(&self) -> Option<&TubeVector> {
        match self {
            Self::TubeVector(x) => Some(x),
            _ => None,
        }
    }

    /// Mutable tube vector, if this is one.
    pub fn as_tube_vector_mut(&mut self) -> Option<&mut TubeVector> {
        match self {
            Self::TubeVector(x) => Some(x),
            _ => None,
        }
    }

    /// Every interval the domain is made of: the interval itself, the
    /// components of a box, or the envelopes then gates of each tube.
    pub fn components(&self) -> Vec<Interval> {
        fn tube_parts(x: &Tube) -> impl Iterator<Item = Interval> + '_ {
            x.envelopes().iter().chain(x.gates()).copied()
        }
        match self {
            Self::Interval(x) => vec![*x],
            Self::IntervalVector(x) => x.iter().copied().collect(),
            Self::Tube(x) => tube_parts(x).collect(),
            Self::TubeVector(x) => x.iter().flat_map(tube_parts).collect(),
        }
    }

    /// Narrow a temporal domain at instant `t` by a matching static value:
    /// a [`Tube`] by an [`Interval`], a [`TubeVector`] by an
    /// [`IntervalVector`]. The tube is sampled at `t` when needed.
    pub fn narrow_at(&mut self, t: f64, value: &Domain) -> Result<bool, DomainError> {
        match (self, value) {
            (Self::Tube(x), Self::Interval(y)) => x.narrow_at(t, y),
            (Self::TubeVector(x), Self::IntervalVector(y)) => x.narrow_at(t, y),
            (Self::Tube(_), other) => Err(DomainError::KindMismatch {
                expected: DomainKind::Interval,
                actual: other.kind(),
            }),
            (Self::TubeVector(_), other) => Err(DomainError::KindMismatch {
                expected: DomainKind::IntervalVector,
                actual: other.kind(),
            }),
            (this, _) => Err(DomainError::KindMismatch {
                expected: DomainKind::Tube,
                actual: this.kind(),
            }),
        }
    }
}

impl Enclosure for Domain {
    fn kind(&self) -> DomainKind {
        match self {
            Self::Interval(_) => DomainKind::Interval,
            Self::IntervalVector(_) => DomainKind::IntervalVector,
            Self::Tube(_) => DomainKind::Tube,
            Self::TubeVector(_) => DomainKind::TubeVector,
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Interval(x) => x.is_empty(),
            Self::IntervalVector(x) => x.is_empty(),
            Self::Tube(x) => x.is_empty(),
            Self::TubeVector(x) => x.is_empty(),
        }
    }

    fn size(&self) -> f64 {
        match self {
            Self::Interval(x) => x.size(),
            Self::IntervalVector(x) => x.size(),
            Self::Tube(x) => x.size(),
            Self::TubeVector(x) => x.size(),
        }
    }

    fn narrow(&mut self, other: &Self) -> Result<bool, DomainError> {
        match (self, other) {
            (Self::Interval(x), Self::Interval(y)) => Enclosure::narrow(x, y),
            (Self::IntervalVector(x), Self::IntervalVector(y)) => Enclosure::narrow(x, y),
            (Self::Tube(x), Self::Tube(y)) => Enclosure::narrow(x, y),
            (Self::TubeVector(x), Self::TubeVector(y)) => Enclosure::narrow(x, y),
            (this, other) => Err(DomainError::KindMismatch {
                expected: this.kind(),
                actual: other.kind(),
            }),
        }
    }

    fn set_empty(&mut self) {
        match self {
            Self::Interval(x) => x.set_empty(),
            Self::IntervalVector(x) => x.set_empty(),
            Self::Tube(x) => x.set_empty(),
            Self::TubeVector(x) => x.set_empty(),
        }
    }
}

impl From<f64> for Domain {
    fn from(x: f64) -> Self {
        Domain::Interval(Interval::point(x))
    }
}

impl From<Interval> for Domain {
    fn from(x: Interval) -> Self {
        Domain::Interval(x)
    }
}

impl From<IntervalVector> for Domain {
    fn from(x: IntervalVector) -> Self {
        Domain::IntervalVector(x)
    }
}

impl From<Tube> for Domain {
    fn from(x: Tube) -> Self {
        Domain::Tube(x)
    }
}

impl From<&Tube> for Domain {
    fn from(x: &Tube) -> Self {
        Domain::Tube(x.clone())
    }
}

impl From<TubeVector> for Domain {
    fn from(x: TubeVector) -> Self {
        Domain::TubeVector(x)
    }
}

impl From<&TubeVector> for Domain {
    fn from(x: &TubeVector) -> Self {
        Domain::TubeVector(x.clone())
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interval(x) => write!(f, "{x}"),
            Self::IntervalVector(x) => write!(f, "{x}"),
            Self::Tube(x) => write!(f, "{x}"),
            Self::TubeVector(x) => write!(f, "{x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_coercions() {
        assert_eq!(Domain::from(2.0), Domain::Interval(Interval::point(2.0)));
        let d = Domain::from_values(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(d.kind(), DomainKind::IntervalVector);
        assert_eq!(d.dim(), 3);
        assert_eq!(Domain::from_values(&[]), Err(DomainError::EmptyLiteral));
    }

    #[test]
    fn components_cover_every_interval() {
        let a = Interval::new(0.0, 1.0);
        let b = Interval::new(2.0, 3.0);
        assert_eq!(Domain::from(a).components(), vec![a]);
        let v = IntervalVector::from_intervals(vec![a, b]).unwrap();
        assert_eq!(Domain::from(v).components(), vec![a, b]);

        let tube = Tube::from_slices(vec![0.0, 1.0, 2.0], vec![a, a]).unwrap();
        let parts = Domain::from(tube).components();
        assert_eq!(parts.len(), 2 + 3);
        assert!(parts.iter().all(|p| *p == a));
    }

    #[test]
    fn narrow_across_kinds_fails() {
        let mut a = Domain::from(Interval::new(0.0, 1.0));
        let b = Domain::from_values(&[0.5]).unwrap();
        assert_eq!(
            a.narrow(&b),
            Err(DomainError::KindMismatch {
                expected: DomainKind::Interval,
                actual: DomainKind::IntervalVector,
            })
        );
    }

    #[test]
    fn uniform_capability_over_kinds() {
        let mut a = Domain::from(Interval::new(0.0, 10.0));
        assert_eq!(a.size(), 10.0);
        assert!(a.narrow(&Domain::from(Interval::new(3.0, 7.0))).unwrap());
        assert_eq!(a.size(), 4.0);
        a.set_empty();
        assert!(a.is_empty());
        assert_eq!(a.as_interval(), Some(&Interval::EMPTY));
    }

    #[test]
    fn narrow_at_dispatches_by_kind() {
        let tube = Tube::new(Interval::new(0.0, 4.0), 1.0, Interval::new(0.0, 10.0)).unwrap();
        let mut d = Domain::from(tube);
        assert!(d.narrow_at(2.0, &Domain::from(5.0)).unwrap());
        assert_eq!(d.as_tube().unwrap().eval(2.0), Interval::point(5.0));

        let err = d.narrow_at(2.0, &Domain::from_values(&[1.0]).unwrap());
        assert_eq!(
            err,
            Err(DomainError::KindMismatch {
                expected: DomainKind::Interval,
                actual: DomainKind::IntervalVector,
            })
        );

        let mut scalar = Domain::from(1.0);
        assert!(scalar.narrow_at(0.0, &Domain::from(1.0)).is_err());
    }
}
