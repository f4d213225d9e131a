//! Domain kinds and the temporal propagation direction.

use std::fmt;

/// Classification of an enclosure stored in a network.
///
/// The engine treats all kinds uniformly through [`Enclosure`](crate::Enclosure);
/// the tag is used for scope validation and diagnostics only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DomainKind {
    /// A scalar interval.
    Interval,
    /// A box: fixed-size vector of intervals.
    IntervalVector,
    /// A time-indexed scalar enclosure (tube).
    Tube,
    /// A time-indexed vector enclosure (tube vector).
    TubeVector,
}

impl DomainKind {
    /// Whether this kind is indexed by time.
    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Tube | Self::TubeVector)
    }

    /// Short label used in graph exports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Interval => "interval",
            Self::IntervalVector => "box",
            Self::Tube => "tube",
            Self::TubeVector => "tubevector",
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction along the time axis in which a dynamic contractor
/// carries information.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimePropag {
    /// Past to future only.
    Forward,
    /// Future to past only.
    Backward,
    /// Both directions.
    #[default]
    Both,
}

impl TimePropag {
    /// Whether forward propagation is enabled.
    pub fn forward(self) -> bool {
        matches!(self, Self::Forward | Self::Both)
    }

    /// Whether backward propagation is enabled.
    pub fn backward(self) -> bool {
        matches!(self, Self::Backward | Self::Both)
    }
}

impl fmt::Display for TimePropag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("fwd"),
            Self::Backward => f.write_str("bwd"),
            Self::Both => f.write_str("fwd|bwd"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_propag_predicates() {
        assert!(TimePropag::Forward.forward());
        assert!(!TimePropag::Forward.backward());
        assert!(!TimePropag::Backward.forward());
        assert!(TimePropag::Backward.backward());
        assert!(TimePropag::Both.forward() && TimePropag::Both.backward());
        assert_eq!(TimePropag::default(), TimePropag::Both);
    }

    #[test]
    fn temporal_kinds() {
        assert!(!DomainKind::Interval.is_temporal());
        assert!(!DomainKind::IntervalVector.is_temporal());
        assert!(DomainKind::Tube.is_temporal());
        assert!(DomainKind::TubeVector.is_temporal());
    }
}
