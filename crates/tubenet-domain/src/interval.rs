//! Closed real intervals.

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, Mul, Neg, Sub};

use tubenet_core::{DomainError, DomainKind, Enclosure};

/// A closed interval `[lb, ub]` of the extended reals, or the empty set.
///
/// The empty set has the canonical representation `[+inf, -inf]`; every
/// constructor and operation normalizes to it, so `==` compares empty
/// intervals correctly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    lb: f64,
    ub: f64,
}

impl Interval {
    /// The empty set.
    pub const EMPTY: Interval = Interval {
        lb: f64::INFINITY,
        ub: f64::NEG_INFINITY,
    };

    /// The whole real line `[-inf, +inf]`.
    pub const ALL_REALS: Interval = Interval {
        lb: f64::NEG_INFINITY,
        ub: f64::INFINITY,
    };

    /// Build `[lb, ub]`.
    ///
    /// Returns [`Interval::EMPTY`] when `lb > ub`, when either bound is
    /// NaN, or when the interval would contain no real number
    /// (`[+inf, +inf]`, `[-inf, -inf]`).
    pub fn new(lb: f64, ub: f64) -> Self {
        if lb.is_nan() || ub.is_nan() || lb > ub || lb == f64::INFINITY || ub == f64::NEG_INFINITY
        {
            return Self::EMPTY;
        }
        Self { lb, ub }
    }

    /// The degenerate interval `[x, x]`.
    pub fn point(x: f64) -> Self {
        Self::new(x, x)
    }

    /// Lower bound (`+inf` for the empty set).
    pub fn lb(&self) -> f64 {
        self.lb
    }

    /// Upper bound (`-inf` for the empty set).
    pub fn ub(&self) -> f64 {
        self.ub
    }

    /// Midpoint. NaN for the empty set; finite bounds are required for a
    /// meaningful result.
    pub fn mid(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        self.lb + (self.ub - self.lb) / 2.0
    }

    /// Whether this is the empty set.
    pub fn is_empty(&self) -> bool {
        self.lb > self.ub
    }

    /// Whether the interval is a single point.
    pub fn is_degenerate(&self) -> bool {
        !self.is_empty() && self.lb == self.ub
    }

    /// Whether either bound is infinite.
    pub fn is_unbounded(&self) -> bool {
        !self.is_empty() && (self.lb.is_infinite() || self.ub.is_infinite())
    }

    /// Diameter `ub - lb`; `0` for the empty set.
    pub fn diam(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.ub - self.lb
        }
    }

    /// Whether `x` belongs to the interval.
    pub fn contains(&self, x: f64) -> bool {
        self.lb <= x && x <= self.ub
    }

    /// Whether `self ⊆ other`. The empty set is a subset of everything.
    pub fn is_subset(&self, other: &Interval) -> bool {
        self.is_empty() || (other.lb <= self.lb && self.ub <= other.ub)
    }

    /// Whether the two intervals share at least one point.
    pub fn intersects(&self, other: &Interval) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Set intersection.
    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval::new(self.lb.max(other.lb), self.ub.min(other.ub))
    }

    /// Interval hull of the union.
    pub fn hull(&self, other: &Interval) -> Interval {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Interval::new(self.lb.min(other.lb), self.ub.max(other.ub))
    }

    /// Intersect in place; returns whether the value changed.
    pub fn narrow(&mut self, other: &Interval) -> bool {
        let next = self.intersect(other);
        let changed = next != *self;
        *self = next;
        changed
    }

    /// `{ s·x : s ∈ [0, w], x ∈ self }` for a nonnegative width `w`.
    ///
    /// Used to project a derivative enclosure over a time step.
    pub fn sweep(&self, w: f64) -> Interval {
        if self.is_empty() {
            return Self::EMPTY;
        }
        Interval::point(0.0).hull(&(*self * w))
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::ALL_REALS
    }
}

impl From<f64> for Interval {
    fn from(x: f64) -> Self {
        Interval::point(x)
    }
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, rhs: Interval) -> Interval {
        if self.is_empty() || rhs.is_empty() {
            return Interval::EMPTY;
        }
        Interval::new(self.lb + rhs.lb, self.ub + rhs.ub)
    }
}

impl Sub for Interval {
    type Output = Interval;

    fn sub(self, rhs: Interval) -> Interval {
        self + (-rhs)
    }
}

impl Neg for Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        if self.is_empty() {
            return Interval::EMPTY;
        }
        Interval {
            lb: -self.ub,
            ub: -self.lb,
        }
    }
}

impl Mul<f64> for Interval {
    type Output = Interval;

    fn mul(self, k: f64) -> Interval {
        if self.is_empty() || k.is_nan() {
            return Interval::EMPTY;
        }
        if k == 0.0 {
            return Interval::point(0.0);
        }
        if k > 0.0 {
            Interval::new(self.lb * k, self.ub * k)
        } else {
            Interval::new(self.ub * k, self.lb * k)
        }
    }
}

impl BitAnd for Interval {
    type Output = Interval;

    fn bitand(self, rhs: Interval) -> Interval {
        self.intersect(&rhs)
    }
}

impl BitOr for Interval {
    type Output = Interval;

    fn bitor(self, rhs: Interval) -> Interval {
        self.hull(&rhs)
    }
}

impl Enclosure for Interval {
    fn kind(&self) -> DomainKind {
        DomainKind::Interval
    }

    fn is_empty(&self) -> bool {
        Interval::is_empty(self)
    }

    fn size(&self) -> f64 {
        self.diam()
    }

    fn narrow(&mut self, other: &Self) -> Result<bool, DomainError> {
        Ok(Interval::narrow(self, other))
    }

    fn set_empty(&mut self) {
        *self = Interval::EMPTY;
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "∅")
        } else {
            write!(f, "[{}, {}]", self.lb, self.ub)
        }
    }
}
