//! Network configuration and validation.
//!
//! [`NetworkConfig`] holds the tunables of the propagation loop.
//! [`validate()`](NetworkConfig::validate) is called by
//! [`ContractorNetwork::with_config`](crate::ContractorNetwork::with_config)
//! and by every setter, so an invalid value never reaches the loop.

use thiserror::Error;
use tubenet_domain::Interval;

/// Default relative-change threshold below which a domain counts as changed.
pub const DEFAULT_FIXED_POINT_RATIO: f64 = 0.9999;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`NetworkConfig::validate()`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The fixed-point ratio is NaN or outside `(0, 1]`.
    #[error("fixed_point_ratio must be in (0, 1], got {value}")]
    InvalidFixedPointRatio {
        /// The invalid value.
        value: f64,
    },
}

// ── NetworkConfig ──────────────────────────────────────────────────

/// Tunables of the propagation loop.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
    /// A domain whose size goes from `before` to `after` is changed when
    /// `after < fixed_point_ratio · before`, or when it became empty.
    /// `1.0` treats any strict decrease as a change; smaller values stop
    /// propagation earlier. Default: 0.9999.
    pub fixed_point_ratio: f64,
    /// Log every contractor invocation at `info` level instead of `trace`.
    /// Default: false.
    pub verbose: bool,
    /// Fail the round when a contractor widens a domain. Default: true.
    pub check_monotonicity: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            fixed_point_ratio: DEFAULT_FIXED_POINT_RATIO,
            verbose: false,
            check_monotonicity: true,
        }
    }
}

impl NetworkConfig {
    /// Check all invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = self.fixed_point_ratio;
        if r.is_nan() || r <= 0.0 || r > 1.0 {
            return Err(ConfigError::InvalidFixedPointRatio { value: r });
        }
        Ok(())
    }

    /// Whether a domain going from `before` to `after` counts as changed.
    ///
    /// `became_empty` takes precedence: emptiness is always a change.
    /// From an infinite size, any finite size is a change. Two infinite
    /// sizes cannot be told apart here; compare the domains' components
    /// with [`is_significant_unbounded`](Self::is_significant_unbounded).
    pub fn is_significant(&self, before: f64, after: f64, became_empty: bool) -> bool {
        if became_empty {
            return true;
        }
        if before.is_infinite() {
            return after.is_finite();
        }
        after < self.fixed_point_ratio * before
    }

    /// Whether an unbounded domain changed, given its
    /// [`components`](tubenet_domain::Domain::components) before and after.
    ///
    /// A bounded component is changed under the same ratio rule as a
    /// whole domain. A component with an infinite bound is changed when
    /// that bound became finite, or when a finite bound moved by more
    /// than `(1 - fixed_point_ratio) · max(|bound|, 1)`.
    pub fn is_significant_unbounded(&self, before: &[Interval], after: &[Interval]) -> bool {
        before.len() != after.len()
            || before
                .iter()
                .zip(after)
                .any(|(b, a)| self.component_changed(b, a))
    }

    fn component_changed(&self, before: &Interval, after: &Interval) -> bool {
        if after.is_empty() || before.is_empty() {
            return after.is_empty() != before.is_empty();
        }
        if before.is_unbounded() {
            return self.bound_moved(before.lb(), after.lb())
                || self.bound_moved(before.ub(), after.ub());
        }
        after.diam() < self.fixed_point_ratio * before.diam()
    }

    fn bound_moved(&self, before: f64, after: f64) -> bool {
        if before == after {
            return false;
        }
        if before.is_infinite() {
            return after.is_finite();
        }
        (after - before).abs() > (1.0 - self.fixed_point_ratio) * before.abs().max(1.0)
    }
}
