//! Reusable contractor test fixtures.
//!
//! - [`CountingContractor`]: shrinks intervals by a fixed factor and
//!   counts its invocations.
//! - [`WideningContractor`]: widens intervals, violating monotonicity.
//! - [`FailingContractor`]: fails deterministically after N calls.

use std::sync::atomic::{AtomicUsize, Ordering};

use tubenet_contractor::{Contractor, ScopeView, Signature};
use tubenet_core::{ContractError, DomainKind};
use tubenet_domain::{Domain, Interval};

/// Keeps the lower `keep` fraction of every bounded interval in its scope
/// and counts how often it runs.
///
/// `keep = 1.0` makes it a pure observer: it never changes anything, so
/// its call count shows exactly how often the network scheduled it.
pub struct CountingContractor {
    pub name: String,
    pub keep: f64,
    calls: AtomicUsize,
}

impl CountingContractor {
    pub fn new(name: impl Into<String>, keep: f64) -> Self {
        Self {
            name: name.into(),
            keep,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Contractor for CountingContractor {
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> Signature {
        Signature::Repeated(DomainKind::Interval)
    }

    fn contract(&self, scope: &mut ScopeView<'_>) -> Result<(), ContractError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.keep >= 1.0 {
            return Ok(());
        }
        for pos in 0..scope.len() {
            let x = scope.interval(pos)?;
            if x.is_empty() || x.is_unbounded() {
                continue;
            }
            let cut = Interval::new(x.lb(), x.lb() + self.keep * x.diam());
            scope.narrow_interval(pos, &cut)?;
        }
        Ok(())
    }
}

/// Grows every interval in its scope by one on each side.
pub struct WideningContractor {
    pub name: String,
}

impl WideningContractor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Contractor for WideningContractor {
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> Signature {
        Signature::Repeated(DomainKind::Interval)
    }

    fn contract(&self, scope: &mut ScopeView<'_>) -> Result<(), ContractError> {
        for pos in 0..scope.len() {
            let x = scope.interval(pos)?;
            scope.replace(pos, Domain::from(Interval::new(x.lb() - 1.0, x.ub() + 1.0)))?;
        }
        Ok(())
    }
}

/// Fails deterministically after a configurable number of successful calls.
///
/// Successful calls change nothing.
pub struct FailingContractor {
    pub name: String,
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingContractor {
    /// Create a contractor that succeeds `succeed_count` times then fails.
    pub fn new(name: impl Into<String>, succeed_count: usize) -> Self {
        Self {
            name: name.into(),
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }
}

impl Contractor for FailingContractor {
    fn name(&self) -> &str {
        &self.name
    }

    fn contract(&self, _scope: &mut ScopeView<'_>) -> Result<(), ContractError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(ContractError::ExecutionFailed {
                reason: format!("{} failed on call {}", self.name, n + 1),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubenet_core::DomainId;
    use tubenet_domain::Domain;

    fn run(ctc: &dyn Contractor, domains: &mut [Domain]) -> Result<(), ContractError> {
        let scope: Vec<DomainId> = (0..domains.len() as u32).map(DomainId).collect();
        ctc.contract(&mut ScopeView::new(domains, &scope))
    }

    #[test]
    fn counting_halves_and_counts() {
        let ctc = CountingContractor::new("halve", 0.5);
        let mut d = vec![Domain::from(Interval::new(0.0, 8.0)), Domain::from(Interval::ALL_REALS)];
        run(&ctc, &mut d).unwrap();
        run(&ctc, &mut d).unwrap();
        assert_eq!(ctc.calls(), 2);
        assert_eq!(d[0].as_interval(), Some(&Interval::new(0.0, 2.0)));
        assert_eq!(d[1].as_interval(), Some(&Interval::ALL_REALS));
    }

    #[test]
    fn widening_grows() {
        let mut d = vec![Domain::from(Interval::new(0.0, 1.0))];
        run(&WideningContractor::new("w"), &mut d).unwrap();
        assert_eq!(d[0].as_interval(), Some(&Interval::new(-1.0, 2.0)));
    }

    #[test]
    fn failing_after_n() {
        let ctc = FailingContractor::new("f", 2);
        let mut d = vec![Domain::from(1.0)];
        assert!(run(&ctc, &mut d).is_ok());
        assert!(run(&ctc, &mut d).is_ok());
        assert_eq!(
            run(&ctc, &mut d),
            Err(ContractError::ExecutionFailed {
                reason: "f failed on call 3".into()
            })
        );
    }
}
