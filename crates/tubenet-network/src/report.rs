//! Per-round propagation statistics.

use std::time::Duration;

/// Statistics collected during one [`contract`](crate::ContractorNetwork::contract)
/// or [`contract_during`](crate::ContractorNetwork::contract_during) call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContractReport {
    /// Contractors invoked this round.
    pub invocations: usize,
    /// Domain changes detected (one per changed domain per invocation).
    pub changed: usize,
    /// Contractors popped but not invoked because their whole scope was empty.
    pub skipped: usize,
    /// Wall-clock time spent in the round.
    pub elapsed: Duration,
    /// Agenda length when the round returned.
    pub remaining: usize,
}

impl ContractReport {
    /// Whether the round reached a fixed point (the agenda was drained).
    pub fn fixed_point(&self) -> bool {
        self.remaining == 0
    }
}
