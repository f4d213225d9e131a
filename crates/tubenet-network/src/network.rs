//! The contractor network: storage, scope graph, and propagation loop.
//!
//! # Ownership model
//!
//! [`ContractorNetwork`] owns every domain and contractor registration in
//! two append-only arenas. Callers hold [`DomainId`] and [`ContractorId`]
//! handles, which stay valid for the network's lifetime. Propagation takes
//! `&mut self`, so the borrow checker rules out outside mutation while a
//! round is running.
//!
//! # Change detection
//!
//! Sizes are captured immediately before each invocation and compared
//! immediately after it, so external mutations between rounds (such as
//! [`add_data`](ContractorNetwork::add_data) splitting a tube slice) never
//! count against a contractor.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use smallvec::SmallVec;
use tracing::{debug, error, info, trace, warn};
use tubenet_contractor::{validate_scope, Contractor, Flavor, ScopeView};
use tubenet_contractors::CtcSubvector;
use tubenet_core::{ContractorId, DomainError, DomainId, DomainKind, Enclosure};
use tubenet_domain::{Domain, Interval, IntervalVector, Tube, TubeVector};

use crate::agenda::Agenda;
use crate::config::NetworkConfig;
use crate::error::NetworkError;
use crate::graph::{GraphEdge, GraphLayout, GraphNode, NetworkGraph, NodeKind};
use crate::report::ContractReport;

// Compile-time assertion: a network can be moved to another thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<ContractorNetwork>();
    }
};

type Scope = SmallVec<[DomainId; 4]>;

// ── Arena slots ────────────────────────────────────────────────────

#[derive(Default)]
struct DomainSlot {
    name: Option<String>,
    /// Each dependent appears once, even if the domain occurs several
    /// times in its scope.
    dependents: SmallVec<[ContractorId; 4]>,
}

struct ContractorSlot {
    ctc: Arc<dyn Contractor>,
    scope: Scope,
    flavor: Flavor,
    name: Option<String>,
}

impl ContractorSlot {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.ctc.name())
    }
}

// ── ContractorNetwork ──────────────────────────────────────────────

/// Owner of domains and contractors, driving them to a common fixed point.
///
/// # Example
///
/// ```
/// use tubenet_contractors::CtcIntersect;
/// use tubenet_domain::Interval;
/// use tubenet_network::ContractorNetwork;
///
/// let mut cn = ContractorNetwork::new();
/// let x = cn.create_interval(Interval::new(0.0, 10.0));
/// cn.add(CtcIntersect::new(Interval::new(3.0, 7.0)), &[x])?;
/// let report = cn.contract()?;
/// assert!(report.fixed_point());
/// assert_eq!(cn.domain(x).and_then(|d| d.as_interval()), Some(&Interval::new(3.0, 7.0)));
/// # Ok::<(), tubenet_network::NetworkError>(())
/// ```
pub struct ContractorNetwork {
    config: NetworkConfig,
    /// Kept apart from the slots so a [`ScopeView`] can borrow it mutably
    /// while the contractor arena is read.
    domains: Vec<Domain>,
    domain_slots: Vec<DomainSlot>,
    contractors: Vec<ContractorSlot>,
    agenda: Agenda,
    total_invocations: u64,
}

impl Default for ContractorNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractorNetwork {
    /// An empty network with the default configuration.
    pub fn new() -> Self {
        Self {
            config: NetworkConfig::default(),
            domains: Vec::new(),
            domain_slots: Vec::new(),
            contractors: Vec::new(),
            agenda: Agenda::default(),
            total_invocations: 0,
        }
    }

    /// An empty network with a validated configuration.
    pub fn with_config(config: NetworkConfig) -> Result<Self, NetworkError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Set the relative-change threshold, which must lie in `(0, 1]`.
    pub fn set_fixed_point_ratio(&mut self, r: f64) -> Result<(), NetworkError> {
        let next = NetworkConfig {
            fixed_point_ratio: r,
            ..self.config.clone()
        };
        next.validate()?;
        self.config = next;
        Ok(())
    }

    /// Log every contractor invocation at `info` level.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.config.verbose = verbose;
    }

    // ── Domains ────────────────────────────────────────────────────

    /// Take ownership of a domain and return its handle.
    pub fn create_dom(&mut self, value: impl Into<Domain>) -> DomainId {
        let id = DomainId(self.domains.len() as u32);
        let value = value.into();
        trace!(target: "tubenet::network", domain = %id, kind = %value.kind(), "domain created");
        self.domains.push(value);
        self.domain_slots.push(DomainSlot::default());
        id
    }

    /// Create an interval domain.
    pub fn create_interval(&mut self, x: Interval) -> DomainId {
        self.create_dom(x)
    }

    /// Create a box domain.
    pub fn create_interval_vector(&mut self, x: IntervalVector) -> DomainId {
        self.create_dom(x)
    }

    /// Create a tube domain.
    pub fn create_tube(&mut self, x: Tube) -> DomainId {
        self.create_dom(x)
    }

    /// Create a tube vector domain.
    pub fn create_tube_vector(&mut self, x: TubeVector) -> DomainId {
        self.create_dom(x)
    }

    /// Create a degenerate interval `[x, x]`.
    pub fn create_point(&mut self, x: f64) -> DomainId {
        self.create_dom(Interval::point(x))
    }

    /// Create a degenerate box from a list of numbers.
    ///
    /// Fails on a zero-length list.
    pub fn create_from_values(&mut self, values: &[f64]) -> Result<DomainId, NetworkError> {
        let d = Domain::from_values(values)?;
        Ok(self.create_dom(d))
    }

    /// Create a box linked to components `start..=end` of `parent`.
    ///
    /// The new domain starts as a copy of that slice. A [`CtcSubvector`]
    /// is registered between the two so that narrowing either one reaches
    /// the other.
    pub fn subvector(
        &mut self,
        parent: DomainId,
        start: usize,
        end: usize,
    ) -> Result<DomainId, NetworkError> {
        let d = self
            .domains
            .get(parent.index())
            .ok_or(NetworkError::UnknownDomain(parent))?;
        let actual = d.kind();
        let slice = d
            .as_interval_vector()
            .ok_or(DomainError::KindMismatch {
                expected: DomainKind::IntervalVector,
                actual,
            })?
            .subvector(start, end)?;
        let sub = self.create_dom(slice);
        self.add(CtcSubvector::new(start, end), &[parent, sub])?;
        Ok(sub)
    }

    /// Domain `id`, if it belongs to this network.
    pub fn domain(&self, id: DomainId) -> Option<&Domain> {
        self.domains.get(id.index())
    }

    /// Mutable domain `id`.
    ///
    /// The network cannot observe changes made through this reference;
    /// call [`trigger_all_contractors`](Self::trigger_all_contractors)
    /// afterwards so that they propagate.
    pub fn domain_mut(&mut self, id: DomainId) -> Option<&mut Domain> {
        self.domains.get_mut(id.index())
    }

    /// Attach a diagnostic name to a domain.
    pub fn set_domain_name(
        &mut self,
        id: DomainId,
        name: impl Into<String>,
    ) -> Result<(), NetworkError> {
        let slot = self
            .domain_slots
            .get_mut(id.index())
            .ok_or(NetworkError::UnknownDomain(id))?;
        slot.name = Some(name.into());
        Ok(())
    }

    /// Diagnostic name of a domain, if one was set.
    pub fn domain_name(&self, id: DomainId) -> Option<&str> {
        self.domain_slots.get(id.index())?.name.as_deref()
    }

    /// Contractors whose scope contains `id`.
    pub fn dependents(&self, id: DomainId) -> Option<&[ContractorId]> {
        self.domain_slots.get(id.index()).map(|s| &s.dependents[..])
    }

    // ── Contractors ────────────────────────────────────────────────

    /// Register `ctc` over `scope` and queue it.
    pub fn add<C: Contractor>(
        &mut self,
        ctc: C,
        scope: &[DomainId],
    ) -> Result<ContractorId, NetworkError> {
        self.add_shared(Arc::new(ctc), scope)
    }

    /// Register a shared contractor over `scope` and queue it.
    ///
    /// The same object may be registered any number of times; every
    /// registration gets its own ID and is scheduled independently.
    pub fn add_shared(
        &mut self,
        ctc: Arc<dyn Contractor>,
        scope: &[DomainId],
    ) -> Result<ContractorId, NetworkError> {
        let domains = scope
            .iter()
            .map(|&d| self.domains.get(d.index()).ok_or(NetworkError::UnknownDomain(d)))
            .collect::<Result<Vec<&Domain>, _>>()?;
        validate_scope(&*ctc, &domains)?;

        let id = ContractorId(self.contractors.len() as u32);
        let scope: Scope = scope.iter().copied().collect();
        for &d in &scope {
            let dependents = &mut self.domain_slots[d.index()].dependents;
            if !dependents.contains(&id) {
                dependents.push(id);
            }
        }
        let flavor = ctc.flavor();
        debug!(
            target: "tubenet::network",
            contractor = %id,
            name = ctc.name(),
            flavor = %flavor,
            scope_len = scope.len(),
            "contractor registered"
        );
        self.contractors.push(ContractorSlot {
            ctc,
            scope,
            flavor,
            name: None,
        });
        self.agenda.register();
        self.agenda.push(id);
        Ok(id)
    }

    /// Attach a diagnostic name to a contractor registration.
    pub fn set_contractor_name(
        &mut self,
        id: ContractorId,
        name: impl Into<String>,
    ) -> Result<(), NetworkError> {
        let slot = self
            .contractors
            .get_mut(id.index())
            .ok_or(NetworkError::UnknownContractor(id))?;
        slot.name = Some(name.into());
        Ok(())
    }

    /// Diagnostic name of a registration: the assigned name, or the
    /// contractor's own [`name`](Contractor::name).
    pub fn contractor_name(&self, id: ContractorId) -> Option<&str> {
        self.contractors
            .get(id.index())
            .map(ContractorSlot::display_name)
    }

    /// Flavor of a registration.
    pub fn flavor(&self, id: ContractorId) -> Option<Flavor> {
        self.contractors.get(id.index()).map(|s| s.flavor)
    }

    /// Ordered scope of a registration.
    pub fn scope(&self, id: ContractorId) -> Option<&[DomainId]> {
        self.contractors.get(id.index()).map(|s| &s.scope[..])
    }

    /// Whether a registration is waiting on the agenda.
    pub fn is_queued(&self, id: ContractorId) -> bool {
        self.agenda.contains(id)
    }

    // ── External input ─────────────────────────────────────────────

    /// Narrow the temporal domain `x` at time `t` by `value` and queue
    /// every contractor depending on `x`.
    ///
    /// `x` must be a tube with an interval `value`, or a tube vector with
    /// a box `value`. The domain is sampled at `t` first, so `t` becomes a
    /// slice boundary. Returns whether the value at `t` changed.
    pub fn add_data(
        &mut self,
        x: DomainId,
        t: f64,
        value: impl Into<Domain>,
    ) -> Result<bool, NetworkError> {
        let value = value.into();
        let d = self
            .domains
            .get_mut(x.index())
            .ok_or(NetworkError::UnknownDomain(x))?;
        let changed = d.narrow_at(t, &value)?;
        let mut queued = 0usize;
        for &dep in &self.domain_slots[x.index()].dependents {
            if self.agenda.push(dep) {
                queued += 1;
            }
        }
        debug!(
            target: "tubenet::network",
            domain = %x,
            t,
            value = %value,
            changed,
            queued,
            "data added"
        );
        Ok(changed)
    }

    /// Queue every registered contractor.
    ///
    /// Already-queued contractors keep their place.
    pub fn trigger_all_contractors(&mut self) {
        for i in 0..self.contractors.len() {
            self.agenda.push(ContractorId(i as u32));
        }
        debug!(
            target: "tubenet::network",
            queued = self.agenda.len(),
            "all contractors triggered"
        );
    }

    // ── Propagation ────────────────────────────────────────────────

    /// Propagate until the agenda is empty.
    ///
    /// # Errors
    ///
    /// [`NetworkError::ContractorFailed`] if a contractor returns an error
    /// and [`NetworkError::ContractViolation`] if one widens a domain
    /// (when [`NetworkConfig::check_monotonicity`] is on). Either way the
    /// round stops with the offending contractor queued again; domains
    /// keep whatever the contractor left in them.
    pub fn contract(&mut self) -> Result<ContractReport, NetworkError> {
        self.run(None)
    }

    /// Propagate until the agenda is empty or `budget` has elapsed.
    ///
    /// The deadline is checked before each invocation; an invocation in
    /// progress always runs to completion. A later [`contract`](Self::contract)
    /// resumes where this call stopped.
    pub fn contract_during(&mut self, budget: Duration) -> Result<ContractReport, NetworkError> {
        let deadline = Instant::now().checked_add(budget);
        self.run(Some(deadline))
    }

    /// `deadline` is `Some(None)` for a budget too large to represent.
    fn run(&mut self, deadline: Option<Option<Instant>>) -> Result<ContractReport, NetworkError> {
        let start = Instant::now();
        let mut report = ContractReport::default();
        // Size and emptiness of each scope member, plus its components
        // when the size is infinite.
        let mut before: SmallVec<[(f64, bool, Option<Vec<Interval>>); 4]> = SmallVec::new();
        let mut changed: SmallVec<[DomainId; 4]> = SmallVec::new();
        debug!(
            target: "tubenet::network",
            queued = self.agenda.len(),
            "propagation started"
        );

        while !self.agenda.is_empty() {
            if let Some(Some(deadline)) = deadline {
                if Instant::now() >= deadline {
                    warn!(
                        target: "tubenet::network",
                        remaining = self.agenda.len(),
                        invocations = report.invocations,
                        "propagation budget expired"
                    );
                    break;
                }
            }
            let Some(id) = self.agenda.pop() else {
                break;
            };
            let slot = &self.contractors[id.index()];

            before.clear();
            before.extend(slot.scope.iter().map(|d| {
                let dom = &self.domains[d.index()];
                let size = dom.size();
                let parts = size.is_infinite().then(|| dom.components());
                (size, dom.is_empty(), parts)
            }));
            if before.iter().all(|(_, empty, _)| *empty) {
                report.skipped += 1;
                trace!(target: "tubenet::agenda", contractor = %id, "skipped, scope empty");
                continue;
            }

            let result = slot
                .ctc
                .contract(&mut ScopeView::new(&mut self.domains, &slot.scope));
            report.invocations += 1;
            self.total_invocations += 1;
            if let Err(source) = result {
                self.agenda.push(id);
                warn!(
                    target: "tubenet::network",
                    contractor = %id,
                    name = slot.display_name(),
                    error = %source,
                    "contractor failed"
                );
                return Err(NetworkError::ContractorFailed {
                    id,
                    name: slot.display_name().to_string(),
                    source,
                });
            }

            changed.clear();
            for (&d, (size_before, was_empty, parts)) in slot.scope.iter().zip(before.iter()) {
                let (size_before, was_empty) = (*size_before, *was_empty);
                if changed.contains(&d) {
                    continue;
                }
                let dom = &self.domains[d.index()];
                let (size_after, is_empty) = (dom.size(), dom.is_empty());
                if self.config.check_monotonicity
                    && (size_after > size_before || (was_empty && !is_empty))
                {
                    self.agenda.push(id);
                    error!(
                        target: "tubenet::network",
                        contractor = %id,
                        name = slot.display_name(),
                        domain = %d,
                        before = size_before,
                        after = size_after,
                        "contractor widened a domain"
                    );
                    return Err(NetworkError::ContractViolation {
                        id,
                        name: slot.display_name().to_string(),
                        domain: d,
                        before: size_before,
                        after: size_after,
                    });
                }
                let significant = match parts {
                    Some(parts) if size_after.is_infinite() && !is_empty => self
                        .config
                        .is_significant_unbounded(parts, &dom.components()),
                    _ => self
                        .config
                        .is_significant(size_before, size_after, is_empty && !was_empty),
                };
                if significant {
                    changed.push(d);
                }
            }

            if self.config.verbose {
                info!(
                    target: "tubenet::agenda",
                    contractor = %id,
                    name = slot.display_name(),
                    changed = ?&changed[..],
                    queued = self.agenda.len(),
                    "contractor invoked"
                );
            } else {
                trace!(
                    target: "tubenet::agenda",
                    contractor = %id,
                    changed = changed.len(),
                    "contractor invoked"
                );
            }

            report.changed += changed.len();
            for d in &changed {
                for &dep in &self.domain_slots[d.index()].dependents {
                    if dep != id {
                        self.agenda.push(dep);
                    }
                }
            }
        }

        report.elapsed = start.elapsed();
        report.remaining = self.agenda.len();
        debug!(
            target: "tubenet::network",
            invocations = report.invocations,
            changed = report.changed,
            skipped = report.skipped,
            remaining = report.remaining,
            elapsed_us = report.elapsed.as_micros() as u64,
            "propagation finished"
        );
        Ok(report)
    }

    // ── Introspection ──────────────────────────────────────────────

    /// Number of contractor registrations.
    pub fn nb_ctc(&self) -> usize {
        self.contractors.len()
    }

    /// Number of domains.
    pub fn nb_dom(&self) -> usize {
        self.domains.len()
    }

    /// Number of contractors waiting on the agenda.
    pub fn nb_ctc_in_stack(&self) -> usize {
        self.agenda.len()
    }

    /// Whether any domain is empty, i.e. the constraints are infeasible.
    pub fn emptiness(&self) -> bool {
        self.domains.iter().any(Enclosure::is_empty)
    }

    /// Contractor invocations over the network's lifetime.
    pub fn total_invocations(&self) -> u64 {
        self.total_invocations
    }

    /// Snapshot of the scope graph.
    pub fn graph(&self, layout: GraphLayout) -> NetworkGraph {
        let domains = self.domains.iter().enumerate().map(|(i, d)| {
            let id = DomainId(i as u32);
            GraphNode {
                kind: NodeKind::Domain(id, d.kind()),
                label: self.domain_slots[i]
                    .name
                    .clone()
                    .unwrap_or_else(|| id.to_string()),
            }
        });
        let contractors = self.contractors.iter().enumerate().map(|(i, c)| GraphNode {
            kind: NodeKind::Contractor(ContractorId(i as u32), c.flavor),
            label: c.display_name().to_string(),
        });
        let edges = self
            .contractors
            .iter()
            .enumerate()
            .flat_map(|(i, c)| {
                c.scope.iter().enumerate().map(move |(position, &domain)| GraphEdge {
                    contractor: ContractorId(i as u32),
                    domain,
                    position,
                })
            })
            .collect();
        NetworkGraph {
            layout,
            nodes: domains.chain(contractors).collect(),
            edges,
        }
    }
}

impl fmt::Debug for ContractorNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractorNetwork")
            .field("nb_dom", &self.nb_dom())
            .field("nb_ctc", &self.nb_ctc())
            .field("nb_ctc_in_stack", &self.nb_ctc_in_stack())
            .field("total_invocations", &self.total_invocations)
            .field("config", &self.config)
            .finish()
    }
}
