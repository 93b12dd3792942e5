//! Discrete-time scheduling engine.
//!
//! The engine owns the active request set, the single execution resource
//! (the "running slot"), and the simulated clock. It is a deterministic
//! state machine advanced exclusively by caller-invoked [`step`] /
//! [`step_slice`] / [`run_to_completion`] calls — no internal threading,
//! locking, or background execution. Hosts embedding it in a concurrent
//! environment must serialize calls.
//!
//! # Per-step algorithm
//!
//! 1. If nothing is running, ask the active discipline to select a queued
//!    request (rule chain for the non-preemptive disciplines, rotation head
//!    for Round-Robin). Staff is assigned on a request's first run.
//! 2. Advance the running request by one simulated minute.
//! 3. At zero remaining time: compute the charge from actual minutes, move
//!    the request to the completed log, update statistics, free the slot.
//! 4. Under Round-Robin, a slice that exhausts its quantum without
//!    completing requeues at the rotation tail and frees the slot.
//!
//! The clock advances only when a minute of work is consumed; an idle step
//! leaves it unchanged. A zero-estimate request completes on its first
//! scheduling slice without consuming time.
//!
//! [`step`]: SchedulerEngine::step
//! [`step_slice`]: SchedulerEngine::step_slice
//! [`run_to_completion`]: SchedulerEngine::run_to_completion

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::stats::{ServiceStats, StatsSnapshot};
use crate::dispatching::Discipline;
use crate::error::{Result, SchedulerError};
use crate::models::{RateTable, RequestId, RequestSpec, ServiceRequest, StaffRoster};

/// What a single [`SchedulerEngine::step`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing queued and nothing running; the clock did not advance.
    Idle,
    /// The running request consumed one minute and keeps the slot.
    Worked {
        /// Request that worked.
        id: RequestId,
        /// Minutes still owed after this step.
        remaining_minutes: i64,
    },
    /// The running request exhausted its quantum and was requeued at the
    /// rotation tail.
    Preempted {
        /// Request that was preempted.
        id: RequestId,
    },
    /// The running request finished and moved to the completed log.
    Completed {
        /// Request that completed.
        id: RequestId,
    },
}

/// A completed-log entry: the finished request plus its derived timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedService {
    /// The finished request, read-only from here on.
    pub request: ServiceRequest,
    /// Engine clock at completion.
    pub completed_at: i64,
    /// `completed_at − arrival − actual`.
    pub waiting_minutes: i64,
    /// `completed_at − arrival`.
    pub turnaround_minutes: i64,
}

/// Snapshot of the running slot for progress display.
#[derive(Debug, Clone, Copy)]
pub struct RunningSnapshot<'a> {
    /// The request holding the execution resource.
    pub request: &'a ServiceRequest,
    /// Minutes consumed in the current slice.
    pub slice_used: i64,
    /// Slice limit captured when the slice started; `None` = runs to
    /// completion.
    pub slice_limit: Option<i64>,
}

struct RunningSlot {
    id: RequestId,
    slice_limit: Option<i64>,
    slice_used: i64,
}

/// The scheduling engine.
///
/// # Example
///
/// ```
/// use roomserve::dispatching::Discipline;
/// use roomserve::models::{RateTable, RequestSpec, RoomClass};
/// use roomserve::scheduler::SchedulerEngine;
///
/// let mut engine = SchedulerEngine::new(RateTable::standard())
///     .with_discipline(Discipline::Fcfs)
///     .unwrap();
/// let id = engine
///     .submit(RequestSpec::new(RoomClass::Vip, "710", "Butler Service", 10))
///     .unwrap();
/// engine.run_to_completion().unwrap();
/// assert_eq!(engine.completed_log()[0].request.id(), id);
/// ```
pub struct SchedulerEngine {
    requests: HashMap<RequestId, ServiceRequest>,
    /// Queued ids in submission order; doubles as the Round-Robin rotation.
    rotation: VecDeque<RequestId>,
    running: Option<RunningSlot>,
    discipline: Discipline,
    rates: RateTable,
    roster: StaffRoster,
    clock: i64,
    next_id: RequestId,
    completed: Vec<CompletedService>,
    stats: ServiceStats,
}

impl SchedulerEngine {
    /// Creates an engine with the default (Priority) discipline and an
    /// empty staff roster.
    pub fn new(rates: RateTable) -> Self {
        Self {
            requests: HashMap::new(),
            rotation: VecDeque::new(),
            running: None,
            discipline: Discipline::default(),
            rates,
            roster: StaffRoster::new(),
            clock: 0,
            next_id: 1,
            completed: Vec::new(),
            stats: ServiceStats::default(),
        }
    }

    /// Sets the initial discipline, validating its configuration.
    pub fn with_discipline(mut self, discipline: Discipline) -> Result<Self> {
        self.set_discipline(discipline)?;
        Ok(self)
    }

    /// Sets the staff roster used for assignment.
    pub fn with_roster(mut self, roster: StaffRoster) -> Self {
        self.roster = roster;
        self
    }

    /// Submits a new request. The engine assigns the id and stamps the
    /// arrival with the current clock. Fails when the estimate is negative
    /// or the class/service pair has no configured rate.
    pub fn submit(&mut self, spec: RequestSpec) -> Result<RequestId> {
        let id = self.next_id;
        self.enqueue(id, spec)?;
        self.next_id = id + 1;
        Ok(id)
    }

    /// Admits a request under a caller-chosen id (e.g. rehydrating from the
    /// presentation layer). Fails with [`SchedulerError::DuplicateId`] when
    /// the id is already active.
    pub fn admit(&mut self, id: RequestId, spec: RequestSpec) -> Result<RequestId> {
        self.enqueue(id, spec)?;
        self.next_id = self.next_id.max(id + 1);
        Ok(id)
    }

    fn enqueue(&mut self, id: RequestId, spec: RequestSpec) -> Result<()> {
        if spec.estimated_minutes < 0 {
            return Err(SchedulerError::InvalidDuration {
                minutes: spec.estimated_minutes,
            });
        }
        if !self.rates.has_rate(spec.room_class, &spec.service_type) {
            return Err(SchedulerError::InvalidRate {
                class: spec.room_class,
                service: spec.service_type,
            });
        }
        if self.requests.contains_key(&id) {
            return Err(SchedulerError::DuplicateId(id));
        }
        debug!(
            id,
            class = spec.room_class.label(),
            service = %spec.service_type,
            "request queued"
        );
        let request = ServiceRequest::new(id, spec, self.clock);
        self.requests.insert(id, request);
        self.rotation.push_back(id);
        Ok(())
    }

    /// Cancels a request and returns it. Cancelling the running request
    /// frees the execution resource; partial progress is discarded, not
    /// completed or charged.
    pub fn remove(&mut self, id: RequestId) -> Result<ServiceRequest> {
        let request = self
            .requests
            .remove(&id)
            .ok_or(SchedulerError::NotFound(id))?;
        self.rotation.retain(|&queued| queued != id);
        if self.running.as_ref().is_some_and(|slot| slot.id == id) {
            self.running = None;
            debug!(id, "running request cancelled, slot freed");
        } else {
            debug!(id, "queued request cancelled");
        }
        Ok(request)
    }

    /// Switches the active discipline. Takes effect at the next selection;
    /// a running request finishes its current slice under the limit
    /// captured when the slice started. Activating Round-Robin reseeds the
    /// rotation in arrival order.
    pub fn set_discipline(&mut self, discipline: Discipline) -> Result<()> {
        discipline.validate()?;
        if discipline.is_preemptive() && !self.discipline.is_preemptive() {
            let mut ids: Vec<RequestId> = self.rotation.iter().copied().collect();
            ids.sort_by_key(|id| (self.requests[id].arrival_minute(), *id));
            self.rotation = ids.into();
        }
        debug!(from = self.discipline.name(), to = discipline.name(), "discipline changed");
        self.discipline = discipline;
        Ok(())
    }

    /// Advances the simulation by at most one minute.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.running.is_none() {
            self.start_next();
        }
        let (id, slice_limit) = match &self.running {
            Some(slot) => (slot.id, slot.slice_limit),
            None => {
                trace!("no queued requests, engine idle");
                return Ok(StepOutcome::Idle);
            }
        };

        if self.remaining_of(id) == 0 {
            // Zero-estimate request: first slice, no time consumed.
            self.finish(id)?;
            return Ok(StepOutcome::Completed { id });
        }

        match self.requests.get_mut(&id) {
            Some(request) => request.consume(1),
            None => unreachable!("running request {id} missing from the active set"),
        }
        self.clock += 1;
        let slice_used = match self.running.as_mut() {
            Some(slot) => {
                slot.slice_used += 1;
                slot.slice_used
            }
            None => unreachable!("running slot vanished mid-step"),
        };

        let remaining = self.remaining_of(id);
        if remaining == 0 {
            self.finish(id)?;
            return Ok(StepOutcome::Completed { id });
        }
        if slice_limit.is_some_and(|limit| slice_used >= limit) {
            self.preempt(id);
            return Ok(StepOutcome::Preempted { id });
        }
        Ok(StepOutcome::Worked {
            id,
            remaining_minutes: remaining,
        })
    }

    /// Advances through one full slice: until the running request completes
    /// or is preempted, or the engine reports idle. Under the non-preemptive
    /// disciplines this runs the selected request to completion.
    pub fn step_slice(&mut self) -> Result<StepOutcome> {
        loop {
            match self.step()? {
                StepOutcome::Worked { .. } => continue,
                outcome => return Ok(outcome),
            }
        }
    }

    /// Steps until the queue and the running slot are both empty.
    pub fn run_to_completion(&mut self) -> Result<()> {
        while !self.is_idle() {
            self.step()?;
        }
        Ok(())
    }

    /// Discards all queued requests and the running slot without completing
    /// them. The completed log and statistics are untouched.
    pub fn clear(&mut self) {
        let dropped = self.requests.len();
        self.requests.clear();
        self.rotation.clear();
        self.running = None;
        debug!(dropped, "active requests cleared");
    }

    /// Current simulated time in minutes.
    pub fn clock(&self) -> i64 {
        self.clock
    }

    /// The active discipline.
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// The tariff table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Number of queued requests (excludes the running one).
    pub fn queued_count(&self) -> usize {
        self.rotation.len()
    }

    /// Whether the queue and the running slot are both empty.
    pub fn is_idle(&self) -> bool {
        self.running.is_none() && self.rotation.is_empty()
    }

    /// Queued requests in the order the active discipline would serve them.
    pub fn queued_view(&self) -> Vec<&ServiceRequest> {
        let mut view: Vec<&ServiceRequest> =
            self.rotation.iter().map(|id| &self.requests[id]).collect();
        if !self.discipline.is_preemptive() {
            self.discipline.rule_chain().sort(&mut view);
        }
        view
    }

    /// Snapshot of the running slot, if occupied.
    pub fn running_view(&self) -> Option<RunningSnapshot<'_>> {
        self.running.as_ref().map(|slot| RunningSnapshot {
            request: &self.requests[&slot.id],
            slice_used: slot.slice_used,
            slice_limit: slot.slice_limit,
        })
    }

    /// The completed log, append-only, newest last.
    pub fn completed_log(&self) -> &[CompletedService] {
        &self.completed
    }

    /// Aggregated completion statistics.
    pub fn stats(&self) -> &ServiceStats {
        &self.stats
    }

    /// Point-in-time statistics combining completions with live queue state.
    pub fn stats_snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            completed: self.stats.completed_count(),
            queued: self.rotation.len(),
            running: self.running.is_some(),
            avg_waiting_minutes: self.stats.overall().avg_waiting_minutes(),
            avg_turnaround_minutes: self.stats.overall().avg_turnaround_minutes(),
            throughput_per_minute: self.stats.throughput_per_minute(self.clock),
            total_charge_cents: self.stats.total_charge_cents(),
            per_class: self.stats.per_class_clone(),
        }
    }

    fn start_next(&mut self) {
        debug_assert!(self.running.is_none(), "running slot already occupied");
        let selected = match self.discipline {
            Discipline::RoundRobin { .. } => self.rotation.pop_front(),
            _ => {
                let chain = self.discipline.rule_chain();
                let pick = chain.select(self.rotation.iter().map(|id| &self.requests[id]));
                if let Some(id) = pick {
                    self.rotation.retain(|&queued| queued != id);
                }
                pick
            }
        };
        let Some(id) = selected else { return };

        let staff = if self.requests[&id].assigned_staff().is_none() {
            self.roster.pick(self.requests[&id].room_class())
        } else {
            None
        };
        match self.requests.get_mut(&id) {
            Some(request) => request.begin_running(staff),
            None => unreachable!("queued request {id} missing from the active set"),
        }
        let slice_limit = self.discipline.quantum();
        debug!(
            id,
            discipline = self.discipline.name(),
            slice_limit,
            "request started"
        );
        self.running = Some(RunningSlot {
            id,
            slice_limit,
            slice_used: 0,
        });
    }

    fn preempt(&mut self, id: RequestId) {
        match self.requests.get_mut(&id) {
            Some(request) => request.requeue(),
            None => unreachable!("running request {id} missing from the active set"),
        }
        self.rotation.push_back(id);
        self.running = None;
        debug!(id, "quantum exhausted, requeued at rotation tail");
    }

    fn remaining_of(&self, id: RequestId) -> i64 {
        match self.requests.get(&id) {
            Some(request) => request.remaining_minutes(),
            None => unreachable!("active request {id} missing from the active set"),
        }
    }

    fn finish(&mut self, id: RequestId) -> Result<()> {
        let (class, service, actual) = match self.requests.get(&id) {
            Some(request) => (
                request.room_class(),
                request.service_type().to_string(),
                request.consumed_minutes(),
            ),
            None => unreachable!("running request {id} missing from the active set"),
        };
        // Charge first: a missing rate aborts the completion without
        // touching request state.
        let charge = self.rates.compute_charge(class, &service, actual)?;

        let mut request = match self.requests.remove(&id) {
            Some(request) => request,
            None => unreachable!("running request {id} missing from the active set"),
        };
        request.complete(charge);
        self.running = None;

        let waiting = self.clock - request.arrival_minute() - actual;
        let turnaround = self.clock - request.arrival_minute();
        debug!(id, charge_cents = charge, waiting, turnaround, "request completed");
        let entry = CompletedService {
            request,
            completed_at: self.clock,
            waiting_minutes: waiting,
            turnaround_minutes: turnaround,
        };
        self.stats.record(&entry);
        self.completed.push(entry);
        Ok(())
    }
}
