//! Service request model.
//!
//! A service request is one unit of work to be scheduled: a room asks for a
//! service, the engine queues it, runs it on the single execution resource,
//! and completes it. The request carries its own scheduling bookkeeping
//! (arrival, remaining time, status) so ordering rules can score it directly.
//!
//! # Time Representation
//! All times are in simulated minutes relative to the engine epoch (t=0).
//! The engine clock advances only while service time is being consumed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique request identifier, assigned by the engine at submission.
pub type RequestId = u64;

/// Room class of the requesting room. Fixes the priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomClass {
    /// Top tier, served first under the Priority discipline.
    Vip,
    /// Middle tier.
    MidRange,
    /// Base tier.
    Economy,
}

impl RoomClass {
    /// All classes, highest tier first.
    pub const ALL: [RoomClass; 3] = [RoomClass::Vip, RoomClass::MidRange, RoomClass::Economy];

    /// Priority rank derived from the class. Lower rank = served first.
    pub fn priority_rank(self) -> i32 {
        match self {
            RoomClass::Vip => 1,
            RoomClass::MidRange => 2,
            RoomClass::Economy => 3,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            RoomClass::Vip => "VIP",
            RoomClass::MidRange => "Mid-Range",
            RoomClass::Economy => "Economy",
        }
    }
}

impl fmt::Display for RoomClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle state of a service request.
///
/// Permitted transitions: Queued→Running→Completed, plus Running→Queued
/// under Round-Robin preemption. Nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Waiting for the execution resource.
    Queued,
    /// Holding the execution resource.
    Running,
    /// Finished; retained read-only in the completed log.
    Completed,
}

/// Caller-supplied fields for a new service request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Class of the requesting room.
    pub room_class: RoomClass,
    /// Room identifier (opaque to the engine).
    pub room_number: String,
    /// Requested service type; must have a configured rate.
    pub service_type: String,
    /// Estimated service duration in minutes (>= 0).
    pub estimated_minutes: i64,
    /// Free-form description.
    pub description: String,
}

impl RequestSpec {
    /// Creates a spec with an empty description.
    pub fn new(
        room_class: RoomClass,
        room_number: impl Into<String>,
        service_type: impl Into<String>,
        estimated_minutes: i64,
    ) -> Self {
        Self {
            room_class,
            room_number: room_number.into(),
            service_type: service_type.into(),
            estimated_minutes,
            description: String::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One schedulable unit of work.
///
/// Fields are read through accessors; the mutation surface
/// ([`begin_running`](Self::begin_running), [`consume`](Self::consume),
/// [`requeue`](Self::requeue), [`complete`](Self::complete)) is crate-private
/// and driven exclusively by the engine. Illegal transitions abort rather
/// than corrupt state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    id: RequestId,
    room_class: RoomClass,
    room_number: String,
    service_type: String,
    description: String,
    estimated_minutes: i64,
    remaining_minutes: i64,
    actual_minutes: Option<i64>,
    arrival_minute: i64,
    priority_rank: i32,
    status: RequestStatus,
    assigned_staff: Option<String>,
    charge_cents: Option<i64>,
}

impl ServiceRequest {
    /// Builds a queued request. The engine owns id assignment and the
    /// arrival stamp; the estimate must already be validated non-negative.
    pub(crate) fn new(id: RequestId, spec: RequestSpec, arrival_minute: i64) -> Self {
        assert!(
            spec.estimated_minutes >= 0,
            "estimated time must not be negative"
        );
        Self {
            id,
            room_class: spec.room_class,
            room_number: spec.room_number,
            service_type: spec.service_type,
            description: spec.description,
            estimated_minutes: spec.estimated_minutes,
            remaining_minutes: spec.estimated_minutes,
            actual_minutes: None,
            arrival_minute,
            priority_rank: spec.room_class.priority_rank(),
            status: RequestStatus::Queued,
            assigned_staff: None,
            charge_cents: None,
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Class of the requesting room.
    pub fn room_class(&self) -> RoomClass {
        self.room_class
    }

    /// Room identifier.
    pub fn room_number(&self) -> &str {
        &self.room_number
    }

    /// Requested service type.
    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Estimated duration in minutes, immutable after creation.
    pub fn estimated_minutes(&self) -> i64 {
        self.estimated_minutes
    }

    /// Minutes of service still owed. Never negative.
    pub fn remaining_minutes(&self) -> i64 {
        self.remaining_minutes
    }

    /// Minutes consumed so far across all slices.
    pub fn consumed_minutes(&self) -> i64 {
        self.estimated_minutes - self.remaining_minutes
    }

    /// Minutes actually consumed, recorded at completion.
    pub fn actual_minutes(&self) -> Option<i64> {
        self.actual_minutes
    }

    /// Engine clock at submission.
    pub fn arrival_minute(&self) -> i64 {
        self.arrival_minute
    }

    /// Priority rank derived from the room class. Lower = served first.
    pub fn priority_rank(&self) -> i32 {
        self.priority_rank
    }

    /// Current lifecycle state.
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Staff member handling the request, set when it first runs.
    pub fn assigned_staff(&self) -> Option<&str> {
        self.assigned_staff.as_deref()
    }

    /// Authoritative charge in cents, computed exactly once at completion.
    pub fn charge_cents(&self) -> Option<i64> {
        self.charge_cents
    }

    /// Queued → Running. Assigns staff on the first run only; a request
    /// resumed after preemption keeps its original staff member.
    pub(crate) fn begin_running(&mut self, staff: Option<String>) {
        assert_eq!(
            self.status,
            RequestStatus::Queued,
            "request {} cannot start running from {:?}",
            self.id,
            self.status
        );
        self.status = RequestStatus::Running;
        if self.assigned_staff.is_none() {
            self.assigned_staff = staff;
        }
    }

    /// Consumes service time while Running. Remaining time never goes
    /// negative.
    pub(crate) fn consume(&mut self, minutes: i64) {
        assert_eq!(
            self.status,
            RequestStatus::Running,
            "request {} cannot consume time while {:?}",
            self.id,
            self.status
        );
        assert!(
            (0..=self.remaining_minutes).contains(&minutes),
            "request {} would drop below zero remaining",
            self.id
        );
        self.remaining_minutes -= minutes;
    }

    /// Running → Queued (Round-Robin preemption). Remaining time and staff
    /// assignment are preserved.
    pub(crate) fn requeue(&mut self) {
        assert_eq!(
            self.status,
            RequestStatus::Running,
            "request {} cannot be requeued from {:?}",
            self.id,
            self.status
        );
        self.status = RequestStatus::Queued;
    }

    /// Running → Completed. Legal exactly when remaining time is zero;
    /// records actual time and the charge in one step.
    pub(crate) fn complete(&mut self, charge_cents: i64) {
        assert_eq!(
            self.status,
            RequestStatus::Running,
            "request {} cannot complete from {:?}",
            self.id,
            self.status
        );
        assert_eq!(
            self.remaining_minutes, 0,
            "request {} completed with time remaining",
            self.id
        );
        assert!(
            self.charge_cents.is_none(),
            "request {} charged twice",
            self.id
        );
        self.status = RequestStatus::Completed;
        self.actual_minutes = Some(self.estimated_minutes);
        self.charge_cents = Some(charge_cents);
    }
}
