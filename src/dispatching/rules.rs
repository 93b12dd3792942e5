//! Built-in ordering rules.
//!
//! # Score Convention
//! All rules return lower scores for requests that should be served first.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use super::{OrderingRule, RuleScore};
use crate::models::ServiceRequest;

/// First-Come-First-Served.
///
/// Orders strictly by arrival time. The chain's final id tie-break makes
/// simultaneous arrivals resolve in insertion order.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalOrder;

impl OrderingRule for ArrivalOrder {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, request: &ServiceRequest) -> RuleScore {
        request.arrival_minute() as f64
    }

    fn description(&self) -> &'static str {
        "First-Come-First-Served"
    }
}

/// Shortest Job First.
///
/// Orders by remaining service time, so a request preempted under a prior
/// Round-Robin phase is scored by what it still owes, not its original
/// estimate.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single server.
#[derive(Debug, Clone, Copy)]
pub struct ShortestJob;

impl OrderingRule for ShortestJob {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, request: &ServiceRequest) -> RuleScore {
        request.remaining_minutes() as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Class priority.
///
/// Orders by the rank derived from the room class: VIP before Mid-Range
/// before Economy.
#[derive(Debug, Clone, Copy)]
pub struct ClassRank;

impl OrderingRule for ClassRank {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, request: &ServiceRequest) -> RuleScore {
        f64::from(request.priority_rank())
    }

    fn description(&self) -> &'static str {
        "Room-Class Priority"
    }
}
