//! Discipline configuration and sequential rule evaluation.
//!
//! A [`Discipline`] is the caller-facing selector for the four scheduling
//! policies. Non-preemptive disciplines compile down to a [`RuleChain`] —
//! rules evaluated in sequence, later rules breaking earlier ties, with a
//! final deterministic tie-break on request id (insertion order).
//! Round-Robin is rotation-based and handled by the engine's queue; its
//! chain is only used to seed the rotation in arrival order.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{rules, OrderingRule};
use crate::error::{Result, SchedulerError};
use crate::models::{RequestId, ServiceRequest};

/// The active scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discipline {
    /// First-Come-First-Served: arrival order, non-preemptive.
    Fcfs,
    /// Shortest Job First: remaining time ascending, non-preemptive.
    Sjf,
    /// Class priority: VIP before Mid-Range before Economy, non-preemptive.
    Priority,
    /// Round-Robin rotation with a fixed positive time quantum. Preemptive.
    RoundRobin {
        /// Maximum continuous slice per turn, in minutes.
        quantum_minutes: i64,
    },
}

impl Default for Discipline {
    fn default() -> Self {
        Discipline::Priority
    }
}

impl Discipline {
    /// Creates a Round-Robin discipline, rejecting non-positive quanta.
    pub fn round_robin(quantum_minutes: i64) -> Result<Self> {
        let discipline = Discipline::RoundRobin { quantum_minutes };
        discipline.validate()?;
        Ok(discipline)
    }

    /// Validates the configuration. Only Round-Robin carries a parameter.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Discipline::RoundRobin { quantum_minutes } if quantum_minutes <= 0 => {
                Err(SchedulerError::InvalidQuantum {
                    quantum: quantum_minutes,
                })
            }
            _ => Ok(()),
        }
    }

    /// Whether a running request can be forced back to the queue.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Discipline::RoundRobin { .. })
    }

    /// The slice limit imposed on a freshly started run, if any.
    pub fn quantum(&self) -> Option<i64> {
        match *self {
            Discipline::RoundRobin { quantum_minutes } => Some(quantum_minutes),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Discipline::Fcfs => "FCFS",
            Discipline::Sjf => "SJF",
            Discipline::Priority => "Priority",
            Discipline::RoundRobin { .. } => "Round-Robin",
        }
    }

    /// The rule chain implementing this discipline's ordering.
    pub fn rule_chain(&self) -> RuleChain {
        match self {
            Discipline::Fcfs => RuleChain::new().with_rule(rules::ArrivalOrder),
            Discipline::Sjf => RuleChain::new()
                .with_rule(rules::ShortestJob)
                .with_rule(rules::ArrivalOrder),
            Discipline::Priority => RuleChain::new()
                .with_rule(rules::ClassRank)
                .with_rule(rules::ArrivalOrder),
            // Rotation order; the chain only seeds it.
            Discipline::RoundRobin { .. } => RuleChain::new().with_rule(rules::ArrivalOrder),
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sequential multi-rule comparison over queued requests.
///
/// Rules are consulted in order; the next rule is used only on ties. When
/// every rule ties, request id ascending decides, so the ordering is total
/// and deterministic.
pub struct RuleChain {
    rules: Vec<Box<dyn OrderingRule>>,
    epsilon: f64,
}

impl RuleChain {
    /// Creates an empty chain (orders by id only).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// Appends a rule. Earlier rules dominate.
    pub fn with_rule<R: OrderingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Compares two requests under the chain.
    pub fn compare(&self, a: &ServiceRequest, b: &ServiceRequest) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a);
            let score_b = rule.evaluate(b);
            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }
        a.id().cmp(&b.id())
    }

    /// Id of the request that should be served next, or `None` when the
    /// queue is empty.
    pub fn select<'a, I>(&self, requests: I) -> Option<RequestId>
    where
        I: IntoIterator<Item = &'a ServiceRequest>,
    {
        requests
            .into_iter()
            .min_by(|a, b| self.compare(a, b))
            .map(ServiceRequest::id)
    }

    /// Sorts a queue view in service order.
    pub fn sort(&self, requests: &mut [&ServiceRequest]) {
        requests.sort_by(|a, b| self.compare(a, b));
    }
}

impl Default for RuleChain {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleChain")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RequestSpec, RoomClass};

    fn make_request(
        id: u64,
        class: RoomClass,
        minutes: i64,
        arrival: i64,
    ) -> ServiceRequest {
        ServiceRequest::new(
            id,
            RequestSpec::new(class, "101", "Housekeeping", minutes),
            arrival,
        )
    }

    #[test]
    fn test_round_robin_rejects_non_positive_quantum() {
        assert_eq!(
            Discipline::round_robin(0).unwrap_err(),
            SchedulerError::InvalidQuantum { quantum: 0 }
        );
        assert_eq!(
            Discipline::round_robin(-5).unwrap_err(),
            SchedulerError::InvalidQuantum { quantum: -5 }
        );
        assert!(Discipline::round_robin(15).is_ok());
    }

    #[test]
    fn test_only_round_robin_preempts() {
        assert!(!Discipline::Fcfs.is_preemptive());
        assert!(!Discipline::Sjf.is_preemptive());
        assert!(!Discipline::Priority.is_preemptive());
        assert!(Discipline::round_robin(2).unwrap().is_preemptive());
        assert_eq!(Discipline::round_robin(2).unwrap().quantum(), Some(2));
        assert_eq!(Discipline::Fcfs.quantum(), None);
    }

    #[test]
    fn test_fcfs_orders_by_arrival_then_id() {
        let chain = Discipline::Fcfs.rule_chain();
        let a = make_request(1, RoomClass::Economy, 10, 3);
        let b = make_request(2, RoomClass::Economy, 10, 3);
        let c = make_request(3, RoomClass::Economy, 10, 0);
        assert_eq!(chain.select([&a, &b, &c]), Some(3));
        // Simultaneous arrivals resolve in insertion order.
        assert_eq!(chain.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_sjf_orders_by_remaining_then_arrival() {
        let chain = Discipline::Sjf.rule_chain();
        let long_early = make_request(1, RoomClass::Economy, 45, 0);
        let short_late = make_request(2, RoomClass::Economy, 5, 3);
        assert_eq!(chain.select([&long_early, &short_late]), Some(2));

        let tied_a = make_request(3, RoomClass::Economy, 5, 0);
        let tied_b = make_request(4, RoomClass::Economy, 5, 1);
        assert_eq!(chain.compare(&tied_a, &tied_b), Ordering::Less);
    }

    #[test]
    fn test_priority_orders_by_class_then_arrival() {
        let chain = Discipline::Priority.rule_chain();
        let economy_early = make_request(1, RoomClass::Economy, 10, 0);
        let vip_late = make_request(2, RoomClass::Vip, 10, 9);
        assert_eq!(chain.select([&economy_early, &vip_late]), Some(2));

        let vip_a = make_request(3, RoomClass::Vip, 10, 0);
        let vip_b = make_request(4, RoomClass::Vip, 10, 2);
        assert_eq!(chain.compare(&vip_a, &vip_b), Ordering::Less);
    }

    #[test]
    fn test_empty_queue_selects_none() {
        let chain = Discipline::Priority.rule_chain();
        assert_eq!(chain.select(std::iter::empty::<&ServiceRequest>()), None);
    }

    #[test]
    fn test_sort_matches_select() {
        let chain = Discipline::Sjf.rule_chain();
        let a = make_request(1, RoomClass::Economy, 45, 0);
        let b = make_request(2, RoomClass::Economy, 5, 0);
        let c = make_request(3, RoomClass::Economy, 20, 0);
        let mut view = vec![&a, &b, &c];
        chain.sort(&mut view);
        assert_eq!(
            view.iter().map(|r| r.id()).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
        assert_eq!(chain.select([&a, &b, &c]), Some(2));
    }

    #[test]
    fn test_default_is_priority() {
        assert_eq!(Discipline::default(), Discipline::Priority);
    }
}
