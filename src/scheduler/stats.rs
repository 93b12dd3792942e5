//! Service statistics aggregation.
//!
//! Derives quality metrics from completed requests. Purely derived — the
//! aggregator never mutates a request; the engine feeds it one record per
//! completion.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting time | turnaround − actual service time |
//! | Turnaround time | completion − arrival |
//! | Throughput | completions per simulated minute |
//! | Collected charge | sum of authoritative charges |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::engine::CompletedService;
use crate::models::RoomClass;

/// Running accumulators for one class (or for the overall totals).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassStats {
    /// Requests completed.
    pub completed: usize,
    /// Sum of waiting times (minutes).
    pub total_waiting_minutes: i64,
    /// Sum of turnaround times (minutes).
    pub total_turnaround_minutes: i64,
    /// Sum of actual service times (minutes).
    pub total_actual_minutes: i64,
    /// Sum of collected charges (cents).
    pub total_charge_cents: i64,
}

impl ClassStats {
    fn record(&mut self, entry: &CompletedService) {
        self.completed += 1;
        self.total_waiting_minutes += entry.waiting_minutes;
        self.total_turnaround_minutes += entry.turnaround_minutes;
        self.total_actual_minutes += entry.request.actual_minutes().unwrap_or(0);
        self.total_charge_cents += entry.request.charge_cents().unwrap_or(0);
    }

    /// Mean waiting time, 0 when nothing has completed.
    pub fn avg_waiting_minutes(&self) -> f64 {
        self.mean(self.total_waiting_minutes)
    }

    /// Mean turnaround time, 0 when nothing has completed.
    pub fn avg_turnaround_minutes(&self) -> f64 {
        self.mean(self.total_turnaround_minutes)
    }

    fn mean(&self, total: i64) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            total as f64 / self.completed as f64
        }
    }
}

/// Aggregated statistics over all completions, overall and per class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceStats {
    overall: ClassStats,
    per_class: HashMap<RoomClass, ClassStats>,
}

impl ServiceStats {
    pub(crate) fn record(&mut self, entry: &CompletedService) {
        self.overall.record(entry);
        self.per_class
            .entry(entry.request.room_class())
            .or_default()
            .record(entry);
    }

    /// Totals across all classes.
    pub fn overall(&self) -> &ClassStats {
        &self.overall
    }

    /// Totals for one class; `None` before its first completion.
    pub fn class(&self, class: RoomClass) -> Option<&ClassStats> {
        self.per_class.get(&class)
    }

    /// Number of requests completed.
    pub fn completed_count(&self) -> usize {
        self.overall.completed
    }

    /// Total collected charge in cents.
    pub fn total_charge_cents(&self) -> i64 {
        self.overall.total_charge_cents
    }

    /// Completions per simulated minute; 0 before any time has elapsed.
    pub fn throughput_per_minute(&self, elapsed_minutes: i64) -> f64 {
        if elapsed_minutes <= 0 {
            0.0
        } else {
            self.overall.completed as f64 / elapsed_minutes as f64
        }
    }

    pub(crate) fn per_class_clone(&self) -> HashMap<RoomClass, ClassStats> {
        self.per_class.clone()
    }
}

/// Point-in-time view combining completion metrics with live queue state.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Requests completed so far.
    pub completed: usize,
    /// Requests still queued (excludes the running one).
    pub queued: usize,
    /// Whether a request currently holds the execution resource.
    pub running: bool,
    /// Mean waiting time across all completions (minutes).
    pub avg_waiting_minutes: f64,
    /// Mean turnaround time across all completions (minutes).
    pub avg_turnaround_minutes: f64,
    /// Completions per simulated minute.
    pub throughput_per_minute: f64,
    /// Total collected charge (cents).
    pub total_charge_cents: i64,
    /// Per-class accumulators.
    pub per_class: HashMap<RoomClass, ClassStats>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RequestSpec, ServiceRequest};

    fn completed_entry(
        id: u64,
        class: RoomClass,
        minutes: i64,
        arrival: i64,
        completed_at: i64,
    ) -> CompletedService {
        let mut request = ServiceRequest::new(
            id,
            RequestSpec::new(class, "101", "Housekeeping", minutes),
            arrival,
        );
        request.begin_running(None);
        request.consume(minutes);
        request.complete(1_000 + 20 * minutes);
        CompletedService {
            request,
            completed_at,
            waiting_minutes: completed_at - arrival - minutes,
            turnaround_minutes: completed_at - arrival,
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = ServiceStats::default();
        assert_eq!(stats.completed_count(), 0);
        assert_eq!(stats.overall().avg_waiting_minutes(), 0.0);
        assert_eq!(stats.throughput_per_minute(0), 0.0);
        assert!(stats.class(RoomClass::Vip).is_none());
    }

    #[test]
    fn test_record_accumulates_overall_and_per_class() {
        let mut stats = ServiceStats::default();
        // Economy: arrival 0, runs 3, completes at 3 → waiting 0, turnaround 3.
        stats.record(&completed_entry(1, RoomClass::Economy, 3, 0, 3));
        // VIP: arrival 0, runs 5, completes at 8 → waiting 3, turnaround 8.
        stats.record(&completed_entry(2, RoomClass::Vip, 5, 0, 8));

        assert_eq!(stats.completed_count(), 2);
        assert_eq!(stats.overall().total_waiting_minutes, 3);
        assert_eq!(stats.overall().total_turnaround_minutes, 11);
        assert_eq!(stats.overall().avg_waiting_minutes(), 1.5);
        assert_eq!(stats.overall().avg_turnaround_minutes(), 5.5);

        let vip = stats.class(RoomClass::Vip).unwrap();
        assert_eq!(vip.completed, 1);
        assert_eq!(vip.total_waiting_minutes, 3);
        assert_eq!(vip.total_actual_minutes, 5);
    }

    #[test]
    fn test_charge_totals() {
        let mut stats = ServiceStats::default();
        stats.record(&completed_entry(1, RoomClass::Economy, 3, 0, 3));
        stats.record(&completed_entry(2, RoomClass::Economy, 2, 0, 5));
        // 1000 + 20*3 and 1000 + 20*2.
        assert_eq!(stats.total_charge_cents(), 1_060 + 1_040);
    }

    #[test]
    fn test_throughput() {
        let mut stats = ServiceStats::default();
        stats.record(&completed_entry(1, RoomClass::Economy, 5, 0, 5));
        stats.record(&completed_entry(2, RoomClass::Economy, 5, 0, 10));
        assert_eq!(stats.throughput_per_minute(10), 0.2);
    }
}
