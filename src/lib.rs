//! Multi-tier service-request scheduling engine.
//!
//! Simulates service-request handling in a facility with tiered room
//! classes (VIP, Mid-Range, Economy). Requests are ordered and executed
//! under a selectable discipline — FCFS, SJF, Priority, or Round-Robin
//! with a configurable time quantum — on a single execution resource,
//! with per-request charge computation and aggregated service statistics.
//!
//! The engine advances a discrete simulated timeline one minute (or one
//! quantum) at a time, driven by an external caller such as a UI timer or
//! a test harness. It performs no internal threading and exposes a narrow
//! call surface plus read-only views; presentation, persistence, and
//! export layers sit on top of those.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ServiceRequest`, `RateTable`,
//!   `RoomCatalog`, `StaffRoster`
//! - **`dispatching`**: Ordering rules and the `Discipline` selector
//! - **`scheduler`**: `SchedulerEngine` state machine and `ServiceStats`
//! - **`validation`**: Whole-configuration checks before scheduling starts
//! - **`error`**: Typed operational failures
//!
//! # Example
//!
//! ```
//! use roomserve::dispatching::Discipline;
//! use roomserve::models::{RateTable, RequestSpec, RoomClass};
//! use roomserve::scheduler::SchedulerEngine;
//!
//! let mut engine = SchedulerEngine::new(RateTable::standard());
//! engine.submit(RequestSpec::new(RoomClass::Vip, "710", "Butler Service", 10)).unwrap();
//! engine.submit(RequestSpec::new(RoomClass::Economy, "101", "Housekeeping", 45)).unwrap();
//! engine.run_to_completion().unwrap();
//! assert_eq!(engine.stats().completed_count(), 2);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5: CPU Scheduling
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, SchedulerError};
