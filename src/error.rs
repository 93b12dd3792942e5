//! Error types for engine operations.
//!
//! Two families, per the engine's contract:
//!
//! - **Configuration errors** (`InvalidRate`, `InvalidQuantum`,
//!   `InvalidDuration`, `UnknownRoom`) are raised synchronously at the call
//!   that introduced the bad configuration and are never silently defaulted.
//! - **Lookup errors** (`NotFound`, `DuplicateId`) are raised on operations
//!   referencing a nonexistent or colliding request id.
//!
//! Internal-consistency violations (negative remaining time, two running
//! requests) are not represented here: they are fatal and abort via
//! assertion rather than corrupting engine state.

use thiserror::Error;

use crate::models::{RequestId, RoomClass};

/// Errors produced by scheduler operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// No rate is configured for this class/service combination.
    #[error("no rate configured for {class} / {service}")]
    InvalidRate {
        /// Room class the lookup was made for.
        class: RoomClass,
        /// Service type the lookup was made for.
        service: String,
    },

    /// Round-Robin time quantum must be positive.
    #[error("time quantum must be positive, got {quantum}")]
    InvalidQuantum {
        /// The rejected quantum value (minutes).
        quantum: i64,
    },

    /// Estimated service time must not be negative.
    #[error("estimated time must not be negative, got {minutes}")]
    InvalidDuration {
        /// The rejected estimate (minutes).
        minutes: i64,
    },

    /// Room number is not present in the catalog.
    #[error("unknown room number: {0}")]
    UnknownRoom(String),

    /// No active request carries this id.
    #[error("request {0} not found")]
    NotFound(RequestId),

    /// An active request already carries this id.
    #[error("request {0} already exists")]
    DuplicateId(RequestId),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SchedulerError>;
