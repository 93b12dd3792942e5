//! Scheduling domain models.
//!
//! Core data types for representing service requests and their
//! configuration. The engine owns and mutates requests; everything else
//! here is configuration the caller assembles up front.
//!
//! # Domain Mapping
//!
//! | Type | Role |
//! |------|------|
//! | `ServiceRequest` | One unit of work with scheduling bookkeeping |
//! | `RateTable` | Tariffs: base + per-minute rates per class/service |
//! | `RoomCatalog` | Room-number → class lookup |
//! | `StaffRoster` | Per-class staff pools for assignment |

mod rates;
mod request;
mod room;
mod staff;

pub use rates::RateTable;
pub use request::{RequestId, RequestSpec, RequestStatus, RoomClass, ServiceRequest};
pub use room::{class_amenities, Room, RoomCatalog};
pub use staff::StaffRoster;
