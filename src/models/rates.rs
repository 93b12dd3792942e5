//! Service tariff configuration and charge computation.
//!
//! A charge is `base(class) + per_minute(class, service) × minutes_used`,
//! computed in integer cents so rounding to the currency's minor unit is
//! exact. The authoritative charge is computed exactly once per request, at
//! completion, from the minutes actually consumed; [`RateTable::estimate`]
//! applies the same formula to the estimate for display before completion.
//!
//! Missing rates are a configuration error and surface before scheduling
//! starts: the engine rejects a submission whose class/service pair has no
//! configured rate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::models::RoomClass;

/// Per-minute rates at the Economy tier for the standard service menu.
/// Higher tiers scale these by the class multiplier.
const STANDARD_SERVICES: [(&str, i64); 6] = [
    ("Housekeeping", 20),
    ("Room Service", 36),
    ("Premium Housekeeping", 30),
    ("Premium Room Service", 50),
    ("Butler Service", 80),
    ("Concierge Service", 60),
];

/// Tariff table: per-class base rates and per-class, per-service minute rates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateTable {
    base_cents: HashMap<RoomClass, i64>,
    per_minute_cents: HashMap<RoomClass, HashMap<String, i64>>,
}

impl RateTable {
    /// Creates an empty table. Every class/service pair to be scheduled must
    /// be configured before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base rate for a class.
    pub fn with_base(mut self, class: RoomClass, cents: i64) -> Self {
        self.base_cents.insert(class, cents);
        self
    }

    /// Sets the per-minute rate for a class/service pair.
    pub fn with_per_minute(
        mut self,
        class: RoomClass,
        service: impl Into<String>,
        cents: i64,
    ) -> Self {
        self.per_minute_cents
            .entry(class)
            .or_default()
            .insert(service.into(), cents);
        self
    }

    /// The standard hotel tariff: base 10.00 / 15.00 / 25.00 for Economy /
    /// Mid-Range / VIP, per-minute rates for the six standard services
    /// scaled by the class multipliers 1.0 / 1.5 / 2.5.
    pub fn standard() -> Self {
        let mut table = Self::new();
        for class in RoomClass::ALL {
            let (base, multiplier_pct) = match class {
                RoomClass::Economy => (1_000, 100),
                RoomClass::MidRange => (1_500, 150),
                RoomClass::Vip => (2_500, 250),
            };
            table = table.with_base(class, base);
            for (service, economy_rate) in STANDARD_SERVICES {
                table = table.with_per_minute(class, service, economy_rate * multiplier_pct / 100);
            }
        }
        table
    }

    /// Base rate for a class, if configured.
    pub fn base_cents(&self, class: RoomClass) -> Option<i64> {
        self.base_cents.get(&class).copied()
    }

    /// Per-minute rate for a class/service pair, if configured.
    pub fn per_minute_cents(&self, class: RoomClass, service: &str) -> Option<i64> {
        self.per_minute_cents
            .get(&class)
            .and_then(|rates| rates.get(service))
            .copied()
    }

    /// Whether both the base and the per-minute rate exist for this pair.
    pub fn has_rate(&self, class: RoomClass, service: &str) -> bool {
        self.base_cents(class).is_some() && self.per_minute_cents(class, service).is_some()
    }

    /// Computes the charge for `minutes_used` of service. Pure and
    /// deterministic; fails only when a rate is missing.
    pub fn compute_charge(
        &self,
        class: RoomClass,
        service: &str,
        minutes_used: i64,
    ) -> Result<i64> {
        let missing = || SchedulerError::InvalidRate {
            class,
            service: service.to_string(),
        };
        let base = self.base_cents(class).ok_or_else(missing)?;
        let per_minute = self.per_minute_cents(class, service).ok_or_else(missing)?;
        Ok(base + per_minute * minutes_used)
    }

    /// Charge estimate from the estimated duration. Display-only; the
    /// authoritative value is computed at completion from actual minutes.
    pub fn estimate(&self, class: RoomClass, service: &str, estimated_minutes: i64) -> Result<i64> {
        self.compute_charge(class, service, estimated_minutes)
    }
}
