//! Staff rosters.
//!
//! Each class tier has its own pool of staff members; when a request first
//! starts running the engine picks one at random and records it on the
//! request. A class with no pool of its own falls back to the Economy pool.

use std::collections::HashMap;

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::RoomClass;

/// Per-class staff pools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffRoster {
    members: HashMap<RoomClass, Vec<String>>,
}

impl StaffRoster {
    /// Creates an empty roster. An empty roster leaves requests unstaffed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member to a class pool.
    pub fn with_member(mut self, class: RoomClass, name: impl Into<String>) -> Self {
        self.members.entry(class).or_default().push(name.into());
        self
    }

    /// The standard roster.
    pub fn standard() -> Self {
        Self::new()
            .with_member(RoomClass::Vip, "Alice (VIP Specialist)")
            .with_member(RoomClass::Vip, "Robert (Butler)")
            .with_member(RoomClass::Vip, "Elena (Concierge)")
            .with_member(RoomClass::MidRange, "Bob (Senior Staff)")
            .with_member(RoomClass::MidRange, "Diana (Room Service)")
            .with_member(RoomClass::MidRange, "Carlos (Maintenance)")
            .with_member(RoomClass::Economy, "Charlie (Staff)")
            .with_member(RoomClass::Economy, "Eve (Housekeeper)")
            .with_member(RoomClass::Economy, "Frank (Assistant)")
    }

    /// Members of a class pool.
    pub fn members(&self, class: RoomClass) -> &[String] {
        self.members.get(&class).map_or(&[], Vec::as_slice)
    }

    /// Picks a random member for a class, falling back to the Economy pool
    /// when the class has none. `None` when both pools are empty.
    pub fn choose<R: Rng + ?Sized>(&self, class: RoomClass, rng: &mut R) -> Option<&str> {
        let pool = match self.members(class) {
            [] => self.members(RoomClass::Economy),
            pool => pool,
        };
        pool.choose(rng).map(String::as_str)
    }

    /// [`choose`](Self::choose) with the thread RNG.
    pub fn pick(&self, class: RoomClass) -> Option<String> {
        self.choose(class, &mut rand::rng()).map(str::to_string)
    }
}
