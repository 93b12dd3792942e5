//! Room inventory.
//!
//! Maps room numbers to their class so a request submitted by room number
//! picks up the right priority tier and tariff. The standard inventory
//! follows the facility layout: Economy on floors 1–3, Mid-Range on 4–6,
//! VIP on 7–10, thirty rooms per floor, numbered `<floor><01..30>`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::models::{RequestSpec, RoomClass};

/// Amenities provided at each class tier.
pub fn class_amenities(class: RoomClass) -> &'static [&'static str] {
    match class {
        RoomClass::Economy => &[
            "Basic TV",
            "Wi-Fi",
            "Air Conditioning",
            "Private Bathroom",
        ],
        RoomClass::MidRange => &[
            "Premium TV",
            "High-Speed Wi-Fi",
            "Climate Control",
            "Premium Bathroom",
            "Mini Fridge",
            "Coffee Maker",
            "Room Service Menu",
        ],
        RoomClass::Vip => &[
            "Smart TV",
            "Ultra-Fast Wi-Fi",
            "Premium Climate Control",
            "Luxury Bathroom",
            "Mini Bar",
            "Espresso Machine",
            "24/7 Room Service",
            "Concierge Service",
            "Premium Linens",
            "Balcony",
            "Butler Service",
        ],
    }
}

/// A single room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Room number, e.g. "101".
    pub number: String,
    /// Floor the room is on.
    pub floor: i32,
    /// Class tier.
    pub class: RoomClass,
}

/// Room-number → room lookup table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomCatalog {
    rooms: BTreeMap<String, Room>,
}

impl RoomCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room.
    pub fn with_room(mut self, number: impl Into<String>, floor: i32, class: RoomClass) -> Self {
        let number = number.into();
        self.rooms.insert(
            number.clone(),
            Room {
                number,
                floor,
                class,
            },
        );
        self
    }

    /// The standard inventory: floors 1–3 Economy, 4–6 Mid-Range, 7–10 VIP,
    /// rooms 01–30 per floor.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for floor in 1..=10 {
            let class = match floor {
                1..=3 => RoomClass::Economy,
                4..=6 => RoomClass::MidRange,
                _ => RoomClass::Vip,
            };
            for room in 1..=30 {
                catalog = catalog.with_room(format!("{floor}{room:02}"), floor, class);
            }
        }
        catalog
    }

    /// Looks up a room. Accepts a leading "Room " prefix, as entered by
    /// front-desk forms.
    pub fn get(&self, number: &str) -> Option<&Room> {
        let number = number.strip_prefix("Room ").unwrap_or(number);
        self.rooms.get(number)
    }

    /// Class of a room, if present.
    pub fn class_of(&self, number: &str) -> Option<RoomClass> {
        self.get(number).map(|room| room.class)
    }

    /// All rooms of a class, in room-number order.
    pub fn rooms_in_class(&self, class: RoomClass) -> Vec<&Room> {
        self.rooms
            .values()
            .filter(|room| room.class == class)
            .collect()
    }

    /// Number of rooms in the catalog.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Builds a request spec for a room, deriving the class from the
    /// catalog. Fails with [`SchedulerError::UnknownRoom`] for numbers not
    /// in the inventory.
    pub fn request_for(
        &self,
        number: &str,
        service_type: impl Into<String>,
        estimated_minutes: i64,
        description: impl Into<String>,
    ) -> Result<RequestSpec> {
        let room = self
            .get(number)
            .ok_or_else(|| SchedulerError::UnknownRoom(number.to_string()))?;
        Ok(
            RequestSpec::new(room.class, &room.number, service_type, estimated_minutes)
                .with_description(description),
        )
    }
}
