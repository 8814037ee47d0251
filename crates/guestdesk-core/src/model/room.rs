//! Hotel rooms.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::status::RoomCategory;
use crate::export::CsvRecord;
use crate::view::{Listable, SortKey};

/// A hotel room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: i64,
    pub room_code: String,
    pub category: RoomCategory,
    pub reserved: bool,
    pub price_per_night: Decimal,
    pub capacity: u32,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listable for Room {
    fn id(&self) -> i64 {
        self.id
    }

    fn matches_query(&self, needle: &str) -> bool {
        self.room_code.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }

    fn status_code(&self) -> &str {
        self.category.as_code()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "created_at" => Some(SortKey::Date(self.created_at)),
            "room_code" => Some(SortKey::text(&self.room_code)),
            "price_per_night" => Some(SortKey::Number(self.price_per_night)),
            "capacity" => Some(SortKey::Number(Decimal::from(self.capacity))),
            "category" => Some(SortKey::text(self.category.label())),
            _ => None,
        }
    }
}

impl CsvRecord for Room {
    const HEADER: &'static [&'static str] = &[
        "Room Code",
        "Category",
        "Price Per Night",
        "Capacity",
        "Reserved",
        "Active",
        "Created Date",
    ];

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.room_code.clone(),
            self.category.label().to_owned(),
            self.price_per_night.to_string(),
            self.capacity.to_string(),
            if self.reserved { "Yes" } else { "No" }.into(),
            if self.is_active { "Yes" } else { "No" }.into(),
            self.created_at.format("%Y-%m-%d").to_string(),
        ]
    }
}
