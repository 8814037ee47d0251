//! Staff accounts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::status::{UserRole, UserStatus};
use crate::export::CsvRecord;
use crate::view::{Listable, SortKey};

/// A staff account (admin, manager, or front-desk staff).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    /// Backend-assigned identifier, e.g. `USR20250811ABC123`.
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listable for User {
    fn id(&self) -> i64 {
        self.id
    }

    fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.phone.to_lowercase().contains(needle)
            || self.user_id.to_lowercase().contains(needle)
    }

    fn status_code(&self) -> &str {
        self.role.as_code()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "created_at" => Some(SortKey::Date(self.created_at)),
            "name" => Some(SortKey::text(&self.name)),
            "email" => Some(SortKey::text(&self.email)),
            "role" => Some(SortKey::text(self.role.label())),
            "status" => Some(SortKey::text(self.status.label())),
            _ => None,
        }
    }
}

impl CsvRecord for User {
    const HEADER: &'static [&'static str] = &[
        "User ID",
        "Name",
        "Email",
        "Phone",
        "Role",
        "Status",
        "Created Date",
    ];

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.user_id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.role.label().to_owned(),
            self.status.label().to_owned(),
            self.created_at.format("%Y-%m-%d").to_string(),
        ]
    }
}
