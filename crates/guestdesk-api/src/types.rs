//! Wire types for the guest-management REST backend.
//!
//! Field names match the backend's JSON (snake_case, DRF conventions).
//! Decimal fields tolerate both string (`"12.50"`, the DRF default) and
//! numeric JSON encodings. Unknown enum codes are carried through as raw
//! strings here; `guestdesk-core` maps them to typed codes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ── Decimal compatibility ────────────────────────────────────────────

/// DRF serializes `DecimalField` as a JSON string, but some endpoints (and
/// fixtures) emit plain numbers. Accept both on the way in; emit strings on
/// the way out, which the backend always accepts.
pub mod decimal_compat {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(f64),
    }

    pub fn deserialize<'de, D>(de: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(de)? {
            Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
            Raw::Num(n) => Decimal::try_from(n).map_err(serde::de::Error::custom),
        }
    }

    pub fn serialize<S: Serializer>(value: &Decimal, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&value.to_string())
    }
}

// ── List-response normalization ──────────────────────────────────────

/// The three body shapes list endpoints are known to produce.
///
/// DRF page-number pagination wraps results in `{count, next, previous,
/// results}`; some views envelope a bare collection as `{data: [...]}`;
/// the rest return a plain JSON array. Normalization happens exactly once,
/// here, so no consumer ever branches on the shape again.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    Paginated {
        count: u64,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<T>,
    },
    Enveloped {
        data: Vec<T>,
    },
    Bare(Vec<T>),
}

/// A normalized page of entities, whatever shape the server sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOf<T> {
    pub items: Vec<T>,
    /// Total matching count as reported by the server; equals `items.len()`
    /// for unpaginated responses.
    pub total: u64,
    /// Whether the server did the paginating (a `results` envelope).
    pub server_paginated: bool,
}

impl<T> From<ListBody<T>> for PageOf<T> {
    fn from(body: ListBody<T>) -> Self {
        match body {
            ListBody::Paginated { count, results, .. } => Self {
                items: results,
                total: count,
                server_paginated: true,
            },
            ListBody::Enveloped { data } | ListBody::Bare(data) => Self {
                total: data.len() as u64,
                items: data,
                server_paginated: false,
            },
        }
    }
}

// ── Customers (embedded in orders) ───────────────────────────────────

/// Customer summary as embedded in order responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

// ── Orders ───────────────────────────────────────────────────────────

/// Product summary as embedded in order line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBrief {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub product_code: Option<String>,
}

/// One line item of an order. `price` is the price at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemDto {
    pub id: i64,
    #[serde(default)]
    pub product: Option<ProductBrief>,
    pub quantity: u32,
    #[serde(with = "decimal_compat")]
    pub price: Decimal,
}

/// An order — from `GET /admin/orders/` and `GET /orders/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: i64,
    pub order_number: String,
    #[serde(default)]
    pub customer: Option<CustomerRef>,
    /// Status code: `P`, `C`, `PR`, `S`, `D`, `CA`, `R`.
    pub status: String,
    #[serde(with = "decimal_compat")]
    pub total_amount: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderItemDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for `PATCH /orders/{id}/status/`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: String,
}

// ── Rooms ────────────────────────────────────────────────────────────

/// A hotel room — from `GET /rooms/`.
///
/// The backend names the category field `categories` even though it holds
/// a single one-letter code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDto {
    pub id: i64,
    pub room_code: String,
    /// Category code: `G`, `V`, `S`, `D`.
    pub categories: String,
    #[serde(default)]
    pub reserved: bool,
    #[serde(with = "decimal_compat")]
    pub price_per_night: Decimal,
    pub capacity: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for `POST /rooms/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRoom {
    pub room_code: String,
    pub categories: String,
    #[serde(with = "decimal_compat")]
    pub price_per_night: Decimal,
    pub capacity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

/// Body for `PATCH /rooms/{id}/` — unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoomPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ── Staff users ──────────────────────────────────────────────────────

/// A staff account — from `GET /users/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Role code: `ADMIN`, `MANAGER`, `STAFF`.
    pub role: String,
    /// Status code: `ACTIVE`, `INACTIVE`.
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for `POST /users/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub password: String,
}

/// Body for `PATCH /users/{id}/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body for `POST /users/{id}/reset-password/`.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordReset {
    pub new_password: String,
    pub confirm_password: String,
}

// ── Products & categories ────────────────────────────────────────────

/// A product category — from `GET /categories/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A product — from `GET /products/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: i64,
    pub product_code: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
    #[serde(with = "decimal_compat")]
    pub cost: Decimal,
    #[serde(with = "decimal_compat")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for `POST /products/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(with = "decimal_compat")]
    pub cost: Decimal,
    #[serde(with = "decimal_compat")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category_ids: Vec<i64>,
    pub is_active: bool,
}

/// Body for `PATCH /products/{id}/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body for `POST /categories/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginated_body_normalizes() {
        let body: ListBody<i32> = serde_json::from_str(
            r#"{"count": 42, "next": "http://x/?page=2", "previous": null, "results": [1, 2, 3]}"#,
        )
        .expect("paginated body");
        let page = PageOf::from(body);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total, 42);
        assert!(page.server_paginated);
    }

    #[test]
    fn enveloped_body_normalizes() {
        let body: ListBody<i32> = serde_json::from_str(r#"{"data": [7, 8]}"#).expect("envelope");
        let page = PageOf::from(body);
        assert_eq!(page.items, vec![7, 8]);
        assert_eq!(page.total, 2);
        assert!(!page.server_paginated);
    }

    #[test]
    fn bare_array_normalizes() {
        let body: ListBody<i32> = serde_json::from_str("[5]").expect("bare array");
        let page = PageOf::from(body);
        assert_eq!(page.items, vec![5]);
        assert_eq!(page.total, 1);
        assert!(!page.server_paginated);
    }

    #[test]
    fn decimal_accepts_string_and_number() {
        let order: OrderDto = serde_json::from_value(serde_json::json!({
            "id": 1,
            "order_number": "ORD20250811AB12CD34",
            "status": "P",
            "total_amount": "149.50",
            "created_at": "2025-08-11T09:00:00Z",
            "updated_at": "2025-08-11T09:00:00Z"
        }))
        .expect("string decimal");
        assert_eq!(order.total_amount.to_string(), "149.50");

        let room: RoomDto = serde_json::from_value(serde_json::json!({
            "id": 2,
            "room_code": "R-101",
            "categories": "V",
            "price_per_night": 220.0,
            "capacity": 2,
            "created_at": "2025-08-11T09:00:00Z",
            "updated_at": "2025-08-11T09:00:00Z"
        }))
        .expect("numeric decimal");
        assert_eq!(room.price_per_night.to_string(), "220");
    }

    #[test]
    fn patch_skips_unset_fields() {
        let patch = RoomPatch {
            capacity: Some(3),
            ..RoomPatch::default()
        };
        let json = serde_json::to_value(&patch).expect("serialize patch");
        assert_eq!(json, serde_json::json!({"capacity": 3}));
    }
}
