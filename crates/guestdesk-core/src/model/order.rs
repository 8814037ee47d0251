//! Orders — customer purchases managed from the admin order board.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::status::OrderStatus;
use crate::export::CsvRecord;
use crate::view::{Listable, SortKey};

/// The customer who placed an order, as embedded in order payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerSummary {
    pub username: String,
    pub email: String,
}

impl CustomerSummary {
    /// Preferred display handle: username, falling back to e-mail.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}

/// One line item of an order; `price` is the price at order time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl OrderItem {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub customer: CustomerSummary,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listable for Order {
    fn id(&self) -> i64 {
        self.id
    }

    fn matches_query(&self, needle: &str) -> bool {
        self.order_number.to_lowercase().contains(needle)
            || self.customer.username.to_lowercase().contains(needle)
            || self.customer.email.to_lowercase().contains(needle)
            || self
                .notes
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(needle))
    }

    fn status_code(&self) -> &str {
        self.status.as_code()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "created_at" => Some(SortKey::Date(self.created_at)),
            "updated_at" => Some(SortKey::Date(self.updated_at)),
            "total_amount" => Some(SortKey::Number(self.total_amount)),
            "order_number" => Some(SortKey::text(&self.order_number)),
            "status" => Some(SortKey::text(self.status.label())),
            "customer" => Some(SortKey::text(self.customer.display_name())),
            _ => None,
        }
    }

    fn amount(&self) -> Option<Decimal> {
        Some(self.total_amount)
    }
}

impl CsvRecord for Order {
    const HEADER: &'static [&'static str] = &[
        "Order Number",
        "Customer",
        "Status",
        "Total Amount",
        "Items",
        "Created Date",
        "Updated Date",
    ];

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.order_number.clone(),
            self.customer.display_name().to_owned(),
            self.status.label().to_owned(),
            self.total_amount.to_string(),
            self.items.len().to_string(),
            self.created_at.format("%Y-%m-%d").to_string(),
            self.updated_at.format("%Y-%m-%d").to_string(),
        ]
    }
}
