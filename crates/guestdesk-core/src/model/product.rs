//! Products sold through the hotel shop.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::export::CsvRecord;
use crate::view::{Listable, SortKey};

/// A product category (flat catalogue, products reference by name).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A shop product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    /// Backend-assigned code, e.g. `PRD20250811AB12CD34`.
    pub product_code: String,
    pub name: String,
    pub categories: Vec<Category>,
    pub cost: Decimal,
    pub price: Decimal,
    pub quantity: u32,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Margin per unit at current pricing.
    pub fn margin(&self) -> Decimal {
        self.price - self.cost
    }

    /// Comma-joined category names for table display.
    pub fn category_names(&self) -> String {
        self.categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Listable for Product {
    fn id(&self) -> i64 {
        self.id
    }

    fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.product_code.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
            || self
                .categories
                .iter()
                .any(|c| c.name.to_lowercase().contains(needle))
    }

    /// Products filter on active/inactive rather than a code set.
    fn status_code(&self) -> &str {
        if self.is_active { "active" } else { "inactive" }
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "created_at" => Some(SortKey::Date(self.created_at)),
            "name" => Some(SortKey::text(&self.name)),
            "product_code" => Some(SortKey::text(&self.product_code)),
            "cost" => Some(SortKey::Number(self.cost)),
            "price" => Some(SortKey::Number(self.price)),
            "quantity" => Some(SortKey::Number(Decimal::from(self.quantity))),
            _ => None,
        }
    }
}

impl CsvRecord for Product {
    const HEADER: &'static [&'static str] = &[
        "Product Code",
        "Name",
        "Categories",
        "Cost",
        "Price",
        "Quantity",
        "Active",
        "Created Date",
    ];

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.product_code.clone(),
            self.name.clone(),
            self.category_names(),
            self.cost.to_string(),
            self.price.to_string(),
            self.quantity.to_string(),
            if self.is_active { "Yes" } else { "No" }.into(),
            self.created_at.format("%Y-%m-%d").to_string(),
        ]
    }
}
