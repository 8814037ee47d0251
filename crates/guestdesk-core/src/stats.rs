//! Statistics summary over a loaded collection.
//!
//! Derived and read-only: counts per status bucket, plus the revenue sum
//! over the statuses that count as revenue. Recomputed by the store on
//! every collection change; never persisted.

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::view::Listable;

/// Per-status counts and the revenue aggregate for one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub total: usize,
    /// Count per status code, in first-seen order.
    pub counts: IndexMap<String, usize>,
    /// Sum of `amount()` over items whose status is revenue-bearing.
    pub revenue: Decimal,
}

impl StatusBreakdown {
    /// Aggregate `items`; `revenue_codes` names the buckets whose amounts
    /// count as revenue (empty for entities without a revenue notion).
    pub fn compute<'a, T, I>(items: I, revenue_codes: &[&str]) -> Self
    where
        T: Listable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        let mut revenue = Decimal::ZERO;
        let mut total = 0;

        for item in items {
            total += 1;
            let code = item.status_code();
            *counts.entry(code.to_owned()).or_insert(0) += 1;
            if revenue_codes.contains(&code) {
                if let Some(amount) = item.amount() {
                    revenue += amount;
                }
            }
        }

        Self {
            total,
            counts,
            revenue,
        }
    }

    /// Count for one status code (0 when absent).
    pub fn count(&self, code: &str) -> usize {
        self.counts.get(code).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;
    use crate::model::{CustomerSummary, Order, OrderStatus};

    fn order(id: i64, status: &str, amount: i64) -> Order {
        let ts = Utc
            .with_ymd_and_hms(2025, 8, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        Order {
            id,
            order_number: format!("ORD-{id}"),
            customer: CustomerSummary::default(),
            status: OrderStatus::from_code(status),
            total_amount: Decimal::from(amount),
            notes: None,
            items: Vec::new(),
            created_at: ts,
            updated_at: ts,
        }
    }

    const REVENUE: [&str; 4] = ["C", "PR", "S", "D"];

    #[test]
    fn counts_bucket_by_status() {
        let orders = vec![
            order(1, "P", 10),
            order(2, "P", 20),
            order(3, "D", 30),
            order(4, "CA", 40),
        ];
        let stats = StatusBreakdown::compute(&orders, &REVENUE);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.count("P"), 2);
        assert_eq!(stats.count("D"), 1);
        assert_eq!(stats.count("CA"), 1);
        assert_eq!(stats.count("R"), 0);
    }

    #[test]
    fn revenue_sums_only_revenue_bearing_statuses() {
        let orders = vec![
            order(1, "P", 100),  // pending — not revenue
            order(2, "C", 50),
            order(3, "D", 25),
            order(4, "CA", 999), // cancelled — not revenue
        ];
        let stats = StatusBreakdown::compute(&orders, &REVENUE);
        assert_eq!(stats.revenue, Decimal::from(75));
    }

    #[test]
    fn empty_collection_has_no_stats() {
        let stats = StatusBreakdown::compute(&Vec::<Order>::new(), &REVENUE);
        assert_eq!(stats, StatusBreakdown::default());
    }
}
