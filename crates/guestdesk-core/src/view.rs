//! The filter/sort/paginate engine.
//!
//! [`visible`] is the single authority for what a list page shows: a pure,
//! synchronous derivation from the full in-memory collection and the
//! current query state. It never mutates anything and is idempotent —
//! re-running with the same inputs yields the same page.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::query::{FilterSpec, PageSpec, SortSpec, StatusFilter};

/// Behavior an entity needs for the list engine: searchable text, a
/// status/category bucket, a creation timestamp, and typed sort keys.
pub trait Listable {
    fn id(&self) -> i64;

    /// Case-insensitive substring test against this entity's fixed set of
    /// string fields. `needle` is already lowercased and non-empty.
    fn matches_query(&self, needle: &str) -> bool;

    /// Wire code of the bucket the status/category filter matches on.
    fn status_code(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    /// Typed key for a sort field; `None` for fields this entity lacks
    /// (unsortable rows group before sortable ones).
    fn sort_key(&self, field: &str) -> Option<SortKey>;

    /// The numeric field the statistics summary sums, where one exists.
    fn amount(&self) -> Option<Decimal> {
        None
    }
}

/// Comparable sort key. Text compares case-insensitively; numbers and
/// dates compare naturally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Date(DateTime<Utc>),
    Number(Decimal),
    Text(String),
}

impl SortKey {
    /// Lowercased text key.
    pub fn text(s: &str) -> Self {
        Self::Text(s.to_lowercase())
    }
}

/// One derived page of a filtered, sorted collection.
#[derive(Debug)]
pub struct VisiblePage<'a, T> {
    /// The rows of the current page, in display order.
    pub items: Vec<&'a T>,
    /// How many rows survived filtering (across all pages).
    pub total_filtered: usize,
    /// `ceil(total_filtered / page_size)`; 0 when nothing matched.
    pub total_pages: usize,
    /// The actual page shown, clamped into `[1, total_pages]`.
    pub page: usize,
}

impl<T> VisiblePage<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Derive the visible page: filter (free text, status, date range), sort,
/// then slice. `now` anchors the date-range buckets so the function stays
/// pure and testable.
pub fn visible<'a, T: Listable>(
    collection: &'a [T],
    filter: &FilterSpec,
    sort: &SortSpec,
    page: &PageSpec,
    now: DateTime<Utc>,
) -> VisiblePage<'a, T> {
    let needle = filter.query.trim().to_lowercase();
    let lower_bound = filter.date_range.lower_bound(now);

    let mut rows: Vec<&T> = collection
        .iter()
        .filter(|item| needle.is_empty() || item.matches_query(&needle))
        .filter(|item| match &filter.status {
            StatusFilter::All => true,
            StatusFilter::Code(code) => item.status_code() == code,
        })
        .filter(|item| lower_bound.is_none_or(|lb| item.created_at() >= lb))
        .collect();

    // Vec::sort_by is stable, so equal keys keep their fetched order.
    rows.sort_by(|a, b| {
        let ordering = a.sort_key(&sort.field).cmp(&b.sort_key(&sort.field));
        match sort.direction {
            crate::query::SortDirection::Asc => ordering,
            crate::query::SortDirection::Desc => ordering.reverse(),
        }
    });

    let total_filtered = rows.len();
    let total_pages = total_filtered.div_ceil(page.page_size);
    let current = page.page.clamp(1, total_pages.max(1));

    let start = (current - 1) * page.page_size;
    let items: Vec<&T> = rows
        .into_iter()
        .skip(start)
        .take(page.page_size)
        .collect();

    VisiblePage {
        items,
        total_filtered,
        total_pages,
        page: current,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{CustomerSummary, Order, OrderStatus};
    use crate::query::{DateRange, SortDirection};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 11, 12, 0, 0).single().expect("valid timestamp")
    }

    fn order(id: i64, status: &str, amount: i64, days_ago: i64) -> Order {
        Order {
            id,
            order_number: format!("ORD-{id:04}"),
            customer: CustomerSummary {
                username: format!("guest{id}"),
                email: format!("guest{id}@example.com"),
            },
            status: OrderStatus::from_code(status),
            total_amount: Decimal::from(amount),
            notes: (id % 2 == 0).then(|| format!("note for {id}")),
            items: Vec::new(),
            created_at: now() - Duration::days(days_ago),
            updated_at: now() - Duration::days(days_ago),
        }
    }

    fn default_query() -> (FilterSpec, SortSpec, PageSpec) {
        (
            FilterSpec::default(),
            SortSpec::new("created_at", SortDirection::Desc),
            PageSpec::new(10),
        )
    }

    #[test]
    fn empty_collection_yields_empty_page() {
        let (filter, sort, page) = default_query();
        let view = visible::<Order>(&[], &filter, &sort, &page, now());
        assert!(view.is_empty());
        assert_eq!(view.total_filtered, 0);
        assert_eq!(view.total_pages, 0);
    }

    #[test]
    fn totals_are_consistent() {
        let orders: Vec<Order> = (1..=25).map(|i| order(i, "P", i * 10, i)).collect();
        let (filter, sort, page) = default_query();
        let view = visible(&orders, &filter, &sort, &page, now());

        assert_eq!(view.total_filtered, 25);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.items.len(), 10);
    }

    #[test]
    fn status_filter_and_pagination_scenario() {
        // 25 orders, 12 of them pending, page size 10: page 1 shows 10,
        // page 2 shows the remaining 2.
        let orders: Vec<Order> = (1..=25)
            .map(|i| order(i, if i <= 12 { "P" } else { "D" }, 100, i))
            .collect();
        let filter = FilterSpec {
            status: StatusFilter::Code("P".into()),
            ..FilterSpec::default()
        };
        let sort = SortSpec::new("created_at", SortDirection::Desc);

        let page1 = visible(&orders, &filter, &sort, &PageSpec { page: 1, page_size: 10 }, now());
        assert_eq!(page1.total_filtered, 12);
        assert_eq!(page1.total_pages, 2);
        assert_eq!(page1.items.len(), 10);

        let page2 = visible(&orders, &filter, &sort, &PageSpec { page: 2, page_size: 10 }, now());
        assert_eq!(page2.items.len(), 2);
        assert!(page2.items.iter().all(|o| o.status == OrderStatus::Pending));
    }

    #[test]
    fn search_matches_any_field() {
        let orders = vec![order(1, "P", 10, 1), order(2, "P", 20, 2)];
        let (mut filter, sort, page) = default_query();

        filter.query = "ORD-0002".into();
        assert_eq!(visible(&orders, &filter, &sort, &page, now()).total_filtered, 1);

        filter.query = "guest1@EXAMPLE.com".into();
        assert_eq!(visible(&orders, &filter, &sort, &page, now()).total_filtered, 1);

        filter.query = "note for 2".into();
        assert_eq!(visible(&orders, &filter, &sort, &page, now()).total_filtered, 1);
    }

    #[test]
    fn no_match_query_is_empty_for_any_page() {
        let orders: Vec<Order> = (1..=5).map(|i| order(i, "P", 10, 1)).collect();
        let (mut filter, sort, _) = default_query();
        filter.query = "zzz-no-such-order".into();

        for page_no in [1, 2, 99] {
            let view = visible(
                &orders,
                &filter,
                &sort,
                &PageSpec { page: page_no, page_size: 10 },
                now(),
            );
            assert_eq!(view.total_filtered, 0);
            assert!(view.is_empty());
        }
    }

    #[test]
    fn sort_toggle_round_trips() {
        let orders: Vec<Order> = vec![order(3, "P", 30, 3), order(1, "P", 10, 1), order(2, "P", 20, 2)];
        let (filter, _, page) = default_query();

        let asc = SortSpec::new("total_amount", SortDirection::Asc);
        let desc = SortSpec::new("total_amount", SortDirection::Desc);

        let up: Vec<i64> = visible(&orders, &filter, &asc, &page, now())
            .items
            .iter()
            .map(|o| o.id)
            .collect();
        let down: Vec<i64> = visible(&orders, &filter, &desc, &page, now())
            .items
            .iter()
            .map(|o| o.id)
            .collect();
        let up_again: Vec<i64> = visible(&orders, &filter, &asc, &page, now())
            .items
            .iter()
            .map(|o| o.id)
            .collect();

        assert_eq!(up, vec![1, 2, 3]);
        assert_eq!(down, vec![3, 2, 1]);
        assert_eq!(up, up_again);
    }

    #[test]
    fn text_sort_is_case_insensitive() {
        let mut orders = vec![order(1, "P", 10, 1), order(2, "P", 20, 2)];
        orders[0].customer.username = "Zara".into();
        orders[1].customer.username = "alice".into();
        let (filter, _, page) = default_query();
        let sort = SortSpec::new("customer", SortDirection::Asc);

        let names: Vec<&str> = visible(&orders, &filter, &sort, &page, now())
            .items
            .iter()
            .map(|o| o.customer.username.as_str())
            .collect();
        assert_eq!(names, ["alice", "Zara"]);
    }

    #[test]
    fn date_range_buckets_cut_off_old_items() {
        let orders = vec![
            order(1, "P", 10, 0),   // today
            order(2, "P", 10, 3),   // this week
            order(3, "P", 10, 40),  // older than a month
        ];
        let (mut filter, sort, page) = default_query();

        filter.date_range = DateRange::Today;
        assert_eq!(visible(&orders, &filter, &sort, &page, now()).total_filtered, 1);

        filter.date_range = DateRange::Week;
        assert_eq!(visible(&orders, &filter, &sort, &page, now()).total_filtered, 2);

        filter.date_range = DateRange::All;
        assert_eq!(visible(&orders, &filter, &sort, &page, now()).total_filtered, 3);
    }

    #[test]
    fn out_of_range_page_clamps() {
        let orders: Vec<Order> = (1..=12).map(|i| order(i, "P", 10, 1)).collect();
        let (filter, sort, _) = default_query();

        let view = visible(
            &orders,
            &filter,
            &sort,
            &PageSpec { page: 9, page_size: 10 },
            now(),
        );
        assert_eq!(view.page, 2);
        assert_eq!(view.items.len(), 2);
    }
}
