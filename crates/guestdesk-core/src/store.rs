//! The collection state store.
//!
//! Owns the authoritative in-memory copy of one entity collection plus its
//! loading/error flags. Responses are fenced by a monotonic fetch sequence:
//! only the latest issued fetch may write, so a slow stale response can
//! never overwrite fresher data.

use tracing::debug;

use crate::stats::StatusBreakdown;
use crate::view::Listable;

/// Token identifying one issued fetch. Obtained from
/// [`CollectionStore::begin_fetch`] and passed back with the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSeq(u64);

/// Lifecycle of the stored collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A fetch is in flight (previous items remain readable).
    Loading,
    /// The collection reflects the latest successful fetch.
    Ready,
    /// The latest fetch failed; previous items remain readable.
    Failed(String),
}

/// In-memory store for one entity collection.
pub struct CollectionStore<T: Listable> {
    items: Vec<T>,
    state: LoadState,
    latest_seq: u64,
    breakdown: StatusBreakdown,
    revenue_codes: &'static [&'static str],
}

impl<T: Listable> CollectionStore<T> {
    /// `revenue_codes` feeds the statistics summary; pass `&[]` for
    /// entities without a revenue notion.
    pub fn new(revenue_codes: &'static [&'static str]) -> Self {
        Self {
            items: Vec::new(),
            state: LoadState::Idle,
            latest_seq: 0,
            breakdown: StatusBreakdown::default(),
            revenue_codes,
        }
    }

    /// Register a new fetch. Any earlier in-flight fetch is implicitly
    /// obsoleted — its response will be discarded on arrival.
    pub fn begin_fetch(&mut self) -> FetchSeq {
        self.latest_seq += 1;
        self.state = LoadState::Loading;
        FetchSeq(self.latest_seq)
    }

    /// Apply a fetch outcome. Returns `false` (and changes nothing) when
    /// `seq` is not the latest issued fetch.
    pub fn apply(&mut self, seq: FetchSeq, result: Result<Vec<T>, String>) -> bool {
        if seq.0 != self.latest_seq {
            debug!(stale = seq.0, latest = self.latest_seq, "discarding stale fetch response");
            return false;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.state = LoadState::Ready;
                self.breakdown = StatusBreakdown::compute(&self.items, self.revenue_codes);
            }
            Err(message) => {
                // Keep the previous collection — stale data beats no data.
                self.state = LoadState::Failed(message);
            }
        }
        true
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// The last fetch error, if the store is in the failed state.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn breakdown(&self) -> &StatusBreakdown {
        &self.breakdown
    }

    /// Find an item by id in the loaded collection.
    pub fn find(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;
    use crate::model::{CustomerSummary, Order, OrderStatus};

    fn order(id: i64, status: &str) -> Order {
        let ts = Utc
            .with_ymd_and_hms(2025, 8, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        Order {
            id,
            order_number: format!("ORD-{id}"),
            customer: CustomerSummary::default(),
            status: OrderStatus::from_code(status),
            total_amount: Decimal::from(10),
            notes: None,
            items: Vec::new(),
            created_at: ts,
            updated_at: ts,
        }
    }

    const REVENUE: [&str; 4] = ["C", "PR", "S", "D"];

    #[test]
    fn successful_fetch_replaces_items_and_stats() {
        let mut store = CollectionStore::new(&REVENUE);
        let seq = store.begin_fetch();
        assert!(store.is_loading());

        assert!(store.apply(seq, Ok(vec![order(1, "P"), order(2, "D")])));
        assert_eq!(store.state(), &LoadState::Ready);
        assert_eq!(store.len(), 2);
        assert_eq!(store.breakdown().count("P"), 1);
        assert_eq!(store.breakdown().count("D"), 1);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut store = CollectionStore::new(&REVENUE);
        let first = store.begin_fetch();
        let second = store.begin_fetch();

        // The newer fetch resolves first and wins.
        assert!(store.apply(second, Ok(vec![order(1, "P")])));
        // The older response arrives late and must be ignored.
        assert!(!store.apply(first, Ok(vec![order(99, "CA")])));

        assert_eq!(store.len(), 1);
        assert!(store.find(99).is_none());
        assert_eq!(store.state(), &LoadState::Ready);
    }

    #[test]
    fn failed_fetch_keeps_previous_items() {
        let mut store = CollectionStore::new(&REVENUE);
        let seq = store.begin_fetch();
        store.apply(seq, Ok(vec![order(1, "P")]));

        let seq = store.begin_fetch();
        store.apply(seq, Err("connection refused".into()));

        assert_eq!(store.error(), Some("connection refused"));
        assert_eq!(store.len(), 1, "stale-but-available data survives");
    }

    #[test]
    fn stale_error_does_not_clobber_fresh_data() {
        let mut store = CollectionStore::new(&REVENUE);
        let first = store.begin_fetch();
        let second = store.begin_fetch();

        assert!(store.apply(second, Ok(vec![order(1, "P")])));
        assert!(!store.apply(first, Err("timed out".into())));
        assert_eq!(store.state(), &LoadState::Ready);
    }

    #[test]
    fn status_change_moves_between_buckets_after_refetch() {
        let mut store = CollectionStore::new(&REVENUE);
        let seq = store.begin_fetch();
        store.apply(seq, Ok(vec![order(1, "P"), order(2, "P")]));
        assert_eq!(store.breakdown().count("P"), 2);
        assert_eq!(store.breakdown().count("C"), 0);

        // A status mutation triggers a re-fetch; the new snapshot lands.
        let seq = store.begin_fetch();
        store.apply(seq, Ok(vec![order(1, "C"), order(2, "P")]));
        assert_eq!(store.breakdown().count("P"), 1);
        assert_eq!(store.breakdown().count("C"), 1);
        assert_eq!(store.breakdown().revenue, Decimal::from(10));
    }
}
