//! List query state: filter, sort, and pagination specifications.
//!
//! These are plain value types owned by each list page. The same criteria
//! are also rendered into server query params ([`ListQuery::to_params`]) to
//! narrow payloads — the client-side engine in [`crate::view`] remains the
//! authority on what is displayed.

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use strum::Display;

use guestdesk_api::ListParams;

/// Status/category selector: everything, or exactly one code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Code(String),
}

impl StatusFilter {
    pub fn matches(&self, code: &str) -> bool {
        match self {
            Self::All => true,
            Self::Code(c) => c == code,
        }
    }

    /// Server param value, `None` for the `all` sentinel.
    pub fn as_param(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Code(c) => Some(c),
        }
    }
}

/// Created-at bucket for quick date filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum DateRange {
    #[default]
    #[strum(serialize = "All time")]
    All,
    #[strum(serialize = "Today")]
    Today,
    #[strum(serialize = "Last 7 days")]
    Week,
    #[strum(serialize = "This month")]
    Month,
    #[strum(serialize = "Last 3 months")]
    ThreeMonths,
}

impl DateRange {
    /// Inclusive lower bound for `created_at`, anchored at `now`.
    ///
    /// `Today` is the start of the current day; `Week` is a rolling
    /// 7x24h window; `Month` is the first of the current month;
    /// `ThreeMonths` is the first day of the month three months back.
    pub fn lower_bound(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let midnight = NaiveTime::MIN;
        match self {
            Self::All => None,
            Self::Today => Some(Utc.from_utc_datetime(&now.date_naive().and_time(midnight))),
            Self::Week => Some(now - Duration::days(7)),
            Self::Month => {
                let first = now.date_naive().with_day(1)?;
                Some(Utc.from_utc_datetime(&first.and_time(midnight)))
            }
            Self::ThreeMonths => {
                let (mut year, mut month) = (now.year(), i64::from(now.month()));
                month -= 3;
                if month <= 0 {
                    month += 12;
                    year -= 1;
                }
                let first = chrono::NaiveDate::from_ymd_opt(
                    year,
                    u32::try_from(month).ok()?,
                    1,
                )?;
                Some(Utc.from_utc_datetime(&first.and_time(midnight)))
            }
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum SortDirection {
    #[strum(serialize = "asc")]
    Asc,
    #[default]
    #[strum(serialize = "desc")]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Which field to sort by, and which way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Selecting the active field toggles direction; a new field takes
    /// over with descending as its default.
    pub fn select(&mut self, field: &str) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            self.field = field.to_owned();
            self.direction = SortDirection::Desc;
        }
    }

    /// Server ordering string: `field` ascending, `-field` descending.
    pub fn ordering_param(&self) -> String {
        match self.direction {
            SortDirection::Asc => self.field.clone(),
            SortDirection::Desc => format!("-{}", self.field),
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new("created_at", SortDirection::Desc)
    }
}

/// Free text + status + date-range filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub query: String,
    pub status: StatusFilter,
    pub date_range: DateRange,
}

impl FilterSpec {
    pub fn is_default(&self) -> bool {
        self.query.is_empty()
            && self.status == StatusFilter::All
            && self.date_range == DateRange::All
    }
}

/// 1-based pagination over the filtered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    pub page: usize,
    pub page_size: usize,
}

impl PageSpec {
    pub fn new(page_size: usize) -> Self {
        Self { page: 1, page_size }
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}

/// The full query state of one list page.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filter: FilterSpec,
    pub sort: SortSpec,
    pub page: PageSpec,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ListQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: PageSpec::new(page_size),
            ..Self::default()
        }
    }

    /// Mutate the filter through `apply`, then reset to page 1 — every
    /// filter change restarts pagination.
    pub fn update_filter(&mut self, apply: impl FnOnce(&mut FilterSpec)) {
        apply(&mut self.filter);
        self.page.reset();
    }

    /// Select a sort field (toggling direction on repeat selection) and
    /// restart pagination.
    pub fn select_sort(&mut self, field: &str) {
        self.sort.select(field);
        self.page.reset();
    }

    /// Server params for this query. Search/status/date criteria narrow
    /// the payload; pagination is deliberately absent — the engine slices
    /// pages locally over the complete filtered collection.
    pub fn to_params(&self, now: DateTime<Utc>) -> ListParams {
        let mut params = ListParams::new()
            .ordering(self.sort.ordering_param())
            .search(self.filter.query.trim());
        if let Some(code) = self.filter.status.as_param() {
            params = params.status(code);
        }
        if let Some(bound) = self.filter.date_range.lower_bound(now) {
            params = params.created_after(bound.date_naive());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 14, 10, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn today_bound_is_start_of_day() {
        let bound = DateRange::Today.lower_bound(now()).expect("bound");
        assert_eq!(bound.to_rfc3339(), "2025-02-14T00:00:00+00:00");
    }

    #[test]
    fn month_bound_is_first_of_month() {
        let bound = DateRange::Month.lower_bound(now()).expect("bound");
        assert_eq!(bound.to_rfc3339(), "2025-02-01T00:00:00+00:00");
    }

    #[test]
    fn three_months_bound_crosses_year_boundary() {
        let bound = DateRange::ThreeMonths.lower_bound(now()).expect("bound");
        assert_eq!(bound.to_rfc3339(), "2024-11-01T00:00:00+00:00");
    }

    #[test]
    fn sort_select_toggles_then_switches() {
        let mut sort = SortSpec::default();
        assert_eq!(sort.direction, SortDirection::Desc);

        sort.select("created_at");
        assert_eq!(sort.direction, SortDirection::Asc);
        sort.select("created_at");
        assert_eq!(sort.direction, SortDirection::Desc);

        sort.select("total_amount");
        assert_eq!(sort.field, "total_amount");
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn filter_change_resets_page() {
        let mut query = ListQuery::new(10);
        query.page.page = 4;
        query.update_filter(|f| f.status = StatusFilter::Code("P".into()));
        assert_eq!(query.page.page, 1);
    }

    #[test]
    fn params_carry_criteria_but_not_pagination() {
        let mut query = ListQuery::new(10);
        query.filter.query = "smith".into();
        query.filter.status = StatusFilter::Code("P".into());
        query.filter.date_range = DateRange::Month;
        query.page.page = 3;

        let params = query.to_params(now());
        assert_eq!(params.search.as_deref(), Some("smith"));
        assert_eq!(params.status.as_deref(), Some("P"));
        assert_eq!(params.ordering.as_deref(), Some("-created_at"));
        assert_eq!(
            params.created_after.map(|d| d.to_string()),
            Some("2025-02-01".into())
        );
        assert!(params.page.is_none());
        assert!(params.page_size.is_none());
    }
}
