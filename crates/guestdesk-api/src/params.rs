//! Query parameters shared by every list endpoint.

use chrono::NaiveDate;

/// Parameters for `GET /<entity>/` list calls.
///
/// Mirrors the backend's query contract: `page`, `page_size`, `ordering`
/// (`field` ascending, `-field` descending), `search`, `status`, and a
/// `created_at__gte` date lower-bound. Empty values are omitted from the
/// query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub ordering: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub created_after: Option<NaiveDate>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Ordering string: `field` for ascending, `-field` for descending.
    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        if !query.is_empty() {
            self.search = Some(query);
        }
        self
    }

    pub fn status(mut self, code: impl Into<String>) -> Self {
        self.status = Some(code.into());
        self
    }

    /// Keep only items created on or after this date.
    pub fn created_after(mut self, date: NaiveDate) -> Self {
        self.created_after = Some(date);
        self
    }

    /// Render to query pairs, omitting unset fields.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size", size.to_string()));
        }
        if let Some(ref ordering) = self.ordering {
            pairs.push(("ordering", ordering.clone()));
        }
        if let Some(ref search) = self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(ref status) = self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(date) = self.created_after {
            pairs.push(("created_at__gte", date.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_render_no_pairs() {
        assert!(ListParams::new().to_query().is_empty());
    }

    #[test]
    fn full_params_render_all_pairs() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        let params = ListParams::new()
            .page(2)
            .page_size(10)
            .ordering("-created_at")
            .search("smith")
            .status("P")
            .created_after(date);

        let pairs = params.to_query();
        assert_eq!(
            pairs,
            vec![
                ("page", "2".into()),
                ("page_size", "10".into()),
                ("ordering", "-created_at".into()),
                ("search", "smith".into()),
                ("status", "P".into()),
                ("created_at__gte", "2025-06-01".into()),
            ]
        );
    }

    #[test]
    fn blank_search_is_omitted() {
        let params = ListParams::new().search("");
        assert!(params.search.is_none());
    }
}
