//! Helpers shared by every list screen.

use ratatui::text::{Line, Span};
use ratatui::widgets::TableState;

use guestdesk_core::{ListQuery, SortDirection, StatusFilter};

use crate::theme;

/// Move the table selection by `delta`, clamped to the row count.
pub fn move_selection(state: &mut TableState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    #[allow(clippy::cast_possible_wrap)]
    let current = state.selected().unwrap_or(0) as isize;
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    let next = (current + delta).clamp(0, len as isize - 1) as usize;
    state.select(Some(next));
}

/// Clamp the selection after the row count changed (filter/fetch).
pub fn clamp_selection(state: &mut TableState, len: usize) {
    if len == 0 {
        state.select(None);
    } else {
        let idx = state.selected().unwrap_or(0).min(len - 1);
        state.select(Some(idx));
    }
}

/// One-line summary of the active query: search, status, range, sort.
pub fn filter_summary<'a>(query: &ListQuery, status_label: &'a str) -> Line<'a> {
    let arrow = match query.sort.direction {
        SortDirection::Asc => "\u{2191}",
        SortDirection::Desc => "\u{2193}",
    };
    let search = if query.filter.query.is_empty() {
        String::from("\u{2500}")
    } else {
        format!("\"{}\"", query.filter.query)
    };
    let status = match &query.filter.status {
        StatusFilter::All => "All",
        StatusFilter::Code(_) => status_label,
    };

    Line::from(vec![
        Span::styled(" search ", theme::key_hint()),
        Span::styled(search, theme::table_row()),
        Span::styled("  status ", theme::key_hint()),
        Span::styled(status, theme::table_row()),
        Span::styled("  range ", theme::key_hint()),
        Span::styled(query.filter.date_range.to_string(), theme::table_row()),
        Span::styled("  sort ", theme::key_hint()),
        Span::styled(
            format!("{} {arrow}", query.sort.field),
            theme::table_row(),
        ),
    ])
}

/// Key-hint footer line from (key, label) pairs.
pub fn hint_line(pairs: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 2 + 1);
    spans.push(Span::raw(" "));
    for (key, label) in pairs {
        spans.push(Span::styled((*key).to_owned() + " ", theme::key_hint_key()));
        spans.push(Span::styled((*label).to_owned() + "  ", theme::key_hint()));
    }
    Line::from(spans)
}

/// Pagination summary: "page 1/3 · 23 matching".
pub fn page_summary(page: usize, total_pages: usize, total: usize) -> String {
    if total == 0 {
        "no matching entries".into()
    } else {
        format!("page {page}/{total_pages} \u{b7} {total} matching")
    }
}
