//! Palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use guestdesk_core::{OrderStatus, RoomCategory, UserStatus};

// ── Core Palette ──────────────────────────────────────────────────────

pub const BRASS: Color = Color::Rgb(212, 175, 55); // #d4af37
pub const SEAFOAM: Color = Color::Rgb(120, 220, 196); // #78dcc4
pub const ROSE: Color = Color::Rgb(235, 130, 160); // #eb82a0
pub const AMBER: Color = Color::Rgb(247, 201, 120); // #f7c978
pub const SUCCESS_GREEN: Color = Color::Rgb(112, 224, 128); // #70e080
pub const ERROR_RED: Color = Color::Rgb(240, 96, 96); // #f06060

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(196, 198, 208); // #c4c6d0
pub const BORDER_GRAY: Color = Color::Rgb(94, 102, 132); // #5e6684
pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 44, 56); // #2a2c38
pub const SKY: Color = Color::Rgb(132, 200, 250); // #84c8fa

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(BRASS).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(BRASS)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(SEAFOAM)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(BRASS)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(BRASS).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(SEAFOAM).add_modifier(Modifier::BOLD)
}

/// Field label inside a form modal.
pub fn form_label() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Inline validation error under a form field.
pub fn form_error() -> Style {
    Style::default().fg(ERROR_RED)
}

// ── Status colors ─────────────────────────────────────────────────────

/// Visual treatment per order status; unknown codes get default styling.
pub fn order_status_color(status: &OrderStatus) -> Color {
    match status {
        OrderStatus::Pending => AMBER,
        OrderStatus::Confirmed => SKY,
        OrderStatus::Processing => SEAFOAM,
        OrderStatus::Shipped => BRASS,
        OrderStatus::Delivered => SUCCESS_GREEN,
        OrderStatus::Cancelled => ERROR_RED,
        OrderStatus::Refunded => ROSE,
        OrderStatus::Unknown(_) => DIM_WHITE,
    }
}

/// Visual treatment per room category.
pub fn room_category_color(category: &RoomCategory) -> Color {
    match category {
        RoomCategory::General => DIM_WHITE,
        RoomCategory::Vip => BRASS,
        RoomCategory::Suite => ROSE,
        RoomCategory::Deluxe => SKY,
        RoomCategory::Unknown(_) => DIM_WHITE,
    }
}

/// Visual treatment for account status.
pub fn user_status_color(status: &UserStatus) -> Color {
    match status {
        UserStatus::Active => SUCCESS_GREEN,
        UserStatus::Inactive => ERROR_RED,
        UserStatus::Unknown(_) => DIM_WHITE,
    }
}
