//! Actions dispatched through the app's mpsc channel.
//!
//! Everything that crosses a task boundary is an Action: fetch results
//! tagged with their fetch sequence, mutation outcomes, navigation, and
//! notifications.

use guestdesk_core::{FetchSeq, Order, Product, Room, User};

use crate::screen::ScreenId;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient toast shown in the app chrome.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }
}

/// All messages flowing through the app loop.
#[derive(Debug)]
pub enum Action {
    // ── App chrome ───────────────────────────────────────────────────
    Quit,
    NextScreen,
    PrevScreen,
    GoToScreen(ScreenId),
    ToggleHelp,
    Notify(Notification),
    /// 4 Hz heartbeat for spinner animation and toast expiry.
    Tick,

    // ── Fetch lifecycle (seq-fenced, one per entity) ─────────────────
    OrdersLoaded {
        seq: FetchSeq,
        result: Result<Vec<Order>, String>,
    },
    RoomsLoaded {
        seq: FetchSeq,
        result: Result<Vec<Room>, String>,
    },
    UsersLoaded {
        seq: FetchSeq,
        result: Result<Vec<User>, String>,
    },
    ProductsLoaded {
        seq: FetchSeq,
        result: Result<Vec<Product>, String>,
    },

    // ── Mutations ────────────────────────────────────────────────────
    /// A create/update/delete/status call finished for `screen`.
    MutationDone {
        screen: ScreenId,
        success: bool,
        message: String,
    },
}
