// guestdesk-api: Async Rust client for the guest-management REST backend

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod params;
pub mod transport;
pub mod types;

pub use auth::AuthSession;
pub use client::ApiClient;
pub use error::Error;
pub use params::ListParams;
pub use transport::TransportConfig;
pub use types::PageOf;
