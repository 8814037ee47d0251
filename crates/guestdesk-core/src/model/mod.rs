//! Domain model: one module per admin entity, plus the shared code sets.

mod order;
mod product;
mod room;
mod status;
mod user;

pub use order::{CustomerSummary, Order, OrderItem};
pub use product::{Category, Product};
pub use room::Room;
pub use status::{OrderStatus, RoomCategory, UserRole, UserStatus};
pub use user::User;
