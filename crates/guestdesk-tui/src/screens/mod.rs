//! Screen registry: one list page per admin entity.

pub mod common;
pub mod orders;
pub mod products;
pub mod rooms;
pub mod users;

use std::sync::Arc;

use guestdesk_core::AdminService;

use crate::component::Component;
use crate::screen::ScreenId;

/// Instantiate every screen against the shared service handle.
pub fn create_screens(service: &Arc<AdminService>) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Orders,
            Box::new(orders::OrdersScreen::new(Arc::clone(service))),
        ),
        (
            ScreenId::Rooms,
            Box::new(rooms::RoomsScreen::new(Arc::clone(service))),
        ),
        (
            ScreenId::Users,
            Box::new(users::UsersScreen::new(Arc::clone(service))),
        ),
        (
            ScreenId::Products,
            Box::new(products::ProductsScreen::new(Arc::clone(service))),
        ),
    ]
}
