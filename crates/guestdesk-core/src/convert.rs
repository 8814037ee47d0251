//! Wire DTO → domain model conversions.
//!
//! The api crate stays faithful to the backend's JSON; this module is
//! where raw codes become typed enums and embedded payloads flatten into
//! what the admin surfaces actually use.

use guestdesk_api::types::{
    CategoryDto, CustomerRef, OrderDto, OrderItemDto, ProductDto, RoomDto, UserDto,
};

use crate::model::{
    Category, CustomerSummary, Order, OrderItem, OrderStatus, Product, Room, RoomCategory, User,
    UserRole, UserStatus,
};

impl From<CustomerRef> for CustomerSummary {
    fn from(c: CustomerRef) -> Self {
        let username = c.username.unwrap_or_default();
        // Fall back to "First Last" when the account has no username.
        let username = if username.is_empty() {
            let full = format!(
                "{} {}",
                c.first_name.unwrap_or_default(),
                c.last_name.unwrap_or_default()
            );
            full.trim().to_owned()
        } else {
            username
        };
        Self {
            username,
            email: c.email.unwrap_or_default(),
        }
    }
}

impl From<OrderItemDto> for OrderItem {
    fn from(item: OrderItemDto) -> Self {
        Self {
            product_name: item
                .product
                .map_or_else(|| "(removed product)".to_owned(), |p| p.name),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        Self {
            id: dto.id,
            order_number: dto.order_number,
            customer: dto.customer.map(CustomerSummary::from).unwrap_or_default(),
            status: OrderStatus::from_code(&dto.status),
            total_amount: dto.total_amount,
            notes: dto.notes.filter(|n| !n.is_empty()),
            items: dto.order_items.into_iter().map(OrderItem::from).collect(),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

impl From<RoomDto> for Room {
    fn from(dto: RoomDto) -> Self {
        Self {
            id: dto.id,
            room_code: dto.room_code,
            category: RoomCategory::from_code(&dto.categories),
            reserved: dto.reserved,
            price_per_night: dto.price_per_night,
            capacity: dto.capacity,
            description: dto.description.filter(|d| !d.is_empty()),
            is_active: dto.is_active,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            user_id: dto.user_id,
            name: dto.name,
            email: dto.email,
            phone: dto.phone.unwrap_or_default(),
            role: UserRole::from_code(&dto.role),
            status: UserStatus::from_code(&dto.status),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description.filter(|d| !d.is_empty()),
        }
    }
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Self {
            id: dto.id,
            product_code: dto.product_code,
            name: dto.name,
            categories: dto.categories.into_iter().map(Category::from).collect(),
            cost: dto.cost,
            price: dto.price,
            quantity: dto.quantity,
            description: dto.description.filter(|d| !d.is_empty()),
            is_active: dto.is_active,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_falls_back_to_full_name() {
        let summary = CustomerSummary::from(CustomerRef {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email: Some("ada@example.com".into()),
            ..CustomerRef::default()
        });
        assert_eq!(summary.username, "Ada Lovelace");
    }

    #[test]
    fn unknown_room_category_is_preserved() {
        let dto: RoomDto = serde_json::from_value(serde_json::json!({
            "id": 1,
            "room_code": "R-9",
            "categories": "X",
            "price_per_night": "10.00",
            "capacity": 1,
            "created_at": "2025-08-01T08:00:00Z",
            "updated_at": "2025-08-01T08:00:00Z"
        }))
        .expect("room dto");
        let room = Room::from(dto);
        assert_eq!(room.category, RoomCategory::Unknown("X".into()));
        assert_eq!(room.category.label(), "X");
    }
}
