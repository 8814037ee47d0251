//! Modal form drafts: editable string fields plus a field-error map.
//!
//! A form is created blank on "add" or pre-populated on "edit", validated
//! on submit, and converted into an api payload only once validation has
//! passed. All fields are kept as entered text so a bad value round-trips
//! back to the operator exactly as typed.

use rust_decimal::Decimal;

use guestdesk_api::types::{NewProduct, NewRoom, NewUser, ProductPatch, RoomPatch, UserPatch};

use crate::modal::FormDraft;
use crate::model::{Product, Room, RoomCategory, User, UserRole, UserStatus};
use crate::validate::{
    FieldErrors, non_negative_int, positive_decimal, positive_int, present, valid_email,
};

// ── Staff user form ──────────────────────────────────────────────────

/// Draft of a staff account's editable fields.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub password: String,
    pub password_confirm: String,
    /// Edit mode skips password validation unless one was entered.
    pub is_edit: bool,
    pub errors: FieldErrors,
}

impl UserForm {
    pub fn blank() -> Self {
        Self {
            role: UserRole::Staff,
            status: UserStatus::Active,
            ..Self::default()
        }
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role.clone(),
            status: user.status.clone(),
            is_edit: true,
            ..Self::default()
        }
    }

    /// Payload for `POST /users/`. Call only after a passing `validate`.
    pub fn to_create(&self) -> NewUser {
        NewUser {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            role: self.role.as_code().to_owned(),
            password: self.password.clone(),
        }
    }

    /// Payload for `PATCH /users/{id}/`.
    pub fn to_patch(&self) -> UserPatch {
        UserPatch {
            name: Some(self.name.trim().to_owned()),
            phone: Some(self.phone.trim().to_owned()),
            role: Some(self.role.as_code().to_owned()),
            status: Some(self.status.as_code().to_owned()),
        }
    }
}

impl FormDraft for UserForm {
    fn validate(&mut self) -> bool {
        self.errors.clear();
        if !present(&self.name) {
            self.errors.insert("name", "Name is required");
        }
        if !present(&self.email) {
            self.errors.insert("email", "Email is required");
        } else if !valid_email(&self.email) {
            self.errors.insert("email", "Please enter a valid email");
        }
        if !present(&self.phone) {
            self.errors.insert("phone", "Phone is required");
        }

        let password_expected = !self.is_edit || !self.password.is_empty();
        if password_expected {
            if self.password.is_empty() {
                self.errors.insert("password", "Password is required");
            } else if self.password.len() < 8 {
                self.errors
                    .insert("password", "Password must be at least 8 characters");
            }
            if self.password != self.password_confirm {
                self.errors
                    .insert("password_confirm", "Passwords do not match");
            }
        }
        self.errors.is_empty()
    }

    fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}

// ── Room form ────────────────────────────────────────────────────────

/// Draft of a room's editable fields.
#[derive(Debug, Clone, Default)]
pub struct RoomForm {
    pub room_code: String,
    pub category: RoomCategory,
    pub price_per_night: String,
    pub capacity: String,
    pub description: String,
    pub is_active: bool,
    pub errors: FieldErrors,
}

impl RoomForm {
    pub fn blank() -> Self {
        Self {
            capacity: "1".into(),
            is_active: true,
            ..Self::default()
        }
    }

    pub fn from_room(room: &Room) -> Self {
        Self {
            room_code: room.room_code.clone(),
            category: room.category.clone(),
            price_per_night: room.price_per_night.to_string(),
            capacity: room.capacity.to_string(),
            description: room.description.clone().unwrap_or_default(),
            is_active: room.is_active,
            errors: FieldErrors::new(),
        }
    }

    fn parsed_price(&self) -> Option<Decimal> {
        positive_decimal(&self.price_per_night)
    }

    /// Payload for `POST /rooms/`. Call only after a passing `validate`.
    pub fn to_create(&self) -> NewRoom {
        NewRoom {
            room_code: self.room_code.trim().to_owned(),
            categories: self.category.as_code().to_owned(),
            price_per_night: self.parsed_price().unwrap_or_default(),
            capacity: positive_int(&self.capacity).unwrap_or(1),
            description: present(&self.description).then(|| self.description.trim().to_owned()),
            is_active: self.is_active,
        }
    }

    /// Payload for `PATCH /rooms/{id}/`.
    pub fn to_patch(&self) -> RoomPatch {
        RoomPatch {
            room_code: Some(self.room_code.trim().to_owned()),
            categories: Some(self.category.as_code().to_owned()),
            price_per_night: self.parsed_price(),
            capacity: positive_int(&self.capacity),
            description: Some(self.description.trim().to_owned()),
            is_active: Some(self.is_active),
            reserved: None,
        }
    }
}

impl FormDraft for RoomForm {
    fn validate(&mut self) -> bool {
        self.errors.clear();
        if !present(&self.room_code) {
            self.errors.insert("room_code", "Room code is required");
        }
        if !present(&self.price_per_night) {
            self.errors
                .insert("price_per_night", "Price per night is required");
        } else if self.parsed_price().is_none() {
            self.errors
                .insert("price_per_night", "Please enter a valid price");
        }
        if !present(&self.capacity) {
            self.errors.insert("capacity", "Capacity is required");
        } else if positive_int(&self.capacity).is_none() {
            self.errors
                .insert("capacity", "Please enter a valid capacity");
        }
        self.errors.is_empty()
    }

    fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}

// ── Product form ─────────────────────────────────────────────────────

/// Draft of a product's editable fields.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub cost: String,
    pub price: String,
    pub quantity: String,
    pub description: String,
    pub category_ids: Vec<i64>,
    pub is_active: bool,
    pub errors: FieldErrors,
}

impl ProductForm {
    pub fn blank() -> Self {
        Self {
            quantity: "0".into(),
            is_active: true,
            ..Self::default()
        }
    }

    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            cost: product.cost.to_string(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
            description: product.description.clone().unwrap_or_default(),
            category_ids: product.categories.iter().map(|c| c.id).collect(),
            is_active: product.is_active,
            errors: FieldErrors::new(),
        }
    }

    /// Payload for `POST /products/`. Call only after a passing `validate`.
    pub fn to_create(&self) -> NewProduct {
        NewProduct {
            name: self.name.trim().to_owned(),
            cost: positive_decimal(&self.cost).unwrap_or_default(),
            price: positive_decimal(&self.price).unwrap_or_default(),
            quantity: non_negative_int(&self.quantity).unwrap_or(0),
            description: present(&self.description).then(|| self.description.trim().to_owned()),
            category_ids: self.category_ids.clone(),
            is_active: self.is_active,
        }
    }

    /// Payload for `PATCH /products/{id}/`.
    pub fn to_patch(&self) -> ProductPatch {
        ProductPatch {
            name: Some(self.name.trim().to_owned()),
            cost: positive_decimal(&self.cost),
            price: positive_decimal(&self.price),
            quantity: non_negative_int(&self.quantity),
            description: Some(self.description.trim().to_owned()),
            category_ids: Some(self.category_ids.clone()),
            is_active: Some(self.is_active),
        }
    }
}

impl FormDraft for ProductForm {
    fn validate(&mut self) -> bool {
        self.errors.clear();
        if !present(&self.name) {
            self.errors.insert("name", "Product name is required");
        }
        if positive_decimal(&self.cost).is_none() {
            self.errors.insert("cost", "Valid cost is required");
        }
        if positive_decimal(&self.price).is_none() {
            self.errors.insert("price", "Valid price is required");
        }
        if non_negative_int(&self.quantity).is_none() {
            self.errors.insert("quantity", "Valid quantity is required");
        }
        self.errors.is_empty()
    }

    fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_form_rejects_negative_cost() {
        let mut form = ProductForm {
            name: "Towel Set".into(),
            cost: "-5".into(),
            price: "12.00".into(),
            quantity: "3".into(),
            ..ProductForm::blank()
        };
        assert!(!form.validate());
        assert_eq!(form.errors.get("cost"), Some("Valid cost is required"));
        assert!(form.errors.get("price").is_none());
    }

    #[test]
    fn product_form_accepts_zero_quantity() {
        let mut form = ProductForm {
            name: "Towel Set".into(),
            cost: "5".into(),
            price: "12.00".into(),
            quantity: "0".into(),
            ..ProductForm::blank()
        };
        assert!(form.validate());
        let payload = form.to_create();
        assert_eq!(payload.quantity, 0);
        assert_eq!(payload.price.to_string(), "12.00");
    }

    #[test]
    fn user_form_requires_matching_passwords_on_create() {
        let mut form = UserForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: "0123456".into(),
            password: "longenough".into(),
            password_confirm: "different".into(),
            ..UserForm::blank()
        };
        assert!(!form.validate());
        assert_eq!(
            form.errors.get("password_confirm"),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn user_form_edit_skips_blank_password() {
        let mut form = UserForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: "0123456".into(),
            is_edit: true,
            ..UserForm::default()
        };
        assert!(form.validate(), "{:?}", form.errors);
    }

    #[test]
    fn room_form_messages_match_the_admin_ui() {
        let mut form = RoomForm::blank();
        form.capacity = "zero".into();
        assert!(!form.validate());
        assert_eq!(form.errors.get("room_code"), Some("Room code is required"));
        assert_eq!(
            form.errors.get("price_per_night"),
            Some("Price per night is required")
        );
        assert_eq!(
            form.errors.get("capacity"),
            Some("Please enter a valid capacity")
        );
    }
}
