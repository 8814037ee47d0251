//! Typed service facade over the REST client.
//!
//! Both front-ends talk to the backend exclusively through this type: it
//! renders queries into wire params, converts wire DTOs into domain
//! models, and maps api errors to [`CoreError`] diagnostics. No retries
//! live here — retry is always a user action in the UIs.

use chrono::Utc;
use tracing::instrument;

use guestdesk_api::types::NewCategory;
use guestdesk_api::ApiClient;

use crate::error::CoreError;
use crate::forms::{ProductForm, RoomForm, UserForm};
use crate::model::{Category, Order, OrderStatus, Product, Room, User};
use crate::query::ListQuery;

/// Admin operations against the guest-management backend.
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    // ── Orders ───────────────────────────────────────────────────────

    /// Fetch the order collection narrowed by `query`'s criteria.
    #[instrument(skip_all)]
    pub async fn orders(&self, query: &ListQuery) -> Result<Vec<Order>, CoreError> {
        let page = self.api.list_orders(&query.to_params(Utc::now())).await?;
        Ok(page.items.into_iter().map(Order::from).collect())
    }

    pub async fn order(&self, id: i64) -> Result<Order, CoreError> {
        self.api
            .get_order(id)
            .await
            .map(Order::from)
            .map_err(|e| CoreError::from_api(e, "order", id))
    }

    pub async fn set_order_status(
        &self,
        id: i64,
        status: &OrderStatus,
    ) -> Result<Order, CoreError> {
        self.api
            .update_order_status(id, status.as_code())
            .await
            .map(Order::from)
            .map_err(|e| CoreError::from_api(e, "order", id))
    }

    pub async fn delete_order(&self, id: i64) -> Result<(), CoreError> {
        self.api
            .delete_order(id)
            .await
            .map_err(|e| CoreError::from_api(e, "order", id))
    }

    // ── Rooms ────────────────────────────────────────────────────────

    #[instrument(skip_all)]
    pub async fn rooms(&self, query: &ListQuery) -> Result<Vec<Room>, CoreError> {
        let page = self.api.list_rooms(&query.to_params(Utc::now())).await?;
        Ok(page.items.into_iter().map(Room::from).collect())
    }

    pub async fn room(&self, id: i64) -> Result<Room, CoreError> {
        self.api
            .get_room(id)
            .await
            .map(Room::from)
            .map_err(|e| CoreError::from_api(e, "room", id))
    }

    /// Create a room from a validated form.
    pub async fn create_room(&self, form: &RoomForm) -> Result<Room, CoreError> {
        Ok(self.api.create_room(&form.to_create()).await.map(Room::from)?)
    }

    pub async fn update_room(&self, id: i64, form: &RoomForm) -> Result<Room, CoreError> {
        self.api
            .update_room(id, &form.to_patch())
            .await
            .map(Room::from)
            .map_err(|e| CoreError::from_api(e, "room", id))
    }

    pub async fn delete_room(&self, id: i64) -> Result<(), CoreError> {
        self.api
            .delete_room(id)
            .await
            .map_err(|e| CoreError::from_api(e, "room", id))
    }

    // ── Staff users ──────────────────────────────────────────────────

    #[instrument(skip_all)]
    pub async fn users(&self, query: &ListQuery) -> Result<Vec<User>, CoreError> {
        let page = self.api.list_users(&query.to_params(Utc::now())).await?;
        Ok(page.items.into_iter().map(User::from).collect())
    }

    pub async fn user(&self, id: i64) -> Result<User, CoreError> {
        self.api
            .get_user(id)
            .await
            .map(User::from)
            .map_err(|e| CoreError::from_api(e, "user", id))
    }

    /// Create a staff account from a validated form.
    pub async fn create_user(&self, form: &UserForm) -> Result<User, CoreError> {
        Ok(self.api.create_user(&form.to_create()).await.map(User::from)?)
    }

    pub async fn update_user(&self, id: i64, form: &UserForm) -> Result<User, CoreError> {
        self.api
            .update_user(id, &form.to_patch())
            .await
            .map(User::from)
            .map_err(|e| CoreError::from_api(e, "user", id))
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), CoreError> {
        self.api
            .delete_user(id)
            .await
            .map_err(|e| CoreError::from_api(e, "user", id))
    }

    pub async fn reset_password(&self, id: i64, new_password: &str) -> Result<(), CoreError> {
        self.api
            .reset_password(id, new_password)
            .await
            .map_err(|e| CoreError::from_api(e, "user", id))
    }

    // ── Products & categories ────────────────────────────────────────

    #[instrument(skip_all)]
    pub async fn products(&self, query: &ListQuery) -> Result<Vec<Product>, CoreError> {
        let page = self.api.list_products(&query.to_params(Utc::now())).await?;
        Ok(page.items.into_iter().map(Product::from).collect())
    }

    pub async fn product(&self, id: i64) -> Result<Product, CoreError> {
        self.api
            .get_product(id)
            .await
            .map(Product::from)
            .map_err(|e| CoreError::from_api(e, "product", id))
    }

    /// Create a product from a validated form.
    pub async fn create_product(&self, form: &ProductForm) -> Result<Product, CoreError> {
        Ok(self
            .api
            .create_product(&form.to_create())
            .await
            .map(Product::from)?)
    }

    pub async fn update_product(&self, id: i64, form: &ProductForm) -> Result<Product, CoreError> {
        self.api
            .update_product(id, &form.to_patch())
            .await
            .map(Product::from)
            .map_err(|e| CoreError::from_api(e, "product", id))
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), CoreError> {
        self.api
            .delete_product(id)
            .await
            .map_err(|e| CoreError::from_api(e, "product", id))
    }

    pub async fn categories(&self) -> Result<Vec<Category>, CoreError> {
        let page = self.api.list_categories().await?;
        Ok(page.items.into_iter().map(Category::from).collect())
    }

    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, CoreError> {
        Ok(self
            .api
            .create_category(&NewCategory {
                name: name.to_owned(),
                description: description.map(str::to_owned),
            })
            .await
            .map(Category::from)?)
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), CoreError> {
        self.api
            .delete_category(id)
            .await
            .map_err(|e| CoreError::from_api(e, "category", id))
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Best-effort server-side logout.
    pub async fn logout(&self) -> Result<(), CoreError> {
        Ok(self.api.logout().await?)
    }
}
