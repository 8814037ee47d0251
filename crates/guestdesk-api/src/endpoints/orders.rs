//! Order endpoints.
//!
//! Orders originate from customers; the admin surface only lists,
//! inspects, transitions status, and deletes.

use crate::Error;
use crate::client::ApiClient;
use crate::params::ListParams;
use crate::types::{ListBody, OrderDto, PageOf, StatusUpdate};

impl ApiClient {
    /// `GET /admin/orders/` — staff view over every customer's orders.
    pub async fn list_orders(&self, params: &ListParams) -> Result<PageOf<OrderDto>, Error> {
        let body: ListBody<OrderDto> = self
            .get_with_params("admin/orders/", &params.to_query())
            .await?;
        Ok(body.into())
    }

    /// `GET /orders/{id}/` — full detail including line items.
    pub async fn get_order(&self, id: i64) -> Result<OrderDto, Error> {
        self.get(&format!("orders/{id}/")).await
    }

    /// `PATCH /orders/{id}/status/` — transition the status code.
    pub async fn update_order_status(&self, id: i64, status: &str) -> Result<OrderDto, Error> {
        self.patch(
            &format!("orders/{id}/status/"),
            &StatusUpdate {
                status: status.to_owned(),
            },
        )
        .await
    }

    /// `DELETE /orders/{id}/`.
    pub async fn delete_order(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("orders/{id}/")).await
    }
}
