//! Product-category endpoints (supporting resource for products).

use crate::Error;
use crate::client::ApiClient;
use crate::types::{CategoryDto, ListBody, NewCategory, PageOf};

impl ApiClient {
    /// `GET /categories/` — the category catalogue is small; no params.
    pub async fn list_categories(&self) -> Result<PageOf<CategoryDto>, Error> {
        let body: ListBody<CategoryDto> = self.get("categories/").await?;
        Ok(body.into())
    }

    /// `POST /categories/`.
    pub async fn create_category(&self, category: &NewCategory) -> Result<CategoryDto, Error> {
        self.post("categories/", category).await
    }

    /// `DELETE /categories/{id}/`.
    pub async fn delete_category(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("categories/{id}/")).await
    }
}
