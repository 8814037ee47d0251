//! Product endpoints.

use crate::Error;
use crate::client::ApiClient;
use crate::params::ListParams;
use crate::types::{ListBody, NewProduct, PageOf, ProductDto, ProductPatch};

impl ApiClient {
    /// `GET /products/`.
    pub async fn list_products(&self, params: &ListParams) -> Result<PageOf<ProductDto>, Error> {
        let body: ListBody<ProductDto> =
            self.get_with_params("products/", &params.to_query()).await?;
        Ok(body.into())
    }

    /// `GET /products/{id}/`.
    pub async fn get_product(&self, id: i64) -> Result<ProductDto, Error> {
        self.get(&format!("products/{id}/")).await
    }

    /// `POST /products/`.
    pub async fn create_product(&self, product: &NewProduct) -> Result<ProductDto, Error> {
        self.post("products/", product).await
    }

    /// `PATCH /products/{id}/`.
    pub async fn update_product(&self, id: i64, patch: &ProductPatch) -> Result<ProductDto, Error> {
        self.patch(&format!("products/{id}/"), patch).await
    }

    /// `DELETE /products/{id}/`.
    pub async fn delete_product(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("products/{id}/")).await
    }
}
