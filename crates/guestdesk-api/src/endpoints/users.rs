//! Staff user endpoints.

use crate::Error;
use crate::client::ApiClient;
use crate::params::ListParams;
use crate::types::{ListBody, NewUser, PageOf, PasswordReset, UserDto, UserPatch};

impl ApiClient {
    /// `GET /users/`.
    pub async fn list_users(&self, params: &ListParams) -> Result<PageOf<UserDto>, Error> {
        let body: ListBody<UserDto> = self.get_with_params("users/", &params.to_query()).await?;
        Ok(body.into())
    }

    /// `GET /users/{id}/`.
    pub async fn get_user(&self, id: i64) -> Result<UserDto, Error> {
        self.get(&format!("users/{id}/")).await
    }

    /// `POST /users/`.
    pub async fn create_user(&self, user: &NewUser) -> Result<UserDto, Error> {
        self.post("users/", user).await
    }

    /// `PATCH /users/{id}/`.
    pub async fn update_user(&self, id: i64, patch: &UserPatch) -> Result<UserDto, Error> {
        self.patch(&format!("users/{id}/"), patch).await
    }

    /// `DELETE /users/{id}/`.
    pub async fn delete_user(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("users/{id}/")).await
    }

    /// `POST /users/{id}/reset-password/`.
    pub async fn reset_password(&self, id: i64, new_password: &str) -> Result<(), Error> {
        self.post_no_response(
            &format!("users/{id}/reset-password/"),
            &PasswordReset {
                new_password: new_password.to_owned(),
                confirm_password: new_password.to_owned(),
            },
        )
        .await
    }
}
