//! Room endpoints.

use crate::Error;
use crate::client::ApiClient;
use crate::params::ListParams;
use crate::types::{ListBody, NewRoom, PageOf, RoomDto, RoomPatch};

impl ApiClient {
    /// `GET /rooms/`.
    pub async fn list_rooms(&self, params: &ListParams) -> Result<PageOf<RoomDto>, Error> {
        let body: ListBody<RoomDto> = self.get_with_params("rooms/", &params.to_query()).await?;
        Ok(body.into())
    }

    /// `GET /rooms/{id}/`.
    pub async fn get_room(&self, id: i64) -> Result<RoomDto, Error> {
        self.get(&format!("rooms/{id}/")).await
    }

    /// `POST /rooms/`.
    pub async fn create_room(&self, room: &NewRoom) -> Result<RoomDto, Error> {
        self.post("rooms/", room).await
    }

    /// `PATCH /rooms/{id}/`.
    pub async fn update_room(&self, id: i64, patch: &RoomPatch) -> Result<RoomDto, Error> {
        self.patch(&format!("rooms/{id}/"), patch).await
    }

    /// `DELETE /rooms/{id}/`.
    pub async fn delete_room(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("rooms/{id}/")).await
    }
}
