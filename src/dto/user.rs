use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// DTO containing the ID of a user that was created via the API.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct InsertedUser {
    #[schema(example = "f29a7a33-d1a3-4f10-9fc7-0c0aceb886f7")]
    pub id: String,
}
