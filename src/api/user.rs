use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{GenericErrorResponse, Json};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::State;
use axum::response::ErrorResponse;
use axum::routing::post;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;

/// Defines the OpenAPI documentation for the user API
#[derive(OpenApi)]
#[openapi(paths(create_user))]
pub struct UsersApi;

/// Constant used to group user endpoints in OpenAPI documentation
pub const USER_API_GROUP: &str = "Users";

/// Builds a router for all the user routes
pub fn user_routes() -> Router<Arc<SharedData>> {
    Router::new().route(
        "/users",
        post(|State(app_data): AppState| async move {
            let mut ext_cxn = app_data.ext_cxn.clone();
            let user_service = domain::user::UserService {};

            create_user(&mut ext_cxn, &user_service).await
        }),
    )
}

#[utoipa::path(
    post,
    path = "/users",
    tag = USER_API_GROUP,
    responses(
        (status = 200, description = "User successfully created", body = dto::InsertedUser),
        (status = 500, description = "The document store could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Creates a user with a fresh ID and an empty task list.
async fn create_user(
    ext_cxn: &mut impl ExternalConnectivity,
    user_service: &impl domain::user::driving_ports::UserPort,
) -> Result<Json<dto::InsertedUser>, ErrorResponse> {
    info!("Attempt to create user");
    let user_writer = persistence::db_user_driven_ports::DbWriteUsers;

    let creation_result = user_service.create_user(&mut *ext_cxn, &user_writer).await;
    if creation_result.is_err() {
        error!(
            "User create failure: {}",
            creation_result.as_ref().unwrap_err()
        );
    }
    let new_user_id = creation_result.map_err(GenericErrorResponse)?;

    Ok(Json(dto::InsertedUser { id: new_user_id }))
}
