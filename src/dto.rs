use utoipa::OpenApi;

pub mod task;
pub mod user;

pub use task::{NewTask, TaskEntry, TaskListResponse, UpdateTask};
pub use user::InsertedUser;

/// Gathers the DTO schemas shared across API modules for OpenAPI documentation
#[derive(OpenApi)]
#[openapi(components(schemas(
    user::InsertedUser,
    task::NewTask,
    task::UpdateTask,
    task::TaskEntry,
    task::TaskListResponse,
    crate::routing_utils::BasicErrorResponse,
    crate::routing_utils::ExtraInfo,
    crate::routing_utils::ValidationErrorSchema,
)))]
pub struct OpenApiSchemas;
