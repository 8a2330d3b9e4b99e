use crate::dto;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Task List API",
    description = "A per-user to-do task list API backed by a document store"
))]
struct TaskListApi;

/// Builds the route serving the swagger UI and the OpenAPI schema behind it,
/// merging the definitions contributed by the [dto] package and the submodules
/// of [api][crate::api]
pub fn build_documentation() -> SwaggerUi {
    let mut api_docs = TaskListApi::openapi();
    api_docs.merge(dto::OpenApiSchemas::openapi());
    api_docs.merge(super::user::UsersApi::openapi());
    api_docs.merge(super::task::TasksApi::openapi());

    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_docs)
}
