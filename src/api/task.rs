use crate::domain::task::driving_ports::TaskError;
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{Json, TaskErrorResponse, ValidationErrorResponse};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{delete, get, post, put};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;
use validator::Validate;

/// Defines the OpenAPI documentation for the task API
#[derive(OpenApi)]
#[openapi(paths(list_tasks, add_task, edit_task, delete_task))]
pub struct TasksApi;

/// Constant used to group task endpoints in OpenAPI documentation
pub const TASK_API_GROUP: &str = "Tasks";

/// Builds a router for the task routes living under a user's ID
pub fn task_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/:user_id/tasks",
            get(
                |State(app_data): AppState, Path(user_id): Path<String>| async move {
                    let mut ext_cxn = app_data.ext_cxn.clone();
                    let task_service = domain::task::TaskService {};

                    list_tasks(&user_id, &mut ext_cxn, &task_service).await
                },
            ),
        )
        .route(
            "/:user_id/tasks",
            post(
                |State(app_data): AppState,
                 Path(user_id): Path<String>,
                 Json(new_task): Json<dto::NewTask>| async move {
                    let mut ext_cxn = app_data.ext_cxn.clone();
                    let task_service = domain::task::TaskService {};

                    add_task(&user_id, new_task, &mut ext_cxn, &task_service).await
                },
            ),
        )
        .route(
            "/:user_id/tasks/:task_id",
            put(
                |State(app_data): AppState,
                 Path(path): Path<TaskPath>,
                 Json(update): Json<dto::UpdateTask>| async move {
                    let mut ext_cxn = app_data.ext_cxn.clone();
                    let task_service = domain::task::TaskService {};

                    edit_task(
                        &path.user_id,
                        &path.task_id,
                        update,
                        &mut ext_cxn,
                        &task_service,
                    )
                    .await
                },
            ),
        )
        .route(
            "/:user_id/tasks/:task_id",
            delete(
                |State(app_data): AppState, Path(path): Path<TaskPath>| async move {
                    let mut ext_cxn = app_data.ext_cxn.clone();
                    let task_service = domain::task::TaskService {};

                    delete_task(&path.user_id, &path.task_id, &mut ext_cxn, &task_service).await
                },
            ),
        )
}

#[derive(Deserialize)]
struct TaskPath {
    user_id: String,
    task_id: String,
}

/// Store failures get logged server-side at error level. Not-found outcomes are
/// the caller's problem and only show up at info level.
fn log_task_failure(action: &str, task_err: &TaskError) {
    match task_err {
        TaskError::PortError(cause) => error!("Failed to {action}: {cause}"),
        caller_err => info!("Failed to {action}: {caller_err}"),
    }
}

#[utoipa::path(
    get,
    path = "/{user_id}/tasks",
    tag = TASK_API_GROUP,
    params(
        ("user_id" = String, Path, description = "ID of the user owning the task list"),
    ),
    responses(
        (status = 200, description = "The user's tasks in list display order", body = dto::TaskListResponse),
        (status = 400, description = "The user does not exist", body = crate::routing_utils::BasicErrorResponse),
        (status = 500, description = "The document store could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Retrieves the set of tasks owned by a user
async fn list_tasks(
    user_id: &str,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl domain::task::driving_ports::TaskPort,
) -> Result<Json<dto::TaskListResponse>, ErrorResponse> {
    info!("Requested tasks for user {user_id}");
    let user_reader = persistence::db_user_driven_ports::DbReadUsers;

    let tasks_result = task_service
        .tasks_for_user(user_id, &mut *ext_cxn, &user_reader)
        .await;
    if let Err(ref task_err) = tasks_result {
        log_task_failure("list tasks", task_err);
    }
    let tasks = tasks_result.map_err(TaskErrorResponse)?;

    Ok(Json(dto::TaskListResponse {
        user_tasks: tasks.into_iter().map(dto::TaskEntry::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/{user_id}/tasks",
    tag = TASK_API_GROUP,
    params(
        ("user_id" = String, Path, description = "ID of the user owning the task list"),
    ),
    request_body = dto::NewTask,
    responses(
        (status = 200, description = "The created task", body = dto::TaskEntry),
        (status = 400, description = "The user does not exist or the task definition is invalid", body = crate::routing_utils::BasicErrorResponse),
        (status = 500, description = "The document store could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Appends a new task to the end of a user's list
async fn add_task(
    user_id: &str,
    new_task: dto::NewTask,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl domain::task::driving_ports::TaskPort,
) -> Result<Json<dto::TaskEntry>, ErrorResponse> {
    info!("Adding task for user {user_id}");
    new_task.validate().map_err(ValidationErrorResponse::from)?;

    let user_reader = persistence::db_user_driven_ports::DbReadUsers;
    let list_writer = persistence::db_task_driven_ports::DbTaskListWriter;
    let task_to_add = domain::task::NewTask::from(new_task);

    let add_result = task_service
        .add_task(
            user_id,
            &task_to_add,
            &mut *ext_cxn,
            &user_reader,
            &list_writer,
        )
        .await;
    if let Err(ref task_err) = add_result {
        log_task_failure("add task", task_err);
    }
    let created_task = add_result.map_err(TaskErrorResponse)?;

    Ok(Json(dto::TaskEntry::from(created_task)))
}

#[utoipa::path(
    put,
    path = "/{user_id}/tasks/{task_id}",
    tag = TASK_API_GROUP,
    params(
        ("user_id" = String, Path, description = "ID of the user owning the task list"),
        ("task_id" = String, Path, description = "ID of the task to rename"),
    ),
    request_body = dto::UpdateTask,
    responses(
        (status = 200, description = "The updated task", body = dto::TaskEntry),
        (status = 400, description = "The user or task does not exist, or the task definition is invalid", body = crate::routing_utils::BasicErrorResponse),
        (status = 500, description = "The document store could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Renames a task in a user's list
async fn edit_task(
    user_id: &str,
    task_id: &str,
    update: dto::UpdateTask,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl domain::task::driving_ports::TaskPort,
) -> Result<Json<dto::TaskEntry>, ErrorResponse> {
    info!("Updating task {task_id} for user {user_id}");
    update.validate().map_err(ValidationErrorResponse::from)?;

    let user_reader = persistence::db_user_driven_ports::DbReadUsers;
    let list_writer = persistence::db_task_driven_ports::DbTaskListWriter;
    let task_update = domain::task::UpdateTask::from(update);

    let edit_result = task_service
        .edit_task(
            user_id,
            task_id,
            &task_update,
            &mut *ext_cxn,
            &user_reader,
            &list_writer,
        )
        .await;
    if let Err(ref task_err) = edit_result {
        log_task_failure("edit task", task_err);
    }
    let updated_task = edit_result.map_err(TaskErrorResponse)?;

    Ok(Json(dto::TaskEntry::from(updated_task)))
}

#[utoipa::path(
    delete,
    path = "/{user_id}/tasks/{task_id}",
    tag = TASK_API_GROUP,
    params(
        ("user_id" = String, Path, description = "ID of the user owning the task list"),
        ("task_id" = String, Path, description = "ID of the task to remove"),
    ),
    responses(
        (status = 204, description = "The task was removed"),
        (status = 400, description = "The user or task does not exist", body = crate::routing_utils::BasicErrorResponse),
        (status = 500, description = "The document store could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Removes a task from a user's list
async fn delete_task(
    user_id: &str,
    task_id: &str,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl domain::task::driving_ports::TaskPort,
) -> Result<StatusCode, ErrorResponse> {
    info!("Deleting task {task_id} for user {user_id}");
    let user_reader = persistence::db_user_driven_ports::DbReadUsers;
    let list_writer = persistence::db_task_driven_ports::DbTaskListWriter;

    let delete_result = task_service
        .delete_task(
            user_id,
            task_id,
            &mut *ext_cxn,
            &user_reader,
            &list_writer,
        )
        .await;
    if let Err(ref task_err) = delete_result {
        log_task_failure("delete task", task_err);
    }
    delete_result.map_err(TaskErrorResponse)?;

    Ok(StatusCode::NO_CONTENT)
}
