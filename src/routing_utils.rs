use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_macros::FromRequest;

use serde::Serialize;
use utoipa::openapi::{RefOr, Schema};
use utoipa::{ToSchema, openapi};

use crate::domain::task::driving_ports::TaskError;
use validator::ValidationErrors;

/// Body shape shared by every failed API response
#[derive(Serialize, Debug, ToSchema)]
pub struct BasicErrorResponse {
    pub error_code: String,
    pub error_description: String,
    pub extra_info: Option<ExtraInfo>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(untagged)]
pub enum ExtraInfo {
    ValidationIssues(ValidationErrorSchema),
    Message(String),
}

/// Wraps [ValidationErrors] so it can appear in OpenAPI output, where it is
/// documented as a plain empty object
#[derive(Serialize, Debug)]
#[serde(transparent)]
pub struct ValidationErrorSchema(pub ValidationErrors);

impl<'schem> ToSchema<'schem> for ValidationErrorSchema {
    fn schema() -> (&'schem str, RefOr<Schema>) {
        (
            "ValidationErrorSchema",
            openapi::ObjectBuilder::new().into(),
        )
    }
}

/// Renders a [BasicErrorResponse] with the given status code, which every
/// error-shaped response type below funnels through
fn error_response(
    status: StatusCode,
    error_code: &str,
    error_description: String,
    extra_info: Option<ExtraInfo>,
) -> Response {
    (
        status,
        axum::Json(BasicErrorResponse {
            error_code: error_code.to_owned(),
            error_description,
            extra_info,
        }),
    )
        .into_response()
}

/// Response type that turns task domain failures into [BasicErrorResponse]s.
/// Missing users and tasks answer 400; anything else is a store failure and
/// answers 500 so no request goes unanswered.
pub struct TaskErrorResponse(pub TaskError);

impl IntoResponse for TaskErrorResponse {
    fn into_response(self) -> Response {
        match self.0 {
            TaskError::UserDoesNotExist(user_id) => error_response(
                StatusCode::BAD_REQUEST,
                "user_not_found",
                format!("User with id '{user_id}' doesn't exist."),
                None,
            ),

            TaskError::TaskDoesNotExist(task_id) => error_response(
                StatusCode::BAD_REQUEST,
                "task_not_found",
                format!("Task with id '{task_id}' doesn't exist."),
                None,
            ),

            TaskError::PortError(cause) => GenericErrorResponse(cause).into_response(),
        }
    }
}

impl From<TaskError> for TaskErrorResponse {
    fn from(value: TaskError) -> Self {
        Self(value)
    }
}

/// Response type that turns unclassified store errors into a 500 [BasicErrorResponse]
pub struct GenericErrorResponse(pub anyhow::Error);

impl IntoResponse for GenericErrorResponse {
    fn into_response(self) -> Response {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Could not access data to complete your request.".to_owned(),
            None,
        )
    }
}

/// Response type that turns validation errors into [BasicErrorResponse]s
pub struct ValidationErrorResponse(ValidationErrors);

impl IntoResponse for ValidationErrorResponse {
    fn into_response(self) -> Response {
        error_response(
            StatusCode::BAD_REQUEST,
            "invalid_task",
            "Task definition is invalid.".to_owned(),
            Some(ExtraInfo::ValidationIssues(ValidationErrorSchema(self.0))),
        )
    }
}

impl From<ValidationErrors> for ValidationErrorResponse {
    fn from(value: ValidationErrors) -> Self {
        Self(value)
    }
}

/// [axum::Json] with the rejection swapped out, so malformed request bodies
/// answer with [BasicErrorResponse] like every other failure
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonErrorResponse))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Rejection produced when a request body cannot be parsed as JSON
pub struct JsonErrorResponse {
    parse_problem: String,
}

impl From<JsonRejection> for JsonErrorResponse {
    fn from(value: JsonRejection) -> Self {
        JsonErrorResponse {
            parse_problem: value.body_text(),
        }
    }
}

impl IntoResponse for JsonErrorResponse {
    fn into_response(self) -> Response {
        error_response(
            StatusCode::BAD_REQUEST,
            "parse_error",
            "Arguments could not be parsed, make sure request is valid.".to_owned(),
            Some(ExtraInfo::Message(self.parse_problem)),
        )
    }
}
