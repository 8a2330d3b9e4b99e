use crate::domain;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// DTO for creating a new task via the API
#[derive(Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct NewTask {
    /// Label shown in the user's task list
    #[validate(required, length(min = 1))]
    #[schema(example = "buy milk")]
    pub name: Option<String>,
}

impl From<NewTask> for domain::task::NewTask {
    fn from(value: NewTask) -> Self {
        domain::task::NewTask {
            // `required` validation runs before this conversion, so the field is present
            name: value.name.unwrap_or_default(),
        }
    }
}

/// DTO for updating a task's label via the API
#[derive(Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct UpdateTask {
    #[validate(required, length(min = 1))]
    #[schema(example = "buy bread")]
    pub name: Option<String>,
}

impl From<UpdateTask> for domain::task::UpdateTask {
    fn from(value: UpdateTask) -> Self {
        domain::task::UpdateTask {
            name: value.name.unwrap_or_default(),
        }
    }
}

/// DTO for a returned task on the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct TaskEntry {
    #[serde(rename = "taskID")]
    #[schema(example = "ab9f4f33-5749-4f5c-8217-4b676ae161a4")]
    pub task_id: String,
    #[schema(example = "buy milk")]
    pub name: String,
}

impl From<domain::task::Task> for TaskEntry {
    fn from(value: domain::task::Task) -> Self {
        TaskEntry {
            task_id: value.id,
            name: value.name,
        }
    }
}

/// DTO wrapping the full set of tasks a user owns, in list display order
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct TaskListResponse {
    #[serde(rename = "userTasks")]
    pub user_tasks: Vec<TaskEntry>,
}
