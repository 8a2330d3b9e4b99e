use crate::domain;
use crate::domain::task::driven_ports::TaskListWriter;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use uuid::Uuid;

/// A single to-do item embedded in a user's document.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Task {
    pub id: String,
    pub name: String,
}

#[cfg_attr(test, derive(Clone))]
pub struct NewTask {
    pub name: String,
}

#[cfg_attr(test, derive(Clone))]
pub struct UpdateTask {
    pub name: String,
}

pub mod driven_ports {
    use super::*;

    pub trait TaskListWriter: Sync {
        /// Overwrites the full embedded task sequence of a user's document.
        async fn replace_task_list(
            &self,
            user_id: &str,
            tasks: &[Task],
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TaskError {
        #[error("user with ID {0} does not exist")]
        UserDoesNotExist(String),
        #[error("task with ID {0} does not exist")]
        TaskDoesNotExist(String),
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }

    impl From<domain::user::UserExistsErr> for TaskError {
        fn from(value: domain::user::UserExistsErr) -> Self {
            match value {
                domain::user::UserExistsErr::UserDoesNotExist(user_id) => {
                    TaskError::UserDoesNotExist(user_id)
                }
                domain::user::UserExistsErr::PortError(err) => {
                    TaskError::from(err.context("looking up a user's task list"))
                }
            }
        }
    }

    pub trait TaskPort {
        async fn tasks_for_user(
            &self,
            user_id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
            user_read: &impl domain::user::driven_ports::UserReader,
        ) -> Result<Vec<Task>, TaskError>;
        async fn add_task(
            &self,
            user_id: &str,
            new_task: &NewTask,
            ext_cxn: &mut impl ExternalConnectivity,
            user_read: &impl domain::user::driven_ports::UserReader,
            list_write: &impl driven_ports::TaskListWriter,
        ) -> Result<Task, TaskError>;
        async fn edit_task(
            &self,
            user_id: &str,
            task_id: &str,
            update: &UpdateTask,
            ext_cxn: &mut impl ExternalConnectivity,
            user_read: &impl domain::user::driven_ports::UserReader,
            list_write: &impl driven_ports::TaskListWriter,
        ) -> Result<Task, TaskError>;
        async fn delete_task(
            &self,
            user_id: &str,
            task_id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
            user_read: &impl domain::user::driven_ports::UserReader,
            list_write: &impl driven_ports::TaskListWriter,
        ) -> Result<(), TaskError>;
    }
}


pub struct TaskService {}

impl driving_ports::TaskPort for TaskService {
    /// Returns a user's tasks in stored order.
    async fn tasks_for_user(
        &self,
        user_id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
        user_read: &impl domain::user::driven_ports::UserReader,
    ) -> Result<Vec<Task>, driving_ports::TaskError> {
        let user = domain::user::fetch_user(user_id, &mut *ext_cxn, user_read).await?;

        Ok(user.tasks)
    }

    /// Appends a new task with a freshly generated ID to the end of a user's
    /// list. Retrying an add produces a duplicate task rather than deduplicating.
    async fn add_task(
        &self,
        user_id: &str,
        new_task: &NewTask,
        ext_cxn: &mut impl ExternalConnectivity,
        user_read: &impl domain::user::driven_ports::UserReader,
        list_write: &impl TaskListWriter,
    ) -> Result<Task, driving_ports::TaskError> {
        let mut user = domain::user::fetch_user(user_id, &mut *ext_cxn, user_read).await?;

        let created_task = Task {
            id: Uuid::new_v4().to_string(),
            name: new_task.name.clone(),
        };
        user.tasks.push(created_task.clone());
        list_write
            .replace_task_list(user_id, &user.tasks, &mut *ext_cxn)
            .await
            .context("appending a new task")?;

        Ok(created_task)
    }

    /// Renames a task in place. The scan covers the whole sequence rather than
    /// stopping at the first hit, so if the stored list ever carries duplicate
    /// IDs every matching entry gets the new name.
    async fn edit_task(
        &self,
        user_id: &str,
        task_id: &str,
        update: &UpdateTask,
        ext_cxn: &mut impl ExternalConnectivity,
        user_read: &impl domain::user::driven_ports::UserReader,
        list_write: &impl TaskListWriter,
    ) -> Result<Task, driving_ports::TaskError> {
        let mut user = domain::user::fetch_user(user_id, &mut *ext_cxn, user_read).await?;

        let mut found_match = false;
        for task in user.tasks.iter_mut() {
            if task.id == task_id {
                task.name = update.name.clone();
                found_match = true;
            }
        }
        if !found_match {
            return Err(driving_ports::TaskError::TaskDoesNotExist(
                task_id.to_owned(),
            ));
        }

        list_write
            .replace_task_list(user_id, &user.tasks, &mut *ext_cxn)
            .await
            .context("updating a task")?;

        Ok(Task {
            id: task_id.to_owned(),
            name: update.name.clone(),
        })
    }

    /// Removes the first task in the sequence matching the given ID. A second
    /// delete of the same ID fails, so the operation is not retry-idempotent.
    async fn delete_task(
        &self,
        user_id: &str,
        task_id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
        user_read: &impl domain::user::driven_ports::UserReader,
        list_write: &impl TaskListWriter,
    ) -> Result<(), driving_ports::TaskError> {
        let mut user = domain::user::fetch_user(user_id, &mut *ext_cxn, user_read).await?;

        let matching_index = user.tasks.iter().position(|task| task.id == task_id);
        let Some(task_index) = matching_index else {
            return Err(driving_ports::TaskError::TaskDoesNotExist(
                task_id.to_owned(),
            ));
        };
        user.tasks.remove(task_index);

        list_write
            .replace_task_list(user_id, &user.tasks, &mut *ext_cxn)
            .await
            .context("removing a task")?;

        Ok(())
    }
}
