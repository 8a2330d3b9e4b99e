use super::{TaskRecord, task_records};
use crate::domain;
use crate::domain::task::Task;
use crate::domain::user::User;
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::Context;
use sqlx::types::Json;

/// Row shape for one user document in the store
#[derive(sqlx::FromRow)]
struct UserDocumentRow {
    user_id: String,
    user_tasks: Json<Vec<TaskRecord>>,
}

impl From<UserDocumentRow> for User {
    fn from(value: UserDocumentRow) -> Self {
        User {
            id: value.user_id,
            tasks: value.user_tasks.0.into_iter().map(Task::from).collect(),
        }
    }
}

pub struct DbWriteUsers;

impl domain::user::driven_ports::UserWriter for DbWriteUsers {
    async fn insert(
        &self,
        user: &User,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), anyhow::Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        sqlx::query("INSERT INTO user_document (user_id, user_tasks) VALUES ($1, $2)")
            .bind(&user.id)
            .bind(Json(task_records(&user.tasks)))
            .execute(cxn.borrow_connection())
            .await
            .context("inserting a new user document")?;

        Ok(())
    }
}

pub struct DbReadUsers;

impl domain::user::driven_ports::UserReader for DbReadUsers {
    async fn find_by_user_id(
        &self,
        user_id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<User>, anyhow::Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let user_doc: Option<UserDocumentRow> = sqlx::query_as(
            "SELECT ud.user_id, ud.user_tasks FROM user_document ud WHERE ud.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("fetching a user document by ID")?;

        Ok(user_doc.map(User::from))
    }
}
