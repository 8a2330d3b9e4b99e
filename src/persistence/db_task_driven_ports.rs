use super::task_records;
use crate::domain;
use crate::domain::task::Task;
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::Context;
use sqlx::types::Json;

pub struct DbTaskListWriter;

impl domain::task::driven_ports::TaskListWriter for DbTaskListWriter {
    /// Writes the whole embedded sequence back onto the user's document. There is
    /// no narrower per-task write; the document is the unit of persistence.
    async fn replace_task_list(
        &self,
        user_id: &str,
        tasks: &[Task],
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), anyhow::Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        sqlx::query("UPDATE user_document SET user_tasks = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(Json(task_records(tasks)))
            .execute(cxn.borrow_connection())
            .await
            .context("replacing a user's task list")?;

        Ok(())
    }
}
