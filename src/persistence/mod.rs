use crate::domain::task::Task;
use crate::external_connections::{self, ConnectionHandle};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool, Postgres};
use std::time::Duration;

pub mod db_task_driven_ports;
pub mod db_user_driven_ports;

/// Builds the connection pool against the document store.
pub async fn connect_sqlx(db_url: &str) -> Result<PgPool, anyhow::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(2))
        .connect(db_url)
        .await
        .context("connecting to the document store")
}

/// Production implementation of [ExternalConnectivity][external_connections::ExternalConnectivity],
/// backed by the PostgreSQL pool. Cloning is cheap, every clone shares the pool.
#[derive(Clone)]
pub struct ExternalConnectivity {
    db: PgPool,
}

impl ExternalConnectivity {
    pub fn new(db: PgPool) -> ExternalConnectivity {
        ExternalConnectivity { db }
    }
}

pub struct PoolConnectionHandle {
    active_connection: PoolConnection<Postgres>,
}

impl ConnectionHandle for PoolConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection {
        &mut self.active_connection
    }
}

impl external_connections::ExternalConnectivity for ExternalConnectivity {
    type Handle = PoolConnectionHandle;

    async fn database_cxn(&mut self) -> Result<Self::Handle, anyhow::Error> {
        let handle = PoolConnectionHandle {
            active_connection: self.db.acquire().await?,
        };

        Ok(handle)
    }
}

/// Persisted form of a single embedded task inside the `user_tasks` JSONB column.
/// The JSON field names are the document store's contract, not the API's.
#[derive(Serialize, Deserialize)]
pub(crate) struct TaskRecord {
    #[serde(rename = "taskID")]
    pub task_id: String,
    pub name: String,
}

impl From<TaskRecord> for Task {
    fn from(value: TaskRecord) -> Self {
        Task {
            id: value.task_id,
            name: value.name,
        }
    }
}

impl From<&Task> for TaskRecord {
    fn from(value: &Task) -> Self {
        TaskRecord {
            task_id: value.id.clone(),
            name: value.name.clone(),
        }
    }
}

pub(crate) fn task_records(tasks: &[Task]) -> Vec<TaskRecord> {
    tasks.iter().map(TaskRecord::from).collect()
}
