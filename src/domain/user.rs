use crate::domain::task::Task;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use thiserror::Error;
use uuid::Uuid;

/// A user account owning an ordered list of tasks. The task list is embedded
/// in the user's document, so a user lookup always carries the full list.
#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct User {
    pub id: String,
    pub tasks: Vec<Task>,
}

pub mod driven_ports {
    use super::*;

    pub trait UserWriter: Sync {
        /// Inserts a brand new user document into the store.
        async fn insert(
            &self,
            user: &User,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }

    pub trait UserReader: Sync {
        /// Fetches a user's document, tasks included, if the user exists.
        async fn find_by_user_id(
            &self,
            user_id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<User>, anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;

    pub trait UserPort {
        async fn create_user(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            u_writer: &impl driven_ports::UserWriter,
        ) -> Result<String, anyhow::Error>;
    }
}

pub struct UserService {}

impl driving_ports::UserPort for UserService {
    /// Creates a user with a freshly generated ID and an empty task list.
    /// ID generation is assumed collision-free, so the only failure mode is
    /// the store itself.
    async fn create_user(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        u_writer: &impl driven_ports::UserWriter,
    ) -> Result<String, anyhow::Error> {
        let new_user = User {
            id: Uuid::new_v4().to_string(),
            tasks: Vec::new(),
        };
        u_writer
            .insert(&new_user, &mut *ext_cxn)
            .await
            .context("persisting a new user")?;

        Ok(new_user.id)
    }
}

#[derive(Debug, Error)]
pub enum UserExistsErr {
    #[error("user with ID {0} does not exist")]
    UserDoesNotExist(String),

    #[error(transparent)]
    PortError(#[from] anyhow::Error),
}

/// Fetches a user's document, failing if the user doesn't exist. Task
/// operations start here so they never mutate state for an unknown user.
pub(super) async fn fetch_user(
    user_id: &str,
    ext_cxn: &mut impl ExternalConnectivity,
    user_read: &impl driven_ports::UserReader,
) -> Result<User, UserExistsErr> {
    let maybe_user = user_read.find_by_user_id(user_id, &mut *ext_cxn).await?;

    match maybe_user {
        Some(user) => Ok(user),
        None => Err(UserExistsErr::UserDoesNotExist(user_id.to_owned())),
    }
}
