//! [`Command`] for deleting a [`User`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`User`] account.
#[derive(Clone, Copy, Debug)]
pub struct DeleteUser {
    /// ID of the [`User`] to delete.
    pub user_id: user::Id,

    /// ID of the administrator performing the deletion.
    pub by: user::Id,
}

impl<Bk> Command<DeleteUser> for Service<Bk>
where
    Bk: Backend<Delete<user::Id>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(user = %cmd.user_id, by = %cmd.by))]
    async fn execute(&self, cmd: DeleteUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        if cmd.user_id == cmd.by {
            return Err(tracerr::new!(E::SelfDeletion));
        }

        self.backend()
            .execute(Delete(cmd.user_id))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeleteUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    #[from]
    Backend(backend::Error),

    /// Administrator tried to delete their own account.
    #[display("You cannot delete your own account")]
    SelfDeletion,
}
