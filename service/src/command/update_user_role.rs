//! [`Command`] for changing the [`Role`] of a [`User`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{user::Role, User};
use crate::{
    domain::user::{self, RoleChange},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for changing the [`Role`] of a [`User`].
#[derive(Clone, Copy, Debug)]
pub struct UpdateUserRole {
    /// Requested [`RoleChange`].
    pub change: RoleChange,

    /// ID of the administrator performing the change.
    pub by: user::Id,
}

impl<Bk> Command<UpdateUserRole> for Service<Bk>
where
    Bk: Backend<Update<RoleChange>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(user = %cmd.change.user_id, role = %cmd.change.role),
    )]
    async fn execute(
        &self,
        cmd: UpdateUserRole,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        // Demoting themselves would lock the administrator out.
        if cmd.change.user_id == cmd.by && cmd.change.role != user::Role::Admin
        {
            return Err(tracerr::new!(E::SelfDemotion));
        }

        self.backend()
            .execute(Update(cmd.change))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`UpdateUserRole`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    #[from]
    Backend(backend::Error),

    /// Administrator tried to drop their own administrator role.
    #[display("You cannot change your own role")]
    SelfDemotion,
}
