//! [`Command`] for updating the [`Profile`] of the signed in user.

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::user::{Profile, ProfileUpdate},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for updating the [`Profile`] of the signed in user.
#[derive(Clone, Debug)]
pub struct UpdateProfile(pub ProfileUpdate);

impl<Bk> Command<UpdateProfile> for Service<Bk>
where
    Bk: Backend<Update<ProfileUpdate>, Ok = (), Err = Traced<backend::Error>>
        + Backend<
            Select<By<Profile, ()>>,
            Ok = Profile,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = Profile;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all)]
    async fn execute(
        &self,
        cmd: UpdateProfile,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.backend()
            .execute(Update(cmd.0))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        self.backend()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`UpdateProfile`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    Backend(backend::Error),
}
