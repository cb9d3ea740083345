//! [`Command`] for deleting a [`Listing`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Listing;
use crate::{
    domain::listing,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Listing`].
#[derive(Clone, Copy, Debug)]
pub struct DeleteListing(pub listing::Id);

impl<Bk> Command<DeleteListing> for Service<Bk>
where
    Bk: Backend<Delete<listing::Id>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(id = %cmd.0))]
    async fn execute(
        &self,
        cmd: DeleteListing,
    ) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(Delete(cmd.0))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`DeleteListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    Backend(backend::Error),
}
