//! [`Command`] for reporting a new [`MaintenanceRequest`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{maintenance, MaintenanceRequest},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for reporting a new [`MaintenanceRequest`].
#[derive(Clone, Debug)]
pub struct CreateMaintenanceRequest(pub maintenance::Draft);

impl<Bk> Command<CreateMaintenanceRequest> for Service<Bk>
where
    Bk: Backend<
        Insert<maintenance::Draft>,
        Ok = MaintenanceRequest,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = MaintenanceRequest;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(listing = %cmd.0.listing_id, priority = %cmd.0.priority),
    )]
    async fn execute(
        &self,
        cmd: CreateMaintenanceRequest,
    ) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(Insert(cmd.0))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`CreateMaintenanceRequest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    Backend(backend::Error),
}
