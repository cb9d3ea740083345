//! [`Command`] for moving a [`MaintenanceRequest`] to another status.

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{
        maintenance::{self, StatusChange},
        MaintenanceRequest,
    },
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for moving a [`MaintenanceRequest`] to another
/// [`maintenance::Status`].
#[derive(Clone, Copy, Debug)]
pub struct UpdateMaintenanceStatus(pub StatusChange);

impl<Bk> Command<UpdateMaintenanceStatus> for Service<Bk>
where
    Bk: Backend<
            Select<By<Option<MaintenanceRequest>, maintenance::Id>>,
            Ok = Option<MaintenanceRequest>,
            Err = Traced<backend::Error>,
        > + Backend<Update<StatusChange>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(id = %cmd.0.id, status = %cmd.0.status),
    )]
    async fn execute(
        &self,
        cmd: UpdateMaintenanceStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateMaintenanceStatus(change) = cmd;
        if change.cost.is_some_and(|c| c < Decimal::ZERO) {
            return Err(tracerr::new!(E::NegativeCost));
        }

        let request = self
            .backend()
            .execute(Select(By::new(change.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::NotExists(change.id))
            .map_err(tracerr::wrap!())?;
        if !request.status.can_become(change.status) {
            return Err(tracerr::new!(E::InvalidTransition {
                from: request.status,
                to: change.status,
            }));
        }

        self.backend()
            .execute(Update(change))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`UpdateMaintenanceStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    #[from]
    Backend(backend::Error),

    /// [`MaintenanceRequest`] cannot move between the provided statuses.
    #[display("Cannot change status from `{from}` to `{to}`")]
    InvalidTransition {
        /// Current [`maintenance::Status`].
        #[error(not(source))]
        from: maintenance::Status,

        /// Requested [`maintenance::Status`].
        #[error(not(source))]
        to: maintenance::Status,
    },

    /// Cost of the work is negative.
    #[display("Cost cannot be negative")]
    NegativeCost,

    /// [`MaintenanceRequest`] with the provided ID does not exist.
    #[display("Maintenance request `{_0}` does not exist")]
    NotExists(#[error(not(source))] maintenance::Id),
}
