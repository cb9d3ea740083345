//! [`Command`] for terminating a [`Lease`].

use common::operations::{By, Perform, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        lease::{self, Termination},
        Lease,
    },
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for terminating a [`Lease`] before its end date.
#[derive(Clone, Debug)]
pub struct TerminateLease(pub Termination);

impl<Bk> Command<TerminateLease> for Service<Bk>
where
    Bk: Backend<
            Select<By<Option<Lease>, lease::Id>>,
            Ok = Option<Lease>,
            Err = Traced<backend::Error>,
        > + Backend<Perform<Termination>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(id = %cmd.0.lease_id))]
    async fn execute(
        &self,
        cmd: TerminateLease,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let TerminateLease(termination) = cmd;
        let id = termination.lease_id;

        let lease = self
            .backend()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::NotExists(id))
            .map_err(tracerr::wrap!())?;
        if lease.terminated_at.is_some() {
            return Err(tracerr::new!(E::AlreadyTerminated(id)));
        }

        self.backend()
            .execute(Perform(termination))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`TerminateLease`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Lease`] is terminated already.
    #[display("Lease `{_0}` is already terminated")]
    AlreadyTerminated(#[error(not(source))] lease::Id),

    /// [`Lease`] with the provided ID does not exist.
    #[display("Lease `{_0}` does not exist")]
    NotExists(#[error(not(source))] lease::Id),
}
