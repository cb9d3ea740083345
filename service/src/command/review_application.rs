//! [`Command`] for approving or rejecting a rental [`Application`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        application::{self, Review},
        Application,
    },
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for deciding on a pending [`Application`].
#[derive(Clone, Copy, Debug)]
pub struct ReviewApplication(pub Review);

impl<Bk> Command<ReviewApplication> for Service<Bk>
where
    Bk: Backend<
            Select<By<Option<Application>, application::Id>>,
            Ok = Option<Application>,
            Err = Traced<backend::Error>,
        > + Backend<Update<Review>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = application::Status;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(id = %cmd.0.id, decision = ?cmd.0.decision),
    )]
    async fn execute(
        &self,
        cmd: ReviewApplication,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReviewApplication(review) = cmd;

        let app = self
            .backend()
            .execute(Select(By::new(review.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::NotExists(review.id))
            .map_err(tracerr::wrap!())?;
        if app.status != application::Status::Pending {
            return Err(tracerr::new!(E::AlreadyReviewed(app.status)));
        }

        self.backend()
            .execute(Update(review))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(review.decision.into())
    }
}

/// Error of [`ReviewApplication`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Application`] has been decided on already.
    #[display("Application is already {_0}")]
    AlreadyReviewed(#[error(not(source))] application::Status),

    /// [`Application`] with the provided ID does not exist.
    #[display("Application `{_0}` does not exist")]
    NotExists(#[error(not(source))] application::Id),
}
