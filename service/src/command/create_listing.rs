//! [`Command`] for creating a new [`Listing`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Listing`].
#[derive(Clone, Debug)]
pub struct CreateListing(pub listing::Draft);

impl<Bk> Command<CreateListing> for Service<Bk>
where
    Bk: Backend<
        Insert<listing::Draft>,
        Ok = Listing,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(title = %cmd.0.title))]
    async fn execute(
        &self,
        cmd: CreateListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateListing(draft) = cmd;
        if draft.price <= Decimal::ZERO {
            return Err(tracerr::new!(E::NonPositivePrice(draft.price)));
        }

        let listing = self
            .backend()
            .execute(Insert(draft))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tracing::info!(id = %listing.id, "listing created");

        Ok(listing)
    }
}

/// Error of [`CreateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Listing`] price is zero or negative.
    #[display("Price must be greater than zero, got {_0}")]
    NonPositivePrice(#[error(not(source))] Decimal),
}
