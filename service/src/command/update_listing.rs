//! [`Command`] for updating an existing [`Listing`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for replacing the editable fields of an existing [`Listing`].
#[derive(Clone, Debug)]
pub struct UpdateListing {
    /// ID of the [`Listing`] to update.
    pub id: listing::Id,

    /// New contents of the [`Listing`].
    pub draft: listing::Draft,
}

impl<Bk> Command<UpdateListing> for Service<Bk>
where
    Bk: Backend<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<backend::Error>,
        > + Backend<Update<Listing>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(id = %cmd.id))]
    async fn execute(
        &self,
        cmd: UpdateListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateListing { id, draft } = cmd;
        if draft.price <= Decimal::ZERO {
            return Err(tracerr::new!(E::NonPositivePrice(draft.price)));
        }

        let current = self
            .backend()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::NotExists(id))
            .map_err(tracerr::wrap!())?;

        let listing::Draft {
            title,
            description,
            address,
            price,
            availability,
            is_active,
        } = draft;
        let listing = Listing {
            title,
            description,
            address,
            price,
            available_from: availability.map(|r| r.start()),
            available_to: availability.map(|r| r.end()),
            is_active,
            ..current
        };
        self.backend()
            .execute(Update(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(listing)
    }
}

/// Error of [`UpdateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Listing`] with the provided ID does not exist.
    #[display("Listing `{_0}` does not exist")]
    NotExists(#[error(not(source))] listing::Id),

    /// [`Listing`] price is zero or negative.
    #[display("Price must be greater than zero, got {_0}")]
    NonPositivePrice(#[error(not(source))] Decimal),
}
