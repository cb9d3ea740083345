//! [`Command`] for creating a new [`Lease`].

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{lease, listing, Lease, Listing},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Lease`] of a [`Listing`].
#[derive(Clone, Debug)]
pub struct CreateLease(pub lease::Draft);

impl<Bk> Command<CreateLease> for Service<Bk>
where
    Bk: Backend<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<backend::Error>,
        > + Backend<
            Insert<lease::Draft>,
            Ok = Lease,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = Lease;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(listing = %cmd.0.listing_id, term = %cmd.0.term),
    )]
    async fn execute(&self, cmd: CreateLease) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateLease(draft) = cmd;
        if draft.monthly_rent <= Decimal::ZERO {
            return Err(tracerr::new!(E::NonPositiveRent(draft.monthly_rent)));
        }
        if draft.security_deposit.is_some_and(|d| d < Decimal::ZERO) {
            return Err(tracerr::new!(E::NegativeDeposit));
        }

        let listing = self
            .backend()
            .execute(Select(By::new(draft.listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::ListingNotExists(draft.listing_id))
            .map_err(tracerr::wrap!())?;
        if let Some(available) = listing.availability() {
            if !available.contains(draft.term.start()) {
                return Err(tracerr::new!(E::ListingUnavailable(draft.term)));
            }
        }

        self.backend()
            .execute(Insert(draft))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateLease`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Listing`] with the provided ID does not exist.
    #[display("Listing `{_0}` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// [`Listing`] is not available when the [`Lease`] starts.
    #[display("Listing is not available for {_0}")]
    ListingUnavailable(#[error(not(source))] common::DateRange),

    /// Security deposit is negative.
    #[display("Security deposit cannot be negative")]
    NegativeDeposit,

    /// Monthly rent is zero or negative.
    #[display("Monthly rent must be greater than zero, got {_0}")]
    NonPositiveRent(#[error(not(source))] Decimal),
}
