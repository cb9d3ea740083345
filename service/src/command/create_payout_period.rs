//! [`Command`] for opening a new [`PayoutPeriod`].

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        payout::PeriodDraft,
        text::Title,
        PayoutPeriod,
    },
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for opening a new [`PayoutPeriod`].
///
/// Periods never overlap each other.
#[derive(Clone, Debug)]
pub struct CreatePayoutPeriod(pub PeriodDraft);

impl<Bk> Command<CreatePayoutPeriod> for Service<Bk>
where
    Bk: Backend<
            Select<By<Vec<PayoutPeriod>, ()>>,
            Ok = Vec<PayoutPeriod>,
            Err = Traced<backend::Error>,
        > + Backend<
            Insert<PeriodDraft>,
            Ok = PayoutPeriod,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = PayoutPeriod;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(name = %cmd.0.name, range = %cmd.0.range),
    )]
    async fn execute(
        &self,
        cmd: CreatePayoutPeriod,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePayoutPeriod(draft) = cmd;

        let periods = self
            .backend()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(p) = periods.into_iter().find(|p| {
            p.range().is_some_and(|r| r.overlaps(&draft.range))
        }) {
            return Err(tracerr::new!(E::Overlaps(p.name)));
        }

        let period = self
            .backend()
            .execute(Insert(draft))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tracing::info!(id = %period.id, "payout period opened");

        Ok(period)
    }
}

/// Error of [`CreatePayoutPeriod`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    #[from]
    Backend(backend::Error),

    /// New period overlaps the existing [`PayoutPeriod`] with the provided
    /// name.
    #[display("Period overlaps the existing `{_0}` period")]
    Overlaps(#[error(not(source))] Title),
}
