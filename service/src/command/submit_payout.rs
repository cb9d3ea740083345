//! [`Command`] for submitting an owner payout.

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        payout::{
            self, Balance, Reconciliation, ReconciliationError, Submission,
        },
        PayoutPeriod,
    },
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for reconciling an owner's [`PayoutPeriod`] and submitting
/// the payable amount.
///
/// A [`Balance::Deficit`] is submitted as a zero payout, so the period is
/// still marked as reconciled for the owner.
#[derive(Clone, Copy, Debug)]
pub struct SubmitPayout(pub Reconciliation);

impl<Bk> Command<SubmitPayout> for Service<Bk>
where
    Bk: Backend<
            Select<By<Option<PayoutPeriod>, payout::Id>>,
            Ok = Option<PayoutPeriod>,
            Err = Traced<backend::Error>,
        > + Backend<Insert<Submission>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = Balance;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(owner = %cmd.0.owner_id, period = %cmd.0.period_id),
    )]
    async fn execute(&self, cmd: SubmitPayout) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitPayout(reconciliation) = cmd;
        let currency = self.config().currency;
        if reconciliation.rent_collected.currency != currency {
            return Err(tracerr::new!(E::WrongCurrency(
                reconciliation.rent_collected.currency.code(),
            )));
        }
        let balance = reconciliation
            .balance()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let period = self
            .backend()
            .execute(Select(By::new(reconciliation.period_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::PeriodNotExists(reconciliation.period_id))
            .map_err(tracerr::wrap!())?;
        if period.status != payout::Status::Open {
            return Err(tracerr::new!(E::PeriodClosed(period.id)));
        }

        self.backend()
            .execute(Insert(Submission {
                reconciliation,
                amount: balance.payable(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tracing::info!(%balance, "payout submitted");

        Ok(balance)
    }
}

/// Error of [`SubmitPayout`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    #[from]
    Backend(backend::Error),

    /// [`PayoutPeriod`] is closed for submissions.
    #[display("Payout period `{_0}` is closed")]
    PeriodClosed(#[error(not(source))] payout::Id),

    /// [`PayoutPeriod`] with the provided ID does not exist.
    #[display("Payout period `{_0}` does not exist")]
    PeriodNotExists(#[error(not(source))] payout::Id),

    /// [`Reconciliation`] amounts cannot be balanced.
    #[display("{_0}")]
    #[from]
    Reconciliation(ReconciliationError),

    /// Amounts are not in the currency the backend operates in.
    #[display("Amounts must be in the backend currency, got {_0}")]
    WrongCurrency(#[error(not(source))] &'static str),
}
