//! [`Command`] for submitting a rental [`Application`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{application, Application},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for submitting a rental [`Application`].
#[derive(Clone, Debug)]
pub struct SubmitApplication(pub application::Draft);

impl<Bk> Command<SubmitApplication> for Service<Bk>
where
    Bk: Backend<
        Insert<application::Draft>,
        Ok = Application,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Application;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(listing = %cmd.0.listing_id))]
    async fn execute(
        &self,
        cmd: SubmitApplication,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitApplication(draft) = cmd;
        if draft.monthly_income.is_some_and(|i| i < Decimal::ZERO) {
            return Err(tracerr::new!(E::NegativeIncome));
        }

        self.backend()
            .execute(Insert(draft))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SubmitApplication`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    #[from]
    Backend(backend::Error),

    /// Declared monthly income is negative.
    #[display("Monthly income cannot be negative")]
    NegativeIncome,
}
