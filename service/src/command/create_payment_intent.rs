//! [`Command`] for creating a payment intent.

use common::operations::Insert;
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::payment::{ClientSecret, Intent},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for creating a payment [`Intent`] of a rent payment.
///
/// The returned [`ClientSecret`] is handed over to the payment provider to
/// confirm the payment.
#[derive(Clone, Copy, Debug)]
pub struct CreatePaymentIntent(pub Intent);

impl<Bk> Command<CreatePaymentIntent> for Service<Bk>
where
    Bk: Backend<
        Insert<Intent>,
        Ok = ClientSecret,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ClientSecret;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(lease = %cmd.0.lease_id, amount = %cmd.0.amount),
    )]
    async fn execute(
        &self,
        cmd: CreatePaymentIntent,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePaymentIntent(intent) = cmd;
        if intent.amount <= Decimal::ZERO {
            return Err(tracerr::new!(E::NonPositiveAmount(intent.amount)));
        }

        self.backend()
            .execute(Insert(intent))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreatePaymentIntent`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    #[from]
    Backend(backend::Error),

    /// Amount to pay is zero or negative.
    #[display("Amount must be greater than zero, got {_0}")]
    NonPositiveAmount(#[error(not(source))] Decimal),
}
