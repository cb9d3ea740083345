//! [`Command`] for signing out.

use std::convert::Infallible;

use common::operations::Update;
use tracerr::Traced;

use crate::{
    domain::user::session::Token,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for signing out, forgetting the authentication [`Token`].
///
/// Signing out never fails: the [`Token`] is dropped locally even if the
/// [`Backend`] cannot be reached.
#[derive(Clone, Copy, Debug)]
pub struct SignOut;

impl<Bk> Command<SignOut> for Service<Bk>
where
    Bk: Backend<Update<Option<Token>>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Infallible;

    #[tracing::instrument(skip_all)]
    async fn execute(&self, _: SignOut) -> Result<Self::Ok, Self::Err> {
        if let Err(e) = self.backend().execute(Update(None::<Token>)).await {
            tracing::warn!("failed to forget authentication token: {e}");
        }
        Ok(())
    }
}
