//! [`Command`] for registering a new user.

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::user::Registration,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for registering a new user.
///
/// The registered user still has to [`SignIn`] afterwards.
///
/// [`SignIn`]: super::SignIn
#[derive(Clone, Debug)]
pub struct SignUp(pub Registration);

impl<Bk> Command<SignUp> for Service<Bk>
where
    Bk: Backend<Insert<Registration>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(email = %cmd.0.email, role = %cmd.0.role),
    )]
    async fn execute(&self, cmd: SignUp) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(Insert(cmd.0))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`SignUp`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    Backend(backend::Error),
}
