//! [`Command`] for signing in.

use common::operations::{By, Insert, Select, Update};
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::Role;
use crate::{
    domain::user::{
        self,
        session::{Credentials, Token},
        Profile,
    },
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for signing in with [`Credentials`].
#[derive(Clone, Debug)]
pub struct SignIn {
    /// [`user::Email`] of the signing in user.
    pub email: user::Email,

    /// [`user::Password`] of the signing in user.
    pub password: SecretBox<user::Password>,
}

/// Output of [`SignIn`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Authentication [`Token`] issued by the backend.
    pub token: Token,

    /// [`Profile`] of the signed in user.
    pub profile: Profile,

    /// Route to land on, depending on the [`Role`].
    pub route: &'static str,
}

impl<Bk> Command<SignIn> for Service<Bk>
where
    Bk: Backend<Insert<Credentials>, Ok = Token, Err = Traced<backend::Error>>
        + Backend<Update<Option<Token>>, Ok = (), Err = Traced<backend::Error>>
        + Backend<
            Select<By<Profile, ()>>,
            Ok = Profile,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(email = %cmd.email))]
    async fn execute(&self, cmd: SignIn) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SignIn { email, password } = cmd;

        let token = self
            .backend()
            .execute(Insert(Credentials { email, password }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        self.backend()
            .execute(Update(Some(token.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let profile = match self.backend().execute(Select(By::new(()))).await {
            Ok(profile) => profile,
            Err(e) => {
                // Token is useless without a profile to act as.
                self.backend()
                    .execute(Update(None::<Token>))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                return Err(e).map_err(tracerr::map_from_and_wrap!(=> E));
            }
        };
        tracing::info!(role = %profile.role, "signed in");

        Ok(Output {
            token,
            route: profile.role.home(),
            profile,
        })
    }
}

/// Error of [`SignIn`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    Backend(backend::Error),
}
