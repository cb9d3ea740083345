//! [`Context`]-related definitions.

use std::io;

use common::{Date, PageRequest};
use service::{
    command::{self, Command as _},
    cookie::AuthCookie,
    domain::user::session::Token,
    infra::Http,
    notify::{Notification, Recorder},
    AppState,
};
use tracing as log;

use crate::{
    config, define_error, error::AuthError, AsError, Config, Error, Service,
};

/// Context of a single client invocation.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// Notifications delivered while running the screen.
    notifier: Recorder,

    /// [`AppState`] of this client session.
    state: AppState,

    /// Session configuration.
    session: config::Session,

    /// Publishable Stripe key.
    stripe_public_key: String,

    /// [`Date`] the screens are shown as of.
    today: Date,
}

impl Context {
    /// Creates a new [`Context`] out of the provided [`Config`], restoring
    /// the persisted session, if any.
    ///
    /// # Errors
    ///
    /// If the backend client cannot be initialized, or the session file
    /// cannot be read.
    pub async fn new(config: &Config) -> Result<Self, Error> {
        let backend = Http::new(&config.backend.url, config.backend.timeout)
            .map_err(AsError::into_error)?;
        let service = Service::new(
            config.service().map_err(AsError::into_error)?,
            backend,
        );

        let ctx = Self {
            service,
            notifier: Recorder::new(),
            state: AppState::default(),
            session: config.session.clone(),
            stripe_public_key: config.stripe.public_key.clone(),
            today: Date::today(),
        };
        let token = ctx.restore_session().await?;
        ctx.service.backend().set_token(token);

        Ok(ctx)
    }

    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the [`Recorder`] notifications are delivered to.
    #[must_use]
    pub fn notifier(&self) -> &Recorder {
        &self.notifier
    }

    /// Takes all the notifications delivered so far.
    #[must_use]
    pub fn take_notifications(&self) -> Vec<Notification> {
        self.notifier.drain()
    }

    /// Returns [`AppState`] of this [`Context`].
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns mutable [`AppState`] of this [`Context`].
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Returns the publishable Stripe key, if configured.
    #[must_use]
    pub fn stripe_public_key(&self) -> Option<&str> {
        Some(self.stripe_public_key.as_str()).filter(|k| !k.is_empty())
    }

    /// Returns the [`Date`] the screens are shown as of.
    #[must_use]
    pub fn today(&self) -> Date {
        self.today
    }

    /// Returns the [`PageRequest`] of the provided 1-based page `number`.
    ///
    /// # Errors
    ///
    /// If the `number` is `0`.
    pub fn page_request(&self, number: usize) -> Result<PageRequest, Error> {
        define_error! {
            enum PageError {
                #[code = "INVALID_PAGE"]
                #[status = BAD_REQUEST]
                #[message = "Page numbers start from 1"]
                Zero,
            }
        }

        PageRequest::from_number(number, self.service.config().page_size)
            .ok_or_else(|| PageError::Zero.into())
    }

    /// Ensures a user is signed in.
    ///
    /// # Errors
    ///
    /// If there is no session to act in.
    pub fn require_session(&self) -> Result<(), Error> {
        if self.service.backend().token().is_none() {
            return Err(AuthError::Unauthenticated.into());
        }
        Ok(())
    }

    /// Persists the provided [`Token`] as the session cookie.
    ///
    /// # Errors
    ///
    /// If the session file cannot be written.
    pub async fn save_session(&self, token: Token) -> Result<(), Error> {
        let cookie = AuthCookie::new(token, self.session.ttl);
        tokio::fs::write(&self.session.cookie_file, cookie.to_set_cookie())
            .await
            .map_err(|e| self.session_file_error(&e))?;
        log::debug!(
            file = %self.session.cookie_file.display(),
            expires_at = %cookie.expires_at,
            "session saved",
        );
        Ok(())
    }

    /// Signs out, removing the persisted session cookie.
    ///
    /// # Errors
    ///
    /// If the session file cannot be removed.
    pub async fn clear_session(&mut self) -> Result<(), Error> {
        let Ok(()) = self.service.execute(command::SignOut).await;
        self.state.clear();
        match tokio::fs::remove_file(&self.session.cookie_file).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.session_file_error(&e)),
        }
    }

    /// Reads the persisted session cookie, forgetting an expired one.
    async fn restore_session(&self) -> Result<Option<Token>, Error> {
        let file = &self.session.cookie_file;
        let raw = match tokio::fs::read_to_string(file).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.session_file_error(&e)),
        };
        match AuthCookie::parse(raw.trim()) {
            Ok(cookie) => Ok(Some(cookie.token)),
            Err(e) => {
                log::warn!(file = %file.display(), "dropping session: {e}");
                _ = tokio::fs::remove_file(file).await;
                Ok(None)
            }
        }
    }

    /// Wraps an I/O error on the session file into an [`Error`].
    fn session_file_error(&self, e: &io::Error) -> Error {
        Error::internal(&format!(
            "session file `{}`: {e}",
            self.session.cookie_file.display(),
        ))
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use service::domain::user::session::Token;

    use crate::{config, Config};

    use super::Context;

    fn settings(file: &str) -> Config {
        Config {
            session: config::Session {
                cookie_file: std::env::temp_dir().join(file),
                ttl: Duration::from_secs(60),
            },
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn persists_and_clears_session() {
        let config = settings("rental-session-roundtrip");
        _ = std::fs::remove_file(&config.session.cookie_file);

        let ctx = Context::new(&config).await.unwrap();
        assert!(ctx.require_session().is_err());
        ctx.save_session(Token::new("t1").unwrap()).await.unwrap();

        let mut ctx = Context::new(&config).await.unwrap();
        assert!(ctx.require_session().is_ok());
        assert_eq!(
            ctx.service().backend().token(),
            Token::new("t1"),
        );

        ctx.clear_session().await.unwrap();
        assert!(ctx.service().backend().token().is_none());
        assert!(ctx.state().dashboard_user().is_none());
        assert!(!config.session.cookie_file.exists());
    }

    #[tokio::test]
    async fn rejects_page_zero() {
        let ctx = Context::new(&settings("rental-session-pages"))
            .await
            .unwrap();

        assert_eq!(ctx.page_request(0).unwrap_err().code, "INVALID_PAGE");
        assert_eq!(ctx.page_request(3).unwrap().index, 2);
    }
}
