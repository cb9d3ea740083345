//! Screens of signing in and out, registration and the profile.

use std::fmt::Write as _;

use futures::TryFutureExt as _;
use secrecy::SecretString;
use service::{
    command::{self, Command as _},
    domain::user::Profile,
    form::{Form, LoginForm, ProfileForm, RegisterForm},
    query,
};
use tracing as log;

use crate::{screen::or_dash, AsError, Context, Error};

/// Signs in with the provided credentials, persisting the session.
pub(super) async fn login(
    ctx: &mut Context,
    email: String,
    password: SecretString,
) -> Result<String, Error> {
    let mut form = Form::new(LoginForm { email, password });
    let out = form
        .submit(ctx.notifier(), "Signed in successfully", |cmd| {
            ctx.service().execute(cmd)
        })
        .await
        .map_err(AsError::into_error)?;

    ctx.save_session(out.token).await?;
    ctx.state_mut().set_dashboard_user(out.profile.clone());

    Ok(format!(
        "Signed in as {}, continue at {}",
        out.profile.display_name().unwrap_or_default(),
        out.route,
    ))
}

/// Signs out, forgetting the persisted session.
pub(super) async fn logout(ctx: &mut Context) -> Result<String, Error> {
    ctx.clear_session().await?;
    Ok("Signed out".to_owned())
}

/// Raw values of a new account.
#[derive(Debug)]
pub(super) struct Registration {
    pub(super) email: String,
    pub(super) password: SecretString,
    pub(super) confirm_password: SecretString,
    pub(super) first_name: String,
    pub(super) last_name: String,
    pub(super) role: String,
}

/// Registers a new account.
pub(super) async fn register(
    ctx: &Context,
    reg: Registration,
) -> Result<String, Error> {
    let Registration {
        email,
        password,
        confirm_password,
        first_name,
        last_name,
        role,
    } = reg;

    let mut form = Form::new(RegisterForm {
        email: email.clone(),
        password,
        confirm_password,
        first_name,
        last_name,
        role,
    });
    form.submit(ctx.notifier(), "Registered successfully", |cmd| {
        ctx.service().execute(cmd)
    })
    .await
    .map_err(AsError::into_error)?;

    Ok(format!("Registered {email}, run `login` to sign in"))
}

/// Shows the profile of the signed in user, applying the provided changes
/// first, if any.
pub(super) async fn profile(
    ctx: &mut Context,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut profile = ctx
        .service()
        .execute(query::profile::Current::all())
        .map_err(AsError::into_error)
        .await?;

    if first_name.is_some() || last_name.is_some() || phone.is_some() {
        let current = ProfileForm::from(&profile);
        let mut form = Form::new(ProfileForm {
            first_name: first_name.unwrap_or(current.first_name),
            last_name: last_name.unwrap_or(current.last_name),
            phone: phone.unwrap_or(current.phone),
        });
        profile = form
            .submit(ctx.notifier(), "Profile updated", |cmd| {
                ctx.service().execute(cmd)
            })
            .await
            .map_err(AsError::into_error)?;
        log::debug!("profile updated");
    }

    let out = render(&profile);
    ctx.state_mut().set_dashboard_user(profile);
    Ok(out)
}

/// Renders the provided [`Profile`].
fn render(profile: &Profile) -> String {
    let mut out = String::new();
    _ = writeln!(out, "Name:  {}", or_dash(profile.display_name()));
    _ = writeln!(out, "Email: {}", or_dash(profile.email.as_ref()));
    _ = writeln!(out, "Phone: {}", or_dash(profile.phone.as_ref()));
    _ = write!(out, "Role:  {}", profile.role);
    out
}

impl AsError for command::sign_in::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) if matches!(e.status(), Some(400 | 401)) => {
                Some(Error::new(
                    "WRONG_CREDENTIALS",
                    http::StatusCode::UNAUTHORIZED,
                    e,
                ))
            }
            Self::Backend(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::sign_up::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_profile::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
        }
    }
}
