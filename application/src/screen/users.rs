//! [`User`] screens.

use common::pagination::FetchPage;
use futures::TryFutureExt as _;
use service::{
    command::{self, Command as _},
    domain::{
        user::{self, Profile, RoleChange},
        User,
    },
    form::FieldErrors,
    query,
    view::{filters, Column, Table},
};

use crate::{
    args::ListArgs,
    screen::{filter_page, or_dash, parse_id, select},
    AsError, Context, Error,
};

/// Lists a page of platform [`User`]s.
pub(super) async fn list(
    ctx: &Context,
    args: &ListArgs,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut filter = filters::users();
    select(&mut filter, &args.filter)?;

    let req = ctx.page_request(args.page)?;
    let page = query::users::Pages::new(ctx.service())
        .execute(FetchPage(req))
        .map_err(AsError::into_error)
        .await?;

    Ok(table()
        .render_page(&filter_page(&mut filter, page))
        .to_string())
}

/// Deletes the [`User`] with the provided ID.
pub(super) async fn delete(
    ctx: &mut Context,
    id: &str,
) -> Result<String, Error> {
    let user_id = parse_id::<user::Id>("id", id)?;
    let by = signed_in(ctx, user_id).await?;

    ctx.service()
        .execute(command::DeleteUser { user_id, by })
        .map_err(AsError::into_error)
        .await?;
    ctx.state_mut().select_user(None);

    Ok(format!("Deleted user {user_id}"))
}

/// Changes the [`user::Role`] of the [`User`] with the provided ID.
pub(super) async fn change_role(
    ctx: &mut Context,
    id: &str,
    role: &str,
) -> Result<String, Error> {
    let mut errs = FieldErrors::default();
    let user_id = errs.required::<user::Id>("id", id, "Enter a valid ID");
    let role = errs.required::<user::Role>(
        "role",
        role,
        "Enter one of: tenant, owner, admin",
    );
    let change = errs
        .finish(|| {
            Some(RoleChange {
                user_id: user_id?,
                role: role?,
            })
        })
        .map_err(AsError::into_error)?;
    let by = signed_in(ctx, change.user_id).await?;

    ctx.service()
        .execute(command::UpdateUserRole { change, by })
        .map_err(AsError::into_error)
        .await?;

    Ok(format!("User {} is now {}", change.user_id, change.role))
}

/// Selects the provided [`User`] and returns the ID of the signed in one.
async fn signed_in(
    ctx: &mut Context,
    selected: user::Id,
) -> Result<user::Id, Error> {
    ctx.require_session()?;

    let profile = ctx
        .service()
        .execute(query::profile::Current::all())
        .map_err(AsError::into_error)
        .await?;
    let by = acting_id(&profile)?;
    ctx.state_mut().set_dashboard_user(profile);
    ctx.state_mut().select_user(Some(selected));
    Ok(by)
}

/// Returns the ID of the signed in [`User`] acting on others.
///
/// A [`Profile`] without an ID cannot be told apart from the [`User`]s it
/// acts on, so it's rejected.
fn acting_id(profile: &Profile) -> Result<user::Id, Error> {
    if profile.id == user::Id::default() {
        return Err(Error::internal(&"signed in profile has no ID"));
    }
    Ok(profile.id)
}

/// [`Table`] of [`User`]s.
fn table() -> Table<User> {
    Table::new([
        Column::new("ID", |u: &User| u.id.to_string()),
        Column::new("Name", User::display_name),
        Column::new("Email", |u: &User| u.email.to_string()),
        Column::new("Role", |u: &User| u.role.to_string()),
        Column::new("Since", |u: &User| {
            or_dash(u.created_at.map(|at| at.date()))
        }),
    ])
}

impl AsError for command::delete_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::SelfDeletion => Some(Error::new(
                "FORBIDDEN",
                http::StatusCode::FORBIDDEN,
                self,
            )),
        }
    }
}

impl AsError for command::update_user_role::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::SelfDemotion => Some(Error::new(
                "FORBIDDEN",
                http::StatusCode::FORBIDDEN,
                self,
            )),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::domain::user::{self, Profile};

    use super::acting_id;

    fn profile(id: user::Id) -> Profile {
        Profile {
            id,
            email: None,
            first_name: None,
            last_name: None,
            phone: None,
            role: user::Role::Admin,
        }
    }

    #[test]
    fn rejects_profile_without_id() {
        let err = acting_id(&profile(user::Id::default())).unwrap_err();

        assert_eq!(err.code, "INTERNAL_ERROR");
    }

    #[test]
    fn acts_as_profile_id() {
        let id: user::Id =
            "7c9e6679-7425-40de-944b-e07fc1f90ae7".parse().unwrap();

        assert_eq!(acting_id(&profile(id)).unwrap(), id);
    }
}
