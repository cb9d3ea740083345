//! [`MaintenanceRequest`] screens.

use futures::TryFutureExt as _;
use service::{
    command::{self, Command as _},
    domain::{
        maintenance::{self, StatusChange},
        MaintenanceRequest,
    },
    form::{FieldErrors, Form, MaintenanceRequestForm},
    query,
    view::{filters, Column, Table},
};

use crate::{
    args::ListArgs,
    screen::{local_page, or_dash, select},
    AsError, Context, Error,
};

/// Lists a page of [`MaintenanceRequest`]s.
///
/// The backend returns all the [`MaintenanceRequest`]s at once, so they are
/// filtered and paged locally.
pub(super) async fn list(
    ctx: &Context,
    args: &ListArgs,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut filter = filters::maintenance();
    select(&mut filter, &args.filter)?;

    let req = ctx.page_request(args.page)?;
    let rows = ctx
        .service()
        .execute(query::maintenance::All::all())
        .map_err(AsError::into_error)
        .await?;

    Ok(table()
        .render_page(&local_page(&mut filter, rows, req))
        .to_string())
}

/// Reports a new [`MaintenanceRequest`].
pub(super) async fn create(
    ctx: &Context,
    values: MaintenanceRequestForm,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut form = Form::new(values);
    let request = form
        .submit(ctx.notifier(), "Maintenance request submitted", |draft| {
            ctx.service()
                .execute(command::CreateMaintenanceRequest(draft))
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(table().render([&request]).to_string())
}

/// Changes the [`maintenance::Status`] of a [`MaintenanceRequest`].
pub(super) async fn change_status(
    ctx: &Context,
    id: &str,
    status: &str,
    cost: Option<&str>,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut errs = FieldErrors::default();
    let id = errs.required::<maintenance::Id>("id", id, "Enter a valid ID");
    let status = errs.required::<maintenance::Status>(
        "status",
        status,
        "Enter one of: pending, in-progress, completed, cancelled",
    );
    let cost = errs.optional_amount("cost", cost.unwrap_or_default());
    let change = errs
        .finish(|| {
            Some(StatusChange {
                id: id?,
                status: status?,
                cost: cost?,
            })
        })
        .map_err(AsError::into_error)?;

    ctx.service()
        .execute(command::UpdateMaintenanceStatus(change))
        .map_err(AsError::into_error)
        .await?;

    Ok(format!(
        "Maintenance request {} is now {}",
        change.id, change.status,
    ))
}

/// [`Table`] of [`MaintenanceRequest`]s.
fn table() -> Table<MaintenanceRequest> {
    Table::new([
        Column::new("ID", |r: &MaintenanceRequest| r.id.to_string()),
        Column::new("Title", |r: &MaintenanceRequest| r.title.to_string()),
        Column::new("Priority", |r: &MaintenanceRequest| {
            r.priority.to_string()
        }),
        Column::new("Status", |r: &MaintenanceRequest| r.status.to_string()),
        Column::new("Cost", |r: &MaintenanceRequest| or_dash(r.cost)),
    ])
}

impl AsError for command::create_maintenance_request::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_maintenance_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::NotExists(_) => Some(Error::new(
                "NOT_FOUND",
                http::StatusCode::NOT_FOUND,
                self,
            )),
            Self::InvalidTransition { .. } => Some(Error::new(
                "INVALID_TRANSITION",
                http::StatusCode::CONFLICT,
                self,
            )),
            Self::NegativeCost => Some(Error::new(
                "VALIDATION_FAILED",
                http::StatusCode::UNPROCESSABLE_ENTITY,
                self,
            )),
        }
    }
}
