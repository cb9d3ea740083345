//! [`Application`] screens.

use common::pagination::FetchPage;
use futures::TryFutureExt as _;
use service::{
    command::{self, Command as _},
    domain::{
        application::{self, Decision, Review},
        Application,
    },
    form::{ApplicationForm, Form},
    query,
    view::{filters, Column, Table},
};

use crate::{
    args::ListArgs,
    screen::{filter_page, or_dash, parse_id, select},
    AsError, Context, Error,
};

/// Lists a page of rental [`Application`]s.
pub(super) async fn list(
    ctx: &Context,
    args: &ListArgs,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut filter = filters::applications();
    select(&mut filter, &args.filter)?;

    let req = ctx.page_request(args.page)?;
    let page = query::applications::Pages::new(ctx.service())
        .execute(FetchPage(req))
        .map_err(AsError::into_error)
        .await?;

    Ok(table()
        .render_page(&filter_page(&mut filter, page))
        .to_string())
}

/// Applies for a listing.
pub(super) async fn apply(
    ctx: &Context,
    values: ApplicationForm,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut form = Form::new(values);
    let app = form
        .submit(ctx.notifier(), "Application submitted", |draft| {
            ctx.service().execute(command::SubmitApplication(draft))
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(table().render([&app]).to_string())
}

/// Approves or rejects the pending [`Application`] with the provided ID.
pub(super) async fn review(
    ctx: &Context,
    id: &str,
    decision: Decision,
) -> Result<String, Error> {
    ctx.require_session()?;

    let id = parse_id::<application::Id>("id", id)?;
    let status = ctx
        .service()
        .execute(command::ReviewApplication(Review { id, decision }))
        .map_err(AsError::into_error)
        .await?;

    Ok(format!("Application {id} is now {status}"))
}

/// [`Table`] of [`Application`]s.
fn table() -> Table<Application> {
    Table::new([
        Column::new("ID", |a: &Application| a.id.to_string()),
        Column::new("Listing", |a: &Application| a.listing_id.to_string()),
        Column::new("Applicant", |a: &Application| a.applicant_id.to_string()),
        Column::new("Move in", |a: &Application| or_dash(a.move_in_date)),
        Column::new("Income", |a: &Application| or_dash(a.monthly_income)),
        Column::new("Status", |a: &Application| a.status.to_string()),
    ])
}

impl AsError for command::submit_application::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::NegativeIncome => Some(Error::new(
                "VALIDATION_FAILED",
                http::StatusCode::UNPROCESSABLE_ENTITY,
                self,
            )),
        }
    }
}

impl AsError for command::review_application::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::NotExists(_) => Some(Error::new(
                "NOT_FOUND",
                http::StatusCode::NOT_FOUND,
                self,
            )),
            Self::AlreadyReviewed(_) => Some(Error::new(
                "ALREADY_REVIEWED",
                http::StatusCode::CONFLICT,
                self,
            )),
        }
    }
}
