//! Payout screens.

use futures::TryFutureExt as _;
use service::{
    command::{self, Command as _},
    domain::PayoutPeriod,
    form::{Form, PayoutPeriodForm, ReconciliationForm},
    query,
    view::{filters, Column, Table},
};

use crate::{
    args::ListArgs,
    screen::{local_page, select},
    AsError, Context, Error,
};

/// Lists a page of [`PayoutPeriod`]s.
pub(super) async fn periods(
    ctx: &Context,
    args: &ListArgs,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut filter = filters::payout_periods();
    select(&mut filter, &args.filter)?;

    let req = ctx.page_request(args.page)?;
    let rows = ctx
        .service()
        .execute(query::payouts::Periods::all())
        .map_err(AsError::into_error)
        .await?;

    Ok(table()
        .render_page(&local_page(&mut filter, rows, req))
        .to_string())
}

/// Opens a new [`PayoutPeriod`].
pub(super) async fn create_period(
    ctx: &Context,
    values: PayoutPeriodForm,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut form = Form::new(values);
    let period = form
        .submit(ctx.notifier(), "Payout period created", |draft| {
            ctx.service().execute(command::CreatePayoutPeriod(draft))
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(table().render([&period]).to_string())
}

/// Reconciles an owner's income and costs, submitting the payable amount.
pub(super) async fn reconcile(
    ctx: &Context,
    values: ReconciliationForm,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut form = Form::new(values);
    let balance = form
        .submit(ctx.notifier(), "Payout submitted", |cmd| {
            ctx.service().execute(cmd)
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(format!("Payout submitted: {balance}"))
}

/// [`Table`] of [`PayoutPeriod`]s.
fn table() -> Table<PayoutPeriod> {
    Table::new([
        Column::new("ID", |p: &PayoutPeriod| p.id.to_string()),
        Column::new("Name", |p: &PayoutPeriod| p.name.to_string()),
        Column::new("Start", |p: &PayoutPeriod| p.start_date.to_string()),
        Column::new("End", |p: &PayoutPeriod| p.end_date.to_string()),
        Column::new("Status", |p: &PayoutPeriod| p.status.to_string()),
    ])
}

impl AsError for command::create_payout_period::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Overlaps(_) => Some(Error::new(
                "PERIOD_OVERLAPS",
                http::StatusCode::CONFLICT,
                self,
            )),
        }
    }
}

impl AsError for command::submit_payout::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::PeriodNotExists(_) => Some(Error::new(
                "NOT_FOUND",
                http::StatusCode::NOT_FOUND,
                self,
            )),
            Self::PeriodClosed(_) => Some(Error::new(
                "PERIOD_CLOSED",
                http::StatusCode::CONFLICT,
                self,
            )),
            Self::WrongCurrency(_) | Self::Reconciliation(_) => {
                Some(Error::new(
                    "VALIDATION_FAILED",
                    http::StatusCode::UNPROCESSABLE_ENTITY,
                    self,
                ))
            }
        }
    }
}
