//! [`Lease`] screens.

use common::Date;
use futures::TryFutureExt as _;
use service::{
    command::{self, Command as _},
    domain::{
        lease::{self, Termination},
        text::Description,
        Lease,
    },
    form::{FieldErrors, Form, LeaseForm, PaymentForm},
    query,
    view::{filters, Column, Table},
};

use crate::{
    args::ListArgs,
    screen::{local_page, or_dash, select},
    AsError, Context, Error,
};

/// Lists a page of [`Lease`]s.
///
/// The backend returns all the [`Lease`]s at once, so they are filtered and
/// paged locally.
pub(super) async fn list(
    ctx: &Context,
    args: &ListArgs,
) -> Result<String, Error> {
    ctx.require_session()?;

    let today = ctx.today();
    let mut filter = filters::leases(today);
    select(&mut filter, &args.filter)?;

    let req = ctx.page_request(args.page)?;
    let rows = ctx
        .service()
        .execute(query::leases::All::all())
        .map_err(AsError::into_error)
        .await?;

    Ok(table(today)
        .render_page(&local_page(&mut filter, rows, req))
        .to_string())
}

/// Leases a listing to a tenant.
pub(super) async fn create(
    ctx: &Context,
    values: LeaseForm,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut form = Form::new(values);
    let lease = form
        .submit(ctx.notifier(), "Lease created", |draft| {
            ctx.service().execute(command::CreateLease(draft))
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(table(ctx.today()).render([&lease]).to_string())
}

/// Terminates the [`Lease`] with the provided ID early.
pub(super) async fn terminate(
    ctx: &Context,
    id: &str,
    reason: &str,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut errs = FieldErrors::default();
    let lease_id = errs.required::<lease::Id>("id", id, "Enter a valid ID");
    let reason = errs.optional::<Description>(
        "reason",
        reason,
        "Reason must be at most 2000 characters",
    );
    let termination = errs
        .finish(|| {
            Some(Termination {
                lease_id: lease_id?,
                reason: reason?,
            })
        })
        .map_err(AsError::into_error)?;

    ctx.service()
        .execute(command::TerminateLease(termination))
        .map_err(AsError::into_error)
        .await?;

    Ok(format!("Lease {} terminated", id.trim()))
}

/// Creates a payment intent for a [`Lease`].
pub(super) async fn pay(
    ctx: &Context,
    values: PaymentForm,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut form = Form::new(values);
    let secret = form
        .submit(ctx.notifier(), "Payment intent created", |cmd| {
            ctx.service().execute(cmd)
        })
        .await
        .map_err(AsError::into_error)?;

    let mut out = format!("Client secret: {}", secret.expose());
    if let Some(key) = ctx.stripe_public_key() {
        out.push_str(&format!("\nConfirm it with the publishable key {key}"));
    } else {
        tracing::warn!("`stripe.public_key` is not configured");
    }
    Ok(out)
}

/// [`Table`] of [`Lease`]s as of the provided `today`.
fn table(today: Date) -> Table<Lease> {
    Table::new([
        Column::new("ID", |l: &Lease| l.id.to_string()),
        Column::new("Listing", |l: &Lease| l.listing_id.to_string()),
        Column::new("Start", |l: &Lease| l.start_date.to_string()),
        Column::new("End", |l: &Lease| l.end_date.to_string()),
        Column::new("Rent", |l: &Lease| l.monthly_rent.to_string()),
        Column::new("Deposit", |l: &Lease| or_dash(l.security_deposit)),
        Column::new("Status", move |l: &Lease| l.status(today).to_string()),
    ])
}

impl AsError for command::create_lease::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::ListingNotExists(_) => Some(Error::new(
                "NOT_FOUND",
                http::StatusCode::NOT_FOUND,
                self,
            )),
            Self::ListingUnavailable(_) => Some(Error::new(
                "LISTING_UNAVAILABLE",
                http::StatusCode::CONFLICT,
                self,
            )),
            Self::NegativeDeposit | Self::NonPositiveRent(_) => {
                Some(Error::new(
                    "VALIDATION_FAILED",
                    http::StatusCode::UNPROCESSABLE_ENTITY,
                    self,
                ))
            }
        }
    }
}

impl AsError for command::terminate_lease::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::NotExists(_) => Some(Error::new(
                "NOT_FOUND",
                http::StatusCode::NOT_FOUND,
                self,
            )),
            Self::AlreadyTerminated(_) => Some(Error::new(
                "CONFLICT",
                http::StatusCode::CONFLICT,
                self,
            )),
        }
    }
}

impl AsError for command::create_payment_intent::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::NonPositiveAmount(_) => Some(Error::new(
                "VALIDATION_FAILED",
                http::StatusCode::UNPROCESSABLE_ENTITY,
                self,
            )),
        }
    }
}
