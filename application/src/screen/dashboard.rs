//! Dashboard screen.

use futures::TryFutureExt as _;
use service::{
    query::{self, Query as _},
    view::{Column, Table},
};

use crate::{screen::or_dash, AsError, Context, Error};

/// Shows the dashboard summary of the signed in user.
pub(super) async fn show(ctx: &mut Context) -> Result<String, Error> {
    ctx.require_session()?;

    let summary = ctx
        .service()
        .execute(query::Dashboard { today: ctx.today() })
        .map_err(AsError::into_error)
        .await?;

    let table = Table::new([
        Column::new("Metric", |(name, _): &(String, usize)| name.clone()),
        Column::new("Count", |(_, count): &(String, usize)| count.to_string()),
    ]);
    let out = format!(
        "Welcome, {}\n\n{}\n\nOpen maintenance requests: {}\nMonthly rent \
         of active leases: {} {}",
        or_dash(summary.profile.display_name()),
        table.render(&summary.rows()),
        summary.open_maintenance(),
        summary.monthly_rent,
        ctx.service().config().currency.code(),
    );

    ctx.state_mut().set_dashboard_user(summary.profile);
    Ok(out)
}

impl AsError for query::dashboard::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
        }
    }
}
