//! [`Query`] collection related to [`PayoutPeriod`]s.

use common::operations::By;

use crate::domain::{payout, PayoutPeriod};
#[cfg(doc)]
use crate::Query;

use super::BackendQuery;

/// Queries a [`PayoutPeriod`] by its [`payout::Id`].
pub type PeriodById = BackendQuery<By<Option<PayoutPeriod>, payout::Id>>;

/// Queries all the [`PayoutPeriod`]s.
pub type Periods = BackendQuery<By<Vec<PayoutPeriod>, ()>>;
