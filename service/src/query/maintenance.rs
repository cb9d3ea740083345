//! [`Query`] collection related to [`MaintenanceRequest`]s.

use common::operations::By;

use crate::domain::{maintenance, MaintenanceRequest};
#[cfg(doc)]
use crate::Query;

use super::BackendQuery;

/// Queries a [`MaintenanceRequest`] by its [`maintenance::Id`].
pub type ById = BackendQuery<By<Option<MaintenanceRequest>, maintenance::Id>>;

/// Queries all the [`MaintenanceRequest`]s visible to the signed in user.
pub type All = BackendQuery<By<Vec<MaintenanceRequest>, ()>>;
