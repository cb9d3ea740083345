//! [`Query`] collection related to [`Lease`]s.

use common::operations::By;

use crate::domain::{lease, Lease};
#[cfg(doc)]
use crate::Query;

use super::BackendQuery;

/// Queries a [`Lease`] by its [`lease::Id`].
pub type ById = BackendQuery<By<Option<Lease>, lease::Id>>;

/// Queries all the [`Lease`]s visible to the signed in user.
///
/// The backend returns them at once, so pages are sliced locally.
pub type All = BackendQuery<By<Vec<Lease>, ()>>;
