//! [`Query`] collection related to the [`Profile`] of the signed in user.

use common::operations::By;

use crate::domain::user::Profile;
#[cfg(doc)]
use crate::Query;

use super::BackendQuery;

/// Queries the [`Profile`] of the signed in user.
pub type Current = BackendQuery<By<Profile, ()>>;
