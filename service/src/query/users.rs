//! [`Query`] collection related to the multiple [`User`]s.

use common::{operations::By, PageRequest};

use crate::domain::User;
#[cfg(doc)]
use crate::Query;

use super::{BackendQuery, RemotePages};

/// Queries a page of [`User`]s.
pub type Page = BackendQuery<By<common::Page<User>, PageRequest>>;

/// Page source of [`User`]s, paginated by the backend.
pub type Pages<'s, Bk> = RemotePages<'s, Bk, User>;
