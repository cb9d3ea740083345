//! [`Query`] collection related to [`Listing`]s.

use common::{operations::By, PageRequest};

use crate::domain::{listing, Listing};
#[cfg(doc)]
use crate::Query;

use super::{BackendQuery, RemotePages};

/// Queries a [`Listing`] by its [`listing::Id`].
pub type ById = BackendQuery<By<Option<Listing>, listing::Id>>;

/// Queries a page of [`Listing`]s.
pub type Page = BackendQuery<By<common::Page<Listing>, PageRequest>>;

/// Page source of [`Listing`]s, paginated by the backend.
pub type Pages<'s, Bk> = RemotePages<'s, Bk, Listing>;
