//! [`Query`] collection related to rental [`Application`]s.

use common::{operations::By, PageRequest};

use crate::domain::{application, Application};
#[cfg(doc)]
use crate::Query;

use super::{BackendQuery, RemotePages};

/// Queries an [`Application`] by its [`application::Id`].
pub type ById = BackendQuery<By<Option<Application>, application::Id>>;

/// Queries a page of [`Application`]s.
pub type Page = BackendQuery<By<common::Page<Application>, PageRequest>>;

/// Page source of [`Application`]s, paginated by the backend.
pub type Pages<'s, Bk> = RemotePages<'s, Bk, Application>;
