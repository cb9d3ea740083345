//! [`Query`] definition.

pub mod applications;
pub mod dashboard;
pub mod leases;
pub mod listings;
pub mod maintenance;
pub mod payouts;
pub mod profile;
pub mod users;

use std::marker::PhantomData;

use common::{
    operations::{By, Select},
    pagination::FetchPage,
    Handler, Page, PageRequest,
};
use tracerr::Traced;

use crate::{
    infra::{backend, Backend},
    Service,
};

pub use self::dashboard::Dashboard;

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Backend`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct BackendQuery<T>(T);

impl<W, B> BackendQuery<By<W, B>> {
    /// Creates a new [`BackendQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<W> BackendQuery<By<W, ()>> {
    /// Creates a new [`BackendQuery`] selecting all the `W` visible to the
    /// current user.
    #[must_use]
    pub fn all() -> Self {
        Self::by(())
    }
}

impl<Bk, W, B> Query<BackendQuery<By<W, B>>> for Service<Bk>
where
    Bk: Backend<Select<By<W, B>>, Ok = W, Err = Traced<backend::Error>>,
{
    type Ok = W;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        BackendQuery(by): BackendQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Page source cutting [`Page`]s of `T` on the [`Backend`] side.
///
/// Counterpart of [`LocalPages`] for endpoints paginating by themselves.
///
/// [`LocalPages`]: common::pagination::LocalPages
#[derive(Debug)]
pub struct RemotePages<'s, Bk, T> {
    /// [`Service`] to query [`Page`]s with.
    service: &'s Service<Bk>,

    /// Type of the paginated rows.
    _row: PhantomData<fn() -> T>,
}

impl<'s, Bk, T> RemotePages<'s, Bk, T> {
    /// Creates a new [`RemotePages`] source querying the provided [`Service`].
    #[must_use]
    pub fn new(service: &'s Service<Bk>) -> Self {
        Self {
            service,
            _row: PhantomData,
        }
    }
}

impl<Bk, T> Clone for RemotePages<'_, Bk, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Bk, T> Copy for RemotePages<'_, Bk, T> {}

impl<Bk, T> Handler<FetchPage> for RemotePages<'_, Bk, T>
where
    Service<Bk>: Query<
        BackendQuery<By<Page<T>, PageRequest>>,
        Ok = Page<T>,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Page<T>;
    type Err = Traced<backend::Error>;

    /// Requests past the last page are clamped onto it, costing one more
    /// request to the [`Backend`].
    async fn execute(
        &self,
        FetchPage(req): FetchPage,
    ) -> Result<Self::Ok, Self::Err> {
        let page = self
            .service
            .execute(BackendQuery::by(req))
            .await
            .map_err(tracerr::wrap!())?;
        if page.total_pages == 0 || req.index < page.total_pages {
            return Ok(page);
        }

        let last = req.clamp(page.total_pages);
        tracing::debug!(
            requested = req.number(),
            last = last.number(),
            "page is past the end, fetching the last one",
        );
        self.service
            .execute(BackendQuery::by(last))
            .await
            .map_err(tracerr::wrap!())
    }
}
