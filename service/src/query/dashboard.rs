//! [`Dashboard`] [`Query`] definition.

use common::{
    operations::{By, Select},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{user::Profile, Lease, MaintenanceRequest},
    infra::{backend, Backend},
    read::dashboard::Summary,
    Service,
};

use super::Query;

/// [`Query`] composing the dashboard [`Summary`] of the signed in user.
#[derive(Clone, Copy, Debug)]
pub struct Dashboard {
    /// [`Date`] the [`Summary`] is composed as of.
    pub today: Date,
}

impl<Bk> Query<Dashboard> for Service<Bk>
where
    Bk: Backend<
            Select<By<Profile, ()>>,
            Ok = Profile,
            Err = Traced<backend::Error>,
        > + Backend<
            Select<By<Vec<Lease>, ()>>,
            Ok = Vec<Lease>,
            Err = Traced<backend::Error>,
        > + Backend<
            Select<By<Vec<MaintenanceRequest>, ()>>,
            Ok = Vec<MaintenanceRequest>,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = Summary;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(today = %query.today))]
    async fn execute(&self, query: Dashboard) -> Result<Self::Ok, Self::Err> {
        let (profile, leases, requests) = futures::try_join!(
            self.backend().execute(Select(By::<Profile, _>::new(()))),
            self.backend().execute(Select(By::<Vec<Lease>, _>::new(()))),
            self.backend()
                .execute(Select(By::<Vec<MaintenanceRequest>, _>::new(()))),
        )
        .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        Ok(Summary::compose(profile, &leases, &requests, query.today))
    }
}

/// Error of [`Dashboard`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    Backend(backend::Error),
}
