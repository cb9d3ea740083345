//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Backend requests, client commands and queries, and page sources are all
/// expressed as [`Handler`]s of their own argument types, so a single type may
/// implement it many times.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
