//! Service contains the client-side business logic of the rental management
//! front end: typed access to the backend REST API, form validation and
//! submission, and the filter/table/pagination views built on top of it.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod cookie;
pub mod domain;
pub mod form;
pub mod infra;
pub mod notify;
pub mod query;
pub mod read;
pub mod state;
pub mod view;

use std::num::NonZeroUsize;

#[cfg(test)]
use axum as _;

use common::{money::Currency, pagination::DEFAULT_PAGE_SIZE};
use smart_default::SmartDefault;

#[cfg(doc)]
use infra::Backend;

pub use self::{
    command::Command, notify::Notifier, query::Query, state::AppState,
};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// [`Currency`] the backend operates in.
    #[default(Currency::Usd)]
    pub currency: Currency,

    /// Number of rows on a page of a list screen.
    #[default(DEFAULT_PAGE_SIZE)]
    pub page_size: NonZeroUsize,
}

/// Client-side domain service.
#[derive(Clone, Debug)]
pub struct Service<B> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Backend`] of this [`Service`].
    backend: B,
}

impl<B> Service<B> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, backend: B) -> Self {
        Self { config, backend }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Backend`] of this [`Service`].
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
