//! [`Config`]-related definitions.

use std::{env, num::NonZeroUsize, path::PathBuf, time};

use common::{money::Currency, pagination::DEFAULT_PAGE_SIZE};
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend configuration.
    pub backend: Backend,

    /// Stripe configuration.
    pub stripe: Stripe,

    /// Session configuration.
    pub session: Session,

    /// UI configuration.
    pub ui: Ui,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the `CONF_` environment variables (if any);
    /// - overriding it with the `BACKEND_URL` and `STRIPE_PUBLIC_KEY`
    ///   environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .set_override_option("backend.url", env::var("BACKEND_URL").ok())?
            .set_override_option(
                "stripe.public_key",
                env::var("STRIPE_PUBLIC_KEY").ok(),
            )?
            .build()?
            .try_deserialize()
    }

    /// Returns the [`service::Config`] described by this [`Config`].
    ///
    /// # Errors
    ///
    /// If the configured currency is not supported.
    pub fn service(&self) -> Result<service::Config, ConfigError> {
        let currency =
            Currency::from_code(&self.backend.currency).ok_or_else(|| {
                ConfigError::Message(format!(
                    "unsupported `backend.currency`: {}",
                    self.backend.currency,
                ))
            })?;
        Ok(service::Config {
            currency,
            page_size: self.ui.page_size,
        })
    }
}

/// Backend configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Backend {
    /// Base URL of the backend REST API.
    #[default("http://127.0.0.1:5000".to_owned())]
    pub url: String,

    /// Timeout of a single request, the HTTP client default if unset.
    #[serde(with = "humantime_serde")]
    pub timeout: Option<time::Duration>,

    /// ISO 4217 code of the currency the backend operates in.
    #[default("USD".to_owned())]
    pub currency: String,
}

/// Stripe configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Stripe {
    /// Publishable key payment intents are confirmed with.
    pub public_key: String,
}

/// Session configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Session {
    /// File the authentication cookie is persisted in.
    #[default(PathBuf::from(".rental-session"))]
    pub cookie_file: PathBuf,

    /// Lifetime of the authentication cookie.
    #[default(service::cookie::DEFAULT_TTL)]
    #[serde(with = "humantime_serde")]
    pub ttl: time::Duration,
}

/// UI configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Ui {
    /// Number of rows on a page of a list screen.
    #[default(DEFAULT_PAGE_SIZE)]
    pub page_size: NonZeroUsize,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::env;

    use super::Config;

    #[test]
    fn defaults_without_file() {
        let config = Config::new("does-not-exist.toml").unwrap();

        assert_eq!(config.ui.page_size.get(), 10);
        assert_eq!(config.backend.currency, "USD");
        assert!(config.backend.timeout.is_none());
        assert_eq!(config.session.ttl.as_secs(), 30 * 24 * 60 * 60);
        assert!(config.service().is_ok());
    }

    #[test]
    fn backend_url_alone_is_enough() {
        env::set_var("BACKEND_URL", "http://backend.test:8080");
        let config = Config::new("does-not-exist.toml");
        env::remove_var("BACKEND_URL");

        let config = config.unwrap();
        assert_eq!(config.backend.url, "http://backend.test:8080");
        assert_eq!(config.backend.currency, "USD");
        assert_eq!(config.ui.page_size.get(), 10);
    }
}
