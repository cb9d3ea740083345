//! Payment definitions.
//!
//! Card details are collected by the payment provider itself. The backend only
//! creates a payment intent and hands back its client secret, which drives
//! the confirmation flow on the provider side.

use rust_decimal::Decimal;
use secrecy::{ExposeSecret as _, SecretString};

use crate::domain::lease;
#[cfg(doc)]
use crate::domain::Lease;

/// Request to pay towards a [`Lease`].
#[derive(Clone, Copy, Debug)]
pub struct Intent {
    /// ID of the [`Lease`] being paid for.
    pub lease_id: lease::Id,

    /// Amount to charge.
    pub amount: Decimal,
}

/// Client secret of a created payment intent.
#[derive(Clone, Debug)]
pub struct ClientSecret(SecretString);

impl ClientSecret {
    /// Wraps the provided raw client secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into().into())
    }

    /// Exposes the raw client secret.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
