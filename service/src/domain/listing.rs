//! [`Listing`] definitions.

use common::{Date, DateRange};
use derive_more::{AsRef, Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    text::{Description, Title},
    user,
};

/// Property advertised for rent.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Description`] of this [`Listing`].
    #[serde(default)]
    pub description: Option<Description>,

    /// [`Address`] of the advertised property.
    pub address: Address,

    /// Monthly rent asked for the property.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// First day the property is available from.
    #[serde(default)]
    pub available_from: Option<Date>,

    /// Last day the property is available until.
    #[serde(default)]
    pub available_to: Option<Date>,

    /// Indicator whether this [`Listing`] is shown to tenants.
    #[serde(default)]
    pub is_active: bool,

    /// ID of the owner of the property.
    #[serde(default)]
    pub owner_id: Option<user::Id>,

    /// URLs of the uploaded property images.
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl Listing {
    /// Returns the availability [`DateRange`] of this [`Listing`], if both
    /// bounds are known.
    #[must_use]
    pub fn availability(&self) -> Option<DateRange> {
        DateRange::new(self.available_from?, self.available_to?)
    }
}

/// Data of a new or edited [`Listing`].
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`Title`] of the [`Listing`].
    pub title: Title,

    /// [`Description`] of the [`Listing`].
    pub description: Option<Description>,

    /// [`Address`] of the property.
    pub address: Address,

    /// Monthly rent asked for the property.
    pub price: Decimal,

    /// Availability of the property.
    pub availability: Option<DateRange>,

    /// Indicator whether the [`Listing`] is shown to tenants.
    pub is_active: bool,
}

/// Image attached to a [`Listing`].
#[derive(Clone, Debug)]
pub struct Image {
    /// Original file name of this [`Image`].
    pub file_name: String,

    /// MIME type of this [`Image`].
    pub mime: String,

    /// Raw content of this [`Image`].
    pub bytes: Vec<u8>,
}

/// Upload of an [`Image`] to an existing [`Listing`].
#[derive(Clone, Debug)]
pub struct ImageUpload {
    /// ID of the [`Listing`] the [`Image`] is attached to.
    pub listing_id: Id,

    /// Uploaded [`Image`].
    pub image: Image,
}

/// ID of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

/// Postal address of a property.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address
            && !address.is_empty()
            && address.chars().count() <= 512
    }
}

impl std::str::FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

#[cfg(test)]
mod spec {
    use common::Date;

    use super::Listing;

    #[test]
    fn decodes_backend_listing() {
        let listing: Listing = serde_json::from_str(
            r#"{
                "id": "6f1c1f2e-8a5e-4b8e-9d3a-0a5b2b1c4d11",
                "title": "Sunny loft",
                "address": "12 Harbour St",
                "price": 1450.5,
                "availableFrom": "2024-06-01T00:00:00",
                "availableTo": "2024-12-31",
                "isActive": true
            }"#,
        )
        .unwrap();

        assert_eq!(listing.price.to_string(), "1450.5");
        assert!(listing.is_active);
        assert!(listing.image_urls.is_empty());
        assert_eq!(
            listing.availability().unwrap().start(),
            Date::from_ymd(2024, 6, 1).unwrap(),
        );
    }
}
