//! [`User`] definitions.

pub mod session;

use std::sync::LazyLock;

use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use self::session::Session;

/// Platform user as listed on the admin screens.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Email`] of this [`User`].
    pub email: Email,

    /// First [`Name`] of this [`User`].
    #[serde(default)]
    pub first_name: Option<Name>,

    /// Last [`Name`] of this [`User`].
    #[serde(default)]
    pub last_name: Option<Name>,

    /// [`Role`] of this [`User`].
    pub role: Role,

    /// [`DateTime`] when this [`User`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    #[serde(default)]
    pub created_at: Option<CreationDateTime>,
}

impl User {
    /// Returns the full name of this [`User`], falling back to its [`Email`].
    #[must_use]
    pub fn display_name(&self) -> String {
        full_name(self.first_name.as_ref(), self.last_name.as_ref())
            .unwrap_or_else(|| self.email.to_string())
    }
}

/// Profile of the currently authenticated [`User`].
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// ID of the [`User`].
    #[serde(default)]
    pub id: Id,

    /// [`Email`] of the [`User`].
    #[serde(default)]
    pub email: Option<Email>,

    /// First [`Name`] of the [`User`].
    #[serde(default)]
    pub first_name: Option<Name>,

    /// Last [`Name`] of the [`User`].
    #[serde(default)]
    pub last_name: Option<Name>,

    /// [`Phone`] of the [`User`].
    #[serde(default)]
    pub phone: Option<Phone>,

    /// [`Role`] of the [`User`].
    pub role: Role,
}

impl Profile {
    /// Returns the full name of this [`Profile`], if known.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        full_name(self.first_name.as_ref(), self.last_name.as_ref())
            .or_else(|| self.email.as_ref().map(ToString::to_string))
    }
}

/// Joins the provided name parts, skipping missing ones.
fn full_name(first: Option<&Name>, last: Option<&Name>) -> Option<String> {
    match (first, last) {
        (Some(f), Some(l)) => Some(format!("{f} {l}")),
        (Some(n), None) | (None, Some(n)) => Some(n.to_string()),
        (None, None) => None,
    }
}

/// Changes to a [`Profile`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New first [`Name`].
    pub first_name: Name,

    /// New last [`Name`].
    pub last_name: Name,

    /// New [`Phone`], if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
}

/// Data of a new [`User`] registration.
#[derive(Clone, Debug)]
pub struct Registration {
    /// [`Email`] of the new [`User`].
    pub email: Email,

    /// [`Password`] of the new [`User`].
    pub password: secrecy::SecretBox<Password>,

    /// First [`Name`] of the new [`User`].
    pub first_name: Name,

    /// Last [`Name`] of the new [`User`].
    pub last_name: Name,

    /// Requested [`Role`] of the new [`User`].
    pub role: Role,
}

/// Change of a [`User`]'s [`Role`] by an admin.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RoleChange {
    /// ID of the [`User`].
    pub user_id: Id,

    /// New [`Role`] of the [`User`].
    pub role: Role,
}

/// ID of a [`User`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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

define_kind! {
    #[doc = "Role of a [`User`] on the platform."]
    enum Role {
        #[doc = "Rents a property."]
        Tenant = 0,

        #[doc = "Owns properties and receives payouts."]
        Owner = 1,

        #[doc = "Manages users and payout periods."]
        Admin = 2,
    }
}

impl Role {
    /// Returns the route a [`User`] with this [`Role`] lands on after signing
    /// in.
    #[must_use]
    pub const fn home(self) -> &'static str {
        match self {
            Self::Tenant | Self::Owner => "/dashboard",
            Self::Admin => "/admin",
        }
    }
}

/// Name of a [`User`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.chars().count() <= 100
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Password of a [`User`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Password(String);

impl Password {
    /// Minimum length of a [`Password`] in characters.
    pub const MIN_LEN: usize = 6;

    /// Maximum length of a [`Password`] in characters.
    pub const MAX_LEN: usize = 128;

    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Returns the plain text of this [`Password`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let len = password.as_ref().chars().count();
        (Self::MIN_LEN..=Self::MAX_LEN).contains(&len)
    }
}

impl FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Email address of a [`User`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format:
        /// - exactly one `@`;
        /// - no whitespace;
        /// - a dot-separated domain with a non-empty top level.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)*\.[^\s@.]{2,}$")
                .expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number of a [`User`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^([+]?\d{1,3}[-\s]?|)\d{3}[-\s]?\d{3}[-\s]?\d{4}$")
                .expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// [`DateTime`] when a [`User`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(User, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Email, Password, Phone, Profile, Role};

    #[test]
    fn email_format() {
        assert!(Email::new("name@example.com").is_some());
        assert!(Email::new("first.last@mail.example.co").is_some());
        assert!(Email::new("name@example").is_none());
        assert!(Email::new("name example@x.com").is_none());
        assert!(Email::new("@example.com").is_none());
        assert!(Email::new("a@@b.com").is_none());
    }

    #[test]
    fn password_length() {
        assert!(Password::new("abcdefg").is_some());
        assert!(Password::new("abcde").is_none());
        assert!(Password::new("x".repeat(129)).is_none());
    }

    #[test]
    fn phone_format() {
        assert!(Phone::new("555-123-4567").is_some());
        assert!(Phone::new("+1 555 123 4567").is_some());
        assert!(Phone::new("12345").is_none());
    }

    #[test]
    fn profile_needs_only_role() {
        let profile: Profile = serde_json::from_str(r#"{"role":0}"#).unwrap();
        assert_eq!(profile.role, Role::Tenant);
        assert_eq!(profile.display_name(), None);
        assert_eq!(profile.role.home(), "/dashboard");
        assert_eq!(Role::Admin.home(), "/admin");
    }
}
