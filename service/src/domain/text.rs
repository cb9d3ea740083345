//! Free-form text values shared by several entities.

use std::str::FromStr;

use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};

/// Short single-line title of an entity.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Maximum length of a [`Title`] in characters.
    pub const MAX_LEN: usize = 256;

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title
            && !title.is_empty()
            && title.chars().count() <= Self::MAX_LEN
            && !title.contains(['\n', '\r'])
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Multi-line description of an entity.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Maximum length of a [`Description`] in characters.
    pub const MAX_LEN: usize = 2000;

    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Description`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.chars().count() <= Self::MAX_LEN
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Description, Title};

    #[test]
    fn title_rules() {
        assert!(Title::new("Sunny loft").is_some());
        assert!(Title::new(" padded").is_none());
        assert!(Title::new("").is_none());
        assert!(Title::new("two\nlines").is_none());
        assert!(Title::new("x".repeat(Title::MAX_LEN)).is_some());
        assert!(Title::new("x".repeat(Title::MAX_LEN + 1)).is_none());
    }

    #[test]
    fn description_rules() {
        assert!(Description::new("Leaking tap\nin the kitchen").is_some());
        assert!(Description::new("   ").is_none());
        assert!(Description::new("x".repeat(Description::MAX_LEN + 1)).is_none());
    }
}
