//! [`Session`] definitions.

use secrecy::{ExposeSecret as _, SecretBox, SecretString};

use crate::domain::user::{self, Profile};
#[cfg(doc)]
use crate::domain::User;

/// Authenticated session of a [`User`].
#[derive(Clone, Debug)]
pub struct Session {
    /// [`Token`] authenticating this [`Session`].
    pub token: Token,

    /// [`Profile`] of the [`User`] this [`Session`] belongs to.
    pub profile: Profile,
}

/// Bearer token issued by the backend on sign in.
#[derive(Clone, Debug)]
pub struct Token(SecretString);

impl Token {
    /// Wraps the provided raw token.
    ///
    /// [`None`] is returned if the token is blank.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.trim().is_empty()).then(|| Self(token.into()))
    }

    /// Exposes the raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

/// Credentials a [`User`] signs in with.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// [`user::Email`] of the [`User`].
    pub email: user::Email,

    /// [`user::Password`] of the [`User`].
    pub password: SecretBox<user::Password>,
}

#[cfg(test)]
mod spec {
    use super::Token;

    #[test]
    fn rejects_blank_tokens() {
        assert!(Token::new("").is_none());
        assert!(Token::new("  ").is_none());
        assert_eq!(Token::new("t1").unwrap().expose(), "t1");
        assert!(!format!("{:?}", Token::new("t1").unwrap()).contains("t1"));
    }
}
