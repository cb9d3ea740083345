//! `auth_token` cookie handling.
//!
//! The token issued on sign in is kept as an `auth_token` cookie, the same
//! way a browser session keeps it, so it can be read back from any `Cookie`
//! header-like string.

use std::{collections::HashMap, time::Duration};

use common::DateTime;
use derive_more::{Display, Error};

use crate::domain::user::session::Token;

/// Name of the cookie holding the authentication token.
pub const AUTH_TOKEN: &str = "auth_token";

/// Default lifetime of an [`AuthCookie`].
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Parses a `Cookie` header value (`a=1; b=2`) into a key-value mapping.
///
/// Whitespace around names and values is trimmed, pairs without `=` or with
/// an empty name are skipped, and later duplicates override earlier ones.
#[must_use]
pub fn parse(header: &str) -> HashMap<String, String> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            (!name.is_empty()).then(|| {
                let value = value.trim().trim_matches('"');
                (name.to_owned(), value.to_owned())
            })
        })
        .collect()
}

/// Extracts the authentication [`Token`] from a `Cookie` header value.
#[must_use]
pub fn auth_token(header: &str) -> Option<Token> {
    parse(header).remove(AUTH_TOKEN).and_then(Token::new)
}

/// `auth_token` cookie with its expiration.
#[derive(Clone, Debug)]
pub struct AuthCookie {
    /// Authentication [`Token`].
    pub token: Token,

    /// [`DateTime`] after which the cookie is no longer valid.
    pub expires_at: DateTime,
}

impl AuthCookie {
    /// Creates a new [`AuthCookie`] expiring after the provided `ttl`.
    #[must_use]
    pub fn new(token: Token, ttl: Duration) -> Self {
        Self {
            token,
            expires_at: DateTime::now() + ttl,
        }
    }

    /// Indicates whether this [`AuthCookie`] has expired at the provided
    /// moment.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime) -> bool {
        now >= self.expires_at
    }

    /// Renders this [`AuthCookie`] in the `Set-Cookie` format.
    #[must_use]
    pub fn to_set_cookie(&self) -> String {
        let max_age = (self.expires_at.unix_timestamp()
            - DateTime::now().unix_timestamp())
        .max(0);
        format!(
            "{AUTH_TOKEN}={}; Path=/; Max-Age={max_age}; Expires={}; \
             SameSite=Lax",
            self.token.expose(),
            self.expires_at.to_rfc2822(),
        )
    }

    /// Parses an [`AuthCookie`] rendered by [`AuthCookie::to_set_cookie()`].
    ///
    /// # Errors
    ///
    /// If the cookie has no token, no valid expiration, or has expired.
    pub fn parse(set_cookie: &str) -> Result<Self, ParseError> {
        let attrs = parse(set_cookie);
        let token = attrs
            .get(AUTH_TOKEN)
            .cloned()
            .and_then(Token::new)
            .ok_or(ParseError::MissingToken)?;
        let expires_at = attrs
            .get("Expires")
            .and_then(|s| DateTime::from_rfc2822(s).ok())
            .ok_or(ParseError::InvalidExpiration)?;

        let cookie = Self { token, expires_at };
        if cookie.is_expired_at(DateTime::now()) {
            return Err(ParseError::Expired);
        }
        Ok(cookie)
    }
}

/// Error of parsing an [`AuthCookie`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ParseError {
    /// Cookie has no `auth_token`.
    #[display("Cookie has no `auth_token`")]
    MissingToken,

    /// Cookie has no valid `Expires` attribute.
    #[display("Cookie has no valid expiration")]
    InvalidExpiration,

    /// Cookie has expired.
    #[display("Cookie has expired")]
    Expired,
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;

    use super::{auth_token, parse, AuthCookie, ParseError, DEFAULT_TTL};
    use crate::domain::user::session::Token;

    #[test]
    fn parses_cookie_header() {
        let map = parse(" theme=dark; auth_token=abc.def ;broken; =x; a=\"q\"");
        assert_eq!(map.len(), 3);
        assert_eq!(map["theme"], "dark");
        assert_eq!(map["auth_token"], "abc.def");
        assert_eq!(map["a"], "q");
        assert!(parse("").is_empty());
    }

    #[test]
    fn extracts_auth_token() {
        assert_eq!(
            auth_token("x=1; auth_token=t1").unwrap().expose(),
            "t1",
        );
        assert!(auth_token("x=1").is_none());
        assert!(auth_token("auth_token=").is_none());
    }

    #[test]
    fn renders_and_reads_back() {
        let cookie = AuthCookie::new(Token::new("t1").unwrap(), DEFAULT_TTL);
        let rendered = cookie.to_set_cookie();
        assert!(rendered.starts_with("auth_token=t1; Path=/; Max-Age="));

        let parsed = AuthCookie::parse(&rendered).unwrap();
        assert_eq!(parsed.token.expose(), "t1");
        assert_eq!(
            parsed.expires_at.unix_timestamp(),
            cookie.expires_at.unix_timestamp(),
        );
        assert!(!parsed.is_expired_at(DateTime::now()));
        assert!(parsed.is_expired_at(DateTime::now() + DEFAULT_TTL * 2));
    }

    #[test]
    fn rejects_expired_cookie() {
        let mut cookie = AuthCookie::new(Token::new("t1").unwrap(), DEFAULT_TTL);
        cookie.expires_at = DateTime::now() - Duration::from_secs(60);
        assert_eq!(
            AuthCookie::parse(&cookie.to_set_cookie()).unwrap_err(),
            ParseError::Expired,
        );
        assert_eq!(
            AuthCookie::parse("theme=dark").unwrap_err(),
            ParseError::MissingToken,
        );
    }
}
