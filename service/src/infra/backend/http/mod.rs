//! HTTP [`Backend`] implementation.

mod impls;

use std::{
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};

use derive_more::{Display, Error as StdError, From};
use reqwest::{header, multipart, Method};
use serde::{de::DeserializeOwned, Serialize};
use tracerr::Traced;

use crate::{domain::user::session::Token, infra::backend};
#[cfg(doc)]
use crate::infra::Backend;

/// HTTP client of the backend REST API.
///
/// Clones share the same connection pool and bearer [`Token`].
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying [`reqwest::Client`].
    client: reqwest::Client,

    /// Base URL every request path is appended to.
    base_url: String,

    /// Bearer [`Token`] attached to authenticated requests.
    token: Arc<RwLock<Option<Token>>>,
}

impl Http {
    /// Creates a new [`Http`] client of the backend at the provided
    /// `base_url`.
    ///
    /// Without a `timeout` requests wait as long as the HTTP client does by
    /// default.
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client cannot be initialized.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, Traced<backend::Error>> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: Arc::default(),
        })
    }

    /// Sets the bearer [`Token`] of this [`Http`] client.
    #[must_use]
    pub fn with_token(self, token: Option<Token>) -> Self {
        self.set_token(token);
        self
    }

    /// Returns the current bearer [`Token`], if any.
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the bearer [`Token`] used by this [`Http`] client.
    pub fn set_token(&self, token: Option<Token>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Returns the base URL of this [`Http`] client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends the provided [`Request`] and decodes its JSON response.
    ///
    /// Empty successful responses decode as JSON `null`.
    async fn send<T: DeserializeOwned>(
        &self,
        req: Request,
    ) -> Result<T, Traced<backend::Error>> {
        let Request {
            method,
            path,
            query,
            body,
            auth,
        } = req;

        let mut builder = self
            .client
            .request(method.clone(), format!("{}{path}", self.base_url))
            .header(header::ACCEPT, "application/json");
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if auth {
            let token = self
                .token()
                .ok_or_else(|| tracerr::new!(backend::Error::Unauthenticated))?;
            builder = builder.bearer_auth(token.expose());
        }
        builder = match body {
            Body::Empty => builder,
            Body::Json(json) => builder.json(&json),
            Body::Multipart(form) => builder.multipart(form),
        };

        tracing::debug!(%method, %path, "sending backend request");
        let resp = builder
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        if !status.is_success() {
            let err = backend::Error::Status {
                status: status.as_u16(),
                body: backend::ErrorBody::from_bytes(&bytes),
            };
            tracing::warn!(
                %method,
                %path,
                status = status.as_u16(),
                "backend request failed: {err}",
            );
            return Err(tracerr::new!(err));
        }
        tracing::debug!(
            %method,
            %path,
            status = status.as_u16(),
            "backend request succeeded",
        );

        let bytes: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(bytes)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

/// Request to the backend REST API.
#[derive(Debug)]
struct Request {
    /// HTTP [`Method`] of this [`Request`].
    method: Method,

    /// Path of this [`Request`] relative to the base URL.
    path: String,

    /// Query parameters of this [`Request`].
    query: Vec<(&'static str, String)>,

    /// [`Body`] of this [`Request`].
    body: Body,

    /// Indicator whether the bearer [`Token`] must be attached.
    auth: bool,
}

impl Request {
    /// Creates a new authenticated [`Request`] without a body.
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
            auth: true,
        }
    }

    /// Creates a new `GET` [`Request`].
    fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a new `POST` [`Request`].
    fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a new `PUT` [`Request`].
    fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a new `DELETE` [`Request`].
    fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sets the JSON body of this [`Request`].
    ///
    /// # Errors
    ///
    /// If the provided `body` cannot be represented as JSON.
    fn json(
        mut self,
        body: &impl Serialize,
    ) -> Result<Self, Traced<backend::Error>> {
        self.body = Body::Json(
            serde_json::to_value(body)
                .map_err(tracerr::from_and_wrap!(=> Error))
                .map_err(tracerr::map_from)?,
        );
        Ok(self)
    }

    /// Sets the `multipart/form-data` body of this [`Request`].
    fn multipart(mut self, form: multipart::Form) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    /// Appends the provided query parameters to this [`Request`].
    fn query(
        mut self,
        pairs: impl IntoIterator<Item = (&'static str, String)>,
    ) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Marks this [`Request`] as not requiring authentication.
    fn anonymous(mut self) -> Self {
        self.auth = false;
        self
    }
}

/// Body of a [`Request`].
#[derive(Debug)]
enum Body {
    /// No body.
    Empty,

    /// JSON body.
    Json(serde_json::Value),

    /// `multipart/form-data` body.
    Multipart(multipart::Form),
}

/// [`Http`] transport error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request could not be sent or its response could not be read.
    #[display("Network request failed: {_0}")]
    Transport(reqwest::Error),

    /// Body is not the expected JSON.
    #[display("Unexpected data format: {_0}")]
    Decode(serde_json::Error),
}

/// Converts a "not found" [`backend::Error`] into [`None`].
fn optional<T>(
    res: Result<T, Traced<backend::Error>>,
) -> Result<Option<T>, Traced<backend::Error>> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.as_ref().is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
