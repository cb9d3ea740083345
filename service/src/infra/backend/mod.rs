//! [`Backend`]-related implementations.

#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError, From};
use serde::{Deserialize, Serialize};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Request to the backend REST API.
pub use common::Handler as Backend;

/// [`Backend`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Backend responded with a non-successful status.
    #[display("{}", body.message(*status))]
    #[from(ignore)]
    Status {
        /// HTTP status code of the response.
        status: u16,

        /// Structured [`ErrorBody`] of the response.
        body: ErrorBody,
    },

    /// Authenticated request was attempted without a token.
    #[display("Authentication required, please sign in")]
    #[from(ignore)]
    Unauthenticated,

    #[cfg(feature = "http")]
    /// [`Http`] transport error.
    #[display("{_0}")]
    Http(http::Error),
}

impl Error {
    /// Returns the HTTP status code the backend responded with, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthenticated => None,
            #[cfg(feature = "http")]
            Self::Http(_) => None,
        }
    }

    /// Indicates whether this [`Error`] means the user must sign in (again).
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated) || self.status() == Some(401)
    }

    /// Indicates whether this [`Error`] means the requested entity does not
    /// exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Structured error body returned by the backend.
///
/// Every field is optional on the wire.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorBody {
    /// Details of the error.
    pub data: Option<ErrorData>,

    /// HTTP status code echoed by the backend.
    pub status_code: Option<u16>,

    /// Short error name, or the raw body when it was not JSON.
    pub error: Option<String>,

    /// Backend stack trace, in development builds.
    pub stack_trace: Option<String>,
}

impl ErrorBody {
    /// Parses an [`ErrorBody`] out of a raw response body.
    ///
    /// Non-JSON bodies are kept as the [`ErrorBody::error`] text.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_else(|_| {
            let text = String::from_utf8_lossy(bytes).trim().to_owned();
            Self {
                error: (!text.is_empty()).then_some(text),
                ..Self::default()
            }
        })
    }

    /// Returns the message to show to a user for this [`ErrorBody`].
    #[must_use]
    pub fn message(&self, status: u16) -> String {
        self.data
            .as_ref()
            .and_then(|d| d.message.as_deref())
            .or(self.error.as_deref())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map_or_else(
                || format!("Request failed with status {status}"),
                ToOwned::to_owned,
            )
    }
}

/// Details of an [`ErrorBody`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ErrorData {
    /// Message describing the error.
    pub message: Option<String>,

    /// Additional details, usually per-field validation messages.
    pub details: Option<serde_json::Value>,

    /// Moment the error happened, as reported by the backend.
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod spec {
    use super::{Error, ErrorBody};

    #[test]
    fn prefers_data_message() {
        let body = ErrorBody::from_bytes(
            br#"{"data":{"message":"Invalid credentials"},"statusCode":401,"error":"Unauthorized"}"#,
        );
        assert_eq!(body.message(401), "Invalid credentials");
        assert_eq!(body.status_code, Some(401));

        let err = Error::Status { status: 401, body };
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(err.is_unauthenticated());
    }

    #[test]
    fn falls_back_to_error_then_status() {
        let body = ErrorBody::from_bytes(br#"{"error":"Bad Request"}"#);
        assert_eq!(body.message(400), "Bad Request");

        let body = ErrorBody::from_bytes(b"upstream timed out");
        assert_eq!(body.message(502), "upstream timed out");

        let body = ErrorBody::from_bytes(b"");
        assert_eq!(body.message(500), "Request failed with status 500");

        let body = ErrorBody::from_bytes(br#"{"data":{"message":"  "}}"#);
        assert_eq!(body.message(404), "Request failed with status 404");
    }
}
