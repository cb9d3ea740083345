//! [`Error`]-related definitions.

use std::fmt;

use config::ConfigError;
use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{
    form::{FieldErrors, SubmitError},
    infra::backend,
    view::filter::UnknownFilterValue,
};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Command line client [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] describing this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] with the provided parameters.
    #[must_use]
    pub fn new(
        code: Code,
        status_code: http::StatusCode,
        msg: &impl ToString,
    ) -> Self {
        Self {
            code,
            status_code,
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Create a new [`Error`] representing an internal client error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self::new(
            "INTERNAL_ERROR",
            http::StatusCode::INTERNAL_SERVER_ERROR,
            msg,
        )
    }

    /// Returns the process exit code representing this [`Error`].
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self.status_code.as_u16() {
            401 | 403 => 3,
            400..=499 => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        if error.status_code.is_server_error() {
            error.backtrace = Some(self.trace().clone());
        }
        Some(error)
    }
}

define_error! {
    enum AuthError {
        #[code = "UNAUTHENTICATED"]
        #[status = UNAUTHORIZED]
        #[message = "Authentication required, run `login` first"]
        Unauthenticated,
    }
}

impl AsError for backend::Error {
    fn try_as_error(&self) -> Option<Error> {
        if self.is_unauthenticated() {
            return Some(AuthError::Unauthenticated.into());
        }
        match self {
            Self::Status { status, .. } => {
                let status_code = http::StatusCode::from_u16(*status)
                    .unwrap_or(http::StatusCode::BAD_GATEWAY);
                let code = match status_code {
                    http::StatusCode::NOT_FOUND => "NOT_FOUND",
                    http::StatusCode::FORBIDDEN => "FORBIDDEN",
                    http::StatusCode::CONFLICT => "CONFLICT",
                    s if s.is_client_error() => "REJECTED",
                    _ => "BACKEND_FAILED",
                };
                Some(Error::new(code, status_code, self))
            }
            Self::Http(backend::http::Error::Transport(_)) => Some(Error::new(
                "BACKEND_UNAVAILABLE",
                http::StatusCode::BAD_GATEWAY,
                self,
            )),
            Self::Unauthenticated | Self::Http(backend::http::Error::Decode(_)) => {
                None
            }
        }
    }
}

impl AsError for FieldErrors {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new(
            "VALIDATION_FAILED",
            http::StatusCode::UNPROCESSABLE_ENTITY,
            self,
        ))
    }
}

impl<E: AsError> AsError for SubmitError<E> {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Invalid(e) => e.try_as_error(),
            Self::InProgress => None,
            Self::Failed(e) => e.try_as_error(),
        }
    }
}

impl AsError for UnknownFilterValue {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new(
            "UNKNOWN_FILTER",
            http::StatusCode::BAD_REQUEST,
            self,
        ))
    }
}

impl AsError for ConfigError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new(
            "INVALID_CONFIG",
            http::StatusCode::BAD_REQUEST,
            self,
        ))
    }
}

#[cfg(test)]
mod spec {
    use service::infra::backend::{self, ErrorBody};

    use super::{AsError as _, FieldErrors};

    #[test]
    fn maps_backend_statuses() {
        let err = backend::Error::Status {
            status: 401,
            body: ErrorBody::from_bytes(
                br#"{"data":{"message":"Invalid credentials"}}"#,
            ),
        };
        assert_eq!(err.as_error().code, "UNAUTHENTICATED");
        assert_eq!(err.as_error().exit_code(), 3);

        let err = backend::Error::Status {
            status: 404,
            body: ErrorBody::from_bytes(b"no such lease"),
        };
        let e = err.as_error();
        assert_eq!(e.code, "NOT_FOUND");
        assert_eq!(e.to_string(), "[NOT_FOUND]: no such lease");

        let err = backend::Error::Status {
            status: 500,
            body: ErrorBody::default(),
        };
        assert_eq!(err.as_error().code, "BACKEND_FAILED");
        assert_eq!(err.as_error().exit_code(), 1);

        assert_eq!(
            backend::Error::Unauthenticated.as_error().code,
            "UNAUTHENTICATED",
        );
    }

    #[test]
    fn maps_field_errors() {
        let mut errs = FieldErrors::default();
        errs.add("email", "Enter a valid email address");

        let e = errs.as_error();
        assert_eq!(e.code, "VALIDATION_FAILED");
        assert_eq!(e.exit_code(), 2);
        assert!(e.message.contains("Enter a valid email address"));
    }
}
