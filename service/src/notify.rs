//! Transient user notifications.

use std::sync::{Mutex, PoisonError};

use derive_more::Display;

/// Transient message shown to a user after an action.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("[{level}] {message}")]
pub struct Notification {
    /// [`Level`] of this [`Notification`].
    pub level: Level,

    /// Text of this [`Notification`].
    pub message: String,
}

impl Notification {
    /// Creates a new success [`Notification`].
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    /// Creates a new error [`Notification`].
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Level of a [`Notification`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Level {
    /// Action succeeded.
    #[display("success")]
    Success,

    /// Action failed.
    #[display("error")]
    Error,
}

/// Sink of [`Notification`]s.
pub trait Notifier {
    /// Delivers the provided [`Notification`].
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// [`Notifier`] emitting [`Notification`]s as [`tracing`] events.
#[derive(Clone, Copy, Debug, Default)]
pub struct Log;

impl Notifier for Log {
    fn notify(&self, Notification { level, message }: Notification) {
        match level {
            Level::Success => tracing::info!(%message, "notification"),
            Level::Error => tracing::error!(%message, "notification"),
        }
    }
}

/// [`Notifier`] keeping [`Notification`]s in memory until drained.
#[derive(Debug, Default)]
pub struct Recorder {
    /// Delivered [`Notification`]s in delivery order.
    delivered: Mutex<Vec<Notification>>,
}

impl Recorder {
    /// Creates a new empty [`Recorder`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the delivered [`Notification`]s.
    #[must_use]
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Takes all the delivered [`Notification`]s out of this [`Recorder`].
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(
            &mut *self
                .delivered
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl Notifier for Recorder {
    fn notify(&self, notification: Notification) {
        tracing::debug!(%notification, "recorded notification");
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod spec {
    use super::{Level, Notification, Notifier as _, Recorder};

    #[test]
    fn records_in_order() {
        let recorder = Recorder::new();
        recorder.notify(Notification::success("Saved"));
        recorder.notify(Notification::error("Nope"));

        let delivered = recorder.drain();
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0].level, Level::Success);
        assert_eq!(delivered[1].to_string(), "[error] Nope");
        assert!(recorder.delivered().is_empty());
    }
}
