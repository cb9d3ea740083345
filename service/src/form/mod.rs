//! Form validation and submission.
//!
//! A [`Form`] holds raw field values as they were typed in. Submitting it
//! validates the values into a typed command, runs the provided action with
//! it and reports the outcome through a [`Notifier`].

pub mod application;
pub mod auth;
pub mod lease;
pub mod listing;
pub mod maintenance;
pub mod payout;

use std::{collections::BTreeMap, fmt, future::Future, str::FromStr};

use common::{Date, DateRange};
use derive_more::{Display, Error};
use rust_decimal::Decimal;

use crate::notify::{Notification, Notifier};

pub use self::{
    application::ApplicationForm,
    auth::{LoginForm, ProfileForm, RegisterForm},
    lease::{LeaseForm, PaymentForm},
    listing::ListingForm,
    maintenance::MaintenanceRequestForm,
    payout::{PayoutPeriodForm, ReconciliationForm},
};

/// Validation of raw form values.
pub trait Validate {
    /// Type of the validated values.
    type Valid;

    /// Validates these raw values.
    ///
    /// # Errors
    ///
    /// With [`FieldErrors`] describing every invalid field.
    fn validate(&self) -> Result<Self::Valid, FieldErrors>;
}

/// Validation messages per form field.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    /// Adds the provided message to the `field`.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Passes the provided `value` through, recording the `message` for the
    /// `field` if it is [`None`].
    pub fn check<T>(
        &mut self,
        field: &'static str,
        value: Option<T>,
        message: &str,
    ) -> Option<T> {
        if value.is_none() {
            self.add(field, message);
        }
        value
    }

    /// Parses the provided required `raw` value of the `field`.
    pub fn required<T: FromStr>(
        &mut self,
        field: &'static str,
        raw: &str,
        message: &str,
    ) -> Option<T> {
        let raw = raw.trim();
        if raw.is_empty() {
            self.add(field, "This field is required");
            return None;
        }
        self.check(field, raw.parse().ok(), message)
    }

    /// Parses the provided optional `raw` value of the `field`.
    ///
    /// Blank values are [`None`], and so are invalid ones, which record the
    /// `message`.
    pub fn optional<T: FromStr>(
        &mut self,
        field: &'static str,
        raw: &str,
        message: &str,
    ) -> Option<Option<T>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Some(None);
        }
        self.check(field, raw.parse().ok(), message).map(Some)
    }

    /// Parses the provided required `raw` amount of money of the `field`.
    ///
    /// Zero is accepted only if `positive` is `false`.
    pub fn amount(
        &mut self,
        field: &'static str,
        raw: &str,
        positive: bool,
    ) -> Option<Decimal> {
        let amount =
            self.required::<Decimal>(field, raw, "Enter a valid amount")?;
        if amount < Decimal::ZERO || (positive && amount.is_zero()) {
            self.add(
                field,
                if positive {
                    "Amount must be greater than zero"
                } else {
                    "Amount cannot be negative"
                },
            );
            return None;
        }
        Some(amount)
    }

    /// Parses the provided optional `raw` non-negative amount of money of the
    /// `field`.
    pub fn optional_amount(
        &mut self,
        field: &'static str,
        raw: &str,
    ) -> Option<Option<Decimal>> {
        if raw.trim().is_empty() {
            return Some(None);
        }
        self.amount(field, raw, false).map(Some)
    }

    /// Parses the provided required `raw` bounds of a [`DateRange`].
    ///
    /// The message about disordered bounds is recorded for the `end` field.
    pub fn date_range(
        &mut self,
        (start_field, start): (&'static str, &str),
        (end_field, end): (&'static str, &str),
    ) -> Option<DateRange> {
        const INVALID_DATE: &str = "Enter a date as YYYY-MM-DD";

        let start = self.required::<Date>(start_field, start, INVALID_DATE);
        let end = self.required::<Date>(end_field, end, INVALID_DATE);
        let range = DateRange::new(start?, end?);
        self.check(end_field, range, "End date cannot be before start date")
    }

    /// Indicates whether there are no messages at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the messages of the provided `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// Iterates over the fields and their messages, ordered by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.0.iter().map(|(f, m)| (*f, m.as_slice()))
    }

    /// Builds the valid value if no messages have been recorded.
    ///
    /// # Errors
    ///
    /// With these [`FieldErrors`] if any were recorded, or if the `valid`
    /// value cannot be built.
    pub fn finish<T>(
        self,
        valid: impl FnOnce() -> Option<T>,
    ) -> Result<T, Self> {
        if !self.is_empty() {
            return Err(self);
        }
        valid().ok_or(self)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for msg in messages {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;
                write!(f, "{field}: {msg}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Submission state of a [`Form`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum State {
    /// [`Form`] may be submitted.
    #[default]
    Idle,

    /// [`Form`] is being submitted, so the submit control is disabled.
    Submitting,
}

/// Outcome of the last [`Form`] submission.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Submission succeeded.
    Succeeded,

    /// Submission failed with the provided message.
    Failed(String),
}

/// Form of raw `V`alues.
#[derive(Clone, Debug, Default)]
pub struct Form<V> {
    /// Raw values of this [`Form`].
    values: V,

    /// [`FieldErrors`] of the last validation.
    errors: FieldErrors,

    /// Submission [`State`] of this [`Form`].
    state: State,

    /// [`Outcome`] of the last submission.
    last_outcome: Option<Outcome>,
}

impl<V: Validate> Form<V> {
    /// Creates a new idle [`Form`] with the provided raw values.
    #[must_use]
    pub fn new(values: V) -> Self {
        Self {
            values,
            errors: FieldErrors::default(),
            state: State::Idle,
            last_outcome: None,
        }
    }

    /// Returns the raw values of this [`Form`].
    #[must_use]
    pub fn values(&self) -> &V {
        &self.values
    }

    /// Returns the raw values of this [`Form`] for editing.
    pub fn values_mut(&mut self) -> &mut V {
        &mut self.values
    }

    /// Returns the [`FieldErrors`] of the last validation.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Returns the submission [`State`] of this [`Form`].
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Indicates whether this [`Form`] may be submitted now.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.state == State::Idle
    }

    /// Returns the [`Outcome`] of the last submission, if any.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Validates the raw values and moves into [`State::Submitting`].
    ///
    /// # Errors
    ///
    /// - [`SubmitError::InProgress`] if a submission is in progress already;
    /// - [`SubmitError::Invalid`] if the values are invalid, which are kept
    ///   as [`Form::errors()`] then.
    pub fn begin<E>(&mut self) -> Result<V::Valid, SubmitError<E>> {
        if self.state == State::Submitting {
            return Err(SubmitError::InProgress);
        }
        match self.values.validate() {
            Ok(valid) => {
                self.errors = FieldErrors::default();
                self.state = State::Submitting;
                Ok(valid)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(SubmitError::Invalid(errors))
            }
        }
    }

    /// Finishes the submission started with [`Form::begin()`], notifying about
    /// its result.
    ///
    /// Raw values are kept intact either way.
    pub fn complete<T, E: fmt::Display>(
        &mut self,
        notifier: &impl Notifier,
        success_message: impl Into<String>,
        result: &Result<T, E>,
    ) {
        self.state = State::Idle;
        self.last_outcome = Some(match result {
            Ok(_) => {
                notifier.notify(Notification::success(success_message));
                Outcome::Succeeded
            }
            Err(e) => {
                let message = e.to_string();
                tracing::debug!(%message, "form submission failed");
                notifier.notify(Notification::error(message.clone()));
                Outcome::Failed(message)
            }
        });
    }

    /// Validates and submits this [`Form`] with the provided `action`.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Invalid`] if the values are invalid, in which case
    ///   the `action` is not run;
    /// - [`SubmitError::InProgress`] if a submission is in progress already;
    /// - [`SubmitError::Failed`] if the `action` fails.
    pub async fn submit<F, Fut, T, E>(
        &mut self,
        notifier: &impl Notifier,
        success_message: impl Into<String>,
        action: F,
    ) -> Result<T, SubmitError<E>>
    where
        F: FnOnce(V::Valid) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let valid = self.begin()?;
        let result = action(valid).await;
        self.complete(notifier, success_message, &result);
        result.map_err(SubmitError::Failed)
    }
}

/// Error of a [`Form`] submission.
#[derive(Debug, Display, Error)]
pub enum SubmitError<E> {
    /// Raw values are invalid.
    #[display("Invalid form: {_0}")]
    Invalid(FieldErrors),

    /// Another submission is in progress.
    #[display("Form is being submitted already")]
    InProgress,

    /// Submitted action failed.
    #[display("{_0}")]
    Failed(E),
}

#[cfg(test)]
mod spec {
    use std::convert::Infallible;

    use crate::notify::{Level, Recorder};

    use super::{FieldErrors, Form, Outcome, State, SubmitError, Validate};

    #[derive(Clone, Debug, Default)]
    struct Age {
        raw: String,
    }

    impl Validate for Age {
        type Valid = u8;

        fn validate(&self) -> Result<u8, FieldErrors> {
            let mut errs = FieldErrors::default();
            let age = errs.required("age", &self.raw, "Enter a number");
            errs.finish(|| age)
        }
    }

    fn form(raw: &str) -> Form<Age> {
        Form::new(Age { raw: raw.into() })
    }

    #[tokio::test]
    async fn invalid_values_skip_action() {
        let notifier = Recorder::new();
        let mut form = form("abc");
        let mut ran = false;

        let res = form
            .submit(&notifier, "Saved", |_| {
                ran = true;
                async { Ok::<_, Infallible>(()) }
            })
            .await;

        assert!(matches!(res, Err(SubmitError::Invalid(_))));
        assert!(!ran);
        assert_eq!(form.errors().get("age"), ["Enter a number"]);
        assert_eq!(form.state(), State::Idle);
        assert!(notifier.drain().is_empty());
    }

    #[tokio::test]
    async fn success_notifies_and_keeps_values() {
        let notifier = Recorder::new();
        let mut form = form(" 42 ");

        let res = form
            .submit(&notifier, "Saved", |age| async move {
                Ok::<_, Infallible>(u32::from(age) * 2)
            })
            .await;

        assert_eq!(res.ok(), Some(84));
        assert_eq!(form.values().raw, " 42 ");
        assert_eq!(form.last_outcome(), Some(&Outcome::Succeeded));
        let delivered = notifier.drain();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].level, Level::Success);
        assert_eq!(delivered[0].message, "Saved");
    }

    #[tokio::test]
    async fn failure_notifies_with_error_message() {
        let notifier = Recorder::new();
        let mut form = form("7");

        let res = form
            .submit(&notifier, "Saved", |_| async {
                Err::<(), _>("Listing is not available")
            })
            .await;

        assert!(matches!(res, Err(SubmitError::Failed(_))));
        assert_eq!(form.values().raw, "7");
        assert_eq!(form.state(), State::Idle);
        assert_eq!(
            form.last_outcome(),
            Some(&Outcome::Failed("Listing is not available".into())),
        );
        assert_eq!(notifier.drain()[0].level, Level::Error);
    }

    #[test]
    fn rejects_submission_while_submitting() {
        let notifier = Recorder::new();
        let mut form = form("1");

        assert_eq!(form.begin::<Infallible>().ok(), Some(1));
        assert!(!form.can_submit());
        assert!(matches!(
            form.begin::<Infallible>(),
            Err(SubmitError::InProgress),
        ));

        form.complete(&notifier, "Done", &Ok::<_, Infallible>(()));
        assert!(form.can_submit());
    }

    #[test]
    fn displays_all_messages() {
        let mut errs = FieldErrors::default();
        errs.add("title", "Required");
        errs.add("price", "Must be positive");

        assert_eq!(errs.to_string(), "price: Must be positive; title: Required");
    }
}
