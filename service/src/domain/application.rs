//! Rental [`Application`] definitions.

use common::{define_kind, unit, Date, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{listing, text::Description, user};
#[cfg(doc)]
use crate::domain::{Listing, User};

/// Request of a prospective tenant to rent a [`Listing`].
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// ID of this [`Application`].
    pub id: Id,

    /// ID of the [`Listing`] applied for.
    pub listing_id: listing::Id,

    /// ID of the applying [`User`].
    pub applicant_id: user::Id,

    /// Message to the owner.
    #[serde(default)]
    pub message: Option<Description>,

    /// Declared monthly income of the applicant.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub monthly_income: Option<Decimal>,

    /// Desired move-in day.
    #[serde(default)]
    pub move_in_date: Option<Date>,

    /// Current [`Status`] of this [`Application`].
    pub status: Status,

    /// [`DateTime`] when this [`Application`] was submitted.
    ///
    /// [`DateTime`]: common::DateTime
    #[serde(default)]
    pub submitted_at: Option<SubmissionDateTime>,
}

define_kind! {
    #[doc = "Status of an [`Application`]."]
    enum Status {
        #[doc = "Waiting for the owner's decision."]
        Pending = 0,

        #[doc = "Accepted by the owner."]
        Approved = 1,

        #[doc = "Declined by the owner."]
        Rejected = 2,
    }
}

/// Data of a new [`Application`].
#[derive(Clone, Debug)]
pub struct Draft {
    /// ID of the [`Listing`] applied for.
    pub listing_id: listing::Id,

    /// Message to the owner.
    pub message: Option<Description>,

    /// Declared monthly income.
    pub monthly_income: Option<Decimal>,

    /// Desired move-in day.
    pub move_in_date: Option<Date>,
}

/// Decision on a pending [`Application`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Approve the [`Application`].
    Approve,

    /// Reject the [`Application`].
    Reject,
}

impl From<Decision> for Status {
    fn from(d: Decision) -> Self {
        match d {
            Decision::Approve => Self::Approved,
            Decision::Reject => Self::Rejected,
        }
    }
}

/// [`Decision`] made on a specific [`Application`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Review {
    /// ID of the reviewed [`Application`].
    pub id: Id,

    /// [`Decision`] made.
    pub decision: Decision,
}

/// ID of an [`Application`].
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

/// [`DateTime`] when an [`Application`] was submitted.
///
/// [`DateTime`]: common::DateTime
pub type SubmissionDateTime = DateTimeOf<(Application, unit::Creation)>;
