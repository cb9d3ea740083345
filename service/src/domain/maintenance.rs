//! [`MaintenanceRequest`] definitions.

use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    listing,
    text::{Description, Title},
};
#[cfg(doc)]
use crate::domain::Listing;

/// Issue reported by a tenant together with its remediation work.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    /// ID of this [`MaintenanceRequest`].
    pub id: Id,

    /// ID of the [`Listing`] the issue is reported for.
    pub listing_id: listing::Id,

    /// Short [`Title`] of the issue.
    pub title: Title,

    /// Detailed [`Description`] of the issue.
    pub description: Description,

    /// Current [`Status`] of this [`MaintenanceRequest`].
    pub status: Status,

    /// [`Priority`] of this [`MaintenanceRequest`].
    #[serde(default)]
    pub priority: Priority,

    /// Cost of the remediation work, once known.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub cost: Option<Decimal>,

    /// [`DateTime`] when this [`MaintenanceRequest`] was reported.
    ///
    /// [`DateTime`]: common::DateTime
    #[serde(default)]
    pub created_at: Option<CreationDateTime>,
}

define_kind! {
    #[doc = "Status of a [`MaintenanceRequest`]."]
    enum Status {
        #[doc = "Reported and waiting for triage."]
        Pending = 0,

        #[doc = "Remediation work is under way."]
        InProgress = 1,

        #[doc = "Remediation work is done."]
        Completed = 2,

        #[doc = "Request was withdrawn or rejected."]
        Cancelled = 3,
    }
}

impl Status {
    /// Indicates whether no further transitions are possible from this
    /// [`Status`].
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Indicates whether a [`MaintenanceRequest`] may move from this
    /// [`Status`] into the provided one.
    #[must_use]
    pub fn can_become(self, next: Self) -> bool {
        !self.is_closed() && self != next
    }
}

define_kind! {
    #[doc = "Urgency of a [`MaintenanceRequest`]."]
    enum Priority {
        #[doc = "Can wait for a scheduled visit."]
        Low = 0,

        #[doc = "Should be handled within days."]
        Medium = 1,

        #[doc = "Affects habitability."]
        High = 2,
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Data of a new [`MaintenanceRequest`].
#[derive(Clone, Debug)]
pub struct Draft {
    /// ID of the [`Listing`] the issue is reported for.
    pub listing_id: listing::Id,

    /// Short [`Title`] of the issue.
    pub title: Title,

    /// Detailed [`Description`] of the issue.
    pub description: Description,

    /// [`Priority`] of the issue.
    pub priority: Priority,
}

/// Change of a [`MaintenanceRequest`]'s [`Status`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusChange {
    /// ID of the [`MaintenanceRequest`].
    pub id: Id,

    /// New [`Status`].
    pub status: Status,

    /// Final cost of the work, if known.
    pub cost: Option<Decimal>,
}

/// ID of a [`MaintenanceRequest`].
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

/// [`DateTime`] when a [`MaintenanceRequest`] was reported.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(MaintenanceRequest, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::Status;

    #[test]
    fn closed_requests_cannot_transition() {
        assert!(Status::Pending.can_become(Status::InProgress));
        assert!(Status::InProgress.can_become(Status::Completed));
        assert!(Status::Pending.can_become(Status::Cancelled));
        assert!(!Status::Pending.can_become(Status::Pending));
        assert!(!Status::Completed.can_become(Status::InProgress));
        assert!(!Status::Cancelled.can_become(Status::Pending));
    }
}
