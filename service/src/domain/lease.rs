//! [`Lease`] definitions.

use common::{define_kind, unit, Date, DateRange, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{listing, text::Description, user};
#[cfg(doc)]
use crate::domain::{Listing, User};

/// Agreement binding a tenant to a property for a date range.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    /// ID of this [`Lease`].
    pub id: Id,

    /// ID of the leased [`Listing`].
    pub listing_id: listing::Id,

    /// ID of the tenant [`User`].
    pub tenant_id: user::Id,

    /// First day of this [`Lease`].
    pub start_date: Date,

    /// Last day of this [`Lease`].
    pub end_date: Date,

    /// Rent due every month.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_rent: Decimal,

    /// Security deposit held for this [`Lease`].
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub security_deposit: Option<Decimal>,

    /// [`DateTime`] when this [`Lease`] was terminated early, if it was.
    ///
    /// [`DateTime`]: common::DateTime
    #[serde(default)]
    pub terminated_at: Option<TerminationDateTime>,
}

impl Lease {
    /// Returns [`Status`] of this [`Lease`] as of the provided day.
    #[must_use]
    pub fn status(&self, today: Date) -> Status {
        if self.terminated_at.is_some() {
            return Status::Terminated;
        }
        if today < self.start_date {
            return Status::Upcoming;
        }
        if today > self.end_date {
            return Status::Expired;
        }
        Status::Active
    }
}

define_kind! {
    #[doc = "Status of a [`Lease`]."]
    enum Status {
        #[doc = "[`Lease`] has not started yet."]
        Upcoming = 0,

        #[doc = "[`Lease`] is in effect."]
        Active = 1,

        #[doc = "[`Lease`] has run its full term."]
        Expired = 2,

        #[doc = "[`Lease`] was terminated before its end date."]
        Terminated = 3,
    }
}

/// Data of a new [`Lease`].
#[derive(Clone, Debug)]
pub struct Draft {
    /// ID of the leased [`Listing`].
    pub listing_id: listing::Id,

    /// ID of the tenant [`User`].
    pub tenant_id: user::Id,

    /// Term of the [`Lease`].
    pub term: DateRange,

    /// Rent due every month.
    pub monthly_rent: Decimal,

    /// Security deposit, if any.
    pub security_deposit: Option<Decimal>,
}

/// Early termination of a [`Lease`].
#[derive(Clone, Debug)]
pub struct Termination {
    /// ID of the terminated [`Lease`].
    pub lease_id: Id,

    /// Reason of the termination, if given.
    pub reason: Option<Description>,
}

/// ID of a [`Lease`].
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

/// [`DateTime`] when a [`Lease`] was terminated.
///
/// [`DateTime`]: common::DateTime
pub type TerminationDateTime = DateTimeOf<(Lease, unit::Termination)>;

#[cfg(test)]
mod spec {
    use common::{Date, DateTime};
    use rust_decimal::Decimal;

    use super::{Id, Lease, Status};

    fn lease(start: Date, end: Date) -> Lease {
        Lease {
            id: Id::from(uuid::Uuid::nil()),
            listing_id: uuid::Uuid::nil().into(),
            tenant_id: uuid::Uuid::nil().into(),
            start_date: start,
            end_date: end,
            monthly_rent: Decimal::ONE_HUNDRED,
            security_deposit: None,
            terminated_at: None,
        }
    }

    #[test]
    fn status_follows_term() {
        let day = |d| Date::from_ymd(2024, 6, d).unwrap();
        let mut l = lease(day(10), day(20));

        assert_eq!(l.status(day(1)), Status::Upcoming);
        assert_eq!(l.status(day(10)), Status::Active);
        assert_eq!(l.status(day(20)), Status::Active);
        assert_eq!(l.status(day(21)), Status::Expired);

        l.terminated_at = Some(DateTime::now().coerce());
        assert_eq!(l.status(day(15)), Status::Terminated);
    }
}
