//! [`Filter`]s of the entity lists.
//!
//! Option values are the `kebab-case` names of the filtered statuses, so a
//! value can be parsed back into the status it stands for.

use std::{fmt::Display, str::FromStr};

use common::Date;
use strum::IntoEnumIterator;

use crate::domain::{
    application, lease, maintenance, payout, user, Application, Lease,
    Listing, MaintenanceRequest, PayoutPeriod, User,
};

use super::filter::{Filter, FilterOption, ALL};

/// Predicate of a [`Filter`] over `T` rows.
pub type Predicate<T> = Box<dyn Fn(&T, &str) -> bool + Send + Sync>;

/// [`Filter`] over `T` rows with a boxed [`Predicate`].
pub type EntityFilter<T> = Filter<T, Predicate<T>>;

/// Returns [`FilterOption`]s of every variant of the `K` kind.
fn kind_options<K>() -> Vec<FilterOption>
where
    K: IntoEnumIterator + Display,
{
    K::iter()
        .map(|k| {
            let value = k.to_string();
            let label = value.replace('-', " ");
            FilterOption::new(value, capitalize(&label))
        })
        .collect()
}

/// Uppercases the first character of the provided `s`.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|c| c.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// Creates a [`Filter`] matching rows whose `K` kind, extracted with the
/// provided function, equals the selected one.
fn by_kind<T, K>(
    kind_of: impl Fn(&T) -> K + Send + Sync + 'static,
) -> EntityFilter<T>
where
    T: 'static,
    K: IntoEnumIterator + Display + FromStr + PartialEq + 'static,
{
    let predicate: Predicate<T> = Box::new(move |row: &T, value: &str| {
        value == ALL || value.parse::<K>().is_ok_and(|k| kind_of(row) == k)
    });
    Filter::new(kind_options::<K>(), predicate)
}

/// Creates a [`Filter`] of [`MaintenanceRequest`]s by their
/// [`maintenance::Status`].
#[must_use]
pub fn maintenance() -> EntityFilter<MaintenanceRequest> {
    by_kind::<_, maintenance::Status>(|r: &MaintenanceRequest| r.status)
}

/// Creates a [`Filter`] of [`Lease`]s by their [`lease::Status`] as of the
/// provided `today`.
#[must_use]
pub fn leases(today: Date) -> EntityFilter<Lease> {
    by_kind::<_, lease::Status>(move |l: &Lease| l.status(today))
}

/// Creates a [`Filter`] of [`Application`]s by their
/// [`application::Status`].
#[must_use]
pub fn applications() -> EntityFilter<Application> {
    by_kind::<_, application::Status>(|a: &Application| a.status)
}

/// Creates a [`Filter`] of [`User`]s by their [`user::Role`].
#[must_use]
pub fn users() -> EntityFilter<User> {
    by_kind::<_, user::Role>(|u: &User| u.role)
}

/// Creates a [`Filter`] of [`PayoutPeriod`]s by their [`payout::Status`].
#[must_use]
pub fn payout_periods() -> EntityFilter<PayoutPeriod> {
    by_kind::<_, payout::Status>(|p: &PayoutPeriod| p.status)
}

/// Creates a [`Filter`] of [`Listing`]s by whether they are active.
#[must_use]
pub fn listings() -> EntityFilter<Listing> {
    let predicate: Predicate<Listing> =
        Box::new(|l: &Listing, value: &str| match value {
            "active" => l.is_active,
            "inactive" => !l.is_active,
            _ => value == ALL,
        });
    Filter::new(
        [
            FilterOption::new("active", "Active"),
            FilterOption::new("inactive", "Inactive"),
        ],
        predicate,
    )
}

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::domain::MaintenanceRequest;

    use super::{
        applications, leases, maintenance, payout_periods, users,
        EntityFilter, ALL,
    };

    fn requests() -> Vec<MaintenanceRequest> {
        (0..4)
            .map(|status| {
                serde_json::from_value(serde_json::json!({
                    "id": format!("00000000-0000-4000-8000-00000000000{status}"),
                    "listingId": "0d1f0d5e-6a3c-4b1f-8e3f-2a1c9e4b7c22",
                    "title": "Broken heater",
                    "description": "No heat in the bedroom",
                    "status": status,
                }))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn lists_every_status() {
        let values = maintenance()
            .options()
            .iter()
            .map(|o| o.value.to_string())
            .collect::<Vec<_>>();

        assert_eq!(
            values,
            ["all", "pending", "in-progress", "completed", "cancelled"],
        );
        assert_eq!(maintenance().options()[2].label, "In progress");
    }

    #[test]
    fn matches_selected_status_only() {
        let rows = requests();
        let mut filter = maintenance();

        filter.select("pending").unwrap();
        let pending = filter.apply(&rows);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].status.u8(), 0);

        filter.select(ALL).unwrap();
        assert_eq!(filter.apply(&rows).len(), 4);
    }

    fn selects_every_option<T>(mut filter: EntityFilter<T>) {
        let values = filter
            .options()
            .iter()
            .map(|o| o.value.to_string())
            .collect::<Vec<_>>();

        assert_eq!(values[0], ALL);
        assert!(values.len() > 2, "too few options: {values:?}");
        for value in &values {
            filter.select(value).unwrap();
            assert_eq!(filter.selected(), value);
        }
    }

    #[test]
    fn every_status_filter_selects_its_options() {
        selects_every_option(maintenance());
        selects_every_option(leases(Date::today()));
        selects_every_option(applications());
        selects_every_option(users());
        selects_every_option(payout_periods());
    }
}
