//! Dashboard read model.

use std::collections::HashMap;

use common::Date;
use itertools::Itertools as _;
use rust_decimal::Decimal;
use strum::IntoEnumIterator as _;

use crate::domain::{
    lease, maintenance, user::Profile, Lease, MaintenanceRequest,
};

/// Summary shown on the dashboard of the signed in user.
#[derive(Clone, Debug)]
pub struct Summary {
    /// [`Profile`] of the signed in user.
    pub profile: Profile,

    /// Number of [`Lease`]s in each [`lease::Status`].
    pub leases: HashMap<lease::Status, usize>,

    /// Number of [`MaintenanceRequest`]s in each [`maintenance::Status`].
    pub maintenance: HashMap<maintenance::Status, usize>,

    /// Sum of the monthly rent of the active [`Lease`]s.
    pub monthly_rent: Decimal,
}

impl Summary {
    /// Composes a new [`Summary`] as of the provided `today`.
    #[must_use]
    pub fn compose(
        profile: Profile,
        leases: &[Lease],
        requests: &[MaintenanceRequest],
        today: Date,
    ) -> Self {
        let monthly_rent = leases
            .iter()
            .filter(|l| l.status(today) == lease::Status::Active)
            .map(|l| l.monthly_rent)
            .sum();

        Self {
            profile,
            leases: leases.iter().map(|l| l.status(today)).counts(),
            maintenance: requests.iter().map(|r| r.status).counts(),
            monthly_rent,
        }
    }

    /// Returns the number of [`Lease`]s in the provided [`lease::Status`].
    #[must_use]
    pub fn leases_in(&self, status: lease::Status) -> usize {
        self.leases.get(&status).copied().unwrap_or_default()
    }

    /// Returns the number of [`MaintenanceRequest`]s in the provided
    /// [`maintenance::Status`].
    #[must_use]
    pub fn maintenance_in(&self, status: maintenance::Status) -> usize {
        self.maintenance.get(&status).copied().unwrap_or_default()
    }

    /// Returns the number of [`MaintenanceRequest`]s still awaiting work.
    #[must_use]
    pub fn open_maintenance(&self) -> usize {
        maintenance::Status::iter()
            .filter(|s| !s.is_closed())
            .map(|s| self.maintenance_in(s))
            .sum()
    }

    /// Returns `(label, count)` rows of this [`Summary`] in a stable order.
    #[must_use]
    pub fn rows(&self) -> Vec<(String, usize)> {
        lease::Status::iter()
            .map(|s| (format!("leases {s}"), self.leases_in(s)))
            .chain(
                maintenance::Status::iter()
                    .map(|s| (format!("maintenance {s}"), self.maintenance_in(s))),
            )
            .collect()
    }
}

#[cfg(test)]
mod spec {
    use common::Date;
    use rust_decimal::Decimal;

    use crate::domain::{
        lease, maintenance, user::Profile, Lease, MaintenanceRequest,
    };

    use super::Summary;

    fn lease(start: &str, end: &str, rent: u32) -> Lease {
        serde_json::from_value(serde_json::json!({
            "id": "7d6c0f6e-8a1e-4f3a-9a49-5f3e6b8f0b11",
            "listingId": "0d1f0d5e-6a3c-4b1f-8e3f-2a1c9e4b7c22",
            "tenantId": "3b7a2c1d-9e8f-4a6b-8c5d-1e2f3a4b5c33",
            "startDate": start,
            "endDate": end,
            "monthlyRent": rent,
        }))
        .unwrap()
    }

    fn request(status: u8) -> MaintenanceRequest {
        serde_json::from_value(serde_json::json!({
            "id": "5e4d3c2b-1a09-4f8e-9d7c-6b5a4f3e2d44",
            "listingId": "0d1f0d5e-6a3c-4b1f-8e3f-2a1c9e4b7c22",
            "title": "Leaking tap",
            "description": "Kitchen tap leaks",
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn counts_by_status() {
        let profile: Profile =
            serde_json::from_str(r#"{"role":1}"#).unwrap();
        let today = Date::from_ymd(2024, 6, 1).unwrap();
        let summary = Summary::compose(
            profile,
            &[
                lease("2024-01-01", "2024-12-31", 1000),
                lease("2024-03-01", "2025-02-28", 1500),
                lease("2024-07-01", "2025-06-30", 900),
                lease("2023-01-01", "2023-12-31", 800),
            ],
            &[request(0), request(1), request(2), request(0)],
            today,
        );

        assert_eq!(summary.leases_in(lease::Status::Active), 2);
        assert_eq!(summary.leases_in(lease::Status::Upcoming), 1);
        assert_eq!(summary.leases_in(lease::Status::Expired), 1);
        assert_eq!(summary.leases_in(lease::Status::Terminated), 0);
        assert_eq!(summary.monthly_rent, Decimal::from(2500));
        assert_eq!(summary.maintenance_in(maintenance::Status::Pending), 2);
        assert_eq!(summary.open_maintenance(), 3);
        assert_eq!(summary.rows().len(), 8);
    }
}
