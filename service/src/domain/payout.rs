//! Payout definitions.
//!
//! Owner payouts are reconciled per [`PayoutPeriod`]: the rent collected for
//! the owner's properties minus the costs carried by the agency on the owner's
//! behalf.

use common::{define_kind, Date, DateRange, Money};
use derive_more::{Display, Error, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{text::Title, user};
#[cfg(doc)]
use crate::domain::User;

/// Admin-defined date range over which owner payouts are reconciled.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutPeriod {
    /// ID of this [`PayoutPeriod`].
    pub id: Id,

    /// Human readable name of this [`PayoutPeriod`].
    pub name: Title,

    /// First day of this [`PayoutPeriod`].
    pub start_date: Date,

    /// Last day of this [`PayoutPeriod`].
    pub end_date: Date,

    /// [`Status`] of this [`PayoutPeriod`].
    pub status: Status,
}

impl PayoutPeriod {
    /// Returns the [`DateRange`] this [`PayoutPeriod`] covers.
    ///
    /// [`None`] is returned if the backend sent inverted bounds.
    #[must_use]
    pub fn range(&self) -> Option<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

define_kind! {
    #[doc = "Status of a [`PayoutPeriod`]."]
    enum Status {
        #[doc = "Payouts may still be submitted."]
        Open = 0,

        #[doc = "Reconciliation is finished."]
        Closed = 1,
    }
}

/// Data of a new [`PayoutPeriod`].
#[derive(Clone, Debug)]
pub struct PeriodDraft {
    /// Name of the [`PayoutPeriod`].
    pub name: Title,

    /// Dates the [`PayoutPeriod`] covers.
    pub range: DateRange,
}

/// ID of a [`PayoutPeriod`].
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

/// Manual tally of an owner's income and costs over a [`PayoutPeriod`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Reconciliation {
    /// ID of the owner [`User`].
    pub owner_id: user::Id,

    /// ID of the reconciled [`PayoutPeriod`].
    pub period_id: Id,

    /// Rent collected for the owner's properties.
    pub rent_collected: Money,

    /// Maintenance work paid on the owner's behalf.
    pub maintenance_costs: Money,

    /// Utilities paid on the owner's behalf.
    pub utility_costs: Money,

    /// Any other deductions (fees, adjustments).
    pub other_deductions: Money,
}

impl Reconciliation {
    /// Calculates the [`Balance`] of this [`Reconciliation`].
    ///
    /// # Errors
    ///
    /// If the amounts are in different currencies or the calculation
    /// overflows.
    pub fn balance(&self) -> Result<Balance, ReconciliationError> {
        let net = [
            self.maintenance_costs,
            self.utility_costs,
            self.other_deductions,
        ]
        .into_iter()
        .try_fold(self.rent_collected, |acc, cost| {
            if acc.currency != cost.currency {
                return Err(ReconciliationError::CurrencyMismatch);
            }
            acc.checked_sub(cost).ok_or(ReconciliationError::Overflow)
        })?;

        Ok(if net.is_negative() {
            Balance::Deficit(Money {
                amount: -net.amount,
                currency: net.currency,
            })
        } else {
            Balance::Payable(net)
        })
    }

    /// Returns the total of all the costs in this [`Reconciliation`].
    ///
    /// # Errors
    ///
    /// If the amounts are in different currencies or the calculation
    /// overflows.
    pub fn total_costs(&self) -> Result<Money, ReconciliationError> {
        [self.utility_costs, self.other_deductions]
            .into_iter()
            .try_fold(self.maintenance_costs, |acc, cost| {
                if acc.currency != cost.currency {
                    return Err(ReconciliationError::CurrencyMismatch);
                }
                acc.checked_add(cost).ok_or(ReconciliationError::Overflow)
            })
    }
}

/// Payout reconciled and sent to the backend for an owner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Submission {
    /// [`Reconciliation`] the payout is based on.
    pub reconciliation: Reconciliation,

    /// Amount to pay out.
    pub amount: Money,
}

/// Outcome of a [`Reconciliation`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Balance {
    /// Amount owed to the owner.
    #[display("payable {_0}")]
    Payable(Money),

    /// Costs exceeded the income by this amount.
    #[display("deficit {_0}")]
    Deficit(Money),
}

impl Balance {
    /// Returns the amount to pay out, which is zero for a [`Balance::Deficit`].
    #[must_use]
    pub fn payable(&self) -> Money {
        match *self {
            Self::Payable(m) => m,
            Self::Deficit(m) => Money::zero(m.currency),
        }
    }
}

/// Error of calculating a [`Reconciliation`] [`Balance`].
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ReconciliationError {
    /// Amounts are not in the same currency.
    #[display("Amounts must be in the same currency")]
    CurrencyMismatch,

    /// Amounts are too large.
    #[display("Amounts are too large")]
    Overflow,
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money};

    use super::{Balance, Reconciliation, ReconciliationError};

    fn usd(s: &str) -> Money {
        Money {
            amount: s.parse().unwrap(),
            currency: Currency::Usd,
        }
    }

    fn reconciliation(rent: &str, maint: &str, util: &str) -> Reconciliation {
        Reconciliation {
            owner_id: uuid::Uuid::nil().into(),
            period_id: uuid::Uuid::nil().into(),
            rent_collected: usd(rent),
            maintenance_costs: usd(maint),
            utility_costs: usd(util),
            other_deductions: usd("0"),
        }
    }

    #[test]
    fn subtracts_costs_from_rent() {
        let r = reconciliation("3000", "450.25", "120");
        assert_eq!(r.balance().unwrap(), Balance::Payable(usd("2429.75")));
        assert_eq!(r.total_costs().unwrap(), usd("570.25"));
    }

    #[test]
    fn reports_deficit() {
        let r = reconciliation("100", "250", "0");
        let balance = r.balance().unwrap();
        assert_eq!(balance, Balance::Deficit(usd("150")));
        assert_eq!(balance.payable(), usd("0"));
        assert_eq!(balance.to_string(), "deficit 150USD");
    }

    #[test]
    fn rejects_mixed_currencies() {
        let mut r = reconciliation("100", "10", "10");
        r.utility_costs.currency = Currency::Eur;
        assert!(matches!(
            r.balance(),
            Err(ReconciliationError::CurrencyMismatch),
        ));
    }
}
