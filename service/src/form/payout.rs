//! Forms of payout periods and owner reconciliations.

use common::{money::Currency, Money};

use crate::{
    command::SubmitPayout,
    domain::{
        payout::{self, PeriodDraft, Reconciliation},
        text::Title,
        user,
    },
};
#[cfg(doc)]
use crate::domain::PayoutPeriod;

use super::{FieldErrors, Validate};

/// Raw values of the [`PayoutPeriod`] form.
#[derive(Clone, Debug, Default)]
pub struct PayoutPeriodForm {
    /// Typed name of the period.
    pub name: String,

    /// Typed first day of the period.
    pub start_date: String,

    /// Typed last day of the period.
    pub end_date: String,
}

impl Validate for PayoutPeriodForm {
    type Valid = PeriodDraft;

    fn validate(&self) -> Result<Self::Valid, FieldErrors> {
        let mut errs = FieldErrors::default();
        let name = errs.required::<Title>(
            "name",
            &self.name,
            "Name must be a single line of at most 256 characters",
        );
        let range = errs.date_range(
            ("start_date", self.start_date.as_str()),
            ("end_date", self.end_date.as_str()),
        );
        errs.finish(|| {
            Some(PeriodDraft {
                name: name?,
                range: range?,
            })
        })
    }
}

/// Raw values of the owner reconciliation form.
#[derive(Clone, Debug)]
pub struct ReconciliationForm {
    /// ID of the reconciled owner.
    pub owner_id: String,

    /// ID of the reconciled period.
    pub period_id: String,

    /// [`Currency`] all the amounts are typed in.
    pub currency: Currency,

    /// Typed rent collected for the owner's properties.
    pub rent_collected: String,

    /// Typed maintenance costs, blank for none.
    pub maintenance_costs: String,

    /// Typed utility costs, blank for none.
    pub utility_costs: String,

    /// Typed other deductions, blank for none.
    pub other_deductions: String,
}

impl ReconciliationForm {
    /// Creates a new empty [`ReconciliationForm`] in the provided
    /// [`Currency`].
    #[must_use]
    pub fn new(currency: Currency) -> Self {
        Self {
            owner_id: String::new(),
            period_id: String::new(),
            currency,
            rent_collected: String::new(),
            maintenance_costs: String::new(),
            utility_costs: String::new(),
            other_deductions: String::new(),
        }
    }
}

impl Validate for ReconciliationForm {
    type Valid = SubmitPayout;

    fn validate(&self) -> Result<Self::Valid, FieldErrors> {
        let mut errs = FieldErrors::default();
        let money = |amount| Money {
            amount,
            currency: self.currency,
        };

        let owner_id = errs.required::<user::Id>(
            "owner_id",
            &self.owner_id,
            "Choose an owner",
        );
        let period_id = errs.required::<payout::Id>(
            "period_id",
            &self.period_id,
            "Choose a payout period",
        );
        let rent_collected =
            errs.amount("rent_collected", &self.rent_collected, false);
        let maintenance_costs =
            errs.optional_amount("maintenance_costs", &self.maintenance_costs);
        let utility_costs =
            errs.optional_amount("utility_costs", &self.utility_costs);
        let other_deductions =
            errs.optional_amount("other_deductions", &self.other_deductions);

        errs.finish(|| {
            let cost = |c: Option<_>| money(c.unwrap_or_default());
            Some(SubmitPayout(Reconciliation {
                owner_id: owner_id?,
                period_id: period_id?,
                rent_collected: money(rent_collected?),
                maintenance_costs: cost(maintenance_costs?),
                utility_costs: cost(utility_costs?),
                other_deductions: cost(other_deductions?),
            }))
        })
    }
}

#[cfg(test)]
mod spec {
    use common::money::Currency;

    use crate::domain::payout::Balance;

    use super::{PayoutPeriodForm, ReconciliationForm, Validate};

    #[test]
    fn period_needs_ordered_dates() {
        let errs = PayoutPeriodForm {
            name: "May 2024".into(),
            start_date: "2024-05-31".into(),
            end_date: "2024-05-01".into(),
        }
        .validate()
        .unwrap_err();

        assert_eq!(errs.get("end_date").len(), 1);
    }

    #[test]
    fn blank_costs_are_zero() {
        let form = ReconciliationForm {
            owner_id: "3b7a2c1d-9e8f-4a6b-8c5d-1e2f3a4b5c33".into(),
            period_id: "5e4d3c2b-1a09-4f8e-9d7c-6b5a4f3e2d44".into(),
            rent_collected: "2000".into(),
            maintenance_costs: "150.25".into(),
            ..ReconciliationForm::new(Currency::Usd)
        };

        let cmd = form.validate().unwrap();
        let Balance::Payable(net) = cmd.0.balance().unwrap() else {
            panic!("expected payable balance");
        };
        assert_eq!(net.to_string(), "1849.75USD");
    }
}
