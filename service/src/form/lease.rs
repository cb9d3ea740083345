//! Forms of a [`Lease`] and of a rent payment.

use crate::{
    command::CreatePaymentIntent,
    domain::{lease, listing, payment::Intent, user},
};
#[cfg(doc)]
use crate::domain::Lease;

use super::{FieldErrors, Validate};

/// Raw values of the [`Lease`] form.
#[derive(Clone, Debug, Default)]
pub struct LeaseForm {
    /// ID of the leased listing.
    pub listing_id: String,

    /// ID of the tenant.
    pub tenant_id: String,

    /// Typed first day of the lease.
    pub start_date: String,

    /// Typed last day of the lease.
    pub end_date: String,

    /// Typed monthly rent.
    pub monthly_rent: String,

    /// Typed security deposit, may be blank.
    pub security_deposit: String,
}

impl Validate for LeaseForm {
    type Valid = lease::Draft;

    fn validate(&self) -> Result<Self::Valid, FieldErrors> {
        let mut errs = FieldErrors::default();
        let listing_id = errs.required::<listing::Id>(
            "listing_id",
            &self.listing_id,
            "Choose a listing",
        );
        let tenant_id = errs.required::<user::Id>(
            "tenant_id",
            &self.tenant_id,
            "Choose a tenant",
        );
        let term = errs.date_range(
            ("start_date", self.start_date.as_str()),
            ("end_date", self.end_date.as_str()),
        );
        let monthly_rent = errs.amount("monthly_rent", &self.monthly_rent, true);
        let security_deposit =
            errs.optional_amount("security_deposit", &self.security_deposit);
        errs.finish(|| {
            Some(lease::Draft {
                listing_id: listing_id?,
                tenant_id: tenant_id?,
                term: term?,
                monthly_rent: monthly_rent?,
                security_deposit: security_deposit?,
            })
        })
    }
}

/// Raw values of the rent payment form.
///
/// Card details never pass through this form: they are collected by the
/// payment provider once the intent is created.
#[derive(Clone, Debug, Default)]
pub struct PaymentForm {
    /// ID of the paid [`Lease`].
    pub lease_id: String,

    /// Typed amount to pay.
    pub amount: String,
}

impl Validate for PaymentForm {
    type Valid = CreatePaymentIntent;

    fn validate(&self) -> Result<Self::Valid, FieldErrors> {
        let mut errs = FieldErrors::default();
        let lease_id =
            errs.required::<lease::Id>("lease_id", &self.lease_id, "Choose a lease");
        let amount = errs.amount("amount", &self.amount, true);
        errs.finish(|| {
            Some(CreatePaymentIntent(Intent {
                lease_id: lease_id?,
                amount: amount?,
            }))
        })
    }
}

#[cfg(test)]
mod spec {
    use super::{LeaseForm, PaymentForm, Validate};

    #[test]
    fn lease_collects_every_error() {
        let errs = LeaseForm {
            listing_id: "nope".into(),
            start_date: "2024-02-30".into(),
            end_date: "2024-03-01".into(),
            monthly_rent: "-5".into(),
            ..LeaseForm::default()
        }
        .validate()
        .unwrap_err();

        let fields = errs.iter().map(|(f, _)| f).collect::<Vec<_>>();
        assert_eq!(
            fields,
            ["listing_id", "monthly_rent", "start_date", "tenant_id"],
        );
    }

    #[test]
    fn lease_deposit_is_optional() {
        let draft = LeaseForm {
            listing_id: "0d1f0d5e-6a3c-4b1f-8e3f-2a1c9e4b7c22".into(),
            tenant_id: "3b7a2c1d-9e8f-4a6b-8c5d-1e2f3a4b5c33".into(),
            start_date: "2024-03-01".into(),
            end_date: "2025-02-28".into(),
            monthly_rent: "950".into(),
            security_deposit: " ".into(),
        }
        .validate()
        .unwrap();

        assert!(draft.security_deposit.is_none());
        assert_eq!(draft.term.to_string(), "2024-03-01 .. 2025-02-28");
    }

    #[test]
    fn payment_needs_positive_amount() {
        let errs = PaymentForm {
            lease_id: "7d6c0f6e-8a1e-4f3a-9a49-5f3e6b8f0b11".into(),
            amount: "0.00".into(),
        }
        .validate()
        .unwrap_err();

        assert_eq!(errs.get("amount").len(), 1);
        assert!(errs.get("lease_id").is_empty());
    }
}
