//! Form of a rental [`Application`].

use common::Date;

use crate::domain::{application, listing, text::Description};
#[cfg(doc)]
use crate::domain::Application;

use super::{FieldErrors, Validate};

/// Raw values of the [`Application`] form.
#[derive(Clone, Debug, Default)]
pub struct ApplicationForm {
    /// ID of the listing applied for.
    pub listing_id: String,

    /// Typed message to the owner, may be blank.
    pub message: String,

    /// Typed monthly income, may be blank.
    pub monthly_income: String,

    /// Typed desired move-in date, may be blank.
    pub move_in_date: String,
}

impl Validate for ApplicationForm {
    type Valid = application::Draft;

    fn validate(&self) -> Result<Self::Valid, FieldErrors> {
        let mut errs = FieldErrors::default();
        let listing_id = errs.required::<listing::Id>(
            "listing_id",
            &self.listing_id,
            "Choose a listing",
        );
        let message = errs.optional::<Description>(
            "message",
            &self.message,
            "Message must be at most 2000 characters",
        );
        let monthly_income =
            errs.optional_amount("monthly_income", &self.monthly_income);
        let move_in_date = errs.optional::<Date>(
            "move_in_date",
            &self.move_in_date,
            "Enter a date as YYYY-MM-DD",
        );
        errs.finish(|| {
            Some(application::Draft {
                listing_id: listing_id?,
                message: message?,
                monthly_income: monthly_income?,
                move_in_date: move_in_date?,
            })
        })
    }
}

#[cfg(test)]
mod spec {
    use super::{ApplicationForm, Validate};

    #[test]
    fn only_listing_is_required() {
        let draft = ApplicationForm {
            listing_id: "0d1f0d5e-6a3c-4b1f-8e3f-2a1c9e4b7c22".into(),
            ..ApplicationForm::default()
        }
        .validate()
        .unwrap();

        assert!(draft.message.is_none());
        assert!(draft.monthly_income.is_none());
        assert!(draft.move_in_date.is_none());
    }

    #[test]
    fn rejects_malformed_optional_fields() {
        let errs = ApplicationForm {
            listing_id: "0d1f0d5e-6a3c-4b1f-8e3f-2a1c9e4b7c22".into(),
            message: String::new(),
            monthly_income: "lots".into(),
            move_in_date: "soon".into(),
        }
        .validate()
        .unwrap_err();

        assert_eq!(errs.get("monthly_income").len(), 1);
        assert_eq!(errs.get("move_in_date").len(), 1);
    }
}
