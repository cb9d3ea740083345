//! Form of a [`MaintenanceRequest`].

use crate::domain::{
    listing,
    maintenance::{self, Priority},
    text::{Description, Title},
};
#[cfg(doc)]
use crate::domain::MaintenanceRequest;

use super::{FieldErrors, Validate};

/// Raw values of the [`MaintenanceRequest`] form.
#[derive(Clone, Debug, Default)]
pub struct MaintenanceRequestForm {
    /// ID of the affected listing.
    pub listing_id: String,

    /// Typed short summary of the issue.
    pub title: String,

    /// Typed details of the issue.
    pub description: String,

    /// Chosen [`Priority`] in `kebab-case`, blank for the default one.
    pub priority: String,
}

impl Validate for MaintenanceRequestForm {
    type Valid = maintenance::Draft;

    fn validate(&self) -> Result<Self::Valid, FieldErrors> {
        let mut errs = FieldErrors::default();
        let listing_id = errs.required::<listing::Id>(
            "listing_id",
            &self.listing_id,
            "Choose a listing",
        );
        let title = errs.required::<Title>(
            "title",
            &self.title,
            "Title must be a single line of at most 256 characters",
        );
        let description = errs.required::<Description>(
            "description",
            &self.description,
            "Description must be at most 2000 characters",
        );
        let priority = errs.optional::<Priority>(
            "priority",
            &self.priority,
            "Choose low, medium or high priority",
        );
        errs.finish(|| {
            Some(maintenance::Draft {
                listing_id: listing_id?,
                title: title?,
                description: description?,
                priority: priority?.unwrap_or_default(),
            })
        })
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::maintenance::Priority;

    use super::{MaintenanceRequestForm, Validate};

    #[test]
    fn priority_defaults_to_medium() {
        let mut form = MaintenanceRequestForm {
            listing_id: "0d1f0d5e-6a3c-4b1f-8e3f-2a1c9e4b7c22".into(),
            title: "Broken heater".into(),
            description: "No heat in the bedroom".into(),
            priority: String::new(),
        };
        assert_eq!(form.validate().unwrap().priority, Priority::Medium);

        form.priority = "high".into();
        assert_eq!(form.validate().unwrap().priority, Priority::High);

        form.priority = "urgent".into();
        assert_eq!(form.validate().unwrap_err().get("priority").len(), 1);
    }

    #[test]
    fn description_is_required() {
        let errs = MaintenanceRequestForm {
            title: "Broken heater".into(),
            description: "   ".into(),
            ..MaintenanceRequestForm::default()
        }
        .validate()
        .unwrap_err();

        assert_eq!(errs.get("description"), ["This field is required"]);
    }
}
