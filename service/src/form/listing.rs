//! Form of a [`Listing`].

use crate::domain::{
    listing::{self, Address},
    text::{Description, Title},
    Listing,
};

use super::{FieldErrors, Validate};

/// Raw values of the [`Listing`] form.
#[derive(Clone, Debug, Default)]
pub struct ListingForm {
    /// Typed title.
    pub title: String,

    /// Typed description, may be blank.
    pub description: String,

    /// Typed address.
    pub address: String,

    /// Typed monthly price.
    pub price: String,

    /// Typed first day of availability, may be blank.
    pub available_from: String,

    /// Typed last day of availability, may be blank.
    pub available_to: String,

    /// Indicator whether the [`Listing`] is shown to tenants.
    pub is_active: bool,
}

impl From<&Listing> for ListingForm {
    fn from(l: &Listing) -> Self {
        Self {
            title: l.title.to_string(),
            description: l
                .description
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            address: l.address.to_string(),
            price: l.price.to_string(),
            available_from: l
                .available_from
                .map(|d| d.to_string())
                .unwrap_or_default(),
            available_to: l
                .available_to
                .map(|d| d.to_string())
                .unwrap_or_default(),
            is_active: l.is_active,
        }
    }
}

impl Validate for ListingForm {
    type Valid = listing::Draft;

    fn validate(&self) -> Result<Self::Valid, FieldErrors> {
        let mut errs = FieldErrors::default();
        let title = errs.required::<Title>(
            "title",
            &self.title,
            "Title must be a single line of at most 256 characters",
        );
        let description = errs.optional::<Description>(
            "description",
            &self.description,
            "Description must be at most 2000 characters",
        );
        let address = errs.required::<Address>(
            "address",
            &self.address,
            "Address must be at most 512 characters",
        );
        let price = errs.amount("price", &self.price, true);

        let availability = match (
            self.available_from.trim().is_empty(),
            self.available_to.trim().is_empty(),
        ) {
            (true, true) => Some(None),
            _ => errs
                .date_range(
                    ("available_from", self.available_from.as_str()),
                    ("available_to", self.available_to.as_str()),
                )
                .map(Some),
        };

        errs.finish(|| {
            Some(listing::Draft {
                title: title?,
                description: description?,
                address: address?,
                price: price?,
                availability: availability?,
                is_active: self.is_active,
            })
        })
    }
}

#[cfg(test)]
mod spec {
    use super::{ListingForm, Validate};

    fn form() -> ListingForm {
        ListingForm {
            title: "Sunny loft".into(),
            description: String::new(),
            address: "1 Main St".into(),
            price: "1200.50".into(),
            available_from: String::new(),
            available_to: String::new(),
            is_active: true,
        }
    }

    #[test]
    fn availability_is_optional() {
        let draft = form().validate().unwrap();

        assert!(draft.availability.is_none());
        assert!(draft.description.is_none());
        assert_eq!(draft.price.to_string(), "1200.50");
    }

    #[test]
    fn rejects_non_positive_price() {
        let errs = ListingForm {
            price: "0".into(),
            ..form()
        }
        .validate()
        .unwrap_err();

        assert_eq!(errs.get("price"), ["Amount must be greater than zero"]);
    }

    #[test]
    fn rejects_reversed_availability() {
        let errs = ListingForm {
            available_from: "2024-06-01".into(),
            available_to: "2024-05-01".into(),
            ..form()
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            errs.get("available_to"),
            ["End date cannot be before start date"],
        );
        assert!(errs.get("available_from").is_empty());
    }
}
