//! [`Application`]-related [`Backend`] implementations.

use common::{
    operations::{By, Insert, Select, Update},
    pagination::Params,
    Date, Page, PageRequest,
};
use rust_decimal::Decimal;
use serde::{de::IgnoredAny, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        application::{self, Draft, Review},
        listing,
        text::Description,
        Application,
    },
    infra::{
        backend::{
            self,
            http::{optional, Request},
        },
        Backend, Http,
    },
};

use super::Paged;

impl Backend<Select<By<Page<Application>, PageRequest>>> for Http {
    type Ok = Page<Application>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page<Application>, PageRequest>>,
    ) -> Result<Self::Ok, Self::Err> {
        let page = by.into_inner();
        let req =
            Request::get("/api/Applications").query(Params::Page.query(page));
        Ok(self.send::<Paged<Application>>(req).await?.into_page(page))
    }
}

impl Backend<Select<By<Option<Application>, application::Id>>> for Http {
    type Ok = Option<Application>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Application>, application::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req =
            Request::get(format!("/api/Applications/{}", by.into_inner()));
        optional(self.send(req).await)
    }
}

impl Backend<Insert<Draft>> for Http {
    type Ok = Application;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            listing_id: listing::Id,
            #[serde(skip_serializing_if = "Option::is_none")]
            message: Option<&'a Description>,
            #[serde(
                skip_serializing_if = "Option::is_none",
                with = "rust_decimal::serde::float_option"
            )]
            monthly_income: Option<Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            move_in_date: Option<Date>,
        }

        let req = Request::post("/api/Applications").json(&Body {
            listing_id: draft.listing_id,
            message: draft.message.as_ref(),
            monthly_income: draft.monthly_income,
            move_in_date: draft.move_in_date,
        })?;
        self.send(req).await
    }
}

impl Backend<Update<Review>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(review): Update<Review>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        struct Body {
            status: application::Status,
        }

        let req =
            Request::put(format!("/api/Applications/{}/status", review.id))
                .json(&Body {
                    status: review.decision.into(),
                })?;
        self.send::<IgnoredAny>(req).await.map(drop)
    }
}
