//! [`Lease`]-related [`Backend`] implementations.

use common::{
    operations::{By, Insert, Perform, Select},
    Date,
};
use rust_decimal::Decimal;
use serde::{de::IgnoredAny, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        lease::{self, Draft, Termination},
        listing,
        text::Description,
        user, Lease,
    },
    infra::{
        backend::{
            self,
            http::{optional, Request},
        },
        Backend, Http,
    },
};

impl Backend<Select<By<Vec<Lease>, ()>>> for Http {
    type Ok = Vec<Lease>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Lease>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.send(Request::get("/api/Lease")).await
    }
}

impl Backend<Select<By<Option<Lease>, lease::Id>>> for Http {
    type Ok = Option<Lease>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Lease>, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = Request::get(format!("/api/Lease/{}", by.into_inner()));
        optional(self.send(req).await)
    }
}

impl Backend<Insert<Draft>> for Http {
    type Ok = Lease;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body {
            listing_id: listing::Id,
            tenant_id: user::Id,
            start_date: Date,
            end_date: Date,
            #[serde(with = "rust_decimal::serde::float")]
            monthly_rent: Decimal,
            #[serde(
                skip_serializing_if = "Option::is_none",
                with = "rust_decimal::serde::float_option"
            )]
            security_deposit: Option<Decimal>,
        }

        let req = Request::post("/api/Lease").json(&Body {
            listing_id: draft.listing_id,
            tenant_id: draft.tenant_id,
            start_date: draft.term.start(),
            end_date: draft.term.end(),
            monthly_rent: draft.monthly_rent,
            security_deposit: draft.security_deposit,
        })?;
        self.send(req).await
    }
}

impl Backend<Perform<Termination>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Perform(termination): Perform<Termination>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            reason: Option<&'a Description>,
        }

        let req =
            Request::put(format!("/api/Lease/{}/terminate", termination.lease_id))
                .json(&Body {
                    reason: termination.reason.as_ref(),
                })?;
        self.send::<IgnoredAny>(req).await.map(drop)
    }
}
