//! [`MaintenanceRequest`]-related [`Backend`] implementations.

use common::operations::{By, Insert, Select, Update};
use rust_decimal::Decimal;
use serde::{de::IgnoredAny, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        listing,
        maintenance::{self, Draft, StatusChange},
        text::{Description, Title},
        MaintenanceRequest,
    },
    infra::{
        backend::{
            self,
            http::{optional, Request},
        },
        Backend, Http,
    },
};

impl Backend<Select<By<Vec<MaintenanceRequest>, ()>>> for Http {
    type Ok = Vec<MaintenanceRequest>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<MaintenanceRequest>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.send(Request::get("/api/Maintenance")).await
    }
}

impl Backend<Select<By<Option<MaintenanceRequest>, maintenance::Id>>> for Http {
    type Ok = Option<MaintenanceRequest>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<MaintenanceRequest>, maintenance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = Request::get(format!("/api/Maintenance/{}", by.into_inner()));
        optional(self.send(req).await)
    }
}

impl Backend<Insert<Draft>> for Http {
    type Ok = MaintenanceRequest;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            listing_id: listing::Id,
            title: &'a Title,
            description: &'a Description,
            priority: maintenance::Priority,
        }

        let req = Request::post("/api/Maintenance").json(&Body {
            listing_id: draft.listing_id,
            title: &draft.title,
            description: &draft.description,
            priority: draft.priority,
        })?;
        self.send(req).await
    }
}

impl Backend<Update<StatusChange>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(change): Update<StatusChange>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        struct Body {
            status: maintenance::Status,
            #[serde(
                skip_serializing_if = "Option::is_none",
                with = "rust_decimal::serde::float_option"
            )]
            cost: Option<Decimal>,
        }

        let req = Request::put(format!("/api/Maintenance/{}/status", change.id))
            .json(&Body {
                status: change.status,
                cost: change.cost,
            })?;
        self.send::<IgnoredAny>(req).await.map(drop)
    }
}
