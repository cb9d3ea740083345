//! [`Listing`]-related [`Backend`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    pagination::Params,
    Date, Page, PageRequest,
};
use reqwest::multipart;
use rust_decimal::Decimal;
use serde::{de::IgnoredAny, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        listing::{self, Draft, ImageUpload},
        text::{Description, Title},
        Listing,
    },
    infra::{
        backend::{
            self,
            http::{self, optional, Request},
        },
        Backend, Http,
    },
};

use super::Paged;

impl Backend<Select<By<Page<Listing>, PageRequest>>> for Http {
    type Ok = Page<Listing>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page<Listing>, PageRequest>>,
    ) -> Result<Self::Ok, Self::Err> {
        let page = by.into_inner();
        let req =
            Request::get("/api/Listings").query(Params::PageNumber.query(page));
        Ok(self.send::<Paged<Listing>>(req).await?.into_page(page))
    }
}

impl Backend<Select<By<Option<Listing>, listing::Id>>> for Http {
    type Ok = Option<Listing>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = Request::get(format!("/api/Listings/{}", by.into_inner()));
        optional(self.send(req).await)
    }
}

impl Backend<Insert<Draft>> for Http {
    type Ok = Listing;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            title: &'a Title,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<&'a Description>,
            address: &'a listing::Address,
            #[serde(with = "rust_decimal::serde::float")]
            price: Decimal,
            available_from: Option<Date>,
            available_to: Option<Date>,
            is_active: bool,
        }

        let req = Request::post("/api/Listings").json(&Body {
            title: &draft.title,
            description: draft.description.as_ref(),
            address: &draft.address,
            price: draft.price,
            available_from: draft.availability.map(|r| r.start()),
            available_to: draft.availability.map(|r| r.end()),
            is_active: draft.is_active,
        })?;
        self.send(req).await
    }
}

impl Backend<Update<Listing>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(listing): Update<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let req =
            Request::put(format!("/api/Listings/{}", listing.id)).json(&listing)?;
        self.send::<IgnoredAny>(req).await.map(drop)
    }
}

impl Backend<Delete<listing::Id>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<listing::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = Request::delete(format!("/api/Listings/{id}"));
        self.send::<IgnoredAny>(req).await.map(drop)
    }
}

impl Backend<Insert<ImageUpload>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(upload): Insert<ImageUpload>,
    ) -> Result<Self::Ok, Self::Err> {
        let ImageUpload { listing_id, image } = upload;

        let part = multipart::Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.mime)
            .map_err(tracerr::from_and_wrap!(=> http::Error))
            .map_err(tracerr::map_from)?;
        let req =
            Request::post(format!("/api/Listings/{listing_id}/images"))
                .multipart(multipart::Form::new().part("file", part));
        self.send::<IgnoredAny>(req).await.map(drop)
    }
}
