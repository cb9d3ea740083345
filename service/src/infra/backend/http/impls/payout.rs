//! Payout-related [`Backend`] implementations.

use common::{
    operations::{By, Insert, Select},
    Date,
};
use rust_decimal::Decimal;
use serde::{de::IgnoredAny, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        payout::{self, PeriodDraft, Submission},
        text::Title,
        user, PayoutPeriod,
    },
    infra::{
        backend::{
            self,
            http::{optional, Request},
        },
        Backend, Http,
    },
};

impl Backend<Select<By<Vec<PayoutPeriod>, ()>>> for Http {
    type Ok = Vec<PayoutPeriod>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<PayoutPeriod>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.send(Request::get("/api/Payout/periods")).await
    }
}

impl Backend<Select<By<Option<PayoutPeriod>, payout::Id>>> for Http {
    type Ok = Option<PayoutPeriod>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PayoutPeriod>, payout::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req =
            Request::get(format!("/api/Payout/periods/{}", by.into_inner()));
        optional(self.send(req).await)
    }
}

impl Backend<Insert<PeriodDraft>> for Http {
    type Ok = PayoutPeriod;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<PeriodDraft>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            name: &'a Title,
            start_date: Date,
            end_date: Date,
        }

        let req = Request::post("/api/Payout/periods").json(&Body {
            name: &draft.name,
            start_date: draft.range.start(),
            end_date: draft.range.end(),
        })?;
        self.send(req).await
    }
}

impl Backend<Insert<Submission>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(submission): Insert<Submission>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            owner_id: user::Id,
            period_id: payout::Id,
            #[serde(with = "rust_decimal::serde::float")]
            rent_collected: Decimal,
            #[serde(with = "rust_decimal::serde::float")]
            maintenance_costs: Decimal,
            #[serde(with = "rust_decimal::serde::float")]
            utility_costs: Decimal,
            #[serde(with = "rust_decimal::serde::float")]
            other_deductions: Decimal,
            #[serde(with = "rust_decimal::serde::float")]
            amount: Decimal,
            currency: &'a str,
        }

        let Submission {
            reconciliation: r,
            amount,
        } = submission;
        let req = Request::post("/api/Payout").json(&Body {
            owner_id: r.owner_id,
            period_id: r.period_id,
            rent_collected: r.rent_collected.amount,
            maintenance_costs: r.maintenance_costs.amount,
            utility_costs: r.utility_costs.amount,
            other_deductions: r.other_deductions.amount,
            amount: amount.amount,
            currency: amount.currency.code(),
        })?;
        self.send::<IgnoredAny>(req).await.map(drop)
    }
}
