//! Payment-related [`Backend`] implementations.

use common::operations::Insert;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        lease,
        payment::{ClientSecret, Intent},
    },
    infra::{
        backend::{self, http::Request},
        Backend, Http,
    },
};

impl Backend<Insert<Intent>> for Http {
    type Ok = ClientSecret;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(intent): Insert<Intent>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body {
            lease_id: lease::Id,
            #[serde(with = "rust_decimal::serde::float")]
            amount: Decimal,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            client_secret: String,
        }

        let req = Request::post("/api/Payments/create-intent").json(&Body {
            lease_id: intent.lease_id,
            amount: intent.amount,
        })?;
        let Response { client_secret } = self.send(req).await?;
        Ok(ClientSecret::new(client_secret))
    }
}
