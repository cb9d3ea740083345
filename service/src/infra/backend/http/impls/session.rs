//! [`Session`]-related [`Backend`] implementations.

use common::operations::{Insert, Update};
use secrecy::ExposeSecret as _;
use serde::{de::Error as _, de::IgnoredAny, Deserialize, Serialize};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::Session;
use crate::{
    domain::user::{
        self,
        session::{Credentials, Token},
        Registration,
    },
    infra::{
        backend::{
            self,
            http::{self, Request},
        },
        Backend, Http,
    },
};

impl Backend<Insert<Credentials>> for Http {
    type Ok = Token;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(creds): Insert<Credentials>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        struct Body<'a> {
            email: &'a user::Email,
            password: &'a str,
        }

        #[derive(Deserialize)]
        struct Response {
            token: String,
        }

        let req = Request::post("/api/Auth/login")
            .anonymous()
            .json(&Body {
                email: &creds.email,
                password: creds.password.expose_secret().as_str(),
            })?;
        let Response { token } = self.send(req).await?;

        Token::new(token).ok_or_else(|| {
            tracerr::new!(backend::Error::from(http::Error::Decode(
                serde_json::Error::custom("blank authentication token"),
            )))
        })
    }
}

impl Backend<Insert<Registration>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(reg): Insert<Registration>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            email: &'a user::Email,
            password: &'a str,
            first_name: &'a user::Name,
            last_name: &'a user::Name,
            role: user::Role,
        }

        let req = Request::post("/api/Auth/register").anonymous().json(
            &Body {
                email: &reg.email,
                password: reg.password.expose_secret().as_str(),
                first_name: &reg.first_name,
                last_name: &reg.last_name,
                role: reg.role,
            },
        )?;
        self.send::<IgnoredAny>(req).await.map(drop)
    }
}

impl Backend<Update<Option<Token>>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(token): Update<Option<Token>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.set_token(token);
        Ok(())
    }
}
