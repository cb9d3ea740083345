//! [`User`]-related [`Backend`] implementations.

use common::{
    operations::{By, Delete, Select, Update},
    pagination::Params,
    Page, PageRequest,
};
use serde::{de::IgnoredAny, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        user::{self, Profile, ProfileUpdate, RoleChange},
        User,
    },
    infra::{
        backend::{self, http::Request},
        Backend, Http,
    },
};

use super::Paged;

impl Backend<Select<By<Profile, ()>>> for Http {
    type Ok = Profile;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Select<By<Profile, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.send(Request::get("/api/users/profile")).await
    }
}

impl Backend<Update<ProfileUpdate>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(update): Update<ProfileUpdate>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = Request::put("/api/users/profile").json(&update)?;
        self.send::<IgnoredAny>(req).await.map(drop)
    }
}

impl Backend<Select<By<Page<User>, PageRequest>>> for Http {
    type Ok = Page<User>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page<User>, PageRequest>>,
    ) -> Result<Self::Ok, Self::Err> {
        let page = by.into_inner();
        let req = Request::get("/api/Admin/users")
            .query(Params::PageNumber.query(page));
        Ok(self.send::<Paged<User>>(req).await?.into_page(page))
    }
}

impl Backend<Delete<user::Id>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<user::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = Request::delete(format!("/api/Admin/users/{id}"));
        self.send::<IgnoredAny>(req).await.map(drop)
    }
}

impl Backend<Update<RoleChange>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(change): Update<RoleChange>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        struct Body {
            role: user::Role,
        }

        let req = Request::put(format!("/api/Admin/users/{}/role", change.user_id))
            .json(&Body { role: change.role })?;
        self.send::<IgnoredAny>(req).await.map(drop)
    }
}
