//! [`Listing`] screens.

use std::path::Path;

use common::pagination::FetchPage;
use futures::TryFutureExt as _;
use service::{
    command::{self, Command as _},
    domain::{
        listing::{self, Image, ImageUpload},
        Listing,
    },
    form::{Form, ListingForm},
    query,
    state::Editing,
    view::{filters, Column, Table},
};

use crate::{
    args::ListArgs,
    screen::{filter_page, or_dash, parse_id, select},
    AsError, Context, Error,
};

/// Lists a page of [`Listing`]s.
pub(super) async fn list(
    ctx: &Context,
    args: &ListArgs,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut filter = filters::listings();
    select(&mut filter, &args.filter)?;

    let req = ctx.page_request(args.page)?;
    let page = query::listings::Pages::new(ctx.service())
        .execute(FetchPage(req))
        .map_err(AsError::into_error)
        .await?;

    Ok(table()
        .render_page(&filter_page(&mut filter, page))
        .to_string())
}

/// Creates a new [`Listing`] out of the provided raw values.
pub(super) async fn create(
    ctx: &Context,
    values: ListingForm,
) -> Result<String, Error> {
    ctx.require_session()?;

    let mut form = Form::new(values);
    let listing = form
        .submit(ctx.notifier(), "Listing created", |draft| {
            ctx.service().execute(command::CreateListing(draft))
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(table().render([&listing]).to_string())
}

/// Changes of a [`Listing`] typed by a user.
///
/// [`None`] keeps the current value.
#[derive(Debug, Default)]
pub(super) struct ListingChanges {
    pub(super) title: Option<String>,
    pub(super) description: Option<String>,
    pub(super) address: Option<String>,
    pub(super) price: Option<String>,
    pub(super) available_from: Option<String>,
    pub(super) available_to: Option<String>,
    pub(super) is_active: Option<bool>,
}

impl ListingChanges {
    /// Applies these [`ListingChanges`] to the provided `form` values.
    fn apply(self, form: &mut ListingForm) {
        let Self {
            title,
            description,
            address,
            price,
            available_from,
            available_to,
            is_active,
        } = self;
        if let Some(v) = title {
            form.title = v;
        }
        if let Some(v) = description {
            form.description = v;
        }
        if let Some(v) = address {
            form.address = v;
        }
        if let Some(v) = price {
            form.price = v;
        }
        if let Some(v) = available_from {
            form.available_from = v;
        }
        if let Some(v) = available_to {
            form.available_to = v;
        }
        if let Some(v) = is_active {
            form.is_active = v;
        }
    }
}

/// Edits the [`Listing`] with the provided ID.
///
/// The [`Listing`] is tracked as [`Editing`] until the edit ends, whether
/// it succeeds or not.
pub(super) async fn update(
    ctx: &mut Context,
    id: &str,
    changes: ListingChanges,
) -> Result<String, Error> {
    ctx.require_session()?;

    let id = parse_id::<listing::Id>("id", id)?;
    ctx.state_mut().start_editing(Editing::Listing(id));
    let res = edit(ctx, id, changes).await;
    _ = ctx.state_mut().finish_editing();

    Ok(table().render([&res?]).to_string())
}

/// Applies the provided [`ListingChanges`] to the current [`Listing`].
async fn edit(
    ctx: &Context,
    id: listing::Id,
    changes: ListingChanges,
) -> Result<Listing, Error> {
    let current = ctx
        .service()
        .execute(query::listings::ById::by(id))
        .map_err(AsError::into_error)
        .await?
        .ok_or_else(|| {
            Error::new(
                "NOT_FOUND",
                http::StatusCode::NOT_FOUND,
                &format!("Listing `{id}` does not exist"),
            )
        })?;

    let mut values = ListingForm::from(&current);
    changes.apply(&mut values);
    let mut form = Form::new(values);
    form.submit(ctx.notifier(), "Listing updated", |draft| {
        ctx.service().execute(command::UpdateListing { id, draft })
    })
    .await
    .map_err(AsError::into_error)
}

/// Deletes the [`Listing`] with the provided ID.
pub(super) async fn delete(ctx: &Context, id: &str) -> Result<String, Error> {
    ctx.require_session()?;

    let id = parse_id::<listing::Id>("id", id)?;
    ctx.service()
        .execute(command::DeleteListing(id))
        .map_err(AsError::into_error)
        .await?;

    Ok(format!("Deleted listing {id}"))
}

/// Uploads the image at the provided `path` to the [`Listing`] with the
/// provided ID.
pub(super) async fn upload_image(
    ctx: &Context,
    id: &str,
    path: &Path,
) -> Result<String, Error> {
    ctx.require_session()?;

    let listing_id = parse_id::<listing::Id>("id", id)?;
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        Error::new(
            "FILE_UNREADABLE",
            http::StatusCode::BAD_REQUEST,
            &format!("cannot read `{}`: {e}", path.display()),
        )
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    ctx.service()
        .execute(command::UploadListingImage(ImageUpload {
            listing_id,
            image: Image {
                mime: mime_of(path).to_owned(),
                file_name,
                bytes,
            },
        }))
        .map_err(AsError::into_error)
        .await?;

    Ok(format!("Uploaded `{}` to listing {listing_id}", path.display()))
}

/// Guesses the MIME type of a file by its extension.
fn mime_of(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// [`Table`] of [`Listing`]s.
fn table() -> Table<Listing> {
    Table::new([
        Column::new("ID", |l: &Listing| l.id.to_string()),
        Column::new("Title", |l: &Listing| l.title.to_string()),
        Column::new("Address", |l: &Listing| l.address.to_string()),
        Column::new("Price", |l: &Listing| l.price.to_string()),
        Column::new("Available", |l: &Listing| or_dash(l.availability())),
        Column::new("Active", |l: &Listing| {
            if l.is_active { "yes" } else { "no" }.to_owned()
        }),
    ])
}

impl AsError for command::create_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::NonPositivePrice(_) => Some(Error::new(
                "VALIDATION_FAILED",
                http::StatusCode::UNPROCESSABLE_ENTITY,
                self,
            )),
        }
    }
}

impl AsError for command::update_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::NotExists(_) => Some(Error::new(
                "NOT_FOUND",
                http::StatusCode::NOT_FOUND,
                self,
            )),
            Self::NonPositivePrice(_) => Some(Error::new(
                "VALIDATION_FAILED",
                http::StatusCode::UNPROCESSABLE_ENTITY,
                self,
            )),
        }
    }
}

impl AsError for command::delete_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::upload_listing_image::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Empty | Self::NotAnImage(_) | Self::TooLarge(_) => {
                Some(Error::new(
                    "INVALID_IMAGE",
                    http::StatusCode::UNPROCESSABLE_ENTITY,
                    self,
                ))
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use std::path::Path;

    use service::{domain::user::session::Token, form::ListingForm};

    use crate::{config, Config, Context};

    use super::{mime_of, update, ListingChanges};

    #[test]
    fn guesses_image_types() {
        assert_eq!(mime_of(Path::new("a/b/front.JPG")), "image/jpeg");
        assert_eq!(mime_of(Path::new("plan.png")), "image/png");
        assert_eq!(mime_of(Path::new("notes")), "application/octet-stream");
    }

    #[test]
    fn keeps_omitted_fields() {
        let mut form = ListingForm {
            title: "Loft".into(),
            address: "1 Main St".into(),
            price: "1200".into(),
            available_from: "2024-03-01".into(),
            is_active: true,
            ..ListingForm::default()
        };
        ListingChanges {
            price: Some("1300".into()),
            available_from: Some(String::new()),
            is_active: Some(false),
            ..ListingChanges::default()
        }
        .apply(&mut form);

        assert_eq!(form.title, "Loft");
        assert_eq!(form.price, "1300");
        assert!(form.available_from.is_empty());
        assert!(!form.is_active);
    }

    #[tokio::test]
    async fn stops_editing_when_update_fails() {
        let config = Config {
            backend: config::Backend {
                url: "http://127.0.0.1:1".to_owned(),
                ..config::Backend::default()
            },
            session: config::Session {
                cookie_file: std::env::temp_dir()
                    .join("rental-listing-update-session"),
                ..config::Session::default()
            },
            ..Config::default()
        };
        let mut ctx = Context::new(&config).await.unwrap();
        ctx.service().backend().set_token(Token::new("t1"));

        let res = update(
            &mut ctx,
            "0d1f0d5e-6a3c-4b1f-8e3f-2a1c9e4b7c22",
            ListingChanges::default(),
        )
        .await;

        assert!(res.is_err(), "unreachable backend must fail the update");
        assert!(ctx.state().editing().is_none());
    }
}
