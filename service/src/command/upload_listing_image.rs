//! [`Command`] for uploading an image of a [`Listing`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{listing::Image, Listing};
use crate::{
    domain::listing::ImageUpload,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for uploading an [`Image`] of a [`Listing`].
#[derive(Clone, Debug)]
pub struct UploadListingImage(pub ImageUpload);

impl UploadListingImage {
    /// Maximum size of an uploaded [`Image`] in bytes.
    pub const MAX_SIZE: usize = 10 * 1024 * 1024;
}

impl<Bk> Command<UploadListingImage> for Service<Bk>
where
    Bk: Backend<Insert<ImageUpload>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(listing = %cmd.0.listing_id, file = %cmd.0.image.file_name),
    )]
    async fn execute(
        &self,
        cmd: UploadListingImage,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UploadListingImage(upload) = cmd;
        if !upload.image.mime.starts_with("image/") {
            return Err(tracerr::new!(E::NotAnImage(upload.image.mime)));
        }
        if upload.image.bytes.is_empty() {
            return Err(tracerr::new!(E::Empty));
        }
        if upload.image.bytes.len() > UploadListingImage::MAX_SIZE {
            return Err(tracerr::new!(E::TooLarge(upload.image.bytes.len())));
        }

        self.backend()
            .execute(Insert(upload))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`UploadListingImage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("{_0}")]
    #[from]
    Backend(backend::Error),

    /// Uploaded file is empty.
    #[display("Image file is empty")]
    Empty,

    /// Uploaded file is not an image.
    #[display("`{_0}` is not an image type")]
    NotAnImage(#[error(not(source))] String),

    /// Uploaded file exceeds [`UploadListingImage::MAX_SIZE`].
    #[display("Image of {_0} bytes exceeds the 10 MiB limit")]
    TooLarge(#[error(not(source))] usize),
}
