//! [`Command`] definition.

pub mod create_lease;
pub mod create_listing;
pub mod create_maintenance_request;
pub mod create_payment_intent;
pub mod create_payout_period;
pub mod delete_listing;
pub mod delete_user;
pub mod review_application;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod submit_application;
pub mod submit_payout;
pub mod terminate_lease;
pub mod update_listing;
pub mod update_maintenance_status;
pub mod update_profile;
pub mod update_user_role;
pub mod upload_listing_image;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_lease::CreateLease, create_listing::CreateListing,
    create_maintenance_request::CreateMaintenanceRequest,
    create_payment_intent::CreatePaymentIntent,
    create_payout_period::CreatePayoutPeriod, delete_listing::DeleteListing,
    delete_user::DeleteUser, review_application::ReviewApplication,
    sign_in::SignIn, sign_out::SignOut, sign_up::SignUp,
    submit_application::SubmitApplication, submit_payout::SubmitPayout,
    terminate_lease::TerminateLease, update_listing::UpdateListing,
    update_maintenance_status::UpdateMaintenanceStatus,
    update_profile::UpdateProfile, update_user_role::UpdateUserRole,
    upload_listing_image::UploadListingImage,
};
