//! Domain definitions.

pub mod application;
pub mod lease;
pub mod listing;
pub mod maintenance;
pub mod payment;
pub mod payout;
pub mod text;
pub mod user;

pub use self::{
    application::Application, lease::Lease, listing::Listing,
    maintenance::MaintenanceRequest, payout::PayoutPeriod, user::User,
};
