//! [`Args`] definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line client of the rental management platform.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Screen to open.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Screen of the client.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Signs in and remembers the session.
    Login {
        /// Email address to sign in with.
        #[arg(long)]
        email: String,

        /// Password to sign in with.
        #[arg(long, env = "RENTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Signs out and forgets the session.
    Logout,

    /// Registers a new account.
    Register {
        /// Email address of the new account.
        #[arg(long)]
        email: String,

        /// Password of the new account.
        #[arg(long, env = "RENTAL_PASSWORD", hide_env_values = true)]
        password: String,

        /// Password confirmation, the same password by default.
        #[arg(long)]
        confirm_password: Option<String>,

        /// First name.
        #[arg(long)]
        first_name: String,

        /// Last name.
        #[arg(long)]
        last_name: String,

        /// Role of the new account: `tenant` or `owner`.
        #[arg(long, default_value = "tenant")]
        role: String,
    },

    /// Shows or edits the profile of the signed in user.
    Profile {
        /// New first name.
        #[arg(long)]
        first_name: Option<String>,

        /// New last name.
        #[arg(long)]
        last_name: Option<String>,

        /// New phone number, empty to remove it.
        #[arg(long)]
        phone: Option<String>,
    },

    /// Shows the dashboard summary.
    Dashboard,

    /// Lists listings.
    Listings(ListArgs),

    /// Manages a single listing.
    #[command(subcommand)]
    Listing(ListingCommand),

    /// Lists or manages leases.
    #[command(args_conflicts_with_subcommands = true)]
    Leases {
        /// Action to perform instead of listing.
        #[command(subcommand)]
        action: Option<LeaseCommand>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Lists or manages maintenance requests.
    #[command(args_conflicts_with_subcommands = true)]
    Maintenance {
        /// Action to perform instead of listing.
        #[command(subcommand)]
        action: Option<MaintenanceCommand>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Lists or manages rental applications.
    #[command(args_conflicts_with_subcommands = true)]
    Applications {
        /// Action to perform instead of listing.
        #[command(subcommand)]
        action: Option<ApplicationCommand>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Lists or manages platform users.
    #[command(args_conflicts_with_subcommands = true)]
    Users {
        /// Action to perform instead of listing.
        #[command(subcommand)]
        action: Option<UserCommand>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Manages payouts.
    #[command(subcommand)]
    Payouts(PayoutCommand),

    /// Creates a payment intent for a lease.
    Pay {
        /// ID of the lease to pay for.
        lease: String,

        /// Amount to pay.
        amount: String,
    },
}

/// Arguments of a list screen.
#[derive(Clone, Debug, clap::Args)]
pub struct ListArgs {
    /// 1-based number of the page to show.
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Value of the filter to apply.
    #[arg(long, default_value = "all")]
    pub filter: String,
}

/// Action on a single listing.
#[derive(Debug, Subcommand)]
pub enum ListingCommand {
    /// Creates a new listing.
    Create {
        /// Title of the listing.
        #[arg(long)]
        title: String,

        /// Description of the listing.
        #[arg(long, default_value = "")]
        description: String,

        /// Address of the listed property.
        #[arg(long)]
        address: String,

        /// Monthly price.
        #[arg(long)]
        price: String,

        /// First available day, as `YYYY-MM-DD`.
        #[arg(long, default_value = "")]
        available_from: String,

        /// Last available day, as `YYYY-MM-DD`.
        #[arg(long, default_value = "")]
        available_to: String,

        /// Creates the listing hidden from tenants.
        #[arg(long)]
        inactive: bool,
    },

    /// Edits a listing, keeping the omitted fields as they are.
    Update {
        /// ID of the listing.
        id: String,

        /// New title.
        #[arg(long)]
        title: Option<String>,

        /// New description, empty to remove it.
        #[arg(long)]
        description: Option<String>,

        /// New address.
        #[arg(long)]
        address: Option<String>,

        /// New monthly price.
        #[arg(long)]
        price: Option<String>,

        /// New first available day, empty to remove it.
        #[arg(long)]
        available_from: Option<String>,

        /// New last available day, empty to remove it.
        #[arg(long)]
        available_to: Option<String>,

        /// Shows or hides the listing from tenants.
        #[arg(long)]
        active: Option<bool>,
    },

    /// Deletes a listing.
    Delete {
        /// ID of the listing.
        id: String,
    },

    /// Uploads an image of a listing.
    Image {
        /// ID of the listing.
        id: String,

        /// Path to the image file.
        path: PathBuf,
    },
}

/// Action on leases.
#[derive(Debug, Subcommand)]
pub enum LeaseCommand {
    /// Leases a listing to a tenant.
    Create {
        /// ID of the leased listing.
        #[arg(long)]
        listing: String,

        /// ID of the tenant.
        #[arg(long)]
        tenant: String,

        /// First day of the lease, as `YYYY-MM-DD`.
        #[arg(long)]
        start: String,

        /// Last day of the lease, as `YYYY-MM-DD`.
        #[arg(long)]
        end: String,

        /// Monthly rent.
        #[arg(long)]
        rent: String,

        /// Security deposit.
        #[arg(long, default_value = "")]
        deposit: String,
    },

    /// Terminates a lease early.
    Terminate {
        /// ID of the lease.
        id: String,

        /// Reason of the termination.
        #[arg(long, default_value = "")]
        reason: String,
    },
}

/// Action on rental applications.
#[derive(Debug, Subcommand)]
pub enum ApplicationCommand {
    /// Applies for a listing.
    Apply {
        /// ID of the listing.
        #[arg(long)]
        listing: String,

        /// Message to the owner.
        #[arg(long, default_value = "")]
        message: String,

        /// Monthly income of the applicant.
        #[arg(long, default_value = "")]
        income: String,

        /// Desired move-in day, as `YYYY-MM-DD`.
        #[arg(long, default_value = "")]
        move_in: String,
    },

    /// Approves a pending application.
    Approve {
        /// ID of the application.
        id: String,
    },

    /// Rejects a pending application.
    Reject {
        /// ID of the application.
        id: String,
    },
}

/// Action on platform users.
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Deletes a user.
    Delete {
        /// ID of the user.
        id: String,
    },

    /// Changes the role of a user.
    Role {
        /// ID of the user.
        id: String,

        /// New role: `tenant`, `owner` or `admin`.
        role: String,
    },
}

/// Action on maintenance requests.
#[derive(Debug, Subcommand)]
pub enum MaintenanceCommand {
    /// Reports a new maintenance request.
    Create {
        /// ID of the listing the issue is in.
        #[arg(long)]
        listing: String,

        /// Short title of the issue.
        #[arg(long)]
        title: String,

        /// Description of the issue.
        #[arg(long)]
        description: String,

        /// Priority: `low`, `medium` or `high`.
        #[arg(long, default_value = "")]
        priority: String,
    },

    /// Changes the status of a maintenance request.
    Status {
        /// ID of the maintenance request.
        id: String,

        /// New status, e.g. `in-progress`.
        status: String,

        /// Cost of the finished work.
        #[arg(long)]
        cost: Option<String>,
    },
}

/// Action on payouts.
#[derive(Debug, Subcommand)]
pub enum PayoutCommand {
    /// Lists payout periods.
    Periods(ListArgs),

    /// Opens a new payout period.
    CreatePeriod {
        /// Name of the period.
        #[arg(long)]
        name: String,

        /// First day of the period, as `YYYY-MM-DD`.
        #[arg(long)]
        start: String,

        /// Last day of the period, as `YYYY-MM-DD`.
        #[arg(long)]
        end: String,
    },

    /// Reconciles and submits a payout to an owner.
    Reconcile {
        /// ID of the owner.
        #[arg(long)]
        owner: String,

        /// ID of the payout period.
        #[arg(long)]
        period: String,

        /// Rent collected in the period.
        #[arg(long)]
        rent: String,

        /// Maintenance costs of the period.
        #[arg(long, default_value = "")]
        maintenance: String,

        /// Utility costs of the period.
        #[arg(long, default_value = "")]
        utilities: String,

        /// Other deductions of the period.
        #[arg(long, default_value = "")]
        other: String,
    },
}
