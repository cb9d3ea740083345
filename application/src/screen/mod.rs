//! Screens of the command line client.

mod applications;
mod dashboard;
mod leases;
mod listings;
mod maintenance;
mod payouts;
mod session;
mod users;

use std::str::FromStr;

use common::{
    pagination::{self, LocalPages},
    Page, PageRequest,
};
use service::{
    domain::application::Decision,
    form::{
        ApplicationForm, FieldErrors, LeaseForm, ListingForm,
        MaintenanceRequestForm, PaymentForm, PayoutPeriodForm,
        ReconciliationForm,
    },
    view::{filter::UnknownFilterValue, filters::EntityFilter, Pager},
};

use crate::{
    args::{
        ApplicationCommand, Command, LeaseCommand, ListingCommand,
        MaintenanceCommand, PayoutCommand, UserCommand,
    },
    AsError as _, Context, Error,
};

/// Opens the screen of the provided [`Command`], returning its rendered
/// output.
///
/// # Errors
///
/// If the screen cannot be shown or its action fails.
pub async fn open(ctx: &mut Context, cmd: Command) -> Result<String, Error> {
    match cmd {
        Command::Login { email, password } => {
            session::login(ctx, email, password.into()).await
        }
        Command::Logout => session::logout(ctx).await,
        Command::Register {
            email,
            password,
            confirm_password,
            first_name,
            last_name,
            role,
        } => {
            session::register(
                ctx,
                session::Registration {
                    confirm_password: confirm_password
                        .unwrap_or_else(|| password.clone())
                        .into(),
                    email,
                    password: password.into(),
                    first_name,
                    last_name,
                    role,
                },
            )
            .await
        }
        Command::Profile {
            first_name,
            last_name,
            phone,
        } => session::profile(ctx, first_name, last_name, phone).await,
        Command::Dashboard => dashboard::show(ctx).await,
        Command::Listings(args) => listings::list(ctx, &args).await,
        Command::Listing(ListingCommand::Create {
            title,
            description,
            address,
            price,
            available_from,
            available_to,
            inactive,
        }) => {
            listings::create(
                ctx,
                ListingForm {
                    title,
                    description,
                    address,
                    price,
                    available_from,
                    available_to,
                    is_active: !inactive,
                },
            )
            .await
        }
        Command::Listing(ListingCommand::Update {
            id,
            title,
            description,
            address,
            price,
            available_from,
            available_to,
            active,
        }) => {
            listings::update(
                ctx,
                &id,
                listings::ListingChanges {
                    title,
                    description,
                    address,
                    price,
                    available_from,
                    available_to,
                    is_active: active,
                },
            )
            .await
        }
        Command::Listing(ListingCommand::Delete { id }) => {
            listings::delete(ctx, &id).await
        }
        Command::Listing(ListingCommand::Image { id, path }) => {
            listings::upload_image(ctx, &id, &path).await
        }
        Command::Leases { action: None, list } => {
            leases::list(ctx, &list).await
        }
        Command::Leases {
            action:
                Some(LeaseCommand::Create {
                    listing,
                    tenant,
                    start,
                    end,
                    rent,
                    deposit,
                }),
            ..
        } => {
            leases::create(
                ctx,
                LeaseForm {
                    listing_id: listing,
                    tenant_id: tenant,
                    start_date: start,
                    end_date: end,
                    monthly_rent: rent,
                    security_deposit: deposit,
                },
            )
            .await
        }
        Command::Leases {
            action: Some(LeaseCommand::Terminate { id, reason }),
            ..
        } => leases::terminate(ctx, &id, &reason).await,
        Command::Maintenance { action: None, list } => {
            maintenance::list(ctx, &list).await
        }
        Command::Maintenance {
            action:
                Some(MaintenanceCommand::Create {
                    listing,
                    title,
                    description,
                    priority,
                }),
            ..
        } => {
            maintenance::create(
                ctx,
                MaintenanceRequestForm {
                    listing_id: listing,
                    title,
                    description,
                    priority,
                },
            )
            .await
        }
        Command::Maintenance {
            action: Some(MaintenanceCommand::Status { id, status, cost }),
            ..
        } => {
            maintenance::change_status(ctx, &id, &status, cost.as_deref())
                .await
        }
        Command::Applications { action: None, list } => {
            applications::list(ctx, &list).await
        }
        Command::Applications {
            action:
                Some(ApplicationCommand::Apply {
                    listing,
                    message,
                    income,
                    move_in,
                }),
            ..
        } => {
            applications::apply(
                ctx,
                ApplicationForm {
                    listing_id: listing,
                    message,
                    monthly_income: income,
                    move_in_date: move_in,
                },
            )
            .await
        }
        Command::Applications {
            action: Some(ApplicationCommand::Approve { id }),
            ..
        } => applications::review(ctx, &id, Decision::Approve).await,
        Command::Applications {
            action: Some(ApplicationCommand::Reject { id }),
            ..
        } => applications::review(ctx, &id, Decision::Reject).await,
        Command::Users { action: None, list } => {
            users::list(ctx, &list).await
        }
        Command::Users {
            action: Some(UserCommand::Delete { id }),
            ..
        } => users::delete(ctx, &id).await,
        Command::Users {
            action: Some(UserCommand::Role { id, role }),
            ..
        } => users::change_role(ctx, &id, &role).await,
        Command::Payouts(PayoutCommand::Periods(args)) => {
            payouts::periods(ctx, &args).await
        }
        Command::Payouts(PayoutCommand::CreatePeriod { name, start, end }) => {
            payouts::create_period(
                ctx,
                PayoutPeriodForm {
                    name,
                    start_date: start,
                    end_date: end,
                },
            )
            .await
        }
        Command::Payouts(PayoutCommand::Reconcile {
            owner,
            period,
            rent,
            maintenance,
            utilities,
            other,
        }) => {
            let mut form = ReconciliationForm::new(
                ctx.service().config().currency,
            );
            form.owner_id = owner;
            form.period_id = period;
            form.rent_collected = rent;
            form.maintenance_costs = maintenance;
            form.utility_costs = utilities;
            form.other_deductions = other;
            payouts::reconcile(ctx, form).await
        }
        Command::Pay { lease, amount } => {
            leases::pay(
                ctx,
                PaymentForm {
                    lease_id: lease,
                    amount,
                },
            )
            .await
        }
    }
}

/// Parses an ID typed into the provided `field`.
fn parse_id<T: FromStr>(field: &'static str, raw: &str) -> Result<T, Error> {
    let mut errs = FieldErrors::default();
    let id = errs.required::<T>(field, raw, "Enter a valid ID");
    errs.finish(|| id).map_err(|e| e.into_error())
}

/// Selects the provided `value` in the `filter`.
fn select<T>(filter: &mut EntityFilter<T>, value: &str) -> Result<(), Error> {
    filter
        .select(value)
        .map_err(|e: UnknownFilterValue| e.into_error())
}

/// Filters the rows of a [`Page`] cut by the backend.
fn filter_page<T: Clone>(
    filter: &mut EntityFilter<T>,
    page: Page<T>,
) -> Page<T> {
    let Page {
        rows,
        index,
        total_pages,
    } = page;
    filter.set_rows(rows);
    Page {
        rows: filter.filtered().into_iter().cloned().collect(),
        index,
        total_pages,
    }
}

/// Filters all the fetched `rows` and slices the requested [`Page`] out of
/// the matches.
///
/// A page past the last one is replaced with the last one.
fn local_page<T: Clone>(
    filter: &mut EntityFilter<T>,
    rows: Vec<T>,
    req: PageRequest,
) -> Page<T> {
    filter.set_rows(rows);
    let pages = LocalPages::new(
        filter.filtered().into_iter().cloned().collect::<Vec<_>>(),
    );

    let mut pager =
        Pager::new(1, pagination::total_pages(pages.rows().len(), req.size));
    if !pager.go_to(req.number()) && req.index > 0 {
        tracing::warn!(
            requested = req.number(),
            last = pager.total_pages(),
            "no such page, showing the last one",
        );
        _ = pager.go_to(pager.total_pages());
    }
    pages.page(PageRequest::new(
        pager.current_page().saturating_sub(1),
        req.size,
    ))
}

/// Renders an optional value, showing a dash for a missing one.
fn or_dash(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroUsize;

    use common::{Page, PageRequest};
    use service::view::{
        filter::Filter,
        filters::{EntityFilter, Predicate},
        FilterOption,
    };

    use super::{filter_page, local_page, or_dash, parse_id};

    fn parity() -> EntityFilter<u32> {
        let predicate: Predicate<u32> = Box::new(|n: &u32, v: &str| {
            v == "all" || (v == "even") == (n % 2 == 0)
        });
        Filter::new(
            [FilterOption::new("even", "Even"), FilterOption::new("odd", "Odd")],
            predicate,
        )
    }

    #[test]
    fn slices_filtered_rows() {
        let mut filter = parity();
        filter.select("odd").unwrap();

        let page = local_page(
            &mut filter,
            (1..=9).collect(),
            PageRequest::new(1, NonZeroUsize::new(2).unwrap()),
        );

        assert_eq!(page.rows, [5, 7]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(filter.rows().len(), 9);
    }

    #[test]
    fn shows_last_page_past_the_end() {
        let mut filter = parity();
        filter.select("odd").unwrap();

        let page = local_page(
            &mut filter,
            (1..=9).collect(),
            PageRequest::new(9, NonZeroUsize::new(2).unwrap()),
        );

        assert_eq!(page.rows, [9]);
        assert_eq!(page.number(), 3);
        assert_eq!(page.total_pages, 3);

        filter.select("even").unwrap();
        let page = local_page(
            &mut filter,
            vec![1, 3],
            PageRequest::new(4, NonZeroUsize::new(2).unwrap()),
        );
        assert!(page.is_empty());
        assert_eq!(page.index, 0);
    }

    #[test]
    fn keeps_backend_paging() {
        let mut filter = parity();
        filter.select("even").unwrap();

        let page = filter_page(
            &mut filter,
            Page {
                rows: vec![11, 12, 13, 14],
                index: 3,
                total_pages: 7,
            },
        );

        assert_eq!(page.rows, [12, 14]);
        assert_eq!(page.number(), 4);
        assert_eq!(page.total_pages, 7);
    }

    #[test]
    fn rejects_malformed_ids() {
        let err = parse_id::<u32>("id", "abc").unwrap_err();
        assert_eq!(err.code, "VALIDATION_FAILED");
        assert_eq!(parse_id::<u32>("id", " 42 ").unwrap(), 42);
        assert_eq!(or_dash(None::<u8>), "-");
    }
}
