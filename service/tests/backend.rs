//! End-to-end tests of the [`Http`] backend against a mock server.
//!
//! Starts an axum server standing in for the backend REST API and drives the
//! real client through it.

use std::{collections::HashMap, num::NonZeroUsize};

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use common::{
    pagination::{FetchPage, LocalPages},
    Date, Handler as _, PageRequest,
};
use serde_json::{json, Value};
use service::{
    command::{self, TerminateLease},
    domain::{
        lease,
        user::{session::Token, Role},
        MaintenanceRequest,
    },
    form::{Form, LoginForm, SubmitError},
    infra::Http,
    notify::{Level, Recorder},
    query,
    view::{filters, Column, Table},
    Config, Service,
};

/// Binds the provided mock backend to a free port and returns its base URL.
async fn start_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Rejects requests not authorized with the `t1` token.
fn authorized(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let auth = headers.get("authorization").and_then(|v| v.to_str().ok());
    if auth == Some("Bearer t1") {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "data": { "message": "Unauthorized" } })),
        ))
    }
}

fn auth_routes() -> Router {
    Router::new()
        .route(
            "/api/Auth/login",
            post(|Json(body): Json<Value>| async move {
                if body == json!({ "email": "ann@example.com", "password": "secret1" }) {
                    (StatusCode::OK, Json(json!({ "token": "t1" })))
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({
                            "data": { "message": "Invalid credentials" },
                            "statusCode": 401,
                            "error": "Unauthorized",
                        })),
                    )
                }
            }),
        )
        .route(
            "/api/users/profile",
            get(|headers: HeaderMap| async move {
                authorized(&headers)?;
                Ok::<_, (StatusCode, Json<Value>)>(Json(json!({ "role": 0 })))
            }),
        )
}

fn service(base_url: &str) -> Service<Http> {
    Service::new(Config::default(), Http::new(base_url, None).unwrap())
}

#[tokio::test]
async fn login_lands_tenant_on_dashboard() {
    let base = start_backend(auth_routes()).await;
    let service = service(&base);
    let notifier = Recorder::new();
    let mut form = Form::new(LoginForm::new("ann@example.com", "secret1"));

    let out = form
        .submit(&notifier, "Signed in", |cmd| service.execute(cmd))
        .await
        .unwrap();

    assert_eq!(out.route, "/dashboard");
    assert_eq!(out.profile.role, Role::Tenant);
    assert_eq!(out.token.expose(), "t1");
    assert_eq!(service.backend().token(), Some(out.token));

    let delivered = notifier.drain();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].level, Level::Success);
}

#[tokio::test]
async fn login_reports_backend_message() {
    let base = start_backend(auth_routes()).await;
    let service = service(&base);
    let notifier = Recorder::new();
    let mut form = Form::new(LoginForm::new("ann@example.com", "wrong-one"));

    let res = form
        .submit(&notifier, "Signed in", |cmd| service.execute(cmd))
        .await;

    let Err(SubmitError::Failed(e)) = res else {
        panic!("expected failed submission");
    };
    assert!(e.as_ref().to_string().contains("Invalid credentials"));
    assert!(service.backend().token().is_none());

    let delivered = notifier.drain();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].level, Level::Error);
    assert_eq!(delivered[0].message, "Invalid credentials");
    assert_eq!(form.values().email, "ann@example.com");
}

#[tokio::test]
async fn protected_requests_need_token() {
    let base = start_backend(auth_routes()).await;
    let service = service(&base);

    let err = service
        .execute(query::profile::Current::all())
        .await
        .unwrap_err();

    assert!(err.as_ref().is_unauthenticated());
    assert_eq!(
        err.as_ref().to_string(),
        "Authentication required, please sign in",
    );
}

#[tokio::test]
async fn maintenance_is_filtered_and_paged_locally() {
    let app = Router::new().route(
        "/api/Maintenance",
        get(|headers: HeaderMap| async move {
            authorized(&headers)?;
            let rows = (0..4)
                .map(|status| {
                    json!({
                        "id": format!("00000000-0000-4000-8000-00000000000{status}"),
                        "listingId": "0d1f0d5e-6a3c-4b1f-8e3f-2a1c9e4b7c22",
                        "title": format!("Issue {status}"),
                        "description": "Needs a look",
                        "status": status,
                        "priority": 2,
                    })
                })
                .collect::<Vec<_>>();
            Ok::<_, (StatusCode, Json<Value>)>(Json(Value::Array(rows)))
        }),
    );
    let base = start_backend(app).await;
    let service = Service::new(
        Config::default(),
        Http::new(&base, None)
            .unwrap()
            .with_token(Token::new("t1")),
    );

    let rows = service
        .execute(query::maintenance::All::all())
        .await
        .unwrap();
    let mut filter = filters::maintenance();
    filter.set_rows(rows);

    filter.select("pending").unwrap();
    let pending = filter.filtered();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].title.to_string(), "Issue 0");

    filter.select("all").unwrap();
    assert_eq!(filter.filtered().len(), 4);

    let pages = LocalPages::new(filter.rows().to_vec());
    let size = NonZeroUsize::new(3).unwrap();
    let page = pages
        .execute(FetchPage(PageRequest::new(7, size)))
        .await
        .unwrap();
    assert_eq!(page.number(), 2);
    assert_eq!(page.total_pages, 2);

    let table = Table::new([Column::new("Title", |r: &MaintenanceRequest| {
        r.title.to_string()
    })]);
    let text = table.render_page(&page).to_string();
    assert!(text.contains("Issue 3"), "{text}");
    assert!(text.ends_with("Page 2 of 2"), "{text}");
}

#[tokio::test]
async fn listings_are_paged_by_backend() {
    let app = Router::new().route(
        "/api/Listings",
        get(|Query(q): Query<HashMap<String, String>>| async move {
            assert_eq!(q.get("pageNumber").map(String::as_str), Some("2"));
            assert_eq!(q.get("pageSize").map(String::as_str), Some("2"));
            Json(json!({
                "items": [{
                    "id": "0d1f0d5e-6a3c-4b1f-8e3f-2a1c9e4b7c22",
                    "title": "Sunny loft",
                    "address": "1 Main St",
                    "price": 1200.5,
                    "isActive": true,
                }],
                "totalPages": 3,
            }))
        }),
    );
    let base = start_backend(app).await;
    let service = Service::new(
        Config::default(),
        Http::new(&base, None)
            .unwrap()
            .with_token(Token::new("t1")),
    );

    let page = query::listings::Pages::new(&service)
        .execute(FetchPage(PageRequest::new(1, NonZeroUsize::new(2).unwrap())))
        .await
        .unwrap();

    assert_eq!(page.index, 1);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.rows[0].price.to_string(), "1200.5");
    assert!(page.has_next());
}

#[tokio::test]
async fn listings_past_the_end_show_the_last_page() {
    let app = Router::new().route(
        "/api/Listings",
        get(|Query(q): Query<HashMap<String, String>>| async move {
            let items = if q.get("pageNumber").map(String::as_str) == Some("3")
            {
                json!([{
                    "id": "0d1f0d5e-6a3c-4b1f-8e3f-2a1c9e4b7c22",
                    "title": "Last loft",
                    "address": "9 End St",
                    "price": 900,
                    "isActive": true,
                }])
            } else {
                json!([])
            };
            Json(json!({ "items": items, "totalPages": 3 }))
        }),
    );
    let base = start_backend(app).await;
    let service = Service::new(
        Config::default(),
        Http::new(&base, None)
            .unwrap()
            .with_token(Token::new("t1")),
    );

    let page = query::listings::Pages::new(&service)
        .execute(FetchPage(PageRequest::new(98, NonZeroUsize::new(2).unwrap())))
        .await
        .unwrap();

    assert_eq!(page.index, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].title.to_string(), "Last loft");
    assert!(!page.has_next());
}

#[tokio::test]
async fn missing_lease_is_not_terminated() {
    let app = Router::new().route(
        "/api/Lease/:id",
        get(|Path(id): Path<String>| async move {
            (
                StatusCode::NOT_FOUND,
                format!("lease {id} not found"),
            )
        }),
    );
    let base = start_backend(app).await;
    let service = Service::new(
        Config::default(),
        Http::new(&base, None)
            .unwrap()
            .with_token(Token::new("t1")),
    );
    let id: lease::Id = "7d6c0f6e-8a1e-4f3a-9a49-5f3e6b8f0b11".parse().unwrap();

    let err = service
        .execute(TerminateLease(lease::Termination {
            lease_id: id,
            reason: None,
        }))
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        command::terminate_lease::ExecutionError::NotExists(i) if *i == id,
    ));
}

#[tokio::test]
async fn plain_text_errors_surface_as_messages() {
    let app = Router::new().route(
        "/api/Lease",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = start_backend(app).await;
    let service = Service::new(
        Config::default(),
        Http::new(&base, None)
            .unwrap()
            .with_token(Token::new("t1")),
    );

    let err = service
        .execute(query::leases::All::all())
        .await
        .unwrap_err();

    assert_eq!(err.as_ref().status(), Some(500));
    assert_eq!(err.as_ref().to_string(), "boom");
}

#[tokio::test]
async fn dashboard_composes_summary() {
    let app = auth_routes()
        .route(
            "/api/Lease",
            get(|| async {
                Json(json!([{
                    "id": "7d6c0f6e-8a1e-4f3a-9a49-5f3e6b8f0b11",
                    "listingId": "0d1f0d5e-6a3c-4b1f-8e3f-2a1c9e4b7c22",
                    "tenantId": "3b7a2c1d-9e8f-4a6b-8c5d-1e2f3a4b5c33",
                    "startDate": "2024-01-01T00:00:00",
                    "endDate": "2024-12-31T00:00:00",
                    "monthlyRent": 1000,
                }]))
            }),
        )
        .route("/api/Maintenance", get(|| async { Json(json!([])) }));
    let base = start_backend(app).await;
    let service = Service::new(
        Config::default(),
        Http::new(&base, None)
            .unwrap()
            .with_token(Token::new("t1")),
    );

    let summary = service
        .execute(query::Dashboard {
            today: Date::from_ymd(2024, 6, 1).unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(summary.leases_in(lease::Status::Active), 1);
    assert_eq!(summary.monthly_rent.to_string(), "1000");
    assert_eq!(summary.open_maintenance(), 0);
}
