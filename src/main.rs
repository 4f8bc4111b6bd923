use axum::{
    Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::dto::{
    ChildListQuery, DashboardRes, ErrorRes, ExamRes, ListChildrenRes, ListMothersRes,
    ListNotificationsRes, ListVisitsRes, MotherListQuery, RecordExamReq, RegisterChildReq,
    RegisterMotherReq, ValidationErrorRes, VisitListQuery, category_filter,
};
use api_shared::{HealthRes, HealthService, session_from_headers};
use sakhi_core::collections;
use sakhi_store::{Registry, StoreError};

/// Application state shared across REST API handlers.
///
/// Holds the registry handle every endpoint reads from and writes to.
#[derive(Clone)]
struct AppState {
    registry: Registry,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_mothers,
        create_mother,
        get_mother,
        list_children,
        create_child,
        get_child,
        list_visits,
        route_plan,
        complete_visit,
        miss_visit,
        list_notifications,
        mark_notification_read,
        mark_all_notifications_read,
        record_exam,
        dashboard
    ),
    components(schemas(
        HealthRes,
        RegisterMotherReq,
        RegisterChildReq,
        RecordExamReq,
        ValidationErrorRes,
        ErrorRes,
        ListMothersRes,
        ListChildrenRes,
        ListVisitsRes,
        ListNotificationsRes,
        DashboardRes,
        ExamRes
    ))
)]
struct ApiDoc;

/// Main entry point for the Sakhi REST server.
///
/// Serves the record collections and derived read models over HTTP on port
/// 3000 (configurable via `SAKHI_REST_ADDR`), with Swagger documentation at
/// `/swagger-ui`. The registry is seeded at startup; there is no durable
/// persistence, so a restart resets every record.
///
/// # Environment Variables
/// - `SAKHI_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("sakhi=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("SAKHI_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting Sakhi REST on {}", rest_addr);

    let registry = Registry::seeded(Utc::now());

    let app = Router::new()
        .route("/health", get(health))
        .route("/mothers", get(list_mothers).post(create_mother))
        .route("/mothers/:id", get(get_mother))
        .route("/children", get(list_children).post(create_child))
        .route("/children/:id", get(get_child))
        .route("/visits", get(list_visits))
        .route("/visits/:id/complete", post(complete_visit))
        .route("/visits/:id/miss", post(miss_visit))
        .route("/route-plan", get(route_plan))
        .route("/notifications", get(list_notifications))
        .route("/notifications/:id/read", post(mark_notification_read))
        .route("/notifications/read-all", post(mark_all_notifications_read))
        .route("/exams", post(record_exam))
        .route("/dashboard", get(dashboard))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { registry });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Translate a store error into the HTTP response the surfaces expect:
/// validation failures carry the full field map (422), missing records are
/// 404.
fn store_error_response(err: StoreError) -> Response {
    match err {
        StoreError::Validation { errors, .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationErrorRes::from_field_errors(errors)),
        )
            .into_response(),
        StoreError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorRes {
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/mothers",
    params(MotherListQuery),
    responses(
        (status = 200, description = "Mothers visible to the session", body = ListMothersRes)
    )
)]
async fn list_mothers(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MotherListQuery>,
) -> Json<ListMothersRes> {
    let session = session_from_headers(&headers);
    let all = state.registry.list_mothers(&session).await;

    let risk = category_filter(query.risk);
    let mothers = collections::filter_by_search(
        &all,
        query.search.as_deref().unwrap_or(""),
        |mother| vec![mother.name.as_str()],
    )
    .into_iter()
    .filter(|mother| risk.matches(&mother.risk_level))
    .cloned()
    .collect();

    Json(ListMothersRes { mothers })
}

#[utoipa::path(
    post,
    path = "/mothers",
    request_body = RegisterMotherReq,
    responses(
        (status = 201, description = "Mother registered"),
        (status = 422, description = "Validation failed", body = ValidationErrorRes)
    )
)]
async fn create_mother(
    State(state): State<AppState>,
    Json(req): Json<RegisterMotherReq>,
) -> Result<impl IntoResponse, Response> {
    let mother = state
        .registry
        .register_mother(req.into_draft())
        .await
        .map_err(store_error_response)?;
    Ok((StatusCode::CREATED, Json(mother)))
}

#[utoipa::path(
    get,
    path = "/mothers/{id}",
    params(("id" = String, Path, description = "Mother record id")),
    responses(
        (status = 200, description = "Mother record"),
        (status = 404, description = "Not found", body = ErrorRes)
    )
)]
async fn get_mother(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Response> {
    let session = session_from_headers(&headers);
    let mother = state
        .registry
        .get_mother(&session, &id)
        .await
        .map_err(store_error_response)?;
    Ok(Json(mother))
}

#[utoipa::path(
    get,
    path = "/children",
    params(ChildListQuery),
    responses(
        (status = 200, description = "Children visible to the session", body = ListChildrenRes)
    )
)]
async fn list_children(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ChildListQuery>,
) -> Json<ListChildrenRes> {
    let session = session_from_headers(&headers);
    let all = state.registry.list_children(&session).await;

    let risk = category_filter(query.risk);
    let vaccination = category_filter(query.vaccination);
    let children = collections::filter_by_search(
        &all,
        query.search.as_deref().unwrap_or(""),
        |child| vec![child.name.as_str(), child.mother_name.as_str()],
    )
    .into_iter()
    .filter(|child| risk.matches(&child.risk_level))
    .filter(|child| vaccination.matches(&child.vaccination_status))
    .cloned()
    .collect();

    Json(ListChildrenRes { children })
}

#[utoipa::path(
    post,
    path = "/children",
    request_body = RegisterChildReq,
    responses(
        (status = 201, description = "Child registered"),
        (status = 422, description = "Validation failed", body = ValidationErrorRes)
    )
)]
async fn create_child(
    State(state): State<AppState>,
    Json(req): Json<RegisterChildReq>,
) -> Result<impl IntoResponse, Response> {
    let child = state
        .registry
        .register_child(req.into_draft(), Utc::now())
        .await
        .map_err(store_error_response)?;
    Ok((StatusCode::CREATED, Json(child)))
}

#[utoipa::path(
    get,
    path = "/children/{id}",
    params(("id" = String, Path, description = "Child record id")),
    responses(
        (status = 200, description = "Child record"),
        (status = 404, description = "Not found", body = ErrorRes)
    )
)]
async fn get_child(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Response> {
    let session = session_from_headers(&headers);
    let child = state
        .registry
        .get_child(&session, &id)
        .await
        .map_err(store_error_response)?;
    Ok(Json(child))
}

#[utoipa::path(
    get,
    path = "/visits",
    params(VisitListQuery),
    responses(
        (status = 200, description = "Visits, most recent scheduled date first", body = ListVisitsRes)
    )
)]
async fn list_visits(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<VisitListQuery>,
) -> Json<ListVisitsRes> {
    let session = session_from_headers(&headers);
    let all = state.registry.list_visits(&session).await;

    let status = category_filter(query.status);
    let filtered = collections::filter_by_search(
        &all,
        query.search.as_deref().unwrap_or(""),
        |visit| vec![visit.patient_name.as_str(), visit.address.as_str()],
    )
    .into_iter()
    .filter(|visit| status.matches(&visit.status))
    .cloned()
    .collect();

    Json(ListVisitsRes {
        visits: collections::sort_visits(filtered),
    })
}

#[utoipa::path(
    get,
    path = "/route-plan",
    responses(
        (status = 200, description = "Visits in daily route order (priority ascending)", body = ListVisitsRes)
    )
)]
async fn route_plan(State(state): State<AppState>, headers: HeaderMap) -> Json<ListVisitsRes> {
    let session = session_from_headers(&headers);
    let visits = collections::route_plan(state.registry.list_visits(&session).await);
    Json(ListVisitsRes { visits })
}

#[utoipa::path(
    post,
    path = "/visits/{id}/complete",
    params(("id" = String, Path, description = "Visit id")),
    responses(
        (status = 200, description = "Visit marked completed"),
        (status = 404, description = "Not found", body = ErrorRes)
    )
)]
async fn complete_visit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Response> {
    let visit = state
        .registry
        .complete_visit(&id)
        .await
        .map_err(store_error_response)?;
    Ok(Json(visit))
}

#[utoipa::path(
    post,
    path = "/visits/{id}/miss",
    params(("id" = String, Path, description = "Visit id")),
    responses(
        (status = 200, description = "Visit marked missed"),
        (status = 404, description = "Not found", body = ErrorRes)
    )
)]
async fn miss_visit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Response> {
    let visit = state
        .registry
        .miss_visit(&id)
        .await
        .map_err(store_error_response)?;
    Ok(Json(visit))
}

#[utoipa::path(
    get,
    path = "/notifications",
    responses(
        (status = 200, description = "Notifications visible to the session", body = ListNotificationsRes)
    )
)]
async fn list_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<ListNotificationsRes> {
    let session = session_from_headers(&headers);
    let notifications = state.registry.list_notifications(&session).await;
    let unread = collections::unread_count(&notifications);
    Json(ListNotificationsRes {
        notifications,
        unread,
    })
}

#[utoipa::path(
    post,
    path = "/notifications/{id}/read",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification marked read"),
        (status = 404, description = "Not found", body = ErrorRes)
    )
)]
async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Response> {
    let notification = state
        .registry
        .mark_notification_read(&id)
        .await
        .map_err(store_error_response)?;
    Ok(Json(notification))
}

#[utoipa::path(
    post,
    path = "/notifications/read-all",
    responses(
        (status = 200, description = "All notifications marked read")
    )
)]
async fn mark_all_notifications_read(State(state): State<AppState>) -> Json<serde_json::Value> {
    let changed = state.registry.mark_all_notifications_read().await;
    Json(serde_json::json!({ "marked": changed }))
}

#[utoipa::path(
    post,
    path = "/exams",
    request_body = RecordExamReq,
    responses(
        (status = 201, description = "Examination recorded", body = ExamRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
async fn record_exam(
    State(state): State<AppState>,
    Json(req): Json<RecordExamReq>,
) -> Result<impl IntoResponse, Response> {
    let exam = state
        .registry
        .record_exam(req.into_draft(), Utc::now())
        .await
        .map_err(store_error_response)?;
    Ok((StatusCode::CREATED, Json(ExamRes { exam })))
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard counters for the session's records", body = DashboardRes)
    )
)]
async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> Json<DashboardRes> {
    let session = session_from_headers(&headers);
    let stats = state.registry.dashboard_stats(&session, Utc::now()).await;
    Json(DashboardRes { stats })
}
