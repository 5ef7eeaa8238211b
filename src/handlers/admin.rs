use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};

use super::{act_then_reload, load_page};
use crate::{
    AppState,
    loader::Loader,
    models::{AssignDsRequest, NewProduct, RegisterRequest, ServiceUpdate},
    session::SessionContext,
    views::not_connected,
};

const USERS_PATH: &str = "/admin/super/users";
const PRODUCTS_PATH: &str = "/admin/super/products";
const SERVICES_PATH: &str = "/admin/super/services";
const DIVISIONS_PATH: &str = "/admin/super/divisions";

/// console_home
///
/// [Authenticated] `/admin` itself has no page; each officer lands on the
/// console of their role.
pub async fn console_home(session: SessionContext) -> Response {
    Redirect::to(session.role.home_path()).into_response()
}

/// system_monitor
///
/// [Admin] Platform-wide counters and health.
pub async fn system_monitor(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.system_stats(&session.token));
    load_page("/admin/super", "System Monitor", &session, loader).await
}

/// security_logs
///
/// [Admin] The log tail carried by the system stats.
pub async fn security_logs(State(state): State<AppState>, session: SessionContext) -> Response {
    let api = &state.api;
    let token = session.token.as_str();
    let loader =
        Loader::new(move || async move { api.system_stats(token).await.map(|stats| stats.logs) });
    load_page("/admin/super/logs", "Security & Logs", &session, loader).await
}

/// officers
///
/// [Admin] Every non-citizen account.
pub async fn officers(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.officers(&session.token));
    load_page(USERS_PATH, "Officer Management", &session, loader).await
}

/// create_officer
///
/// [Admin] Creates an account with the role picked on the form.
pub async fn create_officer(
    State(state): State<AppState>,
    session: SessionContext,
    Json(request): Json<RegisterRequest>,
) -> Response {
    let outcome = state.api.register(&request).await;

    if outcome.is_ok() {
        tracing::info!(role = %request.role, "officer account created");
    }

    let loader = Loader::new(|| state.api.officers(&session.token));
    act_then_reload(
        USERS_PATH,
        "Officer Management",
        &session,
        outcome,
        "Officer created.",
        loader,
    )
    .await
}

/// remove_officer
///
/// [Admin] Deletes one officer account and reloads the list.
pub async fn remove_officer(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
) -> Response {
    let outcome = state.api.delete_officer(&session.token, &id).await;

    if outcome.is_ok() {
        tracing::info!(officer = %id, "officer account removed");
    }

    let loader = Loader::new(|| state.api.officers(&session.token));
    act_then_reload(
        USERS_PATH,
        "Officer Management",
        &session,
        outcome,
        "Officer removed.",
        loader,
    )
    .await
}

/// products
///
/// [Admin] The marketplace catalogue.
pub async fn products(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.products());
    load_page(PRODUCTS_PATH, "Marketplace Manager", &session, loader).await
}

/// add_product
///
/// [Admin] Adds a product to the marketplace and reloads the catalogue.
pub async fn add_product(
    State(state): State<AppState>,
    session: SessionContext,
    Json(product): Json<NewProduct>,
) -> Response {
    let outcome = state.api.add_product(&session.token, &product).await;
    let loader = Loader::new(|| state.api.products());
    act_then_reload(
        PRODUCTS_PATH,
        "Marketplace Manager",
        &session,
        outcome,
        "Product added.",
        loader,
    )
    .await
}

/// services
///
/// [Admin] Fees and processing times of the public services.
pub async fn services(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.services(&session.token));
    load_page(SERVICES_PATH, "Service Configuration", &session, loader).await
}

/// configure_service
///
/// [Admin] Changes the fee, processing time or availability of one service.
pub async fn configure_service(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
    Json(update): Json<ServiceUpdate>,
) -> Response {
    let outcome = state.api.update_service(&session.token, &id, &update).await;
    let loader = Loader::new(|| state.api.services(&session.token));
    act_then_reload(
        SERVICES_PATH,
        "Service Configuration",
        &session,
        outcome,
        "Service updated.",
        loader,
    )
    .await
}

/// revenue
///
/// [Admin] Revenue per service.
pub async fn revenue(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.revenue(&session.token));
    load_page("/admin/super/revenue", "Revenue Analytics", &session, loader).await
}

/// divisions
///
/// [Admin] DS divisions and their assigned secretaries.
pub async fn divisions(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.divisions(&session.token));
    load_page(DIVISIONS_PATH, "DS Divisions", &session, loader).await
}

/// assign_division
///
/// [Admin] Puts a divisional secretary in charge of a division.
pub async fn assign_division(
    State(state): State<AppState>,
    session: SessionContext,
    Json(request): Json<AssignDsRequest>,
) -> Response {
    let outcome = state.api.assign_ds(&session.token, &request).await;
    let loader = Loader::new(|| state.api.divisions(&session.token));
    act_then_reload(
        DIVISIONS_PATH,
        "DS Divisions",
        &session,
        outcome,
        "Division assigned.",
        loader,
    )
    .await
}

/// notifications
///
/// [Admin] Placeholder for platform notifications. Answers 501.
pub async fn notifications(session: SessionContext) -> Response {
    not_connected("/admin/super/notifications", "Notifications", &session)
}
