use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};

use super::{act_then_reload, load_page};
use crate::{
    AppState,
    loader::Loader,
    models::{NewCitizen, NewLandDispute, StatusUpdate},
    session::SessionContext,
    views::not_connected,
};

const VERIFY_PATH: &str = "/admin/gs/verify";
const VILLAGERS_PATH: &str = "/admin/gs/villagers";
const LAND_PATH: &str = "/admin/gs/land";

/// overview
///
/// [GS] Counters for the officer's section.
pub async fn overview(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.gs_stats(&session.token));
    load_page("/admin/gs", "GS Overview", &session, loader).await
}

/// pending_verifications
///
/// [GS] Applications waiting for the officer's decision.
pub async fn pending_verifications(
    State(state): State<AppState>,
    session: SessionContext,
) -> Response {
    let loader = Loader::new(|| state.api.pending_applications(&session.token));
    load_page(VERIFY_PATH, "Pending Verifications", &session, loader).await
}

/// decide_application
///
/// [GS] Approves or rejects one application, then reloads the queue.
pub async fn decide_application(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response {
    let outcome = state
        .api
        .update_application_status(&session.token, &id, update.status)
        .await;

    if outcome.is_ok() {
        tracing::info!(application = %id, status = update.status.as_str(), "application decided");
    }

    let loader = Loader::new(|| state.api.pending_applications(&session.token));
    act_then_reload(
        VERIFY_PATH,
        "Pending Verifications",
        &session,
        outcome,
        &format!("Application marked {}.", update.status.as_str()),
        loader,
    )
    .await
}

/// villagers
///
/// [GS] Citizens registered in the section.
pub async fn villagers(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.villagers(&session.token));
    load_page(VILLAGERS_PATH, "Villager Database", &session, loader).await
}

/// add_citizen
///
/// [GS] Registers a citizen on their behalf.
pub async fn add_citizen(
    State(state): State<AppState>,
    session: SessionContext,
    Json(citizen): Json<NewCitizen>,
) -> Response {
    let outcome = state.api.add_citizen(&session.token, &citizen).await;
    let loader = Loader::new(|| state.api.villagers(&session.token));
    act_then_reload(
        VILLAGERS_PATH,
        "Villager Database",
        &session,
        outcome,
        "Citizen registered.",
        loader,
    )
    .await
}

/// land_disputes
///
/// [GS] Land disputes logged in the section.
pub async fn land_disputes(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.land_disputes(&session.token));
    load_page(LAND_PATH, "Land Disputes", &session, loader).await
}

/// record_land_dispute
///
/// [GS] Logs a new dispute and reloads the list.
pub async fn record_land_dispute(
    State(state): State<AppState>,
    session: SessionContext,
    Json(dispute): Json<NewLandDispute>,
) -> Response {
    let outcome = state.api.add_land_dispute(&session.token, &dispute).await;
    let loader = Loader::new(|| state.api.land_disputes(&session.token));
    act_then_reload(
        LAND_PATH,
        "Land Disputes",
        &session,
        outcome,
        "Dispute recorded.",
        loader,
    )
    .await
}

/// messages
///
/// [GS] Placeholder until the upstream exposes officer messaging. Answers 501.
pub async fn messages(session: SessionContext) -> Response {
    not_connected("/admin/gs/messages", "Messages", &session)
}

/// certificates
///
/// [GS] Placeholder for issued certificates. Answers 501.
pub async fn certificates(session: SessionContext) -> Response {
    not_connected("/admin/gs/certificates", "Certificates", &session)
}
