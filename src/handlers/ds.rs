use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};

use super::{act_then_reload, load_page};
use crate::{
    AppState,
    loader::Loader,
    models::{NewGsOfficer, StatusUpdate},
    session::SessionContext,
    views::not_connected,
};

const APPROVALS_PATH: &str = "/admin/ds/approvals";
const OFFICERS_PATH: &str = "/admin/ds/officers";

/// overview
///
/// [DS] Division counters and collected fees.
pub async fn overview(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.ds_stats(&session.token));
    load_page("/admin/ds", "DS Overview", &session, loader).await
}

/// approval_queue
///
/// [DS] Applications verified by GS officers, waiting for final approval.
pub async fn approval_queue(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.ds_queue(&session.token));
    load_page(APPROVALS_PATH, "Approval Queue", &session, loader).await
}

/// decide_application
///
/// [DS] Final decision on one application, then the refreshed queue.
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

    let loader = Loader::new(|| state.api.ds_queue(&session.token));
    act_then_reload(
        APPROVALS_PATH,
        "Approval Queue",
        &session,
        outcome,
        &format!("Application marked {}.", update.status.as_str()),
        loader,
    )
    .await
}

/// certificates
///
/// [DS] Certificates signed in the division.
pub async fn certificates(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.ds_certificates(&session.token));
    load_page("/admin/ds/certificates", "Signed Certificates", &session, loader).await
}

/// gs_officers
///
/// [DS] GS officers reporting to the division.
pub async fn gs_officers(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.gs_officers(&session.token));
    load_page(OFFICERS_PATH, "GS Officers", &session, loader).await
}

/// appoint_gs_officer
///
/// [DS] Creates a GS officer account under the division.
pub async fn appoint_gs_officer(
    State(state): State<AppState>,
    session: SessionContext,
    Json(officer): Json<NewGsOfficer>,
) -> Response {
    let outcome = state.api.add_gs_officer(&session.token, &officer).await;
    let loader = Loader::new(|| state.api.gs_officers(&session.token));
    act_then_reload(
        OFFICERS_PATH,
        "GS Officers",
        &session,
        outcome,
        "GS officer appointed.",
        loader,
    )
    .await
}

/// messages
///
/// [DS] Placeholder for division messages. Answers 501.
pub async fn messages(session: SessionContext) -> Response {
    not_connected("/admin/ds/messages", "Messages", &session)
}

/// reports
///
/// [DS] Placeholder for regional reports. Answers 501.
pub async fn reports(session: SessionContext) -> Response {
    not_connected("/admin/ds/reports", "Regional Reports", &session)
}
