use crate::{
    AppState,
    handlers::{admin, ds, gs},
};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Admin Router Module
///
/// The three officer consoles. Each prefix is bound to one role in the
/// session guard's route-role binding, so a GS officer reaching a DS page is
/// sent back to their own console before any handler runs.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // --- Grama Niladhari (gs) ---
        .route("/admin/gs", get(gs::overview))
        .route("/admin/gs/verify", get(gs::pending_verifications))
        // POST /admin/gs/verify/{id}
        // Body: { "status": "Completed" | "Rejected" }
        .route("/admin/gs/verify/{id}", post(gs::decide_application))
        .route(
            "/admin/gs/villagers",
            get(gs::villagers).post(gs::add_citizen),
        )
        .route(
            "/admin/gs/land",
            get(gs::land_disputes).post(gs::record_land_dispute),
        )
        // No backend endpoint yet: answered with 501.
        .route("/admin/gs/messages", get(gs::messages))
        .route("/admin/gs/certificates", get(gs::certificates))
        // --- Divisional Secretary (ds) ---
        .route("/admin/ds", get(ds::overview))
        .route("/admin/ds/approvals", get(ds::approval_queue))
        .route("/admin/ds/approvals/{id}", post(ds::decide_application))
        .route("/admin/ds/certificates", get(ds::certificates))
        .route(
            "/admin/ds/officers",
            get(ds::gs_officers).post(ds::appoint_gs_officer),
        )
        .route("/admin/ds/messages", get(ds::messages))
        .route("/admin/ds/reports", get(ds::reports))
        // --- Super admin (admin) ---
        .route("/admin/super", get(admin::system_monitor))
        .route("/admin/super/logs", get(admin::security_logs))
        .route(
            "/admin/super/users",
            get(admin::officers).post(admin::create_officer),
        )
        .route(
            "/admin/super/users/{id}",
            delete(admin::remove_officer),
        )
        .route(
            "/admin/super/products",
            get(admin::products).post(admin::add_product),
        )
        .route("/admin/super/services", get(admin::services))
        .route("/admin/super/services/{id}", put(admin::configure_service))
        .route("/admin/super/revenue", get(admin::revenue))
        .route(
            "/admin/super/divisions",
            get(admin::divisions).post(admin::assign_division),
        )
        .route("/admin/super/notifications", get(admin::notifications))
}
