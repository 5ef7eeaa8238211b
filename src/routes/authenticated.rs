use crate::{
    AppState,
    handlers::{admin, citizen},
};
use axum::{
    Router,
    routing::{delete, get},
};

/// Authenticated Router Module
///
/// Pages for any signed-in user. The session guard wraps this router; every
/// handler receives the resolved `SessionContext` and calls the upstream with
/// its token.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /admin
        // Officers land on the console of their role.
        .route("/admin", get(admin::console_home))
        // --- Citizen dashboard ---
        .route("/dashboard", get(citizen::overview))
        .route("/dashboard/applications", get(citizen::applications))
        // DELETE /dashboard/applications/{id}
        // Withdraws an application; the response carries the refreshed list.
        .route(
            "/dashboard/applications/{id}",
            delete(citizen::withdraw_application),
        )
        // GET /dashboard/applications/{id}/certificate
        // Redirects to the upstream PDF.
        .route(
            "/dashboard/applications/{id}/certificate",
            get(citizen::certificate),
        )
        .route("/dashboard/wallet", get(citizen::wallet))
        .route(
            "/dashboard/profile",
            get(citizen::profile).put(citizen::update_profile),
        )
        // GET/POST /dashboard/apply/{service}
        // The apply form for a service slug such as `police-clearance`.
        .route(
            "/dashboard/apply/{service}",
            get(citizen::apply_form).post(citizen::submit_application),
        )
}
