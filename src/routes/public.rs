use crate::{AppState, handlers::public};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without a session. The session guard never runs here,
/// so `/login` stays reachable for visitors the guard turned away.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET/POST /login
        // The sign-in screen, and the exchange of NIC + password for session cookies.
        .route("/login", get(public::login_page).post(public::login))
        // POST /logout
        // Expires the session cookies.
        .route("/logout", post(public::logout))
        // POST /register
        // Citizen self-registration.
        .route("/register", post(public::register))
        // GET /services
        // The e-services catalogue.
        .route("/services", get(public::services))
        // GET /marketplace
        .route("/marketplace", get(public::marketplace))
        // POST /chat
        // One round-trip with the assistant.
        .route("/chat", post(public::chat))
}
