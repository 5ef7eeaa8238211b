use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    middleware,
};

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Upstream access, session handling and the page views built on them.
pub mod api;
pub mod config;
pub mod guard;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod navigation;
pub mod session;
pub mod views;

// Module for routing segregation (Public, Authenticated, Admin).
pub mod routes;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use api::{ApiError, ApiState, HttpPortalApi, PortalApi};
pub use config::AppConfig;
pub use guard::{GuardDecision, RouteRoleBinding, SessionGuard};
pub use session::{Role, SessionContext, SessionCredential};

/// AppState
///
/// The single, immutable container shared by every request: upstream access,
/// the session guard and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    /// Upstream API: the HTTP client in production, a stub in tests.
    pub api: ApiState,
    /// Session & role guard evaluated before every protected page.
    pub guard: Arc<SessionGuard>,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Builds the state with the portal's route-role binding and the
    /// redirect targets taken from `config`.
    pub fn new(api: ApiState, config: AppConfig) -> Self {
        let guard = SessionGuard::new(
            RouteRoleBinding::portal(),
            &config.login_path,
            &config.default_area,
        );
        Self {
            api,
            guard: Arc::new(guard),
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for ApiState {
    fn from_ref(app_state: &AppState) -> ApiState {
        app_state.api.clone()
    }
}

impl FromRef<AppState> for Arc<SessionGuard> {
    fn from_ref(app_state: &AppState) -> Arc<SessionGuard> {
        app_state.guard.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the portal's routing structure, puts the session guard in front
/// of every protected router and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Public Routes: No middleware applied.
        .merge(public::public_routes())
        // Authenticated Routes: any stored credential with a known role.
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                guard::session_guard,
            )),
        )
        // Officer consoles: the same guard, which also checks the role bound
        // to each console prefix.
        .merge(
            admin::admin_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                guard::session_guard,
            )),
        )
        .with_state(state);

    // 3. Observability and Correlation Layers (Applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: one span per request, tagged with the request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: echo x-request-id back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Used by `TraceLayer` to open the request span. It carries the
/// `x-request-id` header alongside the HTTP method and URI so every log line
/// of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
