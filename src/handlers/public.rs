use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    config::AppConfig,
    loader::Loader,
    models::{
        ActionReceipt, ChatReply, ChatRequest, LoginRequest, RegisterRequest, service_catalogue,
    },
    session::{CookieStorage, Role, RoleClaim, SessionCredential},
    views::{PageView, failure_status},
};

/// 303 redirect carrying the `Set-Cookie` directives queued on `jar`.
fn redirect_with_cookies(target: &str, jar: &CookieStorage) -> Response {
    let mut response = Redirect::to(target).into_response();
    for value in jar.set_cookie_headers() {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// login_page
///
/// [Public] The sign-in screen. Carries no data.
pub async fn login_page() -> Response {
    PageView::public("Sign in", ()).render()
}

/// login
///
/// [Public] Exchanges NIC and password for a credential, persists it in the
/// visitor's cookies and sends the visitor to the home of their role.
/// Accounts whose role the portal does not know are refused here rather than
/// left to bounce off the guard.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Response {
    let reply = match state.api.login(&payload).await {
        Ok(reply) => reply,
        Err(error) => {
            let status = failure_status(&error);
            return PageView::public("Sign in", ())
                .with_error(Some(error.to_string()))
                .render_with(status);
        }
    };

    let role = match RoleClaim::parse(&reply.role) {
        RoleClaim::Known(role) => role,
        RoleClaim::Unrecognized(tag) => {
            tracing::warn!(role = %tag, "login refused: unsupported role");
            return PageView::public("Sign in", ())
                .with_error(Some(
                    "This account's role is not supported by the portal.".to_string(),
                ))
                .render_with(StatusCode::FORBIDDEN);
        }
    };

    let credential =
        SessionCredential::new(reply.access_token, RoleClaim::Known(role), reply.name);
    let mut jar = CookieStorage::empty().with_secure(state.config.secure_cookies());
    credential.write(&mut jar);

    tracing::info!(role = %role, "session opened");
    redirect_with_cookies(role.home_path(), &jar)
}

/// logout
///
/// [Public] Clears the three session keys and returns to the sign-in screen.
pub async fn logout(State(config): State<AppConfig>) -> Response {
    let mut jar = CookieStorage::empty().with_secure(config.secure_cookies());
    SessionCredential::clear(&mut jar);

    tracing::info!("session closed");
    redirect_with_cookies(&config.login_path, &jar)
}

/// register
///
/// [Public] Self-service citizen registration. The role is always `citizen`
/// here; officers are created from the super admin console.
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Response {
    payload.role = Role::Citizen;

    match state.api.register(&payload).await {
        Ok(receipt) => PageView::public("Register", receipt.clone())
            .with_notice(
                receipt
                    .message
                    .unwrap_or_else(|| "Registration complete.".to_string()),
            )
            .render_with(StatusCode::CREATED),
        Err(error) => {
            let status = failure_status(&error);
            PageView::public("Register", ActionReceipt::default())
                .with_error(Some(error.to_string()))
                .render_with(status)
        }
    }
}

/// services
///
/// [Public] The e-services catalogue. Static; each entry links to its apply
/// form, which the guard keeps behind sign-in.
pub async fn services() -> Response {
    PageView::public("E-Services", service_catalogue()).render()
}

/// marketplace
///
/// [Public] All marketplace products.
pub async fn marketplace(State(state): State<AppState>) -> Response {
    let api = state.api.clone();
    let mut products = Loader::new(|| api.products());
    products.load().await;

    let (data, error) = products.into_parts();
    PageView::public("Marketplace", data).with_error(error).render()
}

/// chat
///
/// [Public] Relays one message to the assistant.
pub async fn chat(State(state): State<AppState>, Json(payload): Json<ChatRequest>) -> Response {
    match state.api.chat(&payload.message).await {
        Ok(reply) => PageView::public("Assistant", reply).render(),
        Err(error) => {
            let status = failure_status(&error);
            PageView::public("Assistant", ChatReply::default())
                .with_error(Some(error.to_string()))
                .render_with(status)
        }
    }
}
