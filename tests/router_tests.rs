mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::get,
};
use common::{StubApi, app, app_with, body_json, get_as, json_as};
use serde_json::json;
use smart_citizen_portal::{AppConfig, AppState, SessionContext, models::ApplicationStatus};
use std::sync::Arc;
use tower::util::ServiceExt;

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok().map(str::to_string))
        .collect()
}

// --- Guard at the router ---

#[tokio::test]
async fn test_protected_page_without_session_redirects_to_login() {
    let response = app()
        .oneshot(Request::builder().uri("/admin/ds").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_wrong_console_redirects_to_default_area() {
    let response = app()
        .oneshot(get_as("/admin/ds/approvals", "gs"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_unrecognized_role_cookie_redirects_to_login() {
    let response = app().oneshot(get_as("/dashboard", "auditor")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_allowed_console_renders_page_with_sidebar() {
    let stub = Arc::new(StubApi::default());
    let response = app_with(stub.clone())
        .oneshot(get_as("/admin/gs", "gs"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["area"], "gs");
    assert_eq!(body["area_label"], "GRAMA NILADHARI");
    assert_eq!(body["user"], "Nimal Perera");
    assert_eq!(body["data"]["pending"], 3);
    assert_eq!(body["menu"][0]["path"], "/admin/gs");
    assert_eq!(body["menu"][0]["active"], true);
    assert_eq!(body["error"], serde_json::Value::Null);

    // The stored token is what reaches the upstream.
    assert_eq!(*stub.seen_tokens.lock().unwrap(), vec!["jwt-gs".to_string()]);
}

#[tokio::test]
async fn test_handler_outside_guard_redirects_to_configured_login() {
    let config = AppConfig {
        login_path: "/signin".to_string(),
        ..Default::default()
    };
    let state = AppState::new(Arc::new(StubApi::default()), config);
    let app = Router::new()
        .route("/unguarded", get(|session: SessionContext| async move { session.name }))
        .with_state(state);

    let response = app
        .oneshot(get_as("/unguarded", "citizen"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/signin");
}

#[tokio::test]
async fn test_admin_entry_sends_officer_to_own_console() {
    let response = app().oneshot(get_as("/admin", "ds")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/ds");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

// --- Login / logout ---

#[tokio::test]
async fn test_login_persists_session_and_redirects_home() {
    let stub = Arc::new(StubApi {
        login_role: "gs".to_string(),
        ..Default::default()
    });

    let response = app_with(stub)
        .oneshot(json_as(
            "POST",
            "/login",
            None,
            json!({ "nic": "198012345678", "password": "secret" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/gs");

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 3);
    assert!(cookies[0].starts_with("token=token-for-198012345678;"));
    assert!(cookies[1].starts_with("userRole=gs;"));
    assert!(cookies[2].starts_with("userName=Nimal%20Perera;"));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));
    assert!(cookies.iter().all(|c| !c.contains("Secure")));
}

#[tokio::test]
async fn test_login_with_unsupported_role_is_refused() {
    let stub = Arc::new(StubApi {
        login_role: "auditor".to_string(),
        ..Default::default()
    });

    let response = app_with(stub)
        .oneshot(json_as(
            "POST",
            "/login",
            None,
            json!({ "nic": "198012345678", "password": "secret" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_login_upstream_rejection_is_shown() {
    let stub = Arc::new(StubApi {
        fail_with: Some((401, "Invalid credentials".to_string())),
        ..Default::default()
    });

    let response = app_with(stub)
        .oneshot(json_as(
            "POST",
            "/login",
            None,
            json!({ "nic": "198012345678", "password": "wrong" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_logout_expires_all_session_cookies() {
    let response = app()
        .oneshot(json_as("POST", "/logout", Some("citizen"), json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 3);
    for (cookie, key) in cookies.iter().zip(["token", "userRole", "userName"]) {
        assert!(cookie.starts_with(&format!("{}=;", key)));
        assert!(cookie.contains("Max-Age=0"));
    }
}

#[tokio::test]
async fn test_services_catalogue_is_public() {
    let response = app()
        .oneshot(Request::builder().uri("/services").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "E-Services");
    assert_eq!(body["menu"], json!([]));

    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 7);
    assert_eq!(
        entries[2],
        json!({
            "id": "police-clearance",
            "title": "Police Clearance Report",
            "dept": "Sri Lanka Police",
            "type": "Legal",
            "apply_path": "/dashboard/apply/police-clearance"
        })
    );
    assert_eq!(entries[6]["id"], "grama-certificate");
}

#[tokio::test]
async fn test_catalogue_entry_leads_to_its_apply_form() {
    let response = app()
        .oneshot(get_as("/dashboard/apply/visa-application", "citizen"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Visa Application");
}

#[tokio::test]
async fn test_register_answers_created() {
    let response = app()
        .oneshot(json_as(
            "POST",
            "/register",
            None,
            json!({
                "fullname": "Nimal Perera",
                "nic": "200012345678",
                "phone": "0771234567",
                "password": "secret",
                "role": "admin"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["notice"], "User registered successfully");
}

// --- Citizen dashboard ---

#[tokio::test]
async fn test_dashboard_overview_combines_loads() {
    let response = app().oneshot(get_as("/dashboard", "citizen")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["area"], "citizen");
    assert_eq!(body["data"]["initials"], "NP");
    assert_eq!(body["data"]["applications"][0]["_id"], "65a1");
}

#[tokio::test]
async fn test_apply_form_is_prefilled_from_profile() {
    let response = app()
        .oneshot(get_as("/dashboard/apply/police-clearance", "citizen"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Police Clearance");
    assert_eq!(body["data"]["nic"], "200012345678");
    assert_eq!(body["data"]["address"], "12 Temple Road, Kandy");
}

#[tokio::test]
async fn test_certificate_redirects_to_upstream_download() {
    let response = app()
        .oneshot(get_as("/dashboard/applications/65a1/certificate", "citizen"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "http://upstream.test/api/applications/65a1/download"
    );
}

#[tokio::test]
async fn test_certificate_for_dot_segment_id_is_refused() {
    let response = app()
        .oneshot(get_as("/dashboard/applications/%2E%2E/certificate", "citizen"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid resource id");
}

#[tokio::test]
async fn test_failed_load_renders_banner_with_empty_data() {
    let stub = Arc::new(StubApi {
        fail_with: Some((500, "Database unavailable".to_string())),
        ..Default::default()
    });

    let response = app_with(stub)
        .oneshot(get_as("/dashboard/applications", "citizen"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Database unavailable");
    assert_eq!(body["data"], json!([]));
}

// --- Officer actions ---

#[tokio::test]
async fn test_gs_decision_reaches_upstream_and_reloads_queue() {
    let stub = Arc::new(StubApi::default());

    let response = app_with(stub.clone())
        .oneshot(json_as(
            "POST",
            "/admin/gs/verify/65a1",
            Some("gs"),
            json!({ "status": "Completed" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["notice"], "Status updated");
    assert_eq!(body["data"][0]["_id"], "65a1");
    assert_eq!(
        *stub.decisions.lock().unwrap(),
        vec![("65a1".to_string(), ApplicationStatus::Completed)]
    );
}

#[tokio::test]
async fn test_missing_required_field_answers_unprocessable() {
    let response = app()
        .oneshot(json_as(
            "POST",
            "/admin/gs/land",
            Some("gs"),
            json!({ "title": "", "description": "Boundary wall", "parties_involved": "A vs B" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Required field(s) missing: title");
}

#[tokio::test]
async fn test_upstream_unauthorized_action_passes_status_through() {
    let stub = Arc::new(StubApi {
        fail_with: Some((401, "Token expired".to_string())),
        ..Default::default()
    });

    let response = app_with(stub)
        .oneshot(json_as(
            "DELETE",
            "/admin/super/users/42",
            Some("admin"),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Token expired");
}

#[tokio::test]
async fn test_security_logs_come_from_system_stats() {
    let mut stub = StubApi::default();
    stub.system_stats.logs = vec![smart_citizen_portal::models::LogEntry {
        time: "10:00".to_string(),
        level: "WARN".to_string(),
        module: "auth".to_string(),
        msg: "3 failed logins".to_string(),
    }];

    let response = app_with(Arc::new(stub))
        .oneshot(get_as("/admin/super/logs", "admin"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["msg"], "3 failed logins");
    assert_eq!(body["menu"][6]["active"], true);
}

#[tokio::test]
async fn test_unwired_pages_answer_not_implemented() {
    for (path, role) in [
        ("/admin/gs/messages", "gs"),
        ("/admin/ds/reports", "ds"),
        ("/admin/super/notifications", "admin"),
    ] {
        let response = app().oneshot(get_as(path, role)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED, "{path}");
        let body = body_json(response).await;
        assert_eq!(
            body["error"],
            "This page is not connected to a backend endpoint yet."
        );
    }
}
