#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, header},
};
use smart_citizen_portal::{
    AppState,
    api::{ApiError, ApiResult, PortalApi},
    config::AppConfig,
    create_router,
    models::{
        ActionReceipt, Application, ApplicationStatus, AssignDsRequest, ChatReply, Division,
        DsStats, GsOfficer, GsStats, LandDispute, LoginRequest, LoginResponse, NewApplication,
        NewCitizen, NewGsOfficer, NewLandDispute, NewProduct, Officer, Product, ProfileUpdate,
        Recommendations, RegisterRequest, RevenueReport, ServiceConfig, ServiceUpdate,
        SystemStats, UserProfile, Villager, WalletDocument,
    },
};
use std::sync::{Arc, Mutex};

// --- STUB UPSTREAM ---

// Canned upstream answers. Handlers only see the `PortalApi` trait, so the
// stub stands in for the HTTP client.
pub struct StubApi {
    pub login_role: String,
    pub applications: Vec<Application>,
    pub products: Vec<Product>,
    pub profile: UserProfile,
    pub gs_stats: GsStats,
    pub system_stats: SystemStats,
    // When set, every call fails with this upstream status and message.
    pub fail_with: Option<(u16, String)>,
    // Tokens seen by protected calls, in call order.
    pub seen_tokens: Mutex<Vec<String>>,
    // Status decisions received, as (id, status).
    pub decisions: Mutex<Vec<(String, ApplicationStatus)>>,
}

impl Default for StubApi {
    fn default() -> Self {
        StubApi {
            login_role: "citizen".to_string(),
            applications: vec![Application {
                id: "65a1".to_string(),
                service_type: "Police Clearance".to_string(),
                applicant_nic: "200012345678".to_string(),
                ..Default::default()
            }],
            products: vec![],
            profile: UserProfile {
                nic: "200012345678".to_string(),
                fullname: "Nimal Perera".to_string(),
                phone: "0771234567".to_string(),
                address: "12 Temple Road, Kandy".to_string(),
                role: "citizen".to_string(),
                ..Default::default()
            },
            gs_stats: GsStats {
                pending: 3,
                villagers: 120,
                approved: 40,
                disputes: 1,
            },
            system_stats: SystemStats::default(),
            fail_with: None,
            seen_tokens: Mutex::new(vec![]),
            decisions: Mutex::new(vec![]),
        }
    }
}

impl StubApi {
    fn answer<T>(&self, token: Option<&str>, value: T) -> ApiResult<T> {
        if let Some(token) = token {
            self.seen_tokens.lock().unwrap().push(token.to_string());
        }
        match &self.fail_with {
            Some((status, message)) => Err(ApiError::Status {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(value),
        }
    }

    fn receipt(&self, token: Option<&str>, message: &str) -> ApiResult<ActionReceipt> {
        self.answer(
            token,
            ActionReceipt {
                message: Some(message.to_string()),
                id: None,
            },
        )
    }
}

#[async_trait]
impl PortalApi for StubApi {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<ActionReceipt> {
        request.validate()?;
        self.receipt(None, "User registered successfully")
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        request.validate()?;
        self.answer(
            None,
            LoginResponse {
                access_token: format!("token-for-{}", request.nic),
                role: self.login_role.clone(),
                name: "Nimal Perera".to_string(),
            },
        )
    }

    async fn submit_application(
        &self,
        token: &str,
        application: &NewApplication,
    ) -> ApiResult<ActionReceipt> {
        application.validate()?;
        self.receipt(Some(token), "Application submitted")
    }

    async fn my_applications(&self, token: &str) -> ApiResult<Vec<Application>> {
        self.answer(Some(token), self.applications.clone())
    }

    async fn delete_application(&self, token: &str, _id: &str) -> ApiResult<ActionReceipt> {
        self.receipt(Some(token), "Application deleted")
    }

    async fn profile(&self, token: &str) -> ApiResult<UserProfile> {
        self.answer(Some(token), self.profile.clone())
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ApiResult<ActionReceipt> {
        update.validate()?;
        self.receipt(Some(token), "Profile updated")
    }

    async fn wallet(&self, token: &str) -> ApiResult<Vec<WalletDocument>> {
        self.answer(Some(token), vec![])
    }

    async fn recommendations(&self, token: &str) -> ApiResult<Recommendations> {
        self.answer(Some(token), Recommendations::default())
    }

    async fn pending_applications(&self, token: &str) -> ApiResult<Vec<Application>> {
        self.answer(Some(token), self.applications.clone())
    }

    async fn update_application_status(
        &self,
        token: &str,
        id: &str,
        status: ApplicationStatus,
    ) -> ApiResult<ActionReceipt> {
        self.decisions
            .lock()
            .unwrap()
            .push((id.to_string(), status));
        self.receipt(Some(token), "Status updated")
    }

    async fn products(&self) -> ApiResult<Vec<Product>> {
        self.answer(None, self.products.clone())
    }

    async fn add_product(&self, token: &str, product: &NewProduct) -> ApiResult<ActionReceipt> {
        product.validate()?;
        self.receipt(Some(token), "Product added")
    }

    async fn gs_stats(&self, token: &str) -> ApiResult<GsStats> {
        self.answer(Some(token), self.gs_stats.clone())
    }

    async fn villagers(&self, token: &str) -> ApiResult<Vec<Villager>> {
        self.answer(Some(token), vec![])
    }

    async fn land_disputes(&self, token: &str) -> ApiResult<Vec<LandDispute>> {
        self.answer(Some(token), vec![])
    }

    async fn add_land_dispute(
        &self,
        token: &str,
        dispute: &NewLandDispute,
    ) -> ApiResult<ActionReceipt> {
        dispute.validate()?;
        self.receipt(Some(token), "Dispute logged")
    }

    async fn add_citizen(&self, token: &str, citizen: &NewCitizen) -> ApiResult<ActionReceipt> {
        citizen.validate()?;
        self.receipt(Some(token), "Citizen added")
    }

    async fn ds_stats(&self, token: &str) -> ApiResult<DsStats> {
        self.answer(Some(token), DsStats::default())
    }

    async fn ds_queue(&self, token: &str) -> ApiResult<Vec<Application>> {
        self.answer(Some(token), self.applications.clone())
    }

    async fn ds_certificates(&self, token: &str) -> ApiResult<Vec<Application>> {
        self.answer(Some(token), vec![])
    }

    async fn gs_officers(&self, token: &str) -> ApiResult<Vec<GsOfficer>> {
        self.answer(Some(token), vec![])
    }

    async fn add_gs_officer(
        &self,
        token: &str,
        officer: &NewGsOfficer,
    ) -> ApiResult<ActionReceipt> {
        officer.validate()?;
        self.receipt(Some(token), "GS officer added")
    }

    async fn officers(&self, token: &str) -> ApiResult<Vec<Officer>> {
        self.answer(Some(token), vec![])
    }

    async fn delete_officer(&self, token: &str, _id: &str) -> ApiResult<ActionReceipt> {
        self.receipt(Some(token), "Officer deleted")
    }

    async fn services(&self, token: &str) -> ApiResult<Vec<ServiceConfig>> {
        self.answer(Some(token), vec![])
    }

    async fn update_service(
        &self,
        token: &str,
        _id: &str,
        update: &ServiceUpdate,
    ) -> ApiResult<ActionReceipt> {
        update.validate()?;
        self.receipt(Some(token), "Service updated")
    }

    async fn revenue(&self, token: &str) -> ApiResult<RevenueReport> {
        self.answer(Some(token), RevenueReport::default())
    }

    async fn system_stats(&self, token: &str) -> ApiResult<SystemStats> {
        self.answer(Some(token), self.system_stats.clone())
    }

    async fn divisions(&self, token: &str) -> ApiResult<Vec<Division>> {
        self.answer(Some(token), vec![])
    }

    async fn assign_ds(&self, token: &str, request: &AssignDsRequest) -> ApiResult<ActionReceipt> {
        request.validate()?;
        self.receipt(Some(token), "DS assigned")
    }

    async fn chat(&self, message: &str) -> ApiResult<ChatReply> {
        self.answer(
            None,
            ChatReply {
                response: format!("You asked: {}", message),
            },
        )
    }

    fn download_url(&self, application_id: &str) -> ApiResult<String> {
        if application_id == ".." {
            return Err(ApiError::Validation("Invalid resource id".to_string()));
        }
        Ok(format!(
            "http://upstream.test/api/applications/{}/download",
            application_id
        ))
    }
}

// --- ROUTER SCAFFOLDING ---

pub fn app_with(stub: Arc<StubApi>) -> Router {
    create_router(AppState::new(stub, AppConfig::default()))
}

pub fn app() -> Router {
    app_with(Arc::new(StubApi::default()))
}

/// The `Cookie` header a browser sends after signing in with `role`.
pub fn session_cookie(role: &str) -> String {
    format!("token=jwt-{}; userRole={}; userName=Nimal%20Perera", role, role)
}

pub fn get_as(path: &str, role: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(header::COOKIE, session_cookie(role))
        .body(Body::empty())
        .unwrap()
}

pub fn json_as(method: &str, path: &str, role: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(role) = role {
        builder = builder.header(header::COOKIE, session_cookie(role));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
