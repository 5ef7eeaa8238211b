use async_trait::async_trait;
use std::sync::Arc;

use crate::models::{
    ActionReceipt, Application, ApplicationStatus, AssignDsRequest, ChatReply, Division, DsStats,
    GsOfficer, GsStats, LandDispute, LoginRequest, LoginResponse, NewApplication, NewCitizen,
    NewGsOfficer, NewLandDispute, NewProduct, Officer, Product, ProfileUpdate, Recommendations,
    RegisterRequest, RevenueReport, ServiceConfig, ServiceUpdate, SystemStats, UserProfile,
    Villager, WalletDocument,
};

pub mod client;
pub mod error;

pub use client::HttpPortalApi;
pub use error::{ApiError, error_message};

/// Result type of every upstream call.
pub type ApiResult<T> = Result<T, ApiError>;

/// PortalApi Trait
///
/// The contract between the page views and the upstream REST API. Views only
/// see this trait, so they run unchanged against the real HTTP client
/// (`HttpPortalApi`) or an in-memory stub in tests.
///
/// Protected operations take the bearer `token` from the request's
/// `SessionContext`; public ones take none.
#[async_trait]
pub trait PortalApi: Send + Sync {
    // --- Authentication (public) ---
    async fn register(&self, request: &RegisterRequest) -> ApiResult<ActionReceipt>;
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;

    // --- Citizen services ---
    async fn submit_application(
        &self,
        token: &str,
        application: &NewApplication,
    ) -> ApiResult<ActionReceipt>;
    async fn my_applications(&self, token: &str) -> ApiResult<Vec<Application>>;
    async fn delete_application(&self, token: &str, id: &str) -> ApiResult<ActionReceipt>;
    async fn profile(&self, token: &str) -> ApiResult<UserProfile>;
    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ApiResult<ActionReceipt>;
    async fn wallet(&self, token: &str) -> ApiResult<Vec<WalletDocument>>;
    async fn recommendations(&self, token: &str) -> ApiResult<Recommendations>;

    // --- Officer review ---
    async fn pending_applications(&self, token: &str) -> ApiResult<Vec<Application>>;
    async fn update_application_status(
        &self,
        token: &str,
        id: &str,
        status: ApplicationStatus,
    ) -> ApiResult<ActionReceipt>;

    // --- Marketplace ---
    async fn products(&self) -> ApiResult<Vec<Product>>;
    async fn add_product(&self, token: &str, product: &NewProduct) -> ApiResult<ActionReceipt>;

    // --- Grama Niladhari ---
    async fn gs_stats(&self, token: &str) -> ApiResult<GsStats>;
    async fn villagers(&self, token: &str) -> ApiResult<Vec<Villager>>;
    async fn land_disputes(&self, token: &str) -> ApiResult<Vec<LandDispute>>;
    async fn add_land_dispute(&self, token: &str, dispute: &NewLandDispute) -> ApiResult<ActionReceipt>;
    async fn add_citizen(&self, token: &str, citizen: &NewCitizen) -> ApiResult<ActionReceipt>;

    // --- Divisional Secretary ---
    async fn ds_stats(&self, token: &str) -> ApiResult<DsStats>;
    async fn ds_queue(&self, token: &str) -> ApiResult<Vec<Application>>;
    async fn ds_certificates(&self, token: &str) -> ApiResult<Vec<Application>>;
    async fn gs_officers(&self, token: &str) -> ApiResult<Vec<GsOfficer>>;
    async fn add_gs_officer(&self, token: &str, officer: &NewGsOfficer) -> ApiResult<ActionReceipt>;

    // --- Super admin ---
    async fn officers(&self, token: &str) -> ApiResult<Vec<Officer>>;
    async fn delete_officer(&self, token: &str, id: &str) -> ApiResult<ActionReceipt>;
    async fn services(&self, token: &str) -> ApiResult<Vec<ServiceConfig>>;
    async fn update_service(
        &self,
        token: &str,
        id: &str,
        update: &ServiceUpdate,
    ) -> ApiResult<ActionReceipt>;
    async fn revenue(&self, token: &str) -> ApiResult<RevenueReport>;
    async fn system_stats(&self, token: &str) -> ApiResult<SystemStats>;
    async fn divisions(&self, token: &str) -> ApiResult<Vec<Division>>;
    async fn assign_ds(&self, token: &str, request: &AssignDsRequest) -> ApiResult<ActionReceipt>;

    // --- Assistant (public) ---
    async fn chat(&self, message: &str) -> ApiResult<ChatReply>;

    /// Link to the generated certificate of a completed application.
    /// Fails for ids that cannot be carried as a single path segment.
    fn download_url(&self, application_id: &str) -> ApiResult<String>;
}

/// ApiState
///
/// The concrete type used to share upstream access across the application state.
pub type ApiState = Arc<dyn PortalApi>;
