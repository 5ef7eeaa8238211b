use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, header};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

use super::{ApiError, ApiResult, PortalApi};
use crate::models::{
    ActionReceipt, Application, ApplicationStatus, AssignDsRequest, ChatReply, ChatRequest,
    Division, DsStats, GsOfficer, GsStats, LandDispute, LoginRequest, LoginResponse,
    NewApplication, NewCitizen, NewGsOfficer, NewLandDispute, NewProduct, Officer, Product,
    ProfileUpdate, Recommendations, RegisterRequest, RevenueReport, ServiceConfig, ServiceUpdate,
    StatusUpdate, SystemStats, UserProfile, Villager, WalletDocument,
};

/// HttpPortalApi
///
/// reqwest implementation of `PortalApi`. Every call goes through `send`,
/// which attaches the bearer header, checks the status and decodes the body
/// into the expected schema.
#[derive(Clone)]
pub struct HttpPortalApi {
    client: Client,
    base_url: String,
}

impl HttpPortalApi {
    /// Builds a client for the upstream rooted at `base_url`
    /// (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, path: &str) -> ApiResult<T> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(endpoint = %path, error = %e, "upstream unreachable");
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let error = ApiError::from_body(status.as_u16(), &body);
            tracing::warn!(endpoint = %path, status = status.as_u16(), error = %error, "upstream rejected request");
            return Err(error);
        }

        serde_json::from_slice(&body).map_err(|source| {
            tracing::warn!(endpoint = %path, error = %source, "upstream response did not match schema");
            ApiError::Decode {
                endpoint: path.to_string(),
                source,
            }
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ApiResult<T> {
        self.send(self.request(Method::GET, path, token), path).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> ApiResult<T> {
        self.send(self.request(Method::POST, path, token).json(body), path)
            .await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send(self.request(Method::PUT, path, Some(token)).json(body), path)
            .await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str, token: &str) -> ApiResult<T> {
        self.send(self.request(Method::DELETE, path, Some(token)), path)
            .await
    }
}

/// Encodes a resource id as exactly one path segment: `/`, `?`, `#` and `%`
/// are escaped, and `.` / `..` are refused since they would walk the path.
fn id_segment(id: &str) -> ApiResult<String> {
    if matches!(id.trim(), "" | "." | "..") {
        return Err(ApiError::Validation(format!("Invalid resource id: {:?}", id)));
    }
    let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    // Form encoding writes a space as `+`, which a path reads literally.
    Ok(encoded.replace('+', "%20"))
}

#[async_trait]
impl PortalApi for HttpPortalApi {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<ActionReceipt> {
        request.validate()?;
        self.post("/api/auth/register", None, request).await
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        request.validate()?;
        self.post("/api/auth/login", None, request).await
    }

    async fn submit_application(
        &self,
        token: &str,
        application: &NewApplication,
    ) -> ApiResult<ActionReceipt> {
        application.validate()?;
        self.post("/api/applications/", Some(token), application)
            .await
    }

    async fn my_applications(&self, token: &str) -> ApiResult<Vec<Application>> {
        self.get("/api/applications/my-apps", Some(token)).await
    }

    async fn delete_application(&self, token: &str, id: &str) -> ApiResult<ActionReceipt> {
        self.delete(&format!("/api/applications/{}", id_segment(id)?), token)
            .await
    }

    async fn profile(&self, token: &str) -> ApiResult<UserProfile> {
        self.get("/api/users/me", Some(token)).await
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ApiResult<ActionReceipt> {
        update.validate()?;
        self.put("/api/users/me", token, update).await
    }

    async fn wallet(&self, token: &str) -> ApiResult<Vec<WalletDocument>> {
        self.get("/api/users/wallet", Some(token)).await
    }

    async fn recommendations(&self, token: &str) -> ApiResult<Recommendations> {
        self.get("/api/recommendations/", Some(token)).await
    }

    async fn pending_applications(&self, token: &str) -> ApiResult<Vec<Application>> {
        self.get("/api/applications/pending", Some(token)).await
    }

    async fn update_application_status(
        &self,
        token: &str,
        id: &str,
        status: ApplicationStatus,
    ) -> ApiResult<ActionReceipt> {
        self.put(
            &format!("/api/applications/{}/status", id_segment(id)?),
            token,
            &StatusUpdate { status },
        )
        .await
    }

    async fn products(&self) -> ApiResult<Vec<Product>> {
        self.get("/api/products/", None).await
    }

    async fn add_product(&self, token: &str, product: &NewProduct) -> ApiResult<ActionReceipt> {
        product.validate()?;
        self.post("/api/products/", Some(token), product).await
    }

    async fn gs_stats(&self, token: &str) -> ApiResult<GsStats> {
        self.get("/api/gs/stats", Some(token)).await
    }

    async fn villagers(&self, token: &str) -> ApiResult<Vec<Villager>> {
        self.get("/api/gs/villagers", Some(token)).await
    }

    async fn land_disputes(&self, token: &str) -> ApiResult<Vec<LandDispute>> {
        self.get("/api/gs/land", Some(token)).await
    }

    async fn add_land_dispute(&self, token: &str, dispute: &NewLandDispute) -> ApiResult<ActionReceipt> {
        dispute.validate()?;
        self.post("/api/gs/land", Some(token), dispute).await
    }

    async fn add_citizen(&self, token: &str, citizen: &NewCitizen) -> ApiResult<ActionReceipt> {
        citizen.validate()?;
        self.post("/api/gs/add-citizen", Some(token), citizen).await
    }

    async fn ds_stats(&self, token: &str) -> ApiResult<DsStats> {
        self.get("/api/ds/stats", Some(token)).await
    }

    async fn ds_queue(&self, token: &str) -> ApiResult<Vec<Application>> {
        self.get("/api/ds/queue", Some(token)).await
    }

    async fn ds_certificates(&self, token: &str) -> ApiResult<Vec<Application>> {
        self.get("/api/ds/certificates", Some(token)).await
    }

    async fn gs_officers(&self, token: &str) -> ApiResult<Vec<GsOfficer>> {
        self.get("/api/ds/gs-officers", Some(token)).await
    }

    async fn add_gs_officer(&self, token: &str, officer: &NewGsOfficer) -> ApiResult<ActionReceipt> {
        officer.validate()?;
        self.post("/api/ds/add-gs", Some(token), officer).await
    }

    async fn officers(&self, token: &str) -> ApiResult<Vec<Officer>> {
        self.get("/api/admin/users", Some(token)).await
    }

    async fn delete_officer(&self, token: &str, id: &str) -> ApiResult<ActionReceipt> {
        self.delete(&format!("/api/admin/users/{}", id_segment(id)?), token)
            .await
    }

    async fn services(&self, token: &str) -> ApiResult<Vec<ServiceConfig>> {
        self.get("/api/admin/services", Some(token)).await
    }

    async fn update_service(
        &self,
        token: &str,
        id: &str,
        update: &ServiceUpdate,
    ) -> ApiResult<ActionReceipt> {
        update.validate()?;
        self.put(
            &format!("/api/admin/services/{}", id_segment(id)?),
            token,
            update,
        )
            .await
    }

    async fn revenue(&self, token: &str) -> ApiResult<RevenueReport> {
        self.get("/api/admin/revenue", Some(token)).await
    }

    async fn system_stats(&self, token: &str) -> ApiResult<SystemStats> {
        self.get("/api/admin/stats", Some(token)).await
    }

    async fn divisions(&self, token: &str) -> ApiResult<Vec<Division>> {
        self.get("/api/admin/divisions", Some(token)).await
    }

    async fn assign_ds(&self, token: &str, request: &AssignDsRequest) -> ApiResult<ActionReceipt> {
        request.validate()?;
        self.post("/api/admin/assign-ds", Some(token), request).await
    }

    async fn chat(&self, message: &str) -> ApiResult<ChatReply> {
        if message.trim().is_empty() {
            return Err(ApiError::Validation("message is required".to_string()));
        }
        let request = ChatRequest {
            message: message.to_string(),
        };
        self.post("/api/chat/", None, &request).await
    }

    fn download_url(&self, application_id: &str) -> ApiResult<String> {
        Ok(format!(
            "{}/api/applications/{}/download",
            self.base_url,
            id_segment(application_id)?
        ))
    }
}
