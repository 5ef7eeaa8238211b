use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::{api::ApiError, session::Role};

// --- Required-field checks ---

/// Rejects the request when any of the named fields is blank.
/// The message lists the missing fields in declaration order.
fn require(fields: &[(&str, &str)]) -> Result<(), ApiError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Required field(s) missing: {}",
            missing.join(", ")
        )))
    }
}

/// Reads an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// --- Authentication ---

/// RegisterRequest
///
/// Input payload for account creation (POST /api/auth/register). Officers are
/// created through the same endpoint with their role set by a super admin.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegisterRequest {
    pub fullname: String,
    pub nic: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Citizen
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require(&[
            ("fullname", self.fullname.as_str()),
            ("nic", self.nic.as_str()),
            ("phone", self.phone.as_str()),
            ("password", self.password.as_str()),
        ])
    }
}

/// LoginRequest
///
/// Citizens and officers both sign in with their NIC.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub nic: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require(&[("nic", self.nic.as_str()), ("password", self.password.as_str())])
    }
}

/// LoginResponse
///
/// Older deployments name the token `token`, newer ones `access_token`.
/// `role` stays a raw string: an unknown tag must reach the guard untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "token")]
    pub access_token: String,
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// ActionReceipt
///
/// Acknowledgement returned by the upstream for writes.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct ActionReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

// --- Applications ---

/// ApplicationStatus
///
/// The three states an application moves through. An application enters as
/// `Pending` and is moved to `Completed` or `Rejected` by an officer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, Default, PartialEq, Eq)]
#[ts(export)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Completed,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Completed => "Completed",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

/// ApplicationDetails
///
/// Free-form applicant data captured by the apply form.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct ApplicationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Application
///
/// A certificate or permit request as stored upstream.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: String,
    pub service_type: String,
    pub applicant_nic: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: ApplicationDetails,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// NewApplication
///
/// Input payload for POST /api/applications/. The upstream overwrites
/// `applicant_nic` with the caller's identity.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default)]
#[ts(export)]
pub struct NewApplication {
    pub service_type: String,
    pub applicant_nic: String,
    pub details: ApplicationDetails,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ApplicationStatus,
}

impl NewApplication {
    pub fn validate(&self) -> Result<(), ApiError> {
        require(&[
            ("service_type", self.service_type.as_str()),
            ("applicant_nic", self.applicant_nic.as_str()),
            ("name", self.details.name.as_deref().unwrap_or_default()),
        ])
    }
}

/// StatusUpdate
///
/// Officer decision on an application (PUT /api/applications/{id}/status).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

// --- Marketplace ---

/// Product
///
/// Marketplace item surfaced when its `event_trigger` matches a life event.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    pub event_trigger: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: i64,
}

/// NewProduct
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    pub event_trigger: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: i64,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), ApiError> {
        require(&[
            ("name", self.name.as_str()),
            ("category", self.category.as_str()),
            ("event_trigger", self.event_trigger.as_str()),
        ])
    }
}

/// Recommendations
///
/// Life events detected from completed applications and the products they trigger.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct Recommendations {
    pub triggers: Vec<String>,
    pub products: Vec<Product>,
}

// --- Citizen profile ---

/// UserProfile
///
/// Output of GET /api/users/me. The password never leaves the upstream.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct UserProfile {
    pub nic: String,
    pub fullname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    pub role: String,
}

impl UserProfile {
    /// Avatar initials: first letters of the first and last name, or the first
    /// two letters of a single-word name.
    pub fn initials(&self) -> String {
        let parts: Vec<&str> = self.fullname.split_whitespace().collect();
        let initials: String = match parts.as_slice() {
            [] => String::new(),
            [only] => only.chars().take(2).collect(),
            [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
        };
        initials.to_uppercase()
    }
}

/// ProfileUpdate
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default)]
#[ts(export)]
pub struct ProfileUpdate {
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        require(&[("phone", self.phone.as_str()), ("email", self.email.as_str()), ("address", self.address.as_str())])
    }
}

/// WalletDocument
///
/// A completed application as it appears in the citizen's digital wallet.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct WalletDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub issued_date: Option<NaiveDateTime>,
    pub issuer: String,
    #[serde(rename = "type")]
    pub document_type: String,
}

// --- Grama Niladhari ---

/// GsStats
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct GsStats {
    pub pending: i64,
    pub villagers: i64,
    pub approved: i64,
    pub disputes: i64,
}

/// Villager
///
/// A citizen registered under the officer's section.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct Villager {
    pub id: String,
    pub fullname: String,
    pub nic: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
}

/// LandDispute
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct LandDispute {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub parties_involved: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
}

/// NewLandDispute
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default)]
#[ts(export)]
pub struct NewLandDispute {
    pub title: String,
    pub description: String,
    pub parties_involved: String,
}

impl NewLandDispute {
    pub fn validate(&self) -> Result<(), ApiError> {
        require(&[
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("parties_involved", self.parties_involved.as_str()),
        ])
    }
}

/// NewCitizen
///
/// Citizen registration performed by a GS officer (POST /api/gs/add-citizen).
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default)]
#[ts(export)]
pub struct NewCitizen {
    pub fullname: String,
    pub nic: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub address: String,
}

impl NewCitizen {
    pub fn validate(&self) -> Result<(), ApiError> {
        require(&[
            ("fullname", self.fullname.as_str()),
            ("nic", self.nic.as_str()),
            ("phone", self.phone.as_str()),
            ("password", self.password.as_str()),
            ("address", self.address.as_str()),
        ])
    }
}

// --- Divisional Secretary ---

/// DsStats
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct DsStats {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub revenue: f64,
}

/// GsOfficer
///
/// A GS officer reporting to the signed-in DS.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct GsOfficer {
    pub fullname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nic: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gs_section: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

/// NewGsOfficer
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default)]
#[ts(export)]
pub struct NewGsOfficer {
    pub fullname: String,
    pub nic: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub gs_section: String,
    pub address: String,
}

impl NewGsOfficer {
    pub fn validate(&self) -> Result<(), ApiError> {
        require(&[
            ("fullname", self.fullname.as_str()),
            ("nic", self.nic.as_str()),
            ("phone", self.phone.as_str()),
            ("password", self.password.as_str()),
            ("gs_section", self.gs_section.as_str()),
        ])
    }
}

// --- E-services catalogue ---

/// ServiceEntry
///
/// One public e-service a citizen can apply for. `id` is the slug of its
/// apply form under `/dashboard/apply/`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ServiceEntry {
    pub id: String,
    pub title: String,
    pub dept: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub apply_path: String,
}

const CATALOGUE: [(&str, &str, &str, &str); 7] = [
    ("birth-certificate", "Birth Certificate Copy", "Registrar General", "Personal"),
    ("nic-application", "National Identity Card (NIC)", "Dept of Registration of Persons", "Personal"),
    ("police-clearance", "Police Clearance Report", "Sri Lanka Police", "Legal"),
    ("passport-renewal", "Passport Renewal", "Immigration & Emigration", "Travel"),
    ("visa-application", "Visa Application", "Immigration & Emigration", "Travel"),
    ("revenue-license", "Revenue License", "Motor Traffic", "Transport"),
    ("grama-certificate", "Grama Niladhari Character Cert", "District Secretariat", "Local"),
];

/// The fixed list of e-services, in display order.
pub fn service_catalogue() -> Vec<ServiceEntry> {
    CATALOGUE
        .iter()
        .map(|(id, title, dept, service_type)| ServiceEntry {
            id: id.to_string(),
            title: title.to_string(),
            dept: dept.to_string(),
            service_type: service_type.to_string(),
            apply_path: format!("/dashboard/apply/{}", id),
        })
        .collect()
}

// --- Super admin ---

/// Officer
///
/// Non-citizen account listed on the officer management screen.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct Officer {
    pub id: String,
    pub fullname: String,
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub division: String,
}

/// ServiceConfig
///
/// Fee and processing time of one public service.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct ServiceConfig {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dept: String,
    pub price: f64,
    pub days: u32,
    pub active: bool,
}

/// ServiceUpdate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct ServiceUpdate {
    pub price: f64,
    pub days: u32,
    pub active: bool,
}

impl ServiceUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ApiError::Validation("price must be a non-negative amount".to_string()));
        }
        Ok(())
    }
}

/// RevenueLine
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct RevenueLine {
    pub service: String,
    pub count: i64,
    pub revenue: f64,
}

/// RevenueReport
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct RevenueReport {
    pub total_revenue: f64,
    pub breakdown: Vec<RevenueLine>,
}

/// LogEntry
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub module: String,
    pub msg: String,
}

/// SystemStats
///
/// Output of GET /api/admin/stats, shown on the system monitor.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct SystemStats {
    pub citizens: i64,
    pub transactions: i64,
    pub revenue: f64,
    pub health: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logs: Vec<LogEntry>,
}

/// Division
///
/// A DS division and the secretary assigned to it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct Division {
    pub ds_nic: String,
    pub ds_name: String,
    pub province: String,
    pub district: String,
    pub division: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

/// AssignDsRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default)]
#[ts(export)]
pub struct AssignDsRequest {
    pub ds_nic: String,
    pub province: String,
    pub district: String,
    pub ds_division: String,
}

impl AssignDsRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require(&[
            ("ds_nic", self.ds_nic.as_str()),
            ("province", self.province.as_str()),
            ("district", self.district.as_str()),
            ("ds_division", self.ds_division.as_str()),
        ])
    }
}

// --- Assistant ---

/// ChatRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatRequest {
    pub message: String,
}

/// ChatReply
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[ts(export)]
pub struct ChatReply {
    pub response: String,
}
