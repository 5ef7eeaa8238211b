use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{act_then_reload, load_page};
use crate::{
    AppState,
    loader::Loader,
    models::{
        Application, ApplicationDetails, ApplicationStatus, NewApplication, ProfileUpdate,
        Recommendations, UserProfile,
    },
    session::SessionContext,
    views::{PageView, failure_status, first_error},
};

/// DashboardOverview
///
/// The citizen home: who is signed in, their applications and the products
/// suggested by their life events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardOverview {
    pub initials: String,
    pub profile: UserProfile,
    pub applications: Vec<Application>,
    pub recommendations: Recommendations,
}

/// ApplicationForm
///
/// What the apply form posts. The service comes from the URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApplicationForm {
    #[serde(default)]
    pub nic: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub reason: String,
}

impl ApplicationForm {
    fn into_application(self, service_type: String) -> NewApplication {
        let some = |value: String| Some(value).filter(|v| !v.trim().is_empty());
        NewApplication {
            service_type,
            applicant_nic: self.nic,
            details: ApplicationDetails {
                name: some(self.name),
                nic: None,
                phone: some(self.phone),
                address: some(self.address),
                reason: some(self.reason),
            },
            status: ApplicationStatus::Pending,
        }
    }
}

/// Display title of a service slug: `police-clearance` becomes
/// `Police Clearance`.
pub fn service_title(slug: &str) -> String {
    let words: Vec<String> = slug
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        "Service Application".to_string()
    } else {
        words.join(" ")
    }
}

const APPLICATIONS_PATH: &str = "/dashboard/applications";

/// overview
///
/// [Citizen] Profile, applications and recommendations are independent, so
/// they load concurrently; the first failure becomes the banner.
pub async fn overview(State(state): State<AppState>, session: SessionContext) -> Response {
    let mut profile = Loader::new(|| state.api.profile(&session.token));
    let mut applications = Loader::new(|| state.api.my_applications(&session.token));
    let mut recommendations = Loader::new(|| state.api.recommendations(&session.token));

    tokio::join!(profile.load(), applications.load(), recommendations.load());

    let (profile, profile_error) = profile.into_parts();
    let (applications, applications_error) = applications.into_parts();
    let (recommendations, recommendations_error) = recommendations.into_parts();

    let overview = DashboardOverview {
        initials: profile.initials(),
        profile,
        applications,
        recommendations,
    };

    PageView::new("/dashboard", "Overview", Some(&session), overview)
        .with_error(first_error([
            profile_error,
            applications_error,
            recommendations_error,
        ]))
        .render()
}

/// applications
///
/// [Citizen] Every application the citizen has filed.
pub async fn applications(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.my_applications(&session.token));
    load_page(APPLICATIONS_PATH, "My Applications", &session, loader).await
}

/// withdraw_application
///
/// [Citizen] Deletes one application and shows the refreshed list.
pub async fn withdraw_application(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
) -> Response {
    let outcome = state.api.delete_application(&session.token, &id).await;
    let loader = Loader::new(|| state.api.my_applications(&session.token));
    act_then_reload(
        APPLICATIONS_PATH,
        "My Applications",
        &session,
        outcome,
        "Application withdrawn.",
        loader,
    )
    .await
}

/// certificate
///
/// [Citizen] Sends the browser to the upstream certificate download. An id
/// that cannot name a single application is answered on the list page.
pub async fn certificate(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
) -> Response {
    match state.api.download_url(&id) {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(error) => {
            tracing::warn!(application = %id, error = %error, "certificate link refused");
            let empty: Vec<Application> = Vec::new();
            PageView::new(APPLICATIONS_PATH, "My Applications", Some(&session), empty)
                .with_error(Some(error.to_string()))
                .render_with(failure_status(&error))
        }
    }
}

/// wallet
///
/// [Citizen] Issued documents.
pub async fn wallet(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.wallet(&session.token));
    load_page("/dashboard/wallet", "Digital Wallet", &session, loader).await
}

/// profile
///
/// [Citizen] The signed-in citizen's profile.
pub async fn profile(State(state): State<AppState>, session: SessionContext) -> Response {
    let loader = Loader::new(|| state.api.profile(&session.token));
    load_page("/dashboard/profile", "Profile", &session, loader).await
}

/// update_profile
///
/// [Citizen] Saves contact details and shows the refreshed profile.
pub async fn update_profile(
    State(state): State<AppState>,
    session: SessionContext,
    Json(update): Json<ProfileUpdate>,
) -> Response {
    let outcome = state.api.update_profile(&session.token, &update).await;
    let loader = Loader::new(|| state.api.profile(&session.token));
    act_then_reload(
        "/dashboard/profile",
        "Profile",
        &session,
        outcome,
        "Profile updated.",
        loader,
    )
    .await
}

/// apply_form
///
/// [Citizen] The apply form for one service, prefilled from the profile.
pub async fn apply_form(
    State(state): State<AppState>,
    session: SessionContext,
    Path(service): Path<String>,
) -> Response {
    let title = service_title(&service);
    let mut profile = Loader::new(|| state.api.profile(&session.token));
    profile.load().await;
    let (profile, error) = profile.into_parts();

    let form = ApplicationForm {
        nic: profile.nic,
        name: profile.fullname,
        phone: profile.phone,
        address: profile.address,
        reason: String::new(),
    };

    let path = format!("/dashboard/apply/{}", service);
    PageView::new(&path, &title, Some(&session), form)
        .with_error(error)
        .render()
}

/// submit_application
///
/// [Citizen] Files the application and shows the refreshed application list.
pub async fn submit_application(
    State(state): State<AppState>,
    session: SessionContext,
    Path(service): Path<String>,
    Json(form): Json<ApplicationForm>,
) -> Response {
    let application = form.into_application(service_title(&service));
    let outcome = state
        .api
        .submit_application(&session.token, &application)
        .await;

    if outcome.is_ok() {
        tracing::info!(service = %application.service_type, "application submitted");
    }

    let loader = Loader::new(|| state.api.my_applications(&session.token));
    act_then_reload(
        APPLICATIONS_PATH,
        "My Applications",
        &session,
        outcome,
        "Application submitted.",
        loader,
    )
    .await
}

