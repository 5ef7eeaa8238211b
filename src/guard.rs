use std::collections::BTreeMap;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    config::{DEFAULT_AREA_PATH, LOGIN_PATH},
    session::{CookieStorage, Role, RoleClaim, SessionContext, SessionCredential, SessionStorage},
};

/// RouteRoleBinding
///
/// Static mapping from path prefixes to the role required to view them.
/// `None` means any authenticated session. Each prefix holds exactly one
/// requirement; binding a prefix twice replaces the earlier requirement.
#[derive(Debug, Clone, Default)]
pub struct RouteRoleBinding {
    prefixes: BTreeMap<String, Option<Role>>,
}

impl RouteRoleBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// The portal's areas: the GS, DS and super-admin consoles are role-bound,
    /// the rest of `/admin` and the citizen dashboard only need a session.
    pub fn portal() -> Self {
        Self::new()
            .bind("/admin", None)
            .bind("/admin/gs", Some(Role::Gs))
            .bind("/admin/ds", Some(Role::Ds))
            .bind("/admin/super", Some(Role::Admin))
            .bind("/dashboard", None)
    }

    pub fn bind(mut self, prefix: &str, required: Option<Role>) -> Self {
        self.prefixes.insert(normalize_path(prefix), required);
        self
    }

    /// resolve
    ///
    /// Longest-prefix match on whole path segments. Returns the bound
    /// requirement, or `None` (any authenticated session) when nothing matches.
    pub fn resolve(&self, path: &str) -> Option<Role> {
        let path = normalize_path(path);

        self.prefixes
            .iter()
            .filter(|(prefix, _)| segment_prefix(prefix, &path))
            .max_by_key(|(prefix, _)| prefix.len())
            .and_then(|(_, required)| *required)
    }
}

fn segment_prefix(prefix: &str, path: &str) -> bool {
    prefix == "/"
        || path == prefix
        || (path.starts_with(prefix) && path.as_bytes().get(prefix.len()) == Some(&b'/'))
}

/// Collapses empty and `.` segments and resolves `..`, so `/admin/gs/../ds`
/// is judged as `/admin/ds`.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/"))
}

/// GuardDecision
///
/// Outcome of one guard evaluation. There is no other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToDefaultArea,
}

/// SessionGuard
///
/// Decides, for every navigation into a protected area, whether the visitor
/// may proceed. The decision is a pure function of the path and the
/// credential; nothing is remembered between evaluations.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    binding: RouteRoleBinding,
    login_path: String,
    default_area: String,
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new(RouteRoleBinding::portal(), LOGIN_PATH, DEFAULT_AREA_PATH)
    }
}

impl SessionGuard {
    pub fn new(binding: RouteRoleBinding, login_path: &str, default_area: &str) -> Self {
        Self {
            binding,
            login_path: login_path.to_string(),
            default_area: default_area.to_string(),
        }
    }

    pub fn binding(&self) -> &RouteRoleBinding {
        &self.binding
    }

    /// evaluate
    ///
    /// 1. resolve the required role for `path`;
    /// 2. no credential → login;
    /// 3. required role not held → default area;
    /// 4. otherwise allow.
    ///
    /// An unrecognized role claim never allows: it is a mismatch on role-bound
    /// paths and reads as "no usable claim" elsewhere, which also keeps the
    /// default area from redirecting to itself.
    pub fn evaluate(&self, path: &str, credential: Option<&SessionCredential>) -> GuardDecision {
        let required = self.binding.resolve(path);

        let Some(credential) = credential else {
            return GuardDecision::RedirectToLogin;
        };

        match (required, &credential.role) {
            (Some(required), RoleClaim::Known(held)) if *held == required => GuardDecision::Allow,
            (Some(_), _) => GuardDecision::RedirectToDefaultArea,
            (None, RoleClaim::Known(_)) => GuardDecision::Allow,
            (None, RoleClaim::Unrecognized(_)) => GuardDecision::RedirectToLogin,
        }
    }

    /// Reads the credential from `storage` and evaluates it.
    pub fn check<S: SessionStorage + ?Sized>(&self, path: &str, storage: &S) -> GuardDecision {
        let credential = SessionCredential::read(storage);
        self.evaluate(path, credential.as_ref())
    }

    /// Where a redirecting decision sends the visitor.
    pub fn redirect_target(&self, decision: GuardDecision) -> Option<&str> {
        match decision {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some(&self.login_path),
            GuardDecision::RedirectToDefaultArea => Some(&self.default_area),
        }
    }
}

/// session_guard
///
/// Router middleware wrapping every protected area. The handler only runs on
/// `Allow`, and then receives the resolved `SessionContext` through the
/// request extensions. Any other decision answers with a 303 redirect.
pub async fn session_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let storage = CookieStorage::from_headers(request.headers());
    let credential = SessionCredential::read(&storage);
    let path = request.uri().path().to_string();

    let decision = state.guard.evaluate(&path, credential.as_ref());
    tracing::debug!(path = %path, decision = ?decision, "session guard evaluated");

    if decision == GuardDecision::Allow {
        if let Some(context) = credential.as_ref().and_then(SessionContext::from_credential) {
            request.extensions_mut().insert(context);
            return next.run(request).await;
        }
    }

    let target = state
        .guard
        .redirect_target(decision)
        .unwrap_or(&state.config.login_path);
    Redirect::to(target).into_response()
}
