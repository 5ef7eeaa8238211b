use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, HeaderValue, header, request::Parts},
    response::Redirect,
};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::AppConfig;

/// Bytes escaped in cookie values, on top of controls and non-ASCII.
const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'\\');

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the role claim.
pub const ROLE_KEY: &str = "userRole";
/// Storage key holding the display name.
pub const NAME_KEY: &str = "userName";

/// Role
///
/// The closed set of roles the portal knows about. Serialized lowercase,
/// matching the tags the upstream API issues at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Citizen,
    Gs,
    Ds,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Gs => "gs",
            Role::Ds => "ds",
            Role::Admin => "admin",
        }
    }

    /// Landing page for a freshly signed-in session of this role.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Citizen => "/dashboard",
            Role::Gs => "/admin/gs",
            Role::Ds => "/admin/ds",
            Role::Admin => "/admin/super",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role tag is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "citizen" => Ok(Role::Citizen),
            "gs" => Ok(Role::Gs),
            "ds" => Ok(Role::Ds),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// RoleClaim
///
/// The role tag exactly as found in storage. Tags outside the closed set are
/// kept verbatim so the guard can refuse them instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleClaim {
    Known(Role),
    Unrecognized(String),
}

impl RoleClaim {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<Role>() {
            Ok(role) => RoleClaim::Known(role),
            Err(UnknownRole(tag)) => RoleClaim::Unrecognized(tag),
        }
    }

    pub fn known(&self) -> Option<Role> {
        match self {
            RoleClaim::Known(role) => Some(*role),
            RoleClaim::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RoleClaim::Known(role) => role.as_str(),
            RoleClaim::Unrecognized(tag) => tag,
        }
    }
}

/// SessionStorage
///
/// The visitor's persistent key/value store. The guard only ever reads it;
/// login and logout are the sole writers.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// SessionCredential
///
/// Token, role claim and display name as persisted on the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredential {
    pub token: String,
    pub role: RoleClaim,
    pub name: String,
}

impl SessionCredential {
    pub fn new(token: impl Into<String>, role: RoleClaim, name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            role,
            name: name.into(),
        }
    }

    /// read
    ///
    /// The single read path for the persisted credential. A credential exists
    /// only when both the token and the role claim are present and non-empty;
    /// anything less reads as "no credential".
    pub fn read<S: SessionStorage + ?Sized>(storage: &S) -> Option<Self> {
        let token = storage.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        let role = storage.get(ROLE_KEY).filter(|r| !r.is_empty())?;
        let name = storage.get(NAME_KEY).unwrap_or_default();

        Some(Self {
            token,
            role: RoleClaim::parse(&role),
            name,
        })
    }

    /// Persists the credential under the three session keys.
    pub fn write<S: SessionStorage + ?Sized>(&self, storage: &mut S) {
        storage.set(TOKEN_KEY, self.token.clone());
        storage.set(ROLE_KEY, self.role.as_str().to_string());
        storage.set(NAME_KEY, self.name.clone());
    }

    /// Removes every session key, signing the visitor out.
    pub fn clear<S: SessionStorage + ?Sized>(storage: &mut S) {
        storage.remove(TOKEN_KEY);
        storage.remove(ROLE_KEY);
        storage.remove(NAME_KEY);
    }
}

/// MemoryStorage
///
/// In-process storage, handy for tests and for tooling that keeps a session
/// outside a browser.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// CookieStorage
///
/// The browser's cookie jar seen from the server. Reads come from the
/// request's `Cookie` headers; writes are queued as `Set-Cookie` directives
/// that the caller attaches to its response.
#[derive(Debug, Clone, Default)]
pub struct CookieStorage {
    values: HashMap<String, String>,
    directives: Vec<String>,
    secure: bool,
}

impl CookieStorage {
    /// Parses every `Cookie` header of a request. Malformed pairs are skipped,
    /// so an unreadable jar behaves like an empty one.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut values = HashMap::new();

        for header_value in headers.get_all(header::COOKIE) {
            let Ok(raw) = header_value.to_str() else {
                continue;
            };
            for pair in raw.split(';') {
                if let Some((name, value)) = pair.trim().split_once('=') {
                    let name = name.trim();
                    if !name.is_empty() {
                        values.insert(name.to_string(), decode_value(value.trim()));
                    }
                }
            }
        }

        Self {
            values,
            directives: Vec::new(),
            secure: false,
        }
    }

    /// Empty jar, used when a response only needs to write cookies.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// `Set-Cookie` header values queued by `set` / `remove`, in call order.
    pub fn set_cookie_headers(&self) -> Vec<HeaderValue> {
        self.directives
            .iter()
            .filter_map(|d| HeaderValue::from_str(d).ok())
            .collect()
    }

    fn attributes(&self) -> &'static str {
        if self.secure {
            "Path=/; HttpOnly; SameSite=Lax; Secure"
        } else {
            "Path=/; HttpOnly; SameSite=Lax"
        }
    }
}

impl SessionStorage for CookieStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        let encoded = encode_value(&value);
        self.directives
            .push(format!("{}={}; {}", key, encoded, self.attributes()));
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.directives
            .push(format!("{}=; Max-Age=0; {}", key, self.attributes()));
        self.values.remove(key);
    }
}

/// Percent-encodes a cookie value. Spaces become `%20`, never `+`.
fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, COOKIE_VALUE).to_string()
}

/// Percent-decodes the whole cookie value. `+`, `&` and `=` are kept as
/// written; invalid UTF-8 is replaced rather than dropped.
fn decode_value(raw: &str) -> String {
    percent_decode_str(raw.trim_matches('"'))
        .decode_utf8_lossy()
        .into_owned()
}

/// SessionContext
///
/// The resolved session of a request that passed the guard. Handlers receive
/// it as an extractor instead of reading storage themselves, and pass the
/// token explicitly to the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub token: String,
    pub role: Role,
    pub name: String,
}

impl SessionContext {
    /// Builds a context from a credential whose role claim is recognized.
    pub fn from_credential(credential: &SessionCredential) -> Option<Self> {
        let role = credential.role.known()?;
        Some(Self {
            token: credential.token.clone(),
            role,
            name: credential.name.clone(),
        })
    }
}

/// SessionContext Extractor
///
/// The guard middleware inserts the context into the request extensions on
/// `Allow`. A handler mounted outside the guard has no context and the
/// request is redirected to the configured login page.
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .ok_or_else(|| Redirect::to(&AppConfig::from_ref(state).login_path))
    }
}
