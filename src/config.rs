use std::env;
use std::time::Duration;

/// Path every unauthenticated navigation is sent to.
pub const LOGIN_PATH: &str = "/login";

/// Generic authenticated landing area used when a session lacks the role
/// required by the requested area.
pub const DEFAULT_AREA_PATH: &str = "/dashboard";

/// AppConfig
///
/// Holds the portal's entire configuration state. It is loaded once at startup,
/// never mutated afterwards, and pulled into handlers via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Base URL of the upstream REST API (without the trailing `/api`).
    pub api_url: String,
    // Socket address the portal HTTP server binds to.
    pub bind_addr: String,
    // Upper bound for a single upstream call.
    pub request_timeout: Duration,
    // Runtime environment marker. Controls log format and cookie flags.
    pub env: Env,
    // Where the guard sends visitors without a credential.
    pub login_path: String,
    // Where the guard sends visitors whose role does not fit the area.
    pub default_area: String,
}

/// Env
///
/// Runtime context. Local runs talk to a developer backend over plain HTTP;
/// production demands explicit upstream configuration and secure cookies.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking configuration used for test state scaffolding.
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            request_timeout: Duration::from_secs(30),
            env: Env::Local,
            login_path: LOGIN_PATH.to_string(),
            default_area: DEFAULT_AREA_PATH.to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables and implements the
    /// **fail-fast** principle for production.
    ///
    /// # Panics
    /// Panics in production when `API_URL` is missing, so the portal never
    /// starts pointed at a developer backend.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let api_url = match env {
            Env::Production => {
                env::var("API_URL").expect("FATAL: API_URL must be set in production.")
            }
            Env::Local => env::var("API_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
        };

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            request_timeout,
            env,
            login_path: LOGIN_PATH.to_string(),
            default_area: DEFAULT_AREA_PATH.to_string(),
        }
    }

    /// Session cookies carry the `Secure` attribute outside local development.
    pub fn secure_cookies(&self) -> bool {
        self.env == Env::Production
    }
}
