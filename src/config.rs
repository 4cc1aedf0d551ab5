/*
 * Responsibility
 * - Load and validate process configuration (listen address, allow-list,
 *   title policy, Basic-Auth credentials)
 * - Fail startup on missing or unparseable values
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Which job-title rule set the tenant runs with.
///
/// The two policies disagree on codes, messages and even the decision kind
/// (block page vs correctable field error), so the choice must be explicit
/// configuration rather than something inferred at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitlePolicy {
    /// `jobTitle` must be present and at least the minimum length; failures
    /// are terminal block pages.
    Mandatory,
    /// `jobTitle` may be absent; when present and too short, the user gets a
    /// resubmittable field error instead of a block page.
    Optional,
}

impl TitlePolicy {
    pub fn default_min_length(self) -> usize {
        match self {
            Self::Mandatory => 4,
            Self::Optional => 5,
        }
    }
}

impl FromStr for TitlePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mandatory" => Ok(Self::Mandatory),
            "optional" => Ok(Self::Optional),
            _ => Err(()),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    /// Email domains accepted for external sign-up, as configured (display
    /// order is preserved in user-facing messages).
    pub allowed_domains: Vec<String>,
    pub title_policy: TitlePolicy,
    /// Minimum `jobTitle` length in characters.
    pub title_min_length: usize,

    /// Unset (or empty) disables the Basic-Auth gate entirely.
    pub basic_auth_username: Option<String>,
    pub basic_auth_password: String,

    /// Schema version tag echoed in every decision response.
    pub decision_version: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let allowed_domains = std::env::var("SIGNUP_ALLOWED_DOMAINS")
            .map_err(|_| ConfigError::Missing("SIGNUP_ALLOWED_DOMAINS"))?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        // An empty allow-list would reject every sign-up; treat it as a
        // deployment mistake rather than policy.
        if allowed_domains.is_empty() {
            return Err(ConfigError::Invalid("SIGNUP_ALLOWED_DOMAINS"));
        }

        let title_policy: TitlePolicy = std::env::var("SIGNUP_TITLE_POLICY")
            .map_err(|_| ConfigError::Missing("SIGNUP_TITLE_POLICY"))?
            .parse()
            .map_err(|_| ConfigError::Invalid("SIGNUP_TITLE_POLICY"))?;

        let title_min_length = match std::env::var("SIGNUP_TITLE_MIN_LENGTH") {
            Ok(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("SIGNUP_TITLE_MIN_LENGTH"))?,
            Err(_) => title_policy.default_min_length(),
        };

        // Fail-open: no username means the gate is off. Deployments that
        // want authentication enforced must always set BASIC_AUTH_USERNAME.
        let basic_auth_username = std::env::var("BASIC_AUTH_USERNAME")
            .ok()
            .filter(|s| !s.is_empty());
        let basic_auth_password = std::env::var("BASIC_AUTH_PASSWORD").unwrap_or_default();

        let decision_version =
            std::env::var("DECISION_VERSION").unwrap_or_else(|_| "1.0.0".to_string());

        Ok(Self {
            addr,
            app_env,
            allowed_domains,
            title_policy,
            title_min_length,
            basic_auth_username,
            basic_auth_password,
            decision_version,
        })
    }
}
