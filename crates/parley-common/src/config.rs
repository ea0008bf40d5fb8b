//! Client configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for production.
//! Config precedence: overrides > env vars > .env file > parley.toml > defaults

use serde::Deserialize;
use std::sync::OnceLock;
use validator::Validate;

static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";

/// Errors while assembling the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Get the global client configuration.
///
/// # Panics
/// Panics if config has not been initialized via [`init`].
pub fn get() -> &'static ClientConfig {
    CONFIG.get().expect("Config not initialized. Call parley_common::config::init() first.")
}

/// Initialize the global configuration from the environment.
///
/// Should be called once at startup, before anything reads [`get`].
pub fn init(overrides: Overrides) -> Result<&'static ClientConfig, ConfigError> {
    let cfg = load_with(overrides)?;
    Ok(CONFIG.get_or_init(|| cfg))
}

/// Values that take precedence over every other source, e.g. command-line flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

/// Build a fresh configuration without touching the global.
pub fn load() -> Result<ClientConfig, ConfigError> {
    load_with(Overrides::default())
}

pub fn load_with(overrides: Overrides) -> Result<ClientConfig, ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    let cfg = config::Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("api.token", "")?
        .set_default("api.user_agent", concat!("parley/", env!("CARGO_PKG_VERSION")))?
        .set_default("api.timeout_secs", 30)?
        // Optional config file
        .add_source(config::File::with_name("parley").required(false))
        // Environment variables (PARLEY__API__TOKEN, PARLEY__API__BASE_URL, etc.)
        .add_source(
            config::Environment::with_prefix("PARLEY")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("api.base_url", overrides.base_url)?
        .set_override_option("api.token", overrides.token)?
        .build()?;

    let client_config: ClientConfig = cfg.try_deserialize()?;
    client_config.validate()?;
    Ok(client_config)
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ClientConfig {
    #[validate(nested)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ApiConfig {
    /// REST root, e.g. `https://chat.example.com/api/v1`
    #[validate(url)]
    pub base_url: String,

    /// Bot token; the `Bot ` prefix is added when missing
    #[validate(length(min = 1, message = "api.token must be set"))]
    pub token: String,

    pub user_agent: String,

    /// Per-request timeout applied by the HTTP client
    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            user_agent: concat!("parley/", env!("CARGO_PKG_VERSION")).to_owned(),
            timeout_secs: 30,
        }
    }
}
