//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod logging;
pub mod openai;
pub mod sharepoint;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::logging::LoggingConfig;
pub use self::openai::OpenAiConfig;
pub use self::sharepoint::{DriveProviderKind, SharePointConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote document store settings.
    #[serde(default)]
    pub sharepoint: SharePointConfig,
    /// Completion provider settings.
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `PIXELBADGER__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PIXELBADGER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Rejects configurations the server cannot start with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.openai.api_key.trim().is_empty() {
            return Err(AppError::configuration(
                "openai.api_key configuration is required but was not found",
            ));
        }

        if self.sharepoint.provider == DriveProviderKind::Graph {
            let missing: Vec<&str> = [
                ("sharepoint.tenant_id", &self.sharepoint.tenant_id),
                ("sharepoint.client_id", &self.sharepoint.client_id),
                ("sharepoint.client_secret", &self.sharepoint.client_secret),
            ]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect();

            if !missing.is_empty() {
                return Err(AppError::configuration(format!(
                    "Missing Graph credentials: {}",
                    missing.join(", ")
                )));
            }
        }

        Ok(())
    }
}
