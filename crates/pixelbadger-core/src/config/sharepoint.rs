//! Remote document store configuration.

use serde::{Deserialize, Serialize};

/// Which drive provider backs the SharePoint endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DriveProviderKind {
    /// Microsoft Graph REST API.
    #[default]
    Graph,
    /// In-process tree, optionally seeded from a JSON fixture.
    Memory,
}

/// SharePoint / Microsoft Graph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharePointConfig {
    /// Drive provider backend.
    #[serde(default)]
    pub provider: DriveProviderKind,
    /// Azure AD tenant ID.
    #[serde(default)]
    pub tenant_id: String,
    /// App registration client ID.
    #[serde(default)]
    pub client_id: String,
    /// App registration client secret.
    #[serde(default)]
    pub client_secret: String,
    /// Graph API base URL.
    #[serde(default = "default_graph_base_url")]
    pub graph_base_url: String,
    /// Identity provider host used for the client-credentials grant.
    #[serde(default = "default_authority_host")]
    pub authority_host: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Call Graph on behalf of the caller using their bearer token instead
    /// of the app-only token.
    #[serde(default)]
    pub forward_user_token: bool,
    /// JSON fixture for the memory provider.
    #[serde(default)]
    pub fixture_path: Option<String>,
}

impl Default for SharePointConfig {
    fn default() -> Self {
        Self {
            provider: DriveProviderKind::default(),
            tenant_id: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            graph_base_url: default_graph_base_url(),
            authority_host: default_authority_host(),
            timeout_seconds: default_timeout(),
            forward_user_token: false,
            fixture_path: None,
        }
    }
}

fn default_graph_base_url() -> String {
    "https://graph.microsoft.com/v1.0".to_string()
}

fn default_authority_host() -> String {
    "https://login.microsoftonline.com".to_string()
}

fn default_timeout() -> u64 {
    30
}
