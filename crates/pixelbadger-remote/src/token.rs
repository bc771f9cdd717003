//! Bearer token resolution for Graph requests.
//!
//! Delegated calls reuse the caller's token. App-only calls use the OAuth2
//! client-credentials grant; the token is kept until shortly before expiry.

use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use pixelbadger_core::config::SharePointConfig;
use pixelbadger_core::error::AppError;
use pixelbadger_core::result::AppResult;
use pixelbadger_core::types::CredentialContext;

use crate::http::{check_status, map_reqwest_error};

const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Tokens are refreshed this long before they actually expire.
const EXPIRY_SKEW: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Resolves the bearer token for each Graph call.
#[derive(Debug)]
pub struct TokenProvider {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    app_token: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
    /// Create a token provider for the configured app registration.
    pub fn new(http: reqwest::Client, config: &SharePointConfig) -> Self {
        let token_url = format!(
            "{}/{}/oauth2/v2.0/token",
            config.authority_host.trim_end_matches('/'),
            config.tenant_id
        );
        Self {
            http,
            token_url,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            app_token: RwLock::new(None),
        }
    }

    /// Token to send for a call made with `credentials`.
    pub async fn bearer_for(&self, credentials: &CredentialContext) -> AppResult<String> {
        match credentials.user_access_token() {
            Some(token) => Ok(token.to_string()),
            None => self.app_token().await,
        }
    }

    async fn app_token(&self) -> AppResult<String> {
        {
            let cached = self.app_token.read().await;
            if let Some(token) = cached.as_ref() {
                if Instant::now() < token.refresh_at {
                    return Ok(token.value.clone());
                }
            }
        }

        let mut slot = self.app_token.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(token) = slot.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.request_app_token().await?;
        let value = fresh.value.clone();
        *slot = Some(fresh);
        Ok(value)
    }

    async fn request_app_token(&self) -> AppResult<CachedToken> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(AppError::configuration(
                "Graph client credentials are not configured",
            ));
        }

        debug!(url = %self.token_url, "Requesting app-only Graph token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", GRAPH_SCOPE),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, "Token request"))?;
        let response = check_status(response, "Token request").await?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| map_reqwest_error(e, "Token response decode"))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(EXPIRY_SKEW);
        Ok(CachedToken {
            value: token.access_token,
            refresh_at: Instant::now() + lifetime,
        })
    }
}
