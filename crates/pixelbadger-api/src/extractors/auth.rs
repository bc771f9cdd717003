//! `BearerCredentials` extractor: requires a bearer token and turns it into
//! the credential context used for remote calls.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use pixelbadger_core::error::AppError;
use pixelbadger_core::types::CredentialContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Credentials for the current request.
#[derive(Debug, Clone)]
pub struct BearerCredentials(pub CredentialContext);

impl std::ops::Deref for BearerCredentials {
    type Target = CredentialContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

    let (scheme, token) = header
        .split_once(' ')
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AppError::authentication(
            "Invalid Authorization header format",
        ));
    }

    Ok(token)
}

/// Delegated credentials when the caller's token is forwarded, app-only otherwise.
fn credentials_for(token: &str, forward_user_token: bool) -> CredentialContext {
    if forward_user_token {
        CredentialContext::user(token)
    } else {
        CredentialContext::app()
    }
}

impl FromRequestParts<AppState> for BearerCredentials {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        Ok(Self(credentials_for(
            token,
            state.config.sharepoint.forward_user_token,
        )))
    }
}
