//! Shared HTTP error mapping for the remote clients.

use reqwest::{Response, StatusCode};
use serde::Deserialize;

use pixelbadger_core::error::{AppError, ErrorKind};
use pixelbadger_core::result::AppResult;

/// Error envelope used by both Graph and OpenAI: `{"error": {"code", "message"}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Maps an HTTP status to the error kind callers branch on.
pub fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::UNAUTHORIZED => ErrorKind::Authentication,
        StatusCode::FORBIDDEN => ErrorKind::Authorization,
        StatusCode::TOO_MANY_REQUESTS => ErrorKind::RateLimit,
        s if s.is_server_error() => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::ExternalService,
    }
}

/// Maps a transport-level failure (connect, timeout, decode).
pub fn map_reqwest_error(err: reqwest::Error, what: &str) -> AppError {
    let kind = if err.is_timeout() || err.is_connect() || err.is_request() {
        ErrorKind::ServiceUnavailable
    } else if err.is_decode() {
        ErrorKind::Serialization
    } else if let Some(status) = err.status() {
        kind_for_status(status)
    } else {
        ErrorKind::ExternalService
    };
    AppError::with_source(kind, format!("{what} failed: {err}"), err)
}

/// Passes successful responses through; turns anything else into an `AppError`
/// carrying the remote's own error code and message when it sent one.
pub async fn check_status(response: Response, what: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => {
            let code = envelope
                .error
                .code
                .as_ref()
                .and_then(|c| c.as_str().map(str::to_string))
                .unwrap_or_default();
            let message = envelope.error.message.unwrap_or_default();
            match (code.is_empty(), message.is_empty()) {
                (true, true) => String::new(),
                (true, false) => message,
                (false, true) => code,
                (false, false) => format!("{code}: {message}"),
            }
        }
        Err(_) => body.chars().take(200).collect(),
    };

    let message = if detail.is_empty() {
        format!("{what} returned HTTP {}", status.as_u16())
    } else {
        format!("{what} returned HTTP {}: {detail}", status.as_u16())
    };

    Err(AppError::new(kind_for_status(status), message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(kind_for_status(StatusCode::NOT_FOUND), ErrorKind::NotFound);
        assert_eq!(
            kind_for_status(StatusCode::UNAUTHORIZED),
            ErrorKind::Authentication
        );
        assert_eq!(
            kind_for_status(StatusCode::FORBIDDEN),
            ErrorKind::Authorization
        );
        assert_eq!(
            kind_for_status(StatusCode::TOO_MANY_REQUESTS),
            ErrorKind::RateLimit
        );
        assert_eq!(
            kind_for_status(StatusCode::BAD_GATEWAY),
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(
            kind_for_status(StatusCode::BAD_REQUEST),
            ErrorKind::ExternalService
        );
    }

    #[test]
    fn test_error_envelope_accepts_numeric_code() {
        let envelope: ErrorEnvelope =
            serde_json::from_str(r#"{"error":{"message":"bad key","type":"auth","code":401}}"#)
                .expect("parse");
        assert_eq!(envelope.error.message.as_deref(), Some("bad key"));
        assert!(envelope.error.code.and_then(|c| c.as_str().map(String::from)).is_none());
    }
}
