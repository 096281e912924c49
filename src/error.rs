//! Search failure taxonomy and its HTTP mapping.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::time::Duration;

use crate::api::ApiError;

/// Every way a search request can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    /// Username or pattern missing, empty, or the body is not a search request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Pattern does not compile as a regular expression.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("User does not exist")]
    UserNotFound,

    #[error("The user does not have any public gists")]
    NoPublicGists,

    /// Any other non-success answer from the remote API, or the search
    /// deadline expiring.
    #[error("Upstream error: {message}")]
    UpstreamError {
        status: Option<u16>,
        message: String,
        timed_out: bool,
    },
}

impl FailureReason {
    /// Upstream failure carrying the remote status, if there was one.
    pub fn upstream(err: &ApiError) -> Self {
        Self::UpstreamError {
            status: err.status(),
            message: err.to_string(),
            timed_out: false,
        }
    }

    /// Upstream failure for a search that outlived its deadline.
    pub fn deadline_exceeded(deadline: Duration) -> Self {
        Self::UpstreamError {
            status: None,
            message: format!("search did not finish within {:?}", deadline),
            timed_out: true,
        }
    }

    /// Machine-readable status string used in error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::InvalidPattern(_) => "invalid_pattern",
            Self::UserNotFound => "user_not_found",
            Self::NoPublicGists => "no_public_gists",
            Self::UpstreamError { timed_out: true, .. } => "upstream_timeout",
            Self::UpstreamError { .. } => "upstream_error",
        }
    }

    /// HTTP status the failure is answered with.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidPattern(_) => StatusCode::BAD_REQUEST,
            Self::UserNotFound | Self::NoPublicGists => StatusCode::NOT_FOUND,
            Self::UpstreamError { timed_out: true, .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::UpstreamError { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

/// A failed search, carrying the request echo for the error payload.
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct SearchFailure {
    pub reason: FailureReason,
    pub username: Option<String>,
    pub pattern: Option<String>,
}

impl SearchFailure {
    /// Failure for a request with the given username and pattern echo.
    pub fn new(reason: FailureReason, username: Option<String>, pattern: Option<String>) -> Self {
        Self {
            reason,
            username,
            pattern,
        }
    }
}

impl From<FailureReason> for SearchFailure {
    fn from(reason: FailureReason) -> Self {
        Self::new(reason, None, None)
    }
}

#[derive(Serialize)]
struct ErrorPayload<'a> {
    status: &'static str,
    message: String,
    matches: [&'a str; 0],
    username: Option<&'a str>,
    pattern: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream_status: Option<u16>,
}

impl ResponseError for SearchFailure {
    fn status_code(&self) -> StatusCode {
        self.reason.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        let upstream_status = match &self.reason {
            FailureReason::UpstreamError { status, .. } => *status,
            _ => None,
        };

        HttpResponse::build(self.status_code()).json(ErrorPayload {
            status: self.reason.code(),
            message: self.reason.to_string(),
            matches: [],
            username: self.username.as_deref(),
            pattern: self.pattern.as_deref(),
            upstream_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            FailureReason::InvalidRequest("missing username".into()).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FailureReason::InvalidPattern("unclosed group".into()).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(FailureReason::UserNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(FailureReason::NoPublicGists.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            FailureReason::deadline_exceeded(Duration::from_secs(5)).http_status(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_upstream_carries_raw_status() {
        let err = ApiError::Status {
            status: 503,
            url: "https://api.github.com/users/octocat/gists".into(),
        };
        let reason = FailureReason::upstream(&err);

        assert_eq!(reason.code(), "upstream_error");
        assert_eq!(reason.http_status(), StatusCode::BAD_GATEWAY);
        match reason {
            FailureReason::UpstreamError { status, timed_out, .. } => {
                assert_eq!(status, Some(503));
                assert!(!timed_out);
            }
            other => panic!("unexpected reason: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_error_payload() {
        let failure = SearchFailure::new(
            FailureReason::UpstreamError {
                status: Some(500),
                message: "boom".into(),
                timed_out: false,
            },
            Some("octocat".into()),
            Some("fn".into()),
        );

        let response = failure.error_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "upstream_error");
        assert_eq!(json["message"], "Upstream error: boom");
        assert_eq!(json["matches"], serde_json::json!([]));
        assert_eq!(json["username"], "octocat");
        assert_eq!(json["pattern"], "fn");
        assert_eq!(json["upstream_status"], 500);
    }

    #[actix_web::test]
    async fn test_error_payload_without_echo() {
        let failure: SearchFailure = FailureReason::NoPublicGists.into();

        let body = to_bytes(failure.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "no_public_gists");
        assert!(json["username"].is_null());
        assert!(json.get("upstream_status").is_none());
    }
}
