//! HTTP plumbing shared by the backends

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use specwright_common::{Error, Result};
use tracing::debug;

/// Error envelope both backends use on failure: `{"error": {"message": ...}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Send a request and decode a successful JSON response.
///
/// Transport failures and non-success statuses become provider errors; the
/// upstream `error.message` is preferred over the status text.
pub async fn send_json<T: DeserializeOwned>(request: RequestBuilder, endpoint: &str) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::Provider(format!("Request to {} failed: {}", endpoint, e)))?;

    let status = response.status();
    debug!("{} responded with {}", endpoint, status);

    if !status.is_success() {
        return Err(Error::Provider(failure_message(response).await));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| Error::Provider(format!("Invalid response from {}: {}", endpoint, e)))
}

async fn failure_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error_message(status, &body)
}

/// Best available message for an unsuccessful response
pub fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let upstream = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|message| !message.trim().is_empty());

    match upstream {
        Some(message) => format!("{} ({})", message, status.as_u16()),
        None => status
            .canonical_reason()
            .map(|reason| format!("{} ({})", reason, status.as_u16()))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_message_prefers_upstream() {
        let message = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"type":"error","error":{"type":"invalid_request_error","message":"bad request"}}"#,
        );
        assert_eq!(message, "bad request (400)");
    }

    #[test]
    fn test_error_message_falls_back_to_status_text() {
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, "<html>down</html>"),
            "Service Unavailable (503)"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":{}}"#),
            "Internal Server Error (500)"
        );
    }
}
