//! Errors surfaced by the API client.
//!
//! `ApiError` is `Clone` because a single failure travels to several places:
//! the global error broadcast, the calling view, and every waiter on a shared
//! metadata request.

use serde_json::Value;
use thiserror::Error;

use super::ports::{ApiResponse, TransportError};

/// Reason phrase used when a request never produced a status.
const UNKNOWN_REASON: &str = "Unknown Error";

/// Failure of one backend call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("{path} responded with {status} {reason}")]
    Status {
        /// Request path relative to the API root.
        path: String,
        /// HTTP status code.
        status: u16,
        /// Reason phrase for the status.
        reason: String,
        /// Structured error body, when the backend sent JSON.
        body: Option<Value>,
    },
    /// No response arrived.
    #[error("{path} could not be reached: {message}")]
    Transport {
        /// Request path relative to the API root.
        path: String,
        /// Transport description of the failure.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("{path} timed out: {message}")]
    Timeout {
        /// Request path relative to the API root.
        path: String,
        /// Transport description of the failure.
        message: String,
    },
    /// A 2xx body did not match the expected payload.
    #[error("{path} returned an unreadable payload: {message}")]
    Decode {
        /// Request path relative to the API root.
        path: String,
        /// Decoder description of the mismatch.
        message: String,
    },
    /// A population CSV upload failed.
    #[error("Upload failed with the following error: {status} {reason}")]
    Upload {
        /// HTTP status, `0` when no response arrived.
        status: u16,
        /// Reason phrase for the status.
        reason: String,
    },
}

impl ApiError {
    /// Build a status error; a JSON `null` body counts as no body.
    pub fn status_error(
        path: impl Into<String>,
        status: u16,
        reason: impl Into<String>,
        body: Option<Value>,
    ) -> Self {
        Self::Status {
            path: path.into(),
            status,
            reason: reason.into(),
            body: body.filter(|value| !value.is_null()),
        }
    }

    /// HTTP status of the failure, if a response arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Upload { status, .. } if *status != 0 => Some(*status),
            _ => None,
        }
    }

    /// Structured error body sent by the backend.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// The backend's `message` field, when the body carries one.
    pub fn server_message(&self) -> Option<&str> {
        self.body()
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
    }

    /// Text shown under a generic failure notice: the server message when
    /// present, otherwise this error's description.
    pub fn detail(&self) -> String {
        self.server_message()
            .map_or_else(|| self.to_string(), str::to_owned)
    }

    /// Re-express any failure as an upload failure.
    pub(crate) fn into_upload(self) -> Self {
        match self {
            Self::Status { status, reason, .. } => Self::Upload { status, reason },
            upload @ Self::Upload { .. } => upload,
            _ => Self::Upload {
                status: 0,
                reason: UNKNOWN_REASON.to_owned(),
            },
        }
    }

    pub(crate) fn from_transport(path: &str, error: TransportError) -> Self {
        match error {
            TransportError::Timeout { message } => Self::Timeout {
                path: path.to_owned(),
                message,
            },
            other => Self::Transport {
                path: path.to_owned(),
                message: other.to_string(),
            },
        }
    }

    pub(crate) fn from_response(path: &str, response: &ApiResponse) -> Self {
        let body = serde_json::from_slice::<Value>(&response.body).ok();
        Self::status_error(path, response.status, response.reason.as_str(), body)
    }

    pub(crate) fn decode(path: &str, error: &serde_json::Error) -> Self {
        Self::Decode {
            path: path.to_owned(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn server_message_drives_detail() {
        let err = ApiError::status_error(
            "/nominees",
            500,
            "Internal Server Error",
            Some(json!({ "message": "database unavailable" })),
        );
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.server_message(), Some("database unavailable"));
        assert_eq!(err.detail(), "database unavailable");
    }

    #[test]
    fn detail_falls_back_to_description() {
        let err = ApiError::status_error("/nominees", 502, "Bad Gateway", Some(Value::Null));
        assert!(err.body().is_none());
        assert_eq!(err.detail(), "/nominees responded with 502 Bad Gateway");
    }

    #[rstest]
    #[case(
        ApiError::status_error("/upload-new-population-csv", 413, "Payload Too Large", None),
        "Upload failed with the following error: 413 Payload Too Large"
    )]
    #[case(
        ApiError::Transport { path: "/upload-new-population-csv".to_owned(), message: "reset".to_owned() },
        "Upload failed with the following error: 0 Unknown Error"
    )]
    fn upload_failures_are_rephrased(#[case] err: ApiError, #[case] expected: &str) {
        assert_eq!(err.into_upload().to_string(), expected);
    }

    #[test]
    fn timeouts_keep_their_kind() {
        let err = ApiError::from_transport("/metadata", TransportError::timeout("30s elapsed"));
        assert!(matches!(err, ApiError::Timeout { .. }));
        assert_eq!(err.status(), None);
    }
}
