//! Driven port for the HTTP transport.
//!
//! Requests name a path relative to the API root (`/api/v1`); the adapter
//! owns the origin, the cookie jar that makes every call credentialed, and
//! timeouts. Status handling stays in the client so adapters only report
//! what came back.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

/// HTTP verbs used against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
}

impl HttpMethod {
    /// Upper-case verb.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body encodings the backend accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// `application/json`.
    Json(Value),
    /// `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Form body from borrowed pairs.
    pub fn form<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::Form(
            pairs
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value.to_owned()))
                .collect(),
        )
    }
}

/// One request relative to the API root.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Path and optional query, starting with `/`.
    pub path: String,
    /// Request body.
    pub body: RequestBody,
}

impl ApiRequest {
    /// `GET path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    /// `POST path` with `body`.
    pub fn post(path: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body,
        }
    }

    /// `PUT path` with `body`.
    pub fn put(path: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method: HttpMethod::Put,
            path: path.into(),
            body,
        }
    }
}

/// Raw response reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase, empty when unknown.
    pub reason: String,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Response with an empty reason phrase.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: String::new(),
            body: body.into(),
        }
    }

    /// Response whose body is the JSON encoding of `value`.
    pub fn json(status: u16, value: &Value) -> Self {
        Self::new(status, value.to_string())
    }

    /// Attach a reason phrase.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

define_port_error! {
    /// Failures raised before any response arrived.
    pub enum TransportError {
        /// The request exceeded its timeout.
        Timeout { message: String } => "request timed out: {message}",
        /// Connection, TLS or protocol failure.
        Connection { message: String } => "request failed: {message}",
        /// The request path could not form a valid URL.
        InvalidUrl { message: String } => "invalid request url: {message}",
    }
}

/// Carries API requests to the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one credentialed request and report whatever came back.
    ///
    /// Non-2xx statuses are successful transport outcomes; only failures
    /// that produced no response are errors.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(199, false)]
    #[case(200, true)]
    #[case(204, true)]
    #[case(299, true)]
    #[case(301, false)]
    #[case(400, false)]
    fn success_covers_2xx_only(#[case] status: u16, #[case] expected: bool) {
        assert_eq!(ApiResponse::new(status, Vec::new()).is_success(), expected);
    }

    #[test]
    fn form_body_owns_its_pairs() {
        let body = RequestBody::form([("username", "alice"), ("password", "pw")]);
        assert_eq!(
            body,
            RequestBody::Form(vec![
                ("username".to_owned(), "alice".to_owned()),
                ("password".to_owned(), "pw".to_owned()),
            ])
        );
    }
}
