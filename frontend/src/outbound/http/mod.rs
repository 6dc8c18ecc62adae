//! Reqwest-backed transport for the feedback API.
//!
//! This adapter owns transport details only: URL construction under the API
//! root, body encoding, the shared cookie store and timeout mapping. Status
//! codes are reported as-is; the API client decides what they mean.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::{Client, Method, Url};

use super::ReqwestCookieJar;
use crate::domain::ports::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, RequestBody, TransportError,
};

/// Transport sending every request under one API root with shared cookies.
pub struct ReqwestTransport {
    client: Client,
    api_root: Url,
    jar: Arc<Jar>,
}

impl ReqwestTransport {
    /// Build a transport with a fresh cookie store.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(api_root: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_jar(api_root, timeout, Arc::new(Jar::default()))
    }

    /// Build a transport over an existing cookie store.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_jar(api_root: Url, timeout: Duration, jar: Arc<Jar>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .cookie_provider(Arc::clone(&jar))
            .build()?;
        Ok(Self {
            client,
            api_root,
            jar,
        })
    }

    /// Cookie jar port over this transport's cookie store.
    pub fn cookie_jar(&self) -> ReqwestCookieJar {
        ReqwestCookieJar::new(Arc::clone(&self.jar), self.api_root.clone())
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        endpoint(&self.api_root, path)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.endpoint(&request.path)?;
        let builder = self
            .client
            .request(method(request.method), url)
            .header(reqwest::header::ACCEPT, "application/json");
        let builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(pairs) => builder.form(pairs),
        };

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(ApiResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_owned(),
            body: body.to_vec(),
        })
    }
}

/// `path` appended to the root's path, keeping any query string.
fn endpoint(api_root: &Url, path: &str) -> Result<Url, TransportError> {
    let root = api_root.as_str().trim_end_matches('/');
    Url::parse(&format!("{root}{path}"))
        .map_err(|error| TransportError::invalid_url(format!("{path}: {error}")))
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else {
        TransportError::connection(error.to_string())
    }
}

#[cfg(test)]
mod tests;
