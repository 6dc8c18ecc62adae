//! Single point of contact with the feedback backend.
//!
//! The client owns the cross-cutting policies every view relies on:
//!
//! - deployment metadata is fetched once and cached, with concurrent callers
//!   sharing the same in-flight request;
//! - feature calls publish their failures on an error broadcast before
//!   returning them, so a global notice and the calling view both see them;
//! - identity is never cached, so guards always ask the backend.
//!
//! One client is built at start-up and cloned into every guard and view that
//! needs it; clones share all state.

mod features;
mod metadata_cache;

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use futures_util::FutureExt;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use self::metadata_cache::{MetadataCache, MetadataFetch};
use super::identity::DataEnvelope;
use super::navigation::LOGIN_PATH;
use super::ports::{ApiRequest, ApiResponse, HttpTransport, IdentitySource, Navigator, RequestBody};
use super::{ApiError, Identity, LoginCredentials, MetadataPayload, NavigationTarget};

/// Buffered errors per subscriber before the oldest are dropped.
pub const DEFAULT_ERROR_CHANNEL_CAPACITY: usize = 16;

const USER_DATA_PATH: &str = "/user-data";
const LOGIN_ENDPOINT: &str = "/login";
const METADATA_PATH: &str = "/metadata";
const LOGOUT_PATH: &str = "/logout";

/// Status the backend uses when no metadata is configured.
const METADATA_UNAVAILABLE_STATUS: u16 = 400;

/// Shared, cloneable handle to the backend.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn HttpTransport>,
    navigator: Arc<dyn Navigator>,
    errors: broadcast::Sender<ApiError>,
    metadata: MetadataCache,
    logged_in: Mutex<Option<Identity>>,
}

impl ApiClient {
    /// Build a client with the default error channel capacity.
    pub fn new(transport: Arc<dyn HttpTransport>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_error_capacity(transport, navigator, DEFAULT_ERROR_CHANNEL_CAPACITY)
    }

    /// Build a client whose error channel buffers `capacity` errors per
    /// subscriber.
    pub fn with_error_capacity(
        transport: Arc<dyn HttpTransport>,
        navigator: Arc<dyn Navigator>,
        capacity: usize,
    ) -> Self {
        let (errors, _) = broadcast::channel(capacity.max(1));
        Self {
            inner: Arc::new(ClientInner {
                transport,
                navigator,
                errors,
                metadata: MetadataCache::default(),
                logged_in: Mutex::new(None),
            }),
        }
    }

    /// Subscribe to failures of feature calls.
    ///
    /// Only failures published after subscribing are delivered.
    pub fn subscribe_errors(&self) -> broadcast::Receiver<ApiError> {
        self.inner.errors.subscribe()
    }

    /// Resolve the identity behind the current session cookie.
    ///
    /// # Errors
    ///
    /// Any non-2xx status or transport failure; nothing is broadcast.
    pub async fn get_identity(&self) -> Result<Identity, ApiError> {
        let envelope: DataEnvelope<Identity> =
            self.request_json(ApiRequest::get(USER_DATA_PATH)).await?;
        Ok(envelope.data)
    }

    /// Post credentials as a form and remember the returned identity.
    ///
    /// # Errors
    ///
    /// The HTTP failure untouched, so the login view can branch on its
    /// status; nothing is broadcast.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Identity, ApiError> {
        let body = RequestBody::form([
            ("username", credentials.username()),
            ("password", credentials.password()),
        ]);
        let envelope: DataEnvelope<Identity> = self
            .request_json(ApiRequest::post(LOGIN_ENDPOINT, body))
            .await?;
        *self
            .inner
            .logged_in
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(envelope.data.clone());
        Ok(envelope.data)
    }

    /// Identity returned by the last successful [`ApiClient::login`].
    pub fn logged_in_identity(&self) -> Option<Identity> {
        self.inner
            .logged_in
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Deployment metadata, fetched at most once per client.
    ///
    /// A `400` answer resolves to the empty payload and is not cached.
    ///
    /// # Errors
    ///
    /// Other non-2xx statuses and transport failures, shared by every caller
    /// waiting on the same request. Nothing is broadcast.
    pub async fn get_metadata(&self) -> Result<MetadataPayload, ApiError> {
        let transport = Arc::clone(&self.inner.transport);
        self.inner
            .metadata
            .get_or_fetch(move || fetch_metadata(transport).boxed())
            .await
    }

    /// Post `/logout` in the background, then navigate to the login page
    /// with `logoutSuccess` telling how it went. Failures are only logged.
    pub fn logout(&self) -> JoinHandle<()> {
        let transport = Arc::clone(&self.inner.transport);
        let navigator = Arc::clone(&self.inner.navigator);
        tokio::spawn(async move {
            let request = ApiRequest::post(LOGOUT_PATH, RequestBody::Empty);
            let success = match send_checked(transport.as_ref(), request).await {
                Ok(_) => true,
                Err(error) => {
                    warn!(%error, "logout request failed");
                    false
                }
            };
            navigator.navigate(
                NavigationTarget::new(LOGIN_PATH).with_query("logoutSuccess", success.to_string()),
            );
        })
    }

    /// Publish `error` to every current subscriber.
    fn publish(&self, error: &ApiError) {
        match self.inner.errors.send(error.clone()) {
            Ok(receivers) => debug!(%error, receivers, "broadcast API failure"),
            Err(_) => debug!(%error, "API failure raised with no error subscribers"),
        }
    }

    /// Broadcast a failed outcome, then hand it back unchanged.
    fn broadcasting<T>(&self, outcome: Result<T, ApiError>) -> Result<T, ApiError> {
        outcome.inspect_err(|error| self.publish(error))
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        send_checked(self.inner.transport.as_ref(), request).await
    }

    async fn request_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let path = request.path.clone();
        let response = self.send(request).await?;
        decode_json(&path, &response)
    }

    async fn request_text(&self, request: ApiRequest) -> Result<String, ApiError> {
        let response = self.send(request).await?;
        Ok(String::from_utf8_lossy(&response.body).into_owned())
    }
}

#[async_trait]
impl IdentitySource for ApiClient {
    async fn identity(&self) -> Result<Identity, ApiError> {
        self.get_identity().await
    }
}

async fn send_checked(
    transport: &dyn HttpTransport,
    request: ApiRequest,
) -> Result<ApiResponse, ApiError> {
    let path = request.path.clone();
    debug!(method = %request.method, %path, "sending API request");
    let response = transport
        .send(request)
        .await
        .map_err(|error| ApiError::from_transport(&path, error))?;
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_response(&path, &response))
    }
}

async fn fetch_metadata(transport: Arc<dyn HttpTransport>) -> Result<MetadataFetch, ApiError> {
    let response = transport
        .send(ApiRequest::get(METADATA_PATH))
        .await
        .map_err(|error| ApiError::from_transport(METADATA_PATH, error))?;
    if response.status == METADATA_UNAVAILABLE_STATUS {
        debug!("backend has no metadata configured");
        return Ok(MetadataFetch::Unavailable);
    }
    if !response.is_success() {
        return Err(ApiError::from_response(METADATA_PATH, &response));
    }
    decode_json(METADATA_PATH, &response).map(MetadataFetch::Loaded)
}

fn decode_json<T: DeserializeOwned>(path: &str, response: &ApiResponse) -> Result<T, ApiError> {
    serde_json::from_slice(&response.body).map_err(|error| ApiError::decode(path, &error))
}
