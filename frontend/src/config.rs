//! Client configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::api_client::DEFAULT_ERROR_CHANNEL_CAPACITY;
use crate::domain::navigation::DEFAULT_LANDING_PATH;

const DEFAULT_BACKEND_URL: &str = "http://localhost:6543";
const DEFAULT_API_ROOT: &str = "/api/v1";

/// Where the backend lives and how the client talks to it.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FEEDBACK_CLIENT")]
pub struct ClientSettings {
    /// Backend origin, e.g. `https://feedback.example.com`.
    pub backend_url: Option<String>,
    /// API path under the origin.
    pub api_root: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 30)]
    pub request_timeout_secs: u64,
    /// Errors buffered per error-broadcast subscriber.
    pub error_channel_capacity: Option<usize>,
    /// Route signed-in users land on when they open the login page.
    pub landing_route: Option<String>,
}

impl ClientSettings {
    /// Configured backend origin, falling back to the local development server.
    pub fn backend_url(&self) -> &str {
        self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
    }

    /// Configured API path, falling back to `/api/v1`.
    pub fn api_root(&self) -> &str {
        self.api_root.as_deref().unwrap_or(DEFAULT_API_ROOT)
    }

    /// Absolute URL every API path is appended to.
    ///
    /// # Errors
    ///
    /// Returns an error when the origin or API path does not form a URL.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.backend_url())?.join(self.api_root())
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Error-broadcast buffer per subscriber.
    pub fn error_channel_capacity(&self) -> usize {
        self.error_channel_capacity
            .unwrap_or(DEFAULT_ERROR_CHANNEL_CAPACITY)
    }

    /// Landing route for the anonymous guard.
    pub fn landing_route(&self) -> &str {
        self.landing_route.as_deref().unwrap_or(DEFAULT_LANDING_PATH)
    }
}
