//! Entry guard for the login page.

use std::sync::Arc;

use tracing::debug;

use crate::domain::navigation::DEFAULT_LANDING_PATH;
use crate::domain::ports::{IdentitySource, Navigator};
use crate::domain::{NavigationDecision, NavigationTarget};

/// Keeps signed-in users away from the login page.
///
/// For any identity outcome it decides the opposite of
/// [`AccessGuard`](super::AccessGuard).
#[derive(Clone)]
pub struct AnonymousGuard {
    identity: Arc<dyn IdentitySource>,
    navigator: Arc<dyn Navigator>,
    landing: String,
}

impl AnonymousGuard {
    /// Guard that lands signed-in users on `/self-nominate`.
    pub fn new(identity: Arc<dyn IdentitySource>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            identity,
            navigator,
            landing: DEFAULT_LANDING_PATH.to_owned(),
        }
    }

    /// Land signed-in users on `path` instead.
    #[must_use]
    pub fn with_landing(mut self, path: impl Into<String>) -> Self {
        self.landing = path.into();
        self
    }

    /// Route signed-in users are sent to.
    pub fn landing(&self) -> &str {
        self.landing.as_str()
    }

    /// Check one attempt to open the login page.
    pub async fn can_activate(&self) -> NavigationDecision {
        match self.identity.identity().await {
            Ok(identity) => {
                debug!(user = %identity.display_name, landing = %self.landing, "already signed in");
                self.navigator
                    .navigate(NavigationTarget::new(self.landing.as_str()));
                NavigationDecision::Deny
            }
            Err(error) => {
                debug!(%error, "no session, showing login");
                NavigationDecision::Allow
            }
        }
    }
}
