//! Entry guard for the authenticated section.

use std::sync::Arc;

use tracing::debug;

use crate::domain::navigation::{FROM_PARAM, LOGIN_PATH};
use crate::domain::ports::{IdentitySource, Navigator};
use crate::domain::routes::route_url;
use crate::domain::{NavigationDecision, NavigationTarget};

/// Lets signed-in users through and sends everyone else to the login page.
#[derive(Clone)]
pub struct AccessGuard {
    identity: Arc<dyn IdentitySource>,
    navigator: Arc<dyn Navigator>,
}

impl AccessGuard {
    /// Guard backed by `identity`, redirecting through `navigator`.
    pub fn new(identity: Arc<dyn IdentitySource>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            identity,
            navigator,
        }
    }

    /// Check one attempt to enter `path`.
    ///
    /// Asks for the identity exactly once. On failure navigates to
    /// `/login?from=<path>` and denies.
    pub async fn can_activate(&self, path: &str) -> NavigationDecision {
        match self.identity.identity().await {
            Ok(identity) => {
                debug!(user = %identity.display_name, path, "session valid, entering route");
                NavigationDecision::Allow
            }
            Err(error) => {
                let from = route_url(path);
                debug!(%error, %from, "no session, redirecting to login");
                self.navigator
                    .navigate(NavigationTarget::new(LOGIN_PATH).with_query(FROM_PARAM, from));
                NavigationDecision::Deny
            }
        }
    }
}
