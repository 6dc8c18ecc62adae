//! Session logic behind the login page.
//!
//! The view owns no rendering. It keeps the state a template would bind to
//! and drives the API client, the username cookie and the navigator.

use std::sync::Arc;

use tracing::{debug, info};

use super::navigation::{DEFAULT_REDIRECT_PATH, FROM_PARAM};
use super::ports::Navigator;
use super::{
    ApiClient, ApiError, CookieStore, Identity, LoginCredentials, MetadataPayload,
    NavigationTarget,
};

/// Cookie remembering the last username.
pub const USERNAME_COOKIE: &str = "username";
/// Banner shown after a logout round trip.
pub const LOGOUT_SUCCESS_MESSAGE: &str = "You have successfully logged out.";
/// Banner shown while the backend accepts logins without a password.
pub const PASSWORDLESS_WARNING: &str =
    "UNSAFE PASSWORDLESS ACCESS IS ENABLED ON WEB SERVER. THIS SHOULD NOT BE ON IN PRODUCTION!";

const LOGOUT_SUCCESS_PARAM: &str = "logoutSuccess";

/// Everything the login template binds to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    /// Username field.
    pub username: String,
    /// Remember-me checkbox.
    pub remember_me: bool,
    /// Status or failure banner.
    pub message: Option<String>,
    /// Deployment warning banner.
    pub warn_message: Option<String>,
    /// Deployment metadata, empty until loaded.
    pub metadata: MetadataPayload,
    /// Where a successful login goes.
    pub redirect_url: String,
    /// Set while a login request is outstanding.
    pub submitting: bool,
    /// Set when metadata could not be loaded.
    pub is_disconnected: bool,
}

/// Login page controller.
pub struct LoginView {
    client: ApiClient,
    cookies: CookieStore,
    navigator: Arc<dyn Navigator>,
    state: LoginState,
}

impl LoginView {
    /// Build the view for the login route reached at `route`.
    ///
    /// Restores a remembered username, picks up `logoutSuccess` and `from`,
    /// then loads metadata. A metadata failure marks the view disconnected
    /// instead of failing.
    pub async fn init(
        client: ApiClient,
        cookies: CookieStore,
        navigator: Arc<dyn Navigator>,
        route: &NavigationTarget,
    ) -> Self {
        let mut state = LoginState {
            redirect_url: DEFAULT_REDIRECT_PATH.to_owned(),
            ..LoginState::default()
        };

        let remembered = cookies.get(USERNAME_COOKIE);
        if !remembered.is_empty() {
            state.remember_me = true;
            state.username = remembered;
        }
        if route
            .query_value(LOGOUT_SUCCESS_PARAM)
            .is_some_and(|value| !value.is_empty())
        {
            state.message = Some(LOGOUT_SUCCESS_MESSAGE.to_owned());
        }
        if let Some(from) = route.query_value(FROM_PARAM).filter(|from| !from.is_empty()) {
            state.redirect_url = from.to_owned();
        }

        match client.get_metadata().await {
            Ok(metadata) => {
                if metadata.passwordless_access() {
                    state.warn_message = Some(PASSWORDLESS_WARNING.to_owned());
                }
                state.metadata = metadata;
            }
            Err(error) => {
                debug!(%error, "metadata unavailable, login view disconnected");
                state.is_disconnected = true;
            }
        }

        Self {
            client,
            cookies,
            navigator,
            state,
        }
    }

    /// Current state.
    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// Update the username field, refreshing the cookie while remembered.
    pub fn set_username(&mut self, username: &str) {
        self.state.username = username.to_owned();
        if self.state.remember_me {
            self.cookies.set(USERNAME_COOKIE, &self.state.username);
        }
    }

    /// Tick or untick remember-me.
    pub fn toggle_remember_me(&mut self, remember: bool) {
        self.state.remember_me = remember;
        if remember {
            self.cookies.set(USERNAME_COOKIE, &self.state.username);
        } else {
            self.cookies.delete(USERNAME_COOKIE);
        }
    }

    /// Log in with the submitted form.
    ///
    /// On success navigates to the redirect target and returns the identity.
    /// On failure sets a banner matching the failure and returns `None`. An
    /// empty password is only accepted while the backend runs passwordless.
    pub async fn submit(&mut self, username: &str, password: &str) -> Option<Identity> {
        self.state.username = username.to_owned();
        self.state.message = None;

        let credentials = if self.state.metadata.passwordless_access() {
            LoginCredentials::passwordless(username, password)
        } else {
            LoginCredentials::try_from_parts(username, password)
        };
        let credentials = match credentials {
            Ok(credentials) => credentials,
            Err(error) => {
                self.state.message = Some(format!("Unable to login: {error}."));
                return None;
            }
        };

        self.state.submitting = true;
        let outcome = self.client.login(&credentials).await;
        self.state.submitting = false;

        match outcome {
            Ok(identity) => {
                info!(user = %identity.display_name, "logged in");
                self.navigator.navigate(redirect_target(&self.state.redirect_url));
                if self.state.remember_me {
                    self.cookies.set(USERNAME_COOKIE, &self.state.username);
                }
                Some(identity)
            }
            Err(error) => {
                debug!(%error, "login rejected");
                self.state.message = Some(self.failure_message(&error));
                None
            }
        }
    }

    fn failure_message(&self, error: &ApiError) -> String {
        let support = self.state.metadata.support_contact();
        match error.status() {
            Some(401) => format!(
                "Incorrect username and/or password. Please email {support} if you have anymore issues"
            ),
            Some(404) => format!(
                "User with Windows username \"{}\" not found. If you think this should not be the \
                 case, please email {support} to synchronise User models with LDAP.",
                self.state.username
            ),
            Some(500) => {
                format!("Backend service unable to serve the request. Please email {support}.")
            }
            _ => format!("Unable to login. Please email {support} if you have any more issues."),
        }
    }
}

/// `from` values are recorded without a leading slash.
fn redirect_target(url: &str) -> NavigationTarget {
    if url.starts_with('/') {
        NavigationTarget::parse(url)
    } else {
        NavigationTarget::parse(&format!("/{url}"))
    }
}
