//! Driven port for the host router.

use crate::domain::NavigationTarget;

/// Performs navigations requested by guards and the API client.
///
/// Navigation is fire-and-forget: callers never wait for the new view.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigate to `target`.
    fn navigate(&self, target: NavigationTarget);
}
