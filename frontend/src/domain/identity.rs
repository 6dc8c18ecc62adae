//! The authenticated user as the backend reports it.

use serde::{Deserialize, Serialize};

/// Current user resolved from `/user-data` or returned by `/login`.
///
/// Never cached by guards: every navigation check asks the backend again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Name shown in the navigation bar.
    pub display_name: String,
    /// Job title, e.g. "Software Developer".
    #[serde(default)]
    pub title: String,
    /// Group memberships that drive which sections are visible.
    #[serde(default)]
    pub principals: Vec<String>,
    /// Business unit the user belongs to.
    #[serde(default)]
    pub business_unit: String,
}

impl Identity {
    /// Whether the user holds the given principal.
    pub fn has_principal(&self, principal: &str) -> bool {
        self.principals.iter().any(|held| held == principal)
    }
}

/// `{ "data": ... }` wrapper used by `/user-data` and `/login`.
///
/// `/login` also sends a `success` flag; the status code already carries it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub(crate) data: T,
}
