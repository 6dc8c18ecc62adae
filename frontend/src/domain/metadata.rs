//! Deployment-wide configuration served by `/metadata`.

use serde::{Deserialize, Serialize};

/// Named in user-facing text when metadata carries no support address.
pub const FALLBACK_SUPPORT_CONTACT: &str = "the support team";

/// Company branding, login copy and support contact for this deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    /// Business unit the deployment serves.
    pub business_unit: String,
    /// Company name used in page headings.
    pub company_name: String,
    /// Hint shown beside the password field.
    pub login_password_message: String,
    /// Hint shown beside the username field.
    pub login_username_message: String,
    /// Set when the backend accepts logins without a password.
    pub passwordless_access: bool,
    /// Address users are told to contact when something fails.
    pub support_email: String,
}

/// Body of `/metadata`.
///
/// `metadata` is `None` for the empty payload produced when the backend
/// answers `400`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataPayload {
    /// Deployment configuration, absent in the empty payload.
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl MetadataPayload {
    /// Wrap loaded metadata.
    pub fn loaded(metadata: Metadata) -> Self {
        Self {
            metadata: Some(metadata),
        }
    }

    /// Whether this is the empty payload.
    pub fn is_empty(&self) -> bool {
        self.metadata.is_none()
    }

    /// Support address, when metadata is present and names one.
    pub fn support_email(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .map(|metadata| metadata.support_email.as_str())
            .filter(|email| !email.is_empty())
    }

    /// Support address, or a generic contact when none is configured.
    pub fn support_contact(&self) -> &str {
        self.support_email().unwrap_or(FALLBACK_SUPPORT_CONTACT)
    }

    /// Whether the backend accepts logins without a password.
    pub fn passwordless_access(&self) -> bool {
        self.metadata
            .as_ref()
            .is_some_and(|metadata| metadata.passwordless_access)
    }
}
