//! Feedback tool front-end core.
//!
//! The crate holds the session-gated API client, the navigation guards that
//! consult it, and the adapters that connect both to a real backend.

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::ClientSettings;
pub use domain::{ApiClient, ApiError, NavigationDecision, NavigationTarget};
