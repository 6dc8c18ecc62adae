//! Domain primitives, ports and services.
//!
//! Purpose: describe what the front-end needs from the backend and from its
//! host (navigation, dialogs, cookies) without naming any transport or UI
//! toolkit. Adapters in `crate::outbound` plug concrete implementations into
//! the ports declared here.
//!
//! Public surface:
//! - ApiClient: the single network access point.
//! - AccessGuard, AnonymousGuard, PendingChangesGuard: navigation gates.
//! - NavigationGate: route resolution plus guard sequencing.
//! - CookieStore: named cookie access over a jar port.
//! - ErrorReporter: global notice for broadcast failures.
//! - LoginView: login page session logic.

pub mod api_client;
pub mod auth;
pub mod cookie_store;
pub mod error;
pub mod error_reporter;
pub mod guards;
pub mod identity;
pub mod login_flow;
pub mod metadata;
pub mod navigation;
pub mod nominee_filter;
pub mod payloads;
pub mod ports;
pub mod routes;

pub use self::api_client::ApiClient;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::cookie_store::{CookieStore, DEFAULT_MAX_AGE_SECONDS};
pub use self::error::ApiError;
pub use self::error_reporter::ErrorReporter;
pub use self::guards::{
    AccessGuard, AnonymousGuard, Departing, GateOutcome, NavigationGate, PendingChangesGuard,
};
pub use self::identity::Identity;
pub use self::login_flow::{LoginState, LoginView};
pub use self::metadata::{Metadata, MetadataPayload};
pub use self::navigation::{NavigationDecision, NavigationTarget};
pub use self::nominee_filter::filter_nominees;
pub use self::routes::{RouteMatch, Section, View};
