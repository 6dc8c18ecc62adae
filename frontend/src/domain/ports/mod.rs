//! Ports at the edge of the front-end core.
//!
//! Driven ports (`HttpTransport`, `CookieJar`, `Navigator`, `ConfirmDialog`)
//! are implemented by adapters in `crate::outbound` or by the host UI.
//! `IdentitySource` and `PendingChanges` are the capabilities guards consult.

mod macros;
pub(crate) use macros::define_port_error;

mod cookie_jar;
mod dialog;
mod identity_source;
mod navigator;
mod pending_changes;
mod transport;

pub use cookie_jar::CookieJar;
#[cfg(test)]
pub use cookie_jar::MockCookieJar;
pub use dialog::{ConfirmDialog, ConfirmPrompt, DialogOutcome};
#[cfg(test)]
pub use dialog::MockConfirmDialog;
pub use identity_source::IdentitySource;
#[cfg(test)]
pub use identity_source::MockIdentitySource;
pub use navigator::Navigator;
#[cfg(test)]
pub use navigator::MockNavigator;
pub use pending_changes::PendingChanges;
pub use transport::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, RequestBody, TransportError};
#[cfg(test)]
pub use transport::MockHttpTransport;
