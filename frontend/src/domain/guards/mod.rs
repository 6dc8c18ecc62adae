//! Navigation guards.
//!
//! Each guard answers one question for one navigation attempt and resolves
//! to a [`NavigationDecision`](crate::domain::NavigationDecision). Guards that
//! deny may already have started a redirect through the navigator port.

mod access;
mod anonymous;
mod gate;
mod pending_changes;

pub use access::AccessGuard;
pub use anonymous::AnonymousGuard;
pub use gate::{Departing, GateOutcome, NavigationGate};
pub use pending_changes::{LEAVE_PROMPT_MESSAGE, PendingChangesGuard};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::{ApiError, Identity};

    pub(crate) fn alice() -> Identity {
        Identity {
            display_name: "Alice Smith".to_owned(),
            title: "Engineer".to_owned(),
            principals: vec!["role:employee".to_owned()],
            business_unit: "Technology".to_owned(),
        }
    }

    pub(crate) fn unauthorised() -> ApiError {
        ApiError::status_error("/user-data", 401, "Unauthorized", None)
    }
}
