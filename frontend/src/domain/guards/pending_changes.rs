//! Exit guard for views holding unsaved edits.

use tracing::debug;

use crate::domain::NavigationDecision;
use crate::domain::ports::{ConfirmPrompt, PendingChanges};

/// Text of the leave confirmation.
pub const LEAVE_PROMPT_MESSAGE: &str = "You have unsaved changes. Are you sure you want to leave?";

/// Asks before discarding unsaved edits.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingChangesGuard;

impl PendingChangesGuard {
    /// Check one attempt to leave `view`.
    ///
    /// Clean views are left without a dialog. Otherwise only an explicit
    /// "Leave" allows; "Stay" and dismissing the dialog deny.
    pub async fn can_deactivate(&self, view: &dyn PendingChanges) -> NavigationDecision {
        if !view.has_unsaved_changes().await {
            return NavigationDecision::Allow;
        }
        let outcome = view.dialog().open(leave_prompt()).await;
        debug!(?outcome, "unsaved changes prompt closed");
        NavigationDecision::from(outcome.is_confirmed())
    }
}

fn leave_prompt() -> ConfirmPrompt {
    ConfirmPrompt {
        confirm_text: "Leave".to_owned(),
        cancel_text: Some("Stay".to_owned()),
        message: LEAVE_PROMPT_MESSAGE.to_owned(),
        detail: None,
    }
}
