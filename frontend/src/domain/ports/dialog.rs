//! Driven port for modal confirmation dialogs.

use async_trait::async_trait;

/// Content of a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    /// Label of the affirmative button.
    pub confirm_text: String,
    /// Label of the negative button; `None` renders a single button.
    pub cancel_text: Option<String>,
    /// Main dialog text.
    pub message: String,
    /// Secondary text rendered beneath the message.
    pub detail: Option<String>,
}

/// How the user closed a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Affirmative button.
    Confirmed,
    /// Negative button.
    Cancelled,
    /// Closed without choosing, e.g. escape or backdrop click.
    Dismissed,
}

impl DialogOutcome {
    /// Only an explicit confirmation counts.
    pub fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// Opens a modal dialog and resolves once the user closes it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfirmDialog: Send + Sync {
    /// Show `prompt` and wait for the user.
    async fn open(&self, prompt: ConfirmPrompt) -> DialogOutcome;
}
