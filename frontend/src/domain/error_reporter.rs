//! Global notice for failures published on the API client's error broadcast.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::ports::{ConfirmDialog, ConfirmPrompt, DialogOutcome};
use super::{ApiClient, ApiError};

/// Turns every broadcast failure into a support-contact notice.
pub struct ErrorReporter {
    client: ApiClient,
    dialog: Arc<dyn ConfirmDialog>,
}

impl ErrorReporter {
    /// Reporter reading metadata through `client` and showing notices through
    /// `dialog`.
    pub fn new(client: ApiClient, dialog: Arc<dyn ConfirmDialog>) -> Self {
        Self { client, dialog }
    }

    /// Subscribe now and report on a background task.
    ///
    /// The reporter keeps its client alive, so the task runs until aborted
    /// through the returned handle.
    pub fn spawn(self) -> JoinHandle<()> {
        let receiver = self.client.subscribe_errors();
        tokio::spawn(async move { self.run(receiver).await })
    }

    /// Report every failure received until the channel closes.
    pub async fn run(&self, mut receiver: broadcast::Receiver<ApiError>) {
        loop {
            match receiver.recv().await {
                Ok(error) => {
                    self.report(&error).await;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "error notices fell behind; skipped failures");
                }
                Err(RecvError::Closed) => {
                    debug!("error broadcast closed");
                    break;
                }
            }
        }
    }

    /// Show the notice for `error`.
    ///
    /// Returns `None` without opening a dialog when metadata cannot be
    /// loaded.
    pub async fn report(&self, error: &ApiError) -> Option<DialogOutcome> {
        let metadata = match self.client.get_metadata().await {
            Ok(metadata) => metadata,
            Err(metadata_error) => {
                warn!(%error, %metadata_error, "metadata unavailable, error notice skipped");
                return None;
            }
        };
        let prompt = notice_prompt(metadata.support_contact(), error);
        Some(self.dialog.open(prompt).await)
    }
}

fn notice_prompt(contact: &str, error: &ApiError) -> ConfirmPrompt {
    ConfirmPrompt {
        confirm_text: "OK".to_owned(),
        cancel_text: None,
        message: format!(
            "Sorry, an error has occured and the requested action has failed. If you think \
             this should have worked, please email {contact} with the following information"
        ),
        detail: Some(error.detail()),
    }
}
