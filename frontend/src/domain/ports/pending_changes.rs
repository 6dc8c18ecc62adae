//! Capability a view implements to take part in the pending-changes guard.

use async_trait::async_trait;

use super::ConfirmDialog;

/// A view that may hold unsaved edits.
///
/// The guard knows nothing about the view beyond this contract, so every
/// editing page can opt in by implementing it.
#[async_trait]
pub trait PendingChanges: Send + Sync {
    /// Whether leaving now would discard edits.
    async fn has_unsaved_changes(&self) -> bool;

    /// Dialog used to ask before discarding them.
    fn dialog(&self) -> &dyn ConfirmDialog;
}
