//! Navigator that records targets instead of rendering them.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::domain::NavigationTarget;
use crate::domain::ports::Navigator;

/// Keeps every requested navigation in order.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    visited: Mutex<Vec<NavigationTarget>>,
}

impl HistoryNavigator {
    /// Every target navigated to, oldest first.
    pub fn history(&self) -> Vec<NavigationTarget> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent target.
    pub fn last(&self) -> Option<NavigationTarget> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, target: NavigationTarget) {
        debug!(%target, "navigating");
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target);
    }
}
