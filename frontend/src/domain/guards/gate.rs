//! Route resolution plus guard sequencing for one navigation attempt.

use std::sync::Arc;

use tracing::debug;

use super::{AccessGuard, AnonymousGuard, PendingChangesGuard};
use crate::domain::ports::{IdentitySource, Navigator, PendingChanges};
use crate::domain::routes::{self, RouteMatch, Section};

/// The view being left, when it may hold unsaved edits.
#[derive(Clone, Copy)]
pub struct Departing<'a> {
    /// Route currently displayed.
    pub route: &'a RouteMatch,
    /// View rendered for it.
    pub view: &'a dyn PendingChanges,
}

/// Result of [`NavigationGate::attempt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Render the matched route.
    Proceed(RouteMatch),
    /// A guard denied; any redirect is already under way.
    Blocked,
    /// No route matches the path.
    NotFound,
}

/// Runs the guards a route table entry calls for.
///
/// Leaving an editing view is checked first; the entry guard of the target
/// section runs only when leaving was allowed.
#[derive(Clone)]
pub struct NavigationGate {
    access: AccessGuard,
    anonymous: AnonymousGuard,
    pending: PendingChangesGuard,
}

impl NavigationGate {
    /// Gate whose entry guards share `identity` and `navigator`.
    pub fn new(identity: Arc<dyn IdentitySource>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            access: AccessGuard::new(Arc::clone(&identity), Arc::clone(&navigator)),
            anonymous: AnonymousGuard::new(identity, navigator),
            pending: PendingChangesGuard,
        }
    }

    /// Land signed-in users who open the login page on `path`.
    #[must_use]
    pub fn with_landing(mut self, path: impl Into<String>) -> Self {
        self.anonymous = self.anonymous.with_landing(path);
        self
    }

    /// Try to navigate to `path`, optionally away from `departing`.
    pub async fn attempt(&self, path: &str, departing: Option<Departing<'_>>) -> GateOutcome {
        let Some(target) = routes::resolve(path) else {
            debug!(path, "no route matches");
            return GateOutcome::NotFound;
        };

        if let Some(departing) = departing.filter(|departing| departing.route.confirm_on_leave()) {
            let decision = self.pending.can_deactivate(departing.view).await;
            if !decision.is_allowed() {
                debug!(from = departing.route.url(), to = target.url(), "stayed on editing view");
                return GateOutcome::Blocked;
            }
        }

        let decision = match target.section() {
            Section::Authenticated => self.access.can_activate(target.url()).await,
            Section::Anonymous => self.anonymous.can_activate().await,
        };
        if decision.is_allowed() {
            GateOutcome::Proceed(target)
        } else {
            GateOutcome::Blocked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::guards::test_support::{alice, unauthorised};
    use crate::domain::ports::{
        ConfirmDialog, DialogOutcome, MockConfirmDialog, MockIdentitySource, MockNavigator,
    };
    use crate::domain::routes::View;
    use async_trait::async_trait;
    use rstest::rstest;

    struct EditingView {
        dialog: MockConfirmDialog,
    }

    #[async_trait]
    impl PendingChanges for EditingView {
        async fn has_unsaved_changes(&self) -> bool {
            true
        }

        fn dialog(&self) -> &dyn ConfirmDialog {
            &self.dialog
        }
    }

    fn editing_view(answer: DialogOutcome) -> EditingView {
        let mut dialog = MockConfirmDialog::new();
        dialog.expect_open().times(1).return_const(answer);
        EditingView { dialog }
    }

    fn gate(identity: MockIdentitySource) -> NavigationGate {
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().return_const(());
        NavigationGate::new(Arc::new(identity), Arc::new(navigator))
    }

    fn signed_in(calls: usize) -> MockIdentitySource {
        let mut identity = MockIdentitySource::new();
        identity
            .expect_identity()
            .times(calls)
            .returning(|| Ok(alice()));
        identity
    }

    #[rstest]
    #[case("/feedback/alice", View::GiveFeedback)]
    #[case("", View::Nominees)]
    #[tokio::test]
    async fn signed_in_users_proceed(#[case] path: &str, #[case] view: View) {
        let outcome = gate(signed_in(1)).attempt(path, None).await;

        assert!(matches!(outcome, GateOutcome::Proceed(ref route) if route.view() == view));
    }

    #[tokio::test]
    async fn unknown_paths_skip_every_guard() {
        let outcome = gate(signed_in(0)).attempt("/nowhere", None).await;
        assert_eq!(outcome, GateOutcome::NotFound);
    }

    #[rstest]
    #[case("/", "/login?from=feedback")]
    #[case("/team-feedback/bob/history?tab=2", "/login?from=team-feedback%2Fbob%2Fhistory")]
    #[tokio::test]
    async fn anonymous_users_record_the_resolved_route(#[case] path: &str, #[case] expected: &str) {
        let mut identity = MockIdentitySource::new();
        identity
            .expect_identity()
            .times(1)
            .returning(|| Err(unauthorised()));
        let mut navigator = MockNavigator::new();
        let expected = expected.to_owned();
        navigator
            .expect_navigate()
            .withf(move |target| target.to_string() == expected)
            .times(1)
            .return_const(());
        let gate = NavigationGate::new(Arc::new(identity), Arc::new(navigator));

        assert_eq!(gate.attempt(path, None).await, GateOutcome::Blocked);
    }

    #[tokio::test]
    async fn login_page_runs_the_anonymous_guard() {
        let mut identity = MockIdentitySource::new();
        identity
            .expect_identity()
            .times(1)
            .returning(|| Err(unauthorised()));

        let outcome = gate(identity).attempt("/login", None).await;

        assert!(matches!(outcome, GateOutcome::Proceed(ref route) if route.view() == View::Login));
    }

    #[tokio::test]
    async fn staying_blocks_before_the_entry_guard_runs() {
        let leaving = routes::resolve("/feedback/alice").expect("route exists");
        let view = editing_view(DialogOutcome::Cancelled);
        let departing = Departing {
            route: &leaving,
            view: &view,
        };

        let outcome = gate(signed_in(0)).attempt("/feedback", Some(departing)).await;

        assert_eq!(outcome, GateOutcome::Blocked);
    }

    #[tokio::test]
    async fn leaving_then_checks_the_target() {
        let leaving = routes::resolve("/team-feedback/bob/summarise").expect("route exists");
        let view = editing_view(DialogOutcome::Confirmed);
        let departing = Departing {
            route: &leaving,
            view: &view,
        };

        let outcome = gate(signed_in(1))
            .attempt("/team-feedback", Some(departing))
            .await;

        assert!(matches!(outcome, GateOutcome::Proceed(ref route) if route.view() == View::TeamStats));
    }

    #[tokio::test]
    async fn routes_without_edits_never_prompt() {
        let leaving = routes::resolve("/team-feedback").expect("route exists");
        let mut dialog = MockConfirmDialog::new();
        dialog.expect_open().never();
        let view = EditingView { dialog };
        let departing = Departing {
            route: &leaving,
            view: &view,
        };

        let outcome = gate(signed_in(1)).attempt("/feedback", Some(departing)).await;

        assert!(matches!(outcome, GateOutcome::Proceed(_)));
    }
}
