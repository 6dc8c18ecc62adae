//! Behaviour tests for guard sequencing through the navigation gate.
//!
//! These scenarios drive `NavigationGate` with scripted identity and dialog
//! doubles and assert on the recorded navigations.

use std::cell::RefCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use frontend::domain::ports::{
    ConfirmDialog, ConfirmPrompt, DialogOutcome, IdentitySource, PendingChanges,
};
use frontend::domain::routes::{self, RouteMatch};
use frontend::domain::{ApiError, Departing, GateOutcome, Identity, NavigationGate};
use frontend::outbound::HistoryNavigator;
use futures::executor::block_on;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

struct StubIdentity {
    signed_in: bool,
}

#[async_trait]
impl IdentitySource for StubIdentity {
    async fn identity(&self) -> Result<Identity, ApiError> {
        if self.signed_in {
            Ok(Identity {
                display_name: "Bob Jones".to_owned(),
                title: "Manager".to_owned(),
                principals: vec!["role:manager".to_owned()],
                business_unit: "Technology".to_owned(),
            })
        } else {
            Err(ApiError::status_error("/user-data", 401, "Unauthorized", None))
        }
    }
}

struct ScriptedDialog {
    answer: DialogOutcome,
    opened: AtomicUsize,
}

#[async_trait]
impl ConfirmDialog for ScriptedDialog {
    async fn open(&self, _prompt: ConfirmPrompt) -> DialogOutcome {
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

struct EditingView {
    unsaved: bool,
    dialog: ScriptedDialog,
}

#[async_trait]
impl PendingChanges for EditingView {
    async fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    fn dialog(&self) -> &dyn ConfirmDialog {
        &self.dialog
    }
}

struct GuardWorld {
    signed_in: RefCell<bool>,
    editing: RefCell<Option<(RouteMatch, bool)>>,
    answer: RefCell<DialogOutcome>,
    view: RefCell<Option<EditingView>>,
    navigator: Arc<HistoryNavigator>,
    outcome: RefCell<Option<GateOutcome>>,
}

impl GuardWorld {
    fn new() -> Self {
        Self {
            signed_in: RefCell::new(false),
            editing: RefCell::new(None),
            answer: RefCell::new(DialogOutcome::Dismissed),
            view: RefCell::new(None),
            navigator: Arc::new(HistoryNavigator::default()),
            outcome: RefCell::new(None),
        }
    }

    fn navigate(&self, path: &str) {
        let gate = NavigationGate::new(
            Arc::new(StubIdentity {
                signed_in: *self.signed_in.borrow(),
            }),
            self.navigator.clone(),
        );
        let editing = self.editing.borrow().clone();
        let outcome = match editing {
            Some((route, unsaved)) => {
                let view = EditingView {
                    unsaved,
                    dialog: ScriptedDialog {
                        answer: *self.answer.borrow(),
                        opened: AtomicUsize::new(0),
                    },
                };
                let outcome = block_on(gate.attempt(
                    path,
                    Some(Departing {
                        route: &route,
                        view: &view,
                    }),
                ));
                *self.view.borrow_mut() = Some(view);
                outcome
            }
            None => block_on(gate.attempt(path, None)),
        };
        *self.outcome.borrow_mut() = Some(outcome);
    }

    fn prompts_shown(&self) -> usize {
        self.view
            .borrow()
            .as_ref()
            .map_or(0, |view| view.dialog.opened.load(Ordering::SeqCst))
    }
}

#[fixture]
fn world() -> GuardWorld {
    GuardWorld::new()
}

#[given("a signed-in user")]
fn a_signed_in_user(world: &GuardWorld) {
    *world.signed_in.borrow_mut() = true;
}

#[given("an anonymous user")]
fn an_anonymous_user(world: &GuardWorld) {
    *world.signed_in.borrow_mut() = false;
}

#[given("the user is editing feedback for {name} with unsaved changes")]
fn editing_with_unsaved_changes(world: &GuardWorld, name: String) {
    let route = routes::resolve(&format!("/feedback/{name}")).expect("feedback form route");
    *world.editing.borrow_mut() = Some((route, true));
}

#[given("the user is editing saved feedback for {name}")]
fn editing_without_unsaved_changes(world: &GuardWorld, name: String) {
    let route = routes::resolve(&format!("/feedback/{name}")).expect("feedback form route");
    *world.editing.borrow_mut() = Some((route, false));
}

#[given("the user will answer {answer} to the leave prompt")]
fn the_user_will_answer(world: &GuardWorld, answer: String) {
    let outcome = match answer.as_str() {
        "Leave" => DialogOutcome::Confirmed,
        "Stay" => DialogOutcome::Cancelled,
        other => panic!("unsupported prompt answer: {other}"),
    };
    *world.answer.borrow_mut() = outcome;
}

#[when("the user navigates to {path}")]
fn the_user_navigates_to(world: &GuardWorld, path: String) {
    world.navigate(&path);
}

#[then("the navigation proceeds to {url}")]
fn the_navigation_proceeds_to(world: &GuardWorld, url: String) {
    match world.outcome.borrow().as_ref().expect("navigation attempted") {
        GateOutcome::Proceed(route) => assert_eq!(route.url(), url),
        other => panic!("expected navigation to proceed, got {other:?}"),
    }
}

#[then("the navigation is blocked")]
fn the_navigation_is_blocked(world: &GuardWorld) {
    assert_eq!(world.outcome.borrow().as_ref(), Some(&GateOutcome::Blocked));
}

#[then("no route matches")]
fn no_route_matches(world: &GuardWorld) {
    assert_eq!(world.outcome.borrow().as_ref(), Some(&GateOutcome::NotFound));
}

#[then("the user is redirected to {target}")]
fn the_user_is_redirected_to(world: &GuardWorld, target: String) {
    let last = world.navigator.last().expect("a redirect was requested");
    assert_eq!(last.to_string(), target);
}

#[then("no redirect happens")]
fn no_redirect_happens(world: &GuardWorld) {
    assert!(world.navigator.history().is_empty());
}

#[then("the leave prompt was shown once")]
fn the_leave_prompt_was_shown_once(world: &GuardWorld) {
    assert_eq!(world.prompts_shown(), 1);
}

#[then("the leave prompt was not shown")]
fn the_leave_prompt_was_not_shown(world: &GuardWorld) {
    assert_eq!(world.prompts_shown(), 0);
}

#[scenario(
    path = "tests/features/navigation_guards.feature",
    name = "Signed-in user opens a feedback form"
)]
fn signed_in_user_opens_a_feedback_form(world: GuardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/navigation_guards.feature",
    name = "Anonymous user is sent to login with the destination recorded"
)]
fn anonymous_user_is_sent_to_login(world: GuardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/navigation_guards.feature",
    name = "Anonymous user opens the login page"
)]
fn anonymous_user_opens_the_login_page(world: GuardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/navigation_guards.feature",
    name = "Signed-in user opening login lands on self nomination"
)]
fn signed_in_user_opening_login_lands_on_self_nomination(world: GuardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/navigation_guards.feature",
    name = "Staying on a form with unsaved answers"
)]
fn staying_on_a_form_with_unsaved_answers(world: GuardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/navigation_guards.feature",
    name = "Leaving a form with unsaved answers"
)]
fn leaving_a_form_with_unsaved_answers(world: GuardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/navigation_guards.feature",
    name = "Leaving a saved form does not prompt"
)]
fn leaving_a_saved_form_does_not_prompt(world: GuardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/navigation_guards.feature",
    name = "Unknown paths match no route"
)]
fn unknown_paths_match_no_route(world: GuardWorld) {
    drop(world);
}
