//! Application route table.
//!
//! The table mirrors the page map of the front-end: one anonymous login
//! page and an authenticated section whose editing pages must confirm before
//! unsaved answers are discarded.

use std::collections::BTreeMap;

/// Section a route belongs to, which decides the guard run on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Reachable only while signed out.
    Anonymous,
    /// Reachable only while signed in.
    Authenticated,
}

/// Page rendered for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Login form.
    Login,
    /// Self nomination.
    SelfNominate,
    /// Feedback received by the current user.
    FeedbackAboutMe,
    /// Colleagues open for feedback.
    Nominees,
    /// External reviewer invitations.
    ExternalInvite,
    /// Feedback form for one colleague.
    GiveFeedback,
    /// Team statistics.
    TeamStats,
    /// Company-wide statistics.
    CompanyStats,
    /// Manager summary of one report's feedback.
    SummariseFeedback,
    /// Feedback history of one report.
    FeedbackHistory,
    /// Talent manager administration.
    TalentManagerPanel,
}

struct RouteDef {
    pattern: &'static str,
    view: View,
    section: Section,
    confirm_on_leave: bool,
}

const fn route(pattern: &'static str, view: View, confirm_on_leave: bool) -> RouteDef {
    RouteDef {
        pattern,
        view,
        section: Section::Authenticated,
        confirm_on_leave,
    }
}

const ROUTES: &[RouteDef] = &[
    RouteDef {
        pattern: "login",
        view: View::Login,
        section: Section::Anonymous,
        confirm_on_leave: false,
    },
    route("self-nominate", View::SelfNominate, false),
    route("feedback-about-me", View::FeedbackAboutMe, false),
    route("feedback", View::Nominees, false),
    route("invite-outside-reviewers", View::ExternalInvite, false),
    route("feedback/:username", View::GiveFeedback, true),
    route("team-feedback", View::TeamStats, false),
    route("company-feedback", View::CompanyStats, false),
    route(
        "team-feedback/:username/summarise",
        View::SummariseFeedback,
        true,
    ),
    route("team-feedback/:username/history", View::FeedbackHistory, false),
    route("talent-manager-panel", View::TalentManagerPanel, false),
];

/// Path the empty route redirects to.
const ROOT_REDIRECT: &str = "feedback";

/// A resolved route with its captured parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    url: String,
    view: View,
    section: Section,
    confirm_on_leave: bool,
    params: BTreeMap<String, String>,
}

impl RouteMatch {
    /// Matched path as slash-joined segments, without a leading slash.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Page rendered for this route.
    pub fn view(&self) -> View {
        self.view
    }

    /// Section deciding the entry guard.
    pub fn section(&self) -> Section {
        self.section
    }

    /// Whether leaving must go through the pending-changes guard.
    pub fn confirm_on_leave(&self) -> bool {
        self.confirm_on_leave
    }

    /// Captured `:name` parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Split a path into non-empty segments, dropping any query string.
pub fn segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Segments joined by `/`, the form recorded in the login `from` parameter.
pub fn route_url(path: &str) -> String {
    segments(path).join("/")
}

/// Resolve `path` against the route table. The empty path follows the root
/// redirect to the nominee list.
///
/// # Examples
/// ```
/// use frontend::domain::routes::{resolve, View};
///
/// let matched = resolve("/feedback/alice").expect("known route");
/// assert_eq!(matched.view(), View::GiveFeedback);
/// assert_eq!(matched.param("username"), Some("alice"));
/// ```
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let mut parts = segments(path);
    if parts.is_empty() {
        parts = vec![ROOT_REDIRECT];
    }
    ROUTES.iter().find_map(|def| match_route(def, &parts))
}

fn match_route(def: &RouteDef, parts: &[&str]) -> Option<RouteMatch> {
    let pattern: Vec<&str> = def.pattern.split('/').collect();
    if pattern.len() != parts.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (expected, actual) in pattern.iter().zip(parts) {
        match expected.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_owned(), (*actual).to_owned());
            }
            None if expected == actual => {}
            None => return None,
        }
    }

    Some(RouteMatch {
        url: parts.join("/"),
        view: def.view,
        section: def.section,
        confirm_on_leave: def.confirm_on_leave,
        params,
    })
}
