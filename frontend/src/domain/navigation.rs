//! Navigation targets and guard decisions.

use std::fmt;

use url::form_urlencoded;

/// Route of the login page.
pub const LOGIN_PATH: &str = "/login";
/// Where the anonymous guard sends users who are already signed in.
pub const DEFAULT_LANDING_PATH: &str = "/self-nominate";
/// Login query parameter recording where the user was headed.
pub const FROM_PARAM: &str = "from";
/// Where a successful login goes when no `from` was recorded.
pub const DEFAULT_REDIRECT_PATH: &str = "/feedback";

/// Outcome of one guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Navigation may proceed.
    Allow,
    /// Navigation is cancelled; a redirect may already be under way.
    Deny,
}

impl NavigationDecision {
    /// `true` for [`NavigationDecision::Allow`].
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl From<bool> for NavigationDecision {
    fn from(allowed: bool) -> Self {
        if allowed { Self::Allow } else { Self::Deny }
    }
}

/// A path plus ordered query parameters, handed to the navigator.
///
/// # Examples
/// ```
/// use frontend::domain::NavigationTarget;
///
/// let target = NavigationTarget::new("/login").with_query("from", "feedback/alice");
/// assert_eq!(target.to_string(), "/login?from=feedback%2Falice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    path: String,
    query: Vec<(String, String)>,
}

impl NavigationTarget {
    /// Target without query parameters.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Append one query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Parse a `path?query` string as produced by [`fmt::Display`].
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('?') {
            Some((path, query)) => Self {
                path: path.to_owned(),
                query: form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect(),
            },
            None => Self::new(raw),
        }
    }

    /// Path component.
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Query parameters in insertion order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// First value recorded for `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if self.query.is_empty() {
            return Ok(());
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        write!(f, "?{encoded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, NavigationDecision::Allow)]
    #[case(false, NavigationDecision::Deny)]
    fn decision_from_bool(#[case] allowed: bool, #[case] expected: NavigationDecision) {
        assert_eq!(NavigationDecision::from(allowed), expected);
        assert_eq!(expected.is_allowed(), allowed);
    }

    #[test]
    fn parse_reverses_display() {
        let target = NavigationTarget::new("/login")
            .with_query("from", "team-feedback/bob/summarise")
            .with_query("logoutSuccess", "true");

        let parsed = NavigationTarget::parse(&target.to_string());
        assert_eq!(parsed, target);
        assert_eq!(parsed.query_value("logoutSuccess"), Some("true"));
        assert_eq!(parsed.query_value("missing"), None);
    }

    #[test]
    fn bare_path_renders_without_question_mark() {
        assert_eq!(NavigationTarget::new("/feedback").to_string(), "/feedback");
    }
}
