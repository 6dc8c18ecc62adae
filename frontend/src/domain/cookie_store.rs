//! Named cookie access over a [`CookieJar`].
//!
//! Only the remembered login username is persisted this way; the session
//! cookie itself is owned by the backend.

use std::sync::Arc;

use super::ports::CookieJar;

/// Four weeks, the lifetime of a remembered username.
pub const DEFAULT_MAX_AGE_SECONDS: i64 = 60 * 60 * 24 * 28;

/// Reads, writes and deletes single cookies.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use frontend::domain::CookieStore;
/// use frontend::outbound::MemoryCookieJar;
///
/// let cookies = CookieStore::new(Arc::new(MemoryCookieJar::default()));
/// cookies.set("username", "alice");
/// assert_eq!(cookies.get("username"), "alice");
/// cookies.delete("username");
/// assert_eq!(cookies.get("username"), "");
/// ```
#[derive(Clone)]
pub struct CookieStore {
    jar: Arc<dyn CookieJar>,
}

impl CookieStore {
    /// Wrap a jar.
    pub fn new(jar: Arc<dyn CookieJar>) -> Self {
        Self { jar }
    }

    /// Value of `name`, or the empty string when the cookie is absent.
    pub fn get(&self, name: &str) -> String {
        let prefix = format!("{name}=");
        self.jar
            .cookie_header()
            .split(';')
            .map(str::trim_start)
            .find_map(|segment| segment.strip_prefix(prefix.as_str()))
            .map(str::to_owned)
            .unwrap_or_default()
    }

    /// Write `name` with the default four-week lifetime.
    pub fn set(&self, name: &str, value: &str) {
        self.set_with(name, value, DEFAULT_MAX_AGE_SECONDS, "");
    }

    /// Write `name`. A zero `max_age_seconds` makes a session cookie; a
    /// negative one expires the cookie at once. An empty `path` is omitted.
    pub fn set_with(&self, name: &str, value: &str, max_age_seconds: i64, path: &str) {
        let max_age = if max_age_seconds == 0 {
            String::new()
        } else {
            format!("max-age={max_age_seconds}")
        };
        let path = if path.is_empty() {
            String::new()
        } else {
            format!("; path={path}")
        };
        self.jar.write(&format!("{name}={value}; {max_age}{path}"));
    }

    /// Expire `name` immediately.
    pub fn delete(&self, name: &str) {
        self.set_with(name, "", -1, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockCookieJar;
    use rstest::rstest;

    fn store_with_header(header: &'static str) -> CookieStore {
        let mut jar = MockCookieJar::new();
        jar.expect_cookie_header()
            .returning(move || header.to_owned());
        CookieStore::new(Arc::new(jar))
    }

    fn store_expecting_write(expected: &'static str) -> CookieStore {
        let mut jar = MockCookieJar::new();
        jar.expect_write()
            .withf(move |assignment| assignment == expected)
            .times(1)
            .return_const(());
        CookieStore::new(Arc::new(jar))
    }

    #[rstest]
    #[case("username=alice", "alice")]
    #[case("theme=dark;   username=alice; lang=en", "alice")]
    #[case("theme=dark", "")]
    #[case("", "")]
    #[case("old_username=bob; username=alice", "alice")]
    #[case("username=; theme=dark", "")]
    fn reads_named_cookie(#[case] header: &'static str, #[case] expected: &str) {
        assert_eq!(store_with_header(header).get("username"), expected);
    }

    #[test]
    fn default_write_lasts_four_weeks() {
        store_expecting_write("username=alice; max-age=2419200").set("username", "alice");
    }

    #[test]
    fn zero_max_age_writes_a_session_cookie_with_path() {
        store_expecting_write("username=alice; ; path=/").set_with("username", "alice", 0, "/");
    }

    #[test]
    fn delete_expires_immediately() {
        store_expecting_write("username=; max-age=-1").delete("username");
    }
}
