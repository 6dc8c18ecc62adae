//! Driven port for the cookie storage behind `CookieStore`.

/// Cookie storage speaking the browser's `document.cookie` dialect.
///
/// Reads return every visible cookie as one `name=value; name=value` header;
/// writes take one assignment with optional attributes, e.g.
/// `username=alice; max-age=60; path=/`.
#[cfg_attr(test, mockall::automock)]
pub trait CookieJar: Send + Sync {
    /// All visible cookies as a header string.
    fn cookie_header(&self) -> String;

    /// Apply one cookie assignment.
    fn write(&self, assignment: &str);
}
