//! Cookie jar adapters.

use std::sync::{Arc, Mutex, PoisonError};

use reqwest::Url;
use reqwest::cookie::{CookieStore as _, Jar};

use crate::domain::ports::CookieJar;

/// Jar held in process memory.
///
/// Assignments follow the `document.cookie` dialect: the first segment is
/// `name=value`, and a non-positive `max-age` removes the cookie. Other
/// attributes are accepted and ignored.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: Mutex<Vec<(String, String)>>,
}

impl CookieJar for MemoryCookieJar {
    fn cookie_header(&self) -> String {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, assignment: &str) {
        let mut segments = assignment.split(';');
        let Some((name, value)) = segments
            .next()
            .and_then(|pair| pair.split_once('='))
            .map(|(name, value)| (name.trim(), value.trim()))
        else {
            return;
        };
        if name.is_empty() {
            return;
        }
        let expired = segments
            .filter_map(|attribute| attribute.trim().split_once('='))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case("max-age"))
            .and_then(|(_, age)| age.trim().parse::<i64>().ok())
            .is_some_and(|age| age <= 0);

        let mut cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        let existing = cookies.iter().position(|(held, _)| held == name);
        match (existing, expired) {
            (Some(index), true) => {
                cookies.remove(index);
            }
            (Some(index), false) => cookies[index].1 = value.to_owned(),
            (None, true) => {}
            (None, false) => cookies.push((name.to_owned(), value.to_owned())),
        }
    }
}

/// Jar over the cookie store shared with [`ReqwestTransport`](super::ReqwestTransport).
///
/// Cookies written here travel with every credentialed API request, and
/// cookies set by the backend are visible here.
#[derive(Debug, Clone)]
pub struct ReqwestCookieJar {
    jar: Arc<Jar>,
    origin: Url,
}

impl ReqwestCookieJar {
    /// Jar scoped to `origin`.
    pub fn new(jar: Arc<Jar>, origin: Url) -> Self {
        Self { jar, origin }
    }
}

impl CookieJar for ReqwestCookieJar {
    fn cookie_header(&self) -> String {
        self.jar
            .cookies(&self.origin)
            .and_then(|header| header.to_str().ok().map(str::to_owned))
            .unwrap_or_default()
    }

    fn write(&self, assignment: &str) {
        self.jar.add_cookie_str(assignment, &self.origin);
    }
}
