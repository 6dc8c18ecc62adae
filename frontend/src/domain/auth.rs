//! Login credentials submitted to the backend.
//!
//! The login view validates raw form input through these constructors before
//! the API client sends anything over the wire.

use std::fmt;

use zeroize::Zeroizing;

/// Validation failures for login form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Credentials posted to `/login`.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` keeps caller whitespace and is wiped on drop. It is
///   non-empty unless built with [`LoginCredentials::passwordless`].
///
/// # Examples
/// ```
/// use frontend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "hunter2").unwrap();
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw form values.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Self::passwordless(username, password)
    }

    /// Validate form values for a backend that skips password checks.
    ///
    /// The password is sent as typed and may be empty.
    pub fn passwordless(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Directory username, as typed by the employee.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as entered.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("  \t", "pw", LoginValidationError::EmptyUsername)]
    #[case("bob", "", LoginValidationError::EmptyPassword)]
    fn rejects_blank_inputs(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("blank input must be rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("bob", "")]
    #[case(" bob ", "ignored")]
    fn passwordless_accepts_any_password(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::passwordless(username, password).expect("valid input");
        assert_eq!(creds.username(), "bob");
        assert_eq!(creds.password(), password);
    }

    #[test]
    fn passwordless_still_requires_a_username() {
        assert_eq!(
            LoginCredentials::passwordless(" ", ""),
            Err(LoginValidationError::EmptyUsername)
        );
    }

    #[test]
    fn password_whitespace_is_preserved() {
        let creds = LoginCredentials::try_from_parts("bob", " spaced ").expect("valid input");
        assert_eq!(creds.password(), " spaced ");
    }
}
