//! Account lookup and registration form checks.
//!
//! Passwords are never stored. Login matches on username alone; that lookup
//! is kept in [`insecure_username_only_login`] so a real credential check can
//! replace it without touching [`QuizApp::login`](crate::QuizApp::login).

use crate::error::ValidationError;
use crate::model::User;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Find the account for `username`, ignoring any password.
///
/// Usernames match exactly (case-sensitive).
pub fn insecure_username_only_login<'a>(users: &'a [User], username: &str) -> Option<&'a User> {
    users.iter().find(|u| u.username == username)
}

/// Returns true if `username` or `email` already belongs to an account.
pub fn is_taken(users: &[User], username: &str, email: &str) -> bool {
    users
        .iter()
        .any(|u| u.username == username || u.email == email)
}

/// Input of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        RegistrationForm {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Check the form fields. Uniqueness is checked at registration.
    ///
    /// Every field is required (username and email must not be blank after
    /// trimming). Password mismatch is reported before length.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let blank = [&self.username, &self.email]
            .iter()
            .any(|field| field.trim().is_empty());
        if blank || self.password.is_empty() || self.confirm_password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(())
    }
}
