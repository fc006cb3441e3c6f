use std::io;
use thiserror::Error;

/// Errors returned by [`QuizApp`](crate::QuizApp) operations.
///
/// Preconditions that the application treats as no-ops (creating a quiz while
/// logged out, completing with no running session) are not errors; those
/// operations return `Ok(None)` instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("user '{user_id}' may not modify quiz '{quiz_id}'")]
    PermissionDenied { quiz_id: String, user_id: String },

    #[error("quiz '{0}' not found")]
    QuizNotFound(String),

    /// An answer outside 0..=3 that is not the unanswered sentinel.
    #[error("answer {0} is not an option index or -1")]
    InvalidAnswer(i32),

    #[error("no quiz is in progress")]
    NoActiveQuiz,

    #[error("no answer selected")]
    NoSelection,
}

/// Form-level validation failures.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    #[error("Username or email already exists")]
    DuplicateAccount,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Please fill in title and description")]
    MissingTitleOrDescription,

    #[error("Please add at least one complete question")]
    NoCompleteQuestions,

    #[error("Correct answer {0} is out of range")]
    CorrectAnswerOutOfRange(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
