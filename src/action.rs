use crate::model::{Quiz, QuizAttempt, User};
use crate::state::View;
use serde::{Deserialize, Serialize};

/// A state transition request handled by [`reduce`](crate::reduce).
///
/// Actions carry everything the reducer needs, including clock readings and
/// freshly generated records, so reducing the same sequence of actions always
/// yields the same state. Orchestration code in [`QuizApp`](crate::QuizApp)
/// builds them; tests and tools can also fold them directly.
///
/// Serialized as `{"type": "...", "data": ...}`:
///
/// ```
/// use quizfold::{Action, View};
///
/// let json = serde_json::to_string(&Action::SetView(View::Profile)).unwrap();
/// assert_eq!(json, r#"{"type":"set_view","data":"profile"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Action {
    /// Replace the logged-in user (`None` logs out).
    SetUser(Option<User>),

    /// Navigate to a view.
    SetView(View),

    /// Load the catalog and attempt history read from the store.
    Hydrate {
        quizzes: Vec<Quiz>,
        attempts: Vec<QuizAttempt>,
    },

    /// Append a newly created quiz to the catalog.
    AddQuiz(Quiz),

    /// Remove a quiz from the catalog by id. Attempts are left alone.
    DeleteQuiz(String),

    /// Begin a fresh session on `quiz`, discarding any previous progress.
    StartQuiz { quiz: Quiz, started_at: u64 },

    /// Record a pending choice for the current question without submitting it.
    SelectAnswer(u8),

    /// Write an answer into the current question's slot. Does not advance.
    SubmitAnswer(i32),

    /// Record `answer` for the current question and move to the next one,
    /// restarting its countdown at `started_at`.
    ///
    /// On the last question the answer is recorded, the index stays put and
    /// the countdown still restarts; completion is a separate
    /// [`Action::CompleteQuiz`].
    Advance { answer: i32, started_at: u64 },

    /// Finish the session with the given attempt and show the results.
    ///
    /// The session's answers are replaced by `attempt.answers`, which lets a
    /// final answer and completion land in one transition.
    CompleteQuiz(QuizAttempt),

    /// Drop the session. Attempt history and the current view are kept.
    ResetQuiz,
}

impl Action {
    /// Short, stable name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetUser(_) => "set_user",
            Action::SetView(_) => "set_view",
            Action::Hydrate { .. } => "hydrate",
            Action::AddQuiz(_) => "add_quiz",
            Action::DeleteQuiz(_) => "delete_quiz",
            Action::StartQuiz { .. } => "start_quiz",
            Action::SelectAnswer(_) => "select_answer",
            Action::SubmitAnswer(_) => "submit_answer",
            Action::Advance { .. } => "advance",
            Action::CompleteQuiz(_) => "complete_quiz",
            Action::ResetQuiz => "reset_quiz",
        }
    }
}

/// Why the session is moving past the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceReason {
    /// The user confirmed their selection.
    UserChoice,
    /// The per-question countdown ran out.
    Timeout,
}
