//! Persisted domain records.
//!
//! Field names serialize in camelCase so stored collections keep the same
//! shape regardless of which front end wrote them.

use serde::{Deserialize, Serialize};

/// Answer slot value for a question the user never answered (e.g. timed out).
pub const UNANSWERED: i32 = -1;

/// Number of options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A registered account.
///
/// Created once on registration and never modified or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Unix timestamp in seconds.
    pub created_at: u64,
}

/// A multiple-choice question inside a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Quiz-scoped identifier (`q1`, `q2`, ...).
    pub id: String,
    pub question: String,
    pub options: [String; OPTION_COUNT],
    /// Index into `options`.
    pub correct_answer: u8,
}

impl Question {
    /// Returns true if `answer` selects the correct option.
    ///
    /// The [`UNANSWERED`] sentinel and out-of-range values never match.
    pub fn is_correct(&self, answer: i32) -> bool {
        answer == i32::from(self.correct_answer)
    }
}

/// A quiz authored by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub questions: Vec<Question>,
    /// Id of the owning [`User`]. Ownership never transfers.
    pub created_by: String,
    pub created_at: u64,
}

impl Quiz {
    /// Number of questions in the quiz.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns true if the quiz has no questions.
    ///
    /// Quizzes built through [`QuizDraft`](crate::QuizDraft) are never empty;
    /// this only guards against hand-edited stored data.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of answers that match the correct option, position by position.
    ///
    /// Missing trailing answers count as unanswered.
    pub fn correct_count(&self, answers: &[i32]) -> usize {
        self.questions
            .iter()
            .enumerate()
            .filter(|(i, q)| answers.get(*i).is_some_and(|a| q.is_correct(*a)))
            .count()
    }

    /// Score for `answers` as an integer percentage, rounded half up.
    pub fn score(&self, answers: &[i32]) -> u8 {
        percentage(self.correct_count(answers), self.len())
    }
}

/// One completed run through a quiz. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: String,
    /// Weak reference: the quiz may have been deleted since.
    pub quiz_id: String,
    pub user_id: String,
    /// Selected option per question, or [`UNANSWERED`].
    pub answers: Vec<i32>,
    /// Integer percentage, 0 to 100.
    pub score: u8,
    pub completed_at: u64,
}

/// `round(100 * part / whole)` with halves rounded up. Zero when `whole` is 0.
pub(crate) fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u64;
    let whole = whole as u64;
    ((200 * part + whole) / (2 * whole)) as u8
}

/// Integer mean of `values`, rounded half up. Zero for an empty slice.
pub(crate) fn rounded_mean(values: impl IntoIterator<Item = u64>) -> u64 {
    let (sum, count) = values
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0;
    }
    (2 * sum + count) / (2 * count)
}
