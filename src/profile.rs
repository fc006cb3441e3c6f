//! Read-only statistics derived from the catalog and attempt history.

use crate::model::{rounded_mean, Quiz, QuizAttempt};
use crate::state::AppState;

/// Title shown for attempts whose quiz has since been deleted.
pub const UNKNOWN_QUIZ: &str = "Unknown Quiz";

/// How many attempts the profile lists.
pub const RECENT_ATTEMPTS: usize = 5;

/// An attempt resolved against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentAttempt<'a> {
    pub attempt: &'a QuizAttempt,
    /// `None` when the quiz no longer exists.
    pub quiz: Option<&'a Quiz>,
}

impl RecentAttempt<'_> {
    /// The quiz title, or [`UNKNOWN_QUIZ`].
    pub fn title(&self) -> &str {
        self.quiz.map_or(UNKNOWN_QUIZ, |q| q.title.as_str())
    }
}

/// Per-user figures shown on the profile screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStats<'a> {
    pub quizzes: Vec<&'a Quiz>,
    pub attempts: Vec<&'a QuizAttempt>,
    /// Rounded mean of the user's attempt scores; 0 with no attempts.
    pub average_score: u8,
    /// Questions across every quiz the user created.
    pub questions_created: usize,
    /// Up to [`RECENT_ATTEMPTS`], most recent first.
    pub recent: Vec<RecentAttempt<'a>>,
}

impl<'a> ProfileStats<'a> {
    pub fn for_user(state: &'a AppState, user_id: &str) -> Self {
        let quizzes: Vec<&Quiz> = state
            .quizzes
            .iter()
            .filter(|q| q.created_by == user_id)
            .collect();
        let attempts: Vec<&QuizAttempt> = state
            .quiz_attempts
            .iter()
            .filter(|a| a.user_id == user_id)
            .collect();

        let average_score = rounded_mean(attempts.iter().map(|a| u64::from(a.score))) as u8;
        let questions_created = quizzes.iter().map(|q| q.len()).sum();
        let recent = attempts
            .iter()
            .rev()
            .take(RECENT_ATTEMPTS)
            .map(|a| RecentAttempt {
                attempt: a,
                quiz: state.quiz(&a.quiz_id),
            })
            .collect();

        ProfileStats {
            quizzes,
            attempts,
            average_score,
            questions_created,
            recent,
        }
    }

    pub fn quiz_count(&self) -> usize {
        self.quizzes.len()
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }
}

/// Catalog-wide counters for the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SiteTotals {
    pub quizzes: usize,
    pub questions: usize,
    pub attempts: usize,
}

impl SiteTotals {
    pub fn of(state: &AppState) -> Self {
        SiteTotals {
            quizzes: state.quizzes.len(),
            questions: state.quizzes.iter().map(Quiz::len).sum(),
            attempts: state.quiz_attempts.len(),
        }
    }
}
