//! Quiz drafts, catalog search and category listings.

use crate::error::ValidationError;
use crate::model::{Question, Quiz, User, OPTION_COUNT};

/// Category filter value that matches every quiz.
pub const ALL_CATEGORIES: &str = "All";

/// Category preselected for new drafts.
pub const DEFAULT_CATEGORY: &str = "General";

/// The curated categories offered when authoring a quiz.
///
/// Any other string is accepted as a custom category.
pub const CATEGORIES: [&str; 6] = [
    "General",
    "Science",
    "History",
    "Sports",
    "Technology",
    "Entertainment",
];

/// A question as typed into the authoring form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub options: [String; OPTION_COUNT],
    pub correct_answer: u8,
}

impl QuestionDraft {
    pub fn new(question: impl Into<String>, options: [&str; OPTION_COUNT], correct_answer: u8) -> Self {
        QuestionDraft {
            question: question.into(),
            options: options.map(String::from),
            correct_answer,
        }
    }

    /// Question text and every option are non-blank.
    fn is_complete(&self) -> bool {
        !self.question.trim().is_empty() && self.options.iter().all(|o| !o.trim().is_empty())
    }
}

/// A quiz as typed into the authoring form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub questions: Vec<QuestionDraft>,
}

impl Default for QuizDraft {
    fn default() -> Self {
        QuizDraft {
            title: String::new(),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            questions: vec![QuestionDraft::default()],
        }
    }
}

/// A validated draft, ready to be stamped with an id and owner.
///
/// Only [`QuizDraft::validate`] builds one, so it always has a title, a
/// description and at least one complete question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuiz {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) questions: Vec<Question>,
}

impl NewQuiz {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl QuizDraft {
    /// Check the draft and build the quiz content from it.
    ///
    /// Title and description are trimmed and must be non-empty. Incomplete
    /// questions are dropped; at least one complete question must remain.
    /// Accepted questions are numbered `q1`, `q2`, ... in order.
    ///
    /// ```
    /// use quizfold::{QuestionDraft, QuizDraft};
    ///
    /// let draft = QuizDraft {
    ///     title: "  Capitals ".into(),
    ///     description: "Europe".into(),
    ///     category: "General".into(),
    ///     questions: vec![
    ///         QuestionDraft::new("", ["", "", "", ""], 0),
    ///         QuestionDraft::new("France?", ["Paris", "Lyon", "Nice", "Metz"], 0),
    ///     ],
    /// };
    /// let quiz = draft.validate().unwrap();
    /// assert_eq!(quiz.title(), "Capitals");
    /// assert_eq!(quiz.questions().len(), 1);
    /// assert_eq!(quiz.questions()[0].id, "q1");
    /// ```
    pub fn validate(&self) -> Result<NewQuiz, ValidationError> {
        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(ValidationError::MissingTitleOrDescription);
        }

        let complete: Vec<&QuestionDraft> =
            self.questions.iter().filter(|q| q.is_complete()).collect();
        if complete.is_empty() {
            return Err(ValidationError::NoCompleteQuestions);
        }

        let mut questions = Vec::with_capacity(complete.len());
        for (i, draft) in complete.into_iter().enumerate() {
            if usize::from(draft.correct_answer) >= OPTION_COUNT {
                return Err(ValidationError::CorrectAnswerOutOfRange(draft.correct_answer));
            }
            questions.push(Question {
                id: format!("q{}", i + 1),
                question: draft.question.clone(),
                options: draft.options.clone(),
                correct_answer: draft.correct_answer,
            });
        }

        Ok(NewQuiz {
            title: title.to_string(),
            description: description.to_string(),
            category: self.category.clone(),
            questions,
        })
    }
}

/// Search term plus category filter for browsing the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub term: String,
    /// A category name, or [`ALL_CATEGORIES`].
    pub category: String,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        CatalogQuery {
            term: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl CatalogQuery {
    pub fn new(term: impl Into<String>, category: impl Into<String>) -> Self {
        CatalogQuery {
            term: term.into(),
            category: category.into(),
        }
    }

    /// Match `term` anywhere in title or description, ignoring case.
    pub fn term(term: impl Into<String>) -> Self {
        CatalogQuery {
            term: term.into(),
            ..Self::default()
        }
    }

    pub fn matches(&self, quiz: &Quiz) -> bool {
        let term = self.term.to_lowercase();
        let matches_term = quiz.title.to_lowercase().contains(&term)
            || quiz.description.to_lowercase().contains(&term);
        let matches_category = self.category == ALL_CATEGORIES || quiz.category == self.category;
        matches_term && matches_category
    }
}

/// Quizzes matching `query`, in catalog order.
pub fn search<'a>(quizzes: &'a [Quiz], query: &CatalogQuery) -> Vec<&'a Quiz> {
    quizzes.iter().filter(|q| query.matches(q)).collect()
}

/// Filter options for browsing: [`ALL_CATEGORIES`] followed by each category
/// present in the catalog, in first-seen order.
pub fn categories(quizzes: &[Quiz]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for quiz in quizzes {
        if !out.contains(&quiz.category) {
            out.push(quiz.category.clone());
        }
    }
    out
}

/// Returns true if `user` owns `quiz` and may delete it.
pub fn can_delete(quiz: &Quiz, user: Option<&User>) -> bool {
    user.is_some_and(|u| u.id == quiz.created_by)
}
