use crate::action::Action;
use crate::model::{Quiz, QuizAttempt, User, UNANSWERED};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pure function that folds an action into state.
///
/// Reducers receive owned state and return owned state. [`reduce`] is the
/// reducer for [`AppState`]; the alias exists so callers can store it or swap
/// in a wrapping reducer (e.g. one that records transitions).
///
/// # Examples
///
/// ```
/// use quizfold::{reduce, Action, AppState, ReduceFn, View};
///
/// let reducer: ReduceFn<AppState> = reduce;
/// let state = reducer(AppState::default(), &Action::SetView(View::QuizList));
/// assert_eq!(state.current_view, View::QuizList);
/// ```
pub type ReduceFn<S> = fn(S, &Action) -> S;

/// The navigable modes of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Home,
    Login,
    Register,
    CreateQuiz,
    QuizList,
    TakeQuiz,
    QuizResults,
    Profile,
}

impl View {
    /// Every view, in navigation-menu order.
    pub const ALL: [View; 8] = [
        View::Home,
        View::Login,
        View::Register,
        View::CreateQuiz,
        View::QuizList,
        View::TakeQuiz,
        View::QuizResults,
        View::Profile,
    ];

    /// The view's wire name (`"quiz-list"`, `"take-quiz"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Login => "login",
            View::Register => "register",
            View::CreateQuiz => "create-quiz",
            View::QuizList => "quiz-list",
            View::TakeQuiz => "take-quiz",
            View::QuizResults => "quiz-results",
            View::Profile => "profile",
        }
    }

    /// Parse a view name, falling back to [`View::Home`] for anything unknown.
    ///
    /// ```
    /// use quizfold::View;
    ///
    /// assert_eq!(View::parse("quiz-results"), View::QuizResults);
    /// assert_eq!(View::parse("settings"), View::Home);
    /// ```
    pub fn parse(name: &str) -> View {
        View::ALL
            .into_iter()
            .find(|v| v.as_str() == name)
            .unwrap_or_default()
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(View::parse(s))
    }
}

/// Where the quiz-taking state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No quiz is being taken.
    Idle,
    /// A quiz is running; the current question index is in range.
    InProgress,
    /// The attempt has been recorded; the session is kept for the results view.
    Completed,
}

/// Transient progress through one quiz. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    pub quiz: Quiz,
    pub current_question_index: usize,
    /// One slot per question reached so far.
    pub user_answers: Vec<i32>,
    /// Pending, not yet submitted choice for the current question.
    pub selected: Option<u8>,
    /// Clock reading (Unix seconds) when the current question was shown.
    pub question_started_at: u64,
    pub completed: bool,
}

impl QuizSession {
    fn new(quiz: Quiz, started_at: u64) -> Self {
        QuizSession {
            quiz,
            current_question_index: 0,
            user_answers: Vec::new(),
            selected: None,
            question_started_at: started_at,
            completed: false,
        }
    }

    /// The question currently shown, if the index is in range.
    pub fn current_question(&self) -> Option<&crate::Question> {
        self.quiz.questions.get(self.current_question_index)
    }

    /// Returns true when the current question is the quiz's last one.
    pub fn is_last_question(&self) -> bool {
        self.current_question_index + 1 >= self.quiz.len()
    }

    /// Share of questions reached, counting the current one, as a percentage.
    pub fn progress(&self) -> u8 {
        crate::model::percentage(self.current_question_index + 1, self.quiz.len())
    }

    fn record(&mut self, answer: i32) {
        let index = self.current_question_index;
        if self.user_answers.len() <= index {
            self.user_answers.resize(index + 1, UNANSWERED);
        }
        self.user_answers[index] = answer;
    }
}

/// The complete in-memory application snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub current_user: Option<User>,
    pub current_view: View,
    /// The catalog, in insertion order.
    pub quizzes: Vec<Quiz>,
    pub session: Option<QuizSession>,
    /// Every recorded attempt, oldest first.
    pub quiz_attempts: Vec<QuizAttempt>,
}

impl AppState {
    /// Current phase of the quiz-taking state machine.
    pub fn phase(&self) -> Phase {
        match &self.session {
            None => Phase::Idle,
            Some(s) if s.completed => Phase::Completed,
            Some(_) => Phase::InProgress,
        }
    }

    /// The quiz being taken (or just completed).
    pub fn current_quiz(&self) -> Option<&Quiz> {
        self.session.as_ref().map(|s| &s.quiz)
    }

    /// Index of the current question; 0 when idle.
    pub fn current_question_index(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, |s| s.current_question_index)
    }

    /// Answers recorded in the current session; empty when idle.
    pub fn user_answers(&self) -> &[i32] {
        self.session
            .as_ref()
            .map(|s| s.user_answers.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a quiz in the catalog.
    pub fn quiz(&self, quiz_id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == quiz_id)
    }
}

/// Fold one action into the application state.
///
/// Pure: no I/O, no clock reads. Actions that do not apply to the current
/// phase (answering with no session, advancing a completed quiz) leave the
/// state unchanged.
pub fn reduce(mut state: AppState, action: &Action) -> AppState {
    match action {
        Action::SetUser(user) => {
            state.current_user = user.clone();
        }
        Action::SetView(view) => {
            state.current_view = *view;
        }
        Action::Hydrate { quizzes, attempts } => {
            state.quizzes = quizzes.clone();
            state.quiz_attempts = attempts.clone();
        }
        Action::AddQuiz(quiz) => {
            state.quizzes.push(quiz.clone());
        }
        Action::DeleteQuiz(id) => {
            state.quizzes.retain(|q| q.id != *id);
        }
        Action::StartQuiz { quiz, started_at } => {
            state.session = Some(QuizSession::new(quiz.clone(), *started_at));
            state.current_view = View::TakeQuiz;
        }
        Action::SelectAnswer(choice) => {
            if let Some(session) = state.session.as_mut().filter(|s| !s.completed) {
                session.selected = Some(*choice);
            }
        }
        Action::SubmitAnswer(answer) => {
            if let Some(session) = state.session.as_mut().filter(|s| !s.completed) {
                session.record(*answer);
            }
        }
        Action::Advance { answer, started_at } => {
            if let Some(session) = state.session.as_mut().filter(|s| !s.completed) {
                session.record(*answer);
                if !session.is_last_question() {
                    session.current_question_index += 1;
                }
                session.selected = None;
                session.question_started_at = *started_at;
            }
        }
        Action::CompleteQuiz(attempt) => {
            if let Some(session) = state.session.as_mut().filter(|s| !s.completed) {
                session.user_answers = attempt.answers.clone();
                session.selected = None;
                session.completed = true;
                state.quiz_attempts.push(attempt.clone());
                state.current_view = View::QuizResults;
            }
        }
        Action::ResetQuiz => {
            state.session = None;
        }
    }
    state
}
