use crate::action::{Action, AdvanceReason};
use crate::auth::{self, RegistrationForm};
use crate::catalog::{self, CatalogQuery, NewQuiz, QuizDraft};
use crate::clock::{Clock, SystemClock};
use crate::config::{Config, DEFAULT_QUESTION_SECONDS};
use crate::error::{Error, Result, ValidationError};
use crate::model::{Quiz, QuizAttempt, User, OPTION_COUNT, UNANSWERED};
use crate::profile::{ProfileStats, SiteTotals};
use crate::results::QuizReview;
use crate::state::{reduce, AppState, Phase, QuizSession, ReduceFn, View};
use crate::store::{Store, StoreExt, ATTEMPTS_KEY, QUIZZES_KEY, USERS_KEY};
use uuid::Uuid;

/// Builder for configuring a [`QuizApp`] before hydrating it from its store.
///
/// # Examples
///
/// ```
/// use quizfold::{ManualClock, MemoryStore, QuizApp};
///
/// let app = QuizApp::builder(MemoryStore::new())
///     .clock(ManualClock::new(1_700_000_000))
///     .question_seconds(20)
///     .open()
///     .unwrap();
/// assert_eq!(app.question_seconds(), 20);
/// ```
pub struct QuizAppBuilder<S> {
    store: S,
    clock: Box<dyn Clock>,
    question_seconds: u64,
    reducer: ReduceFn<AppState>,
}

impl<S: Store> QuizAppBuilder<S> {
    /// Use `clock` for timestamps and the countdown instead of wall-clock time.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Seconds allowed per question.
    pub fn question_seconds(mut self, secs: u64) -> Self {
        self.question_seconds = secs;
        self
    }

    /// Apply settings from a [`Config`].
    pub fn config(self, config: &Config) -> Self {
        self.question_seconds(config.question_seconds)
    }

    /// Replace the reducer every action is folded through.
    ///
    /// The replacement is expected to delegate to [`reduce`] for actions it
    /// does not handle itself.
    pub fn reducer(mut self, reducer: ReduceFn<AppState>) -> Self {
        self.reducer = reducer;
        self
    }

    /// Read users, quizzes and attempts from the store and build the app.
    ///
    /// Missing or unreadable collections start out empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the store itself cannot be read.
    pub fn open(self) -> Result<QuizApp<S>> {
        let users: Vec<User> = self.store.get(USERS_KEY, Vec::new())?;
        let quizzes: Vec<Quiz> = self.store.get(QUIZZES_KEY, Vec::new())?;
        let attempts: Vec<QuizAttempt> = self.store.get(ATTEMPTS_KEY, Vec::new())?;
        log::info!(
            "quizfold: loaded {} users, {} quizzes, {} attempts",
            users.len(),
            quizzes.len(),
            attempts.len()
        );

        let mut app = QuizApp {
            store: self.store,
            clock: self.clock,
            question_seconds: self.question_seconds,
            reducer: self.reducer,
            users,
            state: AppState::default(),
        };
        app.dispatch(Action::Hydrate { quizzes, attempts });
        Ok(app)
    }
}

/// The quiz application: one owned instance holding the state, the store and
/// the clock.
///
/// Every operation validates its input, dispatches at most one state-changing
/// [`Action`] and writes the affected collection through to the store before
/// the state changes. Callers read the result through [`QuizApp::state`].
pub struct QuizApp<S> {
    store: S,
    clock: Box<dyn Clock>,
    question_seconds: u64,
    reducer: ReduceFn<AppState>,
    users: Vec<User>,
    state: AppState,
}

impl<S: std::fmt::Debug> std::fmt::Debug for QuizApp<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizApp")
            .field("store", &self.store)
            .field("question_seconds", &self.question_seconds)
            .field("users", &self.users.len())
            .field("state", &self.state)
            .finish()
    }
}

impl<S: Store> QuizApp<S> {
    /// Create a builder for a `QuizApp` backed by `store`.
    pub fn builder(store: S) -> QuizAppBuilder<S> {
        QuizAppBuilder {
            store,
            clock: Box::new(SystemClock),
            question_seconds: DEFAULT_QUESTION_SECONDS,
            reducer: reduce,
        }
    }

    /// Open with the system clock and default settings.
    pub fn open(store: S) -> Result<Self> {
        Self::builder(store).open()
    }

    /// Fold `action` into the state.
    ///
    /// Nothing is written to the store; the orchestration methods below do
    /// that themselves.
    pub fn dispatch(&mut self, action: Action) {
        log::debug!("quizfold: dispatch {}", action.name());
        let state = std::mem::take(&mut self.state);
        self.state = (self.reducer)(state, &action);
    }

    /// The current snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Every registered account.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the app and return its store.
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn question_seconds(&self) -> u64 {
        self.question_seconds
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.current_user.as_ref()
    }

    // --- accounts ---

    /// Log in as `username`.
    ///
    /// The password is not checked: any registered username succeeds. See
    /// [`auth::insecure_username_only_login`]. On success the user becomes
    /// current and the view switches to home; on failure nothing changes.
    pub fn login(&mut self, username: &str, _password: &str) -> bool {
        let Some(user) = auth::insecure_username_only_login(&self.users, username).cloned() else {
            return false;
        };
        self.dispatch(Action::SetUser(Some(user)));
        self.dispatch(Action::SetView(View::Home));
        true
    }

    /// [`login`](Self::login), reporting failure as a form error.
    pub fn sign_in(&mut self, username: &str, password: &str) -> Result<()> {
        if self.login(username, password) {
            Ok(())
        } else {
            Err(ValidationError::InvalidCredentials.into())
        }
    }

    /// Create an account and log it in.
    ///
    /// Returns `Ok(false)` without changing anything if the username or the
    /// email is already registered.
    pub fn register(&mut self, username: &str, email: &str, _password: &str) -> Result<bool> {
        if auth::is_taken(&self.users, username, email) {
            return Ok(false);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            created_at: self.clock.now(),
        };

        let mut users = self.users.clone();
        users.push(user.clone());
        self.store.set(USERS_KEY, &users)?;
        self.users = users;
        log::info!("quizfold: registered user '{}' ({})", user.username, user.id);

        self.dispatch(Action::SetUser(Some(user)));
        self.dispatch(Action::SetView(View::Home));
        Ok(true)
    }

    /// Validate the registration form, then [`register`](Self::register).
    pub fn sign_up(&mut self, form: &RegistrationForm) -> Result<()> {
        form.validate()?;
        if self.register(&form.username, &form.email, &form.password)? {
            Ok(())
        } else {
            Err(ValidationError::DuplicateAccount.into())
        }
    }

    /// Forget the current user and go home. Stored data is untouched.
    pub fn logout(&mut self) {
        self.dispatch(Action::SetUser(None));
        self.dispatch(Action::SetView(View::Home));
    }

    pub fn set_view(&mut self, view: View) {
        self.dispatch(Action::SetView(view));
    }

    // --- catalog ---

    /// Add a quiz owned by the current user and switch to the quiz list.
    ///
    /// Returns `Ok(None)` and does nothing when nobody is logged in.
    pub fn create_quiz(&mut self, quiz: NewQuiz) -> Result<Option<Quiz>> {
        let Some(owner) = self.state.current_user.as_ref() else {
            return Ok(None);
        };

        let quiz = Quiz {
            id: Uuid::new_v4().to_string(),
            title: quiz.title,
            description: quiz.description,
            category: quiz.category,
            questions: quiz.questions,
            created_by: owner.id.clone(),
            created_at: self.clock.now(),
        };

        let mut quizzes = self.state.quizzes.clone();
        quizzes.push(quiz.clone());
        self.store.set(QUIZZES_KEY, &quizzes)?;
        log::info!(
            "quizfold: created quiz '{}' ({} questions) by {}",
            quiz.title,
            quiz.len(),
            quiz.created_by
        );

        self.dispatch(Action::AddQuiz(quiz.clone()));
        self.dispatch(Action::SetView(View::QuizList));
        Ok(Some(quiz))
    }

    /// Validate `draft`, then [`create_quiz`](Self::create_quiz).
    pub fn create_quiz_from_draft(&mut self, draft: &QuizDraft) -> Result<Option<Quiz>> {
        let quiz = draft.validate()?;
        self.create_quiz(quiz)
    }

    /// Delete a quiz on behalf of `requesting_user_id`.
    ///
    /// Attempts that reference the quiz stay in the history.
    ///
    /// # Errors
    ///
    /// [`Error::QuizNotFound`] for an unknown id, [`Error::PermissionDenied`]
    /// unless the requester created the quiz.
    pub fn delete_quiz(&mut self, quiz_id: &str, requesting_user_id: &str) -> Result<()> {
        let quiz = self
            .state
            .quiz(quiz_id)
            .ok_or_else(|| Error::QuizNotFound(quiz_id.to_string()))?;
        if quiz.created_by != requesting_user_id {
            return Err(Error::PermissionDenied {
                quiz_id: quiz_id.to_string(),
                user_id: requesting_user_id.to_string(),
            });
        }

        let quizzes: Vec<Quiz> = self
            .state
            .quizzes
            .iter()
            .filter(|q| q.id != quiz_id)
            .cloned()
            .collect();
        self.store.set(QUIZZES_KEY, &quizzes)?;
        log::info!("quizfold: deleted quiz {quiz_id}");

        self.dispatch(Action::DeleteQuiz(quiz_id.to_string()));
        Ok(())
    }

    /// Catalog entries matching `query`, in catalog order.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&Quiz> {
        catalog::search(&self.state.quizzes, query)
    }

    // --- taking a quiz ---

    /// Begin `quiz` from its first question, discarding any session in
    /// progress, and switch to the quiz-taking view.
    pub fn start_quiz(&mut self, quiz: &Quiz) {
        self.dispatch(Action::StartQuiz {
            quiz: quiz.clone(),
            started_at: self.clock.now(),
        });
    }

    /// [`start_quiz`](Self::start_quiz) for a catalog entry.
    pub fn start_quiz_by_id(&mut self, quiz_id: &str) -> Result<()> {
        let quiz = self
            .state
            .quiz(quiz_id)
            .cloned()
            .ok_or_else(|| Error::QuizNotFound(quiz_id.to_string()))?;
        self.start_quiz(&quiz);
        Ok(())
    }

    /// Mark option `choice` as the pending answer for the current question.
    pub fn select_answer(&mut self, choice: u8) -> Result<()> {
        if usize::from(choice) >= OPTION_COUNT {
            return Err(Error::InvalidAnswer(i32::from(choice)));
        }
        self.running_session()?;
        self.dispatch(Action::SelectAnswer(choice));
        Ok(())
    }

    /// Write `answer` into the current question's slot without advancing.
    pub fn submit_answer(&mut self, answer: i32) -> Result<()> {
        check_answer(answer)?;
        self.running_session()?;
        self.dispatch(Action::SubmitAnswer(answer));
        Ok(())
    }

    /// Move past the current question.
    ///
    /// [`AdvanceReason::UserChoice`] submits the pending selection and fails
    /// with [`Error::NoSelection`] if there is none. [`AdvanceReason::Timeout`]
    /// submits the pending selection, or [`UNANSWERED`].
    ///
    /// Returns the attempt when this completed the quiz.
    pub fn advance(&mut self, reason: AdvanceReason) -> Result<Option<QuizAttempt>> {
        let selected = self.running_session()?.selected;
        let answer = match (reason, selected) {
            (_, Some(choice)) => i32::from(choice),
            (AdvanceReason::UserChoice, None) => return Err(Error::NoSelection),
            (AdvanceReason::Timeout, None) => UNANSWERED,
        };
        log::debug!("quizfold: advancing ({reason:?}) with answer {answer}");
        self.submit_and_advance(answer)
    }

    /// Record `answer` and move to the next question in one step.
    ///
    /// On the last question this completes the quiz instead, and returns the
    /// recorded attempt. With nobody logged in the final answer is still
    /// recorded and the countdown restarts, but no attempt is created.
    pub fn submit_and_advance(&mut self, answer: i32) -> Result<Option<QuizAttempt>> {
        check_answer(answer)?;
        let session = self.running_session()?;

        if !session.is_last_question() {
            let started_at = self.clock.now();
            self.dispatch(Action::Advance { answer, started_at });
            return Ok(None);
        }

        let mut answers = session.user_answers.clone();
        let index = session.current_question_index;
        if answers.len() <= index {
            answers.resize(index + 1, UNANSWERED);
        }
        answers[index] = answer;

        if self.state.current_user.is_none() {
            // Restarts the countdown so an expired timer does not fire again.
            let started_at = self.clock.now();
            self.dispatch(Action::Advance { answer, started_at });
            return Ok(None);
        }
        self.finish(answers)
    }

    /// Poll the countdown. If the current question's time is up, advance with
    /// [`AdvanceReason::Timeout`] and return true.
    ///
    /// Each question's countdown starts when it is shown, so a late tick
    /// expires at most the question that is current when it runs.
    pub fn tick(&mut self) -> Result<bool> {
        match self.remaining_seconds() {
            Some(0) => {
                self.advance(AdvanceReason::Timeout)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Seconds left on the current question, or `None` outside a running quiz.
    pub fn remaining_seconds(&self) -> Option<u64> {
        let session = self.running_session().ok()?;
        let elapsed = self.clock.now().saturating_sub(session.question_started_at);
        Some(self.question_seconds.saturating_sub(elapsed))
    }

    /// Score the running session, record the attempt and show the results.
    ///
    /// Returns `Ok(None)` and does nothing when no quiz is running (including
    /// one that already completed) or nobody is logged in.
    pub fn complete_quiz(&mut self) -> Result<Option<QuizAttempt>> {
        let Ok(session) = self.running_session() else {
            return Ok(None);
        };
        if self.state.current_user.is_none() {
            return Ok(None);
        }
        let answers = session.user_answers.clone();
        self.finish(answers)
    }

    /// Drop the session. Attempt history and the current view are kept.
    pub fn reset_quiz(&mut self) {
        self.dispatch(Action::ResetQuiz);
    }

    /// Start the current (usually just completed) quiz over.
    pub fn retake_quiz(&mut self) -> Result<()> {
        let quiz = self
            .state
            .current_quiz()
            .cloned()
            .ok_or(Error::NoActiveQuiz)?;
        self.reset_quiz();
        self.start_quiz(&quiz);
        Ok(())
    }

    // --- read models ---

    /// Statistics for the logged-in user.
    pub fn profile(&self) -> Option<ProfileStats<'_>> {
        let user = self.state.current_user.as_ref()?;
        Some(ProfileStats::for_user(&self.state, &user.id))
    }

    /// Review of the completed session.
    pub fn review(&self) -> Option<QuizReview<'_>> {
        QuizReview::of_session(&self.state)
    }

    pub fn totals(&self) -> SiteTotals {
        SiteTotals::of(&self.state)
    }

    fn running_session(&self) -> Result<&QuizSession> {
        match (&self.state.session, self.state.phase()) {
            (Some(session), Phase::InProgress) => Ok(session),
            _ => Err(Error::NoActiveQuiz),
        }
    }

    /// Build, persist and dispatch the attempt for the running session.
    fn finish(&mut self, answers: Vec<i32>) -> Result<Option<QuizAttempt>> {
        let (Some(user), Some(session)) = (&self.state.current_user, &self.state.session) else {
            return Ok(None);
        };

        let attempt = QuizAttempt {
            id: Uuid::new_v4().to_string(),
            quiz_id: session.quiz.id.clone(),
            user_id: user.id.clone(),
            score: session.quiz.score(&answers),
            answers,
            completed_at: self.clock.now(),
        };

        let mut attempts = self.state.quiz_attempts.clone();
        attempts.push(attempt.clone());
        self.store.set(ATTEMPTS_KEY, &attempts)?;
        log::info!(
            "quizfold: {} scored {}% on quiz {}",
            attempt.user_id,
            attempt.score,
            attempt.quiz_id
        );

        self.dispatch(Action::CompleteQuiz(attempt.clone()));
        Ok(Some(attempt))
    }
}

fn check_answer(answer: i32) -> Result<()> {
    if answer == UNANSWERED || (0..OPTION_COUNT as i32).contains(&answer) {
        Ok(())
    } else {
        Err(Error::InvalidAnswer(answer))
    }
}
