mod action;
mod app;
pub mod auth;
pub mod catalog;
mod clock;
pub mod config;
mod error;
mod model;
pub mod profile;
pub mod results;
mod state;
pub mod store;

pub use action::{Action, AdvanceReason};
pub use app::{QuizApp, QuizAppBuilder};
pub use auth::RegistrationForm;
pub use catalog::{CatalogQuery, NewQuiz, QuestionDraft, QuizDraft};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, DEFAULT_QUESTION_SECONDS};
pub use error::{Error, Result, ValidationError};
pub use model::{Question, Quiz, QuizAttempt, User, OPTION_COUNT, UNANSWERED};
pub use profile::{ProfileStats, RecentAttempt, SiteTotals};
pub use results::{Performance, QuizReview};
pub use state::{reduce, AppState, Phase, QuizSession, ReduceFn, View};
pub use store::{FileStore, MemoryStore, Store, StoreExt};
