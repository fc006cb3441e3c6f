#![allow(dead_code)]

use quizfold::{
    ManualClock, MemoryStore, QuestionDraft, Question, Quiz, QuizApp, QuizDraft, Store,
};

pub const START: u64 = 1_700_000_000;

pub fn app_with_clock() -> (QuizApp<MemoryStore>, ManualClock) {
    app_on(MemoryStore::new())
}

pub fn app_on<S: Store>(store: S) -> (QuizApp<S>, ManualClock) {
    let clock = ManualClock::new(START);
    let app = QuizApp::builder(store)
        .clock(clock.clone())
        .open()
        .unwrap();
    (app, clock)
}

/// An app with `alice` registered and logged in.
pub fn logged_in_app() -> (QuizApp<MemoryStore>, ManualClock) {
    let (mut app, clock) = app_with_clock();
    assert!(app.register("alice", "alice@x.com", "secret1").unwrap());
    (app, clock)
}

pub fn draft(title: &str, category: &str, correct: &[u8]) -> QuizDraft {
    QuizDraft {
        title: title.to_string(),
        description: format!("{title} description"),
        category: category.to_string(),
        questions: correct
            .iter()
            .enumerate()
            .map(|(i, c)| QuestionDraft::new(format!("question {i}"), ["a", "b", "c", "d"], *c))
            .collect(),
    }
}

/// Create a quiz as the current user and return it.
pub fn create(app: &mut QuizApp<MemoryStore>, title: &str, correct: &[u8]) -> Quiz {
    app.create_quiz_from_draft(&draft(title, "General", correct))
        .unwrap()
        .expect("a user is logged in")
}

pub fn loose_quiz(id: &str, correct: &[u8]) -> Quiz {
    Quiz {
        id: id.to_string(),
        title: format!("quiz {id}"),
        description: "loose".to_string(),
        category: "General".to_string(),
        questions: correct
            .iter()
            .enumerate()
            .map(|(i, c)| Question {
                id: format!("q{}", i + 1),
                question: format!("question {i}"),
                options: ["a".into(), "b".into(), "c".into(), "d".into()],
                correct_answer: *c,
            })
            .collect(),
        created_by: "someone".to_string(),
        created_at: START,
    }
}
