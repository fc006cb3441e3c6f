mod common;

use common::{app_with_clock, create, draft, logged_in_app, START};
use quizfold::catalog::{self, can_delete, categories, ALL_CATEGORIES, CATEGORIES};
use quizfold::store::QUIZZES_KEY;
use quizfold::{
    CatalogQuery, Error, QuestionDraft, Quiz, QuizDraft, StoreExt, ValidationError, View,
};

#[test]
fn test_create_quiz_stamps_owner_and_navigates() {
    let (mut app, clock) = logged_in_app();
    clock.advance(60);

    let quiz = create(&mut app, "Capitals", &[0, 1, 2]);

    let owner = app.current_user().unwrap();
    assert_eq!(quiz.created_by, owner.id);
    assert_eq!(quiz.created_at, START + 60);
    assert_eq!(quiz.len(), 3);
    assert_eq!(app.state().quizzes, vec![quiz]);
    assert_eq!(app.state().current_view, View::QuizList);
}

#[test]
fn test_create_quiz_logged_out_is_noop() {
    let (mut app, _clock) = app_with_clock();
    let before = app.state().clone();

    let created = app
        .create_quiz_from_draft(&draft("Capitals", "General", &[0]))
        .unwrap();

    assert!(created.is_none());
    assert_eq!(app.state(), &before);
}

#[test]
fn test_draft_drops_incomplete_questions_and_numbers_the_rest() {
    let d = QuizDraft {
        title: "  Space ".into(),
        description: " Planets and stars  ".into(),
        category: "Science".into(),
        questions: vec![
            QuestionDraft::new("Largest planet?", ["Jupiter", "Mars", "Venus", "Earth"], 0),
            QuestionDraft::new("Missing option", ["a", "", "c", "d"], 1),
            QuestionDraft::new("   ", ["a", "b", "c", "d"], 1),
            QuestionDraft::new("Closest star?", ["Vega", "Sun", "Sirius", "Rigel"], 1),
        ],
    };

    let quiz = d.validate().unwrap();
    assert_eq!(quiz.title(), "Space");
    assert_eq!(quiz.description(), "Planets and stars");
    let ids: Vec<_> = quiz.questions().iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, ["q1", "q2"]);
    assert_eq!(quiz.questions()[1].question, "Closest star?");
    assert_eq!(quiz.questions()[1].correct_answer, 1);
}

#[test]
fn test_create_quiz_takes_validated_content() {
    let (mut app, _clock) = logged_in_app();
    let content = draft("Rivers", "Geography", &[2, 1]).validate().unwrap();

    let quiz = app.create_quiz(content.clone()).unwrap().unwrap();

    assert_eq!(quiz.title, content.title());
    assert_eq!(quiz.category, content.category());
    assert_eq!(quiz.questions, content.questions());
    assert!(!quiz.is_empty());
}

#[test]
fn test_draft_requires_title_and_description() {
    let mut d = draft("x", "General", &[0]);
    d.title = "   ".into();
    assert_eq!(d.validate(), Err(ValidationError::MissingTitleOrDescription));

    let mut d = draft("x", "General", &[0]);
    d.description = String::new();
    assert_eq!(d.validate(), Err(ValidationError::MissingTitleOrDescription));
}

#[test]
fn test_draft_requires_a_complete_question() {
    let d = QuizDraft {
        title: "t".into(),
        description: "d".into(),
        ..QuizDraft::default()
    };
    assert_eq!(d.validate(), Err(ValidationError::NoCompleteQuestions));
}

#[test]
fn test_draft_rejects_out_of_range_answer() {
    let d = draft("t", "General", &[4]);
    assert_eq!(d.validate(), Err(ValidationError::CorrectAnswerOutOfRange(4)));
}

#[test]
fn test_default_draft_uses_general_category() {
    assert_eq!(QuizDraft::default().category, "General");
    assert!(CATEGORIES.contains(&"General"));
}

#[test]
fn test_search_matches_title_or_description_case_insensitively() {
    let (mut app, _clock) = logged_in_app();
    let rust = create(&mut app, "Rust Basics", &[0]);
    let mut d = draft("Ownership", "General", &[0]);
    d.description = "All about the RUST borrow checker".into();
    let ownership = app.create_quiz_from_draft(&d).unwrap().unwrap();
    create(&mut app, "Geography", &[0]);

    let found = app.search(&CatalogQuery::term("rust"));
    let ids: Vec<_> = found.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, [rust.id.as_str(), ownership.id.as_str()]);
}

#[test]
fn test_search_combines_term_and_category() {
    let (mut app, _clock) = logged_in_app();
    app.create_quiz_from_draft(&draft("Cells", "Science", &[0]))
        .unwrap();
    app.create_quiz_from_draft(&draft("Cell phones", "Technology", &[0]))
        .unwrap();
    app.create_quiz_from_draft(&draft("Atoms", "Science", &[0]))
        .unwrap();

    let found = app.search(&CatalogQuery::new("cell", "Science"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Cells");

    let found = app.search(&CatalogQuery::new("", "Science"));
    assert_eq!(found.len(), 2);

    let found = app.search(&CatalogQuery::new("", ALL_CATEGORIES));
    assert_eq!(found.len(), 3);
}

#[test]
fn test_categories_lists_all_then_first_seen() {
    let (mut app, _clock) = logged_in_app();
    for (title, category) in [
        ("a", "Science"),
        ("b", "History"),
        ("c", "Science"),
        ("d", "Board Games"),
    ] {
        app.create_quiz_from_draft(&draft(title, category, &[0]))
            .unwrap();
    }
    assert_eq!(
        categories(&app.state().quizzes),
        ["All", "Science", "History", "Board Games"]
    );
}

#[test]
fn test_delete_by_owner_removes_from_catalog_and_store() {
    let (mut app, _clock) = logged_in_app();
    let quiz = create(&mut app, "Capitals", &[0, 1]);
    let other = create(&mut app, "Rivers", &[0]);
    let owner_id = app.current_user().unwrap().id.clone();

    app.delete_quiz(&quiz.id, &owner_id).unwrap();

    assert!(app.state().quiz(&quiz.id).is_none());
    assert!(app.search(&CatalogQuery::default()).iter().all(|q| q.id != quiz.id));
    assert_eq!(app.state().quizzes, vec![other.clone()]);

    let stored: Vec<Quiz> = app.store().get(QUIZZES_KEY, Vec::new()).unwrap();
    assert_eq!(stored, vec![other]);
}

#[test]
fn test_delete_by_non_owner_denied() {
    let (mut app, _clock) = logged_in_app();
    let quiz = create(&mut app, "Capitals", &[0]);
    app.logout();
    app.register("mallory", "m@x.com", "secret1").unwrap();
    let mallory = app.current_user().unwrap().clone();

    assert!(!can_delete(&quiz, Some(&mallory)));
    assert!(!can_delete(&quiz, None));

    let err = app.delete_quiz(&quiz.id, &mallory.id).unwrap_err();
    assert!(matches!(err, Error::PermissionDenied { .. }));
    assert_eq!(app.state().quizzes.len(), 1);
}

#[test]
fn test_delete_unknown_quiz() {
    let (mut app, _clock) = logged_in_app();
    let err = app.delete_quiz("nope", "anyone").unwrap_err();
    assert!(matches!(err, Error::QuizNotFound(id) if id == "nope"));
}

#[test]
fn test_delete_keeps_attempts() {
    let (mut app, _clock) = logged_in_app();
    let quiz = create(&mut app, "Capitals", &[0]);
    app.start_quiz(&quiz);
    let attempt = app.submit_and_advance(0).unwrap().unwrap();
    let owner_id = app.current_user().unwrap().id.clone();

    app.delete_quiz(&quiz.id, &owner_id).unwrap();

    assert_eq!(app.state().quiz_attempts, vec![attempt]);
    assert!(catalog::search(&app.state().quizzes, &CatalogQuery::default()).is_empty());
}
