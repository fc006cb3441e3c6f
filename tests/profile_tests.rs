mod common;

use common::{create, logged_in_app};
use quizfold::profile::UNKNOWN_QUIZ;
use quizfold::{Performance, ProfileStats, SiteTotals, UNANSWERED};

#[test]
fn test_profile_counts_only_own_records() {
    let (mut app, _clock) = logged_in_app();
    let mine = create(&mut app, "Mine", &[0, 1]);
    app.start_quiz(&mine);
    app.submit_and_advance(0).unwrap();
    app.submit_and_advance(1).unwrap();

    app.logout();
    app.register("bob", "bob@x.com", "secret1").unwrap();
    create(&mut app, "Bob's", &[0, 0, 0]);
    app.start_quiz(&mine);
    app.submit_and_advance(3).unwrap();
    app.submit_and_advance(3).unwrap();

    let bob = app.profile().unwrap();
    assert_eq!(bob.quiz_count(), 1);
    assert_eq!(bob.attempt_count(), 1);
    assert_eq!(bob.average_score, 0);
    assert_eq!(bob.questions_created, 3);

    app.login("alice", "");
    let alice = app.profile().unwrap();
    assert_eq!(alice.quiz_count(), 1);
    assert_eq!(alice.attempt_count(), 1);
    assert_eq!(alice.average_score, 100);
    assert_eq!(alice.questions_created, 2);
}

#[test]
fn test_average_score_rounds() {
    let (mut app, _clock) = logged_in_app();
    let quiz = create(&mut app, "Trio", &[0, 1, 2]);

    // 67 then 0: mean 33.5 rounds to 34.
    for answers in [[0, 1, 0], [3, 3, 3]] {
        app.start_quiz(&quiz);
        for a in answers {
            app.submit_and_advance(a).unwrap();
        }
    }

    assert_eq!(app.profile().unwrap().average_score, 34);
}

#[test]
fn test_no_attempts_averages_zero() {
    let (app, _clock) = logged_in_app();
    let stats = app.profile().unwrap();
    assert_eq!(stats.average_score, 0);
    assert!(stats.recent.is_empty());
}

#[test]
fn test_profile_requires_login() {
    let (mut app, _clock) = logged_in_app();
    app.logout();
    assert!(app.profile().is_none());
}

#[test]
fn test_recent_attempts_newest_first_and_capped() {
    let (mut app, clock) = logged_in_app();
    let quiz = create(&mut app, "One", &[0]);

    for _ in 0..7 {
        clock.advance(1);
        app.start_quiz(&quiz);
        app.submit_and_advance(0).unwrap();
    }

    let stats = app.profile().unwrap();
    assert_eq!(stats.attempt_count(), 7);
    assert_eq!(stats.recent.len(), 5);
    let times: Vec<u64> = stats
        .recent
        .iter()
        .map(|r| r.attempt.completed_at)
        .collect();
    let mut sorted = times.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(times, sorted);
    assert_eq!(stats.recent[0].attempt.id, app.state().quiz_attempts[6].id);
}

#[test]
fn test_recent_attempt_of_deleted_quiz_is_unknown() {
    let (mut app, _clock) = logged_in_app();
    let quiz = create(&mut app, "Doomed", &[0]);
    app.start_quiz(&quiz);
    app.submit_and_advance(0).unwrap();
    let owner = app.current_user().unwrap().id.clone();
    app.delete_quiz(&quiz.id, &owner).unwrap();

    let stats = ProfileStats::for_user(app.state(), &owner);
    assert_eq!(stats.recent.len(), 1);
    assert!(stats.recent[0].quiz.is_none());
    assert_eq!(stats.recent[0].title(), UNKNOWN_QUIZ);
}

#[test]
fn test_site_totals() {
    let (mut app, _clock) = logged_in_app();
    let quiz = create(&mut app, "A", &[0, 1]);
    create(&mut app, "B", &[0, 1, 2]);
    app.start_quiz(&quiz);
    app.submit_and_advance(0).unwrap();
    app.submit_and_advance(0).unwrap();

    assert_eq!(
        app.totals(),
        SiteTotals {
            quizzes: 2,
            questions: 5,
            attempts: 1,
        }
    );
}

#[test]
fn test_review_of_completed_session() {
    let (mut app, clock) = logged_in_app();
    let quiz = create(&mut app, "Review", &[0, 1, 2]);
    app.start_quiz(&quiz);
    assert!(app.review().is_none(), "no review while in progress");

    app.submit_and_advance(0).unwrap();
    app.submit_and_advance(2).unwrap();
    clock.advance(30);
    app.tick().unwrap();

    let review = app.review().unwrap();
    assert_eq!(review.total(), 3);
    assert_eq!(review.correct, 1);
    assert_eq!(review.score, 33);
    assert_eq!(review.performance(), Performance::KeepPracticing);

    let q = &review.questions;
    assert!(q[0].correct);
    assert_eq!(q[0].answer_text(), Some("a"));
    assert!(!q[1].correct);
    assert_eq!(q[1].answer_text(), Some("c"));
    assert_eq!(q[1].correct_text(), "b");
    assert_eq!(q[2].answer, UNANSWERED);
    assert_eq!(q[2].answer_text(), None);

    // The review score agrees with the recorded attempt.
    assert_eq!(app.state().quiz_attempts[0].score, review.score);
}

#[test]
fn test_performance_bands() {
    assert_eq!(Performance::from_score(100), Performance::Outstanding);
    assert_eq!(Performance::from_score(90), Performance::Outstanding);
    assert_eq!(Performance::from_score(89), Performance::Excellent);
    assert_eq!(Performance::from_score(70), Performance::Good);
    assert_eq!(Performance::from_score(60), Performance::NotBad);
    assert_eq!(Performance::from_score(59), Performance::KeepPracticing);
    assert_eq!(Performance::from_score(0), Performance::KeepPracticing);
}
