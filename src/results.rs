//! Scored review of a finished session.

use crate::model::{percentage, Question, Quiz, UNANSWERED};
use crate::state::AppState;
use std::fmt;

/// How one question was answered.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionReview<'a> {
    pub question: &'a Question,
    /// Chosen option, or [`UNANSWERED`].
    pub answer: i32,
    pub correct: bool,
}

impl QuestionReview<'_> {
    /// Text of the chosen option, if one was chosen.
    pub fn answer_text(&self) -> Option<&str> {
        usize::try_from(self.answer)
            .ok()
            .and_then(|i| self.question.options.get(i))
            .map(String::as_str)
    }

    pub fn correct_text(&self) -> &str {
        self.question
            .options
            .get(usize::from(self.question.correct_answer))
            .map_or("", String::as_str)
    }
}

/// Score band used for the results headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Performance {
    Outstanding,
    Excellent,
    Good,
    NotBad,
    KeepPracticing,
}

impl Performance {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Performance::Outstanding,
            80..=89 => Performance::Excellent,
            70..=79 => Performance::Good,
            60..=69 => Performance::NotBad,
            _ => Performance::KeepPracticing,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Performance::Outstanding => "Outstanding!",
            Performance::Excellent => "Excellent work!",
            Performance::Good => "Good job!",
            Performance::NotBad => "Not bad! Keep learning!",
            Performance::KeepPracticing => "Keep practicing! You'll improve!",
        }
    }
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Results screen contents for a quiz and the answers given.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizReview<'a> {
    pub quiz: &'a Quiz,
    pub questions: Vec<QuestionReview<'a>>,
    pub correct: usize,
    pub score: u8,
}

impl<'a> QuizReview<'a> {
    pub fn new(quiz: &'a Quiz, answers: &[i32]) -> Self {
        let questions: Vec<QuestionReview<'a>> = quiz
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let answer = answers.get(i).copied().unwrap_or(UNANSWERED);
                QuestionReview {
                    question: q,
                    answer,
                    correct: q.is_correct(answer),
                }
            })
            .collect();
        let correct = questions.iter().filter(|q| q.correct).count();
        QuizReview {
            quiz,
            score: percentage(correct, quiz.len()),
            questions,
            correct,
        }
    }

    /// Review of the session held in `state`, once it has completed.
    pub fn of_session(state: &'a AppState) -> Option<Self> {
        state
            .session
            .as_ref()
            .filter(|s| s.completed)
            .map(|s| QuizReview::new(&s.quiz, &s.user_answers))
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn performance(&self) -> Performance {
        Performance::from_score(self.score)
    }
}
