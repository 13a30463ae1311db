//! Answer and progress tracking for one quiz session.
//!
//! The session owns the mutable state a quiz front-end needs: which
//! questions were answered and how, the running score, per-specialty
//! breakdowns, and the current position. It assumes a single logical owner;
//! callers exposing it over a network serialize submissions per session.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::types::{Question, QuestionKey};

/// Questions kept when loading with the limit option enabled.
pub const SAMPLE_CAP: usize = 100;

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    NotLoaded,
    InProgress,
    Complete,
}

/// Navigation direction for [`QuizSession::navigate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Previous,
    Next,
}

/// Recorded outcome for one answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub selected: char,
    pub is_correct: bool,
}

/// Per-specialty running score. Always recomputable from the answer map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub correct: u32,
    pub total: u32,
}

/// Options applied when loading questions into a session.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Keep only questions whose specialty equals this value.
    pub specialty_filter: Option<String>,
    /// Randomly sample down to [`SAMPLE_CAP`] questions when the filtered
    /// set is larger.
    pub limit: bool,
}

/// Snapshot of a finished or in-flight session, for display or export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub quiz_name: String,
    pub score: u32,
    pub total_answered: u32,
    pub percentage: f64,
    pub categories: HashMap<String, CategoryScore>,
    pub generated_at: DateTime<Utc>,
}

/// Mutable quiz session state: `NotLoaded -> InProgress -> Complete`.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    questions: Vec<Question>,
    quiz_name: String,
    current: usize,
    score: u32,
    answered: HashMap<QuestionKey, AnswerRecord>,
    category_scores: HashMap<String, CategoryScore>,
    complete: bool,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load questions, applying the specialty filter and sample cap, then
    /// shuffle. All counters and answer state reset. Uses the thread-local
    /// RNG; tests use [`load_with_rng`](Self::load_with_rng).
    pub fn load(&mut self, questions: Vec<Question>, quiz_name: &str, options: &LoadOptions) {
        self.load_with_rng(questions, quiz_name, options, &mut rand::thread_rng());
    }

    /// [`load`](Self::load) with an explicit RNG.
    pub fn load_with_rng<R: Rng>(
        &mut self,
        questions: Vec<Question>,
        quiz_name: &str,
        options: &LoadOptions,
        rng: &mut R,
    ) {
        let mut questions: Vec<Question> = match &options.specialty_filter {
            Some(filter) => questions
                .into_iter()
                .filter(|q| q.specialty == *filter)
                .collect(),
            None => questions,
        };

        if options.limit && questions.len() > SAMPLE_CAP {
            questions.shuffle(rng);
            questions.truncate(SAMPLE_CAP);
        }
        questions.shuffle(rng);

        tracing::info!(
            quiz = quiz_name,
            questions = questions.len(),
            filter = options.specialty_filter.as_deref().unwrap_or("All"),
            "quiz loaded"
        );

        self.questions = questions;
        self.quiz_name = quiz_name.to_string();
        self.current = 0;
        self.score = 0;
        self.answered.clear();
        self.category_scores.clear();
        self.complete = false;
    }

    /// Clear everything back to `NotLoaded`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record an answer for the question at `index`.
    ///
    /// Refused for out-of-range indices, for unscorable questions (no
    /// answer key, or an answer key naming no option), and for questions
    /// already answered. Returns whether the selection was correct.
    pub fn submit_answer(&mut self, index: usize, selected: char) -> Result<bool, SessionError> {
        if self.questions.is_empty() {
            return Err(SessionError::NotLoaded);
        }
        let len = self.questions.len();
        let question = self
            .questions
            .get(index)
            .ok_or(SessionError::IndexOutOfRange { index, len })?;

        if !question.is_scorable() {
            return Err(SessionError::NotScorable {
                number: question.number.clone(),
            });
        }

        let key = question.key();
        if self.answered.contains_key(&key) {
            return Err(SessionError::AlreadyAnswered {
                number: question.number.clone(),
            });
        }

        // is_scorable guarantees the answer letter exists.
        let correct_letter = question.answer.expect("scorable question has an answer");
        let is_correct = selected == correct_letter;
        let specialty = question.specialty.clone();

        self.answered.insert(
            key,
            AnswerRecord {
                selected,
                is_correct,
            },
        );

        let bucket = self.category_scores.entry(specialty).or_default();
        bucket.total += 1;
        if is_correct {
            bucket.correct += 1;
            self.score += 1;
        }

        // Unscorable questions can never acquire answer state, so
        // completion is defined over the scorable ones.
        self.complete = self
            .questions
            .iter()
            .filter(|q| q.is_scorable())
            .all(|q| self.answered.contains_key(&q.key()));

        Ok(is_correct)
    }

    /// Move the current position one step. Returns `false` at either
    /// boundary; the position never wraps.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Next => {
                if self.current + 1 < self.questions.len() {
                    self.current += 1;
                    true
                } else {
                    false
                }
            }
            Direction::Previous => {
                if self.current > 0 {
                    self.current -= 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.questions.is_empty() {
            SessionStatus::NotLoaded
        } else if self.complete {
            SessionStatus::Complete
        } else {
            SessionStatus::InProgress
        }
    }

    /// Question at the current position, if any are loaded.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_answered(&self) -> u32 {
        self.answered.len() as u32
    }

    /// Recorded answer for a question, if it was answered.
    pub fn answer_for(&self, question: &Question) -> Option<&AnswerRecord> {
        self.answered.get(&question.key())
    }

    pub fn category_scores(&self) -> &HashMap<String, CategoryScore> {
        &self.category_scores
    }

    /// Percentage of answered questions that were correct.
    pub fn percentage(&self) -> f64 {
        let answered = self.total_answered();
        if answered == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(answered) * 100.0
    }

    /// Snapshot for display or export.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            quiz_name: self.quiz_name.clone(),
            score: self.score,
            total_answered: self.total_answered(),
            percentage: self.percentage(),
            categories: self.category_scores.clone(),
            generated_at: Utc::now(),
        }
    }
}
