use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::answer::AnswerRecord;

/// Number of questions served in every session.
pub const QUESTIONS_PER_SESSION: u8 = 10;

/// Correct answers required to pass a grade attempt.
pub const PASS_MARK: u8 = 7;

//
// ─── ERRORS ─────────────────────────────────────────────────────────────────
//

/// Errors that can occur when building a quiz result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizResultError {
    #[error("expected {expected} answer records, got {got}")]
    WrongRecordCount { expected: u8, got: usize },
    #[error("completion time {completed_at} is before start time {started_at}")]
    InvalidTimeRange {
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
}

//
// ─── QUIZ RESULT ────────────────────────────────────────────────────────────
//

/// Scored outcome of one completed grade attempt.
///
/// The correct count is always recomputed from the answer records, so a
/// result can never disagree with its own history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    grade_name: String,
    correct_count: u8,
    passed: bool,
    records: Vec<AnswerRecord>,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizResult {
    /// Scores a full set of answer records into a pass/fail result.
    ///
    /// An attempt passes when at least [`PASS_MARK`] of its
    /// [`QUESTIONS_PER_SESSION`] answers are correct.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError::WrongRecordCount` unless exactly
    /// [`QUESTIONS_PER_SESSION`] records are supplied, and
    /// `QuizResultError::InvalidTimeRange` if `completed_at` precedes
    /// `started_at`.
    pub fn from_records(
        grade_name: impl Into<String>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        records: Vec<AnswerRecord>,
    ) -> Result<Self, QuizResultError> {
        if records.len() != usize::from(QUESTIONS_PER_SESSION) {
            return Err(QuizResultError::WrongRecordCount {
                expected: QUESTIONS_PER_SESSION,
                got: records.len(),
            });
        }
        if completed_at < started_at {
            return Err(QuizResultError::InvalidTimeRange {
                started_at,
                completed_at,
            });
        }

        let correct_count = records.iter().fold(0_u8, |count, record| {
            if record.is_correct {
                count.saturating_add(1)
            } else {
                count
            }
        });
        let passed = correct_count >= PASS_MARK;

        Ok(Self {
            grade_name: grade_name.into(),
            correct_count,
            passed,
            records,
            started_at,
            completed_at,
        })
    }

    /// Returns the name of the attempted grade.
    #[must_use]
    pub fn grade_name(&self) -> &str {
        &self.grade_name
    }

    /// Returns how many answers were correct.
    #[must_use]
    pub fn correct_count(&self) -> u8 {
        self.correct_count
    }

    /// Returns the number of questions that were served.
    #[must_use]
    pub fn total(&self) -> u8 {
        QUESTIONS_PER_SESSION
    }

    /// Returns true if the attempt reached the pass mark.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Returns the graded records in question order.
    #[must_use]
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    /// Returns when the session was started.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns when the tenth answer was submitted.
    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
