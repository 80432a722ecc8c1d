use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use anzan_core::model::{
    AnswerRecord, Grade, QUESTIONS_PER_SESSION, Question, QuizResult,
};

/// One grade row for the selection menu.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
///
/// The transport may format the time limit (e.g. "4.5s") as needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeInfo {
    pub name: String,
    pub digits: u8,
    pub terms: u8,
    pub seconds: f64,
}

impl GradeInfo {
    #[must_use]
    pub fn from_grade(grade: &Grade) -> Self {
        Self {
            name: grade.name().to_string(),
            digits: grade.digits(),
            terms: grade.terms(),
            seconds: grade.seconds(),
        }
    }
}

/// The prompt for one question, with the expected sum withheld.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPrompt {
    pub terms: Vec<u32>,
    pub digits: u8,
    pub term_count: u8,
    pub seconds: f64,
    pub question_index: u8,
    pub total: u8,
}

impl QuestionPrompt {
    #[must_use]
    pub fn new(grade: &Grade, question: &Question, question_index: u8) -> Self {
        Self {
            terms: question.terms().to_vec(),
            digits: grade.digits(),
            term_count: grade.terms(),
            seconds: grade.seconds(),
            question_index,
            total: QUESTIONS_PER_SESSION,
        }
    }
}

/// Outcome of asking for the next question: either a prompt to serve, or the
/// signal to move on to the result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextQuestion {
    Ask(QuestionPrompt),
    Finished,
}

/// Per-question grading feedback, shown immediately after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub question_index: u8,
    pub total: u8,
    /// `None` when the submission arrived with no question pending.
    pub correct_answer: Option<i64>,
    pub user_answer: String,
    pub is_correct: bool,
}

impl AnswerFeedback {
    #[must_use]
    pub fn from_record(record: &AnswerRecord) -> Self {
        Self {
            question_index: record.question_index,
            total: QUESTIONS_PER_SESSION,
            correct_answer: record.correct_answer,
            user_answer: record.user_answer.clone(),
            is_correct: record.is_correct,
        }
    }
}

/// One row of the result page's answer table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerDetail {
    pub no: u8,
    pub user_answer: String,
    pub correct_answer: Option<i64>,
    pub is_correct: bool,
}

impl AnswerDetail {
    #[must_use]
    pub fn from_record(record: &AnswerRecord) -> Self {
        Self {
            no: record.question_index,
            user_answer: record.user_answer.clone(),
            correct_answer: record.correct_answer,
            is_correct: record.is_correct,
        }
    }
}

/// The final pass/fail report for a completed attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizReport {
    pub grade: String,
    pub correct_count: u8,
    pub total: u8,
    pub passed: bool,
    pub details: Vec<AnswerDetail>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl QuizReport {
    #[must_use]
    pub fn from_result(result: &QuizResult) -> Self {
        Self {
            grade: result.grade_name().to_string(),
            correct_count: result.correct_count(),
            total: result.total(),
            passed: result.passed(),
            details: result.records().iter().map(AnswerDetail::from_record).collect(),
            started_at: result.started_at(),
            completed_at: result.completed_at(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
