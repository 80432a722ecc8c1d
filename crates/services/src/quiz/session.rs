use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;

use anzan_core::generator;
use anzan_core::model::{
    AnswerRecord, Grade, GradeCatalog, QUESTIONS_PER_SESSION, Question, QuizResult,
};
use storage::repository::SessionRecord;

use super::progress::QuizProgress;
use crate::error::QuizError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state for one ten-question grade attempt.
///
/// The session steps strictly forward: draw a question into the pending slot,
/// grade the submission against it, advance, repeat. After the tenth
/// submission only [`QuizSession::result`] is meaningful. All mutation goes
/// through `&mut self` methods so the bookkeeping invariants stay true by
/// construction: the history holds exactly `question_index - 1` records and
/// `correct_count` always matches the history.
pub struct QuizSession {
    grade: Grade,
    question_index: u8,
    correct_count: u8,
    history: Vec<AnswerRecord>,
    pending: Option<Question>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Begins a fresh attempt at the given grade.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    #[must_use]
    pub fn start(grade: Grade, started_at: DateTime<Utc>) -> Self {
        Self {
            grade,
            question_index: 1,
            correct_count: 0,
            history: Vec::new(),
            pending: None,
            started_at,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn grade(&self) -> &Grade {
        &self.grade
    }

    /// 1-based index of the question currently being served.
    ///
    /// Reaches `QUESTIONS_PER_SESSION + 1` once the attempt is complete.
    #[must_use]
    pub fn question_index(&self) -> u8 {
        self.question_index
    }

    #[must_use]
    pub fn correct_count(&self) -> u8 {
        self.correct_count
    }

    #[must_use]
    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    /// The question waiting for an answer, if one has been drawn.
    #[must_use]
    pub fn pending_question(&self) -> Option<&Question> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.question_index > QUESTIONS_PER_SESSION
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let answered = u8::try_from(self.history.len()).unwrap_or(QUESTIONS_PER_SESSION);
        QuizProgress {
            question_index: self.question_index,
            total: QUESTIONS_PER_SESSION,
            answered,
            remaining: QUESTIONS_PER_SESSION.saturating_sub(answered),
            is_complete: self.is_complete(),
        }
    }

    /// Draws a fresh question into the pending slot and returns it.
    ///
    /// Returns `None` once every question has been answered; the caller
    /// should move on to [`QuizSession::result`]. Drawing again before a
    /// submission replaces the pending question, so a refreshed question
    /// page serves a fresh problem.
    pub fn draw_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Question> {
        if self.is_complete() {
            return None;
        }
        let question = generator::generate(&self.grade, rng);
        self.pending = Some(question.clone());
        Some(question)
    }

    /// Grades a submission, records it, and advances the session.
    ///
    /// The raw text is trimmed and parsed as an integer; unparsable input
    /// scores as incorrect. A submission that arrives with nothing pending
    /// is recorded ungraded instead of rejected. `answered_at` stamps the
    /// completion time when this was the final submission.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` if all questions are already answered.
    pub fn submit_answer(
        &mut self,
        raw: &str,
        answered_at: DateTime<Utc>,
    ) -> Result<&AnswerRecord, QuizError> {
        if self.is_complete() {
            return Err(QuizError::Completed);
        }

        let record = AnswerRecord::evaluate(self.question_index, self.pending.as_ref(), raw);
        if record.is_correct {
            self.correct_count = self.correct_count.saturating_add(1);
        }
        self.history.push(record);
        self.pending = None;

        self.question_index += 1;
        if self.is_complete() {
            self.completed_at = Some(answered_at);
        }

        self.history.last().ok_or(QuizError::Completed)
    }

    /// Scores the completed attempt.
    ///
    /// Read-only: calling this repeatedly yields the same result.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Incomplete` while questions remain unanswered.
    pub fn result(&self) -> Result<QuizResult, QuizError> {
        let completed_at = self.completed_at.ok_or(QuizError::Incomplete)?;
        Ok(QuizResult::from_records(
            self.grade.name(),
            self.started_at,
            completed_at,
            self.history.clone(),
        )?)
    }

    /// Snapshots the session into its storage shape.
    #[must_use]
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            grade_name: self.grade.name().to_string(),
            question_index: self.question_index,
            correct_count: self.correct_count,
            history: self.history.clone(),
            pending_terms: self.pending.as_ref().map(|q| q.terms().to_vec()),
            pending_answer: self.pending.as_ref().map(Question::answer),
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }

    /// Rehydrates a session from its storage shape.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownGrade` if the record names a grade that is
    /// no longer in the catalog, and `QuizError::InvalidState` if the
    /// record's bookkeeping does not add up.
    pub fn from_record(record: SessionRecord, catalog: &GradeCatalog) -> Result<Self, QuizError> {
        let grade = catalog
            .get(&record.grade_name)
            .cloned()
            .ok_or_else(|| QuizError::UnknownGrade {
                name: record.grade_name.clone(),
            })?;

        if record.question_index == 0 || record.question_index > QUESTIONS_PER_SESSION + 1 {
            return Err(QuizError::InvalidState(format!(
                "question index {} out of range",
                record.question_index
            )));
        }
        if record.history.len() != usize::from(record.question_index - 1) {
            return Err(QuizError::InvalidState(format!(
                "history holds {} records but question index is {}",
                record.history.len(),
                record.question_index
            )));
        }
        let graded_correct = record
            .history
            .iter()
            .filter(|answer| answer.is_correct)
            .count();
        if graded_correct != usize::from(record.correct_count) {
            return Err(QuizError::InvalidState(format!(
                "correct count {} does not match history ({graded_correct} correct)",
                record.correct_count
            )));
        }

        let pending = match (record.pending_terms, record.pending_answer) {
            (Some(terms), Some(answer)) => {
                let question = Question::new(terms);
                if question.answer() != answer {
                    return Err(QuizError::InvalidState(
                        "pending answer does not match pending terms".to_string(),
                    ));
                }
                Some(question)
            }
            (None, None) => None,
            _ => {
                return Err(QuizError::InvalidState(
                    "pending question is only half present".to_string(),
                ));
            }
        };

        let complete = record.question_index > QUESTIONS_PER_SESSION;
        if complete != record.completed_at.is_some() {
            return Err(QuizError::InvalidState(
                "completion timestamp does not match question index".to_string(),
            ));
        }
        if complete && pending.is_some() {
            return Err(QuizError::InvalidState(
                "completed session still has a pending question".to_string(),
            ));
        }

        Ok(Self {
            grade,
            question_index: record.question_index,
            correct_count: record.correct_count,
            history: record.history,
            pending,
            started_at: record.started_at,
            completed_at: record.completed_at,
        })
    }
}

impl fmt::Debug for QuizSession {
    // The pending answer is deliberately left out of the debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("grade", &self.grade.name())
            .field("question_index", &self.question_index)
            .field("correct_count", &self.correct_count)
            .field("history_len", &self.history.len())
            .field("has_pending", &self.pending.is_some())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
