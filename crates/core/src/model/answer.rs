use serde::{Deserialize, Serialize};

use crate::model::question::Question;

/// Record of one graded submission within a session.
///
/// `correct_answer` is `None` when the submission arrived with no question
/// pending; such entries are kept in the history ungraded rather than
/// rejected, so the session still steps forward one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// 1-based position of the question within the session.
    pub question_index: u8,
    /// The expected sum, absent when nothing was pending.
    pub correct_answer: Option<i64>,
    /// What the player typed, trimmed of surrounding whitespace.
    pub user_answer: String,
    /// Whether the submission matched the expected sum.
    pub is_correct: bool,
}

impl AnswerRecord {
    /// Creates an answer record from already-graded parts.
    #[must_use]
    pub fn new(
        question_index: u8,
        correct_answer: Option<i64>,
        user_answer: impl Into<String>,
        is_correct: bool,
    ) -> Self {
        Self {
            question_index,
            correct_answer,
            user_answer: user_answer.into(),
            is_correct,
        }
    }

    /// Grades a raw submission against the question that was pending, if any.
    ///
    /// The raw text is trimmed, then parsed as a signed integer. Text that
    /// does not parse scores as incorrect instead of failing, and a missing
    /// pending question yields an ungraded record with `correct_answer`
    /// set to `None`.
    #[must_use]
    pub fn evaluate(question_index: u8, pending: Option<&Question>, raw: &str) -> Self {
        let user_answer = raw.trim().to_string();
        let submitted = user_answer.parse::<i64>().ok();
        let correct_answer = pending.map(Question::answer);
        let is_correct = match (submitted, correct_answer) {
            (Some(value), Some(expected)) => value == expected,
            _ => false,
        };
        Self {
            question_index,
            correct_answer,
            user_answer,
            is_correct,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new(vec![3, 7, 2, 9])
    }

    #[test]
    fn grades_matching_submission_as_correct() {
        let record = AnswerRecord::evaluate(1, Some(&question()), "21");
        assert_eq!(record.question_index, 1);
        assert_eq!(record.correct_answer, Some(21));
        assert_eq!(record.user_answer, "21");
        assert!(record.is_correct);
    }

    #[test]
    fn grades_wrong_sum_as_incorrect() {
        let record = AnswerRecord::evaluate(1, Some(&question()), "20");
        assert_eq!(record.correct_answer, Some(21));
        assert!(!record.is_correct);
    }

    #[test]
    fn trims_whitespace_before_parsing() {
        let record = AnswerRecord::evaluate(1, Some(&question()), "  21  ");
        assert_eq!(record.user_answer, "21");
        assert!(record.is_correct);
    }

    #[test]
    fn accepts_explicit_plus_sign() {
        let record = AnswerRecord::evaluate(1, Some(&question()), "+21");
        assert!(record.is_correct);
    }

    #[test]
    fn non_numeric_text_scores_as_incorrect() {
        let record = AnswerRecord::evaluate(1, Some(&question()), "abc");
        assert_eq!(record.user_answer, "abc");
        assert_eq!(record.correct_answer, Some(21));
        assert!(!record.is_correct);
    }

    #[test]
    fn empty_submission_scores_as_incorrect() {
        let record = AnswerRecord::evaluate(1, Some(&question()), "   ");
        assert_eq!(record.user_answer, "");
        assert!(!record.is_correct);
    }

    #[test]
    fn overflowing_number_scores_as_incorrect() {
        let record = AnswerRecord::evaluate(1, Some(&question()), "99999999999999999999");
        assert!(!record.is_correct);
    }

    #[test]
    fn missing_pending_question_yields_ungraded_record() {
        let record = AnswerRecord::evaluate(4, None, "21");
        assert_eq!(record.question_index, 4);
        assert_eq!(record.correct_answer, None);
        assert_eq!(record.user_answer, "21");
        assert!(!record.is_correct);
    }
}
