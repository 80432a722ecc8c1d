use std::sync::Arc;

use chrono::{DateTime, Utc};

use anzan_core::model::{Grade, GradeCatalog, SessionId};
use storage::repository::{InMemorySessionStore, SessionRepository};

use super::session::QuizSession;
use super::view::{AnswerFeedback, GradeInfo, NextQuestion, QuestionPrompt, QuizReport};
use crate::Clock;
use crate::error::QuizError;

/// Orchestrates the quiz operations a transport exposes.
///
/// Owns the time source, the shared grade catalog and the session store, so
/// the transport never touches repositories or clocks directly. Every
/// operation is one load-step-commit round trip against the store; requests
/// for the same session are expected to arrive one at a time.
#[derive(Clone)]
pub struct QuizFlowService {
    clock: Clock,
    catalog: Arc<GradeCatalog>,
    sessions: Arc<dyn SessionRepository>,
}

impl QuizFlowService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<GradeCatalog>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            sessions,
        }
    }

    /// Flow over the built-in grade ladder and an in-memory store.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(
            clock,
            Arc::new(GradeCatalog::standard()),
            Arc::new(InMemorySessionStore::new()),
        )
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn catalog(&self) -> &GradeCatalog {
        &self.catalog
    }

    /// Grade rows for the selection menu, in ladder order.
    #[must_use]
    pub fn grades(&self) -> Vec<GradeInfo> {
        self.catalog.iter().map(GradeInfo::from_grade).collect()
    }

    /// Begins a fresh session for the named grade, replacing any session the
    /// caller already had.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownGrade` for names outside the catalog and
    /// `QuizError::Storage` if the fresh state cannot be persisted.
    pub async fn start(&self, session_id: SessionId, grade_name: &str) -> Result<(), QuizError> {
        let grade = self.lookup(grade_name)?;
        let session = QuizSession::start(grade, self.clock.now());
        self.sessions.save(session_id, &session.to_record()).await?;
        Ok(())
    }

    /// Draws the next question, or signals that the attempt is ready to
    /// score.
    ///
    /// The drawn question becomes the session's pending question and the
    /// returned prompt never carries the expected sum. Asking again before
    /// submitting replaces the pending question with a fresh draw.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownGrade` for names outside the catalog,
    /// `QuizError::NotStarted` when the caller has no session, and
    /// `QuizError::Storage`/`QuizError::InvalidState` for backend trouble.
    pub async fn next_question(
        &self,
        session_id: SessionId,
        grade_name: &str,
    ) -> Result<NextQuestion, QuizError> {
        self.lookup(grade_name)?;
        let mut session = self.load(session_id).await?;

        // Scoped so the thread-local rng is gone before the await below,
        // keeping the returned future Send.
        let drawn = {
            let mut rng = rand::rng();
            session.draw_question(&mut rng)
        };
        let Some(question) = drawn else {
            return Ok(NextQuestion::Finished);
        };
        let prompt = QuestionPrompt::new(session.grade(), &question, session.question_index());
        self.sessions.save(session_id, &session.to_record()).await?;
        Ok(NextQuestion::Ask(prompt))
    }

    /// Grades one submission, advances the session, and reports feedback.
    ///
    /// The session is mutated in memory first and committed afterwards, so a
    /// failed save leaves the stored attempt unchanged.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` once all ten questions are answered,
    /// plus the same lookup and storage errors as
    /// [`QuizFlowService::next_question`].
    pub async fn submit_answer(
        &self,
        session_id: SessionId,
        grade_name: &str,
        raw_answer: &str,
    ) -> Result<AnswerFeedback, QuizError> {
        self.lookup(grade_name)?;
        let mut session = self.load(session_id).await?;

        let record = session.submit_answer(raw_answer, self.clock.now())?;
        let feedback = AnswerFeedback::from_record(record);
        self.sessions.save(session_id, &session.to_record()).await?;
        Ok(feedback)
    }

    /// Scores a finished attempt into its report.
    ///
    /// Read-only: the stored session is left as-is, so the report can be
    /// requested any number of times.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Incomplete` while questions remain unanswered,
    /// plus the same lookup and storage errors as
    /// [`QuizFlowService::next_question`].
    pub async fn finalize(
        &self,
        session_id: SessionId,
        grade_name: &str,
    ) -> Result<QuizReport, QuizError> {
        self.lookup(grade_name)?;
        let session = self.load(session_id).await?;
        let result = session.result()?;
        Ok(QuizReport::from_result(&result))
    }

    /// Drops the caller's session, whatever state it is in.
    ///
    /// Succeeds even when no session exists, so an abort button never
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the backend fails.
    pub async fn abort(&self, session_id: SessionId) -> Result<(), QuizError> {
        self.sessions.clear(session_id).await?;
        Ok(())
    }

    fn lookup(&self, grade_name: &str) -> Result<Grade, QuizError> {
        self.catalog
            .get(grade_name)
            .cloned()
            .ok_or_else(|| QuizError::UnknownGrade {
                name: grade_name.to_string(),
            })
    }

    async fn load(&self, session_id: SessionId) -> Result<QuizSession, QuizError> {
        let record = self
            .sessions
            .load(session_id)
            .await?
            .ok_or(QuizError::NotStarted)?;
        QuizSession::from_record(record, &self.catalog)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use anzan_core::time::{fixed_clock, fixed_now};

    fn fixed_flow() -> QuizFlowService {
        QuizFlowService::in_memory(fixed_clock())
    }

    async fn ask(flow: &QuizFlowService, id: SessionId, grade: &str) -> QuestionPrompt {
        match flow.next_question(id, grade).await.unwrap() {
            NextQuestion::Ask(prompt) => prompt,
            NextQuestion::Finished => panic!("expected another question"),
        }
    }

    fn sum_of(prompt: &QuestionPrompt) -> i64 {
        prompt.terms.iter().map(|&term| i64::from(term)).sum()
    }

    #[test]
    fn grade_menu_lists_the_ladder_in_order() {
        let flow = fixed_flow();
        let grades = flow.grades();

        assert_eq!(grades.len(), 20);
        assert_eq!(grades[0].name, "10級");
        assert_eq!(grades[19].name, "十段");
        assert!((grades[0].seconds - 4.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn start_rejects_unknown_grades() {
        let flow = fixed_flow();
        let err = flow.start(SessionId::new(), "12級").await.unwrap_err();
        assert!(matches!(err, QuizError::UnknownGrade { name } if name == "12級"));
    }

    #[tokio::test]
    async fn operations_without_a_session_report_not_started() {
        let flow = fixed_flow();
        let id = SessionId::new();

        let err = flow.next_question(id, "10級").await.unwrap_err();
        assert!(matches!(err, QuizError::NotStarted));

        let err = flow.submit_answer(id, "10級", "5").await.unwrap_err();
        assert!(matches!(err, QuizError::NotStarted));

        let err = flow.finalize(id, "10級").await.unwrap_err();
        assert!(matches!(err, QuizError::NotStarted));
    }

    #[tokio::test]
    async fn unknown_grade_wins_over_missing_session() {
        let flow = fixed_flow();
        let err = flow
            .next_question(SessionId::new(), "999級")
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::UnknownGrade { .. }));
    }

    #[tokio::test]
    async fn prompt_reflects_the_started_grade() {
        let flow = fixed_flow();
        let id = SessionId::new();
        flow.start(id, "6級").await.unwrap();

        let prompt = ask(&flow, id, "6級").await;
        assert_eq!(prompt.question_index, 1);
        assert_eq!(prompt.total, 10);
        assert_eq!(prompt.digits, 2);
        assert_eq!(prompt.term_count, 3);
        assert_eq!(prompt.terms.len(), 3);
        assert!(prompt.terms.iter().all(|&term| (10..=99).contains(&term)));
    }

    #[tokio::test]
    async fn submitting_the_prompted_sum_scores_correct() {
        let flow = fixed_flow();
        let id = SessionId::new();
        flow.start(id, "10級").await.unwrap();

        let prompt = ask(&flow, id, "10級").await;
        let feedback = flow
            .submit_answer(id, "10級", &sum_of(&prompt).to_string())
            .await
            .unwrap();

        assert!(feedback.is_correct);
        assert_eq!(feedback.question_index, 1);
        assert_eq!(feedback.correct_answer, Some(sum_of(&prompt)));
    }

    #[tokio::test]
    async fn submission_without_a_pending_question_is_ungraded() {
        let flow = fixed_flow();
        let id = SessionId::new();
        flow.start(id, "10級").await.unwrap();

        let feedback = flow.submit_answer(id, "10級", " 31 ").await.unwrap();
        assert_eq!(feedback.correct_answer, None);
        assert_eq!(feedback.user_answer, "31");
        assert!(!feedback.is_correct);

        // the ungraded slot still consumed question one
        let prompt = ask(&flow, id, "10級").await;
        assert_eq!(prompt.question_index, 2);
    }

    #[tokio::test]
    async fn restarting_resets_an_attempt_in_progress() {
        let flow = fixed_flow();
        let id = SessionId::new();

        flow.start(id, "10級").await.unwrap();
        let prompt = ask(&flow, id, "10級").await;
        flow.submit_answer(id, "10級", &sum_of(&prompt).to_string())
            .await
            .unwrap();

        flow.start(id, "9級").await.unwrap();
        let prompt = ask(&flow, id, "9級").await;
        assert_eq!(prompt.question_index, 1);
        assert_eq!(prompt.term_count, 6);
    }

    #[tokio::test]
    async fn finished_attempt_signals_finished_and_reports() {
        let flow = fixed_flow();
        let id = SessionId::new();
        flow.start(id, "10級").await.unwrap();

        for _ in 0..10 {
            let prompt = ask(&flow, id, "10級").await;
            flow.submit_answer(id, "10級", &sum_of(&prompt).to_string())
                .await
                .unwrap();
        }

        assert!(matches!(
            flow.next_question(id, "10級").await.unwrap(),
            NextQuestion::Finished
        ));

        let report = flow.finalize(id, "10級").await.unwrap();
        assert_eq!(report.correct_count, 10);
        assert!(report.passed);
        assert_eq!(report.started_at, fixed_now());
        assert_eq!(report.completed_at, fixed_now());

        // scoring is read-only
        let again = flow.finalize(id, "10級").await.unwrap();
        assert_eq!(again, report);
    }

    #[tokio::test]
    async fn eleventh_submission_is_rejected() {
        let flow = fixed_flow();
        let id = SessionId::new();
        flow.start(id, "10級").await.unwrap();

        for _ in 0..10 {
            ask(&flow, id, "10級").await;
            flow.submit_answer(id, "10級", "0").await.unwrap();
        }

        let err = flow.submit_answer(id, "10級", "0").await.unwrap_err();
        assert!(matches!(err, QuizError::Completed));
    }

    #[tokio::test]
    async fn finalize_before_completion_is_incomplete() {
        let flow = fixed_flow();
        let id = SessionId::new();
        flow.start(id, "10級").await.unwrap();

        let err = flow.finalize(id, "10級").await.unwrap_err();
        assert!(matches!(err, QuizError::Incomplete));
    }

    #[tokio::test]
    async fn abort_clears_the_session_and_never_fails() {
        let flow = fixed_flow();
        let id = SessionId::new();

        // aborting with no session is fine
        flow.abort(id).await.unwrap();

        flow.start(id, "10級").await.unwrap();
        ask(&flow, id, "10級").await;
        flow.abort(id).await.unwrap();

        let err = flow.next_question(id, "10級").await.unwrap_err();
        assert!(matches!(err, QuizError::NotStarted));

        // a fresh start after an abort begins at question one
        flow.start(id, "10級").await.unwrap();
        let prompt = ask(&flow, id, "10級").await;
        assert_eq!(prompt.question_index, 1);
    }

    #[tokio::test]
    async fn session_grade_stays_authoritative_for_prompts() {
        let flow = fixed_flow();
        let id = SessionId::new();
        flow.start(id, "十段").await.unwrap();

        // the route narrows to a different (existing) grade; prompts keep
        // following the grade the session was started with
        let prompt = ask(&flow, id, "10級").await;
        assert_eq!(prompt.digits, 3);
        assert_eq!(prompt.term_count, 15);
    }
}
