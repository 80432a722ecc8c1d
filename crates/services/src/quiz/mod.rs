mod flow;
mod progress;
mod session;
mod view;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use flow::QuizFlowService;
pub use progress::QuizProgress;
pub use session::QuizSession;
pub use view::{AnswerDetail, AnswerFeedback, GradeInfo, NextQuestion, QuestionPrompt, QuizReport};
