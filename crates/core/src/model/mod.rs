mod answer;
mod catalog;
mod grade;
mod ids;
mod question;
mod result;

pub use ids::{ParseIdError, SessionId};

pub use answer::AnswerRecord;
pub use catalog::GradeCatalog;
pub use grade::{Grade, GradeError};
pub use question::Question;
pub use result::{PASS_MARK, QUESTIONS_PER_SESSION, QuizResult, QuizResultError};
