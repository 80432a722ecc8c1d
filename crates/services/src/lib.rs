#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;

pub use anzan_core::Clock;

pub use error::QuizError;
pub use quiz::{
    AnswerDetail, AnswerFeedback, GradeInfo, NextQuestion, QuestionPrompt, QuizFlowService,
    QuizProgress, QuizReport, QuizSession,
};
