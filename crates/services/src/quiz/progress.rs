/// Aggregated view of quiz progress, useful for a presentation shell header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based index of the question currently being served; `total + 1`
    /// once every question has been answered.
    pub question_index: u8,
    pub total: u8,
    pub answered: u8,
    pub remaining: u8,
    pub is_complete: bool,
}
