/// A single addition problem: a list of addends and their exact sum.
///
/// The sum is computed once at construction so grading never re-derives it.
/// Prompts shown to the player carry the terms only; the answer stays on the
/// serving side until the submission has been graded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    terms: Vec<u32>,
    answer: i64,
}

impl Question {
    /// Creates a question from its addends.
    #[must_use]
    pub fn new(terms: Vec<u32>) -> Self {
        let answer = terms.iter().map(|&term| i64::from(term)).sum();
        Self { terms, answer }
    }

    /// Returns the addends in presentation order.
    #[must_use]
    pub fn terms(&self) -> &[u32] {
        &self.terms
    }

    /// Returns the exact sum of the addends.
    #[must_use]
    pub fn answer(&self) -> i64 {
        self.answer
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
