use thiserror::Error;

//
// ─── ERRORS ─────────────────────────────────────────────────────────────────
//

/// Errors that can occur when building grades or a grade catalog.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum GradeError {
    #[error("grade name cannot be empty")]
    EmptyName,
    #[error("digit width must be between 1 and 3, got {0}")]
    InvalidDigits(u8),
    #[error("term count must be between 3 and 15, got {0}")]
    InvalidTerms(u8),
    #[error("time limit must be positive and finite, got {0}")]
    InvalidSeconds(f64),
    #[error("duplicate grade name: {0}")]
    DuplicateName(String),
}

//
// ─── GRADE ──────────────────────────────────────────────────────────────────
//

/// One difficulty tier on the mental-arithmetic grading ladder.
///
/// A grade fixes how wide each addend is, how many addends a question
/// carries, and how many seconds the player is given per question.
#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    name: String,
    digits: u8,
    terms: u8,
    seconds: f64,
}

impl Grade {
    /// Creates a grade after validating its parameters.
    ///
    /// The name is trimmed before it is stored.
    ///
    /// # Errors
    ///
    /// Returns `GradeError::EmptyName` if the name is blank,
    /// `GradeError::InvalidDigits` if the digit width is outside `1..=3`,
    /// `GradeError::InvalidTerms` if the term count is outside `3..=15`, or
    /// `GradeError::InvalidSeconds` if the time limit is not a positive
    /// finite number.
    pub fn new(
        name: impl Into<String>,
        digits: u8,
        terms: u8,
        seconds: f64,
    ) -> Result<Self, GradeError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(GradeError::EmptyName);
        }
        if !(1..=3).contains(&digits) {
            return Err(GradeError::InvalidDigits(digits));
        }
        if !(3..=15).contains(&terms) {
            return Err(GradeError::InvalidTerms(terms));
        }
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(GradeError::InvalidSeconds(seconds));
        }
        Ok(Self {
            name,
            digits,
            terms,
            seconds,
        })
    }

    /// Returns the display name, e.g. `"10級"` or `"初段"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the digit width of every addend in this grade's questions.
    #[must_use]
    pub fn digits(&self) -> u8 {
        self.digits
    }

    /// Returns how many addends each question carries.
    #[must_use]
    pub fn terms(&self) -> u8 {
        self.terms
    }

    /// Returns the per-question time limit in seconds.
    #[must_use]
    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
