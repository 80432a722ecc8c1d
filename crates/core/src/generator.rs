//! Draws random addition questions for a grade.
//!
//! Randomness is injected through [`rand::Rng`] so callers can pass a seeded
//! generator and reproduce an exact question sequence in tests.

use rand::Rng;

use crate::model::{Grade, Question};

/// Draws one question for `grade` from the supplied randomness source.
///
/// Every addend is drawn independently and uniformly from the grade's digit
/// range, so repeated terms are possible.
pub fn generate<R: Rng + ?Sized>(grade: &Grade, rng: &mut R) -> Question {
    let (low, high) = term_bounds(grade.digits());
    let terms = (0..grade.terms())
        .map(|_| rng.random_range(low..=high))
        .collect();
    Question::new(terms)
}

/// Returns the inclusive addend range for a digit width.
///
/// Single-digit grades draw from `0..=9`; wider grades draw from the full
/// d-digit range `10^(d-1)..=10^d - 1`, so a leading zero never appears.
fn term_bounds(digits: u8) -> (u32, u32) {
    if digits <= 1 {
        (0, 9)
    } else {
        let base = 10_u32.pow(u32::from(digits) - 1);
        (base, base * 10 - 1)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
