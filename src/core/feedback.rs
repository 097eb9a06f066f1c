//! Feedback calculation and representation
//!
//! Feedback compares a guess against the secret code and yields three
//! counts summing to the code length:
//! - `exact`: right symbol in the right position
//! - `misplaced`: right symbol in the wrong position
//! - `wrong`: symbol absent from the remaining code
//!
//! Misplaced symbols are counted via multiset intersection after exact
//! matches are removed: a code symbol can be consumed by at most one exact
//! or one misplaced match. This is the standard peg-counting rule, not
//! naive membership testing.

use super::Code;
use rustc_hash::FxHashMap;
use std::fmt;

/// Peg-count feedback for one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback {
    exact: usize,
    misplaced: usize,
    wrong: usize,
}

impl Feedback {
    /// Create feedback from raw counts
    ///
    /// Used by round drivers that compute feedback themselves; the engine
    /// only ever consumes feedback, it never fabricates it.
    #[inline]
    #[must_use]
    pub const fn new(exact: usize, misplaced: usize, wrong: usize) -> Self {
        Self {
            exact,
            misplaced,
            wrong,
        }
    }

    /// Score a guess against the secret code
    ///
    /// # Algorithm
    /// 1. First pass: count exact position matches and remove each matched
    ///    symbol from the secret's availability multiset
    /// 2. Second pass: count misplaced symbols against the remaining pool
    /// 3. `wrong` is whatever the code length leaves over
    ///
    /// # Panics
    /// Panics if `guess` and `secret` have different lengths; both always
    /// come from the same round configuration.
    ///
    /// # Examples
    /// ```
    /// use mastermind_breaker::core::{Alphabet, Code, Feedback};
    ///
    /// let alphabet = Alphabet::new(6);
    /// let secret = Code::parse("1122", 4, alphabet).unwrap();
    /// let guess = Code::parse("1212", 4, alphabet).unwrap();
    ///
    /// let feedback = Feedback::score(&guess, &secret);
    /// assert_eq!(feedback.exact(), 2);
    /// assert_eq!(feedback.misplaced(), 2);
    /// assert_eq!(feedback.wrong(), 0);
    /// ```
    #[must_use]
    pub fn score(guess: &Code, secret: &Code) -> Self {
        assert_eq!(
            guess.len(),
            secret.len(),
            "guess and secret must have the same length"
        );

        let length = secret.len();
        let mut available: FxHashMap<_, usize> = FxHashMap::default();
        let mut exact = 0;

        // First pass: exact matches, everything else feeds the pool
        for (guessed, actual) in guess.iter().zip(secret.iter()) {
            if guessed == actual {
                exact += 1;
            } else {
                *available.entry(actual).or_insert(0) += 1;
            }
        }

        // Second pass: misplaced symbols drain the remaining pool
        let mut misplaced = 0;
        for (guessed, actual) in guess.iter().zip(secret.iter()) {
            if guessed == actual {
                continue;
            }
            if let Some(count) = available.get_mut(&guessed)
                && *count > 0
            {
                misplaced += 1;
                *count -= 1;
            }
        }

        Self {
            exact,
            misplaced,
            wrong: length - exact - misplaced,
        }
    }

    /// Count of positions where guess and code symbols match
    #[inline]
    #[must_use]
    pub const fn exact(self) -> usize {
        self.exact
    }

    /// Count of guessed symbols present elsewhere in the code
    #[inline]
    #[must_use]
    pub const fn misplaced(self) -> usize {
        self.misplaced
    }

    /// Count of guessed symbols absent from the remaining code
    #[inline]
    #[must_use]
    pub const fn wrong(self) -> usize {
        self.wrong
    }

    /// Check if every position matched
    #[inline]
    #[must_use]
    pub const fn is_win(self) -> bool {
        self.misplaced == 0 && self.wrong == 0
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exact: {}, misplaced: {}, wrong: {}",
            self.exact, self.misplaced, self.wrong
        )
    }
}
