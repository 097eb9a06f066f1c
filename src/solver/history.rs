//! Round memory
//!
//! Every attempt is recorded as an immutable `GuessRecord`. The history is
//! append-only, ordered by attempt number, and lives for exactly one round.

use super::StrategyTag;
use crate::core::{Code, Feedback};
use std::fmt;

/// One attempt: the guess, the feedback it earned, and the tactic that
/// produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    /// 1-based attempt number
    pub attempt: usize,
    pub guess: Code,
    pub feedback: Feedback,
    pub strategy: StrategyTag,
}

impl fmt::Display for GuessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Guess {}: {} [{}] {}",
            self.attempt, self.guess, self.strategy, self.feedback
        )
    }
}

/// Append-only record of the current round's attempts
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<GuessRecord>,
}

impl History {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record; attempts arrive in order
    pub fn push(&mut self, record: GuessRecord) {
        self.records.push(record);
    }

    /// Forget everything; called at round boundaries
    pub fn clear(&mut self) {
        self.records.clear();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&GuessRecord> {
        self.records.last()
    }

    /// The second-to-last record
    #[inline]
    #[must_use]
    pub fn previous(&self) -> Option<&GuessRecord> {
        self.records.len().checked_sub(2).map(|i| &self.records[i])
    }

    /// Check whether an identical guess was already made this round
    #[must_use]
    pub fn contains_guess(&self, guess: &Code) -> bool {
        self.records.iter().any(|record| record.guess == *guess)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GuessRecord> {
        self.records.iter()
    }
}
