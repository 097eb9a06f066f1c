//! Guessing tactics
//!
//! Each guess the engine makes is produced by one of a closed set of
//! tactics. The tag travels with the guess so that the next feedback can be
//! interpreted in light of how the guess was constructed; a single-symbol
//! edit in particular turns the following feedback into a hard deduction.

use std::fmt;

/// The tactic that produced a guess
///
/// `ChangeOneDigitFailure` never produces a guess directly: it overwrites
/// the current tag after an uninformative single-symbol edit, which forces
/// the next selection round into semi-random sampling instead of another
/// blind edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyTag {
    /// One symbol per slot from the full alphabet
    Random,

    /// One symbol per slot from that slot's possibility set, known slots
    /// pinned to their confirmed symbol
    SemiRandom,

    /// The previous guess with exactly one unknown slot replaced
    ChangeOneDigit {
        /// The slot that was edited
        index: usize,
    },

    /// A permutation of the previous guess, used once every guessed symbol
    /// is known to occur in the code
    Rearrange,

    /// Marker left behind by an edit whose feedback confirmed or excluded
    /// symbols without pointing at a better next edit
    ChangeOneDigitFailure,
}

impl StrategyTag {
    /// Check whether this tag marks a failed single-symbol edit
    #[inline]
    #[must_use]
    pub const fn is_failed_edit(self) -> bool {
        matches!(self, Self::ChangeOneDigitFailure)
    }
}

impl fmt::Display for StrategyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::SemiRandom => write!(f, "semi-random"),
            Self::ChangeOneDigit { index } => write!(f, "change one digit at index {index}"),
            Self::Rearrange => write!(f, "rearrange"),
            Self::ChangeOneDigitFailure => write!(f, "change one digit (failed)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(StrategyTag::Random.to_string(), "random");
        assert_eq!(StrategyTag::SemiRandom.to_string(), "semi-random");
        assert_eq!(
            StrategyTag::ChangeOneDigit { index: 2 }.to_string(),
            "change one digit at index 2"
        );
        assert_eq!(StrategyTag::Rearrange.to_string(), "rearrange");
        assert_eq!(
            StrategyTag::ChangeOneDigitFailure.to_string(),
            "change one digit (failed)"
        );
    }

    #[test]
    fn failed_edit_marker() {
        assert!(StrategyTag::ChangeOneDigitFailure.is_failed_edit());
        assert!(!StrategyTag::Random.is_failed_edit());
        assert!(!StrategyTag::ChangeOneDigit { index: 0 }.is_failed_edit());
    }
}
