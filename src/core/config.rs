//! Round configuration
//!
//! The code length and alphabet are inputs, not constants: every round is
//! parameterized by a validated `RoundConfig`.

use super::{Alphabet, Code, Symbol};
use rand::Rng;
use std::fmt;

/// Error type for rejected configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Code length must be at least 1
    ZeroCodeLength,
    /// Alphabet must contain at least one symbol
    EmptyAlphabet,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCodeLength => write!(f, "Invalid configuration: code length must be > 0"),
            Self::EmptyAlphabet => write!(f, "Invalid configuration: alphabet must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validated parameters of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    code_length: usize,
    alphabet: Alphabet,
}

impl RoundConfig {
    /// Create a round configuration
    ///
    /// # Errors
    /// Returns `ConfigError` if the code length is zero or the alphabet is
    /// empty.
    ///
    /// # Examples
    /// ```
    /// use mastermind_breaker::core::{Alphabet, RoundConfig};
    ///
    /// let config = RoundConfig::new(4, Alphabet::new(6)).unwrap();
    /// assert_eq!(config.code_length(), 4);
    ///
    /// assert!(RoundConfig::new(0, Alphabet::new(6)).is_err());
    /// assert!(RoundConfig::new(4, Alphabet::new(0)).is_err());
    /// ```
    pub const fn new(code_length: usize, alphabet: Alphabet) -> Result<Self, ConfigError> {
        if code_length == 0 {
            return Err(ConfigError::ZeroCodeLength);
        }
        if alphabet.size() == 0 {
            return Err(ConfigError::EmptyAlphabet);
        }
        Ok(Self {
            code_length,
            alphabet,
        })
    }

    /// Number of positions in a code
    #[inline]
    #[must_use]
    pub const fn code_length(self) -> usize {
        self.code_length
    }

    /// The symbol alphabet
    #[inline]
    #[must_use]
    pub const fn alphabet(self) -> Alphabet {
        self.alphabet
    }

    /// Generate a uniformly random code
    ///
    /// Each position is sampled independently from the full alphabet.
    pub fn random_code<R: Rng>(self, rng: &mut R) -> Code {
        let symbols = (0..self.code_length)
            .map(|_| Symbol::new(rng.random_range(1..=self.alphabet.size())))
            .collect();
        Code::from_symbols(symbols)
    }
}
