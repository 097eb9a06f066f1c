//! Mastermind Breaker
//!
//! A deduction engine for the classic Mastermind code-breaking game. The
//! engine maintains a per-position belief state about the hidden code and
//! switches between guessing tactics based on the feedback each guess earns.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mastermind_breaker::core::{Alphabet, Code, Feedback, RoundConfig};
//! use mastermind_breaker::solver::CodeBreaker;
//!
//! // Four positions, digits 1 through 6
//! let config = RoundConfig::new(4, Alphabet::new(6)).unwrap();
//! let secret = Code::parse("4152", 4, config.alphabet()).unwrap();
//!
//! let mut engine = CodeBreaker::new(config);
//! while !engine.is_solved() {
//!     let guess = engine.next_guess();
//!     let feedback = Feedback::score(&guess, &secret);
//!     engine.acknowledge(&guess, feedback).unwrap();
//! }
//! assert_eq!(engine.solved_code(), Some(secret));
//! ```

// Core domain types
pub mod core;

// The deduction engine
pub mod solver;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
