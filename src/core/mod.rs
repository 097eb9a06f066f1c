//! Core domain types for Mastermind
//!
//! This module contains the fundamental domain types with zero knowledge of
//! guessing tactics. All types here are pure, testable, and have clear
//! mathematical properties.

mod code;
mod config;
mod feedback;

pub use code::{Alphabet, Code, CodeError, Symbol};
pub use config::{ConfigError, RoundConfig};
pub use feedback::Feedback;
