//! Round driving against a known secret
//!
//! Plays one full round: the engine guesses, the driver scores each guess
//! against the secret and feeds the result back, until the code is found
//! or the guess budget runs out.

use crate::core::{Code, Feedback};
use crate::solver::{CodeBreaker, EngineError, StrategyTag};
use rand::Rng;

/// Configuration for solving a secret
pub struct SolveConfig {
    pub secret: Code,
    pub max_guesses: usize,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(secret: Code) -> Self {
        Self {
            secret,
            max_guesses: 500,
        }
    }
}

/// Result of one round
pub struct SolveResult {
    pub success: bool,
    pub steps: Vec<GuessStep>,
    pub secret: Code,
}

/// A single attempt in the round
pub struct GuessStep {
    pub guess: Code,
    pub feedback: Feedback,
    pub strategy: StrategyTag,
    pub known_after: usize,
}

/// Solve a secret code with the given engine
///
/// The engine is reset first, so a single engine can be reused across
/// rounds.
///
/// # Errors
///
/// Returns `EngineError` if:
/// - The secret length does not match the engine's configuration
/// - The engine reports inconsistent feedback (a scoring defect)
pub fn solve_code<R: Rng>(
    config: &SolveConfig,
    engine: &mut CodeBreaker<R>,
) -> Result<SolveResult, EngineError> {
    let expected = engine.config().code_length();
    if config.secret.len() != expected {
        return Err(EngineError::LengthMismatch {
            expected,
            actual: config.secret.len(),
        });
    }

    engine.reset(engine.config());
    let mut steps = Vec::new();

    for _ in 0..config.max_guesses {
        let guess = engine.next_guess();
        let feedback = Feedback::score(&guess, &config.secret);
        engine.acknowledge(&guess, feedback)?;

        let strategy = engine
            .history()
            .last()
            .map_or(StrategyTag::Random, |record| record.strategy);
        steps.push(GuessStep {
            guess,
            feedback,
            strategy,
            known_after: engine.belief().known_count(),
        });

        if feedback.is_win() {
            return Ok(SolveResult {
                success: true,
                steps,
                secret: config.secret.clone(),
            });
        }
    }

    Ok(SolveResult {
        success: false,
        steps,
        secret: config.secret.clone(),
    })
}
