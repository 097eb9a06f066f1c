//! The code-breaking engine
//!
//! `CodeBreaker` produces successive guesses and digests the feedback each
//! one earns, narrowing a per-position belief state until the hidden code
//! is fully determined. It performs no I/O of its own: the round driver
//! scores guesses and hands the feedback back via [`CodeBreaker::acknowledge`].
//!
//! Tactic selection runs in strict priority order:
//! 1. every position confirmed: guess the deduced code
//! 2. no history yet: fully random guess
//! 3. last feedback had zero wrong symbols: rearrange the last guess
//! 4. last single-symbol edit failed, or too much of the last guess was
//!    wrong: semi-random sampling from the possibility sets
//! 5. otherwise: change exactly one digit of the last guess, so the next
//!    feedback delta pins down what that digit did

use super::{BeliefState, GuessRecord, History, StrategyTag};
use crate::core::{Code, Feedback, RoundConfig, Symbol};
use log::{debug, warn};
use rand::prelude::{IndexedRandom, SliceRandom};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Attempt bound for the duplicate-guess and rearrange-consistency loops
///
/// Exhausting it is not an error: the engine falls back to an
/// unconstrained semi-random guess to guarantee progress.
pub const RETRY_BOUND: usize = 1000;

/// Error type for engine failures
///
/// Every variant signals a defect in the surrounding driver or in the
/// engine itself, never a normal game situation; none of them is
/// recoverable within the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A guess does not match the configured code length
    LengthMismatch { expected: usize, actual: usize },
    /// A single-symbol edit moved the exact count by more than one
    InconsistentFeedback { index: usize, delta: isize },
    /// A single-symbol edit was recorded without a predecessor guess
    MissingPredecessor { index: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => {
                write!(f, "Guess has {actual} symbols, expected {expected}")
            }
            Self::InconsistentFeedback { index, delta } => write!(
                f,
                "Feedback for a single-symbol edit at index {index} moved the exact count by {delta}"
            ),
            Self::MissingPredecessor { index } => write!(
                f,
                "A single-symbol edit at index {index} has no predecessor guess"
            ),
        }
    }
}

impl std::error::Error for EngineError {}

/// Deduction engine for one code-breaking round
///
/// The RNG is injected so that rounds can be replayed deterministically in
/// tests; production callers use [`CodeBreaker::new`], which seeds from the
/// operating system.
pub struct CodeBreaker<R: Rng = StdRng> {
    config: RoundConfig,
    belief: BeliefState,
    history: History,
    last_strategy: Option<StrategyTag>,
    rng: R,
}

impl CodeBreaker<StdRng> {
    /// Create an engine with an OS-seeded RNG
    #[must_use]
    pub fn new(config: RoundConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl<R: Rng> CodeBreaker<R> {
    /// Create an engine with an injected RNG
    pub fn with_rng(config: RoundConfig, rng: R) -> Self {
        Self {
            config,
            belief: BeliefState::new(config),
            history: History::new(),
            last_strategy: None,
            rng,
        }
    }

    /// Start a new round: all memory of previous guesses is discarded
    pub fn reset(&mut self, config: RoundConfig) {
        self.config = config;
        self.belief = BeliefState::new(config);
        self.history.clear();
        self.last_strategy = None;
    }

    /// The active round configuration
    #[inline]
    #[must_use]
    pub const fn config(&self) -> RoundConfig {
        self.config
    }

    /// Current belief state about the hidden code
    #[inline]
    #[must_use]
    pub const fn belief(&self) -> &BeliefState {
        &self.belief
    }

    /// This round's guess records, in attempt order
    #[inline]
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// The tactic of the most recent guess (possibly rewritten by analysis)
    #[inline]
    #[must_use]
    pub const fn last_strategy(&self) -> Option<StrategyTag> {
        self.last_strategy
    }

    /// True iff every position of the code has been confirmed
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.belief.is_solved()
    }

    /// The deduced code, once [`CodeBreaker::is_solved`] is true
    #[must_use]
    pub fn solved_code(&self) -> Option<Code> {
        self.belief.known_code()
    }

    /// Produce the next guess
    ///
    /// Never returns a guess identical to one already made this round,
    /// except after `RETRY_BOUND` failed attempts to find a fresh one; the
    /// fallback guess is then unconstrained semi-random so the round always
    /// makes progress.
    pub fn next_guess(&mut self) -> Code {
        if let Some(code) = self.belief.known_code() {
            // Every slot is pinned, so the sets are all singletons and
            // semi-random sampling would return exactly this code.
            self.last_strategy = Some(StrategyTag::SemiRandom);
            return code;
        }

        for _ in 0..RETRY_BOUND {
            let (code, strategy) = self.propose_guess();
            if !self.history.contains_guess(&code) {
                self.last_strategy = Some(strategy);
                return code;
            }
        }

        warn!(
            "no unseen guess within {RETRY_BOUND} attempts ({} known of {}); \
             falling back to semi-random",
            self.belief.known_count(),
            self.config.code_length()
        );
        let code = self.semi_random_guess();
        self.last_strategy = Some(StrategyTag::SemiRandom);
        code
    }

    /// Digest the feedback for a guess
    ///
    /// Records the attempt, harvests whole-code knowledge (`wrong == L`
    /// proves every guessed symbol absent), interprets the feedback in
    /// light of the tactic that produced the guess, and promotes any
    /// possibility set that shrank to a single candidate.
    ///
    /// # Errors
    /// Returns `EngineError` if the guess length does not match the
    /// configuration, or if the feedback contradicts a single-symbol edit;
    /// the latter means the driver's scoring is broken and the round
    /// cannot continue.
    pub fn acknowledge(&mut self, guess: &Code, feedback: Feedback) -> Result<(), EngineError> {
        let length = self.config.code_length();
        if guess.len() != length {
            return Err(EngineError::LengthMismatch {
                expected: length,
                actual: guess.len(),
            });
        }

        let strategy = self.last_strategy.unwrap_or(StrategyTag::Random);
        self.history.push(GuessRecord {
            attempt: self.history.len() + 1,
            guess: guess.clone(),
            feedback,
            strategy,
        });

        if feedback.wrong() == length {
            debug!("every symbol of {guess} is absent from the code");
            self.belief.mark_useless(guess);
        }

        self.analyse_last_guess(strategy)?;
        self.belief.promote_singletons();

        if feedback.exact() == length {
            self.belief.collapse_to_code(guess);
        }
        Ok(())
    }

    /// Extract a deduction from the guess that was just acknowledged
    fn analyse_last_guess(&mut self, strategy: StrategyTag) -> Result<(), EngineError> {
        match strategy {
            StrategyTag::Random
            | StrategyTag::SemiRandom
            | StrategyTag::Rearrange
            | StrategyTag::ChangeOneDigitFailure => Ok(()),
            StrategyTag::ChangeOneDigit { index } => self.evaluate_single_edit(index),
        }
    }

    /// Interpret the feedback delta of a single-symbol edit
    ///
    /// The two most recent guesses differ only at `index`, so the change
    /// in the exact count isolates that position completely.
    fn evaluate_single_edit(&mut self, index: usize) -> Result<(), EngineError> {
        let (current, previous) = match (self.history.last(), self.history.previous()) {
            (Some(current), Some(previous)) => (current, previous),
            _ => return Err(EngineError::MissingPredecessor { index }),
        };

        let delta = current.feedback.exact() as isize - previous.feedback.exact() as isize;
        let new_symbol = current.guess.symbol_at(index);
        let old_symbol = previous.guess.symbol_at(index);

        match delta {
            1 => {
                debug!("digit {new_symbol} confirmed at index {index}");
                self.belief.confirm(index, new_symbol);
            }
            -1 => {
                debug!("previous digit {old_symbol} confirmed at index {index}");
                self.belief.confirm(index, old_symbol);
                self.last_strategy = Some(StrategyTag::ChangeOneDigitFailure);
            }
            0 => {
                debug!("digits {old_symbol} and {new_symbol} excluded at index {index}");
                self.belief.eliminate(index, new_symbol);
                self.belief.eliminate(index, old_symbol);
                self.last_strategy = Some(StrategyTag::ChangeOneDigitFailure);
            }
            delta => return Err(EngineError::InconsistentFeedback { index, delta }),
        }
        Ok(())
    }

    /// Pick a tactic and construct a candidate guess
    fn propose_guess(&mut self) -> (Code, StrategyTag) {
        let Some(last) = self.history.last() else {
            return (self.config.random_code(&mut self.rng), StrategyTag::Random);
        };
        let last_feedback = last.feedback;
        let last_guess = last.guess.clone();

        if last_feedback.wrong() == 0 {
            return self.rearrange_guess(&last_guess);
        }

        let failed_edit = self.last_strategy.is_some_and(StrategyTag::is_failed_edit);
        if failed_edit || last_feedback.wrong() >= self.config.code_length() / 2 {
            return (self.semi_random_guess(), StrategyTag::SemiRandom);
        }

        self.change_one_digit_guess(&last_guess)
    }

    /// One symbol per slot from its possibility set, known slots pinned
    fn semi_random_guess(&mut self) -> Code {
        let length = self.config.code_length();
        let mut symbols = Vec::with_capacity(length);
        for position in 0..length {
            let symbol = match self.belief.known()[position] {
                Some(symbol) => symbol,
                None => self.belief.possibility(position).sample(&mut self.rng),
            };
            symbols.push(symbol);
        }
        Code::from_symbols(symbols)
    }

    /// Permute the last guess: known digits stay put, the rest shuffle
    /// into the unknown slots
    ///
    /// Every symbol of the last guess occurs somewhere in the code (its
    /// feedback had zero wrong), so only the arrangement is in question.
    fn rearrange_guess(&mut self, last_guess: &Code) -> (Code, StrategyTag) {
        let length = self.config.code_length();

        for _ in 0..RETRY_BOUND {
            let mut loose: Vec<Symbol> = last_guess
                .iter()
                .enumerate()
                .filter(|&(position, symbol)| self.belief.known()[position] != Some(symbol))
                .map(|(_, symbol)| symbol)
                .collect();
            loose.shuffle(&mut self.rng);

            let mut symbols = Vec::with_capacity(length);
            for position in 0..length {
                match self.belief.known()[position] {
                    Some(symbol) => symbols.push(symbol),
                    None => {
                        // Each unknown slot contributed one loose symbol
                        let Some(symbol) = loose.pop() else { break };
                        symbols.push(symbol);
                    }
                }
            }
            if symbols.len() < length {
                continue;
            }

            let candidate = Code::from_symbols(symbols);
            if self.belief.allows(&candidate) {
                return (candidate, StrategyTag::Rearrange);
            }
        }

        warn!("no consistent rearrangement within {RETRY_BOUND} attempts; falling back to semi-random");
        (self.semi_random_guess(), StrategyTag::SemiRandom)
    }

    /// Copy the last guess with exactly one unknown slot replaced
    fn change_one_digit_guess(&mut self, last_guess: &Code) -> (Code, StrategyTag) {
        let unknown_positions: Vec<usize> = (0..self.config.code_length())
            .filter(|&position| self.belief.known()[position].is_none())
            .collect();

        let Some(&index) = unknown_positions.choose(&mut self.rng) else {
            // Fully solved states never reach this tactic
            return (self.semi_random_guess(), StrategyTag::SemiRandom);
        };

        let current = last_guess.symbol_at(index);
        let alternatives: Vec<Symbol> = self
            .belief
            .possibility(index)
            .iter()
            .filter(|&symbol| symbol != current)
            .collect();

        // A slot with a single candidate keeps its value; the duplicate
        // check upstream discards the unchanged guess.
        let replacement = alternatives
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(current);

        let mut symbols = last_guess.symbols().to_vec();
        symbols[index] = replacement;
        (
            Code::from_symbols(symbols),
            StrategyTag::ChangeOneDigit { index },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Alphabet;
    use std::collections::HashSet;

    fn config(code_length: usize, alphabet_size: u8) -> RoundConfig {
        RoundConfig::new(code_length, Alphabet::new(alphabet_size)).unwrap()
    }

    fn engine(seed: u64) -> CodeBreaker<StdRng> {
        CodeBreaker::with_rng(config(4, 6), StdRng::seed_from_u64(seed))
    }

    fn code(s: &str) -> Code {
        Code::parse(s, s.len(), Alphabet::new(6)).unwrap()
    }

    /// Play a full round against a known secret; returns the attempt count
    fn drive_round<R: Rng>(engine: &mut CodeBreaker<R>, secret: &Code, cap: usize) -> usize {
        for attempt in 1..=cap {
            let guess = engine.next_guess();
            let feedback = Feedback::score(&guess, secret);
            engine.acknowledge(&guess, feedback).unwrap();
            if feedback.exact() == secret.len() {
                return attempt;
            }
        }
        panic!("round not solved within {cap} attempts (secret {secret})");
    }

    #[test]
    fn first_guess_uses_random_tactic() {
        let mut engine = engine(11);
        let guess = engine.next_guess();

        assert_eq!(guess.len(), 4);
        assert!(guess.iter().all(|s| Alphabet::new(6).contains(s)));

        engine
            .acknowledge(&guess, Feedback::new(0, 2, 2))
            .unwrap();
        assert_eq!(engine.history().last().unwrap().strategy, StrategyTag::Random);
    }

    #[test]
    fn solves_a_fixed_secret() {
        let secret = code("1234");
        let mut engine = engine(1);

        drive_round(&mut engine, &secret, 500);

        assert!(engine.is_solved());
        assert_eq!(engine.solved_code(), Some(secret));
    }

    #[test]
    fn winning_feedback_collapses_belief() {
        let mut engine = engine(2);
        let guess = code("1234");

        engine.acknowledge(&guess, Feedback::new(4, 0, 0)).unwrap();

        assert!(engine.is_solved());
        assert_eq!(engine.solved_code(), Some(guess.clone()));
        assert_eq!(engine.next_guess(), guess);
    }

    #[test]
    fn all_wrong_feedback_marks_symbols_useless() {
        let mut engine = engine(3);
        engine
            .acknowledge(&code("1234"), Feedback::new(0, 0, 4))
            .unwrap();

        let belief = engine.belief();
        for value in 1..=4 {
            assert!(belief.useless().contains(&Symbol::new(value)));
        }
        for position in 0..4 {
            let set = belief.possibility(position);
            assert_eq!(set.len(), 2);
            assert!(set.contains(Symbol::new(5)));
            assert!(set.contains(Symbol::new(6)));
        }
    }

    #[test]
    fn useless_pruning_never_empties_a_slot() {
        let mut engine = engine(4);
        engine
            .acknowledge(&code("1234"), Feedback::new(0, 0, 4))
            .unwrap();
        engine
            .acknowledge(&code("5566"), Feedback::new(0, 0, 4))
            .unwrap();

        // Contradictory feedback declared all six symbols absent; the
        // guard keeps one candidate per slot
        for position in 0..4 {
            assert_eq!(engine.belief().possibility(position).len(), 1);
        }
    }

    #[test]
    fn single_edit_gain_confirms_new_symbol() {
        let mut engine = engine(5);
        engine
            .acknowledge(&code("1111"), Feedback::new(1, 0, 3))
            .unwrap();

        engine.last_strategy = Some(StrategyTag::ChangeOneDigit { index: 2 });
        engine
            .acknowledge(&code("1121"), Feedback::new(2, 0, 2))
            .unwrap();

        assert_eq!(engine.belief().known()[2], Some(Symbol::new(2)));
        assert_eq!(
            engine.belief().possibility(2).sole_candidate(),
            Some(Symbol::new(2))
        );
    }

    #[test]
    fn single_edit_loss_confirms_old_symbol() {
        let mut engine = engine(6);
        engine
            .acknowledge(&code("3333"), Feedback::new(2, 0, 2))
            .unwrap();

        engine.last_strategy = Some(StrategyTag::ChangeOneDigit { index: 1 });
        engine
            .acknowledge(&code("3433"), Feedback::new(1, 0, 3))
            .unwrap();

        assert_eq!(engine.belief().known()[1], Some(Symbol::new(3)));
        assert_eq!(engine.last_strategy(), Some(StrategyTag::ChangeOneDigitFailure));
    }

    #[test]
    fn single_edit_without_change_excludes_both() {
        let mut engine = engine(7);
        engine
            .acknowledge(&code("2222"), Feedback::new(1, 0, 3))
            .unwrap();

        engine.last_strategy = Some(StrategyTag::ChangeOneDigit { index: 0 });
        engine
            .acknowledge(&code("5222"), Feedback::new(1, 0, 3))
            .unwrap();

        let set = engine.belief().possibility(0);
        assert!(!set.contains(Symbol::new(2)));
        assert!(!set.contains(Symbol::new(5)));
        assert_eq!(engine.last_strategy(), Some(StrategyTag::ChangeOneDigitFailure));
    }

    #[test]
    fn inconsistent_edit_delta_is_fatal() {
        let mut engine = engine(8);
        engine
            .acknowledge(&code("1111"), Feedback::new(0, 0, 4))
            .unwrap();

        engine.last_strategy = Some(StrategyTag::ChangeOneDigit { index: 0 });
        let result = engine.acknowledge(&code("2111"), Feedback::new(2, 0, 2));

        assert_eq!(
            result,
            Err(EngineError::InconsistentFeedback { index: 0, delta: 2 })
        );
    }

    #[test]
    fn single_edit_without_predecessor_is_fatal() {
        let mut engine = engine(9);
        engine.last_strategy = Some(StrategyTag::ChangeOneDigit { index: 0 });

        let result = engine.acknowledge(&code("1234"), Feedback::new(1, 0, 3));
        assert_eq!(result, Err(EngineError::MissingPredecessor { index: 0 }));
    }

    #[test]
    fn wrong_length_guess_is_rejected() {
        let mut engine = engine(10);
        let short = Code::parse("123", 3, Alphabet::new(6)).unwrap();

        assert_eq!(
            engine.acknowledge(&short, Feedback::new(0, 0, 3)),
            Err(EngineError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn no_guess_repeats_within_a_round() {
        let secret = code("6543");
        let mut engine = engine(12);
        drive_round(&mut engine, &secret, 500);

        let mut seen = HashSet::new();
        for record in engine.history().iter() {
            assert!(
                seen.insert(record.guess.clone()),
                "guess {} repeated at attempt {}",
                record.guess,
                record.attempt
            );
        }
    }

    #[test]
    fn zero_wrong_feedback_switches_to_rearranging() {
        let secret = code("4321");
        let mut engine = engine(13);

        // Driver-fed opening guess holding all the right symbols
        let opening = code("1234");
        engine
            .acknowledge(&opening, Feedback::score(&opening, &secret))
            .unwrap();

        for attempt in 0..40 {
            let guess = engine.next_guess();

            // Rearrangements reuse exactly the symbols of the last guess
            let mut expected: Vec<u8> = vec![1, 2, 3, 4];
            let mut actual: Vec<u8> = guess.iter().map(Symbol::value).collect();
            expected.sort_unstable();
            actual.sort_unstable();
            assert_eq!(actual, expected);
            assert_eq!(engine.last_strategy(), Some(StrategyTag::Rearrange));

            let feedback = Feedback::score(&guess, &secret);
            engine.acknowledge(&guess, feedback).unwrap();
            if feedback.exact() == 4 {
                assert!(engine.is_solved());
                return;
            }
            assert_eq!(feedback.wrong(), 0, "attempt {attempt} lost a symbol");
        }
        panic!("rearranging failed to find the permutation");
    }

    #[test]
    fn confirmed_positions_stay_in_every_guess() {
        let secret = code("2615");
        let mut engine = engine(14);

        for _ in 0..500 {
            let guess = engine.next_guess();
            let confirmed: Vec<(usize, Symbol)> = engine
                .belief()
                .known()
                .iter()
                .enumerate()
                .filter_map(|(position, slot)| slot.map(|s| (position, s)))
                .collect();
            for (position, symbol) in confirmed {
                assert_eq!(guess.symbol_at(position), symbol);
            }

            let feedback = Feedback::score(&guess, &secret);
            engine.acknowledge(&guess, feedback).unwrap();
            if feedback.exact() == 4 {
                return;
            }
        }
        panic!("round not solved");
    }

    #[test]
    fn known_digits_always_match_singleton_possibilities() {
        for seed in 0..20 {
            let mut engine = engine(seed);
            let secret = config(4, 6).random_code(&mut StdRng::seed_from_u64(seed + 1000));

            for _ in 0..500 {
                let guess = engine.next_guess();
                let feedback = Feedback::score(&guess, &secret);
                engine.acknowledge(&guess, feedback).unwrap();

                let belief = engine.belief();
                for (position, slot) in belief.known().iter().enumerate() {
                    if let Some(symbol) = slot {
                        assert_eq!(
                            belief.possibility(position).sole_candidate(),
                            Some(*symbol)
                        );
                    }
                }

                if feedback.exact() == 4 {
                    break;
                }
            }
            assert!(engine.is_solved(), "seed {seed} did not solve");
        }
    }

    #[test]
    fn reset_clears_all_round_state() {
        let secret = code("1234");
        let mut engine = engine(15);
        drive_round(&mut engine, &secret, 500);

        engine.reset(config(4, 6));

        assert!(engine.history().is_empty());
        assert!(!engine.is_solved());
        assert_eq!(engine.last_strategy(), None);
        assert_eq!(engine.belief().known_count(), 0);
    }

    #[test]
    fn terminates_across_code_lengths() {
        // Statistical regression: alphabet 6, lengths 3 through 6, many
        // randomized secrets, every round must finish within the cap
        let mut secret_rng = StdRng::seed_from_u64(20_260_807);

        for code_length in 3..=6 {
            let config = config(code_length, 6);
            for round in 0..250_u64 {
                let secret = config.random_code(&mut secret_rng);
                let mut engine =
                    CodeBreaker::with_rng(config, StdRng::seed_from_u64(round * 10 + code_length as u64));
                drive_round(&mut engine, &secret, 4000);
                assert!(engine.is_solved());
            }
        }
    }
}
