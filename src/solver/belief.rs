//! Belief state about the hidden code
//!
//! The engine tracks three layers of knowledge:
//! - `known`: per-position confirmed symbols, never un-confirmed
//! - `possibilities`: per-position candidate sets; each always contains the
//!   true symbol for its position, and a set that shrinks to one candidate
//!   promotes that candidate to `known`
//! - `useless`: symbols proven absent from the entire code
//!
//! Eliminations are guarded: a possibility set is never allowed to become
//! empty, so a contradictory feedback stream degrades deduction quality
//! instead of corrupting the state.

use crate::core::{Code, RoundConfig, Symbol};
use rand::Rng;
use rand::prelude::IndexedRandom;
use rustc_hash::FxHashSet;

/// Candidate symbols still considered possible at one position
///
/// Backed by an ordered vec so sampling is uniform and cheap; the sets stay
/// tiny (at most the alphabet size).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PossibilitySet(Vec<Symbol>);

impl PossibilitySet {
    /// A set holding the full alphabet
    #[must_use]
    pub fn full(config: RoundConfig) -> Self {
        Self(config.alphabet().symbols().collect())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Possibility sets are never empty; this only exists for completeness
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.0.contains(&symbol)
    }

    /// The sole remaining candidate, if the set has shrunk to one
    #[inline]
    #[must_use]
    pub fn sole_candidate(&self) -> Option<Symbol> {
        match self.0.as_slice() {
            [symbol] => Some(*symbol),
            _ => None,
        }
    }

    /// Remove a candidate, unless the removal would empty the set
    ///
    /// Returns whether the symbol was removed.
    pub fn remove(&mut self, symbol: Symbol) -> bool {
        if self.0.len() <= 1 {
            return false;
        }
        if let Some(position) = self.0.iter().position(|&s| s == symbol) {
            self.0.remove(position);
            true
        } else {
            false
        }
    }

    /// Replace the set with a single confirmed candidate
    pub fn collapse_to(&mut self, symbol: Symbol) {
        self.0.clear();
        self.0.push(symbol);
    }

    /// Sample one candidate uniformly
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Symbol {
        *self
            .0
            .choose(rng)
            .expect("possibility sets are never empty")
    }

    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.0.iter().copied()
    }
}

/// Everything the engine believes about the hidden code
#[derive(Debug, Clone)]
pub struct BeliefState {
    known: Vec<Option<Symbol>>,
    possibilities: Vec<PossibilitySet>,
    useless: FxHashSet<Symbol>,
}

impl BeliefState {
    /// A fresh belief state: nothing known, every symbol possible everywhere
    #[must_use]
    pub fn new(config: RoundConfig) -> Self {
        Self {
            known: vec![None; config.code_length()],
            possibilities: vec![PossibilitySet::full(config); config.code_length()],
            useless: FxHashSet::default(),
        }
    }

    /// Per-position confirmed symbols
    #[inline]
    #[must_use]
    pub fn known(&self) -> &[Option<Symbol>] {
        &self.known
    }

    /// The candidate set for one position
    ///
    /// # Panics
    /// Panics if `position` is out of range.
    #[inline]
    #[must_use]
    pub fn possibility(&self, position: usize) -> &PossibilitySet {
        &self.possibilities[position]
    }

    /// Symbols proven absent from the whole code
    #[inline]
    #[must_use]
    pub fn useless(&self) -> &FxHashSet<Symbol> {
        &self.useless
    }

    /// Count of confirmed positions
    #[must_use]
    pub fn known_count(&self) -> usize {
        self.known.iter().filter(|slot| slot.is_some()).count()
    }

    /// True iff every position is confirmed
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.known.iter().all(Option::is_some)
    }

    /// The fully deduced code, once every position is confirmed
    #[must_use]
    pub fn known_code(&self) -> Option<Code> {
        self.known
            .iter()
            .copied()
            .collect::<Option<Vec<_>>>()
            .map(Code::from_symbols)
    }

    /// Confirm a symbol at a position
    ///
    /// A confirmed position is never overwritten; the possibility set
    /// collapses to the confirmed symbol either way.
    pub fn confirm(&mut self, position: usize, symbol: Symbol) {
        let confirmed = *self.known[position].get_or_insert(symbol);
        self.possibilities[position].collapse_to(confirmed);
    }

    /// Drop a candidate at one position (guarded against emptying the set)
    pub fn eliminate(&mut self, position: usize, symbol: Symbol) -> bool {
        self.possibilities[position].remove(symbol)
    }

    /// Record that every symbol of `guess` is absent from the code, and
    /// prune those symbols from every position's candidates
    ///
    /// The never-empty guard applies per slot: a slot whose candidates are
    /// all in the pruned set keeps its last candidate.
    pub fn mark_useless(&mut self, guess: &Code) {
        for symbol in guess.iter() {
            self.useless.insert(symbol);
        }
        for set in &mut self.possibilities {
            for symbol in guess.iter() {
                set.remove(symbol);
            }
        }
    }

    /// Promote every single-candidate possibility set to a known digit
    ///
    /// Idempotent: re-running it changes nothing.
    pub fn promote_singletons(&mut self) {
        for position in 0..self.known.len() {
            if self.known[position].is_none()
                && let Some(symbol) = self.possibilities[position].sole_candidate()
            {
                self.known[position] = Some(symbol);
            }
        }
    }

    /// Collapse the whole belief state to a confirmed code
    ///
    /// Used when feedback reports every position exact: the code is fully
    /// determined and no further deduction is needed.
    pub fn collapse_to_code(&mut self, code: &Code) {
        for (position, symbol) in code.iter().enumerate() {
            self.confirm(position, symbol);
        }
    }

    /// Check that a candidate guess contradicts no per-position knowledge
    #[must_use]
    pub fn allows(&self, code: &Code) -> bool {
        code.iter()
            .enumerate()
            .all(|(position, symbol)| self.possibilities[position].contains(symbol))
    }
}
