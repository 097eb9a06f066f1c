//! Benchmark command
//!
//! Plays many rounds against random secrets and aggregates guess-count
//! statistics. Rounds are independent, so they run in parallel.

use crate::core::{Feedback, RoundConfig};
use crate::solver::CodeBreaker;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_rounds: usize,
    pub solved: usize,
    pub failed: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    pub distribution: HashMap<usize, usize>,
    pub duration: Duration,
    pub rounds_per_second: f64,
}

/// Play `rounds` rounds against freshly generated secrets
///
/// Each round gets its own engine seeded from `seed` (or from the OS when
/// absent), so a seeded benchmark is fully reproducible. `guess_cap`
/// bounds a single round; a round that exhausts it counts as failed.
///
/// # Panics
///
/// Panics if the progress bar template is malformed, which is a compile
/// constant.
pub fn run_benchmark(
    config: RoundConfig,
    rounds: usize,
    guess_cap: usize,
    seed: Option<u64>,
) -> BenchmarkResult {
    let base_seed = seed.unwrap_or_else(|| rand::rng().random());

    let mut secret_rng = StdRng::seed_from_u64(base_seed);
    let secrets: Vec<_> = (0..rounds)
        .map(|_| config.random_code(&mut secret_rng))
        .collect();

    let pb = ProgressBar::new(rounds as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .unwrap()
            .progress_chars("█▓▒░"),
    );

    let start = Instant::now();

    let guess_counts: Vec<Option<usize>> = secrets
        .par_iter()
        .enumerate()
        .map(|(round, secret)| {
            let round_seed = base_seed ^ (round as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
            let mut engine = CodeBreaker::with_rng(config, StdRng::seed_from_u64(round_seed));

            let mut outcome = None;
            for attempt in 1..=guess_cap {
                let guess = engine.next_guess();
                let feedback = Feedback::score(&guess, secret);
                if engine.acknowledge(&guess, feedback).is_err() {
                    break;
                }
                if feedback.is_win() {
                    outcome = Some(attempt);
                    break;
                }
            }

            pb.inc(1);
            outcome
        })
        .collect();

    pb.finish_with_message("Complete!");

    let duration = start.elapsed();
    let solved_counts: Vec<usize> = guess_counts.iter().copied().flatten().collect();

    let mut distribution: HashMap<usize, usize> = HashMap::new();
    for &count in &solved_counts {
        *distribution.entry(count).or_insert(0) += 1;
    }

    let solved = solved_counts.len();
    let average_guesses = if solved > 0 {
        solved_counts.iter().sum::<usize>() as f64 / solved as f64
    } else {
        0.0
    };

    BenchmarkResult {
        total_rounds: rounds,
        solved,
        failed: rounds - solved,
        average_guesses,
        min_guesses: solved_counts.iter().copied().min().unwrap_or(0),
        max_guesses: solved_counts.iter().copied().max().unwrap_or(0),
        distribution,
        duration,
        rounds_per_second: rounds as f64 / duration.as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Alphabet;

    #[test]
    fn benchmark_solves_every_round() {
        let config = RoundConfig::new(3, Alphabet::new(6)).unwrap();
        let result = run_benchmark(config, 10, 4000, Some(77));

        assert_eq!(result.total_rounds, 10);
        assert_eq!(result.solved, 10);
        assert_eq!(result.failed, 0);
        assert!(result.average_guesses >= 1.0);
        assert!(result.min_guesses >= 1);
        assert!(result.max_guesses >= result.min_guesses);
        assert_eq!(result.distribution.values().sum::<usize>(), 10);
    }

    #[test]
    fn benchmark_is_reproducible_with_a_seed() {
        let config = RoundConfig::new(4, Alphabet::new(6)).unwrap();

        let first = run_benchmark(config, 5, 4000, Some(123));
        let second = run_benchmark(config, 5, 4000, Some(123));

        assert_eq!(first.distribution, second.distribution);
        assert!((first.average_guesses - second.average_guesses).abs() < f64::EPSILON);
    }
}
