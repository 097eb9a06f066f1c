//! Mastermind Breaker - CLI
//!
//! Drives the deduction engine from the command line: break a given secret,
//! simulate a round against a random one, or benchmark across many rounds.

use anyhow::Result;
use clap::{Parser, Subcommand};
use mastermind_breaker::{
    commands::{SolveConfig, run_benchmark, solve_code},
    core::{Alphabet, Code, RoundConfig},
    output::{print_benchmark_result, print_solve_result},
    solver::CodeBreaker,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser)]
#[command(
    name = "mastermind_breaker",
    about = "Mastermind code breaker using a deduction-based guessing strategy",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Code length (number of positions)
    #[arg(short = 'l', long, global = true, default_value_t = 4)]
    length: usize,

    /// Alphabet size (codes use the digits 1..=N, max 9)
    #[arg(short = 's', long, global = true, default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..=9))]
    symbols: u8,

    /// Seed for reproducible runs (engine and secret generation)
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Break a specific secret code
    Solve {
        /// The secret code as digits, e.g. 4152
        secret: String,

        /// Show tactic and belief-state details per turn
        #[arg(short, long)]
        verbose: bool,

        /// Give up after this many guesses
        #[arg(short = 'm', long, default_value_t = 500)]
        max_guesses: usize,
    },

    /// Generate a random secret and break it
    Simulate {
        /// Show tactic and belief-state details per turn
        #[arg(short, long)]
        verbose: bool,

        /// Give up after this many guesses
        #[arg(short = 'm', long, default_value_t = 500)]
        max_guesses: usize,
    },

    /// Benchmark the engine across many random secrets
    Benchmark {
        /// Number of rounds to play
        #[arg(short = 'n', long, default_value_t = 1000)]
        rounds: usize,

        /// Per-round guess cap; rounds exceeding it count as failed
        #[arg(short = 'm', long, default_value_t = 4000)]
        guess_cap: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = RoundConfig::new(cli.length, Alphabet::new(cli.symbols))?;

    match cli.command {
        Commands::Solve {
            secret,
            verbose,
            max_guesses,
        } => {
            let secret = Code::parse(&secret, config.code_length(), config.alphabet())?;
            run_solve_command(config, secret, verbose, max_guesses, cli.seed)
        }
        Commands::Simulate {
            verbose,
            max_guesses,
        } => {
            let mut secret_rng = seeded_rng(cli.seed.map(|s| s.wrapping_add(1)));
            let secret = config.random_code(&mut secret_rng);
            run_solve_command(config, secret, verbose, max_guesses, cli.seed)
        }
        Commands::Benchmark { rounds, guess_cap } => {
            let result = run_benchmark(config, rounds, guess_cap, cli.seed);
            print_benchmark_result(&result);
            Ok(())
        }
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

fn run_solve_command(
    config: RoundConfig,
    secret: Code,
    verbose: bool,
    max_guesses: usize,
    seed: Option<u64>,
) -> Result<()> {
    let mut engine = CodeBreaker::with_rng(config, seeded_rng(seed));

    let mut solve_config = SolveConfig::new(secret);
    solve_config.max_guesses = max_guesses;

    let result = solve_code(&solve_config, &mut engine)?;
    print_solve_result(&result, verbose);
    Ok(())
}
