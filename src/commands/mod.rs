//! Command implementations

pub mod benchmark;
pub mod solve;

pub use benchmark::{BenchmarkResult, run_benchmark};
pub use solve::{GuessStep, SolveConfig, SolveResult, solve_code};
