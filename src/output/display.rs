//! Display functions for command results

use super::formatters::{distribution_bar, feedback_pegs};
use crate::commands::{BenchmarkResult, SolveResult};
use colored::Colorize;

/// Print the result of solving a secret
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!("Breaking: {}", result.secret.to_string().bright_yellow().bold());
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.steps.iter().enumerate() {
        let turn = i + 1;
        println!(
            "\nTurn {}: {} {}",
            turn,
            step.guess.to_string().bold(),
            feedback_pegs(step.feedback)
        );

        if verbose {
            println!("  Tactic:     {}", step.strategy.to_string().magenta());
            println!(
                "  Feedback:   {} exact, {} misplaced, {} wrong",
                step.feedback.exact(),
                step.feedback.misplaced(),
                step.feedback.wrong()
            );
            println!(
                "  Known:      {}/{} digits",
                step.known_after,
                result.secret.len()
            );
        }
    }

    println!();
    if result.success {
        println!(
            "{}",
            format!("✅ Broken in {} guesses!", result.steps.len())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Not broken within {} guesses", result.steps.len())
                .red()
                .bold()
        );
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Overall".bright_cyan().bold());
    println!("  Rounds played:    {}", result.total_rounds);
    println!(
        "  Solved:           {} {}",
        result.solved,
        format!(
            "({:.1}%)",
            result.solved as f64 / result.total_rounds as f64 * 100.0
        )
        .green()
    );
    if result.failed > 0 {
        println!(
            "  Failed:           {} {}",
            result.failed,
            format!(
                "({:.1}%)",
                result.failed as f64 / result.total_rounds as f64 * 100.0
            )
            .red()
        );
    }
    println!(
        "  Average guesses:  {}",
        format!("{:.2}", result.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!(
        "  Guess range:      {} – {}",
        result.min_guesses, result.max_guesses
    );
    println!(
        "  Total time:       {:.2}s ({:.0} rounds/s)",
        result.duration.as_secs_f64(),
        result.rounds_per_second
    );

    println!("\n📈 {}", "Guess Distribution".bright_cyan().bold());
    let max_count = result.distribution.values().copied().max().unwrap_or(1);
    let mut buckets: Vec<(usize, usize)> = result
        .distribution
        .iter()
        .map(|(&guesses, &count)| (guesses, count))
        .collect();
    buckets.sort_unstable();

    for (guesses, count) in buckets {
        let percentage = count as f64 / result.solved.max(1) as f64 * 100.0;
        let bar = distribution_bar(count, max_count, 40);
        println!("  {guesses:3} guesses: {} {count:4} ({percentage:5.1}%)", bar.green());
    }
}
