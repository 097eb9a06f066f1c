//! Small formatting helpers shared by the display functions

use crate::core::Feedback;

/// Render feedback as a peg row: ● exact, ○ misplaced, · wrong
///
/// # Examples
/// ```
/// use mastermind_breaker::core::Feedback;
/// use mastermind_breaker::output::formatters::feedback_pegs;
///
/// assert_eq!(feedback_pegs(Feedback::new(2, 1, 1)), "●●○·");
/// ```
#[must_use]
pub fn feedback_pegs(feedback: Feedback) -> String {
    let mut pegs = String::new();
    pegs.extend(std::iter::repeat_n('●', feedback.exact()));
    pegs.extend(std::iter::repeat_n('○', feedback.misplaced()));
    pegs.extend(std::iter::repeat_n('·', feedback.wrong()));
    pegs
}

/// Render a horizontal bar scaled against the largest bucket
#[must_use]
pub fn distribution_bar(count: usize, max_count: usize, width: usize) -> String {
    let filled = if max_count > 0 {
        (count * width / max_count).max(usize::from(count > 0))
    } else {
        0
    };
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(width.saturating_sub(filled))
    )
}
