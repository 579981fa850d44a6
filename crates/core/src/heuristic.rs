//! Local feedback used when the remote service is unavailable or not configured.

/// Answers shorter than this many characters (after trimming) are "brief".
pub const BRIEF_THRESHOLD: usize = 40;

const BRIEF_CRITIQUE: &str = "Too brief.";
const DETAILED_CRITIQUE: &str = "Good, but could be sharper.";

const SUGGESTIONS: &[&str] = &[
    "Use the STAR method (Situation, Task, Action, Result).",
    "Quantify your results with concrete numbers.",
];

const TIPS: &[&str] = &["Keep your answer under two minutes."];

/// Returns `true` when the answer is too short to carry much detail.
pub fn is_brief(answer: &str) -> bool {
    answer.trim().chars().count() < BRIEF_THRESHOLD
}

/// Generates deterministic three-section feedback for an answer.
///
/// Never fails, including on empty input.
pub fn generate(answer: &str) -> String {
    let critique = if is_brief(answer) {
        BRIEF_CRITIQUE
    } else {
        DETAILED_CRITIQUE
    };

    let mut text = format!("CRITIQUE: {critique}\nSUGGESTIONS:");
    for suggestion in SUGGESTIONS {
        text.push_str("\n- ");
        text.push_str(suggestion);
    }
    text.push_str("\nTIPS:");
    for tip in TIPS {
        text.push_str("\n- ");
        text.push_str(tip);
    }
    text
}
