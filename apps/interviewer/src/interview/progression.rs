//! Progression rules: readiness recognition, difficulty per ordinal, and the
//! short context string fed into question generation.

use crate::interview::models::{ConversationTurn, Difficulty};

/// Tokens that confirm the candidate is ready to start.
const READY_TOKENS: &[&str] = &[
    "ready", "yes", "y", "start", "begin", "go", "sure", "ok", "okay",
];

/// Number of previous turns summarised into the question-generation context.
pub const CONTEXT_TURNS: usize = 2;

/// True when the input contains a recognised affirmative token.
///
/// Matching is on whole alphanumeric tokens, so "Ready!" and "yes please" match
/// while words that merely contain a token ("nah", "going") do not.
pub fn is_ready(input: &str) -> bool {
    input
        .trim()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| READY_TOKENS.contains(&token))
}

/// Difficulty for a 1-based `ordinal` in an interview of `total` questions.
///
/// 3, 4 and 5 question interviews use hand-tuned curves; any other length is
/// split into thirds, with the remainder going to Advanced.
pub fn difficulty_for(total: u32, ordinal: u32) -> Difficulty {
    use Difficulty::*;

    match (total, ordinal) {
        (3, 1) => Intermediate,
        (3, 2) => IntermediateAdvanced,
        (3, _) => Advanced,
        (4, 1 | 2) => Intermediate,
        (4, 3) => IntermediateAdvanced,
        (4, _) => Advanced,
        (5, 1 | 2) => Intermediate,
        (5, 3 | 4) => IntermediateAdvanced,
        (5, _) => Advanced,
        _ => {
            let third = total / 3;
            if ordinal <= third {
                Intermediate
            } else if ordinal <= 2 * third {
                IntermediateAdvanced
            } else {
                Advanced
            }
        }
    }
}

/// Summary of the most recent questions, or an empty string before any answer.
pub fn question_context(turns: &[ConversationTurn]) -> String {
    if turns.is_empty() {
        return String::new();
    }
    let recent = &turns[turns.len().saturating_sub(CONTEXT_TURNS)..];
    let topics: Vec<&str> = recent.iter().map(|t| t.question_preview.as_str()).collect();
    format!("Previous questions covered: {}", topics.join("; "))
}
