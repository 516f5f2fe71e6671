//! Fixed user-facing text emitted by the session itself.

use crate::interview::models::Question;

pub const READINESS_PROMPT: &str = "I understand you might need a moment. When you're ready \
    to begin the Excel proficiency assessment, just let me know by typing 'ready' or 'yes'.";

/// Welcome text for an interview of `total` questions.
pub fn introduction(total: u32) -> String {
    let (count, outline) = match total {
        3 => (
            "THREE".to_string(),
            "The questions will cover:\n\
             1. Intermediate level: Common data manipulation and lookup functions\n\
             2. Intermediate/Advanced level: More complex formulas and techniques\n\
             3. Advanced level: Complex logical thinking and advanced scenarios"
                .to_string(),
        ),
        4 => (
            "FOUR".to_string(),
            "The questions will cover:\n\
             1. Intermediate level: Basic functions and formulas\n\
             2. Intermediate level: Data manipulation and lookup functions\n\
             3. Intermediate/Advanced level: More complex formulas and techniques\n\
             4. Advanced level: Complex logical thinking and advanced scenarios"
                .to_string(),
        ),
        5 => (
            "FIVE".to_string(),
            "The questions will cover:\n\
             1. Intermediate level: Basic functions and formulas\n\
             2. Intermediate level: Data manipulation and lookup functions\n\
             3. Intermediate/Advanced level: Complex formulas and techniques\n\
             4. Intermediate/Advanced level: Advanced data analysis\n\
             5. Advanced level: Complex logical thinking and advanced scenarios"
                .to_string(),
        ),
        n => (
            n.to_string(),
            format!("The questions will progressively increase in difficulty across {n} levels."),
        ),
    };

    format!(
        "Hello! I'm your AI Excel Mock Interviewer.\n\n\
         I'm here to assess your practical Excel skills through a structured interview.\n\n\
         Here's how this will work:\n\
         • I will ask you {count} questions that progressively increase in difficulty\n\
         • For each question, describe your approach and the specific formulas or functions you would use\n\
         • I'll evaluate each response on correctness, efficiency, and clarity of explanation\n\
         • At the end, you'll receive a feedback report with actionable recommendations\n\n\
         {outline}\n\n\
         Type 'ready' when you want to begin."
    )
}

/// Header plus body for a newly asked question.
pub fn question_prompt(question: &Question) -> String {
    format!(
        "**Question {} ({}):**\n\n{}",
        question.ordinal, question.difficulty, question.text
    )
}

pub fn completion_notice(total: u32) -> String {
    format!(
        "Thank you for completing all {total} questions! \
         Request your report to see the full assessment."
    )
}
