// All LLM prompt constants for the gateway.
// Templates use `{placeholder}` markers that are filled with `fill`.

use crate::llm_client::CompletionOptions;

pub const QUESTION_OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.7,
    max_tokens: 1500,
};
pub const FEEDBACK_OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.6,
    max_tokens: 800,
};
pub const EVALUATION_OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.3,
    max_tokens: 1000,
};
pub const REPORT_OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.5,
    max_tokens: 2000,
};

/// Task description for question generation.
pub const QUESTION_TASK: &str = "You create realistic, practical Excel assessment questions. \
    Questions must be based on real-world business scenarios, test practical skills rather \
    than theory, require specific Excel functions or approaches, and have clear, achievable \
    solutions.

Difficulty guidelines:
- intermediate: basic functions (VLOOKUP, SUMIF, PivotTables, basic formulas)
- intermediate_advanced: complex formulas, array functions, dynamic ranges, advanced features
- advanced: complex business scenarios, financial modeling, multiple function combinations

Always include realistic data examples and business context.";

/// Question prompt. Replace: {difficulty}, {ordinal}, {context}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"GENERATE EXCEL QUESTION:
- Difficulty Level: {difficulty}
- Question Number: {ordinal}
- Context: {context}

Make the question different from the previous ones and from typical textbook questions.

Return a JSON object with this EXACT schema:
{
  "question": "Your detailed Excel question here...",
  "ideal_solution": "The best Excel formula/approach to solve this",
  "explanation": "Why this solution is optimal",
  "key_concepts": ["concept1", "concept2"],
  "alternatives": ["alternative1", "alternative2"]
}"#;

/// Task description for answer evaluation.
pub const EVALUATION_TASK: &str = "You evaluate answers for correctness, efficiency, and clarity.

CORRECTNESS (0-10): 9-10 works flawlessly; 7-8 minor issues; 5-6 partially correct; \
3-4 significant errors; 0-2 incorrect.
EFFICIENCY (0-10): 9-10 optimal modern approach; 7-8 minor optimizations possible; \
5-6 better alternatives exist; 3-4 outdated; 0-2 very poor.
CLARITY (0-10): 9-10 excellent reasoning; 7-8 mostly clear; 5-6 some gaps; \
3-4 hard to follow; 0-2 no explanation.

Be fair, constructive, and educational.";

/// Evaluation prompt. Replace: {question}, {ideal_solution}, {answer}
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"EVALUATION TASK:
Question: {question}
Ideal Solution: {ideal_solution}
Candidate Answer: "{answer}"

Return a JSON object with this EXACT schema (scores are numbers from 0 to 10):
{
  "correctness_score": 0,
  "efficiency_score": 0,
  "clarity_score": 0,
  "overall_score": 0,
  "feedback": "Specific feedback about the answer",
  "strengths": ["strength1"],
  "areas_for_improvement": ["area1"],
  "recommendation": "Specific recommendation for improvement"
}"#;

/// Task description for conversational feedback.
pub const FEEDBACK_TASK: &str = "Be encouraging and supportive while staying professional. \
    Acknowledge correct approaches, suggest improvements, and help the candidate learn \
    from your feedback.";

/// Feedback prompt. Replace: {question}, {ideal_solution}, {answer}, {history}
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"CURRENT SITUATION:
Question Asked: {question}
Ideal Solution: {ideal_solution}
Candidate Answer: "{answer}"

Conversation History:
{history}

Respond to the candidate: acknowledge the answer, give constructive feedback, mention the
ideal solution if needed, and encourage them. Do NOT ask the next question.
Keep it to 2-3 short paragraphs."#;

/// Task description for the final report.
pub const REPORT_TASK: &str = "You write Excel proficiency assessment reports. \
    Be professional, encouraging, specific, and actionable.";

/// Report prompt. Replace: {overall}, {correctness}, {efficiency}, {clarity}, {tier}, {qa_context}
pub const REPORT_PROMPT_TEMPLATE: &str = r#"PERFORMANCE DATA:
Overall Score: {overall}/10
Correctness Average: {correctness}/10
Efficiency Average: {efficiency}/10
Clarity Average: {clarity}/10
Score-based Proficiency Level: {tier}

QUESTIONS AND ANSWERS:
{qa_context}

Write a report with these sections:
1. EXECUTIVE SUMMARY (2-3 sentences)
2. PROFICIENCY LEVEL (Beginner/Intermediate/Advanced)
3. STRENGTHS
4. AREAS FOR IMPROVEMENT
5. DETAILED QUESTION BREAKDOWN
6. RECOMMENDATIONS (specific next steps and study suggestions)
7. ENCOURAGEMENT"#;

/// Substitutes `{name}` markers in `template` in a single pass. Substituted
/// values are never rescanned, so user text containing a marker stays literal.
/// Unknown markers and bare braces are kept as they are.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            values
                .iter()
                .find(|(name, _)| *name == &after[..close])
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_known_markers() {
        let prompt = fill(
            "Q: {question}\nA: {answer}",
            &[("question", "Sum a column?"), ("answer", "=SUM(A:A)")],
        );
        assert_eq!(prompt, "Q: Sum a column?\nA: =SUM(A:A)");
    }

    #[test]
    fn test_fill_does_not_expand_markers_inside_values() {
        let prompt = fill(
            FEEDBACK_PROMPT_TEMPLATE,
            &[
                ("question", "What goes in {answer}?"),
                ("ideal_solution", "=XLOOKUP()"),
                ("answer", "I typed {history} here"),
                ("history", "No previous conversation."),
            ],
        );
        assert!(prompt.contains("What goes in {answer}?"));
        assert!(prompt.contains("I typed {history} here"));
        assert_eq!(prompt.matches("No previous conversation.").count(), 1);
    }

    #[test]
    fn test_fill_keeps_json_braces_and_unknown_markers() {
        let prompt = fill(QUESTION_PROMPT_TEMPLATE, &[("difficulty", "advanced")]);
        assert!(prompt.contains("Difficulty Level: advanced"));
        assert!(prompt.contains("\"question\": \"Your detailed Excel question here...\""));
        assert!(prompt.contains("{ordinal}"));
    }
}
