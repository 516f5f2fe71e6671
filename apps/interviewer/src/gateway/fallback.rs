//! Deterministic substitutes used whenever the model call fails or its output
//! is unusable. Every function here is pure.

use crate::interview::models::{Difficulty, Evaluation, Question};
use crate::interview::scorecard::Scorecard;

/// Trimmed answers longer than this count as substantial for the heuristic score.
pub const SUBSTANTIAL_ANSWER_CHARS: usize = 20;
/// Trimmed answers shorter than this get a request for more detail.
pub const TERSE_ANSWER_CHARS: usize = 10;

pub const SUBSTANTIAL_SCORE: f64 = 5.0;
pub const TERSE_SCORE: f64 = 3.0;

pub const NO_EVALUATIONS_NOTICE: &str =
    "No answers have been evaluated yet, so there is nothing to report.";

struct StaticQuestion {
    text: &'static str,
    ideal_solution: &'static str,
    explanation: &'static str,
    key_concepts: &'static [&'static str],
    alternatives: &'static [&'static str],
}

const INTERMEDIATE_QUESTION: StaticQuestion = StaticQuestion {
    text: "You have a sales dataset with Product_ID in column A and Sales_Amount in column B. \
           How would you calculate the total sales for Product_ID 'PROD001'?",
    ideal_solution: "=SUMIF(A:A,\"PROD001\",B:B)",
    explanation: "SUMIF sums the values in one range that meet a criterion in another.",
    key_concepts: &["SUMIF", "criteria-based calculations"],
    alternatives: &["SUMIFS", "PivotTable"],
};

const INTERMEDIATE_ADVANCED_QUESTION: StaticQuestion = StaticQuestion {
    text: "You need a named range for a monthly report that automatically expands when new \
           rows are added to column A. How would you build it?",
    ideal_solution: "=OFFSET($A$1,0,0,COUNTA($A:$A),1) or convert the data to an Excel Table",
    explanation: "OFFSET sized by COUNTA grows with the data; Tables expand natively.",
    key_concepts: &["OFFSET", "COUNTA", "dynamic ranges"],
    alternatives: &["Excel Tables", "INDEX-based ranges"],
};

const ADVANCED_QUESTION: StaticQuestion = StaticQuestion {
    text: "You need a lookup with multiple criteria. How would you return the value in \
           column C where column A = 'Category1' AND column B = 'Product1'?",
    ideal_solution: "=INDEX(C:C,MATCH(1,(A:A=\"Category1\")*(B:B=\"Product1\"),0))",
    explanation: "Multiplying boolean arrays builds a combined match key for MATCH.",
    key_concepts: &["INDEX/MATCH", "array formulas", "multiple criteria"],
    alternatives: &["FILTER", "XLOOKUP with concatenated keys", "helper columns"],
};

/// A static question matched to the requested difficulty.
pub fn fallback_question(difficulty: Difficulty, ordinal: u32) -> Question {
    let source = match difficulty {
        Difficulty::Intermediate => &INTERMEDIATE_QUESTION,
        Difficulty::IntermediateAdvanced => &INTERMEDIATE_ADVANCED_QUESTION,
        Difficulty::Advanced => &ADVANCED_QUESTION,
    };

    Question {
        text: source.text.to_string(),
        ideal_solution: source.ideal_solution.to_string(),
        explanation: source.explanation.to_string(),
        key_concepts: source.key_concepts.iter().map(|s| s.to_string()).collect(),
        alternatives: source.alternatives.iter().map(|s| s.to_string()).collect(),
        difficulty,
        ordinal,
    }
}

/// Length-based evaluation: substantial answers outscore terse ones.
pub fn heuristic_evaluation(answer: &str) -> Evaluation {
    let substantial = answer.trim().chars().count() > SUBSTANTIAL_ANSWER_CHARS;
    let score = if substantial {
        SUBSTANTIAL_SCORE
    } else {
        TERSE_SCORE
    };

    Evaluation {
        correctness: score,
        efficiency: score,
        clarity: score,
        overall: score,
        feedback: "Thank you for your response.".to_string(),
        strengths: vec![],
        areas_for_improvement: vec!["Provide more detailed explanations".to_string()],
        recommendation: "Practice explaining Excel solutions step-by-step.".to_string(),
    }
}

pub fn basic_feedback(answer: &str, question: &Question) -> String {
    if answer.trim().chars().count() < TERSE_ANSWER_CHARS {
        format!(
            "Thank you for your answer. Please provide more detailed explanations of your \
             Excel approach. The ideal solution would be: {}",
            question.ideal_solution
        )
    } else {
        format!(
            "Thank you for your answer. The ideal solution would be: {}",
            question.ideal_solution
        )
    }
}

/// Report built purely from the numeric averages.
pub fn basic_report(evaluations: &[Evaluation]) -> String {
    let Some(card) = Scorecard::compute(evaluations) else {
        return NO_EVALUATIONS_NOTICE.to_string();
    };

    let breakdown: Vec<String> = card
        .per_question
        .iter()
        .enumerate()
        .map(|(i, score)| format!("- Question {}: {score:.1}/10", i + 1))
        .collect();

    format!(
        "EXCEL PROFICIENCY ASSESSMENT REPORT\n\n\
         Overall Score: {overall:.1}/10\n\
         Proficiency Level: {tier}\n\n\
         Correctness Average: {correctness:.1}/10\n\
         Efficiency Average: {efficiency:.1}/10\n\
         Clarity Average: {clarity:.1}/10\n\n\
         Question Breakdown:\n{breakdown}\n\n\
         You completed {answered} questions. Your weakest area was {weakest}; \
         continue practicing Excel skills to improve your proficiency.\n\n\
         Recommendations:\n\
         - Practice Excel functions and formulas\n\
         - Study real-world Excel scenarios\n\
         - Focus on explaining your reasoning clearly\n\n\
         Keep up the good work!",
        overall = card.overall,
        tier = card.tier.label(),
        correctness = card.correctness,
        efficiency = card.efficiency,
        clarity = card.clarity,
        breakdown = breakdown.join("\n"),
        answered = card.answered,
        weakest = card.weakest_dimension(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_question_matches_difficulty() {
        for difficulty in [
            Difficulty::Intermediate,
            Difficulty::IntermediateAdvanced,
            Difficulty::Advanced,
        ] {
            let question = fallback_question(difficulty, 4);
            assert_eq!(question.difficulty, difficulty);
            assert_eq!(question.ordinal, 4);
            assert!(!question.text.is_empty());
            assert!(!question.ideal_solution.is_empty());
        }
        assert!(fallback_question(Difficulty::Intermediate, 1)
            .ideal_solution
            .contains("SUMIF"));
    }

    #[test]
    fn test_heuristic_rewards_substantial_answers() {
        let long = heuristic_evaluation("=SUMIF(A:A,\"PROD001\",B:B) sums sales for the product");
        let short = heuristic_evaluation("=SUMIF(...)");
        assert_eq!(long.overall, SUBSTANTIAL_SCORE);
        assert_eq!(short.overall, TERSE_SCORE);
        assert!(long.correctness > short.correctness);
    }

    #[test]
    fn test_heuristic_ignores_surrounding_whitespace() {
        let padded = format!("{}short{}", " ".repeat(30), " ".repeat(30));
        assert_eq!(heuristic_evaluation(&padded).overall, TERSE_SCORE);
    }

    #[test]
    fn test_basic_feedback_references_ideal_solution() {
        let question = fallback_question(Difficulty::Intermediate, 1);
        let terse = basic_feedback("sumif", &question);
        let full = basic_feedback("I would use SUMIF across the column", &question);
        assert!(terse.contains("more detailed"));
        assert!(terse.contains(&question.ideal_solution));
        assert!(!full.contains("more detailed"));
        assert!(full.contains(&question.ideal_solution));
    }

    #[test]
    fn test_basic_report_uses_averages_and_tier() {
        let report = basic_report(&[
            heuristic_evaluation("a detailed and substantial answer"),
            heuristic_evaluation("short"),
        ]);
        assert!(report.contains("Overall Score: 4.0/10"));
        assert!(report.contains("Proficiency Level: Beginner"));
        assert!(report.contains("- Question 2: 3.0/10"));
        assert!(report.contains("You completed 2 questions"));
    }

    #[test]
    fn test_basic_report_without_evaluations() {
        assert_eq!(basic_report(&[]), NO_EVALUATIONS_NOTICE);
    }
}
