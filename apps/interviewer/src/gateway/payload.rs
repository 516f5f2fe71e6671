//! Response schemas for the structured gateway calls.
//!
//! A payload either matches its schema or the whole response is discarded in
//! favour of a fallback. Scores are the one lenient spot: a missing or mis-typed
//! score is defaulted, and every score is clamped into [0, 10].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::interview::models::{Difficulty, Evaluation, Question};
use crate::llm_client::LlmError;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;
/// Score used for any dimension the model did not provide.
pub const DEFAULT_SCORE: f64 = 5.0;

pub const DEFAULT_FEEDBACK: &str = "Thank you for your response.";
pub const DEFAULT_RECOMMENDATION: &str = "Continue practicing Excel skills.";

#[derive(Debug, Deserialize)]
pub struct QuestionPayload {
    pub question: String,
    pub ideal_solution: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

impl QuestionPayload {
    /// Rejects payloads whose required text is blank.
    pub fn into_question(self, difficulty: Difficulty, ordinal: u32) -> Result<Question, LlmError> {
        if self.question.trim().is_empty() {
            return Err(LlmError::InvalidPayload("question text is blank".to_string()));
        }
        if self.ideal_solution.trim().is_empty() {
            return Err(LlmError::InvalidPayload("ideal_solution is blank".to_string()));
        }

        Ok(Question {
            text: self.question.trim().to_string(),
            ideal_solution: self.ideal_solution.trim().to_string(),
            explanation: self.explanation,
            key_concepts: self.key_concepts,
            alternatives: self.alternatives,
            difficulty,
            ordinal,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct EvaluationPayload {
    #[serde(default, deserialize_with = "lenient_score")]
    pub correctness_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub efficiency_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub clarity_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

impl EvaluationPayload {
    /// Normalizes scores and fills in missing text.
    ///
    /// A missing overall score is the mean of whichever dimension scores were given.
    pub fn into_evaluation(self) -> Evaluation {
        let dimensions = [
            self.correctness_score,
            self.efficiency_score,
            self.clarity_score,
        ];
        let present: Vec<f64> = dimensions.iter().flatten().map(|s| clamp_score(*s)).collect();

        let overall = match self.overall_score {
            Some(score) => clamp_score(score),
            None if !present.is_empty() => present.iter().sum::<f64>() / present.len() as f64,
            None => DEFAULT_SCORE,
        };

        Evaluation {
            correctness: score_or_default(self.correctness_score),
            efficiency: score_or_default(self.efficiency_score),
            clarity: score_or_default(self.clarity_score),
            overall,
            feedback: text_or_default(self.feedback, DEFAULT_FEEDBACK),
            strengths: self.strengths,
            areas_for_improvement: self.areas_for_improvement,
            recommendation: text_or_default(self.recommendation, DEFAULT_RECOMMENDATION),
        }
    }
}

pub fn clamp_score(score: f64) -> f64 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

fn score_or_default(score: Option<f64>) -> f64 {
    score.map(clamp_score).unwrap_or(DEFAULT_SCORE)
}

fn text_or_default(text: Option<String>, default: &str) -> String {
    text.filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Accepts a number, a numeric string, or an "8/10" style string.
/// Anything else (including NaN and infinities) becomes `None`.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let score = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s
            .split('/')
            .next()
            .and_then(|head| head.trim().parse::<f64>().ok()),
        _ => None,
    };
    Ok(score.filter(|s| s.is_finite()))
}
