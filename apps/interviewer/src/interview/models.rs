//! Interview domain types: phases, difficulties, questions, evaluations and turns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of characters of a question kept in a conversation turn.
pub const QUESTION_PREVIEW_CHARS: usize = 100;

/// Interview phase. Ordered so that transitions can be checked as `next > current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Introduction,
    Questioning,
    Conclusion,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Introduction => "introduction",
            Phase::Questioning => "questioning",
            Phase::Conclusion => "conclusion",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty assigned to a question ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Intermediate,
    IntermediateAdvanced,
    Advanced,
}

impl Difficulty {
    /// Wire form, also used inside prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Intermediate => "intermediate",
            Difficulty::IntermediateAdvanced => "intermediate_advanced",
            Difficulty::Advanced => "advanced",
        }
    }

    /// Human-readable label shown in question headers.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Intermediate => "Intermediate",
            Difficulty::IntermediateAdvanced => "Intermediate/Advanced",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A generated interview question. Never mutated after the gateway returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub ideal_solution: String,
    pub explanation: String,
    pub key_concepts: Vec<String>,
    pub alternatives: Vec<String>,
    pub difficulty: Difficulty,
    /// 1-based position in the interview.
    pub ordinal: u32,
}

/// Scored assessment of one answer. All scores are within [0, 10].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub correctness: f64,
    pub efficiency: f64,
    pub clarity: f64,
    pub overall: f64,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub recommendation: String,
}

/// One question/answer exchange, kept only as prompt context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub question_preview: String,
    pub answer: String,
    pub ordinal: u32,
}

impl ConversationTurn {
    pub fn new(question: &Question, answer: &str) -> Self {
        Self {
            question_preview: preview(&question.text, QUESTION_PREVIEW_CHARS),
            answer: answer.to_string(),
            ordinal: question.ordinal,
        }
    }
}

/// Read-only progress view for the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub current_question_index: u32,
    pub total_questions: u32,
    pub questions_asked_count: usize,
    pub responses_count: usize,
    pub ready: bool,
}

/// A fully answered question, as shown on the results page.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionRecord {
    pub question: Question,
    pub answer: String,
    pub evaluation: Evaluation,
    pub feedback: String,
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
