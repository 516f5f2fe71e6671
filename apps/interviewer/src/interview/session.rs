//! Interview Session: the phase state machine.
//!
//! Flow: begin → (readiness) → question 1 → answer → evaluate → feedback →
//!       next question … → last answer → Conclusion → conclude (report).
//!
//! The session performs no I/O and never retries: every generated string comes
//! from exactly one gateway call, and the gateway owns all fallback behaviour.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::gateway::Gateway;
use crate::interview::messages::{
    completion_notice, introduction, question_prompt, READINESS_PROMPT,
};
use crate::interview::models::{
    ConversationTurn, Evaluation, Phase, Question, QuestionRecord, Snapshot,
};
use crate::interview::progression::{difficulty_for, is_ready, question_context};
use crate::interview::scorecard::Scorecard;

/// Number of recent turns kept for prompt context.
pub const HISTORY_WINDOW: usize = 3;

/// Calls made in the wrong phase, or with unusable input.
#[derive(Debug, Error, PartialEq)]
pub enum InterviewError {
    #[error("An interview needs at least one question")]
    InvalidQuestionCount,

    #[error("The interview has not been started")]
    NotStarted,

    #[error("The interview is already under way")]
    AlreadyStarted,

    #[error("All questions have been answered; request the report instead")]
    AlreadyConcluded,

    #[error("The report is available once every question is answered ({answered}/{total} so far)")]
    NotConcluded { answered: usize, total: u32 },

    #[error("Answer cannot be empty")]
    EmptyAnswer,

    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: Phase, to: Phase },
}

/// One interview run. Owned by a single caller; `&mut self` on every state
/// change means concurrent use needs external serialization.
pub struct Session {
    gateway: Arc<dyn Gateway>,
    total_questions: u32,
    phase: Phase,
    begun: bool,
    ready: bool,
    /// 1-based ordinal of the last question asked; 0 before the first.
    current_question_index: u32,
    questions: Vec<Question>,
    answers: Vec<String>,
    evaluations: Vec<Evaluation>,
    /// Interviewer feedback, one entry per answer.
    feedback: Vec<String>,
    recent_turns: Vec<ConversationTurn>,
}

impl Session {
    pub fn new(total_questions: u32, gateway: Arc<dyn Gateway>) -> Result<Self, InterviewError> {
        if total_questions == 0 {
            return Err(InterviewError::InvalidQuestionCount);
        }
        Ok(Self::fresh(total_questions, gateway))
    }

    fn fresh(total_questions: u32, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            total_questions,
            phase: Phase::Introduction,
            begun: false,
            ready: false,
            current_question_index: 0,
            questions: Vec::new(),
            answers: Vec::new(),
            evaluations: Vec::new(),
            feedback: Vec::new(),
            recent_turns: Vec::new(),
        }
    }

    /// Returns the introduction. Repeatable until the candidate confirms readiness.
    pub fn begin(&mut self) -> Result<String, InterviewError> {
        if self.phase != Phase::Introduction {
            return Err(InterviewError::AlreadyStarted);
        }
        self.begun = true;
        info!("Interview started ({} questions)", self.total_questions);
        Ok(introduction(self.total_questions))
    }

    /// Feeds one piece of candidate input into the state machine.
    pub async fn submit(&mut self, raw_text: &str) -> Result<String, InterviewError> {
        if !self.begun {
            return Err(InterviewError::NotStarted);
        }
        match self.phase {
            Phase::Introduction => self.handle_readiness(raw_text).await,
            Phase::Questioning => self.handle_answer(raw_text).await,
            Phase::Conclusion => Err(InterviewError::AlreadyConcluded),
        }
    }

    /// Generates the final report from everything accumulated. Mutates nothing,
    /// so repeated calls regenerate from identical inputs.
    pub async fn conclude(&self) -> Result<String, InterviewError> {
        if self.phase != Phase::Conclusion {
            return Err(InterviewError::NotConcluded {
                answered: self.evaluations.len(),
                total: self.total_questions,
            });
        }
        info!("Generating report over {} answers", self.evaluations.len());
        Ok(self
            .gateway
            .generate_report(&self.questions, &self.answers, &self.evaluations)
            .await)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            current_question_index: self.current_question_index,
            total_questions: self.total_questions,
            questions_asked_count: self.questions.len(),
            responses_count: self.answers.len(),
            ready: self.ready,
        }
    }

    /// Discards everything accumulated and returns to the freshly built state.
    pub fn reset(&mut self) {
        info!("Interview reset");
        *self = Self::fresh(self.total_questions, Arc::clone(&self.gateway));
    }

    /// Every answered question with its answer, evaluation and feedback, in order.
    pub fn records(&self) -> Vec<QuestionRecord> {
        self.questions
            .iter()
            .zip(&self.answers)
            .zip(&self.evaluations)
            .zip(&self.feedback)
            .map(|(((question, answer), evaluation), feedback)| QuestionRecord {
                question: question.clone(),
                answer: answer.clone(),
                evaluation: evaluation.clone(),
                feedback: feedback.clone(),
            })
            .collect()
    }

    pub fn scorecard(&self) -> Option<Scorecard> {
        Scorecard::compute(&self.evaluations)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Phase handlers
    // ────────────────────────────────────────────────────────────────────────

    async fn handle_readiness(&mut self, input: &str) -> Result<String, InterviewError> {
        if !is_ready(input) {
            debug!("Readiness not confirmed: {:?}", input);
            return Ok(READINESS_PROMPT.to_string());
        }
        let question = self.next_question(&self.recent_turns).await;

        self.ready = true;
        self.transition(Phase::Questioning)?;
        Ok(self.commit_question(question))
    }

    // Gateway calls run against local copies; state is only touched after the
    // last await, so a dropped future leaves the session as it was.
    async fn handle_answer(&mut self, raw_text: &str) -> Result<String, InterviewError> {
        let answer = raw_text.trim();
        if answer.is_empty() {
            return Err(InterviewError::EmptyAnswer);
        }

        let Some(question) = self.questions.get(self.answers.len()).cloned() else {
            if self.current_question_index >= self.total_questions {
                return Err(InterviewError::AlreadyConcluded);
            }
            let question = self.next_question(&self.recent_turns).await;
            return Ok(self.commit_question(question));
        };

        let turns = windowed(&self.recent_turns, ConversationTurn::new(&question, answer));

        let evaluation = self.gateway.evaluate_answer(&question, answer).await;
        info!(
            "Question {} evaluated: overall {:.1}/10",
            question.ordinal, evaluation.overall
        );
        let feedback = self
            .gateway
            .generate_feedback(answer, &question, &turns)
            .await;
        let next = if self.current_question_index < self.total_questions {
            Some(self.next_question(&turns).await)
        } else {
            None
        };

        if next.is_none() {
            self.transition(Phase::Conclusion)?;
        }
        self.answers.push(answer.to_string());
        self.evaluations.push(evaluation);
        self.feedback.push(feedback.clone());
        self.recent_turns = turns;

        match next {
            Some(question) => Ok(format!("{feedback}\n\n{}", self.commit_question(question))),
            None => Ok(format!(
                "{feedback}\n\n{}",
                completion_notice(self.total_questions)
            )),
        }
    }

    /// Generates the question after the last one asked, without recording it.
    async fn next_question(&self, turns: &[ConversationTurn]) -> Question {
        let ordinal = self.current_question_index + 1;
        let difficulty = difficulty_for(self.total_questions, ordinal);
        let context = question_context(turns);

        let question = self
            .gateway
            .generate_question(difficulty, ordinal, &context)
            .await;
        info!(
            "Asking question {}/{} ({})",
            ordinal, self.total_questions, difficulty
        );
        question
    }

    fn commit_question(&mut self, question: Question) -> String {
        self.current_question_index += 1;
        let prompt = question_prompt(&question);
        self.questions.push(question);
        prompt
    }

    fn transition(&mut self, next: Phase) -> Result<(), InterviewError> {
        if next <= self.phase {
            return Err(InterviewError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        info!("Interview phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}

/// `turns` with `latest` appended, keeping only the newest `HISTORY_WINDOW`.
fn windowed(turns: &[ConversationTurn], latest: ConversationTurn) -> Vec<ConversationTurn> {
    let skip = (turns.len() + 1).saturating_sub(HISTORY_WINDOW);
    turns
        .iter()
        .cloned()
        .chain(std::iter::once(latest))
        .skip(skip)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
