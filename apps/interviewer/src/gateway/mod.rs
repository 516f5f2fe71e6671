//! AI Gateway: the four semantic calls the interview makes against the model.
//!
//! Every operation is fail-soft: transport errors, timeouts, empty output and
//! payloads that do not match their schema are absorbed here and replaced by a
//! deterministic fallback. Nothing behind this trait ever returns an error to
//! the session.
//!
//! `AppState` holds an `Arc<dyn Gateway>`; tests inject their own implementations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::interview::models::{preview, ConversationTurn, Difficulty, Evaluation, Question};
use crate::interview::scorecard::Scorecard;
use crate::llm_client::prompts::{json_system, prose_system};
use crate::llm_client::{parse_json_payload, ChatBackend, CompletionOptions, LlmError};

pub mod fallback;
pub mod payload;
pub mod prompts;

use fallback::{basic_feedback, basic_report, fallback_question, heuristic_evaluation};
use payload::{EvaluationPayload, QuestionPayload};
use prompts::*;

/// Characters of each question/answer shown in the feedback history.
const HISTORY_PREVIEW_CHARS: usize = 50;
/// Characters of each question/answer shown in the report context.
const REPORT_PREVIEW_CHARS: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Content generation and scoring for an interview. Implementations must never
/// fail: they return a usable value even when the upstream capability does not.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn generate_question(&self, difficulty: Difficulty, ordinal: u32, context: &str)
        -> Question;

    async fn evaluate_answer(&self, question: &Question, answer: &str) -> Evaluation;

    async fn generate_feedback(
        &self,
        answer: &str,
        question: &Question,
        recent_history: &[ConversationTurn],
    ) -> String;

    /// Callers must pass at least one evaluation.
    async fn generate_report(
        &self,
        questions: &[Question],
        answers: &[String],
        evaluations: &[Evaluation],
    ) -> String;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmGateway: production implementation
// ────────────────────────────────────────────────────────────────────────────

/// Gateway backed by a chat-completion backend, with a bounded wait per call.
pub struct LlmGateway {
    backend: Arc<dyn ChatBackend>,
    timeout: Duration,
}

impl LlmGateway {
    pub fn new(backend: Arc<dyn ChatBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// One backend call; running past the timeout counts as a failure.
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        options: CompletionOptions,
    ) -> Result<String, LlmError> {
        match tokio::time::timeout(self.timeout, self.backend.complete(system, prompt, options))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.timeout)),
        }
    }

    async fn try_generate_question(
        &self,
        difficulty: Difficulty,
        ordinal: u32,
        context: &str,
    ) -> Result<Question, LlmError> {
        let context = if context.trim().is_empty() {
            "First question of the interview"
        } else {
            context
        };
        let prompt = fill(
            QUESTION_PROMPT_TEMPLATE,
            &[
                ("difficulty", difficulty.as_str()),
                ("ordinal", ordinal.to_string().as_str()),
                ("context", context),
            ],
        );

        let text = self
            .complete(&json_system(QUESTION_TASK), &prompt, QUESTION_OPTIONS)
            .await?;
        parse_json_payload::<QuestionPayload>(&text)?.into_question(difficulty, ordinal)
    }

    async fn try_evaluate_answer(
        &self,
        question: &Question,
        answer: &str,
    ) -> Result<Evaluation, LlmError> {
        let prompt = fill(
            EVALUATION_PROMPT_TEMPLATE,
            &[
                ("question", question.text.as_str()),
                ("ideal_solution", question.ideal_solution.as_str()),
                ("answer", answer),
            ],
        );

        let text = self
            .complete(&json_system(EVALUATION_TASK), &prompt, EVALUATION_OPTIONS)
            .await?;
        Ok(parse_json_payload::<EvaluationPayload>(&text)?.into_evaluation())
    }

    async fn try_generate_feedback(
        &self,
        answer: &str,
        question: &Question,
        recent_history: &[ConversationTurn],
    ) -> Result<String, LlmError> {
        let prompt = fill(
            FEEDBACK_PROMPT_TEMPLATE,
            &[
                ("question", question.text.as_str()),
                ("ideal_solution", question.ideal_solution.as_str()),
                ("answer", answer),
                ("history", format_history(recent_history).as_str()),
            ],
        );

        let text = self
            .complete(&prose_system(FEEDBACK_TASK), &prompt, FEEDBACK_OPTIONS)
            .await?;
        non_blank(text)
    }

    async fn try_generate_report(
        &self,
        questions: &[Question],
        answers: &[String],
        card: &Scorecard,
        evaluations: &[Evaluation],
    ) -> Result<String, LlmError> {
        let prompt = fill(
            REPORT_PROMPT_TEMPLATE,
            &[
                ("overall", format!("{:.1}", card.overall).as_str()),
                ("correctness", format!("{:.1}", card.correctness).as_str()),
                ("efficiency", format!("{:.1}", card.efficiency).as_str()),
                ("clarity", format!("{:.1}", card.clarity).as_str()),
                ("tier", card.tier.label()),
                ("qa_context", qa_context(questions, answers, evaluations).as_str()),
            ],
        );

        let text = self
            .complete(&prose_system(REPORT_TASK), &prompt, REPORT_OPTIONS)
            .await?;
        non_blank(text)
    }
}

#[async_trait]
impl Gateway for LlmGateway {
    async fn generate_question(
        &self,
        difficulty: Difficulty,
        ordinal: u32,
        context: &str,
    ) -> Question {
        match self.try_generate_question(difficulty, ordinal, context).await {
            Ok(question) => {
                debug!("Generated question {} ({})", ordinal, difficulty);
                question
            }
            Err(e) => {
                warn!(
                    "Question generation failed for #{} ({}), using fallback: {e}",
                    ordinal, difficulty
                );
                fallback_question(difficulty, ordinal)
            }
        }
    }

    async fn evaluate_answer(&self, question: &Question, answer: &str) -> Evaluation {
        self.try_evaluate_answer(question, answer)
            .await
            .unwrap_or_else(|e| {
                warn!(
                    "Evaluation failed for question #{}, using length heuristic: {e}",
                    question.ordinal
                );
                heuristic_evaluation(answer)
            })
    }

    async fn generate_feedback(
        &self,
        answer: &str,
        question: &Question,
        recent_history: &[ConversationTurn],
    ) -> String {
        self.try_generate_feedback(answer, question, recent_history)
            .await
            .unwrap_or_else(|e| {
                warn!(
                    "Feedback generation failed for question #{}, using template: {e}",
                    question.ordinal
                );
                basic_feedback(answer, question)
            })
    }

    async fn generate_report(
        &self,
        questions: &[Question],
        answers: &[String],
        evaluations: &[Evaluation],
    ) -> String {
        let Some(card) = Scorecard::compute(evaluations) else {
            warn!("Report requested with no evaluations");
            return basic_report(evaluations);
        };

        self.try_generate_report(questions, answers, &card, evaluations)
            .await
            .unwrap_or_else(|e| {
                warn!("Report generation failed, using score summary: {e}");
                basic_report(evaluations)
            })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt helpers
// ────────────────────────────────────────────────────────────────────────────

fn non_blank(text: String) -> Result<String, LlmError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(LlmError::EmptyContent)
    } else {
        Ok(trimmed.to_string())
    }
}

fn format_history(history: &[ConversationTurn]) -> String {
    if history.is_empty() {
        return "No previous conversation.".to_string();
    }
    history
        .iter()
        .enumerate()
        .map(|(i, turn)| {
            format!(
                "Q{n}: {}\nA{n}: {}\n",
                preview(&turn.question_preview, HISTORY_PREVIEW_CHARS),
                preview(&turn.answer, HISTORY_PREVIEW_CHARS),
                n = i + 1
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn qa_context(questions: &[Question], answers: &[String], evaluations: &[Evaluation]) -> String {
    questions
        .iter()
        .zip(answers)
        .zip(evaluations)
        .enumerate()
        .map(|(i, ((question, answer), evaluation))| {
            format!(
                "Q{n}: {}\nA{n}: {}\nScore: {:.1}/10\n",
                preview(&question.text, REPORT_PREVIEW_CHARS),
                preview(answer, REPORT_PREVIEW_CHARS),
                evaluation.overall,
                n = i + 1
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::gateway::fallback::{SUBSTANTIAL_SCORE, TERSE_SCORE};

    /// Backend that fails every call.
    struct FailingBackend;

    #[async_trait]
    impl ChatBackend for FailingBackend {
        async fn complete(
            &self,
            _system: &str,
            _prompt: &str,
            _options: CompletionOptions,
        ) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            })
        }
    }

    /// Backend that never answers within any reasonable timeout.
    struct StalledBackend;

    #[async_trait]
    impl ChatBackend for StalledBackend {
        async fn complete(
            &self,
            _system: &str,
            _prompt: &str,
            _options: CompletionOptions,
        ) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("{}".to_string())
        }
    }

    /// Backend that returns a fixed reply and records the prompts it saw.
    struct CannedBackend {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedBackend {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatBackend for CannedBackend {
        async fn complete(
            &self,
            _system: &str,
            prompt: &str,
            _options: CompletionOptions,
        ) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    fn gateway(backend: impl ChatBackend + 'static) -> LlmGateway {
        LlmGateway::new(Arc::new(backend), Duration::from_secs(5))
    }

    fn sample_question() -> Question {
        fallback_question(Difficulty::Intermediate, 1)
    }

    #[tokio::test]
    async fn test_failing_backend_question_falls_back() {
        let question = gateway(FailingBackend)
            .generate_question(Difficulty::Advanced, 3, "")
            .await;
        assert_eq!(question, fallback_question(Difficulty::Advanced, 3));
    }

    #[tokio::test]
    async fn test_failing_backend_evaluation_scores_in_range() {
        let gw = gateway(FailingBackend);
        for answer in ["", "ok", "=SUMIF(A:A,\"PROD001\",B:B) totals the product sales"] {
            let evaluation = gw.evaluate_answer(&sample_question(), answer).await;
            for score in [
                evaluation.correctness,
                evaluation.efficiency,
                evaluation.clarity,
                evaluation.overall,
            ] {
                assert!((0.0..=10.0).contains(&score));
            }
        }
    }

    #[tokio::test]
    async fn test_failing_backend_uses_length_heuristic() {
        let gw = gateway(FailingBackend);
        let long = gw
            .evaluate_answer(&sample_question(), "=SUMIF(A:A,\"PROD001\",B:B) for the total")
            .await;
        let short = gw.evaluate_answer(&sample_question(), "=SUM()").await;
        assert_eq!(long.overall, SUBSTANTIAL_SCORE);
        assert_eq!(short.overall, TERSE_SCORE);
    }

    #[tokio::test]
    async fn test_failing_backend_feedback_and_report() {
        let gw = gateway(FailingBackend);
        let question = sample_question();
        let feedback = gw
            .generate_feedback("I would use SUMIF", &question, &[])
            .await;
        assert!(feedback.contains(&question.ideal_solution));

        let evaluation = heuristic_evaluation("I would use SUMIF");
        let report = gw
            .generate_report(
                &[question],
                &["I would use SUMIF".to_string()],
                &[evaluation],
            )
            .await;
        assert!(!report.trim().is_empty());
        assert!(report.contains("Overall Score"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_triggers_fallback() {
        let gw = LlmGateway::new(Arc::new(StalledBackend), Duration::from_secs(1));
        let question = gw.generate_question(Difficulty::Intermediate, 1, "").await;
        assert_eq!(question, fallback_question(Difficulty::Intermediate, 1));
    }

    #[tokio::test]
    async fn test_malformed_question_payload_falls_back() {
        let gw = gateway(CannedBackend::new("Here's a great question about pivots!"));
        let question = gw
            .generate_question(Difficulty::IntermediateAdvanced, 2, "")
            .await;
        assert_eq!(question, fallback_question(Difficulty::IntermediateAdvanced, 2));
    }

    #[tokio::test]
    async fn test_valid_question_payload_used() {
        let gw = gateway(CannedBackend::new(
            r#"```json
{"question": "Build a running total", "ideal_solution": "=SUM($B$2:B2)",
 "key_concepts": ["absolute references"]}
```"#,
        ));
        let question = gw.generate_question(Difficulty::Advanced, 3, "ctx").await;
        assert_eq!(question.text, "Build a running total");
        assert_eq!(question.ideal_solution, "=SUM($B$2:B2)");
        assert_eq!(question.difficulty, Difficulty::Advanced);
        assert_eq!(question.ordinal, 3);
    }

    #[tokio::test]
    async fn test_question_prompt_carries_context() {
        let backend = Arc::new(CannedBackend::new("not json"));
        let gw = LlmGateway::new(backend.clone(), Duration::from_secs(5));
        gw.generate_question(Difficulty::Intermediate, 1, "").await;
        gw.generate_question(Difficulty::Advanced, 2, "Previous questions covered: SUMIF")
            .await;

        let prompts = backend.prompts.lock().unwrap();
        assert!(prompts[0].contains("First question of the interview"));
        assert!(prompts[1].contains("Previous questions covered: SUMIF"));
        assert!(prompts[1].contains("Difficulty Level: advanced"));
    }

    #[tokio::test]
    async fn test_feedback_prompt_keeps_candidate_text_literal() {
        let backend = Arc::new(CannedBackend::new("Nice work."));
        let gw = LlmGateway::new(backend.clone(), Duration::from_secs(5));
        let mut question = sample_question();
        question.text = "Where does {answer} go?".to_string();
        gw.generate_feedback("I would put {history} in B2", &question, &[])
            .await;

        let prompts = backend.prompts.lock().unwrap();
        assert!(prompts[0].contains("Question Asked: Where does {answer} go?"));
        assert!(prompts[0].contains("Candidate Answer: \"I would put {history} in B2\""));
        assert_eq!(prompts[0].matches("No previous conversation.").count(), 1);
    }

    #[tokio::test]
    async fn test_evaluation_payload_normalized() {
        let gw = gateway(CannedBackend::new(
            r#"{"correctness_score": 12, "efficiency_score": "7", "clarity_score": 6}"#,
        ));
        let evaluation = gw.evaluate_answer(&sample_question(), "answer").await;
        assert_eq!(evaluation.correctness, 10.0);
        assert_eq!(evaluation.efficiency, 7.0);
        assert!((evaluation.overall - 23.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_blank_feedback_falls_back() {
        let gw = gateway(CannedBackend::new("   "));
        let question = sample_question();
        let feedback = gw.generate_feedback("a long enough answer", &question, &[]).await;
        assert_eq!(feedback, basic_feedback("a long enough answer", &question));
    }

    #[tokio::test]
    async fn test_report_without_evaluations_returns_notice() {
        let report = gateway(CannedBackend::new("unused"))
            .generate_report(&[], &[], &[])
            .await;
        assert_eq!(report, fallback::NO_EVALUATIONS_NOTICE);
    }

    #[test]
    fn test_format_history_empty() {
        assert_eq!(format_history(&[]), "No previous conversation.");
    }

    #[test]
    fn test_format_history_truncates_entries() {
        let turn = ConversationTurn {
            question_preview: "q".repeat(80),
            answer: "a".repeat(80),
            ordinal: 1,
        };
        let formatted = format_history(&[turn]);
        assert!(formatted.contains(&format!("Q1: {}...", "q".repeat(50))));
        assert!(formatted.contains(&format!("A1: {}...", "a".repeat(50))));
    }

    #[test]
    fn test_qa_context_numbers_each_exchange() {
        let questions = vec![
            fallback_question(Difficulty::Intermediate, 1),
            fallback_question(Difficulty::Advanced, 2),
        ];
        let answers = vec!["first".to_string(), "second".to_string()];
        let evaluations = vec![heuristic_evaluation("first"), heuristic_evaluation("second")];
        let context = qa_context(&questions, &answers, &evaluations);
        assert!(context.contains("A1: first"));
        assert!(context.contains("A2: second"));
        assert!(context.contains("Score: 3.0/10"));
    }
}
