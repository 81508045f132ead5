//! Answer evaluation via LLM judgment.
//!
//! This module implements the core evaluation round-trip:
//! 1. Render the evaluation prompt from the question, answer and duration
//! 2. Call the generation API
//! 3. Parse the model's JSON verdict into a typed result
//! 4. Map upstream failures to a degraded result instead of an error
//!
//! Only a missing credential surfaces as an error; transport and parse
//! failures always come back as a well-formed, degraded [`Evaluation`].

use crate::error::{EvalError, Result};
use crate::gemini::{GeminiClient, PromptTemplate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Feedback used when the model's reply could not be processed.
const PARSE_FAILURE_FEEDBACK: &str =
    "Could not evaluate the answer: failed to process the AI response. Please try again.";

/// Feedback used when the generation API could not be reached.
const TRANSPORT_FAILURE_FEEDBACK: &str =
    "Could not evaluate the answer: the AI service was unreachable. Please try again.";

/// Follow-up substituted when the model marks an answer generic but
/// leaves the probing question empty.
const DEFAULT_FOLLOW_UP: &str = "Could you walk me through the specific situation, \
     the task you were responsible for, the actions you took, and the result you achieved?";

/// The outcome of evaluating one answer.
///
/// Exactly one of two shapes: a substantive verdict (`is_generic` false,
/// score and feedback populated, empty follow-up) or a generic verdict
/// (`is_generic` true, score 0, non-empty follow-up question).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Quality score in [0, 100]. Always 0 for generic answers.
    pub score: f32,
    /// Feedback on the answer, or a diagnostic message for degraded results.
    pub feedback: String,
    /// Whether the answer was too short, clichéd or off-topic to score.
    pub is_generic: bool,
    /// Probing question for generic answers; empty otherwise.
    pub follow_up_question: String,
}

impl Evaluation {
    /// A degraded result standing in for a failed round-trip.
    fn degraded(feedback: impl Into<String>) -> Self {
        Self {
            score: 0.0,
            feedback: feedback.into(),
            is_generic: false,
            follow_up_question: String::new(),
        }
    }

    /// Enforce the result invariants on a model-supplied verdict.
    ///
    /// The upstream model is untrusted generation, so its verdict is
    /// normalized rather than passed through: the score is clamped to
    /// [0, 100], a generic verdict forces score 0 and a non-empty
    /// follow-up, a substantive verdict has no follow-up.
    fn normalized(mut self) -> Self {
        if !self.score.is_finite() {
            self.score = 0.0;
        }
        self.score = self.score.clamp(0.0, 100.0);

        if self.is_generic {
            self.score = 0.0;
            if self.follow_up_question.trim().is_empty() {
                self.follow_up_question = DEFAULT_FOLLOW_UP.to_string();
            }
        } else {
            self.follow_up_question.clear();
        }

        self
    }
}

/// Evaluates interview answers through the generation API.
pub struct AnswerEvaluator {
    client: GeminiClient,
    template: PromptTemplate,
}

impl AnswerEvaluator {
    /// Create an evaluator with the built-in prompt template.
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            template: PromptTemplate::default(),
        }
    }

    /// Create an evaluator with a custom prompt template.
    pub fn with_template(client: GeminiClient, template: PromptTemplate) -> Self {
        Self { client, template }
    }

    /// Evaluate a candidate's answer.
    ///
    /// `duration_seconds` is the elapsed answer time, passed to the model
    /// as a behavioural signal (copy-paste / hesitation heuristics).
    ///
    /// Returns `Err` only for a missing credential. Upstream errors and
    /// unparseable replies come back as a degraded [`Evaluation`] whose
    /// feedback says what went wrong.
    pub async fn evaluate(
        &self,
        question: &str,
        answer: &str,
        duration_seconds: u32,
    ) -> Result<Evaluation> {
        let prompt = self.template.render(question, answer, duration_seconds);

        let text = match self.client.generate(&prompt).await {
            Ok(text) => text,
            Err(err) => return Self::degrade(err),
        };

        match Self::parse_evaluation(&text) {
            Ok(evaluation) => Ok(evaluation.normalized()),
            Err(_) => Ok(Evaluation::degraded(PARSE_FAILURE_FEEDBACK)),
        }
    }

    /// Map a round-trip failure to a degraded result, or let it surface.
    ///
    /// Only configuration errors cross the boundary; upstream, transport
    /// and parse failures are absorbed.
    fn degrade(err: EvalError) -> Result<Evaluation> {
        match err {
            EvalError::Config(_) => Err(err),
            EvalError::Upstream { status, .. } => Ok(Evaluation::degraded(format!(
                "Could not evaluate the answer: the AI service responded with HTTP {}. Please try again.",
                status
            ))),
            EvalError::Envelope(_) | EvalError::Payload(_) => {
                Ok(Evaluation::degraded(PARSE_FAILURE_FEEDBACK))
            }
            _ => Ok(Evaluation::degraded(TRANSPORT_FAILURE_FEEDBACK)),
        }
    }

    /// Parse the model's reply into an [`Evaluation`].
    ///
    /// The reply may be wrapped in markdown code fences or surrounded by
    /// prose. Field names are matched case-insensitively; missing fields
    /// fall back to neutral defaults.
    fn parse_evaluation(text: &str) -> Result<Evaluation> {
        let json_str = Self::extract_json(text);

        let value: Value = serde_json::from_str(&json_str)?;
        let object = value
            .as_object()
            .ok_or_else(|| EvalError::Payload("expected a JSON object".to_string()))?;

        let field = |name: &str| {
            object
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
        };

        Ok(Evaluation {
            score: field("score").and_then(Value::as_f64).unwrap_or(0.0) as f32,
            feedback: field("feedback")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            is_generic: field("isGeneric").and_then(Value::as_bool).unwrap_or(false),
            follow_up_question: field("followUpQuestion")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }

    /// Extract JSON from a potentially markdown-wrapped reply.
    fn extract_json(response: &str) -> String {
        let response = response.trim();

        // Check for ```json code block
        if response.starts_with("```json") {
            if let Some(end) = response.rfind("```") {
                let start = "```json".len();
                if end > start {
                    return response[start..end].trim().to_string();
                }
            }
        }

        // Check for ``` code block
        if response.starts_with("```") {
            if let Some(end) = response.rfind("```") {
                let start = response.find('\n').map(|n| n + 1).unwrap_or(3);
                if end > start {
                    return response[start..end].trim().to_string();
                }
            }
        }

        // Find JSON object
        if let Some(start) = response.find('{') {
            if let Some(end) = response.rfind('}') {
                if end > start {
                    return response[start..=end].to_string();
                }
            }
        }

        response.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeminiConfig;

    #[test]
    fn test_parse_evaluation_round_trip() {
        let text = r#"{"score":75,"feedback":"Good detail","isGeneric":false,"followUpQuestion":""}"#;
        let evaluation = AnswerEvaluator::parse_evaluation(text).unwrap();

        assert_eq!(evaluation.score, 75.0);
        assert_eq!(evaluation.feedback, "Good detail");
        assert!(!evaluation.is_generic);
        assert!(evaluation.follow_up_question.is_empty());
    }

    #[test]
    fn test_parse_evaluation_fenced() {
        let fenced = "```json\n{\"score\":75,\"feedback\":\"Good detail\",\"isGeneric\":false,\"followUpQuestion\":\"\"}\n```";
        let plain = r#"{"score":75,"feedback":"Good detail","isGeneric":false,"followUpQuestion":""}"#;

        let from_fenced = AnswerEvaluator::parse_evaluation(fenced).unwrap();
        let from_plain = AnswerEvaluator::parse_evaluation(plain).unwrap();

        assert_eq!(from_fenced.score, from_plain.score);
        assert_eq!(from_fenced.feedback, from_plain.feedback);
        assert_eq!(from_fenced.is_generic, from_plain.is_generic);
    }

    #[test]
    fn test_parse_evaluation_case_insensitive_keys() {
        let text = r#"{"SCORE":60,"Feedback":"Solid","ISGENERIC":false,"followupquestion":""}"#;
        let evaluation = AnswerEvaluator::parse_evaluation(text).unwrap();

        assert_eq!(evaluation.score, 60.0);
        assert_eq!(evaluation.feedback, "Solid");
        assert!(!evaluation.is_generic);
    }

    #[test]
    fn test_parse_evaluation_generic_answer() {
        let text = r#"{"score":0,"feedback":"Too vague","isGeneric":true,"followUpQuestion":"What exactly did you do?"}"#;
        let evaluation = AnswerEvaluator::parse_evaluation(text).unwrap();

        assert!(evaluation.is_generic);
        assert_eq!(evaluation.follow_up_question, "What exactly did you do?");
    }

    #[test]
    fn test_parse_evaluation_missing_fields_default() {
        let evaluation = AnswerEvaluator::parse_evaluation(r#"{"score": 40}"#).unwrap();

        assert_eq!(evaluation.score, 40.0);
        assert!(evaluation.feedback.is_empty());
        assert!(!evaluation.is_generic);
    }

    #[test]
    fn test_parse_evaluation_truncated_fails() {
        assert!(AnswerEvaluator::parse_evaluation(r#"{"score":5,"#).is_err());
    }

    #[test]
    fn test_parse_evaluation_non_object_fails() {
        assert!(AnswerEvaluator::parse_evaluation("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_extract_json_with_prose() {
        let response = r#"Here is my verdict: {"score": 10} hope it helps"#;
        assert_eq!(AnswerEvaluator::extract_json(response), r#"{"score": 10}"#);
    }

    #[test]
    fn test_normalized_clamps_score() {
        let evaluation = Evaluation {
            score: 250.0,
            feedback: "over the top".to_string(),
            is_generic: false,
            follow_up_question: String::new(),
        }
        .normalized();
        assert_eq!(evaluation.score, 100.0);

        let negative = Evaluation {
            score: -5.0,
            feedback: String::new(),
            is_generic: false,
            follow_up_question: String::new(),
        }
        .normalized();
        assert_eq!(negative.score, 0.0);
    }

    #[test]
    fn test_normalized_generic_forces_zero_score_and_follow_up() {
        let evaluation = Evaluation {
            score: 80.0,
            feedback: "needs probing".to_string(),
            is_generic: true,
            follow_up_question: "  ".to_string(),
        }
        .normalized();

        assert_eq!(evaluation.score, 0.0);
        assert!(!evaluation.follow_up_question.trim().is_empty());
    }

    #[test]
    fn test_normalized_substantive_clears_follow_up() {
        let evaluation = Evaluation {
            score: 55.0,
            feedback: "fine".to_string(),
            is_generic: false,
            follow_up_question: "stray question".to_string(),
        }
        .normalized();

        assert_eq!(evaluation.score, 55.0);
        assert!(evaluation.follow_up_question.is_empty());
    }

    #[test]
    fn test_degrade_upstream_status_carries_code() {
        let evaluation = AnswerEvaluator::degrade(EvalError::Upstream {
            status: 429,
            body: "quota".to_string(),
        })
        .unwrap();

        assert_eq!(evaluation.score, 0.0);
        assert!(evaluation.feedback.contains("429"));
        assert!(!evaluation.is_generic);
    }

    #[test]
    fn test_degrade_parse_failures_use_generic_feedback() {
        let from_envelope =
            AnswerEvaluator::degrade(EvalError::Envelope("bad".to_string())).unwrap();
        assert_eq!(from_envelope.score, 0.0);
        assert_eq!(from_envelope.feedback, PARSE_FAILURE_FEEDBACK);

        let from_transport =
            AnswerEvaluator::degrade(EvalError::Http("refused".to_string())).unwrap();
        assert_eq!(from_transport.score, 0.0);
        assert_eq!(from_transport.feedback, TRANSPORT_FAILURE_FEEDBACK);
    }

    #[test]
    fn test_degrade_config_error_surfaces() {
        let result = AnswerEvaluator::degrade(EvalError::Config("no key".to_string()));
        assert!(matches!(result, Err(EvalError::Config(_))));
    }

    #[test]
    fn test_evaluate_fails_fast_without_credential() {
        // Unroutable base URL: if the credential check did not fail fast,
        // this test would hang on a connection attempt instead of
        // returning a configuration error.
        let config = GeminiConfig {
            api_base: "http://127.0.0.1:1".to_string(),
            api_key: String::new(),
            model: "gemini-test".to_string(),
            ..Default::default()
        };
        let evaluator = AnswerEvaluator::new(GeminiClient::new(config));

        let result =
            tokio_test::block_on(evaluator.evaluate("Why this role?", "Because.", 4));
        assert!(matches!(result, Err(EvalError::Config(_))));
    }
}
