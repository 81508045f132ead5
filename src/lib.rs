//! Interview Eval - LLM-backed evaluation of interview answers.
//!
//! This library delegates judgment of a candidate's free-text answer to a
//! remote text-generation endpoint (Gemini `generateContent`). Given the
//! question, the answer and the time taken to answer, it produces either
//! a quality score with feedback, or a "too generic" signal together with
//! a follow-up probing question.
//!
//! # Overview
//!
//! One evaluation is one round-trip:
//! 1. Render an instruction prompt embedding the question, answer and duration
//! 2. POST it to the generation endpoint as a single-turn request
//! 3. Decode the response envelope and parse the embedded JSON verdict
//! 4. Normalize the verdict (clamped score, generic/substantive invariants)
//!
//! Upstream failures never surface as errors: a non-success status or an
//! unparseable reply degrades into a score-0 result whose feedback says
//! what went wrong. Only a missing API credential is a hard error.
//!
//! # Quick Start
//!
//! ```no_run
//! use interview_eval::{
//!     config::Config,
//!     evaluator::AnswerEvaluator,
//!     gemini::GeminiClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let config = Config::load()?;
//!     config.validate()?;
//!
//!     // Create the shared client and the evaluator
//!     let client = GeminiClient::new(config.gemini.clone());
//!     let evaluator = AnswerEvaluator::with_template(client, config.prompt_template());
//!
//!     // Evaluate one answer
//!     let evaluation = evaluator
//!         .evaluate(
//!             "Tell me about a time you missed a deadline.",
//!             "On my last project the vendor API slipped two weeks, so I re-cut scope with the PM and shipped the core flow on time.",
//!             85,
//!         )
//!         .await?;
//!
//!     if evaluation.is_generic {
//!         println!("Follow-up: {}", evaluation.follow_up_question);
//!     } else {
//!         println!("{}/100: {}", evaluation.score, evaluation.feedback);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **Config**: layered configuration (env vars over YAML file)
//! - **GeminiClient**: `generateContent` client over a shared `reqwest::Client`
//! - **PromptTemplate**: tunable evaluation prompt with placeholder rendering
//! - **AnswerEvaluator**: the evaluation round-trip and failure mapping

pub mod config;
pub mod error;
pub mod evaluator;
pub mod gemini;

// Re-export commonly used types
pub use config::Config;
pub use error::{EvalError, Result};
pub use evaluator::{AnswerEvaluator, Evaluation};
pub use gemini::{GeminiClient, PromptTemplate};
