//! Gemini API integration.
//!
//! Provides the `generateContent` client and the prompt template used
//! for answer evaluation.

mod client;
mod prompts;

pub use client::GeminiClient;
pub use prompts::{PromptTemplate, DEFAULT_TEMPLATE};
