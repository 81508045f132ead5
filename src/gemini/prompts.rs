//! Evaluation prompt template.
//!
//! The template carries the full decision logic given to the model,
//! including the timing heuristics. It is plain text with placeholders,
//! so deployments can tune the wording without recompiling.

/// Built-in evaluation prompt.
///
/// Placeholders: `{question}`, `{answer}`, `{duration_seconds}`.
pub const DEFAULT_TEMPLATE: &str = r#"You are an intelligent interview assessment system.
Task: analyse the candidate's answer for quality, depth, and behaviour (based on the time taken to answer).

QUESTION: "{question}"
CANDIDATE ANSWER: "{answer}"
ANSWER DURATION: {duration_seconds} seconds.

DECISION LOGIC:
1. IF the answer is very short (fewer than 5 words) OR generic (cliche) OR does not address the core of the question:
- Set "isGeneric": true
- Write "followUpQuestion": a probing question that digs for the missing STAR detail (Situation, Task, Action, Result).
2. IF the answer is sufficiently detailed AND relevant:
- Set "isGeneric": false
- Give a "score" (0-100) and "feedback" as usual.
3. WEIGH THE TIMING:
- A duration under 10 seconds for a long answer indicates copy-paste. Reduce the score.
- A very long duration (over 3 minutes) indicates hesitation. Take it into account.

Reply with a single JSON object in exactly this shape (no Markdown, no other text):
{
"score": (0-100, use 0 when isGeneric=true),
"feedback": "(improvement advice, or why a follow-up is needed)",
"isGeneric": (true/false),
"followUpQuestion": "(fill only when isGeneric=true, otherwise an empty string)"
}"#;

/// Prompt template for answer evaluation.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Create a template from custom text.
    ///
    /// The text should contain the `{question}`, `{answer}` and
    /// `{duration_seconds}` placeholders; any that are missing are
    /// simply never substituted.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Render the template with the call's inputs.
    pub fn render(&self, question: &str, answer: &str, duration_seconds: u32) -> String {
        self.text
            .replace("{question}", question)
            .replace("{answer}", answer)
            .replace("{duration_seconds}", &duration_seconds.to_string())
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}
