use std::fmt;

/// The role and task given to the remote model.
const INSTRUCTION: &str =
    "You are an interview coach. Evaluate the candidate's answer against the criteria below.";

/// The labeled sections the model is asked to respond with.
///
/// The decoder never inspects these labels, so a usable reply depends on the
/// model honouring this layout.
const OUTPUT_SCHEMA: &str = "Respond using exactly these sections:\n\
CRITIQUE: 1-3 sentences\n\
SUGGESTIONS:\n\
- bullet points\n\
TIPS:\n\
- bullet points";

/// A single instruction payload for the remote service.
///
/// Combines the evaluation criteria, the question and the candidate's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Builds the prompt for one question.
    ///
    /// `answer` is expected to be non-blank; blank answers are resolved by the
    /// orchestrator before a prompt is ever built.
    pub fn build(criteria: &str, question: &str, answer: &str) -> Self {
        Self(format!(
            "{INSTRUCTION}\n{OUTPUT_SCHEMA}\n\nCriteria:\n{}\n\nQ: {question}\nA: {answer}",
            criteria.trim_end()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
