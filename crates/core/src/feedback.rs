//! Feedback Orchestration
//!
//! Decides, once per answer, whether feedback comes from the remote service or
//! from the local heuristic, and guarantees that some feedback text is always
//! returned.

use crate::{heuristic, llm_client::FeedbackClient, prompt::Prompt};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{info, warn};

/// Returned for answers that are empty or whitespace only.
pub const BLANK_ANSWER_FEEDBACK: &str = "You left this blank. Try answering with the STAR format.";

/// Produces exactly one feedback text per answer.
///
/// A remote failure never escapes this type: it is folded into the returned
/// text as a one-line notice followed by heuristic feedback.
pub struct FeedbackOrchestrator {
    client: Arc<dyn FeedbackClient>,
}

impl FeedbackOrchestrator {
    pub fn new(client: Arc<dyn FeedbackClient>) -> Self {
        Self { client }
    }

    /// Returns feedback for one answer.
    ///
    /// # Arguments
    ///
    /// * `criteria` - Evaluation rules for the session's category.
    /// * `question` - The question that was asked.
    /// * `answer` - The candidate's answer, possibly blank.
    /// * `credential` - Bearer token for the remote service. `None` or a
    ///   blank value selects the heuristic path without any network call.
    pub async fn get_feedback(
        &self,
        criteria: &str,
        question: &str,
        answer: &str,
        credential: Option<&SecretString>,
    ) -> String {
        if answer.trim().is_empty() {
            info!("Blank answer; skipping evaluation");
            return BLANK_ANSWER_FEEDBACK.to_string();
        }

        let Some(credential) = credential.filter(|c| !c.expose_secret().trim().is_empty()) else {
            info!("No credential configured; using heuristic feedback");
            return heuristic::generate(answer);
        };

        let prompt = Prompt::build(criteria, question, answer);
        match self.client.call(credential, &prompt).await {
            Ok(feedback) => feedback,
            Err(failure) => {
                warn!(error = %failure, "Remote feedback failed; falling back to heuristic");
                format!(
                    "(LLM call failed: {failure}) {}",
                    heuristic::generate(answer)
                )
            }
        }
    }
}
