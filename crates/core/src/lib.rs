//! Feedback generation for interview practice answers.
//!
//! [`FeedbackOrchestrator`] is the entry point: given the category criteria, a
//! question, an answer and an optional credential, it always returns feedback
//! text, either from a remote chat-completion service or from the local
//! [`heuristic`] fallback.

pub mod codec;
pub mod feedback;
pub mod heuristic;
pub mod llm_client;
pub mod prompt;

pub use codec::GenerationParams;
pub use feedback::{BLANK_ANSWER_FEEDBACK, FeedbackOrchestrator};
pub use llm_client::{FeedbackClient, OpenAiFeedbackClient, RemoteFailure};
pub use prompt::Prompt;
