//! Practice Session Runner
//!
//! Runs one session: ask every question of the chosen category, then print the
//! criteria followed by feedback for each answer, one question at a time.

use crate::{prompter::Prompter, questions::Category};
use anyhow::Result;
use coach_core::FeedbackOrchestrator;
use secrecy::SecretString;
use std::io::Write;
use tracing::info;

/// Shown in place of a blank answer.
const BLANK_MARKER: &str = "(blank)";

/// The outcome for one question of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFeedback {
    pub question: &'static str,
    pub answer: String,
    pub feedback: String,
}

/// Runs a full practice session and writes the report to `out`.
///
/// All answers are collected before any feedback is requested. Feedback is
/// then resolved sequentially, and printed as soon as each one is ready.
pub async fn run_session<P, W>(
    prompter: &mut P,
    orchestrator: &FeedbackOrchestrator,
    category: Category,
    credential: Option<&SecretString>,
    out: &mut W,
) -> Result<Vec<QuestionFeedback>>
where
    P: Prompter + ?Sized,
    W: Write,
{
    info!(%category, remote = credential.is_some(), "Starting practice session");
    let questions = category.questions();

    let mut answers = Vec::with_capacity(questions.len());
    for (i, question) in questions.iter().enumerate() {
        answers.push(prompter.read_answer(i + 1, question)?);
    }

    let criteria = category.criteria();
    writeln!(out, "\n--- Evaluation Criteria ---\n{criteria}")?;
    writeln!(out, "--- Feedback ---")?;

    let mut results = Vec::with_capacity(questions.len());
    for (i, (question, answer)) in questions.iter().copied().zip(answers).enumerate() {
        let feedback = orchestrator
            .get_feedback(&criteria, question, &answer, credential)
            .await;

        let shown = if answer.trim().is_empty() {
            BLANK_MARKER
        } else {
            answer.as_str()
        };
        writeln!(out, "Q{}: {}", i + 1, question)?;
        writeln!(out, "A: {shown}")?;
        writeln!(out, "{feedback}\n")?;
        out.flush()?;

        results.push(QuestionFeedback {
            question,
            answer,
            feedback,
        });
    }

    info!(%category, "Practice session complete");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use coach_core::{
        BLANK_ANSWER_FEEDBACK, FeedbackClient, Prompt, RemoteFailure, heuristic,
    };
    use std::{
        collections::VecDeque,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    struct ScriptedPrompter {
        answers: VecDeque<&'static str>,
        asked: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn choose_category(&mut self) -> Result<Category> {
            Ok(Category::Technical)
        }

        fn read_answer(&mut self, number: usize, question: &str) -> Result<String> {
            self.asked.push(format!("Q{number}: {question}"));
            Ok(self.answers.pop_front().unwrap_or_default().to_string())
        }
    }

    /// Counts calls and always fails with a connection error.
    #[derive(Default)]
    struct RefusingClient {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FeedbackClient for RefusingClient {
        async fn call(
            &self,
            _credential: &SecretString,
            _prompt: &Prompt,
        ) -> Result<String, RemoteFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RemoteFailure::Transport("connection refused".to_string()))
        }
    }

    const ANSWERS: [&str; 5] = [
        "I fixed a race condition by adding a lock.",
        "",
        "Bisect.",
        "A hash map, for constant-time lookups by id.",
        "Reviews and CI.",
    ];

    #[tokio::test]
    async fn offline_session_reports_every_question() {
        let client = Arc::new(RefusingClient::default());
        let orchestrator = FeedbackOrchestrator::new(client.clone());
        let mut prompter = ScriptedPrompter::new(&ANSWERS);
        let mut out = Vec::new();

        let results = run_session(&mut prompter, &orchestrator, Category::Technical, None, &mut out)
            .await
            .unwrap();

        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert_eq!(prompter.asked.len(), 5);
        assert_eq!(results.len(), 5);

        assert_eq!(results[0].feedback, heuristic::generate(ANSWERS[0]));
        assert_eq!(
            results[1].question,
            "Describe the architecture of a project you built."
        );
        assert_eq!(results[1].feedback, BLANK_ANSWER_FEEDBACK);

        let report = String::from_utf8(out).unwrap();
        assert!(report.starts_with("\n--- Evaluation Criteria ---\n- Clear, structured STAR answers"));
        assert!(report.contains("--- Feedback ---\nQ1: Explain a challenging technical problem you solved.\nA: I fixed a race condition"));
        assert!(report.contains("Q2: Describe the architecture of a project you built.\nA: (blank)\nYou left this blank."));
        assert!(report.contains("A: Bisect.\nCRITIQUE: Too brief."));
    }

    #[tokio::test]
    async fn whitespace_answer_is_reported_as_blank() {
        let orchestrator = FeedbackOrchestrator::new(Arc::new(RefusingClient::default()));
        let mut prompter = ScriptedPrompter::new(&["   ", "\t", "", " \n ", "Done."]);
        let mut out = Vec::new();

        let results = run_session(&mut prompter, &orchestrator, Category::Hr, None, &mut out)
            .await
            .unwrap();

        assert_eq!(results[0].feedback, BLANK_ANSWER_FEEDBACK);
        let report = String::from_utf8(out).unwrap();
        assert!(report.contains(
            "Q1: Tell me about yourself and your background.\nA: (blank)\nYou left this blank."
        ));
        assert_eq!(report.matches("A: (blank)\n").count(), 4);
        assert!(report.contains("A: Done.\nCRITIQUE: Too brief."));
    }

    #[tokio::test]
    async fn failing_remote_still_completes_the_session() {
        let client = Arc::new(RefusingClient::default());
        let orchestrator = FeedbackOrchestrator::new(client.clone());
        let mut prompter = ScriptedPrompter::new(&ANSWERS);
        let credential = SecretString::from("sk-test".to_string());
        let mut out = Vec::new();

        let results = run_session(
            &mut prompter,
            &orchestrator,
            Category::Technical,
            Some(&credential),
            &mut out,
        )
        .await
        .unwrap();

        // The blank answer never reaches the client.
        assert_eq!(client.calls.load(Ordering::SeqCst), 4);
        assert_eq!(
            results[0].feedback,
            format!(
                "(LLM call failed: transport error: connection refused) {}",
                heuristic::generate(ANSWERS[0])
            )
        );
        assert_eq!(results[1].feedback, BLANK_ANSWER_FEEDBACK);
    }
}
