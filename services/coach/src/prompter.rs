use crate::questions::Category;
use anyhow::Result;
use dialoguer::{Input, Select};

/// Collects the user's choices for a session.
///
/// Decouples the session flow from the terminal so it can be driven by a
/// script in tests.
pub trait Prompter {
    /// Asks the user to pick a practice category.
    fn choose_category(&mut self) -> Result<Category>;

    /// Asks one question and returns the trimmed answer, which may be empty.
    fn read_answer(&mut self, number: usize, question: &str) -> Result<String>;
}

/// A `Prompter` reading from the interactive terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn choose_category(&mut self) -> Result<Category> {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        let index = Select::new()
            .with_prompt("Pick a category")
            .items(&labels)
            .default(0)
            .interact()?;
        Ok(Category::ALL[index])
    }

    fn read_answer(&mut self, number: usize, question: &str) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(format!("Q{number}: {question}\nYour answer"))
            .allow_empty(true)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }
}
