//! Question Bank
//!
//! The fixed questions and evaluation criteria for each practice category.

use std::{fmt, str::FromStr};

const BASE_CRITERIA: &str = "- Clear, structured STAR answers\n- Relevant, specific, professional\n";

/// A practice category, selecting both the questions and the criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Hr,
    Technical,
    Interpersonal,
}

impl Category {
    /// All categories in menu order; option `n` of the menu is `ALL[n - 1]`.
    pub const ALL: [Category; 3] = [Category::Hr, Category::Technical, Category::Interpersonal];

    pub fn label(self) -> &'static str {
        match self {
            Category::Technical => "Technical",
            Category::Hr => "HR",
            Category::Interpersonal => "Interpersonal",
        }
    }

    /// The five questions asked in a session for this category.
    pub fn questions(self) -> &'static [&'static str; 5] {
        match self {
            Category::Technical => &[
                "Explain a challenging technical problem you solved.",
                "Describe the architecture of a project you built.",
                "How do you approach debugging a complex issue?",
                "Which data structures would you use for a problem you faced, and why?",
                "How do you ensure code quality and testing?",
            ],
            Category::Hr => &[
                "Tell me about yourself and your background.",
                "Why do you want to work for our company?",
                "What are your strengths and weaknesses?",
                "Tell us about a time you received constructive criticism.",
                "Where do you see yourself in 5 years?",
            ],
            Category::Interpersonal => &[
                "Describe a conflict you had with a coworker and how you resolved it.",
                "Tell me about a time you led a team under pressure.",
                "Give an example of when you had to persuade someone to accept your idea.",
                "How do you handle feedback that you disagree with?",
                "Tell me about a time you helped a colleague improve.",
            ],
        }
    }

    /// The evaluation criteria block for this category.
    pub fn criteria(self) -> String {
        let specific = match self {
            Category::Technical => "- Technical depth & trade-offs\n- Testing & architecture\n",
            Category::Hr => "- Motivation & cultural fit\n",
            Category::Interpersonal => "- Collaboration & emotional intelligence\n",
        };
        format!("{BASE_CRITERIA}{specific}")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a menu choice: the option number or the category name.
///
/// Used for `--category`, so `1`, `hr` and `HR` all select the same category.
impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "hr" => Ok(Category::Hr),
            "2" | "technical" => Ok(Category::Technical),
            "3" | "interpersonal" => Ok(Category::Interpersonal),
            other => Err(format!("Invalid category '{}'. Try 1, 2, or 3.", other)),
        }
    }
}
