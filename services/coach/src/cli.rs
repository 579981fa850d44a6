use crate::questions::Category;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "coach", version, about = "Interview practice with feedback on every answer")]
pub struct Cli {
    /// Practice category: 1/hr, 2/technical or 3/interpersonal.
    /// Prompts interactively when omitted.
    #[arg(short, long)]
    pub category: Option<Category>,

    /// Never contact the remote service, even if OPENAI_API_KEY is set.
    #[arg(long)]
    pub offline: bool,
}
