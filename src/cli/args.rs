use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lingua")]
#[command(about = "Practice conversation in a new language with an AI tutor")]
#[command(version)]
pub struct Args {
    /// Language to practice (name or ISO 639-1 code, e.g. Spanish, ja)
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// Gemini model name
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// API endpoint base URL
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    /// Suppress status messages
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Print diagnostic messages
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported languages
    Languages,
    /// Edit default settings
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
