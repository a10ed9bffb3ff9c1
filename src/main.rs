use anyhow::Result;
use clap::Parser;

use lingua_buddy::cli::commands::{chat, configure};
use lingua_buddy::cli::{Args, Command, exit_code};
use lingua_buddy::output::{self, OutputConfig};
use lingua_buddy::tutor::{print_languages, validate_language};
use lingua_buddy::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        verbose: args.verbose,
        no_color: args.no_color || OutputConfig::default().no_color,
    });

    if let Err(e) = run(args).await {
        eprintln!("{} {e:#}", Style::error("Error:"));
        std::process::exit(exit_code(&e));
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        None => {
            if let Some(ref lang) = args.language {
                validate_language(lang)?;
            }

            let options = chat::ChatOptions {
                language: args.language,
                model: args.model,
                endpoint: args.endpoint,
            };
            chat::run_chat(options).await?;
        }
    }

    Ok(())
}
