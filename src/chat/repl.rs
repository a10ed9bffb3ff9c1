use anyhow::Result;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use inquire::{InquireError, Select, Text};

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::conversation::Conversation;
use super::ui::{self, TerminalView};
use crate::tutor::{SUPPORTED_LANGUAGES, print_languages, validate_language};
use crate::ui::is_prompt_cancelled;

/// The interactive tutor loop.
///
/// Reads a line, routes slash commands, and hands everything else to the
/// conversation. One operation runs at a time; the prompt is not shown
/// again until the reply has finished streaming.
pub struct TutorRepl {
    conversation: Conversation,
    view: TerminalView,
}

impl TutorRepl {
    pub const fn new(conversation: Conversation) -> Self {
        Self {
            conversation,
            view: TerminalView::new(),
        }
    }

    pub async fn run(&mut self, language: &str) -> Result<()> {
        ui::print_header();

        self.conversation
            .select_language(language, &mut self.view)
            .await;

        let render_config = render_config();

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Chat with your tutor, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd).await? {
                            break;
                        }
                    }
                    Input::Text(text) => {
                        self.conversation.set_pending_input(text);
                        self.conversation.submit(&mut self.view).await;
                    }
                },
                Err(e) if is_prompt_cancelled(&e) => {
                    println!(); // Clear line before goodbye message
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Returns `false` when the loop should end.
    async fn handle_command(&mut self, cmd: SlashCommand) -> Result<bool> {
        match cmd {
            SlashCommand::Config => ui::print_config(&self.conversation),
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Languages => {
                print_languages();
                println!();
            }
            SlashCommand::Transcript => ui::print_transcript(self.conversation.transcript()),
            SlashCommand::Language(choice) => self.switch_language(choice).await?,
            SlashCommand::Quit => return Ok(false),
            SlashCommand::Unknown(cmd) => ui::print_error(&format!("Unknown command: /{cmd}")),
        }
        Ok(true)
    }

    async fn switch_language(&mut self, choice: Option<String>) -> Result<()> {
        let name = match choice {
            Some(input) => match validate_language(&input) {
                Ok(language) => language.name,
                Err(e) => {
                    ui::print_error(&e.to_string());
                    return Ok(());
                }
            },
            None => match pick_language(self.conversation.language()) {
                Ok(name) => name,
                Err(e) if is_prompt_cancelled(&e) => return Ok(()),
                Err(e) => return Err(e.into()),
            },
        };

        self.conversation.select_language(name, &mut self.view).await;
        Ok(())
    }
}

fn pick_language(current: Option<&str>) -> Result<&'static str, InquireError> {
    let names: Vec<&'static str> = SUPPORTED_LANGUAGES.iter().map(|lang| lang.name).collect();
    let start = current
        .and_then(|c| names.iter().position(|name| *name == c))
        .unwrap_or(0);

    Select::new("Language:", names)
        .with_starting_cursor(start)
        .prompt()
}

fn render_config() -> RenderConfig<'static> {
    let prompt_style = Styled::new("❯")
        .with_fg(Color::LightBlue)
        .with_attr(Attributes::BOLD);
    let mut render_config = RenderConfig::default()
        .with_prompt_prefix(prompt_style)
        .with_answered_prompt_prefix(prompt_style);

    // Non-highlighted suggestions: gray
    render_config.option = StyleSheet::new().with_fg(Color::Grey);
    // Highlighted suggestion: purple
    render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));
    render_config
}
