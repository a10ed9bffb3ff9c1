use inquire::autocompletion::{Autocomplete, Replacement};

use crate::tutor::SUPPORTED_LANGUAGES;

// Available slash commands: (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/config", "Show current configuration"),
    ("/help", "Show available commands"),
    ("/language", "Switch language and start over"),
    ("/languages", "List supported languages"),
    ("/quit", "Exit the tutor"),
    ("/transcript", "Print the conversation so far"),
];

/// Slash command autocompleter. Completes language names after `/language `.
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') {
            return Ok(vec![]);
        }

        if let Some(partial) = input.strip_prefix("/language ") {
            let partial = partial.trim().to_lowercase();
            return Ok(SUPPORTED_LANGUAGES
                .iter()
                .filter(|lang| lang.name.to_lowercase().starts_with(&partial))
                .map(|lang| format!("/language {}", lang.name))
                .collect());
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement = highlighted_suggestion.map(|s| match s.split_once("  ") {
            Some((cmd, _description)) => cmd.to_string(),
            None => s,
        });
        Ok(replacement)
    }
}

/// Slash command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Config,
    Help,
    /// Switch language; `None` opens the picker.
    Language(Option<String>),
    Languages,
    Transcript,
    Quit,
    Unknown(String),
}

/// Input types
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let parts: Vec<&str> = cmd.split_whitespace().collect();

    match parts.as_slice() {
        ["config"] => Input::Command(SlashCommand::Config),
        ["help"] => Input::Command(SlashCommand::Help),
        ["language" | "lang"] => Input::Command(SlashCommand::Language(None)),
        ["language" | "lang", rest @ ..] => {
            Input::Command(SlashCommand::Language(Some(rest.join(" "))))
        }
        ["languages"] => Input::Command(SlashCommand::Languages),
        ["transcript"] => Input::Command(SlashCommand::Transcript),
        ["quit" | "exit" | "q"] => Input::Command(SlashCommand::Quit),
        _ => Input::Command(SlashCommand::Unknown(parts.join(" "))),
    }
}
