//! Chat mode UI components.

use super::conversation::{Conversation, TranscriptEvent, TranscriptView};
use super::transcript::{Message, Role, Transcript};
use crate::output;
use crate::ui::{Spinner, Style};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header() {
    println!(
        "{} {} - Conversation practice with an AI tutor",
        Style::header("lingua"),
        Style::version(format!("v{VERSION}"))
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("¡Adiós! Au revoir! Tschüss!"));
}

pub fn print_config(conversation: &Conversation) {
    let manager = conversation.manager();
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}  {}",
        Style::label("language"),
        conversation
            .language()
            .map_or_else(|| Style::secondary("(none)"), Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("provider"),
        Style::value(manager.provider_name())
    );
    println!("  {}     {}", Style::label("model"), Style::value(manager.model()));
    println!(
        "  {}   {}",
        Style::label("api key"),
        if manager.has_api_key() {
            Style::secondary("(set)")
        } else {
            Style::warning("(not set)")
        }
    );
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    let rows = [
        ("/language [name]", "Switch language and start a new conversation"),
        ("/languages", "List supported languages"),
        ("/transcript", "Print the conversation so far"),
        ("/config", "Show current configuration"),
        ("/help", "Show this help"),
        ("/quit", "Exit the tutor"),
    ];
    for (command, description) in rows {
        println!(
            "  {} {}",
            Style::command(format!("{command:18}")),
            Style::secondary(description)
        );
    }
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}

pub fn print_transcript(transcript: &Transcript) {
    if transcript.is_empty() {
        println!("{}", Style::hint("(no messages yet)"));
        println!();
        return;
    }
    for message in transcript.iter() {
        println!("{}", format_message(message));
        println!();
    }
}

fn format_message(message: &Message) -> String {
    format!("{} {}", speaker_label(message.role), message.content)
}

fn speaker_label(role: Role) -> String {
    match role {
        Role::Model => Style::speaker(format!("{role}›")),
        Role::User => Style::label(format!("{role}›")),
    }
}

/// Renders transcript events to the terminal as they happen.
///
/// User messages are not echoed: the prompt already shows what was typed.
#[derive(Default)]
pub struct TerminalView {
    spinner: Option<Spinner>,
    streaming: bool,
}

impl TerminalView {
    pub const fn new() -> Self {
        Self {
            spinner: None,
            streaming: false,
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop();
        }
    }

    fn finish_line(&mut self) {
        if self.streaming {
            println!();
            println!();
            self.streaming = false;
        }
    }
}

impl TranscriptView for TerminalView {
    fn on_event(&mut self, event: TranscriptEvent<'_>) {
        match event {
            TranscriptEvent::Reset { language } => {
                output::flush_stdout();
                crate::status!(
                    "{} Practicing {}\n",
                    Style::success("✓"),
                    Style::value(language)
                );
            }
            // Nothing else may print to stderr while the spinner runs.
            TranscriptEvent::MessageAppended(message)
                if message.role == Role::Model && message.content.is_empty() =>
            {
                self.spinner = Some(Spinner::new("Thinking..."));
            }
            TranscriptEvent::LoadingChanged(false) => {
                self.stop_spinner();
                self.finish_line();
            }
            TranscriptEvent::LoadingChanged(true)
            | TranscriptEvent::MessageAppended(_)
            | TranscriptEvent::ReplyDiscarded => {}
            TranscriptEvent::FragmentAppended(fragment) => {
                self.stop_spinner();
                if !self.streaming {
                    print!("{} ", speaker_label(Role::Model));
                    self.streaming = true;
                }
                print!("{fragment}");
                output::flush_stdout();
            }
            TranscriptEvent::Error(message) => {
                self.stop_spinner();
                self.finish_line();
                print_error(message);
            }
        }
    }
}
