//! Interactive tutor chat.
//!
//! [`Conversation`] owns the transcript and the active session; [`TutorRepl`]
//! wires it to the terminal.

/// Slash command parsing and autocomplete.
pub mod command;
mod conversation;
mod repl;
mod state;
mod transcript;
mod ui;

pub use conversation::{
    Conversation, GREETING_ERROR, IgnoreReason, NOT_INITIALIZED_ERROR, SEND_ERROR, SendOutcome,
    TranscriptEvent, TranscriptView,
};
pub use repl::TutorRepl;
pub use state::{InFlight, InFlightPermit, UiState};
pub use transcript::{Message, Role, Transcript};
pub use ui::TerminalView;
