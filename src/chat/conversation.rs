//! Drives one tutor conversation: session lifecycle and streamed replies.
//!
//! Every operation reports what changed through [`TranscriptEvent`]s so a
//! view can render incrementally without watching the state itself.

use futures_util::StreamExt;

use super::state::{InFlight, UiState};
use super::transcript::{Message, Transcript};
use crate::error::TutorError;
use crate::tutor::{ChatSession, GREETING_PROBE, SessionManager};

pub const NOT_INITIALIZED_ERROR: &str = "Chat is not initialized.";
pub const GREETING_ERROR: &str =
    "An error occurred while communicating with the AI. Please try again.";
pub const SEND_ERROR: &str = "An error occurred. Please try sending your message again.";

/// A change the view should reflect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptEvent<'a> {
    /// A new session replaced the transcript.
    Reset { language: &'a str },
    LoadingChanged(bool),
    MessageAppended(&'a Message),
    /// Text appended to the trailing reply.
    FragmentAppended(&'a str),
    /// The empty trailing reply was removed after a failure.
    ReplyDiscarded,
    Error(&'a str),
}

/// Receives transcript changes in the order they happen.
pub trait TranscriptView {
    fn on_event(&mut self, event: TranscriptEvent<'_>);
}

/// Why an operation did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    Busy,
}

/// How one operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was appended and nothing was sent.
    Ignored(IgnoreReason),
    /// The reply streamed to completion.
    Completed { fragments: usize },
    /// The error is in [`Conversation::error`].
    Failed,
}

pub struct Conversation {
    manager: SessionManager,
    session: Option<Box<dyn ChatSession>>,
    language: Option<String>,
    transcript: Transcript,
    state: UiState,
}

impl Conversation {
    pub fn new(manager: SessionManager) -> Self {
        Self {
            manager,
            session: None,
            language: None,
            transcript: Transcript::new(),
            state: UiState::default(),
        }
    }

    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub const fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub const fn manager(&self) -> &SessionManager {
        &self.manager
    }

    /// Handle to the loading flag for observers outside this struct.
    pub fn in_flight(&self) -> InFlight {
        self.state.in_flight().clone()
    }

    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.state.pending_input = text.into();
    }

    /// Starts a fresh session for `language` and lets the tutor greet.
    ///
    /// The transcript is cleared first. If the session cannot be created the
    /// error is displayed and no session remains.
    pub async fn select_language(
        &mut self,
        language: &str,
        view: &mut dyn TranscriptView,
    ) -> SendOutcome {
        let Some(_permit) = self.state.in_flight().try_acquire() else {
            return SendOutcome::Ignored(IgnoreReason::Busy);
        };
        view.on_event(TranscriptEvent::LoadingChanged(true));

        self.state.error = None;
        self.transcript.clear();
        self.session = None;
        self.language = Some(language.to_string());
        view.on_event(TranscriptEvent::Reset { language });

        let outcome = match self.manager.create_session(language).await {
            Ok(session) => {
                let session = self.session.insert(session);
                let result = stream_reply(
                    session.as_mut(),
                    GREETING_PROBE,
                    &mut self.transcript,
                    view,
                )
                .await;
                self.settle(result, GREETING_ERROR, view)
            }
            Err(e) => {
                crate::debug!("Failed to initialize chat: {e}");
                let message = format!(
                    "Failed to initialize AI Tutor. Please check your API key and try again. Error: {}",
                    error_detail(&e)
                );
                self.fail(message, view);
                SendOutcome::Failed
            }
        };

        view.on_event(TranscriptEvent::LoadingChanged(false));
        outcome
    }

    /// Sends the pending input.
    pub async fn submit(&mut self, view: &mut dyn TranscriptView) -> SendOutcome {
        let text = self.state.pending_input.clone();
        self.send(&text, view).await
    }

    /// Sends a user message and streams the tutor's reply into the transcript.
    pub async fn send(&mut self, text: &str, view: &mut dyn TranscriptView) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Ignored(IgnoreReason::EmptyInput);
        }

        let Some(_permit) = self.state.in_flight().try_acquire() else {
            return SendOutcome::Ignored(IgnoreReason::Busy);
        };

        let Some(session) = self.session.as_mut() else {
            self.fail(NOT_INITIALIZED_ERROR.to_string(), view);
            return SendOutcome::Failed;
        };

        view.on_event(TranscriptEvent::LoadingChanged(true));
        self.state.error = None;
        self.transcript.push(Message::user(text));
        if let Some(message) = self.transcript.last() {
            view.on_event(TranscriptEvent::MessageAppended(message));
        }
        self.state.pending_input.clear();

        let result = stream_reply(session.as_mut(), text, &mut self.transcript, view).await;
        let outcome = self.settle(result, SEND_ERROR, view);

        view.on_event(TranscriptEvent::LoadingChanged(false));
        outcome
    }

    fn settle(
        &mut self,
        result: Result<usize, TutorError>,
        error_message: &str,
        view: &mut dyn TranscriptView,
    ) -> SendOutcome {
        match result {
            Ok(fragments) => SendOutcome::Completed { fragments },
            Err(e) => {
                if self.transcript.discard_empty_reply() {
                    view.on_event(TranscriptEvent::ReplyDiscarded);
                }
                self.fail(error_message.to_string(), view);
                crate::debug!("Reply failed: {e}");
                SendOutcome::Failed
            }
        }
    }

    fn fail(&mut self, message: String, view: &mut dyn TranscriptView) {
        view.on_event(TranscriptEvent::Error(&message));
        self.state.error = Some(message);
    }
}

/// Appends an empty reply and fills it with fragments as they arrive.
///
/// Returns the number of fragments received. On error the partial reply is
/// left in place for the caller to settle.
async fn stream_reply(
    session: &mut dyn ChatSession,
    text: &str,
    transcript: &mut Transcript,
    view: &mut dyn TranscriptView,
) -> Result<usize, TutorError> {
    transcript.push(Message::model(""));
    if let Some(message) = transcript.last() {
        view.on_event(TranscriptEvent::MessageAppended(message));
    }

    let mut stream = session.send_stream(text).await?;
    let mut received = 0;

    while let Some(item) = stream.next().await {
        let fragment = item?;
        if transcript.append_to_reply(&fragment) {
            received += 1;
            view.on_event(TranscriptEvent::FragmentAppended(&fragment));
        }
    }

    Ok(received)
}

/// The inner message of an error, without its category prefix.
fn error_detail(error: &TutorError) -> &str {
    match error {
        TutorError::Configuration(detail)
        | TutorError::Provider(detail)
        | TutorError::UnsupportedLanguage(detail) => detail,
    }
}
