//! The generative-AI capability the tutor is built on.
//!
//! A provider opens sessions bound to a system instruction; a session sends
//! one message at a time and returns the reply as a lazy, finite stream of
//! text fragments.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::error::Result;

/// A reply in flight: fragments in delivery order. An `Err` item ends the stream.
pub type TextStream = BoxStream<'static, Result<String>>;

/// Everything a provider needs to open a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub api_key: String,
    pub model: String,
    pub system_instruction: String,
}

/// A conversational context bound to one system instruction.
#[async_trait]
pub trait ChatSession: Send {
    /// Sends `message` and returns the streamed reply.
    ///
    /// Fails if the request could not be started. Failures after the first
    /// byte arrive as an `Err` item on the stream.
    async fn send_stream(&mut self, message: &str) -> Result<TextStream>;
}

/// Opens chat sessions against a backend.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Human readable backend name, for `/config`.
    fn name(&self) -> &'static str;

    async fn open_session(&self, request: SessionRequest) -> Result<Box<dyn ChatSession>>;
}
