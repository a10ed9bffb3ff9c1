//! Deterministic provider driven by scripted replies.
//!
//! Used by tests to exercise the conversation flow without a network.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::provider::{ChatProvider, ChatSession, SessionRequest, TextStream};
use crate::error::{Result, TutorError};

/// What the next `send_stream` call produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    /// Stream these fragments, then finish.
    Fragments(Vec<String>),
    /// Stream these fragments, then fail with a provider error.
    FailAfter(Vec<String>, String),
    /// Fail before any fragment is produced.
    Refuse(String),
}

impl ScriptedReply {
    pub fn fragments<S: Into<String>>(fragments: impl IntoIterator<Item = S>) -> Self {
        Self::Fragments(fragments.into_iter().map(Into::into).collect())
    }

    pub fn fail_after<S: Into<String>>(
        fragments: impl IntoIterator<Item = S>,
        message: impl Into<String>,
    ) -> Self {
        Self::FailAfter(fragments.into_iter().map(Into::into).collect(), message.into())
    }

    pub fn refuse(message: impl Into<String>) -> Self {
        Self::Refuse(message.into())
    }
}

/// A provider whose sessions replay queued replies in order.
///
/// Clones share the script and the recorded calls.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    opened: Arc<Mutex<Vec<SessionRequest>>>,
    sent: Arc<Mutex<Vec<String>>>,
    open_error: Option<String>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_replies(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            ..Self::default()
        }
    }

    /// A provider that cannot open sessions.
    pub fn failing_to_open(message: impl Into<String>) -> Self {
        Self {
            open_error: Some(message.into()),
            ..Self::default()
        }
    }

    pub async fn push_reply(&self, reply: ScriptedReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Every session request received, oldest first.
    pub async fn opened_sessions(&self) -> Vec<SessionRequest> {
        self.opened.lock().await.clone()
    }

    /// Every message sent through any session, oldest first.
    pub async fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn open_session(&self, request: SessionRequest) -> Result<Box<dyn ChatSession>> {
        if let Some(message) = &self.open_error {
            return Err(TutorError::provider(message.clone()));
        }

        self.opened.lock().await.push(request);
        Ok(Box::new(ScriptedSession {
            replies: Arc::clone(&self.replies),
            sent: Arc::clone(&self.sent),
        }))
    }
}

struct ScriptedSession {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ChatSession for ScriptedSession {
    async fn send_stream(&mut self, message: &str) -> Result<TextStream> {
        self.sent.lock().await.push(message.to_string());

        let reply = self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| ScriptedReply::refuse("no scripted reply left"));

        let items: Vec<Result<String>> = match reply {
            ScriptedReply::Fragments(fragments) => fragments.into_iter().map(Ok).collect(),
            ScriptedReply::FailAfter(fragments, message) => fragments
                .into_iter()
                .map(Ok)
                .chain(std::iter::once(Err(TutorError::Provider(message))))
                .collect(),
            ScriptedReply::Refuse(message) => return Err(TutorError::Provider(message)),
        };

        Ok(Box::pin(futures_util::stream::iter(items)))
    }
}
