//! Gemini `generativelanguage` API backend.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Url};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::provider::{ChatProvider, ChatSession, SessionRequest, TextStream};
use super::sse_parser::sse_to_text_stream;
use crate::error::{Result, TutorError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

impl Content {
    fn new(role: Option<&'static str>, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: &'a Content,
    contents: Vec<Content>,
}

/// Opens sessions against the Gemini API.
pub struct GeminiProvider {
    client: Client,
    endpoint: String,
}

impl GeminiProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn stream_url(&self, model: &str) -> Result<Url> {
        let raw = format!(
            "{}/v1beta/models/{model}:streamGenerateContent?alt=sse",
            self.endpoint.trim_end_matches('/')
        );
        Url::parse(&raw)
            .map_err(|e| TutorError::provider(format!("Invalid API endpoint '{}': {e}", self.endpoint)))
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn open_session(&self, request: SessionRequest) -> Result<Box<dyn ChatSession>> {
        let url = self.stream_url(&request.model)?;

        Ok(Box::new(GeminiSession {
            client: self.client.clone(),
            url,
            api_key: request.api_key,
            system_instruction: Content::new(None, request.system_instruction),
            history: Arc::new(Mutex::new(Vec::new())),
        }))
    }
}

/// A Gemini chat. Completed exchanges are kept as history and resent with
/// every message.
pub struct GeminiSession {
    client: Client,
    url: Url,
    api_key: String,
    system_instruction: Content,
    history: Arc<Mutex<Vec<Content>>>,
}

#[async_trait]
impl ChatSession for GeminiSession {
    async fn send_stream(&mut self, message: &str) -> Result<TextStream> {
        let user_turn = Content::new(Some("user"), message);

        let mut contents = self.history.lock().await.clone();
        contents.push(user_turn.clone());

        let body = GenerateContentRequest {
            system_instruction: &self.system_instruction,
            contents,
        };

        let response = self
            .client
            .post(self.url.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                TutorError::provider(format!(
                    "Failed to connect to API endpoint {}: {e}",
                    self.url.origin().ascii_serialization()
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TutorError::provider(format!(
                "API request failed with status {status}: {body}"
            )));
        }

        let mut fragments = Box::pin(sse_to_text_stream(response.bytes_stream()));
        let history = Arc::clone(&self.history);

        let recorded = async_stream::stream! {
            let mut reply = String::new();

            while let Some(item) = fragments.next().await {
                match item {
                    Ok(text) => {
                        reply.push_str(&text);
                        yield Ok(text);
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }

            // Only completed exchanges with text become context for later
            // turns. The API rejects empty text parts.
            if !reply.is_empty() {
                history
                    .lock()
                    .await
                    .extend([user_turn, Content::new(Some("model"), reply)]);
            }
        };

        Ok(Box::pin(recorded))
    }
}
