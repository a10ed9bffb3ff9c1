//! Server-Sent Events (SSE) parser for Gemini `streamGenerateContent?alt=sse` responses.
//!
//! Each `data:` line carries one `GenerateContentResponse` JSON object. Text
//! lives in `candidates[].content.parts[].text`; an `error` object in a payload
//! ends the stream.

use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;
use std::fmt::Display;

use crate::error::{Result, TutorError};

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<u16>,
    message: String,
}

/// Converts a raw SSE byte stream into a stream of text fragments.
///
/// Lines are split on raw bytes so multi-byte characters that straddle chunk
/// boundaries survive. A trailing line without a newline is flushed when the
/// byte stream ends. A transport error or an API error payload yields one
/// `Err` and ends the stream.
pub fn sse_to_text_stream<E>(
    byte_stream: impl Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
) -> impl Stream<Item = Result<String>> + Send
where
    E: Display + Send + 'static,
{
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(TutorError::provider(format!("Stream error: {e}")));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=line_end).collect();

                match parse_sse_line(String::from_utf8_lossy(&line).trim()) {
                    Some(Ok(text)) => yield Ok(text),
                    Some(Err(e)) => {
                        yield Err(e);
                        return;
                    }
                    None => {}
                }
            }
        }

        if let Some(last) = parse_sse_line(String::from_utf8_lossy(&buffer).trim()) {
            yield last;
        }
    }
}

/// Parses a single trimmed SSE line.
///
/// * `Some(Ok(text))` - a data event carrying non-empty text
/// * `Some(Err(_))` - a data event carrying an API error
/// * `None` - comments, other fields, empty text, or unparsable payloads
fn parse_sse_line(line: &str) -> Option<Result<String>> {
    let json_str = line.strip_prefix("data:")?.trim_start();

    let response = serde_json::from_str::<StreamResponse>(json_str).ok()?;

    if let Some(error) = response.error {
        let message = match error.code {
            Some(code) => format!("API error {code}: {}", error.message),
            None => format!("API error: {}", error.message),
        };
        return Some(Err(TutorError::Provider(message)));
    }

    let text: String = response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() { None } else { Some(Ok(text)) }
}
