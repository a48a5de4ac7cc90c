// src/llm/provider/stream.rs
// SSE decoding for Chat Completions streaming responses

use anyhow::anyhow;
use futures::{Stream, StreamExt};
use serde_json::Value;
use tracing::{debug, warn};

use super::TextStream;

/// Events we care about in a Chat Completions stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Text delta - forward to client immediately
    TextDelta(String),
    /// `[DONE]` marker
    Done,
    /// Provider reported an error inside the stream
    Error(String),
}

impl StreamEvent {
    /// Interpret one SSE `data:` payload
    pub fn from_data(data: &str) -> Option<Self> {
        if data == "[DONE]" {
            return Some(StreamEvent::Done);
        }

        let json: Value = match serde_json::from_str(data) {
            Ok(v) => v,
            Err(e) => {
                let preview: String = data.chars().take(100).collect();
                warn!("SSE JSON parse error: {} - data: {:?}", e, preview);
                return None;
            }
        };

        if let Some(error) = json.get("error") {
            let message = error["message"].as_str().unwrap_or("Unknown error").to_string();
            return Some(StreamEvent::Error(message));
        }

        json["choices"][0]["delta"]["content"]
            .as_str()
            .filter(|text| !text.is_empty())
            .map(|text| StreamEvent::TextDelta(text.to_string()))
    }
}

/// Incremental SSE frame decoder.
///
/// Bytes may arrive split anywhere, including inside a UTF-8 sequence or
/// between the two newlines that end an event.
#[derive(Debug, Default)]
pub struct SseDecoder {
    byte_buffer: Vec<u8>,
    buffer: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return the `data` payloads of every completed event
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.byte_buffer.extend_from_slice(bytes);

        loop {
            match std::str::from_utf8(&self.byte_buffer) {
                Ok(s) => {
                    self.buffer.push_str(s);
                    self.byte_buffer.clear();
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    self.buffer
                        .push_str(&String::from_utf8_lossy(&self.byte_buffer[..valid]));
                    match e.error_len() {
                        // Invalid sequence: replace it and keep decoding
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            self.byte_buffer.drain(..valid + len);
                        }
                        // Truncated sequence: wait for the rest
                        None => {
                            self.byte_buffer.drain(..valid);
                            break;
                        }
                    }
                }
            }
        }

        self.extract_events()
    }

    /// Flush whatever is left once the body has ended
    pub fn finish(&mut self) -> Vec<String> {
        if self.buffer.trim().is_empty() {
            self.buffer.clear();
            return Vec::new();
        }
        self.buffer.push_str("\n\n");
        self.extract_events()
    }

    fn extract_events(&mut self) -> Vec<String> {
        let mut events = Vec::new();

        loop {
            let crlf = self.buffer.find("\r\n\r\n").map(|pos| (pos, 4));
            let lf = self.buffer.find("\n\n").map(|pos| (pos, 2));
            let boundary = match (crlf, lf) {
                (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
                (a, b) => a.or(b),
            };

            let Some((pos, len)) = boundary else {
                break;
            };

            let event_text: String = self.buffer.drain(..pos + len).collect();

            let mut data_parts = Vec::new();
            for line in event_text[..pos].lines() {
                if let Some(rest) = line.strip_prefix("data:") {
                    let value = rest.strip_prefix(' ').unwrap_or(rest);
                    data_parts.push(value.to_string());
                } else if let Some(event_type) = line.strip_prefix("event:") {
                    debug!("SSE event type: {}", event_type.trim());
                }
            }

            if !data_parts.is_empty() {
                events.push(data_parts.join("\n"));
            }
        }

        events
    }
}

/// Turn a provider's SSE byte stream into a stream of text fragments.
///
/// Ends at `[DONE]` or when the body ends. A provider error frame or a
/// transport error is yielded once and terminates the stream.
pub fn text_stream<S, B, E>(bytes: S) -> TextStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let stream = async_stream::stream! {
        let mut bytes = Box::pin(bytes);
        let mut decoder = SseDecoder::new();
        let mut finished = false;

        'outer: while let Some(chunk) = bytes.next().await {
            let payloads = match chunk {
                Ok(chunk) => decoder.push(chunk.as_ref()),
                Err(e) => {
                    yield Err(anyhow!("Stream error: {}", e));
                    finished = true;
                    break;
                }
            };

            for data in payloads {
                match StreamEvent::from_data(&data) {
                    Some(StreamEvent::TextDelta(text)) => {
                        yield Ok(text);
                    }
                    Some(StreamEvent::Done) => {
                        debug!("Stream completed: [DONE] marker received");
                        finished = true;
                        break 'outer;
                    }
                    Some(StreamEvent::Error(message)) => {
                        yield Err(anyhow!("Provider stream error: {}", message));
                        finished = true;
                        break 'outer;
                    }
                    None => {}
                }
            }
        }

        if !finished {
            for data in decoder.finish() {
                match StreamEvent::from_data(&data) {
                    Some(StreamEvent::TextDelta(text)) => {
                        yield Ok(text);
                    }
                    Some(StreamEvent::Error(message)) => {
                        yield Err(anyhow!("Provider stream error: {}", message));
                    }
                    _ => {}
                }
            }
        }
    };

    Box::pin(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> String {
        format!(
            "data: {}\n\n",
            serde_json::json!({"choices": [{"delta": {"content": text}}]})
        )
    }

    #[test]
    fn test_event_parsing() {
        assert_eq!(StreamEvent::from_data("[DONE]"), Some(StreamEvent::Done));
        assert_eq!(
            StreamEvent::from_data(r#"{"choices":[{"delta":{"content":"Hi"}}]}"#),
            Some(StreamEvent::TextDelta("Hi".into()))
        );
        assert_eq!(
            StreamEvent::from_data(r#"{"choices":[{"delta":{"role":"assistant"}}]}"#),
            None
        );
        assert_eq!(
            StreamEvent::from_data(r#"{"error":{"message":"rate limited"}}"#),
            Some(StreamEvent::Error("rate limited".into()))
        );
        assert_eq!(StreamEvent::from_data("not json"), None);
    }

    #[test]
    fn test_decoder_handles_split_frames() {
        let mut decoder = SseDecoder::new();
        let frame = chunk("Hello");
        let (a, b) = frame.split_at(10);

        assert!(decoder.push(a.as_bytes()).is_empty());
        let events = decoder.push(b.as_bytes());
        assert_eq!(events.len(), 1);
        assert_eq!(
            StreamEvent::from_data(&events[0]),
            Some(StreamEvent::TextDelta("Hello".into()))
        );
    }

    #[test]
    fn test_decoder_handles_split_utf8() {
        let mut decoder = SseDecoder::new();
        let frame = chunk("café");
        let bytes = frame.as_bytes();
        let split = frame.find('é').unwrap() + 1; // inside the two-byte sequence

        assert!(decoder.push(&bytes[..split]).is_empty());
        let events = decoder.push(&bytes[split..]);
        assert_eq!(
            StreamEvent::from_data(&events[0]),
            Some(StreamEvent::TextDelta("café".into()))
        );
    }

    #[test]
    fn test_decoder_crlf_and_comments() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b": keep-alive\r\n\r\nevent: message\r\ndata: [DONE]\r\n\r\n");
        assert_eq!(events, vec!["[DONE]".to_string()]);
    }

    #[test]
    fn test_decoder_flushes_tail() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: [DONE]").is_empty());
        assert_eq!(decoder.finish(), vec!["[DONE]".to_string()]);
    }

    #[tokio::test]
    async fn test_text_stream_collects_fragments() {
        let body = format!("{}{}data: [DONE]\n\n{}", chunk("Hel"), chunk("lo"), chunk("ignored"));
        let bytes = body.into_bytes();
        let parts: Vec<Result<Vec<u8>, std::io::Error>> =
            bytes.chunks(7).map(|c| Ok(c.to_vec())).collect();

        let fragments: Vec<String> = text_stream(futures::stream::iter(parts))
            .map(|r| r.unwrap())
            .collect()
            .await;

        assert_eq!(fragments.concat(), "Hello");
    }

    #[tokio::test]
    async fn test_text_stream_surfaces_provider_error() {
        let body = format!("{}data: {{\"error\":{{\"message\":\"boom\"}}}}\n\n", chunk("partial"));
        let parts: Vec<Result<Vec<u8>, std::io::Error>> = vec![Ok(body.into_bytes())];

        let results: Vec<_> = text_stream(futures::stream::iter(parts)).collect().await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap(), "partial");
        assert!(results[1].as_ref().unwrap_err().to_string().contains("boom"));
    }
}
