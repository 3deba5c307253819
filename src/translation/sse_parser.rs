//! Server-Sent Events (SSE) framing shared by both vendor adapters.
//!
//! The vendors differ in what a `data:` payload contains, so this module only
//! splits the byte stream into payload strings. Each adapter decodes its own
//! JSON shape.

use anyhow::Result;
use bytes::Bytes;
use futures_util::Stream;

/// Payload sent by chat-completion APIs to mark the end of a stream.
pub const DONE_MARKER: &str = "[DONE]";

/// Converts a raw SSE byte stream into a stream of `data:` payloads.
///
/// Bytes are buffered until a full line is available, so multi-byte UTF-8
/// sequences split across network chunks decode correctly. The stream ends
/// at the `[DONE]` marker or when the body ends. A transport error is yielded
/// once and ends the stream.
pub fn sse_data_stream<E>(
    byte_stream: impl Stream<Item = Result<Bytes, E>> + Send + 'static,
) -> impl Stream<Item = Result<String>> + Send
where
    E: std::error::Error + Send + Sync + 'static,
{
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(anyhow::Error::new(e).context("Stream error"));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=line_end).collect();
                let line = match std::str::from_utf8(&line) {
                    Ok(line) => line,
                    Err(e) => {
                        yield Err(anyhow::Error::new(e).context("Stream chunk is not valid UTF-8"));
                        return;
                    }
                };

                match parse_sse_line(line.trim()) {
                    Some(DONE_MARKER) => return,
                    Some(payload) => yield Ok(payload.to_string()),
                    None => {}
                }
            }
        }

        // A final event without a trailing newline.
        let rest = match std::str::from_utf8(&buffer) {
            Ok(rest) => rest,
            Err(e) => {
                yield Err(anyhow::Error::new(e).context("Stream chunk is not valid UTF-8"));
                return;
            }
        };
        match parse_sse_line(rest.trim()) {
            Some(DONE_MARKER) | None => {}
            Some(payload) => yield Ok(payload.to_string()),
        }
    }
}

/// Extracts the payload of a single trimmed SSE line.
///
/// Returns `None` for blank lines, comments, and non-`data` fields.
fn parse_sse_line(line: &str) -> Option<&str> {
    let payload = line.strip_prefix("data:")?.trim_start();
    if payload.is_empty() {
        None
    } else {
        Some(payload)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use futures_util::{StreamExt, stream};
    use std::io;

    fn chunks(parts: &[&'static [u8]]) -> impl Stream<Item = Result<Bytes, io::Error>> + Send {
        stream::iter(
            parts
                .iter()
                .map(|p| Ok(Bytes::from_static(p)))
                .collect::<Vec<_>>(),
        )
    }

    async fn collect(s: impl Stream<Item = Result<String>>) -> Vec<String> {
        s.map(|r| r.unwrap()).collect().await
    }

    #[test]
    fn test_parse_sse_line_with_data() {
        assert_eq!(parse_sse_line(r#"data: {"a":1}"#), Some(r#"{"a":1}"#));
        assert_eq!(parse_sse_line(r#"data:{"a":1}"#), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_parse_sse_line_ignores_other_lines() {
        assert_eq!(parse_sse_line(""), None);
        assert_eq!(parse_sse_line(": keep-alive"), None);
        assert_eq!(parse_sse_line("event: message"), None);
        assert_eq!(parse_sse_line("data:"), None);
    }

    #[tokio::test]
    async fn test_stream_splits_payloads() {
        let s = sse_data_stream(chunks(&[b"data: one\n\ndata: two\n\n"]));
        assert_eq!(collect(s).await, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_stream_joins_lines_across_chunks() {
        let s = sse_data_stream(chunks(&[b"data: hel", b"lo\n\n", b"data: world\r\n\r\n"]));
        assert_eq!(collect(s).await, vec!["hello", "world"]);
    }

    #[tokio::test]
    async fn test_stream_keeps_split_utf8_intact() {
        // "こ" is E3 81 93; split it across two chunks.
        let s = sse_data_stream(chunks(&[b"data: \xE3\x81", b"\x93\n\n"]));
        assert_eq!(collect(s).await, vec!["こ"]);
    }

    #[tokio::test]
    async fn test_stream_stops_at_done_marker() {
        let s = sse_data_stream(chunks(&[b"data: a\n\ndata: [DONE]\n\ndata: b\n\n"]));
        assert_eq!(collect(s).await, vec!["a"]);
    }

    #[tokio::test]
    async fn test_stream_flushes_trailing_event() {
        let s = sse_data_stream(chunks(&[b"data: a\n\ndata: tail"]));
        assert_eq!(collect(s).await, vec!["a", "tail"]);
    }

    #[tokio::test]
    async fn test_stream_error_ends_stream() {
        let parts: Vec<Result<Bytes, io::Error>> = vec![
            Ok(Bytes::from_static(b"data: a\n\n")),
            Err(io::Error::other("connection reset")),
            Ok(Bytes::from_static(b"data: b\n\n")),
        ];
        let results: Vec<Result<String>> = sse_data_stream(stream::iter(parts)).collect().await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap(), "a");
        assert!(results[1].is_err());
    }

    #[tokio::test]
    async fn test_stream_rejects_invalid_utf8() {
        let s = sse_data_stream(chunks(&[
            b"data: a\n\n",
            b"data: \xFF\xFE\n\n",
            b"data: b\n\n",
        ]));
        let results: Vec<Result<String>> = s.collect().await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap(), "a");
        let err = results[1].as_ref().unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[tokio::test]
    async fn test_stream_rejects_invalid_utf8_in_trailing_event() {
        let s = sse_data_stream(chunks(&[b"data: \xE3\x81"]));
        let results: Vec<Result<String>> = s.collect().await;

        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
