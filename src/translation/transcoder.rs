//! Server-Sent Events transcoder for OpenAI-compatible streaming responses.
//!
//! Raw response bytes are decoded incrementally as UTF-8, framed into SSE
//! records by `eventsource-stream`, and each record is fed to a [`Transcoder`]
//! state machine that decides whether to emit a fragment, ignore the record,
//! or terminate the stream.

use bytes::Bytes;
use encoding_rs::{CoderResult, Decoder, UTF_8};
use eventsource_stream::{Event, EventStreamError, Eventsource};
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::error::TranslateError;

/// Payload marking the normal end of a completion stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// One piece of translated text, in upstream arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFragment(String);

impl TranslationFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TranslationFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Data,
    Other,
}

/// A single framed SSE record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub kind: EventKind,
    pub payload: String,
}

impl RawEvent {
    pub fn data(payload: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Data,
            payload: payload.into(),
        }
    }

    pub const fn other() -> Self {
        Self {
            kind: EventKind::Other,
            payload: String::new(),
        }
    }
}

impl From<Event> for RawEvent {
    fn from(event: Event) -> Self {
        // Records without data (retry hints, bare ids) carry nothing to decode.
        if event.data.is_empty() {
            Self::other()
        } else {
            Self::data(event.data)
        }
    }
}

/// Terminal state of a translation stream.
#[derive(Debug)]
pub enum StreamOutcome {
    Completed,
    Failed(TranslateError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscoderState {
    Awaiting,
    Dispatching,
    Completed,
    Failed,
}

impl TranscoderState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// What the driver should do after feeding one event.
#[derive(Debug)]
pub enum Step {
    Emit(TranslationFragment),
    Skip,
    Finish(StreamOutcome),
}

#[derive(Debug, Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// Semantic decoder for framed SSE records.
///
/// Owns sentinel detection, content extraction and failure classification.
/// Once a terminal state is reached every further event is ignored.
#[derive(Debug)]
pub struct Transcoder {
    state: TranscoderState,
    fragments: usize,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcoder {
    pub const fn new() -> Self {
        Self {
            state: TranscoderState::Awaiting,
            fragments: 0,
        }
    }

    pub const fn state(&self) -> TranscoderState {
        self.state
    }

    /// Number of fragments emitted so far.
    pub const fn fragments(&self) -> usize {
        self.fragments
    }

    pub fn on_event(&mut self, event: RawEvent) -> Step {
        if self.state.is_terminal() {
            return Step::Skip;
        }
        self.state = TranscoderState::Dispatching;

        if event.kind == EventKind::Other {
            return Step::Skip;
        }

        if event.payload == DONE_SENTINEL {
            self.state = TranscoderState::Completed;
            return Step::Finish(StreamOutcome::Completed);
        }

        match decode_payload(&event.payload) {
            Ok(Some(text)) => {
                self.fragments += 1;
                Step::Emit(TranslationFragment(text))
            }
            Ok(None) => Step::Skip,
            Err(err) => self.fail(err),
        }
    }

    /// Called when the byte stream ends. Ending before the sentinel is a failure.
    pub fn on_end_of_input(&mut self) -> StreamOutcome {
        match self.state {
            TranscoderState::Completed => StreamOutcome::Completed,
            _ => {
                self.state = TranscoderState::Failed;
                StreamOutcome::Failed(TranslateError::Transport(format!(
                    "connection closed before {DONE_SENTINEL}"
                )))
            }
        }
    }

    pub fn fail(&mut self, err: TranslateError) -> Step {
        self.state = TranscoderState::Failed;
        Step::Finish(StreamOutcome::Failed(err))
    }
}

/// Extracts `choices[0].delta.content` from a data payload.
///
/// A delta without `content` (role-only or finish chunks) and an empty
/// `content` both yield `Ok(None)`.
fn decode_payload(payload: &str) -> Result<Option<String>, TranslateError> {
    let response: StreamResponse = serde_json::from_str(payload)
        .map_err(|e| TranslateError::MalformedEvent(format!("{e}: {}", truncate(payload))))?;

    let choice = response.choices.into_iter().next().ok_or_else(|| {
        TranslateError::MalformedEvent(format!("no choices in event: {}", truncate(payload)))
    })?;

    Ok(choice.delta.content.filter(|content| !content.is_empty()))
}

fn truncate(payload: &str) -> &str {
    const MAX: usize = 120;
    if payload.len() <= MAX {
        return payload;
    }
    let mut end = MAX;
    while !payload.is_char_boundary(end) {
        end -= 1;
    }
    &payload[..end]
}

/// Stateful incremental UTF-8 decoder.
///
/// Incomplete sequences at the end of a chunk are held back until the next
/// chunk arrives. Invalid bytes become U+FFFD.
pub struct Utf8Decoder {
    inner: Decoder,
}

impl Default for Utf8Decoder {
    fn default() -> Self {
        Self {
            inner: UTF_8.new_decoder_without_bom_handling(),
        }
    }
}

impl Utf8Decoder {
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.decode_inner(chunk, false)
    }

    /// Flushes bytes still held back. A truncated sequence becomes U+FFFD.
    ///
    /// The decoder must not be fed again afterwards.
    pub fn finish(&mut self) -> Option<String> {
        let rest = self.decode_inner(&[], true);
        (!rest.is_empty()).then_some(rest)
    }

    fn decode_inner(&mut self, mut src: &[u8], last: bool) -> String {
        let capacity = self
            .inner
            .max_utf8_buffer_length(src.len())
            .unwrap_or(src.len() * 3 + 4);
        let mut out = String::with_capacity(capacity);

        loop {
            let (result, read, _) = self.inner.decode_to_string(src, &mut out, last);
            src = &src[read..];
            match result {
                CoderResult::InputEmpty => return out,
                CoderResult::OutputFull => out.reserve(src.len() * 3 + 4),
            }
        }
    }
}

/// Decodes raw body chunks into text, applying the optional idle timeout.
fn decode_chunks<S, E>(
    byte_stream: S,
    idle_timeout: Option<Duration>,
) -> impl Stream<Item = Result<String, TranslateError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    async_stream::stream! {
        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut decoder = Utf8Decoder::default();

        loop {
            let next = match idle_timeout {
                Some(limit) => {
                    if let Ok(next) = tokio::time::timeout(limit, byte_stream.next()).await {
                        next
                    } else {
                        yield Err(TranslateError::Timeout(limit));
                        return;
                    }
                }
                None => byte_stream.next().await,
            };

            match next {
                Some(Ok(chunk)) => {
                    let text = decoder.decode(&chunk);
                    if !text.is_empty() {
                        yield Ok(text);
                    }
                }
                Some(Err(e)) => {
                    yield Err(TranslateError::Transport(e.to_string()));
                    return;
                }
                None => {
                    if let Some(rest) = decoder.finish() {
                        yield Ok(rest);
                    }
                    return;
                }
            }
        }
    }
}

/// Converts a raw SSE byte stream into a stream of translation fragments.
///
/// The stream is lazy: upstream chunks are only pulled while the consumer
/// polls. It ends cleanly on the `[DONE]` sentinel, or yields exactly one
/// `Err` and ends on any failure. Dropping it drops `byte_stream`.
pub fn transcode<S, E>(
    byte_stream: S,
    idle_timeout: Option<Duration>,
) -> impl Stream<Item = Result<TranslationFragment, TranslateError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    async_stream::stream! {
        let events = Box::pin(decode_chunks(byte_stream, idle_timeout)).eventsource();
        let mut events = std::pin::pin!(events);
        let mut transcoder = Transcoder::new();

        while let Some(item) = events.next().await {
            let step = match item {
                Ok(event) => transcoder.on_event(RawEvent::from(event)),
                Err(EventStreamError::Transport(err)) => transcoder.fail(err),
                Err(err) => transcoder.fail(TranslateError::MalformedEvent(err.to_string())),
            };

            match step {
                Step::Emit(fragment) => yield Ok(fragment),
                Step::Skip => {}
                Step::Finish(StreamOutcome::Completed) => {
                    tracing::debug!(fragments = transcoder.fragments(), "stream completed");
                    return;
                }
                Step::Finish(StreamOutcome::Failed(err)) => {
                    tracing::warn!(fragments = transcoder.fragments(), error = %err, "stream failed");
                    yield Err(err);
                    return;
                }
            }
        }

        if let StreamOutcome::Failed(err) = transcoder.on_end_of_input() {
            tracing::warn!(fragments = transcoder.fragments(), error = %err, "stream truncated");
            yield Err(err);
        }
    }
}
