//! Incremental `text/event-stream` decoder
//!
//! Bytes are fed in arbitrary chunks as they arrive from the socket. Each
//! blank line dispatches the event accumulated so far:
//!
//! ```text
//! : comment, ignored
//! event: message
//! data: log
//!
//! ```
//!
//! Malformed input that does not break framing (an invalid `retry:` value, a
//! line that is not UTF-8) is reported as an `Err` item and decoding carries
//! on with the next line.

use std::time::Duration;

use cooler_core::prelude::*;

/// One dispatched event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// `event:` field; `None` means the default `message` type
    pub event: Option<String>,
    /// `data:` lines joined with `\n`
    pub data: String,
    /// Last event id seen on the stream
    pub id: Option<String>,
}

#[derive(Debug, Default)]
pub struct SseParser {
    line: Vec<u8>,
    /// A `\r` ended the previous line; a following `\n` belongs to it
    after_cr: bool,
    event: Option<String>,
    data: Vec<String>,
    last_id: Option<String>,
    retry: Option<Duration>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconnection delay last requested by the server, if any
    pub fn retry(&self) -> Option<Duration> {
        self.retry
    }

    /// Feed a chunk and collect every event it completes
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Result<SseEvent>> {
        let mut out = Vec::new();

        for &byte in chunk {
            match byte {
                b'\n' if self.after_cr => {
                    self.after_cr = false;
                }
                b'\r' | b'\n' => {
                    self.after_cr = byte == b'\r';
                    let line = std::mem::take(&mut self.line);
                    if let Some(item) = self.process_line(&line) {
                        out.push(item);
                    }
                }
                _ => {
                    self.after_cr = false;
                    self.line.push(byte);
                }
            }
        }

        out
    }

    fn process_line(&mut self, raw: &[u8]) -> Option<Result<SseEvent>> {
        if raw.is_empty() {
            return self.dispatch().map(Ok);
        }

        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => return Some(Err(Error::protocol(format!("line is not UTF-8: {e}")))),
        };

        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "data" => self.data.push(value.to_string()),
            "event" => self.event = Some(value.to_string()),
            "id" => {
                if !value.contains('\0') {
                    self.last_id = Some(value.to_string());
                }
            }
            "retry" => match value.parse::<u64>() {
                Ok(ms) => self.retry = Some(Duration::from_millis(ms)),
                Err(_) => {
                    return Some(Err(Error::protocol(format!("invalid retry value `{value}`"))));
                }
            },
            other => trace!("ignoring event-stream field `{}`", other),
        }

        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }

        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseEvent {
            event: event.filter(|e| !e.is_empty()),
            data,
            id: self.last_id.clone(),
        })
    }
}
