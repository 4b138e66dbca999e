//! Incremental parser for `text/event-stream` bodies

use serde::de::DeserializeOwned;

/// One dispatched server-sent event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SseEvent {
    /// Value of the `event:` field, if any
    pub event: Option<String>,
    /// All `data:` lines of the frame joined with `\n`
    pub data: String,
    /// Value of the `id:` field, if any
    pub id: Option<String>,
}

impl SseEvent {
    /// Decode the data field as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.data)
    }
}

/// Splits a byte stream into events at blank lines
///
/// Chunks may end anywhere, including inside a line or a UTF-8 sequence;
/// incomplete input stays buffered until the next chunk.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: Vec<u8>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return the events it completed
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend(chunk.iter().copied().filter(|b| *b != b'\r'));

        let mut events = Vec::new();
        while let Some(end) = find_blank_line(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..end + 2).collect();
            if let Some(event) = parse_frame(&String::from_utf8_lossy(&frame)) {
                events.push(event);
            }
        }
        events
    }

    /// Bytes received but not yet terminated by a blank line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn find_blank_line(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

fn parse_frame(frame: &str) -> Option<SseEvent> {
    let mut event = SseEvent::default();
    let mut data: Vec<&str> = Vec::new();

    for line in frame.lines() {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "data" => data.push(value),
            "event" => event.event = Some(value.to_string()),
            "id" => event.id = Some(value.to_string()),
            _ => {}
        }
    }

    if data.is_empty() {
        return None;
    }
    event.data = data.join("\n");
    Some(event)
}
