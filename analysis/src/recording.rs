//! Reader for recorded telemetry.
//!
//! A recording is a JSON document per line. The first non-empty line is the header, every
//! following line is one event:
//!
//! ```text
//! {"map": "de_nuke", "start_time": "2024-05-01T18:00:00Z"}
//! {"time_ms": 0, "type": "MatchStart", "participants": [...]}
//! {"time_ms": 1500, "type": "RoundStart"}
//! ```

use std::time::Duration;

use crate::events::{DemoEvent, GameEvent};
use crate::SourceError;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct DemoHeader {
    pub map: String,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, serde::Deserialize)]
struct RecordedEvent {
    time_ms: u64,
    #[serde(flatten)]
    event: GameEvent,
}

#[derive(Debug, Clone)]
pub struct Recording<'b> {
    header: DemoHeader,
    body: Lines<'b>,
}

impl<'b> Recording<'b> {
    /// Reads the header, the events are only decoded while iterating over [`Recording::events`].
    pub fn parse(buf: &'b [u8]) -> Result<Self, SourceError> {
        let mut lines = Lines { rest: buf, line: 0 };

        let (_, header_line) = lines.next().ok_or(SourceError::MissingHeader)?;
        let header: DemoHeader = serde_json::from_slice(header_line).map_err(SourceError::Header)?;

        Ok(Self {
            header,
            body: lines,
        })
    }

    pub fn header(&self) -> &DemoHeader {
        &self.header
    }

    pub fn events(&self) -> Events<'b> {
        Events {
            lines: self.body.clone(),
            failed: false,
        }
    }
}

/// Non-blank lines together with their 1-based line number.
#[derive(Debug, Clone)]
struct Lines<'b> {
    rest: &'b [u8],
    line: usize,
}

impl<'b> Iterator for Lines<'b> {
    type Item = (usize, &'b [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.rest.is_empty() {
            let (line, rest) = match self.rest.iter().position(|b| *b == b'\n') {
                Some(idx) => (&self.rest[..idx], &self.rest[idx + 1..]),
                None => (self.rest, &self.rest[self.rest.len()..]),
            };
            self.rest = rest;
            self.line += 1;

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            return Some((self.line, line));
        }

        None
    }
}

#[derive(Debug, Clone)]
pub struct Events<'b> {
    lines: Lines<'b>,
    failed: bool,
}

impl Iterator for Events<'_> {
    type Item = Result<DemoEvent, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let (line, content) = self.lines.next()?;

        match serde_json::from_slice::<RecordedEvent>(content) {
            Ok(recorded) => Some(Ok(DemoEvent {
                time: Duration::from_millis(recorded.time_ms),
                event: recorded.event,
            })),
            Err(source) => {
                self.failed = true;
                Some(Err(SourceError::Corrupt { line, source }))
            }
        }
    }
}
