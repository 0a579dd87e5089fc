//! Transcript lines for driving a session offline.
//!
//! One JSON object per line: objects with an `event` field are server frames,
//! objects with a `gesture` field are user actions. Blank lines and lines
//! starting with `//` are skipped.

use serde_json::Value;

use crate::error::ProtocolError;
use crate::websocket::Gesture;

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptLine {
    Frame(String),
    Gesture(Gesture),
}

impl TranscriptLine {
    /// `Ok(None)` for lines that carry nothing.
    pub fn parse(line: &str) -> Result<Option<Self>, ProtocolError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(line)?;
        if value.get("gesture").is_some() {
            let gesture = serde_json::from_value(value)?;
            Ok(Some(TranscriptLine::Gesture(gesture)))
        } else if value.get("event").is_some() {
            Ok(Some(TranscriptLine::Frame(line.to_string())))
        } else {
            Err(ProtocolError::MalformedField {
                field: "line",
                reason: "neither an event nor a gesture".to_string(),
            })
        }
    }
}
