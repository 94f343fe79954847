//! Structured logging for CLI invocations. One JSON object per line on
//! stderr, so stdout stays clean for piped WAV/JSON output.

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    Encode(EncodeEvent),
    Decode(DecodeEvent),
    Scan(ScanEvent),
    Info { message: String },
    Error { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeEvent {
    pub timestamp: DateTime<Utc>,
    pub profile: String,
    pub payload_bytes: usize,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeEvent {
    pub timestamp: DateTime<Utc>,
    pub profile: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEvent {
    pub timestamp: DateTime<Utc>,
    pub frames_found: usize,
}

pub struct StructuredLogger {
    writer: Box<dyn Write + Send>,
}

impl StructuredLogger {
    pub fn new() -> Self {
        Self { writer: Box::new(io::stderr()) }
    }

    pub fn log(&mut self, event: LogEvent) -> Result<()> {
        let line = serde_json::to_string(&event)?;
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl Default for StructuredLogger {
    fn default() -> Self {
        Self::new()
    }
}
