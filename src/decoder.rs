//! Adapter over the `dbc-rs` signal database
//!
//! Message lookup, bit extraction, and scaling all happen inside `dbc-rs`.
//! This module maps its results onto [`DecodedMessage`] and its failures
//! onto [`DecodeError`].

use crate::error::{CandumpError, DecodeError, Result};
use crate::types::{dbc_message_id, CanFrame, DecodedMessage};
use dbc_rs::Dbc;
use std::path::Path;
use tracing::debug;

/// Read and parse a DBC file
pub fn load_database(path: &Path) -> Result<Dbc> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CandumpError::DatabaseLoad(format!("failed to read {}: {}", path.display(), e))
    })?;
    parse_database(&content)
}

/// Parse DBC text already held in memory
pub fn parse_database(content: &str) -> Result<Dbc> {
    Dbc::parse(content).map_err(|e| CandumpError::DatabaseLoad(format!("{e:?}")))
}

/// Decodes frame payloads using a loaded database
pub struct SignalDecoder<'dbc> {
    dbc: &'dbc Dbc,
}

impl<'dbc> SignalDecoder<'dbc> {
    pub fn new(dbc: &'dbc Dbc) -> Self {
        Self { dbc }
    }

    pub fn message_count(&self) -> usize {
        self.dbc.messages().len()
    }

    /// Resolve `frame_id` to its message and decode `payload` with it.
    ///
    /// The payload must be exactly as long as the message; signals that map
    /// to a value table are rendered with their description.
    pub fn decode(
        &self,
        frame_id: u32,
        is_extended: bool,
        payload: &[u8],
    ) -> std::result::Result<DecodedMessage, DecodeError> {
        let message = self
            .dbc
            .messages()
            .find_by_id(dbc_message_id(frame_id, is_extended))
            .ok_or(DecodeError::UnknownFrameId(frame_id))?;

        if payload.len() != message.dlc() as usize {
            return Err(DecodeError::DecodeFailure {
                frame_id,
                reason: format!(
                    "payload is {} bytes, message {} expects {}",
                    payload.len(),
                    message.name(),
                    message.dlc()
                ),
            });
        }

        let decoded = self
            .dbc
            .decode(frame_id, payload, is_extended)
            .map_err(|e| DecodeError::DecodeFailure {
                frame_id,
                reason: format!("{e:?}"),
            })?;

        let signals: Vec<(String, String)> = decoded
            .iter()
            .map(|s| {
                let value = s
                    .description
                    .map(String::from)
                    .unwrap_or_else(|| format_value(s.value));
                (String::from(s.name), value)
            })
            .collect();

        debug!(
            frame_id,
            message = message.name(),
            signals = signals.len(),
            "decoded frame"
        );

        Ok(DecodedMessage {
            message_name: String::from(message.name()),
            signals,
        })
    }

    pub fn decode_frame(
        &self,
        frame: &CanFrame,
    ) -> std::result::Result<DecodedMessage, DecodeError> {
        self.decode(frame.id, frame.is_extended, &frame.payload)
    }
}

/// Render a physical value for CSV output.
///
/// Integral values print without a fractional part (`1`, `-40`); everything
/// else uses the shortest form that round-trips.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{value}")
}
