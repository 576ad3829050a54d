#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest identifier a standard (11-bit) CAN frame can carry
pub const MAX_STANDARD_ID: u32 = 0x7FF;

/// Largest identifier an extended (29-bit) CAN frame can carry
pub const MAX_EXTENDED_ID: u32 = 0x1FFF_FFFF;

/// One frame read from a candump log line
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CanFrame {
    /// Timestamp text with the surrounding parentheses removed
    pub timestamp: String,
    pub interface: String,
    pub id: u32,
    /// 29-bit identifier (candump prints these with eight hex digits)
    pub is_extended: bool,
    pub payload: Vec<u8>,
}

impl CanFrame {
    pub fn dlc(&self) -> usize {
        self.payload.len()
    }
}

/// DBC files mark extended (29-bit) messages by setting bit 31 of the ID
pub fn dbc_message_id(id: u32, is_extended: bool) -> u32 {
    if is_extended {
        id | 0x8000_0000
    } else {
        id
    }
}

/// A frame resolved against the database
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodedMessage {
    pub message_name: String,
    /// Signal name and displayed value, in database order
    pub signals: Vec<(String, String)>,
}

impl DecodedMessage {
    pub fn signal_names(&self) -> impl Iterator<Item = &str> {
        self.signals.iter().map(|(name, _)| name.as_str())
    }
}
