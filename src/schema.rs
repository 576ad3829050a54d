//! Column discovery for the CSV output
//!
//! Different messages carry different signals, so the column set is only
//! known once every frame has been decoded. The accumulator only grows.

use std::collections::BTreeSet;
use tracing::warn;

pub const TIMESTAMP_COLUMN: &str = "Timestamp";
pub const INTERFACE_COLUMN: &str = "Interface";
pub const MESSAGE_NAME_COLUMN: &str = "Message Name";

/// Columns that lead every header, in this order
pub const FIXED_COLUMNS: [&str; 3] = [TIMESTAMP_COLUMN, INTERFACE_COLUMN, MESSAGE_NAME_COLUMN];

/// Running union of every signal name seen so far
#[derive(Debug, Default, Clone)]
pub struct SchemaAccumulator {
    signals: BTreeSet<String>,
    // reserved names already warned about
    shadowed: BTreeSet<String>,
}

impl SchemaAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add signal names to the schema. Returns how many were new.
    ///
    /// A signal named like one of the fixed columns is left out; the fixed
    /// column keeps the frame metadata.
    pub fn observe<'a, I>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut added = 0;
        for name in names {
            if FIXED_COLUMNS.contains(&name) {
                if self.shadowed.insert(name.to_string()) {
                    warn!(
                        signal = name,
                        "signal name collides with a fixed column and is not exported"
                    );
                }
                continue;
            }
            if !self.signals.contains(name) {
                self.signals.insert(name.to_string());
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, name: &str) -> bool {
        FIXED_COLUMNS.contains(&name) || self.signals.contains(name)
    }

    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    /// Current column order: fixed columns, then signals sorted byte-wise
    pub fn snapshot(&self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.signals.iter().cloned())
            .collect()
    }

    /// Final header once all frames are processed
    pub fn finalize(self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.signals)
            .collect()
    }
}
