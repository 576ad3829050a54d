//! Per-frame rows and their projection onto the final header

use crate::schema::{INTERFACE_COLUMN, MESSAGE_NAME_COLUMN, TIMESTAMP_COLUMN};
use crate::types::{CanFrame, DecodedMessage};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One output row, keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Row {
    values: HashMap<String, String>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Number of columns this row was built against
    pub fn width(&self) -> usize {
        self.values.len()
    }

    /// Values in `schema` order; columns unknown to this row become `""`
    pub fn project<'a>(&'a self, schema: &[String]) -> Vec<&'a str> {
        schema
            .iter()
            .map(|column| self.get(column).unwrap_or(""))
            .collect()
    }
}

/// Build a row for `frame` covering every column in `snapshot`.
///
/// Columns this frame's message does not carry are set to `""`. Columns added
/// to the schema later are not back-filled here; [`Row::project`] handles them.
pub fn materialize(frame: &CanFrame, decoded: &DecodedMessage, snapshot: &[String]) -> Row {
    let mut values: HashMap<String, String> = snapshot
        .iter()
        .map(|column| (column.clone(), String::new()))
        .collect();

    for (name, value) in &decoded.signals {
        values.insert(name.clone(), value.clone());
    }

    // fixed fields last so a same-named signal cannot overwrite them
    values.insert(TIMESTAMP_COLUMN.to_string(), frame.timestamp.clone());
    values.insert(INTERFACE_COLUMN.to_string(), frame.interface.clone());
    values.insert(MESSAGE_NAME_COLUMN.to_string(), decoded.message_name.clone());

    Row { values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaAccumulator;

    fn frame(timestamp: &str) -> CanFrame {
        CanFrame {
            timestamp: timestamp.to_string(),
            interface: "can0".to_string(),
            id: 0x10,
            is_extended: false,
            payload: vec![0x01],
        }
    }

    fn decoded(name: &str, signals: &[(&str, &str)]) -> DecodedMessage {
        DecodedMessage {
            message_name: name.to_string(),
            signals: signals
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_materialize_fills_current_schema() {
        let mut acc = SchemaAccumulator::new();
        acc.observe(["rpm", "speed_kph"]);
        let snapshot = acc.snapshot();

        let row = materialize(&frame("100.0"), &decoded("Speed", &[("speed_kph", "1")]), &snapshot);
        assert_eq!(row.width(), snapshot.len());
        assert_eq!(row.get("speed_kph"), Some("1"));
        assert_eq!(row.get("rpm"), Some(""));
        assert_eq!(
            row.project(&snapshot),
            vec!["100.0", "can0", "Speed", "", "1"]
        );
    }

    #[test]
    fn test_early_row_widened_at_projection() {
        let mut acc = SchemaAccumulator::new();
        acc.observe(["speed_kph"]);
        let early = materialize(
            &frame("1.0"),
            &decoded("Speed", &[("speed_kph", "3")]),
            &acc.snapshot(),
        );

        acc.observe(["RPM"]);
        let schema = acc.finalize();

        assert_eq!(early.get("RPM"), None);
        assert_eq!(early.project(&schema), vec!["1.0", "can0", "Speed", "", "3"]);
    }

    #[test]
    fn test_message_without_signals() {
        let snapshot = SchemaAccumulator::new().snapshot();
        let row = materialize(&frame("2.0"), &decoded("Heartbeat", &[]), &snapshot);
        assert_eq!(row.project(&snapshot), vec!["2.0", "can0", "Heartbeat"]);
    }

    #[test]
    fn test_signal_cannot_overwrite_fixed_column() {
        let mut acc = SchemaAccumulator::new();
        acc.observe(["Interface", "gear"]);
        let snapshot = acc.snapshot();

        let row = materialize(
            &frame("3.0"),
            &decoded("Gearbox", &[("Interface", "7"), ("gear", "2")]),
            &snapshot,
        );
        assert_eq!(row.project(&snapshot), vec!["3.0", "can0", "Gearbox", "2"]);
    }
}
