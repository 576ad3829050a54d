//! candump CSV converter
//!
//! A Rust library for turning Linux `candump` text logs into CSV, decoding
//! every frame into named signal values with a DBC database.
//!
//! # Features
//!
//! - **`csv`** (default): CSV export and the file-to-file conversion pipeline
//! - **`cli`** (default): Build the `candump2csv` command-line binary
//! - **`serde`**: Enable serialization of frames, rows, and reports
//!
//! # Quick Start
//!
//! Convert a log file:
//! ```rust,no_run
//! use candump_csv::{convert_candump_to_csv, ConversionOptions};
//!
//! let options = ConversionOptions::new("capture.log", "vehicle.dbc", "capture.csv");
//! let report = convert_candump_to_csv(&options).unwrap();
//! println!("Wrote {} rows, skipped {} lines", report.rows_written, report.skipped());
//! ```
//!
//! Parse a single line:
//! ```rust
//! use candump_csv::parse_line;
//!
//! let frame = parse_line("(1690000000.123456) can0 123#DEADBEEF").unwrap();
//! assert_eq!(frame.id, 0x123);
//! assert_eq!(frame.payload, vec![0xDE, 0xAD, 0xBE, 0xEF]);
//! ```
//!
//! # Public API
//!
//! ## Parsing
//! - [`parse_line`] - Parse one candump line into a [`CanFrame`]
//! - [`FrameSource`] - Lazy iterator of frames over a reader or file
//!
//! ## Decoding
//! - [`load_database`] / [`parse_database`] - Load a DBC with `dbc-rs`
//! - [`SignalDecoder`] - Frame ID and payload to named signal values
//!
//! ## Output
//! - [`SchemaAccumulator`] - Sorted, growing set of CSV columns
//! - [`materialize`] / [`Row::project`] - Build rows and widen them to the final header
//! - [`write_csv`] - Write header and rows
//!
//! ## Conversion
//! - [`convert_candump_to_csv`] - Whole file-to-file conversion
//! - [`convert_reader`] - In-memory conversion without writing
//! - [`check_preconditions`] - Input/output path checks done before converting

pub mod decoder;
pub mod error;
#[cfg(feature = "csv")]
pub mod export;
pub mod parser;
#[cfg(feature = "csv")]
pub mod pipeline;
pub mod rows;
pub mod schema;
pub mod types;

pub use decoder::*;
pub use error::*;
#[cfg(feature = "csv")]
pub use export::*;
pub use parser::*;
#[cfg(feature = "csv")]
pub use pipeline::*;
pub use rows::*;
pub use schema::*;
pub use types::*;
