//! candump → CSV conversion
//!
//! Runs the phases in order: load the DBC, read and decode the log, then
//! write the CSV. Per-line problems are recorded and skipped; only the three
//! file operations can fail a conversion.

use crate::decoder::{load_database, SignalDecoder};
use crate::error::{CandumpError, Result};
use crate::parser::FrameSource;
use crate::rows::{materialize, Row};
use crate::schema::SchemaAccumulator;
use crate::types::{ConversionReport, Diagnostic};
use std::fmt;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Paths for one conversion
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    pub candump: PathBuf,
    pub dbc: PathBuf,
    pub output: PathBuf,
}

impl ConversionOptions {
    pub fn new(
        candump: impl Into<PathBuf>,
        dbc: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            candump: candump.into(),
            dbc: dbc.into(),
            output: output.into(),
        }
    }
}

/// Phase a conversion is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionState {
    NotStarted,
    LoadingDatabase,
    ReadingLog,
    ProcessingFrames,
    WritingOutput,
    Done { success: bool },
}

impl fmt::Display for ConversionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionState::NotStarted => f.write_str("not started"),
            ConversionState::LoadingDatabase => f.write_str("loading database"),
            ConversionState::ReadingLog => f.write_str("reading log"),
            ConversionState::ProcessingFrames => f.write_str("processing frames"),
            ConversionState::WritingOutput => f.write_str("writing output"),
            ConversionState::Done { success: true } => f.write_str("done"),
            ConversionState::Done { success: false } => f.write_str("failed"),
        }
    }
}

/// Header, rows, and report produced from a log before anything is written
#[derive(Debug)]
pub struct Conversion {
    pub schema: Vec<String>,
    pub rows: Vec<Row>,
    pub report: ConversionReport,
}

/// Check the input files exist and the output does not
pub fn check_preconditions(options: &ConversionOptions) -> Result<()> {
    if !options.candump.is_file() {
        return Err(CandumpError::MissingInput(
            "CAN dump".to_string(),
            options.candump.clone(),
        ));
    }
    if !options.dbc.is_file() {
        return Err(CandumpError::MissingInput(
            "DBC".to_string(),
            options.dbc.clone(),
        ));
    }
    if options.output.exists() {
        return Err(CandumpError::OutputExists(options.output.clone()));
    }
    Ok(())
}

/// Decode every frame from `reader` against `decoder`.
///
/// Lines that fail to parse or decode are recorded in the report and
/// skipped. Only a failure to read the log itself is returned as an error.
pub fn convert_reader<R: BufRead>(decoder: &SignalDecoder<'_>, reader: R) -> Result<Conversion> {
    convert_source(decoder, FrameSource::new(reader))
}

/// Same as [`convert_reader`], for an already opened [`FrameSource`]
pub fn convert_source<R: BufRead>(
    decoder: &SignalDecoder<'_>,
    mut source: FrameSource<R>,
) -> Result<Conversion> {
    let mut schema = SchemaAccumulator::new();
    let mut snapshot = schema.snapshot();
    let mut rows = Vec::new();
    let mut report = ConversionReport::default();

    for item in source.by_ref() {
        let (line_number, parsed) = item?;

        let frame = match parsed {
            Ok(frame) => frame,
            Err(e) => {
                warn!(line = line_number, "{e}");
                report.record(Diagnostic::from_parse_error(line_number, &e));
                continue;
            }
        };
        report.frames_parsed += 1;

        let decoded = match decoder.decode_frame(&frame) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(line = line_number, "{e}");
                report.record(Diagnostic::from_decode_error(line_number, &e));
                continue;
            }
        };

        if schema.observe(decoded.signal_names()) > 0 {
            snapshot = schema.snapshot();
            debug!(
                line = line_number,
                columns = snapshot.len(),
                "schema grew"
            );
        }
        rows.push(materialize(&frame, &decoded, &snapshot));
    }

    report.lines_read = source.lines_read();
    report.blank_lines = source.blank_lines();
    report.rows_written = rows.len();

    let schema = schema.finalize();
    report.columns = schema.len();

    Ok(Conversion {
        schema,
        rows,
        report,
    })
}

/// Drives one file-to-file conversion and tracks its phase
pub struct Converter {
    options: ConversionOptions,
    state: ConversionState,
}

impl Converter {
    pub fn new(options: ConversionOptions) -> Self {
        Self {
            options,
            state: ConversionState::NotStarted,
        }
    }

    pub fn state(&self) -> ConversionState {
        self.state
    }

    fn enter(&mut self, state: ConversionState) {
        debug!(from = %self.state, to = %state, "conversion state");
        self.state = state;
    }

    /// Run the conversion once. The converter ends in `Done` either way.
    pub fn run(&mut self) -> Result<ConversionReport> {
        let result = self.run_phases();
        self.enter(ConversionState::Done {
            success: result.is_ok(),
        });
        result
    }

    fn run_phases(&mut self) -> Result<ConversionReport> {
        if self.options.output.exists() {
            return Err(CandumpError::OutputExists(self.options.output.clone()));
        }

        self.enter(ConversionState::LoadingDatabase);
        info!(path = %self.options.dbc.display(), "Loading DBC file");
        let dbc = load_database(&self.options.dbc)?;
        let decoder = SignalDecoder::new(&dbc);
        info!(messages = decoder.message_count(), "Successfully loaded DBC file");

        self.enter(ConversionState::ReadingLog);
        info!(path = %self.options.candump.display(), "Opening CAN dump log file");
        let source = FrameSource::open(&self.options.candump)?;

        self.enter(ConversionState::ProcessingFrames);
        let conversion = convert_source(&decoder, source)?;
        info!(
            lines = conversion.report.lines_read,
            rows = conversion.report.rows_written,
            skipped = conversion.report.skipped(),
            "Successfully read CAN dump file"
        );

        self.enter(ConversionState::WritingOutput);
        crate::export::write_csv(&self.options.output, &conversion.schema, &conversion.rows)?;

        Ok(conversion.report)
    }
}

/// Convert a candump log to CSV using the given DBC
pub fn convert_candump_to_csv(options: &ConversionOptions) -> Result<ConversionReport> {
    Converter::new(options.clone()).run()
}

/// Convert with paths given separately
pub fn convert_files(candump: &Path, dbc: &Path, output: &Path) -> Result<ConversionReport> {
    convert_candump_to_csv(&ConversionOptions::new(candump, dbc, output))
}
