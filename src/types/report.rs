use crate::error::{DecodeError, ParseError};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Category of a skipped line or frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SkipKind {
    MalformedLine,
    MalformedPayload,
    UnknownFrameId,
    DecodeFailure,
}

impl fmt::Display for SkipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkipKind::MalformedLine => "malformed line",
            SkipKind::MalformedPayload => "malformed payload",
            SkipKind::UnknownFrameId => "unknown frame id",
            SkipKind::DecodeFailure => "decode failure",
        };
        f.write_str(name)
    }
}

/// A recoverable problem tied to one line of the input log
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// 1-based line number in the candump file
    pub line_number: usize,
    pub kind: SkipKind,
    pub message: String,
}

impl Diagnostic {
    pub fn from_parse_error(line_number: usize, err: &ParseError) -> Self {
        let kind = match err {
            ParseError::MalformedLine(_) => SkipKind::MalformedLine,
            ParseError::MalformedPayload(_) => SkipKind::MalformedPayload,
        };
        Self {
            line_number,
            kind,
            message: err.to_string(),
        }
    }

    pub fn from_decode_error(line_number: usize, err: &DecodeError) -> Self {
        let kind = match err {
            DecodeError::UnknownFrameId(_) => SkipKind::UnknownFrameId,
            DecodeError::DecodeFailure { .. } => SkipKind::DecodeFailure,
        };
        Self {
            line_number,
            kind,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.message)
    }
}

/// Outcome of a conversion that ran to completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConversionReport {
    pub lines_read: usize,
    pub blank_lines: usize,
    pub frames_parsed: usize,
    pub rows_written: usize,
    pub malformed_lines: usize,
    pub unknown_frame_ids: usize,
    pub decode_failures: usize,
    /// Number of columns in the final header, fixed columns included
    pub columns: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ConversionReport {
    pub fn record(&mut self, diagnostic: Diagnostic) {
        match diagnostic.kind {
            SkipKind::MalformedLine | SkipKind::MalformedPayload => self.malformed_lines += 1,
            SkipKind::UnknownFrameId => self.unknown_frame_ids += 1,
            SkipKind::DecodeFailure => self.decode_failures += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn skipped(&self) -> usize {
        self.malformed_lines + self.unknown_frame_ids + self.decode_failures
    }

    pub fn count_of(&self, kind: SkipKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}
