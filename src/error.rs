use std::fmt;
use std::path::PathBuf;

/// Fatal errors that abort a conversion
#[derive(Debug)]
pub enum CandumpError {
    /// I/O errors
    Io(std::io::Error),
    /// DBC file could not be read or parsed
    DatabaseLoad(String),
    /// candump log could not be read
    LogRead(String),
    /// CSV output could not be written
    Export(String),
    /// Destination already exists and would be overwritten
    OutputExists(PathBuf),
    /// A required input file is missing
    MissingInput(String, PathBuf),
}

impl fmt::Display for CandumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandumpError::Io(err) => write!(f, "I/O error: {}", err),
            CandumpError::DatabaseLoad(msg) => write!(f, "Error loading DBC file: {}", msg),
            CandumpError::LogRead(msg) => write!(f, "Error reading CAN dump file: {}", msg),
            CandumpError::Export(msg) => write!(f, "Error writing CSV file: {}", msg),
            CandumpError::OutputExists(path) => write!(
                f,
                "The output file '{}' already exists. Please specify a unique name.",
                path.display()
            ),
            CandumpError::MissingInput(kind, path) => {
                write!(f, "The {} file '{}' is missing.", kind, path.display())
            }
        }
    }
}

impl std::error::Error for CandumpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CandumpError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CandumpError {
    fn from(err: std::io::Error) -> Self {
        CandumpError::Io(err)
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for CandumpError {
    fn from(err: csv::Error) -> Self {
        CandumpError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CandumpError>;

/// Why a single log line could not be turned into a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Wrong token count, missing `#`, or an unusable frame ID
    MalformedLine(String),
    /// Payload is not an even-length run of hex digits
    MalformedPayload(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedLine(msg) => write!(f, "Malformed line: {}", msg),
            ParseError::MalformedPayload(msg) => write!(f, "Malformed payload: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

/// Why a parsed frame could not be decoded against the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// No message with this frame ID exists in the DBC
    UnknownFrameId(u32),
    /// The DBC library rejected the payload
    DecodeFailure { frame_id: u32, reason: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnknownFrameId(id) => {
                write!(f, "Message with ID 0x{:X} not found in DBC file", id)
            }
            DecodeError::DecodeFailure { frame_id, reason } => {
                write!(f, "Error decoding message with ID 0x{:X}: {}", frame_id, reason)
            }
        }
    }
}

impl std::error::Error for DecodeError {}
