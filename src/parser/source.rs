use crate::error::{CandumpError, ParseError, Result};
use crate::parser::line::parse_line;
use crate::types::CanFrame;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// One non-blank log line, parsed or not
pub type SourceItem = (usize, std::result::Result<CanFrame, ParseError>);

/// Lazy sequence of frames read from a candump log.
///
/// Blank lines are skipped and only counted. Each item carries the 1-based
/// line number it came from. I/O and UTF-8 failures end the sequence with an
/// error, since the rest of the file cannot be trusted.
pub struct FrameSource<R> {
    lines: Lines<R>,
    line_number: usize,
    blank_lines: usize,
}

impl FrameSource<BufReader<File>> {
    /// Open a candump file. Calling this again on the same path restarts the sequence.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            CandumpError::LogRead(format!("failed to open {}: {}", path.display(), e))
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> FrameSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            blank_lines: 0,
        }
    }

    /// Lines consumed so far, blank ones included
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    pub fn blank_lines(&self) -> usize {
        self.blank_lines
    }
}

impl<R: BufRead> Iterator for FrameSource<R> {
    type Item = Result<SourceItem>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(CandumpError::LogRead(format!(
                        "line {}: {}",
                        self.line_number + 1,
                        e
                    ))))
                }
            };
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                self.blank_lines += 1;
                continue;
            }

            return Some(Ok((self.line_number, parse_line(trimmed))));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_source_skips_blank_lines_and_numbers_lines() {
        let log = "(1.0) can0 010#01\n\n   \n(2.0) can0 bogus\n(3.0) can1 020#0203\n";
        let mut source = FrameSource::new(Cursor::new(log));

        let items: Vec<SourceItem> = source.by_ref().map(|item| item.unwrap()).collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].0, 1);
        assert!(items[0].1.is_ok());
        assert_eq!(items[1].0, 4);
        assert!(matches!(items[1].1, Err(ParseError::MalformedLine(_))));
        assert_eq!(items[2].0, 5);
        assert_eq!(items[2].1.as_ref().unwrap().interface, "can1");

        assert_eq!(source.lines_read(), 5);
        assert_eq!(source.blank_lines(), 2);
    }

    #[test]
    fn test_source_handles_crlf_and_missing_final_newline() {
        let log = "(1.0) can0 010#01\r\n(2.0) can0 010#02";
        let frames: Vec<CanFrame> = FrameSource::new(Cursor::new(log))
            .map(|item| item.unwrap().1.unwrap())
            .collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].payload, vec![0x02]);
    }

    #[test]
    fn test_source_reports_invalid_utf8_as_log_read_error() {
        let bytes: &[u8] = b"(1.0) can0 010#01\n\xff\xfe\n";
        let mut source = FrameSource::new(Cursor::new(bytes));
        assert!(source.next().unwrap().is_ok());
        assert!(matches!(
            source.next().unwrap(),
            Err(CandumpError::LogRead(_))
        ));
    }

    #[test]
    fn test_open_missing_file_is_log_read_error() {
        let result = FrameSource::open(Path::new("/nonexistent/dir/capture.log"));
        assert!(matches!(result, Err(CandumpError::LogRead(_))));
    }
}
