//! Tab-separated corpus file reader
//!
//! The exports are plain TSV: one header row, no quoting, and no escaping.
//! Lines are split on tabs directly so that every physical line, blank ones
//! included, becomes a row with its true line number. Column counts are not
//! enforced here; the record decoders own that check so a short or empty row
//! surfaces as a [`DecodeError`] with the row's line number.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::error::{IngestError, Result};
use crate::records::{DecodeError, RecordKind};

/// One data row and the line it came from
#[derive(Debug, Clone)]
pub struct RawRow {
    pub line: u64,
    record: StringRecord,
}

impl RawRow {
    pub fn fields(&self) -> Vec<&str> {
        self.record.iter().collect()
    }

    /// First raw column, used to key findings for rows that fail to decode
    pub fn leading_value(&self) -> &str {
        self.record.get(0).unwrap_or_default()
    }

    pub fn decode<R: RecordKind>(&self) -> std::result::Result<R, DecodeError> {
        R::decode(&self.fields())
    }

    /// Decode, attaching the source path and line to a failure
    pub fn decode_at<R: RecordKind>(&self, path: &Path) -> Result<R> {
        self.decode().map_err(|source| IngestError::Decode {
            path: path.to_path_buf(),
            line: self.line,
            source,
        })
    }
}

pub struct TsvReader {
    path: PathBuf,
    inner: BufReader<File>,
    line: u64,
    buf: Vec<u8>,
}

impl TsvReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| IngestError::Read {
            path: path.clone(),
            source,
        })?;

        let mut reader = Self {
            path,
            inner: BufReader::new(file),
            line: 0,
            buf: Vec::new(),
        };
        // Header row
        reader.next_line()?;

        Ok(reader)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows in file order; the header row is skipped.
    pub fn rows(&mut self) -> impl Iterator<Item = Result<RawRow>> + '_ {
        std::iter::from_fn(move || self.next_row().transpose())
    }

    fn next_row(&mut self) -> Result<Option<RawRow>> {
        let Some(text) = self.next_line()? else {
            return Ok(None);
        };

        // A blank line is a row with no columns, not a row with one empty column
        let record = if text.is_empty() {
            StringRecord::new()
        } else {
            text.split('\t').collect()
        };

        Ok(Some(RawRow {
            line: self.line,
            record,
        }))
    }

    /// Next physical line without its terminator, or `None` at end of file
    fn next_line(&mut self) -> Result<Option<&str>> {
        self.buf.clear();
        let read = self
            .inner
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| IngestError::Read {
                path: self.path.clone(),
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        self.line += 1;

        let mut bytes = self.buf.as_slice();
        bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
        bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);

        std::str::from_utf8(bytes)
            .map(Some)
            .map_err(|err| IngestError::Read {
                path: self.path.clone(),
                source: io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("line {}: {err}", self.line),
                ),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::records::Media;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_skips_header_and_splits_on_tabs() {
        let file = write_file("id\tname\nOCC1\tCarex \"sedge\"\nOCC2\t\n");
        let mut reader = TsvReader::open(file.path()).unwrap();
        let rows: Vec<RawRow> = reader.rows().collect::<Result<_>>().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields(), vec!["OCC1", "Carex \"sedge\""]);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].fields(), vec!["OCC2", ""]);
        assert_eq!(rows[1].leading_value(), "OCC2");
    }

    #[test]
    fn test_rows_of_any_width_are_returned() {
        let file = write_file("a\tb\tc\n1\n1\t2\t3\t4\n");
        let mut reader = TsvReader::open(file.path()).unwrap();
        let widths: Vec<usize> = reader.rows().map(|r| r.unwrap().fields().len()).collect();
        assert_eq!(widths, vec![1, 4]);
    }

    #[test]
    fn test_blank_line_is_an_empty_row_and_keeps_numbering() {
        let file = write_file("h1\th2\nOCC1\tx\n\nOCC2\ty\n");
        let mut reader = TsvReader::open(file.path()).unwrap();
        let rows: Vec<RawRow> = reader.rows().collect::<Result<_>>().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].line, 3);
        assert!(rows[1].fields().is_empty());
        assert_eq!(rows[1].leading_value(), "");
        assert_eq!(rows[2].line, 4);
        assert_eq!(rows[2].fields(), vec!["OCC2", "y"]);
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let file = write_file("h1\th2\r\nOCC1\tx\r\nOCC2\ty");
        let mut reader = TsvReader::open(file.path()).unwrap();
        let rows: Vec<RawRow> = reader.rows().collect::<Result<_>>().unwrap();

        assert_eq!(rows[0].fields(), vec!["OCC1", "x"]);
        assert_eq!(rows[1].fields(), vec!["OCC2", "y"]);
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn test_blank_line_fails_to_decode() {
        let file = write_file("header\n\n");
        let mut reader = TsvReader::open(file.path()).unwrap();
        let row = reader.rows().next().unwrap().unwrap();

        match row.decode_at::<Media>(reader.path()) {
            Err(IngestError::Decode { line, source, .. }) => {
                assert_eq!(line, 2);
                assert!(matches!(source, DecodeError::ColumnCount { found: 0, .. }));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_carries_line() {
        let file = write_file("header\nOCC1\tonly-two\n");
        let mut reader = TsvReader::open(file.path()).unwrap();
        let row = reader.rows().next().unwrap().unwrap();

        match row.decode_at::<Media>(reader.path()) {
            Err(IngestError::Decode { line, source, .. }) => {
                assert_eq!(line, 2);
                assert!(matches!(source, DecodeError::ColumnCount { found: 2, .. }));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TsvReader::open(dir.path().join("absent.txt")).err().unwrap();
        assert!(matches!(err, IngestError::Read { .. }));
    }
}
