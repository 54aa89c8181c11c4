//! Trace Reader.
//!
//! Parses memory access traces, one access per line:
//!
//! ```text
//! l 0x1fffff50 1
//! s 0x1fffff58 4
//! ```
//!
//! The first field is `l` (load) or `s` (store), the second a hexadecimal
//! address with an optional `0x` prefix, the third a decimal byte count.
//! Blank lines and lines starting with `#` are skipped. Records are parsed
//! lazily, so a trace can be streamed straight into a simulator without
//! being held in memory.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::common::error::TraceError;

/// Direction of a traced access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// Memory read.
    Load,
    /// Memory write.
    Store,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "l"),
            Self::Store => write!(f, "s"),
        }
    }
}

/// One traced memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TraceRecord {
    /// Load or store.
    pub kind: AccessKind,
    /// Byte address of the access.
    pub address: u32,
    /// Size of the access in bytes.
    pub bytes: u32,
}

impl TraceRecord {
    /// Parses one trace line. Returns `Ok(None)` for blank and comment lines.
    ///
    /// # Arguments
    ///
    /// * `line` - 1-based line number, used in error messages.
    /// * `text` - The line contents.
    ///
    /// # Errors
    ///
    /// Returns a [`TraceError`] describing the first field that failed to parse.
    pub fn parse_line(line: usize, text: &str) -> Result<Option<Self>, TraceError> {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(None);
        }

        let mut fields = text.split_whitespace();
        let (Some(op), Some(address), Some(bytes), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(TraceError::Malformed {
                line,
                reason: format!(
                    "expected `<op> <address> <bytes>`, found {} fields",
                    text.split_whitespace().count()
                ),
            });
        };

        let kind = match op {
            "l" | "L" => AccessKind::Load,
            "s" | "S" => AccessKind::Store,
            _ => {
                return Err(TraceError::UnknownOperation {
                    line,
                    op: op.to_owned(),
                });
            }
        };

        let hex = address
            .strip_prefix("0x")
            .or_else(|| address.strip_prefix("0X"))
            .unwrap_or(address);
        let address = u32::from_str_radix(hex, 16).map_err(|_| TraceError::BadAddress {
            line,
            text: address.to_owned(),
        })?;

        let bytes = bytes.parse().map_err(|_| TraceError::BadByteCount {
            line,
            text: bytes.to_owned(),
        })?;

        Ok(Some(Self {
            kind,
            address,
            bytes,
        }))
    }
}

impl FromStr for TraceRecord {
    type Err = TraceError;

    /// Parses a single non-empty record; blank and comment lines are errors here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(1, s)?.ok_or_else(|| TraceError::Malformed {
            line: 1,
            reason: "empty record".to_owned(),
        })
    }
}

/// Lazy iterator over the records of a trace.
///
/// Lines are read as raw bytes. A comment line is skipped even when it is
/// not valid UTF-8; any other non-UTF-8 line is reported as
/// [`TraceError::Malformed`] with its line number.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
        }
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let file = File::open(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "opened trace");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line += 1;

            let Ok(text) = std::str::from_utf8(&self.buf) else {
                if self.buf.trim_ascii_start().starts_with(b"#") {
                    continue;
                }
                return Some(Err(TraceError::Malformed {
                    line: self.line,
                    reason: "line is not valid UTF-8".to_owned(),
                }));
            };
            match TraceRecord::parse_line(self.line, text) {
                Ok(None) => {}
                Ok(Some(record)) => return Some(Ok(record)),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Reads every address of a trace file into memory.
///
/// Sweeps replay the same trace for each configuration, so the addresses
/// are read once and shared.
///
/// # Errors
///
/// Returns the first I/O or parse error in the file.
pub fn load_addresses(path: impl AsRef<Path>) -> Result<Vec<u32>, TraceError> {
    TraceReader::open(path)?
        .map(|record| record.map(|r| r.address))
        .collect()
}
