//! Trace rows and sources.
//!
//! Request logs are CSV files with a header row. Only three columns matter:
//! `blocksector` (the resource id), `read/write` (0 = read, 1 = write) and
//! `boot/exec` (1 = the request was issued after boot). Other columns and their order
//! are irrelevant.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::{Operation, ResourceId, TraceError};

/// Column holding the resource id.
pub const COL_BLOCK_SECTOR: &str = "blocksector";
/// Column holding the operation code.
pub const COL_READ_WRITE: &str = "read/write";
/// Column holding the boot/exec phase flag.
pub const COL_BOOT_EXEC: &str = "boot/exec";

/// One decoded row of a request log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Resource touched by the request.
    pub block_sector: ResourceId,
    /// Read or write.
    pub operation: Operation,
    /// `true` when the request belongs to the executing (post-boot) phase.
    pub exec: bool,
}

impl TraceRecord {
    /// Creates an exec-phase record.
    pub const fn new(block_sector: u64, operation: Operation) -> Self {
        Self {
            block_sector: ResourceId(block_sector),
            operation,
            exec: true,
        }
    }

    /// Creates a boot-phase record.
    pub const fn boot(block_sector: u64, operation: Operation) -> Self {
        Self {
            block_sector: ResourceId(block_sector),
            operation,
            exec: false,
        }
    }
}

/// Anything that can produce trace rows.
pub trait RecordSource {
    /// Reads every row of the source, in order.
    ///
    /// # Errors
    ///
    /// Returns a [`TraceError`] if the source cannot be read or decoded.
    fn records(&self) -> Result<Vec<TraceRecord>, TraceError>;

    /// Human-readable name used in log output.
    fn name(&self) -> String;
}

impl RecordSource for [TraceRecord] {
    fn records(&self) -> Result<Vec<TraceRecord>, TraceError> {
        Ok(self.to_vec())
    }

    fn name(&self) -> String {
        format!("<{} in-memory records>", self.len())
    }
}

impl RecordSource for Vec<TraceRecord> {
    fn records(&self) -> Result<Vec<TraceRecord>, TraceError> {
        self.as_slice().records()
    }

    fn name(&self) -> String {
        self.as_slice().name()
    }
}

/// A request log stored as a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTrace {
    path: PathBuf,
}

impl CsvTrace {
    /// Points at a CSV file; nothing is read until [`RecordSource::records`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decodes CSV text as if it had been read from this file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::MissingColumn`] if the header lacks a required column and
    /// [`TraceError::Parse`] for undecodable fields.
    pub fn parse(&self, text: &str) -> Result<Vec<TraceRecord>, TraceError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((_, header)) = lines.next() else {
            return Err(self.missing(COL_BLOCK_SECTOR));
        };
        let header: Vec<&str> = split_fields(header).collect();
        let column = |name: &'static str| {
            header
                .iter()
                .position(|h| *h == name)
                .ok_or_else(|| self.missing(name))
        };
        let sector_col = column(COL_BLOCK_SECTOR)?;
        let op_col = column(COL_READ_WRITE)?;
        let phase_col = column(COL_BOOT_EXEC)?;

        let mut records = Vec::new();
        for (line_no, line) in lines {
            let fields: Vec<&str> = split_fields(line).collect();
            let field = |idx: usize, name: &'static str| {
                fields
                    .get(idx)
                    .copied()
                    .ok_or_else(|| self.parse_error(line_no, name, ""))
            };

            let raw = field(sector_col, COL_BLOCK_SECTOR)?;
            let sector =
                parse_int(raw).ok_or_else(|| self.parse_error(line_no, COL_BLOCK_SECTOR, raw))?;
            let sector = u64::try_from(sector)
                .map_err(|_| self.parse_error(line_no, COL_BLOCK_SECTOR, raw))?;

            let raw = field(op_col, COL_READ_WRITE)?;
            let operation = parse_int(raw)
                .and_then(Operation::from_code)
                .ok_or_else(|| self.parse_error(line_no, COL_READ_WRITE, raw))?;

            let raw = field(phase_col, COL_BOOT_EXEC)?;
            let phase =
                parse_int(raw).ok_or_else(|| self.parse_error(line_no, COL_BOOT_EXEC, raw))?;

            records.push(TraceRecord {
                block_sector: ResourceId(sector),
                operation,
                exec: phase == 1,
            });
        }
        Ok(records)
    }

    fn missing(&self, column: &'static str) -> TraceError {
        TraceError::MissingColumn {
            path: self.path.clone(),
            column,
        }
    }

    fn parse_error(&self, line: usize, column: &'static str, value: &str) -> TraceError {
        TraceError::Parse {
            path: self.path.clone(),
            line,
            column,
            value: value.to_string(),
        }
    }
}

impl RecordSource for CsvTrace {
    fn records(&self) -> Result<Vec<TraceRecord>, TraceError> {
        let text = fs::read_to_string(&self.path).map_err(|source| TraceError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.parse(&text)
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Splits a CSV line, trimming whitespace and surrounding quotes from every field.
fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(|f| f.trim().trim_matches('"').trim())
}

/// Parses an integer field. Integral floats such as `12.0` are accepted.
fn parse_int(raw: &str) -> Option<i64> {
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    (v.is_finite() && v.fract().abs() < f64::EPSILON && v.abs() < 9.0e15).then_some(v as i64)
}
