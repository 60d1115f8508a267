//! Error types for the jplephem module
//!
//! This module defines error types for reading DE430 binary ephemeris files.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for jplephem functionality
#[derive(Error, Debug)]
pub enum JplephemError {
    /// Error when a file I/O operation fails
    #[error("File I/O error on {path:?}: {source}")]
    FileError {
        /// The path of the file that caused the error
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Error when a read runs past the end of the file
    #[error("File {path:?} is truncated: needed {wanted} bytes at offset {offset}")]
    Truncated {
        /// The path of the file being read
        path: PathBuf,
        /// Byte offset of the failed read
        offset: u64,
        /// Number of bytes requested
        wanted: usize,
    },

    /// Error when decoded values violate the file format
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// Error when a date is outside the range covered by the ephemeris
    #[error("Date {jd} is outside ephemeris range ({start_jd}..{end_jd})")]
    OutOfRangeError {
        /// The Julian date that was requested
        jd: f64,
        /// The start of the ephemeris range
        start_jd: f64,
        /// The end of the ephemeris range
        end_jd: f64,
    },

    /// Error when a record index points past the data records in the file
    #[error("Record {index} does not exist (file holds {available} data records)")]
    RecordOutOfRange {
        /// The requested record index
        index: i64,
        /// Number of data records present
        available: u64,
    },

    /// Error when a data record does not cover the date it was selected for
    #[error("Record covering {start_jd}..{end_jd} does not contain date {jd}")]
    RecordMismatch {
        /// The Julian date that was requested
        jd: f64,
        /// Start of the record as stored in the file
        start_jd: f64,
        /// End of the record as stored in the file
        end_jd: f64,
    },
}

/// Extension of the Result type for jplephem operations
pub type Result<T> = std::result::Result<T, JplephemError>;

/// Helper function to convert a std::io::Error to JplephemError
pub fn io_err(path: impl Into<PathBuf>, err: std::io::Error) -> JplephemError {
    JplephemError::FileError {
        path: path.into(),
        source: err,
    }
}
