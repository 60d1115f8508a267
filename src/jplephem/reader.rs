//! DE430 ephemeris file reader
//!
//! [`EphemerisReader`] owns the open file, decodes the header once at
//! construction, and reads one data record per request.
//!
//! ```no_run
//! use jpleph430::jplephem::{Body, EphemerisReader};
//!
//! let mut reader = EphemerisReader::open("JPLEPH")?;
//! let coeffs = reader.lookup(2458849.5)?;
//! let sun = coeffs.body(Body::Sun).unwrap();
//! println!("{} sub-intervals", sun.sub_intervals.len());
//! # Ok::<(), jpleph430::jplephem::JplephemError>(())
//! ```

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::jplephem::binary::BinarySource;
use crate::jplephem::coefficients::{CoefficientSet, RecordCoefficients};
use crate::jplephem::errors::{io_err, JplephemError, Result};
use crate::jplephem::header::Header;
use crate::jplephem::layout::{RecordLayout, HEADER_RECORDS};
use crate::jplephem::names::Body;
use crate::jplephem::record::{compute_record_index, DataRecord};

/// Reader for a DE430 binary ephemeris
pub struct EphemerisReader<R = BufReader<File>> {
    source: BinarySource<R>,
    layout: RecordLayout,
    header: Header,
}

impl EphemerisReader {
    /// Open the file at `path` and decode its header
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let file = File::open(&path_buf).map_err(|e| io_err(&path_buf, e))?;
        Self::from_reader(BufReader::new(file), path_buf)
    }

    /// Open the default file name in the current working directory
    pub fn open_default() -> Result<Self> {
        Self::open(super::DEFAULT_FILE_NAME)
    }
}

impl<R: Read + Seek> EphemerisReader<R> {
    /// Decode the header of an already opened source using the DE430 layout
    pub fn from_reader(reader: R, path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_layout(reader, path, RecordLayout::DE430)
    }

    /// Decode the header of an already opened source using `layout`
    ///
    /// Fails with [`JplephemError::InvalidFormat`] when `layout` itself is
    /// inconsistent, before anything is read.
    pub fn with_layout(reader: R, path: impl Into<PathBuf>, layout: RecordLayout) -> Result<Self> {
        layout.validate()?;
        let mut source = BinarySource::new(reader, path);
        let len = source.len()?;
        debug!("Opening ephemeris {:?} ({} bytes)", source.path(), len);
        let header = Header::read(&mut source, &layout)?;
        Ok(EphemerisReader {
            source,
            layout,
            header,
        })
    }

    /// Decoded header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Layout table in use
    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }

    /// Path or label of the source
    pub fn path(&self) -> &Path {
        self.source.path()
    }

    /// Index of the data record for `jd`, without range checks
    pub fn record_index(&self, jd: f64) -> i64 {
        compute_record_index(jd, &self.header.time_span)
    }

    /// Number of complete data records present in the source
    pub fn record_count(&mut self) -> Result<u64> {
        let len = self.source.len()?;
        let records = len / self.layout.record_bytes();
        Ok(records.saturating_sub(HEADER_RECORDS))
    }

    /// Read data record `index` without checking it against the file size
    pub fn read_record(&mut self, index: u64) -> Result<DataRecord> {
        DataRecord::read(&mut self.source, &self.layout, index)
    }

    /// Read data record `index` and extract the coefficients of every body
    pub fn read_coefficients(&mut self, index: u64) -> Result<RecordCoefficients> {
        let record = self.read_record(index)?;
        RecordCoefficients::from_record(&record, &self.header.pointers)
    }

    /// Read data record `index` and extract the coefficients of `body`
    pub fn read_body(&mut self, index: u64, body: Body) -> Result<CoefficientSet> {
        let record = self.read_record(index)?;
        CoefficientSet::extract(&record, body, self.header.pointer(body))
    }

    /// Coefficients of every body for the record covering `jd`
    ///
    /// Unlike [`read_coefficients`](Self::read_coefficients), the date is
    /// checked against the header span, the record index against the records
    /// present, and the record's own dates against `jd`.
    pub fn lookup(&mut self, jd: f64) -> Result<RecordCoefficients> {
        let index = self.checked_index(jd)?;
        let record = self.read_record(index)?;
        if !record.covers(jd) {
            warn!(
                "Record {} spans {}..{} but was selected for JD {}",
                index, record.start_jd, record.end_jd, jd
            );
            return Err(JplephemError::RecordMismatch {
                jd,
                start_jd: record.start_jd,
                end_jd: record.end_jd,
            });
        }
        RecordCoefficients::from_record(&record, &self.header.pointers)
    }

    /// Range-checked record index for `jd`
    pub fn checked_index(&mut self, jd: f64) -> Result<u64> {
        let span = self.header.time_span;
        if !span.contains(jd) {
            warn!(
                "JD {} outside ephemeris span {}..{}",
                jd, span.start_jd, span.end_jd
            );
            return Err(JplephemError::OutOfRangeError {
                jd,
                start_jd: span.start_jd,
                end_jd: span.end_jd,
            });
        }

        let index = self.record_index(jd);
        let available = self.record_count()?;
        if index < 0 || index as u64 >= available {
            warn!(
                "Record {} for JD {} is missing ({} data records)",
                index, jd, available
            );
            return Err(JplephemError::RecordOutOfRange { index, available });
        }
        Ok(index as u64)
    }
}
