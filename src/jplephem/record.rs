//! Data records and record selection
//!
//! After the two header records, the file is a sequence of equally sized
//! data records. Record `n` covers `[start + n * interval, start + (n+1) * interval]`
//! and begins with its own start and end Julian day.

use std::io::{Read, Seek};

use log::trace;
use serde::Serialize;

use crate::jplephem::binary::BinarySource;
use crate::jplephem::errors::{JplephemError, Result};
use crate::jplephem::header::TimeSpan;
use crate::jplephem::layout::{RecordLayout, DOUBLE_SIZE};

/// Index of the data record holding coefficients for `jd`
///
/// `(jd - start) / interval`, truncated toward zero. The result is not
/// checked against the number of records in the file.
pub fn compute_record_index(jd: f64, span: &TimeSpan) -> i64 {
    ((jd - span.start_jd) / span.interval_days).trunc() as i64
}

/// One data record as stored in the file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataRecord {
    /// 0-based index of the record after the header records
    pub index: u64,
    /// Start Julian day stored in the record
    pub start_jd: f64,
    /// End Julian day stored in the record
    pub end_jd: f64,
    /// All doubles of the record, including the two leading dates
    #[serde(skip)]
    pub values: Vec<f64>,
}

impl DataRecord {
    /// Read data record `index` from `source`
    pub fn read<R: Read + Seek>(
        source: &mut BinarySource<R>,
        layout: &RecordLayout,
        index: u64,
    ) -> Result<Self> {
        let count = layout.doubles_per_record();
        // An offset beyond u64 is past the end of any file
        let offset = layout
            .data_record_offset(index)
            .ok_or_else(|| JplephemError::Truncated {
                path: source.path().to_path_buf(),
                offset: u64::MAX,
                wanted: count * DOUBLE_SIZE,
            })?;
        trace!("Reading data record {} at byte {}", index, offset);

        let values = source.read_f64_list(offset, count)?;
        Self::from_values(index, values)
    }

    /// Build a record from its flat values
    pub fn from_values(index: u64, values: Vec<f64>) -> Result<Self> {
        if values.len() < 2 {
            return Err(JplephemError::InvalidFormat(format!(
                "Data record {} holds {} values, expected at least 2",
                index,
                values.len()
            )));
        }
        Ok(DataRecord {
            index,
            start_jd: values[0],
            end_jd: values[1],
            values,
        })
    }

    /// Whether `jd` lies within the dates stored in the record
    pub fn covers(&self, jd: f64) -> bool {
        jd >= self.start_jd && jd <= self.end_jd
    }

    /// Number of doubles in the record
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
