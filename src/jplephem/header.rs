//! Header records of a DE430 binary ephemeris file
//!
//! The first two records of the file hold metadata: title lines, constant
//! names and values, the time span covered, and the pointer table that
//! locates each body's coefficients inside a data record.

use std::io::{Read, Seek};

use log::debug;
use serde::Serialize;

use crate::jplephem::binary::BinarySource;
use crate::jplephem::errors::{JplephemError, Result};
use crate::jplephem::layout::{RecordLayout, BODY_COUNT};
use crate::jplephem::names::Body;

/// Julian day range covered by the file and the length of one data record
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSpan {
    /// First Julian day covered
    pub start_jd: f64,
    /// Last Julian day covered
    pub end_jd: f64,
    /// Days covered by each data record
    pub interval_days: f64,
}

impl TimeSpan {
    /// Whether `jd` falls in `[start_jd, end_jd)`
    pub fn contains(&self, jd: f64) -> bool {
        jd >= self.start_jd && jd < self.end_jd
    }

    /// Number of data records the span calls for, whether or not the file stores them
    pub fn records_spanned(&self) -> u64 {
        ((self.end_jd - self.start_jd) / self.interval_days).ceil() as u64
    }
}

/// Pointer-table entry for one body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BodyPointer {
    /// 1-based position of the body's first coefficient in a data record
    pub offset: u32,
    /// Chebyshev coefficients per component
    pub coefficients: u32,
    /// Sub-intervals the data record is divided into for this body
    pub sub_intervals: u32,
}

impl BodyPointer {
    /// Number of doubles the body occupies in a data record, `None` on overflow
    pub fn len(&self, components: usize) -> Option<usize> {
        (self.coefficients as usize)
            .checked_mul(components)?
            .checked_mul(self.sub_intervals as usize)
    }

    /// Whether the body carries no coefficients
    pub fn is_empty(&self) -> bool {
        self.coefficients == 0 || self.sub_intervals == 0
    }
}

impl From<[u32; 3]> for BodyPointer {
    fn from(triple: [u32; 3]) -> Self {
        Self {
            offset: triple[0],
            coefficients: triple[1],
            sub_intervals: triple[2],
        }
    }
}

/// Decoded header of a DE430 file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    /// Title lines
    pub titles: Vec<String>,
    /// Constant names, first name block followed by the second
    pub constant_names: Vec<String>,
    /// Time span covered by the file
    pub time_span: TimeSpan,
    /// Number of constants actually stored
    pub constant_count: u32,
    /// Astronomical unit (km)
    pub au: f64,
    /// Earth/Moon mass ratio
    pub earth_moon_ratio: f64,
    /// Ephemeris edition number (430 for DE430)
    pub de_version: u32,
    /// Pointer table, one entry per body in [`Body::ALL`] order
    pub pointers: [BodyPointer; BODY_COUNT],
    /// Constant values, `constant_count` entries
    pub constant_values: Vec<f64>,
}

impl Header {
    /// Decode both header records from `source`
    pub fn read<R: Read + Seek>(source: &mut BinarySource<R>, layout: &RecordLayout) -> Result<Self> {
        let titles = source.read_text_field(&layout.titles)?;

        let mut constant_names = source.read_text_field(&layout.constant_names)?;
        constant_names.extend(source.read_text_field(&layout.constant_names_ext)?);

        let span = source.read_f64_field(&layout.time_span)?;
        let time_span = TimeSpan {
            start_jd: span[0],
            end_jd: span[1],
            interval_days: span[2],
        };

        let constant_count = source.read_u32_at(layout.constant_count.offset)?;
        let au = source.read_f64_at(layout.au.offset)?;
        let earth_moon_ratio = source.read_f64_at(layout.earth_moon_ratio.offset)?;
        let pointers = read_pointers(source, layout)?;
        let de_version = source.read_u32_at(layout.de_version.offset)?;

        validate(&time_span, constant_count, layout)?;

        let constant_values =
            source.read_f64_list(layout.constant_values_offset(), constant_count as usize)?;

        debug!(
            "Header of {:?}: DE{} JD {}..{} step {} days, {} constants",
            source.path(),
            de_version,
            time_span.start_jd,
            time_span.end_jd,
            time_span.interval_days,
            constant_count
        );

        Ok(Header {
            titles,
            constant_names,
            time_span,
            constant_count,
            au,
            earth_moon_ratio,
            de_version,
            pointers,
            constant_values,
        })
    }

    /// Pointer-table entry for `body`
    pub fn pointer(&self, body: Body) -> BodyPointer {
        self.pointers[body.table_index()]
    }

    /// Names of the populated constants, in file order
    pub fn populated_names(&self) -> &[String] {
        let n = (self.constant_count as usize).min(self.constant_names.len());
        &self.constant_names[..n]
    }

    /// Iterate over `(name, value)` pairs of the populated constants
    pub fn constants(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.populated_names()
            .iter()
            .map(String::as_str)
            .zip(self.constant_values.iter().copied())
    }

    /// Value of the constant called `name`, if the file stores it
    pub fn constant(&self, name: &str) -> Option<f64> {
        let name = name.trim();
        self.constants()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value)
    }
}

/// Read the pointer table; the libration entry lives at its own offset
fn read_pointers<R: Read + Seek>(
    source: &mut BinarySource<R>,
    layout: &RecordLayout,
) -> Result<[BodyPointer; BODY_COUNT]> {
    let mut pointers = [BodyPointer::default(); BODY_COUNT];

    let main = source.read_u32_field(&layout.pointers)?;
    for (slot, triple) in pointers.iter_mut().zip(main.chunks_exact(3)) {
        *slot = BodyPointer::from([triple[0], triple[1], triple[2]]);
    }

    let lib = source.read_u32_field(&layout.libration_pointer)?;
    let triple = match lib.as_slice() {
        [offset, coefficients, sub_intervals] => [*offset, *coefficients, *sub_intervals],
        other => {
            return Err(JplephemError::InvalidFormat(format!(
                "Libration pointer holds {} values, expected 3",
                other.len()
            )))
        }
    };
    pointers[Body::Librations.table_index()] = BodyPointer::from(triple);

    Ok(pointers)
}

fn validate(span: &TimeSpan, constant_count: u32, layout: &RecordLayout) -> Result<()> {
    if !(span.start_jd < span.end_jd) {
        return Err(JplephemError::InvalidFormat(format!(
            "Invalid time span: start {} is not before end {}",
            span.start_jd, span.end_jd
        )));
    }
    if !(span.interval_days > 0.0) {
        return Err(JplephemError::InvalidFormat(format!(
            "Invalid record interval: {} days",
            span.interval_days
        )));
    }
    if constant_count as usize > layout.max_constants() {
        return Err(JplephemError::InvalidFormat(format!(
            "Constant count {} exceeds {} names",
            constant_count,
            layout.max_constants()
        )));
    }
    Ok(())
}
