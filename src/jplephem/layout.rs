//! Byte layout of DE430 binary ephemeris files
//!
//! Every fixed field of the two header records is described here as data
//! (byte offset, width of one item, number of items) so the decoders never
//! carry literal offsets of their own.
//!
//! ```text
//! record 0  | TTL 3x84 | CNAM 400x6 | SS 3xf64 | NCON | AU | EMRAT | IPT 12x3 | NUMDE | LPT 3 | CNAM 400x6 |
//! record 1  | CVAL NCON x f64                                                                          |
//! record 2+ | JD start | JD end | coefficients ... (1018 x f64 per record)                              |
//! ```

use serde::Serialize;

use crate::jplephem::errors::{JplephemError, Result};

/// Size of a double-precision value (bytes)
pub const DOUBLE_SIZE: usize = 8;
/// Size of a 4-byte integer word (bytes)
pub const WORD_SIZE: usize = 4;
/// Number of header records preceding the first data record
pub const HEADER_RECORDS: u64 = 2;
/// Number of bodies in the pointer table
pub const BODY_COUNT: usize = 13;
/// Widest fixed-width text field in the format (title lines)
pub const MAX_TEXT_WIDTH: usize = 84;

/// Position and shape of one fixed field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldLayout {
    /// Byte offset from the start of the file
    pub offset: u64,
    /// Width of a single item in bytes
    pub width: usize,
    /// Number of consecutive items
    pub count: usize,
}

impl FieldLayout {
    /// Create a field description
    pub const fn new(offset: u64, width: usize, count: usize) -> Self {
        Self {
            offset,
            width,
            count,
        }
    }

    /// Total number of bytes covered by the field, `None` on overflow
    pub const fn len_bytes(&self) -> Option<usize> {
        self.width.checked_mul(self.count)
    }

    /// Byte offset just past the end of the field, `None` on overflow
    pub const fn end(&self) -> Option<u64> {
        match self.len_bytes() {
            Some(len) => self.offset.checked_add(len as u64),
            None => None,
        }
    }
}

/// Complete layout table for one file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordLayout {
    /// Record size in 4-byte words (KSIZE)
    pub record_words: u32,
    /// Title lines
    pub titles: FieldLayout,
    /// First block of constant names
    pub constant_names: FieldLayout,
    /// Start JD, end JD and record interval
    pub time_span: FieldLayout,
    /// Number of populated constants
    pub constant_count: FieldLayout,
    /// Astronomical unit in km
    pub au: FieldLayout,
    /// Earth/Moon mass ratio
    pub earth_moon_ratio: FieldLayout,
    /// Pointer triples for bodies 1 to 12
    pub pointers: FieldLayout,
    /// Ephemeris edition number
    pub de_version: FieldLayout,
    /// Pointer triple for lunar librations, stored apart from the others
    pub libration_pointer: FieldLayout,
    /// Second block of constant names
    pub constant_names_ext: FieldLayout,
}

impl RecordLayout {
    /// Layout of the DE430 binary distribution (KSIZE = 2036)
    pub const DE430: RecordLayout = RecordLayout {
        record_words: 2036,
        titles: FieldLayout::new(0, 84, 3),
        constant_names: FieldLayout::new(252, 6, 400),
        time_span: FieldLayout::new(2652, DOUBLE_SIZE, 3),
        constant_count: FieldLayout::new(2676, WORD_SIZE, 1),
        au: FieldLayout::new(2680, DOUBLE_SIZE, 1),
        earth_moon_ratio: FieldLayout::new(2688, DOUBLE_SIZE, 1),
        pointers: FieldLayout::new(2696, WORD_SIZE, 12 * 3),
        de_version: FieldLayout::new(2840, WORD_SIZE, 1),
        libration_pointer: FieldLayout::new(2844, WORD_SIZE, 3),
        constant_names_ext: FieldLayout::new(2856, 6, 400),
    };

    /// Size of one record in bytes
    pub const fn record_bytes(&self) -> u64 {
        self.record_words as u64 * WORD_SIZE as u64
    }

    /// Number of doubles held by one data record
    pub const fn doubles_per_record(&self) -> usize {
        self.record_words as usize / 2
    }

    /// Byte offset of the constant values (start of the second header record)
    pub const fn constant_values_offset(&self) -> u64 {
        self.record_bytes()
    }

    /// Maximum number of constant names the header can hold
    pub const fn max_constants(&self) -> usize {
        self.constant_names.count + self.constant_names_ext.count
    }

    /// Byte offset of data record `index` (0-based, after the header records)
    ///
    /// `None` when the offset does not fit in a `u64`.
    pub const fn data_record_offset(&self, index: u64) -> Option<u64> {
        match HEADER_RECORDS.checked_add(index) {
            Some(n) => self.record_bytes().checked_mul(n),
            None => None,
        }
    }

    /// Check that the table describes a decodable file
    ///
    /// Numeric fields must have the item width and count the decoders
    /// expect, text fields must fit the text buffer, every header field
    /// must lie inside the first record, and the constant values must fit
    /// the second.
    pub fn validate(&self) -> Result<()> {
        // Two leading dates per data record
        if self.doubles_per_record() < 2 || self.record_words % 2 != 0 {
            return Err(JplephemError::InvalidFormat(format!(
                "Record size of {} words cannot hold a data record",
                self.record_words
            )));
        }

        let numeric = [
            ("time span", self.time_span, DOUBLE_SIZE, 3),
            ("constant count", self.constant_count, WORD_SIZE, 1),
            ("AU", self.au, DOUBLE_SIZE, 1),
            ("EMRAT", self.earth_moon_ratio, DOUBLE_SIZE, 1),
            ("pointer table", self.pointers, WORD_SIZE, (BODY_COUNT - 1) * 3),
            ("DE number", self.de_version, WORD_SIZE, 1),
            ("libration pointer", self.libration_pointer, WORD_SIZE, 3),
        ];
        for (name, field, width, count) in numeric {
            if field.width != width || field.count != count {
                return Err(JplephemError::InvalidFormat(format!(
                    "{} field is {} x {} bytes, expected {} x {}",
                    name, field.count, field.width, count, width
                )));
            }
        }

        let text = [
            ("titles", self.titles),
            ("constant names", self.constant_names),
            ("constant names (second block)", self.constant_names_ext),
        ];
        for (name, field) in text {
            if field.width > MAX_TEXT_WIDTH {
                return Err(JplephemError::InvalidFormat(format!(
                    "{} width {} exceeds {} bytes",
                    name, field.width, MAX_TEXT_WIDTH
                )));
            }
        }

        let record_bytes = self.record_bytes();
        for (name, field) in numeric
            .iter()
            .map(|(name, field, _, _)| (*name, *field))
            .chain(text)
        {
            if !matches!(field.end(), Some(end) if end <= record_bytes) {
                return Err(JplephemError::InvalidFormat(format!(
                    "{} field at byte {} does not fit a {}-byte header record",
                    name, field.offset, record_bytes
                )));
            }
        }

        let values_fit = self
            .max_constants()
            .checked_mul(DOUBLE_SIZE)
            .map_or(false, |bytes| bytes as u64 <= record_bytes);
        if !values_fit {
            return Err(JplephemError::InvalidFormat(format!(
                "{} constant values do not fit a {}-byte header record",
                self.max_constants(),
                record_bytes
            )));
        }
        Ok(())
    }
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self::DE430
    }
}
