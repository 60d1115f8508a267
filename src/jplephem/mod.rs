//! JPL DE430 binary ephemeris reader
//!
//! This module reads the binary distribution of the JPL Development
//! Ephemeris DE430: the two header records (titles, constants, time span,
//! pointer table) and the data records holding Chebyshev coefficients for
//! each body.
//!
//! # Main Components
//!
//! - `layout`: byte offsets of every header field, as a data table
//! - `binary`: little-endian seek-and-read primitives
//! - `header`: header record decoding
//! - `record`: record index computation and data record reading
//! - `coefficients`: per-body reshaping of a data record
//! - `reader`: the `EphemerisReader` tying the pieces together
//! - `names`: the 13 bodies of the pointer table
//! - Error types for proper error handling
//!
//! Evaluating the Chebyshev series is left to callers.

pub mod binary;
pub mod coefficients;
pub mod errors;
pub mod header;
pub mod layout;
pub mod names;
pub mod reader;
pub mod record;

#[cfg(test)]
mod fixture;

/// File name of the ephemeris looked up in the working directory
pub const DEFAULT_FILE_NAME: &str = "JPLEPH";

/// Julian day used when the caller gives none (2020-01-01 00:00 UTC)
pub const DEFAULT_JD: f64 = 2458849.5;

// Re-export primary types for convenience
pub use self::coefficients::{CoefficientSet, Component, RecordCoefficients, SubInterval};
pub use self::errors::{JplephemError, Result};
pub use self::header::{BodyPointer, Header, TimeSpan};
pub use self::layout::{FieldLayout, RecordLayout};
pub use self::names::Body;
pub use self::reader::EphemerisReader;
pub use self::record::{compute_record_index, DataRecord};
