//! jpleph430: reader for JPL DE430 binary ephemeris files
//!
//! This crate decodes the header records of a DE430 binary ephemeris
//! (titles, constants, time span, pointer table) and the Chebyshev
//! coefficient blocks stored for each body in its data records.
//!
//! See [`jplephem::EphemerisReader`] for the entry point.

pub mod jplephem;

// Re-export commonly used types
pub use jplephem::{Body, EphemerisReader, Header, JplephemError, RecordCoefficients};
