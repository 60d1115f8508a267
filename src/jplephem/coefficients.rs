//! Per-body Chebyshev coefficient blocks
//!
//! Inside a data record each body's coefficients are stored contiguously,
//! ordered by sub-interval, then component, then coefficient:
//!
//! ```text
//! index = sub * components * n_coeff + component * n_coeff + k
//! ```
//!
//! This module slices a record with the pointer table and reshapes each
//! slice into [`CoefficientSet`] values.

use serde::Serialize;

use crate::jplephem::errors::{JplephemError, Result};
use crate::jplephem::header::BodyPointer;
use crate::jplephem::names::Body;
use crate::jplephem::record::DataRecord;

/// Coefficients of one component (axis or angle) over one sub-interval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub coefficients: Vec<f64>,
}

/// All components of one body over one sub-interval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubInterval {
    pub components: Vec<Component>,
}

/// Coefficients of one body for a whole data record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoefficientSet {
    /// Body the coefficients belong to
    pub body: Body,
    /// Sub-intervals in time order
    pub sub_intervals: Vec<SubInterval>,
}

impl CoefficientSet {
    /// Reshape a flat slice into `[sub_interval][component][coefficient]`
    ///
    /// `flat` must hold exactly `sub_intervals * body.component_count() * n_coeff` values.
    pub fn from_flat(body: Body, flat: &[f64], n_coeff: usize, sub_intervals: usize) -> Result<Self> {
        let components = body.component_count();
        let expected = n_coeff
            .checked_mul(components)
            .and_then(|n| n.checked_mul(sub_intervals))
            .ok_or_else(|| {
                JplephemError::InvalidFormat(format!(
                    "{} shape {}x{}x{} overflows",
                    body, sub_intervals, components, n_coeff
                ))
            })?;
        if flat.len() != expected {
            return Err(JplephemError::InvalidFormat(format!(
                "{} expects {} coefficients, got {}",
                body,
                expected,
                flat.len()
            )));
        }
        if expected == 0 {
            return Ok(CoefficientSet {
                body,
                sub_intervals: Vec::new(),
            });
        }

        let sub_intervals = flat
            .chunks_exact(components * n_coeff)
            .map(|block| SubInterval {
                components: block
                    .chunks_exact(n_coeff)
                    .map(|c| Component {
                        coefficients: c.to_vec(),
                    })
                    .collect(),
            })
            .collect();

        Ok(CoefficientSet {
            body,
            sub_intervals,
        })
    }

    /// Slice and reshape the coefficients of `body` out of `record`
    pub fn extract(record: &DataRecord, body: Body, pointer: BodyPointer) -> Result<Self> {
        if pointer.is_empty() {
            return Self::from_flat(body, &[], 0, 0);
        }
        if pointer.offset == 0 {
            return Err(JplephemError::InvalidFormat(format!(
                "{} has a zero offset in the pointer table",
                body
            )));
        }

        let start = pointer.offset as usize - 1;
        let end = pointer
            .len(body.component_count())
            .and_then(|len| start.checked_add(len))
            .filter(|&end| end <= record.len())
            .ok_or_else(|| {
                JplephemError::InvalidFormat(format!(
                    "{} pointer [{}, {}, {}] exceeds record of {} values",
                    body,
                    pointer.offset,
                    pointer.coefficients,
                    pointer.sub_intervals,
                    record.len()
                ))
            })?;

        Self::from_flat(
            body,
            &record.values[start..end],
            pointer.coefficients as usize,
            pointer.sub_intervals as usize,
        )
    }

    /// Number of components per sub-interval
    pub fn component_count(&self) -> usize {
        self.body.component_count()
    }

    /// Coefficients per component (0 when the set is empty)
    pub fn coefficient_count(&self) -> usize {
        self.sub_intervals
            .first()
            .and_then(|s| s.components.first())
            .map_or(0, |c| c.coefficients.len())
    }

    /// Total number of doubles held
    pub fn len(&self) -> usize {
        self.sub_intervals.len() * self.component_count() * self.coefficient_count()
    }

    /// Whether the set holds no coefficients
    pub fn is_empty(&self) -> bool {
        self.sub_intervals.is_empty()
    }

    /// Coefficients of `component` in sub-interval `sub`
    pub fn component(&self, sub: usize, component: usize) -> Option<&[f64]> {
        self.sub_intervals
            .get(sub)?
            .components
            .get(component)
            .map(|c| c.coefficients.as_slice())
    }
}

/// Extract all 13 bodies from `record`, in pointer-table order
pub fn extract_all(record: &DataRecord, pointers: &[BodyPointer]) -> Result<Vec<CoefficientSet>> {
    Body::ALL
        .iter()
        .zip(pointers)
        .map(|(&body, &pointer)| CoefficientSet::extract(record, body, pointer))
        .collect()
}

/// Coefficients of every body for one data record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordCoefficients {
    /// 0-based data record index
    pub index: u64,
    /// Start Julian day stored in the record
    pub start_jd: f64,
    /// End Julian day stored in the record
    pub end_jd: f64,
    /// One set per body, in [`Body::ALL`] order
    pub sets: Vec<CoefficientSet>,
}

impl RecordCoefficients {
    /// Extract every body from `record`
    pub fn from_record(record: &DataRecord, pointers: &[BodyPointer]) -> Result<Self> {
        Ok(RecordCoefficients {
            index: record.index,
            start_jd: record.start_jd,
            end_jd: record.end_jd,
            sets: extract_all(record, pointers)?,
        })
    }

    /// Coefficients of `body`
    pub fn body(&self, body: Body) -> Option<&CoefficientSet> {
        self.sets.iter().find(|set| set.body == body)
    }
}
