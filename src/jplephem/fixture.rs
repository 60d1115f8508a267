//! Synthetic DE430-layout files for tests
//!
//! Data record `r` stores its dates in the first two slots and
//! `r * 10000 + position` in every other slot, so a coefficient's value
//! tells where it was read from.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::jplephem::header::BodyPointer;
use crate::jplephem::layout::{FieldLayout, RecordLayout, BODY_COUNT};
use crate::jplephem::names::Body;

/// Pointer table of the DE430 distribution
pub const DE430_POINTERS: [[u32; 3]; BODY_COUNT] = [
    [3, 14, 4],
    [171, 10, 2],
    [231, 13, 2],
    [309, 11, 1],
    [342, 8, 1],
    [366, 7, 1],
    [387, 6, 1],
    [405, 6, 1],
    [423, 6, 1],
    [441, 13, 8],
    [753, 11, 2],
    [819, 10, 4],
    [899, 10, 4],
];

/// Builder for an in-memory ephemeris file
#[derive(Debug, Clone)]
pub struct FixtureBuilder {
    layout: RecordLayout,
    span: (f64, f64, f64),
    constants: Vec<(String, f64)>,
    constant_count: Option<u32>,
    pointers: [BodyPointer; BODY_COUNT],
    records: u64,
    date_shift: f64,
}

impl FixtureBuilder {
    pub fn new() -> Self {
        Self {
            layout: RecordLayout::DE430,
            span: (2287184.5, 2688976.5, 32.0),
            constants: vec![
                ("DENUM".to_string(), 430.0),
                ("LENUM".to_string(), 430.0),
                ("AU".to_string(), 149597870.7),
                ("EMRAT".to_string(), 81.30056907419062),
            ],
            constant_count: None,
            pointers: DE430_POINTERS.map(BodyPointer::from),
            records: 3,
            date_shift: 0.0,
        }
    }

    pub fn records(mut self, records: u64) -> Self {
        self.records = records;
        self
    }

    pub fn time_span(mut self, start: f64, end: f64, interval: f64) -> Self {
        self.span = (start, end, interval);
        self
    }

    pub fn constants(mut self, constants: &[(&str, f64)]) -> Self {
        self.constants = constants
            .iter()
            .map(|(n, v)| (n.to_string(), *v))
            .collect();
        self
    }

    /// Store `count` in NCON regardless of the constants written
    pub fn constant_count_override(mut self, count: u32) -> Self {
        self.constant_count = Some(count);
        self
    }

    pub fn with_pointer(mut self, body: Body, pointer: BodyPointer) -> Self {
        self.pointers[body.table_index()] = pointer;
        self
    }

    /// Shift the dates stored inside every data record
    pub fn shift_record_dates(mut self, days: f64) -> Self {
        self.date_shift = days;
        self
    }

    pub fn constant_count(&self) -> u32 {
        self.constant_count
            .unwrap_or(self.constants.len() as u32)
    }

    pub fn pointer(&self, body: Body) -> BodyPointer {
        self.pointers[body.table_index()]
    }

    /// Value stored at 0-based `position` of data record `record`
    pub fn value_at(record: u64, position: usize) -> f64 {
        (record * 10000) as f64 + position as f64
    }

    /// Start and end dates stored in data record `record`
    pub fn record_dates(&self, record: u64) -> (f64, f64) {
        let (start, _, interval) = self.span;
        let first = start + record as f64 * interval + self.date_shift;
        (first, first + interval)
    }

    pub fn build(&self) -> Vec<u8> {
        let record_bytes = self.layout.record_bytes() as usize;
        let mut bytes = vec![0u8; record_bytes * (2 + self.records as usize)];

        let (start, end, interval) = self.span;
        let titles = [
            "JPL Planetary Ephemeris DE430/LE430".to_string(),
            format!("Start Epoch: JED= {:10.1}", start),
            format!("Final Epoch: JED= {:10.1}", end),
        ];
        write_text(&mut bytes, &self.layout.titles, &titles);

        let names: Vec<String> = (0..self.layout.max_constants())
            .map(|i| match self.constants.get(i) {
                Some((name, _)) => name.clone(),
                None => format!("C{:04}", i),
            })
            .collect();
        let first_block = self.layout.constant_names.count;
        write_text(&mut bytes, &self.layout.constant_names, &names[..first_block]);
        write_text(&mut bytes, &self.layout.constant_names_ext, &names[first_block..]);

        let mut at = self.layout.time_span.offset as usize;
        for v in [start, end, interval] {
            put_f64(&mut bytes, at, v);
            at += 8;
        }
        put_u32(&mut bytes, self.layout.constant_count.offset as usize, self.constant_count());
        put_f64(&mut bytes, self.layout.au.offset as usize, 149597870.7);
        put_f64(&mut bytes, self.layout.earth_moon_ratio.offset as usize, 81.30056907419062);

        let mut at = self.layout.pointers.offset as usize;
        for pointer in &self.pointers[..BODY_COUNT - 1] {
            for v in [pointer.offset, pointer.coefficients, pointer.sub_intervals] {
                put_u32(&mut bytes, at, v);
                at += 4;
            }
        }
        put_u32(&mut bytes, self.layout.de_version.offset as usize, 430);
        let lib = self.pointers[BODY_COUNT - 1];
        let mut at = self.layout.libration_pointer.offset as usize;
        for v in [lib.offset, lib.coefficients, lib.sub_intervals] {
            put_u32(&mut bytes, at, v);
            at += 4;
        }

        let mut at = self.layout.constant_values_offset() as usize;
        for (_, value) in &self.constants {
            put_f64(&mut bytes, at, *value);
            at += 8;
        }

        for record in 0..self.records {
            let base = self
                .layout
                .data_record_offset(record)
                .expect("fixture record offset") as usize;
            let (first, last) = self.record_dates(record);
            put_f64(&mut bytes, base, first);
            put_f64(&mut bytes, base + 8, last);
            for position in 2..self.layout.doubles_per_record() {
                put_f64(&mut bytes, base + position * 8, Self::value_at(record, position));
            }
        }

        bytes
    }
}

fn write_text(bytes: &mut [u8], field: &FieldLayout, items: &[String]) {
    for (i, item) in items.iter().take(field.count).enumerate() {
        let at = field.offset as usize + i * field.width;
        let slot = &mut bytes[at..at + field.width];
        slot.fill(b' ');
        let n = item.len().min(field.width);
        slot[..n].copy_from_slice(&item.as_bytes()[..n]);
    }
}

fn put_u32(bytes: &mut [u8], at: usize, value: u32) {
    (&mut bytes[at..at + 4])
        .write_u32::<LittleEndian>(value)
        .unwrap();
}

fn put_f64(bytes: &mut [u8], at: usize, value: f64) {
    (&mut bytes[at..at + 8])
        .write_f64::<LittleEndian>(value)
        .unwrap();
}
