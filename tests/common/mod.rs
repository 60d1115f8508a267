//! Shared helpers for integration tests: writes a small DE430-layout file.
//!
//! Every header field is placed at the offset given by
//! [`RecordLayout::DE430`], so the file follows the same table the reader
//! decodes with.

use std::io::Write;
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, WriteBytesExt};
use jpleph430::jplephem::{FieldLayout, RecordLayout};

pub const LAYOUT: RecordLayout = RecordLayout::DE430;
pub const START_JD: f64 = 2287184.5;
pub const END_JD: f64 = 2688976.5;
pub const INTERVAL: f64 = 32.0;

/// DE430 pointer table, bodies 1..=13
pub const POINTERS: [[u32; 3]; 13] = [
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

pub const TITLES: [&str; 3] = [
    "JPL Planetary Ephemeris DE430/LE430",
    "Start Epoch: JED=  2287184.5 1549 DEC 21 00:00:00",
    "Final Epoch: JED=  2688976.5 2650 JAN 25 00:00:00",
];

pub const CONSTANTS: [(&str, f64); 3] = [
    ("DENUM", 430.0),
    ("AU", 149597870.7),
    ("EMRAT", 81.30056907419062),
];

/// Value stored at 0-based `position` of data record `record`
pub fn coefficient(record: usize, position: usize) -> f64 {
    -((record * 100_000 + position) as f64)
}

fn constant_name(i: usize) -> String {
    match CONSTANTS.get(i) {
        Some((n, _)) => n.to_string(),
        None => format!("N{}", i),
    }
}

fn put_text(bytes: &mut [u8], field: &FieldLayout, item: usize, text: &str) {
    let at = field.offset as usize + item * field.width;
    let slot = &mut bytes[at..at + field.width];
    slot.fill(b' ');
    slot[..text.len()].copy_from_slice(text.as_bytes());
}

fn put_u32s(bytes: &mut [u8], field: &FieldLayout, values: &[u32]) {
    let mut slot = &mut bytes[field.offset as usize..];
    for v in values {
        slot.write_u32::<LittleEndian>(*v).unwrap();
    }
}

fn put_f64s(bytes: &mut [u8], offset: u64, values: &[f64]) {
    let mut slot = &mut bytes[offset as usize..];
    for v in values {
        slot.write_f64::<LittleEndian>(*v).unwrap();
    }
}

/// Serialize a file holding `records` data records
pub fn ephemeris_bytes(records: usize) -> Vec<u8> {
    let record_bytes = LAYOUT.record_bytes() as usize;
    let mut bytes = vec![0u8; record_bytes * (2 + records)];

    for (i, title) in TITLES.iter().enumerate() {
        put_text(&mut bytes, &LAYOUT.titles, i, title);
    }
    let first_block = LAYOUT.constant_names.count;
    for i in 0..first_block {
        put_text(&mut bytes, &LAYOUT.constant_names, i, &constant_name(i));
    }
    for i in 0..LAYOUT.constant_names_ext.count {
        let name = constant_name(first_block + i);
        put_text(&mut bytes, &LAYOUT.constant_names_ext, i, &name);
    }

    put_f64s(&mut bytes, LAYOUT.time_span.offset, &[START_JD, END_JD, INTERVAL]);
    put_u32s(&mut bytes, &LAYOUT.constant_count, &[CONSTANTS.len() as u32]);
    put_f64s(&mut bytes, LAYOUT.au.offset, &[CONSTANTS[1].1]);
    put_f64s(&mut bytes, LAYOUT.earth_moon_ratio.offset, &[CONSTANTS[2].1]);
    let main: Vec<u32> = POINTERS[..12].iter().flatten().copied().collect();
    put_u32s(&mut bytes, &LAYOUT.pointers, &main);
    put_u32s(&mut bytes, &LAYOUT.de_version, &[430]);
    put_u32s(&mut bytes, &LAYOUT.libration_pointer, &POINTERS[12]);

    let values: Vec<f64> = CONSTANTS.iter().map(|(_, v)| *v).collect();
    put_f64s(&mut bytes, LAYOUT.constant_values_offset(), &values);

    for r in 0..records {
        let start = START_JD + r as f64 * INTERVAL;
        let mut record = vec![start, start + INTERVAL];
        record.extend((2..LAYOUT.doubles_per_record()).map(|position| coefficient(r, position)));
        let offset = LAYOUT.data_record_offset(r as u64).unwrap();
        put_f64s(&mut bytes, offset, &record);
    }
    bytes
}

/// Write a file named `JPLEPH` into `dir`
pub fn write_ephemeris(dir: &Path, records: usize) -> PathBuf {
    let path = dir.join("JPLEPH");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&ephemeris_bytes(records)).unwrap();
    path
}
