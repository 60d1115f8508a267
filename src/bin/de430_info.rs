//! DE430 Ephemeris Reader Tool
//!
//! Reads a JPL DE430 binary ephemeris and prints its header together with
//! the Chebyshev coefficients of one body for the record covering a date.
//!
//! Usage:
//!   cargo run --bin de430_info -- [BODY [JULIAN_DAY]] [--file JPLEPH] [--constants] [--json]
//!
//! Bodies are numbered as in the file's pointer table:
//!   1 Mercury, 2 Venus, 3 Earth-Moon barycenter, 4 Mars, 5 Jupiter,
//!   6 Saturn, 7 Uranus, 8 Neptune, 9 Pluto, 10 Moon (geocentric), 11 Sun,
//!   12 Nutations, 13 Librations

use clap::{ArgAction, Parser};
use serde::Serialize;

use jpleph430::jplephem::{
    Body, CoefficientSet, EphemerisReader, Header, RecordCoefficients, DEFAULT_FILE_NAME,
    DEFAULT_JD,
};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// DE430 Ephemeris Reader Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Prints the header and one body's coefficients from a JPL DE430 binary ephemeris",
    long_about = None
)]
struct Args {
    /// Body number (1-13)
    #[arg(default_value_t = 11, value_parser = clap::value_parser!(u32).range(1..=13))]
    body: u32,

    /// Julian day to read coefficients for
    #[arg(default_value_t = DEFAULT_JD)]
    jd: f64,

    /// Ephemeris file to read
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    file: String,

    /// List every constant name and value
    #[arg(short, long, action = ArgAction::SetTrue)]
    constants: bool,

    /// Print the result as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

/// Everything the tool reports, for JSON output
#[derive(Serialize)]
struct Report<'a> {
    body: Body,
    jd: f64,
    header: &'a Header,
    record_index: u64,
    record_start_jd: f64,
    record_end_jd: f64,
    coefficients: &'a CoefficientSet,
}

/// Prints a section header with a title
fn print_section_header(title: &str) {
    println!("=== {}", title);
}

/// Displays the decoded header fields
fn display_header(header: &Header, show_constants: bool) {
    print_section_header("TTL");
    for title in &header.titles {
        println!("{}", title);
    }

    if show_constants {
        print_section_header("CNAM");
        for name in &header.constant_names {
            println!("{}", name);
        }
    }

    print_section_header("SS");
    println!("{:.1}", header.time_span.start_jd);
    println!("{:.1}", header.time_span.end_jd);
    println!("{:.1}", header.time_span.interval_days);

    print_section_header("NCON");
    println!("{}", header.constant_count);
    print_section_header("AU");
    println!("{}", header.au);
    print_section_header("EMRAT");
    println!("{:.14}", header.earth_moon_ratio);
    print_section_header("NUMDE");
    println!("{}", header.de_version);

    print_section_header("IPT");
    for (body, pointer) in Body::ALL.iter().zip(header.pointers.iter()) {
        println!(
            "[{}, {}, {}]  {}",
            pointer.offset, pointer.coefficients, pointer.sub_intervals, body
        );
    }

    if show_constants {
        print_section_header("CVAL");
        for (name, value) in header.constants() {
            println!("{:<6} {:e}", name, value);
        }
    }
}

/// Displays the record position and the body's coefficients grouped by component
fn display_coefficients(coeffs: &RecordCoefficients, set: &CoefficientSet) {
    print_section_header("Record Index");
    println!("{}", coeffs.index);
    print_section_header("Julian Day (start, end)");
    println!("{:.1}, {:.1}", coeffs.start_jd, coeffs.end_jd);

    print_section_header("COEFF");
    for sub in &set.sub_intervals {
        for component in &sub.components {
            for c in &component.coefficients {
                println!("{:.14}", c);
            }
            println!("-");
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let body = Body::from_number(args.body).ok_or("body number must be between 1 and 13")?;

    let mut reader = EphemerisReader::open(&args.file)?;
    let coeffs = reader.lookup(args.jd)?;
    let set = coeffs
        .body(body)
        .ok_or_else(|| format!("no coefficients for {}", body))?;

    if args.json {
        let report = Report {
            body,
            jd: args.jd,
            header: reader.header(),
            record_index: coeffs.index,
            record_start_jd: coeffs.start_jd,
            record_end_jd: coeffs.end_jd,
            coefficients: set,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("---");
    println!(" Astro No. : {} ({})", body.number(), body);
    println!("Julian Day : {:.1}", args.jd);
    display_header(reader.header(), args.constants);
    display_coefficients(&coeffs, set);

    Ok(())
}
