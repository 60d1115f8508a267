//! Bodies of the DE430 pointer table
//!
//! The pointer table of a DE430 file holds one entry per body in a fixed
//! order. This module gives those entries names and 1-based numbers.

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A body (or angle series) stored in the ephemeris, in pointer-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Body {
    Mercury,
    Venus,
    EarthMoonBarycenter,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    /// Moon relative to the Earth
    Moon,
    Sun,
    /// Earth nutations in longitude and obliquity (IAU 1980 model)
    Nutations,
    /// Lunar mantle librations
    Librations,
}

impl Body {
    /// All bodies in pointer-table order
    pub const ALL: [Body; 13] = [
        Body::Mercury,
        Body::Venus,
        Body::EarthMoonBarycenter,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::Moon,
        Body::Sun,
        Body::Nutations,
        Body::Librations,
    ];

    /// Body for a 1-based pointer-table number (1..=13)
    pub fn from_number(number: u32) -> Option<Body> {
        match number {
            1..=13 => Some(Self::ALL[number as usize - 1]),
            _ => None,
        }
    }

    /// 1-based pointer-table number
    pub fn number(self) -> u32 {
        self.table_index() as u32 + 1
    }

    /// 0-based position in the pointer table
    pub fn table_index(self) -> usize {
        self as usize
    }

    /// Number of components each sub-interval carries
    ///
    /// Nutations hold two angles; every other series holds three.
    pub fn component_count(self) -> usize {
        match self {
            Body::Nutations => 2,
            _ => 3,
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        BODY_NAME_PAIRS
            .iter()
            .find(|(body, _)| *body == self)
            .map(|(_, name)| *name)
            .unwrap_or("UNKNOWN")
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

lazy_static! {
    /// Map from lowercase body names to bodies
    static ref BODY_IDS: HashMap<String, Body> = {
        let mut m = HashMap::new();
        for &(body, name) in BODY_NAME_PAIRS.iter() {
            m.insert(name.to_lowercase(), body);
        }
        m
    };
}

/// Look up a body by name (case-insensitive) or by its 1-based number
pub fn body_from_name(name: &str) -> Option<Body> {
    let name = name.trim();
    if let Ok(number) = name.parse::<u32>() {
        return Body::from_number(number);
    }
    BODY_IDS.get(&name.to_lowercase()).copied()
}

/// Pairs of (body, name); the first name listed for a body is its canonical name
const BODY_NAME_PAIRS: &[(Body, &str)] = &[
    (Body::Mercury, "MERCURY"),
    (Body::Venus, "VENUS"),
    (Body::EarthMoonBarycenter, "EARTH-MOON BARYCENTER"),
    (Body::EarthMoonBarycenter, "EARTH MOON BARYCENTER"),
    (Body::EarthMoonBarycenter, "EMB"),
    (Body::Mars, "MARS"),
    (Body::Jupiter, "JUPITER"),
    (Body::Saturn, "SATURN"),
    (Body::Uranus, "URANUS"),
    (Body::Neptune, "NEPTUNE"),
    (Body::Pluto, "PLUTO"),
    (Body::Moon, "MOON"),
    (Body::Sun, "SUN"),
    (Body::Nutations, "NUTATIONS"),
    (Body::Nutations, "NUTATION"),
    (Body::Librations, "LIBRATIONS"),
    (Body::Librations, "LIBRATION"),
];
