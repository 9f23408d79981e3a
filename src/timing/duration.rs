//! Processing-duration estimation.
//!
//! A flight's baggage job size is drawn as `base ± jitter` minutes, where
//! base and jitter depend on a coarse aircraft class. Jitter is sampled
//! per flight from a caller-supplied random source, so a seeded generator
//! makes the whole pipeline reproducible.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::clock::MINUTE_MS;

/// Coarse aircraft classification used for duration lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftClass {
    /// Wide-body and narrow-body mainline jets.
    Jet,
    /// Regional jets and turboprops.
    Regional,
    /// Anything else, including unknown or missing tags.
    Other,
}

const JET_MARKERS: &[&str] = &[
    "airbus", "boeing", "mcdonnell", "douglas", "a3", "b7", "md-", "md1", "md8", "md9", "dc-", "707",
    "717", "727", "737", "747", "757", "767", "777", "787",
];

const REGIONAL_MARKERS: &[&str] = &[
    "embraer", "bombardier", "canadair", "atr", "de havilland", "dehavilland", "havilland", "saab",
    "fokker", "crj", "erj", "emb", "e170", "e175", "e190", "e195", "dhc", "dash", "q400", "dh8",
];

impl AircraftClass {
    /// Classifies a raw plane tag (manufacturer or model designation).
    ///
    /// Matching is case-insensitive on the start of the tag. Unknown tags
    /// fall through to [`AircraftClass::Other`].
    ///
    /// # Example
    /// ```
    /// use u_baggage::timing::AircraftClass;
    ///
    /// assert_eq!(AircraftClass::classify("Boeing"), AircraftClass::Jet);
    /// assert_eq!(AircraftClass::classify("CRJ-900"), AircraftClass::Regional);
    /// assert_eq!(AircraftClass::classify("Cessna"), AircraftClass::Other);
    /// ```
    pub fn classify(plane: &str) -> Self {
        let tag = plane.trim().to_ascii_lowercase();
        if tag.is_empty() {
            return AircraftClass::Other;
        }
        if REGIONAL_MARKERS.iter().any(|m| tag.starts_with(m)) {
            AircraftClass::Regional
        } else if JET_MARKERS.iter().any(|m| tag.starts_with(m)) {
            AircraftClass::Jet
        } else {
            AircraftClass::Other
        }
    }
}

/// Base duration and symmetric jitter, both in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBand {
    /// Central estimate (minutes).
    pub base_min: i64,
    /// Maximum deviation either side of the base (minutes).
    pub jitter_min: i64,
}

impl DurationBand {
    /// Creates a band.
    pub const fn new(base_min: i64, jitter_min: i64) -> Self {
        Self {
            base_min,
            jitter_min,
        }
    }

    /// Draws a duration (ms) uniformly from `[base - jitter, base + jitter]`
    /// whole minutes, clamped at zero.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let jitter = self.jitter_min.abs();
        let offset = if jitter == 0 {
            0
        } else {
            rng.random_range(-jitter..=jitter)
        };
        (self.base_min + offset).max(0) * MINUTE_MS
    }

    /// Inclusive range of possible durations (ms).
    pub fn bounds_ms(&self) -> (i64, i64) {
        let jitter = self.jitter_min.abs();
        (
            (self.base_min - jitter).max(0) * MINUTE_MS,
            (self.base_min + jitter).max(0) * MINUTE_MS,
        )
    }
}

/// Duration lookup indexed by [`AircraftClass`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationTable {
    /// Mainline jets (default 30 ± 15 min).
    pub jet: DurationBand,
    /// Regional aircraft (default 15 ± 10 min).
    pub regional: DurationBand,
    /// Everything else (default 5 ± 5 min).
    pub other: DurationBand,
}

impl Default for DurationTable {
    fn default() -> Self {
        Self {
            jet: DurationBand::new(30, 15),
            regional: DurationBand::new(15, 10),
            other: DurationBand::new(5, 5),
        }
    }
}

impl DurationTable {
    /// Returns the band for a class.
    pub fn band(&self, class: AircraftClass) -> DurationBand {
        match class {
            AircraftClass::Jet => self.jet,
            AircraftClass::Regional => self.regional,
            AircraftClass::Other => self.other,
        }
    }

    /// Estimates a processing duration (ms) for a class.
    pub fn estimate<R: Rng + ?Sized>(&self, class: AircraftClass, rng: &mut R) -> i64 {
        self.band(class).sample(rng)
    }
}
