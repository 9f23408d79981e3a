//! Flight record ingestion.
//!
//! Reads the arrivals CSV produced by the scraper. The header row is
//! always present and skipped; fields are read by position:
//!
//! | # | Field | Use |
//! |---|-------|-----|
//! | 0 | code | flight code |
//! | 1 | date | `YYYY-MM-DD` |
//! | 2 | estimated arrival | `H:MM am/pm`, may be empty |
//! | 3 | scheduled arrival | fallback when 2 is empty |
//! | 4 | terminal | integer, or an unassigned marker |
//! | 5 | gate | kept as-is |
//! | 6 | baggage | kept as-is, unused |
//! | 7 | plane | aircraft class for the duration table |
//!
//! Rows with an unassigned terminal are skipped before their times are
//! read. The whole file is parsed before returning, so a malformed
//! assigned record anywhere aborts ingestion with no flights.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Flight, TerminalId};
use crate::timing::{combine, parse_clock, parse_date, to_epoch_ms, AircraftClass, DurationTable};

/// Terminal values that mean "not assigned yet" (compared lowercase).
const UNASSIGNED_TERMINALS: &[&str] = &["", "-", "n/a", "none", "tba"];

/// One raw CSV row, deserialized by position.
#[derive(Debug, Clone, Deserialize)]
pub struct FlightRecord {
    /// Flight code.
    pub code: String,
    /// Arrival date.
    pub date: String,
    /// Estimated arrival clock time, possibly empty.
    pub estimated_arrival: String,
    /// Scheduled arrival clock time.
    pub scheduled_arrival: String,
    /// Terminal number or unassigned marker.
    pub terminal: String,
    /// Gate.
    pub gate: String,
    /// Baggage tag.
    pub baggage: String,
    /// Plane tag.
    pub plane: String,
}

impl FlightRecord {
    /// Arrival clock text: estimated if present, else scheduled.
    fn arrival(&self) -> Option<&str> {
        [&self.estimated_arrival, &self.scheduled_arrival]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }

    /// Converts the row into a flight, drawing its size from `table`.
    ///
    /// Returns `None` for a row with an unassigned terminal. Its date and
    /// times are not parsed and no size is drawn.
    pub fn into_flight<R: Rng + ?Sized>(
        self,
        table: &DurationTable,
        rng: &mut R,
    ) -> Result<Option<Flight>> {
        let Some(terminal) = parse_terminal(&self.terminal)? else {
            return Ok(None);
        };
        let date = parse_date(&self.date)?;
        let clock = self
            .arrival()
            .ok_or_else(|| Error::MissingArrival {
                code: self.code.clone(),
            })
            .and_then(parse_clock)?;
        let release_ms = to_epoch_ms(combine(date, clock));

        let class = AircraftClass::classify(&self.plane);
        let size_ms = table.estimate(class, rng);

        let flight = Flight::new(self.code.trim(), release_ms, size_ms)
            .with_terminal(terminal)
            .with_gate(self.gate.trim())
            .with_baggage(self.baggage.trim())
            .with_plane(self.plane.trim());
        Ok(Some(flight))
    }
}

/// Parses a terminal field. Unassigned markers yield `None`.
///
/// # Example
/// ```
/// use u_baggage::ingest::parse_terminal;
///
/// assert_eq!(parse_terminal(" 7 ").unwrap(), Some(7));
/// assert_eq!(parse_terminal("TBA").unwrap(), None);
/// assert!(parse_terminal("B").is_err());
/// ```
pub fn parse_terminal(text: &str) -> Result<Option<TerminalId>> {
    let value = text.trim();
    if UNASSIGNED_TERMINALS.contains(&value.to_ascii_lowercase().as_str()) {
        return Ok(None);
    }
    value
        .parse::<TerminalId>()
        .map(Some)
        .map_err(|_| Error::InvalidTerminal(value.to_string()))
}

/// Reads every flight from a CSV file.
pub fn read_flights<P, R>(path: P, table: &DurationTable, rng: &mut R) -> Result<Vec<Flight>>
where
    P: AsRef<Path>,
    R: Rng + ?Sized,
{
    let path = path.as_ref();
    let flights = read_flights_from(File::open(path)?, table, rng)?;
    info!(path = %path.display(), flights = flights.len(), "flights loaded");
    Ok(flights)
}

/// Reads every flight from any CSV source.
pub fn read_flights_from<Rd, R>(source: Rd, table: &DurationTable, rng: &mut R) -> Result<Vec<Flight>>
where
    Rd: Read,
    R: Rng + ?Sized,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut flights = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let wrap = |source: Error| Error::Record {
            line,
            source: Box::new(source),
        };

        let record: FlightRecord = row.deserialize(None).map_err(|e| wrap(Error::Csv(e)))?;
        let code = record.code.clone();
        match record.into_flight(table, rng).map_err(wrap)? {
            Some(flight) => flights.push(flight),
            None => debug!(%code, line, "flight has no terminal, skipped"),
        }
    }
    Ok(flights)
}
