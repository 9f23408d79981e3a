//! Time and duration model.
//!
//! - **`clock`**: 12-hour clock parsing, date parsing, epoch conversion,
//!   and span formatting for reports.
//! - **`duration`**: aircraft classification and `base ± jitter`
//!   processing-time estimation with an injected random source.

mod clock;
mod duration;

pub use clock::{
    combine, format_instant, format_span, from_epoch_ms, parse_clock, parse_date, parse_span,
    to_epoch_ms, ClockTime, MINUTE_MS,
};
pub use duration::{AircraftClass, DurationBand, DurationTable};
