//! Date navigation for the calendar screen.
//!
//! # Responsibility
//! - Own the selected-date state and the values derived from it (week strip,
//!   month/year label, day flips).
//! - Keep locale-specific calendar data (week start, month names) in one place.
//!
//! # Invariants
//! - Calendar-day arithmetic goes through chrono, never through fixed
//!   24-hour offsets.

pub mod locale;
pub mod navigation;
