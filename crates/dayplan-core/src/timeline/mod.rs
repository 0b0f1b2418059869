//! Timeline of the day: occupied intervals and the free gaps between them.

mod gap;

pub use gap::{detect_time_gaps, BusyInterval, TimeGap, TimeGapDetector};
