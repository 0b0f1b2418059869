//! Time gap detection between fixed events.
//!
//! Finds the free intervals of the day envelope that no occupied interval
//! covers. Occupied intervals may arrive unsorted and overlapping.

use chrono::{Duration, NaiveDateTime};

/// A free interval of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGap {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl TimeGap {
    /// Create a new time gap, `None` when it has no length.
    pub fn new(start_time: NaiveDateTime, end_time: NaiveDateTime) -> Option<Self> {
        if end_time <= start_time {
            return None;
        }
        Some(Self {
            start_time,
            end_time,
        })
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Check if this gap can fit work of the given length
    pub fn can_fit(&self, length: Duration) -> bool {
        self.duration() >= length
    }
}

/// Occupied time, e.g. a fixed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyInterval {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl BusyInterval {
    pub fn new(start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Intersection with `[start, end]`, `None` when empty.
    fn clip(&self, start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        let clipped = Self::new(self.start_time.max(start), self.end_time.min(end));
        (clipped.start_time < clipped.end_time).then_some(clipped)
    }
}

/// Detector for finding time gaps in a day
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeGapDetector;

impl TimeGapDetector {
    /// Create a detector that reports every gap of positive length
    pub fn new() -> Self {
        Self
    }

    /// Clip intervals to the envelope, then merge overlapping or touching ones.
    ///
    /// The result is sorted by start time and pairwise disjoint.
    pub fn merge_busy(
        &self,
        busy: &[BusyInterval],
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> Vec<BusyInterval> {
        let mut clipped: Vec<_> = busy
            .iter()
            .filter_map(|interval| interval.clip(day_start, day_end))
            .collect();
        clipped.sort_by_key(|interval| interval.start_time);

        let mut merged: Vec<BusyInterval> = Vec::with_capacity(clipped.len());
        for interval in clipped {
            match merged.last_mut() {
                Some(last) if interval.start_time <= last.end_time => {
                    last.end_time = last.end_time.max(interval.end_time);
                }
                _ => merged.push(interval),
            }
        }
        merged
    }

    /// Find gaps between occupied intervals in a day
    ///
    /// # Arguments
    /// * `busy` - Occupied intervals, in any order
    /// * `day_start` - Start of the day envelope
    /// * `day_end` - End of the day envelope
    ///
    /// # Returns
    /// Vector of time gaps sorted by start time
    pub fn find_gaps(
        &self,
        busy: &[BusyInterval],
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> Vec<TimeGap> {
        let mut gaps = Vec::new();
        let mut last_end = day_start;

        for interval in self.merge_busy(busy, day_start, day_end) {
            gaps.extend(TimeGap::new(last_end, interval.start_time));
            last_end = interval.end_time;
        }

        // Check for gap after last interval
        gaps.extend(TimeGap::new(last_end, day_end));
        gaps
    }
}

/// Convenience function to find gaps with default settings
pub fn detect_time_gaps(
    busy: &[BusyInterval],
    day_start: NaiveDateTime,
    day_end: NaiveDateTime,
) -> Vec<TimeGap> {
    TimeGapDetector::new().find_gaps(busy, day_start, day_end)
}
