//! Day planner: greedy placement of tasks into the free gaps of a day.
//!
//! This module turns tasks, fixed events and validated day settings into a
//! chronological plan:
//! - Detects free gaps between fixed events within the day envelope
//! - Orders tasks by deadline urgency, priority and energy
//! - Places whole tasks as work blocks, each followed by a break and buffer
//! - Passes fixed events through unchanged

mod ordering;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::locale::Locale;
use crate::schedule::{DaySettings, FixedEvent, PlanBlock, SettingsInput, Task};
use crate::timeline::{detect_time_gaps, BusyInterval, TimeGap};

pub use ordering::order_tasks;

/// Planner for a single validated day.
///
/// Holds no mutable state; one planner can serve any number of calls.
#[derive(Debug, Clone)]
pub struct DayPlanner {
    settings: DaySettings,
    break_title: String,
}

impl DayPlanner {
    /// Create a planner with English break titles
    pub fn new(settings: DaySettings) -> Self {
        Self {
            settings,
            break_title: Locale::default().break_title().to_string(),
        }
    }

    /// Title break blocks in the given locale
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.break_title = locale.break_title().to_string();
        self
    }

    /// Generate the plan for the day
    ///
    /// # Arguments
    /// * `tasks` - Tasks to place, in caller order
    /// * `events` - Fixed events, in any order and possibly overlapping
    ///
    /// # Returns
    /// Fixed, work and break blocks sorted by start time. Tasks that do not
    /// fit are left out.
    pub fn plan(&self, tasks: &[Task], events: &[FixedEvent]) -> Vec<PlanBlock> {
        let (day_start, day_end) = self.settings.envelope();

        // 1. Keep events that intersect the envelope
        let mut blocks = Vec::new();
        let mut busy = Vec::new();
        for event in events {
            if event.is_degenerate() {
                warn!(event_id = %event.id, start = %event.start, end = %event.end, "ignoring event that ends before it starts");
                continue;
            }
            if !event.overlaps(day_start, day_end) {
                debug!(event_id = %event.id, "event outside the day envelope");
                continue;
            }
            busy.push(BusyInterval::new(event.start, event.end));
            blocks.push(PlanBlock::fixed(event, day_start, day_end));
        }

        // 2. Find free gaps
        let gaps = detect_time_gaps(&busy, day_start, day_end);
        debug!(%day_start, %day_end, gaps = gaps.len(), fixed = blocks.len(), "day envelope prepared");

        // 3. Order tasks and 4. fill the gaps
        let ordered = order_tasks(tasks, self.settings.date());
        blocks.extend(self.fill_gaps(&gaps, &ordered));

        // 5. Chronological result; stable, so fixed blocks lead on equal starts
        blocks.sort_by_key(|block| block.start);
        blocks
    }

    /// Place tasks strictly in order, earliest gap first.
    ///
    /// A task that does not fit the rest of the current gap closes that gap
    /// and is retried in the next one. A task longer than every later gap is
    /// dropped so the tasks behind it can still be placed.
    fn fill_gaps(&self, gaps: &[TimeGap], ordered: &[&Task]) -> Vec<PlanBlock> {
        let break_length = minutes(self.settings.short_break_minutes());
        let buffer = minutes(self.settings.buffer_minutes());
        let focus_block = self.settings.focus_block_minutes();

        let mut blocks = Vec::new();
        let mut next = 0;

        for (index, gap) in gaps.iter().enumerate() {
            if next >= ordered.len() {
                break;
            }

            let later = &gaps[index + 1..];
            let mut cursor = gap.start_time;

            while let Some(task) = ordered.get(next) {
                let work = task.duration();

                if work <= Duration::zero() {
                    debug!(task_id = %task.id, "skipping task without duration");
                    next += 1;
                    continue;
                }

                if cursor + work > gap.end_time {
                    if !later.iter().any(|later_gap| later_gap.can_fit(work)) {
                        debug!(task_id = %task.id, minutes = task.duration_minutes, "task does not fit any remaining gap");
                        next += 1;
                        continue;
                    }
                    // Retry in the next gap
                    break;
                }

                let work_end = cursor + work;
                blocks.push(PlanBlock::work(task, cursor, work_end, focus_block));
                debug!(task_id = %task.id, start = %cursor, end = %work_end, "placed task");
                next += 1;
                cursor = work_end;

                match self.recover(task, cursor, break_length, buffer, gap.end_time) {
                    Some((rest, resume)) => {
                        blocks.push(rest);
                        cursor = resume;
                    }
                    None => break,
                }
            }
        }

        for task in ordered.get(next..).unwrap_or_default() {
            debug!(task_id = %task.id, "task left unscheduled");
        }

        blocks
    }

    /// Break after a work block ending at `cursor`, plus the cursor after the
    /// buffer. `None` closes the gap: the break does not fit before
    /// `gap_end`. When only the buffer overflows, the break is kept and the
    /// cursor moves to `gap_end`.
    fn recover(
        &self,
        task: &Task,
        cursor: NaiveDateTime,
        break_length: Duration,
        buffer: Duration,
        gap_end: NaiveDateTime,
    ) -> Option<(PlanBlock, NaiveDateTime)> {
        let break_end = cursor + break_length;
        if break_end > gap_end {
            return None;
        }
        let rest = PlanBlock::rest(self.break_title.as_str(), task, cursor, break_end);
        let resume = if break_end + buffer <= gap_end {
            break_end + buffer
        } else {
            gap_end
        };
        Some((rest, resume))
    }
}

fn minutes(value: u32) -> Duration {
    Duration::minutes(i64::from(value))
}

/// Validate `settings` and plan the day.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the settings are incomplete or the day
/// envelope is empty. Tasks that do not fit are never an error.
pub fn plan_day(
    tasks: &[Task],
    events: &[FixedEvent],
    settings: &SettingsInput,
) -> Result<Vec<PlanBlock>, ValidationError> {
    let settings = DaySettings::try_from(settings)?;
    Ok(DayPlanner::new(settings).plan(tasks, events))
}
