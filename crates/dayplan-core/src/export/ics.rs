//! iCalendar (RFC 5545) encoding of a day plan.
//!
//! Start and end are written as floating local times, matching the
//! wall-clock timestamps of the planner.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::HashSet;

use crate::schedule::{BlockType, PlanBlock};

/// Media type of exported documents.
pub const ICS_MEDIA_TYPE: &str = "text/calendar;charset=utf-8";

const DEFAULT_PROD_ID: &str = "-//dayplan//Day Planner//EN";
const UID_DOMAIN: &str = "dayplan";
const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";
const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
/// Maximum octets per content line before folding.
const LINE_LIMIT: usize = 75;

/// Download filename for the plan of `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("plan-{}.ics", date.format("%Y-%m-%d"))
}

/// Encode `blocks` into a calendar named `label`, stamped now.
pub fn encode(blocks: &[PlanBlock], label: &str) -> String {
    IcsEncoder::new().encode(blocks, label)
}

/// Encoder for plan blocks.
#[derive(Debug, Clone)]
pub struct IcsEncoder {
    prod_id: String,
}

impl IcsEncoder {
    pub fn new() -> Self {
        Self {
            prod_id: DEFAULT_PROD_ID.to_string(),
        }
    }

    /// Encode with the current time as `DTSTAMP`.
    pub fn encode(&self, blocks: &[PlanBlock], label: &str) -> String {
        self.encode_at(blocks, label, Utc::now())
    }

    /// Encode with an explicit `DTSTAMP`; identical inputs give identical bytes.
    pub fn encode_at(&self, blocks: &[PlanBlock], label: &str, stamp: DateTime<Utc>) -> String {
        let mut out = String::new();
        let stamp = stamp.format(UTC_FORMAT).to_string();

        push_line(&mut out, "BEGIN:VCALENDAR");
        push_line(&mut out, "VERSION:2.0");
        push_line(&mut out, &format!("PRODID:{}", escape_text(&self.prod_id)));
        push_line(&mut out, "CALSCALE:GREGORIAN");
        push_line(&mut out, &format!("X-WR-CALNAME:{}", escape_text(label)));

        let mut used = HashSet::new();
        for block in blocks {
            let uid = unique_uid(&block.id, &mut used);

            push_line(&mut out, "BEGIN:VEVENT");
            push_line(&mut out, &format!("UID:{}", escape_text(&uid)));
            push_line(&mut out, &format!("DTSTAMP:{stamp}"));
            push_line(&mut out, &format!("DTSTART:{}", local(&block.start)));
            push_line(&mut out, &format!("DTEND:{}", local(&block.end)));
            push_line(&mut out, &format!("SUMMARY:{}", escape_text(&block.title)));
            push_line(&mut out, &format!("CATEGORIES:{}", category(block.block_type)));
            if let Some(description) = describe(block) {
                push_line(&mut out, &format!("DESCRIPTION:{}", escape_text(&description)));
            }
            push_line(&mut out, "END:VEVENT");
        }

        push_line(&mut out, "END:VCALENDAR");
        out
    }
}

impl Default for IcsEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// `<id>@dayplan`, suffixed `-<n>` when that UID is already taken.
fn unique_uid(id: &str, used: &mut HashSet<String>) -> String {
    let mut uid = format!("{id}@{UID_DOMAIN}");
    let mut n = 0;
    while used.contains(&uid) {
        n += 1;
        uid = format!("{id}-{n}@{UID_DOMAIN}");
    }
    used.insert(uid.clone());
    uid
}

fn local(value: &NaiveDateTime) -> String {
    value.format(LOCAL_FORMAT).to_string()
}

fn category(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Work => "WORK",
        BlockType::Break => "BREAK",
        BlockType::Fixed => "FIXED",
    }
}

fn describe(block: &PlanBlock) -> Option<String> {
    let meta = block.meta.as_ref()?;
    match (meta.priority, meta.energy) {
        (Some(priority), Some(energy)) => Some(format!("Priority: {priority}, energy: {energy}")),
        _ => None,
    }
}

/// Escape a TEXT value.
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}

/// Append a content line, folded at 75 octets on character boundaries.
fn push_line(out: &mut String, line: &str) {
    let mut rest = line;
    // Continuation lines start with a space, which counts toward the limit
    let mut limit = LINE_LIMIT;
    while rest.len() > limit {
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        out.push_str(&rest[..cut]);
        out.push_str("\r\n ");
        rest = &rest[cut..];
        limit = LINE_LIMIT - 1;
    }
    out.push_str(rest);
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{FixedEvent, Task};
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 30, 18, 0, 0).unwrap()
    }

    #[test]
    fn empty_plan_is_a_valid_calendar() {
        let ics = IcsEncoder::new().encode_at(&[], "Plan 2024-05-01", stamp());
        assert_eq!(
            ics,
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//dayplan//Day Planner//EN\r\n\
             CALSCALE:GREGORIAN\r\nX-WR-CALNAME:Plan 2024-05-01\r\nEND:VCALENDAR\r\n"
        );
    }

    #[test]
    fn encodes_one_event_per_block() {
        let task = Task::new("t-1", "Write report", 30);
        let blocks = vec![
            PlanBlock::work(&task, at(8, 0), at(8, 30), 52),
            PlanBlock::fixed(&FixedEvent::new("e-1", "Lunch", at(12, 0), at(13, 0)), at(8, 0), at(22, 0)),
        ];
        let ics = IcsEncoder::new().encode_at(&blocks, "Plan", stamp());

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert!(ics.contains("DTSTART:20240501T080000\r\n"));
        assert!(ics.contains("DTEND:20240501T083000\r\n"));
        assert!(ics.contains("DTSTAMP:20240430T180000Z\r\n"));
        assert!(ics.contains("UID:e-1@dayplan\r\n"));
        assert!(ics.contains("CATEGORIES:WORK\r\n"));
        assert!(ics.contains("DESCRIPTION:Priority: medium\\, energy: medium\r\n"));
        assert!(ics.find("SUMMARY:Write report").unwrap() < ics.find("SUMMARY:Lunch").unwrap());
    }

    #[test]
    fn repeated_ids_get_distinct_uids() {
        let event = FixedEvent::new("same", "Twice", at(9, 0), at(10, 0));
        let block = PlanBlock::fixed(&event, at(8, 0), at(22, 0));
        let ics = IcsEncoder::new().encode_at(&[block.clone(), block], "Plan", stamp());

        assert!(ics.contains("UID:same@dayplan\r\n"));
        assert!(ics.contains("UID:same-1@dayplan\r\n"));
    }

    #[test]
    fn escapes_text_values() {
        assert_eq!(escape_text("a;b,c\\d\r\ne"), "a\\;b\\,c\\\\d\\ne");
    }

    #[test]
    fn folds_long_lines_on_char_boundaries() {
        let mut out = String::new();
        let title = format!("SUMMARY:{}", "ż".repeat(60));
        push_line(&mut out, &title);

        let lines: Vec<&str> = out.trim_end_matches("\r\n").split("\r\n").collect();
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() <= LINE_LIMIT));
        assert!(lines[1..].iter().all(|l| l.starts_with(' ')));
        let unfolded: String = lines
            .iter()
            .enumerate()
            .map(|(i, l)| if i == 0 { *l } else { &l[1..] })
            .collect();
        assert_eq!(unfolded, title);
    }

    #[test]
    fn filename_follows_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(export_filename(date), "plan-2024-05-01.ics");
    }
}
