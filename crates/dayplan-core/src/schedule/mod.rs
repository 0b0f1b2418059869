//! Schedule types for tasks, fixed events, day settings and plan blocks.
//!
//! Field names are camelCase on the wire so that records produced by the
//! web client deserialize unchanged.

pub mod settings;
pub mod time;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use settings::{DaySettings, PlanDefaults, SettingsInput};

/// Task priority.
///
/// The Polish labels of the web client are accepted as aliases.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[serde(alias = "wysoki")]
    High,
    #[default]
    #[serde(alias = "średni", alias = "sredni")]
    Medium,
    #[serde(alias = "niski")]
    Low,
}

impl Priority {
    /// Placement rank, lower is placed first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Energy a task demands.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Demanding work, front-loaded
    #[serde(alias = "wysoka")]
    High,
    /// Medium energy (default)
    #[default]
    #[serde(alias = "średnia", alias = "srednia")]
    Medium,
    /// Light work
    #[serde(alias = "niska")]
    Low,
}

impl EnergyLevel {
    /// Placement rank, most demanding first.
    pub fn demand_rank(self) -> u8 {
        match self {
            EnergyLevel::High => 0,
            EnergyLevel::Medium => 1,
            EnergyLevel::Low => 2,
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyLevel::High => write!(f, "high"),
            EnergyLevel::Medium => write!(f, "medium"),
            EnergyLevel::Low => write!(f, "low"),
        }
    }
}

/// A flexible unit of work, placed whole or not at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub energy: EnergyLevel,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::date_opt"
    )]
    pub deadline: Option<NaiveDate>,
}

impl Task {
    /// Create a medium-priority, medium-energy task without deadline.
    pub fn new(id: impl Into<String>, title: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration_minutes,
            priority: Priority::default(),
            energy: EnergyLevel::default(),
            deadline: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_energy(mut self, energy: EnergyLevel) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// Externally committed time that must not be scheduled over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FixedEvent {
    pub id: String,
    pub title: String,
    #[serde(with = "time::timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "time::timestamp")]
    pub end: NaiveDateTime,
}

impl FixedEvent {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
        }
    }

    /// Check if this event overlaps with a time range
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && self.end > start
    }

    /// Events with `end <= start` occupy no time.
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }
}

/// Type of plan block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Task work
    Work,
    /// Recovery break after a work block
    Break,
    /// Caller-supplied fixed event
    Fixed,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Work => write!(f, "work"),
            BlockType::Break => write!(f, "break"),
            BlockType::Fixed => write!(f, "fixed"),
        }
    }
}

/// Annotations attached to a plan block.
///
/// A closed set of known keys; absent keys are omitted from the JSON object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlockMeta {
    /// Task that produced a work block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<EnergyLevel>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::date_opt"
    )]
    pub deadline: Option<NaiveDate>,
    /// Number of focus blocks the task spans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_blocks: Option<u32>,
    /// Task whose work block a break follows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_task_id: Option<String>,
    /// Fixed event reaches past the day envelope
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub extends_outside_day: bool,
}

/// A block of the returned day plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanBlock {
    pub id: String,
    pub title: String,
    #[serde(with = "time::timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "time::timestamp")]
    pub end: NaiveDateTime,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<BlockMeta>,
}

impl PlanBlock {
    /// Work block for a task, with a fresh id.
    pub fn work(
        task: &Task,
        start: NaiveDateTime,
        end: NaiveDateTime,
        focus_block_minutes: u32,
    ) -> Self {
        let focus_blocks = task.duration_minutes.div_ceil(focus_block_minutes.max(1));
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: task.title.clone(),
            start,
            end,
            block_type: BlockType::Work,
            meta: Some(BlockMeta {
                task_id: Some(task.id.clone()),
                priority: Some(task.priority),
                energy: Some(task.energy),
                deadline: task.deadline,
                focus_blocks: Some(focus_blocks),
                ..BlockMeta::default()
            }),
        }
    }

    /// Break block following the work block of `after`, with a fresh id.
    pub fn rest(
        title: impl Into<String>,
        after: &Task,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            start,
            end,
            block_type: BlockType::Break,
            meta: Some(BlockMeta {
                after_task_id: Some(after.id.clone()),
                ..BlockMeta::default()
            }),
        }
    }

    /// Pass-through block for a fixed event, reusing the event id.
    pub fn fixed(event: &FixedEvent, day_start: NaiveDateTime, day_end: NaiveDateTime) -> Self {
        let extends_outside_day = event.start < day_start || event.end > day_end;
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            start: event.start,
            end: event.end,
            block_type: BlockType::Fixed,
            meta: extends_outside_day.then(|| BlockMeta {
                extends_outside_day,
                ..BlockMeta::default()
            }),
        }
    }

    /// Get total duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Task that produced this block, for work blocks.
    pub fn task_id(&self) -> Option<&str> {
        match self.block_type {
            BlockType::Work => self.meta.as_ref()?.task_id.as_deref(),
            _ => None,
        }
    }
}
