//! # Dayplan Core Library
//!
//! This library provides the core logic of the dayplan day planner. It turns a
//! list of tasks, the fixed events of a day and the working rhythm into a
//! chronological plan of work, break and fixed blocks, and encodes that plan
//! as an iCalendar document.
//!
//! ## Architecture
//!
//! - **Scheduler**: Greedy placement of whole tasks into free gaps, in order
//!   of deadline urgency, priority and energy
//! - **Timeline**: Free-gap detection between fixed events
//! - **Export**: iCalendar (RFC 5545) encoding of a plan
//! - **API**: Transport-agnostic JSON request boundary
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`DayPlanner`]: Planner for one validated day
//! - [`IcsEncoder`]: Calendar document encoder
//! - [`handle_plan_request`]: JSON request to status and body
//! - [`Config`]: Application configuration management

pub mod api;
pub mod error;
pub mod export;
pub mod locale;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod summary;
pub mod timeline;

pub use api::{handle_plan_request, PlanRequest, PlanResponse, ResponseBody};
pub use error::{ConfigError, CoreError, ParseError, PlanError, ValidationError};
pub use export::{encode, export_filename, IcsEncoder, ICS_MEDIA_TYPE};
pub use locale::Locale;
pub use schedule::{
    BlockMeta, BlockType, DaySettings, EnergyLevel, FixedEvent, PlanBlock, PlanDefaults, Priority,
    SettingsInput, Task,
};
pub use scheduler::{order_tasks, plan_day, DayPlanner};
pub use storage::Config;
pub use summary::PlanSummary;
pub use timeline::{TimeGap, TimeGapDetector};
