//! Totals of a plan against the tasks it was built from.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::schedule::{BlockType, PlanBlock, Task};

/// How much of the requested work made it into the plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    /// Sum of all task durations
    pub requested_minutes: i64,
    pub work_minutes: i64,
    pub break_minutes: i64,
    pub fixed_minutes: i64,
    /// Tasks without a work block, in input order
    pub unscheduled_task_ids: Vec<String>,
}

impl PlanSummary {
    pub fn from_plan(tasks: &[Task], plan: &[PlanBlock]) -> Self {
        let mut summary = Self {
            requested_minutes: tasks.iter().map(|t| i64::from(t.duration_minutes)).sum(),
            ..Self::default()
        };

        for block in plan {
            let minutes = block.duration_minutes();
            match block.block_type {
                BlockType::Work => summary.work_minutes += minutes,
                BlockType::Break => summary.break_minutes += minutes,
                BlockType::Fixed => summary.fixed_minutes += minutes,
            }
        }

        let scheduled: HashSet<&str> = plan.iter().filter_map(PlanBlock::task_id).collect();
        summary.unscheduled_task_ids = tasks
            .iter()
            .filter(|t| !scheduled.contains(t.id.as_str()))
            .map(|t| t.id.clone())
            .collect();

        summary
    }

    pub fn is_complete(&self) -> bool {
        self.unscheduled_task_ids.is_empty()
    }
}
