//! Placement order of tasks.

use chrono::NaiveDate;

use crate::schedule::Task;

/// Sort key: overdue-or-due-today first by deadline, then priority, then
/// energy demand. Ties keep input order because the sort is stable.
fn placement_key(task: &Task, day: NaiveDate) -> (bool, Option<NaiveDate>, u8, u8) {
    let due = task.deadline.filter(|deadline| *deadline <= day);
    (
        due.is_none(),
        due,
        task.priority.rank(),
        task.energy.demand_rank(),
    )
}

/// Order tasks for placement on `day`.
pub fn order_tasks(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by_key(|task| placement_key(task, day));
    ordered
}
