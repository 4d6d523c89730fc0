use chrono::NaiveDate;
use indexmap::IndexMap;
use log::debug;

use crate::blocked::BlockedPeriods;
use crate::calendar::BusinessCalendar;
use crate::error::ScheduleError;
use crate::task::{Task, total_norm_days};

/// Deadline and progress for one task, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDeadline {
    pub id: String,
    pub cumulative_norm_days: f64,
    pub deadline: NaiveDate,
    pub progress: f64,
}

/// Turns cumulative task effort into calendar deadlines.
///
/// Every deadline is measured from the project start using the effort of the
/// task and all tasks before it, so one task's deadline never depends on
/// where the previous deadline landed after rounding or block shifting.
pub struct DeadlineScheduler<'a, C: BusinessCalendar> {
    calendar: &'a C,
    blocked: &'a BlockedPeriods<'a, C>,
    start: NaiveDate,
    time_allocation: f64,
}

impl<'a, C: BusinessCalendar> DeadlineScheduler<'a, C> {
    pub fn new(
        calendar: &'a C,
        blocked: &'a BlockedPeriods<'a, C>,
        start: NaiveDate,
        time_allocation: f64,
    ) -> Self {
        Self {
            calendar,
            blocked,
            start,
            time_allocation,
        }
    }

    /// Deadline for a given amount of cumulative effort.
    pub fn deadline_for(&self, cumulative_norm_days: f64) -> Result<NaiveDate, ScheduleError> {
        let real_days = if cumulative_norm_days == 0.0 {
            0.0
        } else {
            cumulative_norm_days / self.time_allocation
        };
        let unshifted = self.calendar.add_business_days(self.start, real_days)?;
        self.blocked.apply_block_shift(unshifted)
    }

    pub fn execute(&self, tasks: &[Task]) -> Result<Vec<TaskDeadline>, ScheduleError> {
        let total = total_norm_days(tasks);
        let mut cumulative = 0.0;

        tasks
            .iter()
            .map(|task| -> Result<TaskDeadline, ScheduleError> {
                cumulative += task.norm_days;
                let deadline = self.deadline_for(cumulative)?;
                let progress = if total > 0.0 { cumulative / total } else { 0.0 };
                debug!(
                    "task {} due {deadline} (cumulative {cumulative} norm days, progress {progress:.3})",
                    task.id
                );
                Ok(TaskDeadline {
                    id: task.id.clone(),
                    cumulative_norm_days: cumulative,
                    deadline,
                    progress,
                })
            })
            .collect()
    }
}

/// Key deadlines and progress by task id, keeping input order.
/// A repeated id keeps its first position but takes the later values.
pub fn key_by_id(
    entries: &[TaskDeadline],
) -> (IndexMap<String, NaiveDate>, IndexMap<String, f64>) {
    let mut deadlines = IndexMap::with_capacity(entries.len());
    let mut progress = IndexMap::with_capacity(entries.len());
    for entry in entries {
        deadlines.insert(entry.id.clone(), entry.deadline);
        progress.insert(entry.id.clone(), entry.progress);
    }
    (deadlines, progress)
}
