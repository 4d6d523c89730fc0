use crate::error::ScheduleError;
use crate::task::Task;
use log::warn;
use std::collections::HashSet;

pub fn validate_task(task: &Task) -> Result<(), ScheduleError> {
    if !task.norm_days.is_finite() {
        return Err(ScheduleError::InvalidTask {
            id: task.id.clone(),
            reason: format!("has non-finite normDays {}", task.norm_days),
        });
    }
    if task.norm_days < 0.0 {
        return Err(ScheduleError::InvalidTask {
            id: task.id.clone(),
            reason: format!("has negative normDays {}", task.norm_days),
        });
    }
    Ok(())
}

/// Validate every task. Duplicate ids are allowed: the later task's deadline
/// replaces the earlier one in the keyed output, so they are only reported.
pub fn validate_task_collection(tasks: &[Task]) -> Result<(), ScheduleError> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen_ids.insert(task.id.as_str()) {
            warn!(
                "duplicate task id {}; its later deadline overwrites the earlier one",
                task.id
            );
        }
        validate_task(task)?;
    }
    Ok(())
}
