use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while validating or computing a schedule.
///
/// A failed call never yields a partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("invalid {field} date ({value}), expected format YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("{0}")]
    ConflictingInput(String),

    #[error(
        "end date leaves {nr_real_days} business days for {nr_norm_days} normalized days of work"
    )]
    InfeasibleSchedule { nr_norm_days: f64, nr_real_days: i64 },

    #[error("time allocation must be a positive number (got {0})")]
    InvalidAllocation(f64),

    #[error("task {id} {reason}")]
    InvalidTask { id: String, reason: String },

    #[error("invalid calendar: {0}")]
    InvalidCalendar(String),

    #[error("moving {business_days} business days from {date} leaves the supported date range")]
    DateOutOfRange {
        date: NaiveDate,
        business_days: f64,
    },
}

impl ScheduleError {
    pub fn invalid_date(field: &'static str, value: impl Into<String>) -> Self {
        ScheduleError::InvalidDate {
            field,
            value: value.into(),
        }
    }

    pub fn conflicting(message: impl Into<String>) -> Self {
        ScheduleError::ConflictingInput(message.into())
    }

    /// Stable machine-readable tag, used by the HTTP and JSON surfaces.
    pub fn kind(&self) -> &'static str {
        match self {
            ScheduleError::InvalidDate { .. } => "invalid_date",
            ScheduleError::ConflictingInput(_) => "conflicting_input",
            ScheduleError::InfeasibleSchedule { .. } => "infeasible_schedule",
            ScheduleError::InvalidAllocation(_) => "invalid_allocation",
            ScheduleError::InvalidTask { .. } => "invalid_task",
            ScheduleError::InvalidCalendar(_) => "invalid_calendar",
            ScheduleError::DateOutOfRange { .. } => "date_out_of_range",
        }
    }
}
