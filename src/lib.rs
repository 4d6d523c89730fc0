pub mod allocation;
pub mod blocked;
pub mod calendar;
pub mod dates;
pub mod deadlines;
pub mod error;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod import_export;
pub mod schedule;
pub mod table;
pub mod task;
pub(crate) mod task_validation;

pub use blocked::{BlockedPeriod, BlockedPeriods};
pub use calendar::{BusinessCalendar, MAX_BUSINESS_DAYS, WorkCalendar, WorkCalendarConfig};
pub use dates::{format_date, parse_date};
pub use deadlines::{DeadlineScheduler, TaskDeadline};
pub use error::ScheduleError;
pub use import_export::{
    ImportExportError, load_blocked_periods_from_csv, load_calendar_config,
    load_request_from_json, load_tasks_from_csv, save_calendar_config, save_result_to_csv,
    save_result_to_json, write_result_csv,
};
pub use schedule::{
    BlockedPeriodOptions, Planner, ScheduleOptions, ScheduleRequest, ScheduleResult, TimeBudget,
    schedule,
};
pub use table::{ResultRow, render_text_table};
pub use task::Task;
