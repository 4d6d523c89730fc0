use chrono::NaiveDate;
use indexmap::IndexMap;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::allocation::{check_allocation, resolve_allocation, resolve_end};
use crate::blocked::{BlockedPeriod, BlockedPeriods};
use crate::calendar::{BusinessCalendar, WorkCalendar};
use crate::dates::parse_date_field;
use crate::deadlines::{DeadlineScheduler, key_by_id};
use crate::error::ScheduleError;
use crate::task::{Task, total_norm_days};
use crate::task_validation;

/// The fixed side of the end-date / time-allocation pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeBudget {
    /// The project must finish by this date; the allocation is derived.
    End(NaiveDate),
    /// Fraction of each business day spent on the project; the end is derived.
    Allocation(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRequest {
    pub start: NaiveDate,
    pub budget: TimeBudget,
    pub tasks: Vec<Task>,
    pub blocked_periods: Vec<BlockedPeriod>,
}

impl ScheduleRequest {
    pub fn new(start: NaiveDate, budget: TimeBudget, tasks: Vec<Task>) -> Self {
        Self {
            start,
            budget,
            tasks,
            blocked_periods: Vec::new(),
        }
    }

    pub fn with_end(start: NaiveDate, end: NaiveDate, tasks: Vec<Task>) -> Self {
        Self::new(start, TimeBudget::End(end), tasks)
    }

    pub fn with_allocation(start: NaiveDate, time_allocation: f64, tasks: Vec<Task>) -> Self {
        Self::new(start, TimeBudget::Allocation(time_allocation), tasks)
    }

    pub fn blocked_periods(mut self, periods: Vec<BlockedPeriod>) -> Self {
        self.blocked_periods = periods;
        self
    }

    /// Build a request where end date and time allocation are both optional.
    /// Exactly one of them must be given.
    pub fn from_parts(
        start: NaiveDate,
        end: Option<NaiveDate>,
        time_allocation: Option<f64>,
        tasks: Vec<Task>,
        blocked_periods: Vec<BlockedPeriod>,
    ) -> Result<Self, ScheduleError> {
        let budget = match (end, time_allocation) {
            (Some(end), None) => TimeBudget::End(end),
            (None, Some(allocation)) => TimeBudget::Allocation(allocation),
            (Some(_), Some(_)) => {
                return Err(ScheduleError::conflicting(
                    "only provide end date or time allocation, not both",
                ));
            }
            (None, None) => {
                return Err(ScheduleError::conflicting(
                    "end date or time allocation must be provided",
                ));
            }
        };
        Ok(Self {
            start,
            budget,
            tasks,
            blocked_periods,
        })
    }
}

/// Blocked period as it arrives on the wire, with unparsed dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockedPeriodOptions {
    pub start: String,
    pub end: String,
}

/// Wire form of a [`ScheduleRequest`] (camelCase JSON, string dates).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOptions {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(
        default,
        alias = "timeAllocationPercentage",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_allocation: Option<f64>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub blocked_periods: Vec<BlockedPeriodOptions>,
}

impl TryFrom<&ScheduleOptions> for ScheduleRequest {
    type Error = ScheduleError;

    fn try_from(options: &ScheduleOptions) -> Result<Self, Self::Error> {
        let start = parse_date_field("start", &options.start)?;
        let end = match options.end.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Some(parse_date_field("end", value)?),
            _ => None,
        };
        let blocked_periods = options
            .blocked_periods
            .iter()
            .map(|period| {
                Ok(BlockedPeriod::new(
                    parse_date_field("blocked period start", &period.start)?,
                    parse_date_field("blocked period end", &period.end)?,
                ))
            })
            .collect::<Result<Vec<_>, ScheduleError>>()?;

        ScheduleRequest::from_parts(
            start,
            end,
            options.time_allocation,
            options.tasks.clone(),
            blocked_periods,
        )
    }
}

impl TryFrom<ScheduleOptions> for ScheduleRequest {
    type Error = ScheduleError;

    fn try_from(options: ScheduleOptions) -> Result<Self, Self::Error> {
        ScheduleRequest::try_from(&options)
    }
}

/// Computed schedule. Deadlines and progress are keyed by task id in task
/// input order; `task_order` keeps the raw input order, repeats included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub nr_norm_days: f64,
    pub nr_real_days: i64,
    pub time_allocation: f64,
    pub deadlines: IndexMap<String, NaiveDate>,
    pub progress: IndexMap<String, f64>,
    #[serde(default)]
    pub task_order: Vec<String>,
}

impl ScheduleResult {
    pub fn deadline(&self, task_id: &str) -> Option<NaiveDate> {
        self.deadlines.get(task_id).copied()
    }

    pub fn progress_of(&self, task_id: &str) -> Option<f64> {
        self.progress.get(task_id).copied()
    }

    pub fn to_cli_summary(&self) -> String {
        format!(
            "start={}, end={}, norm_days={}, real_days={}, allocation={:.3}, tasks={}",
            self.start,
            self.end,
            self.nr_norm_days,
            self.nr_real_days,
            self.time_allocation,
            self.task_order.len()
        )
    }
}

/// Schedules requests against an injected business calendar.
#[derive(Debug, Clone, Default)]
pub struct Planner<C: BusinessCalendar = WorkCalendar> {
    calendar: C,
}

impl<C: BusinessCalendar> Planner<C> {
    pub fn new(calendar: C) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn schedule(&self, request: &ScheduleRequest) -> Result<ScheduleResult, ScheduleError> {
        task_validation::validate_task_collection(&request.tasks)?;
        if let TimeBudget::Allocation(allocation) = request.budget {
            check_allocation(allocation)?;
        }

        let start = request.start;
        let nr_norm_days = total_norm_days(&request.tasks);
        let blocked = BlockedPeriods::resolve(&request.blocked_periods, &self.calendar);

        let (end, time_allocation) = match request.budget {
            TimeBudget::End(end) => (
                end,
                resolve_allocation(&self.calendar, start, end, nr_norm_days)?,
            ),
            TimeBudget::Allocation(allocation) => (
                resolve_end(&self.calendar, start, allocation, nr_norm_days, &blocked)?,
                allocation,
            ),
        };
        let nr_real_days = self.calendar.business_day_diff(start, end);

        let entries =
            DeadlineScheduler::new(&self.calendar, &blocked, start, time_allocation)
                .execute(&request.tasks)?;
        let (deadlines, progress) = key_by_id(&entries);

        info!(
            "scheduled {} tasks from {start} to {end} ({nr_norm_days} norm days over {nr_real_days} business days at {time_allocation:.3})",
            entries.len()
        );

        Ok(ScheduleResult {
            start,
            end,
            nr_norm_days,
            nr_real_days,
            time_allocation,
            deadlines,
            progress,
            task_order: request.tasks.iter().map(|task| task.id.clone()).collect(),
        })
    }

    pub fn schedule_options(
        &self,
        options: &ScheduleOptions,
    ) -> Result<ScheduleResult, ScheduleError> {
        let request = ScheduleRequest::try_from(options)?;
        self.schedule(&request)
    }
}

impl<C: BusinessCalendar + Sync> Planner<C> {
    /// Schedule independent requests in parallel. Results keep request order.
    pub fn schedule_batch(
        &self,
        requests: &[ScheduleRequest],
    ) -> Vec<Result<ScheduleResult, ScheduleError>> {
        requests
            .par_iter()
            .map(|request| self.schedule(request))
            .collect()
    }
}

/// Schedule with the default Monday to Friday calendar and no holidays.
pub fn schedule(request: &ScheduleRequest) -> Result<ScheduleResult, ScheduleError> {
    Planner::<WorkCalendar>::default().schedule(request)
}
