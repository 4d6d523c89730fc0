use chrono::NaiveDate;

use crate::blocked::BlockedPeriods;
use crate::calendar::BusinessCalendar;
use crate::error::ScheduleError;

pub(crate) fn check_allocation(time_allocation: f64) -> Result<f64, ScheduleError> {
    if time_allocation.is_finite() && time_allocation > 0.0 {
        Ok(time_allocation)
    } else {
        Err(ScheduleError::InvalidAllocation(time_allocation))
    }
}

/// Project end date for `nr_norm_days` of effort worked at `time_allocation`.
///
/// The real business-day span is `nr_norm_days / time_allocation`, rounded to
/// the nearest day, then shifted past any blocked period it reaches. A span
/// too long to walk (a tiny allocation against real effort) is
/// [`ScheduleError::DateOutOfRange`].
pub fn resolve_end<C: BusinessCalendar>(
    calendar: &C,
    start: NaiveDate,
    time_allocation: f64,
    nr_norm_days: f64,
    blocked: &BlockedPeriods<'_, C>,
) -> Result<NaiveDate, ScheduleError> {
    let time_allocation = check_allocation(time_allocation)?;
    let days_to_add = nr_norm_days / time_allocation;
    let unshifted = calendar.add_business_days(start, days_to_add)?;
    blocked.apply_block_shift(unshifted)
}

/// Time allocation implied by fitting `nr_norm_days` between `start` and `end`.
///
/// A project with no effort fits any span and reports an allocation of zero.
pub fn resolve_allocation<C: BusinessCalendar>(
    calendar: &C,
    start: NaiveDate,
    end: NaiveDate,
    nr_norm_days: f64,
) -> Result<f64, ScheduleError> {
    let nr_real_days = calendar.business_day_diff(start, end);
    if nr_norm_days == 0.0 {
        return Ok(0.0);
    }
    if nr_real_days == 0 {
        return Err(ScheduleError::InfeasibleSchedule {
            nr_norm_days,
            nr_real_days,
        });
    }
    Ok(nr_norm_days / nr_real_days as f64)
}
