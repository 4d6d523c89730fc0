use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ScheduleError;

/// Largest business-day count a single walk accepts (about 3,800 years of
/// five-day weeks).
pub const MAX_BUSINESS_DAYS: i64 = 1_000_000;

/// Business-day arithmetic over a working week and a set of holidays.
///
/// Implementors only decide, day by day, whether a date is a working weekday
/// and whether it is a holiday. Counting and advancing walk the calendar one
/// day at a time so that every holiday gets its own decision point.
pub trait BusinessCalendar {
    /// Whether the date's weekday belongs to the working week.
    fn is_working_weekday(&self, date: NaiveDate) -> bool;

    /// Whether the date is a specific holiday excluded from the working week.
    fn is_holiday(&self, date: NaiveDate) -> bool;

    fn is_business_day(&self, date: NaiveDate) -> bool {
        self.is_working_weekday(date) && !self.is_holiday(date)
    }

    /// Advance `date` by `days` business days.
    ///
    /// Fractional counts are rounded to the nearest whole day first. A count
    /// rounding to zero returns `date` unchanged, even on a non-business day.
    /// Negative counts walk backwards. Non-finite counts are treated as zero.
    /// Counts beyond [`MAX_BUSINESS_DAYS`] are rejected without walking.
    fn add_business_days(&self, date: NaiveDate, days: f64) -> Result<NaiveDate, ScheduleError> {
        if !days.is_finite() {
            return Ok(date);
        }
        let rounded = days.round();
        if rounded.abs() > MAX_BUSINESS_DAYS as f64 {
            return Err(ScheduleError::DateOutOfRange {
                date,
                business_days: days,
            });
        }
        self.step_business_days(date, rounded as i64)
    }

    /// Advance `date` by a whole number of business days.
    fn step_business_days(&self, date: NaiveDate, days: i64) -> Result<NaiveDate, ScheduleError> {
        let step = Duration::days(days.signum());
        let mut current = date;
        let mut remaining = days.unsigned_abs();
        while remaining > 0 {
            current = current
                .checked_add_signed(step)
                .ok_or(ScheduleError::DateOutOfRange {
                    date,
                    business_days: days as f64,
                })?;
            if self.is_business_day(current) {
                remaining -= 1;
            }
        }
        Ok(current)
    }

    /// Count business days from the earlier date (inclusive) to the later
    /// date (exclusive). Argument order does not matter.
    fn business_day_diff(&self, date1: NaiveDate, date2: NaiveDate) -> i64 {
        let (start, end) = if date2 < date1 {
            (date2, date1)
        } else {
            (date1, date2)
        };

        let mut count = 0;
        let mut current = start;
        while current < end {
            if self.is_business_day(current) {
                count += 1;
            }
            current += Duration::days(1);
        }
        count
    }

    /// Find the next business day strictly after `from`.
    fn next_business_day(&self, from: NaiveDate) -> Result<NaiveDate, ScheduleError> {
        self.step_business_days(from, 1)
    }

    /// All business days in `[start, end]`.
    fn business_days_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut current = start;
        while current <= end {
            if self.is_business_day(current) {
                days.push(current);
            }
            let Some(next) = current.succ_opt() else {
                break;
            };
            current = next;
        }
        days
    }
}

/// Working week plus an optional holiday set.
///
/// The default is a Monday to Friday week with no holidays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCalendar {
    holidays: HashSet<NaiveDate>,
    non_working_days: HashSet<Weekday>,
}

/// Serializable form of a [`WorkCalendar`]: sorted working days and holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCalendarConfig {
    working_days: Vec<Weekday>,
    #[serde(default)]
    holidays: Vec<NaiveDate>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self {
            holidays: HashSet::new(),
            non_working_days: HashSet::from([Weekday::Sat, Weekday::Sun]),
        }
    }
}

impl BusinessCalendar for WorkCalendar {
    fn is_working_weekday(&self, date: NaiveDate) -> bool {
        !self.non_working_days.contains(&date.weekday())
    }

    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}

impl WorkCalendar {
    const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Convenience preset: a Monday to Friday week plus the fixed list of US
    /// federal holidays for the inclusive year span. This is a plain holiday
    /// list, not locale support; other calendars are built with
    /// [`WorkCalendar::custom`] or a config file.
    pub fn with_us_holidays(start_year: i32, end_year: i32) -> Self {
        let (start, end) = if start_year <= end_year {
            (start_year, end_year)
        } else {
            (end_year, start_year)
        };

        let mut calendar = Self::default();
        for year in start..=end {
            calendar.add_us_holidays(year);
        }
        calendar
    }

    pub fn custom<I, J>(working_days: I, holidays: J) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        let config = WorkCalendarConfig::new(working_days, holidays)?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &WorkCalendarConfig) -> Result<Self, ScheduleError> {
        let working_set: HashSet<Weekday> = config.working_days.iter().copied().collect();
        if working_set.is_empty() {
            return Err(ScheduleError::InvalidCalendar(
                "at least one working day is required".into(),
            ));
        }
        let non_working_days = Self::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !working_set.contains(day))
            .collect();

        Ok(Self {
            holidays: config.holidays.iter().copied().collect(),
            non_working_days,
        })
    }

    pub fn to_config(&self) -> WorkCalendarConfig {
        WorkCalendarConfig::from(self)
    }

    fn add_us_holidays(&mut self, year: i32) {
        let fixed = [(1, 1), (7, 4), (11, 11), (12, 25)];
        self.holidays.extend(
            fixed
                .into_iter()
                .filter_map(|(month, day)| NaiveDate::from_ymd_opt(year, month, day)),
        );

        let floating = [
            // Martin Luther King Jr. Day, Presidents' Day
            Self::nth_weekday(year, 1, Weekday::Mon, 3),
            Self::nth_weekday(year, 2, Weekday::Mon, 3),
            Self::last_weekday(year, 5, Weekday::Mon),
            // Labor Day, Columbus Day, Thanksgiving
            Self::nth_weekday(year, 9, Weekday::Mon, 1),
            Self::nth_weekday(year, 10, Weekday::Mon, 2),
            Self::nth_weekday(year, 11, Weekday::Thu, 4),
        ];
        self.holidays.extend(floating.into_iter().flatten());
    }

    /// The nth occurrence of a weekday in a month, if the month has one.
    fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
        NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
    }

    fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
        let first_of_next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let mut date = first_of_next - Duration::days(1);
        while date.weekday() != weekday {
            date -= Duration::days(1);
        }
        Some(date)
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    pub fn add_holidays(&mut self, dates: &[NaiveDate]) {
        self.holidays.extend(dates);
    }

    /// Add the same month/day holiday for every year in the inclusive span.
    /// Days that do not exist in a given year (Feb 29) are skipped.
    pub fn add_recurring_holiday(&mut self, month: u32, day: u32, start_year: i32, end_year: i32) {
        for year in start_year..=end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(date);
            }
        }
    }

    /// Replace the working week (e.g. Mon-Sat for 6-day weeks).
    pub fn set_working_days(&mut self, days: &[Weekday]) -> Result<(), ScheduleError> {
        if days.is_empty() {
            return Err(ScheduleError::InvalidCalendar(
                "at least one working day is required".into(),
            ));
        }
        self.non_working_days = Self::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !days.contains(day))
            .collect();
        Ok(())
    }

    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }
}

impl WorkCalendarConfig {
    pub fn new<I, J>(working_days: I, holidays: J) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        let mut working: Vec<Weekday> = working_days.into_iter().collect();
        if working.is_empty() {
            return Err(ScheduleError::InvalidCalendar(
                "at least one working day is required".into(),
            ));
        }
        working.sort_by_key(|wd| wd.num_days_from_monday());
        working.dedup();

        let mut holidays: Vec<NaiveDate> = holidays.into_iter().collect();
        holidays.sort();
        holidays.dedup();

        Ok(Self {
            working_days: working,
            holidays,
        })
    }

    pub fn working_days(&self) -> &[Weekday] {
        &self.working_days
    }

    pub fn holidays(&self) -> &[NaiveDate] {
        &self.holidays
    }
}

impl Default for WorkCalendarConfig {
    fn default() -> Self {
        WorkCalendarConfig::from(&WorkCalendar::default())
    }
}

impl From<&WorkCalendar> for WorkCalendarConfig {
    fn from(calendar: &WorkCalendar) -> Self {
        let working_days = WorkCalendar::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !calendar.non_working_days.contains(day))
            .collect();

        let mut holidays: Vec<NaiveDate> = calendar.holidays.iter().copied().collect();
        holidays.sort();

        Self {
            working_days,
            holidays,
        }
    }
}
