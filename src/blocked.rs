//! Blocked periods: closed date intervals during which no work progresses.
//!
//! A deadline that lands on or after the start of a blocked period is pushed
//! forward by the number of business days the period covers. Only the first
//! matching period (in input order) is applied, and the shifted deadline is
//! not checked again, so back-to-back or overlapping periods are not fully
//! absorbed.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::calendar::BusinessCalendar;
use crate::error::ScheduleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BlockedPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// A blocked period with its business-day span precomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBlock {
    pub start: NaiveDate,
    pub blocked_business_days: i64,
}

/// Blocked periods prepared against a calendar, ready to shift deadlines.
#[derive(Debug, Clone)]
pub struct BlockedPeriods<'a, C: BusinessCalendar> {
    calendar: &'a C,
    blocks: Vec<ResolvedBlock>,
}

impl<'a, C: BusinessCalendar> BlockedPeriods<'a, C> {
    pub fn resolve(periods: &[BlockedPeriod], calendar: &'a C) -> Self {
        let blocks = periods
            .iter()
            .map(|period| ResolvedBlock {
                start: period.start,
                blocked_business_days: calendar.business_day_diff(period.start, period.end),
            })
            .collect();
        Self { calendar, blocks }
    }

    pub fn blocks(&self) -> &[ResolvedBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// First block, in input order, whose start is on or before `deadline`.
    pub fn first_reached_by(&self, deadline: NaiveDate) -> Option<&ResolvedBlock> {
        self.blocks.iter().find(|block| block.start <= deadline)
    }

    /// Shift `candidate` past the first block it has reached.
    ///
    /// The extra day on top of the block's span compensates for the
    /// end-exclusive counting used to size the block.
    pub fn apply_block_shift(&self, candidate: NaiveDate) -> Result<NaiveDate, ScheduleError> {
        let Some(block) = self.first_reached_by(candidate) else {
            return Ok(candidate);
        };
        let shifted = self
            .calendar
            .step_business_days(candidate, block.blocked_business_days + 1)?;
        debug!(
            "deadline {candidate} reached block starting {}; shifted to {shifted}",
            block.start
        );
        Ok(shifted)
    }
}
