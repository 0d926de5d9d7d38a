/// Core type definitions for the market status service
use chrono::{Duration, NaiveDate, NaiveTime};

use crate::error::{Result, ServiceError};

/// A single day's trading session: a start-of-day time plus a session length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: NaiveTime,
    duration: Duration,
}

impl Window {
    /// Create a trading window. The duration must be positive and the
    /// session must not run past midnight.
    pub fn new(start: NaiveTime, duration: Duration) -> Result<Self> {
        if duration <= Duration::zero() {
            return Err(ServiceError::InvalidWindow(format!(
                "duration must be positive, got {} minutes",
                duration.num_minutes()
            )));
        }

        let since_midnight = start.signed_duration_since(NaiveTime::MIN);
        if since_midnight + duration > Duration::hours(24) {
            return Err(ServiceError::InvalidWindow(format!(
                "session starting at {} with duration {} minutes crosses midnight",
                start,
                duration.num_minutes()
            )));
        }

        Ok(Window { start, duration })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// A calendar date with no session at all, or a special (shortened) session
#[derive(Debug, Clone, Copy)]
pub struct Holiday {
    pub date: NaiveDate,
    pub hours: Option<Window>,
}

impl Holiday {
    /// Full-day holiday - the market does not trade at all
    pub fn closed(date: NaiveDate) -> Self {
        Holiday { date, hours: None }
    }

    /// Holiday with special hours (e.g. a shortened session)
    pub fn special(date: NaiveDate, hours: Window) -> Self {
        Holiday {
            date,
            hours: Some(hours),
        }
    }
}

/// Resolved trading schedule for a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySchedule {
    /// The market trades during the given window
    Trading(Window),
    /// No session on this date
    Closed,
}

impl DaySchedule {
    pub fn is_closed(&self) -> bool {
        matches!(self, DaySchedule::Closed)
    }
}
