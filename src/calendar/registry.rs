/// Year-keyed registry of market calendars
use std::collections::HashMap;

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::calendar::market::MarketCalendar;
use crate::error::{Result, ServiceError};

/// Immutable mapping from calendar year to the calendar covering it.
///
/// Built once at process start and shared read-only with every consumer.
/// Queries for a year without a calendar fail with `MissingCalendar`
/// instead of falling through to a bare map lookup.
#[derive(Debug, Clone)]
pub struct CalendarRegistry {
    calendars: HashMap<i32, MarketCalendar>,
}

impl CalendarRegistry {
    pub fn new(calendars: Vec<MarketCalendar>) -> Self {
        let calendars = calendars
            .into_iter()
            .map(|calendar| (calendar.year(), calendar))
            .collect();
        CalendarRegistry { calendars }
    }

    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }

    /// The calendar covering the given year
    pub fn calendar_for(&self, year: i32) -> Result<&MarketCalendar> {
        self.calendars
            .get(&year)
            .ok_or(ServiceError::MissingCalendar(year))
    }

    /// Whether the market is open at the given instant
    pub fn is_market_open_at(&self, instant: DateTime<Utc>) -> Result<bool> {
        Ok(self.calendar_for(instant.year())?.is_market_open(instant))
    }

    /// Next session boundary at or after the given instant.
    ///
    /// When the covering calendar runs out of trading days (a query late in
    /// December), the search continues from midnight UTC on January 1 with
    /// the following year's calendar. A year without a calendar yields
    /// `MissingCalendar` rather than an unhandled lookup.
    pub fn next_bell_after(&self, instant: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let mut cursor = instant;
        loop {
            let calendar = self.calendar_for(cursor.year())?;
            match calendar.next_bell(cursor) {
                Ok(bell) => return Ok(bell),
                Err(ServiceError::CalendarExhausted(year)) => {
                    cursor = Utc.with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0).unwrap();
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Whether the market is open right now
    pub fn is_market_open(&self) -> Result<bool> {
        self.is_market_open_at(Utc::now())
    }

    /// Next session boundary from now
    pub fn next_bell(&self) -> Result<DateTime<Utc>> {
        self.next_bell_after(Utc::now())
    }
}
