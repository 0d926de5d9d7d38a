/// Market calendar engine: trading windows, holidays, weekends and DST
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

use crate::error::{Result, ServiceError};
use crate::types::{DaySchedule, Holiday, Window};

/// Interval during which daylight saving time shifts the UTC session hours
#[derive(Debug, Clone, Copy)]
struct DstInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Trading calendar covering a single year.
///
/// All state is immutable after construction; every query is a pure
/// function of the supplied instant.
#[derive(Debug, Clone)]
pub struct MarketCalendar {
    year: i32,
    exclude: HashSet<NaiveDate>,
    special_hours: HashMap<NaiveDate, Window>,
    weekday_window: Window,
    weekday_window_dst: Window,
    weekend_window: Option<Window>,
    weekend_window_dst: Option<Window>,
    dst: Option<DstInterval>,
}

impl MarketCalendar {
    /// Build a calendar for one year.
    ///
    /// Holidays are partitioned up front: dates without hours become
    /// full-day exclusions, dates with hours become special sessions.
    /// Supplying only one of the DST bounds is a configuration error.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        holidays: Vec<Holiday>,
        weekday_window: Window,
        weekday_window_dst: Window,
        weekend_window: Option<Window>,
        weekend_window_dst: Option<Window>,
        dst_start: Option<DateTime<Utc>>,
        dst_end: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        let dst = match (dst_start, dst_end) {
            (Some(start), Some(end)) => Some(DstInterval { start, end }),
            (None, None) => None,
            _ => return Err(ServiceError::IncompleteDstInterval),
        };

        let mut exclude = HashSet::new();
        let mut special_hours = HashMap::new();
        for holiday in holidays {
            match holiday.hours {
                Some(window) => {
                    special_hours.insert(holiday.date, window);
                }
                None => {
                    exclude.insert(holiday.date);
                }
            }
        }

        Ok(MarketCalendar {
            year,
            exclude,
            special_hours,
            weekday_window,
            weekday_window_dst,
            weekend_window,
            weekend_window_dst,
            dst,
        })
    }

    /// The year this calendar covers
    pub fn year(&self) -> i32 {
        self.year
    }

    /// True iff the instant falls on a Saturday or Sunday
    pub fn is_weekend(&self, instant: DateTime<Utc>) -> bool {
        matches!(instant.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// True iff DST is configured and the instant lies strictly between
    /// its bounds. An instant exactly at either bound is not DST.
    pub fn is_dst(&self, instant: DateTime<Utc>) -> bool {
        match self.dst {
            Some(dst) => dst.start < instant && instant < dst.end,
            None => false,
        }
    }

    /// Resolve the trading schedule for the instant's date.
    ///
    /// Resolution order: full-day exclusions, then special hours, then
    /// weekend windows, then weekday windows. Holiday entries outrank the
    /// weekend and DST rules, and exclusions outrank special hours.
    pub fn schedule_for(&self, instant: DateTime<Utc>) -> DaySchedule {
        let date = instant.date_naive();

        if self.exclude.contains(&date) {
            return DaySchedule::Closed;
        }
        if let Some(window) = self.special_hours.get(&date) {
            return DaySchedule::Trading(*window);
        }
        if self.is_weekend(instant) {
            let window = if self.is_dst(instant) {
                self.weekend_window_dst
            } else {
                self.weekend_window
            };
            return match window {
                Some(window) => DaySchedule::Trading(window),
                None => DaySchedule::Closed,
            };
        }

        if self.is_dst(instant) {
            DaySchedule::Trading(self.weekday_window_dst)
        } else {
            DaySchedule::Trading(self.weekday_window)
        }
    }

    /// True iff the instant lies strictly inside that date's session.
    ///
    /// Exclusive at BOTH bounds: an instant exactly at the opening or
    /// closing second is reported closed.
    pub fn is_market_open(&self, instant: DateTime<Utc>) -> bool {
        match self.schedule_for(instant) {
            DaySchedule::Trading(window) => {
                let open = session_open(instant.date_naive(), &window);
                let close = open + window.duration();
                open < instant && instant < close
            }
            DaySchedule::Closed => false,
        }
    }

    /// Next session boundary at or after the given instant.
    ///
    /// When the market is open at `instant` the returned bell is that
    /// session's CLOSE; in every other case it is a session OPEN. Callers
    /// must not assume the result is always an opening event.
    ///
    /// The day-by-day walk never leaves this calendar's year; stepping
    /// past it fails with `CalendarExhausted` so the registry can decide
    /// whether a following year is available.
    pub fn next_bell(&self, instant: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let mut marker = instant;
        let window = loop {
            match self.schedule_for(marker) {
                DaySchedule::Trading(window) => break window,
                DaySchedule::Closed => {
                    marker += Duration::days(1);
                    if marker.year() != self.year {
                        return Err(ServiceError::CalendarExhausted(self.year));
                    }
                }
            }
        };

        if marker.date_naive() != instant.date_naive() {
            return Ok(session_open(marker.date_naive(), &window));
        }

        if self.is_market_open(instant) {
            return Ok(session_open(instant.date_naive(), &window) + window.duration());
        }

        if instant.time() < window.start() {
            return Ok(session_open(instant.date_naive(), &window));
        }

        // Today's session is over - find the next trading date
        let mut marker = instant + Duration::days(1);
        loop {
            if marker.year() != self.year {
                return Err(ServiceError::CalendarExhausted(self.year));
            }
            match self.schedule_for(marker) {
                DaySchedule::Trading(window) => {
                    return Ok(session_open(marker.date_naive(), &window));
                }
                DaySchedule::Closed => marker += Duration::days(1),
            }
        }
    }
}

/// Combine a date with a window's start time into a UTC opening instant
fn session_open(date: NaiveDate, window: &Window) -> DateTime<Utc> {
    date.and_time(window.start()).and_utc()
}
