/// NYSE calendar configuration (update annually)
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::calendar::market::MarketCalendar;
use crate::calendar::registry::CalendarRegistry;
use crate::error::Result;
use crate::types::{Holiday, Window};

/// NYSE calendar for 2021.
///
/// The regular session is 09:30-16:00 Eastern, which is 14:30 UTC while
/// standard time is in effect and 13:30 UTC during daylight saving.
pub fn nyse_2021() -> Result<MarketCalendar> {
    let regular = Duration::hours(6) + Duration::minutes(30);
    let weekday_window = Window::new(NaiveTime::from_hms_opt(14, 30, 0).unwrap(), regular)?;
    let weekday_window_dst = Window::new(NaiveTime::from_hms_opt(13, 30, 0).unwrap(), regular)?;

    // Early close at 13:00 Eastern the day after Thanksgiving
    let black_friday = Window::new(
        NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        Duration::hours(3) + Duration::minutes(30),
    )?;

    MarketCalendar::new(
        2021,
        vec![
            Holiday::closed(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()), // New Year's Day
            Holiday::closed(NaiveDate::from_ymd_opt(2021, 1, 18).unwrap()), // Martin Luther King Jr. Day
            Holiday::closed(NaiveDate::from_ymd_opt(2021, 2, 15).unwrap()), // Washington's Birthday
            Holiday::closed(NaiveDate::from_ymd_opt(2021, 4, 2).unwrap()), // Good Friday
            Holiday::closed(NaiveDate::from_ymd_opt(2021, 5, 31).unwrap()), // Memorial Day
            Holiday::closed(NaiveDate::from_ymd_opt(2021, 6, 5).unwrap()),
            Holiday::closed(NaiveDate::from_ymd_opt(2021, 9, 6).unwrap()), // Labor Day
            Holiday::closed(NaiveDate::from_ymd_opt(2021, 11, 25).unwrap()), // Thanksgiving Day
            Holiday::special(NaiveDate::from_ymd_opt(2021, 11, 26).unwrap(), black_friday),
            Holiday::closed(NaiveDate::from_ymd_opt(2021, 12, 24).unwrap()), // Christmas Day (observed)
        ],
        weekday_window,
        weekday_window_dst,
        None,
        None,
        // DST switches at 02:00 local on the second Sunday of March and the
        // first Sunday of November
        Some(Utc.with_ymd_and_hms(2021, 3, 14, 7, 0, 0).unwrap()),
        Some(Utc.with_ymd_and_hms(2021, 11, 7, 6, 0, 0).unwrap()),
    )
}

/// Build the registry with every configured year
pub fn default_registry() -> Result<CalendarRegistry> {
    Ok(CalendarRegistry::new(vec![nyse_2021()?]))
}
