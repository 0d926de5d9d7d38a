pub mod calendar;
pub mod config;
pub mod error;
pub mod server;
pub mod types;

pub use calendar::{CalendarRegistry, MarketCalendar};
pub use error::{Result, ServiceError};
pub use types::*;
