pub mod market;
pub mod nyse;
pub mod registry;

pub use market::MarketCalendar;
pub use nyse::{default_registry, nyse_2021};
pub use registry::CalendarRegistry;
