pub mod loader;

pub use loader::{load_config, ServerConfig};
