pub mod app_config;
pub mod seen_cache;

pub use app_config::Config;
pub use seen_cache::{CacheError, SeenCache};
