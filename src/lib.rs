pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod rules;
pub mod sanitizer;

pub use error::CleanError;
pub use models::CleanResult;
pub use sanitizer::{is_valid_url, RuleEngine};
