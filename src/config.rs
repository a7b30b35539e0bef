use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    /// Optional path to a platform rule table on disk; the embedded table is
    /// used when unset.
    pub rules_path: Option<String>,
    /// Default output format for the CLI, "text" or "json".
    pub output: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let rules_path = env::var("CLEANSHARE_RULES").ok();
        let output = env::var("CLEANSHARE_OUTPUT").unwrap_or_else(|_| "text".to_string());

        Self { rules_path, output }
    }
}
