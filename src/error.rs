use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("not a valid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("malformed rule table: {0}")]
    InvalidRules(#[from] serde_json::Error),
}
