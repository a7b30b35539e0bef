use serde::{Deserialize, Serialize};

/// Outcome of one cleaning pass. `cleaned_url` and `platform_label` are both
/// absent when no platform rule matched the hostname; the caller decides
/// whether to fall back to the generic pass.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CleanResult {
    pub cleaned_url: Option<String>,
    pub platform_label: Option<String>,
    /// Parameter names actually deleted, in original query-string order.
    /// A name repeated in the query string appears once per occurrence.
    pub removed_params: Vec<String>,
}

impl CleanResult {
    pub fn unmatched() -> Self {
        Self::default()
    }

    pub fn is_match(&self) -> bool {
        self.platform_label.is_some()
    }
}
