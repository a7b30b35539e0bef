use std::collections::HashSet;

use tracing::{debug, info};
use url::Url;

use crate::error::CleanError;
use crate::models::CleanResult;
use crate::rules::{self, PlatformPolicy};

/// Returns true when the input parses as an absolute URL. Callers use this to
/// gate input before invoking the cleaning passes.
pub fn is_valid_url(input: &str) -> bool {
    Url::parse(input).is_ok()
}

/// Rule-based cleaning engine. Immutable after construction; every method
/// takes `&self`, so one engine can serve any number of concurrent callers.
#[derive(Clone)]
pub struct RuleEngine {
    platforms: Vec<PlatformPolicy>,
    utm_params: HashSet<&'static str>,
    generic_tracking: HashSet<&'static str>,
}

impl RuleEngine {
    /// Builds the engine from the rule table compiled into the binary.
    pub fn from_embedded() -> Result<Self, CleanError> {
        Self::from_json(rules::EMBEDDED_RULES)
    }

    /// Builds the engine from an equivalent caller-supplied JSON table.
    pub fn from_json(json: &str) -> Result<Self, CleanError> {
        let platforms = rules::load_platforms(json)?;
        info!("Loaded {} platform policies", platforms.len());

        Ok(Self {
            platforms,
            utm_params: rules::UTM_PARAMS.iter().copied().collect(),
            generic_tracking: rules::GENERIC_TRACKING.iter().copied().collect(),
        })
    }

    pub fn platforms(&self) -> &[PlatformPolicy] {
        &self.platforms
    }

    /// First policy whose domains match the URL's hostname, in table order.
    /// `None` means "unrecognized platform", a normal outcome.
    pub fn detect(&self, url: &Url) -> Option<&PlatformPolicy> {
        let hostname = url.host_str()?.to_lowercase();
        self.platforms.iter().find(|p| p.matches_host(&hostname))
    }

    fn is_tracking(&self, name: &str) -> bool {
        self.utm_params.contains(name) || self.generic_tracking.contains(name)
    }

    fn is_affiliate_or_promotional(name: &str) -> bool {
        let lower = name.to_lowercase();
        rules::AFFILIATE_PREFIXES
            .iter()
            .any(|prefix| lower.starts_with(prefix))
    }

    /// Splits the URL's query parameters into the names to delete (in
    /// original order, one entry per occurrence) and the names explicitly
    /// protected. Parameters targeted by neither side survive untouched
    /// without appearing in either output.
    pub fn classify(&self, url: &Url, policy: &PlatformPolicy) -> (Vec<String>, HashSet<String>) {
        let mut removed = Vec::new();
        let mut kept = HashSet::new();

        for (name, _) in url.query_pairs() {
            let name = name.into_owned();

            if policy.remove_all {
                removed.push(name);
                continue;
            }

            let should_keep =
                policy.keep_selected.contains(&name) || Self::is_affiliate_or_promotional(&name);

            // Keep wins: an explicitly protected parameter is never removed,
            // even when it is also a known tracking name.
            if should_keep {
                kept.insert(name);
            } else if policy.remove_selected.contains(&name) || self.is_tracking(&name) {
                removed.push(name);
            }
        }

        (removed, kept)
    }

    /// Deletes every occurrence of each removed name from the query string,
    /// preserving the relative order of the survivors. Scheme, host, path
    /// and fragment are left untouched.
    pub fn rewrite(url: &mut Url, removed: &[String]) {
        if removed.is_empty() {
            return;
        }

        let doomed: HashSet<&str> = removed.iter().map(String::as_str).collect();
        let query_pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let mut new_query = url::form_urlencoded::Serializer::new(String::new());
        let mut any_kept = false;

        for (name, value) in query_pairs {
            if doomed.contains(name.as_str()) {
                continue;
            }
            new_query.append_pair(&name, &value);
            any_kept = true;
        }

        if any_kept {
            url.set_query(Some(&new_query.finish()));
        } else {
            url.set_query(None);
        }
    }

    /// Full platform-aware pass: parse, detect, classify, rewrite.
    pub fn clean_url(&self, input: &str) -> Result<CleanResult, CleanError> {
        let mut url = Url::parse(input)?;

        let Some(policy) = self.detect(&url) else {
            debug!(url = %input, "No platform rule matched");
            return Ok(CleanResult::unmatched());
        };

        let (removed, _kept) = self.classify(&url, policy);
        let platform_label = policy.display_name.clone();
        Self::rewrite(&mut url, &removed);

        debug!(
            platform = %platform_label,
            removed = removed.len(),
            "Cleaned URL"
        );

        Ok(CleanResult {
            cleaned_url: Some(url.to_string()),
            platform_label: Some(platform_label),
            removed_params: removed,
        })
    }

    /// Weaker platform-agnostic pass, applied only on explicit caller
    /// request: pure blocklist matching against the global tracking names,
    /// with no keep-list and no affiliate protection.
    pub fn clean_generic(&self, input: &str) -> Result<CleanResult, CleanError> {
        let mut url = Url::parse(input)?;

        let removed: Vec<String> = url
            .query_pairs()
            .filter(|(name, _)| self.is_tracking(name))
            .map(|(name, _)| name.into_owned())
            .collect();

        Self::rewrite(&mut url, &removed);

        Ok(CleanResult {
            cleaned_url: Some(url.to_string()),
            platform_label: Some(rules::GENERIC_LABEL.to_string()),
            removed_params: removed,
        })
    }
}
