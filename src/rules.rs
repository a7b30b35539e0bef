use std::collections::HashSet;

use serde::Deserialize;

use crate::error::CleanError;

/// Label reported by the generic blocklist pass, distinguishing it from a
/// genuine platform match.
pub const GENERIC_LABEL: &str = "Generic Clean";

/// Campaign attribution parameters, matched by exact name.
pub const UTM_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "utm_id",
    "utm_source_platform",
    "utm_marketing_tactic",
    "utm_creative_format",
];

/// Cross-platform ad-click identifiers, matched by exact name.
pub const GENERIC_TRACKING: &[&str] = &[
    "fbclid",
    "gclid",
    "msclkid",
    "li_fat_id",
    "igsh",
    "igshid",
    "twclid",
    "dclid",
    "ttclid",
];

/// Affiliate/promo markers, matched as case-insensitive name prefixes.
pub const AFFILIATE_PREFIXES: &[&str] = &[
    "aff",
    "affiliate",
    "aff_id",
    "affiliate_id",
    "partner",
    "tag",
    "promo",
    "coupon",
    "discount",
];

pub const EMBEDDED_RULES: &str = include_str!("../rules/platforms.json");

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawPlatform {
    #[serde(default)]
    domains: Vec<String>,
    #[serde(default)]
    removeAll: bool,
    #[serde(default)]
    keepSelected: Vec<String>,
    #[serde(default)]
    removeSelected: Vec<String>,
    name: String,
}

// The document is a top-level array: declaration order is the match order.
#[derive(Debug, Deserialize)]
struct RawRuleTable {
    platforms: Vec<RawPlatform>,
}

/// One platform's cleaning policy, compiled from its raw serde form.
#[derive(Debug, Clone)]
pub struct PlatformPolicy {
    pub domains: Vec<String>,
    pub remove_all: bool,
    pub keep_selected: HashSet<String>,
    pub remove_selected: HashSet<String>,
    pub display_name: String,
}

impl PlatformPolicy {
    /// Exact hostname match, or dot-suffix match so `music.youtube.com`
    /// falls under a `youtube.com` rule while `notyoutube.com` does not.
    pub fn matches_host(&self, hostname: &str) -> bool {
        self.domains
            .iter()
            .any(|domain| hostname == domain || hostname.ends_with(&format!(".{}", domain)))
    }
}

pub fn load_platforms(json: &str) -> Result<Vec<PlatformPolicy>, CleanError> {
    let raw: RawRuleTable = serde_json::from_str(json)?;

    let mut platforms = Vec::with_capacity(raw.platforms.len());
    for platform in raw.platforms {
        if platform.domains.is_empty() {
            continue;
        }

        let keep_selected: HashSet<String> = platform.keepSelected.into_iter().collect();
        // Keep wins on conflict: the compiled remove set never overlaps keep.
        let remove_selected: HashSet<String> = platform
            .removeSelected
            .into_iter()
            .filter(|p| !keep_selected.contains(p))
            .collect();

        platforms.push(PlatformPolicy {
            domains: platform
                .domains
                .into_iter()
                .map(|d| d.to_lowercase())
                .collect(),
            remove_all: platform.removeAll,
            keep_selected,
            remove_selected,
            display_name: platform.name,
        });
    }

    Ok(platforms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_loads() {
        let platforms = load_platforms(EMBEDDED_RULES).unwrap();
        assert_eq!(platforms.len(), 12);
        assert_eq!(platforms[0].display_name, "Instagram");
        assert_eq!(platforms[4].display_name, "Twitter/X");
        assert!(platforms[4].remove_all);
    }

    #[test]
    fn keep_and_remove_sets_are_disjoint() {
        for platform in load_platforms(EMBEDDED_RULES).unwrap() {
            assert!(
                platform.keep_selected.is_disjoint(&platform.remove_selected),
                "overlapping keep/remove lists for {}",
                platform.display_name
            );
        }
    }

    #[test]
    fn keep_wins_when_raw_lists_overlap() {
        let json = r#"{"platforms": [{
            "domains": ["example.com"],
            "removeAll": false,
            "keepSelected": ["ref"],
            "removeSelected": ["ref", "spy"],
            "name": "Example"
        }]}"#;
        let platforms = load_platforms(json).unwrap();
        assert!(platforms[0].keep_selected.contains("ref"));
        assert!(!platforms[0].remove_selected.contains("ref"));
        assert!(platforms[0].remove_selected.contains("spy"));
    }

    #[test]
    fn suffix_matching_requires_dot_boundary() {
        let platforms = load_platforms(EMBEDDED_RULES).unwrap();
        let youtube = platforms
            .iter()
            .find(|p| p.display_name == "YouTube")
            .unwrap();

        assert!(youtube.matches_host("youtube.com"));
        assert!(youtube.matches_host("music.youtube.com"));
        assert!(!youtube.matches_host("notyoutube.com"));
    }

    #[test]
    fn platform_without_domains_is_skipped() {
        let json = r#"{"platforms": [{"domains": [], "name": "Ghost"}]}"#;
        assert!(load_platforms(json).unwrap().is_empty());
    }

    #[test]
    fn malformed_table_is_rejected() {
        assert!(load_platforms("{not json").is_err());
        assert!(load_platforms(r#"{"platforms": 42}"#).is_err());
    }
}
