//! Destination Entity Extraction
//!
//! Resolves a destination key from free text via an ordered alias table.
//! The first entry with a matching alias wins; listed order is the
//! tie-break contract, not longest-match.

use serde::{Deserialize, Serialize};

use super::matcher::fuzzy_includes;
use super::normalize::normalize;

/// Locale an alias belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ar,
}

/// One destination with its aliases, grouped by locale.
#[derive(Debug, Clone)]
pub struct DestinationEntry {
    /// Canonical destination key, also used as a catalog tag.
    pub key: String,
    /// Aliases in match order; stored normalized.
    pub aliases: Vec<(Locale, String)>,
}

/// Default alias data. Order is deliberate: earlier entries shadow later
/// ones when a message mentions several destinations.
const DEFAULT_DESTINATIONS: &[(&str, &[(Locale, &str)])] = &[
    (
        "dead sea",
        &[
            (Locale::En, "dead sea"),
            (Locale::En, "deadsea"),
            (Locale::Ar, "البحر الميت"),
        ],
    ),
    (
        "amman",
        &[(Locale::En, "amman"), (Locale::Ar, "عمان")],
    ),
    (
        "petra",
        &[
            (Locale::En, "petra"),
            (Locale::En, "wadi musa"),
            (Locale::Ar, "البتراء"),
        ],
    ),
    (
        "aqaba",
        &[(Locale::En, "aqaba"), (Locale::Ar, "العقبة")],
    ),
    (
        "wadi rum",
        &[(Locale::En, "wadi rum"), (Locale::Ar, "وادي رم")],
    ),
];

/// Ordered destination alias table.
#[derive(Debug, Clone)]
pub struct DestinationTable {
    entries: Vec<DestinationEntry>,
}

impl Default for DestinationTable {
    fn default() -> Self {
        let entries = DEFAULT_DESTINATIONS
            .iter()
            .map(|(key, aliases)| DestinationEntry {
                key: (*key).to_string(),
                aliases: aliases
                    .iter()
                    .map(|(locale, alias)| (*locale, normalize(alias)))
                    .collect(),
            })
            .collect();
        Self { entries }
    }
}

impl DestinationTable {
    /// Build a table from caller-supplied entries; aliases are normalized
    /// here so `extract` can compare directly.
    pub fn new(entries: Vec<DestinationEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|mut entry| {
                for (_, alias) in &mut entry.aliases {
                    *alias = normalize(alias);
                }
                entry
            })
            .collect();
        Self { entries }
    }

    /// Resolve the destination mentioned in `message`, if any.
    ///
    /// Literal containment of a normalized alias matches first; short
    /// aliases additionally tolerate a couple of edits, so "petera"
    /// resolves to "petra". Returns the first matching entry's key.
    pub fn extract(&self, message: &str) -> Option<&str> {
        let normalized = normalize(message);
        if normalized.is_empty() {
            return None;
        }
        for entry in &self.entries {
            for (_, alias) in &entry.aliases {
                if fuzzy_includes(&normalized, alias) {
                    return Some(&entry.key);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_literal_alias() {
        let table = DestinationTable::default();
        assert_eq!(table.extract("any hotels in Petra?"), Some("petra"));
        assert_eq!(table.extract("AQABA beach trip"), Some("aqaba"));
        assert_eq!(table.extract("the Dead Sea, please"), Some("dead sea"));
    }

    #[test]
    fn test_extracts_arabic_alias() {
        let table = DestinationTable::default();
        assert_eq!(table.extract("فنادق في البتراء"), Some("petra"));
        assert_eq!(table.extract("رحلة الى العقبة"), Some("aqaba"));
    }

    #[test]
    fn test_extracts_typo() {
        let table = DestinationTable::default();
        assert_eq!(table.extract("petera"), Some("petra"));
        assert_eq!(table.extract("ammann"), Some("amman"));
    }

    #[test]
    fn test_listed_order_breaks_ties() {
        // "dead sea" is listed before "amman"; a message naming both
        // resolves to the earlier entry.
        let table = DestinationTable::default();
        assert_eq!(table.extract("amman or the dead sea?"), Some("dead sea"));
    }

    #[test]
    fn test_no_match() {
        let table = DestinationTable::default();
        assert_eq!(table.extract("somewhere warm"), None);
        assert_eq!(table.extract(""), None);
    }

    #[test]
    fn test_custom_table_normalizes_aliases() {
        let table = DestinationTable::new(vec![DestinationEntry {
            key: "jerash".to_string(),
            aliases: vec![(Locale::En, "Jérash!".to_string())],
        }]);
        assert_eq!(table.extract("ruins of jerash"), Some("jerash"));
    }
}
