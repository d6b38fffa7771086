//! Injected hotel catalog.
//!
//! Supplied once at engine construction and treated as immutable for the
//! process lifetime. Besides id lookup it provides the text matching used
//! by the booking and gallery rules: an entry matches when its normalized
//! name contains the query (or vice versa), or when any keyword token
//! overlaps a query token. Matches come back in catalog iteration order.

use std::collections::{HashMap, HashSet};

use crate::brain::normalize::normalize;
use crate::error::CatalogLookupMiss;
use crate::models::CatalogEntry;

/// Read-only catalog with a precomputed search index.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<String, usize>,
    index: Vec<SearchEntry>,
}

/// Normalized search data per entry, built once at construction.
#[derive(Debug, Clone)]
struct SearchEntry {
    name: String,
    keyword_tokens: HashSet<String>,
}

impl Catalog {
    /// Build a catalog from its entries. Ids are expected to be unique; on
    /// a duplicate, the first entry wins.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut by_id = HashMap::with_capacity(entries.len());
        let mut index = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            by_id.entry(entry.id.clone()).or_insert(i);
            index.push(SearchEntry {
                name: normalize(&entry.name),
                keyword_tokens: entry
                    .keywords
                    .iter()
                    .flat_map(|k| {
                        normalize(k)
                            .split_whitespace()
                            .map(str::to_string)
                            .collect::<Vec<_>>()
                    })
                    .collect(),
            });
        }
        Self { entries, by_id, index }
    }

    /// Build a catalog from a JSON array of entries, the format the
    /// storefront ships its catalog data in.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Entry by id, if present.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    /// Entry by id, or a [`CatalogLookupMiss`] carrying the offending id.
    pub fn require(&self, id: &str) -> Result<&CatalogEntry, CatalogLookupMiss> {
        self.get(id).ok_or_else(|| CatalogLookupMiss { id: id.to_string() })
    }

    /// All entries, in iteration order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of entries carrying `tag`, in catalog order. Destination
    /// recommendations use this with the destination key as the tag.
    pub fn ids_tagged(&self, tag: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.tags.contains(tag))
            .map(|e| e.id.clone())
            .collect()
    }

    /// Free-text match over names and keywords, in catalog order.
    ///
    /// An entry matches when its normalized name contains the normalized
    /// query or the query contains the name, or when any keyword token
    /// equals any whitespace-split query token. No ranking is applied.
    pub fn find_ids_by_text(&self, text: &str) -> Vec<String> {
        let query = normalize(text);
        if query.is_empty() {
            return vec![];
        }
        let query_tokens: Vec<&str> = query.split_whitespace().collect();

        self.entries
            .iter()
            .zip(&self.index)
            .filter(|(_, search)| {
                search.name.contains(&query)
                    || query.contains(&search.name)
                    || query_tokens.iter().any(|t| search.keyword_tokens.contains(*t))
            })
            .map(|(entry, _)| entry.id.clone())
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::jordan_catalog;
    use super::*;

    #[test]
    fn test_get_and_require() {
        let catalog = jordan_catalog();
        assert!(catalog.get("petra-marriott").is_some());
        assert!(catalog.get("no-such-hotel").is_none());

        let miss = catalog.require("no-such-hotel").unwrap_err();
        assert_eq!(miss.id, "no-such-hotel");
        assert!(miss.to_string().contains("no-such-hotel"));
    }

    #[test]
    fn test_ids_tagged_in_catalog_order() {
        let catalog = jordan_catalog();
        assert_eq!(
            catalog.ids_tagged("petra"),
            vec!["movenpick-resort-petra", "petra-marriott"]
        );
        assert_eq!(
            catalog.ids_tagged("dead sea"),
            vec![
                "kempinski-hotel-ishtar",
                "movenpick-resort-dead-sea",
                "hilton-dead-sea"
            ]
        );
        assert!(catalog.ids_tagged("antarctica").is_empty());
    }

    #[test]
    fn test_find_by_name_containment() {
        let catalog = jordan_catalog();
        // Query contained in the entry name.
        assert!(catalog
            .find_ids_by_text("rotana")
            .contains(&"amman-rotana".to_string()));
        // Entry name contained in a longer query.
        assert!(catalog
            .find_ids_by_text("the W Amman downtown please")
            .contains(&"w-amman".to_string()));
    }

    #[test]
    fn test_find_by_keyword_token_overlap() {
        let catalog = jordan_catalog();
        let ids = catalog.find_ids_by_text("petra movenpick");
        assert!(ids.contains(&"movenpick-resort-petra".to_string()));
        // "petra" alone also overlaps the Marriott's keywords.
        assert!(ids.contains(&"petra-marriott".to_string()));
    }

    #[test]
    fn test_find_order_is_catalog_order() {
        let catalog = jordan_catalog();
        let ids = catalog.find_ids_by_text("spa");
        assert_eq!(
            ids,
            vec![
                "kempinski-hotel-ishtar",
                "movenpick-resort-dead-sea",
                "hilton-dead-sea"
            ]
        );
    }

    #[test]
    fn test_find_empty_query() {
        let catalog = jordan_catalog();
        assert!(catalog.find_ids_by_text("").is_empty());
        assert!(catalog.find_ids_by_text("  !! ").is_empty());
    }

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(
            r#"[{"id":"h1","name":"Test Hotel","keywords":["test"]}]"#,
        )
        .expect("catalog should parse");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("h1").is_some());
        assert!(!catalog.is_empty());
    }
}
