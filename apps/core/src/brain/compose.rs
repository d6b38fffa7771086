//! Response Composition
//!
//! Maps a fired rule to the structured payload the chat UI renders: a
//! localization key for the copy, validated hotel ids, navigation links,
//! and follow-up suggestion chips. Hotel ids from static rule mappings are
//! checked against the injected catalog; unknown ids are logged and
//! dropped, never surfaced as errors.

use std::sync::Arc;

use tracing::warn;

use super::context::last_bot_turn;
use super::rules::{book_query, gallery_query, CategorySet, NavTarget, RuleAction, RuleInput};
use crate::catalog::Catalog;
use crate::models::{ConversationTurn, Link, ResponsePayload};

/// Localization resolver injected by the host application.
pub type Localizer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Localization keys emitted in [`ResponsePayload::text_key`] and resolved
/// for chips and fixed-link labels.
pub mod keys {
    pub const SMALLTALK: &str = "chat.smalltalk";
    pub const GREETING: &str = "chat.greeting";
    pub const DESTINATION_PICKS: &str = "chat.destination_picks";
    pub const BOOK_MATCH: &str = "chat.book_match";
    pub const BOOK_NO_MATCH: &str = "chat.book_no_match";
    pub const GALLERY: &str = "chat.gallery";
    pub const GALLERY_NO_MATCH: &str = "chat.gallery_no_match";
    pub const NAV_DEALS: &str = "chat.nav.deals";
    pub const NAV_MAP: &str = "chat.nav.map";
    pub const NAV_TRENDING: &str = "chat.nav.trending";
    pub const NAV_WISHLIST: &str = "chat.nav.wishlist";
    pub const NAV_DESTINATIONS: &str = "chat.nav.destinations";
    pub const AFFIRM_OPEN: &str = "chat.affirm_open";
    pub const CLARIFY: &str = "chat.clarify";
    pub const CATEGORY_SPA: &str = "chat.category.spa";
    pub const CATEGORY_BEACH: &str = "chat.category.beach";
    pub const CATEGORY_ADVENTURE: &str = "chat.category.adventure";
    pub const CATEGORY_HISTORY: &str = "chat.category.history";
    pub const CATEGORY_LUXURY: &str = "chat.category.luxury";
    pub const CATEGORY_FAMILY: &str = "chat.category.family";
    pub const CATEGORY_PLACE: &str = "chat.category.place";
    pub const BUDGET: &str = "chat.budget";
    pub const AMENITIES: &str = "chat.amenities";
    pub const BOOKING_HELP: &str = "chat.booking_help";
    pub const NOT_FOUND: &str = "chat.not_found";

    pub const LINK_CHECKOUT: &str = "link.checkout";
    pub const LINK_SEARCH: &str = "link.search";
    pub const LINK_DEALS: &str = "link.deals";
    pub const LINK_MAP: &str = "link.map";
    pub const LINK_TRENDING: &str = "link.trending";
    pub const LINK_WISHLIST: &str = "link.wishlist";
    pub const LINK_DESTINATIONS: &str = "link.destinations";

    pub const SUGGEST_POPULAR: &str = "chat.suggest.popular";
    pub const SUGGEST_DEALS: &str = "chat.suggest.deals";
    pub const SUGGEST_DESTINATIONS: &str = "chat.suggest.destinations";
    pub const SUGGEST_SPA: &str = "chat.suggest.spa";
    pub const SUGGEST_BEACH: &str = "chat.suggest.beach";
    pub const SUGGEST_BOOK: &str = "chat.suggest.book";
    pub const SUGGEST_PHOTOS: &str = "chat.suggest.photos";
    pub const SUGGEST_MAP: &str = "chat.suggest.map";
    pub const SUGGEST_BUDGET_ECONOMY: &str = "chat.suggest.budget_economy";
    pub const SUGGEST_BUDGET_MID: &str = "chat.suggest.budget_mid";
    pub const SUGGEST_BUDGET_LUXURY: &str = "chat.suggest.budget_luxury";
    pub const SUGGEST_WIFI: &str = "chat.suggest.wifi";
    pub const SUGGEST_POOL: &str = "chat.suggest.pool";
    pub const SUGGEST_BREAKFAST: &str = "chat.suggest.breakfast";
    pub const SUGGEST_HELP: &str = "chat.suggest.help";
}

/// Fixed route fragments.
pub mod paths {
    pub const CHECKOUT: &str = "/checkout";
    pub const SEARCH: &str = "/search";
    pub const HOTELS: &str = "/hotels";
}

/// Builds [`ResponsePayload`]s for fired rules.
pub(crate) struct Composer {
    catalog: Arc<Catalog>,
    localize: Localizer,
}

impl Composer {
    pub fn new(catalog: Arc<Catalog>, localize: Localizer) -> Self {
        Self { catalog, localize }
    }

    /// Build the payload for a fired rule. Total: every action resolves to
    /// a valid payload with a non-empty suggestion list where the contract
    /// requires one.
    pub fn produce(
        &self,
        action: RuleAction,
        input: &RuleInput<'_>,
        history: &[ConversationTurn],
    ) -> ResponsePayload {
        match action {
            RuleAction::Smalltalk => self.plain(
                keys::SMALLTALK,
                &[keys::SUGGEST_POPULAR, keys::SUGGEST_DEALS, keys::SUGGEST_DESTINATIONS],
            ),
            RuleAction::Greeting => self.plain(
                keys::GREETING,
                &[keys::SUGGEST_DESTINATIONS, keys::SUGGEST_SPA, keys::SUGGEST_DEALS],
            ),
            RuleAction::RecommendDestination => self.destination_picks(input),
            RuleAction::BookByText => self.booking(input),
            RuleAction::GalleryByText => self.gallery(input),
            RuleAction::Navigate(target) => self.navigation(target),
            RuleAction::ResolveAffirmative => self.affirmative(history),
            RuleAction::RecommendCategory(set) => self.category_picks(set),
            RuleAction::BudgetGuidance => self.plain(
                keys::BUDGET,
                &[
                    keys::SUGGEST_BUDGET_ECONOMY,
                    keys::SUGGEST_BUDGET_MID,
                    keys::SUGGEST_BUDGET_LUXURY,
                ],
            ),
            RuleAction::AmenityGuidance => self.plain(
                keys::AMENITIES,
                &[keys::SUGGEST_WIFI, keys::SUGGEST_POOL, keys::SUGGEST_BREAKFAST],
            ),
            RuleAction::BookingHelp => self.booking_help(),
            RuleAction::NotFound => self.plain(
                keys::NOT_FOUND,
                &[keys::SUGGEST_DESTINATIONS, keys::SUGGEST_POPULAR, keys::SUGGEST_HELP],
            ),
        }
    }

    fn resolve(&self, key: &str) -> String {
        (self.localize)(key)
    }

    fn chips(&self, chip_keys: &[&str]) -> Vec<String> {
        chip_keys.iter().map(|k| self.resolve(k)).collect()
    }

    /// Text-and-chips reply with no hotels or links.
    fn plain(&self, text_key: &str, chip_keys: &[&str]) -> ResponsePayload {
        ResponsePayload {
            suggestions: self.chips(chip_keys),
            ..ResponsePayload::new(text_key)
        }
    }

    /// Drop ids the catalog does not know, logging each miss.
    fn known_ids<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        ids.into_iter()
            .filter_map(|id| match self.catalog.require(id) {
                Ok(entry) => Some(entry.id.clone()),
                Err(miss) => {
                    warn!(%miss, "dropping unknown hotel id from response");
                    None
                }
            })
            .collect()
    }

    /// One `/hotels/{id}` link per id, labelled with the entry name.
    /// Ids must already be validated.
    fn hotel_links(&self, ids: &[String]) -> Vec<Link> {
        ids.iter()
            .filter_map(|id| self.catalog.get(id))
            .map(|entry| Link {
                label: entry.name.clone(),
                to: format!("{}/{}", paths::HOTELS, entry.id),
            })
            .collect()
    }

    fn destination_picks(&self, input: &RuleInput<'_>) -> ResponsePayload {
        let Some(destination) = input.destination else {
            // A custom rule table can route here without an extracted
            // entity; degrade to the clarify reply.
            return self.clarify();
        };
        let hotels = self.catalog.ids_tagged(destination);
        if hotels.is_empty() {
            return self.clarify();
        }
        let links = self.hotel_links(&hotels);
        ResponsePayload {
            hotels,
            links,
            suggestions: self.chips(&[keys::SUGGEST_BOOK, keys::SUGGEST_PHOTOS, keys::SUGGEST_MAP]),
            ..ResponsePayload::new(keys::DESTINATION_PICKS)
        }
    }

    fn booking(&self, input: &RuleInput<'_>) -> ResponsePayload {
        let query = book_query(input.normalized).unwrap_or_default();
        let hotels = self.catalog.find_ids_by_text(&query);
        let checkout = Link {
            label: self.resolve(keys::LINK_CHECKOUT),
            to: paths::CHECKOUT.to_string(),
        };
        if hotels.is_empty() {
            return ResponsePayload {
                links: vec![checkout],
                suggestions: self.chips(&[keys::SUGGEST_POPULAR, keys::SUGGEST_DESTINATIONS]),
                ..ResponsePayload::new(keys::BOOK_NO_MATCH)
            };
        }
        let mut links = self.hotel_links(&hotels);
        links.push(checkout);
        ResponsePayload {
            hotels,
            links,
            suggestions: self.chips(&[keys::SUGGEST_PHOTOS, keys::SUGGEST_MAP]),
            ..ResponsePayload::new(keys::BOOK_MATCH)
        }
    }

    fn gallery(&self, input: &RuleInput<'_>) -> ResponsePayload {
        let query = gallery_query(input.normalized);
        let hotels = self.catalog.find_ids_by_text(&query);
        if hotels.is_empty() {
            return self.plain(
                keys::GALLERY_NO_MATCH,
                &[keys::SUGGEST_POPULAR, keys::SUGGEST_DESTINATIONS],
            );
        }
        let links = self.hotel_links(&hotels);
        ResponsePayload {
            hotels,
            links,
            suggestions: self.chips(&[keys::SUGGEST_BOOK, keys::SUGGEST_MAP]),
            ..ResponsePayload::new(keys::GALLERY)
        }
    }

    fn navigation(&self, target: NavTarget) -> ResponsePayload {
        ResponsePayload {
            links: vec![Link {
                label: self.resolve(target.label_key()),
                to: target.path().to_string(),
            }],
            suggestions: self.chips(&[keys::SUGGEST_POPULAR, keys::SUGGEST_DESTINATIONS]),
            ..ResponsePayload::new(target.text_key())
        }
    }

    /// Resolve a bare affirmative against the last bot recommendation.
    fn affirmative(&self, history: &[ConversationTurn]) -> ResponsePayload {
        match last_bot_turn(history) {
            Some(turn) if !turn.hotels.is_empty() => {
                let hotels = self.known_ids(turn.hotels.iter().map(String::as_str));
                if hotels.is_empty() {
                    return self.clarify();
                }
                let links = self.hotel_links(&hotels);
                ResponsePayload {
                    hotels,
                    links,
                    suggestions: self.chips(&[keys::SUGGEST_BOOK, keys::SUGGEST_PHOTOS]),
                    ..ResponsePayload::new(keys::AFFIRM_OPEN)
                }
            }
            _ => self.clarify(),
        }
    }

    fn clarify(&self) -> ResponsePayload {
        self.plain(
            keys::CLARIFY,
            &[keys::SUGGEST_DESTINATIONS, keys::SUGGEST_SPA, keys::SUGGEST_BEACH],
        )
    }

    fn category_picks(&self, set: &CategorySet) -> ResponsePayload {
        let hotels = self.known_ids(set.ids.iter().copied());
        let links = self.hotel_links(&hotels);
        ResponsePayload {
            hotels,
            links,
            suggestions: self.chips(&[keys::SUGGEST_BOOK, keys::SUGGEST_PHOTOS, keys::SUGGEST_MAP]),
            ..ResponsePayload::new(set.text_key)
        }
    }

    fn booking_help(&self) -> ResponsePayload {
        ResponsePayload {
            links: vec![Link {
                label: self.resolve(keys::LINK_SEARCH),
                to: paths::SEARCH.to_string(),
            }],
            suggestions: self.chips(&[keys::SUGGEST_POPULAR, keys::SUGGEST_DEALS, keys::SUGGEST_HELP]),
            ..ResponsePayload::new(keys::BOOKING_HELP)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::jordan_catalog;
    use crate::catalog::Catalog;
    use crate::models::CatalogEntry;

    fn composer(catalog: Catalog) -> Composer {
        Composer::new(Arc::new(catalog), Arc::new(|key: &str| key.to_string()))
    }

    fn input<'a>(normalized: &'a str, destination: Option<&'a str>) -> RuleInput<'a> {
        RuleInput {
            raw: normalized,
            normalized,
            destination,
        }
    }

    #[test]
    fn test_category_drops_unknown_ids() {
        // A catalog missing two of the three spa ids.
        let catalog = Catalog::new(vec![CatalogEntry {
            id: "hilton-dead-sea".to_string(),
            name: "Hilton Dead Sea Resort & Spa".to_string(),
            tags: Default::default(),
            highlights: vec![],
            keywords: vec![],
        }]);
        let payload = composer(catalog).produce(
            RuleAction::RecommendCategory(&crate::brain::rules::SPA_SET),
            &input("spa", None),
            &[],
        );
        assert_eq!(payload.hotels, vec!["hilton-dead-sea"]);
        assert_eq!(payload.links.len(), 1);
    }

    #[test]
    fn test_booking_always_links_checkout() {
        let payload = composer(jordan_catalog()).produce(
            RuleAction::BookByText,
            &input("book petra movenpick", None),
            &[],
        );
        assert!(payload.links.iter().any(|l| l.to == paths::CHECKOUT));
        assert!(!payload.hotels.is_empty());
    }

    #[test]
    fn test_navigation_has_fixed_path_and_no_hotels() {
        let payload = composer(jordan_catalog()).produce(
            RuleAction::Navigate(NavTarget::Deals),
            &input("deals", None),
            &[],
        );
        assert_eq!(payload.links, vec![Link { label: keys::LINK_DEALS.to_string(), to: "/deals".to_string() }]);
        assert!(payload.hotels.is_empty());
        assert!(!payload.suggestions.is_empty());
    }

    #[test]
    fn test_every_action_yields_suggestions() {
        let composer = composer(jordan_catalog());
        let actions = [
            RuleAction::Smalltalk,
            RuleAction::Greeting,
            RuleAction::BookByText,
            RuleAction::GalleryByText,
            RuleAction::Navigate(NavTarget::Map),
            RuleAction::ResolveAffirmative,
            RuleAction::BudgetGuidance,
            RuleAction::AmenityGuidance,
            RuleAction::BookingHelp,
            RuleAction::NotFound,
        ];
        for action in actions {
            let payload = composer.produce(action, &input("anything", None), &[]);
            assert!(
                !payload.suggestions.is_empty(),
                "no suggestions for {action:?}"
            );
        }
    }
}
