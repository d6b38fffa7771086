//! Intent Cascade
//!
//! The classifier's decision procedure as an ordered data table. Rules are
//! evaluated in ascending priority; the first satisfied predicate wins and
//! no later rule runs. Table order is part of the engine contract:
//! "book a spa hotel" books, it does not browse spa picks.

use regex::Regex;
use std::sync::LazyLock;

use super::compose::keys;
use super::matcher::fuzzy_includes;

/// Input handed to every rule predicate.
#[derive(Debug)]
pub struct RuleInput<'a> {
    /// Raw message as typed.
    pub raw: &'a str,
    /// Canonicalized message.
    pub normalized: &'a str,
    /// Destination entity extracted from the message, if any.
    pub destination: Option<&'a str>,
}

/// What the composer builds once a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    Smalltalk,
    Greeting,
    RecommendDestination,
    BookByText,
    GalleryByText,
    Navigate(NavTarget),
    ResolveAffirmative,
    RecommendCategory(&'static CategorySet),
    BudgetGuidance,
    AmenityGuidance,
    BookingHelp,
    NotFound,
}

/// Fixed in-app navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Deals,
    Map,
    Trending,
    Wishlist,
    Destinations,
}

impl NavTarget {
    /// Fixed route for this target.
    pub fn path(&self) -> &'static str {
        match self {
            NavTarget::Deals => "/deals",
            NavTarget::Map => "/map",
            NavTarget::Trending => "/trending",
            NavTarget::Wishlist => "/wishlist",
            NavTarget::Destinations => "/destinations",
        }
    }

    /// Reply copy key.
    pub fn text_key(&self) -> &'static str {
        match self {
            NavTarget::Deals => keys::NAV_DEALS,
            NavTarget::Map => keys::NAV_MAP,
            NavTarget::Trending => keys::NAV_TRENDING,
            NavTarget::Wishlist => keys::NAV_WISHLIST,
            NavTarget::Destinations => keys::NAV_DESTINATIONS,
        }
    }

    /// Link label key, resolved through the injected localizer.
    pub fn label_key(&self) -> &'static str {
        match self {
            NavTarget::Deals => keys::LINK_DEALS,
            NavTarget::Map => keys::LINK_MAP,
            NavTarget::Trending => keys::LINK_TRENDING,
            NavTarget::Wishlist => keys::LINK_WISHLIST,
            NavTarget::Destinations => keys::LINK_DESTINATIONS,
        }
    }
}

/// A themed shortlist: fixed regex trigger, fixed catalog ids.
///
/// The id lists are static data; ids missing from the injected catalog are
/// dropped at composition time.
#[derive(Debug, PartialEq, Eq)]
pub struct CategorySet {
    pub name: &'static str,
    pub text_key: &'static str,
    pub ids: &'static [&'static str],
}

pub static SPA_SET: CategorySet = CategorySet {
    name: "spa",
    text_key: keys::CATEGORY_SPA,
    ids: &[
        "kempinski-hotel-ishtar",
        "movenpick-resort-dead-sea",
        "hilton-dead-sea",
    ],
};

pub static BEACH_SET: CategorySet = CategorySet {
    name: "beach",
    text_key: keys::CATEGORY_BEACH,
    ids: &[
        "intercontinental-aqaba",
        "kempinski-hotel-aqaba",
        "hyatt-regency-aqaba-ayla",
    ],
};

pub static ADVENTURE_SET: CategorySet = CategorySet {
    name: "adventure",
    text_key: keys::CATEGORY_ADVENTURE,
    ids: &["sun-city-camp", "memories-aicha-luxury-camp"],
};

pub static HISTORY_SET: CategorySet = CategorySet {
    name: "history",
    text_key: keys::CATEGORY_HISTORY,
    ids: &["movenpick-resort-petra", "petra-marriott"],
};

pub static LUXURY_SET: CategorySet = CategorySet {
    name: "luxury",
    text_key: keys::CATEGORY_LUXURY,
    ids: &[
        "w-amman",
        "kempinski-hotel-ishtar",
        "memories-aicha-luxury-camp",
    ],
};

pub static FAMILY_SET: CategorySet = CategorySet {
    name: "family",
    text_key: keys::CATEGORY_FAMILY,
    ids: &["hyatt-regency-aqaba-ayla", "movenpick-resort-dead-sea"],
};

pub static DEAD_SEA_SET: CategorySet = CategorySet {
    name: "dead-sea",
    text_key: keys::CATEGORY_PLACE,
    ids: &[
        "kempinski-hotel-ishtar",
        "movenpick-resort-dead-sea",
        "hilton-dead-sea",
    ],
};

pub static AMMAN_SET: CategorySet = CategorySet {
    name: "amman",
    text_key: keys::CATEGORY_PLACE,
    ids: &["grand-hyatt-amman", "w-amman", "amman-rotana"],
};

pub static PETRA_SET: CategorySet = CategorySet {
    name: "petra",
    text_key: keys::CATEGORY_PLACE,
    ids: &["movenpick-resort-petra", "petra-marriott"],
};

pub static AQABA_SET: CategorySet = CategorySet {
    name: "aqaba",
    text_key: keys::CATEGORY_PLACE,
    ids: &[
        "intercontinental-aqaba",
        "kempinski-hotel-aqaba",
        "hyatt-regency-aqaba-ayla",
    ],
};

pub static WADI_RUM_SET: CategorySet = CategorySet {
    name: "wadi-rum",
    text_key: keys::CATEGORY_PLACE,
    ids: &["sun-city-camp", "memories-aicha-luxury-camp"],
};

/// One entry in the cascade.
pub struct IntentRule {
    /// Stable rule name, used in logs.
    pub name: &'static str,
    /// Cascade position; lower fires first.
    pub priority: u8,
    /// First-match predicate over the prepared input.
    pub predicate: fn(&RuleInput<'_>) -> bool,
    /// Response the composer builds when the predicate holds.
    pub action: RuleAction,
}

/// Smalltalk phrasings, matched with typo tolerance.
const SMALLTALK_PHRASES: &[&str] = &[
    "how are you",
    "how are u",
    "how r u",
    "hows it going",
    "how is it going",
    "whats up",
    "كيف حالك",
    "كيف الحال",
];

/// Greeting tokens; a message equal to or starting with one greets back.
const GREETING_TOKENS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "heyy",
    "good morning",
    "good afternoon",
    "good evening",
    "greetings",
    "howdy",
    "marhaba",
    "ahlan",
    "salam",
    "مرحبا",
    "اهلا",
    "هلا",
    "السلام عليكم",
];

/// Short affirmatives resolved against the previous bot turn.
const AFFIRMATIVE_TOKENS: &[&str] = &[
    "yes",
    "yes please",
    "yeah",
    "yep",
    "yup",
    "ya",
    "ok",
    "okay",
    "ok sure",
    "sure",
    "aywa",
    "نعم",
    "اه",
    "ايوه",
    "اكيد",
    "تمام",
];

/// Filler tokens stripped from the front of a booking query.
const BOOK_FILLER: &[&str] = &["a", "an", "the", "me", "room", "at", "in", "for"];

/// Tokens removed wholesale from a gallery query.
const GALLERY_FILLER: &[&str] = &[
    "show", "view", "see", "display", "me", "the", "a", "an", "some", "image", "images", "photo",
    "photos", "picture", "pictures", "pic", "pics", "gallery", "of", "for", "please", "صور", "من",
];

static BOOK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:book|reserve|احجز|حجز)\s+(.+)$").expect("Invalid regex: booking verb")
});

static GALLERY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:show|view|see|display)\b.*\b(?:images?|photos?|pictures?|pics?|gallery|صور)\b|\b(?:images?|photos?|pictures?|pics?|صور)\s+(?:of|for|من)\b",
    )
    .expect("Invalid regex: gallery phrasing")
});

static DEALS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:deal|deals|offer|offers|discount|discounts|promo|promos|promotion|promotions|عروض)\b")
        .expect("Invalid regex: deals keywords")
});

static MAP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:map|maps|nearby|near me|around me|directions|خريطة)\b")
        .expect("Invalid regex: map keywords")
});

static TRENDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:trend|trends|trending|popular|top rated|best rated|hot right now|الرائج)\b")
        .expect("Invalid regex: trends keywords")
});

static WISHLIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:wishlist|wish list|saved|favorites|favourites|bookmarks|bookmarked|المفضلة)\b")
        .expect("Invalid regex: wishlist keywords")
});

static DESTINATIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:destination|destinations|where to go|places to visit|places to go|explore|وجهات)\b")
        .expect("Invalid regex: destinations keywords")
});

static SPA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:spa|spas|wellness|massage|sauna|relax|relaxation|therapy|سبا)\b")
        .expect("Invalid regex: spa keywords")
});

static BEACH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:beach|beaches|seaside|swim|swimming|snorkel|snorkeling|dive|diving|coral|water sports|شاطئ)\b")
        .expect("Invalid regex: beach keywords")
});

static ADVENTURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:adventure|adventures|desert|camp|camping|glamping|hike|hiking|trek|trekking|safari|jeep|صحراء)\b")
        .expect("Invalid regex: adventure keywords")
});

static HISTORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:history|historic|historical|culture|cultural|heritage|ancient|ruins|museum|museums|roman|تاريخ)\b")
        .expect("Invalid regex: history keywords")
});

static LUXURY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:luxury|luxurious|five star|5 star|premium|upscale|high end|فاخر)\b")
        .expect("Invalid regex: luxury keywords")
});

static FAMILY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:family|families|kids|children|romantic|romance|honeymoon|couple|couples|anniversary|عائلة)\b")
        .expect("Invalid regex: family keywords")
});

static DEAD_SEA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdead sea\b").expect("Invalid regex: dead sea place"));

static AMMAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bamman\b").expect("Invalid regex: amman place"));

static PETRA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bpetra\b").expect("Invalid regex: petra place"));

static AQABA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\baqaba\b").expect("Invalid regex: aqaba place"));

static WADI_RUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bwadi rum\b").expect("Invalid regex: wadi rum place"));

static BUDGET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:budget|cheap|cheapest|affordable|price|prices|pricing|cost|costs|how much|per night|سعر|اسعار)\b")
        .expect("Invalid regex: budget keywords")
});

static AMENITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:amenity|amenities|wifi|wi fi|pool|pools|parking|breakfast|gym|fitness|pet|pets|pet friendly|shuttle|مرافق)\b")
        .expect("Invalid regex: amenity keywords")
});

static BOOKING_INFO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:book|booking|bookings|reserve|reservation|reservations|checkout|check out|cancel|cancellation|payment|pay|حجز)\b")
        .expect("Invalid regex: booking inquiry keywords")
});

/// Free text following a booking verb, with leading filler dropped.
pub(crate) fn book_query(normalized: &str) -> Option<String> {
    let caps = BOOK_RE.captures(normalized)?;
    let rest = caps.get(1)?.as_str();
    let mut tokens: Vec<&str> = rest.split_whitespace().collect();
    while let Some(first) = tokens.first() {
        if BOOK_FILLER.contains(first) {
            tokens.remove(0);
        } else {
            break;
        }
    }
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

/// Gallery query with the request phrasing stripped out.
pub(crate) fn gallery_query(normalized: &str) -> String {
    normalized
        .split_whitespace()
        .filter(|token| !GALLERY_FILLER.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_smalltalk(input: &RuleInput<'_>) -> bool {
    SMALLTALK_PHRASES
        .iter()
        .any(|phrase| fuzzy_includes(input.normalized, phrase))
}

fn is_greeting(input: &RuleInput<'_>) -> bool {
    GREETING_TOKENS.iter().any(|token| {
        match input.normalized.strip_prefix(token) {
            Some(rest) => rest.is_empty() || rest.starts_with(' '),
            None => false,
        }
    })
}

fn mentions_destination(input: &RuleInput<'_>) -> bool {
    // Booking and gallery phrasings claim the message further down the
    // cascade even when a destination is present.
    input.destination.is_some()
        && book_query(input.normalized).is_none()
        && !GALLERY_RE.is_match(input.normalized)
}

fn is_booking_action(input: &RuleInput<'_>) -> bool {
    book_query(input.normalized).is_some()
}

fn is_gallery_request(input: &RuleInput<'_>) -> bool {
    GALLERY_RE.is_match(input.normalized)
}

fn is_deals(input: &RuleInput<'_>) -> bool {
    DEALS_RE.is_match(input.normalized)
}

fn is_map(input: &RuleInput<'_>) -> bool {
    MAP_RE.is_match(input.normalized)
}

fn is_trending(input: &RuleInput<'_>) -> bool {
    TRENDS_RE.is_match(input.normalized)
}

fn is_wishlist(input: &RuleInput<'_>) -> bool {
    WISHLIST_RE.is_match(input.normalized)
}

fn is_destinations_nav(input: &RuleInput<'_>) -> bool {
    DESTINATIONS_RE.is_match(input.normalized)
}

fn is_affirmative(input: &RuleInput<'_>) -> bool {
    AFFIRMATIVE_TOKENS
        .iter()
        .any(|token| *token == input.normalized)
}

fn is_spa(input: &RuleInput<'_>) -> bool {
    SPA_RE.is_match(input.normalized)
}

fn is_beach(input: &RuleInput<'_>) -> bool {
    BEACH_RE.is_match(input.normalized)
}

fn is_adventure(input: &RuleInput<'_>) -> bool {
    ADVENTURE_RE.is_match(input.normalized)
}

fn is_history(input: &RuleInput<'_>) -> bool {
    HISTORY_RE.is_match(input.normalized)
}

fn is_luxury(input: &RuleInput<'_>) -> bool {
    LUXURY_RE.is_match(input.normalized)
}

fn is_family(input: &RuleInput<'_>) -> bool {
    FAMILY_RE.is_match(input.normalized)
}

fn is_place_dead_sea(input: &RuleInput<'_>) -> bool {
    DEAD_SEA_RE.is_match(input.normalized)
}

fn is_place_amman(input: &RuleInput<'_>) -> bool {
    AMMAN_RE.is_match(input.normalized)
}

fn is_place_petra(input: &RuleInput<'_>) -> bool {
    PETRA_RE.is_match(input.normalized)
}

fn is_place_aqaba(input: &RuleInput<'_>) -> bool {
    AQABA_RE.is_match(input.normalized)
}

fn is_place_wadi_rum(input: &RuleInput<'_>) -> bool {
    WADI_RUM_RE.is_match(input.normalized)
}

fn is_budget(input: &RuleInput<'_>) -> bool {
    BUDGET_RE.is_match(input.normalized)
}

fn is_amenity(input: &RuleInput<'_>) -> bool {
    AMENITY_RE.is_match(input.normalized)
}

fn is_booking_inquiry(input: &RuleInput<'_>) -> bool {
    BOOKING_INFO_RE.is_match(input.normalized)
}

fn always(_input: &RuleInput<'_>) -> bool {
    true
}

/// The default cascade, in contract order.
pub fn default_rules() -> Vec<IntentRule> {
    vec![
        IntentRule {
            name: "smalltalk",
            priority: 10,
            predicate: is_smalltalk,
            action: RuleAction::Smalltalk,
        },
        IntentRule {
            name: "greeting",
            priority: 20,
            predicate: is_greeting,
            action: RuleAction::Greeting,
        },
        IntentRule {
            name: "destination",
            priority: 30,
            predicate: mentions_destination,
            action: RuleAction::RecommendDestination,
        },
        IntentRule {
            name: "book",
            priority: 40,
            predicate: is_booking_action,
            action: RuleAction::BookByText,
        },
        IntentRule {
            name: "gallery",
            priority: 50,
            predicate: is_gallery_request,
            action: RuleAction::GalleryByText,
        },
        IntentRule {
            name: "nav-deals",
            priority: 60,
            predicate: is_deals,
            action: RuleAction::Navigate(NavTarget::Deals),
        },
        IntentRule {
            name: "nav-map",
            priority: 61,
            predicate: is_map,
            action: RuleAction::Navigate(NavTarget::Map),
        },
        IntentRule {
            name: "nav-trending",
            priority: 62,
            predicate: is_trending,
            action: RuleAction::Navigate(NavTarget::Trending),
        },
        IntentRule {
            name: "nav-wishlist",
            priority: 63,
            predicate: is_wishlist,
            action: RuleAction::Navigate(NavTarget::Wishlist),
        },
        IntentRule {
            name: "nav-destinations",
            priority: 64,
            predicate: is_destinations_nav,
            action: RuleAction::Navigate(NavTarget::Destinations),
        },
        IntentRule {
            name: "affirmative",
            priority: 70,
            predicate: is_affirmative,
            action: RuleAction::ResolveAffirmative,
        },
        IntentRule {
            name: "category-spa",
            priority: 80,
            predicate: is_spa,
            action: RuleAction::RecommendCategory(&SPA_SET),
        },
        IntentRule {
            name: "category-beach",
            priority: 81,
            predicate: is_beach,
            action: RuleAction::RecommendCategory(&BEACH_SET),
        },
        IntentRule {
            name: "category-adventure",
            priority: 82,
            predicate: is_adventure,
            action: RuleAction::RecommendCategory(&ADVENTURE_SET),
        },
        IntentRule {
            name: "category-history",
            priority: 83,
            predicate: is_history,
            action: RuleAction::RecommendCategory(&HISTORY_SET),
        },
        IntentRule {
            name: "category-luxury",
            priority: 84,
            predicate: is_luxury,
            action: RuleAction::RecommendCategory(&LUXURY_SET),
        },
        IntentRule {
            name: "category-family",
            priority: 85,
            predicate: is_family,
            action: RuleAction::RecommendCategory(&FAMILY_SET),
        },
        IntentRule {
            name: "place-dead-sea",
            priority: 86,
            predicate: is_place_dead_sea,
            action: RuleAction::RecommendCategory(&DEAD_SEA_SET),
        },
        IntentRule {
            name: "place-amman",
            priority: 87,
            predicate: is_place_amman,
            action: RuleAction::RecommendCategory(&AMMAN_SET),
        },
        IntentRule {
            name: "place-petra",
            priority: 88,
            predicate: is_place_petra,
            action: RuleAction::RecommendCategory(&PETRA_SET),
        },
        IntentRule {
            name: "place-aqaba",
            priority: 89,
            predicate: is_place_aqaba,
            action: RuleAction::RecommendCategory(&AQABA_SET),
        },
        IntentRule {
            name: "place-wadi-rum",
            priority: 90,
            predicate: is_place_wadi_rum,
            action: RuleAction::RecommendCategory(&WADI_RUM_SET),
        },
        IntentRule {
            name: "budget",
            priority: 100,
            predicate: is_budget,
            action: RuleAction::BudgetGuidance,
        },
        IntentRule {
            name: "amenities",
            priority: 110,
            predicate: is_amenity,
            action: RuleAction::AmenityGuidance,
        },
        IntentRule {
            name: "booking-help",
            priority: 120,
            predicate: is_booking_inquiry,
            action: RuleAction::BookingHelp,
        },
        IntentRule {
            name: "not-found",
            priority: 130,
            predicate: always,
            action: RuleAction::NotFound,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(normalized: &str) -> RuleInput<'_> {
        RuleInput {
            raw: normalized,
            normalized,
            destination: None,
        }
    }

    #[test]
    fn test_book_query_strips_filler() {
        assert_eq!(book_query("book a spa hotel"), Some("spa hotel".to_string()));
        assert_eq!(
            book_query("i want to book the petra marriott"),
            Some("petra marriott".to_string())
        );
        assert_eq!(book_query("reserve a room at w amman"), Some("w amman".to_string()));
    }

    #[test]
    fn test_book_query_requires_free_text() {
        assert_eq!(book_query("how do i book"), None);
        assert_eq!(book_query("book a room"), None);
        assert_eq!(book_query("booking a trip"), None);
    }

    #[test]
    fn test_gallery_query_strips_phrasing() {
        assert_eq!(
            gallery_query("show me photos of dead sea hotels"),
            "dead sea hotels"
        );
        assert_eq!(gallery_query("pictures of petra"), "petra");
    }

    #[test]
    fn test_greeting_token_is_word_bounded() {
        assert!(is_greeting(&input("hi")));
        assert!(is_greeting(&input("hi there")));
        assert!(!is_greeting(&input("history hotels")));
        assert!(!is_greeting(&input("highland resort")));
    }

    #[test]
    fn test_affirmative_is_exact() {
        assert!(is_affirmative(&input("yes")));
        assert!(is_affirmative(&input("ok")));
        assert!(!is_affirmative(&input("yes book it")));
    }

    #[test]
    fn test_default_rules_sorted_and_terminated() {
        let rules = default_rules();
        assert!(rules.windows(2).all(|w| w[0].priority < w[1].priority));
        let last = rules.last().expect("table non-empty");
        assert_eq!(last.action, RuleAction::NotFound);
        assert!((last.predicate)(&input("anything at all")));
    }

    #[test]
    fn test_destination_defers_to_direct_actions() {
        let booked = RuleInput {
            raw: "book petra movenpick",
            normalized: "book petra movenpick",
            destination: Some("petra"),
        };
        assert!(!mentions_destination(&booked));
        assert!(is_booking_action(&booked));

        let browsing = RuleInput {
            raw: "hotels in petra",
            normalized: "hotels in petra",
            destination: Some("petra"),
        };
        assert!(mentions_destination(&browsing));
    }
}
