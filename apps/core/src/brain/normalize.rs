//! Text Normalization
//!
//! Canonical form for every string the brain compares. One pass over the
//! NFD-decomposed input: combining marks stripped, letters lowercased,
//! apostrophes removed, everything else folded to single spaces.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Apostrophe variants removed outright so "don't" and "dont" compare equal.
const APOSTROPHES: &[char] = &['\'', '\u{2019}', '\u{2018}', '\u{02BC}', '`'];

/// Normalize raw user text for matching.
///
/// Steps, in order: NFD decomposition, combining-mark removal, lowercasing,
/// apostrophe removal, replacement of any non-alphanumeric character with a
/// space, whitespace collapse, trim.
///
/// The output contains only lowercase letters, digits, and single interior
/// spaces, so the function is idempotent: normalizing an already-normalized
/// string returns it unchanged. Empty and all-punctuation inputs yield `""`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.nfd().filter(|c| !is_combining_mark(*c)) {
        if APOSTROPHES.contains(&c) {
            continue;
        }
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(c.to_lowercase());
        } else {
            pending_space = true;
        }
    }

    out
}
