//! Placeholder discovery.
//!
//! Tokens are found on each paragraph's full text, not per run: PowerPoint
//! freely splits `{{Ville}}` into `{{`, `Ville` and `}}` runs when the author
//! edits the middle of a token.

use crate::normalize::{fold_key, normalize_placeholder, CLOSE, OPEN};
use crate::types::{Deck, Slide};
use std::collections::HashMap;

/// Every `{{...}}` token in `text`, verbatim, leftmost first.
///
/// An opener without a closing `}}` ends the scan of that text.
pub fn placeholder_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut idx = 0;

    while let Some(rel_start) = text[idx..].find(OPEN) {
        let start = idx + rel_start;
        let Some(rel_end) = text[start..].find(CLOSE) else {
            break;
        };
        let end = start + rel_end + CLOSE.len();
        tokens.push(&text[start..end]);
        idx = end;
    }

    tokens
}

/// Placeholders present on a slide: normalized token → exact token text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    tokens: HashMap<String, String>,
}

impl PlaceholderMap {
    /// Record `token`, keeping the first exact text seen for its key.
    fn record(&mut self, token: &str) {
        self.tokens
            .entry(normalize_placeholder(token))
            .or_insert_with(|| token.to_string());
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Exact on-slide token for a normalized key.
    pub fn get(&self, normalized: &str) -> Option<&str> {
        self.tokens.get(normalized).map(String::as_str)
    }

    /// Exact on-slide token for a placeholder as written in a mapping.
    ///
    /// Tries the normalized key first, then a case-insensitive comparison.
    pub fn resolve(&self, placeholder: &str) -> Option<&str> {
        let norm = normalize_placeholder(placeholder);
        if let Some(exact) = self.get(&norm) {
            return Some(exact);
        }

        let folded = fold_key(&norm);
        let mut candidates: Vec<(&String, &String)> = self
            .tokens
            .iter()
            .filter(|(key, _)| fold_key(key) == folded)
            .collect();
        // deterministic pick when several spellings fold together
        candidates.sort();
        candidates.first().map(|(_, exact)| exact.as_str())
    }

    /// Normalized keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.tokens.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Scan every paragraph of every text shape on `slide`.
pub fn find_placeholders(slide: &Slide) -> PlaceholderMap {
    let mut map = PlaceholderMap::default();
    scan_slide(slide, &mut map);
    map
}

/// Scan every slide of `deck`, in slide order.
pub fn find_placeholders_in_deck(deck: &Deck) -> PlaceholderMap {
    let mut map = PlaceholderMap::default();
    for slide in &deck.slides {
        scan_slide(slide, &mut map);
    }
    map
}

fn scan_slide(slide: &Slide, map: &mut PlaceholderMap) {
    for paragraph in slide.paragraphs() {
        let text = paragraph.text();
        for token in placeholder_tokens(&text) {
            map.record(token);
        }
    }
}
