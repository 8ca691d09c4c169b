//! Core domain types for the beer review catalog.
//!
//! This module defines the fundamental data structures used throughout the
//! system:
//! - Type aliases for domain clarity (UserId, ItemId)
//! - The fixed `Style` label set every free-text beer style is normalized into
//! - The `Catalog` in-memory index with O(1) lookups

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================
// The review dataset keys both reviewers and beers by name, so both ids are
// strings. The aliases keep the two from being mixed up.

/// Unique identifier for a reviewer (profile name in the source data)
pub type UserId = String;

/// Unique identifier for a beer (beer name in the source data)
pub type ItemId = String;

// =============================================================================
// Style
// =============================================================================

/// The fixed set of beer style labels.
///
/// Raw catalog rows carry free-text styles ("American Double / Imperial IPA",
/// "Hefeweizen", ...); the parser collapses them into this closed set before
/// anything downstream sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Style {
    Ipa,
    Wheat,
    Lager,
    Porter,
    Stout,
    Oktoberfest,
    Pilsner,
    Sour,
    Malt,
    Barleywine,
    Scotch,
    Ginger,
    Ale,
    Other,
}

impl Style {
    /// All styles, in canonical order. Used for deterministic tie-breaking
    /// and for CLI listings.
    pub const ALL: [Style; 14] = [
        Style::Ipa,
        Style::Wheat,
        Style::Lager,
        Style::Porter,
        Style::Stout,
        Style::Oktoberfest,
        Style::Pilsner,
        Style::Sour,
        Style::Malt,
        Style::Barleywine,
        Style::Scotch,
        Style::Ginger,
        Style::Ale,
        Style::Other,
    ];

    /// The display label for this style.
    pub fn label(&self) -> &'static str {
        match self {
            Style::Ipa => "IPA",
            Style::Wheat => "Wheat",
            Style::Lager => "Lager",
            Style::Porter => "Porter",
            Style::Stout => "Stout",
            Style::Oktoberfest => "Oktoberfest",
            Style::Pilsner => "Pilsner",
            Style::Sour => "Sour",
            Style::Malt => "Malt",
            Style::Barleywine => "Barleywine",
            Style::Scotch => "Scotch",
            Style::Ginger => "Ginger",
            Style::Ale => "Ale",
            Style::Other => "Other",
        }
    }

    /// Parse an exact label back into a `Style` ("IPA" -> `Style::Ipa`).
    ///
    /// This is the strict inverse of [`Style::label`], used for CLI
    /// arguments. Free-text normalization lives in the parser instead.
    pub fn parse_label(s: &str) -> Option<Style> {
        Style::ALL.iter().copied().find(|style| style.label() == s)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Item and Rating Types
// =============================================================================

/// Represents a single beer in the catalog. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub style: Style,
    pub brewery: String,
}

/// A single historical taste rating from one reviewer for one beer.
///
/// Multiple records may share the same (user, item) pair; the engine
/// collapses those via mean before matrix construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRecord {
    pub user_id: UserId,
    pub item_id: ItemId,
    /// Rating value from 1.0 to 5.0
    pub rating: f32,
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Precomputed statistics for an item.
///
/// These are computed once when loading data for fast lookups later.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ItemStats {
    pub avg_rating: f32,
    pub rating_count: u32,
    /// Popularity score derived from rating count and average
    pub popularity_score: f32,
}

// =============================================================================
// Catalog - The Core In-Memory Index
// =============================================================================

/// Main data structure that holds the item catalog and historical ratings.
///
/// Built once at load time and treated as immutable afterwards; callers
/// share it behind an `Arc`. The per-style item lists are sorted by item id,
/// which is the canonical catalog iteration order the ranker relies on for
/// deterministic tie-breaking.
#[derive(Debug)]
pub struct Catalog {
    // Primary data stores
    pub(crate) items: HashMap<ItemId, Item>,

    /// All historical ratings received by each item
    pub(crate) item_ratings: HashMap<ItemId, Vec<RatingRecord>>,

    /// Items grouped by style, each list sorted ascending by item id
    pub(crate) style_index: HashMap<Style, Vec<ItemId>>,

    // Precomputed statistics
    pub(crate) item_stats: HashMap<ItemId, ItemStats>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            item_ratings: HashMap::new(),
            style_index: HashMap::new(),
            item_stats: HashMap::new(),
        }
    }

    // Getters - these return references; the catalog keeps ownership

    /// Get an item by id
    pub fn get_item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Get all historical ratings for an item
    ///
    /// Returns an empty slice if the item has no ratings
    pub fn ratings_for_item(&self, item_id: &str) -> &[RatingRecord] {
        self.item_ratings
            .get(item_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all item ids in a specific style, sorted ascending by id
    pub fn items_in_style(&self, style: Style) -> &[ItemId] {
        self.style_index
            .get(&style)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get precomputed statistics for an item
    pub fn get_item_stats(&self, item_id: &str) -> Option<&ItemStats> {
        self.item_stats.get(item_id)
    }

    /// All historical ratings for every item belonging to one of `styles`.
    ///
    /// This is the engine's view of the rating table once style filtering
    /// has been applied.
    pub fn ratings_for_styles<'a>(
        &'a self,
        styles: &'a [Style],
    ) -> impl Iterator<Item = &'a RatingRecord> + 'a {
        styles
            .iter()
            .flat_map(|&style| self.items_in_style(style))
            .flat_map(|item_id| self.ratings_for_item(item_id))
    }

    /// The styles that have at least one item in the catalog, in canonical
    /// order.
    pub fn styles_present(&self) -> Vec<Style> {
        Style::ALL
            .iter()
            .copied()
            .filter(|style| !self.items_in_style(*style).is_empty())
            .collect()
    }

    // Mutators - used during data loading only

    /// Insert an item into the catalog. First insert wins: the review data
    /// repeats item metadata on every row.
    pub fn insert_item(&mut self, item: Item) {
        self.items.entry(item.id.clone()).or_insert(item);
    }

    /// Insert a historical rating
    pub fn insert_rating(&mut self, rating: RatingRecord) {
        self.item_ratings
            .entry(rating.item_id.clone())
            .or_default()
            .push(rating);
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        let total_ratings = self.item_ratings.values().map(|v| v.len()).sum();
        (self.items.len(), total_ratings)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
