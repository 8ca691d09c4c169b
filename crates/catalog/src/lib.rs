//! # Catalog Crate
//!
//! This crate handles loading and indexing the beer review dataset.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Item, RatingRecord, Style, Catalog)
//! - **parser**: Parse the review CSV into Rust structs, normalizing
//!   free-text styles into the fixed label set
//! - **index**: Build the in-memory catalog with style index and item stats
//! - **cached**: Process-wide load-once catalog accessor
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, Style};
//! use std::path::Path;
//!
//! // Load the dataset
//! let catalog = Catalog::load_from_csv(Path::new("data/beer_reviews.csv"))?;
//!
//! // Query data
//! let ipas = catalog.items_in_style(Style::Ipa);
//! let stats = catalog.get_item_stats(&ipas[0]).unwrap();
//!
//! println!("{} rated {:.2} over {} reviews", ipas[0], stats.avg_rating, stats.rating_count);
//! ```

// Public modules
pub mod cached;
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use parser::normalize_style;
pub use types::{
    // Type aliases
    UserId,
    ItemId,
    // Core types
    Item,
    RatingRecord,
    Catalog,
    ItemStats,
    // Enums
    Style,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();
        let (items, ratings) = catalog.counts();

        assert_eq!(items, 0);
        assert_eq!(ratings, 0);
    }

    #[test]
    fn test_insert_item() {
        let mut catalog = Catalog::new();

        let item = Item {
            id: "Pliny the Elder".to_string(),
            style: Style::Ipa,
            brewery: "Russian River".to_string(),
        };

        catalog.insert_item(item.clone());

        let retrieved = catalog.get_item("Pliny the Elder").unwrap();
        assert_eq!(retrieved.style, Style::Ipa);
        assert_eq!(retrieved.brewery, "Russian River");
    }

    #[test]
    fn test_insert_item_first_wins() {
        let mut catalog = Catalog::new();

        catalog.insert_item(Item {
            id: "Pliny the Elder".to_string(),
            style: Style::Ipa,
            brewery: "Russian River".to_string(),
        });
        catalog.insert_item(Item {
            id: "Pliny the Elder".to_string(),
            style: Style::Other,
            brewery: "Someone Else".to_string(),
        });

        let retrieved = catalog.get_item("Pliny the Elder").unwrap();
        assert_eq!(retrieved.brewery, "Russian River");
    }

    #[test]
    fn test_insert_rating() {
        let mut catalog = Catalog::new();

        catalog.insert_rating(RatingRecord {
            user_id: "alice".to_string(),
            item_id: "Pliny the Elder".to_string(),
            rating: 5.0,
        });

        let ratings = catalog.ratings_for_item("Pliny the Elder");
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].rating, 5.0);
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::new();

        assert!(catalog.get_item("nope").is_none());
        assert!(catalog.ratings_for_item("nope").is_empty());
        assert!(catalog.items_in_style(Style::Sour).is_empty());
        assert!(catalog.styles_present().is_empty());
    }

    #[test]
    fn test_style_labels_round_trip() {
        for style in Style::ALL {
            assert_eq!(Style::parse_label(style.label()), Some(style));
        }
        assert_eq!(Style::parse_label("NotAStyle"), None);
    }
}
