//! Quote record and the built-in seed collection

use serde::{Deserialize, Serialize};

/// Category sentinel meaning "no filter"
pub const ALL_CATEGORIES: &str = "all";

/// Category assigned to quotes pulled from the remote source
pub const SERVER_CATEGORY: &str = "Server";

/// A single quote
///
/// Equality is structural: two quotes are the same when both the text and
/// the category match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Build a quote from user input, trimming both fields
    ///
    /// Returns the name of the first empty field on failure.
    pub fn from_input(text: &str, category: &str) -> std::result::Result<Self, &'static str> {
        let text = text.trim();
        let category = category.trim();

        if text.is_empty() {
            return Err("text");
        }
        if category.is_empty() {
            return Err("category");
        }

        Ok(Self::new(text, category))
    }

    /// Case-insensitive category match, with exactly `"all"` matching everything
    pub fn matches_category(&self, category: &str) -> bool {
        is_all_categories(category) || self.category.to_lowercase() == category.to_lowercase()
    }
}

/// Check whether a category string is the "no filter" sentinel
pub fn is_all_categories(category: &str) -> bool {
    category == ALL_CATEGORIES
}

/// Collection used when nothing usable is in storage
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote::new("Be yourself; everyone else is already taken.", "Inspiration"),
        Quote::new("This too shall pass.", "Life"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_trims() {
        let quote = Quote::from_input("  Carpe diem ", "\tLife\n").unwrap();
        assert_eq!(quote, Quote::new("Carpe diem", "Life"));
    }

    #[test]
    fn test_from_input_rejects_blank_fields() {
        assert_eq!(Quote::from_input("", "Life"), Err("text"));
        assert_eq!(Quote::from_input("   ", "Life"), Err("text"));
        assert_eq!(Quote::from_input("Carpe diem", ""), Err("category"));
        assert_eq!(Quote::from_input("Carpe diem", "  "), Err("category"));
    }

    #[test]
    fn test_matches_category() {
        let quote = Quote::new("This too shall pass.", "Life");

        assert!(quote.matches_category("Life"));
        assert!(quote.matches_category("life"));
        assert!(quote.matches_category("LIFE"));
        assert!(quote.matches_category("all"));
        assert!(!quote.matches_category("Inspiration"));
    }

    #[test]
    fn test_sentinel_is_exact() {
        assert!(is_all_categories("all"));
        assert!(!is_all_categories("All"));
        assert!(!is_all_categories("ALL"));

        let life = Quote::new("This too shall pass.", "Life");
        assert!(!life.matches_category("All"));

        let named_all = Quote::new("Only me", "All");
        assert!(named_all.matches_category("All"));
        assert!(named_all.matches_category("ALL"));
    }

    #[test]
    fn test_json_shape() {
        let quote = Quote::new("Carpe diem", "Life");
        let json = serde_json::to_value(&quote).unwrap();

        assert_eq!(json["text"], "Carpe diem");
        assert_eq!(json["category"], "Life");
    }

    #[test]
    fn test_seed_quotes() {
        let seed = seed_quotes();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].category, "Inspiration");
        assert_eq!(seed[1].text, "This too shall pass.");
    }
}
