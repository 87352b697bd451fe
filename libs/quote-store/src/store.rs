//! Quote collection mirrored into durable key-value slots

use crate::quote::{is_all_categories, seed_quotes, Quote, ALL_CATEGORIES};
use crate::storage::{KeyValueStore, StorageError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Long-lived slot holding the JSON-encoded collection
pub const QUOTES_KEY: &str = "quotes";

/// Long-lived slot holding the last selected category filter
pub const FILTER_KEY: &str = "lastSelectedCategory";

/// Session slot holding the text of the last displayed quote
pub const LAST_QUOTE_KEY: &str = "lastQuote";

/// Default file name for exports
pub const EXPORT_FILE_NAME: &str = "quotes.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Please enter both quote and category ({0} is empty)")]
    Validation(String),

    #[error("Invalid JSON document: {0}")]
    InvalidJson(String),

    #[error("Invalid file format: expected a JSON array of quotes")]
    NotAnArray,

    #[error("Invalid quote at index {index}: {reason}")]
    InvalidQuote { index: usize, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Outcome of a random pick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    Quote(Quote),
    /// The requested category has no quotes
    NoQuotes,
}

impl Pick {
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            Pick::Quote(quote) => Some(quote),
            Pick::NoQuotes => None,
        }
    }
}

/// The quote collection plus its filter and last-displayed slots
pub struct QuoteStore {
    quotes: Vec<Quote>,
    filter: String,
    last_displayed: Option<String>,
    persistent: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
}

impl QuoteStore {
    /// Load the store from its slots
    ///
    /// Missing or malformed data never fails the load: the collection falls
    /// back to the seed quotes and the filter to `"all"`.
    pub fn load(
        persistent: impl KeyValueStore + 'static,
        session: impl KeyValueStore + 'static,
    ) -> Self {
        let persistent: Box<dyn KeyValueStore> = Box::new(persistent);
        let session: Box<dyn KeyValueStore> = Box::new(session);

        let quotes = match read_quotes(persistent.as_ref()) {
            Some(quotes) => quotes,
            None => {
                debug!("No stored quotes, using seed collection");
                seed_quotes()
            }
        };

        let filter = read_slot(persistent.as_ref(), FILTER_KEY)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| ALL_CATEGORIES.to_string());

        let last_displayed = read_slot(session.as_ref(), LAST_QUOTE_KEY);

        debug!(
            "Loaded {} quotes (filter: {}, last quote restored: {})",
            quotes.len(),
            filter,
            last_displayed.is_some()
        );

        Self {
            quotes,
            filter,
            last_displayed,
            persistent,
            session,
        }
    }

    /// Write the full collection to the long-lived store
    pub fn save(&self) -> Result<()> {
        write_quotes(self.persistent.as_ref(), &self.quotes)
    }

    /// Append a quote from user input and persist it
    ///
    /// Returns `true` when the quote introduced a new category.
    pub fn add(&mut self, text: &str, category: &str) -> Result<bool> {
        let quote = Quote::from_input(text, category)
            .map_err(|field| StoreError::Validation(field.to_string()))?;

        let new_category = !self.quotes.iter().any(|q| q.category == quote.category);

        self.quotes.push(quote);
        if let Err(e) = self.save() {
            self.quotes.pop();
            return Err(e);
        }

        if let Some(added) = self.quotes.last() {
            info!("Added quote in category {}", added.category);
        }

        Ok(new_category)
    }

    /// Distinct categories in first-seen order
    pub fn list_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for quote in &self.quotes {
            if !categories.contains(&quote.category) {
                categories.push(quote.category.clone());
            }
        }
        categories
    }

    /// The `"all"` sentinel followed by every distinct category
    pub fn category_options(&self) -> Vec<String> {
        let mut options = vec![ALL_CATEGORIES.to_string()];
        options.extend(self.list_categories());
        options
    }

    /// Pick a random quote in `category` (case-insensitive, `"all"` for any)
    pub fn pick_random(&mut self, category: &str) -> Pick {
        self.pick_random_with(category, &mut rand::thread_rng())
    }

    /// Same as [`pick_random`](Self::pick_random) with a caller-supplied RNG
    pub fn pick_random_with<R: Rng + ?Sized>(&mut self, category: &str, rng: &mut R) -> Pick {
        let candidates: Vec<&Quote> = if is_all_categories(category) {
            self.quotes.iter().collect()
        } else {
            self.quotes
                .iter()
                .filter(|q| q.matches_category(category))
                .collect()
        };

        let Some(quote) = candidates.choose(rng).map(|q| (*q).clone()) else {
            debug!("No quotes available for category {}", category);
            return Pick::NoQuotes;
        };

        if let Err(e) = self.session.set(LAST_QUOTE_KEY, &quote.text) {
            warn!("Failed to record last displayed quote: {}", e);
        }
        self.last_displayed = Some(quote.text.clone());

        Pick::Quote(quote)
    }

    /// Persist the selected category filter
    ///
    /// A blank category resets the filter to `"all"`.
    pub fn set_filter(&mut self, category: &str) -> Result<()> {
        let category = category.trim();
        let category = if category.is_empty() {
            ALL_CATEGORIES
        } else {
            category
        };

        self.persistent.set(FILTER_KEY, category)?;
        self.filter = category.to_string();
        Ok(())
    }

    /// Currently selected category filter
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Text of the last quote displayed during this session
    pub fn last_displayed(&self) -> Option<&str> {
        self.last_displayed.as_deref()
    }

    /// Pretty-printed JSON array of the full collection
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.quotes)?)
    }

    /// Write [`export_json`](Self::export_json) to `path`
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let json = self.export_json()?;
        fs::write(path.as_ref(), json)?;
        info!("Exported {} quotes to {:?}", self.quotes.len(), path.as_ref());
        Ok(self.quotes.len())
    }

    /// Append every quote in a JSON array document and persist
    ///
    /// The document is validated as a whole; nothing is appended if any
    /// element is not a quote. Duplicates are kept.
    pub fn import_json(&mut self, document: &str) -> Result<usize> {
        let imported = parse_quote_array(document)?;
        let count = imported.len();

        let previous_len = self.quotes.len();
        self.quotes.extend(imported);
        if let Err(e) = self.save() {
            self.quotes.truncate(previous_len);
            return Err(e);
        }

        info!("Imported {} quotes", count);
        Ok(count)
    }

    /// Read a file and [`import_json`](Self::import_json) its contents
    pub fn import_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let document = fs::read_to_string(path.as_ref())?;
        self.import_json(&document)
    }

    /// Merge externally sourced quotes into the collection
    ///
    /// The collection is re-read from the long-lived store first so that
    /// writes made through another handle are not lost. A remote quote is
    /// added only when no existing quote has the same text and category.
    /// Returns the quotes that were added.
    pub fn reconcile(&mut self, remote: &[Quote]) -> Result<Vec<Quote>> {
        let mut merged =
            read_quotes(self.persistent.as_ref()).unwrap_or_else(|| self.quotes.clone());

        let mut added = Vec::new();
        for quote in remote {
            if !merged.contains(quote) {
                debug!("Quote added from server: {}", quote.text);
                merged.push(quote.clone());
                added.push(quote.clone());
            }
        }

        write_quotes(self.persistent.as_ref(), &merged)?;
        self.quotes = merged;

        Ok(added)
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// Stored collection, `None` when absent or unreadable
fn read_quotes(store: &dyn KeyValueStore) -> Option<Vec<Quote>> {
    let raw = read_slot(store, QUOTES_KEY)?;

    match serde_json::from_str::<Vec<Quote>>(&raw) {
        Ok(quotes) => Some(quotes),
        Err(e) => {
            warn!("Stored quotes are malformed, ignoring them: {}", e);
            None
        }
    }
}

fn write_quotes(store: &dyn KeyValueStore, quotes: &[Quote]) -> Result<()> {
    let json = serde_json::to_string(quotes)?;
    store.set(QUOTES_KEY, &json)?;
    debug!("Saved {} quotes", quotes.len());
    Ok(())
}

fn read_slot(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to read {} from storage: {}", key, e);
            None
        }
    }
}

fn parse_quote_array(document: &str) -> Result<Vec<Quote>> {
    let value: serde_json::Value =
        serde_json::from_str(document).map_err(|e| StoreError::InvalidJson(e.to_string()))?;

    let serde_json::Value::Array(items) = value else {
        return Err(StoreError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let quote: Quote = serde_json::from_value(item).map_err(|e| StoreError::InvalidQuote {
                index,
                reason: e.to_string(),
            })?;

            if quote.text.trim().is_empty() || quote.category.trim().is_empty() {
                return Err(StoreError::InvalidQuote {
                    index,
                    reason: "text and category must not be empty".to_string(),
                });
            }

            Ok(quote)
        })
        .collect()
}
