/*!
 * Local translation store.
 *
 * This module provides SQLite-based persistence for bilingual dictionary
 * entries: a versioned schema with a derived search-key index, batched
 * atomic upserts, and incremental case-insensitive prefix search.
 */

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

// Re-export main types
pub use connection::{StoreConnection, StoreStats};
pub use models::{build_search_key, TranslationRecord, TranslationVariant};
pub use repository::TranslationStore;
