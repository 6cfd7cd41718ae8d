/*!
 * # lexstore - local translation store with incremental prefix search
 *
 * A Rust library for persisting bilingual dictionary entries locally and
 * looking them up by surface-form prefix as the user types.
 *
 * ## Features
 *
 * - Versioned SQLite-backed store with a derived search-key index
 * - Case-insensitive "starts with" search via lower-bound index seek
 * - Per-record streaming of matches in ascending key order
 * - Batched all-or-nothing upserts and atomic full-clear
 * - Debounced, latest-request-wins query coordination for interactive use
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `store`: the translation store itself:
 *   - `store::connection`: thread-safe SQLite access with async wrappers
 *   - `store::schema`: versioned schema and destructive upgrade handling
 *   - `store::models`: record types and search-key derivation
 *   - `store::repository`: the boundary operations (add/search/clear)
 * - `search`: debounce and stale-query discard for interactive lookups
 * - `seed`: sample and random dummy-data generation
 * - `app_config`: configuration management
 * - `language_utils`: language tag validation and display names
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod language_utils;
pub mod search;
pub mod seed;
pub mod store;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, StoreError};
pub use search::SearchCoordinator;
pub use store::{build_search_key, TranslationRecord, TranslationStore, TranslationVariant};
