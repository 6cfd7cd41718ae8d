/*!
 * Common test utilities shared across the test suite.
 */

use lexstore::store::schema::SCHEMA_VERSION;
use lexstore::{TranslationRecord, TranslationStore};

/// Initialize test logging; safe to call from every test
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Open a fresh in-memory store at the current schema version
pub fn open_store() -> TranslationStore {
    TranslationStore::open_in_memory(SCHEMA_VERSION).expect("Failed to open in-memory store")
}

/// Build a bare record without variants
pub fn record(id: i64, surface: &str, lang: &str) -> TranslationRecord {
    TranslationRecord::new(id, surface, lang, vec![])
}

/// Surfaces of a result set, in emission order
pub fn surfaces(records: &[TranslationRecord]) -> Vec<&str> {
    records.iter().map(|r| r.surface.as_str()).collect()
}
