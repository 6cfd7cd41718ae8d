/*!
 * Translation record models.
 *
 * These structures map directly to rows of the translations table and
 * provide type-safe access to persisted data. The embedded target-language
 * variants are stored as a single JSON column and are not separately indexed.
 */

use serde::{Deserialize, Serialize};

/// Separator between the language tag and the lowercased surface form in a
/// derived search key. Language tags must never contain this character,
/// otherwise a tag could collide with another tag's key range.
pub const SEARCH_KEY_SEPARATOR: char = ':';

/// A single target-language rendering embedded in a translation record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationVariant {
    /// Target language code
    pub lang: String,

    /// Surface form in the target language
    pub surface: String,

    /// Optional identifier carried over from the source data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl TranslationVariant {
    /// Create a new variant without an identifier
    pub fn new(lang: &str, surface: &str) -> Self {
        Self {
            lang: lang.to_string(),
            surface: surface.to_string(),
            id: None,
        }
    }

    /// Create a new variant with an identifier
    pub fn with_id(lang: &str, surface: &str, id: &str) -> Self {
        Self {
            lang: lang.to_string(),
            surface: surface.to_string(),
            id: Some(id.to_string()),
        }
    }
}

/// A bilingual dictionary entry as persisted in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Primary key, caller-assigned. A put with an existing id overwrites
    /// the full record (last-write-wins).
    pub id: i64,

    /// Original-language text form
    pub surface: String,

    /// Source language code (short tag, e.g. 'en', 'ind')
    pub lang: String,

    /// Embedded target-language variants, in source order
    #[serde(default)]
    pub translations: Vec<TranslationVariant>,

    /// Creation timestamp (ISO 8601), set by the store on first write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last update timestamp (ISO 8601), refreshed by the store on each write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl TranslationRecord {
    /// Create a new record with the given variants
    pub fn new(id: i64, surface: &str, lang: &str, translations: Vec<TranslationVariant>) -> Self {
        Self {
            id,
            surface: surface.to_string(),
            lang: lang.to_string(),
            translations,
            created_at: None,
            updated_at: None,
        }
    }

    /// Derive the search key for this record's current lang/surface
    pub fn search_key(&self) -> String {
        build_search_key(&self.lang, &self.surface)
    }

    /// Variants restricted to one target language
    pub fn variants_for(&self, target_lang: &str) -> Vec<&TranslationVariant> {
        self.translations
            .iter()
            .filter(|v| v.lang == target_lang)
            .collect()
    }
}

/// Build the derived composite sort key used by the prefix-search index.
///
/// The key is `lang + ":" + lowercase(surface)`. It is recomputed from the
/// record's current fields on every write and never trusted from caller
/// input, so it cannot go stale. Duplicate keys are allowed; ordering is
/// bytewise string comparison.
pub fn build_search_key(lang: &str, surface: &str) -> String {
    format!("{}{}{}", lang, SEARCH_KEY_SEPARATOR, surface.to_lowercase())
}
