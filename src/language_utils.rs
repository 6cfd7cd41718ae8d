use anyhow::{anyhow, Result};
use isolang::Language;

use crate::store::models::SEARCH_KEY_SEPARATOR;

/// Language tag utilities.
///
/// Tags are short opaque strings ('en', 'ind'); the store only requires
/// that they never contain the search-key separator, since a tag holding
/// one could alias another language's key range. Display names are looked
/// up via ISO 639 where the tag happens to be a known code.
/// Validate a language tag for use in derived search keys
pub fn validate_lang_tag(tag: &str) -> Result<()> {
    let tag = tag.trim();

    if tag.is_empty() {
        return Err(anyhow!("Language tag must not be empty"));
    }

    if tag.contains(SEARCH_KEY_SEPARATOR) {
        return Err(anyhow!(
            "Language tag '{}' contains '{}', which is reserved as the search-key separator",
            tag,
            SEARCH_KEY_SEPARATOR
        ));
    }

    Ok(())
}

/// Human-readable name for a language tag, falling back to the tag itself
/// for codes ISO 639 does not know
pub fn language_display_name(tag: &str) -> String {
    let normalized = tag.trim().to_lowercase();

    let language = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    };

    match language {
        Some(lang) => lang.to_name().to_string(),
        None => tag.to_string(),
    }
}
