/*!
 * Dummy-data generation for seeding and benchmarks.
 *
 * Two generators: a small fixed sample set of real dictionary entries, and
 * a bulk random generator producing base-36 surface strings with a handful
 * of random variants per record, in the same shape as the sample data.
 */

use once_cell::sync::Lazy;
use rand::Rng;

use crate::store::{TranslationRecord, TranslationVariant};

/// Language pool used by the sample set and the random generator
pub const SEED_LANGUAGES: &[&str] = &["en", "de", "ind"];

/// Alphabet of the random surface strings (base-36, lowercase)
const SURFACE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated surface strings
const SURFACE_LEN: usize = 16;

/// Variants attached to each random record
const VARIANTS_PER_RECORD: usize = 5;

static SAMPLE_RECORDS: Lazy<Vec<TranslationRecord>> = Lazy::new(|| {
    vec![
        TranslationRecord::new(
            1,
            "dog",
            "en",
            vec![
                TranslationVariant::with_id("de", "Hund", "100"),
                TranslationVariant::with_id("de", "Köter", "101"),
                TranslationVariant::with_id("ind", "anjing", "102"),
            ],
        ),
        TranslationRecord::new(2, "duck", "en", vec![TranslationVariant::new("de", "Ente")]),
        TranslationRecord::new(3, "tree", "en", vec![TranslationVariant::new("de", "Baum")]),
        TranslationRecord::new(
            4,
            "makan",
            "ind",
            vec![TranslationVariant::new("de", "essen")],
        ),
        TranslationRecord::new(
            5,
            "make",
            "en",
            vec![TranslationVariant::new("de", "machen")],
        ),
    ]
});

/// The fixed sample dictionary (five entries across en/de/ind)
pub fn sample_records() -> Vec<TranslationRecord> {
    SAMPLE_RECORDS.clone()
}

/// Generate `count` random records with ids starting at `start_id`
pub fn random_records(start_id: i64, count: usize) -> Vec<TranslationRecord> {
    let mut rng = rand::rng();
    let mut records = Vec::with_capacity(count);

    for offset in 0..count {
        let mut variants = Vec::with_capacity(VARIANTS_PER_RECORD);
        for variant_idx in 0..VARIANTS_PER_RECORD {
            variants.push(TranslationVariant::with_id(
                random_language(&mut rng),
                &random_surface(&mut rng),
                &variant_idx.to_string(),
            ));
        }

        records.push(TranslationRecord::new(
            start_id + offset as i64,
            &random_surface(&mut rng),
            random_language(&mut rng),
            variants,
        ));
    }

    records
}

fn random_language(rng: &mut impl Rng) -> &'static str {
    SEED_LANGUAGES[rng.random_range(0..SEED_LANGUAGES.len())]
}

fn random_surface(rng: &mut impl Rng) -> String {
    (0..SURFACE_LEN)
        .map(|_| SURFACE_CHARSET[rng.random_range(0..SURFACE_CHARSET.len())] as char)
        .collect()
}
