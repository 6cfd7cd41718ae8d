/*!
 * End-to-end workflow tests: seed, search, clear, and reopen against a
 * file-backed store.
 */

use lexstore::seed::{random_records, sample_records};
use lexstore::store::schema::SCHEMA_VERSION;
use lexstore::{StoreError, TranslationStore};

use crate::common::{init_logging, open_store, surfaces};

#[tokio::test]
async fn test_sampleDictionary_shouldAnswerOriginalScenarios() {
    init_logging();
    let store = open_store();
    store.add_translations(&sample_records()).await.unwrap();

    // 'd' in English finds dog and duck, alphabetically
    let results = store.search("en", "d").await.unwrap();
    assert_eq!(surfaces(&results), vec!["dog", "duck"]);

    // dog carries two German variants and one Indonesian
    assert_eq!(results[0].variants_for("de").len(), 2);
    assert_eq!(results[0].variants_for("ind").len(), 1);

    // 'mak' in English only finds make; makan is Indonesian
    let results = store.search("en", "mak").await.unwrap();
    assert_eq!(surfaces(&results), vec!["make"]);
    let results = store.search("ind", "mak").await.unwrap();
    assert_eq!(surfaces(&results), vec!["makan"]);
}

#[tokio::test]
async fn test_bulkSeed_shouldStayConsistentUnderPrefixQueries() {
    let store = open_store();
    store.add_translations(&sample_records()).await.unwrap();

    // Seed in two batches, ids continuing past the sample set
    store
        .add_translations(&random_records(10, 500))
        .await
        .unwrap();
    store
        .add_translations(&random_records(510, 500))
        .await
        .unwrap();

    assert_eq!(store.count().await.unwrap(), 1005);

    // Every match must carry the queried language and the prefix
    for lang in ["en", "de", "ind"] {
        let results = store.search(lang, "a").await.unwrap();
        for record in &results {
            assert_eq!(record.lang, lang);
            assert!(record.surface.to_lowercase().starts_with('a'));
        }

        // Ascending search-key order
        let keys: Vec<String> = results.iter().map(|r| r.search_key()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}

#[tokio::test]
async fn test_fileStore_shouldPersistAcrossReopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("translations.db");

    {
        let store = TranslationStore::open_at_path(&db_path, SCHEMA_VERSION)
            .await
            .unwrap();
        store.add_translations(&sample_records()).await.unwrap();
    }

    let store = TranslationStore::open_at_path(&db_path, SCHEMA_VERSION)
        .await
        .unwrap();
    let results = store.search("en", "du").await.unwrap();
    assert_eq!(surfaces(&results), vec!["duck"]);
}

#[tokio::test]
async fn test_fileStore_versionBump_shouldDropAllRecords() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("translations.db");

    {
        let store = TranslationStore::open_at_path(&db_path, 1).await.unwrap();
        store.add_translations(&sample_records()).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 5);
    }

    // Upgrade is destructive by design: the store comes back empty
    let store = TranslationStore::open_at_path(&db_path, 2).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
    assert!(store.search("en", "d").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fileStore_versionDowngrade_shouldFailOpen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("translations.db");

    {
        TranslationStore::open_at_path(&db_path, 3).await.unwrap();
    }

    let result = TranslationStore::open_at_path(&db_path, 2).await;
    assert!(matches!(result, Err(StoreError::Open(_))));
}

#[tokio::test]
async fn test_clearThenReseed_shouldBehaveLikeFreshStore() {
    let store = open_store();
    store.add_translations(&sample_records()).await.unwrap();
    store.clear().await.unwrap();
    store.add_translations(&sample_records()).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 5);
    let results = store.search("en", "t").await.unwrap();
    assert_eq!(surfaces(&results), vec!["tree"]);
}
