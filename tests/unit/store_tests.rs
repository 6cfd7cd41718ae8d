/*!
 * Unit tests for the translation store's boundary operations.
 */

use lexstore::store::schema::SCHEMA_VERSION;
use lexstore::{StoreError, TranslationRecord, TranslationStore, TranslationVariant};

use crate::common::{init_logging, open_store, record, surfaces};

#[tokio::test]
async fn test_search_withMatchingPrefix_shouldReturnRecord() {
    init_logging();
    let store = open_store();
    store
        .add_translations(&[record(1, "dog", "en")])
        .await
        .unwrap();

    let results = store.search("en", "d").await.unwrap();
    assert_eq!(surfaces(&results), vec!["dog"]);
}

#[tokio::test]
async fn test_search_withUppercasePrefix_shouldMatchCaseInsensitively() {
    let store = open_store();
    store
        .add_translations(&[record(1, "dog", "en")])
        .await
        .unwrap();

    let lowercase = store.search("en", "d").await.unwrap();
    let uppercase = store.search("en", "D").await.unwrap();

    assert_eq!(lowercase.len(), 1);
    assert_eq!(uppercase.len(), 1);
    assert_eq!(lowercase[0].id, uppercase[0].id);
}

#[tokio::test]
async fn test_search_withOtherLanguage_shouldReturnNothing() {
    let store = open_store();
    store
        .add_translations(&[record(1, "dog", "en")])
        .await
        .unwrap();

    let results = store.search("de", "d").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_withSharedPrefix_shouldOnlyReturnMatching() {
    let store = open_store();
    store
        .add_translations(&[record(1, "dog", "en"), record(2, "duck", "en")])
        .await
        .unwrap();

    let results = store.search("en", "du").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 2);
}

#[tokio::test]
async fn test_search_withUppercaseStoredSurface_shouldStillMatch() {
    let store = open_store();
    store
        .add_translations(&[record(1, "Dog", "en"), record(2, "DUCK", "en")])
        .await
        .unwrap();

    let results = store.search("en", "d").await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_search_withEmptyPrefix_shouldScopeByLanguage() {
    let store = open_store();
    store
        .add_translations(&[
            record(1, "dog", "en"),
            record(2, "duck", "en"),
            record(3, "makan", "ind"),
        ])
        .await
        .unwrap();

    let results = store.search("en", "").await.unwrap();
    assert_eq!(surfaces(&results), vec!["dog", "duck"]);
}

#[tokio::test]
async fn test_search_withUnknownLanguage_shouldReturnEmptyNotError() {
    let store = open_store();
    store
        .add_translations(&[record(1, "dog", "en")])
        .await
        .unwrap();

    let results = store.search("xx", "d").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_shouldEmitInAscendingSearchKeyOrder() {
    let store = open_store();
    store
        .add_translations(&[
            record(5, "make", "en"),
            record(1, "Dog", "en"),
            record(3, "door", "en"),
            record(2, "duck", "en"),
        ])
        .await
        .unwrap();

    let results = store.search("en", "").await.unwrap();
    assert_eq!(surfaces(&results), vec!["Dog", "door", "duck", "make"]);
}

#[tokio::test]
async fn test_addTranslations_withSameId_shouldUpsertLastWriteWins() {
    let store = open_store();
    store
        .add_translations(&[record(1, "dog", "en")])
        .await
        .unwrap();
    store
        .add_translations(&[TranslationRecord::new(
            1,
            "hound",
            "en",
            vec![TranslationVariant::new("de", "Hund")],
        )])
        .await
        .unwrap();

    assert_eq!(store.count().await.unwrap(), 1);

    let results = store.search("en", "h").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].surface, "hound");
    assert_eq!(results[0].translations.len(), 1);

    // The stale key range must not match anymore
    assert!(store.search("en", "d").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_addTranslations_writingSameSurfaceTwiceWithDifferentCase_shouldYieldSameKey() {
    let store = open_store();
    store
        .add_translations(&[record(1, "Dog", "en")])
        .await
        .unwrap();
    store
        .add_translations(&[record(1, "dOG", "en")])
        .await
        .unwrap();

    // Both writes derive 'en:dog'; either way the record is found under it
    let results = store.search("en", "dog").await.unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_addTranslations_withFailingRecordMidBatch_shouldApplyNothing() {
    let store = open_store();

    let batch = vec![
        record(1, "dog", "en"),
        record(2, "duck", "en"),
        record(3, "tree", "en"),
        record(4, "bad", "e:n"),
        record(5, "make", "en"),
    ];

    let result = store.add_translations(&batch).await;
    assert!(matches!(result, Err(StoreError::Write(_))));
    assert_eq!(store.count().await.unwrap(), 0);

    // The whole batch may be retried once fixed; upserts make that idempotent
    let fixed: Vec<_> = batch
        .iter()
        .cloned()
        .map(|mut r| {
            if r.lang == "e:n" {
                r.lang = "en".to_string();
            }
            r
        })
        .collect();
    store.add_translations(&fixed).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_addTranslations_withEmptyBatch_shouldCommitNothing() {
    let store = open_store();
    store.add_translations(&[]).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_clear_shouldEmptyEveryLanguage() {
    let store = open_store();
    store
        .add_translations(&[
            record(1, "dog", "en"),
            record(2, "makan", "ind"),
            record(3, "Baum", "de"),
        ])
        .await
        .unwrap();

    store.clear().await.unwrap();

    for lang in ["en", "ind", "de"] {
        assert!(store.search(lang, "").await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_forEachMatch_shouldStreamEachRecordOnce() {
    let store = open_store();
    store
        .add_translations(&[record(1, "dog", "en"), record(2, "door", "en")])
        .await
        .unwrap();

    let (tx, rx) = std::sync::mpsc::channel();
    store
        .for_each_match("en", "do", move |record| {
            tx.send(record.id).unwrap();
        })
        .await
        .unwrap();

    let ids: Vec<i64> = rx.into_iter().collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_openInMemory_withZeroSchemaVersion_shouldFailWithOpenError() {
    let result = TranslationStore::open_in_memory(0);
    assert!(matches!(result, Err(StoreError::Open(_))));
}

#[tokio::test]
async fn test_concurrentSearches_shouldBothComplete() {
    let store = open_store();
    store
        .add_translations(&[record(1, "dog", "en"), record(2, "duck", "en")])
        .await
        .unwrap();

    // Re-issuing a query while another is in flight is legal; the streams
    // are independent
    let (a, b) = tokio::join!(store.search("en", "d"), store.search("en", "du"));
    assert_eq!(a.unwrap().len(), 2);
    assert_eq!(b.unwrap().len(), 1);
}

#[tokio::test]
async fn test_stats_shouldCountRecordsAndLanguages() {
    let store = open_store();
    store
        .add_translations(&[
            record(1, "dog", "en"),
            record(2, "duck", "en"),
            record(3, "makan", "ind"),
        ])
        .await
        .unwrap();

    let stats = store.stats().unwrap();
    assert_eq!(stats.record_count, 3);
    assert_eq!(stats.language_count, 2);
    assert_eq!(stats.schema_version, SCHEMA_VERSION);
}
