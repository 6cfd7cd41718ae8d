/*!
 * Unit tests for debounced, latest-request-wins query coordination.
 */

use std::time::Duration;

use lexstore::SearchCoordinator;

use crate::common::{init_logging, open_store, record, surfaces};

#[tokio::test]
async fn test_submit_shouldDeliverStoreResults() {
    init_logging();
    let store = open_store();
    store
        .add_translations(&[record(1, "dog", "en"), record(2, "duck", "en")])
        .await
        .unwrap();

    let coordinator = SearchCoordinator::new(store, Duration::ZERO);

    let results = coordinator.submit("en", "d").await.unwrap();
    let results = results.expect("Uncontested query must deliver");
    assert_eq!(surfaces(&results), vec!["dog", "duck"]);
}

#[tokio::test]
async fn test_submit_rapidSequence_shouldOnlyDeliverNewest() {
    let store = open_store();
    store
        .add_translations(&[record(1, "dog", "en"), record(2, "duck", "en")])
        .await
        .unwrap();

    let coordinator = SearchCoordinator::new(store, Duration::from_millis(40));

    // Simulate a user typing 'd', then 'du' before the debounce expires
    let first = coordinator.clone();
    let first_task = tokio::spawn(async move { first.submit("en", "d").await });
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = coordinator.submit("en", "du").await.unwrap();

    assert_eq!(first_task.await.unwrap().unwrap(), None);
    let second = second.expect("Newest query must deliver");
    assert_eq!(surfaces(&second), vec!["duck"]);
}

#[tokio::test]
async fn test_submit_afterPreviousCompleted_shouldDeliverAgain() {
    let store = open_store();
    store
        .add_translations(&[record(1, "dog", "en")])
        .await
        .unwrap();

    let coordinator = SearchCoordinator::new(store, Duration::ZERO);

    assert!(coordinator.submit("en", "d").await.unwrap().is_some());
    assert!(coordinator.submit("en", "do").await.unwrap().is_some());
    assert_eq!(coordinator.current_ticket(), 2);
}
