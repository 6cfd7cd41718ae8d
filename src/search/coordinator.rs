/*!
 * Query coordination for interactive lookups.
 *
 * A user typing re-issues the same search over and over; only the newest
 * query's results are worth showing. The coordinator debounces submissions
 * and attaches a sequence ticket to each one, so results belonging to a
 * superseded query are dropped instead of reaching the caller. The store
 * itself stays oblivious: in-flight streams are independent and are never
 * cancelled, only discarded here.
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::errors::StoreError;
use crate::store::{TranslationRecord, TranslationStore};

/// Debounced, latest-request-wins front end over the store's prefix search
#[derive(Clone)]
pub struct SearchCoordinator {
    /// Store handle queries run against
    store: TranslationStore,
    /// How long a submission waits for the input to settle
    debounce: Duration,
    /// Ticket counter; only the holder of the newest ticket may deliver
    seq: Arc<AtomicU64>,
}

impl SearchCoordinator {
    /// Create a coordinator with the given debounce window
    pub fn new(store: TranslationStore, debounce: Duration) -> Self {
        Self {
            store,
            debounce,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Submit a query. Returns `Ok(None)` if a newer submission superseded
    /// this one while it was debouncing or scanning, `Ok(Some(results))`
    /// otherwise. Store failures propagate unchanged.
    pub async fn submit(
        &self,
        lang: &str,
        prefix: &str,
    ) -> Result<Option<Vec<TranslationRecord>>, StoreError> {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }

        if self.seq.load(Ordering::SeqCst) != ticket {
            debug!("Query '{}':'{}' superseded while debouncing", lang, prefix);
            return Ok(None);
        }

        let results = self.store.search(lang, prefix).await?;

        // The input may have moved on while the scan ran
        if self.seq.load(Ordering::SeqCst) != ticket {
            debug!("Query '{}':'{}' superseded during scan", lang, prefix);
            return Ok(None);
        }

        Ok(Some(results))
    }

    /// Ticket of the newest submission so far
    pub fn current_ticket(&self) -> u64 {
        self.seq.load(Ordering::SeqCst)
    }
}
