/*!
 * The translation store itself.
 *
 * This layer provides the four boundary operations over the connection:
 * batched atomic upserts, incremental case-insensitive prefix search,
 * full-clear, and open/handle acquisition. SQL details stay in here;
 * callers only ever see records and typed errors.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{params, Connection, Row};
use std::path::Path;

use super::connection::{StoreConnection, StoreStats};
use super::models::{build_search_key, TranslationRecord};
use crate::errors::StoreError;
use crate::language_utils::validate_lang_tag;

/// Handle to an open translation store
#[derive(Clone)]
pub struct TranslationStore {
    /// Store connection
    db: StoreConnection,
}

impl TranslationStore {
    /// Wrap an already-open connection
    pub fn new(db: StoreConnection) -> Self {
        Self { db }
    }

    /// Open a named store under the platform data directory, bringing its
    /// schema to the requested version. Fails with `StoreError::Open` if the
    /// upgrade or handle acquisition fails; no partial state is valid and the
    /// store never retries on its own.
    pub async fn open(name: &str, schema_version: i32) -> Result<Self, StoreError> {
        let path = StoreConnection::default_store_path(name).map_err(StoreError::open)?;
        Self::open_at_path(path, schema_version).await
    }

    /// Open a store at an explicit database path
    pub async fn open_at_path<P: AsRef<Path>>(
        path: P,
        schema_version: i32,
    ) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let db = tokio::task::spawn_blocking(move || StoreConnection::new(path, schema_version))
            .await
            .map_err(|e| StoreError::open(format!("Open task panicked: {}", e)))?
            .map_err(StoreError::open)?;

        Ok(Self::new(db))
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory(schema_version: i32) -> Result<Self, StoreError> {
        let db = StoreConnection::new_in_memory(schema_version).map_err(StoreError::open)?;
        Ok(Self::new(db))
    }

    /// Upsert a batch of translation records in a single transaction.
    ///
    /// The search key of every record is recomputed from its current
    /// lang/surface; whatever the caller put in a record is never trusted.
    /// The batch is all-or-nothing: any failure rolls back every put already
    /// issued, and Ok is returned only after the whole batch has committed.
    pub async fn add_translations(&self, records: &[TranslationRecord]) -> Result<(), StoreError> {
        let records = records.to_vec();
        let count = records.len();

        self.db
            .transaction_async(move |tx| {
                let now = chrono::Utc::now().to_rfc3339();

                let mut stmt = tx.prepare(
                    r#"
                    INSERT INTO translations (id, surface, lang, search_key, variants, created_at, updated_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    ON CONFLICT(id) DO UPDATE SET
                        surface = excluded.surface,
                        lang = excluded.lang,
                        search_key = excluded.search_key,
                        variants = excluded.variants,
                        updated_at = excluded.updated_at
                    "#,
                )?;

                for record in &records {
                    validate_lang_tag(&record.lang)?;

                    let search_key = record.search_key();
                    let variants = serde_json::to_string(&record.translations)?;

                    stmt.execute(params![
                        record.id,
                        record.surface,
                        record.lang,
                        search_key,
                        variants,
                        now,
                        now,
                    ])?;
                }

                Ok(())
            })
            .await
            .map_err(StoreError::write)?;

        debug!("Committed batch of {} translation records", count);
        Ok(())
    }

    /// Stream all records whose lowercased surface starts with the given
    /// prefix, scoped to one source language, in ascending search-key order.
    ///
    /// The scan seeks the search-key index to the first entry >= the probe
    /// key and walks forward. The upper bound is open-ended, so each entry
    /// still gets an explicit prefix test; the first entry that fails it
    /// terminates the scan early, since the keys are sorted and no further
    /// match can follow. Reaching the end of the index just stops emission.
    ///
    /// Normal stream end is `Ok(())`. A scan failure surfaces as
    /// `StoreError::Query`, distinct from running out of matches.
    pub async fn for_each_match<F>(
        &self,
        lang: &str,
        prefix: &str,
        mut on_each: F,
    ) -> Result<(), StoreError>
    where
        F: FnMut(TranslationRecord) + Send + 'static,
    {
        let probe = build_search_key(lang, prefix);

        self.db
            .execute_async(move |conn| scan_matches(conn, &probe, &mut on_each))
            .await
            .map_err(StoreError::query)
    }

    /// Batched variant of the prefix search: collect every match and return
    /// them once the scan has finished
    pub async fn search(
        &self,
        lang: &str,
        prefix: &str,
    ) -> Result<Vec<TranslationRecord>, StoreError> {
        let probe = build_search_key(lang, prefix);

        self.db
            .execute_async(move |conn| {
                let mut results = Vec::new();
                scan_matches(conn, &probe, &mut |record| results.push(record))?;
                Ok(results)
            })
            .await
            .map_err(StoreError::query)
    }

    /// Wipe all records in one atomic operation. Ok only after the wipe has
    /// durably committed; no partial-clear state is observable.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.db
            .execute_async(|conn| {
                let removed = conn.execute("DELETE FROM translations", [])?;
                debug!("Cleared {} translation records", removed);
                Ok(())
            })
            .await
            .map_err(StoreError::write)
    }

    /// Number of records currently in the store
    pub async fn count(&self) -> Result<i64, StoreError> {
        self.db
            .execute_async(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM translations", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
            .map_err(StoreError::query)
    }

    /// Store statistics for diagnostics
    pub fn stats(&self) -> Result<StoreStats, StoreError> {
        self.db.stats().map_err(StoreError::query)
    }

    /// The underlying connection (for diagnostics and tests)
    pub fn connection(&self) -> &StoreConnection {
        &self.db
    }
}

/// Walk the search-key index from the probe's lower bound, feeding matching
/// records to the sink until the prefix test fails or the index is exhausted
fn scan_matches(
    conn: &Connection,
    probe: &str,
    on_each: &mut dyn FnMut(TranslationRecord),
) -> Result<()> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, surface, lang, search_key, variants, created_at, updated_at
        FROM translations
        WHERE search_key >= ?1
        ORDER BY search_key ASC
        "#,
    )?;

    let mut rows = stmt.query([probe])?;
    let mut emitted = 0usize;

    while let Some(row) = rows.next()? {
        let search_key: String = row.get(3)?;
        if !search_key.starts_with(probe) {
            // Keys are sorted; once one fails the prefix test, none after it can match
            break;
        }

        on_each(parse_record_row(row)?);
        emitted += 1;
    }

    debug!("Prefix scan for '{}' emitted {} records", probe, emitted);
    Ok(())
}

/// Map a translations row to a record, decoding the embedded variants column
fn parse_record_row(row: &Row<'_>) -> Result<TranslationRecord> {
    let variants_json: String = row.get(4)?;
    let translations = serde_json::from_str(&variants_json)?;

    Ok(TranslationRecord {
        id: row.get(0)?,
        surface: row.get(1)?,
        lang: row.get(2)?,
        translations,
        created_at: Some(row.get(5)?),
        updated_at: Some(row.get(6)?),
    })
}
