/*!
 * Store schema definitions and version management.
 *
 * The schema upgrade is deliberately destructive: bumping the requested
 * version drops the translations table and recreates it empty, exactly like
 * recreating an object store during a version change. This is not a
 * migration path - callers must not rely on upgrade-time data preservation.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize or upgrade the store schema to the requested version.
///
/// Runs once per open, before the handle is handed out. A fresh database
/// gets the full structure; a database behind the requested version is
/// dropped and recreated empty; a database ahead of the requested version
/// refuses to open (downgrades are not supported). Any failure here fails
/// the whole open - no partial schema state is considered valid.
pub fn initialize_schema(conn: &Connection, requested_version: i32) -> Result<()> {
    if requested_version < 1 {
        anyhow::bail!("Schema version must be at least 1, got {}", requested_version);
    }

    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        // Fresh database - create the full structure
        info!("Initializing store schema v{}", requested_version);

        // WAL mode for better concurrency and crash recovery; must run
        // outside the structure transaction (no-op in memory)
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let tx = conn.unchecked_transaction()?;
        create_store(&tx)?;
        set_schema_version(&tx, requested_version)?;
        tx.commit()?;
    } else if current_version < requested_version {
        // Destructive upgrade: drop and recreate empty, in one transaction
        // with the version bump
        info!(
            "Upgrading store schema from v{} to v{} (existing records are dropped)",
            current_version, requested_version
        );

        let tx = conn.unchecked_transaction()?;
        recreate_store(&tx)?;
        set_schema_version(&tx, requested_version)?;
        tx.commit()?;
    } else if current_version > requested_version {
        anyhow::bail!(
            "Store is at schema version {} but version {} was requested; downgrade is not supported",
            current_version,
            requested_version
        );
    } else {
        // Open only attaches to existing structure and must not alter it
        debug!("Store schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database (0 = fresh database)
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='store_meta'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check store_meta table existence")?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM store_meta LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO store_meta (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Create the full store structure on a fresh database
fn create_store(conn: &Connection) -> Result<()> {
    // Version tracking table
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS store_meta (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    create_translations_table(conn)?;

    info!("Store schema created successfully");
    Ok(())
}

/// Create the translations table and its non-unique search-key index
fn create_translations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS translations (
            id INTEGER PRIMARY KEY,
            surface TEXT NOT NULL,
            lang TEXT NOT NULL,
            search_key TEXT NOT NULL,
            variants TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_translations_search_key ON translations(search_key);
        "#,
    )?;
    Ok(())
}

/// Drop and recreate the translations table (and transitively its index)
fn recreate_store(conn: &Connection) -> Result<()> {
    conn.execute_batch("DROP TABLE IF EXISTS translations;")?;
    create_translations_table(conn)?;
    Ok(())
}
