/*!
 * Store connection management.
 *
 * This module handles SQLite database connection creation, schema
 * initialization, and provides async-safe access patterns using tokio's
 * spawn_blocking. The connection mutex is what gives the store its
 * single-writer-at-a-time model: batches against the same store never
 * interleave at the individual-record level.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::schema;

/// Default store directory name under the user's data directory
const DEFAULT_STORE_DIRNAME: &str = "lexstore";

/// Database connection wrapper with thread-safe access
#[derive(Clone)]
pub struct StoreConnection {
    /// Path to the database file
    db_path: PathBuf,
    /// Thread-safe connection wrapped in Arc<Mutex>
    connection: Arc<Mutex<Connection>>,
}

impl StoreConnection {
    /// Open (or create) a store database at the specified path and bring its
    /// schema to the requested version
    pub fn new<P: AsRef<Path>>(db_path: P, schema_version: i32) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory: {:?}", parent))?;
        }

        info!("Opening translation store at: {:?}", db_path);

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open store database: {:?}", db_path))?;

        // Initialize schema; a failure here fails the whole open
        schema::initialize_schema(&conn, schema_version)?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory store (for testing)
    pub fn new_in_memory(schema_version: i32) -> Result<Self> {
        debug!("Creating in-memory translation store");

        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;

        schema::initialize_schema(&conn, schema_version)?;

        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Resolve the database path for a named store under the user's data
    /// directory (the on-disk analogue of a browser-local database name)
    pub fn default_store_path(store_name: &str) -> Result<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        let db_dir = base_dir.join(DEFAULT_STORE_DIRNAME);
        let db_path = db_dir.join(format!("{}.db", store_name));

        Ok(db_path)
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Execute a database operation with the connection
    ///
    /// This method acquires the mutex lock and executes the provided closure
    /// with access to the connection. For async contexts, use `execute_async`.
    pub fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .connection
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to acquire store lock: {}", e))?;

        f(&conn)
    }

    /// Execute a database operation asynchronously using spawn_blocking
    ///
    /// This is the preferred method for async contexts as it prevents
    /// blocking the async runtime.
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.connection.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| anyhow::anyhow!("Failed to acquire store lock: {}", e))?;

            f(&conn)
        })
        .await
        .context("Store task panicked")?
    }

    /// Begin a transaction and execute operations within it
    ///
    /// The transaction commits only if the closure returns Ok; any error
    /// rolls back every statement issued inside it.
    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&rusqlite::Transaction) -> Result<T>,
    {
        let mut conn = self
            .connection
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to acquire store lock: {}", e))?;

        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;

        Ok(result)
    }

    /// Begin an async transaction and execute operations within it
    pub async fn transaction_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&rusqlite::Transaction) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.connection.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|e| anyhow::anyhow!("Failed to acquire store lock: {}", e))?;

            let tx = conn.transaction()?;
            let result = f(&tx)?;
            tx.commit()?;

            Ok(result)
        })
        .await
        .context("Store transaction task panicked")?
    }

    /// Get store statistics
    pub fn stats(&self) -> Result<StoreStats> {
        self.execute(|conn| {
            let record_count: i64 = conn
                .query_row("SELECT COUNT(*) FROM translations", [], |row| row.get(0))
                .unwrap_or(0);

            let language_count: i64 = conn
                .query_row("SELECT COUNT(DISTINCT lang) FROM translations", [], |row| {
                    row.get(0)
                })
                .unwrap_or(0);

            let schema_version = schema::get_schema_version(conn)?;

            // Get file size if not in-memory
            let file_size = if self.db_path.to_string_lossy() != ":memory:" {
                std::fs::metadata(&self.db_path)
                    .map(|m| m.len())
                    .unwrap_or(0)
            } else {
                0
            };

            Ok(StoreStats {
                record_count,
                language_count,
                schema_version,
                file_size_bytes: file_size,
            })
        })
    }
}

/// Store statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    /// Number of translation records
    pub record_count: i64,
    /// Number of distinct source languages
    pub language_count: i64,
    /// Current schema version
    pub schema_version: i32,
    /// Database file size in bytes
    pub file_size_bytes: u64,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Records: {}, Languages: {}, Schema: v{}, Size: {} KB",
            self.record_count,
            self.language_count,
            self.schema_version,
            self.file_size_bytes / 1024
        )
    }
}
