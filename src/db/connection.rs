/// Database connection management with connection pooling
///
/// Provides a thread-safe connection pool to the SQLite scope cache.

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Maximum number of database connections in the pool
const MAX_CONNECTIONS: u32 = 5;

const SCHEMA: &str = include_str!("schema.sql");

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

impl Database {
    /// Create a new database instance
    ///
    /// Creates the file and its parent directory if missing, then ensures the
    /// schema exists. Calling this repeatedly on the same path is harmless.
    ///
    /// # Examples
    /// ```no_run
    /// use commit_scopes_lib::db::Database;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let db = Database::new("/tmp/scopes.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete)
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let db = Self {
            pool: Arc::new(pool),
            db_path,
        };

        db.initialize_schema().await?;

        Ok(db)
    }

    /// Create a test database in memory
    ///
    /// Each in-memory connection is its own database, so the pool is pinned
    /// to a single connection.
    #[cfg(test)]
    pub async fn new_test() -> Result<Self> {
        use std::str::FromStr;

        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self {
            pool: Arc::new(pool),
            db_path: PathBuf::from(":memory:"),
        };

        db.initialize_schema().await?;

        Ok(db)
    }

    /// Creates the scopes table if it doesn't exist
    async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(self.pool.as_ref()).await?;
        Ok(())
    }

    /// Get reference to the connection pool
    ///
    /// Used internally by query modules.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// False once the pool was closed or the backing file disappeared
    pub fn is_usable(&self) -> bool {
        if self.pool.is_closed() {
            return false;
        }
        self.db_path == Path::new(":memory:") || self.db_path.exists()
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Get database statistics
    pub async fn stats(&self) -> Result<DatabaseStats> {
        let scope_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM scopes")
            .fetch_one(self.pool.as_ref())
            .await?;

        let project_count: (i64,) = sqlx::query_as("SELECT COUNT(DISTINCT project) FROM scopes")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(DatabaseStats {
            total_scopes: scope_count.0,
            total_projects: project_count.0,
            pool_size: self.pool.size(),
            idle_connections: self.pool.num_idle(),
        })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    pub total_scopes: i64,
    pub total_projects: i64,
    pub pool_size: u32,
    pub idle_connections: usize,
}
