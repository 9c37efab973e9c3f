/// Lazily opened, project-partitioned scope cache
///
/// Wraps [`Database`] behind an async mutex. The handle is opened on first
/// use and re-opened whenever the pool was closed or the backing file went
/// away, so a long-lived process survives the cache being deleted.

use crate::db::Database;
use crate::error::{Result, ScopeError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub struct ScopeStore {
    path: PathBuf,
    handle: Mutex<Option<Database>>,
    warned: AtomicBool,
}

impl ScopeStore {
    /// Create a store for `path`. Nothing is touched on disk until first use.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            handle: Mutex::new(None),
            warned: AtomicBool::new(false),
        }
    }

    /// Wrap an already-open database
    pub fn with_database(db: Database) -> Self {
        Self {
            path: db.path().to_path_buf(),
            handle: Mutex::new(Some(db)),
            warned: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open (or re-open) the backing database
    ///
    /// Idempotent: returns the live handle when there is one.
    pub async fn open(&self) -> Result<Database> {
        let mut guard = self.handle.lock().await;
        self.ensure_open(&mut guard).await
    }

    async fn ensure_open(&self, slot: &mut Option<Database>) -> Result<Database> {
        if let Some(db) = slot.as_ref() {
            if db.is_usable() {
                return Ok(db.clone());
            }
            debug!(path = %self.path.display(), "scope cache handle invalid, reopening");
            db.close().await;
        }

        let db = Database::new(&self.path)
            .await
            .map_err(|e| ScopeError::StorageUnavailable {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        debug!(path = %self.path.display(), "opened scope cache");

        *slot = Some(db.clone());
        Ok(db)
    }

    /// Scopes for `project`, ascending, failing if the store is unavailable
    pub async fn try_scopes_for_project(&self, project: &str) -> Result<Vec<String>> {
        let db = self.open().await?;
        db.scopes_for_project(project)
            .await
            .map_err(|e| ScopeError::StorageUnavailable {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }

    /// Scopes for `project`, ascending; empty when the store is unavailable
    pub async fn scopes_for_project(&self, project: &str) -> Vec<String> {
        match self.try_scopes_for_project(project).await {
            Ok(scopes) => scopes,
            Err(e) => {
                self.warn_once(&e);
                Vec::new()
            }
        }
    }

    /// Remember `scope` for `project`. Saving a known pair is a no-op.
    pub async fn save_scope(&self, project: &str, scope: &str) -> Result<()> {
        // Held across the insert so racing sessions serialize writes
        let mut guard = self.handle.lock().await;
        let db = self.ensure_open(&mut guard).await?;
        let inserted = db
            .save_scope(project, scope)
            .await
            .map_err(|e| ScopeError::StorageWrite(e.to_string()))?;

        if inserted {
            debug!(project, scope, "remembered new scope");
        }
        Ok(())
    }

    /// Log a storage failure at warn level, once per store
    pub fn warn_once(&self, err: &ScopeError) {
        if !self.warned.swap(true, Ordering::Relaxed) {
            warn!("{}", err.user_message());
        } else {
            debug!(error = %err, "scope cache still unavailable");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> ScopeStore {
        ScopeStore::new(temp.path().join("scopes.db"))
    }

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let first = store.open().await.unwrap();
        let second = store.open().await.unwrap();

        assert_eq!(first.path(), second.path());
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_save_twice_same_as_once() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        store.save_scope("widget", "cache").await.unwrap();
        let once = store.scopes_for_project("widget").await;
        store.save_scope("widget", "cache").await.unwrap();
        let twice = store.scopes_for_project("widget").await;

        assert_eq!(once, twice);
        assert_eq!(twice, vec!["cache"]);
    }

    #[tokio::test]
    async fn test_ordering_and_partition() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        for scope in ["ui", "core", "net"] {
            store.save_scope("alpha", scope).await.unwrap();
        }
        store.save_scope("beta", "docs").await.unwrap();

        assert_eq!(store.scopes_for_project("alpha").await, vec!["core", "net", "ui"]);
        assert_eq!(store.scopes_for_project("beta").await, vec!["docs"]);
    }

    #[tokio::test]
    async fn test_persists_across_stores() {
        let temp = TempDir::new().unwrap();

        store_in(&temp).save_scope("widget", "cache").await.unwrap();

        let reopened = store_in(&temp);
        assert_eq!(reopened.scopes_for_project("widget").await, vec!["cache"]);
    }

    #[tokio::test]
    async fn test_reopens_when_file_removed() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        store.save_scope("widget", "old").await.unwrap();
        fs::remove_file(store.path()).unwrap();

        store.save_scope("widget", "new").await.unwrap();

        assert!(store.path().exists());
        assert_eq!(store.scopes_for_project("widget").await, vec!["new"]);
    }

    #[tokio::test]
    async fn test_unavailable_store_degrades() {
        let temp = TempDir::new().unwrap();
        // A regular file where a directory is needed
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let store = ScopeStore::new(blocker.join("scopes.db"));

        assert!(matches!(
            store.open().await,
            Err(ScopeError::StorageUnavailable { .. })
        ));
        assert!(store.scopes_for_project("widget").await.is_empty());
        assert!(store.save_scope("widget", "cache").await.unwrap_err().is_storage());
    }

    #[tokio::test]
    async fn test_save_failure_after_open() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let db = store.open().await.unwrap();
        sqlx::query(
            "CREATE TRIGGER reject_scopes BEFORE INSERT ON scopes \
             BEGIN SELECT RAISE(ABORT, 'disk full'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let result = store.save_scope("widget", "cache").await;
        assert!(matches!(result, Err(ScopeError::StorageWrite(_))));
        // Reads still work against the same handle
        assert!(store.try_scopes_for_project("widget").await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_serialize() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(store_in(&temp));

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                let scope = if i % 2 == 0 { "cache" } else { "api" };
                tokio::spawn(async move { store.save_scope("widget", scope).await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert_eq!(store.scopes_for_project("widget").await, vec!["api", "cache"]);
        assert_eq!(store.open().await.unwrap().stats().await.unwrap().total_scopes, 2);
    }

    #[tokio::test]
    async fn test_with_database() {
        let db = Database::new_test().await.unwrap();
        db.save_scope("widget", "cache").await.unwrap();

        let store = ScopeStore::with_database(db);
        assert_eq!(store.scopes_for_project("widget").await, vec!["cache"]);
    }
}
