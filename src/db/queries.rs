/// SQL query functions for database operations
///
/// All queries use sqlx with bound parameters.

use crate::db::models::*;
use crate::db::Database;
use crate::error::Result;

impl Database {
    /// Remember a scope for a project
    ///
    /// Inserting an existing pair is a no-op, not an error.
    ///
    /// # Returns
    /// * `Ok(true)` - The pair was new
    /// * `Ok(false)` - The pair was already stored
    pub async fn save_scope(&self, project: &str, scope: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO scopes (project, scope)
            VALUES (?, ?)
            ON CONFLICT(project, scope) DO NOTHING
            "#,
        )
        .bind(project)
        .bind(scope)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All scopes saved for a project, ascending
    pub async fn scopes_for_project(&self, project: &str) -> Result<Vec<String>> {
        let scopes = sqlx::query_scalar::<_, String>(
            "SELECT scope FROM scopes WHERE project = ? ORDER BY scope ASC",
        )
        .bind(project)
        .fetch_all(self.pool())
        .await?;

        Ok(scopes)
    }

    /// Every stored pair, ordered by project then scope
    pub async fn all_scopes(&self) -> Result<Vec<ScopeRecord>> {
        let records = sqlx::query_as::<_, ScopeRecord>(
            "SELECT project, scope FROM scopes ORDER BY project ASC, scope ASC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(records)
    }

    /// Projects that have at least one scope
    pub async fn projects(&self) -> Result<Vec<String>> {
        let projects = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT project FROM scopes ORDER BY project ASC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(projects)
    }
}
