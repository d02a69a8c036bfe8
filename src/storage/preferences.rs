use anyhow::Result;

use super::schema::Database;
use super::types::PreferenceRow;

impl Database {
    // ========================================================================
    // User Preferences Operations
    // ========================================================================

    /// Get a single preference value by key.
    ///
    /// Values are stored as JSON text. Keys are flat namespaces such as
    /// `favorites`, `dismissed`, `theme` or `view_mode`.
    ///
    /// # Returns
    ///
    /// The raw JSON text if the key exists, or `None` if not set.
    pub async fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM user_preferences WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Set a preference value (UPSERT).
    ///
    /// Inserts the key-value pair if it doesn't exist, or updates the value and
    /// timestamp if the key already exists.
    pub async fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_preferences (key, value, updated_at)
            VALUES (?, ?, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a preference. Returns true if a row was deleted.
    pub async fn delete_preference(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_preferences WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get all preferences matching a key prefix, ordered by key.
    ///
    /// An empty prefix returns every stored preference.
    pub async fn get_preferences_by_prefix(&self, prefix: &str) -> Result<Vec<PreferenceRow>> {
        // Escape LIKE wildcards so "view_" only matches a literal underscore
        let escaped = prefix
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("{}%", escaped);
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT key, value FROM user_preferences WHERE key LIKE ? ESCAPE '\\' ORDER BY key",
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(key, value)| PreferenceRow { key, value })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Database;

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_get_preference_missing() {
        let db = test_db().await;
        let value = db.get_preference("nonexistent").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_and_get_preference() {
        let db = test_db().await;
        db.set_preference("theme", "\"dark\"").await.unwrap();

        let value = db.get_preference("theme").await.unwrap();
        assert_eq!(value, Some("\"dark\"".to_string()));
    }

    #[tokio::test]
    async fn test_set_preference_upsert() {
        let db = test_db().await;
        db.set_preference("favorites", "[\"github\"]").await.unwrap();
        db.set_preference("favorites", "[]").await.unwrap();

        let value = db.get_preference("favorites").await.unwrap();
        assert_eq!(value, Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_delete_preference() {
        let db = test_db().await;
        db.set_preference("view_mode", "\"list\"").await.unwrap();

        assert!(db.delete_preference("view_mode").await.unwrap());
        assert!(!db.delete_preference("view_mode").await.unwrap());
        assert_eq!(db.get_preference("view_mode").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_preferences_by_prefix() {
        let db = test_db().await;
        db.set_preference("theme", "\"dark\"").await.unwrap();
        db.set_preference("favorites", "[]").await.unwrap();
        db.set_preference("dismissed", "{}").await.unwrap();

        let all = db.get_preferences_by_prefix("").await.unwrap();
        let keys: Vec<&str> = all.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["dismissed", "favorites", "theme"]);
    }

    #[tokio::test]
    async fn test_get_preferences_by_prefix_underscore_is_literal() {
        let db = test_db().await;
        db.set_preference("view_mode", "\"grid\"").await.unwrap();
        db.set_preference("viewXmode", "\"list\"").await.unwrap();

        let rows = db.get_preferences_by_prefix("view_").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, "view_mode");
    }

    #[tokio::test]
    async fn test_set_preference_fails_after_close() {
        let db = test_db().await;
        db.close().await;
        assert!(db.set_preference("theme", "\"light\"").await.is_err());
    }
}
