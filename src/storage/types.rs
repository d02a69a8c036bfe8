use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Another instance of the application has locked the database
    #[error("Another instance of problembuddy appears to be running. Please close it and try again.")]
    InstanceLocked,

    /// Migration failed
    #[error("Database migration failed: {0}")]
    Migration(String),

    /// Generic database error
    #[error("Database error: {0}")]
    Other(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Check if a sqlx error indicates database locking
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        let error_string = err.to_string().to_lowercase();

        // SQLITE_BUSY (5), SQLITE_LOCKED (6), SQLITE_CANTOPEN (14)
        if error_string.contains("database is locked")
            || error_string.contains("database table is locked")
            || error_string.contains("sqlite_busy")
            || error_string.contains("sqlite_locked")
            || error_string.contains("unable to open database file")
        {
            return DatabaseError::InstanceLocked;
        }

        DatabaseError::Other(err)
    }
}

// ============================================================================
// Rows
// ============================================================================

/// A raw preference row as stored on disk.
///
/// `value` is JSON text; decoding into a typed value happens in
/// [`crate::preferences::PreferenceStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceRow {
    pub key: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_closed_is_not_instance_locked() {
        let err = DatabaseError::from_sqlx(sqlx::Error::PoolClosed);
        assert!(matches!(err, DatabaseError::Other(_)));
    }

    #[test]
    fn test_instance_locked_message_names_the_binary() {
        let msg = DatabaseError::InstanceLocked.to_string();
        assert!(msg.contains("problembuddy"));
    }
}
