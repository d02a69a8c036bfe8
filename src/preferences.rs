//! Persisted preference store: JSON values keyed by name, backed by the
//! `user_preferences` table.
//!
//! The in-memory map is authoritative for the lifetime of the process. Reads
//! never touch the database. Writes update memory first and then persist;
//! a failed persist is logged and swallowed, so callers never see storage
//! errors and the UI keeps working on a read-only or vanished database.
use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::storage::Database;
use crate::view::ViewMode;

/// Storage keys. Renaming one orphans existing user data.
pub mod keys {
    pub const FAVORITES: &str = "favorites";
    pub const DISMISSED: &str = "dismissed";
    pub const THEME: &str = "theme";
    pub const VIEW_MODE: &str = "view_mode";

    pub const ALL: [&str; 4] = [FAVORITES, DISMISSED, THEME, VIEW_MODE];
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Failed to encode preference '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to persist preference '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

// ============================================================================
// PreferenceStore
// ============================================================================

/// Typed key-value store over raw JSON text.
///
/// Config values act as defaults for `theme` and `view_mode`; stored values
/// win once the user has changed them at runtime.
pub struct PreferenceStore {
    db: Option<Database>,
    raw: HashMap<String, String>,
    default_theme: String,
    default_view_mode: ViewMode,
    persist_view_mode: bool,
}

impl PreferenceStore {
    /// Load every stored preference into memory.
    pub async fn load(config: &Config, db: &Database) -> Result<Self> {
        let rows = db.get_preferences_by_prefix("").await?;
        let mut store = Self::from_config(config);
        store.db = Some(db.clone());
        for row in rows {
            store.raw.insert(row.key, row.value);
        }
        tracing::debug!(keys = store.raw.len(), "Loaded preferences");
        Ok(store)
    }

    /// Memory-only store seeded from config. Fallback when the database
    /// cannot be read; writes are kept for the session but never persisted.
    pub fn from_config(config: &Config) -> Self {
        Self {
            db: None,
            raw: HashMap::new(),
            default_theme: config.theme.clone(),
            default_view_mode: config.default_view_mode,
            persist_view_mode: config.persist_view_mode,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.db.is_some()
    }

    // ========================================================================
    // Generic JSON Access
    // ========================================================================

    /// Raw JSON text for a key.
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.raw.get(key).map(String::as_str)
    }

    /// Decode the value under `key`, or return `default` if it is missing
    /// or malformed.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(text) = self.raw.get(key) else {
            return default;
        };
        match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Malformed stored preference, using default");
                default
            }
        }
    }

    /// Store `value` under `key`. The new value is visible immediately;
    /// persisting is best-effort.
    pub async fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        if let Err(e) = self.try_set(key, value).await {
            tracing::warn!(error = %e, "Preference write failed, keeping in-memory value");
        }
    }

    /// Like [`set`](Self::set) but reports failures. Memory is updated even
    /// when persisting fails.
    pub async fn try_set<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), PreferenceError> {
        let text = serde_json::to_string(value).map_err(|source| PreferenceError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.raw.insert(key.to_string(), text.clone());

        if let Some(db) = &self.db {
            db.set_preference(key, &text)
                .await
                .map_err(|source| PreferenceError::Storage {
                    key: key.to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Remove every known key from memory and storage. Returns how many
    /// stored rows were deleted.
    pub async fn reset(&mut self) -> Result<usize> {
        self.raw.clear();
        let mut deleted = 0;
        if let Some(db) = &self.db {
            for key in keys::ALL {
                if db.delete_preference(key).await? {
                    deleted += 1;
                }
            }
        }
        tracing::info!(deleted, "Preferences reset");
        Ok(deleted)
    }

    // ========================================================================
    // Type-safe Accessors
    // ========================================================================

    /// Favorite entry ids in insertion order. May contain stale ids.
    pub fn favorites(&self) -> Vec<String> {
        self.get(keys::FAVORITES, Vec::new())
    }

    pub async fn set_favorites(&mut self, ids: &[String]) {
        self.set(keys::FAVORITES, ids).await;
    }

    /// The dismiss registry: entry ids whose detail modal is skipped.
    pub fn dismissed(&self) -> BTreeMap<String, bool> {
        self.get(keys::DISMISSED, BTreeMap::new())
    }

    pub fn is_dismissed(&self, id: &str) -> bool {
        self.dismissed().get(id).copied().unwrap_or(false)
    }

    /// Record `id` as dismissed. Other registry entries are untouched.
    pub async fn dismiss(&mut self, id: &str) -> Result<(), PreferenceError> {
        let mut registry = self.dismissed();
        registry.insert(id.to_string(), true);
        self.try_set(keys::DISMISSED, &registry).await
    }

    /// Theme variant name, stored value first, then the config default.
    pub fn theme(&self) -> String {
        self.get(keys::THEME, self.default_theme.clone())
    }

    pub async fn set_theme(&mut self, name: &str) {
        self.set(keys::THEME, name).await;
    }

    /// Startup view mode. The stored value only counts when view mode
    /// persistence is enabled.
    pub fn view_mode(&self) -> ViewMode {
        if self.persist_view_mode {
            self.get(keys::VIEW_MODE, self.default_view_mode)
        } else {
            self.default_view_mode
        }
    }

    pub async fn set_view_mode(&mut self, mode: ViewMode) {
        if self.persist_view_mode {
            self.set(keys::VIEW_MODE, &mode).await;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
