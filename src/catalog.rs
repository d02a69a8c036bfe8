//! The application catalog: an immutable list of launchable web applications.
//!
//! A built-in catalog ships with the binary. Users can replace it with a
//! `catalog.toml` in the config directory:
//!
//! ```toml
//! [[app]]
//! id = "github"
//! title = "GitHub"
//! description = "Where the world builds software."
//! long_description = "GitHub is a provider of Internet hosting ..."
//! icon = "GH"
//! url = "https://www.github.com"
//! ```
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

use crate::util::{strip_control_chars, validate_destination, UrlValidationError};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in catalog file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Catalog file too large: {0}")]
    TooLarge(String),

    #[error("Duplicate catalog id '{0}'")]
    DuplicateId(String),

    #[error("Catalog entry #{index} is missing a {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("Catalog entry '{id}' has an invalid url: {source}")]
    InvalidUrl {
        id: String,
        #[source]
        source: UrlValidationError,
    },
}

// ============================================================================
// Catalog Entry
// ============================================================================

/// One launchable application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Unique, stable identifier. Used as the key in favorites and the
    /// dismiss registry, so renaming an id orphans stored preferences.
    pub id: String,
    pub title: String,
    /// One-line summary shown on cards and matched by search.
    pub short_description: String,
    /// Longer text shown in the detail modal.
    pub long_description: String,
    /// Short glyph drawn as the card badge.
    pub icon: String,
    pub destination: Url,
}

/// On-disk shape of a catalog entry.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    long_description: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    app: Vec<RawEntry>,
}

// ============================================================================
// Catalog
// ============================================================================

/// Immutable, ordered list of catalog entries.
///
/// Cheap to clone: entries live behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Arc<Vec<CatalogEntry>>,
}

impl Catalog {
    /// Maximum catalog file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Build a catalog, rejecting duplicate ids.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self {
            entries: Arc::new(entries),
        })
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .filter_map(|b| {
                let destination = match Url::parse(b.url) {
                    Ok(url) => url,
                    Err(e) => {
                        tracing::error!(id = b.id, error = %e, "Built-in catalog url does not parse");
                        return None;
                    }
                };
                Some(CatalogEntry {
                    id: b.id.to_string(),
                    title: b.title.to_string(),
                    short_description: b.description.to_string(),
                    long_description: b.long_description.to_string(),
                    icon: b.icon.to_string(),
                    destination,
                })
            })
            .collect();
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Load a catalog from a TOML file.
    ///
    /// - Missing file → `Ok(None)` so the caller can fall back to the builtin
    /// - Invalid TOML → `Err(CatalogError::Parse)`
    /// - Missing id/title/url, bad url, duplicate id → descriptive error
    pub fn load(path: &Path) -> Result<Option<Self>, CatalogError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(CatalogError::TooLarge(format!(
                    "Catalog file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No catalog file found");
                return Ok(None);
            }
            Err(e) => return Err(CatalogError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), entries = catalog.len(), "Loaded catalog");
        Ok(Some(catalog))
    }

    /// Parse catalog TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = toml::from_str(content)?;
        let mut entries = Vec::with_capacity(raw.app.len());

        for (index, r) in raw.app.into_iter().enumerate() {
            let id = r.id.trim().to_string();
            if id.is_empty() {
                return Err(CatalogError::MissingField { index, field: "id" });
            }
            let title = strip_control_chars(r.title.trim()).into_owned();
            if title.is_empty() {
                return Err(CatalogError::MissingField {
                    index,
                    field: "title",
                });
            }
            if r.url.trim().is_empty() {
                return Err(CatalogError::MissingField { index, field: "url" });
            }
            let destination = validate_destination(&r.url).map_err(|source| {
                CatalogError::InvalidUrl {
                    id: id.clone(),
                    source,
                }
            })?;

            let icon = match strip_control_chars(r.icon.trim()) {
                s if s.is_empty() => title.chars().next().map(String::from).unwrap_or_default(),
                s => s.into_owned(),
            };

            entries.push(CatalogEntry {
                id,
                title,
                short_description: strip_control_chars(r.description.trim()).into_owned(),
                long_description: strip_control_chars(r.long_description.trim()).into_owned(),
                icon,
                destination,
            });
        }

        if entries.is_empty() {
            tracing::warn!("Catalog file contains no [[app]] entries");
        }

        Self::new(entries)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Look up an entry by id.
    pub fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.find(id).is_some()
    }
}

// ============================================================================
// Built-in Catalog
// ============================================================================

struct BuiltinEntry {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    long_description: &'static str,
    icon: &'static str,
    url: &'static str,
}

const BUILTIN: [BuiltinEntry; 4] = [
    BuiltinEntry {
        id: "google-search",
        title: "Google Search",
        description: "The world's most popular search engine.",
        long_description: "Access the full power of Google Search to find information, images, videos, and more. Google's mission is to organize the world's information and make it universally accessible and useful.",
        icon: "G",
        url: "https://www.google.com",
    },
    BuiltinEntry {
        id: "microsoft-bing",
        title: "Microsoft Bing",
        description: "Discover a new way to search.",
        long_description: "Microsoft Bing helps you turn information into action, making it faster and easier to go from searching to doing. It integrates AI-powered features for a more comprehensive search experience.",
        icon: "B",
        url: "https://www.bing.com",
    },
    BuiltinEntry {
        id: "wikipedia",
        title: "Wikipedia",
        description: "The free encyclopedia.",
        long_description: "Wikipedia is a multilingual free online encyclopedia written and maintained by a community of volunteers through open collaboration and a wiki-based editing system. It is the largest and most-read reference work in history.",
        icon: "W",
        url: "https://www.wikipedia.org",
    },
    BuiltinEntry {
        id: "github",
        title: "GitHub",
        description: "Where the world builds software.",
        long_description: "GitHub is a provider of Internet hosting for software development and version control using Git. It offers the distributed version control and source code management functionality of Git, plus its own features.",
        icon: "GH",
        url: "https://www.github.com",
    },
];

// ============================================================================
// Tests
// ============================================================================
