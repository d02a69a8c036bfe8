//! The favorites set: an ordered set of catalog ids mirrored to the
//! `favorites` preference key.
use std::collections::HashSet;

use crate::preferences::PreferenceStore;

#[derive(Debug, Clone, Default)]
pub struct Favorites {
    /// Insertion order, used for persistence.
    order: Vec<String>,
    members: HashSet<String>,
}

impl Favorites {
    /// Read the persisted set. Duplicate ids in storage collapse to one.
    pub fn load(store: &PreferenceStore) -> Self {
        let mut favorites = Self::default();
        for id in store.favorites() {
            if favorites.members.insert(id.clone()) {
                favorites.order.push(id);
            }
        }
        favorites
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Flip membership of `id` and persist. Returns the new membership.
    ///
    /// The in-memory set changes even if the write fails.
    pub async fn toggle(&mut self, store: &mut PreferenceStore, id: &str) -> bool {
        let now_favorite = if self.members.remove(id) {
            self.order.retain(|x| x != id);
            false
        } else {
            self.members.insert(id.to_string());
            self.order.push(id.to_string());
            true
        };
        tracing::debug!(id = %id, favorite = now_favorite, "Toggled favorite");
        store.set_favorites(&self.order).await;
        now_favorite
    }

    /// Ids in the order they were favorited. May include ids that are no
    /// longer in the catalog.
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
