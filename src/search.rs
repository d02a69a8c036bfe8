//! Memoized catalog search.
//!
//! Matching is a case-insensitive substring test against the title or the
//! short description. The filtered view is cached and recomputed only when
//! the effective query changes, so repeated renders are free.
use crate::catalog::{Catalog, CatalogEntry};

/// True if `entry` matches an already-lowercased needle.
pub fn matches(entry: &CatalogEntry, needle: &str) -> bool {
    needle.is_empty()
        || entry.title.to_lowercase().contains(needle)
        || entry.short_description.to_lowercase().contains(needle)
}

/// Filter entries by `query`, preserving catalog order.
///
/// An empty query yields every entry.
pub fn filter<'a>(entries: &'a [CatalogEntry], query: &str) -> Vec<&'a CatalogEntry> {
    let needle = query.to_lowercase();
    entries.iter().filter(|e| matches(e, &needle)).collect()
}

#[derive(Debug, Clone)]
pub struct SearchFilter {
    catalog: Catalog,
    query: String,
    /// Catalog indices of the current matches.
    matched: Vec<usize>,
    recomputes: u64,
}

impl SearchFilter {
    pub fn new(catalog: Catalog) -> Self {
        let matched = (0..catalog.len()).collect();
        Self {
            catalog,
            query: String::new(),
            matched,
            recomputes: 0,
        }
    }

    /// Make `query` the effective query.
    ///
    /// Returns true if the filtered view was recomputed; applying the query
    /// that is already in effect is a no-op.
    pub fn apply(&mut self, query: &str) -> bool {
        if query == self.query {
            return false;
        }
        let needle = query.to_lowercase();
        self.matched = self
            .catalog
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, e)| matches(e, &needle))
            .map(|(i, _)| i)
            .collect();
        self.query = query.to_string();
        self.recomputes += 1;
        tracing::debug!(query = %self.query, matches = self.matched.len(), "Search filter recomputed");
        true
    }

    /// The effective query.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.matched.iter().filter_map(|&i| self.catalog.get(i))
    }

    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// How many times the filtered view has been recomputed.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn result_ids(filter: &SearchFilter) -> Vec<&str> {
        filter.results().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let catalog = Catalog::builtin();
        assert_eq!(filter(catalog.entries(), "").len(), catalog.len());

        let f = SearchFilter::new(catalog);
        assert_eq!(
            result_ids(&f),
            vec!["google-search", "microsoft-bing", "wikipedia", "github"]
        );
        assert_eq!(f.recompute_count(), 0);
    }

    #[test]
    fn test_matches_title_case_insensitive() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = filter(catalog.entries(), "GIT")
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["github"]);
    }

    #[test]
    fn test_matches_description() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = filter(catalog.entries(), "encyclopedia")
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["wikipedia"]);
    }

    #[test]
    fn test_search_matches_several_in_order() {
        // "search" hits Google's title and both search engines' descriptions
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = filter(catalog.entries(), "search")
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["google-search", "microsoft-bing"]);
    }

    #[test]
    fn test_no_match() {
        let mut f = SearchFilter::new(Catalog::builtin());
        assert!(f.apply("zzzz"));
        assert!(f.is_empty());
        assert_eq!(f.query(), "zzzz");
    }

    #[test]
    fn test_apply_then_clear() {
        let mut f = SearchFilter::new(Catalog::builtin());
        f.apply("git");
        assert_eq!(result_ids(&f), vec!["github"]);

        f.apply("");
        assert_eq!(f.len(), 4);
        assert_eq!(f.recompute_count(), 2);
    }

    #[test]
    fn test_same_query_is_memoized() {
        let mut f = SearchFilter::new(Catalog::builtin());
        assert!(f.apply("wiki"));
        assert!(!f.apply("wiki"));
        assert!(!f.apply("wiki"));
        assert_eq!(f.recompute_count(), 1);
    }

    #[test]
    fn test_non_ascii_query() {
        let catalog = Catalog::from_toml_str(
            "[[app]]\nid = \"k\"\ntitle = \"Köln Maps\"\nurl = \"https://maps.example\"\n",
        )
        .unwrap();
        let mut f = SearchFilter::new(catalog);
        f.apply("KÖLN");
        assert_eq!(f.len(), 1);
    }

    proptest! {
        /// Results are a subsequence of the catalog and every result matches.
        #[test]
        fn results_are_matching_subsequence(query in "[a-zA-Z ]{0,6}") {
            let catalog = Catalog::builtin();
            let mut f = SearchFilter::new(catalog.clone());
            f.apply(&query);
            let needle = query.to_lowercase();

            let mut last = None;
            for entry in f.results() {
                prop_assert!(matches(entry, &needle));
                let pos = catalog.entries().iter().position(|c| c.id == entry.id);
                prop_assert!(pos > last);
                last = pos;
            }
            let expected = catalog.entries().iter().filter(|e| matches(e, &needle)).count();
            prop_assert_eq!(f.len(), expected);
        }

        /// Matching ignores ASCII case.
        #[test]
        fn case_insensitive(query in "[a-zA-Z]{1,5}") {
            let catalog = Catalog::builtin();
            let lower = filter(catalog.entries(), &query.to_lowercase());
            let upper = filter(catalog.entries(), &query.to_uppercase());
            prop_assert_eq!(lower, upper);
        }
    }
}
