//! Application state: the context object every UI handler works on, and the
//! hit areas recorded during render for mouse dispatch.

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::favorites::Favorites;
use crate::keybindings::KeybindingRegistry;
use crate::launcher::{LaunchError, Launcher};
use crate::modal::{GateOutcome, ModalFocus, NavigationGate};
use crate::preferences::PreferenceStore;
use crate::search::SearchFilter;
use crate::theme::{StyleMap, ThemeVariant};
use crate::util::MAX_SEARCH_QUERY_LENGTH;
use crate::view::{compose, step_selection, Composition, Direction, ViewMode, ENTRANCE_DURATION};
use ratatui::layout::Rect;
use ratatui::style::Style;
use std::borrow::Cow;
use tokio::time::Instant;

/// How long a status message stays visible.
const STATUS_TTL_SECS: u64 = 3;

// ============================================================================
// Mouse Hit Map
// ============================================================================

/// Screen regions recorded by the last render, for mouse dispatch.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    /// Card rectangles with their flat selection index.
    pub cards: Vec<(Rect, usize)>,
    /// Outer rectangle of the details dialog, when shown.
    pub modal: Option<Rect>,
    /// Dialog controls.
    pub controls: Vec<(Rect, ModalFocus)>,
}

impl HitMap {
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        self.cards
            .iter()
            .find(|(r, _)| contains(r, column, row))
            .map(|(_, i)| *i)
    }

    pub fn control_at(&self, column: u16, row: u16) -> Option<ModalFocus> {
        self.controls
            .iter()
            .find(|(r, _)| contains(r, column, row))
            .map(|(_, c)| *c)
    }

    pub fn inside_modal(&self, column: u16, row: u16) -> bool {
        self.modal.is_some_and(|r| contains(&r, column, row))
    }
}

fn contains(r: &Rect, column: u16, row: u16) -> bool {
    column >= r.x
        && column < r.x.saturating_add(r.width)
        && row >= r.y
        && row < r.y.saturating_add(r.height)
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
///
/// Created once in `main` and passed by `&mut` to the UI loop; every
/// component lives here rather than in globals.
pub struct App {
    pub prefs: PreferenceStore,
    pub favorites: Favorites,
    pub search: SearchFilter,
    pub gate: NavigationGate,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,
    pub brand_name: String,

    // Layout
    pub view_mode: ViewMode,
    /// Bumped on every view mode switch; renderers key the entrance effect on it.
    pub layout_epoch: u64,
    /// Cards render in their entering style until this instant.
    pub entrance_until: Option<Instant>,
    /// Flat index into `favorites ++ others`.
    pub selected: usize,
    /// Grid columns at the last render.
    pub grid_columns: usize,

    // Search
    pub search_mode: bool,
    /// Raw text in the search box; becomes effective after the debounce.
    pub search_input: String,
    pub debouncer: Debouncer<String>,

    // Overlays
    pub show_help: bool,
    pub help_scroll_offset: usize,

    // Status message with expiry. Cow avoids allocation for static literals
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    pub needs_redraw: bool,
    pub hit_map: HitMap,
}

impl App {
    pub fn new(
        config: &Config,
        catalog: Catalog,
        prefs: PreferenceStore,
        launcher: Box<dyn Launcher>,
    ) -> Self {
        let theme_name = prefs.theme();
        let theme_variant = ThemeVariant::from_str_name(&theme_name).unwrap_or_else(|| {
            tracing::warn!(theme = %theme_name, "Unknown theme, falling back to dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        let warnings = keybindings.apply_overrides(&config.keybindings);
        for w in &warnings {
            tracing::warn!(warning = %w, "Keybinding override not fully applied");
        }

        let favorites = Favorites::load(&prefs);
        let view_mode = prefs.view_mode();

        let mut app = Self {
            favorites,
            search: SearchFilter::new(catalog),
            gate: NavigationGate::new(launcher),
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            brand_name: config.brand_name.clone(),
            view_mode,
            layout_epoch: 0,
            entrance_until: None,
            selected: 0,
            grid_columns: 1,
            search_mode: false,
            search_input: String::new(),
            debouncer: Debouncer::new(config.search_debounce()),
            show_help: false,
            help_scroll_offset: 0,
            status_message: None,
            needs_redraw: true,
            hit_map: HitMap::default(),
            prefs,
        };

        if let Some(first) = warnings.first() {
            app.set_status(format!("Config: {}", first));
        }
        app
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    // ========================================================================
    // Theme
    // ========================================================================

    /// Switch theme at runtime and persist the choice.
    pub async fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
        self.prefs.set_theme(variant.key()).await;
    }

    /// Cycle to the next theme variant. Returns the new theme's name.
    pub async fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next).await;
        next.name()
    }

    // ========================================================================
    // Composition & Selection
    // ========================================================================

    /// The filtered catalog split into favorites and the rest.
    pub fn composition(&self) -> Composition<'_> {
        let favorites = &self.favorites;
        compose(
            self.search.results(),
            |id| favorites.is_favorite(id),
            self.view_mode,
        )
    }

    pub fn selected_entry(&self) -> Option<CatalogEntry> {
        self.composition().get(self.selected).cloned()
    }

    pub fn nav(&mut self, direction: Direction) {
        let comp = self.composition();
        let next = step_selection(&comp, self.selected, direction, self.grid_columns);
        self.selected = next;
    }

    pub fn nav_first(&mut self) {
        self.selected = 0;
    }

    pub fn nav_last(&mut self) {
        self.selected = self.composition().len().saturating_sub(1);
    }

    /// Keep the selection inside the visible composition.
    pub fn clamp_selection(&mut self) {
        let len = self.composition().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    // ========================================================================
    // View Mode
    // ========================================================================

    pub async fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.toggle();
        self.layout_epoch = self.layout_epoch.wrapping_add(1);
        self.entrance_until = Some(Instant::now() + ENTRANCE_DURATION);
        self.set_status(format!("Switched to {} view.", self.view_mode.name()));
        tracing::debug!(mode = self.view_mode.name(), epoch = self.layout_epoch, "View mode switched");
        self.prefs.set_view_mode(self.view_mode).await;
    }

    /// True while cards should render in their entering style.
    pub fn is_entering(&self) -> bool {
        self.entrance_until.is_some_and(|t| Instant::now() < t)
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    /// Toggle the selected entry's favorite flag. The selection follows the
    /// entry into its new partition.
    pub async fn toggle_favorite(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let now_favorite = self.favorites.toggle(&mut self.prefs, &entry.id).await;
        if let Some(pos) = self.composition().position(&entry.id) {
            self.selected = pos;
        }
        self.set_status(if now_favorite {
            format!("Added {} to favorites", entry.title)
        } else {
            format!("Removed {} from favorites", entry.title)
        });
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub fn enter_search(&mut self) {
        self.search_mode = true;
    }

    /// Leave the search box, keeping the typed query in effect.
    pub fn exit_search(&mut self) {
        self.search_mode = false;
    }

    /// Append a character to the query. Refused past the length limit.
    pub fn push_search_char(&mut self, c: char) {
        if self.search_input.chars().count() >= MAX_SEARCH_QUERY_LENGTH {
            self.set_status(format!(
                "Search query at max length ({} chars)",
                MAX_SEARCH_QUERY_LENGTH
            ));
            return;
        }
        self.search_input.push(c);
        self.debouncer.push(self.search_input.clone());
    }

    pub fn pop_search_char(&mut self) {
        if self.search_input.pop().is_some() {
            self.debouncer.push(self.search_input.clone());
        }
    }

    /// Empty the query. Goes through the debouncer like typing does.
    pub fn clear_search(&mut self) {
        if self.search_input.is_empty() && self.search.query().is_empty() {
            return;
        }
        self.search_input.clear();
        self.debouncer.push(String::new());
    }

    /// Apply the pending query now instead of waiting out the window.
    pub fn commit_search(&mut self) {
        self.search_mode = false;
        if let Some(query) = self.debouncer.flush() {
            self.apply_query(&query);
        }
    }

    fn apply_query(&mut self, query: &str) {
        if self.search.apply(query) {
            self.selected = 0;
            self.needs_redraw = true;
        }
    }

    // ========================================================================
    // Navigation Gate
    // ========================================================================

    /// Primary action on the selected card.
    pub fn select(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let result = self.gate.select(&entry, &self.prefs);
        self.report(result);
    }

    /// Open the details dialog for the selected card.
    pub fn show_info(&mut self) {
        if let Some(entry) = self.selected_entry() {
            self.gate.info(&entry);
        }
    }

    pub async fn modal_activate(&mut self) {
        let result = self.gate.activate(&mut self.prefs).await;
        self.report(result);
    }

    pub async fn modal_proceed(&mut self) {
        let result = self.gate.proceed(&mut self.prefs).await;
        self.report(result);
    }

    /// Turn a gate result into a status message.
    fn report(&mut self, result: Result<GateOutcome, LaunchError>) {
        match result {
            Ok(GateOutcome::Launched { title }) => {
                self.set_status(format!("Opening {} in your browser", title));
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Launch failed");
                self.set_status(format!("Error: {}", e));
            }
        }
    }

    // ========================================================================
    // Timers
    // ========================================================================

    /// Advance every time-driven state. Returns true if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.gate.tick(now);

        if let Some(query) = self.debouncer.poll_at(now) {
            self.apply_query(&query);
            changed = true;
        }

        if self.entrance_until.is_some_and(|t| t <= now) {
            self.entrance_until = None;
            changed = true;
        }

        if self.clear_expired_status() {
            changed = true;
        }
        changed
    }

    /// The nearest instant at which `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.debouncer.deadline(),
            self.gate.deadline(),
            self.entrance_until,
        ]
        .into_iter()
        .flatten()
        .min()
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Footer line for the given calendar year.
    pub fn footer_text(&self, year: i32) -> String {
        format!("© {} {}. All rights reserved.", year, self.brand_name)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::time;
    use url::Url;

    #[derive(Clone, Default)]
    struct RecordingLauncher {
        opened: Arc<Mutex<Vec<String>>>,
    }

    impl Launcher for RecordingLauncher {
        fn launch(&self, destination: &Url) -> Result<(), LaunchError> {
            self.opened.lock().unwrap().push(destination.to_string());
            Ok(())
        }
    }

    async fn test_app_with(config: Config) -> (App, Database, RecordingLauncher) {
        let db = Database::open(":memory:").await.unwrap();
        let prefs = PreferenceStore::load(&config, &db).await.unwrap();
        let launcher = RecordingLauncher::default();
        let app = App::new(&config, Catalog::builtin(), prefs, Box::new(launcher.clone()));
        (app, db, launcher)
    }

    async fn test_app() -> (App, Database, RecordingLauncher) {
        test_app_with(Config::default()).await
    }

    fn visible_ids(app: &App) -> Vec<String> {
        app.composition().iter().map(|e| e.id.clone()).collect()
    }

    #[tokio::test]
    async fn test_initial_state() {
        let (app, _db, _) = test_app().await;
        assert_eq!(app.view_mode, ViewMode::Grid);
        assert_eq!(app.theme_variant, ThemeVariant::Dark);
        assert_eq!(app.composition().len(), 4);
        assert_eq!(app.selected_entry().unwrap().id, "google-search");
        assert!(app.status_message.is_none());
    }

    // Status message expiry with time control
    #[tokio::test]
    async fn test_status_expires_after_3_seconds() {
        // Create app before pausing time to avoid DB connection timeout
        let (mut app, _db, _) = test_app().await;
        time::pause();
        app.set_status("Test message");

        time::advance(Duration::from_secs(2)).await;
        app.clear_expired_status();
        assert!(app.status_message.is_some());

        time::advance(Duration::from_secs(2)).await;
        app.clear_expired_status();
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_typing_filters_after_debounce() {
        let (mut app, _db, _) = test_app().await;
        time::pause();
        app.enter_search();
        for c in "git".chars() {
            app.push_search_char(c);
            time::advance(Duration::from_millis(100)).await;
            app.tick(Instant::now());
        }
        // 100ms after the last keystroke: nothing applied yet
        assert_eq!(app.search.recompute_count(), 0);
        assert_eq!(visible_ids(&app).len(), 4);

        time::advance(Duration::from_millis(200)).await;
        assert!(app.tick(Instant::now()));
        assert_eq!(app.search.recompute_count(), 1);
        assert_eq!(visible_ids(&app), vec!["github"]);
    }

    #[tokio::test]
    async fn test_clear_search_restores_everything() {
        let (mut app, _db, _) = test_app().await;
        time::pause();
        app.enter_search();
        for c in "git".chars() {
            app.push_search_char(c);
        }
        app.commit_search();
        assert!(!app.search_mode);
        assert_eq!(visible_ids(&app), vec!["github"]);

        app.clear_search();
        time::advance(Duration::from_millis(300)).await;
        app.tick(Instant::now());
        assert_eq!(visible_ids(&app).len(), 4);
        assert_eq!(app.search.recompute_count(), 2);
    }

    #[tokio::test]
    async fn test_backspace_restarts_window() {
        let (mut app, _db, _) = test_app().await;
        time::pause();
        app.push_search_char('w');
        app.push_search_char('x');
        time::advance(Duration::from_millis(250)).await;
        app.pop_search_char();
        time::advance(Duration::from_millis(250)).await;
        app.tick(Instant::now());
        assert_eq!(app.search.recompute_count(), 0);

        time::advance(Duration::from_millis(50)).await;
        app.tick(Instant::now());
        assert_eq!(app.search.query(), "w");
        assert_eq!(app.search.recompute_count(), 1);
    }

    #[tokio::test]
    async fn test_search_length_limit() {
        let (mut app, _db, _) = test_app().await;
        for _ in 0..MAX_SEARCH_QUERY_LENGTH {
            app.push_search_char('a');
        }
        app.push_search_char('b');
        assert_eq!(app.search_input.chars().count(), MAX_SEARCH_QUERY_LENGTH);
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn test_toggle_favorite_moves_entry_and_selection() {
        let (mut app, _db, _) = test_app().await;
        app.selected = 3; // github
        app.toggle_favorite().await;

        let comp = app.composition();
        assert_eq!(comp.favorites.len(), 1);
        assert_eq!(comp.favorites[0].id, "github");
        assert_eq!(app.selected, 0);
        assert!(app.prefs.favorites().contains(&"github".to_string()));

        app.toggle_favorite().await;
        assert!(app.composition().favorites.is_empty());
        assert_eq!(app.selected, 3);
    }

    #[tokio::test]
    async fn test_toggle_view_mode() {
        let (mut app, db, _) = test_app().await;
        time::pause();
        app.toggle_view_mode().await;

        assert_eq!(app.view_mode, ViewMode::List);
        assert_eq!(app.layout_epoch, 1);
        assert!(app.is_entering());
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg, "Switched to list view.");

        time::advance(ENTRANCE_DURATION).await;
        assert!(app.tick(Instant::now()));
        assert!(!app.is_entering());
        time::resume();

        // Not persisted unless enabled
        assert_eq!(db.get_preference("view_mode").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_view_mode_persisted_when_enabled() {
        let mut config = Config::default();
        config.persist_view_mode = true;
        let (mut app, db, _) = test_app_with(config).await;
        app.toggle_view_mode().await;
        assert_eq!(
            db.get_preference("view_mode").await.unwrap(),
            Some("\"list\"".to_string())
        );
    }

    #[tokio::test]
    async fn test_cycle_theme_persists() {
        let (mut app, db, _) = test_app().await;
        assert_eq!(app.cycle_theme().await, "Light");
        assert_eq!(app.theme_variant, ThemeVariant::Light);
        assert_eq!(
            db.get_preference("theme").await.unwrap(),
            Some("\"light\"".to_string())
        );
    }

    #[tokio::test]
    async fn test_unknown_stored_theme_falls_back() {
        let db = Database::open(":memory:").await.unwrap();
        db.set_preference("theme", "\"neon\"").await.unwrap();
        let config = Config::default();
        let prefs = PreferenceStore::load(&config, &db).await.unwrap();
        let app = App::new(
            &config,
            Catalog::builtin(),
            prefs,
            Box::new(RecordingLauncher::default()),
        );
        assert_eq!(app.theme_variant, ThemeVariant::Dark);
    }

    #[tokio::test]
    async fn test_select_opens_modal_then_proceed_launches() {
        let (mut app, _db, launcher) = test_app().await;
        app.selected = 2; // wikipedia
        app.select();
        assert!(app.gate.is_open());

        app.modal_proceed().await;
        assert!(!app.gate.is_open());
        assert_eq!(
            *launcher.opened.lock().unwrap(),
            vec!["https://www.wikipedia.org/"]
        );
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.contains("Wikipedia"));
    }

    #[tokio::test]
    async fn test_show_info_on_empty_results_is_noop() {
        let (mut app, _db, _) = test_app().await;
        app.search.apply("nothing matches this");
        app.show_info();
        app.select();
        assert!(!app.gate.is_open());
    }

    #[tokio::test]
    async fn test_next_deadline_is_nearest() {
        let (mut app, _db, _) = test_app().await;
        time::pause();
        assert_eq!(app.next_deadline(), None);

        app.push_search_char('g');
        let debounce = app.debouncer.deadline();
        app.show_info();
        let opening = app.gate.deadline();
        assert!(opening < debounce);
        assert_eq!(app.next_deadline(), opening);
    }

    #[tokio::test]
    async fn test_invalid_keybinding_override_sets_status() {
        let mut config = Config::default();
        config
            .keybindings
            .insert("launch_rockets".to_string(), "x".to_string());
        let (app, _db, _) = test_app_with(config).await;
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.contains("Unknown action"));
    }

    #[tokio::test]
    async fn test_footer_text() {
        let (app, _db, _) = test_app().await;
        assert_eq!(
            app.footer_text(2026),
            "© 2026 Problembuddy. All rights reserved."
        );
    }

    #[test]
    fn test_hit_map() {
        let map = HitMap {
            cards: vec![(Rect::new(0, 0, 10, 5), 0), (Rect::new(10, 0, 10, 5), 1)],
            modal: Some(Rect::new(5, 5, 20, 10)),
            controls: vec![(Rect::new(6, 12, 8, 1), ModalFocus::Cancel)],
        };
        assert_eq!(map.card_at(12, 2), Some(1));
        assert_eq!(map.card_at(25, 2), None);
        assert!(map.inside_modal(5, 5));
        assert!(!map.inside_modal(25, 5));
        assert_eq!(map.control_at(7, 12), Some(ModalFocus::Cancel));
    }
}
