//! Keybinding registry: maps key events to actions per input context, with
//! overrides from config.toml.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    NavLeft,
    NavRight,
    NavFirst,
    NavLast,
    Select,
    ShowInfo,
    ToggleFavorite,
    ToggleViewMode,
    EnterSearch,
    ExitSearch,
    CommitSearch,
    ClearSearch,
    CycleTheme,
    ShowHelp,
    FocusNext,
    FocusPrev,
    Activate,
    ToggleDontShow,
    Proceed,
    Cancel,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Move down",
            Self::NavUp => "Move up",
            Self::NavLeft => "Move left (grid)",
            Self::NavRight => "Move right (grid)",
            Self::NavFirst => "Jump to first app",
            Self::NavLast => "Jump to last app",
            Self::Select => "Open app",
            Self::ShowInfo => "Show app details",
            Self::ToggleFavorite => "Toggle favorite",
            Self::ToggleViewMode => "Switch grid / list view",
            Self::EnterSearch => "Search apps",
            Self::ExitSearch => "Leave search box",
            Self::CommitSearch => "Apply search now",
            Self::ClearSearch => "Clear search",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
            Self::FocusNext => "Next control",
            Self::FocusPrev => "Previous control",
            Self::Activate => "Press focused control",
            Self::ToggleDontShow => "Toggle \"don't show again\"",
            Self::Proceed => "Proceed to app",
            Self::Cancel => "Close dialog",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context. Contexts are isolated: a key bound only in `Global`
/// does nothing while the search box or the modal has the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Search,
    Modal,
}

impl Context {
    pub fn label(self) -> &'static str {
        match self {
            Context::Global => "Browse",
            Context::Search => "Search",
            Context::Modal => "Details dialog",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Drop SHIFT where it is already encoded in the key code ('T', BackTab).
    /// Terminals disagree on whether they report it.
    fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(_) | KeyCode::BackTab => {
                Self::new(self.code, self.modifiers.difference(KeyModifiers::SHIFT))
            }
            _ => self,
        }
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Shift+Tab", "Up", "Home", "Space"
/// - Modifier combos: "Ctrl+d", "Ctrl+u"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        let c = chars.next()?;
        if chars.next().is_none() {
            return Some(KeySpec::ctrl(c));
        }
        return None;
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "shift+tab" | "backtab" => return Some(KeySpec::plain(KeyCode::BackTab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "home" => return Some(KeySpec::plain(KeyCode::Home)),
        "end" => return Some(KeySpec::plain(KeyCode::End)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "space" => return Some(KeySpec::plain(KeyCode::Char(' '))),
        _ => {}
    }

    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|n| n.parse::<u8>().ok())
    {
        if (1..=12).contains(&n) {
            return Some(KeySpec::plain(KeyCode::F(n)));
        }
        return None;
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_none() {
        return Some(KeySpec::plain(KeyCode::Char(c)));
    }

    None
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts.
pub struct KeybindingRegistry {
    /// Primary lookup: (Context, KeySpec) -> Action
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings, in registration order, for the help screen
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn bind_all(&mut self, context: Context, keys: &[KeySpec], action: Action) {
        for key in keys {
            self.bind(context, *key, action);
        }
    }

    fn register_defaults(&mut self) {
        use KeyCode::*;
        let p = KeySpec::plain;

        // === Browse ===
        self.bind_all(Context::Global, &[p(Char('q')), KeySpec::ctrl('c')], Action::Quit);
        self.bind_all(Context::Global, &[p(Char('j')), p(Down)], Action::NavDown);
        self.bind_all(Context::Global, &[p(Char('k')), p(Up)], Action::NavUp);
        self.bind_all(Context::Global, &[p(Char('h')), p(Left)], Action::NavLeft);
        self.bind_all(Context::Global, &[p(Char('l')), p(Right)], Action::NavRight);
        self.bind_all(Context::Global, &[p(Char('g')), p(Home)], Action::NavFirst);
        self.bind_all(Context::Global, &[p(Char('G')), p(End)], Action::NavLast);
        self.bind(Context::Global, p(Enter), Action::Select);
        self.bind(Context::Global, p(Char('i')), Action::ShowInfo);
        self.bind(Context::Global, p(Char('f')), Action::ToggleFavorite);
        self.bind(Context::Global, p(Char('v')), Action::ToggleViewMode);
        self.bind(Context::Global, p(Char('/')), Action::EnterSearch);
        self.bind(Context::Global, p(Esc), Action::ClearSearch);
        self.bind(Context::Global, p(Char('T')), Action::CycleTheme);
        self.bind(Context::Global, p(Char('?')), Action::ShowHelp);

        // === Search box ===
        // Printable keys not bound here are typed into the query
        self.bind(Context::Search, KeySpec::ctrl('c'), Action::Quit);
        self.bind(Context::Search, p(Esc), Action::ExitSearch);
        self.bind(Context::Search, p(Enter), Action::CommitSearch);
        self.bind(Context::Search, KeySpec::ctrl('u'), Action::ClearSearch);

        // === Details dialog ===
        self.bind(Context::Modal, KeySpec::ctrl('c'), Action::Quit);
        self.bind_all(Context::Modal, &[p(Tab), p(Right)], Action::FocusNext);
        self.bind_all(Context::Modal, &[p(BackTab), p(Left)], Action::FocusPrev);
        self.bind_all(Context::Modal, &[p(Enter), p(Char(' '))], Action::Activate);
        self.bind(Context::Modal, p(Char('d')), Action::ToggleDontShow);
        self.bind(Context::Modal, p(Char('y')), Action::Proceed);
        self.bind_all(Context::Modal, &[p(Esc), p(Char('n'))], Action::Cancel);
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "toggle_favorite").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5"). An override
    /// replaces every default key for the action, in every context where
    /// the action was bound, with two exceptions: Ctrl+c keeps quitting
    /// everywhere, and a printable key is never bound in the search box.
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let action = match parse_action_name(action_name) {
                Some(a) => a,
                None => {
                    warnings.push(format!("Unknown action '{}', ignoring", action_name));
                    continue;
                }
            };

            let key = match parse_key_string(key_str) {
                Some(k) => k,
                None => {
                    warnings.push(format!(
                        "Cannot parse key '{}' for action '{}', ignoring",
                        key_str, action_name
                    ));
                    continue;
                }
            };

            let mut contexts_for_action: Vec<Context> = Vec::new();
            for (ctx, _, a) in &self.bindings {
                if *a == action && !contexts_for_action.contains(ctx) {
                    contexts_for_action.push(*ctx);
                }
            }

            // A printable key in the search box is text; the old binding stays there
            let refused_in_search =
                types_into_search(key) && contexts_for_action.contains(&Context::Search);
            if refused_in_search {
                warnings.push(format!(
                    "Key '{}' for action '{}' would be typed in the search box, keeping the search binding",
                    key_str, action_name
                ));
            }
            let keep = |ctx: Context, k: KeySpec| {
                (action == Action::Quit && k == QUIT_ESCAPE)
                    || (refused_in_search && ctx == Context::Search)
            };
            self.lookup.retain(|&(ctx, k), a| *a != action || keep(ctx, k));
            self.bindings.retain(|&(ctx, k, a)| a != action || keep(ctx, k));

            for ctx in contexts_for_action {
                if refused_in_search && ctx == Context::Search {
                    continue;
                }
                if self.lookup.get(&(ctx, key)) == Some(&action) {
                    continue;
                }
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a given key in a given context.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers).normalized();
        self.lookup.get(&(context, key)).copied()
    }

    /// Every key bound to `action` in `context`, formatted, in binding order.
    pub fn keys_for(&self, context: Context, action: Action) -> Vec<String> {
        self.bindings
            .iter()
            .filter(|(c, _, a)| *c == context && *a == action)
            .map(|(_, key, _)| format_key(key))
            .collect()
    }

    /// First key bound to `action` in `context`, formatted for hints.
    pub fn key_hint(&self, context: Context, action: Action) -> Option<String> {
        self.keys_for(context, action).into_iter().next()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Always bound to Quit, whatever the overrides say.
const QUIT_ESCAPE: KeySpec = KeySpec::ctrl('c');

/// Keys the search box reads as text.
fn types_into_search(key: KeySpec) -> bool {
    matches!(key.code, KeyCode::Char(_))
        && !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" | "down" => Some(Action::NavDown),
        "nav_up" | "up" => Some(Action::NavUp),
        "nav_left" | "left" => Some(Action::NavLeft),
        "nav_right" | "right" => Some(Action::NavRight),
        "nav_first" | "first" => Some(Action::NavFirst),
        "nav_last" | "last" => Some(Action::NavLast),
        "select" | "open" => Some(Action::Select),
        "show_info" | "info" => Some(Action::ShowInfo),
        "toggle_favorite" | "favorite" => Some(Action::ToggleFavorite),
        "toggle_view_mode" | "view_mode" => Some(Action::ToggleViewMode),
        "enter_search" | "search" => Some(Action::EnterSearch),
        "exit_search" => Some(Action::ExitSearch),
        "commit_search" => Some(Action::CommitSearch),
        "clear_search" => Some(Action::ClearSearch),
        "cycle_theme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "help" => Some(Action::ShowHelp),
        "focus_next" => Some(Action::FocusNext),
        "focus_prev" => Some(Action::FocusPrev),
        "activate" => Some(Action::Activate),
        "toggle_dont_show" | "dont_show_again" => Some(Action::ToggleDontShow),
        "proceed" => Some(Action::Proceed),
        "cancel" => Some(Action::Cancel),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_quit() {
        let reg = KeybindingRegistry::new();
        let action = reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Global);
        assert_eq!(action, Some(Action::Quit));
    }

    #[test]
    fn test_default_nav_keys() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('j'), KeyModifiers::NONE, Context::Global),
            Some(Action::NavDown)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Up, KeyModifiers::NONE, Context::Global),
            Some(Action::NavUp)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('l'), KeyModifiers::NONE, Context::Global),
            Some(Action::NavRight)
        );
    }

    #[test]
    fn test_contexts_are_isolated() {
        let reg = KeybindingRegistry::new();
        // 'q' types into the search box rather than quitting
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Search),
            None
        );
        // 'f' must not toggle a favorite behind the dialog
        assert_eq!(
            reg.action_for_key(KeyCode::Char('f'), KeyModifiers::NONE, Context::Modal),
            None
        );
        // Ctrl+c quits everywhere
        for ctx in [Context::Global, Context::Search, Context::Modal] {
            assert_eq!(
                reg.action_for_key(KeyCode::Char('c'), KeyModifiers::CONTROL, ctx),
                Some(Action::Quit)
            );
        }
    }

    #[test]
    fn test_esc_depends_on_context() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Esc, KeyModifiers::NONE, Context::Global),
            Some(Action::ClearSearch)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Esc, KeyModifiers::NONE, Context::Search),
            Some(Action::ExitSearch)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Esc, KeyModifiers::NONE, Context::Modal),
            Some(Action::Cancel)
        );
    }

    #[test]
    fn test_modal_keys() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Tab, KeyModifiers::NONE, Context::Modal),
            Some(Action::FocusNext)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char(' '), KeyModifiers::NONE, Context::Modal),
            Some(Action::Activate)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('y'), KeyModifiers::NONE, Context::Modal),
            Some(Action::Proceed)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('n'), KeyModifiers::NONE, Context::Modal),
            Some(Action::Cancel)
        );
    }

    #[test]
    fn test_shift_is_normalized() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::BackTab, KeyModifiers::SHIFT, Context::Modal),
            Some(Action::FocusPrev)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('T'), KeyModifiers::SHIFT, Context::Global),
            Some(Action::CycleTheme)
        );
    }

    #[test]
    fn test_search_context() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Enter, KeyModifiers::NONE, Context::Search),
            Some(Action::CommitSearch)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('u'), KeyModifiers::CONTROL, Context::Search),
            Some(Action::ClearSearch)
        );
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::F(12), KeyModifiers::NONE, Context::Global),
            None
        );
    }

    #[test]
    fn test_apply_overrides_valid() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("toggle_favorite".to_string(), "F2".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert!(warnings.is_empty());

        assert_eq!(
            reg.action_for_key(KeyCode::Char('f'), KeyModifiers::NONE, Context::Global),
            None
        );
        assert_eq!(
            reg.action_for_key(KeyCode::F(2), KeyModifiers::NONE, Context::Global),
            Some(Action::ToggleFavorite)
        );
    }

    #[test]
    fn test_apply_overrides_unknown_action() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("nonexistent_action".to_string(), "q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Unknown action"));
    }

    #[test]
    fn test_apply_overrides_bad_key() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "Ctrl+Alt+Shift+Q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Cannot parse key"));
    }

    #[test]
    fn test_override_preserves_contexts() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "Ctrl+q".to_string());
        assert!(reg.apply_overrides(&overrides).is_empty());

        for ctx in [Context::Global, Context::Search, Context::Modal] {
            assert_eq!(
                reg.action_for_key(KeyCode::Char('q'), KeyModifiers::CONTROL, ctx),
                Some(Action::Quit)
            );
            // Ctrl+c still quits
            assert_eq!(
                reg.action_for_key(KeyCode::Char('c'), KeyModifiers::CONTROL, ctx),
                Some(Action::Quit)
            );
        }
        // Plain 'q' is gone
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Global),
            None
        );
    }

    #[test]
    fn test_printable_override_stays_out_of_search() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "x".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("search box"));

        assert_eq!(
            reg.action_for_key(KeyCode::Char('x'), KeyModifiers::NONE, Context::Global),
            Some(Action::Quit)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('x'), KeyModifiers::NONE, Context::Modal),
            Some(Action::Quit)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('x'), KeyModifiers::NONE, Context::Search),
            None
        );
        for ctx in [Context::Global, Context::Search, Context::Modal] {
            assert_eq!(
                reg.action_for_key(KeyCode::Char('c'), KeyModifiers::CONTROL, ctx),
                Some(Action::Quit)
            );
        }
        // Overriding with Ctrl+c itself does not duplicate the binding
        let mut reg = KeybindingRegistry::new();
        overrides.insert("quit".to_string(), "Ctrl+c".to_string());
        reg.apply_overrides(&overrides);
        assert_eq!(reg.keys_for(Context::Global, Action::Quit), vec!["Ctrl+c"]);
    }

    #[test]
    fn test_parse_key_string_named_keys() {
        assert_eq!(
            parse_key_string("Enter"),
            Some(KeySpec::plain(KeyCode::Enter))
        );
        assert_eq!(parse_key_string("esc"), Some(KeySpec::plain(KeyCode::Esc)));
        assert_eq!(
            parse_key_string("Shift+Tab"),
            Some(KeySpec::plain(KeyCode::BackTab))
        );
        assert_eq!(
            parse_key_string("space"),
            Some(KeySpec::plain(KeyCode::Char(' ')))
        );
    }

    #[test]
    fn test_parse_key_string_function_keys() {
        assert_eq!(parse_key_string("F1"), Some(KeySpec::plain(KeyCode::F(1))));
        assert_eq!(
            parse_key_string("F12"),
            Some(KeySpec::plain(KeyCode::F(12)))
        );
        assert_eq!(parse_key_string("F0"), None);
        assert_eq!(parse_key_string("F13"), None);
    }

    #[test]
    fn test_parse_key_string_single_char() {
        assert_eq!(parse_key_string("Ctrl+d"), Some(KeySpec::ctrl('d')));
        assert_eq!(
            parse_key_string("F"),
            Some(KeySpec::plain(KeyCode::Char('F')))
        );
        assert_eq!(
            parse_key_string("é"),
            Some(KeySpec::plain(KeyCode::Char('é')))
        );
        assert_eq!(parse_key_string("qq"), None);
    }

    #[test]
    fn test_keys_for_lists_every_binding() {
        let reg = KeybindingRegistry::new();
        assert_eq!(reg.keys_for(Context::Global, Action::Quit), vec!["q", "Ctrl+c"]);
        assert_eq!(
            reg.keys_for(Context::Modal, Action::Cancel),
            vec!["Esc", "n"]
        );
        assert!(reg.keys_for(Context::Modal, Action::ToggleFavorite).is_empty());
    }

    #[test]
    fn test_key_hint() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.key_hint(Context::Global, Action::ToggleFavorite).as_deref(),
            Some("f")
        );
        assert_eq!(
            reg.key_hint(Context::Modal, Action::FocusPrev).as_deref(),
            Some("Shift+Tab")
        );
        assert_eq!(reg.key_hint(Context::Search, Action::ToggleFavorite), None);
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key(&KeySpec::plain(KeyCode::Char('q'))), "q");
        assert_eq!(format_key(&KeySpec::ctrl('d')), "Ctrl+d");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::Char(' '))), "Space");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::F(5))), "F5");
    }
}
