//! Input handling for the TUI.
//!
//! This module processes keyboard and mouse input and dispatches to the
//! appropriate handler based on which layer currently owns the input.

use crate::app::App;
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::view::Direction;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::Action;

/// Main input dispatch function.
///
/// The help overlay captures all keys while visible, then the details
/// dialog (a focus trap), then the search box. Everything else is browse.
pub async fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    if app.show_help {
        return handle_help_input(app, code);
    }

    if app.gate.is_open() {
        return handle_modal_input(app, code, modifiers).await;
    }

    if app.search_mode {
        return handle_search_input(app, code, modifiers);
    }

    handle_browse_input(app, code, modifiers).await
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input while the details dialog is open.
///
/// Unbound keys are swallowed so nothing reaches the page underneath.
async fn handle_modal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Modal);

    match action {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::FocusNext) => {
            app.gate.focus_next();
        }
        Some(KbAction::FocusPrev) => {
            app.gate.focus_prev();
        }
        Some(KbAction::ToggleDontShow) => {
            app.gate.toggle_dont_show_again();
        }
        Some(KbAction::Activate) => app.modal_activate().await,
        Some(KbAction::Proceed) => app.modal_proceed().await,
        Some(KbAction::Cancel) => {
            app.gate.close();
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input while typing in the search box.
fn handle_search_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Search);

    match action {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::ExitSearch) => app.exit_search(),
        Some(KbAction::CommitSearch) => app.commit_search(),
        Some(KbAction::ClearSearch) => app.clear_search(),
        Some(_) => {}
        None => match code {
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char(c)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                app.push_search_char(c);
            }
            _ => {}
        },
    }
    Action::Continue
}

/// Handle input while browsing the cards.
async fn handle_browse_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Global);

    match action {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::NavDown) => app.nav(Direction::Down),
        Some(KbAction::NavUp) => app.nav(Direction::Up),
        Some(KbAction::NavLeft) => app.nav(Direction::Left),
        Some(KbAction::NavRight) => app.nav(Direction::Right),
        Some(KbAction::NavFirst) => app.nav_first(),
        Some(KbAction::NavLast) => app.nav_last(),
        Some(KbAction::Select) => app.select(),
        Some(KbAction::ShowInfo) => app.show_info(),
        Some(KbAction::ToggleFavorite) => app.toggle_favorite().await,
        Some(KbAction::ToggleViewMode) => app.toggle_view_mode().await,
        Some(KbAction::EnterSearch) => app.enter_search(),
        Some(KbAction::ClearSearch) => app.clear_search(),
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme().await;
            app.set_status(format!("Theme: {}", name));
        }
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        _ => {}
    }
    Action::Continue
}

/// Handle a mouse event against the hit map of the last frame.
///
/// Returns true if anything changed and the screen needs a redraw.
pub async fn handle_mouse(app: &mut App, mouse: MouseEvent) -> bool {
    if app.show_help {
        return false;
    }
    let (column, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if app.gate.is_open() => {
            if let Some(control) = app.hit_map.control_at(column, row) {
                app.gate.set_focus(control);
                app.modal_activate().await;
            } else if !app.hit_map.inside_modal(column, row) {
                app.gate.close();
            } else {
                return false;
            }
            true
        }
        MouseEventKind::Down(MouseButton::Left) => match app.hit_map.card_at(column, row) {
            Some(index) => {
                app.selected = index;
                app.select();
                true
            }
            None => false,
        },
        MouseEventKind::Down(MouseButton::Right) if !app.gate.is_open() => {
            match app.hit_map.card_at(column, row) {
                Some(index) => {
                    app.selected = index;
                    app.show_info();
                    true
                }
                None => false,
            }
        }
        MouseEventKind::ScrollDown if !app.gate.is_open() => {
            app.nav(Direction::Down);
            true
        }
        MouseEventKind::ScrollUp if !app.gate.is_open() => {
            app.nav(Direction::Up);
            true
        }
        _ => false,
    }
}
