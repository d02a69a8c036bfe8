use crate::app::App;
use crate::keybindings::{Action, Context};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Hints shown per context when no status message is active.
const BROWSE_HINTS: [(Action, &str); 7] = [
    (Action::Select, "open"),
    (Action::ShowInfo, "info"),
    (Action::ToggleFavorite, "favorite"),
    (Action::ToggleViewMode, "grid/list"),
    (Action::EnterSearch, "search"),
    (Action::ShowHelp, "help"),
    (Action::Quit, "quit"),
];
const SEARCH_HINTS: [(Action, &str); 3] = [
    (Action::CommitSearch, "confirm"),
    (Action::ExitSearch, "done"),
    (Action::ClearSearch, "clear"),
];
const MODAL_HINTS: [(Action, &str); 4] = [
    (Action::FocusNext, "next"),
    (Action::Activate, "press"),
    (Action::Proceed, "proceed"),
    (Action::Cancel, "cancel"),
];

/// Build the hint line from the live keybindings, so overrides show up.
fn hints(app: &App, context: Context, pairs: &[(Action, &str)]) -> String {
    pairs
        .iter()
        .filter_map(|(action, label)| {
            app.keybindings
                .key_hint(context, *action)
                .map(|key| format!("[{}] {}", key, label))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    // Status bar needs at least 1 char width to be meaningful
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.gate.is_open() {
        Cow::Owned(hints(app, Context::Modal, &MODAL_HINTS))
    } else if app.search_mode {
        Cow::Owned(format!(
            "Type to search  {}",
            hints(app, Context::Search, &SEARCH_HINTS)
        ))
    } else {
        Cow::Owned(hints(app, Context::Global, &BROWSE_HINTS))
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
