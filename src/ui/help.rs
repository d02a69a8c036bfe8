//! Help overlay. Lists what each key does while browsing, while typing a
//! search, and inside the details dialog, with the dialog's controls in the
//! order Tab visits them. Keys come from the live registry, so config
//! overrides show up here.

use crate::app::App;
use crate::keybindings::{Action, Context};
use crate::util::{display_width, truncate_to_width};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

struct Section {
    context: Context,
    note: Option<&'static str>,
    actions: &'static [Action],
}

const SECTIONS: [Section; 3] = [
    Section {
        context: Context::Global,
        note: None,
        actions: &[
            Action::NavUp,
            Action::NavDown,
            Action::NavLeft,
            Action::NavRight,
            Action::NavFirst,
            Action::NavLast,
            Action::Select,
            Action::ShowInfo,
            Action::ToggleFavorite,
            Action::ToggleViewMode,
            Action::EnterSearch,
            Action::ClearSearch,
            Action::CycleTheme,
            Action::ShowHelp,
            Action::Quit,
        ],
    },
    Section {
        context: Context::Search,
        note: Some("Other keys type into the query."),
        actions: &[
            Action::CommitSearch,
            Action::ClearSearch,
            Action::ExitSearch,
            Action::Quit,
        ],
    },
    Section {
        context: Context::Modal,
        note: Some("Tab order: checkbox, Cancel, Proceed. Other keys are ignored."),
        actions: &[
            Action::FocusNext,
            Action::FocusPrev,
            Action::Activate,
            Action::ToggleDontShow,
            Action::Cancel,
            Action::Proceed,
            Action::Quit,
        ],
    },
];

const KEY_COLUMN: usize = 18;

/// Build the help text for the current bindings.
fn help_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for section in &SECTIONS {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            section.context.label(),
            app.style("section_title"),
        )));
        if let Some(note) = section.note {
            lines.push(Line::from(Span::styled(
                format!("  {}", note),
                app.style("header_meta"),
            )));
        }
        for action in section.actions {
            let keys = app.keybindings.keys_for(section.context, *action);
            if keys.is_empty() {
                continue;
            }
            let joined = keys.join(" / ");
            let keys = truncate_to_width(&joined, KEY_COLUMN - 1);
            let pad = KEY_COLUMN.saturating_sub(display_width(&keys));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{}{}", keys, " ".repeat(pad)), app.style("help_key")),
                Span::styled(action.describe(), app.style("modal_body")),
            ]));
        }
    }
    lines
}

/// Render the help overlay on top of everything else.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let width = 72u16.min(area.width.saturating_sub(4));
    let height = area.height.saturating_sub(4);
    let overlay = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );
    if overlay.width < 24 || overlay.height < 6 {
        return;
    }

    let lines = help_lines(app);
    let visible = overlay.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(visible);
    let scroll = app.help_scroll_offset.min(max_scroll);

    let title = if max_scroll > 0 {
        format!(" Keys ({}/{}, j/k to scroll) ", scroll + 1, max_scroll + 1)
    } else {
        " Keys (? or Esc to close) ".to_string()
    };

    f.render_widget(Clear, overlay);
    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(app.style("modal_border"))
                    .title(title),
            )
            .scroll((scroll.min(u16::MAX as usize) as u16, 0)),
        overlay,
    );
}
