//! Details dialog overlay.

use crate::app::App;
use crate::modal::{DetailModal, ModalFocus, ModalPhase};
use crate::util::display_width;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const DONT_SHOW_LABEL: &str = "Don't show this again for this app";
const PROCEED_LABEL: &str = " Proceed to App ";
const CANCEL_LABEL: &str = " Cancel ";

/// Render the dialog centered on screen and record its hit areas.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    app.hit_map.modal = None;
    app.hit_map.controls.clear();
    let Some(modal) = app.gate.modal().cloned() else {
        return;
    };
    let area = f.area();

    let width = 64u16.min(area.width.saturating_sub(4));
    let height = 16u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    if overlay.width < 30 || overlay.height < 8 {
        return;
    }

    f.render_widget(Clear, overlay);

    let border = match modal.phase {
        ModalPhase::Opening => app.style("modal_opening"),
        ModalPhase::Open => app.style("modal_border"),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(format!("[{}] ", modal.entry.icon), app.style("card_icon")),
            Span::styled(modal.entry.title.as_str(), app.style("modal_title")),
            Span::raw(" "),
        ]));
    let inner = block.inner(overlay);
    f.render_widget(block, overlay);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // description
            Constraint::Length(1), // destination
            Constraint::Length(1), // spacer
            Constraint::Length(1), // checkbox
            Constraint::Length(1), // spacer
            Constraint::Length(1), // buttons
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(modal.entry.long_description.as_str())
            .style(app.style("modal_body"))
            .wrap(Wrap { trim: true }),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            modal.entry.destination.as_str(),
            app.style("header_meta"),
        )),
        rows[1],
    );

    let checkbox = format!(
        "[{}] {}",
        if modal.dont_show_again { "x" } else { " " },
        DONT_SHOW_LABEL
    );
    let checkbox_width = (display_width(&checkbox) as u16).min(rows[3].width);
    let checkbox_area = Rect::new(rows[3].x, rows[3].y, checkbox_width, 1);
    f.render_widget(
        Paragraph::new(Span::styled(
            checkbox,
            control_style(app, &modal, ModalFocus::DontShowAgain),
        )),
        checkbox_area,
    );

    let buttons = rows[5];
    let proceed_width = PROCEED_LABEL.len() as u16;
    let cancel_width = CANCEL_LABEL.len() as u16;
    let proceed_area = Rect::new(
        buttons.x + buttons.width.saturating_sub(proceed_width),
        buttons.y,
        proceed_width.min(buttons.width),
        1,
    );
    let cancel_area = Rect::new(
        proceed_area.x.saturating_sub(cancel_width + 2).max(buttons.x),
        buttons.y,
        cancel_width,
        1,
    );
    f.render_widget(
        Paragraph::new(CANCEL_LABEL)
            .style(control_style(app, &modal, ModalFocus::Cancel))
            .alignment(Alignment::Center),
        cancel_area,
    );
    f.render_widget(
        Paragraph::new(PROCEED_LABEL)
            .style(control_style(app, &modal, ModalFocus::Proceed))
            .alignment(Alignment::Center),
        proceed_area,
    );

    app.hit_map.modal = Some(overlay);
    app.hit_map.controls = vec![
        (checkbox_area, ModalFocus::DontShowAgain),
        (cancel_area, ModalFocus::Cancel),
        (proceed_area, ModalFocus::Proceed),
    ];
}

fn control_style(app: &App, modal: &DetailModal, control: ModalFocus) -> Style {
    if modal.focus == control {
        app.style("modal_button_focused")
    } else {
        app.style("modal_button")
    }
}
