//! Render functions for the TUI.
//!
//! Lays out the page top to bottom (header, hero, search box, section
//! heading, cards, footer, status bar) and draws overlays on top.

use crate::app::App;
use crate::util::truncate_to_width;
use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{cards, help, modal, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 16;

const HERO_TITLE: &str = "Your Personal Command Center";
const HERO_SUBTITLE: &str = "A curated suite of powerful tools to solve problems, streamline your digital life, and boost productivity.";
const SECTION_TITLE: &str = "Applications";
const SEARCH_PLACEHOLDER: &str = "Search apps...";

/// Main render dispatch function.
///
/// Handles terminal size validation, draws the page, then any overlay.
pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // At truly minimal dimensions, we can't render anything meaningful
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        app.hit_map = Default::default();
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // hero
            Constraint::Length(3), // search
            Constraint::Length(1), // section title
            Constraint::Min(0),    // cards
            Constraint::Length(1), // footer
            Constraint::Length(1), // status
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_hero(f, app, chunks[1]);
    render_search(f, app, chunks[2]);
    render_section_title(f, app, chunks[3]);

    if app.composition().is_empty() {
        app.hit_map.cards.clear();
        render_empty_state(f, app, chunks[4]);
    } else {
        cards::render(f, app, chunks[4]);
    }

    let footer = app.footer_text(chrono::Local::now().year());
    f.render_widget(
        Paragraph::new(Span::styled(footer, app.style("footer"))).alignment(Alignment::Center),
        chunks[5],
    );
    status::render(f, app, chunks[6]);

    modal::render(f, app);

    // Help sits above everything, including the details dialog
    if app.show_help {
        help::render(f, app);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let meta = format!(
        "{} apps · {} favorites · {} · {}",
        app.search.catalog().len(),
        app.favorites.len(),
        app.view_mode.name(),
        app.theme_variant.name(),
    );
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(meta.chars().count() as u16)])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(
            app.brand_name.as_str(),
            app.style("header_brand"),
        )),
        halves[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(meta, app.style("header_meta"))),
        halves[1],
    );
}

fn render_hero(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(HERO_TITLE, app.style("hero_title"))),
        Line::from(Span::styled(HERO_SUBTITLE, app.style("hero_subtitle"))),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_search(f: &mut Frame, app: &App, area: Rect) {
    let border = if app.search_mode {
        app.style("search_active")
    } else {
        app.style("card_border")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" / ");
    let inner = block.inner(area);

    let content = if app.search_input.is_empty() && !app.search_mode {
        Span::styled(SEARCH_PLACEHOLDER, app.style("search_placeholder"))
    } else {
        // Show the tail so the cursor stays in view for long queries
        let visible = tail_to_width(&app.search_input, inner.width.saturating_sub(1) as usize);
        Span::styled(visible, app.style("search_input"))
    };
    let shown = content.width() as u16;
    f.render_widget(Paragraph::new(content).block(block), area);

    if app.search_mode && !app.gate.is_open() && !app.show_help {
        f.set_cursor_position(Position::new(
            inner.x.saturating_add(shown.min(inner.width)),
            inner.y,
        ));
    }
}

/// Longest suffix of `s` that fits in `width` columns.
fn tail_to_width(s: &str, width: usize) -> &str {
    let mut start = s.len();
    let mut used = 0;
    for (i, c) in s.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = i;
    }
    &s[start..]
}

fn render_section_title(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(SECTION_TITLE, app.style("section_title"))];
    let query = app.search.query();
    if !query.is_empty() {
        spans.push(Span::styled(
            format!(
                "  {} of {} match \"{}\"",
                app.search.len(),
                app.search.catalog().len(),
                truncate_to_width(query, 24)
            ),
            app.style("header_meta"),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_empty_state(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("No applications found", app.style("empty_title"))),
    ];
    let query = app.search.query();
    if !query.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Your search for \"{}\" did not match any applications.",
                query
            ),
            app.style("empty_body"),
        )));
    }
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Config;
    use crate::launcher::{LaunchError, Launcher};
    use crate::preferences::PreferenceStore;
    use ratatui::{backend::TestBackend, Terminal};
    use url::Url;

    struct NoopLauncher;

    impl Launcher for NoopLauncher {
        fn launch(&self, _destination: &Url) -> Result<(), LaunchError> {
            Ok(())
        }
    }

    fn test_app() -> App {
        let config = Config::default();
        App::new(
            &config,
            Catalog::builtin(),
            PreferenceStore::from_config(&config),
            Box::new(NoopLauncher),
        )
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[tokio::test]
    async fn test_renders_catalog_in_grid() {
        let mut app = test_app();
        let screen = draw(&mut app, 120, 40);
        assert!(screen.contains("Your Personal Command Center"));
        assert!(screen.contains("Search apps..."));
        assert!(screen.contains("Google Search"));
        assert!(screen.contains("GitHub"));
        assert!(screen.contains("All rights reserved."));
        assert_eq!(app.grid_columns, 4);
        assert_eq!(app.hit_map.cards.len(), 4);
    }

    #[tokio::test]
    async fn test_renders_empty_state_with_query() {
        let mut app = test_app();
        app.search.apply("zzz");
        let screen = draw(&mut app, 100, 30);
        assert!(screen.contains("No applications found"));
        assert!(screen.contains("Your search for \"zzz\""));
        assert!(app.hit_map.cards.is_empty());
    }

    #[tokio::test]
    async fn test_too_small_terminal() {
        let mut app = test_app();
        let screen = draw(&mut app, 40, 12);
        assert!(screen.contains("Terminal too small"));
        assert!(app.hit_map.cards.is_empty());
    }

    #[tokio::test]
    async fn test_modal_records_hit_areas() {
        let mut app = test_app();
        app.show_info();
        let screen = draw(&mut app, 100, 30);
        assert!(screen.contains("Proceed to App"));
        assert!(screen.contains("Don't show this again for this app"));
        assert!(app.hit_map.modal.is_some());
        assert_eq!(app.hit_map.controls.len(), 3);

        app.gate.close();
        draw(&mut app, 100, 30);
        assert!(app.hit_map.modal.is_none());
    }

    #[test]
    fn test_tail_to_width() {
        assert_eq!(tail_to_width("hello", 10), "hello");
        assert_eq!(tail_to_width("hello", 3), "llo");
        assert_eq!(tail_to_width("hello", 0), "");
    }
}
