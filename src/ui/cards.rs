//! Catalog renderers: bordered cards in grid mode, one line per entry in
//! list mode. Favorites render first under their own heading.

use crate::app::App;
use crate::catalog::CatalogEntry;
use crate::util::{display_width, truncate_to_width};
use crate::view::{grid_columns, ViewMode};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Height of one grid card including its border.
pub(super) const CARD_HEIGHT: u16 = 5;

const FAVORITES_HEADING: &str = "★ Favorites";
const OTHERS_HEADING: &str = "All Apps";

/// One vertical slot of the scrollable content.
enum Slot<'a> {
    Heading(&'static str),
    /// A grid row, or a single list line: `(flat index, entry)` pairs.
    Entries(Vec<(usize, &'a CatalogEntry)>),
}

impl Slot<'_> {
    fn height(&self, mode: ViewMode) -> u16 {
        match (self, mode) {
            (Slot::Heading(_), _) => 1,
            (Slot::Entries(_), ViewMode::Grid) => CARD_HEIGHT,
            (Slot::Entries(_), ViewMode::List) => 1,
        }
    }

    fn contains(&self, index: usize) -> bool {
        matches!(self, Slot::Entries(items) if items.iter().any(|(i, _)| *i == index))
    }
}

/// Split the partitions into slots of `columns` entries.
fn build_slots<'a>(
    favorites: &[&'a CatalogEntry],
    others: &[&'a CatalogEntry],
    columns: usize,
) -> Vec<Slot<'a>> {
    let mut slots = Vec::new();
    let mut push_partition = |heading: Option<&'static str>, entries: &[&'a CatalogEntry], base: usize| {
        if let Some(h) = heading {
            slots.push(Slot::Heading(h));
        }
        for (row, chunk) in entries.chunks(columns.max(1)).enumerate() {
            let items = chunk
                .iter()
                .enumerate()
                .map(|(col, e)| (base + row * columns.max(1) + col, *e))
                .collect();
            slots.push(Slot::Entries(items));
        }
    };

    if favorites.is_empty() {
        push_partition(None, others, 0);
    } else {
        push_partition(Some(FAVORITES_HEADING), favorites, 0);
        if !others.is_empty() {
            push_partition(Some(OTHERS_HEADING), others, favorites.len());
        }
    }
    slots
}

/// First slot to draw so that the slot holding `selected` is fully visible.
fn scroll_start(slots: &[Slot<'_>], selected: usize, mode: ViewMode, height: u16) -> usize {
    let Some(target) = slots.iter().position(|s| s.contains(selected)) else {
        return 0;
    };
    let mut start = 0;
    let mut used: u16 = slots[..=target]
        .iter()
        .map(|s| s.height(mode))
        .fold(0, u16::saturating_add);
    while used > height && start < target {
        used = used.saturating_sub(slots[start].height(mode));
        start += 1;
    }
    start
}

/// Render both partitions into `area` and record card hit areas on `app`.
pub(super) fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let mode = app.view_mode;
    let columns = match mode {
        ViewMode::Grid => grid_columns(area.width),
        ViewMode::List => 1,
    };
    app.grid_columns = columns;
    app.clamp_selection();

    let mut hits = Vec::new();
    {
        let app = &*app;
        let comp = app.composition();
        let slots = build_slots(&comp.favorites, &comp.others, columns);
        let start = scroll_start(&slots, app.selected, mode, area.height);

        let mut y = area.y;
        let bottom = area.y.saturating_add(area.height);
        for slot in &slots[start..] {
            let h = slot.height(mode);
            if y.saturating_add(h) > bottom {
                break;
            }
            let row = Rect::new(area.x, y, area.width, h);
            match slot {
                Slot::Heading(text) => {
                    f.render_widget(
                        Paragraph::new(Span::styled(*text, app.style("section_title"))),
                        row,
                    );
                }
                Slot::Entries(items) => match mode {
                    ViewMode::Grid => {
                        let width = area.width / columns as u16;
                        for (col, (index, entry)) in items.iter().enumerate() {
                            let card = Rect::new(area.x + col as u16 * width, y, width, h);
                            render_card(f, app, entry, *index, card);
                            hits.push((card, *index));
                        }
                    }
                    ViewMode::List => {
                        for (index, entry) in items {
                            render_list_line(f, app, entry, *index, row);
                            hits.push((row, *index));
                        }
                    }
                },
            }
            y = y.saturating_add(h);
        }
    }
    app.hit_map.cards = hits;
}

/// Pick a style, dimmed while the entrance window is running.
fn entrance(app: &App, role: &str) -> Style {
    if app.is_entering() {
        app.style("card_entering")
    } else {
        app.style(role)
    }
}

fn title_spans<'a>(app: &App, entry: &'a CatalogEntry, max_width: usize) -> Vec<Span<'a>> {
    let badge = format!("[{}] ", entry.icon);
    let marker = if app.favorites.is_favorite(&entry.id) {
        " ★"
    } else {
        ""
    };
    let room = max_width
        .saturating_sub(display_width(&badge))
        .saturating_sub(display_width(marker));
    let mut spans = vec![
        Span::styled(badge, entrance(app, "card_icon")),
        Span::styled(
            truncate_to_width(&entry.title, room),
            entrance(app, "card_title"),
        ),
    ];
    if !marker.is_empty() {
        spans.push(Span::styled(marker, app.style("favorite_marker")));
    }
    spans
}

fn render_card(f: &mut Frame, app: &App, entry: &CatalogEntry, index: usize, area: Rect) {
    if area.width < 4 || area.height < 3 {
        return;
    }
    let border = if index == app.selected {
        app.style("card_border_selected")
    } else {
        entrance(app, "card_border")
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner_width = area.width.saturating_sub(2) as usize;

    let lines = vec![
        Line::from(title_spans(app, entry, inner_width)),
        Line::from(Span::styled(
            entry.short_description.as_str(),
            entrance(app, "card_description"),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_list_line(f: &mut Frame, app: &App, entry: &CatalogEntry, index: usize, area: Rect) {
    let width = area.width as usize;
    let mut spans = title_spans(app, entry, width / 2);
    spans.push(Span::styled("  ", Style::default()));

    let used: usize = spans.iter().map(|s| s.width()).sum();
    spans.push(Span::styled(
        truncate_to_width(&entry.short_description, width.saturating_sub(used)),
        entrance(app, "card_description"),
    ));

    let mut paragraph = Paragraph::new(Line::from(spans));
    if index == app.selected {
        paragraph = paragraph.style(app.style("list_selected"));
    }
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn entries(catalog: &Catalog) -> Vec<&CatalogEntry> {
        catalog.entries().iter().collect()
    }

    #[test]
    fn test_slots_without_favorites_have_no_heading() {
        let catalog = Catalog::builtin();
        let all = entries(&catalog);
        let slots = build_slots(&[], &all, 3);
        assert_eq!(slots.len(), 2);
        assert!(slots.iter().all(|s| matches!(s, Slot::Entries(_))));
        assert!(slots[1].contains(3));
    }

    #[test]
    fn test_slots_with_favorites_number_continuously() {
        let catalog = Catalog::builtin();
        let all = entries(&catalog);
        let slots = build_slots(&all[3..], &all[..3], 2);
        // heading, [3], heading, [0,1], [2]
        assert_eq!(slots.len(), 5);
        assert!(matches!(slots[0], Slot::Heading(FAVORITES_HEADING)));
        assert!(slots[1].contains(0));
        assert!(matches!(slots[2], Slot::Heading(OTHERS_HEADING)));
        assert!(slots[3].contains(1) && slots[3].contains(2));
        assert!(slots[4].contains(3));
    }

    #[test]
    fn test_scroll_keeps_selection_visible() {
        let catalog = Catalog::builtin();
        let all = entries(&catalog);
        let slots = build_slots(&[], &all, 1);
        // Four cards of height 5 in a 10-row area
        assert_eq!(scroll_start(&slots, 0, ViewMode::Grid, 10), 0);
        assert_eq!(scroll_start(&slots, 1, ViewMode::Grid, 10), 0);
        assert_eq!(scroll_start(&slots, 3, ViewMode::Grid, 10), 2);
        // List lines fit without scrolling
        assert_eq!(scroll_start(&slots, 3, ViewMode::List, 10), 0);
    }
}
