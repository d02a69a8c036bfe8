//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    /// Name under which the variant is persisted.
    pub fn key(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Header / hero --
    pub header_brand: Style,
    pub header_meta: Style,
    pub hero_title: Style,
    pub hero_subtitle: Style,
    pub section_title: Style,

    // -- Search box --
    pub search_input: Style,
    pub search_active: Style,
    pub search_placeholder: Style,

    // -- Cards --
    pub card_border: Style,
    pub card_border_selected: Style,
    pub card_title: Style,
    pub card_description: Style,
    pub card_icon: Style,
    pub card_entering: Style,
    pub favorite_marker: Style,
    pub list_selected: Style,

    // -- Empty state --
    pub empty_title: Style,
    pub empty_body: Style,

    // -- Details dialog --
    pub modal_border: Style,
    pub modal_title: Style,
    pub modal_body: Style,
    pub modal_button: Style,
    pub modal_button_focused: Style,
    pub modal_opening: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub footer: Style,
    pub help_key: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            header_brand: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            header_meta: Style::default().fg(Color::DarkGray),
            hero_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            hero_subtitle: Style::default().fg(Color::Gray),
            section_title: Style::default().add_modifier(Modifier::BOLD),

            search_input: Style::default().fg(Color::Gray),
            search_active: Style::default().fg(Color::Cyan),
            search_placeholder: Style::default().fg(Color::DarkGray),

            card_border: Style::default().fg(Color::DarkGray),
            card_border_selected: Style::default().fg(Color::Magenta),
            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_description: Style::default().fg(Color::Gray),
            card_icon: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            card_entering: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            favorite_marker: Style::default().fg(Color::Yellow),
            list_selected: Style::default().bg(Color::DarkGray).fg(Color::White),

            empty_title: Style::default().add_modifier(Modifier::BOLD),
            empty_body: Style::default().fg(Color::Gray),

            modal_border: Style::default().fg(Color::Magenta),
            modal_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            modal_body: Style::default(),
            modal_button: Style::default().fg(Color::Gray),
            modal_button_focused: Style::default()
                .bg(Color::Magenta)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            modal_opening: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            footer: Style::default().fg(Color::DarkGray),
            help_key: Style::default().fg(Color::Cyan),
        }
    }

    fn light() -> Self {
        Self {
            header_brand: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_meta: Style::default().fg(Color::DarkGray),
            hero_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            hero_subtitle: Style::default().fg(Color::DarkGray),
            section_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            search_input: Style::default().fg(Color::Black),
            search_active: Style::default().fg(Color::Blue),
            search_placeholder: Style::default().fg(Color::Gray),

            card_border: Style::default().fg(Color::Gray),
            card_border_selected: Style::default().fg(Color::Blue),
            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_description: Style::default().fg(Color::DarkGray),
            card_icon: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            card_entering: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::DIM),
            favorite_marker: Style::default().fg(Color::Magenta),
            list_selected: Style::default().bg(Color::Blue).fg(Color::White),

            empty_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            empty_body: Style::default().fg(Color::DarkGray),

            modal_border: Style::default().fg(Color::Blue),
            modal_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            modal_body: Style::default().fg(Color::Black),
            modal_button: Style::default().fg(Color::DarkGray),
            modal_button_focused: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            modal_opening: Style::default().fg(Color::Gray),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            footer: Style::default().fg(Color::DarkGray),
            help_key: Style::default().fg(Color::Blue),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this resolves role names (e.g.
/// `"card_title"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 27] = [
    "header_brand",
    "header_meta",
    "hero_title",
    "hero_subtitle",
    "section_title",
    "search_input",
    "search_active",
    "search_placeholder",
    "card_border",
    "card_border_selected",
    "card_title",
    "card_description",
    "card_icon",
    "card_entering",
    "favorite_marker",
    "list_selected",
    "empty_title",
    "empty_body",
    "modal_border",
    "modal_title",
    "modal_body",
    "modal_button",
    "modal_button_focused",
    "modal_opening",
    "status_bar",
    "footer",
    "help_key",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 27] = [
            p.header_brand,
            p.header_meta,
            p.hero_title,
            p.hero_subtitle,
            p.section_title,
            p.search_input,
            p.search_active,
            p.search_placeholder,
            p.card_border,
            p.card_border_selected,
            p.card_title,
            p.card_description,
            p.card_icon,
            p.card_entering,
            p.favorite_marker,
            p.list_selected,
            p.empty_title,
            p.empty_body,
            p.modal_border,
            p.modal_title,
            p.modal_body,
            p.modal_button,
            p.modal_button_focused,
            p.modal_opening,
            p.status_bar,
            p.footer,
            p.help_key,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
