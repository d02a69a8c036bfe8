//! View composition: splits the filtered catalog into a favorites partition
//! and an "everything else" partition, and computes grid geometry.
//!
//! `compose` is pure. It never reorders entries and never consults
//! favorites that are absent from the filtered input, so stale ids in the
//! favorites set simply disappear from view.
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::catalog::CatalogEntry;

/// Width of one grid card, in terminal columns (including the gutter).
pub const CARD_WIDTH: u16 = 28;

/// Maximum number of grid columns, however wide the terminal.
pub const MAX_GRID_COLUMNS: usize = 4;

/// How long cards render in their "entering" style after a layout switch.
pub const ENTRANCE_DURATION: Duration = Duration::from_millis(150);

// ============================================================================
// View Mode
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }

    /// Parse a stored mode name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "grid" => Some(ViewMode::Grid),
            "list" => Some(ViewMode::List),
            _ => None,
        }
    }
}

// ============================================================================
// Composition
// ============================================================================

/// The two partitions rendered on screen.
///
/// Selection is a single index into `favorites ++ others`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition<'a> {
    pub mode: ViewMode,
    pub favorites: Vec<&'a CatalogEntry>,
    pub others: Vec<&'a CatalogEntry>,
}

impl<'a> Composition<'a> {
    pub fn len(&self) -> usize {
        self.favorites.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty() && self.others.is_empty()
    }

    /// Entry at a flat selection index.
    pub fn get(&self, index: usize) -> Option<&'a CatalogEntry> {
        if index < self.favorites.len() {
            self.favorites.get(index).copied()
        } else {
            self.others.get(index - self.favorites.len()).copied()
        }
    }

    /// Flat index of an entry id, if it is visible.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.iter().position(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a CatalogEntry> + '_ {
        self.favorites.iter().chain(self.others.iter()).copied()
    }
}

/// Partition `filtered` by favorite membership, preserving order in both.
pub fn compose<'a, I, F>(filtered: I, is_favorite: F, mode: ViewMode) -> Composition<'a>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
    F: Fn(&str) -> bool,
{
    let (favorites, others) = filtered.into_iter().partition(|e| is_favorite(&e.id));
    Composition {
        mode,
        favorites,
        others,
    }
}

// ============================================================================
// Grid Geometry & Navigation
// ============================================================================

/// Number of card columns that fit in `width` terminal columns.
pub fn grid_columns(width: u16) -> usize {
    ((width / CARD_WIDTH) as usize).clamp(1, MAX_GRID_COLUMNS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Move a flat selection index through the two partitions.
///
/// In grid mode each partition is laid out as its own grid of `columns`
/// columns; moving down off the last favorites row lands in the first row of
/// the other partition, keeping the column where possible. List mode is a
/// single column and ignores left/right.
pub fn step_selection(
    comp: &Composition<'_>,
    selected: usize,
    direction: Direction,
    columns: usize,
) -> usize {
    let total = comp.len();
    if total == 0 {
        return 0;
    }
    let selected = selected.min(total - 1);
    let cols = match comp.mode {
        ViewMode::Grid => columns.max(1),
        ViewMode::List => 1,
    };
    let fav_len = comp.favorites.len();
    let other_len = comp.others.len();
    let (in_favorites, index, part_len) = if selected < fav_len {
        (true, selected, fav_len)
    } else {
        (false, selected - fav_len, other_len)
    };
    let offset = if in_favorites { 0 } else { fav_len };
    let col = index % cols;

    match direction {
        Direction::Left => {
            if comp.mode == ViewMode::List {
                selected
            } else {
                selected.saturating_sub(1)
            }
        }
        Direction::Right => {
            if comp.mode == ViewMode::List {
                selected
            } else {
                (selected + 1).min(total - 1)
            }
        }
        Direction::Down => {
            if index + cols < part_len {
                offset + index + cols
            } else if index / cols < (part_len - 1) / cols {
                // Next row exists but is shorter than this column
                offset + part_len - 1
            } else if in_favorites && other_len > 0 {
                fav_len + col.min(other_len - 1)
            } else {
                selected
            }
        }
        Direction::Up => {
            if index >= cols {
                offset + index - cols
            } else if !in_favorites && fav_len > 0 {
                let last_row_start = ((fav_len - 1) / cols) * cols;
                (last_row_start + col).min(fav_len - 1)
            } else {
                selected
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
