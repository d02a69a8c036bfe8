//! Detail modal and the navigation gate in front of every outbound launch.
//!
//! ```text
//! Closed --select (not dismissed) / info--> Opening --10ms--> Open
//! Opening|Open --close | Esc | outside click--> Closed
//! Opening|Open --proceed--> [dismiss if checked] --> launch --> Closed
//! Closed --select (dismissed)--> launch, stays Closed
//! ```
//!
//! `Closed` is `None`; closing is immediate, so there is no separate
//! closing phase to track.
use std::time::Duration;
use tokio::time::Instant;

use crate::catalog::CatalogEntry;
use crate::launcher::{LaunchError, Launcher};
use crate::preferences::PreferenceStore;

/// Delay between the modal appearing and it taking its final style.
pub const OPEN_DELAY: Duration = Duration::from_millis(10);

// ============================================================================
// Modal State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Opening,
    Open,
}

/// Focusable controls, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalFocus {
    DontShowAgain,
    Cancel,
    Proceed,
}

impl ModalFocus {
    const ORDER: [ModalFocus; 3] = [
        ModalFocus::DontShowAgain,
        ModalFocus::Cancel,
        ModalFocus::Proceed,
    ];

    fn index(self) -> usize {
        match self {
            ModalFocus::DontShowAgain => 0,
            ModalFocus::Cancel => 1,
            ModalFocus::Proceed => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone)]
pub struct DetailModal {
    pub entry: CatalogEntry,
    pub phase: ModalPhase,
    pub focus: ModalFocus,
    pub dont_show_again: bool,
    opened_at: Instant,
}

impl DetailModal {
    fn new(entry: CatalogEntry, now: Instant) -> Self {
        Self {
            entry,
            phase: ModalPhase::Opening,
            focus: ModalFocus::Proceed,
            dont_show_again: false,
            opened_at: now,
        }
    }

    /// When the Opening phase ends, if it has not already.
    pub fn open_deadline(&self) -> Option<Instant> {
        match self.phase {
            ModalPhase::Opening => Some(self.opened_at + OPEN_DELAY),
            ModalPhase::Open => None,
        }
    }
}

/// What a gate operation did, for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The destination was handed to the launcher.
    Launched { title: String },
    ModalOpened,
    Closed,
    /// A modal control changed (focus, checkbox) without closing.
    Updated,
    /// Nothing to act on.
    Ignored,
}

// ============================================================================
// Navigation Gate
// ============================================================================

pub struct NavigationGate {
    modal: Option<DetailModal>,
    launcher: Box<dyn Launcher>,
}

impl NavigationGate {
    pub fn new(launcher: Box<dyn Launcher>) -> Self {
        Self {
            modal: None,
            launcher,
        }
    }

    pub fn modal(&self) -> Option<&DetailModal> {
        self.modal.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_some()
    }

    /// Primary action on a card: launch directly if the entry was
    /// dismissed, otherwise show the detail modal.
    pub fn select(
        &mut self,
        entry: &CatalogEntry,
        store: &PreferenceStore,
    ) -> Result<GateOutcome, LaunchError> {
        if self.modal.is_some() {
            return Ok(GateOutcome::Ignored);
        }
        if store.is_dismissed(&entry.id) {
            tracing::debug!(id = %entry.id, "Entry dismissed, launching without modal");
            return self.launch(entry);
        }
        Ok(self.info(entry))
    }

    /// Open the detail modal regardless of the dismiss registry.
    pub fn info(&mut self, entry: &CatalogEntry) -> GateOutcome {
        if self.modal.is_some() {
            return GateOutcome::Ignored;
        }
        self.modal = Some(DetailModal::new(entry.clone(), Instant::now()));
        GateOutcome::ModalOpened
    }

    /// Advance Opening to Open once the delay has elapsed. Returns true on
    /// a phase change.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &mut self.modal {
            Some(m) if m.open_deadline().is_some_and(|d| d <= now) => {
                m.phase = ModalPhase::Open;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.modal.as_ref().and_then(DetailModal::open_deadline)
    }

    /// Close without launching (Cancel, Esc, outside click).
    pub fn close(&mut self) -> GateOutcome {
        match self.modal.take() {
            Some(_) => GateOutcome::Closed,
            None => GateOutcome::Ignored,
        }
    }

    pub fn focus_next(&mut self) -> GateOutcome {
        self.update(|m| m.focus = m.focus.next())
    }

    pub fn focus_prev(&mut self) -> GateOutcome {
        self.update(|m| m.focus = m.focus.prev())
    }

    pub fn toggle_dont_show_again(&mut self) -> GateOutcome {
        self.update(|m| m.dont_show_again = !m.dont_show_again)
    }

    pub fn set_focus(&mut self, focus: ModalFocus) -> GateOutcome {
        self.update(|m| m.focus = focus)
    }

    /// Activate the focused control.
    pub async fn activate(
        &mut self,
        store: &mut PreferenceStore,
    ) -> Result<GateOutcome, LaunchError> {
        match self.modal.as_ref().map(|m| m.focus) {
            Some(ModalFocus::DontShowAgain) => Ok(self.toggle_dont_show_again()),
            Some(ModalFocus::Cancel) => Ok(self.close()),
            Some(ModalFocus::Proceed) => self.proceed(store).await,
            None => Ok(GateOutcome::Ignored),
        }
    }

    /// Leave for the entry's destination.
    ///
    /// With "don't show again" checked, the dismissal is written before the
    /// launch. A failed write is logged and the launch goes ahead. The modal
    /// is closed whether or not the launch succeeds.
    pub async fn proceed(
        &mut self,
        store: &mut PreferenceStore,
    ) -> Result<GateOutcome, LaunchError> {
        let Some(modal) = self.modal.take() else {
            return Ok(GateOutcome::Ignored);
        };
        if modal.dont_show_again {
            if let Err(e) = store.dismiss(&modal.entry.id).await {
                tracing::warn!(id = %modal.entry.id, error = %e, "Could not persist dismissal, launching anyway");
            }
        }
        self.launch(&modal.entry)
    }

    fn launch(&self, entry: &CatalogEntry) -> Result<GateOutcome, LaunchError> {
        self.launcher.launch(&entry.destination)?;
        Ok(GateOutcome::Launched {
            title: entry.title.clone(),
        })
    }

    fn update(&mut self, f: impl FnOnce(&mut DetailModal)) -> GateOutcome {
        match &mut self.modal {
            Some(m) => {
                f(m);
                GateOutcome::Updated
            }
            None => GateOutcome::Ignored,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
