//! The floating chat-window dock.
//!
//! Any number of chats can be logically open at once, but only as many
//! windows as fit the viewport width are materialized. [`ChatDock`] is the
//! single owner of the window registry; everything else (how many slots
//! exist, which windows show, where a slot sits on screen) is derived from
//! `(registry, viewport)` on demand, so a resize or registry change takes
//! effect on the next frame with no cached state to invalidate.

use ratatui::layout::Size;
use tracing::debug;

use crate::config::DockConfig;
use crate::window::{Position, WindowEntry};

/// A window that won a dock slot. `queue_index` 0 is the rightmost
/// (most-recently-opened) slot; each higher index sits one slot further
/// left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow<Id> {
    pub id: Id,
    pub queue_index: usize,
}

/// Result of one visible-set computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockSnapshot<Id> {
    /// Windows to materialize, oldest slot first. Never longer than
    /// `max_windows`.
    pub to_show: Vec<VisibleWindow<Id>>,
    /// Minimized windows plus non-minimized windows that lost the capacity
    /// race, in registry order. This is the overflow queue behind the
    /// summary badge.
    pub hidden: Vec<Id>,
}

impl<Id> DockSnapshot<Id> {
    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }
}

#[derive(Debug, Clone)]
pub struct ChatDock<Id: Copy + Eq + Ord> {
    entries: Vec<WindowEntry<Id>>,
    config: DockConfig,
}

impl<Id: Copy + Eq + Ord + std::fmt::Debug> ChatDock<Id> {
    pub fn new(config: DockConfig) -> Self {
        Self {
            entries: Vec::new(),
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> DockConfig {
        self.config
    }

    /// Registry in insertion order. Exposed for the overflow popover and
    /// for tests; mutation goes through `open`/`close`/`toggle_minimize`
    /// only.
    pub fn entries(&self) -> &[WindowEntry<Id>] {
        &self.entries
    }

    pub fn is_open(&self, id: Id) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Open a chat window, or promote it if it is already registered.
    ///
    /// The entry ends up last in the registry (most-recently-opened) with
    /// `minimized` cleared, and the registry never holds two entries for
    /// the same id.
    pub fn open(&mut self, id: Id) {
        self.entries.retain(|e| e.id != id);
        self.entries.push(WindowEntry {
            id,
            minimized: false,
        });
        debug!(?id, open = self.entries.len(), "window opened");
    }

    /// Remove a window entirely. Unknown ids are a no-op. The caller drops
    /// the window's drag controller with it; positions are not persisted.
    pub fn close(&mut self, id: Id) {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() != before {
            debug!(?id, open = self.entries.len(), "window closed");
        }
    }

    /// Flip a window's minimized flag in place; registry order is
    /// unchanged. Unknown ids are a no-op.
    pub fn toggle_minimize(&mut self, id: Id) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.minimized = !entry.minimized;
            debug!(?id, minimized = entry.minimized, "window minimize toggled");
        }
    }

    /// How many window slots the viewport width allows. At least 1: even a
    /// sliver of a viewport keeps one conversation reachable.
    pub fn max_windows(&self, viewport_width: u16) -> usize {
        let slot = self.config.window_width as usize + self.config.gap as usize;
        let avail = viewport_width.saturating_sub(self.config.side_padding) as usize;
        (avail / slot).max(1)
    }

    /// Partition the registry into materialized windows and the overflow
    /// queue. Most-recently-opened non-minimized entries win the slots;
    /// capacity is fixed, so promoting a hidden window evicts the oldest
    /// visible one.
    pub fn visible_set(&self, viewport_width: u16) -> DockSnapshot<Id> {
        let max_windows = self.max_windows(viewport_width);
        let non_minimized: Vec<Id> = self
            .entries
            .iter()
            .filter(|e| !e.minimized)
            .map(|e| e.id)
            .collect();
        let cut = non_minimized.len().saturating_sub(max_windows);
        let shown = &non_minimized[cut..];

        let to_show = shown
            .iter()
            .enumerate()
            .map(|(i, &id)| VisibleWindow {
                id,
                // rightmost slot = most recent
                queue_index: shown.len() - 1 - i,
            })
            .collect();
        let hidden = self
            .entries
            .iter()
            .filter(|e| e.minimized || non_minimized[..cut].contains(&e.id))
            .map(|e| e.id)
            .collect();

        DockSnapshot { to_show, hidden }
    }

    /// Initial on-screen position for a dock slot: stacked from the
    /// viewport's bottom-right corner, each slot one window-width-plus-gap
    /// further left, clamped so shrunken viewports still pin the window on
    /// screen.
    pub fn stack_position(&self, queue_index: usize, viewport: Size) -> Position {
        let cfg = self.config;
        let slot = cfg.window_width as usize + cfg.gap as usize;
        let right_edge = viewport
            .width
            .saturating_sub(cfg.side_padding)
            .saturating_sub(cfg.window_width) as usize;
        let x = right_edge.saturating_sub(queue_index * slot);
        let y = viewport
            .height
            .saturating_sub(cfg.bottom_padding)
            .saturating_sub(cfg.window_height);
        Position {
            x: x.min(u16::MAX as usize) as u16,
            y,
        }
    }

    /// Uniform size for every docked window.
    pub fn window_size(&self) -> Size {
        Size::new(self.config.window_width, self.config.window_height)
    }
}
