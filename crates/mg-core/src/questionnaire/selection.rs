//! Option selection state.

use thiserror::Error;

use super::config::{OverflowPolicy, ScreenSelectionConfig};

/// Selection errors surfaced to the screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("option index {index} out of range")]
    UnknownOption { index: usize },
    /// The cap was hit under the reject-new policy; the screen shows a
    /// limit notice.
    #[error("selection limit of {max} reached")]
    LimitReached { max: usize },
}

/// Result of a successful toggle, for screen-side feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected { index: usize },
    Deselected { index: usize },
    /// The new pick was accepted and the oldest one dropped to make room
    /// (evict-oldest policy only).
    SelectedWithEviction { index: usize, evicted: usize },
}

/// In-memory selection state for one questionnaire screen.
///
/// Options are fixed and screen-defined; flags are keyed positionally.
/// Invariant: the number of set flags never exceeds the configured cap.
#[derive(Debug, Clone)]
pub struct SelectionState {
    options: Vec<String>,
    selected: Vec<bool>,
    // Pick order, oldest first. Drives evict-oldest and mirrors `selected`.
    picked_order: Vec<usize>,
    config: ScreenSelectionConfig,
}

impl SelectionState {
    pub fn new(options: Vec<String>, config: ScreenSelectionConfig) -> Self {
        let selected = vec![false; options.len()];
        Self {
            options,
            selected,
            picked_order: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &ScreenSelectionConfig {
        &self.config
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    pub fn selected_count(&self) -> usize {
        self.picked_order.len()
    }

    /// Indices of the selected options in display order.
    pub fn selected_indices(&self) -> Vec<usize> {
        (0..self.options.len())
            .filter(|&index| self.selected[index])
            .collect()
    }

    /// Toggle one option.
    ///
    /// Deselecting is always allowed. Selecting past the cap follows the
    /// configured overflow policy: reject the pick, or evict the oldest one.
    pub fn toggle(&mut self, index: usize) -> Result<SelectionChange, SelectionError> {
        if index >= self.options.len() {
            return Err(SelectionError::UnknownOption { index });
        }

        if self.selected[index] {
            self.selected[index] = false;
            self.picked_order.retain(|&picked| picked != index);
            return Ok(SelectionChange::Deselected { index });
        }

        if self.selected_count() < self.config.max_selections {
            self.selected[index] = true;
            self.picked_order.push(index);
            return Ok(SelectionChange::Selected { index });
        }

        match self.config.overflow {
            OverflowPolicy::RejectNew => Err(SelectionError::LimitReached {
                max: self.config.max_selections,
            }),
            OverflowPolicy::EvictOldest => {
                // The cap is at least 1, so there is an oldest pick to drop.
                let evicted = self.picked_order.remove(0);
                self.selected[evicted] = false;
                self.selected[index] = true;
                self.picked_order.push(index);
                Ok(SelectionChange::SelectedWithEviction { index, evicted })
            }
        }
    }
}
