//! Two-phase answer flow: selecting, then ordering.

use thiserror::Error;

use super::config::{ConfirmGate, ScreenSelectionConfig};
use super::ranking::{OrderedAnswer, RankedList, RankingError};
use super::selection::{SelectionChange, SelectionError, SelectionState};

/// Which phase the flow is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerPhase {
    Selecting,
    Ordering,
    /// The ranked result has been emitted; the flow is over.
    Done,
}

/// Flow errors surfaced to the screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerFlowError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Ranking(#[from] RankingError),
    #[error("at least one selection is required to continue")]
    EmptySelection,
    /// The exact-count gate rejected the transition to ordering.
    #[error("exactly {required} selections required, found {actual}")]
    CountMismatch { required: usize, actual: usize },
    #[error("operation not valid in the current phase")]
    PhaseMismatch,
}

enum Phase {
    Selecting,
    Ordering(RankedList),
    Done,
}

/// The selection-then-ranking state machine behind questionnaire screens.
///
/// Confirming snapshots the current picks into a ranked sequence; going
/// back discards the ranking but keeps every selection flag untouched, so
/// reordering can never retroactively deselect anything.
pub struct AnswerFlow {
    selection: SelectionState,
    phase: Phase,
}

impl AnswerFlow {
    pub fn new(options: Vec<String>, config: ScreenSelectionConfig) -> Self {
        Self {
            selection: SelectionState::new(options, config),
            phase: Phase::Selecting,
        }
    }

    pub fn phase(&self) -> AnswerPhase {
        match self.phase {
            Phase::Selecting => AnswerPhase::Selecting,
            Phase::Ordering(_) => AnswerPhase::Ordering,
            Phase::Done => AnswerPhase::Done,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current ranked arrangement, if the flow is in the ordering phase.
    pub fn ranked(&self) -> Option<&[OrderedAnswer]> {
        match &self.phase {
            Phase::Ordering(list) => Some(list.items()),
            _ => None,
        }
    }

    /// Toggle one option. Only valid while selecting.
    pub fn toggle(&mut self, index: usize) -> Result<SelectionChange, AnswerFlowError> {
        match self.phase {
            Phase::Selecting => Ok(self.selection.toggle(index)?),
            _ => Err(AnswerFlowError::PhaseMismatch),
        }
    }

    /// Confirm the selection and enter the ordering phase.
    ///
    /// The configured gate decides whether the transition is allowed; on
    /// success the picks are snapshotted in display order with `order`
    /// assigned from position.
    pub fn confirm_selection(&mut self) -> Result<&[OrderedAnswer], AnswerFlowError> {
        if !matches!(self.phase, Phase::Selecting) {
            return Err(AnswerFlowError::PhaseMismatch);
        }

        let picked = self.selection.selected_indices();
        match self.selection.config().confirm_gate {
            ConfirmGate::AtLeastOne if picked.is_empty() => {
                return Err(AnswerFlowError::EmptySelection);
            }
            ConfirmGate::Exactly(required) if picked.len() != required => {
                return Err(AnswerFlowError::CountMismatch {
                    required,
                    actual: picked.len(),
                });
            }
            _ => {}
        }

        let list = RankedList::from_selection(self.selection.options(), &picked);
        self.phase = Phase::Ordering(list);
        match &self.phase {
            Phase::Ordering(list) => Ok(list.items()),
            // Set on the line above.
            _ => Err(AnswerFlowError::PhaseMismatch),
        }
    }

    /// Move one answer to a new position. Only valid while ordering.
    pub fn move_answer(&mut self, from: usize, to: usize) -> Result<&[OrderedAnswer], AnswerFlowError> {
        match &mut self.phase {
            Phase::Ordering(list) => {
                list.move_item(from, to)?;
                Ok(list.items())
            }
            _ => Err(AnswerFlowError::PhaseMismatch),
        }
    }

    /// Leave the ordering phase, discarding the ranking. Selection flags are
    /// kept exactly as they were. A no-op while already selecting.
    pub fn back_to_selection(&mut self) {
        if matches!(self.phase, Phase::Ordering(_)) {
            self.phase = Phase::Selecting;
        }
    }

    /// Emit the final ranked sequence and end the flow.
    pub fn finish(&mut self) -> Result<Vec<OrderedAnswer>, AnswerFlowError> {
        match std::mem::replace(&mut self.phase, Phase::Done) {
            Phase::Ordering(list) => Ok(list.into_items()),
            other => {
                self.phase = other;
                Err(AnswerFlowError::PhaseMismatch)
            }
        }
    }
}
